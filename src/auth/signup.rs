use mockall_double::double;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::constants::*;
use crate::models::user::UserProfile;
use crate::session::Session;
use crate::utils::AppError;

#[double]
use super::client::AuthClient;
#[double]
use crate::database::AppDatabase;
#[double]
use crate::storage::LocalStorage;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupReq {
    #[validate(length(min = 1, max = 50))]
    pub user_name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 6))]
    pub password: String,
}

/// Create the account with the identity provider, write the profile
/// document, and switch the local session to the new account.
pub async fn sign_up_user(
    auth: &Arc<AuthClient>,
    db: &Arc<AppDatabase>,
    storage: &Arc<LocalStorage>,
    req: &SignupReq,
) -> Result<Session, AppError> {
    req.validate()
        .map_err(|err| AppError::BadRequestErr(err.to_string()))?;
    let user = auth.sign_up(&req.email, &req.password).await?;
    let profile = UserProfile::new(&req.user_name, &user.email, &user.local_id);
    db.insert_one::<UserProfile>(DB_NAME, COLL_USERS, &profile, None)
        .await?;
    let session = Session {
        user_email: Some(user.email),
        user_name: Some(req.user_name.to_owned()),
        is_guest: false,
    };
    session.persist(storage).await?;
    tracing::debug!("Account created for {}", req.email);
    Ok(session)
}
