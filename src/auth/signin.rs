use mockall_double::double;
use mongodb::bson::doc;
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
pub struct SigninReq {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 6))]
    pub password: String,
}

/// Authenticate against the identity provider, check the returned id token
/// against the provider's JWKS, load the profile document, and switch the
/// local session to the account.
pub async fn sign_in_user(
    auth: &Arc<AuthClient>,
    db: &Arc<AppDatabase>,
    storage: &Arc<LocalStorage>,
    req: &SigninReq,
) -> Result<Session, AppError> {
    req.validate()
        .map_err(|err| AppError::BadRequestErr(err.to_string()))?;
    let user = auth.sign_in(&req.email, &req.password).await?;
    let claims = auth.verify_id_token(&user.id_token).await?;
    let filter = Some(doc! {"userId": claims.sub.as_str()});
    let not_found = format!("User profile not found for {}", req.email);
    let profile = db
        .find_one::<UserProfile>(DB_NAME, COLL_USERS, filter, None)
        .await?
        .ok_or(AppError::NotFound(not_found))?;
    let session = Session {
        user_email: Some(user.email),
        user_name: Some(profile.user_name),
        is_guest: false,
    };
    session.persist(storage).await?;
    Ok(session)
}
