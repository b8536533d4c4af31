use serde::{Deserialize, Serialize};

use crate::utils::get_epoch_ms;

/// Profile document written alongside the identity-provider account at
/// sign-up and read back at sign-in.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_name: String,
    pub email: String,
    /// Account id assigned by the identity provider
    pub user_id: String,
    pub created_at: u64,
}

impl UserProfile {
    pub fn new(user_name: &str, email: &str, user_id: &str) -> Self {
        Self {
            user_name: user_name.to_owned(),
            email: email.to_owned(),
            user_id: user_id.to_owned(),
            created_at: get_epoch_ms(),
        }
    }
}
