use std::sync::Arc;

use mockall_double::double;

use crate::constants::*;
use crate::utils::AppError;

pub mod guest_verification;
pub mod notification_prefs;

pub use guest_verification::{clear_verified_phone, is_phone_verified, save_verified_phone};
pub use notification_prefs::{NotificationPrefs, PrefKey};

#[double]
use crate::storage::LocalStorage;

/// Who the client is acting as. Loaded once per screen from local storage
/// and passed explicitly to whatever needs it, instead of each call site
/// re-reading storage flags on its own.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Session {
    pub user_email: Option<String>,
    pub user_name: Option<String>,
    pub is_guest: bool,
}

impl Session {
    /// Rebuild the session from persisted flags. An absent email or an
    /// explicit guest flag both mean guest mode.
    pub async fn load(storage: &Arc<LocalStorage>) -> Self {
        let guest_flag = storage.get_item(KEY_IS_GUEST).await;
        let user_email = storage.get_item(KEY_USER_EMAIL).await;
        let user_name = storage.get_item(KEY_USER_NAME).await;
        let is_guest = guest_flag.as_deref() == Some("true")
            || user_email.is_none()
            || user_email.as_deref() == Some("guest");
        Self {
            user_email,
            user_name,
            is_guest,
        }
    }

    pub async fn persist(&self, storage: &Arc<LocalStorage>) -> Result<(), AppError> {
        if let Some(email) = &self.user_email {
            storage.set_item(KEY_USER_EMAIL, email).await?;
        }
        if let Some(name) = &self.user_name {
            storage.set_item(KEY_USER_NAME, name).await?;
        }
        if self.is_guest {
            storage.set_item(KEY_IS_GUEST, "true").await?;
        } else {
            storage.remove_item(KEY_IS_GUEST).await?;
        }
        Ok(())
    }

    /// Sign out of the account and fall back to guest mode
    pub async fn continue_as_guest(storage: &Arc<LocalStorage>) -> Result<Self, AppError> {
        storage.remove_item(KEY_USER_EMAIL).await?;
        storage.remove_item(KEY_USER_NAME).await?;
        storage.set_item(KEY_IS_GUEST, "true").await?;
        Ok(Self {
            user_email: None,
            user_name: None,
            is_guest: true,
        })
    }

    /// Rename the signed-in user on this device
    pub async fn update_user_name(
        &mut self,
        storage: &Arc<LocalStorage>,
        name: &str,
    ) -> Result<(), AppError> {
        storage.set_item(KEY_USER_NAME, name).await?;
        self.user_name = Some(name.to_owned());
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        !self.is_guest && self.user_email.is_some()
    }
}
