use std::sync::Arc;

use mockall_double::double;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::utils::AppError;

#[double]
use crate::storage::LocalStorage;

/// In-app notification toggles, stored as one JSON blob
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPrefs {
    pub booking_confirmations: bool,
    pub offers_deals: bool,
    pub reminders: bool,
    pub app_updates: bool,
}

impl Default for NotificationPrefs {
    fn default() -> Self {
        Self {
            booking_confirmations: true,
            offers_deals: true,
            reminders: true,
            app_updates: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrefKey {
    BookingConfirmations,
    OffersDeals,
    Reminders,
    AppUpdates,
}

impl NotificationPrefs {
    /// Missing or corrupt stored prefs fall back to the defaults
    pub async fn load(storage: &Arc<LocalStorage>) -> Self {
        let Some(stored) = storage.get_item(KEY_NOTIFICATION_PREFS).await else {
            return Self::default();
        };
        serde_json::from_str(&stored).unwrap_or_default()
    }

    pub async fn save(&self, storage: &Arc<LocalStorage>) -> Result<(), AppError> {
        let blob = serde_json::to_string(self)?;
        storage.set_item(KEY_NOTIFICATION_PREFS, &blob).await?;
        Ok(())
    }

    pub fn toggle(&mut self, key: PrefKey) {
        match key {
            PrefKey::BookingConfirmations => {
                self.booking_confirmations = !self.booking_confirmations
            }
            PrefKey::OffersDeals => self.offers_deals = !self.offers_deals,
            PrefKey::Reminders => self.reminders = !self.reminders,
            PrefKey::AppUpdates => self.app_updates = !self.app_updates,
        }
    }
}
