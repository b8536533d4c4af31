use std::sync::Arc;

use mockall_double::double;

use crate::constants::*;
use crate::utils::{get_epoch_ms, AppError};

#[double]
use crate::storage::LocalStorage;

/// Check if a phone number was already verified within the session window.
/// Anything unexpected in the cache, a missing key, a foreign phone, an
/// unparseable timestamp, counts as not verified.
pub async fn is_phone_verified(storage: &Arc<LocalStorage>, phone: &str) -> bool {
    let Some(saved_phone) = storage.get_item(KEY_GUEST_VERIFIED_PHONE).await else {
        return false;
    };
    let Some(saved_at) = storage.get_item(KEY_GUEST_VERIFIED_AT).await else {
        return false;
    };
    if saved_phone != phone {
        return false;
    }
    let Ok(saved_at) = saved_at.parse::<u64>() else {
        return false;
    };
    let elapsed = get_epoch_ms().saturating_sub(saved_at);
    elapsed < GUEST_VERIFICATION_TTL_MS
}

/// Cache a verified phone number with the current timestamp.
/// The cache holds a single phone: a new verification overwrites the old
/// one whatever the number was.
pub async fn save_verified_phone(storage: &Arc<LocalStorage>, phone: &str) -> Result<(), AppError> {
    storage.set_item(KEY_GUEST_VERIFIED_PHONE, phone).await?;
    storage
        .set_item(KEY_GUEST_VERIFIED_AT, &get_epoch_ms().to_string())
        .await?;
    Ok(())
}

/// Clear cached phone verification data.
pub async fn clear_verified_phone(storage: &Arc<LocalStorage>) -> Result<(), AppError> {
    storage.remove_item(KEY_GUEST_VERIFIED_PHONE).await?;
    storage.remove_item(KEY_GUEST_VERIFIED_AT).await?;
    Ok(())
}
