use chrono::{TimeZone, Utc};
use mockall_double::double;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use super::slot::SlotSelection;
use crate::constants::*;
use crate::models::booking::Booking;
use crate::session::is_phone_verified;
use crate::utils::{normalize_phone, validate_fullname, validate_phonenumber, AppError};

#[double]
use crate::database::AppDatabase;
#[double]
use crate::storage::LocalStorage;

/// Who the booking is for
#[derive(Debug, Clone, PartialEq)]
pub enum Identity {
    Authenticated { email: String },
    Guest { full_name: String, mobile_number: String },
}

/// Name and phone captured by the guest checkout form
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GuestDetails {
    #[validate(custom(function = "validate_fullname"))]
    pub full_name: String,

    #[validate(custom(function = "validate_phonenumber"))]
    pub mobile_number: String,
}

impl From<GuestDetails> for Identity {
    fn from(details: GuestDetails) -> Self {
        Self::Guest {
            full_name: details.full_name,
            mobile_number: details.mobile_number,
        }
    }
}

/// Write one booking record for the current selection.
///
/// Authenticated callers book directly. Guests book only when their phone
/// is in the verification cache; otherwise `VerificationRequired` routes
/// the caller into an OTP round, after which `submit_booking` is invoked
/// again.
///
/// Each successful call appends exactly one document. There is no
/// idempotency key and no capacity or double-booking check: a retry after
/// a failed write, or two bookings for the same slot, both create new
/// records.
pub async fn submit_booking(
    db: &Arc<AppDatabase>,
    storage: &Arc<LocalStorage>,
    selection: &SlotSelection,
    identity: &Identity,
    restaurant_name: &str,
) -> Result<Booking, AppError> {
    let Some(slot) = selection.slot.as_deref() else {
        return Err(AppError::NoSlotSelected);
    };
    let date = booking_date(selection);
    let booking = match identity {
        Identity::Authenticated { email } => {
            Booking::for_account(email, restaurant_name, slot, &date, selection.guest_count)
        }
        Identity::Guest {
            full_name,
            mobile_number,
        } => {
            let phone = normalize_phone(mobile_number);
            if !is_phone_verified(storage, &phone).await {
                return Err(AppError::VerificationRequired);
            }
            Booking::for_guest(
                full_name,
                &phone,
                restaurant_name,
                slot,
                &date,
                selection.guest_count,
            )
        }
    };
    let booking_id = db
        .insert_one::<Booking>(DB_NAME, COLL_BOOKINGS, &booking, None)
        .await?;
    tracing::debug!("Booking {booking_id} created for {restaurant_name} at {slot}");
    Ok(booking)
}

fn booking_date(selection: &SlotSelection) -> String {
    match selection.date.and_hms_opt(0, 0, 0) {
        Some(midnight) => Utc.from_utc_datetime(&midnight).to_rfc3339(),
        None => selection.date.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::predicate::{always, eq, function};

    use super::*;
    use crate::utils::get_epoch_ms;

    fn chosen_selection(slot: &str, guests: u32) -> SlotSelection {
        let mut selection = SlotSelection::new();
        selection.choose_slot(slot);
        selection.set_guest_count(guests);
        selection
    }

    fn verified_storage(phone: &'static str) -> Arc<LocalStorage> {
        let mut storage = LocalStorage::default();
        storage
            .expect_get_item()
            .with(eq(KEY_GUEST_VERIFIED_PHONE))
            .returning(move |_| Some(phone.to_owned()));
        storage
            .expect_get_item()
            .with(eq(KEY_GUEST_VERIFIED_AT))
            .returning(|_| Some(get_epoch_ms().to_string()));
        Arc::new(storage)
    }

    #[tokio::test]
    async fn test_authenticated_submit_writes_one_record() {
        let mut db = AppDatabase::default();
        db.expect_insert_one::<Booking>()
            .with(
                eq(DB_NAME),
                eq(COLL_BOOKINGS),
                function(|b: &Booking| {
                    b.email.as_deref() == Some("a@b.com")
                        && b.slot == "7:00 PM"
                        && b.guests == 4
                        && b.is_guest.is_none()
                }),
                always(),
            )
            .times(1)
            .returning(|_, _, _, _| Ok("64b2f0c9a1d2e3f4a5b6c7d8".to_owned()));
        let db = Arc::new(db);
        // no storage reads happen for authenticated bookings
        let storage = Arc::new(LocalStorage::default());
        let selection = chosen_selection("7:00 PM", 4);
        let identity = Identity::Authenticated {
            email: "a@b.com".to_owned(),
        };
        let booking = submit_booking(&db, &storage, &selection, &identity, "Cafe Nova")
            .await
            .unwrap();
        assert_eq!(booking.restaurant_name, "Cafe Nova");
        assert_eq!(booking.date.starts_with(&Utc::now().date_naive().to_string()), true);
    }

    #[tokio::test]
    async fn test_submit_without_slot_is_rejected() {
        let db = Arc::new(AppDatabase::default());
        let storage = Arc::new(LocalStorage::default());
        let selection = SlotSelection::new();
        let identity = Identity::Authenticated {
            email: "a@b.com".to_owned(),
        };
        let result = submit_booking(&db, &storage, &selection, &identity, "Cafe Nova").await;
        match result {
            Err(AppError::NoSlotSelected) => {}
            other => panic!("expected NoSlotSelected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unverified_guest_is_routed_to_otp() {
        let db = Arc::new(AppDatabase::default());
        let mut storage = LocalStorage::default();
        storage.expect_get_item().returning(|_| None);
        let storage = Arc::new(storage);
        let selection = chosen_selection("7:00 PM", 2);
        let identity = Identity::Guest {
            full_name: "John Doe".to_owned(),
            mobile_number: "9876543210".to_owned(),
        };
        let result = submit_booking(&db, &storage, &selection, &identity, "Cafe Nova").await;
        match result {
            Err(AppError::VerificationRequired) => {}
            other => panic!("expected VerificationRequired, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_verified_guest_books_directly() {
        let mut db = AppDatabase::default();
        db.expect_insert_one::<Booking>()
            .with(
                eq(DB_NAME),
                eq(COLL_BOOKINGS),
                function(|b: &Booking| {
                    b.is_guest == Some(true)
                        && b.mobile_number.as_deref() == Some("+919876543210")
                        && b.email.is_none()
                }),
                always(),
            )
            .times(1)
            .returning(|_, _, _, _| Ok("64b2f0c9a1d2e3f4a5b6c7d8".to_owned()));
        let db = Arc::new(db);
        let storage = verified_storage("+919876543210");
        let selection = chosen_selection("7:00 PM", 2);
        let identity = Identity::Guest {
            full_name: "John Doe".to_owned(),
            mobile_number: "9876543210".to_owned(),
        };
        let booking = submit_booking(&db, &storage, &selection, &identity, "Cafe Nova")
            .await
            .unwrap();
        assert_eq!(booking.full_name.as_deref(), Some("John Doe"));
    }

    #[tokio::test]
    async fn test_guest_verified_long_ago_must_reverify() {
        let db = Arc::new(AppDatabase::default());
        let mut storage = LocalStorage::default();
        storage
            .expect_get_item()
            .with(eq(KEY_GUEST_VERIFIED_PHONE))
            .returning(|_| Some("+919876543210".to_owned()));
        // verified 25 hours ago, one hour past the window
        storage
            .expect_get_item()
            .with(eq(KEY_GUEST_VERIFIED_AT))
            .returning(|_| Some((get_epoch_ms() - 25 * 60 * 60 * 1000).to_string()));
        let storage = Arc::new(storage);
        let selection = chosen_selection("7:00 PM", 2);
        let identity = Identity::Guest {
            full_name: "John Doe".to_owned(),
            mobile_number: "9876543210".to_owned(),
        };
        let result = submit_booking(&db, &storage, &selection, &identity, "Cafe Nova").await;
        match result {
            Err(AppError::VerificationRequired) => {}
            other => panic!("expected VerificationRequired, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_store_write_failure_surfaces() {
        let mut db = AppDatabase::default();
        db.expect_insert_one::<Booking>()
            .returning(|_, _, _, _| {
                Err(mongodb::error::Error::custom("connection reset"))
            });
        let db = Arc::new(db);
        let storage = Arc::new(LocalStorage::default());
        let selection = chosen_selection("7:00 PM", 2);
        let identity = Identity::Authenticated {
            email: "a@b.com".to_owned(),
        };
        let result = submit_booking(&db, &storage, &selection, &identity, "Cafe Nova").await;
        match result {
            Err(AppError::AnyError(_)) => {}
            other => panic!("expected AnyError, got {other:?}"),
        }
    }
}
