use mockall_double::double;
use std::sync::Arc;
use validator::Validate;

use super::slot::SlotSelection;
use super::submit::{submit_booking, GuestDetails, Identity};
use crate::models::booking::Booking;
use crate::session::save_verified_phone;
use crate::utils::{normalize_phone, AppError};
use crate::verification::{CodeDelivery, OtpChallenge};

#[double]
use crate::database::AppDatabase;
#[double]
use crate::storage::LocalStorage;

/// Outcome of starting a guest checkout
#[derive(Debug)]
pub enum BeginOutcome {
    /// The phone was already verified within the session window, the
    /// booking is written with no OTP round
    Booked(Booking),
    /// A code was issued and delivered; `verify_and_book` completes the
    /// checkout
    OtpSent { message: Option<String> },
}

/// The guest booking flow behind the checkout modal: capture details, run
/// an OTP round when the verification cache is cold, then write the
/// booking. Dropping or closing the checkout discards the round.
pub struct GuestCheckout<D: CodeDelivery> {
    pub challenge: OtpChallenge,
    delivery: D,
    pending: Option<GuestDetails>,
}

impl<D: CodeDelivery> GuestCheckout<D> {
    pub fn new(delivery: D) -> Self {
        Self {
            challenge: OtpChallenge::new(),
            delivery,
            pending: None,
        }
    }

    /// Validate the form, then either book straight away (cache hit) or
    /// issue and deliver a code.
    pub async fn begin(
        &mut self,
        db: &Arc<AppDatabase>,
        storage: &Arc<LocalStorage>,
        selection: &SlotSelection,
        details: GuestDetails,
        restaurant_name: &str,
    ) -> Result<BeginOutcome, AppError> {
        details
            .validate()
            .map_err(|err| AppError::BadRequestErr(err.to_string()))?;
        let phone = normalize_phone(&details.mobile_number);
        self.pending = Some(details.clone());
        let identity = Identity::from(details);
        match submit_booking(db, storage, selection, &identity, restaurant_name).await {
            Ok(booking) => {
                self.challenge.reset();
                self.pending = None;
                Ok(BeginOutcome::Booked(booking))
            }
            Err(AppError::VerificationRequired) => {
                let code = self.challenge.issue(&phone);
                let message = self.delivery.deliver(&phone, &code)?;
                Ok(BeginOutcome::OtpSent { message })
            }
            Err(err) => Err(err),
        }
    }

    /// Check the submitted code, cache the verified phone, and write the
    /// booking.
    pub async fn verify_and_book(
        &mut self,
        db: &Arc<AppDatabase>,
        storage: &Arc<LocalStorage>,
        selection: &SlotSelection,
        restaurant_name: &str,
        code: &str,
    ) -> Result<Booking, AppError> {
        let Some(details) = self.pending.clone() else {
            return Err(AppError::BadRequestErr(
                "No guest details captured for this booking".into(),
            ));
        };
        self.challenge.verify(code)?;
        let phone = normalize_phone(&details.mobile_number);
        save_verified_phone(storage, &phone).await?;
        let identity = Identity::from(details);
        let booking = submit_booking(db, storage, selection, &identity, restaurant_name).await?;
        self.pending = None;
        Ok(booking)
    }

    /// Re-issue the code for the pending phone, subject to the cooldown
    pub fn resend_code(&mut self) -> Result<Option<String>, AppError> {
        let code = self.challenge.resend()?;
        let Some(phone) = self.challenge.target_phone() else {
            return Err(AppError::unknown_error());
        };
        self.delivery.deliver(phone, &code)
    }

    /// The modal closed: drop the challenge and the captured details
    pub fn close(&mut self) {
        self.challenge.reset();
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::{always, eq, function};

    use super::*;
    use crate::constants::*;
    use crate::utils::get_epoch_ms;
    use crate::verification::{ChallengeState, DevEchoDelivery};

    /// Delivery double that swallows the code
    struct NullDelivery;
    impl CodeDelivery for NullDelivery {
        fn deliver(&self, _phone: &str, _code: &str) -> Result<Option<String>, AppError> {
            Ok(None)
        }
    }

    fn chosen_selection() -> SlotSelection {
        let mut selection = SlotSelection::new();
        selection.choose_slot("7:00 PM");
        selection
    }

    fn details() -> GuestDetails {
        GuestDetails {
            full_name: "John Doe".to_owned(),
            mobile_number: "9876543210".to_owned(),
        }
    }

    fn issued_code<D: CodeDelivery>(checkout: &GuestCheckout<D>) -> String {
        match &checkout.challenge.state {
            ChallengeState::AwaitingCode { code, .. } => code.clone(),
            ChallengeState::Idle => panic!("no code issued"),
        }
    }

    #[tokio::test]
    async fn test_full_guest_checkout_with_otp_round() {
        // cold cache: begin issues a code instead of booking
        let db = Arc::new(AppDatabase::default());
        let mut storage = LocalStorage::default();
        storage.expect_get_item().returning(|_| None);
        let storage = Arc::new(storage);
        let mut checkout = GuestCheckout::new(DevEchoDelivery);
        let selection = chosen_selection();
        let outcome = checkout
            .begin(&db, &storage, &selection, details(), "Cafe Nova")
            .await
            .unwrap();
        let code = issued_code(&checkout);
        match outcome {
            BeginOutcome::OtpSent { message } => {
                assert_eq!(message.unwrap().contains(&code), true);
            }
            other => panic!("expected OtpSent, got {other:?}"),
        }

        // the verify step caches the phone and books
        let mut db = AppDatabase::default();
        db.expect_insert_one::<crate::models::booking::Booking>()
            .with(
                eq(DB_NAME),
                eq(COLL_BOOKINGS),
                function(|b: &Booking| {
                    b.is_guest == Some(true)
                        && b.mobile_number.as_deref() == Some("+919876543210")
                }),
                always(),
            )
            .times(1)
            .returning(|_, _, _, _| Ok("64b2f0c9a1d2e3f4a5b6c7d8".to_owned()));
        let db = Arc::new(db);
        let mut storage = LocalStorage::default();
        storage
            .expect_set_item()
            .with(eq(KEY_GUEST_VERIFIED_PHONE), eq("+919876543210"))
            .times(1)
            .returning(|_, _| Ok(()));
        storage
            .expect_set_item()
            .with(eq(KEY_GUEST_VERIFIED_AT), always())
            .times(1)
            .returning(|_, _| Ok(()));
        storage
            .expect_get_item()
            .with(eq(KEY_GUEST_VERIFIED_PHONE))
            .returning(|_| Some("+919876543210".to_owned()));
        storage
            .expect_get_item()
            .with(eq(KEY_GUEST_VERIFIED_AT))
            .returning(|_| Some(get_epoch_ms().to_string()));
        let storage = Arc::new(storage);
        let booking = checkout
            .verify_and_book(&db, &storage, &selection, "Cafe Nova", &code)
            .await
            .unwrap();
        assert_eq!(booking.full_name.as_deref(), Some("John Doe"));
        assert_eq!(checkout.challenge.state, ChallengeState::Idle);
    }

    #[tokio::test]
    async fn test_begin_skips_otp_when_cache_is_fresh() {
        let mut db = AppDatabase::default();
        db.expect_insert_one::<crate::models::booking::Booking>()
            .times(1)
            .returning(|_, _, _, _| Ok("64b2f0c9a1d2e3f4a5b6c7d8".to_owned()));
        let db = Arc::new(db);
        let mut storage = LocalStorage::default();
        storage
            .expect_get_item()
            .with(eq(KEY_GUEST_VERIFIED_PHONE))
            .returning(|_| Some("+919876543210".to_owned()));
        storage
            .expect_get_item()
            .with(eq(KEY_GUEST_VERIFIED_AT))
            .returning(|_| Some(get_epoch_ms().to_string()));
        let storage = Arc::new(storage);
        let mut checkout = GuestCheckout::new(NullDelivery);
        let selection = chosen_selection();
        let outcome = checkout
            .begin(&db, &storage, &selection, details(), "Cafe Nova")
            .await
            .unwrap();
        match outcome {
            BeginOutcome::Booked(booking) => {
                assert_eq!(booking.is_guest, Some(true));
            }
            other => panic!("expected Booked, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_begin_rejects_invalid_details() {
        let db = Arc::new(AppDatabase::default());
        let storage = Arc::new(LocalStorage::default());
        let mut checkout = GuestCheckout::new(NullDelivery);
        let selection = chosen_selection();
        let bad = GuestDetails {
            full_name: "J".to_owned(),
            mobile_number: "1234".to_owned(),
        };
        let result = checkout
            .begin(&db, &storage, &selection, bad, "Cafe Nova")
            .await;
        match result {
            Err(AppError::BadRequestErr(_)) => {}
            other => panic!("expected BadRequestErr, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_wrong_code_does_not_book() {
        let db = Arc::new(AppDatabase::default());
        let mut storage = LocalStorage::default();
        storage.expect_get_item().returning(|_| None);
        let storage = Arc::new(storage);
        let mut checkout = GuestCheckout::new(NullDelivery);
        let selection = chosen_selection();
        checkout
            .begin(&db, &storage, &selection, details(), "Cafe Nova")
            .await
            .unwrap();
        let code = issued_code(&checkout);
        let wrong = if code == "000000" { "000001" } else { "000000" };
        // no insert expectation is set: a mismatch must never reach the db
        let result = checkout
            .verify_and_book(&db, &storage, &selection, "Cafe Nova", wrong)
            .await;
        match result {
            Err(AppError::OtpMismatch) => {}
            other => panic!("expected OtpMismatch, got {other:?}"),
        }
        // the round stays open for another attempt
        assert_ne!(checkout.challenge.state, ChallengeState::Idle);
    }

    #[tokio::test]
    async fn test_close_discards_the_round() {
        let db = Arc::new(AppDatabase::default());
        let mut storage = LocalStorage::default();
        storage.expect_get_item().returning(|_| None);
        let storage = Arc::new(storage);
        let mut checkout = GuestCheckout::new(NullDelivery);
        let selection = chosen_selection();
        checkout
            .begin(&db, &storage, &selection, details(), "Cafe Nova")
            .await
            .unwrap();
        let code = issued_code(&checkout);
        checkout.close();
        // a late verify response after close is ignored
        let result = checkout
            .verify_and_book(&db, &storage, &selection, "Cafe Nova", &code)
            .await;
        assert_eq!(result.is_err(), true);
    }
}
