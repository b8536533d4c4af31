use crate::constants::*;
use crate::utils::{generate_otp, get_epoch_ts, AppError};

/// Where a guest's phone verification currently stands. The whole round
/// lives in memory on the client; closing the booking modal resets it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ChallengeState {
    #[default]
    Idle,
    AwaitingCode {
        code: String,
        phone: String,
        attempts_used: u32,
        /// Epoch seconds after which a resend is allowed
        resend_available_at: u64,
    },
}

/// One-time-code challenge for a guest phone number.
///
/// `issue` hands the generated code back to the caller so it can be routed
/// through a delivery channel; the challenge itself never sends anything.
#[derive(Debug, Default)]
pub struct OtpChallenge {
    pub state: ChallengeState,
}

impl OtpChallenge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a fresh 6-digit code for the given phone and start the
    /// resend cooldown. Re-issuing replaces any earlier code.
    pub fn issue(&mut self, phone: &str) -> String {
        let code = generate_otp(OTP_LENGTH);
        self.state = ChallengeState::AwaitingCode {
            code: code.clone(),
            phone: phone.to_owned(),
            attempts_used: 0,
            resend_available_at: get_epoch_ts() + OTP_RESEND_COOLDOWN_SECS,
        };
        code
    }

    /// Compare a user-submitted code against the issued one. A code can
    /// succeed at most once: success returns the challenge to `Idle`, after
    /// which the caller must cache the verified phone. After
    /// `MAX_OTP_ATTEMPTS` mismatches the challenge locks until a resend.
    pub fn verify(&mut self, candidate: &str) -> Result<(), AppError> {
        let ChallengeState::AwaitingCode {
            code,
            attempts_used,
            ..
        } = &mut self.state
        else {
            return Err(AppError::BadRequestErr(
                "No verification code was requested".into(),
            ));
        };
        if *attempts_used >= MAX_OTP_ATTEMPTS {
            return Err(AppError::Auth(
                "Too many failed attempts. Request a new code.".into(),
            ));
        }
        if candidate != code.as_str() {
            *attempts_used += 1;
            return Err(AppError::OtpMismatch);
        }
        self.state = ChallengeState::Idle;
        Ok(())
    }

    pub fn can_resend(&self) -> bool {
        match &self.state {
            ChallengeState::Idle => false,
            ChallengeState::AwaitingCode {
                resend_available_at,
                ..
            } => get_epoch_ts() >= *resend_available_at,
        }
    }

    /// Issue a replacement code for the same phone. The previous code stops
    /// verifying. Fails with `CooldownActive` until the cooldown elapses.
    pub fn resend(&mut self) -> Result<String, AppError> {
        let ChallengeState::AwaitingCode {
            phone,
            resend_available_at,
            ..
        } = &self.state
        else {
            return Err(AppError::BadRequestErr(
                "No verification in progress".into(),
            ));
        };
        let now = get_epoch_ts();
        if now < *resend_available_at {
            return Err(AppError::CooldownActive(*resend_available_at - now));
        }
        let phone = phone.clone();
        Ok(self.issue(&phone))
    }

    /// Discard the in-progress round, e.g. when the booking modal closes.
    /// A verify result arriving after this point finds the challenge idle
    /// and is rejected.
    pub fn reset(&mut self) {
        self.state = ChallengeState::Idle;
    }

    pub fn target_phone(&self) -> Option<&str> {
        match &self.state {
            ChallengeState::Idle => None,
            ChallengeState::AwaitingCode { phone, .. } => Some(phone.as_str()),
        }
    }
}
