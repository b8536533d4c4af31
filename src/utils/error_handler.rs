#[derive(Debug)]
pub enum AppError {
    BadRequestErr(String),
    NotFound(String),
    Auth(String),
    /// Resend requested before the cooldown elapsed; carries seconds left
    CooldownActive(u64),
    OtpMismatch,
    /// Not a failure: the guest must complete an OTP round before booking
    VerificationRequired,
    NoSlotSelected,
    AnyError(anyhow::Error),
}

impl AppError {
    pub fn unknown_error() -> Self {
        Self::AnyError(anyhow::anyhow!("Unknown error"))
    }

    /// Text suitable for a user-facing alert
    pub fn user_message(&self) -> String {
        match self {
            Self::BadRequestErr(msg) => msg.to_owned(),
            Self::NotFound(msg) => msg.to_owned(),
            Self::Auth(msg) => msg.to_owned(),
            Self::CooldownActive(secs) => format!("Resend in {secs}s"),
            Self::OtpMismatch => "Invalid OTP. Please try again.".to_owned(),
            Self::VerificationRequired => {
                "We'll send a verification code to your phone".to_owned()
            }
            Self::NoSlotSelected => "Please select a time slot first".to_owned(),
            Self::AnyError(err) => {
                let msg = format!("Something went wrong: {err}");
                tracing::debug!("{msg}");
                "Something went wrong. Please try again.".to_owned()
            }
        }
    }
}

impl<E: Into<anyhow::Error>> From<E> for AppError {
    fn from(err: E) -> Self {
        Self::AnyError(err.into())
    }
}
