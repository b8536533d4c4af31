use crate::utils::AppError;

/// Channel through which an issued code reaches the guest. SMS gateway API
/// or SMS queue API integrations implement this; `deliver` may return a
/// message for the UI to surface.
pub trait CodeDelivery {
    fn deliver(&self, phone: &str, code: &str) -> Result<Option<String>, AppError>;
}

/// Development stand-in: logs the code and discloses it to the caller in
/// the returned message. Must be replaced with a real delivery channel
/// before going live.
#[derive(Debug, Default)]
pub struct DevEchoDelivery;

impl CodeDelivery for DevEchoDelivery {
    fn deliver(&self, phone: &str, code: &str) -> Result<Option<String>, AppError> {
        tracing::debug!("Send otp {code} to phone {phone}");
        let message = format!("Your verification code is: {code}\n\nSent to {phone}");
        Ok(Some(message))
    }
}
