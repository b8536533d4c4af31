use lazy_static::lazy_static;
use mongodb::bson::oid::ObjectId;
use rand::{thread_rng, Rng};
use regex::Regex;
use serde::{Deserialize, Deserializer};
use std::time::{SystemTime, UNIX_EPOCH};

use super::AppError;
use crate::constants::*;

lazy_static! {
    static ref NON_DIGITS: Regex = Regex::new(r"\D").unwrap();
}

/// Get EPOCH timestamp in seconds
pub fn get_epoch_ts() -> u64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(n) => n.as_secs(),
        Err(_) => panic!("SystemTime before UNIX EPOCH!"),
    }
}

/// Get EPOCH timestamp in milliseconds
pub fn get_epoch_ms() -> u64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(n) => n.as_millis() as u64,
        Err(_) => panic!("SystemTime before UNIX EPOCH!"),
    }
}

/// Generate OTP of a given length
pub fn generate_otp(len: u32) -> String {
    let mut rng = thread_rng();
    (0..len)
        .map(|_| {
            let n = rng.gen_range(0..10);
            char::from_digit(n, 10).unwrap_or('0')
        })
        .collect()
}

/// Normalize a user-entered mobile number into the +91 form used everywhere
/// a phone is stored or compared.
/// Numbers already carrying the country code are kept as entered.
pub fn normalize_phone(phone: &str) -> String {
    let cleaned = NON_DIGITS.replace_all(phone, "");
    if cleaned.starts_with("91") && cleaned.len() > 10 {
        format!("+{cleaned}")
    } else {
        format!("{PHONE_COUNTRY_PREFIX}{cleaned}")
    }
}

/// Parse the given value as ObjectId
pub fn parse_object_id(id: &str, error_message: &str) -> Result<ObjectId, AppError> {
    let oid = ObjectId::parse_str(id).map_err(|err| {
        tracing::debug!("{:?}", err);
        AppError::BadRequestErr(error_message.into())
    })?;
    Ok(oid)
}

/// Deserialize helper for ObjectId field
pub fn deserialize_helper<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let val = Option::<ObjectId>::deserialize(deserializer)?;
    match val {
        None => Ok(None),
        Some(val) => Ok(Some(val.to_hex())),
    }
}
