use serde::{Deserialize, Serialize};

use crate::utils::{deserialize_helper, get_epoch_ts};

/// One confirmed table reservation, appended to the bookings collection.
/// Authenticated bookings carry `email`; guest bookings carry the guest's
/// name, normalized phone and the `isGuest` marker. The core only ever
/// writes these documents; the history view reads them back by email.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "deserialize_helper")]
    #[serde(default)]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_guest: Option<bool>,

    pub restaurant_name: String,

    /// Slot label as published by the restaurant, e.g. "7:00 PM"
    pub slot: String,

    /// Reservation day as an ISO-8601 timestamp
    pub date: String,

    pub guests: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_ts: Option<u64>,
}

impl Booking {
    pub fn for_account(
        email: &str,
        restaurant_name: &str,
        slot: &str,
        date: &str,
        guests: u32,
    ) -> Self {
        Self {
            email: Some(email.to_owned()),
            restaurant_name: restaurant_name.to_owned(),
            slot: slot.to_owned(),
            date: date.to_owned(),
            guests,
            created_ts: Some(get_epoch_ts()),
            ..Default::default()
        }
    }

    pub fn for_guest(
        full_name: &str,
        mobile_number: &str,
        restaurant_name: &str,
        slot: &str,
        date: &str,
        guests: u32,
    ) -> Self {
        Self {
            full_name: Some(full_name.to_owned()),
            mobile_number: Some(mobile_number.to_owned()),
            is_guest: Some(true),
            restaurant_name: restaurant_name.to_owned(),
            slot: slot.to_owned(),
            date: date.to_owned(),
            guests,
            created_ts: Some(get_epoch_ts()),
            ..Default::default()
        }
    }
}
