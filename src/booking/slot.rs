use chrono::{NaiveDate, Utc};

use crate::constants::*;
use crate::utils::AppError;

/// Date, time slot and party size chosen on a restaurant detail view.
/// Confirming is gated on a slot being picked; date and guest count always
/// hold a usable value.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotSelection {
    pub date: NaiveDate,
    pub slot: Option<String>,
    pub guest_count: u32,
}

impl SlotSelection {
    pub fn new() -> Self {
        Self {
            date: Utc::now().date_naive(),
            slot: None,
            guest_count: DEFAULT_GUEST_COUNT,
        }
    }

    /// Pick the reservation day. Days before today are rejected; the
    /// restaurant's operating hours are catalog data and are not checked
    /// here.
    pub fn choose_date(&mut self, date: NaiveDate) -> Result<(), AppError> {
        let today = Utc::now().date_naive();
        if date < today {
            let err = format!("Booking date must be today or later: {date}");
            return Err(AppError::BadRequestErr(err));
        }
        self.date = date;
        Ok(())
    }

    /// Tapping the selected slot again deselects it; tapping another slot
    /// replaces the selection.
    pub fn choose_slot(&mut self, label: &str) {
        if self.slot.as_deref() == Some(label) {
            self.slot = None;
        } else {
            self.slot = Some(label.to_owned());
        }
    }

    /// Party size, silently clamped to the bookable range
    pub fn set_guest_count(&mut self, count: u32) {
        self.guest_count = count.clamp(MIN_GUEST_COUNT, MAX_GUEST_COUNT);
    }

    pub fn increment_guests(&mut self) {
        if self.guest_count < MAX_GUEST_COUNT {
            self.guest_count += 1;
        }
    }

    pub fn decrement_guests(&mut self) {
        if self.guest_count > MIN_GUEST_COUNT {
            self.guest_count -= 1;
        }
    }

    pub fn can_confirm(&self) -> bool {
        self.slot.is_some()
    }

    /// Back to the defaults, after a successful booking write
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for SlotSelection {
    fn default() -> Self {
        Self::new()
    }
}
