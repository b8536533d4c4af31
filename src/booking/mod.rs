pub mod guest_checkout;
pub mod history;
pub mod slot;
pub mod submit;

pub use guest_checkout::{BeginOutcome, GuestCheckout};
pub use history::get_booking_history;
pub use slot::SlotSelection;
pub use submit::{submit_booking, GuestDetails, Identity};
