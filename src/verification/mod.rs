pub mod challenge;
pub mod delivery;

pub use challenge::{ChallengeState, OtpChallenge};
pub use delivery::{CodeDelivery, DevEchoDelivery};
