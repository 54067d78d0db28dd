//! Chat session state and the single-flight request cycle.
//!
//! [`ChatController`] owns the transcript, the pending input buffer, and the
//! busy flag. Front ends read snapshots of that state, call
//! [`ChatController::update_input`] while the user types, and
//! [`ChatController::submit`] when the user sends.

mod controller;
mod message;
mod outcome;

pub use controller::{ChatController, DEFAULT_GREETING, SessionEvent, SessionSnapshot};
pub use message::{Message, Sender};
pub use outcome::{ERROR_TEXT, Exchange, IgnoreReason, MISSING_RESPONSE_TEXT, SubmitOutcome};
