use crate::backend::FailureKind;

/// Reply shown when the backend answered without any text.
pub const MISSING_RESPONSE_TEXT: &str = "Sorry, I couldn't get a response.";

/// Reply shown for every transport or backend failure.
pub const ERROR_TEXT: &str =
    "Sorry, something went wrong while contacting the server. Please try again.";

/// How a single request/response cycle resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exchange {
    /// The backend produced reply text.
    Replied(String),
    /// The cycle failed; the transcript got a fixed apology instead.
    Failed(FailureKind),
}

impl Exchange {
    /// Text appended to the transcript for this exchange.
    pub fn reply_text(&self) -> &str {
        match self {
            Self::Replied(text) => text,
            Self::Failed(FailureKind::MissingPayload) => MISSING_RESPONSE_TEXT,
            Self::Failed(_) => ERROR_TEXT,
        }
    }

    /// The failure classification, or `None` when the backend replied.
    pub const fn failure(&self) -> Option<FailureKind> {
        match self {
            Self::Replied(_) => None,
            Self::Failed(kind) => Some(*kind),
        }
    }
}

/// Why a submission was rejected without touching the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Another exchange is still in flight.
    Busy,
    /// The pending input was empty or whitespace only.
    EmptyInput,
}

/// Result of calling `submit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Ignored(IgnoreReason),
    Completed(Exchange),
}
