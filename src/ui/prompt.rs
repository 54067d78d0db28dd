//! Inquire prompts the user may close with Ctrl+C or Escape.
//!
//! A closed prompt is not an error for querychat: the REPL ends the session
//! and `configure` leaves the file untouched. Both cases surface as `None`.

use anyhow::Result;
use inquire::InquireError;

const fn is_closed(err: &InquireError) -> bool {
    matches!(
        err,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

/// Unwraps a single prompt answer; `None` when the user closed the prompt.
pub fn answer_or_closed<T>(result: Result<T, InquireError>) -> Result<Option<T>> {
    match result {
        Ok(answer) => Ok(Some(answer)),
        Err(err) if is_closed(&err) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Like [`answer_or_closed`] for a whole multi-prompt flow that propagated
/// the inquire error through `anyhow`.
pub fn cancellable<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.downcast_ref::<InquireError>().is_some_and(is_closed) => Ok(None),
        Err(err) => Err(err),
    }
}
