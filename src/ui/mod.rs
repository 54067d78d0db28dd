//! Terminal UI components.

mod prompt;
mod spinner;
mod style;

pub use prompt::{answer_or_closed, cancellable};
pub use spinner::Spinner;
pub use style::Style;
