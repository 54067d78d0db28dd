//! Reading one-shot questions from arguments or stdin.

mod reader;

pub use reader::{MAX_QUESTION_BYTES, read_question};
