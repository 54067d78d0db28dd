use anyhow::{Context, Result, bail};
use std::io::{self, Read};

/// Upper bound on a question read from stdin.
pub const MAX_QUESTION_BYTES: usize = 1024 * 1024;

/// Returns the question for `ask`: the joined words when given, stdin otherwise.
pub fn read_question(words: &[String]) -> Result<String> {
    if words.is_empty() {
        read_limited(io::stdin().lock())
    } else {
        Ok(words.join(" "))
    }
}

fn read_limited(source: impl Read) -> Result<String> {
    let mut buffer = Vec::new();
    source
        .take(MAX_QUESTION_BYTES as u64 + 1)
        .read_to_end(&mut buffer)
        .context("Failed to read question from stdin")?;

    if buffer.len() > MAX_QUESTION_BYTES {
        bail!(
            "Question exceeds the maximum allowed size (1 MB).\n\n\
             Pass a shorter question or split it into several."
        );
    }

    String::from_utf8(buffer).context("Question is not valid UTF-8")
}
