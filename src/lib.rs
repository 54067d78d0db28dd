//! # querychat - terminal chat client
//!
//! `querychat` sends natural-language questions to an HTTP question-answering
//! backend and shows the answers in a scrolling transcript.
//!
//! ## Quick Start
//!
//! ```bash
//! # Interactive chat
//! querychat --endpoint http://localhost:5000
//!
//! # One question, answer on stdout
//! querychat ask how many households receive cash subsidies?
//!
//! # Is the backend up?
//! querychat health
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/querychat/config.toml`:
//!
//! ```toml
//! [client]
//! endpoint = "http://localhost:5000"
//! chat_path = "/api/chat"
//! timeout_secs = 60
//! ```
//!
//! `QUERYCHAT_ENDPOINT` overrides the file; `--endpoint` overrides both.

/// Transport to the question-answering backend.
pub mod backend;

/// Interactive chat mode.
pub mod chat;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management and endpoint resolution.
pub mod config;

/// File system utilities.
pub mod fs;

/// Question input from arguments or stdin.
pub mod input;

/// Diagnostic logging setup.
pub mod logging;

/// Global output configuration (quiet mode, stderr/stdout routing).
pub mod output;

/// XDG-style path utilities for configuration.
pub mod paths;

/// Chat session state and request lifecycle.
pub mod session;

/// Terminal UI components (spinner, colors).
pub mod ui;
