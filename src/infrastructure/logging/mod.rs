//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - pretty or JSON console output on stderr
//! - optional daily-rolling JSON log files
//! - secret scrubbing for API error bodies

pub mod logger;
pub mod secret_scrubbing;

pub use logger::{LoggerImpl, parse_log_level};
pub use secret_scrubbing::SecretScrubber;
