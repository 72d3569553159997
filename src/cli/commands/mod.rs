//! CLI command implementations.

pub mod ask;
