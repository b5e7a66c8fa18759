//! CLI command implementations.

pub mod add;
