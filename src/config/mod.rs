//! Configuration
//!
//! Environment-driven settings for the relay server.

pub mod environment;

pub use environment::*;
