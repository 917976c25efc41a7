//! Data models
//!
//! Transient view-models decoded from gateway responses. Nothing here is
//! persisted by this application.

pub mod checklist;
pub mod employee;
pub mod lenient;
pub mod report;

pub use checklist::*;
pub use employee::*;
pub use report::*;
