//! Services
//!
//! Typed wrappers around the gateway used by the page controllers.

pub mod gateway_service;

pub use gateway_service::GatewayService;
