//! Shared application state
//!
//! Built once in `main` from the validated configuration and cloned into
//! every axum handler.

use crate::client::GatewayClient;
use crate::config::environment::EnvironmentConfig;
use crate::services::gateway_service::GatewayService;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub gateway: GatewayClient,
}

impl AppState {
    pub fn new(config: EnvironmentConfig) -> reqwest::Result<Self> {
        let gateway = GatewayClient::new(config.gas_url.clone(), config.gateway_timeout)?;
        Ok(Self { config, gateway })
    }

    /// Typed access to the gateway for the server-rendered pages.
    pub fn gateway_service(&self) -> GatewayService {
        GatewayService::new(self.gateway.clone())
    }
}
