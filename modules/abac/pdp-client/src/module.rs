//! Wiring of the PDP client.

use std::sync::Arc;

use abac_sdk::{PdpClient, RequestAttributeBuilder};
use tracing::info;

use crate::config::{ConfigError, PdpClientConfig};
use crate::domain::{PdpLocalClient, Service, TokenAttributes};
use crate::transport::{HttpPdpConsumer, PdpConsumer};

/// PDP client module.
pub struct PdpClientModule;

impl PdpClientModule {
    pub const MODULE_NAME: &'static str = "pdp-client";

    /// Build a ready [`PdpClient`] talking HTTP to the configured PDP.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`] from validating `cfg` or building the transport.
    #[tracing::instrument(skip_all, fields(endpoint = %cfg.endpoint_url))]
    pub fn init(
        cfg: &PdpClientConfig,
        request_attributes: Arc<dyn RequestAttributeBuilder>,
    ) -> Result<Arc<dyn PdpClient>, ConfigError> {
        info!(pep_id = %cfg.pep_id, "Initializing {} module", Self::MODULE_NAME);
        cfg.validate()?;

        let consumer: Arc<dyn PdpConsumer> = Arc::new(HttpPdpConsumer::new(cfg)?);
        let client = Self::with_consumer(cfg, consumer, request_attributes);

        info!("{} module initialized successfully", Self::MODULE_NAME);
        Ok(client)
    }

    /// Build a [`PdpClient`] on top of an arbitrary transport.
    #[must_use]
    pub fn with_consumer(
        cfg: &PdpClientConfig,
        consumer: Arc<dyn PdpConsumer>,
        request_attributes: Arc<dyn RequestAttributeBuilder>,
    ) -> Arc<dyn PdpClient> {
        let token_attributes = TokenAttributes::new(cfg.pep_id.clone(), cfg.attach_tokenx_payload);
        let svc = Arc::new(Service::new(consumer, request_attributes, token_attributes));
        Arc::new(PdpLocalClient::new(svc))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use abac_sdk::StandardRequestAttributes;
    use tracing_test::traced_test;

    use super::*;

    #[test]
    #[traced_test]
    fn init_validates_configuration() {
        let result = PdpClientModule::init(
            &PdpClientConfig::default(),
            Arc::new(StandardRequestAttributes),
        );
        assert!(matches!(result, Err(ConfigError::MissingUsername)));
        assert!(logs_contain("Initializing pdp-client module"));
    }

    #[test]
    fn init_builds_a_client_for_valid_configuration() {
        let cfg = PdpClientConfig {
            username: "srvfpsak".to_owned(),
            pep_id: "fpsak".to_owned(),
            ..PdpClientConfig::default()
        };
        assert!(PdpClientModule::init(&cfg, Arc::new(StandardRequestAttributes)).is_ok());
    }
}
