//! Local (in-process) client for the PDP.

use std::sync::Arc;

use abac_sdk::{
    AccessDecision, AppResourceData, PdpClient, PdpError, PdpRequest, ProtectedResourceAttributes,
    ResourceAccessDecision,
};
use async_trait::async_trait;

use super::{DomainError, Service};

/// Local client wrapping the service.
pub struct PdpLocalClient {
    svc: Arc<Service>,
}

impl PdpLocalClient {
    #[must_use]
    pub fn new(svc: Arc<Service>) -> Self {
        Self { svc }
    }
}

fn log_and_convert(op: &str, e: DomainError) -> PdpError {
    tracing::error!(operation = op, code = e.code(), error = %e, "PDP call failed");
    e.into()
}

#[async_trait]
impl PdpClient for PdpLocalClient {
    async fn request_access(&self, request: PdpRequest) -> Result<AccessDecision, PdpError> {
        self.svc
            .request_access(request)
            .await
            .map_err(|e| log_and_convert("request_access", e))
    }

    async fn request_access_for(
        &self,
        attributes: ProtectedResourceAttributes,
        domain: &str,
        app_data: AppResourceData,
    ) -> Result<ResourceAccessDecision, PdpError> {
        self.svc
            .request_access_for(attributes, domain, app_data)
            .await
            .map_err(|e| log_and_convert("request_access_for", e))
    }
}
