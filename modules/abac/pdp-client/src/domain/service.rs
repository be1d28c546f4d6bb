//! Access request evaluation.

use std::sync::Arc;

use abac_sdk::{
    AccessDecision, AppResourceData, PdpRequest, ProtectedResourceAttributes,
    RequestAttributeBuilder, ResourceAccessDecision, protected_resource_request,
};
use tracing::debug;

use super::{DomainError, TokenAttributes, decision};
use crate::transport::PdpConsumer;

/// Builds the XACML request, asks the PDP and resolves the answer.
pub struct Service {
    consumer: Arc<dyn PdpConsumer>,
    request_attributes: Arc<dyn RequestAttributeBuilder>,
    token_attributes: TokenAttributes,
}

impl Service {
    #[must_use]
    pub fn new(
        consumer: Arc<dyn PdpConsumer>,
        request_attributes: Arc<dyn RequestAttributeBuilder>,
        token_attributes: TokenAttributes,
    ) -> Self {
        Self {
            consumer,
            request_attributes,
            token_attributes,
        }
    }

    /// Evaluate one access request.
    ///
    /// # Errors
    ///
    /// `InvalidToken` before anything is sent, the transport error after the
    /// retry, or a protocol error from resolving the response.
    #[tracing::instrument(
        skip_all,
        fields(
            action = request.action(),
            resource_type = request.resource_type(),
            token_kind = %request.id_token().kind(),
        )
    )]
    pub async fn request_access(
        &self,
        request: PdpRequest,
    ) -> Result<AccessDecision, DomainError> {
        let environment = self.token_attributes.environment_set(request.id_token())?;
        let mut builder = self.request_attributes.build(&request);
        builder.add_environment_attribute_set(environment);

        let response = self.consumer.evaluate(&builder.build()).await?;
        let outcome = decision::resolve_outcome(&response)?;
        debug!(%outcome, "PDP decision resolved");

        Ok(AccessDecision::new(outcome, request))
    }

    /// Evaluate access to a protected resource. The request is sent without
    /// an environment set: no identity token and no PEP id.
    ///
    /// # Errors
    ///
    /// The transport error after the retry, or a protocol error from
    /// resolving the response.
    #[tracing::instrument(
        skip_all,
        fields(
            domain = domain,
            action = attributes.action(),
            resource_type = attributes.resource_type(),
        )
    )]
    pub async fn request_access_for(
        &self,
        attributes: ProtectedResourceAttributes,
        domain: &str,
        app_data: AppResourceData,
    ) -> Result<ResourceAccessDecision, DomainError> {
        let request = protected_resource_request(&attributes, domain, &app_data);
        let response = self.consumer.evaluate(&request).await?;
        let outcome = decision::resolve_outcome(&response)?;
        debug!(%outcome, "PDP decision resolved");

        Ok(ResourceAccessDecision::new(outcome, attributes, app_data))
    }
}

impl std::fmt::Debug for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Service")
            .field("token_attributes", &self.token_attributes)
            .finish_non_exhaustive()
    }
}
