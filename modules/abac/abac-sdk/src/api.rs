//! Public API traits for the ABAC client.

use async_trait::async_trait;

use crate::error::PdpError;
use crate::models::{
    AccessDecision, AppResourceData, PdpRequest, ProtectedResourceAttributes, ResourceAccessDecision,
};
use crate::xacml::XacmlRequestBuilder;

/// Asks the Policy Decision Point whether a request is allowed.
///
/// ```ignore
/// let decision = pdp.request_access(request).await?;
/// if !decision.is_granted() {
///     // deny
/// }
/// ```
#[async_trait]
pub trait PdpClient: Send + Sync {
    /// Evaluate one access request.
    ///
    /// # Errors
    ///
    /// - `AccessDenied` if the PDP rejects the client's credentials
    /// - `Integration` if the PDP is unreachable or answers garbage twice
    /// - `ProtocolViolation` for indeterminate decisions or obligations
    /// - `InvalidRequest` if the identity token cannot be forwarded
    async fn request_access(&self, request: PdpRequest) -> Result<AccessDecision, PdpError>;

    /// Evaluate access to a protected resource within `domain`, described
    /// by the operation's attributes and the application's data. No identity
    /// token is forwarded.
    ///
    /// # Errors
    ///
    /// As [`PdpClient::request_access`], except `InvalidRequest` for tokens.
    async fn request_access_for(
        &self,
        attributes: ProtectedResourceAttributes,
        domain: &str,
        app_data: AppResourceData,
    ) -> Result<ResourceAccessDecision, PdpError>;
}

/// Builds the application-specific part of a XACML request (subject,
/// action and resource sets) from an access request.
///
/// The client appends the environment set with token information after
/// this builder has run.
pub trait RequestAttributeBuilder: Send + Sync {
    fn build(&self, request: &PdpRequest) -> XacmlRequestBuilder;
}
