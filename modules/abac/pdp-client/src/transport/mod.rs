//! Transport to the Policy Decision Point.

pub mod http;
mod retry;

use abac_sdk::xacml::{XacmlRequest, XacmlResponse};
use async_trait::async_trait;

use crate::domain::DomainError;

pub use http::HttpPdpConsumer;

/// Sends one XACML request to the PDP and returns its answer.
///
/// Implementations retry a transient failure once; callers do not retry.
#[async_trait]
pub trait PdpConsumer: Send + Sync {
    /// # Errors
    ///
    /// The failure of the last attempt, see [`DomainError`].
    async fn evaluate(&self, request: &XacmlRequest) -> Result<XacmlResponse, DomainError>;
}
