//! Error types for the ABAC client.

use platform_errors::PlatformError;
use thiserror::Error;

/// Errors returned by [`PdpClient`](crate::PdpClient).
///
/// An error never means "granted": the enforcement layer must treat every
/// variant as a denial.
#[derive(Debug, Error)]
pub enum PdpError {
    /// The PDP rejected our credentials (HTTP 401). Not retried.
    #[error("access denied by PDP: {0}")]
    AccessDenied(PlatformError),

    /// The PDP could not be reached or answered with something unusable,
    /// also after the single retry.
    #[error("PDP integration failure: {0}")]
    Integration(PlatformError),

    /// The PDP answered with something this client does not support
    /// (indeterminate decision, obligations). Never retried.
    #[error("PDP protocol violation: {0}")]
    ProtocolViolation(PlatformError),

    /// The access request itself could not be turned into a PDP request.
    #[error("invalid access request: {0}")]
    InvalidRequest(PlatformError),
}

impl PdpError {
    #[must_use]
    pub fn platform_error(&self) -> &PlatformError {
        match self {
            Self::AccessDenied(e)
            | Self::Integration(e)
            | Self::ProtocolViolation(e)
            | Self::InvalidRequest(e) => e,
        }
    }

    /// The underlying platform error, with its kind and cause.
    #[must_use]
    pub fn into_platform_error(self) -> PlatformError {
        match self {
            Self::AccessDenied(e)
            | Self::Integration(e)
            | Self::ProtocolViolation(e)
            | Self::InvalidRequest(e) => e,
        }
    }

    /// Stable error code, e.g. `F-157388`.
    #[must_use]
    pub fn code(&self) -> &str {
        self.platform_error().code()
    }
}
