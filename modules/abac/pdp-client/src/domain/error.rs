//! Domain errors for the PDP client.

use abac_sdk::PdpError;
use abac_sdk::TokenKind;
use platform_errors::{PlatformError, Severity};

/// Internal domain errors.
#[derive(thiserror::Error, Debug)]
pub enum DomainError {
    #[error("no access to PDP (HTTP 401)")]
    Unauthorized,

    #[error("no response body from PDP (HTTP {status})")]
    EmptyResponse { status: u16 },

    #[error("unexpected HTTP {status} from PDP: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("failed to deserialize PDP response: {0}")]
    Deserialize(#[source] serde_json::Error),

    #[error("failed to serialize XACML request: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("I/O error calling PDP: {0}")]
    Io(#[source] reqwest::Error),

    #[error("decision {decision} from PDP, full response: {response}")]
    Indeterminate { decision: String, response: String },

    #[error("PDP response contains no decisions")]
    NoDecisions,

    #[error("unsupported obligations from PDP: {obligations:?}")]
    UnknownObligations { obligations: Vec<String> },

    #[error("invalid {kind} token: {reason}")]
    InvalidToken { kind: TokenKind, reason: String },
}

impl DomainError {
    /// Stable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "F-157388",
            Self::EmptyResponse { .. } => "F-157386",
            Self::UnexpectedStatus { .. } => "F-157389",
            Self::Deserialize(_) => "F-208314",
            Self::Serialize(_) => "F-208315",
            Self::Io(_) => "F-091324",
            Self::Indeterminate { .. } => "F-080281",
            Self::NoDecisions => "F-080282",
            Self::UnknownObligations { .. } => "F-576027",
            Self::InvalidToken { .. } => "F-261853",
        }
    }

    /// Transport failures that get one more attempt. A 401 is final.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::EmptyResponse { .. }
                | Self::UnexpectedStatus { .. }
                | Self::Deserialize(_)
                | Self::Io(_)
        )
    }
}

impl From<DomainError> for PdpError {
    fn from(e: DomainError) -> Self {
        let code = e.code();
        let message = e.to_string();
        match e {
            DomainError::Unauthorized => Self::AccessDenied(
                PlatformError::access_denied(code, message).with_severity(Severity::Error),
            ),
            DomainError::Io(source) => {
                Self::Integration(PlatformError::integration(code, message).with_cause(source))
            }
            DomainError::Deserialize(source) => {
                Self::Integration(PlatformError::integration(code, message).with_cause(source))
            }
            DomainError::EmptyResponse { .. } | DomainError::UnexpectedStatus { .. } => {
                Self::Integration(PlatformError::integration(code, message))
            }
            DomainError::Indeterminate { .. }
            | DomainError::NoDecisions
            | DomainError::UnknownObligations { .. } => {
                Self::ProtocolViolation(PlatformError::technical(code, message))
            }
            DomainError::Serialize(source) => {
                Self::InvalidRequest(PlatformError::technical(code, message).with_cause(source))
            }
            DomainError::InvalidToken { .. } => {
                Self::InvalidRequest(PlatformError::technical(code, message))
            }
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::error::Error as _;

    use platform_errors::ErrorKind;

    use super::*;

    fn bad_json() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("{").unwrap_err()
    }

    #[test]
    fn unauthorized_is_final_and_maps_to_access_denied() {
        let e = DomainError::Unauthorized;
        assert!(!e.is_retryable());

        let public: PdpError = e.into();
        assert!(matches!(public, PdpError::AccessDenied(_)));
        assert_eq!(public.code(), "F-157388");
        assert_eq!(public.platform_error().kind(), ErrorKind::AccessDenied);
    }

    #[test]
    fn transport_failures_are_retryable_integration_errors() {
        let cases = [
            DomainError::EmptyResponse { status: 200 },
            DomainError::UnexpectedStatus {
                status: 503,
                body: "busy".to_owned(),
            },
            DomainError::Deserialize(bad_json()),
        ];
        for e in cases {
            assert!(e.is_retryable(), "{e}");
            let public: PdpError = e.into();
            assert!(matches!(public, PdpError::Integration(_)));
        }
    }

    #[test]
    fn malformed_response_keeps_parse_error_as_cause() {
        let public: PdpError = DomainError::Deserialize(bad_json()).into();
        assert_eq!(public.code(), "F-208314");
        assert!(public.platform_error().source().is_some());
    }

    #[test]
    fn protocol_violations_are_not_retried() {
        let cases = [
            DomainError::Indeterminate {
                decision: "Indeterminate".to_owned(),
                response: "{}".to_owned(),
            },
            DomainError::NoDecisions,
            DomainError::UnknownObligations {
                obligations: vec!["log_access".to_owned()],
            },
        ];
        for e in cases {
            assert!(!e.is_retryable());
            let public: PdpError = e.into();
            assert!(matches!(public, PdpError::ProtocolViolation(_)));
        }
    }

    #[test]
    fn invalid_token_is_an_invalid_request() {
        let e = DomainError::InvalidToken {
            kind: TokenKind::Oidc,
            reason: "expected three segments".to_owned(),
        };
        assert_eq!(e.to_string(), "invalid oidc token: expected three segments");
        let public: PdpError = e.into();
        assert!(matches!(public, PdpError::InvalidRequest(_)));
        assert_eq!(public.code(), "F-261853");
    }
}
