//! Policy Enforcement Point (`PEP`) object.
//!
//! [`PolicyEnforcer`] turns an [`AccessDecision`] into a `Result`: granted
//! decisions pass through, everything else becomes an [`EnforcerError`].
//! Errors from the PDP are never treated as granted.

use std::sync::Arc;

use platform_errors::{PlatformError, Severity};

use crate::api::PdpClient;
use crate::error::PdpError;
use crate::models::{AccessDecision, AccessOutcome, PdpRequest};

/// Code used for every denial raised by the enforcer.
pub const PEP_DENIED_CODE: &str = "F-608625";

/// Error from the PEP enforcement flow.
#[derive(Debug, thiserror::Error)]
pub enum EnforcerError {
    /// The PDP denied access.
    #[error("access denied: {outcome}")]
    Denied {
        outcome: AccessOutcome,
        /// The full decision, for auditing.
        decision: Box<AccessDecision>,
    },

    /// The PDP call failed; access must be denied.
    #[error("authorization evaluation failed: {0}")]
    EvaluationFailed(#[from] PdpError),
}

impl EnforcerError {
    /// Platform error describing this failure for logging and API mapping.
    ///
    /// Denials are access-denied errors at warn severity with a message
    /// naming the reason. Evaluation failures keep the PDP client's error as
    /// is, so a rejected PDP login stays an access-denied error.
    #[must_use]
    pub fn into_platform_error(self) -> PlatformError {
        match self {
            Self::Denied { outcome, .. } => {
                PlatformError::access_denied(PEP_DENIED_CODE, denial_message(outcome))
                    .with_severity(Severity::Warn)
            }
            Self::EvaluationFailed(e) => e.into_platform_error(),
        }
    }
}

fn denial_message(outcome: AccessOutcome) -> &'static str {
    match outcome {
        AccessOutcome::DeniedCode6 => "No access: person has a strictly confidential address (code 6)",
        AccessOutcome::DeniedCode7 => "No access: person has a confidential address (code 7)",
        AccessOutcome::DeniedOwnEmployee => "No access: person is an employee",
        AccessOutcome::DeniedOther | AccessOutcome::Granted => "No access",
    }
}

/// Policy Enforcement Point.
///
/// Constructed once during service init; cloneable and cheap to pass
/// around (`Arc` inside).
///
/// # Example
///
/// ```ignore
/// let enforcer = PolicyEnforcer::new(pdp_client.clone());
/// let decision = enforcer.enforce(request).await?; // Err unless granted
/// ```
#[derive(Clone)]
pub struct PolicyEnforcer {
    pdp: Arc<dyn PdpClient>,
}

impl PolicyEnforcer {
    #[must_use]
    pub fn new(pdp: Arc<dyn PdpClient>) -> Self {
        Self { pdp }
    }

    /// Evaluate `request` and require the outcome to be granted.
    ///
    /// # Errors
    ///
    /// - [`EnforcerError::Denied`] if the PDP denies access
    /// - [`EnforcerError::EvaluationFailed`] if the PDP call fails
    pub async fn enforce(&self, request: PdpRequest) -> Result<AccessDecision, EnforcerError> {
        let decision = self.pdp.request_access(request).await?;
        let outcome = decision.outcome();
        if outcome.is_granted() {
            return Ok(decision);
        }

        tracing::debug!(%outcome, action = decision.request().action(), "access denied by PDP");
        Err(EnforcerError::Denied {
            outcome,
            decision: Box::new(decision),
        })
    }
}

impl std::fmt::Debug for PolicyEnforcer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyEnforcer").finish_non_exhaustive()
    }
}
