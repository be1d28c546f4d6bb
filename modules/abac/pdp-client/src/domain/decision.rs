//! Turns a PDP response into an [`AccessOutcome`].

use abac_sdk::AccessOutcome;
use abac_sdk::xacml::{Advice, Decision, XacmlResponse};
use tracing::{debug, info};

use super::DomainError;

/// Combine all per-resource decisions into one: every resource must be
/// permitted for the whole request to be permitted. `NotApplicable` counts
/// as a denial.
///
/// # Errors
///
/// - `NoDecisions` if the response carries no decisions at all
/// - `Indeterminate` if any decision is indeterminate
pub fn aggregate(response: &XacmlResponse) -> Result<Decision, DomainError> {
    if response.decisions.is_empty() {
        return Err(DomainError::NoDecisions);
    }
    if let Some(decision) = response
        .decisions()
        .find(|d| *d == Decision::Indeterminate)
    {
        return Err(DomainError::Indeterminate {
            decision: decision.to_string(),
            response: render(response),
        });
    }
    if response.decisions().all(|d| d == Decision::Permit) {
        Ok(Decision::Permit)
    } else {
        Ok(Decision::Deny)
    }
}

/// Resolve the outcome of a PDP response.
///
/// A permitted request is granted. A denied request is explained by the
/// most specific advice present: kode 6 before kode 7 before own employee.
///
/// # Errors
///
/// Everything [`aggregate`] rejects, plus `UnknownObligations` when the PDP
/// attaches obligations, which this client cannot fulfil.
pub fn resolve_outcome(response: &XacmlResponse) -> Result<AccessOutcome, DomainError> {
    let decision = aggregate(response)?;

    let obligations: Vec<String> = response
        .all_obligations()
        .map(ToOwned::to_owned)
        .collect();
    if !obligations.is_empty() {
        return Err(DomainError::UnknownObligations { obligations });
    }

    if decision == Decision::Permit {
        return Ok(AccessOutcome::Granted);
    }

    let advice: Vec<&Advice> = response.all_advice().collect();
    debug!(advice = %join(&advice), "deny advice from PDP");

    let outcome = if advice.contains(&&Advice::DenyKode6) {
        AccessOutcome::DeniedCode6
    } else if advice.contains(&&Advice::DenyKode7) {
        AccessOutcome::DeniedCode7
    } else if advice.contains(&&Advice::DenyEgenAnsatt) {
        AccessOutcome::DeniedOwnEmployee
    } else {
        info!(advice = %join(&advice), "deny from PDP without known reason");
        AccessOutcome::DeniedOther
    };
    Ok(outcome)
}

fn join(advice: &[&Advice]) -> String {
    advice
        .iter()
        .copied()
        .map(Advice::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

fn render(response: &XacmlResponse) -> String {
    serde_json::to_string(response).unwrap_or_else(|_| format!("{response:?}"))
}
