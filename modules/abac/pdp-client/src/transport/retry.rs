use std::future::Future;

use tracing::info;

use crate::domain::DomainError;

/// Logged when the first PDP call fails and is retried.
pub const RETRY_CODE: &str = "F-157387";

/// Run `attempt`, and run it once more if the first failure is retryable.
/// The second outcome is returned as is.
pub async fn retry_once<T, F, Fut>(mut attempt: F) -> Result<T, DomainError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DomainError>>,
{
    match attempt().await {
        Err(e) if e.is_retryable() => {
            info!(
                code = RETRY_CODE,
                cause_code = e.code(),
                error = %e,
                "PDP call failed, retrying once"
            );
            attempt().await
        }
        other => other,
    }
}
