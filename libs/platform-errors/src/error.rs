//! [`PlatformError`] and its kinds.

use std::fmt;

/// Boxed cause attached to a [`PlatformError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Programming error or broken invariant. Never retried.
    Technical,
    /// Failure talking to, or understanding, a remote system.
    Integration,
    /// The caller lacks access.
    AccessDenied,
    /// A business rule rejected the request.
    Functional,
}

impl ErrorKind {
    /// Severity used when the constructor does not override it.
    #[must_use]
    pub const fn default_severity(self) -> Severity {
        match self {
            Self::Technical | Self::Integration => Severity::Error,
            Self::AccessDenied | Self::Functional => Severity::Warn,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Technical => "technical",
            Self::Integration => "integration",
            Self::AccessDenied => "access_denied",
            Self::Functional => "functional",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log level an error is reported at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

/// A coded platform error.
///
/// Built through one constructor per [`ErrorKind`]; there is no way to
/// create an error without a kind and a code.
#[derive(thiserror::Error)]
#[error("{code}: {message}")]
pub struct PlatformError {
    kind: ErrorKind,
    code: String,
    message: String,
    severity: Severity,
    solution: Option<String>,
    #[source]
    source: Option<BoxError>,
}

impl PlatformError {
    fn new(kind: ErrorKind, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: code.into(),
            message: message.into(),
            severity: kind.default_severity(),
            solution: None,
            source: None,
        }
    }

    /// Create a technical error.
    #[must_use]
    pub fn technical(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Technical, code, message)
    }

    /// Create an integration error.
    #[must_use]
    pub fn integration(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Integration, code, message)
    }

    /// Create an access-denied error.
    #[must_use]
    pub fn access_denied(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AccessDenied, code, message)
    }

    /// Create a functional error with a suggested solution for the user.
    #[must_use]
    pub fn functional(
        code: impl Into<String>,
        message: impl Into<String>,
        solution: impl Into<String>,
    ) -> Self {
        let mut err = Self::new(ErrorKind::Functional, code, message);
        err.solution = Some(solution.into());
        err
    }

    /// Attach the underlying cause.
    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<BoxError>) -> Self {
        self.source = Some(cause.into());
        self
    }

    /// Override the severity.
    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn solution(&self) -> Option<&str> {
        self.solution.as_deref()
    }

    /// Emit one tracing event for this error at its severity.
    ///
    /// Access-denied errors are expected in normal operation and are logged
    /// without their cause chain.
    pub fn log(&self) {
        let cause = match self.kind {
            ErrorKind::AccessDenied => None,
            _ => self.source.as_ref().map(ToString::to_string),
        };
        let kind = self.kind.as_str();
        let code = self.code.as_str();
        let message = self.message.as_str();
        match self.severity {
            Severity::Error => tracing::error!(code, kind, cause = cause.as_deref(), "{message}"),
            Severity::Warn => tracing::warn!(code, kind, cause = cause.as_deref(), "{message}"),
            Severity::Info => tracing::info!(code, kind, cause = cause.as_deref(), "{message}"),
        }
    }
}

impl fmt::Debug for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformError")
            .field("kind", &self.kind)
            .field("code", &self.code)
            .field("message", &self.message)
            .field("severity", &self.severity)
            .field("solution", &self.solution)
            .field("source", &self.source.as_ref().map(ToString::to_string))
            .finish()
    }
}
