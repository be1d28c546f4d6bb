#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Platform errors
//!
//! A closed set of error kinds shared by the integration libraries:
//!
//! - [`ErrorKind::Technical`] - a bug or a broken invariant
//! - [`ErrorKind::Integration`] - a remote system failed or answered garbage
//! - [`ErrorKind::AccessDenied`] - the caller is not allowed to do this
//! - [`ErrorKind::Functional`] - a business rule rejected the request, with a suggested solution
//!
//! Every error carries a stable code (`F-xxxxxx`) that operations use to
//! find the failure in logs, a formatted message, a [`Severity`] and an
//! optional cause.
//!
//! ```ignore
//! use platform_errors::PlatformError;
//!
//! let err = PlatformError::integration("F-091324", "Unexpected IO error calling PDP")
//!     .with_cause(io_err);
//! err.log();
//! ```

mod error;

pub use error::{BoxError, ErrorKind, PlatformError, Severity};
