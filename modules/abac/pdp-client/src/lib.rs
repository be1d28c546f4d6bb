//! PDP client
//!
//! Implements [`abac_sdk::PdpClient`] against a XACML Policy Decision Point
//! over HTTP: the request is enriched with the caller's token, posted with
//! Basic authentication (one retry on transient failures), and the answer
//! is resolved to an [`abac_sdk::AccessOutcome`] where any deny wins.
//!
//! ```ignore
//! let cfg = PdpClientConfig::load(None)?;
//! let pdp = PdpClientModule::init(&cfg, Arc::new(StandardRequestAttributes))?;
//! let decision = pdp.request_access(request).await?;
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;
pub mod module;
pub mod transport;

pub use config::{ConfigError, PdpClientConfig};
pub use module::PdpClientModule;
pub use transport::{HttpPdpConsumer, PdpConsumer};
