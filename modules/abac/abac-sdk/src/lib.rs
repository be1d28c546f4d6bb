#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! ABAC SDK
//!
//! Public API of the attribute-based access control client:
//!
//! - [`PdpClient`] - Public API trait for enforcement code
//! - [`RequestAttributeBuilder`] - Collaborator that maps an access request to XACML attributes
//! - [`PdpRequest`], [`AccessDecision`], [`AccessOutcome`] - Access check models
//! - [`IdToken`] - Identity token forwarded to the PDP
//! - [`xacml`] - XACML request/response models
//! - [`PdpError`] - Error types
//! - [`pep`] - PEP helpers ([`PolicyEnforcer`])
//!
//! ## Usage
//!
//! ```ignore
//! use abac_sdk::{IdToken, PdpRequest, pep::PolicyEnforcer};
//!
//! let enforcer = PolicyEnforcer::new(pdp_client);
//!
//! let request = PdpRequest::builder(IdToken::oidc(raw_jwt), "foreldrepenger", FAGSAK, "read")
//!     .subject_id("Z999999")
//!     .person_id(fnr)
//!     .build();
//!
//! let decision = enforcer.enforce(request).await?;
//! ```

pub mod api;
pub mod attribute_ids;
pub mod error;
pub mod models;
pub mod pep;
pub mod request_attributes;
pub mod token;
pub mod xacml;

// Re-export main types at crate root
pub use api::{PdpClient, RequestAttributeBuilder};
pub use error::PdpError;
pub use models::{
    AccessDecision, AccessOutcome, AppResourceData, PdpRequest, PdpRequestBuilder,
    ProtectedResourceAttributes, ResourceAccessDecision,
};
pub use pep::{EnforcerError, PolicyEnforcer};
pub use request_attributes::{StandardRequestAttributes, protected_resource_request};
pub use token::{IdToken, TokenKind};
pub use xacml::{
    Advice, AttributeSet, Category, Decision, DecisionResult, XacmlRequest, XacmlRequestBuilder,
    XacmlResponse,
};
