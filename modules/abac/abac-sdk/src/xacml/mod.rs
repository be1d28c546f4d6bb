//! XACML JSON profile models.
//!
//! - [`AttributeSet`] - multi-valued attributes of one category entry
//! - [`XacmlRequest`] / [`XacmlRequestBuilder`] - the request sent to the PDP
//! - [`XacmlResponse`] - per-resource decisions with advice and obligations

pub mod attributes;
pub mod request;
pub mod response;

pub use attributes::{Attribute, AttributeSet};
pub use request::{Category, XacmlRequest, XacmlRequestBuilder};
pub use response::{Advice, Decision, DecisionResult, XacmlResponse};
