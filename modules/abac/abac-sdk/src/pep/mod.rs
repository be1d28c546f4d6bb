//! PEP (Policy Enforcement Point) helpers.
//!
//! - [`PolicyEnforcer`] - PEP object (request to PDP, then grant or typed denial)

pub mod enforcer;

pub use enforcer::{EnforcerError, PolicyEnforcer};
