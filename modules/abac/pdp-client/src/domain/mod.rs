//! Domain layer for the PDP client.

pub mod decision;
pub mod error;
pub mod local_client;
pub mod service;
pub mod token;

pub use error::DomainError;
pub use local_client::PdpLocalClient;
pub use service::Service;
pub use token::TokenAttributes;
