//! Identity token forwarded to the PDP.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

/// Kind of identity token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Oidc,
    TokenX,
    Saml,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Oidc => "oidc",
            Self::TokenX => "tokenx",
            Self::Saml => "saml",
        };
        f.write_str(s)
    }
}

/// The caller's identity token. `Debug` never prints the raw token.
#[derive(Debug, Clone)]
pub enum IdToken {
    /// OpenID Connect JWT (compact serialization).
    Oidc(SecretString),
    /// `TokenX` JWT (compact serialization).
    TokenX(SecretString),
    /// Raw SAML assertion XML.
    Saml(SecretString),
}

impl IdToken {
    #[must_use]
    pub fn oidc(token: impl Into<String>) -> Self {
        Self::Oidc(SecretString::from(token.into()))
    }

    #[must_use]
    pub fn tokenx(token: impl Into<String>) -> Self {
        Self::TokenX(SecretString::from(token.into()))
    }

    #[must_use]
    pub fn saml(token: impl Into<String>) -> Self {
        Self::Saml(SecretString::from(token.into()))
    }

    #[must_use]
    pub fn kind(&self) -> TokenKind {
        match self {
            Self::Oidc(_) => TokenKind::Oidc,
            Self::TokenX(_) => TokenKind::TokenX,
            Self::Saml(_) => TokenKind::Saml,
        }
    }

    /// The raw token string.
    #[must_use]
    pub fn expose(&self) -> &str {
        match self {
            Self::Oidc(t) | Self::TokenX(t) | Self::Saml(t) => t.expose_secret(),
        }
    }
}
