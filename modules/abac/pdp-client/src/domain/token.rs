//! Environment attributes describing the caller's identity token.

use abac_sdk::IdToken;
use abac_sdk::attribute_ids::{
    ENVIRONMENT_OIDC_TOKEN_BODY, ENVIRONMENT_PEP_ID, ENVIRONMENT_SAML_TOKEN,
    ENVIRONMENT_TOKENX_TOKEN_BODY,
};
use abac_sdk::xacml::AttributeSet;
use base64::Engine as _;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use tracing::trace;

use super::DomainError;

/// Builds the environment attribute set appended to every request.
#[derive(Debug, Clone)]
pub struct TokenAttributes {
    pep_id: String,
    attach_tokenx_payload: bool,
}

impl TokenAttributes {
    #[must_use]
    pub fn new(pep_id: impl Into<String>, attach_tokenx_payload: bool) -> Self {
        Self {
            pep_id: pep_id.into(),
            attach_tokenx_payload,
        }
    }

    /// PEP id plus the token attribute for the token's kind.
    ///
    /// # Errors
    ///
    /// `InvalidToken` if a JWT is not a compact serialization with a JSON
    /// object payload.
    pub fn environment_set(&self, token: &IdToken) -> Result<AttributeSet, DomainError> {
        let mut set = AttributeSet::new().with(ENVIRONMENT_PEP_ID, self.pep_id.as_str());
        match token {
            IdToken::Oidc(_) => {
                set.add_attribute(ENVIRONMENT_OIDC_TOKEN_BODY, jwt_payload(token)?);
            }
            IdToken::TokenX(_) => {
                if self.attach_tokenx_payload {
                    set.add_attribute(ENVIRONMENT_TOKENX_TOKEN_BODY, jwt_payload(token)?);
                } else {
                    trace!("tokenx token body not attached to PDP request");
                }
            }
            IdToken::Saml(_) => {
                set.add_attribute(ENVIRONMENT_SAML_TOKEN, STANDARD.encode(token.expose()));
            }
        }
        Ok(set)
    }
}

/// The base64url payload segment of a compact JWT, checked to decode to a
/// JSON object. Signatures are not verified here.
fn jwt_payload(token: &IdToken) -> Result<String, DomainError> {
    let invalid = |reason: String| DomainError::InvalidToken {
        kind: token.kind(),
        reason,
    };

    let mut segments = token.expose().split('.');
    let (Some(_), Some(payload), Some(_), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(invalid("expected three dot-separated segments".to_owned()));
    };

    let decoded = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| invalid(format!("payload is not base64url: {e}")))?;
    let claims: serde_json::Value = serde_json::from_slice(&decoded)
        .map_err(|e| invalid(format!("payload is not JSON: {e}")))?;
    if !claims.is_object() {
        return Err(invalid("payload is not a JSON object".to_owned()));
    }
    Ok(payload.to_owned())
}
