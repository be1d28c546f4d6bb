//! Attribute identifiers understood by the PDP.

pub const SUBJECT_ID: &str = "urn:oasis:names:tc:xacml:1.0:subject:subject-id";
pub const ACTION_ID: &str = "urn:oasis:names:tc:xacml:1.0:action:action-id";

pub const RESOURCE_DOMAIN: &str = "no.nav.abac.attributter.resource.felles.domene";
pub const RESOURCE_TYPE: &str = "no.nav.abac.attributter.resource.felles.resource_type";
pub const RESOURCE_PERSON_FNR: &str = "no.nav.abac.attributter.resource.felles.person.fnr";

pub const ENVIRONMENT_PEP_ID: &str = "no.nav.abac.attributter.environment.felles.pep_id";
pub const ENVIRONMENT_OIDC_TOKEN_BODY: &str =
    "no.nav.abac.attributter.environment.felles.oidc_token_body";
pub const ENVIRONMENT_TOKENX_TOKEN_BODY: &str =
    "no.nav.abac.attributter.environment.felles.tokenx_token_body";
pub const ENVIRONMENT_SAML_TOKEN: &str = "no.nav.abac.attributter.environment.felles.saml_token";
