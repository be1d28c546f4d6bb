//! Access request context and the resulting access decision.

use std::collections::BTreeMap;
use std::fmt;

use crate::token::IdToken;

/// Everything the enforcement layer knows about one access check.
///
/// Immutable once built; the [`AccessDecision`] returned for it keeps a copy
/// so the outcome can be audited together with what was asked.
#[derive(Debug, Clone)]
pub struct PdpRequest {
    id_token: IdToken,
    subject_id: Option<String>,
    action: String,
    resource_type: String,
    domain: String,
    person_ids: Vec<String>,
    extra_resource_attributes: BTreeMap<String, Vec<String>>,
}

impl PdpRequest {
    /// Start a request for `action` on `resource_type` within `domain`.
    #[must_use]
    pub fn builder(
        id_token: IdToken,
        domain: impl Into<String>,
        resource_type: impl Into<String>,
        action: impl Into<String>,
    ) -> PdpRequestBuilder {
        PdpRequestBuilder {
            request: Self {
                id_token,
                subject_id: None,
                action: action.into(),
                resource_type: resource_type.into(),
                domain: domain.into(),
                person_ids: Vec::new(),
                extra_resource_attributes: BTreeMap::new(),
            },
        }
    }

    #[must_use]
    pub fn id_token(&self) -> &IdToken {
        &self.id_token
    }

    #[must_use]
    pub fn subject_id(&self) -> Option<&str> {
        self.subject_id.as_deref()
    }

    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }

    #[must_use]
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Persons the request concerns; each becomes its own resource.
    #[must_use]
    pub fn person_ids(&self) -> &[String] {
        &self.person_ids
    }

    #[must_use]
    pub fn extra_resource_attributes(&self) -> &BTreeMap<String, Vec<String>> {
        &self.extra_resource_attributes
    }
}

pub struct PdpRequestBuilder {
    request: PdpRequest,
}

impl PdpRequestBuilder {
    #[must_use]
    pub fn subject_id(mut self, subject_id: impl Into<String>) -> Self {
        self.request.subject_id = Some(subject_id.into());
        self
    }

    #[must_use]
    pub fn person_id(mut self, person_id: impl Into<String>) -> Self {
        self.request.person_ids.push(person_id.into());
        self
    }

    #[must_use]
    pub fn person_ids<I, V>(mut self, person_ids: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.request
            .person_ids
            .extend(person_ids.into_iter().map(Into::into));
        self
    }

    /// Add an application-specific resource attribute value. Repeated ids
    /// accumulate values.
    #[must_use]
    pub fn resource_attribute(mut self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.request
            .extra_resource_attributes
            .entry(id.into())
            .or_default()
            .push(value.into());
        self
    }

    #[must_use]
    pub fn build(self) -> PdpRequest {
        self.request
    }
}

/// Attributes of a protected operation: the resource type it guards, the
/// action it performs and, when known, who calls it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedResourceAttributes {
    subject_id: Option<String>,
    action: String,
    resource_type: String,
}

impl ProtectedResourceAttributes {
    #[must_use]
    pub fn new(resource_type: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            subject_id: None,
            action: action.into(),
            resource_type: resource_type.into(),
        }
    }

    #[must_use]
    pub fn with_subject_id(mut self, subject_id: impl Into<String>) -> Self {
        self.subject_id = Some(subject_id.into());
        self
    }

    #[must_use]
    pub fn subject_id(&self) -> Option<&str> {
        self.subject_id.as_deref()
    }

    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }

    #[must_use]
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }
}

/// Resource data the application looked up for one protected call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppResourceData {
    person_ids: Vec<String>,
    resource_attributes: BTreeMap<String, Vec<String>>,
}

impl AppResourceData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_person_id(mut self, person_id: impl Into<String>) -> Self {
        self.person_ids.push(person_id.into());
        self
    }

    #[must_use]
    pub fn with_person_ids<I, V>(mut self, person_ids: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.person_ids.extend(person_ids.into_iter().map(Into::into));
        self
    }

    /// Repeated ids accumulate values.
    #[must_use]
    pub fn with_resource_attribute(mut self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.resource_attributes
            .entry(id.into())
            .or_default()
            .push(value.into());
        self
    }

    #[must_use]
    pub fn person_ids(&self) -> &[String] {
        &self.person_ids
    }

    #[must_use]
    pub fn resource_attributes(&self) -> &BTreeMap<String, Vec<String>> {
        &self.resource_attributes
    }
}

/// Business-level result of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessOutcome {
    Granted,
    /// Denied: strict confidentiality address ("kode 6").
    DeniedCode6,
    /// Denied: confidential address ("kode 7").
    DeniedCode7,
    /// Denied: the person is an employee of the agency.
    DeniedOwnEmployee,
    /// Denied for a reason the PDP did not specify in a known advice code.
    DeniedOther,
}

impl AccessOutcome {
    #[must_use]
    pub fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

impl fmt::Display for AccessOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Granted => "granted",
            Self::DeniedCode6 => "denied_code_6",
            Self::DeniedCode7 => "denied_code_7",
            Self::DeniedOwnEmployee => "denied_own_employee",
            Self::DeniedOther => "denied_other",
        };
        f.write_str(s)
    }
}

/// Outcome of an access check paired with the request that produced it.
#[derive(Debug, Clone)]
pub struct AccessDecision {
    outcome: AccessOutcome,
    request: PdpRequest,
}

impl AccessDecision {
    #[must_use]
    pub fn new(outcome: AccessOutcome, request: PdpRequest) -> Self {
        Self { outcome, request }
    }

    #[must_use]
    pub fn outcome(&self) -> AccessOutcome {
        self.outcome
    }

    #[must_use]
    pub fn request(&self) -> &PdpRequest {
        &self.request
    }

    #[must_use]
    pub fn is_granted(&self) -> bool {
        self.outcome.is_granted()
    }
}

/// Outcome of a protected-resource check paired with the attributes and
/// application data it was made for.
#[derive(Debug, Clone)]
pub struct ResourceAccessDecision {
    outcome: AccessOutcome,
    attributes: ProtectedResourceAttributes,
    app_data: AppResourceData,
}

impl ResourceAccessDecision {
    #[must_use]
    pub fn new(
        outcome: AccessOutcome,
        attributes: ProtectedResourceAttributes,
        app_data: AppResourceData,
    ) -> Self {
        Self {
            outcome,
            attributes,
            app_data,
        }
    }

    #[must_use]
    pub fn outcome(&self) -> AccessOutcome {
        self.outcome
    }

    #[must_use]
    pub fn attributes(&self) -> &ProtectedResourceAttributes {
        &self.attributes
    }

    #[must_use]
    pub fn app_data(&self) -> &AppResourceData {
        &self.app_data
    }

    #[must_use]
    pub fn is_granted(&self) -> bool {
        self.outcome.is_granted()
    }
}
