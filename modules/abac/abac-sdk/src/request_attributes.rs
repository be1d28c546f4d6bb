//! Default mapping from access requests to XACML attribute sets.

use crate::api::RequestAttributeBuilder;
use crate::attribute_ids;
use crate::models::{AppResourceData, PdpRequest, ProtectedResourceAttributes};
use crate::xacml::{AttributeSet, XacmlRequest, XacmlRequestBuilder};

/// Maps a [`PdpRequest`] to:
///
/// - one subject set with the subject id, when known
/// - one action set with the action id
/// - one resource set per person id, or a single resource set when the
///   request names no persons; every resource set carries domain, resource
///   type and the extra resource attributes
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRequestAttributes;

impl RequestAttributeBuilder for StandardRequestAttributes {
    fn build(&self, request: &PdpRequest) -> XacmlRequestBuilder {
        let mut attributes =
            ProtectedResourceAttributes::new(request.resource_type(), request.action());
        if let Some(subject_id) = request.subject_id() {
            attributes = attributes.with_subject_id(subject_id);
        }

        let mut app_data = AppResourceData::new().with_person_ids(request.person_ids());
        for (id, values) in request.extra_resource_attributes() {
            for value in values {
                app_data = app_data.with_resource_attribute(id.as_str(), value.as_str());
            }
        }

        protected_resource_builder(&attributes, request.domain(), &app_data)
    }
}

/// XACML request for a protected resource, laid out like
/// [`StandardRequestAttributes`]. Carries no environment set.
#[must_use]
pub fn protected_resource_request(
    attributes: &ProtectedResourceAttributes,
    domain: &str,
    app_data: &AppResourceData,
) -> XacmlRequest {
    protected_resource_builder(attributes, domain, app_data).build()
}

fn protected_resource_builder(
    attributes: &ProtectedResourceAttributes,
    domain: &str,
    app_data: &AppResourceData,
) -> XacmlRequestBuilder {
    let mut builder = XacmlRequestBuilder::new();

    if let Some(subject_id) = attributes.subject_id() {
        builder = builder.subject(AttributeSet::new().with(attribute_ids::SUBJECT_ID, subject_id));
    }

    builder = builder.action(AttributeSet::new().with(attribute_ids::ACTION_ID, attributes.action()));

    let mut base = AttributeSet::new()
        .with(attribute_ids::RESOURCE_DOMAIN, domain)
        .with(attribute_ids::RESOURCE_TYPE, attributes.resource_type());
    for (id, values) in app_data.resource_attributes() {
        base.add_attributes(id.as_str(), values.iter().map(String::as_str));
    }

    if app_data.person_ids().is_empty() {
        builder = builder.resource(base);
    } else {
        for person_id in app_data.person_ids() {
            builder = builder.resource(
                base.clone()
                    .with(attribute_ids::RESOURCE_PERSON_FNR, person_id.as_str()),
            );
        }
    }

    builder
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::token::IdToken;
    use crate::xacml::Category;

    fn request() -> crate::models::PdpRequestBuilder {
        PdpRequest::builder(
            IdToken::saml("<Assertion/>"),
            "foreldrepenger",
            "no.nav.abac.attributter.foreldrepenger.fagsak",
            "read",
        )
    }

    #[test]
    fn one_resource_set_per_person() {
        let req = request()
            .subject_id("Z999999")
            .person_ids(["11111111111", "22222222222"])
            .resource_attribute("saksstatus", "OPPR")
            .build();

        let xacml = StandardRequestAttributes.build(&req).build();

        let resources = xacml.attribute_sets(Category::Resource);
        assert_eq!(resources.len(), 2);
        assert_eq!(
            resources[0].values(attribute_ids::RESOURCE_PERSON_FNR),
            ["11111111111"]
        );
        assert_eq!(
            resources[1].values(attribute_ids::RESOURCE_PERSON_FNR),
            ["22222222222"]
        );
        for resource in resources {
            assert_eq!(resource.values(attribute_ids::RESOURCE_DOMAIN), ["foreldrepenger"]);
            assert_eq!(resource.values("saksstatus"), ["OPPR"]);
        }

        let subjects = xacml.attribute_sets(Category::AccessSubject);
        assert_eq!(subjects[0].values(attribute_ids::SUBJECT_ID), ["Z999999"]);
        let actions = xacml.attribute_sets(Category::Action);
        assert_eq!(actions[0].values(attribute_ids::ACTION_ID), ["read"]);
    }

    #[test]
    fn protected_resource_request_has_no_environment() {
        let attributes =
            ProtectedResourceAttributes::new("fagsak", "update").with_subject_id("Z999999");
        let app_data = AppResourceData::new()
            .with_person_ids(["11111111111", "22222222222"])
            .with_resource_attribute("aksjonspunkt", "5016");

        let xacml = protected_resource_request(&attributes, "foreldrepenger", &app_data);

        let resources = xacml.attribute_sets(Category::Resource);
        assert_eq!(resources.len(), 2);
        assert_eq!(resources[1].values(attribute_ids::RESOURCE_TYPE), ["fagsak"]);
        assert_eq!(resources[1].values("aksjonspunkt"), ["5016"]);
        assert_eq!(
            xacml.attribute_sets(Category::AccessSubject)[0].values(attribute_ids::SUBJECT_ID),
            ["Z999999"]
        );
        assert!(xacml.attribute_sets(Category::Environment).is_empty());
    }

    #[test]
    fn no_persons_gives_single_resource_and_no_subject() {
        let xacml = StandardRequestAttributes.build(&request().build()).build();

        assert_eq!(xacml.attribute_sets(Category::Resource).len(), 1);
        assert!(xacml.attribute_sets(Category::AccessSubject).is_empty());
        assert!(xacml.attribute_sets(Category::Environment).is_empty());
    }
}
