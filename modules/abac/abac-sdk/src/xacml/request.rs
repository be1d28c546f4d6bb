//! XACML authorization request and its builder.

use serde::Serialize;

use super::attributes::AttributeSet;

/// XACML attribute category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    AccessSubject,
    Action,
    Resource,
    Environment,
}

/// An immutable XACML authorization request.
///
/// Several resource sets may be bundled to get one decision per resource
/// in a single round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct XacmlRequest {
    #[serde(rename = "Request")]
    request: Categories,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
struct Categories {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    access_subject: Vec<AttributeSet>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    action: Vec<AttributeSet>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    resource: Vec<AttributeSet>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    environment: Vec<AttributeSet>,
}

impl Categories {
    fn sets_mut(&mut self, category: Category) -> &mut Vec<AttributeSet> {
        match category {
            Category::AccessSubject => &mut self.access_subject,
            Category::Action => &mut self.action,
            Category::Resource => &mut self.resource,
            Category::Environment => &mut self.environment,
        }
    }

    fn sets(&self, category: Category) -> &[AttributeSet] {
        match category {
            Category::AccessSubject => &self.access_subject,
            Category::Action => &self.action,
            Category::Resource => &self.resource,
            Category::Environment => &self.environment,
        }
    }
}

impl XacmlRequest {
    #[must_use]
    pub fn builder() -> XacmlRequestBuilder {
        XacmlRequestBuilder::default()
    }

    /// The attribute sets recorded for `category`, in insertion order.
    #[must_use]
    pub fn attribute_sets(&self, category: Category) -> &[AttributeSet] {
        self.request.sets(category)
    }
}

/// Incremental builder for [`XacmlRequest`].
///
/// No validation of attribute values happens here; any string is accepted.
#[derive(Debug, Clone, Default)]
pub struct XacmlRequestBuilder {
    categories: Categories,
}

impl XacmlRequestBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an attribute set to `category`.
    #[must_use]
    pub fn attribute_set(mut self, category: Category, set: AttributeSet) -> Self {
        self.add_attribute_set(category, set);
        self
    }

    /// Append an attribute set to `category` in place.
    pub fn add_attribute_set(&mut self, category: Category, set: AttributeSet) {
        self.categories.sets_mut(category).push(set);
    }

    #[must_use]
    pub fn subject(self, set: AttributeSet) -> Self {
        self.attribute_set(Category::AccessSubject, set)
    }

    #[must_use]
    pub fn action(self, set: AttributeSet) -> Self {
        self.attribute_set(Category::Action, set)
    }

    #[must_use]
    pub fn resource(self, set: AttributeSet) -> Self {
        self.attribute_set(Category::Resource, set)
    }

    #[must_use]
    pub fn environment(self, set: AttributeSet) -> Self {
        self.attribute_set(Category::Environment, set)
    }

    /// Append an environment set in place; used to attach token context
    /// after the caller-supplied part of the request has been built.
    pub fn add_environment_attribute_set(&mut self, set: AttributeSet) {
        self.add_attribute_set(Category::Environment, set);
    }

    #[must_use]
    pub fn build(self) -> XacmlRequest {
        XacmlRequest {
            request: self.categories,
        }
    }
}
