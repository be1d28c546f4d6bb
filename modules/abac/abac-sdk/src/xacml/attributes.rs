//! Attribute sets: the unit of a XACML request category.

use serde::ser::{Serialize, SerializeStruct, Serializer};

/// One attribute id with all of its values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    id: String,
    values: Vec<String>,
}

impl Attribute {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// An ordered, multi-valued set of attributes.
///
/// Adding a value for an id that is already present appends to that id's
/// values instead of replacing them, so nothing is silently dropped.
/// Insertion order of ids is preserved on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSet {
    attributes: Vec<Attribute>,
}

impl AttributeSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single value for `id`.
    pub fn add_attribute(&mut self, id: impl Into<String>, value: impl Into<String>) {
        let id = id.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|a| a.id == id) {
            Some(existing) => existing.values.push(value),
            None => self.attributes.push(Attribute {
                id,
                values: vec![value],
            }),
        }
    }

    /// Add several values for `id`. An empty iterator adds nothing.
    pub fn add_attributes<I, V>(&mut self, id: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let id = id.into();
        for value in values {
            self.add_attribute(id.clone(), value);
        }
    }

    /// Builder-style variant of [`AttributeSet::add_attribute`].
    #[must_use]
    pub fn with(mut self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_attribute(id, value);
        self
    }

    /// All values recorded for `id`, empty if absent.
    #[must_use]
    pub fn values(&self, id: &str) -> &[String] {
        self.attributes
            .iter()
            .find(|a| a.id == id)
            .map_or(&[], |a| a.values.as_slice())
    }

    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

// Wire shape: {"Attribute":[{"AttributeId":"..","Value":".."}, ...]}
impl Serialize for AttributeSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("AttributeSet", 1)?;
        s.serialize_field("Attribute", &self.attributes)?;
        s.end()
    }
}

impl Serialize for Attribute {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Attribute", 2)?;
        s.serialize_field("AttributeId", &self.id)?;
        if let [single] = self.values.as_slice() {
            s.serialize_field("Value", single)?;
        } else {
            s.serialize_field("Value", &self.values)?;
        }
        s.end()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn repeated_id_appends_values() {
        let mut set = AttributeSet::new();
        set.add_attribute("fnr", "11111111111");
        set.add_attribute("domain", "foreldrepenger");
        set.add_attribute("fnr", "22222222222");

        assert_eq!(set.attributes().len(), 2);
        assert_eq!(set.values("fnr"), ["11111111111", "22222222222"]);
        assert!(set.values("missing").is_empty());
    }

    #[test]
    fn add_attributes_with_no_values_adds_nothing() {
        let mut set = AttributeSet::new();
        set.add_attributes("fnr", Vec::<String>::new());
        assert!(set.is_empty());
    }

    #[test]
    fn serializes_single_value_as_string_and_many_as_array() {
        let mut set = AttributeSet::new().with("action", "read");
        set.add_attributes("fnr", ["1", "2"]);

        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(
            json,
            json!({
                "Attribute": [
                    {"AttributeId": "action", "Value": "read"},
                    {"AttributeId": "fnr", "Value": ["1", "2"]},
                ]
            })
        );
    }
}
