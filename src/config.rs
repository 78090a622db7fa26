//! Default error messages for composite schemas.
//!
//! Message text is configuration, passed to a schema when it is built rather
//! than read from global state. Templates may contain `{key}`, `{index}` and
//! `{count}` placeholders.
//!
//! ```rust
//! use std::sync::Arc;
//! use strata::{ErrorMessages, JsonPath, Schema};
//! use serde_json::json;
//!
//! let messages = Arc::new(
//!     ErrorMessages::default().with_missing_property("'{key}' fehlt"),
//! );
//! let schema = Schema::object()
//!     .with_messages(messages)
//!     .field("name", Schema::string());
//!
//! let errors = schema.validate(&json!({}), &JsonPath::root()).into_result().unwrap_err();
//! assert_eq!(errors.first().causes[0].message, "'name' fehlt");
//! ```

use std::sync::Arc;

/// Message templates used when a composite synthesizes an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMessages {
    /// Value handed to an object schema is not an object.
    pub expected_object: String,
    /// Value handed to an array schema is not an array.
    pub expected_array: String,
    /// A required property is absent. Placeholder: `{key}`.
    pub missing_property: String,
    /// A strict object received an undeclared property. Placeholder: `{key}`.
    pub extra_property: String,
    /// A required element is absent. Placeholder: `{index}`.
    pub missing_element: String,
    /// A closed tuple received a surplus element. Placeholder: `{index}`.
    pub extra_item: String,
    /// Aggregate header for objects. Placeholder: `{count}`.
    pub invalid_properties: String,
    /// Aggregate header for arrays. Placeholder: `{count}`.
    pub invalid_elements: String,
}

impl Default for ErrorMessages {
    fn default() -> Self {
        Self {
            expected_object: "expected object".to_string(),
            expected_array: "expected array".to_string(),
            missing_property: "required property '{key}' is missing".to_string(),
            extra_property: "unknown property '{key}'".to_string(),
            missing_element: "required element at index {index} is missing".to_string(),
            extra_item: "unexpected element at index {index}".to_string(),
            invalid_properties: "{count} invalid propert(ies)".to_string(),
            invalid_elements: "{count} invalid element(s)".to_string(),
        }
    }
}

impl ErrorMessages {
    /// The built-in messages, shared.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Overrides the non-object message.
    pub fn with_expected_object(mut self, template: impl Into<String>) -> Self {
        self.expected_object = template.into();
        self
    }

    /// Overrides the non-array message.
    pub fn with_expected_array(mut self, template: impl Into<String>) -> Self {
        self.expected_array = template.into();
        self
    }

    /// Overrides the missing-property template.
    pub fn with_missing_property(mut self, template: impl Into<String>) -> Self {
        self.missing_property = template.into();
        self
    }

    /// Overrides the extra-property template.
    pub fn with_extra_property(mut self, template: impl Into<String>) -> Self {
        self.extra_property = template.into();
        self
    }

    /// Overrides the missing-element template.
    pub fn with_missing_element(mut self, template: impl Into<String>) -> Self {
        self.missing_element = template.into();
        self
    }

    /// Overrides the extra-item template.
    pub fn with_extra_item(mut self, template: impl Into<String>) -> Self {
        self.extra_item = template.into();
        self
    }

    /// Overrides the object aggregate header.
    pub fn with_invalid_properties(mut self, template: impl Into<String>) -> Self {
        self.invalid_properties = template.into();
        self
    }

    /// Overrides the array aggregate header.
    pub fn with_invalid_elements(mut self, template: impl Into<String>) -> Self {
        self.invalid_elements = template.into();
        self
    }

    pub(crate) fn missing_property(&self, key: &str) -> String {
        self.missing_property.replace("{key}", key)
    }

    pub(crate) fn extra_property(&self, key: &str) -> String {
        self.extra_property.replace("{key}", key)
    }

    pub(crate) fn missing_element(&self, index: usize) -> String {
        self.missing_element.replace("{index}", &index.to_string())
    }

    pub(crate) fn extra_item(&self, index: usize) -> String {
        self.extra_item.replace("{index}", &index.to_string())
    }

    pub(crate) fn invalid_properties(&self, count: usize) -> String {
        self.invalid_properties.replace("{count}", &count.to_string())
    }

    pub(crate) fn invalid_elements(&self, count: usize) -> String {
        self.invalid_elements.replace("{count}", &count.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_templates_render() {
        let messages = ErrorMessages::default();
        assert_eq!(messages.missing_property("id"), "required property 'id' is missing");
        assert_eq!(messages.extra_item(4), "unexpected element at index 4");
        assert_eq!(messages.invalid_elements(2), "2 invalid element(s)");
    }

    #[test]
    fn test_override_keeps_other_templates() {
        let messages = ErrorMessages::default().with_extra_property("no '{key}' here");
        assert_eq!(messages.extra_property("x"), "no 'x' here");
        assert_eq!(messages.expected_object, "expected object");
    }

    #[test]
    fn test_template_without_placeholder() {
        let messages = ErrorMessages::default().with_missing_element("missing");
        assert_eq!(messages.missing_element(7), "missing");
    }
}
