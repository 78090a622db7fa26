//! Object schema validation.
//!
//! [`ObjectSchema`] validates declared properties plus a policy for
//! undeclared ones, and provides the derived-schema algebra (`pick`, `omit`,
//! `merge`, `partial`, ...). Derivations never touch the receiver; they
//! return a new schema sharing the unchanged children.

use std::collections::HashSet;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;
use stillwater::Validation;

use crate::aggregate::ErrorCollector;
use crate::config::ErrorMessages;
use crate::error::{codes, DefinitionError, SchemaError, SchemaErrors};
use crate::path::JsonPath;

use super::traits::SchemaLike;
use super::{value_type_name, Schema};

/// How properties missing from the declaration are treated.
#[derive(Clone, Debug, Default)]
pub enum UnmatchedProperties {
    /// Any undeclared property is an error (strict). This is the default.
    #[default]
    Reject,
    /// Undeclared properties are accepted as they are (passthrough).
    Accept,
    /// Undeclared properties must match the schema (catchall).
    Validate(Schema),
}

impl From<bool> for UnmatchedProperties {
    fn from(accept: bool) -> Self {
        if accept {
            UnmatchedProperties::Accept
        } else {
            UnmatchedProperties::Reject
        }
    }
}

impl From<Schema> for UnmatchedProperties {
    fn from(schema: Schema) -> Self {
        UnmatchedProperties::Validate(schema)
    }
}

impl<S: SchemaLike + 'static> From<S> for UnmatchedProperties {
    fn from(schema: S) -> Self {
        UnmatchedProperties::Validate(Schema::new(schema))
    }
}

/// A schema for JSON objects.
///
/// Every declared property is checked and every undeclared property is run
/// through the [`UnmatchedProperties`] policy; all failures end up in one
/// aggregate error. On success the input is returned untouched.
///
/// # Example
///
/// ```rust
/// use strata::{JsonPath, Schema};
/// use serde_json::json;
///
/// let schema = Schema::object()
///     .field("name", Schema::string().min_len(1))
///     .field("age", Schema::integer().positive())
///     .optional_field("email", Schema::string());
///
/// let errors = schema
///     .validate(&json!({"name": "", "age": -1, "extra": true}), &JsonPath::root())
///     .into_result()
///     .unwrap_err();
///
/// // One aggregate, one cause per failing key.
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors.first().causes.len(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct ObjectSchema {
    shape: IndexMap<String, Schema>,
    unmatched: UnmatchedProperties,
    messages: Arc<ErrorMessages>,
    type_error_message: Option<String>,
}

impl ObjectSchema {
    /// Creates a strict object schema with no properties.
    pub fn new() -> Self {
        Self {
            shape: IndexMap::new(),
            unmatched: UnmatchedProperties::Reject,
            messages: ErrorMessages::shared(),
            type_error_message: None,
        }
    }

    /// Declares a property. Whether it may be absent is decided by the
    /// schema's own optionality.
    ///
    /// Redeclaring a name replaces the earlier schema in place.
    pub fn field(mut self, name: impl Into<String>, schema: impl Into<Schema>) -> Self {
        self.shape.insert(name.into(), schema.into());
        self
    }

    /// Declares a property that may be absent.
    pub fn optional_field(self, name: impl Into<String>, schema: impl Into<Schema>) -> Self {
        let schema: Schema = schema.into();
        self.field(name, schema.optional())
    }

    /// Sets the policy for undeclared properties.
    ///
    /// Accepts an [`UnmatchedProperties`], a `bool` (`true` accepts, `false`
    /// rejects) or any schema (catchall).
    pub fn unmatched(mut self, policy: impl Into<UnmatchedProperties>) -> Self {
        self.unmatched = policy.into();
        self
    }

    /// Overrides the message used when the value is not an object.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }

    /// Uses `messages` for every error this schema synthesizes.
    pub fn with_messages(mut self, messages: Arc<ErrorMessages>) -> Self {
        self.messages = messages;
        self
    }

    /// The declared properties, in declaration order.
    pub fn shape(&self) -> &IndexMap<String, Schema> {
        &self.shape
    }

    /// The declared property names, in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.shape.keys().map(String::as_str)
    }

    /// The schema declared for `name`.
    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.shape.get(name)
    }

    /// The policy for undeclared properties.
    pub fn unmatched_policy(&self) -> &UnmatchedProperties {
        &self.unmatched
    }

    /// Number of declared properties.
    pub fn len(&self) -> usize {
        self.shape.len()
    }

    /// Returns true if no property is declared.
    pub fn is_empty(&self) -> bool {
        self.shape.is_empty()
    }

    /// Validates `value`, returning it unchanged on success.
    pub fn validate<'v>(
        &self,
        value: &'v Value,
        path: &JsonPath,
    ) -> Validation<&'v Value, SchemaErrors> {
        let Some(obj) = value.as_object() else {
            let message = self
                .type_error_message
                .clone()
                .unwrap_or_else(|| self.messages.expected_object.clone());
            return Validation::Failure(SchemaErrors::single(
                SchemaError::new(path.clone(), message)
                    .with_code(codes::INVALID_TYPE)
                    .with_got(value_type_name(value))
                    .with_expected("object"),
            ));
        };

        let mut collector = ErrorCollector::new(path);

        for (name, schema) in &self.shape {
            let field_path = path.push_field(name);
            match obj.get(name) {
                Some(field_value) => {
                    let outcome = schema.validate(field_value, &field_path);
                    collector.record(field_path, outcome);
                }
                None if !schema.is_optional() => collector.push(
                    SchemaError::new(field_path, self.messages.missing_property(name))
                        .with_code(codes::MISSING_PROPERTY)
                        .with_expected(schema.type_name()),
                ),
                None => {}
            }
        }

        for (key, extra_value) in obj {
            if self.shape.contains_key(key) {
                continue;
            }
            let field_path = path.push_field(key);
            match &self.unmatched {
                UnmatchedProperties::Accept => {}
                UnmatchedProperties::Reject => collector.push(
                    SchemaError::new(field_path, self.messages.extra_property(key))
                        .with_code(codes::EXTRA_PROPERTY)
                        .with_got(value_type_name(extra_value)),
                ),
                UnmatchedProperties::Validate(schema) => {
                    let outcome = schema.validate(extra_value, &field_path);
                    collector.record(field_path, outcome);
                }
            }
        }

        collector.finish(value, codes::INVALID_PROPERTIES, |count| {
            self.messages.invalid_properties(count)
        })
    }

    /// Keeps only `keys`. Fails if any of them is not declared.
    ///
    /// ```rust
    /// use strata::{DefinitionError, Schema};
    ///
    /// let user = Schema::object()
    ///     .field("id", Schema::integer())
    ///     .field("name", Schema::string());
    ///
    /// assert_eq!(user.pick(&["id"]).unwrap().len(), 1);
    /// assert!(matches!(
    ///     user.pick(&["email"]),
    ///     Err(DefinitionError::UnknownKey { .. })
    /// ));
    /// ```
    pub fn pick<K: AsRef<str>>(&self, keys: &[K]) -> Result<Self, DefinitionError> {
        let selected = self.select(keys)?;
        Ok(self.with_shape(
            self.shape
                .iter()
                .filter(|(name, _)| selected.contains(name.as_str()))
                .map(|(name, schema)| (name.clone(), schema.clone()))
                .collect(),
        ))
    }

    /// Drops `keys`. Names that are not declared are ignored.
    pub fn omit<K: AsRef<str>>(&self, keys: &[K]) -> Self {
        let dropped: HashSet<&str> = keys.iter().map(AsRef::as_ref).collect();
        self.with_shape(
            self.shape
                .iter()
                .filter(|(name, _)| !dropped.contains(name.as_str()))
                .map(|(name, schema)| (name.clone(), schema.clone()))
                .collect(),
        )
    }

    /// Adds `props`, replacing declared properties of the same name. The
    /// unmatched-property policy is kept.
    pub fn extend<I, K, S>(&self, props: I) -> Self
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<Schema>,
    {
        self.extend_with(props, self.unmatched.clone())
    }

    /// Adds `props` as [`extend`](Self::extend) does and installs `policy`.
    pub fn extend_with<I, K, S>(&self, props: I, policy: impl Into<UnmatchedProperties>) -> Self
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<Schema>,
    {
        let mut shape = self.shape.clone();
        for (name, schema) in props {
            shape.insert(name.into(), schema.into());
        }
        let mut derived = self.with_shape(shape);
        derived.unmatched = policy.into();
        derived
    }

    /// Extends with `other`'s properties and adopts its unmatched policy.
    ///
    /// ```rust
    /// use strata::{Schema, SchemaLike};
    /// use serde_json::json;
    ///
    /// let base = Schema::object().field("id", Schema::integer()).strict();
    /// let meta = Schema::object().catch_all(Schema::number());
    /// let merged = base.merge(&meta);
    ///
    /// assert!(merged.safe_parse(&json!({"id": 1, "extra": 5})).is_success());
    /// assert!(merged.safe_parse(&json!({"id": 1, "extra": "s"})).is_failure());
    /// ```
    pub fn merge(&self, other: &ObjectSchema) -> Self {
        self.extend_with(other.shape.clone(), other.unmatched.clone())
    }

    /// Makes every property optional.
    pub fn partial(&self) -> Self {
        self.with_shape(
            self.shape
                .iter()
                .map(|(name, schema)| (name.clone(), schema.optional()))
                .collect(),
        )
    }

    /// Makes the named properties optional.
    pub fn partial_keys<K: AsRef<str>>(&self, keys: &[K]) -> Result<Self, DefinitionError> {
        let selected = self.select(keys)?;
        self.try_map_fields(Some(&selected), |schema| Ok(schema.optional()))
    }

    /// Makes every property required.
    pub fn required(&self) -> Self {
        self.with_shape(
            self.shape
                .iter()
                .map(|(name, schema)| (name.clone(), schema.required()))
                .collect(),
        )
    }

    /// Makes the named properties required.
    pub fn required_keys<K: AsRef<str>>(&self, keys: &[K]) -> Result<Self, DefinitionError> {
        let selected = self.select(keys)?;
        self.try_map_fields(Some(&selected), |schema| Ok(schema.required()))
    }

    /// Makes every property optional, recursing into nested objects and
    /// arrays.
    ///
    /// Fails only if a nested array cannot be re-stratified once its elements
    /// are optional, which is the case for any tuple with a tail:
    ///
    /// ```rust
    /// use strata::{ArrayItem, DefinitionError, Schema};
    ///
    /// let schema = Schema::object().field(
    ///     "row",
    ///     Schema::tuple([
    ///         ArrayItem::rest(Schema::integer()),
    ///         ArrayItem::single(Schema::string()),
    ///     ])
    ///     .unwrap(),
    /// );
    ///
    /// assert_eq!(
    ///     schema.deep_partial().unwrap_err(),
    ///     DefinitionError::OptionalElementCantFollowRest { index: 1 }
    /// );
    /// ```
    pub fn deep_partial(&self) -> Result<Self, DefinitionError> {
        self.try_map_fields(None, Schema::deep_partial)
    }

    /// [`deep_partial`](Self::deep_partial) restricted to the named
    /// properties.
    pub fn deep_partial_keys<K: AsRef<str>>(&self, keys: &[K]) -> Result<Self, DefinitionError> {
        let selected = self.select(keys)?;
        self.try_map_fields(Some(&selected), Schema::deep_partial)
    }

    /// Makes every property required, recursing into nested objects and
    /// arrays.
    pub fn deep_required(&self) -> Result<Self, DefinitionError> {
        self.try_map_fields(None, Schema::deep_required)
    }

    /// Validates undeclared properties against `schema`.
    pub fn catch_all(&self, schema: impl Into<Schema>) -> Self {
        let mut derived = self.clone();
        derived.unmatched = UnmatchedProperties::Validate(schema.into());
        derived
    }

    /// Accepts undeclared properties as they are.
    pub fn pass_through(&self) -> Self {
        let mut derived = self.clone();
        derived.unmatched = UnmatchedProperties::Accept;
        derived
    }

    /// Rejects undeclared properties.
    pub fn strict(&self) -> Self {
        let mut derived = self.clone();
        derived.unmatched = UnmatchedProperties::Reject;
        derived
    }

    fn with_shape(&self, shape: IndexMap<String, Schema>) -> Self {
        Self {
            shape,
            unmatched: self.unmatched.clone(),
            messages: Arc::clone(&self.messages),
            type_error_message: self.type_error_message.clone(),
        }
    }

    fn select<'k, K: AsRef<str>>(
        &self,
        keys: &'k [K],
    ) -> Result<HashSet<&'k str>, DefinitionError> {
        keys.iter()
            .map(|key| {
                let key = key.as_ref();
                if self.shape.contains_key(key) {
                    Ok(key)
                } else {
                    Err(DefinitionError::UnknownKey {
                        key: key.to_string(),
                    })
                }
            })
            .collect()
    }

    fn try_map_fields<F>(
        &self,
        selected: Option<&HashSet<&str>>,
        mut transform: F,
    ) -> Result<Self, DefinitionError>
    where
        F: FnMut(&Schema) -> Result<Schema, DefinitionError>,
    {
        let mut shape = IndexMap::with_capacity(self.shape.len());
        for (name, schema) in &self.shape {
            let schema = match selected {
                Some(keys) if !keys.contains(name.as_str()) => schema.clone(),
                _ => transform(schema)?,
            };
            shape.insert(name.clone(), schema);
        }
        Ok(self.with_shape(shape))
    }
}

impl Default for ObjectSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for ObjectSchema {
    fn type_name(&self) -> String {
        let mut parts: Vec<String> = self
            .shape
            .iter()
            .map(|(name, schema)| format!("{}: {}", name, schema.type_name()))
            .collect();
        match &self.unmatched {
            UnmatchedProperties::Reject => {}
            UnmatchedProperties::Accept => parts.push("..".to_string()),
            UnmatchedProperties::Validate(schema) => {
                parts.push(format!("..: {}", schema.type_name()))
            }
        }
        if parts.is_empty() {
            "{}".to_string()
        } else {
            format!("{{ {} }}", parts.join(", "))
        }
    }

    fn validate<'v>(
        &self,
        value: &'v Value,
        path: &JsonPath,
    ) -> Validation<&'v Value, SchemaErrors> {
        self.validate(value, path)
    }

    fn to_deep_partial(&self) -> Result<Option<Schema>, DefinitionError> {
        Ok(Some(Schema::new(self.deep_partial()?)))
    }

    fn to_deep_required(&self) -> Result<Option<Schema>, DefinitionError> {
        Ok(Some(Schema::new(self.deep_required()?)))
    }

    fn as_object(&self) -> Option<&ObjectSchema> {
        Some(self)
    }
}
