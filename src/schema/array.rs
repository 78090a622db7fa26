//! Array schema validation.
//!
//! An [`ArraySchema`] is declared as a flat list of [`ArrayItem`]s and
//! stratified into head, rest and tail buckets when it is built. Validation
//! then walks those buckets once, checking every element and aggregating all
//! failures.

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::Value;
use stillwater::Validation;

use crate::aggregate::ErrorCollector;
use crate::config::ErrorMessages;
use crate::error::{codes, DefinitionError, SchemaError, SchemaErrors};
use crate::path::JsonPath;

use super::stratify::StratifiedSchema;
use super::traits::SchemaLike;
use super::{value_type_name, Schema};

/// One entry of an array declaration.
#[derive(Clone, Debug)]
pub enum ArrayItem {
    /// Exactly one element. Optional schemas may be absent at the end of the
    /// head.
    Single(Schema),
    /// Zero or more elements matching the schema.
    Rest(Schema),
    /// Another array's declaration, inlined.
    Spread(ArraySchema),
}

impl ArrayItem {
    /// A positional element.
    pub fn single(schema: impl Into<Schema>) -> Self {
        ArrayItem::Single(schema.into())
    }

    /// A variadic segment.
    pub fn rest(schema: impl Into<Schema>) -> Self {
        ArrayItem::Rest(schema.into())
    }

    /// Inlines `array`'s declaration.
    pub fn spread(array: ArraySchema) -> Self {
        ArrayItem::Spread(array)
    }

    fn map<F>(&self, single: F) -> Result<ArrayItem, DefinitionError>
    where
        F: FnOnce(&Schema) -> Result<Schema, DefinitionError>,
    {
        Ok(match self {
            ArrayItem::Single(schema) => ArrayItem::Single(single(schema)?),
            other => other.clone(),
        })
    }
}

impl From<Schema> for ArrayItem {
    fn from(schema: Schema) -> Self {
        ArrayItem::Single(schema)
    }
}

impl<S: SchemaLike + 'static> From<S> for ArrayItem {
    fn from(schema: S) -> Self {
        ArrayItem::Single(Schema::new(schema))
    }
}

/// A schema for JSON arrays: homogeneous lists, fixed tuples and anything in
/// between.
///
/// # Example
///
/// ```rust
/// use strata::{ArrayItem, JsonPath, Schema};
/// use serde_json::json;
///
/// // [string, ...integer, boolean]
/// let schema = Schema::tuple([
///     ArrayItem::single(Schema::string()),
///     ArrayItem::rest(Schema::integer()),
///     ArrayItem::single(Schema::boolean()),
/// ])
/// .unwrap();
///
/// assert!(schema.validate(&json!(["a", 1, 2, true]), &JsonPath::root()).is_success());
///
/// // Too short: one missing-element cause per missing slot.
/// let errors = schema.validate(&json!([]), &JsonPath::root()).into_result().unwrap_err();
/// assert_eq!(errors.first().causes.len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct ArraySchema {
    items: Vec<ArrayItem>,
    strata: StratifiedSchema,
    messages: Arc<ErrorMessages>,
    type_error_message: Option<String>,
}

impl ArraySchema {
    /// An array whose elements all match `item`.
    pub fn of(item: impl Into<Schema>) -> Self {
        let item: Schema = item.into();
        Self {
            items: vec![ArrayItem::Rest(item.clone())],
            strata: StratifiedSchema::rest_only(item),
            messages: ErrorMessages::shared(),
            type_error_message: None,
        }
    }

    /// An array built from a tuple-with-rest declaration.
    ///
    /// Fails if the declaration breaks a stratification rule.
    pub fn tuple<I>(items: I) -> Result<Self, DefinitionError>
    where
        I: IntoIterator,
        I::Item: Into<ArrayItem>,
    {
        Self::from_items(
            items.into_iter().map(Into::into).collect(),
            ErrorMessages::shared(),
            None,
        )
    }

    /// Overrides the message used when the value is not an array.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }

    /// Uses `messages` for every error this schema synthesizes.
    pub fn with_messages(mut self, messages: Arc<ErrorMessages>) -> Self {
        self.messages = messages;
        self
    }

    /// The flat declaration, as given.
    pub fn declaration(&self) -> &[ArrayItem] {
        &self.items
    }

    /// The stratified buckets.
    pub fn stratified(&self) -> &StratifiedSchema {
        &self.strata
    }

    /// This declaration as a spread marker for use in another declaration.
    pub fn spread(&self) -> ArrayItem {
        ArrayItem::Spread(self.clone())
    }

    /// Validates `value`, returning it unchanged on success.
    pub fn validate<'v>(
        &self,
        value: &'v Value,
        path: &JsonPath,
    ) -> Validation<&'v Value, SchemaErrors> {
        let Some(elements) = value.as_array() else {
            let message = self
                .type_error_message
                .clone()
                .unwrap_or_else(|| self.messages.expected_array.clone());
            return Validation::Failure(SchemaErrors::single(
                SchemaError::new(path.clone(), message)
                    .with_code(codes::INVALID_TYPE)
                    .with_got(value_type_name(value))
                    .with_expected("array"),
            ));
        };

        let head = self.strata.head();
        let tail = self.strata.tail();
        let len = elements.len();
        let required_len = head.len() + tail.len();
        let short = !tail.is_empty() && len < required_len;

        let mut collector = ErrorCollector::new(path);

        for (index, schema) in head.iter().enumerate() {
            let item_path = path.push_index(index);
            match elements.get(index) {
                Some(element) => {
                    let outcome = schema.validate(element, &item_path);
                    collector.record(item_path, outcome);
                }
                None if short => break,
                None if !schema.is_optional() => {
                    collector.push(self.missing_element(item_path, index, schema))
                }
                None => {}
            }
        }

        if short {
            for index in len..required_len {
                let schema = if index < head.len() {
                    &head[index]
                } else {
                    &tail[index - head.len()]
                };
                collector.push(self.missing_element(path.push_index(index), index, schema));
            }
            return self.finish(collector, value);
        }

        let tail_start = len - tail.len();

        match self.strata.rest() {
            Some(rest) => {
                for index in head.len()..tail_start {
                    let item_path = path.push_index(index);
                    let outcome = rest.validate(&elements[index], &item_path);
                    collector.record(item_path, outcome);
                }
            }
            None if tail.is_empty() => {
                for (index, element) in elements.iter().enumerate().skip(head.len()) {
                    collector.push(
                        SchemaError::new(path.push_index(index), self.messages.extra_item(index))
                            .with_code(codes::EXTRA_ITEM)
                            .with_got(value_type_name(element)),
                    );
                }
            }
            None => {}
        }

        for (offset, schema) in tail.iter().enumerate() {
            let index = tail_start + offset;
            let item_path = path.push_index(index);
            let outcome = schema.validate(&elements[index], &item_path);
            collector.record(item_path, outcome);
        }

        self.finish(collector, value)
    }

    /// Keeps the declaration items at `indices`, in declaration order.
    ///
    /// Fails if an index is past the declaration or the result cannot be
    /// stratified.
    pub fn pick(&self, indices: &[usize]) -> Result<Self, DefinitionError> {
        let len = self.items.len();
        if let Some(&index) = indices.iter().find(|&&index| index >= len) {
            return Err(DefinitionError::IndexOutOfRange { index, len });
        }
        let kept: HashSet<usize> = indices.iter().copied().collect();
        self.derive(
            self.items
                .iter()
                .enumerate()
                .filter(|(index, _)| kept.contains(index))
                .map(|(_, item)| item.clone())
                .collect(),
        )
    }

    /// Drops the declaration items at `indices`. Positions past the
    /// declaration are ignored.
    ///
    /// ```rust
    /// use strata::{ArrayItem, DefinitionError, Schema, SchemaExt};
    ///
    /// // [string?, ...integer, boolean]
    /// let schema = Schema::tuple([
    ///     ArrayItem::single(Schema::string().optional()),
    ///     ArrayItem::rest(Schema::integer()),
    ///     ArrayItem::single(Schema::boolean()),
    /// ])
    /// .unwrap();
    ///
    /// // Without the rest, the boolean lands after an optional head item.
    /// assert_eq!(
    ///     schema.omit(&[1]).unwrap_err(),
    ///     DefinitionError::ElementMustBeOptional { index: 1 }
    /// );
    /// ```
    pub fn omit(&self, indices: &[usize]) -> Result<Self, DefinitionError> {
        let dropped: HashSet<usize> = indices.iter().copied().collect();
        self.derive(
            self.items
                .iter()
                .enumerate()
                .filter(|(index, _)| !dropped.contains(index))
                .map(|(_, item)| item.clone())
                .collect(),
        )
    }

    /// Appends `items` to the declaration.
    pub fn extend<I>(&self, items: I) -> Result<Self, DefinitionError>
    where
        I: IntoIterator,
        I::Item: Into<ArrayItem>,
    {
        let mut declaration = self.items.clone();
        declaration.extend(items.into_iter().map(Into::<ArrayItem>::into));
        self.derive(declaration)
    }

    /// Concatenates `other`'s declaration onto this one.
    ///
    /// Fails when the combined declaration cannot be stratified, for example
    /// when both sides carry a rest segment.
    pub fn merge(&self, other: &ArraySchema) -> Result<Self, DefinitionError> {
        self.extend(other.items.iter().cloned())
    }

    /// Makes every positional item optional. Spreads are made partial in
    /// turn; rest segments are unchanged.
    ///
    /// Fails when the declaration has a tail, since optional items cannot
    /// follow a rest segment.
    pub fn partial(&self) -> Result<Self, DefinitionError> {
        self.try_map_items(|item| match item {
            ArrayItem::Spread(sub) => Ok(ArrayItem::Spread(sub.partial()?)),
            other => other.map(|schema| Ok(schema.optional())),
        })
    }

    /// Like [`partial`](Self::partial), recursing into nested objects and
    /// arrays.
    pub fn deep_partial(&self) -> Result<Self, DefinitionError> {
        self.try_map_items(|item| match item {
            ArrayItem::Single(schema) => Ok(ArrayItem::Single(schema.deep_partial()?)),
            ArrayItem::Rest(schema) => Ok(ArrayItem::Rest(schema.deepen_partial()?)),
            ArrayItem::Spread(sub) => Ok(ArrayItem::Spread(sub.deep_partial()?)),
        })
    }

    /// Makes every positional item required.
    pub fn required(&self) -> Result<Self, DefinitionError> {
        self.try_map_items(|item| match item {
            ArrayItem::Spread(sub) => Ok(ArrayItem::Spread(sub.required()?)),
            other => other.map(|schema| Ok(schema.required())),
        })
    }

    /// Like [`required`](Self::required), recursing into nested objects and
    /// arrays.
    pub fn deep_required(&self) -> Result<Self, DefinitionError> {
        self.try_map_items(|item| match item {
            ArrayItem::Single(schema) => Ok(ArrayItem::Single(schema.deep_required()?)),
            ArrayItem::Rest(schema) => Ok(ArrayItem::Rest(schema.deep_required()?)),
            ArrayItem::Spread(sub) => Ok(ArrayItem::Spread(sub.deep_required()?)),
        })
    }

    fn from_items(
        items: Vec<ArrayItem>,
        messages: Arc<ErrorMessages>,
        type_error_message: Option<String>,
    ) -> Result<Self, DefinitionError> {
        let strata = StratifiedSchema::new(&items)?;
        Ok(Self {
            items,
            strata,
            messages,
            type_error_message,
        })
    }

    fn derive(&self, items: Vec<ArrayItem>) -> Result<Self, DefinitionError> {
        Self::from_items(
            items,
            Arc::clone(&self.messages),
            self.type_error_message.clone(),
        )
    }

    fn try_map_items<F>(&self, transform: F) -> Result<Self, DefinitionError>
    where
        F: FnMut(&ArrayItem) -> Result<ArrayItem, DefinitionError>,
    {
        let items = self
            .items
            .iter()
            .map(transform)
            .collect::<Result<Vec<_>, _>>()?;
        self.derive(items)
    }

    fn missing_element(&self, path: JsonPath, index: usize, schema: &Schema) -> SchemaError {
        SchemaError::new(path, self.messages.missing_element(index))
            .with_code(codes::MISSING_ELEMENT)
            .with_expected(schema.type_name())
    }

    fn finish<'v>(
        &self,
        collector: ErrorCollector,
        value: &'v Value,
    ) -> Validation<&'v Value, SchemaErrors> {
        collector.finish(value, codes::INVALID_ELEMENTS, |count| {
            self.messages.invalid_elements(count)
        })
    }
}

impl SchemaLike for ArraySchema {
    fn type_name(&self) -> String {
        let strata = &self.strata;
        if let ([], Some(rest), []) = (strata.head(), strata.rest(), strata.tail()) {
            return format!("{}[]", rest.type_name());
        }

        let mut parts: Vec<String> = strata.head().iter().map(Schema::type_name).collect();
        if let Some(rest) = strata.rest() {
            parts.push(format!("...{}", rest.type_name()));
        }
        parts.extend(strata.tail().iter().map(Schema::type_name));
        format!("[{}]", parts.join(", "))
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

    fn as_array(&self) -> Option<&ArraySchema> {
        Some(self)
    }
}
