//! Caller-supplied resources and the JSON:API `data` envelope.

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A resource handed to the create operation.
///
/// `schema` names the collection the resource belongs to and must not be
/// empty. An item is never mutated after it has been embedded in a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// The resource collection.
    pub schema: String,
    /// Client-assigned identifier, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Resource attributes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Map<String, Value>>,
    /// JSON:API resource type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Item {
    /// Creates an item with no id, attributes or type.
    pub fn new(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            id: None,
            attributes: None,
            kind: None,
        }
    }

    /// Sets the client-assigned id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the JSON:API resource type.
    pub fn with_type(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Adds a single attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Checks the item shape.
    pub fn validate(&self) -> Result<()> {
        if self.schema.is_empty() {
            return Err(Error::InvalidItem("empty schema".into()));
        }
        Ok(())
    }
}

/// The `{ "data": ... }` document envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document<T = Item> {
    pub data: T,
}

impl<T> Document<T> {
    /// Wraps a value in a document envelope.
    pub fn wrap(data: T) -> Self {
        Self { data }
    }
}

impl<T: Serialize> Document<T> {
    /// Serializes the document into a request body.
    pub fn to_body(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl<T: DeserializeOwned> Document<T> {
    /// Parses a request or response body.
    pub fn from_body(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }
}

/// Where a request body comes from.
///
/// Passed as the create argument, an [`BodyInput::Item`] is wrapped into
/// `{ "data": item }` before sending. Set as a config body it is already
/// final and is sent as the item itself. A [`BodyInput::Raw`] body is always
/// sent unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum BodyInput {
    /// A resource to wrap in a document envelope.
    Item(Item),
    /// A pre-serialized document.
    Raw(String),
}

impl From<Item> for BodyInput {
    fn from(item: Item) -> Self {
        Self::Item(item)
    }
}

impl TryFrom<Value> for BodyInput {
    type Error = Error;

    /// Interprets loosely-typed input: an object is an [`Item`], a string is
    /// a pre-serialized body, anything else is rejected.
    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(_) => {
                let item: Item = serde_json::from_value(value)
                    .map_err(|e| Error::InvalidItem(e.to_string()))?;
                item.validate()?;
                Ok(Self::Item(item))
            }
            Value::String(raw) => Ok(Self::Raw(raw)),
            other => Err(Error::InvalidItem(format!("unsupported body input: {other}"))),
        }
    }
}
