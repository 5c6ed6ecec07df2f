//! Normalized object storage.

use crate::error::{CacheError, CacheResult};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

/// Resources returned by the server, keyed by schema and id.
#[derive(Debug, Clone, Default)]
pub struct ObjectStore {
    schemas: HashMap<String, BTreeMap<String, Value>>,
}

impl ObjectStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `object` under `schema`, replacing any object with the same id.
    ///
    /// `transformation` renames attribute keys (`from -> to`) before storing;
    /// entries whose target is not a string are ignored. Returns the id the
    /// object was stored under.
    pub fn insert(
        &mut self,
        schema: &str,
        object: Value,
        transformation: &Map<String, Value>,
    ) -> CacheResult<String> {
        let id = Self::object_id(schema, &object)?;
        let Value::Object(mut fields) = object else {
            return Err(CacheError::NotAnObject {
                schema: schema.to_string(),
            });
        };

        if !transformation.is_empty() {
            if let Some(Value::Object(attributes)) = fields.get_mut("attributes") {
                rename_keys(attributes, transformation);
            }
        }

        self.schemas
            .entry(schema.to_string())
            .or_default()
            .insert(id.clone(), Value::Object(fields));
        Ok(id)
    }

    /// Returns the id `object` would be stored under, or why it cannot be
    /// stored. String and numeric ids are accepted.
    pub fn object_id(schema: &str, object: &Value) -> CacheResult<String> {
        let Value::Object(fields) = object else {
            return Err(CacheError::NotAnObject {
                schema: schema.to_string(),
            });
        };
        match fields.get("id") {
            Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            _ => Err(CacheError::MissingId {
                schema: schema.to_string(),
            }),
        }
    }

    /// Gets an object by schema and id.
    pub fn get(&self, schema: &str, id: &str) -> Option<&Value> {
        self.schemas.get(schema).and_then(|objects| objects.get(id))
    }

    /// Returns all objects stored under `schema`, ordered by id.
    pub fn objects(&self, schema: &str) -> impl Iterator<Item = (&str, &Value)> {
        self.schemas
            .get(schema)
            .into_iter()
            .flat_map(|objects| objects.iter().map(|(id, v)| (id.as_str(), v)))
    }

    /// Number of objects stored under `schema`.
    pub fn count(&self, schema: &str) -> usize {
        self.schemas.get(schema).map_or(0, BTreeMap::len)
    }

    /// Total number of stored objects.
    pub fn len(&self) -> usize {
        self.schemas.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn rename_keys(attributes: &mut Map<String, Value>, transformation: &Map<String, Value>) {
    for (from, to) in transformation {
        let Value::String(to) = to else { continue };
        if let Some(value) = attributes.remove(from) {
            attributes.insert(to.clone(), value);
        }
    }
}
