//! Generic resource record returned by cloud listings.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One object as described by a cloud service listing.
///
/// The purge pipeline treats resource payloads as opaque: it only ever reads
/// the ownership key and the identifiers needed for display and delete
/// calls. Everything else is carried along untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Resource(Map<String, Value>);

impl Resource {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Wrap a JSON value, returning `None` if it is not an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Read a string-valued field.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn id(&self) -> Option<&str> {
        self.str_field("id")
    }

    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    /// The project that owns this resource, if the service reports one.
    ///
    /// Services disagree on the key: newer APIs use `project_id`, older
    /// ones `tenant_id`.
    pub fn owner_project(&self) -> Option<&str> {
        self.str_field("project_id").or_else(|| self.str_field("tenant_id"))
    }

    /// Set a string field, e.g. to tag an object with its container.
    pub fn set_field(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_string(), Value::String(value.to_string()));
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.id(), self.name()) {
            (Some(id), Some(name)) => write!(f, "id='{}', name='{}'", id, name),
            (Some(id), None) => write!(f, "id='{}'", id),
            (None, Some(name)) => write!(f, "name='{}'", name),
            (None, None) => write!(f, "{}", Value::Object(self.0.clone())),
        }
    }
}
