use crate::error::{Result, RuntimeError};
use indexmap::IndexMap;

/// Insertion-ordered key/value container
pub type Container = IndexMap<String, Value>;

/// A run-time value.
///
/// `Scalar` only ever holds a boolean, number or string; JSON arrays and
/// objects become `List` and `Map`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Scalar(serde_json::Value),
    Map(Container),
    List(Vec<Value>),
    Model(Model),
}

/// An instance of a model type: its exact type name and its fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub type_name: String,
    pub fields: IndexMap<String, Value>,
}

impl Model {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: IndexMap::new(),
        }
    }

    pub fn with_field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    /// Field value; unset fields read as null
    pub fn get(&self, name: &str) -> &Value {
        self.fields.get(name).unwrap_or(&Value::Null)
    }

    pub fn set(&mut self, name: &str, value: Value) {
        self.fields.insert(name.to_string(), value);
    }
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Value::Scalar(serde_json::Value::String(s.into()))
    }

    pub fn bool(b: bool) -> Self {
        Value::Scalar(serde_json::Value::Bool(b))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Scalar(serde_json::Value::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Scalar(serde_json::Value::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Container> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_model(&self) -> Option<&Model> {
        match self {
            Value::Model(model) => Some(model),
            _ => None,
        }
    }

    /// Short description used in error messages
    pub fn kind(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Scalar(serde_json::Value::Bool(_)) => "boolean".to_string(),
            Value::Scalar(serde_json::Value::Number(_)) => "number".to_string(),
            Value::Scalar(serde_json::Value::String(_)) => "string".to_string(),
            Value::Scalar(_) => "scalar".to_string(),
            Value::Map(_) => "map".to_string(),
            Value::List(_) => "list".to_string(),
            Value::Model(model) => format!("model `{}`", model.type_name),
        }
    }

    /// Convert from a JSON document
    pub fn from_json(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from_json(v)))
                    .collect(),
            ),
            scalar => Value::Scalar(scalar),
        }
    }

    /// Convert to a JSON document; fails on model instances
    pub fn into_json(self) -> Result<serde_json::Value> {
        Ok(match self {
            Value::Null => serde_json::Value::Null,
            Value::Scalar(scalar) => scalar,
            Value::Map(entries) => serde_json::Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| -> Result<(String, serde_json::Value)> { Ok((k, v.into_json()?)) })
                    .collect::<Result<serde_json::Map<_, _>>>()?,
            ),
            Value::List(items) => serde_json::Value::Array(
                items
                    .into_iter()
                    .map(Value::into_json)
                    .collect::<Result<Vec<_>>>()?,
            ),
            Value::Model(model) => return Err(RuntimeError::NotSerializable(model.type_name)),
        })
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        Value::from_json(json)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Scalar(n.into())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::bool(b)
    }
}

impl From<Model> for Value {
    fn from(model: Model) -> Self {
        Value::Model(model)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_keeps_key_order() {
        let value = Value::from_json(json!({"z": 1, "a": [true, null], "m": {"k": "v"}}));
        let map = value.as_map().unwrap();
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
        assert_eq!(map["a"], Value::List(vec![Value::bool(true), Value::Null]));
        assert_eq!(map["m"].as_map().unwrap()["k"].as_str(), Some("v"));
    }

    #[test]
    fn test_into_json_round_trip() {
        let doc = json!({"first_name": "Bob", "_embedded": {"age": 42}, "tags": ["a"]});
        let back = Value::from_json(doc.clone()).into_json().unwrap();
        assert_eq!(back, doc);
        assert_eq!(
            serde_json::to_string(&back).unwrap(),
            r#"{"first_name":"Bob","_embedded":{"age":42},"tags":["a"]}"#
        );
    }

    #[test]
    fn test_model_is_not_serializable() {
        let value = Value::List(vec![Model::new("com.foo.User").into()]);
        assert_eq!(
            value.into_json(),
            Err(RuntimeError::NotSerializable("com.foo.User".to_string()))
        );
    }

    #[test]
    fn test_unset_field_reads_null() {
        let user = Model::new("com.foo.User").with_field("fname", "Bob");
        assert_eq!(user.get("fname").as_str(), Some("Bob"));
        assert!(user.get("lname").is_null());
    }
}
