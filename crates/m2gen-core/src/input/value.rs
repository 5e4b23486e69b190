use serde_json::Value as Json;

use crate::xml::{is_element_name, Element};

/// A decoded input value. Objects keep the key order of the source JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Scalar(String),
    Object(Vec<(String, Value)>),
    List(Vec<Value>),
    Null,
}

impl Value {
    /// A value counts as present unless it is `null` or the empty string.
    pub fn is_present(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Scalar(text) => !text.is_empty(),
            Value::Object(_) | Value::List(_) => true,
        }
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Value::Scalar(text) => Some(text),
            _ => None,
        }
    }

    /// Field lookup on an object; `None` for missing keys and non-objects.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// The field if it exists and is present.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.get(key).filter(|v| v.is_present())
    }

    /// Text form of a scalar-like value; objects and lists have none.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Value::Scalar(text) => Some(text.clone()),
            Value::Null => Some(String::new()),
            Value::Object(_) | Value::List(_) => None,
        }
    }

    /// Object keys, at any depth, that cannot be written as element names.
    pub fn invalid_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.collect_invalid_names(&mut names);
        names
    }

    fn collect_invalid_names(&self, names: &mut Vec<String>) {
        match self {
            Value::Scalar(_) | Value::Null => {}
            Value::Object(entries) => {
                for (key, value) in entries {
                    if !is_element_name(key) {
                        names.push(key.clone());
                    }
                    value.collect_invalid_names(names);
                }
            }
            Value::List(items) => {
                for item in items {
                    item.collect_invalid_names(names);
                }
            }
        }
    }

    /// Write this value as the content of `parent`: a scalar becomes text,
    /// an object becomes one child element per key (recursively) and a list
    /// is written item by item into the same parent.
    pub fn write_into(&self, parent: &mut Element) {
        match self {
            Value::Scalar(text) => parent.set_text(text.clone()),
            Value::Null => {}
            Value::Object(entries) => {
                for (key, value) in entries {
                    append_field(parent, key, value);
                }
            }
            Value::List(items) => {
                for item in items {
                    item.write_into(parent);
                }
            }
        }
    }
}

/// Append `<key>` for `value` under `parent`. A list yields one `<key>`
/// element per item.
pub fn append_field(parent: &mut Element, key: &str, value: &Value) {
    for child in field_elements(key, value) {
        parent.append(child);
    }
}

/// The `<key>` elements for `value`: one per list item, one otherwise.
pub fn field_elements(key: &str, value: &Value) -> Vec<Element> {
    if let Value::List(items) = value {
        return items
            .iter()
            .flat_map(|item| field_elements(key, item))
            .collect();
    }
    let mut child = Element::new(key);
    value.write_into(&mut child);
    vec![child]
}

impl From<&Json> for Value {
    fn from(json: &Json) -> Self {
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Scalar(b.to_string()),
            Json::Number(n) => Value::Scalar(n.to_string()),
            Json::String(s) => Value::Scalar(s.clone()),
            Json::Array(items) => Value::List(items.iter().map(Value::from).collect()),
            Json::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Value::from(v)))
                    .collect(),
            ),
        }
    }
}
