//! Spring HATEOAS (HAL) response shapes.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// A single `_links` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
}

/// A list response that is either a bare JSON array or a HAL
/// `CollectionModel` (`{"_embedded": {"todoList": [...]}, "_links": ...}`).
/// An empty HAL collection omits `_embedded` entirely.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged, bound(deserialize = "T: Deserialize<'de>"))]
pub enum HalCollection<T> {
    Plain(Vec<T>),
    Embedded {
        #[serde(rename = "_embedded", default)]
        embedded: BTreeMap<String, Vec<T>>,
    },
}

impl<T> HalCollection<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            HalCollection::Plain(items) => items,
            HalCollection::Embedded { embedded } => embedded.into_values().flatten().collect(),
        }
    }
}

/// Accept an id that the server may send as a JSON number or string
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Int(number) => number.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Todo;

    #[test]
    fn test_plain_array() {
        let json = r#"[{"id": "t1", "title": "A", "userId": "u1", "completed": true}]"#;
        let todos = serde_json::from_str::<HalCollection<Todo>>(json).unwrap().into_items();
        assert_eq!(todos.len(), 1);
        assert!(todos[0].completed);
    }

    #[test]
    fn test_embedded_list() {
        let json = r#"{
            "_embedded": {"todoList": [
                {"id": "t1", "title": "A", "userId": "u1", "completed": false},
                {"id": "t2", "title": "B", "userId": "u1", "completed": true}
            ]},
            "_links": {"self": {"href": "http://localhost:8080/api/todos?userId=u1"}}
        }"#;
        let todos = serde_json::from_str::<HalCollection<Todo>>(json).unwrap().into_items();
        assert_eq!(todos.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(), vec!["t1", "t2"]);
    }

    #[test]
    fn test_empty_collection_without_embedded() {
        let json = r#"{"_links": {"self": {"href": "http://localhost:8080/api/todos?userId=u1"}}}"#;
        let todos = serde_json::from_str::<HalCollection<Todo>>(json).unwrap().into_items();
        assert!(todos.is_empty());
    }
}
