#[macro_use]
extern crate derive_more;
extern crate getset;

pub mod node;

use std::path::Path;

use getset::Getters;
use indexmap::IndexMap;
use thiserror::Error;

use crate::node::Node;

#[derive(Debug, Error)]
pub enum Error {
    #[error("key {0} not found")]
    KeyNotFound(String),

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("{0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// An immutable interface description, loaded once per generation run.
#[derive(Constructor, Clone, Getters, Debug, PartialEq)]
#[get = "pub"]
pub struct Document {
    root: Node,
}

impl Document {
    pub fn from_str(input: &str) -> Result<Document, Error> {
        let value: serde_yaml::Value = serde_yaml::from_str(input)?;
        Ok(Document::new(node_from_yaml(value)?))
    }

    pub fn from_file(path: &Path) -> Result<Document, Error> {
        Document::from_str(&std::fs::read_to_string(path)?)
    }
}

fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "boolean",
        serde_yaml::Value::Number(_) => "number",
        serde_yaml::Value::String(_) => "string",
        serde_yaml::Value::Sequence(_) => "sequence",
        serde_yaml::Value::Mapping(_) => "mapping",
        serde_yaml::Value::Tagged(_) => "tagged",
    }
}

fn node_from_yaml(value: serde_yaml::Value) -> Result<Node, Error> {
    match value {
        serde_yaml::Value::Null => Ok(Node::Scalar(String::from("~"))),
        serde_yaml::Value::Bool(b) => Ok(Node::Scalar(b.to_string())),
        serde_yaml::Value::Number(n) => Ok(Node::Scalar(n.to_string())),
        serde_yaml::Value::String(s) => Ok(Node::Scalar(s)),
        serde_yaml::Value::Sequence(items) => Ok(Node::Sequence(
            items
                .into_iter()
                .map(node_from_yaml)
                .collect::<Result<Vec<Node>, Error>>()?,
        )),
        serde_yaml::Value::Mapping(entries) => {
            let mut out = IndexMap::new();
            for (key, value) in entries {
                // response codes arrive as numeric keys
                let key = match key {
                    serde_yaml::Value::String(s) => s,
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => {
                        return Err(Error::TypeMismatch {
                            expected: "scalar key",
                            found: yaml_kind(&other),
                        })
                    }
                };
                out.insert(key, node_from_yaml(value)?);
            }
            Ok(Node::Mapping(out))
        }
        serde_yaml::Value::Tagged(tagged) => node_from_yaml(tagged.value),
    }
}
