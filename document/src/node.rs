use indexmap::IndexMap;

use crate::Error;

/// One position in a loaded interface description. Mapping entries keep
/// their source order, which downstream emission relies on.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Scalar(String),
    Sequence(Vec<Node>),
    Mapping(IndexMap<String, Node>),
}

impl Node {
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Scalar(_) => "scalar",
            Node::Sequence(_) => "sequence",
            Node::Mapping(_) => "mapping",
        }
    }

    /// Child lookup that fails loudly; use `opt` for optional keys.
    pub fn get(&self, key: &str) -> Result<&Node, Error> {
        match self {
            Node::Mapping(entries) => entries
                .get(key)
                .ok_or_else(|| Error::KeyNotFound(key.to_string())),
            _ => Err(Error::TypeMismatch {
                expected: "mapping",
                found: self.kind(),
            }),
        }
    }

    pub fn opt(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Mapping(entries) => entries.get(key),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Result<&str, Error> {
        match self {
            Node::Scalar(s) => Ok(s),
            _ => Err(Error::TypeMismatch {
                expected: "scalar",
                found: self.kind(),
            }),
        }
    }

    pub fn as_bool(&self) -> Result<bool, Error> {
        match self.as_str()? {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(Error::TypeMismatch {
                expected: "boolean",
                found: "scalar",
            }),
        }
    }

    pub fn as_i64(&self) -> Result<i64, Error> {
        self.as_str()?.parse().map_err(|_| Error::TypeMismatch {
            expected: "integer",
            found: "scalar",
        })
    }

    pub fn as_f64(&self) -> Result<f64, Error> {
        self.as_str()?.parse().map_err(|_| Error::TypeMismatch {
            expected: "number",
            found: "scalar",
        })
    }

    pub fn items(&self) -> Result<&[Node], Error> {
        match self {
            Node::Sequence(items) => Ok(items),
            _ => Err(Error::TypeMismatch {
                expected: "sequence",
                found: self.kind(),
            }),
        }
    }

    pub fn entries(&self) -> Result<impl Iterator<Item = (&str, &Node)>, Error> {
        match self {
            Node::Mapping(entries) => Ok(entries.iter().map(|(k, v)| (k.as_str(), v))),
            _ => Err(Error::TypeMismatch {
                expected: "mapping",
                found: self.kind(),
            }),
        }
    }
}
