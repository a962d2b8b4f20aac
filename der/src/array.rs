//! Compact array form of a TLV tree: `[tag, value]` or `[tag, [children...]]`.
//!
//! This is the interchange shape accepted by the encoder and, by default,
//! produced by the decoder. Tags may be numbers or hex strings and values may
//! be hex strings or raw bytes, so both hand-written and decoded input work.

use serde::{Deserialize, Serialize, Serializer, ser::SerializeTuple};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::hex::{bytes_to_hex, hex_to_bytes, num_to_hex};
use crate::node::{Body, Node};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Value")]
pub struct Element {
    tag: TypeTag,
    payload: Payload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TypeTag {
    Number(u8),
    Hex(String),
}

/// Value or children of an array form element.
///
/// An empty JSON list always reads back as `Children`, so an empty `Bytes`
/// value does not survive a JSON round trip. It encodes to the same bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Hex(String),
    Bytes(Vec<u8>),
    Children(Vec<Element>),
}

impl Element {
    pub fn new(tag: impl Into<TypeTag>, payload: impl Into<Payload>) -> Self {
        Element {
            tag: tag.into(),
            payload: payload.into(),
        }
    }

    pub fn tag(&self) -> &TypeTag {
        &self.tag
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }
}

impl TypeTag {
    /// The identifier octet this tag denotes.
    pub fn byte(&self) -> Result<u8> {
        match self {
            TypeTag::Number(n) => Ok(*n),
            TypeTag::Hex(hex) => match hex_to_bytes(hex.trim())?.as_slice() {
                [tag] => Ok(*tag),
                _ => Err(Error::UnexpectedShape(format!(
                    "tag {hex:?} is not a single byte"
                ))),
            },
        }
    }
}

impl From<u8> for TypeTag {
    fn from(tag: u8) -> Self {
        TypeTag::Number(tag)
    }
}

impl From<&str> for TypeTag {
    fn from(tag: &str) -> Self {
        TypeTag::Hex(tag.to_string())
    }
}

impl From<String> for TypeTag {
    fn from(tag: String) -> Self {
        TypeTag::Hex(tag)
    }
}

impl From<&str> for Payload {
    fn from(hex: &str) -> Self {
        Payload::Hex(hex.to_string())
    }
}

impl From<String> for Payload {
    fn from(hex: String) -> Self {
        Payload::Hex(hex)
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Payload::Bytes(bytes)
    }
}

impl From<&[u8]> for Payload {
    fn from(bytes: &[u8]) -> Self {
        Payload::Bytes(bytes.to_vec())
    }
}

impl From<Vec<Element>> for Payload {
    fn from(children: Vec<Element>) -> Self {
        Payload::Children(children)
    }
}

/// Rewrites a decoded tree into array form.
///
/// With `hex` set, tags and values become lowercase hex strings, which keeps
/// the result JSON-safe. Otherwise they stay numeric tags and raw bytes.
pub fn to_array_form(node: &Node, hex: bool) -> Element {
    let tag = if hex {
        TypeTag::Hex(num_to_hex(node.tag() as usize))
    } else {
        TypeTag::Number(node.tag())
    };
    let payload = match node.body() {
        Body::Value(value) if hex => Payload::Hex(bytes_to_hex(value)),
        Body::Value(value) => Payload::Bytes(value.clone()),
        Body::Children(children) => Payload::Children(
            children
                .iter()
                .map(|child| to_array_form(child, hex))
                .collect(),
        ),
    };
    Element { tag, payload }
}

impl Serialize for Element {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.tag)?;
        tuple.serialize_element(&self.payload)?;
        tuple.end()
    }
}

fn unexpected(msg: impl Into<String>) -> Error {
    Error::UnexpectedShape(msg.into())
}

impl TryFrom<Value> for Element {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        let Value::Array(items) = value else {
            return Err(unexpected("element is not an array"));
        };
        let [tag, payload]: [Value; 2] = items.try_into().map_err(|items: Vec<Value>| {
            unexpected(format!("element has {} items, expected 2", items.len()))
        })?;
        let tag = match tag {
            Value::Number(n) => n
                .as_u64()
                .and_then(|n| u8::try_from(n).ok())
                .map(TypeTag::Number)
                .ok_or_else(|| unexpected(format!("tag {n} is not a byte")))?,
            Value::String(hex) => TypeTag::Hex(hex),
            other => return Err(unexpected(format!("tag {other} is not a number or string"))),
        };
        Ok(Element {
            tag,
            payload: Payload::try_from(payload)?,
        })
    }
}

impl TryFrom<Value> for Payload {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::String(hex) => Ok(Payload::Hex(hex)),
            // An empty list is read as a container without children; both
            // encode to the same bytes.
            Value::Array(items) if items.iter().all(Value::is_array) => items
                .into_iter()
                .map(Element::try_from)
                .collect::<Result<Vec<_>>>()
                .map(Payload::Children),
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_u64()
                        .and_then(|n| u8::try_from(n).ok())
                        .ok_or_else(|| unexpected(format!("{item} is neither a byte nor an element")))
                })
                .collect::<Result<Vec<_>>>()
                .map(Payload::Bytes),
            other => Err(unexpected(format!("payload {other} is not a value or a list of elements"))),
        }
    }
}
