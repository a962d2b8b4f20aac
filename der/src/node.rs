use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::hex::{bytes_to_hex, hex_to_bytes, num_to_hex};

/// One decoded TLV element.
///
/// `length` and `length_size` are taken from the header as read, so
/// `encoded_len` is the number of input bytes the element occupied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "NodeRepr", try_from = "NodeRepr")]
pub struct Node {
    tag: u8,
    length: usize,
    length_size: usize,
    body: Body,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Value(Vec<u8>),
    Children(Vec<Node>),
}

impl Node {
    pub(crate) fn new(tag: u8, length: usize, length_size: usize, body: Body) -> Self {
        Node {
            tag,
            length,
            length_size,
            body,
        }
    }

    pub fn tag(&self) -> u8 {
        self.tag
    }

    /// Content length declared in the header.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Bytes following the first length byte; 0 for short form.
    pub fn length_size(&self) -> usize {
        self.length_size
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn value(&self) -> Option<&[u8]> {
        match &self.body {
            Body::Value(value) => Some(value),
            Body::Children(_) => None,
        }
    }

    pub fn children(&self) -> Option<&[Node]> {
        match &self.body {
            Body::Value(_) => None,
            Body::Children(children) => Some(children),
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self.body, Body::Children(_))
    }

    /// Total size of the element: tag, length field and content.
    pub fn encoded_len(&self) -> usize {
        2 + self.length_size + self.length
    }
}

/// JSON-safe verbose form: tag and value as lowercase hex.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeRepr {
    #[serde(rename = "type")]
    tag: String,
    length: usize,
    length_size: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    children: Option<Vec<Node>>,
}

impl From<Node> for NodeRepr {
    fn from(node: Node) -> Self {
        let (value, children) = match node.body {
            Body::Value(value) => (Some(bytes_to_hex(&value)), None),
            Body::Children(children) => (None, Some(children)),
        };
        NodeRepr {
            tag: num_to_hex(node.tag as usize),
            length: node.length,
            length_size: node.length_size,
            value,
            children,
        }
    }
}

impl TryFrom<NodeRepr> for Node {
    type Error = Error;

    fn try_from(repr: NodeRepr) -> Result<Self, Self::Error> {
        let tag = match hex_to_bytes(&repr.tag)?.as_slice() {
            [tag] => *tag,
            _ => {
                return Err(Error::UnexpectedShape(format!(
                    "type {:?} is not a single byte",
                    repr.tag
                )));
            }
        };
        let body = match (repr.value, repr.children) {
            (Some(value), None) => Body::Value(hex_to_bytes(&value)?),
            (None, Some(children)) => Body::Children(children),
            _ => {
                return Err(Error::UnexpectedShape(
                    "node needs exactly one of value or children".to_string(),
                ));
            }
        };
        Ok(Node::new(tag, repr.length, repr.length_size, body))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn sample() -> Node {
        Node::new(
            0x30,
            6,
            0,
            Body::Children(vec![
                Node::new(0x02, 1, 0, Body::Value(vec![0x07])),
                Node::new(0x05, 0, 0, Body::Value(vec![])),
                Node::new(0x30, 0, 0, Body::Children(vec![])),
            ]),
        )
    }

    #[test]
    fn test_node_accessors() {
        let node = sample();
        assert_eq!(0x30, node.tag());
        assert_eq!(8, node.encoded_len());
        assert!(node.is_container());
        assert!(node.value().is_none());

        let children = node.children().unwrap();
        assert_eq!(3, children.len());
        assert_eq!(Some(&[0x07][..]), children[0].value());
        assert_eq!(3, children[0].encoded_len());
    }

    #[test]
    fn test_node_serialize() {
        let json = serde_json::to_value(sample()).unwrap();
        let expected = serde_json::json!({
            "type": "30",
            "length": 6,
            "lengthSize": 0,
            "children": [
                { "type": "02", "length": 1, "lengthSize": 0, "value": "07" },
                { "type": "05", "length": 0, "lengthSize": 0, "value": "" },
                { "type": "30", "length": 0, "lengthSize": 0, "children": [] },
            ]
        });
        assert_eq!(expected, json);
    }

    #[test]
    fn test_node_json_roundtrip() {
        let node = sample();
        let json = serde_json::to_string(&node).unwrap();
        let parsed: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(node, parsed);
    }

    #[rstest(input,
        case(r#"{"type":"3","length":0,"lengthSize":0,"value":""}"#),
        case(r#"{"type":"0102","length":0,"lengthSize":0,"value":""}"#),
        case(r#"{"type":"04","length":0,"lengthSize":0}"#),
        case(r#"{"type":"04","length":0,"lengthSize":0,"value":"","children":[]}"#),
        case(r#"{"type":"04","length":1,"lengthSize":0,"value":"zz"}"#),
    )]
    fn test_node_deserialize_invalid(input: &str) {
        assert!(serde_json::from_str::<Node>(input).is_err());
    }
}
