use nom::{IResult, Parser};
use uasn1::decoder::{DecodableFrom, Decoder};

use crate::array::{Element, to_array_form};
use crate::error::{Error, Result};
use crate::node::{Body, Node};
use crate::tag::{Class, MAX_CHILDREN, MAX_DEPTH, has_leading_pad};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    verbose: bool,
    json: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            verbose: false,
            json: true,
        }
    }
}

// Builder style interface
impl DecodeOptions {
    /// Return the `Node` tree instead of the array form.
    pub fn verbose(self, verbose: bool) -> Self {
        DecodeOptions { verbose, ..self }
    }

    /// Render array form tags and values as hex strings.
    pub fn json(self, json: bool) -> Self {
        DecodeOptions { json, ..self }
    }
}

/// Result of [`decode`]: a verbose tree or the array form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    Tree(Node),
    Array(Element),
}

/// Decodes one DER element spanning all of `der`.
///
/// By default the result is the hex array form. A verbose tree is always
/// returned with raw values; its serde form renders them as hex.
pub fn decode(der: &[u8], options: &DecodeOptions) -> Result<Decoded> {
    let node = decode_verbose(der)?;
    if options.verbose {
        return Ok(Decoded::Tree(node));
    }
    Ok(Decoded::Array(to_array_form(&node, options.json)))
}

/// Decodes one DER element into a `Node` tree.
///
/// The element's encoded size must match `der.len()` exactly.
pub fn decode_verbose(der: &[u8]) -> Result<Node> {
    let header = Header::parse(der)?;
    let declared = header.encoded_len()?;
    if declared != der.len() {
        tracing::debug!(declared, actual = der.len(), "DER length mismatch");
        return Err(Error::LengthMismatch {
            declared,
            actual: der.len(),
        });
    }
    parse_node(der, 0)
}

impl DecodableFrom<Vec<u8>> for Node {}

impl Decoder<Vec<u8>, Node> for Vec<u8> {
    type Error = Error;

    fn decode(&self) -> Result<Node> {
        decode_verbose(self)
    }
}

impl DecodableFrom<&[u8]> for Node {}

impl Decoder<&[u8], Node> for &[u8] {
    type Error = Error;

    fn decode(&self) -> Result<Node> {
        decode_verbose(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Header {
    tag: u8,
    length: usize,
    length_size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LengthField<'a> {
    Short(u8),
    Long(&'a [u8]),
    Indefinite,
}

impl Header {
    fn parse(input: &[u8]) -> Result<Header> {
        let (input, tag) = parse_tag(input)?;
        let (_, field) = parse_length(input)?;
        let (length, length_size) = match field {
            LengthField::Short(n) => (n as usize, 0),
            LengthField::Long(bs) => {
                let length = bs.iter().try_fold(0usize, |n, &b| {
                    n.checked_mul(256)
                        .and_then(|n| n.checked_add(b as usize))
                        .ok_or(Error::LengthTooLarge)
                })?;
                (length, bs.len())
            }
            LengthField::Indefinite => return Err(Error::IndefiniteLength),
        };
        Ok(Header {
            tag,
            length,
            length_size,
        })
    }

    fn header_len(&self) -> usize {
        2 + self.length_size
    }

    fn encoded_len(&self) -> Result<usize> {
        self.header_len()
            .checked_add(self.length)
            .ok_or(Error::LengthTooLarge)
    }
}

fn parse_tag(input: &[u8]) -> IResult<&[u8], u8> {
    nom::number::complete::be_u8(input)
}

fn parse_length(input: &[u8]) -> IResult<&[u8], LengthField<'_>> {
    let (input, n) = nom::number::complete::be_u8(input)?;
    if n == 0x80 {
        return Ok((input, LengthField::Indefinite));
    }
    if n & 0x80 == 0x80 {
        // long form
        // The low 7 bits count the big-endian length bytes that follow.
        let (input, bs) = nom::bytes::complete::take(n & 0x7f).parse(input)?;
        return Ok((input, LengthField::Long(bs)));
    }
    // short form: 0-127
    Ok((input, LengthField::Short(n)))
}

/// Parses the element filling `input`.
fn parse_node(input: &[u8], depth: usize) -> Result<Node> {
    if depth >= MAX_DEPTH {
        return Err(Error::ExcessiveDepth { depth: MAX_DEPTH });
    }

    let header = Header::parse(input)?;
    let end = header.encoded_len()?;
    let input = input.get(..end).ok_or(Error::PrematureEnd)?;

    let mut start = header.header_len();
    if has_leading_pad(header.tag) && header.length > 1 && input.get(start) == Some(&0x00) {
        start += 1;
    }
    let content = &input[start..];

    let body = match Class::from(header.tag) {
        Class::Container => Body::Children(parse_children(content, depth)?),
        Class::Value => Body::Value(content.to_vec()),
        Class::Ambiguous => match parse_children(content, depth) {
            Ok(children) => Body::Children(children),
            Err(e) => {
                tracing::trace!(tag = header.tag, depth, error = %e, "treating content as a value");
                Body::Value(content.to_vec())
            }
        },
    };

    Ok(Node::new(header.tag, header.length, header.length_size, body))
}

/// Parses the elements that exactly fill `content`.
fn parse_children(content: &[u8], depth: usize) -> Result<Vec<Node>> {
    let mut children = Vec::new();
    let mut offset = 0;
    while offset < content.len() {
        if children.len() >= MAX_CHILDREN {
            return Err(Error::ExcessiveBreadth {
                limit: MAX_CHILDREN,
            });
        }
        let rest = &content[offset..];
        let size = Header::parse(rest)?.encoded_len()?;
        if size > rest.len() {
            return Err(Error::ChildOverflow {
                child: size,
                remaining: rest.len(),
            });
        }
        children.push(parse_node(&rest[..size], depth + 1)?);
        offset += size;
    }
    Ok(children)
}
