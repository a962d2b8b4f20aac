use uasn1::encoder::{EncodableTo, Encoder};

use crate::array::{Element, Payload, to_array_form};
use crate::error::{Error, Result};
use crate::hex::{bytes_to_hex, hex_to_bytes, num_to_hex};
use crate::node::Node;
use crate::tag::{BIT_STRING, INTEGER};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    json: bool,
}

// Builder style interface
impl EncodeOptions {
    /// Return the encoding as a lowercase hex string instead of bytes.
    pub fn json(self, json: bool) -> Self {
        EncodeOptions { json }
    }
}

/// Anything [`encode`] accepts: a decoded tree or an array form element.
#[derive(Debug, Clone, Copy)]
pub enum Input<'a> {
    Tree(&'a Node),
    Array(&'a Element),
}

impl<'a> From<&'a Node> for Input<'a> {
    fn from(node: &'a Node) -> Self {
        Input::Tree(node)
    }
}

impl<'a> From<&'a Element> for Input<'a> {
    fn from(element: &'a Element) -> Self {
        Input::Array(element)
    }
}

/// Output of [`encode`]: raw DER, or lowercase hex when `json` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Encoded {
    Bytes(Vec<u8>),
    Hex(String),
}

/// Encodes a tree or an array form element as DER.
pub fn encode<'a>(input: impl Into<Input<'a>>, options: &EncodeOptions) -> Result<Encoded> {
    let hex = encode_hex(input.into())?;
    tracing::debug!(len = hex.len() / 2, "encoded DER element");
    if options.json {
        return Ok(Encoded::Hex(hex));
    }
    Ok(Encoded::Bytes(hex_to_bytes(&hex)?))
}

fn encode_hex(input: Input<'_>) -> Result<String> {
    match input {
        Input::Array(element) => pack(element),
        // Hex projection keeps every value a string for `pack`.
        Input::Tree(node) => pack(&to_array_form(node, true)),
    }
}

fn normalize(parts: &[&str]) -> String {
    parts
        .iter()
        .flat_map(|part| part.chars())
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Wraps hex content in a TLV with the given tag.
///
/// The parts are concatenated with whitespace removed. Content up to 127
/// bytes gets a short-form length, anything longer gets `0x80 | k` followed
/// by the length in `k` big-endian bytes.
pub fn encode_generic(tag: u8, parts: &[&str]) -> Result<String> {
    let content = normalize(parts);
    if content.len() % 2 == 1 {
        return Err(Error::InvalidContent);
    }
    if !content.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::MalformedHex);
    }

    let length = content.len() / 2;
    let mut out = num_to_hex(tag as usize);
    if length > 0x7f {
        let length_hex = num_to_hex(length);
        out.push_str(&num_to_hex(0x80 | length_hex.len() / 2));
        out.push_str(&length_hex);
    } else {
        out.push_str(&num_to_hex(length));
    }
    out.push_str(&content);
    Ok(out)
}

/// INTEGER whose content is read as unsigned: a `00` byte is prepended when
/// the high bit of the first byte is set.
pub fn encode_unsigned_integer(hex: &str) -> Result<String> {
    let content = normalize(&[hex]);
    let negative = content
        .get(..2)
        .and_then(|first| u8::from_str_radix(first, 16).ok())
        .is_some_and(|first| first & 0x80 == 0x80);
    if negative {
        return encode_generic(INTEGER, &["00", &content]);
    }
    encode_generic(INTEGER, &[&content])
}

/// BIT STRING with a zero unused-bits byte.
pub fn encode_bit_string(hex: &str) -> Result<String> {
    encode_generic(BIT_STRING, &["00", hex])
}

/// Encodes an array form element as hex, children first.
pub fn pack(element: &Element) -> Result<String> {
    let tag = element.tag().byte()?;
    let content = match element.payload() {
        Payload::Hex(hex) => hex.clone(),
        Payload::Bytes(bytes) => bytes_to_hex(bytes),
        Payload::Children(children) => children.iter().map(pack).collect::<Result<String>>()?,
    };
    match tag {
        BIT_STRING => encode_bit_string(&content),
        INTEGER => encode_unsigned_integer(&content),
        _ => encode_generic(tag, &[&content]),
    }
}

impl EncodableTo<Node> for Vec<u8> {}

impl Encoder<Node, Vec<u8>> for Node {
    type Error = Error;

    fn encode(&self) -> Result<Vec<u8>> {
        hex_to_bytes(&encode_hex(Input::Tree(self))?)
    }
}

impl EncodableTo<Element> for Vec<u8> {}

impl Encoder<Element, Vec<u8>> for Element {
    type Error = Error;

    fn encode(&self) -> Result<Vec<u8>> {
        hex_to_bytes(&encode_hex(Input::Array(self))?)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::decoder::decode_verbose;

    #[rstest(tag, parts, expected,
        case(0x05, vec![], "0500"),
        case(0x02, vec!["01"], "020101"),
        case(0x04, vec!["AB", "cd"], "0402abcd"),
        case(0x06, vec!["06 08 2A8648CE3D030107"], "060a06082a8648ce3d030107"),
        case(0x30, vec!["020101\n", "\t0500"], "30050201010500"),
    )]
    fn test_encode_generic(tag: u8, parts: Vec<&str>, expected: &str) {
        assert_eq!(expected, encode_generic(tag, &parts).unwrap());
    }

    #[rstest(length, expected_header,
        case(0, "0400"),
        case(127, "047f"),
        case(128, "048180"),
        case(255, "0481ff"),
        case(256, "04820100"),
        case(65535, "0482ffff"),
        case(65536, "0483010000"),
    )]
    fn test_encode_generic_length_form(length: usize, expected_header: &str) {
        let content = "00".repeat(length);
        let encoded = encode_generic(0x04, &[&content]).unwrap();
        assert_eq!(expected_header, &encoded[..expected_header.len()]);
        assert_eq!(expected_header.len() + content.len(), encoded.len());
    }

    #[rstest(parts, expected,
        case(vec!["abc"], Error::InvalidContent),
        case(vec!["ab", "c"], Error::InvalidContent),
        case(vec!["zz"], Error::MalformedHex),
        case(vec!["0x01"], Error::MalformedHex),
    )]
    fn test_encode_generic_error(parts: Vec<&str>, expected: Error) {
        assert_eq!(Err(expected), encode_generic(0x04, &parts));
    }

    #[rstest(input, expected,
        case("FF", "020200ff"),
        case("ff", "020200ff"),
        case("80", "02020080"),
        case("7f", "02017f"),
        case("00", "020100"),
        case("", "0200"),
        case("0100", "02020100"),
    )]
    fn test_encode_unsigned_integer(input: &str, expected: &str) {
        assert_eq!(expected, encode_unsigned_integer(input).unwrap());
    }

    #[test]
    fn test_unsigned_integer_sign_byte() {
        assert_eq!(
            encode_generic(INTEGER, &["00FF"]).unwrap(),
            encode_unsigned_integer("FF").unwrap()
        );
    }

    #[test]
    fn test_bit_string_padding_byte() {
        assert_eq!(
            encode_generic(BIT_STRING, &["0004AABB"]).unwrap(),
            encode_bit_string("04AABB").unwrap()
        );
        assert_eq!("03050004aabb", encode_bit_string("04AABB").unwrap());
    }

    #[test]
    fn test_pack_routes_by_tag() {
        let element = Element::new(
            0x30u8,
            vec![
                Element::new("02", "80"),
                Element::new(0x03u8, vec![0x0au8, 0x0b]),
                Element::new("04", "0a0b"),
                Element::new(0xa1u8, vec![Element::new("03", "04")]),
            ],
        );
        assert_eq!(
            "3013020200800303000a0b04020a0ba10403020004",
            pack(&element).unwrap()
        );
    }

    #[test]
    fn test_pack_nested_containers() {
        let element = Element::new(
            "31",
            vec![Element::new("30", vec![Element::new("05", "")])],
        );
        assert_eq!("310430020500", pack(&element).unwrap());
    }

    #[rstest(element, expected,
        case(Element::new("0203", "01"), Error::UnexpectedShape("tag \"0203\" is not a single byte".to_string())),
        case(Element::new("g0", "01"), Error::MalformedHex),
        case(Element::new("04", "012"), Error::InvalidContent),
        case(Element::new("30", vec![Element::new("04", "xy")]), Error::MalformedHex),
    )]
    fn test_pack_error(element: Element, expected: Error) {
        assert_eq!(Err(expected), pack(&element));
    }

    #[test]
    fn test_encode_options() {
        let element = Element::new("30", vec![Element::new(0x02u8, vec![0x01u8])]);
        assert_eq!(
            Encoded::Bytes(vec![0x30, 0x03, 0x02, 0x01, 0x01]),
            encode(&element, &EncodeOptions::default()).unwrap()
        );
        assert_eq!(
            Encoded::Hex("3003020101".to_string()),
            encode(&element, &EncodeOptions::default().json(true)).unwrap()
        );
    }

    #[rstest(input,
        case(vec![0x30, 0x03, 0x02, 0x01, 0x01]),
        case(vec![0x02, 0x02, 0x00, 0x80]),
        case(vec![0x03, 0x06, 0x00, 0x30, 0x03, 0x02, 0x01, 0x05]),
        case(vec![0x04, 0x05, 0x30, 0x03, 0x01, 0x01, 0xff]),
        case(vec![0x30, 0x06, 0x31, 0x00, 0x05, 0x00, 0x04, 0x00]),
    )]
    fn test_encoder_trait_tree(input: Vec<u8>) {
        let node = decode_verbose(&input).unwrap();
        let encoded: Vec<u8> = node.encode().unwrap();
        assert_eq!(input, encoded);
        assert_eq!(Encoded::Bytes(input), encode(&node, &EncodeOptions::default()).unwrap());
    }

    #[test]
    fn test_encoder_trait_element() {
        let element = Element::new("a0", vec![Element::new("06", "2a03")]);
        let encoded: Vec<u8> = element.encode().unwrap();
        assert_eq!(vec![0xa0, 0x04, 0x06, 0x02, 0x2a, 0x03], encoded);
    }
}
