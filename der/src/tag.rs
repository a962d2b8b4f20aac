//! Tag classification tables and decoder guard limits.

pub const BOOLEAN: u8 = 0x01;
pub const INTEGER: u8 = 0x02;
pub const BIT_STRING: u8 = 0x03;
pub const OCTET_STRING: u8 = 0x04;
pub const NULL: u8 = 0x05;
pub const OBJECT_IDENTIFIER: u8 = 0x06;
pub const UTF8_STRING: u8 = 0x0c;
pub const SEQUENCE: u8 = 0x30;
pub const SET: u8 = 0x31;
pub const CONTEXT_0: u8 = 0xa0;
pub const CONTEXT_1: u8 = 0xa1;
pub const CONTEXT_2_PRIMITIVE: u8 = 0x82;

/// Tags whose content is always a list of nested elements.
pub const CONTAINER_TAGS: [u8; 4] = [SEQUENCE, SET, CONTEXT_0, CONTEXT_1];

/// Tags whose content is always raw data.
pub const VALUE_TAGS: [u8; 6] = [
    BOOLEAN,
    INTEGER,
    NULL,
    OBJECT_IDENTIFIER,
    UTF8_STRING,
    CONTEXT_2_PRIMITIVE,
];

// Certificates in the wild nest around 30 levels deep.
pub const MAX_DEPTH: usize = 60;

// A name list in a certificate may carry up to 100 entries.
pub const MAX_CHILDREN: usize = 101;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Class {
    Container,
    Value,
    /// Bit String, Octet String and any tag outside the tables. The content
    /// may be raw data or an embedded structure.
    Ambiguous,
}

impl From<u8> for Class {
    fn from(tag: u8) -> Self {
        if CONTAINER_TAGS.contains(&tag) {
            Class::Container
        } else if VALUE_TAGS.contains(&tag) {
            Class::Value
        } else {
            Class::Ambiguous
        }
    }
}

/// Integer content may start with a sign byte and Bit String content with the
/// unused-bits byte. Both are dropped on decode and restored on encode.
pub(crate) fn has_leading_pad(tag: u8) -> bool {
    tag == INTEGER || tag == BIT_STRING
}
