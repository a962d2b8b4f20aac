//! Generic DER codec.
//!
//! Decodes a DER buffer into a tree of TLV elements and encodes such a tree,
//! or its compact array form, back into canonical DER. Nothing here knows about
//! certificates or keys: content is classified only by a fixed table of
//! container and value tags, and the remaining tags are parsed speculatively.
//!
//! ```
//! use der::{DecodeOptions, Decoded, EncodeOptions, Encoded, decode, encode};
//!
//! let bytes = vec![0x30, 0x03, 0x02, 0x01, 0x01];
//! let Decoded::Array(element) = decode(&bytes, &DecodeOptions::default()).unwrap() else {
//!     unreachable!()
//! };
//! assert_eq!(
//!     r#"["30",[["02","01"]]]"#,
//!     serde_json::to_string(&element).unwrap()
//! );
//! assert_eq!(
//!     Encoded::Bytes(bytes),
//!     encode(&element, &EncodeOptions::default()).unwrap()
//! );
//! ```

#![forbid(unsafe_code)]

pub mod array;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod hex;
pub mod node;
pub mod tag;

pub use array::{Element, Payload, TypeTag, to_array_form};
pub use decoder::{DecodeOptions, Decoded, decode, decode_verbose};
pub use encoder::{
    EncodeOptions, Encoded, Input, encode, encode_bit_string, encode_generic,
    encode_unsigned_integer, pack,
};
pub use node::{Body, Node};
