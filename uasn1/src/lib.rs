//! # uasn1
//!
//! Core conversion traits shared by the uasn1 DER codec.
//!
//! The codec is built as a chain of conversions, each step expressed through
//! the `Decoder` and `Encoder` traits defined here:
//!
//! ```text
//! Vec<u8> → Node → Element        (decode)
//! Element / Node → Vec<u8>        (encode)
//! ```
//!
//! The marker traits `DecodableFrom` and `EncodableTo` restrict which pairs of
//! types may be converted, so an unsupported conversion is a compile error
//! rather than a runtime one.
//!
//! ## Example
//!
//! ```ignore
//! use uasn1::decoder::Decoder;
//! use uasn1::encoder::Encoder;
//! use der::Node;
//!
//! let bytes = vec![0x30, 0x03, 0x02, 0x01, 0x01];
//! let node: Node = bytes.decode().unwrap();
//! let encoded: Vec<u8> = node.encode().unwrap();
//! assert_eq!(bytes, encoded);
//! ```

#![forbid(unsafe_code)]

pub mod decoder;
pub mod encoder;
