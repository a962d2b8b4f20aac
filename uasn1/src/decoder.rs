//! Decoder trait for type-safe conversions.
//!
//! `Decoder<T, D>` converts a source `T` into a destination `D`. The
//! destination has to opt in through `DecodableFrom<T>`, which keeps the set
//! of valid conversions explicit.
//!
//! ```no_run
//! use uasn1::decoder::{DecodableFrom, Decoder};
//!
//! struct Raw(Vec<u8>);
//! struct Length(usize);
//!
//! #[derive(Debug)]
//! struct LengthError;
//!
//! impl DecodableFrom<Raw> for Length {}
//!
//! impl Decoder<Raw, Length> for Raw {
//!     type Error = LengthError;
//!
//!     fn decode(&self) -> Result<Length, Self::Error> {
//!         Ok(Length(self.0.len()))
//!     }
//! }
//! ```

/// Decoder trait for converting from type `T` to type `D`.
///
/// Implemented by the source type. The `der` crate implements it for byte
/// buffers so that `bytes.decode()` yields a decoded `Node` tree.
pub trait Decoder<T, D: DecodableFrom<T>> {
    /// The error type returned when decoding fails.
    type Error;

    /// Decodes `self` into type `D`.
    ///
    /// # Errors
    ///
    /// Returns an error if `self` is not a valid encoding of `D`.
    fn decode(&self) -> Result<D, Self::Error>;
}

/// Marker trait indicating that type `D` can be decoded from type `T`.
pub trait DecodableFrom<T> {}
