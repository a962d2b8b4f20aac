use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while decoding or encoding DER.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    #[error("malformed hex string")]
    MalformedHex,
    #[error("hex string is not valid UTF-8 text")]
    InvalidUtf8,

    #[error("element nested {depth}+ layers deep")]
    ExcessiveDepth { depth: usize },
    #[error("iterated over {limit}+ elements in one container")]
    ExcessiveBreadth { limit: usize },
    #[error("child element of {child} bytes is greater than the {remaining} bytes remaining in its parent")]
    ChildOverflow { child: usize, remaining: usize },
    #[error("premature end of content")]
    PrematureEnd,
    #[error("element declares {declared} bytes but the buffer holds {actual}")]
    LengthMismatch { declared: usize, actual: usize },
    #[error("indefinite length is not allowed in DER")]
    IndefiniteLength,
    #[error("length field does not fit in usize")]
    LengthTooLarge,

    #[error("content has an odd number of hex digits")]
    InvalidContent,
    #[error("unexpected shape: {0}")]
    UnexpectedShape(String),
}

impl<I> From<nom::Err<nom::error::Error<I>>> for Error {
    fn from(_: nom::Err<nom::error::Error<I>>) -> Self {
        // The header combinators only fail when bytes run out.
        Error::PrematureEnd
    }
}
