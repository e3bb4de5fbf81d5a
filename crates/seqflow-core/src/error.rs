use thiserror::Error;

use crate::registry::TypeTag;

/// Canonical result for every seqflow crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A strict lookup (`first`, `last`, `single`) found no matching element.
    #[error("Not found: {0}")]
    NotFound(String),

    /// `single` matched more than one element.
    #[error("Ambiguous match: {0}")]
    Ambiguous(String),

    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Out of range: {0}")]
    OutOfRange(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Unknown extension `{name}` on {tag}")]
    UnknownExtension { tag: TypeTag, name: String },
}

impl Error {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    pub fn out_of_range(msg: impl Into<String>) -> Self {
        Error::OutOfRange(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Error::invalid("take count must be non-negative, got -1").to_string(),
            "Invalid argument: take count must be non-negative, got -1"
        );
        assert_eq!(
            Error::DuplicateKey("a".into()).to_string(),
            "Duplicate key: a"
        );
        let err = Error::UnknownExtension {
            tag: TypeTag::Set,
            name: "size".into(),
        };
        assert_eq!(err.to_string(), "Unknown extension `size` on set");
    }
}
