//! Error types for the BMap bindings

use bmap_ffi::{CkId, CodecError};
use std::path::PathBuf;
use thiserror::Error;

/// Result type for BMap operations
pub type Result<T> = std::result::Result<T, BMapError>;

/// Errors that can occur while talking to a BMap library
#[derive(Debug, Error)]
pub enum BMapError {
    /// An entry point reported failure
    #[error("BMap call '{operation}' failed")]
    OperationFailed { operation: &'static str },

    /// A staging source ran out before the declared count was written
    #[error("Channel '{channel}' declared {declared} elements but only {supplied} were supplied")]
    InsufficientElements {
        channel: &'static str,
        declared: u32,
        supplied: u32,
    },

    /// An entry point succeeded but handed back a null pointer
    #[error("'{0}' returned a null pointer")]
    NullArgument(&'static str),

    /// A staging channel was left half written
    #[error("Staging channel '{channel}' must be prepared again before parsing")]
    ChannelNotReady { channel: &'static str },

    /// The library returned a discriminant no variant matches
    #[error("Invalid {type_name} value {value}")]
    InvalidEnumValue { type_name: &'static str, value: u32 },

    /// A linked object lives in another container
    #[error("Object {id} belongs to another container")]
    ForeignObject { id: CkId },

    /// A buffer does not have the length the object expects
    #[error("Expected {expected} {what}, got {supplied}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        supplied: usize,
    },

    /// String transfer failed
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// Failed to load dynamic library
    #[error("Failed to load library '{path}': {message}")]
    LoadError { path: PathBuf, message: String },

    /// Library does not contain required symbol
    #[error("Symbol '{symbol}' not found in library '{library}'")]
    SymbolNotFound { library: String, symbol: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

impl BMapError {
    /// Create a load error
    pub fn load_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        BMapError::LoadError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a symbol not found error
    pub fn symbol_not_found(library: impl Into<String>, symbol: impl Into<String>) -> Self {
        BMapError::SymbolNotFound {
            library: library.into(),
            symbol: symbol.into(),
        }
    }
}

/// Turn an entry point's success flag into a `Result`
pub(crate) fn check(ok: bool, operation: &'static str) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(BMapError::OperationFailed { operation })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_maps_false() {
        assert!(check(true, "BMInit").is_ok());
        match check(false, "BMFile_Free") {
            Err(BMapError::OperationFailed { operation }) => assert_eq!(operation, "BMFile_Free"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_messages() {
        let err = BMapError::symbol_not_found("BMap.so", "BMInit");
        assert_eq!(err.to_string(), "Symbol 'BMInit' not found in library 'BMap.so'");

        let err = BMapError::InsufficientElements {
            channel: "vertex",
            declared: 4,
            supplied: 3,
        };
        assert!(err.to_string().contains("only 3"));
    }
}
