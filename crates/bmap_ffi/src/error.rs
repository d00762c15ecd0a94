//! Error types for the string transfer codec

use thiserror::Error;

/// Errors raised while encoding text for the boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// String does not fit the 32-bit length header
    #[error("Text of {len} bytes exceeds the 32-bit length header")]
    TextTooLong { len: usize },

    /// Array does not fit the 32-bit count header
    #[error("Array of {len} elements exceeds the 32-bit count header")]
    TooManyElements { len: usize },

    /// The allocator refused the request
    #[error("Failed to allocate {size} bytes")]
    AllocationFailed { size: usize },
}
