//! Error types for the native engine
//!
//! These never cross the boundary. Every exported function turns them into a
//! `false` return and a log line.

use bmap_ffi::{CkId, CodecError};
use std::path::PathBuf;
use thiserror::Error;

use crate::object::ObjectKind;

/// Result type for native engine operations
pub type Result<T> = std::result::Result<T, NativeError>;

/// Errors that can occur inside the native engine
#[derive(Debug, Error)]
pub enum NativeError {
    /// BMInit has not been called, or BMDispose already ran
    #[error("Engine is not initialized")]
    NotInitialized,

    /// A pointer argument was null
    #[error("Null argument '{0}'")]
    NullArgument(&'static str),

    /// Pointer does not name a live container
    #[error("Unknown container {0:#x}")]
    UnknownFile(usize),

    /// Pointer does not name a live staging session
    #[error("Unknown staging session {0:#x}")]
    UnknownSession(usize),

    /// Identity does not name an object of this container
    #[error("Unknown object {0}")]
    UnknownObject(CkId),

    /// Object exists but is of another kind
    #[error("Object {id} is a {actual}, expected {expected}")]
    WrongKind {
        id: CkId,
        expected: &'static str,
        actual: &'static str,
    },

    /// Operation is not available on a reader or on a writer
    #[error("'{operation}' is not allowed on a {mode} container")]
    WrongMode {
        operation: &'static str,
        mode: &'static str,
    },

    /// Index past the end of a list
    #[error("Index {index} out of range for {what} of length {len}")]
    IndexOutOfRange {
        what: &'static str,
        index: u32,
        len: usize,
    },

    /// Raw value names no variant of the enumeration
    #[error("Invalid {type_name} value {value}")]
    InvalidEnum { type_name: &'static str, value: u32 },

    /// Argument has the right type but an unusable value
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Staging channel used before its count was declared
    #[error("Staging channel '{0}' has not been prepared")]
    ChannelNotReady(&'static str),

    /// Committed geometry does not fit 16-bit indices
    #[error("{what} count {count} exceeds the 16-bit limit")]
    TooLarge { what: &'static str, count: usize },

    /// A buffer of the requested size could not be allocated
    #[error("Cannot allocate {count} {what} elements")]
    AllocationFailed { what: &'static str, count: usize },

    /// Mesh channels disagree with each other
    #[error("Inconsistent mesh: {0}")]
    InconsistentMesh(String),

    /// Object already belongs to the group
    #[error("Object {member} is already in group {group}")]
    AlreadyInGroup { group: CkId, member: CkId },

    /// Text could not be encoded for the caller
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// Persisted file is not a container snapshot
    #[error("'{path}' is not a BMap container: {message}")]
    BadFormat { path: PathBuf, message: String },

    /// Snapshot encoding or decoding failed
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl NativeError {
    /// Create a wrong kind error
    pub fn wrong_kind(id: CkId, expected: ObjectKind, actual: ObjectKind) -> Self {
        NativeError::WrongKind {
            id,
            expected: expected.name(),
            actual: actual.name(),
        }
    }

    /// Create an index out of range error
    pub fn out_of_range(what: &'static str, index: u32, len: usize) -> Self {
        NativeError::IndexOutOfRange { what, index, len }
    }

    /// Create a bad format error
    pub fn bad_format(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        NativeError::BadFormat {
            path: path.into(),
            message: message.into(),
        }
    }
}
