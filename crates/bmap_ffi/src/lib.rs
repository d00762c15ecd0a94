//! # bmap_ffi - BMap boundary definitions
//!
//! Everything both sides of the BMap C ABI have to agree on:
//!
//! - `#[repr(C)]` value types ([`VxVector3`], [`VxColor`], [`VxMatrix`], ...)
//!   and the `u32` enumerations that travel with them
//! - the length-prefixed string transfer codec ([`codec`])
//! - the table of every exported entry point ([`BMapVTable`])
//!
//! ## Result convention
//!
//! ```text
//! bool BMObject_GetName(void* file, CK_ID id, CKSTRING* out_name);
//!  │                                           │
//!  │                                           └── written only on success
//!  └── true = success, false = nothing written
//! ```
//!
//! The native engine lives in `bmap_native`, the safe caller-side wrapper in
//! `bmap`.

pub mod codec;
mod error;
mod types;
pub mod vtable;

pub use codec::{
    decode_text, decode_text_array, encode_text, encode_text_array, free_text, free_text_array,
    text_array_len, text_len, EncodedText, EncodedTextArray,
};
pub use error::CodecError;
pub use types::*;
pub use vtable::{symbols, BMapVTable};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::codec::{EncodedText, EncodedTextArray};
    pub use crate::error::CodecError;
    pub use crate::types::{
        CkId, CkTextureSaveOptions, FfiEnum, VxColor, VxMatrix, VxVector2, VxVector3, INVALID_CKID,
    };
    pub use crate::vtable::BMapVTable;
}
