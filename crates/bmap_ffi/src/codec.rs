//! String transfer codec
//!
//! Text crosses the boundary without a shared allocator. Every buffer starts
//! with a native-endian `u32` header and the pointer that is handed out points
//! just past it, so the length of anything handed out can always be recovered
//! by reading the four bytes in front of the pointer.
//!
//! ```text
//! string:  [u32 byte length L][L bytes of UTF-8]
//!                             ^ handed-out pointer
//!
//! array:   [u32 count N][N pointer slots]
//!                       ^ handed-out pointer
//! ```
//!
//! Each array slot is either null or the handed-out pointer of one encoded
//! string. Slots sit directly after the four byte header, so they are always
//! accessed unaligned. There is no NUL terminator anywhere.

use crate::error::CodecError;
use crate::types::{RawText, RawTextArray};
use std::alloc::{self, Layout};
use std::ffi::c_char;
use std::ptr::{self, NonNull};

const HEADER_SIZE: usize = std::mem::size_of::<u32>();
const SLOT_SIZE: usize = std::mem::size_of::<*const c_char>();
const BLOCK_ALIGN: usize = std::mem::align_of::<u32>();

// ============================================================================
// Raw blocks
// ============================================================================

fn block_layout(payload: usize) -> Result<Layout, CodecError> {
    let size = payload
        .checked_add(HEADER_SIZE)
        .ok_or(CodecError::AllocationFailed { size: payload })?;
    Layout::from_size_align(size, BLOCK_ALIGN).map_err(|_| CodecError::AllocationFailed { size })
}

/// Allocate `[header][payload bytes]` and return the payload pointer
fn allocate_block(header: u32, payload: usize) -> Result<NonNull<u8>, CodecError> {
    let layout = block_layout(payload)?;
    // Safety: the layout is never zero sized because of the header.
    let base = unsafe { alloc::alloc(layout) };
    if base.is_null() {
        log::error!("String codec failed to allocate {} bytes", layout.size());
        return Err(CodecError::AllocationFailed { size: layout.size() });
    }

    unsafe {
        ptr::write_unaligned(base as *mut u32, header);
        Ok(NonNull::new_unchecked(base.add(HEADER_SIZE)))
    }
}

/// Release a block previously returned by `allocate_block`
///
/// # Safety
/// `payload_ptr` must come from `allocate_block` with the same payload size.
unsafe fn release_block(payload_ptr: *mut u8, payload: usize) {
    let base = payload_ptr.sub(HEADER_SIZE);
    let layout = Layout::from_size_align_unchecked(payload + HEADER_SIZE, BLOCK_ALIGN);
    alloc::dealloc(base, layout);
}

unsafe fn read_header(payload_ptr: *const u8) -> u32 {
    ptr::read_unaligned(payload_ptr.sub(HEADER_SIZE) as *const u32)
}

// ============================================================================
// Single strings
// ============================================================================

/// Owned, encoded string
///
/// Frees its buffer on drop unless ownership was given away with
/// [`EncodedText::into_raw`].
#[derive(Debug)]
pub struct EncodedText {
    ptr: NonNull<u8>,
}

// Safety: the buffer is exclusively owned and never aliased mutably
unsafe impl Send for EncodedText {}
unsafe impl Sync for EncodedText {}

impl EncodedText {
    /// Encode a string
    pub fn new(text: &str) -> Result<Self, CodecError> {
        let len = u32::try_from(text.len()).map_err(|_| CodecError::TextTooLong { len: text.len() })?;
        let ptr = allocate_block(len, text.len())?;

        unsafe {
            ptr::copy_nonoverlapping(text.as_ptr(), ptr.as_ptr(), text.len());
        }

        Ok(Self { ptr })
    }

    /// Take ownership of a pointer produced by [`EncodedText::into_raw`]
    ///
    /// # Safety
    /// `ptr` must be null or a live pointer handed out by this codec.
    pub unsafe fn from_raw(ptr: *mut c_char) -> Option<Self> {
        NonNull::new(ptr as *mut u8).map(|ptr| Self { ptr })
    }

    /// Pointer to the payload, valid while `self` lives
    pub fn as_ptr(&self) -> RawText {
        self.ptr.as_ptr() as RawText
    }

    /// Give up ownership, the caller must eventually call [`free_text`]
    pub fn into_raw(self) -> *mut c_char {
        let ptr = self.ptr.as_ptr() as *mut c_char;
        std::mem::forget(self);
        ptr
    }

    /// Byte length recorded in the header
    pub fn len(&self) -> u32 {
        unsafe { read_header(self.ptr.as_ptr()) }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decode back into an owned string
    pub fn to_string_lossy(&self) -> String {
        unsafe { decode_text(self.as_ptr()) }.unwrap_or_default()
    }
}

impl Drop for EncodedText {
    fn drop(&mut self) {
        unsafe { free_text(self.ptr.as_ptr() as RawText) }
    }
}

/// Encode a string
pub fn encode_text(text: &str) -> Result<EncodedText, CodecError> {
    EncodedText::new(text)
}

/// Byte length of an encoded string
///
/// # Safety
/// `ptr` must be a live, non-null pointer handed out by this codec.
pub unsafe fn text_len(ptr: RawText) -> u32 {
    read_header(ptr as *const u8)
}

/// Decode an encoded string into an owned `String`
///
/// Returns `None` for a null pointer. Invalid UTF-8 sequences are replaced
/// with U+FFFD.
///
/// # Safety
/// `ptr` must be null or a live pointer handed out by this codec.
pub unsafe fn decode_text(ptr: RawText) -> Option<String> {
    if ptr.is_null() {
        return None;
    }

    let len = text_len(ptr) as usize;
    let bytes = std::slice::from_raw_parts(ptr as *const u8, len);
    Some(String::from_utf8_lossy(bytes).into_owned())
}

/// Free an encoded string, a null pointer is ignored
///
/// # Safety
/// `ptr` must be null or a pointer handed out by this codec that has not been
/// freed yet.
pub unsafe fn free_text(ptr: RawText) {
    if ptr.is_null() {
        return;
    }

    let len = text_len(ptr) as usize;
    release_block(ptr as *mut u8, len);
}

// ============================================================================
// String arrays
// ============================================================================

/// Owned, encoded array of optional strings
#[derive(Debug)]
pub struct EncodedTextArray {
    ptr: NonNull<u8>,
}

// Safety: the slot table and every element are exclusively owned
unsafe impl Send for EncodedTextArray {}
unsafe impl Sync for EncodedTextArray {}

impl EncodedTextArray {
    /// Encode a list of optional strings, `None` becomes a null slot
    ///
    /// Elements already encoded are released again if a later one fails.
    pub fn new<S: AsRef<str>>(items: &[Option<S>]) -> Result<Self, CodecError> {
        let count = u32::try_from(items.len()).map_err(|_| CodecError::TooManyElements { len: items.len() })?;
        let table_size = items
            .len()
            .checked_mul(SLOT_SIZE)
            .ok_or(CodecError::TooManyElements { len: items.len() })?;

        let mut elements = Vec::with_capacity(items.len());
        for item in items {
            let element = match item {
                Some(text) => Some(EncodedText::new(text.as_ref())?),
                None => None,
            };
            elements.push(element);
        }

        let ptr = allocate_block(count, table_size)?;
        for (index, element) in elements.into_iter().enumerate() {
            let slot = element.map_or(ptr::null(), |e| e.into_raw() as *const c_char);
            unsafe {
                ptr::write_unaligned((ptr.as_ptr() as *mut *const c_char).add(index), slot);
            }
        }

        Ok(Self { ptr })
    }

    /// Take ownership of a pointer produced by [`EncodedTextArray::into_raw`]
    ///
    /// # Safety
    /// `ptr` must be null or a live array pointer handed out by this codec.
    pub unsafe fn from_raw(ptr: *mut *const c_char) -> Option<Self> {
        NonNull::new(ptr as *mut u8).map(|ptr| Self { ptr })
    }

    /// Pointer to the first slot, valid while `self` lives
    pub fn as_ptr(&self) -> RawTextArray {
        self.ptr.as_ptr() as RawTextArray
    }

    /// Give up ownership, the caller must eventually call [`free_text_array`]
    pub fn into_raw(self) -> *mut *const c_char {
        let ptr = self.ptr.as_ptr() as *mut *const c_char;
        std::mem::forget(self);
        ptr
    }

    /// Element count recorded in the header
    pub fn len(&self) -> u32 {
        unsafe { read_header(self.ptr.as_ptr()) }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drop for EncodedTextArray {
    fn drop(&mut self) {
        unsafe { free_text_array(self.as_ptr()) }
    }
}

/// Encode a list of optional strings
pub fn encode_text_array<S: AsRef<str>>(items: &[Option<S>]) -> Result<EncodedTextArray, CodecError> {
    EncodedTextArray::new(items)
}

/// Element count of an encoded array
///
/// # Safety
/// `ptr` must be a live, non-null array pointer handed out by this codec.
pub unsafe fn text_array_len(ptr: RawTextArray) -> u32 {
    read_header(ptr as *const u8)
}

unsafe fn read_slot(ptr: RawTextArray, index: usize) -> RawText {
    ptr::read_unaligned(ptr.add(index))
}

/// Decode an encoded array, preserving order and null slots
///
/// Returns `None` for a null pointer.
///
/// # Safety
/// `ptr` must be null or a live array pointer handed out by this codec.
pub unsafe fn decode_text_array(ptr: RawTextArray) -> Option<Vec<Option<String>>> {
    if ptr.is_null() {
        return None;
    }

    let count = text_array_len(ptr) as usize;
    Some((0..count).map(|i| decode_text(read_slot(ptr, i))).collect())
}

/// Free an encoded array and every element it owns, a null pointer is ignored
///
/// # Safety
/// `ptr` must be null or an array pointer handed out by this codec that has
/// not been freed yet.
pub unsafe fn free_text_array(ptr: RawTextArray) {
    if ptr.is_null() {
        return;
    }

    let count = text_array_len(ptr) as usize;
    for index in 0..count {
        free_text(read_slot(ptr, index));
    }
    release_block(ptr as *mut u8, count * SLOT_SIZE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_round_trip() {
        let encoded = EncodedText::new("").unwrap();
        assert_eq!(encoded.len(), 0);
        assert!(encoded.is_empty());
        assert_eq!(unsafe { decode_text(encoded.as_ptr()) }, Some(String::new()));
    }

    #[test]
    fn test_header_holds_byte_length() {
        let encoded = encode_text("héllo").unwrap();
        assert_eq!(unsafe { text_len(encoded.as_ptr()) }, 6);
        assert_eq!(encoded.to_string_lossy(), "héllo");
    }

    #[test]
    fn test_payload_follows_header() {
        let encoded = encode_text("abc").unwrap();
        let bytes = unsafe { std::slice::from_raw_parts((encoded.as_ptr() as *const u8).sub(4), 7) };
        assert_eq!(&bytes[..4], &3u32.to_ne_bytes());
        assert_eq!(&bytes[4..], b"abc");
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let encoded = encode_text("ab").unwrap();
        unsafe {
            *(encoded.as_ptr() as *mut u8) = 0xFF;
            assert_eq!(decode_text(encoded.as_ptr()).unwrap(), "\u{FFFD}b");
        }
    }

    #[test]
    fn test_null_pointers() {
        unsafe {
            assert_eq!(decode_text(ptr::null()), None);
            assert_eq!(decode_text_array(ptr::null()), None);
            free_text(ptr::null());
            free_text_array(ptr::null());
        }
    }

    #[test]
    fn test_into_raw_and_back() {
        let raw = encode_text("owned").unwrap().into_raw();
        let back = unsafe { EncodedText::from_raw(raw) }.unwrap();
        assert_eq!(back.to_string_lossy(), "owned");
    }

    #[test]
    fn test_array_with_null_slot() {
        let items = [Some("a"), None, Some("bc")];
        let encoded = EncodedTextArray::new(&items).unwrap();
        assert_eq!(unsafe { text_array_len(encoded.as_ptr()) }, 3);

        let decoded = unsafe { decode_text_array(encoded.as_ptr()) }.unwrap();
        assert_eq!(decoded, vec![Some("a".to_string()), None, Some("bc".to_string())]);
    }

    #[test]
    fn test_empty_array() {
        let encoded = encode_text_array::<&str>(&[]).unwrap();
        assert!(encoded.is_empty());
        assert_eq!(unsafe { decode_text_array(encoded.as_ptr()) }, Some(Vec::new()));
    }

    #[test]
    fn test_array_elements_carry_own_header() {
        let encoded = encode_text_array(&[Some("xyz".to_string())]).unwrap();
        unsafe {
            let element = read_slot(encoded.as_ptr(), 0);
            assert_eq!(text_len(element), 3);
        }
    }

    #[test]
    fn test_array_into_raw_and_free() {
        let raw = encode_text_array(&[Some("one"), Some("two")]).unwrap().into_raw();
        unsafe {
            assert_eq!(text_array_len(raw as RawTextArray), 2);
            free_text_array(raw as RawTextArray);
        }
    }
}
