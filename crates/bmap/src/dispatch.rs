//! Generic property access, one pair of functions per wire type family
//!
//! Every property entry point has the shape
//! `(container, identity, value or out-pointer) -> success`. Named accessors
//! are thin calls into these functions, mostly generated by the macros at
//! the bottom of this file.

use crate::error::{check, BMapError, Result};
use crate::handle::FileHandle;
use crate::object::{ObjectKind, ObjectRef};
use bmap_ffi::{decode_text, CkId, EncodedText, FfiEnum, RawText, INVALID_CKID};
use std::ptr;

/// Property getter entry point
pub(crate) type Getter<T> = unsafe extern "C" fn(bmap_ffi::BMFilePtr, CkId, *mut T) -> bool;
/// Property setter entry point
pub(crate) type Setter<T> = unsafe extern "C" fn(bmap_ffi::BMFilePtr, CkId, T) -> bool;

// ============================================================================
// Plain values
// ============================================================================

pub(crate) fn get_value<T: Copy + Default>(
    handle: &FileHandle,
    id: CkId,
    getter: Getter<T>,
    operation: &'static str,
) -> Result<T> {
    let mut value = T::default();
    check(unsafe { getter(handle.as_ptr(), id, &mut value) }, operation)?;
    Ok(value)
}

pub(crate) fn set_value<T>(
    handle: &FileHandle,
    id: CkId,
    setter: Setter<T>,
    value: T,
    operation: &'static str,
) -> Result<()> {
    check(unsafe { setter(handle.as_ptr(), id, value) }, operation)
}

// ============================================================================
// Text
// ============================================================================

/// Read a string property, a null result is `None`
///
/// The returned pointer stays owned by the native side and is copied out
/// straight away.
pub(crate) fn get_text(
    handle: &FileHandle,
    id: CkId,
    getter: Getter<RawText>,
    operation: &'static str,
) -> Result<Option<String>> {
    let mut text: RawText = ptr::null();
    check(unsafe { getter(handle.as_ptr(), id, &mut text) }, operation)?;
    Ok(unsafe { decode_text(text) })
}

/// Write a string property, `None` crosses as a null pointer
pub(crate) fn set_text(
    handle: &FileHandle,
    id: CkId,
    setter: Setter<RawText>,
    value: Option<&str>,
    operation: &'static str,
) -> Result<()> {
    let encoded = value.map(EncodedText::new).transpose()?;
    let text = encoded.as_ref().map_or(ptr::null(), EncodedText::as_ptr);
    check(unsafe { setter(handle.as_ptr(), id, text) }, operation)
}

// ============================================================================
// Enumerations
// ============================================================================

pub(crate) fn get_enum<E: FfiEnum>(
    handle: &FileHandle,
    id: CkId,
    getter: Getter<u32>,
    operation: &'static str,
) -> Result<E> {
    let raw = get_value(handle, id, getter, operation)?;
    E::from_raw(raw).ok_or(BMapError::InvalidEnumValue {
        type_name: E::NAME,
        value: raw,
    })
}

pub(crate) fn set_enum<E: FfiEnum>(
    handle: &FileHandle,
    id: CkId,
    setter: Setter<u32>,
    value: E,
    operation: &'static str,
) -> Result<()> {
    set_value(handle, id, setter, value.to_raw(), operation)
}

// ============================================================================
// Object links
// ============================================================================

/// Read a link to another object, identity 0 is `None`
pub(crate) fn get_link<'f, K: ObjectKind>(
    handle: &'f FileHandle,
    id: CkId,
    getter: Getter<CkId>,
    operation: &'static str,
) -> Result<Option<ObjectRef<'f, K>>> {
    let target = get_value(handle, id, getter, operation)?;
    Ok((target != INVALID_CKID).then(|| ObjectRef::new(handle, target)))
}

pub(crate) fn set_link<K: ObjectKind>(
    handle: &FileHandle,
    id: CkId,
    setter: Setter<CkId>,
    target: Option<&ObjectRef<'_, K>>,
    operation: &'static str,
) -> Result<()> {
    let target = link_id(handle, target)?;
    set_value(handle, id, setter, target, operation)
}

/// Identity to send for a link, refusing objects from other containers
pub(crate) fn link_id<K: ObjectKind>(
    handle: &FileHandle,
    target: Option<&ObjectRef<'_, K>>,
) -> Result<CkId> {
    match target {
        None => Ok(INVALID_CKID),
        Some(target) if target.handle().as_ptr() == handle.as_ptr() => Ok(target.id()),
        Some(target) => Err(BMapError::ForeignObject { id: target.id() }),
    }
}

// ============================================================================
// Native buffers
// ============================================================================

/// Copy `count` elements out of a buffer the native side points at
pub(crate) fn read_buffer<T: Copy>(
    handle: &FileHandle,
    id: CkId,
    count: usize,
    getter: Getter<*mut T>,
    operation: &'static str,
) -> Result<Vec<T>> {
    let mem = buffer(handle, id, count, getter, operation)?;
    if count == 0 {
        return Ok(Vec::new());
    }
    Ok(unsafe { std::slice::from_raw_parts(mem, count) }.to_vec())
}

/// Overwrite a native buffer of exactly `values.len()` elements
pub(crate) fn write_buffer<T: Copy>(
    handle: &FileHandle,
    id: CkId,
    values: &[T],
    getter: Getter<*mut T>,
    operation: &'static str,
) -> Result<()> {
    let mem = buffer(handle, id, values.len(), getter, operation)?;
    if !values.is_empty() {
        unsafe { ptr::copy_nonoverlapping(values.as_ptr(), mem, values.len()) };
    }
    Ok(())
}

fn buffer<T>(
    handle: &FileHandle,
    id: CkId,
    count: usize,
    getter: Getter<*mut T>,
    operation: &'static str,
) -> Result<*mut T> {
    let mut mem: *mut T = ptr::null_mut();
    check(unsafe { getter(handle.as_ptr(), id, &mut mem) }, operation)?;
    if mem.is_null() && count > 0 {
        return Err(BMapError::NullArgument(operation));
    }
    Ok(mem)
}

// ============================================================================
// Accessor generators
// ============================================================================

/// Getter/setter pairs for `Copy` values
macro_rules! value_accessors {
    ($($(#[$meta:meta])* $get:ident, $set:ident: $ty:ty => $getter:ident, $setter:ident;)+) => {
        $(
            $(#[$meta])*
            pub fn $get(&self) -> $crate::error::Result<$ty> {
                $crate::dispatch::get_value(
                    self.handle(),
                    self.id(),
                    self.vtable().$getter,
                    bmap_ffi::symbols::$getter,
                )
            }

            pub fn $set(&self, value: $ty) -> $crate::error::Result<()> {
                $crate::dispatch::set_value(
                    self.handle(),
                    self.id(),
                    self.vtable().$setter,
                    value,
                    bmap_ffi::symbols::$setter,
                )
            }
        )+
    };
}

/// Getter/setter pairs for enumerations crossing as `u32`
macro_rules! enum_accessors {
    ($($(#[$meta:meta])* $get:ident, $set:ident: $ty:ty => $getter:ident, $setter:ident;)+) => {
        $(
            $(#[$meta])*
            pub fn $get(&self) -> $crate::error::Result<$ty> {
                $crate::dispatch::get_enum(
                    self.handle(),
                    self.id(),
                    self.vtable().$getter,
                    bmap_ffi::symbols::$getter,
                )
            }

            pub fn $set(&self, value: $ty) -> $crate::error::Result<()> {
                $crate::dispatch::set_enum(
                    self.handle(),
                    self.id(),
                    self.vtable().$setter,
                    value,
                    bmap_ffi::symbols::$setter,
                )
            }
        )+
    };
}

/// Getter/setter pairs for links to objects of another kind
macro_rules! link_accessors {
    ($($(#[$meta:meta])* $get:ident, $set:ident: $kind:ty => $getter:ident, $setter:ident;)+) => {
        $(
            $(#[$meta])*
            pub fn $get(&self) -> $crate::error::Result<Option<$crate::object::ObjectRef<'f, $kind>>> {
                $crate::dispatch::get_link(
                    self.handle(),
                    self.id(),
                    self.vtable().$getter,
                    bmap_ffi::symbols::$getter,
                )
            }

            pub fn $set(
                &self,
                target: Option<&$crate::object::ObjectRef<'_, $kind>>,
            ) -> $crate::error::Result<()> {
                $crate::dispatch::set_link(
                    self.handle(),
                    self.id(),
                    self.vtable().$setter,
                    target,
                    bmap_ffi::symbols::$setter,
                )
            }
        )+
    };
}

pub(crate) use {enum_accessors, link_accessors, value_accessors};
