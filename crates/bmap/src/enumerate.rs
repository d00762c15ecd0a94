//! Lazy count-then-index enumeration
//!
//! An [`ObjectIter`] asks for the count on its first step and then fetches
//! one identity per step. Nothing is cached between iterators: calling
//! `objects()` again starts over from index 0 with a fresh count.

use crate::error::{check, Result};
use crate::handle::FileHandle;
use crate::object::{Material, Object3d, ObjectKind, ObjectRef};
use bmap_ffi::{symbols, CkId, INVALID_CKID};
use std::marker::PhantomData;

/// Where the identities come from
#[derive(Debug, Clone, Copy)]
enum Source {
    /// Every object of the kind in the container
    File,
    /// Members of a group
    Group(CkId),
    /// Material slot table of a mesh
    MaterialSlots(CkId),
}

/// Iterator over objects of kind `K`
pub struct ObjectIter<'f, K: ObjectKind> {
    handle: &'f FileHandle,
    source: Source,
    count: Option<u32>,
    index: u32,
    _kind: PhantomData<K>,
}

impl<'f, K: ObjectKind> ObjectIter<'f, K> {
    fn new(handle: &'f FileHandle, source: Source) -> Self {
        Self {
            handle,
            source,
            count: None,
            index: 0,
            _kind: PhantomData,
        }
    }

    pub(crate) fn in_file(handle: &'f FileHandle) -> Self {
        Self::new(handle, Source::File)
    }

    fn query_count(&self) -> Result<u32> {
        let vtable = self.handle.vtable();
        let file = self.handle.as_ptr();
        let mut count = 0;

        match self.source {
            Source::File => return self.handle.count::<K>(),
            Source::Group(group) => check(
                unsafe { (vtable.bmgroup_get_object_count)(file, group, &mut count) },
                symbols::bmgroup_get_object_count,
            )?,
            Source::MaterialSlots(mesh) => check(
                unsafe { (vtable.bmmesh_get_material_slot_count)(file, mesh, &mut count) },
                symbols::bmmesh_get_material_slot_count,
            )?,
        }
        Ok(count)
    }

    fn fetch(&self, index: u32) -> Result<ObjectRef<'f, K>> {
        let vtable = self.handle.vtable();
        let file = self.handle.as_ptr();
        let mut id: CkId = INVALID_CKID;

        match self.source {
            Source::File => return self.handle.object_at::<K>(index),
            Source::Group(group) => check(
                unsafe { (vtable.bmgroup_get_object)(file, group, index, &mut id) },
                symbols::bmgroup_get_object,
            )?,
            Source::MaterialSlots(mesh) => check(
                unsafe { (vtable.bmmesh_get_material_slot)(file, mesh, index, &mut id) },
                symbols::bmmesh_get_material_slot,
            )?,
        }
        Ok(ObjectRef::new(self.handle, id))
    }
}

impl<'f> ObjectIter<'f, Object3d> {
    pub(crate) fn group_members(handle: &'f FileHandle, group: CkId) -> Self {
        Self::new(handle, Source::Group(group))
    }
}

impl<'f> ObjectIter<'f, Material> {
    /// Slots may be empty, those yield an invalid reference
    pub(crate) fn material_slots(handle: &'f FileHandle, mesh: CkId) -> Self {
        Self::new(handle, Source::MaterialSlots(mesh))
    }
}

impl<'f, K: ObjectKind> Iterator for ObjectIter<'f, K> {
    type Item = Result<ObjectRef<'f, K>>;

    fn next(&mut self) -> Option<Self::Item> {
        let count = match self.count {
            Some(count) => count,
            None => match self.query_count() {
                Ok(count) => {
                    self.count = Some(count);
                    count
                }
                Err(e) => {
                    self.count = Some(0);
                    return Some(Err(e));
                }
            },
        };

        if self.index >= count {
            return None;
        }

        let item = self.fetch(self.index);
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.count {
            Some(count) => {
                let left = count.saturating_sub(self.index) as usize;
                (left, Some(left))
            }
            None => (0, None),
        }
    }
}
