//! Mesh accessors
//!
//! Channel contents are copied out into `Vec`s and written back from
//! slices. Writers require the slice to match the current count, change the
//! count first with the matching `set_*_count`.

use crate::dispatch::{self, enum_accessors, value_accessors};
use crate::enumerate::ObjectIter;
use crate::error::{check, BMapError, Result};
use crate::object::{BMMaterial, BMMesh, ObjectRef};
use bmap_ffi::{symbols, CKShortFaceIndices, CkId, VxMeshLitMode, VxVector2, VxVector3, INVALID_CKID};

impl<'f> BMMesh<'f> {
    enum_accessors! {
        lit_mode, set_lit_mode: VxMeshLitMode => bmmesh_get_lit_mode, bmmesh_set_lit_mode;
    }

    value_accessors! {
        /// Number of vertices, shared by positions, normals and UVs
        vertex_count, set_vertex_count: u32 => bmmesh_get_vertex_count, bmmesh_set_vertex_count;
        /// Number of triangles
        face_count, set_face_count: u32 => bmmesh_get_face_count, bmmesh_set_face_count;
        material_slot_count, set_material_slot_count: u32 => bmmesh_get_material_slot_count, bmmesh_set_material_slot_count;
    }

    // ========================================================================
    // Vertex channels
    // ========================================================================

    pub fn vertex_positions(&self) -> Result<Vec<VxVector3>> {
        let count = self.vertex_count()? as usize;
        dispatch::read_buffer(
            self.handle(),
            self.id(),
            count,
            self.vtable().bmmesh_get_vertex_positions,
            symbols::bmmesh_get_vertex_positions,
        )
    }

    pub fn set_vertex_positions(&self, positions: &[VxVector3]) -> Result<()> {
        self.expect_len("vertices", self.vertex_count()?, positions.len())?;
        dispatch::write_buffer(
            self.handle(),
            self.id(),
            positions,
            self.vtable().bmmesh_get_vertex_positions,
            symbols::bmmesh_get_vertex_positions,
        )
    }

    pub fn vertex_normals(&self) -> Result<Vec<VxVector3>> {
        let count = self.vertex_count()? as usize;
        dispatch::read_buffer(
            self.handle(),
            self.id(),
            count,
            self.vtable().bmmesh_get_vertex_normals,
            symbols::bmmesh_get_vertex_normals,
        )
    }

    pub fn set_vertex_normals(&self, normals: &[VxVector3]) -> Result<()> {
        self.expect_len("normals", self.vertex_count()?, normals.len())?;
        dispatch::write_buffer(
            self.handle(),
            self.id(),
            normals,
            self.vtable().bmmesh_get_vertex_normals,
            symbols::bmmesh_get_vertex_normals,
        )
    }

    pub fn vertex_uvs(&self) -> Result<Vec<VxVector2>> {
        let count = self.vertex_count()? as usize;
        dispatch::read_buffer(
            self.handle(),
            self.id(),
            count,
            self.vtable().bmmesh_get_vertex_uvs,
            symbols::bmmesh_get_vertex_uvs,
        )
    }

    pub fn set_vertex_uvs(&self, uvs: &[VxVector2]) -> Result<()> {
        self.expect_len("UVs", self.vertex_count()?, uvs.len())?;
        dispatch::write_buffer(
            self.handle(),
            self.id(),
            uvs,
            self.vtable().bmmesh_get_vertex_uvs,
            symbols::bmmesh_get_vertex_uvs,
        )
    }

    // ========================================================================
    // Face channels
    // ========================================================================

    pub fn face_indices(&self) -> Result<Vec<CKShortFaceIndices>> {
        let count = self.face_count()? as usize;
        dispatch::read_buffer(
            self.handle(),
            self.id(),
            count,
            self.vtable().bmmesh_get_face_indices,
            symbols::bmmesh_get_face_indices,
        )
    }

    pub fn set_face_indices(&self, faces: &[CKShortFaceIndices]) -> Result<()> {
        self.expect_len("faces", self.face_count()?, faces.len())?;
        dispatch::write_buffer(
            self.handle(),
            self.id(),
            faces,
            self.vtable().bmmesh_get_face_indices,
            symbols::bmmesh_get_face_indices,
        )
    }

    /// Per-face index into this mesh's material slot table
    pub fn face_material_slot_indices(&self) -> Result<Vec<u16>> {
        let count = self.face_count()? as usize;
        dispatch::read_buffer(
            self.handle(),
            self.id(),
            count,
            self.vtable().bmmesh_get_face_material_slot_indexs,
            symbols::bmmesh_get_face_material_slot_indexs,
        )
    }

    pub fn set_face_material_slot_indices(&self, slots: &[u16]) -> Result<()> {
        self.expect_len("face material slots", self.face_count()?, slots.len())?;
        dispatch::write_buffer(
            self.handle(),
            self.id(),
            slots,
            self.vtable().bmmesh_get_face_material_slot_indexs,
            symbols::bmmesh_get_face_material_slot_indexs,
        )
    }

    // ========================================================================
    // Material slots
    // ========================================================================

    /// Material in one slot, `None` for an empty slot
    pub fn material_slot(&self, index: u32) -> Result<Option<BMMaterial<'f>>> {
        let mut id: CkId = INVALID_CKID;
        check(
            unsafe { (self.vtable().bmmesh_get_material_slot)(self.handle().as_ptr(), self.id(), index, &mut id) },
            symbols::bmmesh_get_material_slot,
        )?;
        Ok((id != INVALID_CKID).then(|| ObjectRef::new(self.handle(), id)))
    }

    pub fn set_material_slot(&self, index: u32, material: Option<&BMMaterial<'_>>) -> Result<()> {
        let id = dispatch::link_id(self.handle(), material)?;
        check(
            unsafe { (self.vtable().bmmesh_set_material_slot)(self.handle().as_ptr(), self.id(), index, id) },
            symbols::bmmesh_set_material_slot,
        )
    }

    /// Every slot in order, `None` for empty ones
    pub fn material_slots(&self) -> impl Iterator<Item = Result<Option<BMMaterial<'f>>>> + 'f {
        ObjectIter::material_slots(self.handle(), self.id())
            .map(|slot| slot.map(|material| material.is_valid().then_some(material)))
    }

    fn expect_len(&self, what: &'static str, expected: u32, supplied: usize) -> Result<()> {
        if expected as usize != supplied {
            return Err(BMapError::LengthMismatch {
                what,
                expected: expected as usize,
                supplied,
            });
        }
        Ok(())
    }
}
