//! Geometry staging sessions
//!
//! A session owns one scratch buffer per channel. Declaring a channel's count
//! reallocates that buffer, after which the caller fills it through the
//! pointer returned by `memory`. `parse` turns the staged, per-corner indexed
//! geometry into a committed mesh: every distinct (position, normal, uv)
//! corner becomes one mesh vertex and indices shrink to 16 bits.

use crate::error::{NativeError, Result};
use crate::object::{reserve_for, MeshData};
use bmap_ffi::{CKFaceIndices, CKShortFaceIndices, CkId, VxVector2, VxVector3};
use bytemuck::Zeroable;
use std::collections::BTreeMap;

/// Scratch buffer for one channel, `None` until its count is declared
#[derive(Debug)]
struct Channel<T> {
    name: &'static str,
    data: Option<Vec<T>>,
}

impl<T: Zeroable + Clone> Channel<T> {
    fn new(name: &'static str) -> Self {
        Self { name, data: None }
    }

    /// Reallocate for `count` zeroed elements, the channel is undeclared if that fails
    fn declare(&mut self, count: u32) -> Result<()> {
        self.data = None;
        let mut data = Vec::new();
        reserve_for(&mut data, count as usize, self.name)?;
        data.resize(count as usize, T::zeroed());
        self.data = Some(data);
        Ok(())
    }

    fn memory(&mut self) -> Result<*mut T> {
        self.data
            .as_mut()
            .map(|data| data.as_mut_ptr())
            .ok_or(NativeError::ChannelNotReady(self.name))
    }

    fn staged(&self) -> Result<&[T]> {
        self.data.as_deref().ok_or(NativeError::ChannelNotReady(self.name))
    }

    fn reset(&mut self) {
        self.data = None;
    }
}

/// Bit pattern of one committed corner, equal corners merge
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct CornerKey([u32; 8]);

impl CornerKey {
    fn new(position: VxVector3, normal: VxVector3, uv: VxVector2) -> Self {
        Self([
            position.x.to_bits(),
            position.y.to_bits(),
            position.z.to_bits(),
            normal.x.to_bits(),
            normal.y.to_bits(),
            normal.z.to_bits(),
            uv.x.to_bits(),
            uv.y.to_bits(),
        ])
    }
}

/// A staging session
#[derive(Debug)]
pub struct MeshTransition {
    vertices: Channel<VxVector3>,
    normals: Channel<VxVector3>,
    uvs: Channel<VxVector2>,
    material_slots: Channel<CkId>,
    face_vertex_indices: Channel<CKFaceIndices>,
    face_normal_indices: Channel<CKFaceIndices>,
    face_uv_indices: Channel<CKFaceIndices>,
    face_material_slots: Channel<u32>,
}

impl Default for MeshTransition {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshTransition {
    pub fn new() -> Self {
        Self {
            vertices: Channel::new("vertex"),
            normals: Channel::new("normal"),
            uvs: Channel::new("uv"),
            material_slots: Channel::new("material slot"),
            face_vertex_indices: Channel::new("face vertex indices"),
            face_normal_indices: Channel::new("face normal indices"),
            face_uv_indices: Channel::new("face uv indices"),
            face_material_slots: Channel::new("face material slot"),
        }
    }

    pub fn prepare_vertex_count(&mut self, count: u32) -> Result<()> {
        self.vertices.declare(count)
    }

    pub fn vertex_memory(&mut self) -> Result<*mut VxVector3> {
        self.vertices.memory()
    }

    pub fn prepare_normal_count(&mut self, count: u32) -> Result<()> {
        self.normals.declare(count)
    }

    pub fn normal_memory(&mut self) -> Result<*mut VxVector3> {
        self.normals.memory()
    }

    pub fn prepare_uv_count(&mut self, count: u32) -> Result<()> {
        self.uvs.declare(count)
    }

    pub fn uv_memory(&mut self) -> Result<*mut VxVector2> {
        self.uvs.memory()
    }

    pub fn prepare_material_slot_count(&mut self, count: u32) -> Result<()> {
        self.material_slots.declare(count)
    }

    pub fn material_slot_memory(&mut self) -> Result<*mut CkId> {
        self.material_slots.memory()
    }

    /// Declare the face count, shared by all four face channels
    pub fn prepare_face_count(&mut self, count: u32) -> Result<()> {
        self.face_vertex_indices.declare(count)?;
        self.face_normal_indices.declare(count)?;
        self.face_uv_indices.declare(count)?;
        self.face_material_slots.declare(count)
    }

    pub fn face_vertex_indices_memory(&mut self) -> Result<*mut CKFaceIndices> {
        self.face_vertex_indices.memory()
    }

    pub fn face_normal_indices_memory(&mut self) -> Result<*mut CKFaceIndices> {
        self.face_normal_indices.memory()
    }

    pub fn face_uv_indices_memory(&mut self) -> Result<*mut CKFaceIndices> {
        self.face_uv_indices.memory()
    }

    pub fn face_material_slot_memory(&mut self) -> Result<*mut u32> {
        self.face_material_slots.memory()
    }

    /// Material identities staged for the slot table
    pub fn staged_material_slots(&self) -> Result<&[CkId]> {
        self.material_slots.staged()
    }

    /// Build the committed geometry without touching any mesh
    pub fn build(&self) -> Result<MeshData> {
        let vertices = self.vertices.staged()?;
        let normals = self.normals.staged()?;
        let uvs = self.uvs.staged()?;
        let material_slots = self.material_slots.staged()?;
        let face_vertices = self.face_vertex_indices.staged()?;
        let face_normals = self.face_normal_indices.staged()?;
        let face_uvs = self.face_uv_indices.staged()?;
        let face_slots = self.face_material_slots.staged()?;

        if material_slots.len() > u16::MAX as usize {
            return Err(NativeError::TooLarge {
                what: "material slot",
                count: material_slots.len(),
            });
        }

        let mut mesh = MeshData {
            material_slots: material_slots.to_vec(),
            ..MeshData::default()
        };
        let mut corners: BTreeMap<CornerKey, u16> = BTreeMap::new();

        for face in 0..face_vertices.len() {
            let v = corner_indices(face_vertices[face]);
            let n = corner_indices(face_normals[face]);
            let t = corner_indices(face_uvs[face]);

            let mut committed = [0u16; 3];
            for corner in 0..3 {
                let position = *lookup(vertices, v[corner], "vertex")?;
                let normal = *lookup(normals, n[corner], "normal")?;
                let uv = *lookup(uvs, t[corner], "uv")?;

                let key = CornerKey::new(position, normal, uv);
                committed[corner] = match corners.get(&key) {
                    Some(index) => *index,
                    None => {
                        let index = mesh.positions.len();
                        if index >= u16::MAX as usize {
                            return Err(NativeError::TooLarge {
                                what: "vertex",
                                count: index + 1,
                            });
                        }
                        mesh.positions.push(position);
                        mesh.normals.push(normal);
                        mesh.uvs.push(uv);
                        corners.insert(key, index as u16);
                        index as u16
                    }
                };
            }

            // A mesh without material slots still tags every face with slot 0
            let slot = face_slots[face];
            if slot as usize >= material_slots.len().max(1) {
                return Err(NativeError::out_of_range("material slot", slot, material_slots.len()));
            }

            mesh.faces
                .push(CKShortFaceIndices::new(committed[0], committed[1], committed[2]));
            mesh.face_material_slots.push(slot as u16);
        }

        Ok(mesh)
    }

    /// Commit into `target`, keeping its lit mode
    ///
    /// Nothing is written when the staged data is invalid. On success every
    /// channel goes back to undeclared.
    pub fn parse_into(&mut self, target: &mut MeshData) -> Result<()> {
        let mut built = self.build()?;
        built.lit_mode = target.lit_mode;

        log::debug!(
            "Committed mesh with {} vertices, {} faces and {} material slots",
            built.vertex_count(),
            built.face_count(),
            built.material_slots.len()
        );

        *target = built;
        self.reset();
        Ok(())
    }

    fn reset(&mut self) {
        self.vertices.reset();
        self.normals.reset();
        self.uvs.reset();
        self.material_slots.reset();
        self.face_vertex_indices.reset();
        self.face_normal_indices.reset();
        self.face_uv_indices.reset();
        self.face_material_slots.reset();
    }
}

fn corner_indices(face: CKFaceIndices) -> [u32; 3] {
    [face.i1, face.i2, face.i3]
}

fn lookup<'a, T>(data: &'a [T], index: u32, what: &'static str) -> Result<&'a T> {
    data.get(index as usize)
        .ok_or_else(|| NativeError::out_of_range(what, index, data.len()))
}
