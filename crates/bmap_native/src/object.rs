//! Object model held by a native container
//!
//! Every object is a name plus a kind specific body. Bodies are plain serde
//! structs so a whole container can be snapshotted with bincode.

use crate::error::{NativeError, Result};
use bmap_ffi::*;
use serde::{Deserialize, Serialize};

/// Kinds of object a container can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Group,
    Object3d,
    Mesh,
    Material,
    Texture,
    TargetLight,
}

impl ObjectKind {
    /// Every kind, in the order per-kind lists are stored
    pub const ALL: [ObjectKind; 6] = [
        ObjectKind::Group,
        ObjectKind::Object3d,
        ObjectKind::Mesh,
        ObjectKind::Material,
        ObjectKind::Texture,
        ObjectKind::TargetLight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ObjectKind::Group => "group",
            ObjectKind::Object3d => "3d object",
            ObjectKind::Mesh => "mesh",
            ObjectKind::Material => "material",
            ObjectKind::Texture => "texture",
            ObjectKind::TargetLight => "target light",
        }
    }

    /// Position of this kind's list in `ALL`
    pub fn slot(self) -> usize {
        self as usize
    }

    /// Whether objects of this kind carry 3D entity data
    pub fn is_entity(self) -> bool {
        matches!(self, ObjectKind::Object3d | ObjectKind::TargetLight)
    }
}

// ============================================================================
// Bodies
// ============================================================================

/// Texture data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextureData {
    /// File the bitmap was loaded from, without directories
    pub file_name: Option<String>,
    /// Raw bytes of the bitmap file
    pub image: Option<Vec<u8>>,
    pub save_options: CkTextureSaveOptions,
    pub video_format: VxPixelFormat,
}

impl Default for TextureData {
    fn default() -> Self {
        Self {
            file_name: None,
            image: None,
            save_options: CkTextureSaveOptions::UseGlobal,
            video_format: VxPixelFormat::Argb8888_32,
        }
    }
}

/// Material data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialData {
    pub diffuse: VxColor,
    pub ambient: VxColor,
    pub specular: VxColor,
    pub emissive: VxColor,
    pub specular_power: f32,
    pub texture: CkId,
    pub texture_border_color: u32,
    pub texture_blend_mode: VxTextureBlendMode,
    pub texture_min_mode: VxTextureFilterMode,
    pub texture_mag_mode: VxTextureFilterMode,
    pub texture_address_mode: VxTextureAddressMode,
    pub source_blend: VxBlendMode,
    pub dest_blend: VxBlendMode,
    pub fill_mode: VxFillMode,
    pub shade_mode: VxShadeMode,
    pub alpha_test_enabled: bool,
    pub alpha_blend_enabled: bool,
    pub perspective_correction_enabled: bool,
    pub zwrite_enabled: bool,
    pub two_sided_enabled: bool,
    pub alpha_ref: u8,
    pub alpha_func: VxCmpFunc,
    pub zfunc: VxCmpFunc,
}

impl Default for MaterialData {
    fn default() -> Self {
        Self {
            diffuse: VxColor::rgb(0.7, 0.7, 0.7),
            ambient: VxColor::rgb(0.3, 0.3, 0.3),
            specular: VxColor::rgb(0.5, 0.5, 0.5),
            emissive: VxColor::rgb(0.0, 0.0, 0.0),
            specular_power: 0.0,
            texture: INVALID_CKID,
            texture_border_color: 0,
            texture_blend_mode: VxTextureBlendMode::ModulateAlpha,
            texture_min_mode: VxTextureFilterMode::Linear,
            texture_mag_mode: VxTextureFilterMode::Linear,
            texture_address_mode: VxTextureAddressMode::Wrap,
            source_blend: VxBlendMode::One,
            dest_blend: VxBlendMode::Zero,
            fill_mode: VxFillMode::Solid,
            shade_mode: VxShadeMode::Gouraud,
            alpha_test_enabled: false,
            alpha_blend_enabled: false,
            perspective_correction_enabled: true,
            zwrite_enabled: true,
            two_sided_enabled: false,
            alpha_ref: 0,
            alpha_func: VxCmpFunc::Always,
            zfunc: VxCmpFunc::LessEqual,
        }
    }
}

/// Mesh data
///
/// The three vertex channels always have the same length, and so do the two
/// face channels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshData {
    pub lit_mode: VxMeshLitMode,
    pub positions: Vec<VxVector3>,
    pub normals: Vec<VxVector3>,
    pub uvs: Vec<VxVector2>,
    pub faces: Vec<CKShortFaceIndices>,
    pub face_material_slots: Vec<u16>,
    pub material_slots: Vec<CkId>,
}

impl Default for MeshData {
    fn default() -> Self {
        Self {
            lit_mode: VxMeshLitMode::Lit,
            positions: Vec::new(),
            normals: Vec::new(),
            uvs: Vec::new(),
            faces: Vec::new(),
            face_material_slots: Vec::new(),
            material_slots: Vec::new(),
        }
    }
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Resize all three vertex channels, nothing changes when allocation fails
    pub fn set_vertex_count(&mut self, count: usize) -> Result<()> {
        reserve_for(&mut self.positions, count, "vertex position")?;
        reserve_for(&mut self.normals, count, "vertex normal")?;
        reserve_for(&mut self.uvs, count, "vertex uv")?;
        self.positions.resize(count, VxVector3::ZERO);
        self.normals.resize(count, VxVector3::ZERO);
        self.uvs.resize(count, VxVector2::ZERO);
        Ok(())
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn set_face_count(&mut self, count: usize) -> Result<()> {
        reserve_for(&mut self.faces, count, "face")?;
        reserve_for(&mut self.face_material_slots, count, "face material slot")?;
        self.faces.resize(count, CKShortFaceIndices::default());
        self.face_material_slots.resize(count, 0);
        Ok(())
    }

    pub fn material_slot_count(&self) -> usize {
        self.material_slots.len()
    }

    pub fn set_material_slot_count(&mut self, count: usize) -> Result<()> {
        reserve_for(&mut self.material_slots, count, "material slot")?;
        self.material_slots.resize(count, INVALID_CKID);
        Ok(())
    }

    /// Check that the channels agree and every index is in range
    ///
    /// Slot index 0 is accepted on a mesh without material slots.
    pub fn validate(&self) -> Result<()> {
        let vertices = self.positions.len();
        if self.normals.len() != vertices || self.uvs.len() != vertices {
            return Err(NativeError::InconsistentMesh(format!(
                "{} positions, {} normals and {} uvs",
                vertices,
                self.normals.len(),
                self.uvs.len()
            )));
        }
        if self.face_material_slots.len() != self.faces.len() {
            return Err(NativeError::InconsistentMesh(format!(
                "{} faces but {} face material slots",
                self.faces.len(),
                self.face_material_slots.len()
            )));
        }

        for (face, indices) in self.faces.iter().enumerate() {
            for index in [indices.i1, indices.i2, indices.i3] {
                if index as usize >= vertices {
                    return Err(NativeError::InconsistentMesh(format!(
                        "face {} uses vertex {} of {}",
                        face, index, vertices
                    )));
                }
            }
        }

        let slots = self.material_slots.len().max(1);
        if let Some((face, slot)) = self
            .face_material_slots
            .iter()
            .enumerate()
            .find(|(_, slot)| **slot as usize >= slots)
        {
            return Err(NativeError::InconsistentMesh(format!(
                "face {} uses material slot {} of {}",
                face,
                slot,
                self.material_slots.len()
            )));
        }
        Ok(())
    }
}

/// Make room for `count` elements without aborting when memory runs out
pub fn reserve_for<T>(data: &mut Vec<T>, count: usize, what: &'static str) -> Result<()> {
    if count > data.len() {
        data.try_reserve_exact(count - data.len())
            .map_err(|_| NativeError::AllocationFailed { what, count })?;
    }
    Ok(())
}

/// Data shared by everything placed in the 3D world
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityData {
    pub world_matrix: VxMatrix,
    pub current_mesh: CkId,
    pub visibility: bool,
}

impl Default for EntityData {
    fn default() -> Self {
        Self {
            world_matrix: VxMatrix::IDENTITY,
            current_mesh: INVALID_CKID,
            visibility: true,
        }
    }
}

/// Target light data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightData {
    pub entity: EntityData,
    pub light_type: VxLightType,
    pub color: VxColor,
    pub constant_attenuation: f32,
    pub linear_attenuation: f32,
    pub quadratic_attenuation: f32,
    pub range: f32,
    pub hot_spot: f32,
    pub falloff: f32,
    pub falloff_shape: f32,
}

impl Default for LightData {
    fn default() -> Self {
        Self {
            entity: EntityData::default(),
            light_type: VxLightType::Point,
            color: VxColor::WHITE,
            constant_attenuation: 1.0,
            linear_attenuation: 0.0,
            quadratic_attenuation: 0.0,
            range: 5000.0,
            // 40 and 45 degrees
            hot_spot: 0.698_131_7,
            falloff: 0.785_398_2,
            falloff_shape: 1.0,
        }
    }
}

/// Group data
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupData {
    pub members: Vec<CkId>,
}

/// Kind specific part of an object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ObjectBody {
    Group(GroupData),
    Object3d(EntityData),
    Mesh(MeshData),
    Material(MaterialData),
    Texture(TextureData),
    TargetLight(LightData),
}

impl ObjectBody {
    /// Default body for a freshly created object
    pub fn new(kind: ObjectKind) -> Self {
        match kind {
            ObjectKind::Group => ObjectBody::Group(GroupData::default()),
            ObjectKind::Object3d => ObjectBody::Object3d(EntityData::default()),
            ObjectKind::Mesh => ObjectBody::Mesh(MeshData::default()),
            ObjectKind::Material => ObjectBody::Material(MaterialData::default()),
            ObjectKind::Texture => ObjectBody::Texture(TextureData::default()),
            ObjectKind::TargetLight => ObjectBody::TargetLight(LightData::default()),
        }
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            ObjectBody::Group(_) => ObjectKind::Group,
            ObjectBody::Object3d(_) => ObjectKind::Object3d,
            ObjectBody::Mesh(_) => ObjectKind::Mesh,
            ObjectBody::Material(_) => ObjectKind::Material,
            ObjectBody::Texture(_) => ObjectKind::Texture,
            ObjectBody::TargetLight(_) => ObjectKind::TargetLight,
        }
    }
}

/// One object of a container
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectData {
    pub name: Option<String>,
    pub body: ObjectBody,
}

impl ObjectData {
    pub fn new(kind: ObjectKind) -> Self {
        Self {
            name: None,
            body: ObjectBody::new(kind),
        }
    }

    pub fn kind(&self) -> ObjectKind {
        self.body.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_body_matches_kind() {
        for kind in ObjectKind::ALL {
            assert_eq!(ObjectData::new(kind).kind(), kind);
            assert_eq!(ObjectKind::ALL[kind.slot()], kind);
        }
    }

    #[test]
    fn test_mesh_channels_resize_together() {
        let mut mesh = MeshData::default();
        mesh.set_vertex_count(4).unwrap();
        assert_eq!(mesh.normals.len(), 4);
        assert_eq!(mesh.uvs.len(), 4);

        mesh.set_face_count(2).unwrap();
        assert_eq!(mesh.face_material_slots.len(), 2);

        mesh.set_vertex_count(1).unwrap();
        assert_eq!(mesh.vertex_count(), 1);
        mesh.validate().unwrap();
    }

    #[test]
    fn test_unallocatable_count_is_an_error() {
        let mut mesh = MeshData::default();
        mesh.set_vertex_count(2).unwrap();

        assert!(matches!(
            mesh.set_vertex_count(usize::MAX),
            Err(NativeError::AllocationFailed { what: "vertex position", .. })
        ));
        assert!(mesh.set_face_count(usize::MAX).is_err());
        assert!(mesh.set_material_slot_count(usize::MAX).is_err());
        assert_eq!(mesh.vertex_count(), 2);
        assert_eq!(mesh.face_count(), 0);
    }

    #[test]
    fn test_validate_catches_disagreeing_channels() {
        let mut mesh = MeshData::default();
        mesh.set_vertex_count(4).unwrap();
        mesh.normals.clear();
        assert!(matches!(mesh.validate(), Err(NativeError::InconsistentMesh(_))));

        let mut mesh = MeshData::default();
        mesh.set_vertex_count(3).unwrap();
        mesh.faces.push(CKShortFaceIndices::new(0, 1, 2));
        assert!(mesh.validate().is_err());
        mesh.face_material_slots.push(0);
        mesh.validate().unwrap();

        mesh.faces[0] = CKShortFaceIndices::new(0, 9, 400);
        assert!(mesh.validate().is_err());

        mesh.faces[0] = CKShortFaceIndices::new(0, 1, 2);
        mesh.face_material_slots[0] = 1;
        assert!(mesh.validate().is_err());
        mesh.material_slots = vec![INVALID_CKID, INVALID_CKID];
        mesh.validate().unwrap();
    }

    #[test]
    fn test_entity_kinds() {
        assert!(ObjectKind::Object3d.is_entity());
        assert!(ObjectKind::TargetLight.is_entity());
        assert!(!ObjectKind::Mesh.is_entity());
    }
}
