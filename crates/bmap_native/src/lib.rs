//! # bmap_native - Reference BMap engine
//!
//! An in-process implementation of every BMap entry point. It is built both
//! as a `cdylib`, loadable like any other BMap library, and as an `rlib` that
//! callers can link directly through [`vtable`].
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌─────────────────┐
//! │   C entry       │────▶│     Engine      │
//! │   points        │     │ (registry, lock)│
//! └─────────────────┘     └────────┬────────┘
//!                                  │
//!                  ┌───────────────┴───────────────┐
//!                  ▼                               ▼
//!         ┌─────────────────┐             ┌─────────────────┐
//!         │     BMFile      │◀── Parse ───│ MeshTransition  │
//!         │ (objects, I/O)  │             │ (staging)       │
//!         └─────────────────┘             └─────────────────┘
//! ```
//!
//! Containers persist as a versioned bincode snapshot of their objects. The
//! engine is reference counted: every `BMInit` must be paired with a
//! `BMDispose`, and the last one frees whatever is still open.

mod engine;
mod error;
mod exports;
mod file;
mod mesh_trans;
mod object;

pub use error::{NativeError, Result};
pub use exports::*;
pub use file::{BMFile, FileMode, FileSettings};
pub use mesh_trans::MeshTransition;
pub use object::ObjectKind;

use bmap_ffi::BMapVTable;

/// Entry point table pointing at this crate's exports
pub fn vtable() -> BMapVTable {
    BMapVTable {
        bm_init: BMInit,
        bm_dispose: BMDispose,
        bmfile_load: BMFile_Load,
        bmfile_create: BMFile_Create,
        bmfile_save: BMFile_Save,
        bmfile_free: BMFile_Free,
        bmfile_get_group_count: BMFile_GetGroupCount,
        bmfile_get_group: BMFile_GetGroup,
        bmfile_create_group: BMFile_CreateGroup,
        bmfile_get_3dobject_count: BMFile_Get3dObjectCount,
        bmfile_get_3dobject: BMFile_Get3dObject,
        bmfile_create_3dobject: BMFile_Create3dObject,
        bmfile_get_mesh_count: BMFile_GetMeshCount,
        bmfile_get_mesh: BMFile_GetMesh,
        bmfile_create_mesh: BMFile_CreateMesh,
        bmfile_get_material_count: BMFile_GetMaterialCount,
        bmfile_get_material: BMFile_GetMaterial,
        bmfile_create_material: BMFile_CreateMaterial,
        bmfile_get_texture_count: BMFile_GetTextureCount,
        bmfile_get_texture: BMFile_GetTexture,
        bmfile_create_texture: BMFile_CreateTexture,
        bmfile_get_target_light_count: BMFile_GetTargetLightCount,
        bmfile_get_target_light: BMFile_GetTargetLight,
        bmfile_create_target_light: BMFile_CreateTargetLight,
        bmmesh_trans_new: BMMeshTrans_New,
        bmmesh_trans_delete: BMMeshTrans_Delete,
        bmmesh_trans_prepare_vertex_count: BMMeshTrans_PrepareVertexCount,
        bmmesh_trans_prepare_vertex: BMMeshTrans_PrepareVertex,
        bmmesh_trans_prepare_normal_count: BMMeshTrans_PrepareNormalCount,
        bmmesh_trans_prepare_normal: BMMeshTrans_PrepareNormal,
        bmmesh_trans_prepare_uv_count: BMMeshTrans_PrepareUVCount,
        bmmesh_trans_prepare_uv: BMMeshTrans_PrepareUV,
        bmmesh_trans_prepare_mtl_slot_count: BMMeshTrans_PrepareMtlSlotCount,
        bmmesh_trans_prepare_mtl_slot: BMMeshTrans_PrepareMtlSlot,
        bmmesh_trans_prepare_face_count: BMMeshTrans_PrepareFaceCount,
        bmmesh_trans_prepare_face_vertex_indices: BMMeshTrans_PrepareFaceVertexIndices,
        bmmesh_trans_prepare_face_normal_indices: BMMeshTrans_PrepareFaceNormalIndices,
        bmmesh_trans_prepare_face_uv_indices: BMMeshTrans_PrepareFaceUVIndices,
        bmmesh_trans_prepare_face_mtl_slot: BMMeshTrans_PrepareFaceMtlSlot,
        bmmesh_trans_parse: BMMeshTrans_Parse,
        bmobject_get_name: BMObject_GetName,
        bmobject_set_name: BMObject_SetName,
        bmgroup_add_object: BMGroup_AddObject,
        bmgroup_get_object_count: BMGroup_GetObjectCount,
        bmgroup_get_object: BMGroup_GetObject,
        bmtexture_get_file_name: BMTexture_GetFileName,
        bmtexture_load_image: BMTexture_LoadImage,
        bmtexture_save_image: BMTexture_SaveImage,
        bmtexture_get_save_options: BMTexture_GetSaveOptions,
        bmtexture_set_save_options: BMTexture_SetSaveOptions,
        bmtexture_get_video_format: BMTexture_GetVideoFormat,
        bmtexture_set_video_format: BMTexture_SetVideoFormat,
        bmmaterial_get_diffuse: BMMaterial_GetDiffuse,
        bmmaterial_set_diffuse: BMMaterial_SetDiffuse,
        bmmaterial_get_ambient: BMMaterial_GetAmbient,
        bmmaterial_set_ambient: BMMaterial_SetAmbient,
        bmmaterial_get_specular: BMMaterial_GetSpecular,
        bmmaterial_set_specular: BMMaterial_SetSpecular,
        bmmaterial_get_emissive: BMMaterial_GetEmissive,
        bmmaterial_set_emissive: BMMaterial_SetEmissive,
        bmmaterial_get_specular_power: BMMaterial_GetSpecularPower,
        bmmaterial_set_specular_power: BMMaterial_SetSpecularPower,
        bmmaterial_get_texture: BMMaterial_GetTexture,
        bmmaterial_set_texture: BMMaterial_SetTexture,
        bmmaterial_get_texture_border_color: BMMaterial_GetTextureBorderColor,
        bmmaterial_set_texture_border_color: BMMaterial_SetTextureBorderColor,
        bmmaterial_get_texture_blend_mode: BMMaterial_GetTextureBlendMode,
        bmmaterial_set_texture_blend_mode: BMMaterial_SetTextureBlendMode,
        bmmaterial_get_texture_min_mode: BMMaterial_GetTextureMinMode,
        bmmaterial_set_texture_min_mode: BMMaterial_SetTextureMinMode,
        bmmaterial_get_texture_mag_mode: BMMaterial_GetTextureMagMode,
        bmmaterial_set_texture_mag_mode: BMMaterial_SetTextureMagMode,
        bmmaterial_get_texture_address_mode: BMMaterial_GetTextureAddressMode,
        bmmaterial_set_texture_address_mode: BMMaterial_SetTextureAddressMode,
        bmmaterial_get_source_blend: BMMaterial_GetSourceBlend,
        bmmaterial_set_source_blend: BMMaterial_SetSourceBlend,
        bmmaterial_get_dest_blend: BMMaterial_GetDestBlend,
        bmmaterial_set_dest_blend: BMMaterial_SetDestBlend,
        bmmaterial_get_fill_mode: BMMaterial_GetFillMode,
        bmmaterial_set_fill_mode: BMMaterial_SetFillMode,
        bmmaterial_get_shade_mode: BMMaterial_GetShadeMode,
        bmmaterial_set_shade_mode: BMMaterial_SetShadeMode,
        bmmaterial_get_alpha_test_enabled: BMMaterial_GetAlphaTestEnabled,
        bmmaterial_set_alpha_test_enabled: BMMaterial_SetAlphaTestEnabled,
        bmmaterial_get_alpha_blend_enabled: BMMaterial_GetAlphaBlendEnabled,
        bmmaterial_set_alpha_blend_enabled: BMMaterial_SetAlphaBlendEnabled,
        bmmaterial_get_perspective_correction_enabled: BMMaterial_GetPerspectiveCorrectionEnabled,
        bmmaterial_set_perspective_correction_enabled: BMMaterial_SetPerspectiveCorrectionEnabled,
        bmmaterial_get_zwrite_enabled: BMMaterial_GetZWriteEnabled,
        bmmaterial_set_zwrite_enabled: BMMaterial_SetZWriteEnabled,
        bmmaterial_get_two_sided_enabled: BMMaterial_GetTwoSidedEnabled,
        bmmaterial_set_two_sided_enabled: BMMaterial_SetTwoSidedEnabled,
        bmmaterial_get_alpha_ref: BMMaterial_GetAlphaRef,
        bmmaterial_set_alpha_ref: BMMaterial_SetAlphaRef,
        bmmaterial_get_alpha_func: BMMaterial_GetAlphaFunc,
        bmmaterial_set_alpha_func: BMMaterial_SetAlphaFunc,
        bmmaterial_get_zfunc: BMMaterial_GetZFunc,
        bmmaterial_set_zfunc: BMMaterial_SetZFunc,
        bmmesh_get_lit_mode: BMMesh_GetLitMode,
        bmmesh_set_lit_mode: BMMesh_SetLitMode,
        bmmesh_get_vertex_count: BMMesh_GetVertexCount,
        bmmesh_set_vertex_count: BMMesh_SetVertexCount,
        bmmesh_get_vertex_positions: BMMesh_GetVertexPositions,
        bmmesh_get_vertex_normals: BMMesh_GetVertexNormals,
        bmmesh_get_vertex_uvs: BMMesh_GetVertexUVs,
        bmmesh_get_face_count: BMMesh_GetFaceCount,
        bmmesh_set_face_count: BMMesh_SetFaceCount,
        bmmesh_get_face_indices: BMMesh_GetFaceIndices,
        bmmesh_get_face_material_slot_indexs: BMMesh_GetFaceMaterialSlotIndexs,
        bmmesh_get_material_slot_count: BMMesh_GetMaterialSlotCount,
        bmmesh_set_material_slot_count: BMMesh_SetMaterialSlotCount,
        bmmesh_get_material_slot: BMMesh_GetMaterialSlot,
        bmmesh_set_material_slot: BMMesh_SetMaterialSlot,
        bm3dentity_get_world_matrix: BM3dEntity_GetWorldMatrix,
        bm3dentity_set_world_matrix: BM3dEntity_SetWorldMatrix,
        bm3dentity_get_current_mesh: BM3dEntity_GetCurrentMesh,
        bm3dentity_set_current_mesh: BM3dEntity_SetCurrentMesh,
        bm3dentity_get_visibility: BM3dEntity_GetVisibility,
        bm3dentity_set_visibility: BM3dEntity_SetVisibility,
        bmlight_get_type: BMLight_GetType,
        bmlight_set_type: BMLight_SetType,
        bmlight_get_color: BMLight_GetColor,
        bmlight_set_color: BMLight_SetColor,
        bmlight_get_constant_attenuation: BMLight_GetConstantAttenuation,
        bmlight_set_constant_attenuation: BMLight_SetConstantAttenuation,
        bmlight_get_linear_attenuation: BMLight_GetLinearAttenuation,
        bmlight_set_linear_attenuation: BMLight_SetLinearAttenuation,
        bmlight_get_quadratic_attenuation: BMLight_GetQuadraticAttenuation,
        bmlight_set_quadratic_attenuation: BMLight_SetQuadraticAttenuation,
        bmlight_get_range: BMLight_GetRange,
        bmlight_set_range: BMLight_SetRange,
        bmlight_get_hot_spot: BMLight_GetHotSpot,
        bmlight_set_hot_spot: BMLight_SetHotSpot,
        bmlight_get_falloff: BMLight_GetFalloff,
        bmlight_set_falloff: BMLight_SetFalloff,
        bmlight_get_falloff_shape: BMLight_GetFalloffShape,
        bmlight_set_falloff_shape: BMLight_SetFalloffShape,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vtable_drives_engine() {
        let table = vtable();
        unsafe {
            assert!((table.bm_init)());

            let mut trans = std::ptr::null_mut();
            assert!((table.bmmesh_trans_new)(&mut trans));
            assert!(!trans.is_null());
            assert!((table.bmmesh_trans_prepare_vertex_count)(trans, 3));
            assert!((table.bmmesh_trans_delete)(trans));
            assert!(!(table.bmmesh_trans_delete)(trans));

            assert!((table.bm_dispose)());
        }
    }

    #[test]
    fn test_unknown_container_rejected() {
        let table = vtable();
        unsafe {
            assert!((table.bm_init)());
            let mut count = 0;
            let bogus = 0x10 as bmap_ffi::BMFilePtr;
            assert!(!(table.bmfile_get_mesh_count)(bogus, &mut count));
            assert!(!(table.bmfile_free)(std::ptr::null_mut()));
            assert!((table.bm_dispose)());
        }
    }
}
