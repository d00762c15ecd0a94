//! Entry point table
//!
//! Every BMap entry point returns `true` on success and delivers results
//! through out-pointers. When it returns `false` nothing was written.
//! Enumerations cross as `u32`, see [`crate::types::FfiEnum`].

use crate::types::*;
use std::ffi::c_void;

macro_rules! bmap_api {
    (
        $(
            $(#[$meta:meta])*
            $field:ident => $symbol:ident ( $($arg:ident : $ty:ty),* $(,)? );
        )+
    ) => {
        /// Resolved BMap entry points
        #[derive(Clone, Copy)]
        pub struct BMapVTable {
            $(
                $(#[$meta])*
                pub $field: unsafe extern "C" fn($($arg: $ty),*) -> bool,
            )+
        }

        /// Exported symbol name of every table entry, by field name
        #[allow(non_upper_case_globals)]
        pub mod symbols {
            $(pub const $field: &str = stringify!($symbol);)+
        }

        impl BMapVTable {
            /// Exported symbol names, in table order
            pub const SYMBOLS: &'static [&'static str] = &[$(stringify!($symbol)),+];

            /// Build the table by looking every symbol up through `resolve`
            ///
            /// Fails with the name of the first symbol that resolves to
            /// nothing or to a null address.
            ///
            /// # Safety
            /// Every address returned by `resolve` must be a function with the
            /// signature declared for that symbol.
            pub unsafe fn resolve_with<F>(mut resolve: F) -> Result<Self, &'static str>
            where
                F: FnMut(&'static str) -> Option<*const c_void>,
            {
                Ok(Self {
                    $(
                        $field: {
                            let symbol = stringify!($symbol);
                            let address = resolve(symbol)
                                .filter(|address| !address.is_null())
                                .ok_or(symbol)?;
                            std::mem::transmute::<*const c_void, unsafe extern "C" fn($($ty),*) -> bool>(address)
                        },
                    )+
                })
            }
        }
    };
}

bmap_api! {
    // ========================================================================
    // Global lifecycle
    // ========================================================================

    bm_init => BMInit();
    bm_dispose => BMDispose();

    // ========================================================================
    // Containers
    // ========================================================================

    /// Open a persisted container for reading
    bmfile_load => BMFile_Load(
        file_name: RawText,
        temp_folder: RawText,
        texture_folder: RawText,
        raw_callback: Option<OutputCallback>,
        encoding_count: u32,
        encodings: RawTextArray,
        out_file: *mut BMFilePtr,
    );
    /// Create an empty container for writing
    bmfile_create => BMFile_Create(
        temp_folder: RawText,
        texture_folder: RawText,
        raw_callback: Option<OutputCallback>,
        encoding_count: u32,
        encodings: RawTextArray,
        out_file: *mut BMFilePtr,
    );
    bmfile_save => BMFile_Save(
        map_file: BMFilePtr,
        file_name: RawText,
        texture_save_opt: u32,
        use_compress: bool,
        compress_level: i32,
    );
    bmfile_free => BMFile_Free(map_file: BMFilePtr);

    bmfile_get_group_count => BMFile_GetGroupCount(bmfile: BMFilePtr, out_count: *mut u32);
    bmfile_get_group => BMFile_GetGroup(bmfile: BMFilePtr, idx: u32, out_id: *mut CkId);
    bmfile_create_group => BMFile_CreateGroup(bmfile: BMFilePtr, out_id: *mut CkId);
    bmfile_get_3dobject_count => BMFile_Get3dObjectCount(bmfile: BMFilePtr, out_count: *mut u32);
    bmfile_get_3dobject => BMFile_Get3dObject(bmfile: BMFilePtr, idx: u32, out_id: *mut CkId);
    bmfile_create_3dobject => BMFile_Create3dObject(bmfile: BMFilePtr, out_id: *mut CkId);
    bmfile_get_mesh_count => BMFile_GetMeshCount(bmfile: BMFilePtr, out_count: *mut u32);
    bmfile_get_mesh => BMFile_GetMesh(bmfile: BMFilePtr, idx: u32, out_id: *mut CkId);
    bmfile_create_mesh => BMFile_CreateMesh(bmfile: BMFilePtr, out_id: *mut CkId);
    bmfile_get_material_count => BMFile_GetMaterialCount(bmfile: BMFilePtr, out_count: *mut u32);
    bmfile_get_material => BMFile_GetMaterial(bmfile: BMFilePtr, idx: u32, out_id: *mut CkId);
    bmfile_create_material => BMFile_CreateMaterial(bmfile: BMFilePtr, out_id: *mut CkId);
    bmfile_get_texture_count => BMFile_GetTextureCount(bmfile: BMFilePtr, out_count: *mut u32);
    bmfile_get_texture => BMFile_GetTexture(bmfile: BMFilePtr, idx: u32, out_id: *mut CkId);
    bmfile_create_texture => BMFile_CreateTexture(bmfile: BMFilePtr, out_id: *mut CkId);
    bmfile_get_target_light_count => BMFile_GetTargetLightCount(bmfile: BMFilePtr, out_count: *mut u32);
    bmfile_get_target_light => BMFile_GetTargetLight(bmfile: BMFilePtr, idx: u32, out_id: *mut CkId);
    bmfile_create_target_light => BMFile_CreateTargetLight(bmfile: BMFilePtr, out_id: *mut CkId);

    // ========================================================================
    // Geometry staging
    // ========================================================================

    bmmesh_trans_new => BMMeshTrans_New(out_trans: *mut MeshTransPtr);
    bmmesh_trans_delete => BMMeshTrans_Delete(trans: MeshTransPtr);
    bmmesh_trans_prepare_vertex_count => BMMeshTrans_PrepareVertexCount(trans: MeshTransPtr, count: u32);
    bmmesh_trans_prepare_vertex => BMMeshTrans_PrepareVertex(trans: MeshTransPtr, out_mem: *mut *mut VxVector3);
    bmmesh_trans_prepare_normal_count => BMMeshTrans_PrepareNormalCount(trans: MeshTransPtr, count: u32);
    bmmesh_trans_prepare_normal => BMMeshTrans_PrepareNormal(trans: MeshTransPtr, out_mem: *mut *mut VxVector3);
    bmmesh_trans_prepare_uv_count => BMMeshTrans_PrepareUVCount(trans: MeshTransPtr, count: u32);
    bmmesh_trans_prepare_uv => BMMeshTrans_PrepareUV(trans: MeshTransPtr, out_mem: *mut *mut VxVector2);
    bmmesh_trans_prepare_mtl_slot_count => BMMeshTrans_PrepareMtlSlotCount(trans: MeshTransPtr, count: u32);
    bmmesh_trans_prepare_mtl_slot => BMMeshTrans_PrepareMtlSlot(trans: MeshTransPtr, out_mem: *mut *mut CkId);
    bmmesh_trans_prepare_face_count => BMMeshTrans_PrepareFaceCount(trans: MeshTransPtr, count: u32);
    bmmesh_trans_prepare_face_vertex_indices => BMMeshTrans_PrepareFaceVertexIndices(trans: MeshTransPtr, out_mem: *mut *mut CKFaceIndices);
    bmmesh_trans_prepare_face_normal_indices => BMMeshTrans_PrepareFaceNormalIndices(trans: MeshTransPtr, out_mem: *mut *mut CKFaceIndices);
    bmmesh_trans_prepare_face_uv_indices => BMMeshTrans_PrepareFaceUVIndices(trans: MeshTransPtr, out_mem: *mut *mut CKFaceIndices);
    bmmesh_trans_prepare_face_mtl_slot => BMMeshTrans_PrepareFaceMtlSlot(trans: MeshTransPtr, out_mem: *mut *mut u32);
    /// Commit the staged geometry into a mesh
    bmmesh_trans_parse => BMMeshTrans_Parse(trans: MeshTransPtr, bmfile: BMFilePtr, objid: CkId);

    // ========================================================================
    // Objects and groups
    // ========================================================================

    bmobject_get_name => BMObject_GetName(bmfile: BMFilePtr, objid: CkId, out_name: *mut RawText);
    bmobject_set_name => BMObject_SetName(bmfile: BMFilePtr, objid: CkId, name: RawText);

    bmgroup_add_object => BMGroup_AddObject(bmfile: BMFilePtr, objid: CkId, memberid: CkId);
    bmgroup_get_object_count => BMGroup_GetObjectCount(bmfile: BMFilePtr, objid: CkId, out_count: *mut u32);
    bmgroup_get_object => BMGroup_GetObject(bmfile: BMFilePtr, objid: CkId, pos: u32, out_id: *mut CkId);

    // ========================================================================
    // Textures
    // ========================================================================

    bmtexture_get_file_name => BMTexture_GetFileName(bmfile: BMFilePtr, objid: CkId, out_filename: *mut RawText);
    bmtexture_load_image => BMTexture_LoadImage(bmfile: BMFilePtr, objid: CkId, filename: RawText);
    bmtexture_save_image => BMTexture_SaveImage(bmfile: BMFilePtr, objid: CkId, filename: RawText);
    bmtexture_get_save_options => BMTexture_GetSaveOptions(bmfile: BMFilePtr, objid: CkId, out_saveopt: *mut u32);
    bmtexture_set_save_options => BMTexture_SetSaveOptions(bmfile: BMFilePtr, objid: CkId, saveopt: u32);
    bmtexture_get_video_format => BMTexture_GetVideoFormat(bmfile: BMFilePtr, objid: CkId, out_vfmt: *mut u32);
    bmtexture_set_video_format => BMTexture_SetVideoFormat(bmfile: BMFilePtr, objid: CkId, vfmt: u32);

    // ========================================================================
    // Materials
    // ========================================================================

    bmmaterial_get_diffuse => BMMaterial_GetDiffuse(bmfile: BMFilePtr, objid: CkId, out_val: *mut VxColor);
    bmmaterial_set_diffuse => BMMaterial_SetDiffuse(bmfile: BMFilePtr, objid: CkId, col: VxColor);
    bmmaterial_get_ambient => BMMaterial_GetAmbient(bmfile: BMFilePtr, objid: CkId, out_val: *mut VxColor);
    bmmaterial_set_ambient => BMMaterial_SetAmbient(bmfile: BMFilePtr, objid: CkId, col: VxColor);
    bmmaterial_get_specular => BMMaterial_GetSpecular(bmfile: BMFilePtr, objid: CkId, out_val: *mut VxColor);
    bmmaterial_set_specular => BMMaterial_SetSpecular(bmfile: BMFilePtr, objid: CkId, col: VxColor);
    bmmaterial_get_emissive => BMMaterial_GetEmissive(bmfile: BMFilePtr, objid: CkId, out_val: *mut VxColor);
    bmmaterial_set_emissive => BMMaterial_SetEmissive(bmfile: BMFilePtr, objid: CkId, col: VxColor);
    bmmaterial_get_specular_power => BMMaterial_GetSpecularPower(bmfile: BMFilePtr, objid: CkId, out_val: *mut f32);
    bmmaterial_set_specular_power => BMMaterial_SetSpecularPower(bmfile: BMFilePtr, objid: CkId, val: f32);
    bmmaterial_get_texture => BMMaterial_GetTexture(bmfile: BMFilePtr, objid: CkId, out_texid: *mut CkId);
    bmmaterial_set_texture => BMMaterial_SetTexture(bmfile: BMFilePtr, objid: CkId, texid: CkId);
    bmmaterial_get_texture_border_color => BMMaterial_GetTextureBorderColor(bmfile: BMFilePtr, objid: CkId, out_val: *mut u32);
    bmmaterial_set_texture_border_color => BMMaterial_SetTextureBorderColor(bmfile: BMFilePtr, objid: CkId, val: u32);
    bmmaterial_get_texture_blend_mode => BMMaterial_GetTextureBlendMode(bmfile: BMFilePtr, objid: CkId, out_val: *mut u32);
    bmmaterial_set_texture_blend_mode => BMMaterial_SetTextureBlendMode(bmfile: BMFilePtr, objid: CkId, val: u32);
    bmmaterial_get_texture_min_mode => BMMaterial_GetTextureMinMode(bmfile: BMFilePtr, objid: CkId, out_val: *mut u32);
    bmmaterial_set_texture_min_mode => BMMaterial_SetTextureMinMode(bmfile: BMFilePtr, objid: CkId, val: u32);
    bmmaterial_get_texture_mag_mode => BMMaterial_GetTextureMagMode(bmfile: BMFilePtr, objid: CkId, out_val: *mut u32);
    bmmaterial_set_texture_mag_mode => BMMaterial_SetTextureMagMode(bmfile: BMFilePtr, objid: CkId, val: u32);
    bmmaterial_get_texture_address_mode => BMMaterial_GetTextureAddressMode(bmfile: BMFilePtr, objid: CkId, out_val: *mut u32);
    bmmaterial_set_texture_address_mode => BMMaterial_SetTextureAddressMode(bmfile: BMFilePtr, objid: CkId, val: u32);
    bmmaterial_get_source_blend => BMMaterial_GetSourceBlend(bmfile: BMFilePtr, objid: CkId, out_val: *mut u32);
    bmmaterial_set_source_blend => BMMaterial_SetSourceBlend(bmfile: BMFilePtr, objid: CkId, val: u32);
    bmmaterial_get_dest_blend => BMMaterial_GetDestBlend(bmfile: BMFilePtr, objid: CkId, out_val: *mut u32);
    bmmaterial_set_dest_blend => BMMaterial_SetDestBlend(bmfile: BMFilePtr, objid: CkId, val: u32);
    bmmaterial_get_fill_mode => BMMaterial_GetFillMode(bmfile: BMFilePtr, objid: CkId, out_val: *mut u32);
    bmmaterial_set_fill_mode => BMMaterial_SetFillMode(bmfile: BMFilePtr, objid: CkId, val: u32);
    bmmaterial_get_shade_mode => BMMaterial_GetShadeMode(bmfile: BMFilePtr, objid: CkId, out_val: *mut u32);
    bmmaterial_set_shade_mode => BMMaterial_SetShadeMode(bmfile: BMFilePtr, objid: CkId, val: u32);
    bmmaterial_get_alpha_test_enabled => BMMaterial_GetAlphaTestEnabled(bmfile: BMFilePtr, objid: CkId, out_val: *mut bool);
    bmmaterial_set_alpha_test_enabled => BMMaterial_SetAlphaTestEnabled(bmfile: BMFilePtr, objid: CkId, enabled: bool);
    bmmaterial_get_alpha_blend_enabled => BMMaterial_GetAlphaBlendEnabled(bmfile: BMFilePtr, objid: CkId, out_val: *mut bool);
    bmmaterial_set_alpha_blend_enabled => BMMaterial_SetAlphaBlendEnabled(bmfile: BMFilePtr, objid: CkId, enabled: bool);
    bmmaterial_get_perspective_correction_enabled => BMMaterial_GetPerspectiveCorrectionEnabled(bmfile: BMFilePtr, objid: CkId, out_val: *mut bool);
    bmmaterial_set_perspective_correction_enabled => BMMaterial_SetPerspectiveCorrectionEnabled(bmfile: BMFilePtr, objid: CkId, enabled: bool);
    bmmaterial_get_zwrite_enabled => BMMaterial_GetZWriteEnabled(bmfile: BMFilePtr, objid: CkId, out_val: *mut bool);
    bmmaterial_set_zwrite_enabled => BMMaterial_SetZWriteEnabled(bmfile: BMFilePtr, objid: CkId, enabled: bool);
    bmmaterial_get_two_sided_enabled => BMMaterial_GetTwoSidedEnabled(bmfile: BMFilePtr, objid: CkId, out_val: *mut bool);
    bmmaterial_set_two_sided_enabled => BMMaterial_SetTwoSidedEnabled(bmfile: BMFilePtr, objid: CkId, enabled: bool);
    bmmaterial_get_alpha_ref => BMMaterial_GetAlphaRef(bmfile: BMFilePtr, objid: CkId, out_val: *mut u8);
    bmmaterial_set_alpha_ref => BMMaterial_SetAlphaRef(bmfile: BMFilePtr, objid: CkId, val: u8);
    bmmaterial_get_alpha_func => BMMaterial_GetAlphaFunc(bmfile: BMFilePtr, objid: CkId, out_val: *mut u32);
    bmmaterial_set_alpha_func => BMMaterial_SetAlphaFunc(bmfile: BMFilePtr, objid: CkId, val: u32);
    bmmaterial_get_zfunc => BMMaterial_GetZFunc(bmfile: BMFilePtr, objid: CkId, out_val: *mut u32);
    bmmaterial_set_zfunc => BMMaterial_SetZFunc(bmfile: BMFilePtr, objid: CkId, val: u32);

    // ========================================================================
    // Meshes
    // ========================================================================

    bmmesh_get_lit_mode => BMMesh_GetLitMode(bmfile: BMFilePtr, objid: CkId, out_mode: *mut u32);
    bmmesh_set_lit_mode => BMMesh_SetLitMode(bmfile: BMFilePtr, objid: CkId, mode: u32);
    bmmesh_get_vertex_count => BMMesh_GetVertexCount(bmfile: BMFilePtr, objid: CkId, out_count: *mut u32);
    /// Resizes every vertex channel, existing data up to the new count is kept
    bmmesh_set_vertex_count => BMMesh_SetVertexCount(bmfile: BMFilePtr, objid: CkId, count: u32);
    bmmesh_get_vertex_positions => BMMesh_GetVertexPositions(bmfile: BMFilePtr, objid: CkId, out_mem: *mut *mut VxVector3);
    bmmesh_get_vertex_normals => BMMesh_GetVertexNormals(bmfile: BMFilePtr, objid: CkId, out_mem: *mut *mut VxVector3);
    bmmesh_get_vertex_uvs => BMMesh_GetVertexUVs(bmfile: BMFilePtr, objid: CkId, out_mem: *mut *mut VxVector2);
    bmmesh_get_face_count => BMMesh_GetFaceCount(bmfile: BMFilePtr, objid: CkId, out_count: *mut u32);
    bmmesh_set_face_count => BMMesh_SetFaceCount(bmfile: BMFilePtr, objid: CkId, count: u32);
    bmmesh_get_face_indices => BMMesh_GetFaceIndices(bmfile: BMFilePtr, objid: CkId, out_mem: *mut *mut CKShortFaceIndices);
    bmmesh_get_face_material_slot_indexs => BMMesh_GetFaceMaterialSlotIndexs(bmfile: BMFilePtr, objid: CkId, out_mem: *mut *mut u16);
    bmmesh_get_material_slot_count => BMMesh_GetMaterialSlotCount(bmfile: BMFilePtr, objid: CkId, out_count: *mut u32);
    bmmesh_set_material_slot_count => BMMesh_SetMaterialSlotCount(bmfile: BMFilePtr, objid: CkId, count: u32);
    bmmesh_get_material_slot => BMMesh_GetMaterialSlot(bmfile: BMFilePtr, objid: CkId, index: u32, out_mtlid: *mut CkId);
    bmmesh_set_material_slot => BMMesh_SetMaterialSlot(bmfile: BMFilePtr, objid: CkId, index: u32, mtlid: CkId);

    // ========================================================================
    // 3D entities (3D objects and target lights)
    // ========================================================================

    bm3dentity_get_world_matrix => BM3dEntity_GetWorldMatrix(bmfile: BMFilePtr, objid: CkId, out_mat: *mut VxMatrix);
    bm3dentity_set_world_matrix => BM3dEntity_SetWorldMatrix(bmfile: BMFilePtr, objid: CkId, mat: VxMatrix);
    bm3dentity_get_current_mesh => BM3dEntity_GetCurrentMesh(bmfile: BMFilePtr, objid: CkId, out_meshid: *mut CkId);
    bm3dentity_set_current_mesh => BM3dEntity_SetCurrentMesh(bmfile: BMFilePtr, objid: CkId, meshid: CkId);
    bm3dentity_get_visibility => BM3dEntity_GetVisibility(bmfile: BMFilePtr, objid: CkId, out_isvisible: *mut bool);
    bm3dentity_set_visibility => BM3dEntity_SetVisibility(bmfile: BMFilePtr, objid: CkId, is_visible: bool);

    // ========================================================================
    // Lights
    // ========================================================================

    bmlight_get_type => BMLight_GetType(bmfile: BMFilePtr, objid: CkId, out_val: *mut u32);
    bmlight_set_type => BMLight_SetType(bmfile: BMFilePtr, objid: CkId, val: u32);
    bmlight_get_color => BMLight_GetColor(bmfile: BMFilePtr, objid: CkId, out_val: *mut VxColor);
    bmlight_set_color => BMLight_SetColor(bmfile: BMFilePtr, objid: CkId, col: VxColor);
    bmlight_get_constant_attenuation => BMLight_GetConstantAttenuation(bmfile: BMFilePtr, objid: CkId, out_val: *mut f32);
    bmlight_set_constant_attenuation => BMLight_SetConstantAttenuation(bmfile: BMFilePtr, objid: CkId, val: f32);
    bmlight_get_linear_attenuation => BMLight_GetLinearAttenuation(bmfile: BMFilePtr, objid: CkId, out_val: *mut f32);
    bmlight_set_linear_attenuation => BMLight_SetLinearAttenuation(bmfile: BMFilePtr, objid: CkId, val: f32);
    bmlight_get_quadratic_attenuation => BMLight_GetQuadraticAttenuation(bmfile: BMFilePtr, objid: CkId, out_val: *mut f32);
    bmlight_set_quadratic_attenuation => BMLight_SetQuadraticAttenuation(bmfile: BMFilePtr, objid: CkId, val: f32);
    bmlight_get_range => BMLight_GetRange(bmfile: BMFilePtr, objid: CkId, out_val: *mut f32);
    bmlight_set_range => BMLight_SetRange(bmfile: BMFilePtr, objid: CkId, val: f32);
    bmlight_get_hot_spot => BMLight_GetHotSpot(bmfile: BMFilePtr, objid: CkId, out_val: *mut f32);
    bmlight_set_hot_spot => BMLight_SetHotSpot(bmfile: BMFilePtr, objid: CkId, val: f32);
    bmlight_get_falloff => BMLight_GetFalloff(bmfile: BMFilePtr, objid: CkId, out_val: *mut f32);
    bmlight_set_falloff => BMLight_SetFalloff(bmfile: BMFilePtr, objid: CkId, val: f32);
    bmlight_get_falloff_shape => BMLight_GetFalloffShape(bmfile: BMFilePtr, objid: CkId, out_val: *mut f32);
    bmlight_set_falloff_shape => BMLight_SetFalloffShape(bmfile: BMFilePtr, objid: CkId, val: f32);
}

impl std::fmt::Debug for BMapVTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BMapVTable")
            .field("entry_points", &Self::SYMBOLS.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_names_are_unique() {
        let mut names: Vec<_> = BMapVTable::SYMBOLS.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), BMapVTable::SYMBOLS.len());
        assert!(BMapVTable::SYMBOLS.contains(&"BMMeshTrans_Parse"));
        assert_eq!(symbols::bmmaterial_get_zfunc, "BMMaterial_GetZFunc");
    }

    #[test]
    fn test_missing_symbol_is_reported() {
        let result = unsafe { BMapVTable::resolve_with(|_| None) };
        assert_eq!(result.err(), Some("BMInit"));
    }

    #[test]
    fn test_null_address_is_rejected() {
        let result = unsafe { BMapVTable::resolve_with(|_| Some(std::ptr::null())) };
        assert!(result.is_err());
    }
}
