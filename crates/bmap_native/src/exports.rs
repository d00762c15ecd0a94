//! Exported C entry points
//!
//! Every function validates its pointers against the engine registry, writes
//! its out-parameters only on success and reports the outcome as a `bool`.
//! Panics never cross the boundary.

#![allow(non_snake_case)]
#![allow(clippy::missing_safety_doc)]

use crate::engine::{guarded, with_engine, with_engine_raw};
use crate::error::{NativeError, Result};
use crate::file::{BMFile, FileSettings, Output};
use crate::mesh_trans::MeshTransition;
use crate::object::ObjectKind;
use bmap_ffi::*;
use std::path::PathBuf;

// ============================================================================
// Argument helpers
// ============================================================================

unsafe fn write_out<T>(out: *mut T, value: T, name: &'static str) -> Result<()> {
    if out.is_null() {
        return Err(NativeError::NullArgument(name));
    }
    out.write(value);
    Ok(())
}

unsafe fn read_path(text: RawText, name: &'static str) -> Result<PathBuf> {
    decode_text(text)
        .map(PathBuf::from)
        .ok_or(NativeError::NullArgument(name))
}

fn read_enum<E: FfiEnum>(value: u32) -> Result<E> {
    E::from_raw(value).ok_or(NativeError::InvalidEnum {
        type_name: E::NAME,
        value,
    })
}

unsafe fn read_settings(
    temp_folder: RawText,
    texture_folder: RawText,
    encoding_count: u32,
    encodings: RawTextArray,
) -> Result<FileSettings> {
    let temp_folder = read_path(temp_folder, "temp_folder")?;
    let texture_folder = read_path(texture_folder, "texture_folder")?;

    let decoded = decode_text_array(encodings).ok_or(NativeError::NullArgument("encodings"))?;
    if decoded.len() != encoding_count as usize {
        return Err(NativeError::InvalidArgument(format!(
            "encoding count {} does not match array of {}",
            encoding_count,
            decoded.len()
        )));
    }
    let encodings = decoded
        .into_iter()
        .collect::<Option<Vec<String>>>()
        .ok_or_else(|| NativeError::InvalidArgument("null encoding name".to_string()))?;

    Ok(FileSettings {
        temp_folder,
        texture_folder,
        encodings,
    })
}

// ============================================================================
// Global lifecycle
// ============================================================================

#[no_mangle]
pub unsafe extern "C" fn BMInit() -> bool {
    with_engine_raw("BMInit", |engine| {
        engine.init();
        Ok(())
    })
}

#[no_mangle]
pub unsafe extern "C" fn BMDispose() -> bool {
    with_engine_raw("BMDispose", |engine| engine.dispose())
}

// ============================================================================
// Containers
// ============================================================================

/// Check that the engine is up without holding the lock afterwards
fn require_init(entry: &'static str) -> bool {
    with_engine(entry, |_| Ok(()))
}

#[no_mangle]
pub unsafe extern "C" fn BMFile_Load(
    file_name: RawText,
    temp_folder: RawText,
    texture_folder: RawText,
    raw_callback: Option<OutputCallback>,
    encoding_count: u32,
    encodings: RawTextArray,
    out_file: *mut BMFilePtr,
) -> bool {
    if !require_init("BMFile_Load") {
        return false;
    }

    // Loading runs outside the engine lock, the callback may re-enter.
    let mut loaded = None;
    let ok = guarded("BMFile_Load", || {
        if out_file.is_null() {
            return Err(NativeError::NullArgument("out_file"));
        }
        let path = read_path(file_name, "file_name")?;
        let settings = read_settings(temp_folder, texture_folder, encoding_count, encodings)?;
        loaded = Some(BMFile::load(&path, settings, Output::new(raw_callback))?);
        log::debug!("Loaded container '{}'", path.display());
        Ok(())
    });

    match loaded {
        Some(file) if ok => with_engine("BMFile_Load", |engine| {
            let ptr = engine.insert_file(file);
            write_out(out_file, ptr, "out_file")
        }),
        _ => false,
    }
}

#[no_mangle]
pub unsafe extern "C" fn BMFile_Create(
    temp_folder: RawText,
    texture_folder: RawText,
    raw_callback: Option<OutputCallback>,
    encoding_count: u32,
    encodings: RawTextArray,
    out_file: *mut BMFilePtr,
) -> bool {
    if !require_init("BMFile_Create") {
        return false;
    }

    let mut created = None;
    let ok = guarded("BMFile_Create", || {
        if out_file.is_null() {
            return Err(NativeError::NullArgument("out_file"));
        }
        let settings = read_settings(temp_folder, texture_folder, encoding_count, encodings)?;
        created = Some(BMFile::create(settings, Output::new(raw_callback))?);
        Ok(())
    });

    match created {
        Some(file) if ok => with_engine("BMFile_Create", |engine| {
            let ptr = engine.insert_file(file);
            write_out(out_file, ptr, "out_file")
        }),
        _ => false,
    }
}

#[no_mangle]
pub unsafe extern "C" fn BMFile_Save(
    map_file: BMFilePtr,
    file_name: RawText,
    texture_save_opt: u32,
    use_compress: bool,
    compress_level: i32,
) -> bool {
    with_engine("BMFile_Save", |engine| {
        let path = read_path(file_name, "file_name")?;
        let texture_save = read_enum::<CkTextureSaveOptions>(texture_save_opt)?;
        engine
            .file_mut(map_file)?
            .save(&path, texture_save, use_compress, compress_level)
    })
}

#[no_mangle]
pub unsafe extern "C" fn BMFile_Free(map_file: BMFilePtr) -> bool {
    with_engine("BMFile_Free", |engine| {
        if map_file.is_null() {
            return Err(NativeError::NullArgument("map_file"));
        }
        let file = engine.remove_file(map_file)?;
        log::debug!("Freed {} container {:p}", file.mode().name(), map_file);
        Ok(())
    })
}

macro_rules! visitor {
    ($count:ident, $get:ident, $create:ident, $kind:expr) => {
        #[no_mangle]
        pub unsafe extern "C" fn $count(bmfile: BMFilePtr, out_count: *mut u32) -> bool {
            with_engine(stringify!($count), |engine| {
                let count = engine.file_mut(bmfile)?.count($kind);
                write_out(out_count, count, "out_count")
            })
        }

        #[no_mangle]
        pub unsafe extern "C" fn $get(bmfile: BMFilePtr, idx: u32, out_id: *mut CkId) -> bool {
            with_engine(stringify!($get), |engine| {
                let id = engine.file_mut(bmfile)?.get($kind, idx)?;
                write_out(out_id, id, "out_id")
            })
        }

        #[no_mangle]
        pub unsafe extern "C" fn $create(bmfile: BMFilePtr, out_id: *mut CkId) -> bool {
            with_engine(stringify!($create), |engine| {
                let file = engine.file_mut(bmfile)?;
                if out_id.is_null() {
                    return Err(NativeError::NullArgument("out_id"));
                }
                let id = file.create_object($kind)?;
                write_out(out_id, id, "out_id")
            })
        }
    };
}

visitor!(BMFile_GetGroupCount, BMFile_GetGroup, BMFile_CreateGroup, ObjectKind::Group);
visitor!(BMFile_Get3dObjectCount, BMFile_Get3dObject, BMFile_Create3dObject, ObjectKind::Object3d);
visitor!(BMFile_GetMeshCount, BMFile_GetMesh, BMFile_CreateMesh, ObjectKind::Mesh);
visitor!(BMFile_GetMaterialCount, BMFile_GetMaterial, BMFile_CreateMaterial, ObjectKind::Material);
visitor!(BMFile_GetTextureCount, BMFile_GetTexture, BMFile_CreateTexture, ObjectKind::Texture);
visitor!(
    BMFile_GetTargetLightCount,
    BMFile_GetTargetLight,
    BMFile_CreateTargetLight,
    ObjectKind::TargetLight
);

// ============================================================================
// Geometry staging
// ============================================================================

#[no_mangle]
pub unsafe extern "C" fn BMMeshTrans_New(out_trans: *mut MeshTransPtr) -> bool {
    with_engine("BMMeshTrans_New", |engine| {
        if out_trans.is_null() {
            return Err(NativeError::NullArgument("out_trans"));
        }
        let ptr = engine.insert_session(MeshTransition::new());
        write_out(out_trans, ptr, "out_trans")
    })
}

#[no_mangle]
pub unsafe extern "C" fn BMMeshTrans_Delete(trans: MeshTransPtr) -> bool {
    with_engine("BMMeshTrans_Delete", |engine| {
        engine.remove_session(trans)?;
        Ok(())
    })
}

macro_rules! staging_channel {
    ($count_fn:ident, $memory_fn:ident, $prepare:ident, $memory:ident, $ty:ty) => {
        #[no_mangle]
        pub unsafe extern "C" fn $count_fn(trans: MeshTransPtr, count: u32) -> bool {
            with_engine(stringify!($count_fn), |engine| {
                engine.session_mut(trans)?.$prepare(count)
            })
        }

        #[no_mangle]
        pub unsafe extern "C" fn $memory_fn(trans: MeshTransPtr, out_mem: *mut *mut $ty) -> bool {
            with_engine(stringify!($memory_fn), |engine| {
                let memory = engine.session_mut(trans)?.$memory()?;
                write_out(out_mem, memory, "out_mem")
            })
        }
    };
}

staging_channel!(
    BMMeshTrans_PrepareVertexCount,
    BMMeshTrans_PrepareVertex,
    prepare_vertex_count,
    vertex_memory,
    VxVector3
);
staging_channel!(
    BMMeshTrans_PrepareNormalCount,
    BMMeshTrans_PrepareNormal,
    prepare_normal_count,
    normal_memory,
    VxVector3
);
staging_channel!(
    BMMeshTrans_PrepareUVCount,
    BMMeshTrans_PrepareUV,
    prepare_uv_count,
    uv_memory,
    VxVector2
);
staging_channel!(
    BMMeshTrans_PrepareMtlSlotCount,
    BMMeshTrans_PrepareMtlSlot,
    prepare_material_slot_count,
    material_slot_memory,
    CkId
);

#[no_mangle]
pub unsafe extern "C" fn BMMeshTrans_PrepareFaceCount(trans: MeshTransPtr, count: u32) -> bool {
    with_engine("BMMeshTrans_PrepareFaceCount", |engine| {
        engine.session_mut(trans)?.prepare_face_count(count)
    })
}

macro_rules! staging_face_memory {
    ($memory_fn:ident, $memory:ident, $ty:ty) => {
        #[no_mangle]
        pub unsafe extern "C" fn $memory_fn(trans: MeshTransPtr, out_mem: *mut *mut $ty) -> bool {
            with_engine(stringify!($memory_fn), |engine| {
                let memory = engine.session_mut(trans)?.$memory()?;
                write_out(out_mem, memory, "out_mem")
            })
        }
    };
}

staging_face_memory!(BMMeshTrans_PrepareFaceVertexIndices, face_vertex_indices_memory, CKFaceIndices);
staging_face_memory!(BMMeshTrans_PrepareFaceNormalIndices, face_normal_indices_memory, CKFaceIndices);
staging_face_memory!(BMMeshTrans_PrepareFaceUVIndices, face_uv_indices_memory, CKFaceIndices);
staging_face_memory!(BMMeshTrans_PrepareFaceMtlSlot, face_material_slot_memory, u32);

#[no_mangle]
pub unsafe extern "C" fn BMMeshTrans_Parse(trans: MeshTransPtr, bmfile: BMFilePtr, objid: CkId) -> bool {
    with_engine("BMMeshTrans_Parse", |engine| {
        let (session, file) = engine.session_and_file(trans, bmfile)?;
        file.commit_mesh(objid, session)
    })
}

// ============================================================================
// Objects and groups
// ============================================================================

#[no_mangle]
pub unsafe extern "C" fn BMObject_GetName(bmfile: BMFilePtr, objid: CkId, out_name: *mut RawText) -> bool {
    with_engine("BMObject_GetName", |engine| {
        if out_name.is_null() {
            return Err(NativeError::NullArgument("out_name"));
        }
        let file = engine.file_mut(bmfile)?;
        let name = file.object(objid)?.name.clone();
        let text = file.hand_out_text(name.as_deref())?;
        write_out(out_name, text, "out_name")
    })
}

#[no_mangle]
pub unsafe extern "C" fn BMObject_SetName(bmfile: BMFilePtr, objid: CkId, name: RawText) -> bool {
    with_engine("BMObject_SetName", |engine| {
        engine.file_mut(bmfile)?.object_mut(objid)?.name = decode_text(name);
        Ok(())
    })
}

#[no_mangle]
pub unsafe extern "C" fn BMGroup_AddObject(bmfile: BMFilePtr, objid: CkId, memberid: CkId) -> bool {
    with_engine("BMGroup_AddObject", |engine| {
        engine.file_mut(bmfile)?.add_to_group(objid, memberid)
    })
}

#[no_mangle]
pub unsafe extern "C" fn BMGroup_GetObjectCount(bmfile: BMFilePtr, objid: CkId, out_count: *mut u32) -> bool {
    with_engine("BMGroup_GetObjectCount", |engine| {
        let count = engine.file_mut(bmfile)?.group_mut(objid)?.members.len() as u32;
        write_out(out_count, count, "out_count")
    })
}

#[no_mangle]
pub unsafe extern "C" fn BMGroup_GetObject(bmfile: BMFilePtr, objid: CkId, pos: u32, out_id: *mut CkId) -> bool {
    with_engine("BMGroup_GetObject", |engine| {
        let members = &engine.file_mut(bmfile)?.group_mut(objid)?.members;
        let id = *members
            .get(pos as usize)
            .ok_or_else(|| NativeError::out_of_range("group member", pos, members.len()))?;
        write_out(out_id, id, "out_id")
    })
}

// ============================================================================
// Property accessors
// ============================================================================

/// Plain value property
macro_rules! value_property {
    ($getter:ident, $setter:ident, $access:ident . $field:ident : $ty:ty) => {
        #[no_mangle]
        pub unsafe extern "C" fn $getter(bmfile: BMFilePtr, objid: CkId, out_val: *mut $ty) -> bool {
            with_engine(stringify!($getter), |engine| {
                let value = engine.file_mut(bmfile)?.$access(objid)?.$field;
                write_out(out_val, value, "out_val")
            })
        }

        #[no_mangle]
        pub unsafe extern "C" fn $setter(bmfile: BMFilePtr, objid: CkId, val: $ty) -> bool {
            with_engine(stringify!($setter), |engine| {
                engine.file_mut(bmfile)?.$access(objid)?.$field = val;
                Ok(())
            })
        }
    };
}

/// Enumeration property, travelling as `u32`
macro_rules! enum_property {
    ($getter:ident, $setter:ident, $access:ident . $field:ident : $ty:ty) => {
        #[no_mangle]
        pub unsafe extern "C" fn $getter(bmfile: BMFilePtr, objid: CkId, out_val: *mut u32) -> bool {
            with_engine(stringify!($getter), |engine| {
                let value = engine.file_mut(bmfile)?.$access(objid)?.$field;
                write_out(out_val, value.to_raw(), "out_val")
            })
        }

        #[no_mangle]
        pub unsafe extern "C" fn $setter(bmfile: BMFilePtr, objid: CkId, val: u32) -> bool {
            with_engine(stringify!($setter), |engine| {
                let value = read_enum::<$ty>(val)?;
                engine.file_mut(bmfile)?.$access(objid)?.$field = value;
                Ok(())
            })
        }
    };
}

/// Link to another object of a given kind, identity 0 clears it
macro_rules! link_property {
    ($getter:ident, $setter:ident, $access:ident . $field:ident => $kind:expr) => {
        #[no_mangle]
        pub unsafe extern "C" fn $getter(bmfile: BMFilePtr, objid: CkId, out_id: *mut CkId) -> bool {
            with_engine(stringify!($getter), |engine| {
                let value = engine.file_mut(bmfile)?.$access(objid)?.$field;
                write_out(out_id, value, "out_id")
            })
        }

        #[no_mangle]
        pub unsafe extern "C" fn $setter(bmfile: BMFilePtr, objid: CkId, id: CkId) -> bool {
            with_engine(stringify!($setter), |engine| {
                let file = engine.file_mut(bmfile)?;
                file.check_link(id, $kind)?;
                file.$access(objid)?.$field = id;
                Ok(())
            })
        }
    };
}

// ============================================================================
// Textures
// ============================================================================

#[no_mangle]
pub unsafe extern "C" fn BMTexture_GetFileName(bmfile: BMFilePtr, objid: CkId, out_filename: *mut RawText) -> bool {
    with_engine("BMTexture_GetFileName", |engine| {
        if out_filename.is_null() {
            return Err(NativeError::NullArgument("out_filename"));
        }
        let file = engine.file_mut(bmfile)?;
        let name = file.texture_mut(objid)?.file_name.clone();
        let text = file.hand_out_text(name.as_deref())?;
        write_out(out_filename, text, "out_filename")
    })
}

#[no_mangle]
pub unsafe extern "C" fn BMTexture_LoadImage(bmfile: BMFilePtr, objid: CkId, filename: RawText) -> bool {
    with_engine("BMTexture_LoadImage", |engine| {
        let path = read_path(filename, "filename")?;
        engine.file_mut(bmfile)?.load_texture_image(objid, &path)
    })
}

#[no_mangle]
pub unsafe extern "C" fn BMTexture_SaveImage(bmfile: BMFilePtr, objid: CkId, filename: RawText) -> bool {
    with_engine("BMTexture_SaveImage", |engine| {
        let path = read_path(filename, "filename")?;
        engine.file_mut(bmfile)?.save_texture_image(objid, &path)
    })
}

enum_property!(BMTexture_GetSaveOptions, BMTexture_SetSaveOptions, texture_mut.save_options: CkTextureSaveOptions);
enum_property!(BMTexture_GetVideoFormat, BMTexture_SetVideoFormat, texture_mut.video_format: VxPixelFormat);

// ============================================================================
// Materials
// ============================================================================

value_property!(BMMaterial_GetDiffuse, BMMaterial_SetDiffuse, material_mut.diffuse: VxColor);
value_property!(BMMaterial_GetAmbient, BMMaterial_SetAmbient, material_mut.ambient: VxColor);
value_property!(BMMaterial_GetSpecular, BMMaterial_SetSpecular, material_mut.specular: VxColor);
value_property!(BMMaterial_GetEmissive, BMMaterial_SetEmissive, material_mut.emissive: VxColor);
value_property!(BMMaterial_GetSpecularPower, BMMaterial_SetSpecularPower, material_mut.specular_power: f32);
link_property!(BMMaterial_GetTexture, BMMaterial_SetTexture, material_mut.texture => ObjectKind::Texture);
value_property!(
    BMMaterial_GetTextureBorderColor,
    BMMaterial_SetTextureBorderColor,
    material_mut.texture_border_color: u32
);
enum_property!(
    BMMaterial_GetTextureBlendMode,
    BMMaterial_SetTextureBlendMode,
    material_mut.texture_blend_mode: VxTextureBlendMode
);
enum_property!(
    BMMaterial_GetTextureMinMode,
    BMMaterial_SetTextureMinMode,
    material_mut.texture_min_mode: VxTextureFilterMode
);
enum_property!(
    BMMaterial_GetTextureMagMode,
    BMMaterial_SetTextureMagMode,
    material_mut.texture_mag_mode: VxTextureFilterMode
);
enum_property!(
    BMMaterial_GetTextureAddressMode,
    BMMaterial_SetTextureAddressMode,
    material_mut.texture_address_mode: VxTextureAddressMode
);
enum_property!(BMMaterial_GetSourceBlend, BMMaterial_SetSourceBlend, material_mut.source_blend: VxBlendMode);
enum_property!(BMMaterial_GetDestBlend, BMMaterial_SetDestBlend, material_mut.dest_blend: VxBlendMode);
enum_property!(BMMaterial_GetFillMode, BMMaterial_SetFillMode, material_mut.fill_mode: VxFillMode);
enum_property!(BMMaterial_GetShadeMode, BMMaterial_SetShadeMode, material_mut.shade_mode: VxShadeMode);
value_property!(
    BMMaterial_GetAlphaTestEnabled,
    BMMaterial_SetAlphaTestEnabled,
    material_mut.alpha_test_enabled: bool
);
value_property!(
    BMMaterial_GetAlphaBlendEnabled,
    BMMaterial_SetAlphaBlendEnabled,
    material_mut.alpha_blend_enabled: bool
);
value_property!(
    BMMaterial_GetPerspectiveCorrectionEnabled,
    BMMaterial_SetPerspectiveCorrectionEnabled,
    material_mut.perspective_correction_enabled: bool
);
value_property!(BMMaterial_GetZWriteEnabled, BMMaterial_SetZWriteEnabled, material_mut.zwrite_enabled: bool);
value_property!(
    BMMaterial_GetTwoSidedEnabled,
    BMMaterial_SetTwoSidedEnabled,
    material_mut.two_sided_enabled: bool
);
value_property!(BMMaterial_GetAlphaRef, BMMaterial_SetAlphaRef, material_mut.alpha_ref: u8);
enum_property!(BMMaterial_GetAlphaFunc, BMMaterial_SetAlphaFunc, material_mut.alpha_func: VxCmpFunc);
enum_property!(BMMaterial_GetZFunc, BMMaterial_SetZFunc, material_mut.zfunc: VxCmpFunc);

// ============================================================================
// Meshes
// ============================================================================

enum_property!(BMMesh_GetLitMode, BMMesh_SetLitMode, mesh_mut.lit_mode: VxMeshLitMode);

macro_rules! mesh_count {
    ($getter:ident, $setter:ident, $count:ident, $resize:ident) => {
        #[no_mangle]
        pub unsafe extern "C" fn $getter(bmfile: BMFilePtr, objid: CkId, out_count: *mut u32) -> bool {
            with_engine(stringify!($getter), |engine| {
                let count = engine.file_mut(bmfile)?.mesh_mut(objid)?.$count() as u32;
                write_out(out_count, count, "out_count")
            })
        }

        #[no_mangle]
        pub unsafe extern "C" fn $setter(bmfile: BMFilePtr, objid: CkId, count: u32) -> bool {
            with_engine(stringify!($setter), |engine| {
                engine.file_mut(bmfile)?.mesh_mut(objid)?.$resize(count as usize)
            })
        }
    };
}

mesh_count!(BMMesh_GetVertexCount, BMMesh_SetVertexCount, vertex_count, set_vertex_count);
mesh_count!(BMMesh_GetFaceCount, BMMesh_SetFaceCount, face_count, set_face_count);
mesh_count!(
    BMMesh_GetMaterialSlotCount,
    BMMesh_SetMaterialSlotCount,
    material_slot_count,
    set_material_slot_count
);

/// Pointer into one of a mesh's channels, valid until its count changes
macro_rules! mesh_memory {
    ($getter:ident, $field:ident, $ty:ty) => {
        #[no_mangle]
        pub unsafe extern "C" fn $getter(bmfile: BMFilePtr, objid: CkId, out_mem: *mut *mut $ty) -> bool {
            with_engine(stringify!($getter), |engine| {
                let memory = engine.file_mut(bmfile)?.mesh_mut(objid)?.$field.as_mut_ptr();
                write_out(out_mem, memory, "out_mem")
            })
        }
    };
}

mesh_memory!(BMMesh_GetVertexPositions, positions, VxVector3);
mesh_memory!(BMMesh_GetVertexNormals, normals, VxVector3);
mesh_memory!(BMMesh_GetVertexUVs, uvs, VxVector2);
mesh_memory!(BMMesh_GetFaceIndices, faces, CKShortFaceIndices);
mesh_memory!(BMMesh_GetFaceMaterialSlotIndexs, face_material_slots, u16);

#[no_mangle]
pub unsafe extern "C" fn BMMesh_GetMaterialSlot(bmfile: BMFilePtr, objid: CkId, index: u32, out_mtlid: *mut CkId) -> bool {
    with_engine("BMMesh_GetMaterialSlot", |engine| {
        let slots = &engine.file_mut(bmfile)?.mesh_mut(objid)?.material_slots;
        let id = *slots
            .get(index as usize)
            .ok_or_else(|| NativeError::out_of_range("material slot", index, slots.len()))?;
        write_out(out_mtlid, id, "out_mtlid")
    })
}

#[no_mangle]
pub unsafe extern "C" fn BMMesh_SetMaterialSlot(bmfile: BMFilePtr, objid: CkId, index: u32, mtlid: CkId) -> bool {
    with_engine("BMMesh_SetMaterialSlot", |engine| {
        let file = engine.file_mut(bmfile)?;
        file.check_link(mtlid, ObjectKind::Material)?;
        let slots = &mut file.mesh_mut(objid)?.material_slots;
        let len = slots.len();
        let slot = slots
            .get_mut(index as usize)
            .ok_or_else(|| NativeError::out_of_range("material slot", index, len))?;
        *slot = mtlid;
        Ok(())
    })
}

// ============================================================================
// 3D entities
// ============================================================================

value_property!(BM3dEntity_GetWorldMatrix, BM3dEntity_SetWorldMatrix, entity_mut.world_matrix: VxMatrix);
link_property!(BM3dEntity_GetCurrentMesh, BM3dEntity_SetCurrentMesh, entity_mut.current_mesh => ObjectKind::Mesh);
value_property!(BM3dEntity_GetVisibility, BM3dEntity_SetVisibility, entity_mut.visibility: bool);

// ============================================================================
// Lights
// ============================================================================

enum_property!(BMLight_GetType, BMLight_SetType, light_mut.light_type: VxLightType);
value_property!(BMLight_GetColor, BMLight_SetColor, light_mut.color: VxColor);
value_property!(
    BMLight_GetConstantAttenuation,
    BMLight_SetConstantAttenuation,
    light_mut.constant_attenuation: f32
);
value_property!(
    BMLight_GetLinearAttenuation,
    BMLight_SetLinearAttenuation,
    light_mut.linear_attenuation: f32
);
value_property!(
    BMLight_GetQuadraticAttenuation,
    BMLight_SetQuadraticAttenuation,
    light_mut.quadratic_attenuation: f32
);
value_property!(BMLight_GetRange, BMLight_SetRange, light_mut.range: f32);
value_property!(BMLight_GetHotSpot, BMLight_SetHotSpot, light_mut.hot_spot: f32);
value_property!(BMLight_GetFalloff, BMLight_SetFalloff, light_mut.falloff: f32);
value_property!(BMLight_GetFalloffShape, BMLight_SetFalloffShape, light_mut.falloff_shape: f32);
