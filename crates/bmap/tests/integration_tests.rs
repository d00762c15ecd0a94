//! Integration tests for the bmap crate
//!
//! Drives the in-process reference engine through the public API: building
//! a container, saving it, loading it back and checking what survived.

#![cfg(feature = "builtin")]

use bmap::ffi::{self, CKShortFaceIndices, VxLightType};
use bmap::prelude::*;
use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, Mutex};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn collector() -> (OutputSink, Arc<Mutex<Vec<String>>>) {
    let lines = Arc::new(Mutex::new(Vec::new()));
    let sink_lines = lines.clone();
    let sink = OutputSink::new(move |line| sink_lines.lock().unwrap().push(line.to_string()));
    (sink, lines)
}

fn options(texture_folder: &Path) -> FileOptions {
    FileOptions::default().with_texture_folder(texture_folder)
}

/// Writes a small scene: one textured, lit quad placed in a group
fn build_scene(library: &Arc<BMapLibrary>, path: &Path, texture_folder: &Path, save: &SaveOptions) {
    let writer = BMFileWriter::create_with_sink(library, &options(texture_folder), &OutputSink::silent()).unwrap();

    let texture = writer.create_texture().unwrap();
    texture.set_name(Some("brick")).unwrap();
    texture.load_image(texture_folder.join("brick.bmp")).unwrap();

    let material = writer.create_material().unwrap();
    material.set_name(Some("brick_mat")).unwrap();
    material.set_texture(Some(&texture)).unwrap();
    material.set_diffuse(VxColor::rgb(0.2, 0.4, 0.6)).unwrap();

    let mesh = writer.create_mesh().unwrap();
    mesh.set_name(Some("quad")).unwrap();
    let mut trans = MeshTrans::new(library).unwrap();
    trans
        .prepare_vertices(
            4,
            [
                VxVector3::new(0.0, 0.0, 0.0),
                VxVector3::new(1.0, 0.0, 0.0),
                VxVector3::new(1.0, 1.0, 0.0),
                VxVector3::new(0.0, 1.0, 0.0),
            ],
        )
        .unwrap();
    trans.prepare_normals(1, [VxVector3::new(0.0, 0.0, 1.0)]).unwrap();
    trans.prepare_uvs(1, [VxVector2::ZERO]).unwrap();
    trans.prepare_material_slots(1, [Some(material)]).unwrap();
    trans
        .prepare_faces(
            2,
            [[0u32, 1, 2], [0, 2, 3]],
            [[0u32, 0, 0], [0, 0, 0]],
            [[0u32, 0, 0], [0, 0, 0]],
            [0, 0],
        )
        .unwrap();
    trans.parse(&mesh).unwrap();
    trans.dispose().unwrap();

    let object = writer.create_3dobject().unwrap();
    object.set_name(Some("floor")).unwrap();
    object.set_current_mesh(Some(&mesh)).unwrap();

    let light = writer.create_target_light().unwrap();
    light.set_name(Some("sun")).unwrap();
    light.set_light_type(VxLightType::Directional).unwrap();

    let group = writer.create_group().unwrap();
    group.set_name(Some("level")).unwrap();
    group.add_object(&object).unwrap();

    writer.save(path, save).unwrap();
    writer.close().unwrap();
}

fn scene_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("brick.bmp"), b"BM brick pixels").unwrap();
    dir
}

fn names<K: ObjectKind>(reader: &BMFileReader) -> Vec<Option<String>> {
    reader
        .objects::<K>()
        .map(|object| object.and_then(|object| object.name()))
        .collect::<Result<_>>()
        .unwrap()
}

#[test]
fn test_save_load_round_trip() {
    init_logging();
    let library = BMapLibrary::builtin().unwrap();
    let dir = scene_dir();
    let path = dir.path().join("scene.bmap");
    build_scene(&library, &path, dir.path(), &SaveOptions::default());

    let reader = BMFileReader::load_with_sink(&library, &path, &options(dir.path()), &OutputSink::silent()).unwrap();

    assert_eq!(reader.count::<Texture>().unwrap(), 1);
    assert_eq!(reader.count::<Material>().unwrap(), 1);
    assert_eq!(reader.count::<Mesh>().unwrap(), 1);
    assert_eq!(reader.count::<Object3d>().unwrap(), 1);
    assert_eq!(reader.count::<TargetLight>().unwrap(), 1);
    assert_eq!(reader.count::<Group>().unwrap(), 1);

    assert_eq!(names::<Texture>(&reader), vec![Some("brick".to_string())]);
    assert_eq!(names::<Mesh>(&reader), vec![Some("quad".to_string())]);
    assert_eq!(names::<Group>(&reader), vec![Some("level".to_string())]);

    let mesh = reader.meshes().next().unwrap().unwrap();
    assert_eq!(mesh.vertex_count().unwrap(), 4);
    assert_eq!(mesh.face_count().unwrap(), 2);
    assert_eq!(
        mesh.face_indices().unwrap(),
        vec![CKShortFaceIndices::new(0, 1, 2), CKShortFaceIndices::new(0, 2, 3)]
    );

    let material = reader.materials().next().unwrap().unwrap();
    assert_eq!(mesh.material_slot(0).unwrap(), Some(material));
    assert_eq!(material.diffuse().unwrap(), VxColor::rgb(0.2, 0.4, 0.6));

    let texture = material.texture().unwrap().unwrap();
    assert_eq!(texture.file_name().unwrap().as_deref(), Some("brick.bmp"));

    let object = reader.objects_3d().next().unwrap().unwrap();
    assert_eq!(object.current_mesh().unwrap(), Some(mesh));

    let group = reader.groups().next().unwrap().unwrap();
    let members: Vec<_> = group.objects().collect::<Result<_>>().unwrap();
    assert_eq!(members, vec![object]);

    let light = reader.target_lights().next().unwrap().unwrap();
    assert_eq!(light.light_type().unwrap(), VxLightType::Directional);
}

#[test]
fn test_enumeration_is_repeatable() {
    let library = BMapLibrary::builtin().unwrap();
    let dir = scene_dir();
    let path = dir.path().join("scene.bmap");
    build_scene(&library, &path, dir.path(), &SaveOptions::default());

    let reader = BMFileReader::load_with_sink(&library, &path, &options(dir.path()), &OutputSink::silent()).unwrap();
    let first: Vec<_> = reader.objects::<Material>().collect::<Result<_>>().unwrap();
    let second: Vec<_> = reader.objects::<Material>().collect::<Result<_>>().unwrap();
    assert_eq!(first, second);

    let by_identity: HashSet<_> = first.iter().chain(second.iter()).copied().collect();
    assert_eq!(by_identity.len(), first.len());
}

#[test]
fn test_reader_cannot_create() {
    let library = BMapLibrary::builtin().unwrap();
    let dir = scene_dir();
    let path = dir.path().join("scene.bmap");
    build_scene(&library, &path, dir.path(), &SaveOptions::default());

    let reader = BMFileReader::load_with_sink(&library, &path, &options(dir.path()), &OutputSink::silent()).unwrap();
    assert!(matches!(
        reader.handle().create::<Texture>(),
        Err(BMapError::OperationFailed { operation: "BMFile_CreateTexture" })
    ));
}

#[test]
fn test_index_past_count_fails() {
    let library = BMapLibrary::builtin().unwrap();
    let dir = scene_dir();
    let path = dir.path().join("scene.bmap");
    build_scene(&library, &path, dir.path(), &SaveOptions::default());

    let reader = BMFileReader::load_with_sink(&library, &path, &options(dir.path()), &OutputSink::silent()).unwrap();
    assert!(reader.handle().object_at::<Mesh>(0).is_ok());
    assert!(matches!(
        reader.handle().object_at::<Mesh>(1),
        Err(BMapError::OperationFailed { operation: "BMFile_GetMesh" })
    ));
}

#[test]
fn test_corrupted_container_fails_to_load() {
    let library = BMapLibrary::builtin().unwrap();
    let dir = scene_dir();
    let path = dir.path().join("scene.bmap");
    build_scene(&library, &path, dir.path(), &SaveOptions::default());

    let bytes = std::fs::read(&path).unwrap();
    std::fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();

    assert!(matches!(
        BMFileReader::load_with_sink(&library, &path, &options(dir.path()), &OutputSink::silent()),
        Err(BMapError::OperationFailed { operation: "BMFile_Load" })
    ));
}

#[test]
fn test_output_reaches_sink_during_open_only() {
    let library = BMapLibrary::builtin().unwrap();
    let dir = scene_dir();
    let path = dir.path().join("scene.bmap");
    build_scene(&library, &path, dir.path(), &SaveOptions::default());

    let (sink, lines) = collector();
    let writer = BMFileWriter::create_with_sink(&library, &FileOptions::default(), &sink).unwrap();
    assert_eq!(*lines.lock().unwrap(), vec!["Created empty container".to_string()]);

    lines.lock().unwrap().clear();
    let reader = BMFileReader::load_with_sink(&library, &path, &options(dir.path()), &sink).unwrap();
    {
        let lines = lines.lock().unwrap();
        assert_eq!(lines.first().map(String::as_str), Some(format!("Loading '{}'", path.display()).as_str()));
        assert_eq!(lines.last().map(String::as_str), Some("Loaded 6 objects"));
    }

    lines.lock().unwrap().clear();
    writer.create_mesh().unwrap();
    let _ = reader.meshes().count();
    writer.close().unwrap();
    reader.close().unwrap();
    assert!(lines.lock().unwrap().is_empty());
}

#[test]
fn test_external_textures_resolved_from_folder() {
    let library = BMapLibrary::builtin().unwrap();
    let dir = scene_dir();
    let path = dir.path().join("scene.bmap");
    let save = SaveOptions {
        texture_save_options: CkTextureSaveOptions::External,
        ..SaveOptions::default()
    };
    build_scene(&library, &path, dir.path(), &save);

    // Present next to the scene
    let reader = BMFileReader::load_with_sink(&library, &path, &options(dir.path()), &OutputSink::silent()).unwrap();
    let texture = reader.textures().next().unwrap().unwrap();
    let copy = dir.path().join("copy.bmp");
    texture.save_image(&copy).unwrap();
    assert_eq!(std::fs::read(&copy).unwrap(), b"BM brick pixels");

    // Missing from another folder
    let elsewhere = tempfile::tempdir().unwrap();
    let (sink, lines) = collector();
    let reader = BMFileReader::load_with_sink(&library, &path, &options(elsewhere.path()), &sink).unwrap();
    assert!(lines
        .lock()
        .unwrap()
        .contains(&"Texture image 'brick.bmp' not found".to_string()));

    let texture = reader.textures().next().unwrap().unwrap();
    assert!(texture.save_image(elsewhere.path().join("copy.bmp")).is_err());
}

#[test]
fn test_save_rejects_bad_options() {
    let library = BMapLibrary::builtin().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let writer = BMFileWriter::create_with_sink(&library, &FileOptions::default(), &OutputSink::silent()).unwrap();

    let global = SaveOptions {
        texture_save_options: CkTextureSaveOptions::UseGlobal,
        ..SaveOptions::default()
    };
    assert!(writer.save(dir.path().join("a.bmap"), &global).is_err());

    let level = SaveOptions {
        compress_level: 12,
        ..SaveOptions::default()
    };
    assert!(writer.save(dir.path().join("b.bmap"), &level).is_err());

    let uncompressed = SaveOptions {
        use_compress: false,
        compress_level: 12,
        ..SaveOptions::default()
    };
    writer.save(dir.path().join("c.bmap"), &uncompressed).unwrap();
}

#[test]
fn test_options_from_toml() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("bmap.toml");
    std::fs::write(
        &config,
        format!(
            "texture_folder = {:?}\nencodings = [\"cp1252\", \"gb2312\"]\n",
            dir.path().display().to_string()
        ),
    )
    .unwrap();

    let options = FileOptions::from_toml_file(&config).unwrap();
    assert_eq!(options.texture_folder, dir.path());

    let library = BMapLibrary::builtin().unwrap();
    let writer = BMFileWriter::create_with_sink(&library, &options, &OutputSink::silent()).unwrap();
    writer.close().unwrap();
}

#[test]
fn test_invalid_references() {
    let library = BMapLibrary::builtin().unwrap();
    let writer = BMFileWriter::create_with_sink(&library, &FileOptions::default(), &OutputSink::silent()).unwrap();
    let real = writer.create_texture().unwrap();
    let empty = BMTexture::new(writer.handle(), INVALID_CKID);

    assert!(real.is_valid());
    assert!(!empty.is_valid());
    assert_ne!(real, empty);
    assert!(empty.name().is_err());
}

#[test]
fn test_codec_scenarios() {
    let empty = ffi::encode_text("").unwrap();
    assert_eq!(unsafe { ffi::decode_text(empty.as_ptr()) }.as_deref(), Some(""));

    let accented = ffi::encode_text("héllo").unwrap();
    assert_eq!(unsafe { ffi::text_len(accented.as_ptr()) }, 6);
    assert_eq!(unsafe { ffi::decode_text(accented.as_ptr()) }.as_deref(), Some("héllo"));

    let items = [Some("a"), None, Some("bc")];
    let array = ffi::encode_text_array(&items[..]).unwrap();
    assert_eq!(unsafe { ffi::text_array_len(array.as_ptr()) }, 3);
    assert_eq!(
        unsafe { ffi::decode_text_array(array.as_ptr()) },
        Some(vec![Some("a".to_string()), None, Some("bc".to_string())])
    );
}

#[test]
fn test_library_outlives_handles() {
    let library = BMapLibrary::builtin().unwrap();
    let writer = BMFileWriter::create_with_sink(&library, &FileOptions::default(), &OutputSink::silent()).unwrap();
    let trans = MeshTrans::new(&library).unwrap();
    drop(library);

    // Both still hold the library, releasing them must succeed
    trans.dispose().unwrap();
    writer.close().unwrap();
}
