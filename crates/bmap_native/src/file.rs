//! Native object containers
//!
//! A container is opened either as a reader (loaded from disk, enumerable,
//! read-only object set) or as a writer (created empty, objects are created
//! and the result saved). Objects of both can be inspected and edited.

use crate::error::{NativeError, Result};
use crate::mesh_trans::MeshTransition;
use crate::object::*;
use bmap_ffi::{CkId, CkTextureSaveOptions, EncodedText, OutputCallback, RawText, INVALID_CKID};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

const SNAPSHOT_MAGIC: &[u8; 8] = b"BMAPSNAP";
const SNAPSHOT_VERSION: u32 = 1;

/// How a container was opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileMode {
    Reader,
    Writer,
}

impl FileMode {
    pub fn name(self) -> &'static str {
        match self {
            FileMode::Reader => "reader",
            FileMode::Writer => "writer",
        }
    }
}

/// Settings every container is opened with
#[derive(Debug, Clone)]
pub struct FileSettings {
    pub temp_folder: PathBuf,
    pub texture_folder: PathBuf,
    /// Legacy encodings tried in order when decoding stored names
    pub encodings: Vec<String>,
}

/// Caller supplied sink for progress and diagnostic text
#[derive(Clone, Copy)]
pub struct Output(Option<OutputCallback>);

impl Output {
    pub fn new(callback: Option<OutputCallback>) -> Self {
        Self(callback)
    }

    pub fn silent() -> Self {
        Self(None)
    }

    /// Send one line to the caller, synchronously
    pub fn emit(&self, message: &str) {
        let Some(callback) = self.0 else {
            return;
        };

        match EncodedText::new(message) {
            Ok(text) => unsafe { callback(text.as_ptr()) },
            Err(e) => log::warn!("Dropped output line: {}", e),
        }
    }
}

/// On-disk form of a container
#[derive(Serialize, Deserialize)]
struct Snapshot {
    next_id: CkId,
    objects: Vec<(CkId, ObjectData)>,
}

/// A native object container
pub struct BMFile {
    mode: FileMode,
    settings: FileSettings,
    objects: HashMap<CkId, ObjectData>,
    /// Identities per kind, in creation order
    lists: [Vec<CkId>; 6],
    next_id: CkId,
    /// Last string handed out, kept alive until the next one
    handed_text: Option<EncodedText>,
}

impl BMFile {
    fn empty(mode: FileMode, settings: FileSettings) -> Self {
        Self {
            mode,
            settings,
            objects: HashMap::new(),
            lists: Default::default(),
            next_id: 1,
            handed_text: None,
        }
    }

    /// Create an empty writer
    pub fn create(settings: FileSettings, output: Output) -> Result<Self> {
        validate_settings(&settings)?;
        output.emit("Created empty container");
        log::debug!("Created writer with encodings {:?}", settings.encodings);
        Ok(Self::empty(FileMode::Writer, settings))
    }

    /// Open a persisted container as a reader
    pub fn load(path: &Path, settings: FileSettings, output: Output) -> Result<Self> {
        validate_settings(&settings)?;
        output.emit(&format!("Loading '{}'", path.display()));

        let bytes = std::fs::read(path)?;
        let snapshot = decode_snapshot(path, &bytes)?;

        let mut file = Self::empty(FileMode::Reader, settings);
        file.next_id = snapshot.next_id;

        let mut objects = snapshot.objects;
        objects.sort_by_key(|(id, _)| *id);
        for (id, object) in objects {
            if id == INVALID_CKID || id >= file.next_id {
                return Err(NativeError::bad_format(path, format!("object id {} out of range", id)));
            }
            if let ObjectBody::Mesh(mesh) = &object.body {
                mesh.validate()
                    .map_err(|e| NativeError::bad_format(path, format!("mesh {}: {}", id, e)))?;
            }

            let kind = object.kind();
            if file.objects.insert(id, object).is_some() {
                return Err(NativeError::bad_format(path, format!("object id {} stored twice", id)));
            }
            file.lists[kind.slot()].push(id);
        }
        file.validate_links()
            .map_err(|e| NativeError::bad_format(path, e.to_string()))?;

        for kind in ObjectKind::ALL {
            log::debug!("Loaded {} {} objects", file.lists[kind.slot()].len(), kind.name());
        }

        file.resolve_external_images(output);
        output.emit(&format!("Loaded {} objects", file.objects.len()));
        Ok(file)
    }

    /// Every stored link must name an existing object of the right kind
    fn validate_links(&self) -> Result<()> {
        for (id, object) in &self.objects {
            match &object.body {
                ObjectBody::Group(group) => {
                    let mut seen = HashSet::new();
                    for member in &group.members {
                        self.check_member(*member)?;
                        if !seen.insert(*member) {
                            return Err(NativeError::AlreadyInGroup { group: *id, member: *member });
                        }
                    }
                }
                ObjectBody::Object3d(entity) => self.check_link(entity.current_mesh, ObjectKind::Mesh)?,
                ObjectBody::TargetLight(light) => self.check_link(light.entity.current_mesh, ObjectKind::Mesh)?,
                ObjectBody::Mesh(mesh) => {
                    for slot in &mesh.material_slots {
                        self.check_link(*slot, ObjectKind::Material)?;
                    }
                }
                ObjectBody::Material(material) => self.check_link(material.texture, ObjectKind::Texture)?,
                ObjectBody::Texture(_) => {}
            }
        }
        Ok(())
    }

    fn resolve_external_images(&mut self, output: Output) {
        let folder = self.settings.texture_folder.clone();
        for id in self.lists[ObjectKind::Texture.slot()].clone() {
            let Ok(texture) = self.texture_mut(id) else {
                continue;
            };
            if texture.image.is_some() {
                continue;
            }
            let Some(file_name) = texture.file_name.clone() else {
                continue;
            };

            match std::fs::read(folder.join(&file_name)) {
                Ok(bytes) => texture.image = Some(bytes),
                Err(_) => output.emit(&format!("Texture image '{}' not found", file_name)),
            }
        }
    }

    /// Persist a writer
    ///
    /// Textures whose own save option is `UseGlobal` follow `texture_save`.
    /// Textures that end up `External` keep only their file name. The
    /// snapshot format carries no compression, so `compress_level` is only
    /// range checked.
    pub fn save(
        &self,
        path: &Path,
        texture_save: CkTextureSaveOptions,
        use_compress: bool,
        compress_level: i32,
    ) -> Result<()> {
        self.require_mode(FileMode::Writer, "save")?;
        if texture_save == CkTextureSaveOptions::UseGlobal {
            return Err(NativeError::InvalidArgument(
                "global texture save option cannot be UseGlobal".to_string(),
            ));
        }
        if use_compress && !(0..=9).contains(&compress_level) {
            return Err(NativeError::InvalidArgument(format!(
                "compress level {} outside 0..=9",
                compress_level
            )));
        }

        let mut objects: Vec<(CkId, ObjectData)> = Vec::with_capacity(self.objects.len());
        for (id, object) in &self.objects {
            let mut object = object.clone();
            if let ObjectBody::Texture(texture) = &mut object.body {
                let effective = match texture.save_options {
                    CkTextureSaveOptions::UseGlobal => texture_save,
                    own => own,
                };
                if effective == CkTextureSaveOptions::External {
                    texture.image = None;
                }
            }
            objects.push((*id, object));
        }
        objects.sort_by_key(|(id, _)| *id);

        let snapshot = Snapshot {
            next_id: self.next_id,
            objects,
        };

        std::fs::write(path, encode_snapshot(&snapshot)?)?;

        log::info!("Saved {} objects to '{}'", self.objects.len(), path.display());
        Ok(())
    }

    pub fn mode(&self) -> FileMode {
        self.mode
    }

    fn require_mode(&self, mode: FileMode, operation: &'static str) -> Result<()> {
        if self.mode == mode {
            Ok(())
        } else {
            Err(NativeError::WrongMode {
                operation,
                mode: self.mode.name(),
            })
        }
    }

    // ========================================================================
    // Enumeration and creation
    // ========================================================================

    /// Number of enumerable objects of a kind, always 0 for writers
    pub fn count(&self, kind: ObjectKind) -> u32 {
        match self.mode {
            FileMode::Reader => self.lists[kind.slot()].len() as u32,
            FileMode::Writer => 0,
        }
    }

    /// Identity of the `index`-th object of a kind
    pub fn get(&self, kind: ObjectKind, index: u32) -> Result<CkId> {
        let len = self.count(kind) as usize;
        self.lists[kind.slot()]
            .get(index as usize)
            .filter(|_| (index as usize) < len)
            .copied()
            .ok_or_else(|| NativeError::out_of_range(kind.name(), index, len))
    }

    /// Create a new object, writers only
    pub fn create_object(&mut self, kind: ObjectKind) -> Result<CkId> {
        self.require_mode(FileMode::Writer, "create")?;

        let id = self.next_id;
        self.next_id = id
            .checked_add(1)
            .ok_or_else(|| NativeError::InvalidArgument("object identities exhausted".to_string()))?;
        self.objects.insert(id, ObjectData::new(kind));
        self.lists[kind.slot()].push(id);

        log::debug!("Created {} {}", kind.name(), id);
        Ok(id)
    }

    // ========================================================================
    // Object access
    // ========================================================================

    pub fn object(&self, id: CkId) -> Result<&ObjectData> {
        self.objects.get(&id).ok_or(NativeError::UnknownObject(id))
    }

    pub fn object_mut(&mut self, id: CkId) -> Result<&mut ObjectData> {
        self.objects.get_mut(&id).ok_or(NativeError::UnknownObject(id))
    }

    /// Accept `id` as a link target of `kind`, identity 0 clears a link
    pub fn check_link(&self, id: CkId, kind: ObjectKind) -> Result<()> {
        if id == INVALID_CKID {
            return Ok(());
        }
        let actual = self.object(id)?.kind();
        if actual == kind {
            Ok(())
        } else {
            Err(NativeError::wrong_kind(id, kind, actual))
        }
    }

    pub fn texture_mut(&mut self, id: CkId) -> Result<&mut TextureData> {
        match &mut self.object_mut(id)?.body {
            ObjectBody::Texture(texture) => Ok(texture),
            other => Err(NativeError::wrong_kind(id, ObjectKind::Texture, other.kind())),
        }
    }

    pub fn material_mut(&mut self, id: CkId) -> Result<&mut MaterialData> {
        match &mut self.object_mut(id)?.body {
            ObjectBody::Material(material) => Ok(material),
            other => Err(NativeError::wrong_kind(id, ObjectKind::Material, other.kind())),
        }
    }

    pub fn mesh_mut(&mut self, id: CkId) -> Result<&mut MeshData> {
        match &mut self.object_mut(id)?.body {
            ObjectBody::Mesh(mesh) => Ok(mesh),
            other => Err(NativeError::wrong_kind(id, ObjectKind::Mesh, other.kind())),
        }
    }

    pub fn group_mut(&mut self, id: CkId) -> Result<&mut GroupData> {
        match &mut self.object_mut(id)?.body {
            ObjectBody::Group(group) => Ok(group),
            other => Err(NativeError::wrong_kind(id, ObjectKind::Group, other.kind())),
        }
    }

    /// 3D entity part of a 3D object or a target light
    pub fn entity_mut(&mut self, id: CkId) -> Result<&mut EntityData> {
        match &mut self.object_mut(id)?.body {
            ObjectBody::Object3d(entity) => Ok(entity),
            ObjectBody::TargetLight(light) => Ok(&mut light.entity),
            other => Err(NativeError::wrong_kind(id, ObjectKind::Object3d, other.kind())),
        }
    }

    pub fn light_mut(&mut self, id: CkId) -> Result<&mut LightData> {
        match &mut self.object_mut(id)?.body {
            ObjectBody::TargetLight(light) => Ok(light),
            other => Err(NativeError::wrong_kind(id, ObjectKind::TargetLight, other.kind())),
        }
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Accept `id` as a group member, only 3D entities can join
    fn check_member(&self, id: CkId) -> Result<()> {
        let kind = self.object(id)?.kind();
        if kind.is_entity() {
            Ok(())
        } else {
            Err(NativeError::wrong_kind(id, ObjectKind::Object3d, kind))
        }
    }

    /// Add an object to a group, an object joins a group at most once
    pub fn add_to_group(&mut self, group: CkId, member: CkId) -> Result<()> {
        self.check_member(member)?;

        let data = self.group_mut(group)?;
        if data.members.contains(&member) {
            return Err(NativeError::AlreadyInGroup { group, member });
        }
        data.members.push(member);
        Ok(())
    }

    /// Commit a staging session into one of this container's meshes
    ///
    /// Every staged slot must name a material of this container.
    pub fn commit_mesh(&mut self, id: CkId, session: &mut MeshTransition) -> Result<()> {
        for slot in session.staged_material_slots()? {
            self.check_link(*slot, ObjectKind::Material)?;
        }
        session.parse_into(self.mesh_mut(id)?)
    }

    /// Read a bitmap file into a texture
    pub fn load_texture_image(&mut self, id: CkId, path: &Path) -> Result<()> {
        self.texture_mut(id)?;
        let bytes = std::fs::read(path)?;
        let texture = self.texture_mut(id)?;
        texture.file_name = path.file_name().map(|name| name.to_string_lossy().into_owned());
        texture.image = Some(bytes);
        Ok(())
    }

    /// Write a texture's bitmap back to disk
    pub fn save_texture_image(&mut self, id: CkId, path: &Path) -> Result<()> {
        let texture = self.texture_mut(id)?;
        let image = texture
            .image
            .as_ref()
            .ok_or_else(|| NativeError::InvalidArgument(format!("texture {} has no image", id)))?;
        std::fs::write(path, image)?;
        Ok(())
    }

    /// Encode a string for the caller
    ///
    /// The pointer stays valid until the next call of this method or until
    /// the container is freed. `None` hands out a null pointer.
    pub fn hand_out_text(&mut self, text: Option<&str>) -> Result<RawText> {
        self.handed_text = text.map(EncodedText::new).transpose()?;
        Ok(self
            .handed_text
            .as_ref()
            .map_or(std::ptr::null(), EncodedText::as_ptr))
    }
}

fn validate_settings(settings: &FileSettings) -> Result<()> {
    if settings.encodings.is_empty() {
        return Err(NativeError::InvalidArgument("at least one encoding is required".to_string()));
    }
    Ok(())
}

fn encode_snapshot(snapshot: &Snapshot) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(SNAPSHOT_MAGIC);
    bytes.extend_from_slice(&SNAPSHOT_VERSION.to_le_bytes());
    bytes.extend(bincode::serialize(snapshot)?);
    Ok(bytes)
}

fn decode_snapshot(path: &Path, bytes: &[u8]) -> Result<Snapshot> {
    let header_len = SNAPSHOT_MAGIC.len() + 4;
    if bytes.len() < header_len || &bytes[..SNAPSHOT_MAGIC.len()] != SNAPSHOT_MAGIC {
        return Err(NativeError::bad_format(path, "missing snapshot header"));
    }

    let mut version = [0u8; 4];
    version.copy_from_slice(&bytes[SNAPSHOT_MAGIC.len()..header_len]);
    let version = u32::from_le_bytes(version);
    if version != SNAPSHOT_VERSION {
        return Err(NativeError::bad_format(path, format!("unsupported version {}", version)));
    }

    Ok(bincode::deserialize(&bytes[header_len..])?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bmap_ffi::{CKShortFaceIndices, VxVector3};

    fn settings() -> FileSettings {
        FileSettings {
            temp_folder: PathBuf::from("temp"),
            texture_folder: PathBuf::from("textures"),
            encodings: vec!["cp1252".to_string()],
        }
    }

    #[test]
    fn test_writer_creates_but_does_not_enumerate() {
        let mut file = BMFile::create(settings(), Output::silent()).unwrap();
        let id = file.create_object(ObjectKind::Mesh).unwrap();
        assert_ne!(id, INVALID_CKID);
        assert_eq!(file.count(ObjectKind::Mesh), 0);
        assert!(file.get(ObjectKind::Mesh, 0).is_err());
        assert!(file.mesh_mut(id).is_ok());
    }

    #[test]
    fn test_encodings_required() {
        let mut empty = settings();
        empty.encodings.clear();
        assert!(BMFile::create(empty, Output::silent()).is_err());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.bmap");

        let mut writer = BMFile::create(settings(), Output::silent()).unwrap();
        let material = writer.create_object(ObjectKind::Material).unwrap();
        let object = writer.create_object(ObjectKind::Object3d).unwrap();
        writer.object_mut(object).unwrap().name = Some("ball".to_string());
        writer.material_mut(material).unwrap().specular_power = 12.0;
        writer
            .save(&path, CkTextureSaveOptions::RawData, false, 0)
            .unwrap();

        let mut reader = BMFile::load(&path, settings(), Output::silent()).unwrap();
        assert_eq!(reader.mode(), FileMode::Reader);
        assert_eq!(reader.count(ObjectKind::Material), 1);
        assert_eq!(reader.count(ObjectKind::Object3d), 1);
        assert_eq!(reader.get(ObjectKind::Object3d, 0).unwrap(), object);
        assert_eq!(reader.object(object).unwrap().name.as_deref(), Some("ball"));
        assert_eq!(reader.material_mut(material).unwrap().specular_power, 12.0);
        assert!(reader.create_object(ObjectKind::Group).is_err());
    }

    #[test]
    fn test_load_rejects_foreign_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("junk.bin");
        std::fs::write(&path, b"definitely not a snapshot").unwrap();
        assert!(matches!(
            BMFile::load(&path, settings(), Output::silent()),
            Err(NativeError::BadFormat { .. })
        ));
    }

    #[test]
    fn test_external_texture_drops_image() {
        let dir = tempfile::tempdir().unwrap();
        let image_path = dir.path().join("wood.bmp");
        std::fs::write(&image_path, [1u8, 2, 3]).unwrap();
        let path = dir.path().join("scene.bmap");

        let mut writer = BMFile::create(settings(), Output::silent()).unwrap();
        let texture = writer.create_object(ObjectKind::Texture).unwrap();
        writer.load_texture_image(texture, &image_path).unwrap();
        writer.save(&path, CkTextureSaveOptions::External, false, 0).unwrap();

        let mut missing = BMFile::load(&path, settings(), Output::silent()).unwrap();
        assert!(missing.texture_mut(texture).unwrap().image.is_none());

        let mut resolved = settings();
        resolved.texture_folder = dir.path().to_path_buf();
        let mut reader = BMFile::load(&path, resolved, Output::silent()).unwrap();
        let data = reader.texture_mut(texture).unwrap();
        assert_eq!(data.file_name.as_deref(), Some("wood.bmp"));
        assert_eq!(data.image.as_deref(), Some(&[1u8, 2, 3][..]));
    }

    #[test]
    fn test_group_membership() {
        let mut file = BMFile::create(settings(), Output::silent()).unwrap();
        let group = file.create_object(ObjectKind::Group).unwrap();
        let object = file.create_object(ObjectKind::Object3d).unwrap();

        file.add_to_group(group, object).unwrap();
        assert!(matches!(
            file.add_to_group(group, object),
            Err(NativeError::AlreadyInGroup { .. })
        ));
        assert!(file.add_to_group(group, group).is_err());
        assert_eq!(file.group_mut(group).unwrap().members, vec![object]);

        let light = file.create_object(ObjectKind::TargetLight).unwrap();
        let mesh = file.create_object(ObjectKind::Mesh).unwrap();
        file.add_to_group(group, light).unwrap();
        assert!(matches!(
            file.add_to_group(group, mesh),
            Err(NativeError::WrongKind { .. })
        ));
    }

    /// Write objects straight to disk, bypassing every writer check
    fn write_raw(path: &Path, objects: Vec<(CkId, ObjectData)>) {
        let next_id = objects.iter().map(|(id, _)| id + 1).max().unwrap_or(1);
        let bytes = encode_snapshot(&Snapshot { next_id, objects }).unwrap();
        std::fs::write(path, bytes).unwrap();
    }

    fn mesh_object(mesh: MeshData) -> ObjectData {
        ObjectData {
            name: None,
            body: ObjectBody::Mesh(mesh),
        }
    }

    #[test]
    fn test_load_rejects_inconsistent_mesh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.bmap");

        let mut mesh = MeshData::default();
        mesh.positions = vec![VxVector3::ZERO; 4];
        mesh.faces = vec![CKShortFaceIndices::new(0, 9, 400)];
        mesh.face_material_slots = vec![0];
        write_raw(&path, vec![(1, mesh_object(mesh))]);

        assert!(matches!(
            BMFile::load(&path, settings(), Output::silent()),
            Err(NativeError::BadFormat { .. })
        ));
    }

    #[test]
    fn test_load_rejects_bad_links() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("links.bmap");

        // Slot names a mesh, not a material
        let mut mesh = MeshData::default();
        mesh.material_slots = vec![1];
        write_raw(&path, vec![(1, mesh_object(mesh))]);
        assert!(BMFile::load(&path, settings(), Output::silent()).is_err());

        // Member that does not exist
        let group = ObjectData {
            name: None,
            body: ObjectBody::Group(GroupData { members: vec![7] }),
        };
        write_raw(&path, vec![(1, group)]);
        assert!(BMFile::load(&path, settings(), Output::silent()).is_err());

        // Same member twice
        let group = ObjectData {
            name: None,
            body: ObjectBody::Group(GroupData { members: vec![2, 2] }),
        };
        write_raw(&path, vec![(1, group), (2, ObjectData::new(ObjectKind::Object3d))]);
        assert!(BMFile::load(&path, settings(), Output::silent()).is_err());
    }

    #[test]
    fn test_load_rejects_duplicate_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("twice.bmap");
        write_raw(
            &path,
            vec![
                (1, ObjectData::new(ObjectKind::Texture)),
                (1, ObjectData::new(ObjectKind::Material)),
            ],
        );
        assert!(matches!(
            BMFile::load(&path, settings(), Output::silent()),
            Err(NativeError::BadFormat { .. })
        ));
    }

    #[test]
    fn test_commit_refuses_non_material_slots() {
        let mut file = BMFile::create(settings(), Output::silent()).unwrap();
        let mesh = file.create_object(ObjectKind::Mesh).unwrap();
        let material = file.create_object(ObjectKind::Material).unwrap();

        let stage = |slot: CkId| {
            let mut trans = MeshTransition::new();
            trans.prepare_vertex_count(0).unwrap();
            trans.prepare_normal_count(0).unwrap();
            trans.prepare_uv_count(0).unwrap();
            trans.prepare_face_count(0).unwrap();
            trans.prepare_material_slot_count(1).unwrap();
            unsafe { *trans.material_slot_memory().unwrap() = slot };
            trans
        };

        let mut trans = stage(mesh);
        assert!(matches!(
            file.commit_mesh(mesh, &mut trans),
            Err(NativeError::WrongKind { .. })
        ));
        assert!(matches!(
            file.commit_mesh(mesh, &mut stage(99)),
            Err(NativeError::UnknownObject(99))
        ));
        assert_eq!(file.mesh_mut(mesh).unwrap().material_slot_count(), 0);

        file.commit_mesh(mesh, &mut stage(material)).unwrap();
        assert_eq!(file.mesh_mut(mesh).unwrap().material_slots, vec![material]);
    }

    #[test]
    fn test_links_check_kind() {
        let mut file = BMFile::create(settings(), Output::silent()).unwrap();
        let texture = file.create_object(ObjectKind::Texture).unwrap();
        let mesh = file.create_object(ObjectKind::Mesh).unwrap();

        assert!(file.check_link(texture, ObjectKind::Texture).is_ok());
        assert!(file.check_link(INVALID_CKID, ObjectKind::Texture).is_ok());
        assert!(matches!(
            file.check_link(mesh, ObjectKind::Texture),
            Err(NativeError::WrongKind { .. })
        ));
    }

    #[test]
    fn test_handed_out_text() {
        let mut file = BMFile::create(settings(), Output::silent()).unwrap();
        let ptr = file.hand_out_text(Some("name")).unwrap();
        assert_eq!(unsafe { bmap_ffi::decode_text(ptr) }.as_deref(), Some("name"));
        assert!(file.hand_out_text(None).unwrap().is_null());
    }
}
