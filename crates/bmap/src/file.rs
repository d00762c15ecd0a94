//! Reader and writer views of a container
//!
//! A container opened from disk can only be enumerated, a freshly created
//! one can only be filled and saved. The two wrappers expose exactly those
//! halves of [`FileHandle`].

use crate::config::{FileOptions, SaveOptions};
use crate::enumerate::ObjectIter;
use crate::error::Result;
use crate::handle::FileHandle;
use crate::library::BMapLibrary;
use crate::object::*;
use crate::output::OutputSink;
use std::path::Path;
use std::sync::Arc;

/// Container loaded from disk
#[derive(Debug)]
pub struct BMFileReader {
    handle: FileHandle,
}

impl BMFileReader {
    /// Load a container, printing native output to stdout
    pub fn load(library: &Arc<BMapLibrary>, path: impl AsRef<Path>, options: &FileOptions) -> Result<Self> {
        Self::load_with_sink(library, path, options, &OutputSink::default())
    }

    pub fn load_with_sink(
        library: &Arc<BMapLibrary>,
        path: impl AsRef<Path>,
        options: &FileOptions,
        sink: &OutputSink,
    ) -> Result<Self> {
        let path = path.as_ref();
        let handle = FileHandle::open(library, Some(path), options, sink)?;
        log::info!("Loaded container '{}'", path.display());
        Ok(Self { handle })
    }

    pub fn handle(&self) -> &FileHandle {
        &self.handle
    }

    pub fn count<K: ObjectKind>(&self) -> Result<u32> {
        self.handle.count::<K>()
    }

    pub fn objects<K: ObjectKind>(&self) -> ObjectIter<'_, K> {
        self.handle.objects::<K>()
    }

    pub fn textures(&self) -> ObjectIter<'_, Texture> {
        self.objects()
    }

    pub fn materials(&self) -> ObjectIter<'_, Material> {
        self.objects()
    }

    pub fn meshes(&self) -> ObjectIter<'_, Mesh> {
        self.objects()
    }

    pub fn objects_3d(&self) -> ObjectIter<'_, Object3d> {
        self.objects()
    }

    pub fn groups(&self) -> ObjectIter<'_, Group> {
        self.objects()
    }

    pub fn target_lights(&self) -> ObjectIter<'_, TargetLight> {
        self.objects()
    }

    pub fn close(self) -> Result<()> {
        self.handle.close()
    }
}

/// Container being built for saving
#[derive(Debug)]
pub struct BMFileWriter {
    handle: FileHandle,
}

impl BMFileWriter {
    /// Create an empty container, printing native output to stdout
    pub fn create(library: &Arc<BMapLibrary>, options: &FileOptions) -> Result<Self> {
        Self::create_with_sink(library, options, &OutputSink::default())
    }

    pub fn create_with_sink(library: &Arc<BMapLibrary>, options: &FileOptions, sink: &OutputSink) -> Result<Self> {
        let handle = FileHandle::open(library, None, options, sink)?;
        Ok(Self { handle })
    }

    pub fn handle(&self) -> &FileHandle {
        &self.handle
    }

    pub fn create_object<K: ObjectKind>(&self) -> Result<ObjectRef<'_, K>> {
        self.handle.create::<K>()
    }

    pub fn create_texture(&self) -> Result<BMTexture<'_>> {
        self.create_object()
    }

    pub fn create_material(&self) -> Result<BMMaterial<'_>> {
        self.create_object()
    }

    pub fn create_mesh(&self) -> Result<BMMesh<'_>> {
        self.create_object()
    }

    pub fn create_3dobject(&self) -> Result<BM3dObject<'_>> {
        self.create_object()
    }

    pub fn create_group(&self) -> Result<BMGroup<'_>> {
        self.create_object()
    }

    pub fn create_target_light(&self) -> Result<BMTargetLight<'_>> {
        self.create_object()
    }

    pub fn save(&self, path: impl AsRef<Path>, options: &SaveOptions) -> Result<()> {
        self.handle.save(path, options)
    }

    pub fn close(self) -> Result<()> {
        self.handle.close()
    }
}

#[cfg(all(test, feature = "builtin"))]
mod tests {
    use super::*;
    use crate::error::BMapError;

    #[test]
    fn test_load_missing_file() {
        let library = BMapLibrary::builtin().unwrap();
        let result = BMFileReader::load_with_sink(
            &library,
            "/nonexistent/level.bmap",
            &FileOptions::default(),
            &OutputSink::silent(),
        );
        assert!(matches!(
            result,
            Err(BMapError::OperationFailed { operation: "BMFile_Load" })
        ));
    }

    #[test]
    fn test_empty_encodings_rejected() {
        let library = BMapLibrary::builtin().unwrap();
        let options = FileOptions::default().with_encodings(Vec::<String>::new());
        assert!(BMFileWriter::create_with_sink(&library, &options, &OutputSink::silent()).is_err());
    }

    #[test]
    fn test_save_then_close() {
        let dir = tempfile::tempdir().unwrap();
        let library = BMapLibrary::builtin().unwrap();
        let writer = BMFileWriter::create_with_sink(&library, &FileOptions::default(), &OutputSink::silent()).unwrap();
        writer.create_texture().unwrap();

        let path = dir.path().join("empty.bmap");
        writer.save(&path, &SaveOptions::default()).unwrap();
        writer.close().unwrap();
        assert!(path.exists());
    }
}
