//! Owning handle to a native container

use crate::config::{FileOptions, SaveOptions};
use crate::enumerate::ObjectIter;
use crate::error::{check, BMapError, Result};
use crate::library::BMapLibrary;
use crate::object::{ObjectKind, ObjectRef};
use crate::output::{OutputSink, SinkGuard};
use bmap_ffi::{
    symbols, BMFilePtr, BMapVTable, CkId, EncodedText, EncodedTextArray, FfiEnum, INVALID_CKID,
};
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::ptr;
use std::sync::Arc;

/// Exclusive owner of one native container
///
/// The container is freed exactly once, either by [`FileHandle::close`] or
/// on drop. Objects borrowed from the handle cannot outlive it.
pub struct FileHandle {
    library: Arc<BMapLibrary>,
    ptr: BMFilePtr,
}

impl FileHandle {
    /// Take ownership of a raw container pointer
    ///
    /// # Safety
    /// `ptr` must be null or a container created by `library` that nothing
    /// else will free.
    pub unsafe fn from_raw(library: Arc<BMapLibrary>, ptr: BMFilePtr) -> Self {
        Self { library, ptr }
    }

    /// Load a container from disk, or create an empty one when `path` is `None`
    pub(crate) fn open(
        library: &Arc<BMapLibrary>,
        path: Option<&Path>,
        options: &FileOptions,
        sink: &OutputSink,
    ) -> Result<Self> {
        let vtable = library.vtable();
        let temp_folder = EncodedText::new(&options.temp_folder.to_string_lossy())?;
        let texture_folder = EncodedText::new(&options.texture_folder.to_string_lossy())?;
        let encodings: Vec<Option<&str>> = options.encodings.iter().map(|e| Some(e.as_str())).collect();
        let encodings = EncodedTextArray::new(&encodings)?;

        let mut raw: BMFilePtr = ptr::null_mut();
        let (ok, operation) = {
            let guard = SinkGuard::install(sink);
            match path {
                Some(path) => {
                    let file_name = EncodedText::new(&path.to_string_lossy())?;
                    let ok = unsafe {
                        (vtable.bmfile_load)(
                            file_name.as_ptr(),
                            temp_folder.as_ptr(),
                            texture_folder.as_ptr(),
                            guard.callback(),
                            encodings.len(),
                            encodings.as_ptr(),
                            &mut raw,
                        )
                    };
                    (ok, symbols::bmfile_load)
                }
                None => {
                    let ok = unsafe {
                        (vtable.bmfile_create)(
                            temp_folder.as_ptr(),
                            texture_folder.as_ptr(),
                            guard.callback(),
                            encodings.len(),
                            encodings.as_ptr(),
                            &mut raw,
                        )
                    };
                    (ok, symbols::bmfile_create)
                }
            }
        };

        check(ok, operation)?;
        if raw.is_null() {
            return Err(BMapError::NullArgument(operation));
        }

        log::debug!("Opened container {:p} through {}", raw, operation);
        Ok(unsafe { Self::from_raw(library.clone(), raw) })
    }

    pub fn as_ptr(&self) -> BMFilePtr {
        self.ptr
    }

    pub fn is_valid(&self) -> bool {
        !self.ptr.is_null()
    }

    pub fn library(&self) -> &Arc<BMapLibrary> {
        &self.library
    }

    pub(crate) fn vtable(&self) -> &BMapVTable {
        self.library.vtable()
    }

    /// Number of objects of kind `K`
    pub fn count<K: ObjectKind>(&self) -> Result<u32> {
        let (count_fn, operation) = K::count_entry(self.vtable());
        let mut count = 0;
        check(unsafe { count_fn(self.ptr, &mut count) }, operation)?;
        Ok(count)
    }

    /// Object of kind `K` at `index`
    pub fn object_at<K: ObjectKind>(&self, index: u32) -> Result<ObjectRef<'_, K>> {
        let (get_fn, operation) = K::get_entry(self.vtable());
        let mut id: CkId = INVALID_CKID;
        check(unsafe { get_fn(self.ptr, index, &mut id) }, operation)?;
        Ok(ObjectRef::new(self, id))
    }

    /// Lazily enumerate every object of kind `K`
    pub fn objects<K: ObjectKind>(&self) -> ObjectIter<'_, K> {
        ObjectIter::in_file(self)
    }

    /// Create a new object of kind `K`
    pub fn create<K: ObjectKind>(&self) -> Result<ObjectRef<'_, K>> {
        let (create_fn, operation) = K::create_entry(self.vtable());
        let mut id: CkId = INVALID_CKID;
        check(unsafe { create_fn(self.ptr, &mut id) }, operation)?;
        Ok(ObjectRef::new(self, id))
    }

    /// Write the container to `path`
    pub fn save(&self, path: impl AsRef<Path>, options: &SaveOptions) -> Result<()> {
        let path = path.as_ref();
        let file_name = EncodedText::new(&path.to_string_lossy())?;
        check(
            unsafe {
                (self.vtable().bmfile_save)(
                    self.ptr,
                    file_name.as_ptr(),
                    options.texture_save_options.to_raw(),
                    options.use_compress,
                    options.compress_level,
                )
            },
            symbols::bmfile_save,
        )?;

        log::info!("Saved container to '{}'", path.display());
        Ok(())
    }

    /// Free the container, reporting a failed release
    pub fn close(mut self) -> Result<()> {
        self.release()
    }

    fn release(&mut self) -> Result<()> {
        if self.ptr.is_null() {
            return Ok(());
        }

        let raw = std::mem::replace(&mut self.ptr, ptr::null_mut());
        log::debug!("Releasing container {:p}", raw);
        check(unsafe { (self.vtable().bmfile_free)(raw) }, symbols::bmfile_free)
    }
}

impl Drop for FileHandle {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            log::error!("Failed to release container: {}", e);
        }
    }
}

impl PartialEq for FileHandle {
    fn eq(&self, other: &Self) -> bool {
        self.ptr == other.ptr
    }
}

impl Eq for FileHandle {}

impl Hash for FileHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.ptr as usize).hash(state);
    }
}

impl std::fmt::Debug for FileHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileHandle")
            .field("ptr", &self.ptr)
            .field("library", &self.library.name())
            .finish()
    }
}
