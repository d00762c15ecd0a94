//! Loading a BMap library and owning its global lifecycle
//!
//! A [`BMapLibrary`] is the resolved entry point table plus whatever keeps
//! the code behind it alive. Constructing one calls `BMInit`, dropping the
//! last `Arc` calls `BMDispose`. Every container and staging session holds an
//! `Arc` to the library it came from, so dispose always runs last.

use crate::error::{check, BMapError, Result};
use bmap_ffi::{symbols, BMapVTable};
use libloading::{Library, Symbol};
use std::ffi::c_void;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// An initialized BMap library
pub struct BMapLibrary {
    vtable: BMapVTable,
    /// Path or label shown in diagnostics
    name: String,
    /// Shared library backing `vtable`, `None` when linked in-process
    _library: Option<Library>,
}

impl BMapLibrary {
    /// Load a BMap shared library and resolve every entry point
    pub fn load(path: impl AsRef<Path>) -> Result<Arc<Self>> {
        let path = path.as_ref();

        let library = unsafe {
            Library::new(path).map_err(|e| BMapError::load_error(path, e.to_string()))?
        };

        let vtable = unsafe {
            BMapVTable::resolve_with(|symbol| {
                library
                    .get(symbol.as_bytes())
                    .ok()
                    .map(|s: Symbol<unsafe extern "C" fn()>| *s as *const c_void)
            })
        }
        .map_err(|symbol| BMapError::symbol_not_found(path.display().to_string(), symbol))?;

        Self::start(vtable, path.display().to_string(), Some(library))
    }

    /// Use the reference engine linked into this process
    #[cfg(feature = "builtin")]
    pub fn builtin() -> Result<Arc<Self>> {
        Self::start(bmap_native::vtable(), "builtin".to_string(), None)
    }

    /// Use an entry point table obtained some other way
    pub fn from_vtable(vtable: BMapVTable) -> Result<Arc<Self>> {
        Self::start(vtable, "vtable".to_string(), None)
    }

    fn start(vtable: BMapVTable, name: String, library: Option<Library>) -> Result<Arc<Self>> {
        check(unsafe { (vtable.bm_init)() }, symbols::bm_init)?;
        log::info!("Initialized BMap library '{}'", name);

        Ok(Arc::new(Self {
            vtable,
            name,
            _library: library,
        }))
    }

    /// Conventional file name of the library on this platform
    pub fn default_file_name() -> &'static str {
        if cfg!(target_os = "windows") {
            "BMap.dll"
        } else if cfg!(target_os = "macos") {
            "BMap.dylib"
        } else if cfg!(target_os = "linux") {
            "BMap.so"
        } else {
            "BMap.bin"
        }
    }

    /// Resolved entry points
    pub fn vtable(&self) -> &BMapVTable {
        &self.vtable
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for BMapLibrary {
    fn drop(&mut self) {
        if unsafe { (self.vtable.bm_dispose)() } {
            log::info!("Disposed BMap library '{}'", self.name);
        } else {
            log::error!("BMDispose failed for '{}'", self.name);
        }
    }
}

impl fmt::Debug for BMapLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BMapLibrary")
            .field("name", &self.name)
            .field("dynamic", &self._library.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_name() {
        let name = BMapLibrary::default_file_name();
        assert!(name.starts_with("BMap."));
        #[cfg(target_os = "linux")]
        assert_eq!(name, "BMap.so");
    }

    #[test]
    fn test_missing_library() {
        match BMapLibrary::load("/nonexistent/BMap.so") {
            Err(BMapError::LoadError { path, .. }) => {
                assert_eq!(path, Path::new("/nonexistent/BMap.so"))
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[cfg(feature = "builtin")]
    #[test]
    fn test_builtin_initializes() {
        let library = BMapLibrary::builtin().unwrap();
        assert_eq!(library.name(), "builtin");
        assert!(format!("{:?}", library).contains("builtin"));
    }

    #[cfg(feature = "builtin")]
    #[test]
    fn test_from_vtable() {
        let library = BMapLibrary::from_vtable(bmap_native::vtable()).unwrap();
        assert_eq!(library.name(), "vtable");
        assert_eq!(library.vtable().bm_init as usize, bmap_native::BMInit as usize);
    }
}
