//! Options for opening and saving containers
//!
//! Both structs deserialize from TOML with every field optional:
//!
//! ```toml
//! temp_folder = "/tmp/bmap"
//! texture_folder = "assets/textures"
//! encodings = ["cp1252", "gbk"]
//! ```

use crate::error::Result;
use bmap_ffi::CkTextureSaveOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings passed when a container is loaded or created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOptions {
    /// Scratch directory the native side may write to
    pub temp_folder: PathBuf,
    /// Directory external textures are resolved against
    pub texture_folder: PathBuf,
    /// Legacy 8-bit encodings tried in order when reading names
    pub encodings: Vec<String>,
}

impl Default for FileOptions {
    fn default() -> Self {
        Self {
            temp_folder: std::env::temp_dir(),
            texture_folder: PathBuf::from("."),
            encodings: vec!["cp1252".to_string()],
        }
    }
}

impl FileOptions {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn with_temp_folder(mut self, path: impl Into<PathBuf>) -> Self {
        self.temp_folder = path.into();
        self
    }

    pub fn with_texture_folder(mut self, path: impl Into<PathBuf>) -> Self {
        self.texture_folder = path.into();
        self
    }

    pub fn with_encodings<S: Into<String>>(mut self, encodings: impl IntoIterator<Item = S>) -> Self {
        self.encodings = encodings.into_iter().map(Into::into).collect();
        self
    }
}

/// Settings for writing a container to disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveOptions {
    /// How textures without their own setting store their bitmaps
    pub texture_save_options: CkTextureSaveOptions,
    pub use_compress: bool,
    /// 0 to 9, only checked when compressing
    pub compress_level: i32,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            texture_save_options: CkTextureSaveOptions::RawData,
            use_compress: true,
            compress_level: 5,
        }
    }
}

impl SaveOptions {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
