//! Texture accessors

use crate::dispatch::{self, enum_accessors};
use crate::error::Result;
use crate::object::BMTexture;
use bmap_ffi::{symbols, CkTextureSaveOptions, VxPixelFormat};
use std::path::Path;

impl<'f> BMTexture<'f> {
    /// File name of the bitmap, without directories
    pub fn file_name(&self) -> Result<Option<String>> {
        dispatch::get_text(
            self.handle(),
            self.id(),
            self.vtable().bmtexture_get_file_name,
            symbols::bmtexture_get_file_name,
        )
    }

    /// Replace the bitmap with the contents of an image file
    pub fn load_image(&self, path: impl AsRef<Path>) -> Result<()> {
        dispatch::set_text(
            self.handle(),
            self.id(),
            self.vtable().bmtexture_load_image,
            Some(&*path.as_ref().to_string_lossy()),
            symbols::bmtexture_load_image,
        )
    }

    /// Write the bitmap out to an image file
    pub fn save_image(&self, path: impl AsRef<Path>) -> Result<()> {
        dispatch::set_text(
            self.handle(),
            self.id(),
            self.vtable().bmtexture_save_image,
            Some(&*path.as_ref().to_string_lossy()),
            symbols::bmtexture_save_image,
        )
    }

    enum_accessors! {
        /// How the bitmap is stored when the container is saved
        save_options, set_save_options: CkTextureSaveOptions => bmtexture_get_save_options, bmtexture_set_save_options;
        video_format, set_video_format: VxPixelFormat => bmtexture_get_video_format, bmtexture_set_video_format;
    }
}

#[cfg(all(test, feature = "builtin"))]
mod tests {
    use crate::prelude::*;

    #[test]
    fn test_texture_properties() {
        let library = BMapLibrary::builtin().unwrap();
        let file = BMFileWriter::create_with_sink(&library, &FileOptions::default(), &OutputSink::silent()).unwrap();
        let texture = file.create_texture().unwrap();

        assert_eq!(texture.file_name().unwrap(), None);
        assert_eq!(texture.save_options().unwrap(), CkTextureSaveOptions::UseGlobal);

        texture.set_save_options(CkTextureSaveOptions::External).unwrap();
        texture.set_video_format(VxPixelFormat::Rgb565_16).unwrap();
        assert_eq!(texture.save_options().unwrap(), CkTextureSaveOptions::External);
        assert_eq!(texture.video_format().unwrap(), VxPixelFormat::Rgb565_16);
    }

    #[test]
    fn test_image_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("brick.bmp");
        std::fs::write(&source, b"BM fake bitmap").unwrap();

        let library = BMapLibrary::builtin().unwrap();
        let file = BMFileWriter::create_with_sink(&library, &FileOptions::default(), &OutputSink::silent()).unwrap();
        let texture = file.create_texture().unwrap();

        texture.load_image(&source).unwrap();
        assert_eq!(texture.file_name().unwrap().as_deref(), Some("brick.bmp"));

        let copy = dir.path().join("copy.bmp");
        texture.save_image(&copy).unwrap();
        assert_eq!(std::fs::read(copy).unwrap(), b"BM fake bitmap");
    }

    #[test]
    fn test_missing_image_fails() {
        let library = BMapLibrary::builtin().unwrap();
        let file = BMFileWriter::create_with_sink(&library, &FileOptions::default(), &OutputSink::silent()).unwrap();
        let texture = file.create_texture().unwrap();

        assert!(matches!(
            texture.load_image("/nonexistent/brick.bmp"),
            Err(BMapError::OperationFailed { operation: "BMTexture_LoadImage" })
        ));
    }
}
