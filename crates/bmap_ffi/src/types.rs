//! C ABI value types shared by both sides of the BMap boundary
//!
//! Everything here is `#[repr(C)]` and passed by value or through
//! out-pointers. Booleans cross as one byte, enums cross as `u32`.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::ffi::{c_char, c_void};

/// Identity of an object inside one container
pub type CkId = u32;

/// Identity reserved for "no object"
pub const INVALID_CKID: CkId = 0;

/// Borrowed pointer to an encoded string payload
pub type RawText = *const c_char;

/// Borrowed pointer to an encoded string array payload
pub type RawTextArray = *const *const c_char;

/// Opaque pointer to a native object container
pub type BMFilePtr = *mut c_void;

/// Opaque pointer to a native geometry staging session
pub type MeshTransPtr = *mut c_void;

/// Sink for text emitted by the native side while a container is opened
pub type OutputCallback = unsafe extern "C" fn(message: RawText);

// ============================================================================
// Vectors
// ============================================================================

/// Two component float vector
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct VxVector2 {
    pub x: f32,
    pub y: f32,
}

impl VxVector2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<glam::Vec2> for VxVector2 {
    fn from(v: glam::Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<VxVector2> for glam::Vec2 {
    fn from(v: VxVector2) -> Self {
        glam::Vec2::new(v.x, v.y)
    }
}

/// Three component float vector
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct VxVector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl VxVector3 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl From<glam::Vec3> for VxVector3 {
    fn from(v: glam::Vec3) -> Self {
        Self { x: v.x, y: v.y, z: v.z }
    }
}

impl From<VxVector3> for glam::Vec3 {
    fn from(v: VxVector3) -> Self {
        glam::Vec3::new(v.x, v.y, v.z)
    }
}

// ============================================================================
// Colour and matrix
// ============================================================================

/// RGBA colour with float channels in `[0, 1]`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct VxColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for VxColor {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }
}

impl VxColor {
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };

    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque colour from RGB channels
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Unpack an `0xAARRGGBB` dword
    pub fn from_dword(value: u32) -> Self {
        let channel = |shift: u32| ((value >> shift) & 0xFF) as f32 / 255.0;
        Self {
            r: channel(16),
            g: channel(8),
            b: channel(0),
            a: channel(24),
        }
    }

    /// Pack into an `0xAARRGGBB` dword, clamping every channel first
    pub fn to_dword(&self) -> u32 {
        let c = self.clamped();
        let channel = |v: f32| (v * 255.0) as u32 & 0xFF;
        (channel(c.a) << 24) | (channel(c.r) << 16) | (channel(c.g) << 8) | channel(c.b)
    }

    /// Copy with every channel clamped to `[0, 1]`
    pub fn clamped(&self) -> Self {
        Self {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
            a: self.a.clamp(0.0, 1.0),
        }
    }
}

/// Row-major 4x4 matrix
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct VxMatrix {
    pub data: [[f32; 4]; 4],
}

impl VxMatrix {
    pub const IDENTITY: Self = Self {
        data: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub fn new(data: [[f32; 4]; 4]) -> Self {
        Self { data }
    }
}

impl Default for VxMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// Rows of VxMatrix line up with glam's columns: both keep the translation in
// the fourth group of four floats.
impl From<glam::Mat4> for VxMatrix {
    fn from(m: glam::Mat4) -> Self {
        Self { data: m.to_cols_array_2d() }
    }
}

impl From<VxMatrix> for glam::Mat4 {
    fn from(m: VxMatrix) -> Self {
        glam::Mat4::from_cols_array_2d(&m.data)
    }
}

// ============================================================================
// Face indices
// ============================================================================

/// Corner indices of one triangle as staged for upload
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct CKFaceIndices {
    pub i1: u32,
    pub i2: u32,
    pub i3: u32,
}

impl CKFaceIndices {
    pub fn new(i1: u32, i2: u32, i3: u32) -> Self {
        Self { i1, i2, i3 }
    }
}

impl From<[u32; 3]> for CKFaceIndices {
    fn from(v: [u32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

/// Corner indices of one triangle as stored in a committed mesh
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize)]
pub struct CKShortFaceIndices {
    pub i1: u16,
    pub i2: u16,
    pub i3: u16,
}

impl CKShortFaceIndices {
    pub fn new(i1: u16, i2: u16, i3: u16) -> Self {
        Self { i1, i2, i3 }
    }
}

// ============================================================================
// Enumerations
// ============================================================================

/// Enumeration that crosses the boundary as its `u32` discriminant
pub trait FfiEnum: Copy + Sized {
    /// Type name used in diagnostics
    const NAME: &'static str;

    /// Convert a raw discriminant, `None` if it names no variant
    fn from_raw(raw: u32) -> Option<Self>;

    /// Raw discriminant
    fn to_raw(self) -> u32;
}

macro_rules! ffi_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(u32)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* $variant = $value),+
        }

        impl FfiEnum for $name {
            const NAME: &'static str = stringify!($name);

            fn from_raw(raw: u32) -> Option<Self> {
                match raw {
                    $($value => Some(Self::$variant),)+
                    _ => None,
                }
            }

            fn to_raw(self) -> u32 {
                self as u32
            }
        }
    };
}

ffi_enum! {
    /// How a texture's bitmap is stored when the container is saved
    CkTextureSaveOptions {
        /// Raw 32 bit per pixel data inside the file
        RawData = 0,
        /// Only the file name, the bitmap must be present when loading
        External = 1,
        /// Converted to the texture's image format and stored inside
        ImageFormat = 2,
        /// Follow the container-wide setting
        UseGlobal = 3,
        /// Original image file appended to the container
        IncludeOriginalFile = 4,
    }
}

impl Default for CkTextureSaveOptions {
    fn default() -> Self {
        Self::RawData
    }
}

ffi_enum! {
    /// Pixel layout of a texture in video memory
    VxPixelFormat {
        Argb8888_32 = 1,
        Rgb888_32 = 2,
        Rgb888_24 = 3,
        Rgb565_16 = 4,
        Rgb555_16 = 5,
        Argb1555_16 = 6,
        Argb4444_16 = 7,
        Rgb332_8 = 8,
        Argb2222_8 = 9,
        Abgr8888_32 = 10,
        Rgba8888_32 = 11,
        Bgra8888_32 = 12,
        Bgr888_32 = 13,
        Bgr888_24 = 14,
        Bgr565_16 = 15,
        Bgr555_16 = 16,
        Abgr1555_16 = 17,
        Abgr4444_16 = 18,
        Dxt1 = 19,
        Dxt2 = 20,
        Dxt3 = 21,
        Dxt4 = 22,
        Dxt5 = 23,
        V8U8_16 = 24,
        V16U16_32 = 25,
        L6V5U5_16 = 26,
        X8L8V8U8_32 = 27,
        Abgr8888Clut8 = 28,
        Argb8888Clut8 = 29,
        Abgr8888Clut4 = 30,
        Argb8888Clut4 = 31,
    }
}

ffi_enum! {
    /// How a texture is combined with the material colour
    VxTextureBlendMode {
        Decal = 1,
        Modulate = 2,
        DecalAlpha = 3,
        ModulateAlpha = 4,
        DecalMask = 5,
        ModulateMask = 6,
        Copy = 7,
        Add = 8,
        DotProduct3 = 9,
        Max = 10,
    }
}

ffi_enum! {
    /// Texture minification and magnification filter
    VxTextureFilterMode {
        Nearest = 1,
        Linear = 2,
        MipNearest = 3,
        MipLinear = 4,
        LinearMipNearest = 5,
        LinearMipLinear = 6,
        Anisotropic = 7,
    }
}

ffi_enum! {
    /// Texture coordinate addressing outside `[0, 1]`
    VxTextureAddressMode {
        Wrap = 1,
        Mirror = 2,
        Clamp = 3,
        Border = 4,
        MirrorOnce = 5,
    }
}

ffi_enum! {
    /// Framebuffer blend factor
    VxBlendMode {
        Zero = 1,
        One = 2,
        SrcColor = 3,
        InvSrcColor = 4,
        SrcAlpha = 5,
        InvSrcAlpha = 6,
        DestAlpha = 7,
        InvDestAlpha = 8,
        DestColor = 9,
        InvDestColor = 10,
        SrcAlphaSat = 11,
    }
}

ffi_enum! {
    /// Polygon rasterisation mode
    VxFillMode {
        Point = 1,
        Wireframe = 2,
        Solid = 3,
    }
}

ffi_enum! {
    /// Polygon shading mode
    VxShadeMode {
        Flat = 1,
        Gouraud = 2,
        Phong = 3,
    }
}

ffi_enum! {
    /// Comparison used by alpha and depth tests
    VxCmpFunc {
        Never = 1,
        Less = 2,
        Equal = 3,
        LessEqual = 4,
        Greater = 5,
        NotEqual = 6,
        GreaterEqual = 7,
        Always = 8,
    }
}

ffi_enum! {
    /// Whether a mesh is lit by the renderer or carries baked colours
    VxMeshLitMode {
        PreLit = 0,
        Lit = 1,
    }
}

ffi_enum! {
    /// Light source shape
    VxLightType {
        Point = 1,
        Spot = 2,
        Directional = 3,
        /// Obsolete
        Parallel = 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_dword_unpack() {
        let color = VxColor::from_dword(0x80FF0000);
        assert_eq!(color.r, 1.0);
        assert_eq!(color.g, 0.0);
        assert_eq!(color.b, 0.0);
        assert!((color.a - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_color_dword_clamps() {
        let color = VxColor::new(2.0, -1.0, 1.0, 1.0);
        assert_eq!(color.to_dword(), 0xFFFF00FF);
        assert_eq!(VxColor::from_dword(0x12345678).to_dword(), 0x12345678);
    }

    #[test]
    fn test_enum_raw_values() {
        assert_eq!(VxPixelFormat::Argb8888Clut4.to_raw(), 31);
        assert_eq!(VxMeshLitMode::from_raw(0), Some(VxMeshLitMode::PreLit));
        assert_eq!(VxFillMode::from_raw(0), None);
        assert_eq!(CkTextureSaveOptions::from_raw(4), Some(CkTextureSaveOptions::IncludeOriginalFile));
        assert_eq!(VxCmpFunc::NAME, "VxCmpFunc");
    }

    #[test]
    fn test_layouts() {
        assert_eq!(std::mem::size_of::<VxVector2>(), 8);
        assert_eq!(std::mem::size_of::<VxVector3>(), 12);
        assert_eq!(std::mem::size_of::<VxColor>(), 16);
        assert_eq!(std::mem::size_of::<VxMatrix>(), 64);
        assert_eq!(std::mem::size_of::<CKFaceIndices>(), 12);
        assert_eq!(std::mem::size_of::<CKShortFaceIndices>(), 6);
    }

    #[test]
    fn test_matrix_glam_round_trip() {
        let mut m = VxMatrix::IDENTITY;
        m.data[3] = [1.0, 2.0, 3.0, 1.0];
        let g: glam::Mat4 = m.into();
        assert_eq!(g.w_axis, glam::Vec4::new(1.0, 2.0, 3.0, 1.0));
        assert_eq!(VxMatrix::from(g), m);
    }
}
