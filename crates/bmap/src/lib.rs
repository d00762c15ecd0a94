//! # bmap - BMap scene container bindings
//!
//! Safe access to a BMap library: load or create scene containers, walk and
//! edit their textures, materials, meshes, 3D objects, groups and lights, and
//! upload mesh geometry in bulk.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌─────────────────┐
//! │   BMap.dll/.so  │────▶│   libloading    │
//! │ or bmap_native  │     │  (BMapVTable)   │
//! └─────────────────┘     └────────┬────────┘
//!                                  │
//!                                  ▼
//! ┌─────────────────┐     ┌─────────────────┐
//! │  BMFileReader   │────▶│   BMapLibrary   │
//! │  BMFileWriter   │     │ (BMInit/Dispose)│
//! └────────┬────────┘     └────────▲────────┘
//!          │                       │
//!          ▼                       │
//! ┌─────────────────┐     ┌────────┴────────┐
//! │ ObjectRef<'f,K> │◀────│    MeshTrans    │
//! │ (typed access)  │     │ (bulk staging)  │
//! └─────────────────┘     └─────────────────┘
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use bmap::prelude::*;
//!
//! let library = BMapLibrary::load(BMapLibrary::default_file_name())?;
//! let options = FileOptions::from_toml_file("bmap.toml")?;
//!
//! let reader = BMFileReader::load(&library, "level.nmo", &options)?;
//! for mesh in reader.meshes() {
//!     let mesh = mesh?;
//!     println!("{:?}: {} faces", mesh.name()?, mesh.face_count()?);
//! }
//! ```
//!
//! Object references borrow the container they came from, so a container
//! cannot be closed while anything still points into it.

mod config;
mod dispatch;
mod entity;
mod enumerate;
mod error;
mod file;
mod group;
mod handle;
mod library;
mod material;
mod mesh;
mod mesh_trans;
mod object;
mod output;
mod texture;

pub use config::{FileOptions, SaveOptions};
pub use enumerate::ObjectIter;
pub use error::{BMapError, Result};
pub use file::{BMFileReader, BMFileWriter};
pub use handle::FileHandle;
pub use library::BMapLibrary;
pub use mesh_trans::MeshTrans;
pub use object::{
    BM3dObject, BMGroup, BMMaterial, BMMesh, BMTargetLight, BMTexture, CountFn, CreateFn,
    Entity3dKind, GetFn, Group, Material, Mesh, Object3d, ObjectKind, ObjectRef, TargetLight,
    Texture,
};
pub use output::OutputSink;

pub use bmap_ffi as ffi;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{FileOptions, SaveOptions};
    pub use crate::enumerate::ObjectIter;
    pub use crate::error::{BMapError, Result};
    pub use crate::file::{BMFileReader, BMFileWriter};
    pub use crate::handle::FileHandle;
    pub use crate::library::BMapLibrary;
    pub use crate::mesh_trans::MeshTrans;
    pub use crate::object::{
        BM3dObject, BMGroup, BMMaterial, BMMesh, BMTargetLight, BMTexture, Entity3dKind, Group,
        Material, Mesh, Object3d, ObjectKind, ObjectRef, TargetLight, Texture,
    };
    pub use crate::output::OutputSink;
    pub use bmap_ffi::{
        CkId, CkTextureSaveOptions, VxColor, VxMatrix, VxPixelFormat, VxVector2, VxVector3,
        INVALID_CKID,
    };
}
