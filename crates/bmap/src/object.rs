//! Typed, non-owning references to objects inside a container
//!
//! An [`ObjectRef`] is a (container, identity) pair tagged with a kind
//! marker. It borrows the [`FileHandle`] so it can never outlive the
//! container, but otherwise owns nothing and is freely copied.
//!
//! The kind tag is trusted. Reinterpreting an identity as the wrong kind is
//! caught by the native side as a failed call, not here.

use crate::dispatch;
use crate::error::Result;
use crate::handle::FileHandle;
use bmap_ffi::{symbols, BMFilePtr, BMapVTable, CkId, INVALID_CKID};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Entry point returning how many objects of a kind a container holds
pub type CountFn = unsafe extern "C" fn(BMFilePtr, *mut u32) -> bool;
/// Entry point returning the identity at an index
pub type GetFn = unsafe extern "C" fn(BMFilePtr, u32, *mut CkId) -> bool;
/// Entry point creating a new object
pub type CreateFn = unsafe extern "C" fn(BMFilePtr, *mut CkId) -> bool;

/// Kind of object a container can enumerate and create
pub trait ObjectKind: 'static {
    /// Kind name used in diagnostics
    const NAME: &'static str;

    fn count_entry(vtable: &BMapVTable) -> (CountFn, &'static str);
    fn get_entry(vtable: &BMapVTable) -> (GetFn, &'static str);
    fn create_entry(vtable: &BMapVTable) -> (CreateFn, &'static str);
}

/// Kinds placed in the 3D world, sharing the entity accessors
pub trait Entity3dKind: ObjectKind {}

macro_rules! object_kinds {
    ($(
        $(#[$meta:meta])*
        $kind:ident as $alias:ident: $count:ident, $get:ident, $create:ident;
    )+) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
            pub enum $kind {}

            impl ObjectKind for $kind {
                const NAME: &'static str = stringify!($kind);

                fn count_entry(vtable: &BMapVTable) -> (CountFn, &'static str) {
                    (vtable.$count, symbols::$count)
                }

                fn get_entry(vtable: &BMapVTable) -> (GetFn, &'static str) {
                    (vtable.$get, symbols::$get)
                }

                fn create_entry(vtable: &BMapVTable) -> (CreateFn, &'static str) {
                    (vtable.$create, symbols::$create)
                }
            }

            pub type $alias<'f> = ObjectRef<'f, $kind>;
        )+
    };
}

object_kinds! {
    /// Bitmap texture
    Texture as BMTexture: bmfile_get_texture_count, bmfile_get_texture, bmfile_create_texture;
    /// Surface material
    Material as BMMaterial: bmfile_get_material_count, bmfile_get_material, bmfile_create_material;
    /// Triangle mesh
    Mesh as BMMesh: bmfile_get_mesh_count, bmfile_get_mesh, bmfile_create_mesh;
    /// Placed 3D object
    Object3d as BM3dObject: bmfile_get_3dobject_count, bmfile_get_3dobject, bmfile_create_3dobject;
    /// Named set of 3D objects
    Group as BMGroup: bmfile_get_group_count, bmfile_get_group, bmfile_create_group;
    /// Light with a target
    TargetLight as BMTargetLight: bmfile_get_target_light_count, bmfile_get_target_light, bmfile_create_target_light;
}

impl Entity3dKind for Object3d {}
impl Entity3dKind for TargetLight {}

/// Reference to one object of kind `K` inside a container
pub struct ObjectRef<'f, K: ObjectKind> {
    handle: &'f FileHandle,
    id: CkId,
    _kind: PhantomData<K>,
}

impl<'f, K: ObjectKind> ObjectRef<'f, K> {
    pub fn new(handle: &'f FileHandle, id: CkId) -> Self {
        Self {
            handle,
            id,
            _kind: PhantomData,
        }
    }

    pub fn id(&self) -> CkId {
        self.id
    }

    pub fn handle(&self) -> &'f FileHandle {
        self.handle
    }

    /// Whether both the container and the identity are set
    pub fn is_valid(&self) -> bool {
        self.handle.is_valid() && self.id != INVALID_CKID
    }

    pub(crate) fn vtable(&self) -> &'f BMapVTable {
        self.handle.library().vtable()
    }

    pub fn name(&self) -> Result<Option<String>> {
        dispatch::get_text(
            self.handle,
            self.id,
            self.vtable().bmobject_get_name,
            symbols::bmobject_get_name,
        )
    }

    /// Set or clear the name
    pub fn set_name(&self, name: Option<&str>) -> Result<()> {
        dispatch::set_text(
            self.handle,
            self.id,
            self.vtable().bmobject_set_name,
            name,
            symbols::bmobject_set_name,
        )
    }
}

impl<K: ObjectKind> Clone for ObjectRef<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: ObjectKind> Copy for ObjectRef<'_, K> {}

impl<K: ObjectKind> PartialEq for ObjectRef<'_, K> {
    fn eq(&self, other: &Self) -> bool {
        self.handle.as_ptr() == other.handle.as_ptr() && self.id == other.id
    }
}

impl<K: ObjectKind> Eq for ObjectRef<'_, K> {}

impl<K: ObjectKind> Hash for ObjectRef<'_, K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.handle.as_ptr() as usize).hash(state);
        self.id.hash(state);
    }
}

impl<K: ObjectKind> fmt::Debug for ObjectRef<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:p}, {})", K::NAME, self.handle.as_ptr(), self.id)
    }
}

#[cfg(all(test, feature = "builtin"))]
mod tests {
    use super::*;
    use crate::config::FileOptions;
    use crate::library::BMapLibrary;
    use crate::output::OutputSink;
    use std::collections::HashSet;

    fn writer(library: &std::sync::Arc<BMapLibrary>) -> FileHandle {
        FileHandle::open(library, None, &FileOptions::default(), &OutputSink::silent()).unwrap()
    }

    #[test]
    fn test_equality_and_hash() {
        let library = BMapLibrary::builtin().unwrap();
        let file = writer(&library);
        let other = writer(&library);

        let a = BMMesh::new(&file, 7);
        let b = BMMesh::new(&file, 7);
        assert_eq!(a, b);

        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);

        assert_ne!(a, BMMesh::new(&file, 8));
        assert_ne!(a, BMMesh::new(&other, 7));
    }

    #[test]
    fn test_invalid_references() {
        let library = BMapLibrary::builtin().unwrap();
        let file = writer(&library);
        assert!(!BMTexture::new(&file, INVALID_CKID).is_valid());

        let null = unsafe { FileHandle::from_raw(library.clone(), std::ptr::null_mut()) };
        assert!(!BMTexture::new(&null, 3).is_valid());
    }

    #[test]
    fn test_names() {
        let library = BMapLibrary::builtin().unwrap();
        let file = writer(&library);
        let material = file.create::<Material>().unwrap();
        assert!(material.is_valid());
        assert_eq!(material.name().unwrap(), None);

        material.set_name(Some("Stone")).unwrap();
        assert_eq!(material.name().unwrap().as_deref(), Some("Stone"));

        material.set_name(None).unwrap();
        assert_eq!(material.name().unwrap(), None);
    }

    #[test]
    fn test_debug_names_kind() {
        let library = BMapLibrary::builtin().unwrap();
        let file = writer(&library);
        assert!(format!("{:?}", BMGroup::new(&file, 1)).starts_with("Group("));
    }
}
