//! Bulk geometry upload through a native staging session
//!
//! Each `prepare_*` call declares a channel's count, fetches the buffer the
//! native side allocated for it and fills it, all in one step. The raw
//! buffer never leaves this module, so a pointer can never be reused after
//! its count changed.
//!
//! A source that runs dry leaves its channel poisoned. [`MeshTrans::parse`]
//! refuses to commit until that channel has been prepared again. Staged
//! material slots must belong to the container of the mesh they are
//! committed into.

use crate::error::{check, BMapError, Result};
use crate::library::BMapLibrary;
use crate::object::{BMMaterial, BMMesh};
use bmap_ffi::{symbols, BMFilePtr, CKFaceIndices, CkId, MeshTransPtr, VxVector2, VxVector3, INVALID_CKID};
use std::ptr;
use std::sync::Arc;

type DeclareFn = unsafe extern "C" fn(MeshTransPtr, u32) -> bool;
type MemoryFn<T> = unsafe extern "C" fn(MeshTransPtr, *mut *mut T) -> bool;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Channel {
    Vertex,
    Normal,
    Uv,
    MaterialSlot,
    Face,
}

impl Channel {
    const ALL: [Channel; 5] = [
        Channel::Vertex,
        Channel::Normal,
        Channel::Uv,
        Channel::MaterialSlot,
        Channel::Face,
    ];

    fn name(self) -> &'static str {
        match self {
            Channel::Vertex => "vertex",
            Channel::Normal => "normal",
            Channel::Uv => "uv",
            Channel::MaterialSlot => "material slot",
            Channel::Face => "face",
        }
    }
}

/// Exclusive owner of one native staging session
pub struct MeshTrans {
    library: Arc<BMapLibrary>,
    ptr: MeshTransPtr,
    /// Channels whose last fill came up short, by `Channel as usize`
    poisoned: [bool; 5],
    /// Container of the staged materials and one of their identities
    slot_owner: Option<(BMFilePtr, CkId)>,
}

impl MeshTrans {
    pub fn new(library: &Arc<BMapLibrary>) -> Result<Self> {
        let mut raw: MeshTransPtr = ptr::null_mut();
        check(
            unsafe { (library.vtable().bmmesh_trans_new)(&mut raw) },
            symbols::bmmesh_trans_new,
        )?;
        if raw.is_null() {
            return Err(BMapError::NullArgument(symbols::bmmesh_trans_new));
        }

        log::debug!("Opened staging session {:p}", raw);
        Ok(Self {
            library: library.clone(),
            ptr: raw,
            poisoned: [false; 5],
            slot_owner: None,
        })
    }

    pub fn as_ptr(&self) -> MeshTransPtr {
        self.ptr
    }

    pub fn is_valid(&self) -> bool {
        !self.ptr.is_null()
    }

    // ========================================================================
    // Channels
    // ========================================================================

    /// Stage `count` vertex positions taken from `positions`
    pub fn prepare_vertices<I>(&mut self, count: u32, positions: I) -> Result<()>
    where
        I: IntoIterator<Item = VxVector3>,
    {
        let library = Arc::clone(&self.library);
        let vtable = library.vtable();
        self.declare(
            Channel::Vertex,
            count,
            vtable.bmmesh_trans_prepare_vertex_count,
            symbols::bmmesh_trans_prepare_vertex_count,
        )?;
        self.fill(
            "vertex",
            count,
            vtable.bmmesh_trans_prepare_vertex,
            symbols::bmmesh_trans_prepare_vertex,
            positions,
        )?;
        self.mark_ready(Channel::Vertex);
        Ok(())
    }

    pub fn prepare_normals<I>(&mut self, count: u32, normals: I) -> Result<()>
    where
        I: IntoIterator<Item = VxVector3>,
    {
        let library = Arc::clone(&self.library);
        let vtable = library.vtable();
        self.declare(
            Channel::Normal,
            count,
            vtable.bmmesh_trans_prepare_normal_count,
            symbols::bmmesh_trans_prepare_normal_count,
        )?;
        self.fill(
            "normal",
            count,
            vtable.bmmesh_trans_prepare_normal,
            symbols::bmmesh_trans_prepare_normal,
            normals,
        )?;
        self.mark_ready(Channel::Normal);
        Ok(())
    }

    pub fn prepare_uvs<I>(&mut self, count: u32, uvs: I) -> Result<()>
    where
        I: IntoIterator<Item = VxVector2>,
    {
        let library = Arc::clone(&self.library);
        let vtable = library.vtable();
        self.declare(
            Channel::Uv,
            count,
            vtable.bmmesh_trans_prepare_uv_count,
            symbols::bmmesh_trans_prepare_uv_count,
        )?;
        self.fill(
            "uv",
            count,
            vtable.bmmesh_trans_prepare_uv,
            symbols::bmmesh_trans_prepare_uv,
            uvs,
        )?;
        self.mark_ready(Channel::Uv);
        Ok(())
    }

    /// Stage the material slot table, `None` leaves a slot empty
    ///
    /// All materials must come from one container, the one of the mesh
    /// later passed to [`MeshTrans::parse`].
    pub fn prepare_material_slots<'m, I>(&mut self, count: u32, materials: I) -> Result<()>
    where
        I: IntoIterator<Item = Option<BMMaterial<'m>>>,
    {
        let library = Arc::clone(&self.library);
        let vtable = library.vtable();
        self.slot_owner = None;
        self.declare(
            Channel::MaterialSlot,
            count,
            vtable.bmmesh_trans_prepare_mtl_slot_count,
            symbols::bmmesh_trans_prepare_mtl_slot_count,
        )?;

        let mut owner: Option<(BMFilePtr, CkId)> = None;
        let mut mixed: Option<CkId> = None;
        let ids = materials.into_iter().map(|material| {
            let Some(material) = material else {
                return INVALID_CKID;
            };
            let handle = material.handle().as_ptr();
            match owner {
                None => owner = Some((handle, material.id())),
                Some((first, _)) if first != handle => {
                    mixed.get_or_insert(material.id());
                }
                Some(_) => {}
            }
            material.id()
        });
        self.fill::<CkId, _>(
            "material slot",
            count,
            vtable.bmmesh_trans_prepare_mtl_slot,
            symbols::bmmesh_trans_prepare_mtl_slot,
            ids,
        )?;
        if let Some(id) = mixed {
            return Err(BMapError::ForeignObject { id });
        }

        self.slot_owner = owner;
        self.mark_ready(Channel::MaterialSlot);
        Ok(())
    }

    /// Stage `count` triangles
    ///
    /// The three index sources address the vertex, normal and UV channels
    /// independently. `material_slots` holds one slot index per face.
    pub fn prepare_faces<V, N, U, S>(
        &mut self,
        count: u32,
        vertex_indices: V,
        normal_indices: N,
        uv_indices: U,
        material_slots: S,
    ) -> Result<()>
    where
        V: IntoIterator,
        V::Item: Into<CKFaceIndices>,
        N: IntoIterator,
        N::Item: Into<CKFaceIndices>,
        U: IntoIterator,
        U::Item: Into<CKFaceIndices>,
        S: IntoIterator<Item = u32>,
    {
        let library = Arc::clone(&self.library);
        let vtable = library.vtable();
        self.declare(
            Channel::Face,
            count,
            vtable.bmmesh_trans_prepare_face_count,
            symbols::bmmesh_trans_prepare_face_count,
        )?;
        self.fill(
            "face vertex indices",
            count,
            vtable.bmmesh_trans_prepare_face_vertex_indices,
            symbols::bmmesh_trans_prepare_face_vertex_indices,
            vertex_indices.into_iter().map(Into::into),
        )?;
        self.fill(
            "face normal indices",
            count,
            vtable.bmmesh_trans_prepare_face_normal_indices,
            symbols::bmmesh_trans_prepare_face_normal_indices,
            normal_indices.into_iter().map(Into::into),
        )?;
        self.fill(
            "face uv indices",
            count,
            vtable.bmmesh_trans_prepare_face_uv_indices,
            symbols::bmmesh_trans_prepare_face_uv_indices,
            uv_indices.into_iter().map(Into::into),
        )?;
        self.fill(
            "face material slots",
            count,
            vtable.bmmesh_trans_prepare_face_mtl_slot,
            symbols::bmmesh_trans_prepare_face_mtl_slot,
            material_slots,
        )?;
        self.mark_ready(Channel::Face);
        Ok(())
    }

    /// Commit everything staged into `mesh`
    ///
    /// On success the session is empty again and can stage another mesh.
    pub fn parse(&mut self, mesh: &BMMesh<'_>) -> Result<()> {
        if let Some(channel) = Channel::ALL.into_iter().find(|c| self.poisoned[*c as usize]) {
            return Err(BMapError::ChannelNotReady {
                channel: channel.name(),
            });
        }
        if let Some((owner, id)) = self.slot_owner {
            if owner != mesh.handle().as_ptr() {
                return Err(BMapError::ForeignObject { id });
            }
        }

        check(
            unsafe {
                (self.library.vtable().bmmesh_trans_parse)(self.ptr, mesh.handle().as_ptr(), mesh.id())
            },
            symbols::bmmesh_trans_parse,
        )?;
        log::debug!("Committed staging session {:p} into mesh {}", self.ptr, mesh.id());
        self.slot_owner = None;
        Ok(())
    }

    /// Destroy the session, reporting a failed release
    pub fn dispose(mut self) -> Result<()> {
        self.release()
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn declare(&mut self, channel: Channel, count: u32, declare: DeclareFn, operation: &'static str) -> Result<()> {
        // Whatever was staged before is gone once the count is redeclared
        self.poisoned[channel as usize] = true;
        check(unsafe { declare(self.ptr, count) }, operation)
    }

    fn mark_ready(&mut self, channel: Channel) {
        self.poisoned[channel as usize] = false;
    }

    fn fill<T, I>(
        &mut self,
        label: &'static str,
        count: u32,
        memory: MemoryFn<T>,
        operation: &'static str,
        source: I,
    ) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        let mut mem: *mut T = ptr::null_mut();
        check(unsafe { memory(self.ptr, &mut mem) }, operation)?;
        if mem.is_null() && count > 0 {
            return Err(BMapError::NullArgument(operation));
        }

        let mut supplied: u32 = 0;
        for value in source.into_iter().take(count as usize) {
            unsafe { mem.add(supplied as usize).write_unaligned(value) };
            supplied += 1;
        }

        if supplied < count {
            return Err(BMapError::InsufficientElements {
                channel: label,
                declared: count,
                supplied,
            });
        }
        Ok(())
    }

    fn release(&mut self) -> Result<()> {
        if self.ptr.is_null() {
            return Ok(());
        }

        let raw = std::mem::replace(&mut self.ptr, ptr::null_mut());
        log::debug!("Releasing staging session {:p}", raw);
        check(
            unsafe { (self.library.vtable().bmmesh_trans_delete)(raw) },
            symbols::bmmesh_trans_delete,
        )
    }
}

impl Drop for MeshTrans {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            log::error!("Failed to release staging session: {}", e);
        }
    }
}

impl PartialEq for MeshTrans {
    fn eq(&self, other: &Self) -> bool {
        self.ptr == other.ptr
    }
}

impl Eq for MeshTrans {}

impl std::fmt::Debug for MeshTrans {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeshTrans")
            .field("ptr", &self.ptr)
            .field("poisoned", &self.poisoned)
            .field("slot_owner", &self.slot_owner)
            .finish()
    }
}

#[cfg(all(test, feature = "builtin"))]
mod tests {
    use crate::prelude::*;
    use bmap_ffi::CKShortFaceIndices;

    fn quad_positions() -> Vec<VxVector3> {
        vec![
            VxVector3::new(0.0, 0.0, 0.0),
            VxVector3::new(1.0, 0.0, 0.0),
            VxVector3::new(1.0, 1.0, 0.0),
            VxVector3::new(0.0, 1.0, 0.0),
        ]
    }

    fn quad_uvs() -> Vec<VxVector2> {
        vec![
            VxVector2::new(0.0, 0.0),
            VxVector2::new(1.0, 0.0),
            VxVector2::new(1.0, 1.0),
            VxVector2::new(0.0, 1.0),
        ]
    }

    fn stage_quad(trans: &mut MeshTrans, material: BMMaterial<'_>) {
        trans.prepare_vertices(4, quad_positions()).unwrap();
        trans.prepare_normals(1, [VxVector3::new(0.0, 0.0, 1.0)]).unwrap();
        trans.prepare_uvs(4, quad_uvs()).unwrap();
        trans.prepare_material_slots(1, [Some(material)]).unwrap();
        trans
            .prepare_faces(
                2,
                [[0u32, 1, 2], [0, 2, 3]],
                [[0u32, 0, 0], [0, 0, 0]],
                [[0u32, 1, 2], [0, 2, 3]],
                [0, 0],
            )
            .unwrap();
    }

    #[test]
    fn test_quad_commit() {
        let library = BMapLibrary::builtin().unwrap();
        let file = BMFileWriter::create_with_sink(&library, &FileOptions::default(), &OutputSink::silent()).unwrap();
        let mesh = file.create_mesh().unwrap();
        let material = file.create_material().unwrap();

        let mut trans = MeshTrans::new(&library).unwrap();
        stage_quad(&mut trans, material);
        trans.parse(&mesh).unwrap();
        trans.dispose().unwrap();

        assert_eq!(mesh.vertex_count().unwrap(), 4);
        assert_eq!(mesh.face_count().unwrap(), 2);
        assert_eq!(mesh.material_slot_count().unwrap(), 1);
        assert_eq!(mesh.vertex_positions().unwrap(), quad_positions());
        assert_eq!(
            mesh.face_indices().unwrap(),
            vec![CKShortFaceIndices::new(0, 1, 2), CKShortFaceIndices::new(0, 2, 3)]
        );
        assert_eq!(mesh.material_slot(0).unwrap(), Some(material));
    }

    #[test]
    fn test_short_source_poisons_channel() {
        let library = BMapLibrary::builtin().unwrap();
        let file = BMFileWriter::create_with_sink(&library, &FileOptions::default(), &OutputSink::silent()).unwrap();
        let mesh = file.create_mesh().unwrap();
        let material = file.create_material().unwrap();

        let mut trans = MeshTrans::new(&library).unwrap();
        stage_quad(&mut trans, material);

        let err = trans.prepare_uvs(4, quad_uvs().into_iter().take(3)).unwrap_err();
        assert!(matches!(
            err,
            BMapError::InsufficientElements { channel: "uv", declared: 4, supplied: 3 }
        ));
        assert!(matches!(
            trans.parse(&mesh),
            Err(BMapError::ChannelNotReady { channel: "uv" })
        ));
        assert_eq!(mesh.vertex_count().unwrap(), 0);

        trans.prepare_uvs(4, quad_uvs()).unwrap();
        trans.parse(&mesh).unwrap();
        assert_eq!(mesh.face_count().unwrap(), 2);
    }

    #[test]
    fn test_extra_elements_ignored() {
        let library = BMapLibrary::builtin().unwrap();
        let file = BMFileWriter::create_with_sink(&library, &FileOptions::default(), &OutputSink::silent()).unwrap();
        let mesh = file.create_mesh().unwrap();

        // Four positions and uvs offered, only the first three are staged
        let mut trans = MeshTrans::new(&library).unwrap();
        trans.prepare_vertices(3, quad_positions()).unwrap();
        trans.prepare_normals(1, [VxVector3::new(0.0, 0.0, 1.0); 4]).unwrap();
        trans.prepare_uvs(3, quad_uvs()).unwrap();
        trans.prepare_material_slots(0, std::iter::empty()).unwrap();
        trans
            .prepare_faces(1, [[0u32, 1, 2]; 2], [[0u32, 0, 0]; 2], [[0u32, 1, 2]; 2], [0, 0])
            .unwrap();
        trans.parse(&mesh).unwrap();

        assert_eq!(mesh.vertex_count().unwrap(), 3);
        assert_eq!(mesh.face_count().unwrap(), 1);
        assert_eq!(mesh.vertex_positions().unwrap(), quad_positions()[..3].to_vec());
        assert_eq!(mesh.vertex_uvs().unwrap(), quad_uvs()[..3].to_vec());
    }

    #[test]
    fn test_material_from_other_file_refused() {
        let library = BMapLibrary::builtin().unwrap();
        let first = BMFileWriter::create_with_sink(&library, &FileOptions::default(), &OutputSink::silent()).unwrap();
        let second = BMFileWriter::create_with_sink(&library, &FileOptions::default(), &OutputSink::silent()).unwrap();
        let mesh = first.create_mesh().unwrap();
        let local = first.create_material().unwrap();
        let foreign = second.create_material().unwrap();

        let mut trans = MeshTrans::new(&library).unwrap();
        stage_quad(&mut trans, foreign);
        assert!(matches!(
            trans.parse(&mesh),
            Err(BMapError::ForeignObject { id }) if id == foreign.id()
        ));
        assert_eq!(mesh.vertex_count().unwrap(), 0);
        assert_eq!(mesh.material_slot_count().unwrap(), 0);

        // Mixing containers in one table is caught while staging
        assert!(matches!(
            trans.prepare_material_slots(2, [Some(local), Some(foreign)]),
            Err(BMapError::ForeignObject { .. })
        ));
        assert!(matches!(
            trans.parse(&mesh),
            Err(BMapError::ChannelNotReady { channel: "material slot" })
        ));

        trans.prepare_material_slots(1, [Some(local)]).unwrap();
        trans.parse(&mesh).unwrap();
        assert_eq!(mesh.material_slot(0).unwrap(), Some(local));
    }

    #[test]
    fn test_undeclared_channel_fails() {
        let library = BMapLibrary::builtin().unwrap();
        let file = BMFileWriter::create_with_sink(&library, &FileOptions::default(), &OutputSink::silent()).unwrap();
        let mesh = file.create_mesh().unwrap();

        let mut trans = MeshTrans::new(&library).unwrap();
        trans.prepare_vertices(4, quad_positions()).unwrap();
        assert!(matches!(
            trans.parse(&mesh),
            Err(BMapError::OperationFailed { operation: "BMMeshTrans_Parse" })
        ));
    }

    #[test]
    fn test_session_reusable_after_commit() {
        let library = BMapLibrary::builtin().unwrap();
        let file = BMFileWriter::create_with_sink(&library, &FileOptions::default(), &OutputSink::silent()).unwrap();
        let first = file.create_mesh().unwrap();
        let second = file.create_mesh().unwrap();
        let material = file.create_material().unwrap();

        let mut trans = MeshTrans::new(&library).unwrap();
        stage_quad(&mut trans, material);
        trans.parse(&first).unwrap();

        // Channels are cleared by the commit
        assert!(trans.parse(&second).is_err());

        stage_quad(&mut trans, material);
        trans.parse(&second).unwrap();
        assert_eq!(second.vertex_count().unwrap(), 4);
    }

    #[test]
    fn test_parse_into_non_mesh_fails() {
        let library = BMapLibrary::builtin().unwrap();
        let file = BMFileWriter::create_with_sink(&library, &FileOptions::default(), &OutputSink::silent()).unwrap();
        let material = file.create_material().unwrap();
        let not_a_mesh = BMMesh::new(file.handle(), material.id());

        let mut trans = MeshTrans::new(&library).unwrap();
        stage_quad(&mut trans, material);
        assert!(trans.parse(&not_a_mesh).is_err());
    }
}
