//! Group accessors

use crate::dispatch;
use crate::enumerate::ObjectIter;
use crate::error::{check, Result};
use crate::object::{BMGroup, Entity3dKind, Object3d, ObjectRef};
use bmap_ffi::symbols;

impl<'f> BMGroup<'f> {
    /// Add a 3D object or light to this group
    ///
    /// An object can be a member at most once, adding it again fails.
    pub fn add_object<K: Entity3dKind>(&self, member: &ObjectRef<'_, K>) -> Result<()> {
        let member = dispatch::link_id(self.handle(), Some(member))?;
        check(
            unsafe { (self.vtable().bmgroup_add_object)(self.handle().as_ptr(), self.id(), member) },
            symbols::bmgroup_add_object,
        )
    }

    pub fn object_count(&self) -> Result<u32> {
        let mut count = 0;
        check(
            unsafe { (self.vtable().bmgroup_get_object_count)(self.handle().as_ptr(), self.id(), &mut count) },
            symbols::bmgroup_get_object_count,
        )?;
        Ok(count)
    }

    /// Members in insertion order
    ///
    /// Members are reported as 3D objects. Lights keep working through the
    /// shared entity accessors.
    pub fn objects(&self) -> ObjectIter<'f, Object3d> {
        ObjectIter::group_members(self.handle(), self.id())
    }
}

#[cfg(all(test, feature = "builtin"))]
mod tests {
    use crate::prelude::*;

    #[test]
    fn test_group_members() {
        let library = BMapLibrary::builtin().unwrap();
        let file = BMFileWriter::create_with_sink(&library, &FileOptions::default(), &OutputSink::silent()).unwrap();
        let group = file.create_group().unwrap();
        let first = file.create_3dobject().unwrap();
        let second = file.create_3dobject().unwrap();
        let light = file.create_target_light().unwrap();

        group.add_object(&first).unwrap();
        group.add_object(&second).unwrap();
        group.add_object(&light).unwrap();
        assert_eq!(group.object_count().unwrap(), 3);

        let members: Vec<_> = group.objects().collect::<Result<_>>().unwrap();
        assert_eq!(members, vec![first, second, BM3dObject::new(file.handle(), light.id())]);

        // Listing again starts over
        assert_eq!(group.objects().count(), 3);
    }

    #[test]
    fn test_duplicate_member_rejected() {
        let library = BMapLibrary::builtin().unwrap();
        let file = BMFileWriter::create_with_sink(&library, &FileOptions::default(), &OutputSink::silent()).unwrap();
        let group = file.create_group().unwrap();
        let object = file.create_3dobject().unwrap();

        group.add_object(&object).unwrap();
        assert!(matches!(
            group.add_object(&object),
            Err(BMapError::OperationFailed { operation: "BMGroup_AddObject" })
        ));
        assert_eq!(group.object_count().unwrap(), 1);
    }
}
