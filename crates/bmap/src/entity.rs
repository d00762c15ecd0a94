//! 3D entity and light accessors

use crate::dispatch::{enum_accessors, link_accessors, value_accessors};
use crate::object::{BMTargetLight, Entity3dKind, Mesh, ObjectRef};
use bmap_ffi::{VxColor, VxLightType, VxMatrix};

impl<'f, K: Entity3dKind> ObjectRef<'f, K> {
    value_accessors! {
        /// Transform from local to world space
        world_matrix, set_world_matrix: VxMatrix => bm3dentity_get_world_matrix, bm3dentity_set_world_matrix;
        visibility, set_visibility: bool => bm3dentity_get_visibility, bm3dentity_set_visibility;
    }

    link_accessors! {
        /// Mesh drawn for this entity
        current_mesh, set_current_mesh: Mesh => bm3dentity_get_current_mesh, bm3dentity_set_current_mesh;
    }
}

impl<'f> BMTargetLight<'f> {
    enum_accessors! {
        light_type, set_light_type: VxLightType => bmlight_get_type, bmlight_set_type;
    }

    value_accessors! {
        color, set_color: VxColor => bmlight_get_color, bmlight_set_color;
        constant_attenuation, set_constant_attenuation: f32 => bmlight_get_constant_attenuation, bmlight_set_constant_attenuation;
        linear_attenuation, set_linear_attenuation: f32 => bmlight_get_linear_attenuation, bmlight_set_linear_attenuation;
        quadratic_attenuation, set_quadratic_attenuation: f32 => bmlight_get_quadratic_attenuation, bmlight_set_quadratic_attenuation;
        /// Distance past which the light has no effect
        range, set_range: f32 => bmlight_get_range, bmlight_set_range;
        /// Inner cone angle of a spot light, in radians
        hot_spot, set_hot_spot: f32 => bmlight_get_hot_spot, bmlight_set_hot_spot;
        /// Outer cone angle of a spot light, in radians
        falloff, set_falloff: f32 => bmlight_get_falloff, bmlight_set_falloff;
        falloff_shape, set_falloff_shape: f32 => bmlight_get_falloff_shape, bmlight_set_falloff_shape;
    }
}
