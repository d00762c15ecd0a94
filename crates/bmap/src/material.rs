//! Material accessors

use crate::dispatch::{enum_accessors, link_accessors, value_accessors};
use crate::object::{BMMaterial, Texture};
use bmap_ffi::{
    VxBlendMode, VxCmpFunc, VxColor, VxFillMode, VxShadeMode, VxTextureAddressMode,
    VxTextureBlendMode, VxTextureFilterMode,
};

impl<'f> BMMaterial<'f> {
    value_accessors! {
        diffuse, set_diffuse: VxColor => bmmaterial_get_diffuse, bmmaterial_set_diffuse;
        ambient, set_ambient: VxColor => bmmaterial_get_ambient, bmmaterial_set_ambient;
        specular, set_specular: VxColor => bmmaterial_get_specular, bmmaterial_set_specular;
        emissive, set_emissive: VxColor => bmmaterial_get_emissive, bmmaterial_set_emissive;
        specular_power, set_specular_power: f32 => bmmaterial_get_specular_power, bmmaterial_set_specular_power;
        /// Border colour packed as ARGB, see [`VxColor::from_dword`]
        texture_border_color, set_texture_border_color: u32 => bmmaterial_get_texture_border_color, bmmaterial_set_texture_border_color;

        alpha_test_enabled, set_alpha_test_enabled: bool => bmmaterial_get_alpha_test_enabled, bmmaterial_set_alpha_test_enabled;
        alpha_blend_enabled, set_alpha_blend_enabled: bool => bmmaterial_get_alpha_blend_enabled, bmmaterial_set_alpha_blend_enabled;
        perspective_correction_enabled, set_perspective_correction_enabled: bool => bmmaterial_get_perspective_correction_enabled, bmmaterial_set_perspective_correction_enabled;
        zwrite_enabled, set_zwrite_enabled: bool => bmmaterial_get_zwrite_enabled, bmmaterial_set_zwrite_enabled;
        two_sided_enabled, set_two_sided_enabled: bool => bmmaterial_get_two_sided_enabled, bmmaterial_set_two_sided_enabled;
        alpha_ref, set_alpha_ref: u8 => bmmaterial_get_alpha_ref, bmmaterial_set_alpha_ref;
    }

    enum_accessors! {
        texture_blend_mode, set_texture_blend_mode: VxTextureBlendMode => bmmaterial_get_texture_blend_mode, bmmaterial_set_texture_blend_mode;
        texture_min_mode, set_texture_min_mode: VxTextureFilterMode => bmmaterial_get_texture_min_mode, bmmaterial_set_texture_min_mode;
        texture_mag_mode, set_texture_mag_mode: VxTextureFilterMode => bmmaterial_get_texture_mag_mode, bmmaterial_set_texture_mag_mode;
        texture_address_mode, set_texture_address_mode: VxTextureAddressMode => bmmaterial_get_texture_address_mode, bmmaterial_set_texture_address_mode;
        source_blend, set_source_blend: VxBlendMode => bmmaterial_get_source_blend, bmmaterial_set_source_blend;
        dest_blend, set_dest_blend: VxBlendMode => bmmaterial_get_dest_blend, bmmaterial_set_dest_blend;
        fill_mode, set_fill_mode: VxFillMode => bmmaterial_get_fill_mode, bmmaterial_set_fill_mode;
        shade_mode, set_shade_mode: VxShadeMode => bmmaterial_get_shade_mode, bmmaterial_set_shade_mode;
        alpha_func, set_alpha_func: VxCmpFunc => bmmaterial_get_alpha_func, bmmaterial_set_alpha_func;
        zfunc, set_zfunc: VxCmpFunc => bmmaterial_get_zfunc, bmmaterial_set_zfunc;
    }

    link_accessors! {
        texture, set_texture: Texture => bmmaterial_get_texture, bmmaterial_set_texture;
    }
}
