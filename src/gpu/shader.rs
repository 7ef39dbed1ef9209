//! WGSL declarations for the light volume buffers.
//!
//! Shaders that read light volumes include the generated source so the
//! struct layouts and binding slots stay in step with the Rust side.

use crate::options::BindingOptions;

/// WGSL declaring `LightVolumeInfo`, `LightVolumeRange`, the two storage
/// arrays at `group`/`first_binding`, and a lookup helper.
#[must_use]
pub fn light_volume_wgsl(group: u32, first_binding: u32) -> String {
    let range_binding = first_binding + 1;
    format!(
        r"struct LightVolumeInfo {{
    w_position: vec3<f32>,
    radius: f32,
    c_color: vec3<f32>,
    bulb_radius: f32,
    w_projector_direction: vec3<f32>,
    projector_cos_angle: f32,
}}

struct LightVolumeRange {{
    begin: u32,
    end: u32,
}}

@group({group}) @binding({first_binding})
var<storage, read> light_volume_infos: array<LightVolumeInfo>;

@group({group}) @binding({range_binding})
var<storage, read> light_volume_ranges: array<LightVolumeRange>;

fn light_volume_range(volume_index: u32) -> LightVolumeRange {{
    return light_volume_ranges[volume_index];
}}
"
    )
}

/// [`light_volume_wgsl`] for the configured binding options.
#[must_use]
pub fn light_volume_wgsl_for(binding: &BindingOptions) -> String {
    light_volume_wgsl(binding.group, binding.first_binding)
}
