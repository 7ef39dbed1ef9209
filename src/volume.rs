//! Light volume data model: CPU-side records and their GPU layouts.

use glam::Vec3;

/// A single dynamic light as the scene describes it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightData {
    /// World-space position.
    pub position: Vec3,
    /// Influence radius in world units.
    pub radius: f32,
    /// Linear RGB color, premultiplied by intensity.
    pub color: Vec3,
    /// Radius of the emitting bulb (for soft falloff near the source).
    pub bulb_radius: f32,
    /// Projector direction; zero for omni lights.
    pub projector_direction: Vec3,
    /// Cosine of the projector half-angle; `-1.0` covers the full sphere.
    pub projector_cos_angle: f32,
}

impl LightData {
    /// Omnidirectional light.
    #[must_use]
    pub fn omni(position: Vec3, radius: f32, color: Vec3) -> Self {
        Self {
            position,
            radius,
            color,
            bulb_radius: 0.0,
            projector_direction: Vec3::ZERO,
            projector_cos_angle: -1.0,
        }
    }

    /// Projector (spot) light with the given half-angle in radians.
    #[must_use]
    pub fn projector(
        position: Vec3,
        radius: f32,
        color: Vec3,
        direction: Vec3,
        half_angle: f32,
    ) -> Self {
        Self {
            position,
            radius,
            color,
            bulb_radius: 0.0,
            projector_direction: direction.normalize_or_zero(),
            projector_cos_angle: half_angle.cos(),
        }
    }

    /// Set the bulb radius.
    #[must_use]
    pub fn with_bulb_radius(mut self, bulb_radius: f32) -> Self {
        self.bulb_radius = bulb_radius;
        self
    }

    /// Whether this light only emits inside a cone.
    pub fn is_projector(&self) -> bool {
        self.projector_direction != Vec3::ZERO && self.projector_cos_angle > -1.0
    }
}

/// The lights affecting one spatial volume, in shading order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LightVolume {
    /// Light records; shaders iterate them front to back.
    pub lights: Vec<LightData>,
}

impl LightVolume {
    /// Volume holding the given lights.
    #[must_use]
    pub fn new(lights: Vec<LightData>) -> Self {
        Self { lights }
    }

    /// Number of light records.
    pub fn len(&self) -> usize {
        self.lights.len()
    }

    /// Whether the volume has no lights.
    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }
}

/// Flattened per-light record as shaders read it.
/// NOTE: Must match the WGSL `LightVolumeInfo` layout exactly (48 bytes)
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightVolumeInfo {
    /// World-space position.
    pub w_position: [f32; 3],
    /// Influence radius.
    pub radius: f32,
    /// Linear color.
    pub c_color: [f32; 3],
    /// Bulb radius.
    pub bulb_radius: f32,
    /// World-space projector direction.
    pub w_projector_direction: [f32; 3],
    /// Cosine of the projector half-angle.
    pub projector_cos_angle: f32,
}

impl From<&LightData> for LightVolumeInfo {
    fn from(light: &LightData) -> Self {
        Self {
            w_position: light.position.to_array(),
            radius: light.radius,
            c_color: light.color.to_array(),
            bulb_radius: light.bulb_radius,
            w_projector_direction: light.projector_direction.to_array(),
            projector_cos_angle: light.projector_cos_angle,
        }
    }
}

/// Half-open `[begin, end)` index range into the info buffer, one per volume.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightVolumeRange {
    /// First info index of the volume.
    pub begin: u32,
    /// One past the last info index of the volume.
    pub end: u32,
}

impl LightVolumeRange {
    /// Number of infos covered by the range.
    pub fn len(&self) -> u32 {
        self.end - self.begin
    }

    /// Whether the range covers no infos.
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gpu_record_sizes() {
        assert_eq!(size_of::<LightVolumeInfo>(), 48);
        assert_eq!(size_of::<LightVolumeRange>(), 8);
    }

    #[test]
    fn info_copies_every_field() {
        let light = LightData::projector(
            Vec3::new(1.0, 2.0, 3.0),
            5.0,
            Vec3::new(0.5, 0.25, 1.0),
            Vec3::new(0.0, -2.0, 0.0),
            std::f32::consts::FRAC_PI_3,
        )
        .with_bulb_radius(0.1);

        let info = LightVolumeInfo::from(&light);
        assert_eq!(info.w_position, [1.0, 2.0, 3.0]);
        assert_eq!(info.radius, 5.0);
        assert_eq!(info.c_color, [0.5, 0.25, 1.0]);
        assert_eq!(info.bulb_radius, 0.1);
        assert_eq!(info.w_projector_direction, [0.0, -1.0, 0.0]);
        assert!((info.projector_cos_angle - 0.5).abs() < 1e-6);
    }

    #[test]
    fn omni_lights_are_not_projectors() {
        let omni = LightData::omni(Vec3::ZERO, 1.0, Vec3::ONE);
        assert!(!omni.is_projector());
        assert_eq!(omni.projector_cos_angle, -1.0);

        let spot =
            LightData::projector(Vec3::ZERO, 1.0, Vec3::ONE, Vec3::Z, 0.4);
        assert!(spot.is_projector());
    }

    #[test]
    fn range_length() {
        let range = LightVolumeRange { begin: 3, end: 7 };
        assert_eq!(range.len(), 4);
        assert!(!range.is_empty());
        assert!(LightVolumeRange { begin: 9, end: 9 }.is_empty());
    }
}
