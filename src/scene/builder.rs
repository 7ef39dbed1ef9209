//! Assignment of scene lights to light volumes.
//!
//! A volume is a bounding sphere around something that needs lighting
//! (a particle emitter, a transparent mesh). Each volume collects the lights
//! whose influence reaches it, nearest first, up to a per-volume cap.

use glam::Vec3;

use crate::options::BuilderOptions;
use crate::volume::{LightData, LightVolume};

/// Bounding sphere of one light volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeBounds {
    /// World-space center.
    pub center: Vec3,
    /// Sphere radius.
    pub radius: f32,
}

/// Per-frame collector of lights and volume bounds.
#[derive(Debug, Clone, Default)]
pub struct LightVolumeBuilder {
    options: BuilderOptions,
    lights: Vec<LightData>,
    volumes: Vec<VolumeBounds>,
}

impl LightVolumeBuilder {
    /// Empty builder with the given limits.
    pub fn new(options: BuilderOptions) -> Self {
        Self {
            options,
            lights: Vec::new(),
            volumes: Vec::new(),
        }
    }

    /// Register a light for this frame.
    pub fn add_light(&mut self, light: LightData) {
        self.lights.push(light);
    }

    /// Register a volume; returns its index in the built list.
    pub fn add_volume(&mut self, center: Vec3, radius: f32) -> usize {
        self.volumes.push(VolumeBounds { center, radius });
        self.volumes.len() - 1
    }

    /// Forget all lights and volumes, keeping allocations.
    pub fn clear(&mut self) {
        self.lights.clear();
        self.volumes.clear();
    }

    /// Registered volumes.
    pub fn volumes(&self) -> &[VolumeBounds] {
        &self.volumes
    }

    /// One light volume per registered volume, in registration order.
    pub fn build(&self) -> Vec<LightVolume> {
        let mut out = Vec::with_capacity(self.volumes.len());
        self.build_into(&mut out);
        out
    }

    /// [`build`](Self::build) into an existing list, replacing its contents.
    pub fn build_into(&self, out: &mut Vec<LightVolume>) {
        out.clear();

        let bright: Vec<&LightData> = self
            .lights
            .iter()
            .filter(|l| l.color.max_element() >= self.options.min_intensity)
            .collect();
        let cap = self.options.max_lights_per_volume as usize;

        let mut candidates: Vec<(f32, &LightData)> = Vec::new();
        for bounds in &self.volumes {
            candidates.clear();
            candidates.extend(
                bright
                    .iter()
                    .filter(|l| affects(l, bounds))
                    .map(|&l| (l.position.distance_squared(bounds.center), l)),
            );
            candidates.sort_by(|a, b| a.0.total_cmp(&b.0));
            candidates.truncate(cap);

            out.push(LightVolume::new(
                candidates.iter().map(|&(_, l)| *l).collect(),
            ));
        }
    }
}

/// Whether `light` reaches any point of `bounds`.
fn affects(light: &LightData, bounds: &VolumeBounds) -> bool {
    let reach = light.radius + bounds.radius;
    if light.position.distance_squared(bounds.center) > reach * reach {
        return false;
    }
    !light.is_projector() || cone_touches_sphere(light, bounds)
}

/// Cone/sphere overlap for projector lights.
fn cone_touches_sphere(light: &LightData, bounds: &VolumeBounds) -> bool {
    let v = bounds.center - light.position;
    let along = v.dot(light.projector_direction);
    let across = (v.length_squared() - along * along).max(0.0).sqrt();

    let cos = light.projector_cos_angle;
    let sin = (1.0 - cos * cos).max(0.0).sqrt();
    let closest = cos * across - along * sin;

    closest <= bounds.radius && along >= -bounds.radius
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> LightVolumeBuilder {
        LightVolumeBuilder::new(BuilderOptions::default())
    }

    #[test]
    fn only_reaching_lights_are_assigned() {
        let mut b = builder();
        b.add_light(LightData::omni(Vec3::new(3.0, 0.0, 0.0), 2.5, Vec3::ONE));
        b.add_light(LightData::omni(Vec3::new(10.0, 0.0, 0.0), 2.0, Vec3::ONE));
        let v = b.add_volume(Vec3::ZERO, 1.0);

        let built = b.build();
        assert_eq!(built.len(), 1);
        assert_eq!(built[v].len(), 1);
        assert_eq!(built[v].lights[0].position.x, 3.0);
    }

    #[test]
    fn nearest_first_and_capped() {
        let mut b = LightVolumeBuilder::new(BuilderOptions {
            max_lights_per_volume: 2,
            ..BuilderOptions::default()
        });
        for x in [4.0, 1.0, 3.0, 2.0] {
            b.add_light(LightData::omni(Vec3::new(x, 0.0, 0.0), 10.0, Vec3::ONE));
        }
        let _ = b.add_volume(Vec3::ZERO, 1.0);

        let built = b.build();
        let xs: Vec<f32> = built[0].lights.iter().map(|l| l.position.x).collect();
        assert_eq!(xs, vec![1.0, 2.0]);
    }

    #[test]
    fn projector_cone_culls_volumes_behind() {
        let mut b = builder();
        b.add_light(LightData::projector(
            Vec3::ZERO,
            20.0,
            Vec3::ONE,
            Vec3::X,
            0.3,
        ));
        let ahead = b.add_volume(Vec3::new(8.0, 0.0, 0.0), 1.0);
        let behind = b.add_volume(Vec3::new(-8.0, 0.0, 0.0), 1.0);
        let beside = b.add_volume(Vec3::new(0.0, 8.0, 0.0), 1.0);

        let built = b.build();
        assert_eq!(built[ahead].len(), 1);
        assert!(built[behind].is_empty());
        assert!(built[beside].is_empty());
    }

    #[test]
    fn dim_lights_are_ignored() {
        let mut b = builder();
        b.add_light(LightData::omni(Vec3::ZERO, 5.0, Vec3::splat(0.0001)));
        let _ = b.add_volume(Vec3::ZERO, 1.0);
        assert!(b.build()[0].is_empty());
    }

    #[test]
    fn build_into_replaces_and_clear_resets() {
        let mut b = builder();
        b.add_light(LightData::omni(Vec3::ZERO, 5.0, Vec3::ONE));
        let _ = b.add_volume(Vec3::ZERO, 1.0);
        let _ = b.add_volume(Vec3::new(100.0, 0.0, 0.0), 1.0);

        let mut out = vec![LightVolume::default(); 5];
        b.build_into(&mut out);
        assert_eq!(out.len(), 2);

        b.clear();
        assert!(b.volumes().is_empty());
        assert!(b.build().is_empty());
    }
}
