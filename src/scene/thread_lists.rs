use super::{LightVolumeSource, RenderThread};
use crate::volume::LightVolume;

/// Two light volume lists that swap roles at each frame boundary.
///
/// The scene writes the fill list while the renderer consumes the process
/// list built during the previous frame.
#[derive(Debug, Default)]
pub struct ThreadLightVolumes {
    lists: [Vec<LightVolume>; 2],
    fill: usize,
}

impl ThreadLightVolumes {
    /// Both lists empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// The list the scene is writing this frame.
    pub fn fill_mut(&mut self) -> &mut Vec<LightVolume> {
        &mut self.lists[self.fill]
    }

    /// Replace the fill list.
    pub fn set_fill(&mut self, volumes: Vec<LightVolume>) {
        self.lists[self.fill] = volumes;
    }

    /// Hand the fill list to the renderer and start an empty one.
    ///
    /// The new fill list reuses the allocation of the list the renderer just
    /// finished with.
    pub fn swap(&mut self) {
        self.fill ^= 1;
        self.lists[self.fill].clear();
    }

    fn index(&self, thread: RenderThread) -> usize {
        match thread {
            RenderThread::Fill => self.fill,
            RenderThread::Process => self.fill ^ 1,
        }
    }
}

impl LightVolumeSource for ThreadLightVolumes {
    fn light_volumes(&self, thread: RenderThread) -> &[LightVolume] {
        &self.lists[self.index(thread)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volume::LightData;

    fn one_light_volume(x: f32) -> LightVolume {
        LightVolume::new(vec![LightData::omni(
            glam::Vec3::new(x, 0.0, 0.0),
            1.0,
            glam::Vec3::ONE,
        )])
    }

    #[test]
    fn swap_moves_fill_to_process() {
        let mut lists = ThreadLightVolumes::new();
        lists.fill_mut().push(one_light_volume(1.0));
        assert!(lists.light_volumes(RenderThread::Process).is_empty());

        lists.swap();
        assert_eq!(lists.light_volumes(RenderThread::Process).len(), 1);
        assert!(lists.light_volumes(RenderThread::Fill).is_empty());
    }

    #[test]
    fn swap_clears_the_reused_list() {
        let mut lists = ThreadLightVolumes::new();
        lists.set_fill(vec![one_light_volume(1.0); 3]);
        lists.swap();
        lists.set_fill(vec![one_light_volume(2.0)]);
        lists.swap();

        let process = lists.light_volumes(RenderThread::Process);
        assert_eq!(process.len(), 1);
        assert_eq!(process[0].lights[0].position.x, 2.0);
        assert!(lists.light_volumes(RenderThread::Fill).is_empty());
    }
}
