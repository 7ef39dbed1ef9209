//! Lock-free handoff of light volume lists from a scene thread.

use super::{LightVolumeSource, RenderThread};
use crate::volume::LightVolume;

/// Connected publisher/receiver pair backed by a triple buffer.
#[must_use]
pub fn light_volume_feed() -> (LightVolumePublisher, LightVolumeReceiver) {
    let (input, output) = triple_buffer::triple_buffer(&Vec::new());
    (
        LightVolumePublisher { input },
        LightVolumeReceiver {
            output,
            latest: Vec::new(),
            frames: 0,
        },
    )
}

/// Scene-thread end: publishes one list per frame.
pub struct LightVolumePublisher {
    input: triple_buffer::Input<Vec<LightVolume>>,
}

impl LightVolumePublisher {
    /// Publish a complete list, replacing any unread one.
    pub fn publish(&mut self, volumes: Vec<LightVolume>) {
        self.input.write(volumes);
    }
}

/// Render-thread end: keeps the most recently received list.
pub struct LightVolumeReceiver {
    output: triple_buffer::Output<Vec<LightVolume>>,
    latest: Vec<LightVolume>,
    frames: u64,
}

impl LightVolumeReceiver {
    /// Pick up a newly published list, if any.
    ///
    /// Returns `true` if the latest list changed. Without new data the
    /// previous list stays current.
    pub fn refresh(&mut self) -> bool {
        if !self.output.update() {
            return false;
        }
        std::mem::swap(&mut self.latest, self.output.output_buffer_mut());
        self.frames += 1;
        true
    }

    /// Lists received so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl LightVolumeSource for LightVolumeReceiver {
    fn light_volumes(&self, _thread: RenderThread) -> &[LightVolume] {
        &self.latest
    }
}
