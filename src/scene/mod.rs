//! Scene side of the light volume pipeline.
//!
//! The scene produces one [`LightVolume`] list per frame. The renderer reads
//! it through [`LightVolumeSource`], either from the two-list
//! [`ThreadLightVolumes`] (fill/process, same OS thread) or from a
//! [`LightVolumeReceiver`] fed by a scene running on another thread.

mod builder;
mod feed;
mod thread_lists;

pub use builder::{LightVolumeBuilder, VolumeBounds};
pub use feed::{light_volume_feed, LightVolumePublisher, LightVolumeReceiver};
pub use thread_lists::ThreadLightVolumes;

use crate::volume::LightVolume;

// ---------------------------------------------------------------------------
// Render threads
// ---------------------------------------------------------------------------

/// Which of the two per-frame lists a caller means.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum RenderThread {
    /// The list the scene is currently writing.
    Fill,
    /// The list the renderer is currently consuming.
    #[default]
    Process,
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

/// Anything that can hand the renderer the current frame's light volumes.
pub trait LightVolumeSource {
    /// Volumes visible to `thread` this frame.
    fn light_volumes(&self, thread: RenderThread) -> &[LightVolume];
}

impl LightVolumeSource for [LightVolume] {
    fn light_volumes(&self, _thread: RenderThread) -> &[LightVolume] {
        self
    }
}

impl LightVolumeSource for Vec<LightVolume> {
    fn light_volumes(&self, _thread: RenderThread) -> &[LightVolume] {
        self
    }
}
