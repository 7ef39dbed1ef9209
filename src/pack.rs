//! Flattening of light volumes into fixed-capacity GPU staging arrays.
//!
//! Lights are copied in volume order into one contiguous info array, and
//! every packed volume gets a `[begin, end)` range into it. Capacity is
//! never an error: a volume that does not fit is cut short, and volumes
//! past the range capacity are dropped.

use crate::volume::{LightVolume, LightVolumeInfo, LightVolumeRange};

/// Outcome of one [`pack_volumes`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PackSummary {
    /// Volumes that received a range.
    pub volumes: usize,
    /// Info records written.
    pub infos: usize,
    /// Volumes past the range capacity.
    pub dropped_volumes: usize,
    /// Light records cut from packed volumes for lack of info space.
    pub truncated_lights: usize,
}

impl PackSummary {
    /// Whether any input was left out.
    pub fn is_lossy(&self) -> bool {
        self.dropped_volumes > 0 || self.truncated_lights > 0
    }
}

/// Pack `volumes` into `infos` and `ranges`.
///
/// Both slices are zeroed first, so entries past the used prefix never carry
/// data from a previous frame. The slice lengths are the capacities.
pub fn pack_volumes(
    volumes: &[LightVolume],
    infos: &mut [LightVolumeInfo],
    ranges: &mut [LightVolumeRange],
) -> PackSummary {
    infos.fill(LightVolumeInfo::default());
    ranges.fill(LightVolumeRange::default());

    let packed = volumes.len().min(ranges.len());
    let mut cursor = 0usize;
    let mut truncated_lights = 0usize;

    for (volume, range) in volumes[..packed].iter().zip(ranges.iter_mut()) {
        let begin = cursor;
        let remaining = infos.len() - begin;
        let take = volume.len().min(remaining);

        for (dst, light) in infos[begin..begin + take]
            .iter_mut()
            .zip(&volume.lights)
        {
            *dst = LightVolumeInfo::from(light);
        }

        cursor += take;
        truncated_lights += volume.len() - take;
        *range = LightVolumeRange {
            begin: begin as u32,
            end: cursor as u32,
        };
    }

    let dropped_volumes = volumes.len() - packed;
    let summary = PackSummary {
        volumes: packed,
        infos: cursor,
        dropped_volumes,
        truncated_lights,
    };

    if summary.is_lossy() {
        log::debug!(
            "light volume packing truncated: {dropped_volumes} volumes \
             dropped, {truncated_lights} lights cut"
        );
    }

    summary
}
