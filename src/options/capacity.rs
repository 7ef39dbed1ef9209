use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Largest accepted `max_volumes`.
pub const MAX_VOLUMES_LIMIT: u32 = 65_536;
/// Largest accepted `max_light_infos`.
pub const MAX_LIGHT_INFOS_LIMIT: u32 = 1_048_576;
/// Largest accepted `rotation_depth`.
pub const ROTATION_DEPTH_LIMIT: u32 = 16;

/// Fixed buffer capacities and upload policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Capacity", inline)]
#[serde(default)]
pub struct CapacityOptions {
    /// Ranges in the volume buffer; extra volumes are dropped.
    #[schemars(title = "Max Volumes", range(min = 1, max = 65536))]
    pub max_volumes: u32,
    /// Records in the info buffer; overflowing volumes are cut short.
    #[schemars(title = "Max Light Infos", range(min = 1, max = 1_048_576))]
    pub max_light_infos: u32,
    /// GPU copies of each buffer cycled through per update. Four covers the
    /// regular and recursive pass of two frames in flight.
    #[schemars(title = "Rotation Depth", range(min = 1, max = 16))]
    pub rotation_depth: u32,
    /// Upload only the packed ranges instead of the whole range buffer.
    #[schemars(title = "Upload Used Ranges Only")]
    pub upload_used_ranges_only: bool,
}

impl Default for CapacityOptions {
    fn default() -> Self {
        Self {
            max_volumes: 256,
            max_light_infos: 2048,
            rotation_depth: 4,
            upload_used_ranges_only: false,
        }
    }
}
