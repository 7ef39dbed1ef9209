use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Light-to-volume assignment limits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Builder", inline)]
#[serde(default)]
pub struct BuilderOptions {
    /// Nearest lights kept per volume.
    #[schemars(title = "Max Lights Per Volume", range(min = 1, max = 1024))]
    pub max_lights_per_volume: u32,
    /// Lights dimmer than this (max color channel) are ignored.
    #[schemars(title = "Min Intensity", range(min = 0.0, max = 1.0), extend("step" = 0.001))]
    pub min_intensity: f32,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            max_lights_per_volume: 64,
            min_intensity: 0.001,
        }
    }
}
