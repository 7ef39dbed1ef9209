//! Light volume buffer options with TOML file support.
//!
//! Capacities, binding slots and builder limits are consolidated here.
//! Options serialize to/from TOML; every section uses `#[serde(default)]`
//! so partial files only override what they name.

mod binding;
mod builder;
mod capacity;

use std::path::Path;

pub use binding::{BindingOptions, ShaderStage};
pub use builder::BuilderOptions;
pub use capacity::{
    CapacityOptions, MAX_LIGHT_INFOS_LIMIT, MAX_VOLUMES_LIMIT,
    ROTATION_DEPTH_LIMIT,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::LightVolumeError;

/// Top-level options container.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Buffer capacities and upload policy.
    pub capacity: CapacityOptions,
    /// Bind group slots and stage visibility.
    pub binding: BindingOptions,
    /// Light-to-volume assignment limits.
    pub builder: BuilderOptions,
}

impl Options {
    /// Generate JSON Schema describing the options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`LightVolumeError`] if the file cannot be read, does not
    /// parse, or holds values that fail [`Options::validate`].
    pub fn load(path: &Path) -> Result<Self, LightVolumeError> {
        let content =
            std::fs::read_to_string(path).map_err(LightVolumeError::Io)?;
        let options: Self = toml::from_str(&content)
            .map_err(|e| LightVolumeError::OptionsParse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`LightVolumeError`] on serialization or I/O failure.
    pub fn save(&self, path: &Path) -> Result<(), LightVolumeError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| LightVolumeError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(LightVolumeError::Io)?;
        }
        std::fs::write(path, content).map_err(LightVolumeError::Io)
    }

    /// Reject values the buffers cannot be built from.
    ///
    /// # Errors
    ///
    /// Returns [`LightVolumeError::InvalidOptions`] naming the first bad
    /// field.
    pub fn validate(&self) -> Result<(), LightVolumeError> {
        let invalid =
            |msg: &str| Err(LightVolumeError::InvalidOptions(msg.to_owned()));

        let capacity = &self.capacity;
        if !(1..=MAX_VOLUMES_LIMIT).contains(&capacity.max_volumes) {
            return invalid("capacity.max_volumes must be in 1..=65536");
        }
        if !(1..=MAX_LIGHT_INFOS_LIMIT).contains(&capacity.max_light_infos) {
            return invalid("capacity.max_light_infos must be in 1..=1048576");
        }
        if !(1..=ROTATION_DEPTH_LIMIT).contains(&capacity.rotation_depth) {
            return invalid("capacity.rotation_depth must be in 1..=16");
        }
        if self.binding.stages.is_empty() {
            return invalid("binding.stages must name at least one stage");
        }
        if self.binding.first_binding == u32::MAX {
            return invalid("binding.first_binding leaves no slot for ranges");
        }
        if self.builder.max_lights_per_volume == 0 {
            return invalid("builder.max_lights_per_volume must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[capacity]
max_volumes = 64

[binding]
stages = ["fragment", "compute"]
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.capacity.max_volumes, 64);
        assert_eq!(opts.capacity.max_light_infos, 2048);
        assert_eq!(opts.capacity.rotation_depth, 4);
        assert_eq!(opts.binding.first_binding, 5);
        assert_eq!(
            opts.binding.visibility(),
            wgpu::ShaderStages::FRAGMENT | wgpu::ShaderStages::COMPUTE
        );
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn default_bindings_match_fixed_slots() {
        let opts = Options::default();
        assert_eq!(opts.binding.info_binding(), 5);
        assert_eq!(opts.binding.range_binding(), 6);
        assert_eq!(
            opts.binding.visibility(),
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT
        );
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let mut opts = Options::default();
        opts.capacity.max_light_infos = 0;
        assert!(matches!(
            opts.validate(),
            Err(LightVolumeError::InvalidOptions(_))
        ));

        let mut opts = Options::default();
        opts.binding.stages.clear();
        assert!(opts.validate().is_err());
    }

    #[test]
    fn capacities_past_schema_maxima_are_rejected() {
        let mut opts = Options::default();
        opts.capacity.max_light_infos = 4_000_000;
        assert!(matches!(
            opts.validate(),
            Err(LightVolumeError::InvalidOptions(_))
        ));

        let mut opts = Options::default();
        opts.capacity.max_volumes = MAX_VOLUMES_LIMIT + 1;
        assert!(opts.validate().is_err());

        let mut opts = Options::default();
        opts.capacity.rotation_depth = ROTATION_DEPTH_LIMIT + 1;
        assert!(opts.validate().is_err());

        let mut opts = Options::default();
        opts.capacity.max_volumes = MAX_VOLUMES_LIMIT;
        opts.capacity.max_light_infos = MAX_LIGHT_INFOS_LIMIT;
        opts.capacity.rotation_depth = ROTATION_DEPTH_LIMIT;
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir()
            .join(format!("light-volumes-options-{}", std::process::id()));
        let path = dir.join("options.toml");

        let mut opts = Options::default();
        opts.capacity.upload_used_ranges_only = true;
        opts.builder.max_lights_per_volume = 8;
        opts.save(&path).unwrap();

        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded, opts);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn load_rejects_invalid_values() {
        let dir = std::env::temp_dir()
            .join(format!("light-volumes-invalid-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("options.toml");
        std::fs::write(&path, "[capacity]\nrotation_depth = 0\n").unwrap();

        assert!(matches!(
            Options::load(&path),
            Err(LightVolumeError::InvalidOptions(_))
        ));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("capacity"));
        assert!(props.contains_key("binding"));
        assert!(props.contains_key("builder"));

        let capacity = &props["capacity"]["properties"];
        assert!(capacity.get("max_volumes").is_some());
        assert!(capacity.get("rotation_depth").is_some());
    }
}
