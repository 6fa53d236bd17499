//! Tunable parameters of the water model, stored as RON.

use log::{debug, info};
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::fluid::{CloudMode, CompositeConfig, FluidMode, NormalConfig, WaveFieldConfig};
use crate::ShadingError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ShadingConfig {
    pub mode: FluidMode,
    pub cloud_mode: CloudMode,
    pub wave: WaveFieldConfig,
    pub normal: NormalConfig,
    pub composite: CompositeConfig,
}

impl ShadingConfig {
    pub fn from_ron(contents: &str) -> Result<Self, ShadingError> {
        Ok(ron::de::from_str(contents)?)
    }

    pub fn to_ron(&self) -> Result<String, ShadingError> {
        let pretty_config = PrettyConfig::new()
            .with_depth_limit(4)
            .with_separate_tuple_members(true)
            .with_enumerate_arrays(true);
        Ok(ron::ser::to_string_pretty(self, pretty_config)?)
    }
}

/// Reads the config at `path`, falling back to defaults when the file does
/// not exist.
pub fn load_shading_config(path: &Path) -> Result<ShadingConfig, ShadingError> {
    if !path.exists() {
        info!(
            "Shading config not found: {}. Using default water parameters.",
            path.display()
        );
        return Ok(ShadingConfig::default());
    }

    let contents = fs::read_to_string(path)?;
    let config = ShadingConfig::from_ron(&contents)?;
    debug!(
        "Loaded shading config from {} ({} wave layers, mode {})",
        path.display(),
        config.wave.layers.len(),
        config.mode
    );
    Ok(config)
}

pub fn save_shading_config(config: &ShadingConfig, path: &Path) -> Result<(), ShadingError> {
    let serialized = config.to_ron()?;
    let mut file = File::create(path)?;
    file.write_all(serialized.as_bytes())?;
    info!("Shading config saved to {}", path.display());
    Ok(())
}
