//! Fluid surface shading.
//!
//! ## Pipeline
//!
//! ```text
//!   SurfaceSample ──► WaveField (height, domain warped)
//!                          │ finite differences
//!                          ▼
//!                   perturbed_normal ──► gather_light ──► illuminate
//!                                             │
//!              sky reflection ◄── reflect ◄───┘
//!                          │
//!                          ▼
//!          blend by passthrough ──► fog / clouds ──► ShadedResult
//! ```
//!
//! `FluidMode::Cheap` skips the wave field and the reflection lookup.

pub mod composite;
pub mod face;
pub mod normal;
pub mod sample;
pub mod shader;
pub mod wave_field;

pub use composite::{
    AmbientAttenuation, Atmosphere, CompositeConfig, LightTerms, SceneLighting, SkySample,
};
pub use face::FaceNormal;
pub use normal::{perturbed_normal, NormalConfig};
pub use sample::{ShadedResult, SurfaceSample};
pub use shader::WaterSurfaceShader;
pub use wave_field::{WaveField, WaveFieldConfig, WaveLayer, WaveSource};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fluid rendering quality.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Serialize, Deserialize, Default)]
pub enum FluidMode {
    /// Face normal only, no reflections.
    Cheap,
    /// Animated wave normals with sky reflections.
    #[default]
    Shiny,
}

impl FluidMode {
    pub fn name(&self) -> &'static str {
        match self {
            FluidMode::Cheap => "cheap",
            FluidMode::Shiny => "shiny",
        }
    }
}

impl fmt::Display for FluidMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FluidMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cheap" => Ok(FluidMode::Cheap),
            "shiny" => Ok(FluidMode::Shiny),
            other => Err(format!("unknown fluid mode '{other}', expected cheap or shiny")),
        }
    }
}

/// Whether the cloud overlay is blended over fluid surfaces.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Serialize, Deserialize, Default)]
pub enum CloudMode {
    None,
    #[default]
    Regular,
}

impl CloudMode {
    pub fn name(&self) -> &'static str {
        match self {
            CloudMode::None => "none",
            CloudMode::Regular => "regular",
        }
    }

    pub fn enabled(self) -> bool {
        self == CloudMode::Regular
    }
}

impl fmt::Display for CloudMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CloudMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(CloudMode::None),
            "regular" => Ok(CloudMode::Regular),
            other => Err(format!("unknown cloud mode '{other}', expected none or regular")),
        }
    }
}
