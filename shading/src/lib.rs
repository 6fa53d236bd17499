//! CPU implementation of the procedural water surface model.
//!
//! A fluid pixel is shaded from a [`SurfaceSample`] and the per-frame
//! [`EnvironmentUniforms`]: the [`WaveField`] gives a wave height that is
//! differentiated into a shading normal, which then drives lighting, a sky
//! reflection and the view-dependent translucency of the water.
//!
//! ```rust
//! use bevy::math::Vec3;
//! use shading::atmosphere::{DaylightSky, SunLighting};
//! use shading::texture::TileableTexture;
//! use shading::{EnvironmentUniforms, FaceNormal, ShadingConfig, SurfaceSample};
//! use shading::{WaterSurfaceShader, WaveField};
//!
//! let field = WaveField::new(
//!     TileableTexture::from_perlin(32, 1, 4.0).unwrap(),
//!     TileableTexture::from_perlin(32, 2, 4.0).unwrap(),
//! );
//! let shader = WaterSurfaceShader::new(ShadingConfig::default(), field);
//! let env = EnvironmentUniforms::default();
//! let albedo = Vec3::new(0.2, 0.4, 0.8);
//! let sample = SurfaceSample::new(Vec3::new(3.0, 4.0, 0.0), FaceNormal::PosZ, albedo, 1.0, &env);
//! let result = shader.shade(&sample, &env, &SunLighting::default(), &DaylightSky::default());
//! assert!(result.alpha() <= 1.0);
//! ```

pub mod atmosphere;
pub mod color;
pub mod config;
pub mod constants;
pub mod environment;
pub mod error;
pub mod fluid;
pub mod texture;

pub use config::{load_shading_config, save_shading_config, ShadingConfig};
pub use environment::{EnvironmentUniforms, FluidLocals, Medium};
pub use error::ShadingError;
pub use fluid::{
    CloudMode, FaceNormal, FluidMode, ShadedResult, SurfaceSample, WaterSurfaceShader, WaveField,
};
