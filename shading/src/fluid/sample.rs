use bevy::math::{Vec3, Vec4};

use super::FaceNormal;
use crate::color::linear_to_display;
use crate::{EnvironmentUniforms, ShadingError};

/// Everything the fluid shader knows about one covered pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSample {
    pub position: Vec3,
    pub face: FaceNormal,
    /// Albedo in sRGB.
    pub albedo: Vec3,
    /// Baked vertex light level in `[0, 1]`.
    pub light: f32,
    /// Distance from the viewer focus point.
    pub distance: f32,
}

impl SurfaceSample {
    pub fn new(
        position: Vec3,
        face: FaceNormal,
        albedo: Vec3,
        light: f32,
        env: &EnvironmentUniforms,
    ) -> Self {
        Self {
            position,
            face,
            albedo,
            light: light.clamp(0.0, 1.0),
            distance: env.focus_distance(position),
        }
    }

    /// Builds a sample from a packed face code as the fluid mesher emits it.
    pub fn from_face_code(
        position: Vec3,
        face_code: u8,
        albedo: Vec3,
        light: f32,
        env: &EnvironmentUniforms,
    ) -> Result<Self, ShadingError> {
        let face = FaceNormal::try_from(face_code)?;
        Ok(Self::new(position, face, albedo, light, env))
    }
}

/// Final RGBA of a fluid pixel in linear light.
///
/// Alpha 1 is an opaque reflection; lower alpha lets the refracted scene
/// underneath show through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadedResult {
    pub color: Vec4,
}

impl ShadedResult {
    pub fn rgb(&self) -> Vec3 {
        self.color.truncate()
    }

    pub fn alpha(&self) -> f32 {
        self.color.w
    }

    /// Composites over `background` and encodes for display.
    pub fn over(&self, background: Vec3, gamma: f32) -> Vec3 {
        let alpha = self.alpha().clamp(0.0, 1.0);
        linear_to_display(background.lerp(self.rgb(), alpha), gamma)
    }
}
