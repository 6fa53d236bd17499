//! Colour-space helpers shared by the fluid shading and the preview.

use bevy::color::{LinearRgba, Srgba};
use bevy::math::Vec3;

/// Decodes an sRGB albedo into linear light.
pub fn srgb_to_linear(color: Vec3) -> Vec3 {
    let linear = LinearRgba::from(Srgba::rgb(color.x, color.y, color.z));
    Vec3::new(linear.red, linear.green, linear.blue)
}

/// Encodes linear colour for display with a plain power-law gamma.
pub fn linear_to_display(color: Vec3, gamma: f32) -> Vec3 {
    let inv_gamma = 1.0 / gamma.max(f32::EPSILON);
    color.clamp(Vec3::ZERO, Vec3::ONE).powf(inv_gamma)
}

/// Relative luminance using Rec. 709 weights.
pub fn luminance(color: Vec3) -> f32 {
    color.dot(Vec3::new(0.2126, 0.7152, 0.0722))
}
