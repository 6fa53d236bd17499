//! Lighting, reflection and atmosphere compositing for fluid surfaces.
//!
//! Sun, point lights, shadows, tone mapping, sky colour and fog all belong
//! to the host renderer. They are injected through [`SceneLighting`] and
//! [`Atmosphere`] so the water model can be evaluated against stubs.

use bevy::math::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::constants::{ALPHA_DIFFUSE_SCALE, MIN_REFLECTION_Z, REFLECTION_SURFACE_MIX};
use crate::EnvironmentUniforms;

/// Light reaching a surface point, split the way `illuminate` consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LightTerms {
    pub light: Vec3,
    pub diffuse: Vec3,
    pub ambient: Vec3,
}

pub trait SceneLighting {
    /// Sun and sky light for a surface facing `normal`.
    fn sun_diffuse(&self, normal: Vec3, time_of_day: f32) -> LightTerms;

    /// Summed contribution of nearby point lights.
    fn point_light(&self, pos: Vec3, normal: Vec3) -> Vec3;

    /// Occlusion factor in `[0, 1]`, 1 meaning fully lit.
    fn shadow(&self, pos: Vec3, normal: Vec3) -> f32;

    /// Tone/exposure function producing the lit surface colour.
    fn illuminate(&self, albedo: Vec3, terms: &LightTerms) -> Vec3;
}

/// Result of a sky lookup. `clouds.a` is the cloud overlay coverage.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SkySample {
    pub color: Vec3,
    pub clouds: Vec4,
}

pub trait Atmosphere {
    /// Sky colour seen along `dir` from `origin`. Cloud coverage is only
    /// computed when `with_clouds` is set.
    fn sky(
        &self,
        dir: Vec3,
        env: &EnvironmentUniforms,
        origin: Vec3,
        with_clouds: bool,
    ) -> SkySample;

    /// Fog blend factor in `[0, 1]` for a point.
    fn fog_level(&self, pos: Vec3, env: &EnvironmentUniforms) -> f32;
}

/// How the ambient term is attenuated by the per-vertex light and shadow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AmbientAttenuation {
    /// `ambient *= light * shadow`, matching the diffuse term.
    #[default]
    LightAndShadow,
    /// `ambient *= shadow`, ignoring the vertex light level.
    ShadowOnly,
}

impl AmbientAttenuation {
    pub fn factor(self, light: f32, shadow: f32) -> f32 {
        match self {
            AmbientAttenuation::LightAndShadow => light * shadow,
            AmbientAttenuation::ShadowOnly => shadow,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositeConfig {
    pub min_reflection_z: f32,
    pub reflection_surface_mix: f32,
    pub alpha_diffuse_scale: f32,
    pub ambient_attenuation: AmbientAttenuation,
}

impl Default for CompositeConfig {
    fn default() -> Self {
        Self {
            min_reflection_z: MIN_REFLECTION_Z,
            reflection_surface_mix: REFLECTION_SURFACE_MIX,
            alpha_diffuse_scale: ALPHA_DIFFUSE_SCALE,
            ambient_attenuation: AmbientAttenuation::default(),
        }
    }
}

/// Gathers sun, shadow and point light terms for a sample.
///
/// Shadows are looked up with the flat face normal, everything else with the
/// shading normal. Point lights are neither shadowed nor scaled by `light`.
pub fn gather_light<L: SceneLighting + ?Sized>(
    lighting: &L,
    config: &CompositeConfig,
    pos: Vec3,
    normal: Vec3,
    face_normal: Vec3,
    light: f32,
    time_of_day: f32,
) -> LightTerms {
    let mut terms = lighting.sun_diffuse(normal, time_of_day);
    let shadow = lighting.shadow(pos, face_normal);
    terms.diffuse *= light * shadow;
    terms.ambient *= config.ambient_attenuation.factor(light, shadow);

    let point = lighting.point_light(pos, normal);
    terms.light += point;
    terms.diffuse += point;
    terms
}

/// Mirror `incident` about `normal`.
#[inline]
pub fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    incident - 2.0 * incident.dot(normal) * normal
}

/// Keeps a reflection ray from dipping below the horizon.
#[inline]
pub fn clamp_reflection(dir: Vec3, min_z: f32) -> Vec3 {
    Vec3::new(dir.x, dir.y, dir.z.max(min_z))
}

/// `normal` flipped, if needed, to face against `incident`.
#[inline]
pub fn face_forward(normal: Vec3, incident: Vec3) -> Vec3 {
    if normal.dot(incident) < 0.0 {
        normal
    } else {
        -normal
    }
}

/// Cosine between the viewer-facing face normal and the view ray, clamped
/// to zero. 0 at grazing angles, 1 looking straight down.
#[inline]
pub fn facing_ratio(face_normal: Vec3, cam_to_frag: Vec3) -> f32 {
    face_forward(face_normal, cam_to_frag)
        .dot(-cam_to_frag)
        .max(0.0)
}

/// View-angle blend weight: 0 is a pure reflection, 1 is translucent.
#[inline]
pub fn passthrough(face_normal: Vec3, cam_to_frag: Vec3) -> f32 {
    facing_ratio(face_normal, cam_to_frag).sqrt()
}

/// Alpha of the translucent branch; brighter-lit water looks more opaque.
#[inline]
pub fn translucent_alpha(diffuse: Vec3, scale: f32) -> f32 {
    let diffuse = (diffuse.element_sum() / 3.0).max(0.0);
    1.0 / (1.0 + diffuse * scale)
}

/// Blends the opaque reflective colour with the translucent surface colour.
pub fn blend_surface(reflection: Vec3, surface: Vec3, alpha: f32, passthrough: f32) -> Vec4 {
    reflection
        .extend(1.0)
        .lerp(surface.extend(alpha), passthrough.clamp(0.0, 1.0))
}

/// Fades toward fog, then overlays clouds. Both keep alpha at zero so the
/// blend ends up showing the sky behind.
pub fn apply_atmosphere(color: Vec4, fog_color: Vec3, fog_level: f32, clouds: Vec4) -> Vec4 {
    let fogged = color.lerp(fog_color.extend(0.0), fog_level.clamp(0.0, 1.0));
    fogged.lerp(clouds.truncate().extend(0.0), clouds.w.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedLighting;

    impl SceneLighting for FixedLighting {
        fn sun_diffuse(&self, _normal: Vec3, _time_of_day: f32) -> LightTerms {
            LightTerms {
                light: Vec3::splat(1.0),
                diffuse: Vec3::splat(0.8),
                ambient: Vec3::splat(0.2),
            }
        }

        fn point_light(&self, _pos: Vec3, _normal: Vec3) -> Vec3 {
            Vec3::new(0.1, 0.0, 0.0)
        }

        fn shadow(&self, _pos: Vec3, _normal: Vec3) -> f32 {
            0.5
        }

        fn illuminate(&self, albedo: Vec3, terms: &LightTerms) -> Vec3 {
            albedo * terms.light
        }
    }

    #[test]
    fn test_light_is_attenuated_then_point_lit() {
        let config = CompositeConfig::default();
        let terms = gather_light(&FixedLighting, &config, Vec3::ZERO, Vec3::Z, Vec3::Z, 0.5, 0.0);
        assert!((terms.light - Vec3::new(1.1, 1.0, 1.0)).abs().max_element() < 1e-6);
        assert!((terms.diffuse - Vec3::new(0.3, 0.2, 0.2)).abs().max_element() < 1e-6);
        assert!((terms.ambient - Vec3::splat(0.05)).abs().max_element() < 1e-6);
    }

    #[test]
    fn test_shadow_only_ambient_ignores_vertex_light() {
        let config = CompositeConfig {
            ambient_attenuation: AmbientAttenuation::ShadowOnly,
            ..Default::default()
        };
        let terms = gather_light(&FixedLighting, &config, Vec3::ZERO, Vec3::Z, Vec3::Z, 0.25, 0.0);
        assert!((terms.ambient - Vec3::splat(0.1)).abs().max_element() < 1e-6);
    }

    #[test]
    fn test_reflection_is_clamped_above_horizon() {
        let dir = clamp_reflection(Vec3::new(0.3, 0.2, -0.5), MIN_REFLECTION_Z);
        assert_eq!(dir, Vec3::new(0.3, 0.2, 0.05));
        let up = clamp_reflection(Vec3::new(0.0, 0.6, 0.8), MIN_REFLECTION_Z);
        assert_eq!(up.z, 0.8);
    }

    #[test]
    fn test_reflect_mirrors_about_normal() {
        let r = reflect(Vec3::new(1.0, 0.0, -1.0), Vec3::Z);
        assert_eq!(r, Vec3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn test_passthrough_extremes() {
        // Straight down onto the water: fully translucent.
        assert!((passthrough(Vec3::Z, Vec3::NEG_Z) - 1.0).abs() < 1e-6);
        // Looking up at the surface from below uses the flipped normal.
        assert!((passthrough(Vec3::Z, Vec3::Z) - 1.0).abs() < 1e-6);
        // Grazing: fully reflective.
        assert_eq!(passthrough(Vec3::Z, Vec3::X), 0.0);
    }

    #[test]
    fn test_passthrough_grows_with_glancing_angle() {
        let mut previous = -1.0;
        for step in 0..=90 {
            let elevation = (step as f32).to_radians();
            let view = Vec3::new(elevation.cos(), 0.0, -elevation.sin());
            let p = passthrough(Vec3::Z, view);
            assert!(p >= previous - 1e-6, "passthrough dropped at {step} degrees");
            previous = p;
        }
    }

    #[test]
    fn test_translucent_alpha_falls_with_diffuse() {
        assert_eq!(translucent_alpha(Vec3::ZERO, ALPHA_DIFFUSE_SCALE), 1.0);
        assert!((translucent_alpha(Vec3::splat(4.0), ALPHA_DIFFUSE_SCALE) - 0.5).abs() < 1e-6);
        assert_eq!(translucent_alpha(Vec3::splat(-3.0), ALPHA_DIFFUSE_SCALE), 1.0);
    }

    #[test]
    fn test_zero_passthrough_is_opaque_reflection() {
        let c = blend_surface(Vec3::new(0.2, 0.4, 0.6), Vec3::ONE, 0.3, 0.0);
        assert_eq!(c, Vec4::new(0.2, 0.4, 0.6, 1.0));
        let c = blend_surface(Vec3::ZERO, Vec3::ONE, 0.3, 1.0);
        assert!((c - Vec4::new(1.0, 1.0, 1.0, 0.3)).abs().max_element() < 1e-6);
    }

    #[test]
    fn test_atmosphere_fades_alpha() {
        let color = Vec4::new(1.0, 1.0, 1.0, 1.0);
        let clear = apply_atmosphere(color, Vec3::ZERO, 0.0, Vec4::ZERO);
        assert_eq!(clear, color);
        let foggy = apply_atmosphere(color, Vec3::ZERO, 1.0, Vec4::ZERO);
        assert_eq!(foggy, Vec4::ZERO);
        let cloudy = apply_atmosphere(color, Vec3::ZERO, 0.0, Vec4::new(0.5, 0.5, 0.5, 0.5));
        assert_eq!(cloudy, Vec4::new(0.75, 0.75, 0.75, 0.5));
    }
}
