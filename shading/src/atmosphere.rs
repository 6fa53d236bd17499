//! Simple stand-ins for the host renderer's sky and lighting.
//!
//! These are enough to look at the water model outside the engine: a
//! gradient sky, a sun that follows the time of day, distance fog and
//! inverse-square point lights. There are no shadows and no clouds.

use bevy::math::{Vec3, Vec4};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::constants::DAY_LENGTH_SECONDS;
use crate::fluid::{Atmosphere, LightTerms, SceneLighting, SkySample};
use crate::{EnvironmentUniforms, Medium};

/// Unit vector toward the sun. Midnight points straight down, noon up.
pub fn sun_dir(time_of_day: f32) -> Vec3 {
    let angle = time_of_day / DAY_LENGTH_SECONDS * TAU;
    Vec3::new(angle.sin(), 0.0, -angle.cos())
}

/// 1 with the sun well above the horizon, fading to 0 below it.
pub fn daylight(time_of_day: f32) -> f32 {
    (sun_dir(time_of_day).z * 4.0 + 0.5).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DaylightSky {
    pub zenith: Vec3,
    pub horizon: Vec3,
    pub night: Vec3,
    /// Fraction of the view distance at which fog is complete in air.
    pub fog_extent: f32,
    /// Fog reach under water, in world units.
    pub water_fog_extent: f32,
}

impl Default for DaylightSky {
    fn default() -> Self {
        Self {
            zenith: Vec3::new(0.15, 0.35, 0.85),
            horizon: Vec3::new(0.6, 0.75, 0.95),
            night: Vec3::new(0.005, 0.01, 0.03),
            fog_extent: 0.9,
            water_fog_extent: 24.0,
        }
    }
}

impl Atmosphere for DaylightSky {
    fn sky(
        &self,
        dir: Vec3,
        env: &EnvironmentUniforms,
        _origin: Vec3,
        _with_clouds: bool,
    ) -> SkySample {
        let elevation = dir.normalize_or_zero().z.max(0.0).sqrt();
        let day = self.horizon.lerp(self.zenith, elevation);
        SkySample {
            color: self.night.lerp(day, daylight(env.time_of_day)),
            clouds: Vec4::ZERO,
        }
    }

    fn fog_level(&self, pos: Vec3, env: &EnvironmentUniforms) -> f32 {
        let distance = env.cam_pos.distance(pos);
        let extent = match env.medium {
            Medium::Air => env.view_distance * self.fog_extent,
            Medium::Water => self.water_fog_extent,
        };
        if extent <= 0.0 {
            return 1.0;
        }
        (distance / extent).clamp(0.0, 1.0).powi(2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    pub pos: Vec3,
    pub color: Vec3,
    pub strength: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunLighting {
    pub sun_color: Vec3,
    pub ambient: Vec3,
    pub exposure: f32,
    pub point_lights: Vec<PointLight>,
}

impl Default for SunLighting {
    fn default() -> Self {
        Self {
            sun_color: Vec3::new(1.0, 0.95, 0.85),
            ambient: Vec3::new(0.15, 0.18, 0.25),
            exposure: 1.5,
            point_lights: Vec::new(),
        }
    }
}

impl SceneLighting for SunLighting {
    fn sun_diffuse(&self, normal: Vec3, time_of_day: f32) -> LightTerms {
        let day = daylight(time_of_day);
        let diffuse = self.sun_color * normal.dot(sun_dir(time_of_day)).max(0.0) * day;
        let ambient = self.ambient * (0.1 + 0.9 * day);
        LightTerms {
            light: diffuse + ambient,
            diffuse,
            ambient,
        }
    }

    fn point_light(&self, pos: Vec3, normal: Vec3) -> Vec3 {
        self.point_lights
            .iter()
            .map(|light| {
                let to_light = light.pos - pos;
                let distance_sq = to_light.length_squared().max(1.0);
                let facing = normal.dot(to_light.normalize_or_zero()).max(0.0);
                light.color * light.strength * facing / distance_sq
            })
            .sum()
    }

    fn shadow(&self, _pos: Vec3, _normal: Vec3) -> f32 {
        1.0
    }

    fn illuminate(&self, albedo: Vec3, terms: &LightTerms) -> Vec3 {
        let lit = albedo * (terms.light + terms.diffuse * 0.5) * self.exposure;
        Vec3::ONE - (-lit).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOON: f32 = DAY_LENGTH_SECONDS * 0.5;

    #[test]
    fn test_sun_is_overhead_at_noon() {
        assert!((sun_dir(NOON) - Vec3::Z).length() < 1e-5);
        assert!((sun_dir(0.0) - Vec3::NEG_Z).length() < 1e-5);
        assert_eq!(daylight(NOON), 1.0);
        assert_eq!(daylight(0.0), 0.0);
    }

    #[test]
    fn test_sky_is_brighter_overhead_at_noon() {
        let sky = DaylightSky::default();
        let env = EnvironmentUniforms {
            time_of_day: NOON,
            ..Default::default()
        };
        let up = sky.sky(Vec3::Z, &env, Vec3::ZERO, true).color;
        let flat = sky.sky(Vec3::X, &env, Vec3::ZERO, true).color;
        assert!((up - sky.zenith).length() < 1e-5);
        assert!((flat - sky.horizon).length() < 1e-5);
        let night_env = EnvironmentUniforms {
            time_of_day: 0.0,
            ..Default::default()
        };
        assert!((sky.sky(Vec3::Z, &night_env, Vec3::ZERO, true).color - sky.night).length() < 1e-5);
    }

    #[test]
    fn test_fog_grows_with_distance_and_under_water() {
        let sky = DaylightSky::default();
        let env = EnvironmentUniforms {
            cam_pos: Vec3::ZERO,
            view_distance: 100.0,
            ..Default::default()
        };
        assert_eq!(sky.fog_level(Vec3::ZERO, &env), 0.0);
        let near = sky.fog_level(Vec3::new(10.0, 0.0, 0.0), &env);
        let far = sky.fog_level(Vec3::new(80.0, 0.0, 0.0), &env);
        assert!(near < far && far < 1.0);
        assert_eq!(sky.fog_level(Vec3::new(500.0, 0.0, 0.0), &env), 1.0);

        let underwater = EnvironmentUniforms {
            medium: Medium::Water,
            ..env
        };
        assert!(sky.fog_level(Vec3::new(10.0, 0.0, 0.0), &underwater) > near);
    }

    #[test]
    fn test_point_lights_fall_off_and_respect_facing() {
        let lighting = SunLighting {
            point_lights: vec![PointLight {
                pos: Vec3::new(0.0, 0.0, 4.0),
                color: Vec3::ONE,
                strength: 16.0,
            }],
            ..Default::default()
        };
        let lit = lighting.point_light(Vec3::ZERO, Vec3::Z);
        assert!((lit - Vec3::ONE).abs().max_element() < 1e-5);
        assert_eq!(lighting.point_light(Vec3::ZERO, Vec3::NEG_Z), Vec3::ZERO);
    }

    #[test]
    fn test_illuminate_stays_in_unit_range() {
        let lighting = SunLighting::default();
        let terms = lighting.sun_diffuse(Vec3::Z, NOON);
        let color = lighting.illuminate(Vec3::ONE, &terms);
        assert!(color.min_element() > 0.0 && color.max_element() < 1.0);
        let dark = lighting.illuminate(Vec3::ONE, &LightTerms::default());
        assert_eq!(dark, Vec3::ZERO);
    }
}
