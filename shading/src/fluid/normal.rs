//! Finite-difference wave normals blended with the coarse face normal.

use bevy::math::Vec3;
use serde::{Deserialize, Serialize};

use super::{FaceNormal, WaveField, WaveFieldConfig};
use crate::constants::{NORMAL_DISTANCE_FALLOFF, NORMAL_SAMPLE_STEP, SLOPE_EPSILON};
use crate::texture::TileSampler;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalConfig {
    /// Finite-difference step in world units.
    pub step: f32,
    /// Exponent `k` of the blend factor `min(1 / distance^k, 1)`.
    pub distance_falloff: f32,
}

impl Default for NormalConfig {
    fn default() -> Self {
        Self {
            step: NORMAL_SAMPLE_STEP,
            distance_falloff: NORMAL_DISTANCE_FALLOFF,
        }
    }
}

impl NormalConfig {
    /// Weight of the wave normal against the face normal at `distance`.
    pub fn detail_factor(&self, distance: f32) -> f32 {
        if distance.is_nan() {
            return 0.0;
        }
        (1.0 / distance.max(0.0).powf(self.distance_falloff)).min(1.0)
    }
}

/// Converts three height samples into a tangent-space normal.
///
/// `h10` is offset by `step` along the tangent and `h01` along the
/// bitangent. A flat patch (zero slope product) yields `Vec3::Z`.
pub fn tangent_space_normal(h00: f32, h10: f32, h01: f32, step: f32) -> Vec3 {
    let slope = (h00 - h10).abs() * (h00 - h01).abs();
    if slope.is_nan() || slope < SLOPE_EPSILON {
        return Vec3::Z;
    }
    Vec3::new(-(h10 - h00) / step, -(h01 - h00) / step, step / slope)
        .try_normalize()
        .unwrap_or(Vec3::Z)
}

/// Shading normal for a fluid face at `pos`.
///
/// The wave field is sampled on the horizontal plane, stepping along the
/// horizontal parts of the face's tangent and bitangent. The resulting
/// normal is built in the basis of the positive face on the same axis and
/// negated for negative faces, then faded toward the flat face normal as the
/// sample moves away from the viewer focus.
///
/// Side faces have a vertical bitangent, so one difference is always zero
/// and they keep the face normal.
pub fn perturbed_normal<T: TileSampler>(
    field: &WaveField<T>,
    wave_config: &WaveFieldConfig,
    config: &NormalConfig,
    face: FaceNormal,
    pos: Vec3,
    time: f32,
    distance: f32,
) -> Vec3 {
    let base = face.to_vec3();
    let detail = config.detail_factor(distance);
    if detail <= 0.0 {
        return base;
    }

    let twin = face.positive();
    let p = pos.truncate();
    let along_tangent = twin.tangent().truncate() * config.step;
    let along_bitangent = twin.bitangent().truncate() * config.step;
    let h00 = field.height(p, time, wave_config);
    let h10 = field.height(p + along_tangent, time, wave_config);
    let h01 = field.height(p + along_bitangent, time, wave_config);

    let mut wave = twin.to_world(tangent_space_normal(h00, h10, h01, config.step));
    if !face.is_positive() {
        wave = -wave;
    }
    base.lerp(wave, detail).try_normalize().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::{ConstantTexture, TileableTexture};
    use bevy::math::Vec4;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn noisy_field() -> WaveField<TileableTexture> {
        WaveField::new(
            TileableTexture::from_perlin(64, 3, 6.0).unwrap(),
            TileableTexture::from_perlin(64, 5, 8.0).unwrap(),
        )
    }

    #[test]
    fn test_flat_patch_falls_back_to_face_normal() {
        assert_eq!(tangent_space_normal(1.0, 1.0, 1.0, 0.1), Vec3::Z);
        // One axis flat still gives a zero slope product.
        assert_eq!(tangent_space_normal(1.0, 2.0, 1.0, 0.1), Vec3::Z);

        let flat = ConstantTexture(Vec4::splat(0.5));
        let field = WaveField::new(flat, flat);
        for face in FaceNormal::ALL {
            let n = perturbed_normal(
                &field,
                &WaveFieldConfig::default(),
                &NormalConfig::default(),
                face,
                Vec3::new(4.0, 2.0, 1.0),
                3.0,
                0.5,
            );
            assert_eq!(n, face.to_vec3());
        }
    }

    #[test]
    fn test_tangent_normal_tilts_against_slope() {
        let n = tangent_space_normal(0.0, 0.2, 0.1, 0.1);
        assert!(n.x < 0.0 && n.y < 0.0 && n.z > 0.0);
        assert!((n.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_detail_factor_caps_and_decays() {
        let config = NormalConfig::default();
        assert_eq!(config.detail_factor(0.0), 1.0);
        assert_eq!(config.detail_factor(0.5), 1.0);
        assert_eq!(config.detail_factor(1.0), 1.0);
        assert!((config.detail_factor(16.0) - 0.125).abs() < 1e-6);
        assert!(config.detail_factor(1.0e9) < 1e-6);
        assert_eq!(config.detail_factor(f32::INFINITY), 0.0);
        assert_eq!(config.detail_factor(f32::NAN), 0.0);
    }

    #[test]
    fn test_normals_are_unit_length() {
        let field = noisy_field();
        let wave_config = WaveFieldConfig::default();
        let config = NormalConfig::default();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..300 {
            let pos = Vec3::new(
                rng.gen_range(-1000.0..1000.0),
                rng.gen_range(-1000.0..1000.0),
                rng.gen_range(-10.0..80.0),
            );
            let face = FaceNormal::ALL[rng.gen_range(0..6)];
            let time = rng.gen_range(0.0..500.0);
            let distance = rng.gen_range(0.0..400.0);
            let n = perturbed_normal(&field, &wave_config, &config, face, pos, time, distance);
            assert!(n.is_finite());
            assert!((n.length() - 1.0).abs() < 1e-4, "normal {n} not unit");
            // The face normal always dominates the visible hemisphere.
            assert!(n.dot(face.to_vec3()) > 0.0);
        }
    }

    #[test]
    fn test_far_normals_converge_to_face_normal() {
        let field = noisy_field();
        let wave_config = WaveFieldConfig::default();
        let config = NormalConfig::default();
        let pos = Vec3::new(12.3, -45.6, 0.0);
        let mut previous = f32::MAX;
        for distance in [1.0, 10.0, 100.0, 1.0e4, 1.0e8] {
            let n = perturbed_normal(
                &field,
                &wave_config,
                &config,
                FaceNormal::PosZ,
                pos,
                2.0,
                distance,
            );
            let deviation = (n - Vec3::Z).length();
            assert!(deviation <= previous + 1e-6);
            previous = deviation;
        }
        assert!(previous < 1e-3);
    }

    #[test]
    fn test_bottom_face_mirrors_top_face() {
        let field = noisy_field();
        let wave_config = WaveFieldConfig::default();
        let config = NormalConfig::default();
        let normal_at = |face, pos, time| {
            perturbed_normal(&field, &wave_config, &config, face, pos, time, 0.5)
        };

        let mut rng = StdRng::seed_from_u64(9);
        let mut tilted = 0;
        for _ in 0..100 {
            let pos = Vec3::new(rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0), 0.0);
            let time = rng.gen_range(0.0..50.0);
            let top = normal_at(FaceNormal::PosZ, pos, time);
            let bottom = normal_at(FaceNormal::NegZ, pos, time);
            assert!((bottom + top).length() < 1e-5, "top {top}, bottom {bottom}");
            if top != Vec3::Z {
                tilted += 1;
            }
        }
        assert!(tilted > 0);

        let pos = Vec3::new(5.1, -2.7, 0.0);
        let top = normal_at(FaceNormal::PosZ, pos, 0.0);
        let bottom = normal_at(FaceNormal::NegZ, pos, 0.0);
        assert!((bottom + top).length() < 1e-5);
    }

    #[test]
    fn test_top_face_slopes_follow_world_axes() {
        // Heights rise toward +x only along the tangent sample, toward +y
        // only along the bitangent sample.
        let n = FaceNormal::PosZ.to_world(tangent_space_normal(0.0, 0.3, 0.1, 0.1));
        assert!(n.x < 0.0 && n.y < 0.0 && n.z > 0.0);
        assert!(n.x < n.y);
    }

    #[test]
    fn test_side_faces_keep_face_normal() {
        let field = noisy_field();
        let wave_config = WaveFieldConfig::default();
        let config = NormalConfig::default();
        for face in [
            FaceNormal::PosX,
            FaceNormal::NegX,
            FaceNormal::PosY,
            FaceNormal::NegY,
        ] {
            for i in 0..20 {
                let pos = Vec3::new(i as f32 * 2.3, i as f32 * -1.7, 4.0);
                let n = perturbed_normal(&field, &wave_config, &config, face, pos, 1.0, 0.5);
                assert_eq!(n, face.to_vec3());
            }
        }
    }
}
