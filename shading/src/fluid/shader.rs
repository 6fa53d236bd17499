//! Per-pixel entry point of the fluid surface model.

use bevy::math::{Vec3, Vec4};

use super::composite::{
    apply_atmosphere, blend_surface, clamp_reflection, facing_ratio, gather_light, passthrough,
    reflect, translucent_alpha, Atmosphere, SceneLighting,
};
use super::{perturbed_normal, FluidMode, ShadedResult, SurfaceSample, WaveField};
use crate::color::srgb_to_linear;
use crate::config::ShadingConfig;
use crate::texture::TileSampler;
use crate::EnvironmentUniforms;

/// Stateless water shader.
///
/// Holds only immutable configuration and textures, so one instance can be
/// shared by any number of worker threads for a whole frame.
#[derive(Debug, Clone)]
pub struct WaterSurfaceShader<T> {
    config: ShadingConfig,
    field: WaveField<T>,
}

impl<T: TileSampler> WaterSurfaceShader<T> {
    pub fn new(config: ShadingConfig, field: WaveField<T>) -> Self {
        Self { config, field }
    }

    pub fn config(&self) -> &ShadingConfig {
        &self.config
    }

    pub fn field(&self) -> &WaveField<T> {
        &self.field
    }

    /// Shading normal used for `sample` under the configured fluid mode.
    pub fn shading_normal(&self, sample: &SurfaceSample, env: &EnvironmentUniforms) -> Vec3 {
        match self.config.mode {
            FluidMode::Cheap => sample.face.to_vec3(),
            FluidMode::Shiny => perturbed_normal(
                &self.field,
                &self.config.wave,
                &self.config.normal,
                sample.face,
                sample.position,
                env.tick,
                sample.distance,
            ),
        }
    }

    pub fn shade<L, A>(
        &self,
        sample: &SurfaceSample,
        env: &EnvironmentUniforms,
        lighting: &L,
        atmosphere: &A,
    ) -> ShadedResult
    where
        L: SceneLighting + ?Sized,
        A: Atmosphere + ?Sized,
    {
        let composite = &self.config.composite;
        let face_normal = sample.face.to_vec3();
        let normal = self.shading_normal(sample, env);
        let cam_to_frag = env.cam_to(sample.position);

        let terms = gather_light(
            lighting,
            composite,
            sample.position,
            normal,
            face_normal,
            sample.light,
            env.time_of_day,
        );
        let surf_color = lighting.illuminate(srgb_to_linear(sample.albedo), &terms);
        let alpha = translucent_alpha(terms.diffuse, composite.alpha_diffuse_scale);

        let color = match self.config.mode {
            FluidMode::Cheap => blend_surface(
                surf_color,
                surf_color,
                alpha,
                facing_ratio(face_normal, cam_to_frag),
            ),
            FluidMode::Shiny => {
                let reflect_dir =
                    clamp_reflection(reflect(cam_to_frag, normal), composite.min_reflection_z);
                let sky = atmosphere.sky(reflect_dir, env, sample.position, false);
                let reflect_color = sky.color.lerp(surf_color, composite.reflection_surface_mix);
                blend_surface(
                    reflect_color,
                    surf_color,
                    alpha,
                    passthrough(face_normal, cam_to_frag),
                )
            }
        };

        let fog_level = atmosphere.fog_level(sample.position, env);
        let with_clouds = self.config.cloud_mode.enabled();
        let view_sky = atmosphere.sky(cam_to_frag, env, env.cam_pos, with_clouds);
        let clouds = if with_clouds {
            view_sky.clouds
        } else {
            Vec4::ZERO
        };
        ShadedResult {
            color: apply_atmosphere(color, view_sky.color, fog_level, clouds),
        }
    }
}
