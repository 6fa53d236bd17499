use bevy::math::{Vec2, Vec3};
use rayon::prelude::*;
use shading::color::{linear_to_display, luminance};
use shading::fluid::{Atmosphere, SceneLighting};
use shading::texture::TileSampler;
use shading::{EnvironmentUniforms, FaceNormal, FluidLocals, SurfaceSample, WaterSurfaceShader};

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f32 = 0.5;

/// Colour seen through fully translucent water.
const SEABED_COLOR: Vec3 = Vec3::new(0.01, 0.04, 0.06);

const WATER_ALBEDO: Vec3 = Vec3::new(0.2, 0.45, 0.8);

const ASCII_RAMP: &[u8] = b" .:-=+*#%@";

pub struct Camera {
    pub pos: Vec3,
    pub target: Vec3,
    pub fov_y: f32,
}

impl Camera {
    /// Unit ray through the centre of cell `(col, row)`.
    pub fn ray(&self, col: u32, row: u32, width: u32, height: u32) -> Vec3 {
        let forward = (self.target - self.pos).normalize_or_zero();
        let right = forward.cross(Vec3::Z).normalize_or_zero();
        let up = right.cross(forward);

        let half_height = (self.fov_y * 0.5).tan();
        let aspect = width as f32 / height as f32 * CELL_ASPECT;
        let ndc = Vec2::new(
            (col as f32 + 0.5) / width as f32 * 2.0 - 1.0,
            1.0 - (row as f32 + 0.5) / height as f32 * 2.0,
        );
        let offset = right * ndc.x * half_height * aspect + up * ndc.y * half_height;
        (forward + offset).normalize_or_zero()
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Pixel {
    color: Vec3,
    water: Option<WaterHit>,
}

#[derive(Debug, Clone, Copy)]
struct WaterHit {
    alpha: f32,
    height: f32,
}

pub struct Frame {
    pub width: u32,
    pub height: u32,
    pixels: Vec<Pixel>,
}

#[derive(Debug, Clone, Copy)]
pub struct FrameStats {
    pub water_pixels: usize,
    pub mean_alpha: f32,
    pub mean_luminance: f32,
    pub min_height: f32,
    pub max_height: f32,
}

/// Shades the water plane at local `z = 0` of `locals`, one rayon task per
/// row.
pub fn render_frame<T, L, A>(
    shader: &WaterSurfaceShader<T>,
    env: &EnvironmentUniforms,
    lighting: &L,
    atmosphere: &A,
    camera: &Camera,
    locals: &FluidLocals,
) -> Frame
where
    T: TileSampler + Sync,
    L: SceneLighting + Sync,
    A: Atmosphere + Sync,
{
    let width = env.screen_res.x.max(1);
    let height = env.screen_res.y.max(1);
    let with_clouds = shader.config().cloud_mode.enabled();
    let cam_local = locals.local_pos(camera.pos);

    let pixels = (0..height)
        .into_par_iter()
        .flat_map_iter(|row| {
            (0..width).map(move |col| {
                let dir = camera.ray(col, row, width, height);
                let t = if dir.z < -1e-4 {
                    -cam_local.z / dir.z
                } else {
                    -1.0
                };

                if t <= 0.0 || t > env.view_distance {
                    let sky = atmosphere.sky(dir, env, camera.pos, with_clouds).color;
                    return Pixel {
                        color: linear_to_display(sky, env.gamma),
                        water: None,
                    };
                }

                let pos = locals.world_pos(cam_local + dir * t);
                let sample = SurfaceSample::new(pos, FaceNormal::PosZ, WATER_ALBEDO, 1.0, env);
                let result = shader.shade(&sample, env, lighting, atmosphere);
                let wave = &shader.config().wave;
                Pixel {
                    color: result.over(SEABED_COLOR, env.gamma),
                    water: Some(WaterHit {
                        alpha: result.alpha(),
                        height: shader.field().height(pos.truncate(), env.tick, wave),
                    }),
                }
            })
        })
        .collect();

    Frame {
        width,
        height,
        pixels,
    }
}

impl Frame {
    pub fn stats(&self) -> FrameStats {
        let hits: Vec<&WaterHit> = self.pixels.iter().filter_map(|p| p.water.as_ref()).collect();
        let water_pixels = hits.len();
        let denom = water_pixels.max(1) as f32;

        FrameStats {
            water_pixels,
            mean_alpha: hits.iter().map(|h| h.alpha).sum::<f32>() / denom,
            mean_luminance: self.pixels.iter().map(|p| luminance(p.color)).sum::<f32>()
                / self.pixels.len().max(1) as f32,
            min_height: hits.iter().map(|h| h.height).fold(f32::INFINITY, f32::min),
            max_height: hits.iter().map(|h| h.height).fold(f32::NEG_INFINITY, f32::max),
        }
    }

    /// One line of characters per row, brighter cells using denser glyphs.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(((self.width + 1) * self.height) as usize);
        for row in self.pixels.chunks(self.width as usize) {
            for pixel in row {
                let l = luminance(pixel.color).clamp(0.0, 1.0);
                let index = (l * (ASCII_RAMP.len() - 1) as f32).round() as usize;
                out.push(ASCII_RAMP[index] as char);
            }
            out.push('\n');
        }
        out
    }
}
