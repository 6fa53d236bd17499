//! Per-frame and per-draw uniform data supplied by the host renderer.

use bevy::math::{IVec3, UVec2, Vec3};
use serde::{Deserialize, Serialize};

/// Medium the camera is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Medium {
    #[default]
    Air,
    Water,
}

impl Medium {
    /// Decodes the medium flag as the host uploads it (0 = air, 1 = water).
    pub fn from_flag(flag: u32) -> Self {
        match flag {
            1 => Medium::Water,
            _ => Medium::Air,
        }
    }
}

/// Global environment block, refreshed once per frame and read-only while
/// shading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentUniforms {
    pub cam_pos: Vec3,
    /// Point the camera orbits; normal detail falls off with distance to it.
    pub focus_pos: Vec3,
    pub view_distance: f32,
    /// Seconds into the current day.
    pub time_of_day: f32,
    /// Elapsed seconds, drives wave animation.
    pub tick: f32,
    pub screen_res: UVec2,
    pub light_count: u32,
    pub shadow_count: u32,
    pub medium: Medium,
    pub select_pos: Option<IVec3>,
    pub gamma: f32,
}

impl Default for EnvironmentUniforms {
    fn default() -> Self {
        Self {
            cam_pos: Vec3::new(0.0, 0.0, 10.0),
            focus_pos: Vec3::ZERO,
            view_distance: 256.0,
            time_of_day: 12.0 * 60.0 * 60.0,
            tick: 0.0,
            screen_res: UVec2::new(1280, 720),
            light_count: 0,
            shadow_count: 0,
            medium: Medium::Air,
            select_pos: None,
            gamma: 1.0,
        }
    }
}

impl EnvironmentUniforms {
    /// Unit direction from the camera toward `pos`.
    pub fn cam_to(&self, pos: Vec3) -> Vec3 {
        (pos - self.cam_pos).normalize_or_zero()
    }

    pub fn focus_distance(&self, pos: Vec3) -> f32 {
        self.focus_pos.distance(pos)
    }
}

/// Per-draw block of a fluid chunk model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct FluidLocals {
    pub model_offset: Vec3,
}

impl FluidLocals {
    pub fn world_pos(&self, local_pos: Vec3) -> Vec3 {
        local_pos + self.model_offset
    }

    pub fn local_pos(&self, world_pos: Vec3) -> Vec3 {
        world_pos - self.model_offset
    }
}
