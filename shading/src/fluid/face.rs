//! Axis-aligned face normals of fluid quads.

use bevy::math::Vec3;
use serde::{Deserialize, Serialize};

use crate::ShadingError;

/// Bit offset of the 3-bit face code inside a packed position/normal word.
pub const FACE_CODE_SHIFT: u32 = 29;

/// One of the six directions a voxel face can point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaceNormal {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl FaceNormal {
    pub const ALL: [FaceNormal; 6] = [
        FaceNormal::PosX,
        FaceNormal::NegX,
        FaceNormal::PosY,
        FaceNormal::NegY,
        FaceNormal::PosZ,
        FaceNormal::NegZ,
    ];

    /// Packed code: `axis << 1 | positive`, axis 0 = x, 1 = y, 2 = z.
    pub fn code(self) -> u8 {
        match self {
            FaceNormal::NegX => 0b000,
            FaceNormal::PosX => 0b001,
            FaceNormal::NegY => 0b010,
            FaceNormal::PosY => 0b011,
            FaceNormal::NegZ => 0b100,
            FaceNormal::PosZ => 0b101,
        }
    }

    /// Extracts the face from the top three bits of a packed vertex word.
    pub fn from_packed(pos_norm: u32) -> Result<Self, ShadingError> {
        Self::try_from(((pos_norm >> FACE_CODE_SHIFT) & 0x7) as u8)
    }

    /// Picks the first non-zero axis of `norm`, defaulting to `PosX` for a
    /// zero vector.
    pub fn from_vec3(norm: Vec3) -> Self {
        let component = norm
            .to_array()
            .into_iter()
            .enumerate()
            .find(|(_, e)| *e != 0.0);
        match component {
            Some((0, e)) if e < 0.0 => FaceNormal::NegX,
            Some((1, e)) if e < 0.0 => FaceNormal::NegY,
            Some((1, _)) => FaceNormal::PosY,
            Some((2, e)) if e < 0.0 => FaceNormal::NegZ,
            Some((2, _)) => FaceNormal::PosZ,
            _ => FaceNormal::PosX,
        }
    }

    pub fn to_vec3(self) -> Vec3 {
        match self {
            FaceNormal::PosX => Vec3::X,
            FaceNormal::NegX => Vec3::NEG_X,
            FaceNormal::PosY => Vec3::Y,
            FaceNormal::NegY => Vec3::NEG_Y,
            FaceNormal::PosZ => Vec3::Z,
            FaceNormal::NegZ => Vec3::NEG_Z,
        }
    }

    pub fn is_positive(self) -> bool {
        self.code() & 1 == 1
    }

    /// The face on the same axis pointing the positive way.
    pub fn positive(self) -> Self {
        match self {
            FaceNormal::PosX | FaceNormal::NegX => FaceNormal::PosX,
            FaceNormal::PosY | FaceNormal::NegY => FaceNormal::PosY,
            FaceNormal::PosZ | FaceNormal::NegZ => FaceNormal::PosZ,
        }
    }

    /// A fixed tangent perpendicular to the face.
    pub fn tangent(self) -> Vec3 {
        match self {
            FaceNormal::PosZ | FaceNormal::NegZ => Vec3::X,
            FaceNormal::PosX | FaceNormal::NegX => Vec3::Y,
            FaceNormal::PosY | FaceNormal::NegY => Vec3::Z,
        }
    }

    /// `normal × tangent`, completing a right-handed basis.
    pub fn bitangent(self) -> Vec3 {
        self.to_vec3().cross(self.tangent())
    }

    /// Maps a tangent-space vector (x along tangent, y along bitangent,
    /// z along the face normal) into world space.
    pub fn to_world(self, tangent_space: Vec3) -> Vec3 {
        self.tangent() * tangent_space.x
            + self.bitangent() * tangent_space.y
            + self.to_vec3() * tangent_space.z
    }
}

impl TryFrom<u8> for FaceNormal {
    type Error = ShadingError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0b000 => Ok(FaceNormal::NegX),
            0b001 => Ok(FaceNormal::PosX),
            0b010 => Ok(FaceNormal::NegY),
            0b011 => Ok(FaceNormal::PosY),
            0b100 => Ok(FaceNormal::NegZ),
            0b101 => Ok(FaceNormal::PosZ),
            other => Err(ShadingError::InvalidFaceCode(other)),
        }
    }
}
