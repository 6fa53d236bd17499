/// Length of a full day/night cycle in seconds of `time_of_day`.
pub const DAY_LENGTH_SECONDS: f32 = 24.0 * 60.0 * 60.0;

/// Gain applied after the signed square-root remap of the raw wave sum.
pub const WAVE_HEIGHT_GAIN: f32 = 5.5;
/// Horizontal positions are scaled by this before any texture lookup.
pub const WAVE_POSITION_SCALE: f32 = 0.5;
/// Tick time is scaled by this before any texture lookup.
pub const WAVE_TIME_SCALE: f32 = 0.75;

/// Finite-difference step in world units used to estimate wave slopes.
pub const NORMAL_SAMPLE_STEP: f32 = 0.1;
/// Exponent of the distance falloff for the wave normal blend.
pub const NORMAL_DISTANCE_FALLOFF: f32 = 0.75;
/// Slope products below this are treated as a perfectly flat patch.
pub const SLOPE_EPSILON: f32 = 1.0e-8;

/// Lowest vertical component allowed for a reflection ray.
pub const MIN_REFLECTION_Z: f32 = 0.05;
/// How far the reflected sky colour is pulled toward the lit surface colour.
pub const REFLECTION_SURFACE_MIX: f32 = 0.6;
/// Scale of the diffuse light term in the translucent alpha `1 / (1 + d * k)`.
pub const ALPHA_DIFFUSE_SCALE: f32 = 0.25;

pub const CONFIG_FILE_NAME: &str = "water_shading.ron";
