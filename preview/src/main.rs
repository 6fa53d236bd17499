use std::path::PathBuf;

use bevy::math::{UVec2, Vec3};
use clap::Parser;
use log::info;
use shading::atmosphere::{DaylightSky, SunLighting};
use shading::constants::CONFIG_FILE_NAME;
use shading::texture::TileableTexture;
use shading::{
    load_shading_config, save_shading_config, CloudMode, EnvironmentUniforms, FluidLocals,
    FluidMode, ShadingError, WaterSurfaceShader, WaveField,
};

use crate::frame::{render_frame, Camera};

mod frame;

const MAX_FRAME_SIZE: u32 = 512;

#[derive(Parser, Debug)]
#[command(version, about = "Render an ASCII preview of the water shading model", long_about = None)]
struct Args {
    #[arg(long, default_value_t = 96)]
    width: u32,

    #[arg(long, default_value_t = 32)]
    height: u32,

    /// Elapsed seconds driving the wave animation
    #[arg(short, long, default_value_t = 0.0)]
    time: f32,

    /// Seconds into the day (43200 is noon)
    #[arg(long, default_value_t = 36000.0)]
    time_of_day: f32,

    #[arg(long, default_value_t = 6.0)]
    camera_height: f32,

    /// Height of the water plane
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    water_level: f32,

    #[arg(long, default_value_t = 128)]
    texture_size: usize,

    /// Seed for the generated wave and noise textures
    #[arg(short, long)]
    seed: Option<u32>,

    /// Overrides the fluid mode of the config
    #[arg(short, long)]
    mode: Option<FluidMode>,

    /// Overrides the cloud mode of the config
    #[arg(long)]
    clouds: Option<CloudMode>,

    #[arg(short, long, default_value = CONFIG_FILE_NAME)]
    config: PathBuf,

    /// Writes the effective config to this path and exits
    #[arg(long)]
    dump_config: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.width < 1
        || args.width > MAX_FRAME_SIZE
        || args.height < 1
        || args.height > MAX_FRAME_SIZE
    {
        eprintln!("Error: width and height must be between 1 and {MAX_FRAME_SIZE} (inclusive).");
        eprintln!("Got: {}x{}", args.width, args.height);
        std::process::exit(1);
    }

    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), ShadingError> {
    let mut config = load_shading_config(&args.config)?;
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if let Some(clouds) = args.clouds {
        config.cloud_mode = clouds;
    }

    if let Some(path) = &args.dump_config {
        return save_shading_config(&config, path);
    }

    let seed = args.seed.unwrap_or_else(rand::random::<u32>);
    let field = WaveField::new(
        TileableTexture::from_perlin(args.texture_size, seed, 8.0)?,
        TileableTexture::from_perlin(args.texture_size, seed.wrapping_add(100), 16.0)?,
    );
    let shader = WaterSurfaceShader::new(config, field);

    let locals = FluidLocals {
        model_offset: Vec3::new(0.0, 0.0, args.water_level),
    };
    let eye = args.water_level + args.camera_height;
    let camera = Camera {
        pos: Vec3::new(0.0, 0.0, eye),
        target: Vec3::new(0.0, args.camera_height * 4.0, eye - args.camera_height * 0.5),
        fov_y: 1.1,
    };
    let env = EnvironmentUniforms {
        cam_pos: camera.pos,
        focus_pos: Vec3::new(0.0, args.camera_height * 2.0, args.water_level),
        time_of_day: args.time_of_day,
        tick: args.time,
        screen_res: UVec2::new(args.width, args.height),
        gamma: 2.2,
        ..Default::default()
    };

    info!(
        "Rendering {}x{} preview (mode {}, clouds {}, seed {seed}, t = {:.2}s)",
        args.width,
        args.height,
        shader.config().mode,
        shader.config().cloud_mode,
        args.time
    );
    let frame = render_frame(
        &shader,
        &env,
        &SunLighting::default(),
        &DaylightSky::default(),
        &camera,
        &locals,
    );

    print!("{}", frame.to_ascii());

    let stats = frame.stats();
    info!(
        "{} water pixels, mean alpha {:.3}, mean luminance {:.3}",
        stats.water_pixels, stats.mean_alpha, stats.mean_luminance
    );
    if stats.water_pixels > 0 {
        info!(
            "Wave height range [{:.3}, {:.3}] (bound {:.3})",
            stats.min_height,
            stats.max_height,
            shader.config().wave.max_height()
        );
    }
    Ok(())
}
