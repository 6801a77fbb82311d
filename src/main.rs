//! Bowling lane scene generator
//!
//! Builds the lane scene from configuration, validates it and optionally
//! writes it out as RON for a renderer.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;

use bowling_core::SceneValidator;
use bowling_lane::{AppConfig, LaneSceneBuilder};

#[derive(Parser, Debug)]
#[command(version, about = "Generate the bowling lane scene", long_about = None)]
struct Args {
    /// Directory holding default.toml and user.toml
    #[arg(long, default_value = "config")]
    config_dir: PathBuf,

    /// Write the scene to this RON file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the scene as RON to stdout
    #[arg(long)]
    print: bool,

    /// Only validate configuration and scene, write nothing
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration first so its log level applies; report failure once logging is up
    let loaded = AppConfig::load_from(&args.config_dir);
    let log_level = loaded
        .as_ref()
        .map(|c| c.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = loaded.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    let builder = LaneSceneBuilder::new(&config).context("Invalid lane configuration")?;
    log::info!(
        "Lane length {:.2}m, head pin at z={:.2}",
        builder.dimensions().total_length,
        builder.layout().head_pin().position.z
    );
    let scene = builder
        .add_floor()
        .add_skybox()
        .add_lights()
        .add_lane()
        .add_gutters()
        .add_pins()
        .add_ball()
        .add_recolor_action()
        .build();

    let errors = SceneValidator::validate(&scene);
    if !errors.is_empty() {
        for error in &errors {
            log::error!("Validation error: {}", error);
        }
        bail!("Scene '{}' failed validation with {} error(s)", scene.name, errors.len());
    }

    if args.validate_only {
        log::info!("Scene '{}' is valid", scene.name);
        return Ok(());
    }

    if let Some(path) = &args.output {
        scene
            .save(path)
            .with_context(|| format!("Failed to write scene to {}", path.display()))?;
        log::info!("Wrote scene to {}", path.display());
    }

    if args.print {
        println!("{}", scene.to_ron_string().context("Failed to serialize scene")?);
    }

    Ok(())
}
