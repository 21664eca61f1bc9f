use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use eyefit::measure::FaceMeasurements;
use eyefit::{config, input, FaceShape, RecommendationContext};
use log::{info, warn};

#[derive(Parser)]
#[command(name = "eyefit")]
#[command(
    version,
    about = "Face shape analysis and eyewear frame recommendations from face-mesh landmarks"
)]
struct Cli {
    /// Config file (defaults to the system config path)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log per-stage details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Measure, classify and recommend frames from a landmark file
    Analyze {
        /// JSON landmark set from the face-mesh detector
        #[arg(short, long)]
        landmarks: PathBuf,
        /// JSON patient form with prescription, age and gender
        #[arg(short, long)]
        patient: Option<PathBuf>,
        /// Capture payload passed through to the result
        #[arg(long, default_value = "")]
        image: String,
        /// Capture width in pixels
        #[arg(long)]
        image_width: Option<u32>,
        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Rank frame styles for a known face shape
    Recommend {
        /// Oval, Round, Square, Heart, Diamond, Oblong or Triangle
        #[arg(short, long)]
        shape: FaceShape,
        /// Nose bridge width in millimeters
        #[arg(short, long)]
        bridge_mm: u32,
        /// JSON patient form with prescription, age and gender
        #[arg(short, long)]
        patient: Option<PathBuf>,
    },
    /// Print the frame size for a cheekbone width in millimeters
    FrameSize { cheekbone_mm: u32 },
    /// Open config file in editor
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .format_target(false)
        .format_timestamp(None)
        .init();

    let cfg = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze {
            landmarks,
            patient,
            image,
            image_width,
            output,
        } => analyze(&cfg, &landmarks, patient.as_deref(), image, image_width, output),
        Commands::Recommend {
            shape,
            bridge_mm,
            patient,
        } => recommend(&cfg, shape, bridge_mm, patient.as_deref()),
        Commands::FrameSize { cheekbone_mm } => {
            println!("{}", eyefit::calculate_frame_size(cheekbone_mm));
            Ok(())
        }
        Commands::Config => open_config(cli.config),
    }
}

fn analyze(
    cfg: &config::Config,
    landmarks: &std::path::Path,
    patient: Option<&std::path::Path>,
    image: String,
    image_width: Option<u32>,
    output: Option<PathBuf>,
) -> Result<()> {
    let points = input::load_landmarks(landmarks)?;
    info!("Loaded {} landmarks from {}", points.len(), landmarks.display());

    let width = image_width.unwrap_or(cfg.image_width);
    let mut result = eyefit::process_face_detection(&points, width, image)
        .context("Landmark set is not a complete face mesh")?;

    for warning in &result.pose_warnings {
        warn!("{}", warning);
    }
    if result.pose_quality < cfg.min_pose_quality {
        warn!(
            "Pose quality {} is below {}; consider retaking the capture",
            result.pose_quality, cfg.min_pose_quality
        );
    }

    if let Some(path) = patient {
        let form = input::load_patient(path)?;
        form.apply_to(&mut result);
        info!("Applied patient form from {}", path.display());
    }

    match output {
        Some(path) => {
            input::save_json(&path, &result, cfg.pretty_output)?;
            info!("✓ Result written to {}", path.display());
        }
        None => println!("{}", input::to_json(&result, cfg.pretty_output)?),
    }
    Ok(())
}

fn recommend(
    cfg: &config::Config,
    shape: FaceShape,
    bridge_mm: u32,
    patient: Option<&std::path::Path>,
) -> Result<()> {
    let form = match patient {
        Some(path) => input::load_patient(path)?,
        None => input::PatientForm::default(),
    };

    let measurements = FaceMeasurements {
        nose_bridge_width_mm: bridge_mm,
        ..Default::default()
    };
    let recommendations = eyefit::enhanced_recommendations(&RecommendationContext {
        face_shape: shape,
        measurements: &measurements,
        prescription: form.prescription.as_ref(),
        age: form.age,
        gender: form.gender.as_deref(),
    });

    println!("{}", input::to_json(&recommendations, cfg.pretty_output)?);
    Ok(())
}

fn open_config(path: Option<PathBuf>) -> Result<()> {
    let config_path = path.unwrap_or_else(|| config::CONFIG_PATH.to_path_buf());
    let editor = env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());

    info!("Opening config file: {:?}", config_path);

    let status = std::process::Command::new(editor)
        .arg(&config_path)
        .status()
        .context("Failed to open editor")?;

    if !status.success() {
        anyhow::bail!("Editor exited with non-zero status");
    }

    Ok(())
}
