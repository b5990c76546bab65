use clap::{Parser, Subcommand};
use log::{info, warn};
use std::path::PathBuf;

use photo_privacy_core::config::LogLevel;
use photo_privacy_core::intake::PhotoUpload;
use photo_privacy_core::vision::{StaticVisionProvider, VisionProvider};
use photo_privacy_core::{logging, Config, Locale, PhotoPrivacy};

#[derive(Parser)]
#[command(name = "photo-privacy")]
#[command(about = "Check photos for privacy-sensitive metadata and strip it")]
#[command(version)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Write rotating log files to this directory instead of stderr
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a photo and print the report as JSON
    Analyze {
        /// Photo to analyze (exactly one)
        files: Vec<PathBuf>,

        /// Saved vision response to classify against, instead of calling the service
        #[arg(long, conflicts_with = "live")]
        vision_response: Option<PathBuf>,

        /// Call the configured vision service
        #[arg(long)]
        live: bool,

        /// Write report descriptions in Chinese
        #[arg(long)]
        chinese: bool,
    },

    /// Write a copy of the photo with all metadata removed
    Strip {
        /// Photo to sanitize (exactly one)
        files: Vec<PathBuf>,

        /// Output directory for the sanitized copy
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },

    /// Generate default configuration file
    GenerateConfig {
        /// Path to save configuration file
        #[arg(default_value = "photo-privacy.json")]
        path: PathBuf,
    },
}

fn read_uploads(files: &[PathBuf]) -> Result<Vec<PhotoUpload>, anyhow::Error> {
    let uploads = files
        .iter()
        .map(PhotoUpload::from_path)
        .collect::<photo_privacy_core::Result<Vec<_>>>()?;
    Ok(uploads)
}

fn main() -> Result<(), anyhow::Error> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Set up configuration
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else {
        Config::default()
    };

    if cli.verbose > 0 {
        config.log_level = match cli.verbose {
            1 => LogLevel::Debug,
            _ => LogLevel::Trace,
        };
    }

    // Initialize logger
    match &cli.log_dir {
        Some(dir) => logging::init_logger(&dir.to_string_lossy(), config.log_level.into())?,
        None => env_logger::Builder::from_default_env()
            .filter_level(config.log_level.into())
            .init(),
    }

    match cli.command {
        Commands::Analyze {
            files,
            vision_response,
            live,
            chinese,
        } => {
            if chinese {
                config.locale = Locale::Chinese;
            }
            config.validate()?;

            let privacy = PhotoPrivacy::new(config);
            let uploads = read_uploads(&files)?;

            let provider: Option<Box<dyn VisionProvider>> = if let Some(path) = vision_response {
                let json = std::fs::read_to_string(&path)?;
                Some(Box::new(StaticVisionProvider::from_json(&json)?))
            } else if live {
                match privacy.vision_provider() {
                    Ok(provider) => Some(Box::new(provider)),
                    Err(e) => {
                        warn!("Vision service unavailable: {}", e);
                        None
                    }
                }
            } else {
                None
            };

            info!("Analyzing {} file(s)", uploads.len());
            let analysis = privacy.analyze_request(uploads, provider.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&analysis)?);
            Ok(())
        }

        Commands::Strip { files, out } => {
            config.validate()?;

            let privacy = PhotoPrivacy::new(config);
            let stripped = privacy.strip_request(read_uploads(&files)?)?;

            std::fs::create_dir_all(&out)?;
            let target = out.join(&stripped.file_name);
            std::fs::write(&target, &stripped.bytes)?;
            println!("Sanitized copy written to: {}", target.display());
            Ok(())
        }

        Commands::GenerateConfig { path } => {
            let config = Config::default();
            config.save_to_file(&path)?;
            println!("Configuration file generated at: {}", path.display());
            Ok(())
        }
    }
}
