use log::{error, info, warn, LevelFilter};
use std::path::{Path, PathBuf};

use log4rs::append::rolling_file::policy::compound::roll::fixed_window::FixedWindowRoller;
use log4rs::append::rolling_file::policy::compound::trigger::size::SizeTrigger;
use log4rs::append::rolling_file::policy::compound::CompoundPolicy;
use log4rs::append::rolling_file::RollingFileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

/// Environment variable overriding the file log level
pub const LOG_LEVEL_ENV: &str = "PHOTO_PRIVACY_LOG";

const LOG_FILE_STEM: &str = "photo-privacy";
const ROTATE_AT_BYTES: u64 = 10 * 1024 * 1024;
const KEPT_ARCHIVES: u32 = 5;
const LINE_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} [{l}] [{M}:{L}] - {m}{n}";

/// Active log file and the pattern its rotated archives are named by
fn log_file_paths(log_dir: &Path) -> (PathBuf, String) {
    let active = log_dir.join(format!("{}.log", LOG_FILE_STEM));
    let archives = log_dir.join(format!("{}.{{}}.log", LOG_FILE_STEM));
    (active, archives.to_string_lossy().into_owned())
}

/// Level named by `PHOTO_PRIVACY_LOG`, if it parses
fn level_override(value: Option<&str>) -> Option<LevelFilter> {
    value.and_then(|v| v.trim().parse().ok())
}

fn rolling_appender(log_dir: &Path) -> anyhow::Result<(RollingFileAppender, PathBuf)> {
    let (active, archives) = log_file_paths(log_dir);

    let roller = FixedWindowRoller::builder()
        .build(&archives, KEPT_ARCHIVES)
        .map_err(|e| anyhow::anyhow!("Cannot set up archives {}: {}", archives, e))?;
    let policy = CompoundPolicy::new(
        Box::new(SizeTrigger::new(ROTATE_AT_BYTES)),
        Box::new(roller),
    );

    let appender = RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LINE_PATTERN)))
        .build(&active, Box::new(policy))
        .map_err(|e| anyhow::anyhow!("Cannot open {}: {}", active.display(), e))?;
    Ok((appender, active))
}

/// Route all log output to a size-rotated file under `log_dir`
pub fn init_logger(log_dir: &str, level: LevelFilter) -> anyhow::Result<()> {
    let dir = Path::new(log_dir);
    std::fs::create_dir_all(dir)?;

    let (appender, active) = rolling_appender(dir)?;
    let config = Config::builder()
        .appender(Appender::builder().build("file", Box::new(appender)))
        .build(Root::builder().appender("file").build(level))
        .map_err(|e| anyhow::anyhow!("Invalid log configuration: {}", e))?;
    log4rs::init_config(config)?;

    if let Some(level) = level_override(std::env::var(LOG_LEVEL_ENV).ok().as_deref()) {
        log::set_max_level(level);
    }

    info!("Writing photo-privacy log to {}", active.display());
    Ok(())
}

/// Log a recovered metadata parse failure
pub fn log_metadata_error(file_name: &str, error: &dyn std::error::Error) {
    warn!(
        "Metadata extraction failed - File: {}, Error: {}",
        file_name, error
    );
}

/// Log a recovered vision collaborator failure
pub fn log_vision_error(file_name: &str, error: &dyn std::error::Error) {
    warn!(
        "Vision analysis unavailable - File: {}, Error: {}",
        file_name, error
    );
}

/// Log a strip attempt and its outcome
pub fn log_strip(file_name: &str, outcome: Result<&str, &dyn std::error::Error>) {
    match outcome {
        Ok(output) => info!("STRIP - Source: {}, Output: {}", file_name, output),
        Err(e) => error!("STRIP FAILED - Source: {}, Error: {}", file_name, e),
    }
}
