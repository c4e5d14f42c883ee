use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use simplelog::{Config, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::{Path, PathBuf};
use wrap_snake::game::{GameConfig, GameEngine};
use wrap_snake::modes::HumanMode;
use wrap_snake::persistence::HighScoreStore;
use wrap_snake::session::Session;

#[derive(Parser)]
#[command(name = "wrap_snake")]
#[command(version, about = "Snake on a wrapping grid with obstacles")]
struct Cli {
    /// JSON file with game settings; the flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Number of obstacles per game
    #[arg(long)]
    obstacles: Option<usize>,

    /// Initial tick interval in milliseconds
    #[arg(long)]
    speed: Option<u64>,

    /// Where the high score is kept
    #[arg(long, default_value = ".snake_high_score.json")]
    high_score_file: PathBuf,

    /// Keep the high score in memory only
    #[arg(long)]
    no_save: bool,

    /// Seed for food and obstacle placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl Cli {
    /// Defaults, then the JSON file, then individual flags
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(obstacles) = self.obstacles {
            config.obstacle_count = obstacles;
        }
        if let Some(speed) = self.speed {
            config.initial_speed_ms = speed;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }

    fn high_score_store(&self) -> HighScoreStore {
        if self.no_save {
            HighScoreStore::in_memory()
        } else {
            HighScoreStore::load_or_default(&self.high_score_file)
        }
    }
}

fn init_logging(path: &Path, level: LevelFilter) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create log file {:?}", path))?;
    WriteLogger::init(level, Config::default(), file).context("Failed to initialize logger")?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The terminal belongs to the TUI, so logs only ever go to a file
    if let Some(path) = &cli.log_file {
        init_logging(path, cli.log_level.into())?;
    }

    let config = cli.game_config()?;
    let high_score = cli.high_score_store();
    log::info!("starting with high score {}", high_score.best());

    let engine = match cli.seed {
        Some(seed) => GameEngine::seeded(config, seed),
        None => GameEngine::new(config),
    };

    let mut human_mode = HumanMode::new(Session::with_engine(engine, high_score));
    human_mode.run().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from(["wrap_snake", "--width", "30", "--obstacles", "2"]);
        let config = cli.game_config().unwrap();
        assert_eq!(config.grid_width, 30);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.obstacle_count, 2);
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"obstacle_count": 9, "initial_speed_ms": 200}}"#).unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let cli = Cli::parse_from(["wrap_snake", "--config", &path, "--speed", "150"]);
        let config = cli.game_config().unwrap();
        assert_eq!(config.obstacle_count, 9);
        assert_eq!(config.initial_speed_ms, 150);
    }

    #[test]
    fn test_invalid_flags_rejected() {
        let cli = Cli::parse_from(["wrap_snake", "--speed", "10"]);
        assert!(cli.game_config().is_err());
    }

    #[test]
    fn test_no_save_uses_memory_store() {
        let cli = Cli::parse_from(["wrap_snake", "--no-save"]);
        assert!(cli.high_score_store().path().is_none());
    }
}
