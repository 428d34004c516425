//! Command-line configuration

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::audio::DEFAULT_VOLUME;
use crate::model::PlayerSettings;

/// Command-line arguments for tuneline
#[derive(Parser, Debug)]
#[command(name = "tuneline")]
#[command(about = "Terminal music player with a mock library")]
#[command(version)]
pub struct Config {
    /// JSON library file; the built-in catalog is used when omitted
    #[arg(short, long, env = "TUNELINE_LIBRARY")]
    pub library: Option<PathBuf>,

    /// Initial volume between 0.0 and 1.0
    #[arg(long, default_value_t = DEFAULT_VOLUME, env = "TUNELINE_VOLUME")]
    pub volume: f32,

    /// Start with shuffle enabled
    #[arg(long)]
    pub shuffle: bool,

    /// Start with repeat enabled
    #[arg(long)]
    pub repeat: bool,

    /// Progress update interval of the output, in milliseconds
    #[arg(long, default_value_t = 250)]
    pub tick_ms: u64,

    /// How long notifications stay on screen, in seconds
    #[arg(long, default_value_t = 5)]
    pub notification_ttl_secs: u64,

    /// Directory for rolling log files
    #[arg(long, default_value = ".logs", env = "TUNELINE_LOG_DIR")]
    pub log_dir: PathBuf,
}

impl Config {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(10))
    }

    pub fn player_settings(&self) -> PlayerSettings {
        PlayerSettings {
            volume: self.volume,
            shuffle: self.shuffle,
            repeat: self.repeat,
            notification_ttl: Duration::from_secs(self.notification_ttl_secs),
        }
    }
}
