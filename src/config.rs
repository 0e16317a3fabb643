//! Runtime configuration from environment variables.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::TICK_MS;

pub const SETTINGS_FILE_NAME: &str = ".blockdrop.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Randomizer seed.
    pub seed: u32,
    /// Frame clock period fed to the engine.
    pub tick_ms: u32,
    /// High score and mute flag are persisted here.
    pub settings_path: PathBuf,
    /// Mute cues for this session regardless of the saved flag.
    pub force_muted: bool,
    /// Append every published event as a JSON line.
    pub event_log_path: Option<PathBuf>,
}

impl GameConfig {
    /// Read `BLOCKDROP_*` variables. Values that fail to parse fall back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seed = lookup("BLOCKDROP_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(time_seed);

        let tick_ms = lookup("BLOCKDROP_TICK_MS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&ms: &u32| ms > 0)
            .unwrap_or(TICK_MS);

        let settings_path = non_empty(lookup("BLOCKDROP_SETTINGS_PATH"))
            .map(PathBuf::from)
            .unwrap_or_else(|| default_settings_path(lookup("HOME")));

        let force_muted = lookup("BLOCKDROP_MUTED")
            .map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let event_log_path = non_empty(lookup("BLOCKDROP_EVENT_LOG")).map(PathBuf::from);

        Self {
            seed,
            tick_ms,
            settings_path,
            force_muted,
            event_log_path,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn default_settings_path(home: Option<String>) -> PathBuf {
    match non_empty(home) {
        Some(home) => PathBuf::from(home).join(SETTINGS_FILE_NAME),
        None => PathBuf::from(SETTINGS_FILE_NAME),
    }
}

fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}
