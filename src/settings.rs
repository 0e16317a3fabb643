//! Persisted player settings (high score, mute flag) as a small JSON file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub high_score: u32,
    pub muted: bool,
}

impl Settings {
    /// Load from `path`. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("read settings {}", path.display()))
            }
        };
        serde_json::from_str(&text).with_context(|| format!("parse settings {}", path.display()))
    }

    /// Like [`load`](Self::load), but an unreadable file only warns.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("[blockdrop] ignoring settings: {:#}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("encode settings")?;
        fs::write(path, json).with_context(|| format!("write settings {}", path.display()))
    }

    /// Raise the high score if `score` beats it. Returns true on a new record.
    pub fn record_score(&mut self, score: u32) -> bool {
        if score > self.high_score {
            self.high_score = score;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("blockdrop-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_missing_file_is_default() {
        let path = temp_path("missing");
        let _ = fs::remove_file(&path);
        assert_eq!(Settings::load(&path).unwrap(), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("roundtrip");
        let settings = Settings {
            high_score: 12_400,
            muted: true,
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_falls_back() {
        let path = temp_path("corrupt");
        fs::write(&path, "{ high_score: ").unwrap();
        assert!(Settings::load(&path).is_err());
        assert_eq!(Settings::load_or_default(&path), Settings::default());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let parsed: Settings = serde_json::from_str(r#"{"high_score": 900}"#).unwrap();
        assert_eq!(
            parsed,
            Settings {
                high_score: 900,
                muted: false
            }
        );
    }

    #[test]
    fn test_record_score() {
        let mut settings = Settings::default();
        assert!(settings.record_score(300));
        assert!(!settings.record_score(300));
        assert!(!settings.record_score(100));
        assert_eq!(settings.high_score, 300);
    }
}
