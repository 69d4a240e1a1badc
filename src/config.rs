use anyhow::Result;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::lang::{SourceLang, TargetLang};

static EXE_DIR: Lazy<PathBuf> = Lazy::new(|| {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|d| d.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
});

/// Directory holding config.json, log.txt and the position file.
pub fn exe_dir() -> &'static Path {
    &EXE_DIR
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub debounce_ms: u64,
    pub endpoint: String,
    pub request_timeout_secs: u64,
    pub source_lang: SourceLang,
    pub target_lang: TargetLang,
    pub window_width: f32,
    pub window_height: f32,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            endpoint: "https://translate.googleapis.com/translate_a/single".to_string(),
            request_timeout_secs: 15,
            source_lang: SourceLang::Auto,
            target_lang: TargetLang::Japanese,
            window_width: 1000.0,
            window_height: 500.0,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn path() -> PathBuf {
        exe_dir().join("config.json")
    }

    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(s) => serde_json::from_str::<Config>(&s).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let s = serde_json::to_string_pretty(self)?;
        fs::write(path, s)?;
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg: Config = serde_json::from_str(r#"{ "debounce_ms": 250, "target_lang": "en" }"#).unwrap();
        assert_eq!(cfg.debounce(), Duration::from_millis(250));
        assert_eq!(cfg.target_lang, TargetLang::English);
        assert_eq!(cfg.source_lang, SourceLang::Auto);
        assert_eq!(cfg.window_width, 1000.0);
    }

    #[test]
    fn missing_or_broken_file_uses_defaults() {
        let dir = std::env::temp_dir();
        let missing = dir.join(format!("autotrans-cfg-missing-{}.json", std::process::id()));
        assert_eq!(Config::load_from(&missing), Config::default());

        let broken = dir.join(format!("autotrans-cfg-broken-{}.json", std::process::id()));
        fs::write(&broken, "{ not json").unwrap();
        assert_eq!(Config::load_from(&broken), Config::default());
        let _ = fs::remove_file(&broken);
    }

    #[test]
    fn save_and_reload() {
        let path = std::env::temp_dir().join(format!("autotrans-cfg-save-{}.json", std::process::id()));
        let cfg = Config { debounce_ms: 800, source_lang: SourceLang::English, ..Config::default() };
        cfg.save(&path).unwrap();
        assert_eq!(Config::load_from(&path), cfg);
        let _ = fs::remove_file(&path);
    }
}
