//! Run configuration loaded from YAML.

use anyhow::{Context, Result};
use colony_engine::EngineConfig;
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Settings for one headless run. Missing keys fall back to defaults.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub engine: EngineConfig,
    /// Overrides `engine.tick_ms`. A tick is always one game second, so
    /// this sets game speed rather than precision.
    pub tick_ms: Option<u64>,
    /// Polling interval of the realtime loop.
    pub render_ms: u64,
    /// Where the save lives between runs.
    pub save_path: PathBuf,
    /// Ticks to simulate when `--ticks` is not given.
    pub ticks: u64,
    /// Let the greedy player act between ticks.
    pub autoplay: bool,
    pub clicks_per_tick: u32,
    /// Save every this many ticks; 0 saves only at the end.
    pub autosave_ticks: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            tick_ms: None,
            render_ms: 250,
            save_path: PathBuf::from("colony-save.json"),
            ticks: 600,
            autoplay: true,
            clicks_per_tick: 1,
            autosave_ticks: 60,
        }
    }
}

impl RunConfig {
    pub fn from_yaml(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).context("parsing run config")
    }

    /// Read `path`; a missing file yields the defaults.
    pub async fn load(path: &Path) -> Result<Self> {
        match tokio::fs::read_to_string(path).await {
            Ok(text) => Self::from_yaml(&text),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(path = %path.display(), "run config not found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
        }
    }

    pub fn tick_ms(&self) -> u64 {
        self.tick_ms.unwrap_or(self.engine.tick_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_engine_section() {
        let cfg = RunConfig::from_yaml(
            "ticks: 30\nengine:\n  tick_ms: 100\n  restart_energy: 25\nsave_path: /tmp/c.json\n",
        )
        .unwrap();
        assert_eq!(cfg.ticks, 30);
        assert_eq!(cfg.tick_ms(), 100);
        assert_eq!(cfg.engine.restart_energy, 25.0);
        assert_eq!(cfg.engine.base_space, 10);
        assert!(cfg.autoplay);
        assert_eq!(cfg.save_path, PathBuf::from("/tmp/c.json"));
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(RunConfig::from_yaml("ticks: lots\n").is_err());
    }

    #[test]
    fn top_level_tick_overrides_engine() {
        let cfg = RunConfig::from_yaml("tick_ms: 50\nengine:\n  tick_ms: 100\n").unwrap();
        assert_eq!(cfg.tick_ms(), 50);
        assert_eq!(cfg.render_ms, 250);
    }

    #[tokio::test]
    async fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.yaml");
        std::fs::write(&path, "clicks_per_tick: 3\n").unwrap();
        let cfg = RunConfig::load(&path).await.unwrap();
        assert_eq!(cfg.clicks_per_tick, 3);
        let fallback = RunConfig::load(&dir.path().join("missing.yaml")).await.unwrap();
        assert_eq!(fallback, RunConfig::default());
    }
}
