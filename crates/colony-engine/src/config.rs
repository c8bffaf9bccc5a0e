//! Engine tunables.

use serde::{Deserialize, Serialize};

/// Tunables of the simulation. Every field has a default, so a partial
/// YAML or JSON document is enough.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Canonical tick interval in milliseconds. Each tick credits one second
    /// of production whatever this is set to, so a shorter interval speeds
    /// the game up and a longer one slows it down.
    pub tick_ms: u64,
    /// Build slots before any space upgrade or prestige bonus.
    pub base_space: u32,
    /// Energy a colony restarts with after a prestige.
    pub restart_energy: f64,
    /// Lifetime-earned thresholds that count as milestones, ascending.
    pub milestone_thresholds: Vec<f64>,
    /// Upper bound on purchases made by one `buy_max` call.
    pub buy_max_limit: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_ms: 1000,
            base_space: 10,
            restart_energy: 10.0,
            milestone_thresholds: vec![1e2, 1e3, 1e4, 1e5, 1e6],
            buy_max_limit: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let cfg: EngineConfig = serde_yaml::from_str("tick_ms: 250\nbase_space: 12\n").unwrap();
        assert_eq!(cfg.tick_ms, 250);
        assert_eq!(cfg.base_space, 12);
        assert_eq!(cfg.restart_energy, 10.0);
        assert_eq!(cfg.milestone_thresholds.len(), 5);
    }
}
