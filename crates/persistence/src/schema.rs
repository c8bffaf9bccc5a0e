//! The persisted save record. Field names follow the browser save format
//! (camelCase) so old saves keep loading; every field defaults when absent.

use colony_core::{AchievementId, PrestigeUpgradeId, ResearchId, ResourceId, UpgradeId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Current save format version.
pub const SAVE_VERSION: u32 = 1;

/// Build space of a fresh colony.
pub const DEFAULT_MAX_SPACE: u32 = 10;

/// Milliseconds since the Unix epoch, the timestamp unit of saves.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Stored state of one resource.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResourceState {
    /// Current stock.
    pub amount: f64,
    /// Earned this cycle, never decreasing within it.
    pub total_earned: f64,
    /// Visible and usable.
    pub unlocked: bool,
}

/// Level of one prestige upgrade.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrestigeLevel {
    pub id: PrestigeUpgradeId,
    #[serde(default)]
    pub level: u32,
}

/// Unlock record of one achievement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementState {
    pub id: AchievementId,
    #[serde(default)]
    pub unlocked: bool,
    /// Epoch milliseconds of the unlock.
    #[serde(default)]
    pub unlocked_at: Option<i64>,
    /// Last evaluated progress value.
    #[serde(default)]
    pub progress: f64,
}

/// One completed prestige.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrestigeRecord {
    /// Epoch milliseconds.
    pub date: i64,
    pub points_gained: f64,
}

/// Lifetime aggregates; these survive prestige resets.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Statistics {
    pub total_resources_earned: BTreeMap<ResourceId, f64>,
    /// Highest per-second rate ever observed.
    pub peak_production: BTreeMap<ResourceId, f64>,
    pub total_upgrades_bought: u64,
    pub total_upgrades_sold: u64,
    pub total_research_completed: u64,
    pub prestige_history: Vec<PrestigeRecord>,
}

/// Everything needed to rebuild a game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersistedState {
    /// Format version, see [`SAVE_VERSION`].
    pub version: u32,
    pub resources: BTreeMap<ResourceId, ResourceState>,
    /// Owned count per building/upgrade.
    pub upgrades: BTreeMap<UpgradeId, u32>,
    pub completed_research: BTreeSet<ResearchId>,
    /// Upgrades unlocked this cycle that did not start unlocked.
    pub unlocked_upgrades: BTreeSet<UpgradeId>,
    /// Research unlocked this cycle that did not start unlocked.
    pub unlocked_research: BTreeSet<ResearchId>,
    pub prestige_upgrades: Vec<PrestigeLevel>,
    pub achievements: Vec<AchievementState>,
    pub max_space: u32,
    pub total_clicks: u64,
    pub prestige_count: u32,
    pub total_prestige_points: f64,
    /// Prestige-point multiplier earned from achievements, starts at 1.
    pub achievement_prestige_bonus: f64,
    /// Epoch milliseconds of the first session.
    pub start_time: i64,
    /// Epoch milliseconds of the last save.
    pub last_online: i64,
    /// Milestone keys such as `energy_1000` crossed this cycle.
    pub reached_milestones: BTreeSet<String>,
    pub statistics: Statistics,
}

impl Default for PersistedState {
    fn default() -> Self {
        let now = now_ms();
        Self {
            version: SAVE_VERSION,
            resources: BTreeMap::new(),
            upgrades: BTreeMap::new(),
            completed_research: BTreeSet::new(),
            unlocked_upgrades: BTreeSet::new(),
            unlocked_research: BTreeSet::new(),
            prestige_upgrades: Vec::new(),
            achievements: Vec::new(),
            max_space: DEFAULT_MAX_SPACE,
            total_clicks: 0,
            prestige_count: 0,
            total_prestige_points: 0.0,
            achievement_prestige_bonus: 1.0,
            start_time: now,
            last_online: now,
            reached_milestones: BTreeSet::new(),
            statistics: Statistics::default(),
        }
    }
}

impl PersistedState {
    /// Stored level of a prestige upgrade (0 if absent).
    pub fn prestige_level(&self, id: &str) -> u32 {
        self.prestige_upgrades
            .iter()
            .find(|p| p.id.as_str() == id)
            .map_or(0, |p| p.level)
    }

    /// Stored amount of a resource (0 if absent).
    pub fn resource_amount(&self, id: &str) -> f64 {
        self.resources.get(id).map_or(0.0, |r| r.amount)
    }
}
