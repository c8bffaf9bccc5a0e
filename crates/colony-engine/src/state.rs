//! Per-game working state, kept apart from the shared templates.

use crate::achievements::AchievementContext;
use crate::config::EngineConfig;
use chrono::Timelike;
use colony_core::{
    ContentTables, Cost, PrestigeUpgradeId, ResearchId, ResourceId, UnlockView, UpgradeId,
    UpgradeKind,
};
use colony_econ::PrestigeBonuses;
use persistence::Statistics;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Source of the local wall-clock time.
pub type Clock = fn() -> chrono::DateTime<chrono::Local>;

/// Live state of one resource.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResourceInstance {
    pub id: ResourceId,
    pub amount: f64,
    /// Earned this cycle; spending never lowers it.
    pub total_earned: f64,
    pub unlocked: bool,
    /// Derived by the production recalculation.
    pub per_second: f64,
    /// Derived click yield before prestige click bonuses.
    pub click_value: f64,
    pub base_click_value: f64,
}

/// Everything mutable about a colony except achievements.
#[derive(Clone, Debug)]
pub struct Colony {
    pub(crate) tables: Arc<ContentTables>,
    pub(crate) config: EngineConfig,
    pub(crate) clock: Clock,
    pub(crate) resources: BTreeMap<ResourceId, ResourceInstance>,
    pub(crate) counts: BTreeMap<UpgradeId, u32>,
    /// Unlocked at runtime; templates that start unlocked are not listed.
    pub(crate) unlocked_upgrades: BTreeSet<UpgradeId>,
    pub(crate) unlocked_research: BTreeSet<ResearchId>,
    pub(crate) completed_research: BTreeSet<ResearchId>,
    pub(crate) prestige_levels: BTreeMap<PrestigeUpgradeId, u32>,
    pub(crate) bonuses: PrestigeBonuses,
    pub(crate) used_space: u32,
    pub(crate) max_space: u32,
    pub(crate) total_clicks: u64,
    pub(crate) prestige_count: u32,
    pub(crate) total_prestige_points: f64,
    pub(crate) achievement_prestige_bonus: f64,
    pub(crate) start_time: i64,
    pub(crate) reached_milestones: BTreeSet<String>,
    pub(crate) statistics: Statistics,
    pub(crate) ticks: u64,
}

impl Colony {
    /// A fresh colony straight from the templates.
    pub(crate) fn fresh(tables: Arc<ContentTables>, config: EngineConfig, clock: Clock) -> Self {
        let resources = tables
            .resources()
            .iter()
            .map(|d| {
                (
                    d.id.clone(),
                    ResourceInstance {
                        id: d.id.clone(),
                        amount: d.start_amount,
                        total_earned: d.start_amount,
                        unlocked: d.unlocked,
                        per_second: 0.0,
                        click_value: d.click_value,
                        base_click_value: d.click_value,
                    },
                )
            })
            .collect();
        let max_space = config.base_space;
        let start_time = clock().timestamp_millis();
        Self {
            tables,
            config,
            clock,
            resources,
            counts: BTreeMap::new(),
            unlocked_upgrades: BTreeSet::new(),
            unlocked_research: BTreeSet::new(),
            completed_research: BTreeSet::new(),
            prestige_levels: BTreeMap::new(),
            bonuses: PrestigeBonuses::default(),
            used_space: 0,
            max_space,
            total_clicks: 0,
            prestige_count: 0,
            total_prestige_points: 0.0,
            achievement_prestige_bonus: 1.0,
            start_time,
            reached_milestones: BTreeSet::new(),
            statistics: Statistics::default(),
            ticks: 0,
        }
    }

    pub(crate) fn count(&self, id: &str) -> u32 {
        self.counts.get(id).copied().unwrap_or(0)
    }

    pub(crate) fn upgrade_unlocked(&self, id: &str) -> bool {
        self.tables
            .upgrade(id)
            .is_some_and(|d| d.unlocked || self.unlocked_upgrades.contains(id))
    }

    pub(crate) fn research_unlocked(&self, id: &str) -> bool {
        self.tables
            .research_project(id)
            .is_some_and(|d| d.unlocked || self.unlocked_research.contains(id))
    }

    /// Every listed resource exists and holds at least the required amount.
    pub(crate) fn can_afford(&self, costs: &Cost) -> bool {
        costs.iter().all(|(id, need)| {
            self.resources
                .get(id)
                .is_some_and(|r| r.amount >= *need)
        })
    }

    /// Deduct all of `costs` or nothing.
    pub(crate) fn spend(&mut self, costs: &Cost) -> bool {
        if !self.can_afford(costs) {
            return false;
        }
        for (id, need) in costs {
            if let Some(r) = self.resources.get_mut(id) {
                r.amount -= need;
            }
        }
        true
    }

    /// Credit `amount` to stock, cycle earnings and lifetime statistics.
    pub(crate) fn credit(&mut self, id: &ResourceId, amount: f64) -> bool {
        let Some(r) = self.resources.get_mut(id) else {
            return false;
        };
        r.amount += amount;
        r.total_earned += amount;
        *self
            .statistics
            .total_resources_earned
            .entry(id.clone())
            .or_insert(0.0) += amount;
        true
    }

    /// Owned generator units.
    pub(crate) fn generator_units(&self) -> u32 {
        self.tables
            .upgrades()
            .iter()
            .filter(|d| d.kind() == UpgradeKind::Generator)
            .map(|d| self.count(d.id.as_str()))
            .sum()
    }

    /// `sum(size * count)` over every definition.
    pub(crate) fn compute_used_space(&self) -> u32 {
        self.tables
            .upgrades()
            .iter()
            .map(|d| d.size.saturating_mul(self.count(d.id.as_str())))
            .fold(0u32, u32::saturating_add)
    }

    pub(crate) fn now(&self) -> chrono::DateTime<chrono::Local> {
        (self.clock)()
    }
}

impl UnlockView for Colony {
    fn resource_amount(&self, resource: &ResourceId) -> Option<f64> {
        self.resources.get(resource).map(|r| r.amount)
    }

    fn upgrade_count(&self, upgrade: &UpgradeId) -> u32 {
        self.count(upgrade.as_str())
    }

    fn research_completed(&self, research: &ResearchId) -> bool {
        self.completed_research.contains(research)
    }
}

impl AchievementContext for Colony {
    fn resource_totals(&self, id: &ResourceId) -> Option<(f64, f64)> {
        self.resources.get(id).map(|r| (r.amount, r.total_earned))
    }

    fn owned(&self, id: &UpgradeId) -> Option<u32> {
        self.tables.upgrade(id.as_str()).map(|_| self.count(id.as_str()))
    }

    fn total_buildings(&self) -> u32 {
        self.generator_units()
    }

    fn research_count(&self) -> u32 {
        u32::try_from(self.completed_research.len()).unwrap_or(u32::MAX)
    }

    fn tier_progress(&self, tier: u8) -> Option<(u32, u32)> {
        let (done, total) = self
            .tables
            .research_in_tier(tier)
            .fold((0u32, 0u32), |(done, total), d| {
                (done + u32::from(self.completed_research.contains(&d.id)), total + 1)
            });
        (total > 0).then_some((done, total))
    }

    fn total_clicks(&self) -> u64 {
        self.total_clicks
    }

    fn used_space(&self) -> u32 {
        self.used_space
    }

    fn max_space(&self) -> u32 {
        self.max_space
    }

    fn local_hour(&self) -> u32 {
        self.now().hour()
    }

    fn prestige_count(&self) -> u32 {
        self.prestige_count
    }

    fn total_prestige_points(&self) -> f64 {
        self.total_prestige_points
    }
}
