//! Content-table schema: immutable templates for resources, buildings,
//! research, prestige upgrades and achievements.

use crate::ids::{AchievementId, PrestigeUpgradeId, ResearchId, ResourceId, UpgradeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Resource amounts keyed by resource, used for costs, refunds and rates.
pub type Cost = BTreeMap<ResourceId, f64>;

/// Default geometric growth factor for building costs.
pub const DEFAULT_COST_SCALING: f64 = 1.15;

/// Threshold that unlocks a resource, building or research project.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Requirement {
    /// Current stock of a resource reaches `amount`.
    Resource { resource: ResourceId, amount: f64 },
    /// Owned count of another upgrade reaches `count`.
    Upgrade { upgrade: UpgradeId, count: u32 },
    /// A research project has been completed.
    Research { research: ResearchId },
}

/// Grouping of resources for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceCategory {
    /// Early raw materials.
    Basic,
    /// Mid-game resources.
    Advanced,
    /// Meta currencies.
    Special,
}

/// Template for one accumulable quantity.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResourceDef {
    /// Unique key.
    pub id: ResourceId,
    /// Display name.
    pub name: String,
    /// Display glyph.
    pub icon: String,
    /// Short description.
    pub description: String,
    /// Stock at the start of a fresh game.
    pub start_amount: f64,
    /// Whether the resource is available from the start.
    pub unlocked: bool,
    /// Condition that unlocks it later, if any.
    pub unlock: Option<Requirement>,
    /// Display grouping.
    pub category: ResourceCategory,
    /// Base yield of a manual click (0 for non-clickable resources).
    pub click_value: f64,
    /// Survives a prestige reset.
    pub persistent: bool,
}

/// Discriminator of an upgrade definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeKind {
    /// Building that produces resources.
    Generator,
    /// Multiplies the output of one building type.
    Efficiency,
    /// Adds to the energy click yield.
    Click,
    /// Raises the build-space budget.
    Space,
    /// Pure gate for other content.
    Unlock,
}

/// Type-specific payload of an upgrade, one variant per [`UpgradeKind`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UpgradeEffect {
    /// Production is declared in [`UpgradeDef::produces`].
    Generator,
    /// Multiplies the production of every unit of `target`.
    Efficiency { target: UpgradeId, multiplier: f64 },
    /// Adds `bonus` to the energy click value.
    Click { bonus: f64 },
    /// Adds `increase` build slots.
    Space { increase: u32 },
    /// No direct effect.
    Unlock,
}

impl UpgradeEffect {
    /// The discriminator of this payload.
    pub fn kind(&self) -> UpgradeKind {
        match self {
            UpgradeEffect::Generator => UpgradeKind::Generator,
            UpgradeEffect::Efficiency { .. } => UpgradeKind::Efficiency,
            UpgradeEffect::Click { .. } => UpgradeKind::Click,
            UpgradeEffect::Space { .. } => UpgradeKind::Space,
            UpgradeEffect::Unlock => UpgradeKind::Unlock,
        }
    }
}

/// Template for a purchasable building or upgrade.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpgradeDef {
    /// Unique key.
    pub id: UpgradeId,
    /// Display name.
    pub name: String,
    /// Display glyph.
    pub icon: String,
    /// Short description.
    pub description: String,
    /// Build-space footprint per unit (0 for non-buildings).
    pub size: u32,
    /// Maximum owned count; `None` is unbounded.
    pub max_count: Option<u32>,
    /// Cost of the first unit.
    pub base_cost: Cost,
    /// Geometric cost growth per owned unit (>= 1).
    pub cost_scaling: f64,
    /// Base production per owned unit per second.
    pub produces: BTreeMap<ResourceId, f64>,
    /// Declared upkeep per owned unit per second.
    pub consumes: BTreeMap<ResourceId, f64>,
    /// Type-specific payload.
    pub effect: UpgradeEffect,
    /// Whether the upgrade is available from the start.
    pub unlocked: bool,
    /// Condition that unlocks it later, if any.
    pub requires: Option<Requirement>,
}

impl UpgradeDef {
    /// The `type` discriminator.
    pub fn kind(&self) -> UpgradeKind {
        self.effect.kind()
    }

    /// Whether `count` units already reach the cap.
    pub fn at_cap(&self, count: u32) -> bool {
        self.max_count.is_some_and(|max| count >= max)
    }
}

/// What a completed research project changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResearchEffect {
    /// Multiplies every building's production.
    GlobalMultiplier { multiplier: f64 },
    /// Multiplies production of a single resource.
    ProductionMultiplier { resource: ResourceId, multiplier: f64 },
    /// Multiplies production of every listed resource.
    MultiResourceMultiplier { resources: Vec<ResourceId>, multiplier: f64 },
    /// Multiplies production of one building type.
    BuildingSpecific { target: UpgradeId, multiplier: f64 },
    /// Multiplies the energy click value.
    ClickMultiplier { multiplier: f64 },
}

/// Template for a one-off research project.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResearchDef {
    /// Unique key.
    pub id: ResearchId,
    /// Display name.
    pub name: String,
    /// Display glyph.
    pub icon: String,
    /// Short description.
    pub description: String,
    /// Tier 1, 2 or 3.
    pub tier: u8,
    /// One-off cost.
    pub cost: Cost,
    /// Effect once completed.
    pub effect: ResearchEffect,
    /// Whether the project is available from the start.
    pub unlocked: bool,
    /// Condition that unlocks it later, if any.
    pub requires: Option<Requirement>,
}

/// Grouping of prestige upgrades for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrestigeCategory {
    Production,
    Utility,
    Efficiency,
    Unlock,
    Prestige,
}

/// Per-level contribution of a prestige upgrade to the aggregate bonuses.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PrestigeEffect {
    /// Flat click yield added before the click multiplier.
    ClickPower { per_level: f64 },
    /// Fractional click multiplier.
    ClickMultiplier { per_level: f64 },
    /// Fractional boost to all production.
    GlobalProduction { per_level: f64 },
    /// Fractional boost to building production.
    BuildingProduction { per_level: f64 },
    /// Fractional boost to one resource's production.
    ResourceProduction { resource: ResourceId, per_level: f64 },
    /// Extra build slots that survive resets.
    PermanentSpace { per_level: u32 },
    /// Fractional boost to prestige points earned.
    PrestigeGain { per_level: f64 },
}

/// Template for a permanent prestige upgrade.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PrestigeUpgradeDef {
    /// Unique key.
    pub id: PrestigeUpgradeId,
    /// Display name.
    pub name: String,
    /// Display glyph.
    pub icon: String,
    /// Short description.
    pub description: String,
    /// Display grouping.
    pub category: PrestigeCategory,
    /// Maximum level; `None` is unbounded.
    pub max_level: Option<u32>,
    /// Prestige-point cost of level 1.
    pub base_cost: f64,
    /// Geometric cost growth per level (>= 1).
    pub cost_scaling: f64,
    /// Contribution per level.
    pub effect: PrestigeEffect,
}

/// Grouping of achievements for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementCategory {
    Collector,
    Clicker,
    Building,
    Research,
    Special,
    Prestige,
}

/// Completion predicate of an achievement, evaluated against the engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AchievementCondition {
    /// Lifetime (this cycle) earnings of a resource reach `amount`.
    ResourceEarned { resource: ResourceId, amount: f64 },
    /// Current stock of a resource reaches `amount`.
    ResourceAmount { resource: ResourceId, amount: f64 },
    /// Current stock lies in `[min, max)`.
    ResourceAmountWithin { resource: ResourceId, min: f64, max: f64 },
    /// Owned generator units reach `count`.
    TotalBuildings { count: u32 },
    /// Owned units of one upgrade reach `count`.
    UpgradeCount { upgrade: UpgradeId, count: u32 },
    /// Completed research projects reach `count`.
    ResearchCompleted { count: u32 },
    /// Every research project of `tier` is completed.
    ResearchTierComplete { tier: u8 },
    /// Manual clicks reach `count`.
    TotalClicks { count: u64 },
    /// Used build space reaches the budget.
    SpaceFull,
    /// Local wall-clock hour lies in `[start, end)`.
    LocalHourWithin { start: u32, end: u32 },
    /// Prestige resets reach `count`.
    PrestigeCount { count: u32 },
    /// Lifetime prestige points reach `amount`.
    TotalPrestigePoints { amount: f64 },
}

/// One-time reward granted when an achievement unlocks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AchievementReward {
    /// Adds to the achievement prestige-point multiplier.
    PrestigeBonus { amount: f64 },
    /// Credits resources.
    ResourceGrant { resource: ResourceId, amount: f64 },
}

/// Template for an achievement.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AchievementDef {
    /// Unique key.
    pub id: AchievementId,
    /// Display name.
    pub name: String,
    /// Display glyph.
    pub icon: String,
    /// Short description.
    pub description: String,
    /// Display grouping.
    pub category: AchievementCategory,
    /// Hidden until unlocked.
    pub hidden: bool,
    /// Completion predicate.
    pub condition: AchievementCondition,
    /// Optional one-time reward.
    pub reward: Option<AchievementReward>,
}
