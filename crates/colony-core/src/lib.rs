#![deny(warnings)]

//! Core domain models for Space Colonies.
//!
//! This crate holds the immutable content tables (resources, buildings,
//! research, prestige upgrades, achievements), the pure cost and unlock
//! helpers over them, and validation of cross-table references.

pub mod ids;
pub mod model;
pub mod rules;
pub mod tables;
pub mod validate;

pub use ids::{AchievementId, PrestigeUpgradeId, ResearchId, ResourceId, UpgradeId};
pub use model::*;
pub use rules::{calculate_cost, check_unlock, demolish_refund, UnlockView};
pub use validate::{validate_tables, ValidationError};

/// The full set of templates a game is played with. Shared read-only between
/// engine instances; per-game state lives elsewhere.
#[derive(Clone, Debug)]
pub struct ContentTables {
    resources: Vec<ResourceDef>,
    upgrades: Vec<UpgradeDef>,
    research: Vec<ResearchDef>,
    prestige_upgrades: Vec<PrestigeUpgradeDef>,
    achievements: Vec<AchievementDef>,
}

impl ContentTables {
    /// The built-in Space Colonies content.
    pub fn standard() -> Self {
        Self {
            resources: tables::resources::definitions(),
            upgrades: tables::upgrades::definitions(),
            research: tables::research::definitions(),
            prestige_upgrades: tables::prestige::definitions(),
            achievements: tables::achievements::definitions(),
        }
    }

    /// Replace the resource table.
    pub fn with_resources(mut self, resources: Vec<ResourceDef>) -> Self {
        self.resources = resources;
        self
    }

    /// Replace the building/upgrade table.
    pub fn with_upgrades(mut self, upgrades: Vec<UpgradeDef>) -> Self {
        self.upgrades = upgrades;
        self
    }

    /// Replace the research table.
    pub fn with_research(mut self, research: Vec<ResearchDef>) -> Self {
        self.research = research;
        self
    }

    /// Replace the achievement table.
    pub fn with_achievements(mut self, achievements: Vec<AchievementDef>) -> Self {
        self.achievements = achievements;
        self
    }

    pub fn resources(&self) -> &[ResourceDef] {
        &self.resources
    }

    pub fn upgrades(&self) -> &[UpgradeDef] {
        &self.upgrades
    }

    pub fn research(&self) -> &[ResearchDef] {
        &self.research
    }

    pub fn prestige_upgrades(&self) -> &[PrestigeUpgradeDef] {
        &self.prestige_upgrades
    }

    pub fn achievements(&self) -> &[AchievementDef] {
        &self.achievements
    }

    pub fn resource(&self, id: &str) -> Option<&ResourceDef> {
        self.resources.iter().find(|d| d.id.as_str() == id)
    }

    pub fn upgrade(&self, id: &str) -> Option<&UpgradeDef> {
        self.upgrades.iter().find(|d| d.id.as_str() == id)
    }

    pub fn research_project(&self, id: &str) -> Option<&ResearchDef> {
        self.research.iter().find(|d| d.id.as_str() == id)
    }

    pub fn prestige_upgrade(&self, id: &str) -> Option<&PrestigeUpgradeDef> {
        self.prestige_upgrades.iter().find(|d| d.id.as_str() == id)
    }

    pub fn achievement(&self, id: &str) -> Option<&AchievementDef> {
        self.achievements.iter().find(|d| d.id.as_str() == id)
    }

    /// Research projects of one tier.
    pub fn research_in_tier(&self, tier: u8) -> impl Iterator<Item = &ResearchDef> {
        self.research.iter().filter(move |d| d.tier == tier)
    }
}

impl Default for ContentTables {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_content_sizes() {
        let t = ContentTables::standard();
        assert_eq!(t.resources().len(), 10);
        assert_eq!(t.upgrades().len(), 25);
        assert_eq!(t.research().len(), 11);
        assert_eq!(t.prestige_upgrades().len(), 7);
        assert_eq!(t.achievements().len(), 34);
        assert!(t.achievements().iter().all(|a| a.reward.is_none()));
    }

    #[test]
    fn start_state_of_templates() {
        let t = ContentTables::standard();
        let energy = t.resource(ids::ENERGY).unwrap();
        assert_eq!(energy.start_amount, 10.0);
        assert_eq!(energy.click_value, 1.0);
        assert!(energy.unlocked);
        assert!(t.resource(ids::PRESTIGE).unwrap().persistent);
        assert!(!t.upgrade("fusion_reactor").unwrap().unlocked);
        assert_eq!(t.upgrade("colony_center").unwrap().max_count, Some(5));
        assert_eq!(t.research_in_tier(3).count(), 3);
    }

    #[test]
    fn tables_serialize_to_json() {
        let t = ContentTables::standard();
        let v = serde_json::to_value(t.upgrade("solar_efficiency_1").unwrap()).unwrap();
        assert_eq!(v["effect"]["type"], "efficiency");
        assert_eq!(v["effect"]["target"], "solar_panel");
        assert_eq!(v["requires"]["kind"], "upgrade");
    }
}
