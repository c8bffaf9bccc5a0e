//! Read-only queries for a presentation layer.

use crate::achievements::AchievementBook;
use crate::config::EngineConfig;
use crate::game::Game;
use crate::state::ResourceInstance;
use colony_core::{
    calculate_cost, ContentTables, Cost, PrestigeUpgradeDef, ResearchDef, UpgradeDef,
};
use colony_econ::PrestigeBonuses;
use std::collections::BTreeSet;

/// A building or upgrade with its live state.
#[derive(Clone, Debug)]
pub struct UpgradeView<'a> {
    pub def: &'a UpgradeDef,
    pub unlocked: bool,
    pub count: u32,
    /// Price of the next unit.
    pub next_cost: Cost,
    /// Buying one more would succeed right now.
    pub buyable: bool,
}

#[derive(Clone, Debug)]
pub struct ResearchView<'a> {
    pub def: &'a ResearchDef,
    pub unlocked: bool,
    pub completed: bool,
    pub available: bool,
}

#[derive(Clone, Debug)]
pub struct PrestigeUpgradeView<'a> {
    pub def: &'a PrestigeUpgradeDef,
    pub level: u32,
    /// `None` once the level cap is reached.
    pub next_cost: Option<f64>,
}

impl Game {
    pub fn tables(&self) -> &ContentTables {
        &self.colony.tables
    }

    pub fn config(&self) -> &EngineConfig {
        &self.colony.config
    }

    /// Resources in table order.
    pub fn resources(&self) -> impl Iterator<Item = &ResourceInstance> {
        self.colony
            .tables
            .resources()
            .iter()
            .filter_map(|d| self.colony.resources.get(&d.id))
    }

    pub fn resource(&self, id: &str) -> Option<&ResourceInstance> {
        self.colony.resources.get(id)
    }

    pub fn upgrade_count(&self, id: &str) -> u32 {
        self.colony.count(id)
    }

    pub fn upgrades(&self) -> Vec<UpgradeView<'_>> {
        self.colony
            .tables
            .upgrades()
            .iter()
            .map(|def| {
                let count = self.colony.count(def.id.as_str());
                UpgradeView {
                    def,
                    unlocked: self.colony.upgrade_unlocked(def.id.as_str()),
                    count,
                    next_cost: calculate_cost(def, count),
                    buyable: self.can_buy_upgrade(def.id.as_str()),
                }
            })
            .collect()
    }

    pub fn research(&self) -> Vec<ResearchView<'_>> {
        self.colony
            .tables
            .research()
            .iter()
            .map(|def| ResearchView {
                def,
                unlocked: self.colony.research_unlocked(def.id.as_str()),
                completed: self.colony.completed_research.contains(&def.id),
                available: self.can_research(def.id.as_str()),
            })
            .collect()
    }

    pub fn is_research_completed(&self, id: &str) -> bool {
        self.colony.completed_research.contains(id)
    }

    pub fn prestige_upgrades(&self) -> Vec<PrestigeUpgradeView<'_>> {
        self.colony
            .tables
            .prestige_upgrades()
            .iter()
            .map(|def| PrestigeUpgradeView {
                def,
                level: self.prestige_level(def.id.as_str()),
                next_cost: self.prestige_upgrade_cost(def.id.as_str()),
            })
            .collect()
    }

    pub fn prestige_bonuses(&self) -> &PrestigeBonuses {
        &self.colony.bonuses
    }

    pub fn achievements(&self) -> &AchievementBook {
        &self.achievements
    }

    pub fn used_space(&self) -> u32 {
        self.colony.used_space
    }

    pub fn max_space(&self) -> u32 {
        self.colony.max_space
    }

    /// Owned generator units.
    pub fn total_buildings(&self) -> u32 {
        self.colony.generator_units()
    }

    pub fn total_clicks(&self) -> u64 {
        self.colony.total_clicks
    }

    pub fn prestige_count(&self) -> u32 {
        self.colony.prestige_count
    }

    pub fn total_prestige_points(&self) -> f64 {
        self.colony.total_prestige_points
    }

    pub fn achievement_prestige_bonus(&self) -> f64 {
        self.colony.achievement_prestige_bonus
    }

    pub fn reached_milestones(&self) -> &BTreeSet<String> {
        &self.colony.reached_milestones
    }

    /// Ticks run by this engine instance.
    pub fn tick_count(&self) -> u64 {
        self.colony.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Local, TimeZone};
    use persistence::{PersistedState, PrestigeLevel};

    fn noon() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
            .earliest()
            .unwrap()
    }

    fn game() -> Game {
        Game::standard().with_clock(noon)
    }

    fn upgrade<'a>(views: &'a [UpgradeView<'a>], id: &str) -> &'a UpgradeView<'a> {
        views.iter().find(|v| v.def.id.as_str() == id).unwrap()
    }

    fn project<'a>(views: &'a [ResearchView<'a>], id: &str) -> &'a ResearchView<'a> {
        views.iter().find(|v| v.def.id.as_str() == id).unwrap()
    }

    #[test]
    fn fresh_game_summaries() {
        let g = game();
        let order: Vec<&str> = g.resources().map(|r| r.id.as_str()).collect();
        assert_eq!(order[..3], ["energy", "water", "food"]);

        let upgrades = g.upgrades();
        assert_eq!(upgrades.len(), g.tables().upgrades().len());
        let solar = upgrade(&upgrades, "solar_panel");
        assert!(solar.unlocked);
        assert_eq!(solar.count, 0);
        assert_eq!(solar.next_cost.get("energy"), Some(&10.0));
        assert!(solar.buyable);
        let cells = upgrade(&upgrades, "solar_efficiency_1");
        assert!(!cells.unlocked);
        assert!(!cells.buyable);

        let research = g.research();
        let logistics = project(&research, "colony_logistics");
        assert!(!logistics.unlocked);
        assert!(!logistics.completed);
        assert!(!logistics.available);

        let boost = g
            .prestige_upgrades()
            .into_iter()
            .find(|v| v.def.id.as_str() == "production_boost")
            .unwrap();
        assert_eq!(boost.level, 0);
        assert_eq!(boost.next_cost, Some(1.0));
    }

    #[test]
    fn research_view_tracks_progress() {
        let mut g = game();
        g.add_resource("energy", 1_000.0);
        g.add_resource("research", 10.0);
        g.check_unlocks();
        let research = g.research();
        let logistics = project(&research, "colony_logistics");
        assert!(logistics.unlocked);
        assert!(!logistics.available);

        g.add_resource("research", 15.0);
        assert!(project(&g.research(), "colony_logistics").available);

        assert!(g.perform_research("colony_logistics"));
        let research = g.research();
        let logistics = project(&research, "colony_logistics");
        assert!(logistics.completed);
        assert!(!logistics.available);
    }

    #[test]
    fn capped_prestige_upgrade_has_no_next_cost() {
        let mut state = PersistedState::default();
        state.prestige_upgrades.push(PrestigeLevel {
            id: "permanent_space".into(),
            level: 10,
        });
        let mut g = game();
        g.load_persisted(&state);
        let space = g
            .prestige_upgrades()
            .into_iter()
            .find(|v| v.def.id.as_str() == "permanent_space")
            .unwrap();
        assert_eq!(space.level, 10);
        assert_eq!(space.next_cost, None);
        assert_eq!(g.max_space(), 30);
        assert_eq!(g.used_space(), 0);
    }
}
