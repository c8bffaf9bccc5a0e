//! Prestige: trade a cycle's energy earnings for permanent points.

use crate::config::EngineConfig;
use crate::events::GameEvent;
use crate::game::Game;
use colony_core::ids::{ENERGY, PRESTIGE, WATER};
use colony_core::ContentTables;
use colony_econ::{prestige_upgrade_cost, PrestigeBonuses};
use persistence::{PersistedState, PrestigeRecord, ResourceState};
use serde::Serialize;
use tracing::{debug, info};

/// What a prestige would yield right now.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PrestigeInfo {
    /// Prestige points currently held.
    pub current_points: f64,
    /// Points the current cycle is worth.
    pub points_after_prestige: f64,
    /// `max(0, points_after_prestige - current_points)`.
    pub gained: f64,
    pub bonuses: PrestigeBonuses,
}

impl Game {
    /// Points the current cycle is worth:
    /// `floor(sqrt(energy / 1e5) * achievement_bonus * (1 + prestige_gain))`.
    /// Uses energy earned this cycle, or held energy if nothing was recorded.
    pub fn calculate_prestige_points(&self) -> f64 {
        let energy = self.colony.resources.get(ENERGY).map_or(0.0, |r| {
            if r.total_earned > 0.0 {
                r.total_earned
            } else {
                r.amount
            }
        });
        colony_econ::calculate_prestige_points(
            energy,
            self.colony.achievement_prestige_bonus,
            self.colony.bonuses.prestige_multiplier,
        )
    }

    /// Prestige points held.
    pub fn current_prestige_points(&self) -> f64 {
        self.colony.resources.get(PRESTIGE).map_or(0.0, |r| r.amount)
    }

    /// Prestiging would raise the held points.
    pub fn can_prestige(&self) -> bool {
        self.calculate_prestige_points() > self.current_prestige_points()
    }

    pub fn prestige_info(&self) -> PrestigeInfo {
        let current_points = self.current_prestige_points();
        let points_after_prestige = self.calculate_prestige_points();
        PrestigeInfo {
            current_points,
            points_after_prestige,
            gained: (points_after_prestige - current_points).max(0.0),
            bonuses: self.colony.bonuses.clone(),
        }
    }

    /// Reset the cycle for prestige points. Prestige upgrade levels,
    /// achievements and lifetime statistics carry over. Rejected with no
    /// change when it would not raise the held points.
    pub fn perform_prestige(&mut self) -> bool {
        let points = self.calculate_prestige_points();
        let current = self.current_prestige_points();
        if points <= current {
            debug!(points, current, "prestige rejected");
            return false;
        }
        let gained = points - current;
        let now = self.now_ms();
        let mut state = self.to_persisted();
        reset_for_prestige(
            &mut state,
            &self.colony.tables,
            &self.colony.config,
            points,
            gained,
            now,
        );
        self.load_persisted(&state);
        info!(
            gained,
            total = points,
            prestige_count = self.colony.prestige_count,
            "prestige performed"
        );
        self.emit(GameEvent::PrestigePerformed {
            gained,
            total: points,
        });
        self.check_achievements();
        true
    }

    /// Price of the next level, `None` for unknown or maxed upgrades.
    pub fn prestige_upgrade_cost(&self, id: &str) -> Option<f64> {
        let def = self.colony.tables.prestige_upgrade(id)?;
        let level = self.colony.prestige_levels.get(id).copied().unwrap_or(0);
        if def.max_level.is_some_and(|max| level >= max) {
            return None;
        }
        Some(prestige_upgrade_cost(def, level))
    }

    pub fn prestige_level(&self, id: &str) -> u32 {
        self.colony.prestige_levels.get(id).copied().unwrap_or(0)
    }

    /// Spend prestige points on one level of a prestige upgrade.
    pub fn buy_prestige_upgrade(&mut self, id: &str) -> bool {
        let Some(cost) = self.prestige_upgrade_cost(id) else {
            return false;
        };
        let Some(points) = self.colony.resources.get_mut(PRESTIGE) else {
            return false;
        };
        if points.amount < cost {
            return false;
        }
        points.amount -= cost;
        let level = self
            .colony
            .prestige_levels
            .entry(id.into())
            .or_insert(0);
        *level += 1;
        info!(upgrade = id, level = *level, cost, "prestige upgrade bought");
        self.colony.bonuses = colony_econ::aggregate_bonuses(
            self.colony.tables.prestige_upgrades(),
            &self.colony.prestige_levels,
        );
        self.recalculate_production();
        true
    }
}

/// Rewrite `state` into the start of a new cycle holding `points` prestige.
fn reset_for_prestige(
    state: &mut PersistedState,
    tables: &ContentTables,
    config: &EngineConfig,
    points: f64,
    gained: f64,
    now: i64,
) {
    for def in tables.resources() {
        let entry = state.resources.entry(def.id.clone()).or_default();
        if def.id.as_str() == PRESTIGE {
            entry.amount = points;
            entry.total_earned += gained;
            entry.unlocked = true;
        } else if !def.persistent {
            *entry = ResourceState::default();
        }
    }
    if let Some(energy) = state.resources.get_mut(ENERGY) {
        energy.amount = config.restart_energy;
        energy.total_earned = config.restart_energy;
        energy.unlocked = true;
    }
    if let Some(water) = state.resources.get_mut(WATER) {
        water.unlocked = true;
    }
    state.upgrades.clear();
    state.completed_research.clear();
    state.unlocked_upgrades.clear();
    state.unlocked_research.clear();
    state.reached_milestones.clear();
    state.max_space = config.base_space;
    state.prestige_count += 1;
    state.total_prestige_points += gained;
    state.statistics.prestige_history.push(PrestigeRecord {
        date: now,
        points_gained: gained,
    });
    state.last_online = now;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Local, TimeZone};
    use persistence::PrestigeLevel;
    use proptest::prelude::*;

    fn noon() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
            .earliest()
            .unwrap()
    }

    fn rich_cycle() -> PersistedState {
        let mut state = PersistedState::default();
        state.resources.insert(
            ENERGY.into(),
            ResourceState {
                amount: 500_000.0,
                total_earned: 4_000_000.0,
                unlocked: true,
            },
        );
        state.upgrades.insert("solar_panel".into(), 3);
        state.completed_research.insert("colony_logistics".into());
        state.prestige_upgrades.push(PrestigeLevel {
            id: "production_boost".into(),
            level: 3,
        });
        state
    }

    fn game_from(state: &PersistedState) -> Game {
        let mut g = Game::standard().with_clock(noon);
        g.load_persisted(state);
        g
    }

    #[test]
    fn prestige_resets_cycle_and_keeps_levels() {
        let mut g = game_from(&rich_cycle());
        let info = g.prestige_info();
        assert_eq!(info.points_after_prestige, 6.0);
        assert_eq!(info.gained, 6.0);
        assert!(g.can_prestige());

        assert!(g.perform_prestige());
        assert_eq!(g.prestige_level("production_boost"), 3);
        assert_eq!(g.resource(ENERGY).map(|r| r.amount), Some(10.0));
        assert_eq!(g.upgrade_count("solar_panel"), 0);
        assert!(!g.is_research_completed("colony_logistics"));
        assert_eq!(g.prestige_count(), 1);
        assert_eq!(g.current_prestige_points(), 6.0);
        assert_eq!(g.total_prestige_points(), 6.0);
        assert_eq!(g.resource(ENERGY).map(|r| r.per_second), Some(0.0));
        assert!(g.resource(WATER).is_some_and(|r| r.unlocked));
        assert!(g.resource("metal").is_some_and(|r| !r.unlocked && r.amount == 0.0));
        assert!(g.achievements().is_unlocked("first_prestige"));
        assert_eq!(g.statistics().prestige_history.len(), 1);
        assert!(!g.can_prestige());
    }

    #[test]
    fn achievements_leave_prestige_points_alone() {
        let mut g = Game::standard().with_clock(noon);
        g.add_resource(ENERGY, 1_000_000.0);
        let before = g.calculate_prestige_points();
        let unlocked = g.check_achievements();
        assert!(unlocked.iter().any(|id| id.as_str() == "energy_1m"));
        assert_eq!(g.achievement_prestige_bonus(), 1.0);
        // floor(sqrt(1_000_010 / 1e5))
        assert_eq!(g.calculate_prestige_points(), 3.0);
        assert_eq!(g.calculate_prestige_points(), before);
        assert_eq!(g.resource(ENERGY).map(|r| r.amount), Some(1_000_010.0));
    }

    #[test]
    fn rejected_prestige_changes_nothing() {
        let mut g = Game::standard().with_clock(noon);
        g.add_resource(ENERGY, 50_000.0);
        let before = g.to_persisted();
        assert!(!g.can_prestige());
        assert!(!g.perform_prestige());
        assert_eq!(g.to_persisted(), before);
    }

    #[test]
    fn prestige_upgrades_cost_points() {
        let mut state = PersistedState::default();
        state.resources.insert(
            PRESTIGE.into(),
            ResourceState {
                amount: 5.0,
                total_earned: 5.0,
                unlocked: true,
            },
        );
        let mut g = game_from(&state);
        assert_eq!(g.prestige_upgrade_cost("production_boost"), Some(1.0));
        assert!(g.buy_prestige_upgrade("production_boost"));
        assert_eq!(g.prestige_upgrade_cost("production_boost"), Some(2.0));
        assert!(g.buy_prestige_upgrade("production_boost"));
        assert_eq!(g.current_prestige_points(), 2.0);
        assert_eq!(g.prestige_level("production_boost"), 2);
        assert!((g.prestige_bonuses().global_production - 0.2).abs() < 1e-12);
        assert!(!g.buy_prestige_upgrade("production_boost"));
        assert!(!g.buy_prestige_upgrade("warp_drive"));
    }

    #[test]
    fn permanent_space_survives_prestige() {
        let mut state = rich_cycle();
        let space = Game::standard()
            .tables()
            .prestige_upgrades()
            .iter()
            .find(|d| matches!(d.effect, colony_core::PrestigeEffect::PermanentSpace { .. }))
            .map(|d| d.id.clone())
            .unwrap();
        state.prestige_upgrades.push(PrestigeLevel {
            id: space,
            level: 1,
        });
        let mut g = game_from(&state);
        let boosted = g.max_space();
        assert!(boosted > 10);
        assert!(g.perform_prestige());
        assert_eq!(g.max_space(), boosted);
    }

    proptest! {
        #[test]
        fn prestige_points_never_negative(earned in 0.0f64..1e12) {
            let mut g = Game::standard().with_clock(noon);
            g.add_resource(ENERGY, earned);
            let info = g.prestige_info();
            prop_assert!(info.points_after_prestige >= 0.0);
            prop_assert!(info.gained >= 0.0);
            prop_assert_eq!(g.can_prestige(), info.gained > 0.0);
        }
    }
}
