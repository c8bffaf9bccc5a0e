//! Aggregated statistics for display.

use crate::game::Game;
use colony_core::{ResourceId, UpgradeId, UpgradeKind};
use persistence::PrestigeRecord;
use serde::Serialize;
use std::collections::BTreeMap;

/// Lifetime and current-cycle figures.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StatisticsReport {
    /// Milliseconds since the first session started.
    pub total_playtime_ms: i64,
    pub total_clicks: u64,
    pub total_resources_earned: BTreeMap<ResourceId, f64>,
    pub peak_production: BTreeMap<ResourceId, f64>,
    pub total_upgrades_bought: u64,
    pub total_upgrades_sold: u64,
    pub total_research_completed: u64,
    pub prestige_count: u32,
    pub total_prestige_points: f64,
    pub current_prestige_points: f64,
    pub prestige_history: Vec<PrestigeRecord>,
    /// Owned generator units this cycle.
    pub current_buildings: u32,
    /// Generator with the highest count; ties go to the earlier table entry.
    pub most_owned_building: Option<(UpgradeId, u32)>,
    pub current_research: usize,
    pub achievements_unlocked: usize,
    pub achievements_total: usize,
}

impl Game {
    pub fn statistics(&self) -> StatisticsReport {
        let c = &self.colony;
        let mut most_owned: Option<(UpgradeId, u32)> = None;
        for def in c.tables.upgrades() {
            if def.kind() != UpgradeKind::Generator {
                continue;
            }
            let count = c.count(def.id.as_str());
            if count > 0 && most_owned.as_ref().map_or(true, |(_, best)| count > *best) {
                most_owned = Some((def.id.clone(), count));
            }
        }
        StatisticsReport {
            total_playtime_ms: (self.now_ms() - c.start_time).max(0),
            total_clicks: c.total_clicks,
            total_resources_earned: c.statistics.total_resources_earned.clone(),
            peak_production: c.statistics.peak_production.clone(),
            total_upgrades_bought: c.statistics.total_upgrades_bought,
            total_upgrades_sold: c.statistics.total_upgrades_sold,
            total_research_completed: c.statistics.total_research_completed,
            prestige_count: c.prestige_count,
            total_prestige_points: c.total_prestige_points,
            current_prestige_points: self.current_prestige_points(),
            prestige_history: c.statistics.prestige_history.clone(),
            current_buildings: c.generator_units(),
            most_owned_building: most_owned,
            current_research: c.completed_research.len(),
            achievements_unlocked: self.achievements.unlocked_count(),
            achievements_total: self.achievements.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Local, TimeZone};
    use persistence::PersistedState;

    fn noon() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
            .earliest()
            .unwrap()
    }

    fn ninety_seconds_later() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2024, 6, 1, 12, 1, 30)
            .earliest()
            .unwrap()
    }

    fn owning(counts: &[(&str, u32)]) -> Game {
        let mut state = PersistedState::default();
        for (id, n) in counts {
            state.upgrades.insert((*id).into(), *n);
        }
        let mut g = Game::standard().with_clock(noon);
        g.load_persisted(&state);
        g
    }

    #[test]
    fn playtime_follows_the_clock() {
        let g = Game::standard().with_clock(noon);
        assert_eq!(g.statistics().total_playtime_ms, 0);

        let saved = g.to_persisted();
        let mut later = Game::standard().with_clock(ninety_seconds_later);
        later.load_persisted(&saved);
        assert_eq!(later.statistics().total_playtime_ms, 90_000);
    }

    #[test]
    fn most_owned_tie_goes_to_earlier_entry() {
        let g = owning(&[("water_extractor", 2), ("solar_panel", 2)]);
        assert_eq!(
            g.statistics().most_owned_building,
            Some((UpgradeId::from("solar_panel"), 2))
        );

        let g = owning(&[("water_extractor", 3), ("solar_panel", 2)]);
        let report = g.statistics();
        assert_eq!(
            report.most_owned_building,
            Some((UpgradeId::from("water_extractor"), 3))
        );
        assert_eq!(report.current_buildings, 5);
    }

    #[test]
    fn most_owned_ignores_non_generators() {
        let g = owning(&[("click_power_1", 1), ("expand_colony_1", 1)]);
        let report = g.statistics();
        assert_eq!(report.most_owned_building, None);
        assert_eq!(report.current_buildings, 0);
    }

    #[test]
    fn peak_production_outlives_demolish() {
        let mut g = Game::standard().with_clock(noon);
        assert!(g.statistics().peak_production.is_empty());
        assert!(g.buy_upgrade("solar_panel"));
        assert!(g.demolish_upgrade("solar_panel"));
        assert_eq!(g.resource("energy").map(|r| r.per_second), Some(0.0));

        let report = g.statistics();
        assert_eq!(report.peak_production.get("energy"), Some(&0.5));
        assert_eq!(report.total_upgrades_bought, 1);
        assert_eq!(report.total_upgrades_sold, 1);
        assert_eq!(report.current_buildings, 0);
        assert!(report.achievements_unlocked >= 1);
        assert_eq!(report.achievements_total, g.tables().achievements().len());
    }
}
