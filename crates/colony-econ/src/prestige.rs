//! Prestige points, prestige-upgrade pricing and bonus aggregation.

use colony_core::{PrestigeEffect, PrestigeUpgradeDef, PrestigeUpgradeId, ResourceId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Lifetime energy per squared prestige point.
pub const PRESTIGE_ENERGY_DIVISOR: f64 = 100_000.0;

/// Aggregate of all prestige-upgrade levels. Fractions are additive per level
/// and applied as `1 + x` factors by consumers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PrestigeBonuses {
    /// Flat click yield.
    pub click_power: f64,
    /// Fractional click multiplier.
    pub click_multiplier: f64,
    /// Fractional boost to all production.
    pub global_production: f64,
    /// Fractional boost to building production.
    pub building_production: f64,
    /// Fractional boost per resource.
    pub resource_production: BTreeMap<ResourceId, f64>,
    /// Build slots that survive resets.
    pub permanent_space: u32,
    /// Fractional boost to prestige points earned.
    pub prestige_multiplier: f64,
}

impl PrestigeBonuses {
    /// Whether no upgrade contributes anything.
    pub fn is_empty(&self) -> bool {
        *self == PrestigeBonuses::default()
    }

    /// Fractional boost for one resource (0 if none).
    pub fn resource(&self, resource: &ResourceId) -> f64 {
        self.resource_production.get(resource).copied().unwrap_or(0.0)
    }
}

/// Sum the contributions of every levelled upgrade. Levels naming an unknown
/// upgrade are skipped.
pub fn aggregate_bonuses(
    defs: &[PrestigeUpgradeDef],
    levels: &BTreeMap<PrestigeUpgradeId, u32>,
) -> PrestigeBonuses {
    let mut out = PrestigeBonuses::default();
    for (id, &level) in levels {
        if level == 0 {
            continue;
        }
        let Some(def) = defs.iter().find(|d| &d.id == id) else {
            warn!(upgrade = %id, "ignoring level of unknown prestige upgrade");
            continue;
        };
        let n = level as f64;
        match &def.effect {
            PrestigeEffect::ClickPower { per_level } => out.click_power += per_level * n,
            PrestigeEffect::ClickMultiplier { per_level } => out.click_multiplier += per_level * n,
            PrestigeEffect::GlobalProduction { per_level } => {
                out.global_production += per_level * n
            }
            PrestigeEffect::BuildingProduction { per_level } => {
                out.building_production += per_level * n
            }
            PrestigeEffect::ResourceProduction {
                resource,
                per_level,
            } => {
                *out.resource_production.entry(resource.clone()).or_insert(0.0) += per_level * n;
            }
            PrestigeEffect::PermanentSpace { per_level } => {
                out.permanent_space = out
                    .permanent_space
                    .saturating_add(per_level.saturating_mul(level))
            }
            PrestigeEffect::PrestigeGain { per_level } => out.prestige_multiplier += per_level * n,
        }
    }
    out
}

/// Prestige-point price of the next level when `level` levels are owned:
/// `floor(base_cost * cost_scaling^level)`.
pub fn prestige_upgrade_cost(def: &PrestigeUpgradeDef, level: u32) -> f64 {
    let exponent = i32::try_from(level).unwrap_or(i32::MAX);
    (def.base_cost * def.cost_scaling.powi(exponent)).floor()
}

/// Points a prestige would bank in total:
/// `floor(sqrt(energy_total / 100000) * achievement_bonus * (1 + prestige_multiplier))`,
/// never negative.
pub fn calculate_prestige_points(
    energy_total: f64,
    achievement_bonus: f64,
    prestige_multiplier: f64,
) -> f64 {
    let raw = ((energy_total / PRESTIGE_ENERGY_DIVISOR).sqrt()
        * achievement_bonus
        * (1.0 + prestige_multiplier))
        .floor();
    if raw.is_finite() && raw > 0.0 {
        raw
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colony_core::tables::prestige::{definitions, PRESTIGE_GAIN};
    use proptest::prelude::*;

    fn levels(pairs: &[(&str, u32)]) -> BTreeMap<PrestigeUpgradeId, u32> {
        pairs.iter().map(|(id, l)| (PrestigeUpgradeId::from(*id), *l)).collect()
    }

    #[test]
    fn no_levels_no_bonuses() {
        let b = aggregate_bonuses(&definitions(), &BTreeMap::new());
        assert!(b.is_empty());
    }

    #[test]
    fn levels_aggregate_additively() {
        let b = aggregate_bonuses(
            &definitions(),
            &levels(&[
                ("production_boost", 3),
                ("energy_specialist", 2),
                ("click_power", 4),
                ("permanent_space", 2),
                (PRESTIGE_GAIN, 1),
                ("not_an_upgrade", 7),
            ]),
        );
        assert!((b.global_production - 0.3).abs() < 1e-12);
        assert!((b.resource(&"energy".into()) - 0.5).abs() < 1e-12);
        assert_eq!(b.resource(&"water".into()), 0.0);
        assert_eq!(b.click_power, 4.0);
        assert_eq!(b.permanent_space, 4);
        assert!((b.prestige_multiplier - 0.2).abs() < 1e-12);
    }

    #[test]
    fn upgrade_cost_curve() {
        let defs = definitions();
        let gain = defs.iter().find(|d| d.id.as_str() == PRESTIGE_GAIN).unwrap();
        assert_eq!(prestige_upgrade_cost(gain, 0), 10.0);
        assert_eq!(prestige_upgrade_cost(gain, 1), 25.0);
        assert_eq!(prestige_upgrade_cost(gain, 2), 62.0);
        assert_eq!(prestige_upgrade_cost(gain, u32::MAX), f64::INFINITY);
    }

    #[test]
    fn points_formula() {
        // sqrt(1e6 / 1e5) = 3.16..
        assert_eq!(calculate_prestige_points(1_000_000.0, 1.0, 0.0), 3.0);
        assert_eq!(calculate_prestige_points(10_000_000.0, 1.0, 0.0), 10.0);
        assert_eq!(calculate_prestige_points(10_000_000.0, 1.1, 0.2), 13.0);
        assert_eq!(calculate_prestige_points(99_999.0, 1.0, 0.0), 0.0);
        assert_eq!(calculate_prestige_points(-5.0, 1.0, 0.0), 0.0);
    }

    proptest! {
        #[test]
        fn points_never_negative(energy in -1.0e12f64..1.0e15,
                                 bonus in -2.0f64..5.0,
                                 mult in -2.0f64..5.0) {
            let p = calculate_prestige_points(energy, bonus, mult);
            prop_assert!(p >= 0.0);
            prop_assert_eq!(p, p.floor());
        }

        #[test]
        fn more_energy_never_fewer_points(a in 0.0f64..1.0e13, extra in 0.0f64..1.0e13) {
            prop_assert!(
                calculate_prestige_points(a + extra, 1.0, 0.0)
                    >= calculate_prestige_points(a, 1.0, 0.0)
            );
        }
    }
}
