//! Production rates as a fixed sequence of multiplier stages.
//!
//! A building's output for one resource is
//! `base_per_unit * count * efficiency * research * prestige`. Efficiency and
//! research factors are scoped to the building or resource and compose
//! multiplicatively; the prestige stage contributes `(1 + x)` factors last.

use crate::prestige::PrestigeBonuses;
use colony_core::{ResearchEffect, ResourceId, UpgradeId};

/// One multiplier stage of the production pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Owned efficiency upgrades targeting the building.
    Efficiency,
    /// Completed research applying to the resource or the building.
    Research,
    /// Prestige bonuses.
    Prestige,
}

/// Stage order; production is folded through these in sequence.
pub const PIPELINE: [Stage; 3] = [Stage::Efficiency, Stage::Research, Stage::Prestige];

/// Product of the multipliers of owned efficiency upgrades whose target is
/// `building`. 1 when none apply.
pub fn efficiency_multiplier<'a, I>(boosts: I, building: &UpgradeId) -> f64
where
    I: IntoIterator<Item = (&'a UpgradeId, f64)>,
{
    boosts
        .into_iter()
        .filter(|(target, _)| *target == building)
        .map(|(_, m)| m)
        .product()
}

/// Product of completed research multipliers that apply to `resource`
/// produced by `building`. Click multipliers never apply here.
pub fn research_multiplier<'a, I>(effects: I, resource: &ResourceId, building: &UpgradeId) -> f64
where
    I: IntoIterator<Item = &'a ResearchEffect>,
{
    effects
        .into_iter()
        .map(|effect| match effect {
            ResearchEffect::GlobalMultiplier { multiplier } => *multiplier,
            ResearchEffect::ProductionMultiplier {
                resource: r,
                multiplier,
            } if r == resource => *multiplier,
            ResearchEffect::MultiResourceMultiplier {
                resources,
                multiplier,
            } if resources.contains(resource) => *multiplier,
            ResearchEffect::BuildingSpecific { target, multiplier } if target == building => {
                *multiplier
            }
            ResearchEffect::ProductionMultiplier { .. }
            | ResearchEffect::MultiResourceMultiplier { .. }
            | ResearchEffect::BuildingSpecific { .. }
            | ResearchEffect::ClickMultiplier { .. } => 1.0,
        })
        .product()
}

/// `(1 + global) * (1 + building) * (1 + per-resource)`.
pub fn prestige_multiplier(bonuses: &PrestigeBonuses, resource: &ResourceId) -> f64 {
    (1.0 + bonuses.global_production)
        * (1.0 + bonuses.building_production)
        * (1.0 + bonuses.resource(resource))
}

/// Everything the pipeline reads, gathered once per recalculation.
#[derive(Clone, Debug)]
pub struct ProductionContext<'a> {
    /// `(target, multiplier)` of every owned efficiency upgrade.
    pub efficiency: Vec<(&'a UpgradeId, f64)>,
    /// Effects of every completed research project.
    pub research: Vec<&'a ResearchEffect>,
    /// Current prestige bonuses.
    pub bonuses: &'a PrestigeBonuses,
}

impl<'a> ProductionContext<'a> {
    /// Factor contributed by one stage.
    pub fn factor(&self, stage: Stage, building: &UpgradeId, resource: &ResourceId) -> f64 {
        match stage {
            Stage::Efficiency => efficiency_multiplier(self.efficiency.iter().copied(), building),
            Stage::Research => {
                research_multiplier(self.research.iter().copied(), resource, building)
            }
            Stage::Prestige => prestige_multiplier(self.bonuses, resource),
        }
    }

    /// Per-second output of `count` units of `building` for `resource`.
    pub fn rate(
        &self,
        base_per_unit: f64,
        count: u32,
        building: &UpgradeId,
        resource: &ResourceId,
    ) -> f64 {
        PIPELINE
            .iter()
            .fold(base_per_unit * count as f64, |acc, stage| {
                acc * self.factor(*stage, building, resource)
            })
    }
}

/// Energy click value after flat upgrade bonuses and research multipliers.
pub fn click_value<'a, I>(base: f64, flat_bonus: f64, research: I) -> f64
where
    I: IntoIterator<Item = &'a ResearchEffect>,
{
    let mult: f64 = research
        .into_iter()
        .filter_map(|effect| match effect {
            ResearchEffect::ClickMultiplier { multiplier } => Some(*multiplier),
            _ => None,
        })
        .product();
    (base + flat_bonus) * mult
}

/// Amount a single click yields: `(value + click_power) * (1 + click_multiplier)`.
pub fn click_yield(value: f64, bonuses: &PrestigeBonuses) -> f64 {
    (value + bonuses.click_power) * (1.0 + bonuses.click_multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solar() -> UpgradeId {
        UpgradeId::from("solar_panel")
    }

    fn energy() -> ResourceId {
        ResourceId::from("energy")
    }

    #[test]
    fn stacked_bonuses_compose_in_stage_order() {
        let target = solar();
        let logistics = ResearchEffect::GlobalMultiplier { multiplier: 1.1 };
        let bonuses = PrestigeBonuses {
            global_production: 0.1,
            ..PrestigeBonuses::default()
        };
        let ctx = ProductionContext {
            efficiency: vec![(&target, 1.5)],
            research: vec![&logistics],
            bonuses: &bonuses,
        };
        let rate = ctx.rate(0.5, 2, &solar(), &energy());
        assert!((rate - 1.815).abs() < 1e-9, "rate = {rate}");
        assert_eq!(ctx.factor(Stage::Efficiency, &solar(), &energy()), 1.5);
        assert_eq!(
            ctx.factor(Stage::Efficiency, &"water_extractor".into(), &"water".into()),
            1.0
        );
    }

    #[test]
    fn research_scopes() {
        let effects = [
            ResearchEffect::ProductionMultiplier {
                resource: "water".into(),
                multiplier: 1.25,
            },
            ResearchEffect::MultiResourceMultiplier {
                resources: vec!["stone".into(), "metal".into()],
                multiplier: 1.5,
            },
            ResearchEffect::BuildingSpecific {
                target: "fusion_reactor".into(),
                multiplier: 2.0,
            },
            ResearchEffect::ClickMultiplier { multiplier: 2.0 },
        ];
        let m = |resource: &str, building: &str| {
            research_multiplier(effects.iter(), &resource.into(), &building.into())
        };
        assert_eq!(m("water", "water_extractor"), 1.25);
        assert_eq!(m("metal", "metal_refinery"), 1.5);
        assert_eq!(m("energy", "fusion_reactor"), 2.0);
        assert_eq!(m("energy", "solar_panel"), 1.0);
    }

    #[test]
    fn click_composition() {
        let research = [
            ResearchEffect::ClickMultiplier { multiplier: 2.0 },
            ResearchEffect::GlobalMultiplier { multiplier: 3.0 },
        ];
        // (1 + 1 + 2) * 2
        assert_eq!(click_value(1.0, 3.0, research.iter()), 8.0);
        let bonuses = PrestigeBonuses {
            click_power: 2.0,
            click_multiplier: 0.5,
            ..PrestigeBonuses::default()
        };
        assert_eq!(click_yield(8.0, &bonuses), 15.0);
        assert_eq!(click_yield(1.0, &PrestigeBonuses::default()), 1.0);
    }

    #[test]
    fn pipeline_order_is_fixed() {
        assert_eq!(
            PIPELINE,
            [Stage::Efficiency, Stage::Research, Stage::Prestige]
        );
    }
}
