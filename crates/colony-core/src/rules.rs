//! Pure helpers over the content tables. Nothing here mutates state, so the
//! presentation layer may call them speculatively for previews.

use crate::ids::{ResearchId, ResourceId, UpgradeId};
use crate::model::{Cost, Requirement, UpgradeDef};

/// Fraction of the last unit's price returned on demolition.
pub const DEMOLISH_REFUND_RATE: f64 = 0.5;

/// Read access to the state an unlock threshold is evaluated against.
pub trait UnlockView {
    /// Current stock of a resource, `None` if the resource does not exist.
    fn resource_amount(&self, resource: &ResourceId) -> Option<f64>;
    /// Owned count of an upgrade (0 if never bought or unknown).
    fn upgrade_count(&self, upgrade: &UpgradeId) -> u32;
    /// Whether a research project is completed.
    fn research_completed(&self, research: &ResearchId) -> bool;
}

/// Price of the next unit when `current_count` units are owned.
///
/// `floor(base_cost[r] * cost_scaling^current_count)` per resource. Counts
/// past `i32::MAX` price as `i32::MAX`.
pub fn calculate_cost(def: &UpgradeDef, current_count: u32) -> Cost {
    let factor = def
        .cost_scaling
        .powi(i32::try_from(current_count).unwrap_or(i32::MAX));
    def.base_cost
        .iter()
        .map(|(resource, base)| (resource.clone(), (base * factor).floor()))
        .collect()
}

/// Refund for demolishing one of `current_count` owned units: half the price
/// paid for the most recent unit, floored per resource. Empty when nothing is owned.
pub fn demolish_refund(def: &UpgradeDef, current_count: u32) -> Cost {
    if current_count == 0 {
        return Cost::new();
    }
    calculate_cost(def, current_count - 1)
        .into_iter()
        .map(|(resource, paid)| (resource, (paid * DEMOLISH_REFUND_RATE).floor()))
        .collect()
}

/// Whether an unlock threshold currently holds. A missing resource never satisfies it.
pub fn check_unlock(requirement: &Requirement, view: &impl UnlockView) -> bool {
    match requirement {
        Requirement::Resource { resource, amount } => view
            .resource_amount(resource)
            .is_some_and(|have| have >= *amount),
        Requirement::Upgrade { upgrade, count } => view.upgrade_count(upgrade) >= *count,
        Requirement::Research { research } => view.research_completed(research),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{UpgradeEffect, DEFAULT_COST_SCALING};
    use crate::tables;
    use proptest::prelude::*;
    use std::collections::{BTreeMap, BTreeSet};

    #[derive(Default)]
    struct View {
        resources: BTreeMap<ResourceId, f64>,
        counts: BTreeMap<UpgradeId, u32>,
        done: BTreeSet<ResearchId>,
    }

    impl UnlockView for View {
        fn resource_amount(&self, resource: &ResourceId) -> Option<f64> {
            self.resources.get(resource).copied()
        }
        fn upgrade_count(&self, upgrade: &UpgradeId) -> u32 {
            self.counts.get(upgrade).copied().unwrap_or(0)
        }
        fn research_completed(&self, research: &ResearchId) -> bool {
            self.done.contains(research)
        }
    }

    fn solar() -> UpgradeDef {
        tables::upgrades::definitions()
            .into_iter()
            .find(|d| d.id.as_str() == "solar_panel")
            .unwrap()
    }

    #[test]
    fn solar_panel_first_two_prices() {
        let def = solar();
        assert_eq!(calculate_cost(&def, 0).get("energy"), Some(&10.0));
        assert_eq!(calculate_cost(&def, 1).get("energy"), Some(&11.0));
    }

    #[test]
    fn refund_is_half_of_last_price() {
        let def = solar();
        // price paid for the 3rd unit: floor(10 * 1.15^2) = 13, refund floor(6.5) = 6
        assert_eq!(demolish_refund(&def, 3).get("energy"), Some(&6.0));
        assert!(demolish_refund(&def, 0).is_empty());
    }

    #[test]
    fn huge_counts_never_get_cheaper() {
        let def = solar();
        let first = calculate_cost(&def, 0)["energy"];
        for n in [i32::MAX as u32, i32::MAX as u32 + 1, u32::MAX] {
            let price = calculate_cost(&def, n)["energy"];
            assert!(price >= first, "count {n} priced {price}");
            assert!(price.is_infinite());
        }
    }

    #[test]
    fn unlock_thresholds() {
        let mut view = View::default();
        view.resources.insert("water".into(), 9.0);
        let req = Requirement::Resource {
            resource: "water".into(),
            amount: 10.0,
        };
        assert!(!check_unlock(&req, &view));
        view.resources.insert("water".into(), 10.0);
        assert!(check_unlock(&req, &view));

        let missing = Requirement::Resource {
            resource: "antimatter".into(),
            amount: 0.0,
        };
        assert!(!check_unlock(&missing, &view));

        let req = Requirement::Upgrade {
            upgrade: "habitat".into(),
            count: 3,
        };
        view.counts.insert("habitat".into(), 2);
        assert!(!check_unlock(&req, &view));
        view.counts.insert("habitat".into(), 3);
        assert!(check_unlock(&req, &view));

        let req = Requirement::Research {
            research: "colony_logistics".into(),
        };
        assert!(!check_unlock(&req, &view));
        view.done.insert("colony_logistics".into());
        assert!(check_unlock(&req, &view));
    }

    fn def_with(base: f64, scaling: f64) -> UpgradeDef {
        UpgradeDef {
            id: "test_building".into(),
            name: "Test Building".into(),
            icon: String::new(),
            description: String::new(),
            size: 1,
            max_count: None,
            base_cost: [(ResourceId::from("energy"), base)].into_iter().collect(),
            cost_scaling: scaling,
            produces: BTreeMap::new(),
            consumes: BTreeMap::new(),
            effect: UpgradeEffect::Generator,
            unlocked: true,
            requires: None,
        }
    }

    proptest! {
        #[test]
        fn cost_is_monotonic(base in 0.0f64..1_000_000.0,
                             scaling in 1.0f64..2.0,
                             n in 0u32..200) {
            let def = def_with(base, scaling);
            let now = calculate_cost(&def, n)["energy"];
            let next = calculate_cost(&def, n + 1)["energy"];
            prop_assert!(next >= now);
        }

        #[test]
        fn refund_never_exceeds_price(base in 1.0f64..100_000.0, n in 1u32..100) {
            let def = def_with(base, DEFAULT_COST_SCALING);
            let paid = calculate_cost(&def, n - 1)["energy"];
            let back = demolish_refund(&def, n)["energy"];
            prop_assert!(back <= paid);
            prop_assert!(back >= 0.0);
        }
    }
}
