use super::{amounts, needs_resource, needs_upgrade};
use crate::model::{Requirement, UpgradeDef, UpgradeEffect, DEFAULT_COST_SCALING};

struct Build(UpgradeDef);

impl Build {
    fn new(
        id: &str,
        name: &str,
        icon: &str,
        description: &str,
        effect: UpgradeEffect,
        base_cost: &[(&str, f64)],
    ) -> Self {
        Build(UpgradeDef {
            id: id.into(),
            name: name.to_string(),
            icon: icon.to_string(),
            description: description.to_string(),
            size: 0,
            max_count: None,
            base_cost: amounts(base_cost),
            cost_scaling: DEFAULT_COST_SCALING,
            produces: Default::default(),
            consumes: Default::default(),
            effect,
            unlocked: true,
            requires: None,
        })
    }

    fn size(mut self, size: u32) -> Self {
        self.0.size = size;
        self
    }

    fn max(mut self, max_count: u32) -> Self {
        self.0.max_count = Some(max_count);
        self
    }

    fn scaling(mut self, cost_scaling: f64) -> Self {
        self.0.cost_scaling = cost_scaling;
        self
    }

    fn produces(mut self, rates: &[(&str, f64)]) -> Self {
        self.0.produces = amounts(rates);
        self
    }

    fn consumes(mut self, rates: &[(&str, f64)]) -> Self {
        self.0.consumes = amounts(rates);
        self
    }

    fn requires(mut self, requirement: Option<Requirement>) -> Self {
        self.0.unlocked = requirement.is_none();
        self.0.requires = requirement;
        self
    }
}

fn efficiency(target: &str, multiplier: f64) -> UpgradeEffect {
    UpgradeEffect::Efficiency {
        target: target.into(),
        multiplier,
    }
}

/// All building and upgrade templates in display order.
pub fn definitions() -> Vec<UpgradeDef> {
    use UpgradeEffect::{Click, Generator, Space};
    let rows = vec![
        // Energy generators
        Build::new(
            "solar_panel",
            "Solar Panel",
            "☀️",
            "Collects sunlight. Small and efficient.",
            Generator,
            &[("energy", 10.0)],
        )
        .size(1)
        .produces(&[("energy", 0.5)]),
        Build::new(
            "fusion_reactor",
            "Fusion Reactor",
            "⚛️",
            "Advanced reactor. Large footprint, huge output.",
            Generator,
            &[("energy", 500.0), ("metal", 50.0), ("crystals", 10.0)],
        )
        .size(3)
        .scaling(1.2)
        .produces(&[("energy", 10.0)])
        .requires(needs_resource("crystals", 20.0)),
        // Water
        Build::new(
            "water_extractor",
            "Water Extractor",
            "💧",
            "Pulls water out of the atmosphere.",
            Generator,
            &[("energy", 25.0)],
        )
        .size(1)
        .produces(&[("water", 0.2)]),
        Build::new(
            "ice_mining",
            "Ice Mining",
            "❄️",
            "Extracts water from subsurface ice.",
            Generator,
            &[("energy", 200.0), ("metal", 30.0)],
        )
        .size(2)
        .scaling(1.18)
        .produces(&[("water", 2.0)])
        .requires(needs_resource("metal", 50.0)),
        // Food
        Build::new(
            "hydroponic_farm",
            "Hydroponic Farm",
            "🌾",
            "Grows food from water and energy.",
            Generator,
            &[("energy", 50.0), ("water", 30.0)],
        )
        .size(2)
        .produces(&[("food", 0.15)])
        .requires(needs_resource("water", 10.0)),
        Build::new(
            "biodome",
            "Biodome",
            "🌱",
            "A large ecosystem for food production.",
            Generator,
            &[("energy", 300.0), ("water", 100.0), ("metal", 50.0)],
        )
        .size(3)
        .scaling(1.2)
        .produces(&[("food", 1.5)])
        .requires(needs_resource("metal", 100.0)),
        // Population
        Build::new(
            "habitat",
            "Habitat",
            "🏘️",
            "Housing for new colonists.",
            Generator,
            &[("energy", 80.0), ("water", 50.0), ("food", 100.0)],
        )
        .size(2)
        .scaling(1.2)
        .produces(&[("population", 0.05)])
        .requires(needs_resource("food", 20.0)),
        Build::new(
            "colony_center",
            "Colony Center",
            "🏛️",
            "Central hub that attracts more colonists.",
            Generator,
            &[("energy", 500.0), ("metal", 100.0), ("food", 300.0)],
        )
        .size(3)
        .max(5)
        .scaling(1.3)
        .produces(&[("population", 0.2)])
        .requires(needs_upgrade("habitat", 3)),
        // Industry
        Build::new(
            "quarry",
            "Quarry",
            "⛏️",
            "Digs stone out of the ground.",
            Generator,
            &[("energy", 100.0), ("population", 10.0)],
        )
        .size(2)
        .produces(&[("stone", 0.3)])
        .requires(needs_resource("population", 5.0)),
        Build::new(
            "metal_refinery",
            "Metal Refinery",
            "🏭",
            "Refines stone into metal.",
            Generator,
            &[("energy", 200.0), ("stone", 200.0), ("population", 15.0)],
        )
        .size(3)
        .scaling(1.18)
        .produces(&[("metal", 0.2)])
        .consumes(&[("stone", 0.5)])
        .requires(needs_resource("stone", 50.0)),
        Build::new(
            "crystal_mine",
            "Crystal Mine",
            "💎",
            "Mines rare crystals from deep layers.",
            Generator,
            &[("energy", 300.0), ("metal", 100.0), ("population", 20.0)],
        )
        .size(2)
        .scaling(1.2)
        .produces(&[("crystals", 0.1)])
        .requires(needs_resource("metal", 100.0)),
        Build::new(
            "crystal_synthesizer",
            "Crystal Synthesizer",
            "✨",
            "Synthesizes crystals from energy.",
            Generator,
            &[("energy", 1000.0), ("metal", 200.0), ("crystals", 50.0)],
        )
        .size(3)
        .scaling(1.25)
        .produces(&[("crystals", 0.5)])
        .consumes(&[("energy", 2.0)])
        .requires(needs_resource("crystals", 50.0)),
        // Expansion
        Build::new(
            "fuel_refinery",
            "Fuel Refinery",
            "⛽",
            "Produces high-energy fuel.",
            Generator,
            &[("energy", 500.0), ("metal", 150.0), ("crystals", 50.0)],
        )
        .size(3)
        .scaling(1.2)
        .produces(&[("fuel", 0.1)])
        .consumes(&[("crystals", 0.05), ("energy", 1.0)])
        .requires(needs_resource("crystals", 50.0)),
        Build::new(
            "research_lab",
            "Research Lab",
            "🔬",
            "Generates research points.",
            Generator,
            &[("energy", 200.0), ("metal", 80.0), ("population", 10.0)],
        )
        .size(2)
        .scaling(1.18)
        .produces(&[("research", 0.1)])
        .requires(needs_resource("population", 10.0)),
        Build::new(
            "quantum_computer",
            "Quantum Computer",
            "💻",
            "Advanced research facility.",
            Generator,
            &[("energy", 1000.0), ("metal", 300.0), ("crystals", 100.0)],
        )
        .size(3)
        .scaling(1.25)
        .produces(&[("research", 1.0)])
        .requires(needs_upgrade("research_lab", 5)),
        // Efficiency
        Build::new(
            "solar_efficiency_1",
            "Improved Solar Cells",
            "🔆",
            "Solar panels produce 50% more energy.",
            efficiency("solar_panel", 1.5),
            &[("energy", 100.0), ("metal", 20.0)],
        )
        .max(1)
        .requires(needs_upgrade("solar_panel", 5)),
        Build::new(
            "solar_efficiency_2",
            "High-Output Solar Cells",
            "🔆",
            "Solar panels produce another 100% more energy.",
            efficiency("solar_panel", 2.0),
            &[("energy", 500.0), ("metal", 100.0), ("crystals", 20.0)],
        )
        .max(1)
        .requires(needs_upgrade("solar_efficiency_1", 1)),
        Build::new(
            "water_efficiency",
            "Water Recycling",
            "♻️",
            "Doubles the output of water extractors.",
            efficiency("water_extractor", 2.0),
            &[("energy", 200.0), ("water", 100.0)],
        )
        .max(1)
        .requires(needs_upgrade("water_extractor", 5)),
        Build::new(
            "farming_automation",
            "Automated Farming",
            "🤖",
            "Doubles the output of hydroponic farms.",
            efficiency("hydroponic_farm", 2.0),
            &[("energy", 300.0), ("metal", 80.0), ("population", 15.0)],
        )
        .max(1)
        .requires(needs_upgrade("hydroponic_farm", 3)),
        // Click
        Build::new(
            "click_power_1",
            "Energy Amplifier I",
            "👆",
            "+1 energy per click.",
            Click { bonus: 1.0 },
            &[("energy", 50.0)],
        )
        .max(1),
        Build::new(
            "click_power_2",
            "Energy Amplifier II",
            "👆",
            "+2 energy per click.",
            Click { bonus: 2.0 },
            &[("energy", 200.0)],
        )
        .max(1)
        .requires(needs_upgrade("click_power_1", 1)),
        Build::new(
            "click_power_3",
            "Energy Amplifier III",
            "👆",
            "+5 energy per click.",
            Click { bonus: 5.0 },
            &[("energy", 1000.0), ("crystals", 20.0)],
        )
        .max(1)
        .requires(needs_upgrade("click_power_2", 1)),
        // Space
        Build::new(
            "expand_colony_1",
            "Colony Expansion I",
            "🏗️",
            "+5 build slots.",
            Space { increase: 5 },
            &[("energy", 100.0)],
        )
        .max(1),
        Build::new(
            "expand_colony_2",
            "Colony Expansion II",
            "🏗️",
            "+10 build slots.",
            Space { increase: 10 },
            &[("energy", 500.0), ("water", 100.0)],
        )
        .max(1)
        .requires(needs_upgrade("expand_colony_1", 1)),
        Build::new(
            "expand_colony_3",
            "Colony Expansion III",
            "🏗️",
            "+15 build slots.",
            Space { increase: 15 },
            &[("energy", 2000.0), ("metal", 200.0), ("water", 200.0)],
        )
        .max(1)
        .requires(needs_upgrade("expand_colony_2", 1)),
    ];
    rows.into_iter().map(|b| b.0).collect()
}
