use super::{amounts, needs_research, needs_resource, needs_upgrade};
use crate::ids::ResourceId;
use crate::model::{Requirement, ResearchDef, ResearchEffect};

#[allow(clippy::too_many_arguments)]
fn project(
    id: &str,
    name: &str,
    icon: &str,
    description: &str,
    tier: u8,
    cost: &[(&str, f64)],
    effect: ResearchEffect,
    requires: Option<Requirement>,
) -> ResearchDef {
    ResearchDef {
        id: id.into(),
        name: name.to_string(),
        icon: icon.to_string(),
        description: description.to_string(),
        tier,
        cost: amounts(cost),
        effect,
        unlocked: requires.is_none(),
        requires,
    }
}

fn resource_boost(resource: &str, multiplier: f64) -> ResearchEffect {
    ResearchEffect::ProductionMultiplier {
        resource: resource.into(),
        multiplier,
    }
}

fn multi_boost(resources: &[&str], multiplier: f64) -> ResearchEffect {
    ResearchEffect::MultiResourceMultiplier {
        resources: resources.iter().map(|r| ResourceId::from(*r)).collect(),
        multiplier,
    }
}

fn building_boost(target: &str, multiplier: f64) -> ResearchEffect {
    ResearchEffect::BuildingSpecific {
        target: target.into(),
        multiplier,
    }
}

/// All research templates, ordered by tier.
pub fn definitions() -> Vec<ResearchDef> {
    use ResearchEffect::{ClickMultiplier, GlobalMultiplier};
    vec![
        // Tier 1
        project(
            "photovoltaics",
            "Photovoltaics",
            "☀️",
            "Energy production +25%.",
            1,
            &[("research", 10.0), ("energy", 200.0)],
            resource_boost("energy", 1.25),
            needs_resource("research", 1.0),
        ),
        project(
            "water_purification",
            "Water Purification",
            "💧",
            "Water production +25%.",
            1,
            &[("research", 10.0), ("water", 100.0)],
            resource_boost("water", 1.25),
            needs_resource("research", 1.0),
        ),
        project(
            "ergonomic_tools",
            "Ergonomic Tools",
            "👆",
            "Doubles the energy gained per click.",
            1,
            &[("research", 15.0)],
            ClickMultiplier { multiplier: 2.0 },
            needs_resource("research", 5.0),
        ),
        project(
            "colony_logistics",
            "Colony Logistics",
            "📦",
            "All production +10%.",
            1,
            &[("research", 25.0), ("energy", 500.0)],
            GlobalMultiplier { multiplier: 1.1 },
            needs_resource("research", 10.0),
        ),
        // Tier 2
        project(
            "genetic_crops",
            "Genetic Crops",
            "🧬",
            "Food and population production +50%.",
            2,
            &[("research", 60.0), ("food", 200.0)],
            multi_boost(&["food", "population"], 1.5),
            needs_research("water_purification"),
        ),
        project(
            "deep_core_mining",
            "Deep Core Mining",
            "⛏️",
            "Stone and metal production +50%.",
            2,
            &[("research", 80.0), ("metal", 100.0)],
            multi_boost(&["stone", "metal"], 1.5),
            needs_research("colony_logistics"),
        ),
        project(
            "crystal_resonance",
            "Crystal Resonance",
            "💎",
            "Crystal production +50%.",
            2,
            &[("research", 100.0), ("crystals", 30.0)],
            resource_boost("crystals", 1.5),
            needs_resource("crystals", 25.0),
        ),
        project(
            "neural_interface",
            "Neural Interface",
            "🧠",
            "Click energy +50%.",
            2,
            &[("research", 80.0), ("energy", 2000.0)],
            ClickMultiplier { multiplier: 1.5 },
            needs_research("ergonomic_tools"),
        ),
        // Tier 3
        project(
            "fusion_mastery",
            "Fusion Mastery",
            "⚛️",
            "Fusion reactors produce twice as much.",
            3,
            &[("research", 250.0), ("crystals", 100.0)],
            building_boost("fusion_reactor", 2.0),
            needs_upgrade("fusion_reactor", 1),
        ),
        project(
            "quantum_algorithms",
            "Quantum Algorithms",
            "💻",
            "Quantum computers produce twice as much.",
            3,
            &[("research", 300.0), ("crystals", 150.0)],
            building_boost("quantum_computer", 2.0),
            needs_upgrade("quantum_computer", 1),
        ),
        project(
            "planetary_grid",
            "Planetary Grid",
            "🌐",
            "All production +25%.",
            3,
            &[("research", 500.0), ("energy", 50_000.0), ("fuel", 50.0)],
            GlobalMultiplier { multiplier: 1.25 },
            needs_research("deep_core_mining"),
        ),
    ]
}
