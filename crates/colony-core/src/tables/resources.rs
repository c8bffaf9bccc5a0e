use super::needs_resource;
use crate::model::{ResourceCategory, ResourceDef};

struct Row {
    id: &'static str,
    name: &'static str,
    icon: &'static str,
    description: &'static str,
    start_amount: f64,
    category: ResourceCategory,
    click_value: f64,
    unlock_after: Option<(&'static str, f64)>,
    persistent: bool,
}

const ROWS: &[Row] = &[
    Row {
        id: "energy",
        name: "Energy",
        icon: "⚡",
        description: "Basic power for every system. Click to collect energy!",
        start_amount: 10.0,
        category: ResourceCategory::Basic,
        click_value: 1.0,
        unlock_after: None,
        persistent: false,
    },
    Row {
        id: "water",
        name: "Water",
        icon: "💧",
        description: "Vital water for the colony, extracted with energy.",
        start_amount: 0.0,
        category: ResourceCategory::Basic,
        click_value: 0.0,
        unlock_after: None,
        persistent: false,
    },
    Row {
        id: "food",
        name: "Food",
        icon: "🌾",
        description: "Feeds the growing population. Needs water to grow.",
        start_amount: 0.0,
        category: ResourceCategory::Basic,
        click_value: 0.0,
        unlock_after: Some(("water", 10.0)),
        persistent: false,
    },
    Row {
        id: "population",
        name: "Population",
        icon: "👥",
        description: "Colonists who work and produce. Grows with enough food.",
        start_amount: 0.0,
        category: ResourceCategory::Advanced,
        click_value: 0.0,
        unlock_after: Some(("food", 20.0)),
        persistent: false,
    },
    Row {
        id: "stone",
        name: "Stone",
        icon: "🪨",
        description: "Raw rock that refineries turn into metal.",
        start_amount: 0.0,
        category: ResourceCategory::Basic,
        click_value: 0.0,
        unlock_after: Some(("population", 5.0)),
        persistent: false,
    },
    Row {
        id: "metal",
        name: "Metal",
        icon: "🔩",
        description: "Processed metal for advanced structures.",
        start_amount: 0.0,
        category: ResourceCategory::Basic,
        click_value: 0.0,
        unlock_after: Some(("stone", 50.0)),
        persistent: false,
    },
    Row {
        id: "crystals",
        name: "Crystals",
        icon: "💎",
        description: "Rare crystals with unusual properties.",
        start_amount: 0.0,
        category: ResourceCategory::Basic,
        click_value: 0.0,
        unlock_after: Some(("metal", 100.0)),
        persistent: false,
    },
    Row {
        id: "fuel",
        name: "Fuel",
        icon: "⛽",
        description: "High-energy fuel for ships and expansion.",
        start_amount: 0.0,
        category: ResourceCategory::Advanced,
        click_value: 0.0,
        unlock_after: Some(("crystals", 50.0)),
        persistent: false,
    },
    Row {
        id: "research",
        name: "Research",
        icon: "🔬",
        description: "Points spent on technological progress.",
        start_amount: 0.0,
        category: ResourceCategory::Advanced,
        click_value: 0.0,
        unlock_after: Some(("population", 5.0)),
        persistent: false,
    },
    Row {
        id: "prestige",
        name: "Prestige Points",
        icon: "🌟",
        description: "Permanent points kept across resets.",
        start_amount: 0.0,
        category: ResourceCategory::Special,
        click_value: 0.0,
        unlock_after: Some(("energy", 1_000_000.0)),
        persistent: true,
    },
];

/// All resource templates in display order.
pub fn definitions() -> Vec<ResourceDef> {
    ROWS.iter()
        .map(|r| ResourceDef {
            id: r.id.into(),
            name: r.name.to_string(),
            icon: r.icon.to_string(),
            description: r.description.to_string(),
            start_amount: r.start_amount,
            unlocked: r.unlock_after.is_none(),
            unlock: r
                .unlock_after
                .and_then(|(resource, amount)| needs_resource(resource, amount)),
            category: r.category,
            click_value: r.click_value,
            persistent: r.persistent,
        })
        .collect()
}
