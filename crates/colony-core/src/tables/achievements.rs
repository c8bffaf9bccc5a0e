use crate::model::{AchievementCategory, AchievementCondition, AchievementDef};

fn earned(resource: &str, amount: f64) -> AchievementCondition {
    AchievementCondition::ResourceEarned {
        resource: resource.into(),
        amount,
    }
}

fn stock(resource: &str, amount: f64) -> AchievementCondition {
    AchievementCondition::ResourceAmount {
        resource: resource.into(),
        amount,
    }
}

fn owned(upgrade: &str, count: u32) -> AchievementCondition {
    AchievementCondition::UpgradeCount {
        upgrade: upgrade.into(),
        count,
    }
}

fn row(
    id: &str,
    name: &str,
    icon: &str,
    description: &str,
    category: AchievementCategory,
    condition: AchievementCondition,
) -> AchievementDef {
    AchievementDef {
        id: id.into(),
        name: name.to_string(),
        icon: icon.to_string(),
        description: description.to_string(),
        category,
        hidden: matches!(id, "night_owl" | "lucky_number"),
        condition,
        reward: None,
    }
}

/// All achievement templates. None of them carries a reward; the reward
/// slot is there for custom tables.
pub fn definitions() -> Vec<AchievementDef> {
    use AchievementCategory as Cat;
    use AchievementCondition as C;
    vec![
        // Resource milestones
        row(
            "first_energy",
            "First Spark",
            "⚡",
            "Collect your first energy",
            Cat::Collector,
            earned("energy", 1.0),
        ),
        row(
            "energy_100",
            "Energy Collector",
            "⚡",
            "Collect 100 energy",
            Cat::Collector,
            earned("energy", 100.0),
        ),
        row(
            "energy_1k",
            "Energy Master",
            "⚡",
            "Collect 1,000 energy",
            Cat::Collector,
            earned("energy", 1_000.0),
        ),
        row(
            "energy_1m",
            "Energy Titan",
            "⚡",
            "Collect 1,000,000 energy",
            Cat::Collector,
            earned("energy", 1_000_000.0),
        ),
        row(
            "water_100",
            "Water Collector",
            "💧",
            "Collect 100 water",
            Cat::Collector,
            earned("water", 100.0),
        ),
        row(
            "food_100",
            "First Farmer",
            "🌾",
            "Produce 100 food",
            Cat::Collector,
            earned("food", 100.0),
        ),
        row(
            "population_10",
            "Small Community",
            "👥",
            "Reach 10 colonists",
            Cat::Collector,
            stock("population", 10.0),
        ),
        row(
            "population_50",
            "Thriving Colony",
            "👥",
            "Reach 50 colonists",
            Cat::Collector,
            stock("population", 50.0),
        ),
        row(
            "population_100",
            "Metropolis",
            "🌇",
            "Reach 100 colonists",
            Cat::Collector,
            stock("population", 100.0),
        ),
        row(
            "metal_500",
            "Industrialist",
            "🔩",
            "Collect 500 metal",
            Cat::Collector,
            earned("metal", 500.0),
        ),
        row(
            "crystals_100",
            "Crystal Hunter",
            "💎",
            "Collect 100 crystals",
            Cat::Collector,
            earned("crystals", 100.0),
        ),
        row(
            "fuel_50",
            "Rocket Fuel",
            "⛽",
            "Produce 50 fuel",
            Cat::Collector,
            earned("fuel", 50.0),
        ),
        row(
            "research_100",
            "Scholar",
            "🔬",
            "Collect 100 research points",
            Cat::Collector,
            earned("research", 100.0),
        ),
        // Buildings
        row(
            "first_building",
            "First Builder",
            "🏗️",
            "Buy your first building",
            Cat::Building,
            C::TotalBuildings { count: 1 },
        ),
        row(
            "buildings_10",
            "Architect",
            "🏛️",
            "Own 10 buildings",
            Cat::Building,
            C::TotalBuildings { count: 10 },
        ),
        row(
            "buildings_50",
            "City Planner",
            "🏙️",
            "Own 50 buildings",
            Cat::Building,
            C::TotalBuildings { count: 50 },
        ),
        row(
            "solar_power",
            "Solar Power",
            "☀️",
            "Own 10 solar panels",
            Cat::Building,
            owned("solar_panel", 10),
        ),
        row(
            "fusion_pioneer",
            "Fusion Pioneer",
            "⚛️",
            "Build your first fusion reactor",
            Cat::Building,
            owned("fusion_reactor", 1),
        ),
        row(
            "farming_empire",
            "Farming Empire",
            "🌾",
            "Own 5 hydroponic farms",
            Cat::Building,
            owned("hydroponic_farm", 5),
        ),
        row(
            "research_complex",
            "Research Complex",
            "🔬",
            "Own 3 research labs",
            Cat::Building,
            owned("research_lab", 3),
        ),
        // Research
        row(
            "first_research",
            "First Discovery",
            "💡",
            "Complete your first research",
            Cat::Research,
            C::ResearchCompleted { count: 1 },
        ),
        row(
            "researcher",
            "Researcher",
            "🔬",
            "Complete 5 research projects",
            Cat::Research,
            C::ResearchCompleted { count: 5 },
        ),
        row(
            "scientist",
            "Scientist",
            "🧑‍🔬",
            "Complete 10 research projects",
            Cat::Research,
            C::ResearchCompleted { count: 10 },
        ),
        row(
            "tier1_complete",
            "Foundations",
            "✅",
            "Complete every tier 1 research",
            Cat::Research,
            C::ResearchTierComplete { tier: 1 },
        ),
        row(
            "tier2_complete",
            "Advanced Technology",
            "✅",
            "Complete every tier 2 research",
            Cat::Research,
            C::ResearchTierComplete { tier: 2 },
        ),
        row(
            "tier3_complete",
            "Advanced Civilization",
            "🌠",
            "Complete every tier 3 research",
            Cat::Research,
            C::ResearchTierComplete { tier: 3 },
        ),
        // Special
        row(
            "click_master",
            "Click Master",
            "👆",
            "Click 1,000 times",
            Cat::Clicker,
            C::TotalClicks { count: 1_000 },
        ),
        row(
            "full_space",
            "Full Capacity",
            "🏭",
            "Fill every build slot",
            Cat::Special,
            C::SpaceFull,
        ),
        row(
            "night_owl",
            "Night Owl",
            "🦉",
            "Play between 2 and 4 at night",
            Cat::Special,
            C::LocalHourWithin { start: 2, end: 4 },
        ),
        row(
            "lucky_number",
            "Lucky Number",
            "🍀",
            "Hold exactly 777 energy",
            Cat::Special,
            C::ResourceAmountWithin {
                resource: "energy".into(),
                min: 777.0,
                max: 778.0,
            },
        ),
        // Prestige
        row(
            "first_prestige",
            "New Horizons",
            "🌟",
            "Prestige for the first time",
            Cat::Prestige,
            C::PrestigeCount { count: 1 },
        ),
        row(
            "prestige_5",
            "Multiverse Explorer",
            "🌌",
            "Prestige 5 times",
            Cat::Prestige,
            C::PrestigeCount { count: 5 },
        ),
        row(
            "prestige_10",
            "Time Traveler",
            "⏰",
            "Prestige 10 times",
            Cat::Prestige,
            C::PrestigeCount { count: 10 },
        ),
        row(
            "prestige_points_100",
            "Prestige Collector",
            "🌟",
            "Earn 100 prestige points in total",
            Cat::Prestige,
            C::TotalPrestigePoints { amount: 100.0 },
        ),
    ]
}
