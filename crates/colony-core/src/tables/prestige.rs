use crate::model::{PrestigeCategory, PrestigeEffect, PrestigeUpgradeDef};

/// Id of the upgrade that boosts prestige-point gain.
pub const PRESTIGE_GAIN: &str = "prestige_gain";

#[allow(clippy::too_many_arguments)]
fn upgrade(
    id: &str,
    name: &str,
    icon: &str,
    description: &str,
    category: PrestigeCategory,
    max_level: Option<u32>,
    (base_cost, cost_scaling): (f64, f64),
    effect: PrestigeEffect,
) -> PrestigeUpgradeDef {
    PrestigeUpgradeDef {
        id: id.into(),
        name: name.to_string(),
        icon: icon.to_string(),
        description: description.to_string(),
        category,
        max_level,
        base_cost,
        cost_scaling,
        effect,
    }
}

/// All prestige upgrade templates.
pub fn definitions() -> Vec<PrestigeUpgradeDef> {
    use PrestigeCategory as C;
    use PrestigeEffect as E;
    vec![
        upgrade(
            "production_boost",
            "Colonial Know-How",
            "🏭",
            "+10% to all production per level.",
            C::Production,
            None,
            (1.0, 2.0),
            E::GlobalProduction { per_level: 0.1 },
        ),
        upgrade(
            "energy_specialist",
            "Energy Specialist",
            "⚡",
            "+25% energy production per level.",
            C::Production,
            Some(10),
            (2.0, 1.8),
            E::ResourceProduction {
                resource: "energy".into(),
                per_level: 0.25,
            },
        ),
        upgrade(
            "building_efficiency",
            "Modular Construction",
            "🧱",
            "+5% building production per level.",
            C::Efficiency,
            Some(20),
            (3.0, 1.5),
            E::BuildingProduction { per_level: 0.05 },
        ),
        upgrade(
            "click_power",
            "Trained Hands",
            "👆",
            "+1 energy per click per level.",
            C::Utility,
            None,
            (1.0, 1.5),
            E::ClickPower { per_level: 1.0 },
        ),
        upgrade(
            "click_multiplier",
            "Reflex Boosters",
            "🖐️",
            "+10% click yield per level.",
            C::Utility,
            Some(10),
            (2.0, 2.0),
            E::ClickMultiplier { per_level: 0.1 },
        ),
        upgrade(
            "permanent_space",
            "Orbital Platforms",
            "🛰️",
            "+2 permanent build slots per level.",
            C::Unlock,
            Some(10),
            (5.0, 2.0),
            E::PermanentSpace { per_level: 2 },
        ),
        upgrade(
            PRESTIGE_GAIN,
            "Legacy",
            "🌟",
            "+20% prestige points per level.",
            C::Prestige,
            Some(10),
            (10.0, 2.5),
            E::PrestigeGain { per_level: 0.2 },
        ),
    ]
}
