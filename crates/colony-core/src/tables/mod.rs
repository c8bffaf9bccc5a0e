//! The built-in Space Colonies content.

pub mod achievements;
pub mod prestige;
pub mod research;
pub mod resources;
pub mod upgrades;

use crate::ids::{ResearchId, ResourceId, UpgradeId};
use crate::model::{Cost, Requirement};

fn amounts(pairs: &[(&str, f64)]) -> Cost {
    pairs
        .iter()
        .map(|(id, amount)| (ResourceId::from(*id), *amount))
        .collect()
}

fn needs_resource(resource: &str, amount: f64) -> Option<Requirement> {
    Some(Requirement::Resource {
        resource: resource.into(),
        amount,
    })
}

fn needs_upgrade(upgrade: &str, count: u32) -> Option<Requirement> {
    Some(Requirement::Upgrade {
        upgrade: UpgradeId::from(upgrade),
        count,
    })
}

fn needs_research(research: &str) -> Option<Requirement> {
    Some(Requirement::Research {
        research: ResearchId::from(research),
    })
}
