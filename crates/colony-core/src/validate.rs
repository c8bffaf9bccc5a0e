//! Cross-reference checks for content tables.

use crate::ids::{ResearchId, ResourceId, UpgradeId};
use crate::model::{
    AchievementCondition, AchievementReward, Cost, PrestigeEffect, Requirement, ResearchEffect,
    UpgradeEffect,
};
use crate::ContentTables;
use std::collections::BTreeSet;
use thiserror::Error;

/// Validation errors for content-table invariants.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Two entries of one table share an id.
    #[error("duplicate id: {0}")]
    DuplicateId(String),
    /// A referenced resource does not exist.
    #[error("{owner} references unknown resource {resource}")]
    UnknownResource { owner: String, resource: String },
    /// A referenced upgrade does not exist.
    #[error("{owner} references unknown upgrade {upgrade}")]
    UnknownUpgrade { owner: String, upgrade: String },
    /// A referenced research project does not exist.
    #[error("{owner} references unknown research {research}")]
    UnknownResearch { owner: String, research: String },
    /// Cost growth below 1 would make later units cheaper.
    #[error("{0} has a cost scaling below 1")]
    ShrinkingCost(String),
    /// Costs, rates and multipliers must be finite and non-negative.
    #[error("{0} has a negative or non-finite number")]
    InvalidNumber(String),
}

struct Ids {
    resources: BTreeSet<ResourceId>,
    upgrades: BTreeSet<UpgradeId>,
    research: BTreeSet<ResearchId>,
}

impl Ids {
    fn resource(&self, owner: &str, resource: &ResourceId) -> Result<(), ValidationError> {
        if self.resources.contains(resource) {
            Ok(())
        } else {
            Err(ValidationError::UnknownResource {
                owner: owner.to_string(),
                resource: resource.to_string(),
            })
        }
    }

    fn upgrade(&self, owner: &str, upgrade: &UpgradeId) -> Result<(), ValidationError> {
        if self.upgrades.contains(upgrade) {
            Ok(())
        } else {
            Err(ValidationError::UnknownUpgrade {
                owner: owner.to_string(),
                upgrade: upgrade.to_string(),
            })
        }
    }

    fn requirement(&self, owner: &str, req: &Option<Requirement>) -> Result<(), ValidationError> {
        match req {
            None => Ok(()),
            Some(Requirement::Resource { resource, .. }) => self.resource(owner, resource),
            Some(Requirement::Upgrade { upgrade, .. }) => self.upgrade(owner, upgrade),
            Some(Requirement::Research { research }) => {
                if self.research.contains(research) {
                    Ok(())
                } else {
                    Err(ValidationError::UnknownResearch {
                        owner: owner.to_string(),
                        research: research.to_string(),
                    })
                }
            }
        }
    }

    fn amounts(&self, owner: &str, amounts: &Cost) -> Result<(), ValidationError> {
        for (resource, amount) in amounts {
            self.resource(owner, resource)?;
            number(owner, *amount)?;
        }
        Ok(())
    }
}

fn number(owner: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidNumber(owner.to_string()))
    }
}

fn unique<'a, I>(ids: I) -> Result<(), ValidationError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ValidationError::DuplicateId(id.to_string()));
        }
    }
    Ok(())
}

/// Validate every table, including cross-references between tables.
pub fn validate_tables(tables: &ContentTables) -> Result<(), ValidationError> {
    unique(tables.resources().iter().map(|d| d.id.as_str()))?;
    unique(tables.upgrades().iter().map(|d| d.id.as_str()))?;
    unique(tables.research().iter().map(|d| d.id.as_str()))?;
    unique(tables.prestige_upgrades().iter().map(|d| d.id.as_str()))?;
    unique(tables.achievements().iter().map(|d| d.id.as_str()))?;

    let ids = Ids {
        resources: tables.resources().iter().map(|d| d.id.clone()).collect(),
        upgrades: tables.upgrades().iter().map(|d| d.id.clone()).collect(),
        research: tables.research().iter().map(|d| d.id.clone()).collect(),
    };

    for r in tables.resources() {
        number(r.id.as_str(), r.start_amount)?;
        number(r.id.as_str(), r.click_value)?;
        ids.requirement(r.id.as_str(), &r.unlock)?;
    }

    for u in tables.upgrades() {
        let owner = u.id.as_str();
        if !(u.cost_scaling.is_finite() && u.cost_scaling >= 1.0) {
            return Err(ValidationError::ShrinkingCost(owner.to_string()));
        }
        ids.amounts(owner, &u.base_cost)?;
        ids.amounts(owner, &u.produces)?;
        ids.amounts(owner, &u.consumes)?;
        ids.requirement(owner, &u.requires)?;
        match &u.effect {
            UpgradeEffect::Efficiency { target, multiplier } => {
                ids.upgrade(owner, target)?;
                number(owner, *multiplier)?;
            }
            UpgradeEffect::Click { bonus } => number(owner, *bonus)?,
            UpgradeEffect::Generator | UpgradeEffect::Space { .. } | UpgradeEffect::Unlock => {}
        }
    }

    for r in tables.research() {
        let owner = r.id.as_str();
        ids.amounts(owner, &r.cost)?;
        ids.requirement(owner, &r.requires)?;
        match &r.effect {
            ResearchEffect::GlobalMultiplier { multiplier }
            | ResearchEffect::ClickMultiplier { multiplier } => number(owner, *multiplier)?,
            ResearchEffect::ProductionMultiplier {
                resource,
                multiplier,
            } => {
                ids.resource(owner, resource)?;
                number(owner, *multiplier)?;
            }
            ResearchEffect::MultiResourceMultiplier {
                resources,
                multiplier,
            } => {
                for resource in resources {
                    ids.resource(owner, resource)?;
                }
                number(owner, *multiplier)?;
            }
            ResearchEffect::BuildingSpecific { target, multiplier } => {
                ids.upgrade(owner, target)?;
                number(owner, *multiplier)?;
            }
        }
    }

    for p in tables.prestige_upgrades() {
        let owner = p.id.as_str();
        if !(p.cost_scaling.is_finite() && p.cost_scaling >= 1.0) {
            return Err(ValidationError::ShrinkingCost(owner.to_string()));
        }
        number(owner, p.base_cost)?;
        if let PrestigeEffect::ResourceProduction { resource, .. } = &p.effect {
            ids.resource(owner, resource)?;
        }
    }

    for a in tables.achievements() {
        let owner = a.id.as_str();
        match &a.condition {
            AchievementCondition::ResourceEarned { resource, .. }
            | AchievementCondition::ResourceAmount { resource, .. }
            | AchievementCondition::ResourceAmountWithin { resource, .. } => {
                ids.resource(owner, resource)?
            }
            AchievementCondition::UpgradeCount { upgrade, .. } => ids.upgrade(owner, upgrade)?,
            _ => {}
        }
        if let Some(AchievementReward::ResourceGrant { resource, amount }) = &a.reward {
            ids.resource(owner, resource)?;
            number(owner, *amount)?;
        }
    }
    Ok(())
}
