//! String identifiers for content-table entries.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Build an identifier from anything string-like.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the raw id.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

string_id!(
    /// Resource key, e.g. "energy", "crystals", "prestige".
    ResourceId
);
string_id!(
    /// Building or upgrade key, e.g. "solar_panel".
    UpgradeId
);
string_id!(
    /// Research project key, e.g. "colony_logistics".
    ResearchId
);
string_id!(
    /// Prestige upgrade key, e.g. "prestige_gain".
    PrestigeUpgradeId
);
string_id!(
    /// Achievement key, e.g. "first_energy".
    AchievementId
);

/// The resource that click upgrades always target.
pub const ENERGY: &str = "energy";
/// The resource that starts unlocked next to energy and survives a prestige unlocked.
pub const WATER: &str = "water";
/// The persistent prestige currency.
pub const PRESTIGE: &str = "prestige";

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn ids_lookup_by_str() {
        let mut m = BTreeMap::new();
        m.insert(ResourceId::from("energy"), 1.0);
        assert_eq!(m.get("energy"), Some(&1.0));
        assert!(!m.contains_key("water"));
    }

    #[test]
    fn ids_serialize_transparently() {
        let id = UpgradeId::new("solar_panel");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"solar_panel\"");
        let back: UpgradeId = serde_json::from_str("\"solar_panel\"").unwrap();
        assert_eq!(back, id);
        assert_eq!(back.to_string(), "solar_panel");
    }
}
