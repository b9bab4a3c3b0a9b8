use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A type (category) identifier as PokeAPI names it, e.g. `"fire"`.
///
/// Kept as an open string rather than a closed enum: PokeAPI adds types over
/// time (`fairy`, `stellar`, ...) and the damage relations arrive as data.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TypeName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Damage relations of one attacking type against defending types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRelations {
    pub name: TypeName,
    pub double_damage_to: BTreeSet<TypeName>,
    pub half_damage_to: BTreeSet<TypeName>,
    pub no_damage_to: BTreeSet<TypeName>,
}

impl Default for TypeName {
    fn default() -> Self {
        Self::new("unknown")
    }
}

impl TypeRelations {
    pub fn new(name: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Multiplier against a single defending type.
    ///
    /// Sets are checked double, then half, then none; the first hit wins even
    /// if a malformed table lists the defender in more than one set.
    pub fn multiplier_against(&self, defending: &TypeName) -> f64 {
        if self.double_damage_to.contains(defending) {
            2.0
        } else if self.half_damage_to.contains(defending) {
            0.5
        } else if self.no_damage_to.contains(defending) {
            0.0
        } else {
            1.0
        }
    }
}
