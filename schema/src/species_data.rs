use crate::TypeName;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The six base statistics PokeAPI reports for every Pokemon.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
pub enum StatKind {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatEntry {
    pub stat: StatKind,
    pub base: u16,
}

/// A Pokemon as the game and catalog see it: the minimal normalized shape of
/// a `GET /pokemon/{name}` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creature {
    pub name: String,
    pub types: Vec<TypeName>, // slot order, primary type first
    pub stats: Vec<StatEntry>,
    pub sprite: Option<String>,
}

impl Creature {
    /// Base value of a stat, or 0 when the record has no entry for it.
    pub fn stat(&self, kind: StatKind) -> u16 {
        self.stats
            .iter()
            .find(|entry| entry.stat == kind)
            .map(|entry| entry.base)
            .unwrap_or(0)
    }

    pub fn primary_type(&self) -> Option<&TypeName> {
        self.types.first()
    }

    /// Name with the first letter upper-cased, as shown on cards.
    pub fn display_name(&self) -> String {
        capitalize(&self.name)
    }
}

pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
