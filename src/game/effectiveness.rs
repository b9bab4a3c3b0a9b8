use schema::{TypeName, TypeRelations};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The category table: damage relations for every attacking type.
///
/// `Pending` is the table before its fetch has finished. Lookups against it
/// degrade to a neutral multiplier instead of failing.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum TypeChart {
    #[default]
    Pending,
    Loaded(HashMap<TypeName, TypeRelations>),
}

/// Coarse classification of a damage multiplier, used for battle text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effectiveness {
    Immune,
    NotVeryEffective,
    Neutral,
    SuperEffective,
}

impl Effectiveness {
    pub fn from_multiplier(multiplier: f64) -> Self {
        if multiplier == 0.0 {
            Effectiveness::Immune
        } else if multiplier < 1.0 {
            Effectiveness::NotVeryEffective
        } else if multiplier > 1.0 {
            Effectiveness::SuperEffective
        } else {
            Effectiveness::Neutral
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            Effectiveness::Immune => Some("It had no effect..."),
            Effectiveness::NotVeryEffective => Some("It's not very effective..."),
            Effectiveness::Neutral => None,
            Effectiveness::SuperEffective => Some("It's super effective!"),
        }
    }
}

impl TypeChart {
    pub fn from_relations(relations: impl IntoIterator<Item = TypeRelations>) -> Self {
        TypeChart::Loaded(
            relations
                .into_iter()
                .map(|relation| (relation.name.clone(), relation))
                .collect(),
        )
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, TypeChart::Loaded(_))
    }

    pub fn relations(&self, type_name: &TypeName) -> Option<&TypeRelations> {
        match self {
            TypeChart::Pending => None,
            TypeChart::Loaded(table) => table.get(type_name),
        }
    }

    pub fn type_names(&self) -> Vec<&TypeName> {
        match self {
            TypeChart::Pending => Vec::new(),
            TypeChart::Loaded(table) => {
                let mut names: Vec<_> = table.keys().collect();
                names.sort();
                names
            }
        }
    }

    /// Damage multiplier of `attacking` against a defender with `defending`
    /// types. Factors for each defending type multiply together.
    pub fn effectiveness(&self, attacking: &TypeName, defending: &[TypeName]) -> f64 {
        let relations = match self {
            TypeChart::Pending => return 1.0,
            TypeChart::Loaded(table) => match table.get(attacking) {
                Some(relations) => relations,
                None => {
                    tracing::debug!(%attacking, "attacking type missing from chart, treating as neutral");
                    return 1.0;
                }
            },
        };

        defending
            .iter()
            .map(|defender| relations.multiplier_against(defender))
            .product()
    }
}
