//! Raw PokeAPI response shapes.
//!
//! Only the fields the catalog and game read are declared; serde skips the
//! rest of each payload.

use serde::{Deserialize, Serialize};

/// A `{name, url}` reference, the way PokeAPI links one resource to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

impl NamedResource {
    /// Numeric id at the end of a resource URL, e.g. `.../pokemon/25/` -> 25.
    pub fn resource_id(&self) -> Option<u32> {
        self.url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .and_then(|segment| segment.parse().ok())
    }
}

/// `GET /pokemon?limit=L&offset=O`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonListResponse {
    pub count: u32,
    pub results: Vec<NamedResource>,
}

/// `GET /pokemon/{name}`
#[derive(Debug, Clone, Deserialize)]
pub struct PokemonResponse {
    pub name: String,
    pub types: Vec<PokemonTypeSlot>,
    pub stats: Vec<PokemonStatSlot>,
    pub sprites: Sprites,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PokemonTypeSlot {
    pub slot: u8,
    #[serde(rename = "type")]
    pub type_: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PokemonStatSlot {
    pub base_stat: u16,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sprites {
    pub front_default: Option<String>,
}

/// `GET /type`
#[derive(Debug, Clone, Deserialize)]
pub struct TypeListResponse {
    pub results: Vec<NamedResource>,
}

/// `GET /type/{name}` (or the `url` of a type list entry)
#[derive(Debug, Clone, Deserialize)]
pub struct TypeResponse {
    pub name: String,
    pub damage_relations: DamageRelations,
    #[serde(default)]
    pub pokemon: Vec<TypeMemberSlot>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DamageRelations {
    #[serde(default)]
    pub double_damage_to: Vec<NamedResource>,
    #[serde(default)]
    pub half_damage_to: Vec<NamedResource>,
    #[serde(default)]
    pub no_damage_to: Vec<NamedResource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeMemberSlot {
    pub slot: u8,
    pub pokemon: NamedResource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_id_is_read_from_trailing_segment() {
        let pikachu = NamedResource {
            name: "pikachu".to_string(),
            url: "https://pokeapi.co/api/v2/pokemon/25/".to_string(),
        };
        assert_eq!(pikachu.resource_id(), Some(25));

        let no_slash = NamedResource {
            name: "fire".to_string(),
            url: "https://pokeapi.co/api/v2/type/10".to_string(),
        };
        assert_eq!(no_slash.resource_id(), Some(10));

        let bogus = NamedResource {
            name: "x".to_string(),
            url: "https://pokeapi.co/api/v2/pokemon/".to_string(),
        };
        assert_eq!(bogus.resource_id(), None);
    }
}
