//! Turns raw PokeAPI payloads into the minimal records the game uses.

use schema::{
    Creature, NamedResource, PokemonResponse, StatEntry, StatKind, TypeName, TypeRelations,
    TypeResponse,
};
use std::collections::BTreeSet;
use std::str::FromStr;

pub fn creature_from_response(response: PokemonResponse) -> Creature {
    let mut slots = response.types;
    slots.sort_by_key(|slot| slot.slot);
    let types = slots
        .into_iter()
        .map(|slot| TypeName::new(slot.type_.name))
        .collect();

    let stats = response
        .stats
        .into_iter()
        .filter_map(|slot| match StatKind::from_str(&slot.stat.name) {
            Ok(stat) => Some(StatEntry {
                stat,
                base: slot.base_stat,
            }),
            Err(_) => {
                tracing::debug!(stat = %slot.stat.name, pokemon = %response.name, "skipping unknown stat");
                None
            }
        })
        .collect();

    Creature {
        name: response.name,
        types,
        stats,
        sprite: response.sprites.front_default,
    }
}

pub fn relations_from_response(response: TypeResponse) -> TypeRelations {
    let relations = response.damage_relations;
    TypeRelations {
        name: TypeName::new(response.name),
        double_damage_to: names(relations.double_damage_to),
        half_damage_to: names(relations.half_damage_to),
        no_damage_to: names(relations.no_damage_to),
    }
}

pub fn type_members_from_response(response: TypeResponse) -> Vec<NamedResource> {
    let mut members = response.pokemon;
    members.sort_by_key(|member| member.pokemon.resource_id().unwrap_or(u32::MAX));
    members.into_iter().map(|member| member.pokemon).collect()
}

fn names(resources: Vec<NamedResource>) -> BTreeSet<TypeName> {
    resources
        .into_iter()
        .map(|resource| TypeName::new(resource.name))
        .collect()
}
