use crate::game::effectiveness::TypeChart;
use schema::{Creature, StatEntry, StatKind, TypeName, TypeRelations};
use std::collections::BTreeSet;

/// A builder for test cards with every stat defaulting to absent.
///
/// # Example
/// ```ignore
/// let card = TestCreatureBuilder::new("pikachu", &["electric"])
///     .attack(55)
///     .defense(40)
///     .build();
/// ```
pub struct TestCreatureBuilder {
    name: String,
    types: Vec<TypeName>,
    stats: Vec<StatEntry>,
}

impl TestCreatureBuilder {
    pub fn new(name: &str, types: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            types: types.iter().map(|t| TypeName::new(*t)).collect(),
            stats: Vec::new(),
        }
    }

    pub fn stat(mut self, stat: StatKind, base: u16) -> Self {
        self.stats.retain(|entry| entry.stat != stat);
        self.stats.push(StatEntry { stat, base });
        self
    }

    pub fn attack(self, base: u16) -> Self {
        self.stat(StatKind::Attack, base)
    }

    pub fn defense(self, base: u16) -> Self {
        self.stat(StatKind::Defense, base)
    }

    pub fn build(self) -> Creature {
        Creature {
            sprite: Some(format!("https://sprites.test/{}.png", self.name)),
            name: self.name,
            types: self.types,
            stats: self.stats,
        }
    }
}

fn relations(name: &str, double: &[&str], half: &[&str], none: &[&str]) -> TypeRelations {
    let set = |names: &[&str]| -> BTreeSet<TypeName> { names.iter().map(|n| TypeName::new(*n)).collect() };
    TypeRelations {
        name: TypeName::new(name),
        double_damage_to: set(double),
        half_damage_to: set(half),
        no_damage_to: set(none),
    }
}

/// A slice of the real type chart, enough to cover every relation kind.
pub fn sample_chart() -> TypeChart {
    TypeChart::from_relations([
        relations("normal", &[], &["rock", "steel"], &["ghost"]),
        relations(
            "fire",
            &["grass", "ice", "bug", "steel"],
            &["fire", "water", "rock", "dragon"],
            &[],
        ),
        relations("water", &["fire", "ground", "rock"], &["water", "grass", "dragon"], &[]),
        relations(
            "grass",
            &["water", "ground", "rock"],
            &["fire", "grass", "poison", "flying", "bug", "dragon", "steel"],
            &[],
        ),
        relations("electric", &["water", "flying"], &["electric", "grass", "dragon"], &["ground"]),
        relations("ground", &["fire", "electric", "poison", "rock", "steel"], &["grass", "bug"], &["flying"]),
        relations("rock", &["fire", "ice", "flying", "bug"], &["fighting", "ground", "steel"], &[]),
        relations("bug", &["grass", "psychic", "dark"], &["fire", "fighting", "poison", "flying", "ghost", "steel"], &[]),
        relations("psychic", &["fighting", "poison"], &["psychic", "steel"], &["dark"]),
        relations("ghost", &["psychic", "ghost"], &["dark"], &["normal"]),
        relations("flying", &["grass", "fighting", "bug"], &["electric", "rock", "steel"], &[]),
        relations("poison", &["grass"], &["poison", "ground", "rock", "ghost"], &["steel"]),
        relations("dragon", &["dragon"], &["steel"], &[]),
    ])
}

/// Two six-card decks with varied types and stats.
pub fn sample_decks() -> (Vec<Creature>, Vec<Creature>) {
    let user = vec![
        TestCreatureBuilder::new("bulbasaur", &["grass", "poison"]).attack(49).defense(49).build(),
        TestCreatureBuilder::new("charmander", &["fire"]).attack(52).defense(43).build(),
        TestCreatureBuilder::new("squirtle", &["water"]).attack(48).defense(65).build(),
        TestCreatureBuilder::new("pikachu", &["electric"]).attack(55).defense(40).build(),
        TestCreatureBuilder::new("geodude", &["rock", "ground"]).attack(80).defense(100).build(),
        TestCreatureBuilder::new("gastly", &["ghost", "poison"]).attack(35).defense(30).build(),
    ];
    let opponent = vec![
        TestCreatureBuilder::new("oddish", &["grass", "poison"]).attack(50).defense(55).build(),
        TestCreatureBuilder::new("vulpix", &["fire"]).attack(41).defense(40).build(),
        TestCreatureBuilder::new("psyduck", &["water"]).attack(52).defense(48).build(),
        TestCreatureBuilder::new("diglett", &["ground"]).attack(55).defense(25).build(),
        TestCreatureBuilder::new("pidgey", &["normal", "flying"]).attack(45).defense(40).build(),
        TestCreatureBuilder::new("abra", &["psychic"]).attack(20).defense(15).build(),
    ];
    (user, opponent)
}
