use crate::game::effectiveness::{Effectiveness, TypeChart};
use schema::{Creature, StatKind};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

pub const DEFAULT_DAMAGE_SCALE: f64 = 50.0;

/// Simulated damage one card deals to the other.
///
/// A defense stat of zero would divide by zero; that case is `Overwhelming`
/// and beats every finite amount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Damage {
    Finite(f64),
    Overwhelming,
}

impl Damage {
    pub fn compare(&self, other: &Damage) -> Ordering {
        match (self, other) {
            (Damage::Finite(a), Damage::Finite(b)) => a.total_cmp(b),
            (Damage::Finite(_), Damage::Overwhelming) => Ordering::Less,
            (Damage::Overwhelming, Damage::Finite(_)) => Ordering::Greater,
            (Damage::Overwhelming, Damage::Overwhelming) => Ordering::Equal,
        }
    }

    /// Numeric value for ranking; `Overwhelming` maps to infinity.
    pub fn as_f64(&self) -> f64 {
        match self {
            Damage::Finite(value) => *value,
            Damage::Overwhelming => f64::INFINITY,
        }
    }
}

impl fmt::Display for Damage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Damage::Finite(value) => write!(f, "{:.1}", value),
            Damage::Overwhelming => write!(f, "overwhelming"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    AttackerWins,
    DefenderWins,
    Draw,
}

/// Everything the engine works out for one round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResolution {
    pub attacker_damage: Damage,
    pub defender_damage: Damage,
    pub attacker_multiplier: f64,
    pub defender_multiplier: f64,
    pub outcome: RoundOutcome,
}

impl RoundResolution {
    pub fn attacker_effectiveness(&self) -> Effectiveness {
        Effectiveness::from_multiplier(self.attacker_multiplier)
    }

    pub fn defender_effectiveness(&self) -> Effectiveness {
        Effectiveness::from_multiplier(self.defender_multiplier)
    }
}

/// Resolves a round at the standard damage scale of 50.
pub fn resolve_round(chart: &TypeChart, attacker: &Creature, defender: &Creature) -> RoundResolution {
    resolve_round_scaled(chart, attacker, defender, DEFAULT_DAMAGE_SCALE)
}

/// Pure: the same cards and chart always produce the same resolution.
pub fn resolve_round_scaled(
    chart: &TypeChart,
    attacker: &Creature,
    defender: &Creature,
    scale: f64,
) -> RoundResolution {
    let (attacker_damage, attacker_multiplier) = calculate_damage(chart, attacker, defender, scale);
    let (defender_damage, defender_multiplier) = calculate_damage(chart, defender, attacker, scale);

    let outcome = match attacker_damage.compare(&defender_damage) {
        Ordering::Greater => RoundOutcome::AttackerWins,
        Ordering::Less => RoundOutcome::DefenderWins,
        Ordering::Equal => RoundOutcome::Draw,
    };

    RoundResolution {
        attacker_damage,
        defender_damage,
        attacker_multiplier,
        defender_multiplier,
        outcome,
    }
}

/// `attack / defense * scale * effectiveness(primary type of source, target types)`.
///
/// Returns the damage together with the multiplier that went into it.
pub fn calculate_damage(
    chart: &TypeChart,
    source: &Creature,
    target: &Creature,
    scale: f64,
) -> (Damage, f64) {
    // A typeless card has no primary type to look up.
    let multiplier = source
        .primary_type()
        .map(|attacking| chart.effectiveness(attacking, &target.types))
        .unwrap_or(1.0);

    let attack = source.stat(StatKind::Attack);
    if multiplier == 0.0 || attack == 0 {
        return (Damage::Finite(0.0), multiplier);
    }

    let defense = target.stat(StatKind::Defense);
    if defense == 0 {
        return (Damage::Overwhelming, multiplier);
    }

    let damage = attack as f64 / defense as f64 * scale * multiplier;
    (Damage::Finite(damage), multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::tests::common::{sample_chart, TestCreatureBuilder};
    use rstest::rstest;

    #[test]
    fn test_super_effective_damage_example() {
        // 100 / 50 * 50 * 2 = 200
        let chart = sample_chart();
        let attacker = TestCreatureBuilder::new("charmander", &["fire"]).attack(100).build();
        let defender = TestCreatureBuilder::new("bulbasaur", &["grass"]).defense(50).build();

        let (damage, multiplier) = calculate_damage(&chart, &attacker, &defender, DEFAULT_DAMAGE_SCALE);
        assert_eq!(multiplier, 2.0);
        assert_eq!(damage, Damage::Finite(200.0));
    }

    #[test]
    fn test_resisted_damage_example() {
        // 50 / 100 * 50 * 0.5 = 12.5
        let chart = sample_chart();
        let attacker = TestCreatureBuilder::new("vulpix", &["fire"]).attack(50).build();
        let defender = TestCreatureBuilder::new("squirtle", &["water"]).defense(100).build();

        let (damage, _) = calculate_damage(&chart, &attacker, &defender, DEFAULT_DAMAGE_SCALE);
        assert_eq!(damage, Damage::Finite(12.5));
    }

    #[test]
    fn test_equal_damage_is_a_draw() {
        let chart = sample_chart();
        let left = TestCreatureBuilder::new("rattata", &["normal"]).attack(100).defense(50).build();
        let right = TestCreatureBuilder::new("meowth", &["normal"]).attack(100).defense(50).build();

        let resolution = resolve_round(&chart, &left, &right);
        assert_eq!(resolution.attacker_damage, Damage::Finite(100.0));
        assert_eq!(resolution.defender_damage, Damage::Finite(100.0));
        assert_eq!(resolution.outcome, RoundOutcome::Draw);
    }

    #[test]
    fn test_immune_attacker_never_wins() {
        let chart = sample_chart();
        let pikachu = TestCreatureBuilder::new("pikachu", &["electric"]).attack(200).defense(40).build();
        let diglett = TestCreatureBuilder::new("diglett", &["ground"]).attack(55).defense(25).build();

        let resolution = resolve_round(&chart, &pikachu, &diglett);
        assert_eq!(resolution.attacker_damage, Damage::Finite(0.0));
        assert_eq!(resolution.attacker_effectiveness(), Effectiveness::Immune);
        assert_eq!(resolution.outcome, RoundOutcome::DefenderWins);
    }

    #[test]
    fn test_immune_attacker_draws_against_zero_attack() {
        let chart = sample_chart();
        let pikachu = TestCreatureBuilder::new("pikachu", &["electric"]).attack(200).defense(40).build();
        let statue = TestCreatureBuilder::new("sudowoodo", &["ground"]).attack(0).defense(25).build();

        let resolution = resolve_round(&chart, &pikachu, &statue);
        assert_eq!(resolution.outcome, RoundOutcome::Draw);
    }

    #[test]
    fn test_zero_defense_is_overwhelming() {
        let chart = sample_chart();
        let attacker = TestCreatureBuilder::new("magikarp", &["water"]).attack(10).defense(55).build();
        let glass = TestCreatureBuilder::new("shuckle", &["bug"]).attack(250).build(); // no defense entry

        let resolution = resolve_round(&chart, &attacker, &glass);
        assert_eq!(resolution.attacker_damage, Damage::Overwhelming);
        assert!(matches!(resolution.defender_damage, Damage::Finite(_)));
        assert_eq!(resolution.outcome, RoundOutcome::AttackerWins);
    }

    #[test]
    fn test_both_zero_defense_is_a_draw() {
        let chart = sample_chart();
        let left = TestCreatureBuilder::new("a", &["normal"]).attack(10).build();
        let right = TestCreatureBuilder::new("b", &["normal"]).attack(99).build();

        let resolution = resolve_round(&chart, &left, &right);
        assert_eq!(resolution.outcome, RoundOutcome::Draw);
    }

    #[test]
    fn test_zero_attack_into_zero_defense_deals_nothing() {
        let chart = sample_chart();
        let harmless = TestCreatureBuilder::new("chansey", &["normal"]).attack(0).build(); // no defense entry
        let wall = TestCreatureBuilder::new("onix", &["normal"]).attack(0).defense(10).build();

        let resolution = resolve_round(&chart, &harmless, &wall);
        assert_eq!(resolution.attacker_damage, Damage::Finite(0.0));
        assert_eq!(resolution.defender_damage, Damage::Finite(0.0));
        assert_eq!(resolution.outcome, RoundOutcome::Draw);
    }

    #[test]
    fn test_immunity_beats_zero_defense() {
        let chart = sample_chart();
        let pikachu = TestCreatureBuilder::new("pikachu", &["electric"]).attack(55).defense(40).build();
        let undefended = TestCreatureBuilder::new("sandshrew", &["ground"]).attack(75).build();

        let (damage, multiplier) = calculate_damage(&chart, &pikachu, &undefended, DEFAULT_DAMAGE_SCALE);
        assert_eq!(multiplier, 0.0);
        assert_eq!(damage, Damage::Finite(0.0));
    }

    #[test]
    fn test_typeless_card_is_neutral() {
        let chart = sample_chart();
        let blank = TestCreatureBuilder::new("blank", &[]).attack(100).defense(100).build();
        let grass = TestCreatureBuilder::new("oddish", &["grass"]).attack(50).defense(100).build();

        let (damage, multiplier) = calculate_damage(&chart, &blank, &grass, DEFAULT_DAMAGE_SCALE);
        assert_eq!(multiplier, 1.0);
        assert_eq!(damage, Damage::Finite(50.0));
    }

    #[test]
    fn test_only_primary_type_attacks() {
        // Secondary fire type would be super effective against grass; only water counts.
        let chart = sample_chart();
        let dual = TestCreatureBuilder::new("dual", &["water", "fire"]).attack(100).defense(100).build();
        let grass = TestCreatureBuilder::new("bellsprout", &["grass"]).attack(100).defense(100).build();

        let resolution = resolve_round(&chart, &dual, &grass);
        assert_eq!(resolution.attacker_multiplier, 0.5);
        // Grass into water/fire: 2.0 * 0.5
        assert_eq!(resolution.defender_multiplier, 1.0);
        assert_eq!(resolution.outcome, RoundOutcome::DefenderWins);
    }

    #[test]
    fn test_pending_chart_resolves_on_stats_alone() {
        let attacker = TestCreatureBuilder::new("pikachu", &["electric"]).attack(60).defense(60).build();
        let defender = TestCreatureBuilder::new("diglett", &["ground"]).attack(30).defense(60).build();

        let resolution = resolve_round(&TypeChart::Pending, &attacker, &defender);
        assert_eq!(resolution.attacker_damage, Damage::Finite(50.0));
        assert_eq!(resolution.defender_damage, Damage::Finite(25.0));
        assert_eq!(resolution.outcome, RoundOutcome::AttackerWins);
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let chart = sample_chart();
        let attacker = TestCreatureBuilder::new("growlithe", &["fire"]).attack(70).defense(45).build();
        let defender = TestCreatureBuilder::new("poliwag", &["water"]).attack(50).defense(40).build();

        let first = resolve_round(&chart, &attacker, &defender);
        for _ in 0..10 {
            assert_eq!(resolve_round(&chart, &attacker, &defender), first);
        }
    }

    #[rstest]
    #[case(Damage::Finite(1.0), Damage::Finite(2.0), Ordering::Less)]
    #[case(Damage::Finite(2.0), Damage::Finite(2.0), Ordering::Equal)]
    #[case(Damage::Overwhelming, Damage::Finite(1e9), Ordering::Greater)]
    #[case(Damage::Finite(0.0), Damage::Overwhelming, Ordering::Less)]
    #[case(Damage::Overwhelming, Damage::Overwhelming, Ordering::Equal)]
    fn test_damage_ordering(#[case] left: Damage, #[case] right: Damage, #[case] expected: Ordering) {
        assert_eq!(left.compare(&right), expected);
    }
}
