//! Card-picking behaviours for auto-played matches.

use crate::game::engine::{resolve_round_scaled, RoundOutcome};
use crate::game::session::GameSession;
use ordered_float::OrderedFloat;
use rand::Rng;

/// Damage values above this are all treated the same when ranking cards.
const DAMAGE_CAP: f64 = 1_000.0;

/// Anything that can decide which of the user's remaining cards to play.
pub trait Behavior {
    /// Index into the user's remaining deck, or `None` if no card can be chosen.
    fn choose_card(&mut self, session: &GameSession) -> Option<usize>;
}

/// Plays a uniformly random remaining card.
#[derive(Debug)]
pub struct RandomPick<R> {
    rng: R,
}

impl<R: Rng> RandomPick<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Behavior for RandomPick<R> {
    fn choose_card(&mut self, session: &GameSession) -> Option<usize> {
        let remaining = session.user_deck().len();
        (remaining > 0).then(|| self.rng.random_range(0..remaining))
    }
}

/// Plays the card that does best, on average, against whatever the opponent
/// might draw from its remaining deck.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScoringPick;

impl ScoringPick {
    pub fn new() -> Self {
        Self
    }

    /// Mean over the opponent's remaining cards of +1 per win, -1 per loss,
    /// plus a small damage-margin term to break ties between equal records.
    fn score_card(&self, index: usize, session: &GameSession) -> f64 {
        let Some(card) = session.user_deck().get(index) else {
            return f64::NEG_INFINITY;
        };
        let opponents = session.opponent_deck().cards();
        if opponents.is_empty() {
            return 0.0;
        }

        let total: f64 = opponents
            .iter()
            .map(|opponent| {
                let resolution = resolve_round_scaled(
                    session.chart(),
                    card,
                    opponent,
                    session.rules().damage_scale,
                );
                let record = match resolution.outcome {
                    RoundOutcome::AttackerWins => 1.0,
                    RoundOutcome::DefenderWins => -1.0,
                    RoundOutcome::Draw => 0.0,
                };
                let margin = resolution.attacker_damage.as_f64().min(DAMAGE_CAP)
                    - resolution.defender_damage.as_f64().min(DAMAGE_CAP);
                record + margin / (DAMAGE_CAP * 10.0)
            })
            .sum();

        total / opponents.len() as f64
    }
}

impl Behavior for ScoringPick {
    fn choose_card(&mut self, session: &GameSession) -> Option<usize> {
        (0..session.user_deck().len()).max_by_key(|&index| OrderedFloat(self.score_card(index, session)))
    }
}
