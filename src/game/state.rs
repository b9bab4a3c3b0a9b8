use crate::game::engine::{Damage, RoundOutcome, RoundResolution};
use schema::Creature;
use serde::{Deserialize, Serialize};
use std::time::Instant;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    AwaitingSelection,
    RoundResolving,
    RoundDisplay,
    MatchComplete,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    User,
    Opponent,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchVerdict {
    UserWins,
    OpponentWins,
    Tie,
}

impl MatchVerdict {
    pub fn message(&self) -> &'static str {
        match self {
            MatchVerdict::UserWins => "You Win!",
            MatchVerdict::OpponentWins => "PC Wins!",
            MatchVerdict::Tie => "It's a Tie!",
        }
    }
}

/// One side's remaining cards. Cards only ever leave a deck.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Deck {
    cards: Vec<Creature>,
}

impl Deck {
    pub fn new(cards: Vec<Creature>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Creature] {
        &self.cards
    }

    pub fn get(&self, index: usize) -> Option<&Creature> {
        self.cards.get(index)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.cards.iter().position(|card| card.name == name)
    }

    /// Removes the card that competed, by name, so an index captured before
    /// the dwell can't go stale.
    pub(crate) fn remove_named(&mut self, name: &str) -> Option<Creature> {
        self.position(name).map(|index| self.cards.remove(index))
    }
}

/// Cumulative score and round counter for a match.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchState {
    pub user_score: u32,
    pub opponent_score: u32,
    pub draws: u32,
    pub round: u32, // 1-indexed; the match is over once this passes rounds_total
    pub rounds_total: u32,
}

impl MatchState {
    pub fn new(rounds_total: u32) -> Self {
        Self {
            user_score: 0,
            opponent_score: 0,
            draws: 0,
            round: 1,
            rounds_total,
        }
    }

    pub fn completed_rounds(&self) -> u32 {
        self.round - 1
    }

    pub fn is_complete(&self) -> bool {
        self.round > self.rounds_total
    }

    pub(crate) fn record(&mut self, winner: Option<Side>) {
        match winner {
            Some(Side::User) => self.user_score += 1,
            Some(Side::Opponent) => self.opponent_score += 1,
            None => self.draws += 1,
        }
        self.round += 1;
    }

    pub fn verdict(&self) -> Option<MatchVerdict> {
        if !self.is_complete() {
            return None;
        }
        Some(match self.user_score.cmp(&self.opponent_score) {
            std::cmp::Ordering::Greater => MatchVerdict::UserWins,
            std::cmp::Ordering::Less => MatchVerdict::OpponentWins,
            std::cmp::Ordering::Equal => MatchVerdict::Tie,
        })
    }
}

/// What happened in one round, from the user's point of view. The user's card
/// is the attacker in the engine's terms.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RoundReport {
    pub round: u32,
    pub user_card: String,
    pub opponent_card: String,
    pub user_damage: Damage,
    pub opponent_damage: Damage,
    pub user_multiplier: f64,
    pub opponent_multiplier: f64,
    pub winner: Option<Side>,
}

impl RoundReport {
    pub fn from_resolution(
        round: u32,
        user_card: &Creature,
        opponent_card: &Creature,
        resolution: &RoundResolution,
    ) -> Self {
        let winner = match resolution.outcome {
            RoundOutcome::AttackerWins => Some(Side::User),
            RoundOutcome::DefenderWins => Some(Side::Opponent),
            RoundOutcome::Draw => None,
        };
        Self {
            round,
            user_card: user_card.name.clone(),
            opponent_card: opponent_card.name.clone(),
            user_damage: resolution.attacker_damage,
            opponent_damage: resolution.defender_damage,
            user_multiplier: resolution.attacker_multiplier,
            opponent_multiplier: resolution.defender_multiplier,
            winner,
        }
    }

    pub fn outcome_text(&self) -> &'static str {
        match self.winner {
            Some(Side::User) => "User wins this round!",
            Some(Side::Opponent) => "PC wins this round!",
            None => "It's a draw!",
        }
    }
}

/// The round currently on display. The competing cards stay in their decks
/// until the display window closes.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundState {
    pub user_card: Creature,
    pub opponent_card: Creature,
    pub report: RoundReport,
    pub reveal_until: Instant,
}

/// Result of a selection attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectOutcome {
    /// The round resolved and is now on display.
    Resolved(RoundReport),
    /// The type chart has not loaded yet; nothing changed.
    Ignored,
}
