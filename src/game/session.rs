use crate::config::MatchRules;
use crate::errors::{SessionError, SessionResult};
use crate::game::draw::OpponentDraw;
use crate::game::effectiveness::TypeChart;
use crate::game::engine::resolve_round_scaled;
use crate::game::state::{
    Deck, GamePhase, MatchState, MatchVerdict, RoundReport, RoundState, SelectOutcome,
};
use schema::Creature;
use std::time::Instant;

/// Owns all mutable state of one match and moves it through
/// `AwaitingSelection -> RoundResolving -> RoundDisplay -> ...`.
///
/// Time is passed in rather than read, so the display window can be driven by
/// a real timer or stepped by hand.
#[derive(Debug, Clone)]
pub struct GameSession {
    user_deck: Deck,
    opponent_deck: Deck,
    chart: TypeChart,
    rules: MatchRules,
    match_state: MatchState,
    phase: GamePhase,
    current_round: Option<RoundState>,
}

impl GameSession {
    pub fn new(
        user_cards: Vec<Creature>,
        opponent_cards: Vec<Creature>,
        chart: TypeChart,
        rules: MatchRules,
    ) -> SessionResult<Self> {
        for (side, cards) in [("user", &user_cards), ("opponent", &opponent_cards)] {
            if cards.len() != rules.deck_size {
                return Err(SessionError::InvalidDeck {
                    side,
                    actual: cards.len(),
                    expected: rules.deck_size,
                });
            }
        }

        // One card leaves each deck per round, so more rounds than cards can't be played.
        let rounds_total = rules.rounds.min(rules.deck_size as u32);
        let phase = if rounds_total == 0 {
            GamePhase::MatchComplete
        } else {
            GamePhase::AwaitingSelection
        };

        tracing::info!(
            deck_size = rules.deck_size,
            rounds = rounds_total,
            chart_loaded = chart.is_loaded(),
            "new match"
        );

        Ok(Self {
            user_deck: Deck::new(user_cards),
            opponent_deck: Deck::new(opponent_cards),
            chart,
            rules,
            match_state: MatchState::new(rounds_total),
            phase,
            current_round: None,
        })
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn match_state(&self) -> &MatchState {
        &self.match_state
    }

    pub fn user_deck(&self) -> &Deck {
        &self.user_deck
    }

    pub fn opponent_deck(&self) -> &Deck {
        &self.opponent_deck
    }

    pub fn current_round(&self) -> Option<&RoundState> {
        self.current_round.as_ref()
    }

    pub fn chart(&self) -> &TypeChart {
        &self.chart
    }

    pub fn rules(&self) -> &MatchRules {
        &self.rules
    }

    pub fn is_complete(&self) -> bool {
        self.phase == GamePhase::MatchComplete
    }

    pub fn verdict(&self) -> Option<MatchVerdict> {
        if self.is_complete() {
            self.match_state.verdict()
        } else {
            None
        }
    }

    /// Supplies the category table once its fetch finishes.
    pub fn load_chart(&mut self, chart: TypeChart) {
        tracing::debug!(loaded = chart.is_loaded(), "type chart supplied to session");
        self.chart = chart;
    }

    /// The user plays the card at `user_index`. The opponent's card is drawn
    /// from `draw`, the round is resolved, and the result is put on display
    /// until `now + dwell`.
    pub fn select<D>(
        &mut self,
        user_index: usize,
        draw: &mut D,
        now: Instant,
    ) -> SessionResult<SelectOutcome>
    where
        D: OpponentDraw + ?Sized,
    {
        match self.phase {
            GamePhase::AwaitingSelection => {}
            GamePhase::RoundResolving | GamePhase::RoundDisplay => {
                return Err(SessionError::RoundInFlight)
            }
            GamePhase::MatchComplete => return Err(SessionError::MatchComplete),
        }

        if !self.chart.is_loaded() {
            tracing::debug!(user_index, "selection ignored: type chart not loaded");
            return Ok(SelectOutcome::Ignored);
        }

        let user_card = self
            .user_deck
            .get(user_index)
            .cloned()
            .ok_or(SessionError::InvalidSelection {
                index: user_index,
                remaining: self.user_deck.len(),
            })?;

        // Decks shrink together, so this only trips on a corrupted session.
        if self.opponent_deck.is_empty() {
            return Err(SessionError::MatchComplete);
        }

        self.phase = GamePhase::RoundResolving;
        let opponent_index = draw.draw_index(self.opponent_deck.len());
        let opponent_card = match self.opponent_deck.get(opponent_index) {
            Some(card) => card.clone(),
            None => {
                self.phase = GamePhase::AwaitingSelection;
                return Err(SessionError::InvalidSelection {
                    index: opponent_index,
                    remaining: self.opponent_deck.len(),
                });
            }
        };

        let resolution =
            resolve_round_scaled(&self.chart, &user_card, &opponent_card, self.rules.damage_scale);
        let report = RoundReport::from_resolution(
            self.match_state.round,
            &user_card,
            &opponent_card,
            &resolution,
        );

        tracing::info!(
            round = report.round,
            user = %report.user_card,
            opponent = %report.opponent_card,
            user_damage = %report.user_damage,
            opponent_damage = %report.opponent_damage,
            "{}",
            report.outcome_text()
        );

        self.current_round = Some(RoundState {
            user_card,
            opponent_card,
            report: report.clone(),
            reveal_until: now + self.rules.dwell(),
        });
        self.phase = GamePhase::RoundDisplay;

        Ok(SelectOutcome::Resolved(report))
    }

    /// Finishes the round on display if its window has closed by `now`.
    pub fn advance(&mut self, now: Instant) -> Option<RoundReport> {
        let due = self
            .current_round
            .as_ref()
            .is_some_and(|round| now >= round.reveal_until);
        if due {
            self.finish_round()
        } else {
            None
        }
    }

    /// Finishes the round on display immediately: both competing cards leave
    /// their decks, the score and round counter move on, the selection clears.
    pub fn finish_round(&mut self) -> Option<RoundReport> {
        let round = self.current_round.take()?;

        self.user_deck.remove_named(&round.user_card.name);
        self.opponent_deck.remove_named(&round.opponent_card.name);
        self.match_state.record(round.report.winner);

        self.phase = if self.match_state.is_complete() {
            tracing::info!(
                user_score = self.match_state.user_score,
                opponent_score = self.match_state.opponent_score,
                "match complete"
            );
            GamePhase::MatchComplete
        } else {
            GamePhase::AwaitingSelection
        };

        tracing::debug!(
            round = self.match_state.round,
            user_remaining = self.user_deck.len(),
            opponent_remaining = self.opponent_deck.len(),
            "round finished"
        );

        Some(round.report)
    }
}
