//! Text rendering shared by the CLI and the MCP server.
//!
//! Everything here turns library state into plain strings; nothing prints or
//! mutates a session.

use crate::catalog::CatalogPage;
use crate::game::effectiveness::Effectiveness;
use crate::game::runner::MatchSummary;
use crate::game::session::GameSession;
use crate::game::state::{Deck, GamePhase, MatchState, RoundReport};
use schema::{capitalize, Creature, StatKind};
use strum::IntoEnumIterator;

const NO_GAME: &str = "No game is currently active. Use 'start_game' to begin.";

pub fn no_game_message() -> &'static str {
    NO_GAME
}

/// One page of the Pokemon list, with navigation hints.
pub fn render_catalog_page(page: &CatalogPage) -> String {
    let mut output = match &page.type_filter {
        Some(type_name) => format!("--- {} Pokemon ---\n", capitalize(type_name.as_str())),
        None => String::from("--- Pokemon ---\n"),
    };

    if page.entries.is_empty() {
        output.push_str("  (none)\n");
    }
    let first_number = page.info.offset() + 1;
    for (i, entry) in page.entries.iter().enumerate() {
        output.push_str(&format!("  {:>4}. {}\n", first_number as usize + i, entry.display_name));
    }

    output.push_str(&format!(
        "\nPage {} of {} ({} total)",
        page.info.page, page.info.total_pages, page.count
    ));
    let mut hints = Vec::new();
    if page.info.has_previous() {
        hints.push(format!("previous: page {}", page.info.page - 1));
    }
    if page.info.has_next() {
        hints.push(format!("next: page {}", page.info.page + 1));
    }
    if !hints.is_empty() {
        output.push_str(&format!(" [{}]", hints.join(", ")));
    }
    output.push('\n');
    output
}

/// Detail view: sprite, types, and every base stat as `name: value`.
pub fn render_details(creature: &Creature) -> String {
    let mut output = format!("--- {} ---\n", creature.display_name());
    if let Some(sprite) = &creature.sprite {
        output.push_str(&format!("Sprite: {}\n", sprite));
    }
    output.push_str(&format!("Types: {}\n", type_line(creature)));
    for kind in StatKind::iter() {
        output.push_str(&format!("  {}: {}\n", kind, creature.stat(kind)));
    }
    output
}

pub fn render_type_list(type_names: &[String]) -> String {
    let mut output = String::from("Available Types:\n");
    for name in type_names {
        output.push_str(&format!("  {}\n", name));
    }
    output
}

/// Compact one-line summary of a card as it appears in a hand.
pub fn card_line(creature: &Creature) -> String {
    format!(
        "{} [{}] ATK {} / DEF {}",
        creature.display_name(),
        type_line(creature),
        creature.stat(StatKind::Attack),
        creature.stat(StatKind::Defense)
    )
}

/// The user's remaining cards, numbered from 1 for selection.
pub fn render_deck(deck: &Deck) -> String {
    let mut output = String::from("--- Your Hand ---\n");
    if deck.is_empty() {
        output.push_str("  (empty)\n");
    }
    for (i, card) in deck.cards().iter().enumerate() {
        output.push_str(&format!(" {}. {}\n", i + 1, card_line(card)));
    }
    output
}

pub fn render_score(state: &MatchState) -> String {
    format!(
        "Round: {}/{}  |  You: {}  PC: {}  Draws: {}",
        state.round.min(state.rounds_total),
        state.rounds_total,
        state.user_score,
        state.opponent_score,
        state.draws
    )
}

/// Battle text for a resolved round, including effectiveness remarks.
pub fn render_round(report: &RoundReport) -> String {
    let mut output = format!(
        "Round {}: {} vs {}\n",
        report.round,
        capitalize(&report.user_card),
        capitalize(&report.opponent_card)
    );

    output.push_str(&format!(
        "{} deals {} damage.",
        capitalize(&report.user_card),
        report.user_damage
    ));
    if let Some(remark) = Effectiveness::from_multiplier(report.user_multiplier).message() {
        output.push_str(&format!(" {}", remark));
    }
    output.push('\n');

    output.push_str(&format!(
        "{} deals {} damage.",
        capitalize(&report.opponent_card),
        report.opponent_damage
    ));
    if let Some(remark) = Effectiveness::from_multiplier(report.opponent_multiplier).message() {
        output.push_str(&format!(" {}", remark));
    }
    output.push('\n');

    output.push_str(report.outcome_text());
    output.push('\n');
    output
}

/// Full status of a session, in whatever phase it is in.
pub fn render_status(session: &GameSession) -> String {
    let mut output = String::new();
    match session.phase() {
        GamePhase::MatchComplete => {
            output.push_str("Game Over!\n");
            if let Some(verdict) = session.verdict() {
                output.push_str(&format!("{}\n", verdict.message()));
            }
        }
        GamePhase::RoundDisplay | GamePhase::RoundResolving => {
            if let Some(round) = session.current_round() {
                output.push_str(&render_round(&round.report));
                output.push_str("(round on display)\n");
            }
        }
        GamePhase::AwaitingSelection => {
            if !session.chart().is_loaded() {
                output.push_str("Type chart is still loading; selections are ignored.\n");
            }
        }
    }

    output.push_str(&render_score(session.match_state()));
    output.push('\n');
    if session.phase() == GamePhase::AwaitingSelection {
        output.push('\n');
        output.push_str(&render_deck(session.user_deck()));
    }
    output
}

pub fn render_summary(summary: &MatchSummary) -> String {
    format!(
        "Game Over!\n{}\nFinal score - You: {}  PC: {}  Draws: {}\n",
        summary.verdict.message(),
        summary.state.user_score,
        summary.state.opponent_score,
        summary.state.draws
    )
}

/// Parses a 1-based card number typed by a player into a deck index.
pub fn parse_card_number(input: &str, remaining: usize) -> Result<usize, String> {
    let number: usize = input
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a card number.", input.trim()))?;
    card_index(number, remaining)
}

/// Converts a 1-based card number into a deck index.
pub fn card_index(number: usize, remaining: usize) -> Result<usize, String> {
    if number == 0 || number > remaining {
        return Err(format!("Invalid card number. Please choose 1-{}.", remaining));
    }
    Ok(number - 1)
}

fn type_line(creature: &Creature) -> String {
    if creature.types.is_empty() {
        return "typeless".to_string();
    }
    creature
        .types
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join("/")
}
