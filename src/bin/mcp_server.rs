//! Pokemon Card Game MCP Server
//!
//! A Model Context Protocol server (rmcp, stdio transport) that exposes the
//! Pokemon catalog and the card battle for LLM interaction. One match at a
//! time lives on a `GameTable`; its reveal window is gated by wall-clock time
//! on every call.

use std::borrow::Cow;
use std::sync::Arc;

use pokemon_card_game::errors::SessionError;
use pokemon_card_game::game::setup::deal_match;
use pokemon_card_game::game::state::{GamePhase, MatchState, RoundReport, SelectOutcome};
use pokemon_card_game::game::table::GameTable;
use pokemon_card_game::{interface, logging, Catalog, GameConfig, PokeApiClient};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ErrorData as McpError, *},
    schemars, tool, tool_handler, tool_router, ServerHandler, ServiceExt,
};
use serde::{Deserialize, Serialize};
use tokio::io::{stdin, stdout};

#[derive(Debug, Clone)]
pub struct CardGameService {
    tool_router: ToolRouter<CardGameService>,
    config: Arc<GameConfig>,
    catalog: Catalog,
    table: GameTable,
}

// Tool request structures
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListPokemonRequest {
    #[schemars(description = "Page number, starting at 1 (default 1)")]
    #[serde(default)]
    pub page: Option<u32>,
    #[schemars(description = "Only list Pokemon of this type, e.g. 'fire'")]
    #[serde(default, rename = "type")]
    pub type_name: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PokemonDetailsRequest {
    #[schemars(description = "Name of the Pokemon to look up")]
    pub name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct StartGameRequest {
    #[schemars(description = "Optional seed to make dealing and the PC's draws repeatable")]
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PlayCardRequest {
    #[schemars(description = "Card number from your hand (1-6)")]
    pub card_number: usize,
}

/// Machine-readable half of the `game_status` reply.
#[derive(Debug, Serialize)]
struct StatusSnapshot<'a> {
    phase: GamePhase,
    score: &'a MatchState,
    hand: Vec<&'a str>,
    round_on_display: Option<&'a RoundReport>,
}

fn internal_error(message: String) -> McpError {
    McpError {
        code: ErrorCode(-32603),
        message: Cow::from(message),
        data: None,
    }
}

fn match_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

fn text_result(text: impl Into<String>) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(text.into())]))
}

#[tool_router]
impl CardGameService {
    pub fn new(config: GameConfig, client: PokeApiClient) -> Self {
        Self {
            tool_router: Self::tool_router(),
            catalog: Catalog::new(client, config.page_size),
            config: Arc::new(config),
            table: GameTable::new(),
        }
    }

    #[tool(description = "List Pokemon one page at a time, optionally filtered by type")]
    async fn list_pokemon(
        &self,
        Parameters(request): Parameters<ListPokemonRequest>,
    ) -> Result<CallToolResult, McpError> {
        let page = request.page.unwrap_or(1);
        let result = match request.type_name.as_deref() {
            Some(type_name) => self.catalog.page_of_type(type_name, page).await,
            None => self.catalog.page(page).await,
        };
        match result {
            Ok(page) => text_result(interface::render_catalog_page(&page)),
            Err(e) => Err(internal_error(format!("Error listing Pokemon: {}", e))),
        }
    }

    #[tool(description = "Show sprite, types and base stats of a Pokemon")]
    async fn pokemon_details(
        &self,
        Parameters(request): Parameters<PokemonDetailsRequest>,
    ) -> Result<CallToolResult, McpError> {
        match self.catalog.details(&request.name).await {
            Ok(creature) => text_result(interface::render_details(&creature)),
            Err(e) => Err(internal_error(format!(
                "Error looking up '{}': {}",
                request.name, e
            ))),
        }
    }

    #[tool(description = "Deal two fresh hands of six random Pokemon and start a match against the PC")]
    async fn start_game(
        &self,
        Parameters(request): Parameters<StartGameRequest>,
    ) -> Result<CallToolResult, McpError> {
        let mut rng = match_rng(request.seed);

        let session = deal_match(self.catalog.client(), &self.config, &mut rng)
            .await
            .map_err(|e| internal_error(format!("Error dealing cards: {}", e)))?
            .into_session(self.config.rules.clone())
            .map_err(|e| internal_error(format!("Error starting game: {}", e)))?;

        let intro = format!(
            "A new match begins! Pick one card per round; the PC draws at random.\n\n{}",
            interface::render_status(&session)
        );
        tracing::info!(seed = ?request.seed, "new match started");
        self.table.start(session, rng).await;
        text_result(intro)
    }

    #[tool(description = "Play a card from your hand against a random card from the PC's hand")]
    async fn play_card(
        &self,
        Parameters(request): Parameters<PlayCardRequest>,
    ) -> Result<CallToolResult, McpError> {
        // Fetched before the table is locked, and before the reveal clock starts.
        self.table.ensure_chart(self.catalog.client()).await;

        let dwell = self.config.rules.dwell();
        let played = self.table.with_game(|game, now| {
            let index = match interface::card_index(request.card_number, game.session.user_deck().len()) {
                Ok(index) => index,
                Err(message) if game.session.phase() == GamePhase::AwaitingSelection => {
                    return format!("Error: {}", message);
                }
                // Let the session report the phase problem instead.
                Err(_) => 0,
            };

            match game.session.select(index, &mut game.draw, now) {
                Ok(SelectOutcome::Resolved(report)) => format!(
                    "{}\nThe result stays on display for {:.1}s; use 'game_status' to continue.",
                    interface::render_round(&report),
                    dwell.as_secs_f64()
                ),
                Ok(SelectOutcome::Ignored) => {
                    "The type chart has not loaded yet, so no card was played. Try again shortly."
                        .to_string()
                }
                Err(SessionError::RoundInFlight) => {
                    let wait = game
                        .session
                        .current_round()
                        .map(|round| round.reveal_until.saturating_duration_since(now))
                        .unwrap_or_default();
                    format!(
                        "The last round is still on display for another {:.1}s.",
                        wait.as_secs_f64()
                    )
                }
                Err(SessionError::MatchComplete) => format!(
                    "{}\nUse 'start_game' to play again.",
                    interface::render_status(&game.session)
                ),
                Err(e) => format!("Error: {}", e),
            }
        });

        let text = played
            .await
            .unwrap_or_else(|| interface::no_game_message().to_string());
        text_result(text)
    }

    #[tool(description = "Get the score, the round on display, and your remaining hand")]
    async fn game_status(&self) -> Result<CallToolResult, McpError> {
        let status = self.table.with_game(|game, _| {
            let session = &game.session;
            let snapshot = StatusSnapshot {
                phase: session.phase(),
                score: session.match_state(),
                hand: session
                    .user_deck()
                    .cards()
                    .iter()
                    .map(|card| card.name.as_str())
                    .collect(),
                round_on_display: session.current_round().map(|round| &round.report),
            };
            serde_json::to_string(&snapshot).map(|json| (interface::render_status(session), json))
        });

        match status.await {
            Some(Ok((text, json))) => Ok(CallToolResult::success(vec![
                Content::text(text),
                Content::text(json),
            ])),
            Some(Err(e)) => Err(internal_error(format!("Error encoding status: {}", e))),
            None => text_result(interface::no_game_message()),
        }
    }

    #[tool(description = "Forfeit the current match")]
    async fn forfeit_game(&self) -> Result<CallToolResult, McpError> {
        let text = match self.table.forfeit().await {
            Some(session) => format!(
                "You forfeited the match. PC Wins!\n{}",
                interface::render_score(session.match_state())
            ),
            None => interface::no_game_message().to_string(),
        };
        text_result(text)
    }
}

#[tool_handler]
impl ServerHandler for CardGameService {}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    tracing::info!("Pokemon Card Game MCP server starting");

    let config = GameConfig::load()?;
    let client = PokeApiClient::from_config(&config)?;
    tracing::info!(base_url = client.base_url(), "using PokeAPI");

    let service = CardGameService::new(config, client);
    let transport = (stdin(), stdout());

    let server = service.serve(transport).await?;
    tracing::info!("server running, waiting for shutdown");
    let quit_reason = server.waiting().await?;

    tracing::info!(?quit_reason, "Pokemon Card Game MCP server exiting");
    Ok(())
}
