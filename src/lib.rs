// In: src/lib.rs

//! Pokemon Card Game
//!
//! A six-round card battle built on live PokeAPI data: both players are dealt
//! six random Pokemon, and each round pits one card from each hand against
//! the other using attack, defense and type effectiveness. Also ships a
//! paginated Pokemon catalog with a type filter.

// --- MODULE DECLARATIONS ---
pub mod api;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod game;
pub mod interface;
pub mod logging;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{capitalize, Creature, NamedResource, StatEntry, StatKind, TypeName, TypeRelations};

// --- From this crate's modules (`src/`) ---

// Data access and browsing.
pub use api::PokeApiClient;
pub use catalog::{Catalog, CatalogEntry, CatalogPage, PageInfo};

// Core game engine, session and driver.
pub use game::ai::{Behavior, RandomPick, ScoringPick};
pub use game::draw::OpponentDraw;
pub use game::effectiveness::{Effectiveness, TypeChart};
pub use game::engine::{resolve_round, Damage, RoundOutcome, RoundResolution};
pub use game::runner::{play_match, MatchSummary};
pub use game::session::GameSession;
pub use game::setup::{deal_match, DealtMatch};
pub use game::state::{Deck, GamePhase, MatchState, MatchVerdict, RoundReport, SelectOutcome, Side};

// Configuration.
pub use config::{GameConfig, MatchRules};

// Crate-specific error and result types.
pub use errors::{
    ApiError, ApiResult, AppError, AppResult, ConfigError, ConfigResult, RunnerError, RunnerResult,
    SessionError, SessionResult, SetupError, SetupResult,
};
