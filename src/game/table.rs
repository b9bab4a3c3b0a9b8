//! The single match a request/response front end (the MCP server) plays.
//!
//! Nothing here runs in the background: every access first finishes any round
//! whose display window has closed, using the time the lock was acquired.

use crate::api::PokeApiClient;
use crate::game::session::GameSession;
use crate::game::setup::fetch_type_chart;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

/// A match in progress plus the RNG the PC draws from.
#[derive(Debug)]
pub struct ActiveGame {
    pub session: GameSession,
    pub draw: StdRng,
}

#[derive(Debug, Clone, Default)]
pub struct GameTable {
    game: Arc<Mutex<Option<ActiveGame>>>,
}

impl GameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces whatever match was on the table.
    pub async fn start(&self, session: GameSession, draw: StdRng) {
        *self.game.lock().await = Some(ActiveGame { session, draw });
    }

    /// Clears the table, returning the abandoned session.
    pub async fn forfeit(&self) -> Option<GameSession> {
        self.game.lock().await.take().map(|game| game.session)
    }

    /// Runs `f` on the active game, or returns `None` if there is none. A round
    /// whose window closed by now is finished first; `f` receives that `now`.
    pub async fn with_game<R>(&self, f: impl FnOnce(&mut ActiveGame, Instant) -> R) -> Option<R> {
        let mut guard = self.game.lock().await;
        let game = guard.as_mut()?;
        let now = Instant::now();
        game.session.advance(now);
        Some(f(game, now))
    }

    /// Fetches the type chart if the active game is still without one. The
    /// table is not locked during the fetch.
    pub async fn ensure_chart(&self, client: &PokeApiClient) {
        let pending = self
            .game
            .lock()
            .await
            .as_ref()
            .is_some_and(|game| !game.session.chart().is_loaded());
        if !pending {
            return;
        }

        match fetch_type_chart(client).await {
            Ok(chart) => {
                if let Some(game) = self.game.lock().await.as_mut() {
                    if !game.session.chart().is_loaded() {
                        game.session.load_chart(chart);
                    }
                }
            }
            Err(e) => tracing::warn!(error = %e, "type chart still unavailable"),
        }
    }
}
