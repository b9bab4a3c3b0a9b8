//! One-shot async initialization of a match: fetch the roster and the type
//! chart, shuffle, and fetch both decks' details.

use crate::api::PokeApiClient;
use crate::config::{GameConfig, MatchRules};
use crate::errors::{ApiResult, SessionResult, SetupError, SetupResult};
use crate::game::effectiveness::TypeChart;
use crate::game::session::GameSession;
use rand::seq::SliceRandom;
use rand::Rng;
use schema::Creature;
use std::future::Future;
use tokio::task::JoinHandle;

/// Both decks plus whatever category table could be fetched.
#[derive(Debug, Clone)]
pub struct DealtMatch {
    pub user_deck: Vec<Creature>,
    pub opponent_deck: Vec<Creature>,
    pub chart: TypeChart,
}

impl DealtMatch {
    pub fn into_session(self, rules: MatchRules) -> SessionResult<GameSession> {
        GameSession::new(self.user_deck, self.opponent_deck, self.chart, rules)
    }
}

/// Deals a fresh match. The roster and the type chart are fetched
/// concurrently, then all `2 * deck_size` detail fetches run in parallel as
/// one unit: either every card arrives or the deal fails.
///
/// A failed chart fetch does not fail the deal; the chart stays `Pending` and
/// the session ignores selections until one is loaded.
pub async fn deal_match<R: Rng + ?Sized>(
    client: &PokeApiClient,
    config: &GameConfig,
    rng: &mut R,
) -> SetupResult<DealtMatch> {
    let deck_size = config.rules.deck_size;
    let needed = deck_size * 2;

    let (roster, chart) = tokio::join!(
        client.list_pokemon(config.roster_limit, 0),
        fetch_type_chart(client)
    );
    let roster = roster?;
    let chart = chart.unwrap_or_else(|err| {
        tracing::warn!(error = %err, "type chart unavailable; continuing with neutral effectiveness");
        TypeChart::Pending
    });

    let mut names: Vec<String> = roster.results.into_iter().map(|entry| entry.name).collect();
    if names.len() < needed {
        return Err(SetupError::RosterTooSmall {
            available: names.len(),
            needed,
        });
    }
    names.shuffle(rng);
    names.truncate(needed);
    tracing::info!(cards = ?names, "dealing");

    let fetcher = client.clone();
    let mut cards = fetch_all(names, move |name| {
        let client = fetcher.clone();
        async move { client.pokemon(&name).await }
    })
    .await?;

    let opponent_deck = cards.split_off(deck_size);
    Ok(DealtMatch {
        user_deck: cards,
        opponent_deck,
        chart,
    })
}

/// `GET /type`, then every type's relations in parallel.
pub async fn fetch_type_chart(client: &PokeApiClient) -> SetupResult<TypeChart> {
    let types = client.list_types().await?;
    let fetcher = client.clone();
    let relations = fetch_all(types, move |entry| {
        let client = fetcher.clone();
        async move { client.type_relations(&entry.url).await }
    })
    .await?;
    tracing::debug!(types = relations.len(), "type chart loaded");
    Ok(TypeChart::from_relations(relations))
}

/// Spawns one task per input and collects results in input order. On the
/// first failure the remaining tasks are aborted.
async fn fetch_all<I, T, F, Fut>(inputs: I, fetch: F) -> SetupResult<Vec<T>>
where
    I: IntoIterator,
    F: Fn(I::Item) -> Fut,
    Fut: Future<Output = ApiResult<T>> + Send + 'static,
    T: Send + 'static,
{
    let handles: Vec<JoinHandle<ApiResult<T>>> =
        inputs.into_iter().map(|input| tokio::spawn(fetch(input))).collect();

    let mut results = Vec::with_capacity(handles.len());
    let mut handles = handles.into_iter();
    while let Some(handle) = handles.next() {
        let outcome = handle.await;
        let failure = match outcome {
            Ok(Ok(value)) => {
                results.push(value);
                continue;
            }
            Ok(Err(err)) => SetupError::from(err),
            Err(err) => SetupError::from(err),
        };
        for remaining in handles.by_ref() {
            remaining.abort();
        }
        return Err(failure);
    }
    Ok(results)
}
