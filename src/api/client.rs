//! Read-only HTTP client for PokeAPI.

use crate::api::normalize::{creature_from_response, relations_from_response, type_members_from_response};
use crate::config::GameConfig;
use crate::errors::{ApiError, ApiResult};
use reqwest::Client;
use schema::{
    Creature, NamedResource, PokemonListResponse, PokemonResponse, TypeListResponse,
    TypeRelations, TypeResponse,
};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    client: Client,
    base_url: String,
}

impl PokeApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Client)?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &GameConfig) -> ApiResult<Self> {
        Self::new(config.api_base_url.clone(), config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        tracing::debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, %status, "PokeAPI request failed");
            return Err(ApiError::Status {
                url: url.to_string(),
                status,
            });
        }

        response.json::<T>().await.map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }

    /// `GET /pokemon?limit=L&offset=O`
    pub async fn list_pokemon(&self, limit: u32, offset: u32) -> ApiResult<PokemonListResponse> {
        let url = self.endpoint(&format!("pokemon?limit={}&offset={}", limit, offset));
        self.get_json(&url).await
    }

    /// `GET /pokemon/{name}`, normalized.
    pub async fn pokemon(&self, name: &str) -> ApiResult<Creature> {
        let url = self.endpoint(&format!("pokemon/{}", normalize_name(name)));
        let response: PokemonResponse = self.get_json(&url).await?;
        Ok(creature_from_response(response))
    }

    /// `GET /type`
    pub async fn list_types(&self) -> ApiResult<Vec<NamedResource>> {
        let response: TypeListResponse = self.get_json(&self.endpoint("type")).await?;
        Ok(response.results)
    }

    /// `GET {url}` for one entry of `list_types`, normalized.
    pub async fn type_relations(&self, url: &str) -> ApiResult<TypeRelations> {
        let response: TypeResponse = self.get_json(url).await?;
        Ok(relations_from_response(response))
    }

    /// `GET /type/{name}`: every Pokemon of one type, in Pokedex order.
    pub async fn type_members(&self, type_name: &str) -> ApiResult<Vec<NamedResource>> {
        let url = self.endpoint(&format!("type/{}", normalize_name(type_name)));
        let response: TypeResponse = self.get_json(&url).await?;
        Ok(type_members_from_response(response))
    }
}

/// PokeAPI names are lowercase and hyphenated ("mr-mime").
fn normalize_name(name: &str) -> String {
    name.trim().to_ascii_lowercase().replace(' ', "-")
}
