//! Live PokeAPI implementation of the lumidex source traits.

use anyhow::{Context, Result, anyhow};
use lumidex_api::{ChainRecord, LookupError, PokemonRecord, SpeciesRecord, TypeIndex, TypeRecord};
use lumidex_core::{CreatureSource, Dex, SpeciesSource, TypeSource};
use rand::Rng;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

pub const API_URL: &str = "https://pokeapi.co/api/v2";

const SPRITE_URL: &str = "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";

/// As of Gen 9 the dex runs past 1010; cap random picks at 1025 to be safe.
pub const MAX_POKEMON_ID: u32 = 1025;

/// HTTP client for the PokeAPI REST endpoints.
///
/// One instance serves a whole session; pair it with a [`Dex`] to get
/// cached, aggregated lookups.
pub struct PokeApiClient {
    http: reqwest::Client,
    base: String,
}

impl PokeApiClient {
    pub fn new() -> Self {
        Self::with_base(API_URL)
    }

    /// Point the client at a different base URL (test servers, mirrors).
    pub fn with_base(base: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: base.trim_end_matches('/').to_string(),
        }
    }

    /// Wrap this client in a fresh aggregation facade.
    pub fn into_dex(self) -> Dex<Self> {
        Dex::new(self)
    }

    /// GET a JSON record. `Ok(None)` on 404 so each caller can map the
    /// miss to its own typed error; every other failure carries context.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("requesting {url}"))?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!(url, "resource not found upstream");
            return Ok(None);
        }

        let response = response
            .error_for_status()
            .with_context(|| format!("requesting {url}"))?;
        let value = response
            .json()
            .await
            .with_context(|| format!("decoding response from {url}"))?;
        Ok(Some(value))
    }

    /// A random creature query, for the "surprise me" entry point.
    pub fn random_query() -> String {
        rand::thread_rng().gen_range(1..=MAX_POKEMON_ID).to_string()
    }

    /// Sprite URL for a resolved species identifier.
    pub fn sprite_url(id: u32) -> String {
        format!("{SPRITE_URL}/{id}.png")
    }
}

impl Default for PokeApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CreatureSource for PokeApiClient {
    async fn fetch_pokemon(&self, query: &str) -> Result<PokemonRecord> {
        let query = query.trim().to_lowercase();
        let url = format!("{}/pokemon/{}", self.base, query);
        self.get_json(&url)
            .await?
            .ok_or_else(|| LookupError::UnknownPokemon(query).into())
    }
}

impl TypeSource for PokeApiClient {
    async fn fetch_type(&self, name: &str) -> Result<TypeRecord> {
        let url = format!("{}/type/{}", self.base, name);
        self.get_json(&url)
            .await?
            .ok_or_else(|| LookupError::UnknownType(name.to_string()).into())
    }

    async fn fetch_type_index(&self) -> Result<TypeIndex> {
        let url = format!("{}/type", self.base);
        self.get_json(&url)
            .await?
            .ok_or_else(|| anyhow!("type index unavailable at {url}"))
    }
}

impl SpeciesSource for PokeApiClient {
    async fn fetch_species(&self, url: &str) -> Result<SpeciesRecord> {
        self.get_json(url)
            .await?
            .ok_or_else(|| anyhow!("no species record at {url}"))
    }

    async fn fetch_chain(&self, url: &str) -> Result<ChainRecord> {
        self.get_json(url)
            .await?
            .ok_or_else(|| anyhow!("no evolution chain at {url}"))
    }
}
