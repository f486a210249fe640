use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;

use super::models::{CatalogPage, EvolutionChain, NamedResource, PokemonDetail, Species, TypeInfo};
use super::Upstream;

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Blocking client for the upstream catalog API.
///
/// Every fetch is first-attempt-terminal: a non-success status or network
/// error is returned as-is, with no retries.
pub struct PokeClient {
    client: Client,
    base_url: String,
}

impl PokeClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent("pokedex-catalog")
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("Failed to fetch {}", url))?;

        let status = response.status();
        if !status.is_success() {
            bail!("Upstream returned {} for {}", status, url);
        }

        let text = response.text().context("Failed to read response body")?;
        serde_json::from_str(&text).with_context(|| format!("Failed to parse response from {}", url))
    }
}

impl Upstream for PokeClient {
    fn list_page(&self, offset: u32, limit: u32) -> Result<Vec<NamedResource>> {
        let url = format!("{}/pokemon?limit={}&offset={}", self.base_url, limit, offset);
        let page: CatalogPage = self.get_json(&url)?;
        Ok(page.results)
    }

    fn pokemon_detail(&self, url: &str) -> Result<PokemonDetail> {
        self.get_json(url)
    }

    fn species(&self, url: &str) -> Result<Species> {
        self.get_json(url)
    }

    fn species_by_id(&self, id: u32) -> Result<Species> {
        let url = format!("{}/pokemon-species/{}", self.base_url, id);
        self.get_json(&url)
    }

    fn type_relations(&self, url: &str) -> Result<TypeInfo> {
        self.get_json(url)
    }

    fn evolution_chain(&self, url: &str) -> Result<EvolutionChain> {
        self.get_json(url)
    }
}
