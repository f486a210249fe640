pub mod client;
pub mod models;

pub use client::{PokeClient, DEFAULT_BASE_URL};
pub use models::*;

use anyhow::Result;

/// The five upstream fetches the ingestion pipeline depends on.
///
/// `PokeClient` is the real implementation; tests drive the pipeline with an
/// in-memory stub.
pub trait Upstream {
    /// One window of the paginated catalog listing.
    fn list_page(&self, offset: u32, limit: u32) -> Result<Vec<NamedResource>>;

    fn pokemon_detail(&self, url: &str) -> Result<PokemonDetail>;

    fn species(&self, url: &str) -> Result<Species>;

    fn species_by_id(&self, id: u32) -> Result<Species>;

    fn type_relations(&self, url: &str) -> Result<TypeInfo>;

    fn evolution_chain(&self, url: &str) -> Result<EvolutionChain>;
}
