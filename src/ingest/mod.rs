//! Two-pass ingestion pipeline.
//!
//! Pass 1 fetches and enriches every record in the requested listing window
//! and builds the name index. Pass 2 resolves evolution chains against that
//! index, which is only complete once pass 1 has finished. All upstream calls
//! are sequential and first-attempt-terminal.

pub mod evolution;
pub mod species;
pub mod weakness;

pub use evolution::{flatten_chain, NameIndex};

use anyhow::{Context, Result};
use indexmap::IndexMap;
use log::warn;

use crate::record::{EvolutionEntry, PokemonRecord, ID_CEILING};
use crate::upstream::Upstream;

/// Counts for one ingestion run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IngestReport {
    pub ingested: usize,
    pub over_ceiling: usize,
    pub failed: usize,
}

/// Fetch, enrich and link the listing window `[offset, offset + limit)`.
///
/// Entries whose detail fetch fails or whose id exceeds the ceiling are
/// dropped without aborting the run; a record with no successful detail fetch
/// contributes nothing, not even a placeholder.
pub fn run_ingestion(
    upstream: &impl Upstream,
    offset: u32,
    limit: u32,
) -> Result<(Vec<PokemonRecord>, IngestReport)> {
    let entries = upstream
        .list_page(offset, limit)
        .context("Failed to fetch the catalog listing")?;

    let mut report = IngestReport::default();
    let mut index = NameIndex::new();
    let mut records = Vec::new();

    for entry in &entries {
        match build_record(upstream, &entry.url) {
            Ok(Some(record)) => {
                index.insert(&record.name, record.id, record.image_url.clone());
                records.push(record);
            }
            Ok(None) => report.over_ceiling += 1,
            Err(err) => {
                warn!("skipping {}: {:#}", entry.name, err);
                report.failed += 1;
            }
        }
    }

    // Evolution chains reference family members by name, so they can only be
    // resolved once the index covers the whole window.
    for record in &mut records {
        record.evolutions = resolve_family(upstream, record.id, &record.name, &index);
    }

    report.ingested = records.len();
    Ok((records, report))
}

/// Pass-1 fetch and enrichment for one listing entry. `Ok(None)` means the
/// entry sits above the id ceiling.
fn build_record(upstream: &impl Upstream, url: &str) -> Result<Option<PokemonRecord>> {
    let detail = upstream
        .pokemon_detail(url)
        .context("Failed to fetch details")?;

    if detail.id > ID_CEILING {
        return Ok(None);
    }

    // Missing species data degrades to the documented fallbacks instead of
    // dropping the record.
    let species_data = match upstream.species(&detail.species.url) {
        Ok(s) => Some(s),
        Err(err) => {
            warn!("no species data for {}: {:#}", detail.name, err);
            None
        }
    };

    let weaknesses = weakness::resolve_weaknesses(upstream, &detail.types)?;

    let abilities: Vec<String> = detail
        .abilities
        .iter()
        .filter(|slot| !slot.is_hidden)
        .map(|slot| slot.ability.name.clone())
        .collect();

    let types: Vec<String> = detail.types.iter().map(|t| t.kind.name.clone()).collect();

    let stats: IndexMap<String, u32> = detail
        .stats
        .iter()
        .map(|s| (s.stat.name.clone(), s.base_stat))
        .collect();

    Ok(Some(PokemonRecord {
        id: detail.id,
        name: detail.name,
        category: species::category(species_data.as_ref()),
        // Upstream units are hectograms and decimetres
        weight_kg: f64::from(detail.weight) / 10.0,
        height_m: f64::from(detail.height) / 10.0,
        abilities,
        gender: species::gender_set(species_data.as_ref()),
        types,
        weaknesses,
        stats,
        image_url: detail.sprites.other.official_artwork.front_default,
        evolutions: Vec::new(),
    }))
}

/// Pass-2 lineage resolution. Any fetch failure leaves the record usable with
/// an empty family list.
fn resolve_family(
    upstream: &impl Upstream,
    id: u32,
    name: &str,
    index: &NameIndex,
) -> Vec<EvolutionEntry> {
    let species_data = match upstream.species_by_id(id) {
        Ok(s) => s,
        Err(err) => {
            warn!("no lineage for {}: {:#}", name, err);
            return Vec::new();
        }
    };

    let Some(chain_ref) = species_data.evolution_chain else {
        return Vec::new();
    };

    match upstream.evolution_chain(&chain_ref.url) {
        Ok(chain) => evolution::flatten_chain(&chain.chain, index),
        Err(err) => {
            warn!("failed to fetch evolution chain for {}: {:#}", name, err);
            Vec::new()
        }
    }
}
