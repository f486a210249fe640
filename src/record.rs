use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Entries with an upstream id above this are variant forms, not dex entries,
/// and are excluded from ingestion.
pub const ID_CEILING: u32 = 10_000;

/// Format an id as the 4-digit zero-padded string used as the persistence key.
pub fn dex_id(id: u32) -> String {
    format!("{:04}", id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Genderless,
}

/// One member of an evolutionary family, in flattened chain order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionEntry {
    /// Zero-padded 4-digit id string.
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
}

/// A fully enriched catalog record, ready for persistence.
///
/// `evolutions` spans the whole evolutionary family (including this record)
/// and is identical for every member of one family. It is only populated by
/// the second ingestion pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PokemonRecord {
    pub id: u32,
    pub name: String,
    pub category: String,
    #[serde(rename = "weight")]
    pub weight_kg: f64,
    #[serde(rename = "height")]
    pub height_m: f64,
    pub abilities: Vec<String>,
    pub gender: Vec<Gender>,
    pub types: Vec<String>,
    pub weaknesses: BTreeSet<String>,
    pub stats: IndexMap<String, u32>,
    pub image_url: Option<String>,
    pub evolutions: Vec<EvolutionEntry>,
}

impl PokemonRecord {
    pub fn dex_id(&self) -> String {
        dex_id(self.id)
    }
}
