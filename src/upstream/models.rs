//! Typed views of the upstream API responses.
//!
//! Only the fields the ingestion pipeline actually reads are modeled; the
//! upstream payloads carry far more. Fields the upstream may omit or null out
//! are `Option` or defaulted so absence never fails deserialization.

use serde::Deserialize;

/// A `{name, url}` reference, the upstream's universal link shape.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

/// A bare `{url}` reference (e.g. `species.evolution_chain`).
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceRef {
    pub url: String,
}

/// One page of the paginated catalog listing.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogPage {
    pub results: Vec<NamedResource>,
}

/// Per-entity detail response.
#[derive(Debug, Clone, Deserialize)]
pub struct PokemonDetail {
    pub id: u32,
    pub name: String,
    /// Decimetres.
    pub height: u32,
    /// Hectograms.
    pub weight: u32,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub stats: Vec<StatSlot>,
    #[serde(default)]
    pub sprites: Sprites,
    pub species: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbilitySlot {
    pub ability: NamedResource,
    pub is_hidden: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatSlot {
    pub base_stat: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub other: OtherSprites,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: Artwork,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Artwork {
    pub front_default: Option<String>,
}

/// Per-species response: localized genus, gender rate, evolution chain link.
#[derive(Debug, Clone, Deserialize)]
pub struct Species {
    #[serde(default)]
    pub genera: Vec<Genus>,
    /// -1 genderless, 0 male-only, 8 female-only, 1..=7 mixed.
    pub gender_rate: i32,
    pub evolution_chain: Option<ResourceRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Genus {
    pub genus: String,
    pub language: NamedResource,
}

/// Per-type response, reduced to its damage relations.
#[derive(Debug, Clone, Deserialize)]
pub struct TypeInfo {
    pub damage_relations: DamageRelations,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DamageRelations {
    #[serde(default)]
    pub double_damage_from: Vec<NamedResource>,
    #[serde(default)]
    pub half_damage_from: Vec<NamedResource>,
    #[serde(default)]
    pub no_damage_from: Vec<NamedResource>,
}

/// Evolution chain response: a recursive species tree.
#[derive(Debug, Clone, Deserialize)]
pub struct EvolutionChain {
    pub chain: ChainLink,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChainLink {
    pub species: NamedResource,
    #[serde(default)]
    pub evolves_to: Vec<ChainLink>,
}
