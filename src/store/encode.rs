//! Text encodings for the list/dict-valued columns of the `pokemon` table.
//!
//! Abilities, types and weaknesses are comma-joined; stats are
//! `"name: value"` pairs, order preserving; gender and evolutions are JSON.
//! Every encoding must round-trip exactly.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use std::collections::BTreeSet;

use crate::record::{EvolutionEntry, Gender};

pub fn encode_list<'a, I: IntoIterator<Item = &'a String>>(items: I) -> String {
    items
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn decode_list(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split(',').map(|s| s.trim().to_string()).collect()
}

pub fn decode_set(text: &str) -> BTreeSet<String> {
    decode_list(text).into_iter().collect()
}

pub fn encode_stats(stats: &IndexMap<String, u32>) -> String {
    stats
        .iter()
        .map(|(name, value)| format!("{}: {}", name, value))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn decode_stats(text: &str) -> Result<IndexMap<String, u32>> {
    let mut stats = IndexMap::new();

    for pair in text.split(',').filter(|p| !p.trim().is_empty()) {
        let (name, value) = pair
            .split_once(':')
            .with_context(|| format!("Malformed stat entry: {:?}", pair))?;
        let value: u32 = value
            .trim()
            .parse()
            .with_context(|| format!("Malformed stat value in {:?}", pair))?;
        stats.insert(name.trim().to_string(), value);
    }

    Ok(stats)
}

pub fn encode_gender(gender: &[Gender]) -> Result<String> {
    serde_json::to_string(gender).context("Failed to encode gender")
}

pub fn decode_gender(text: &str) -> Result<Vec<Gender>> {
    serde_json::from_str(text).context("Failed to decode gender")
}

pub fn encode_evolutions(evolutions: &[EvolutionEntry]) -> Result<String> {
    serde_json::to_string(evolutions).context("Failed to encode evolutions")
}

pub fn decode_evolutions(text: &str) -> Result<Vec<EvolutionEntry>> {
    serde_json::from_str(text).context("Failed to decode evolutions")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_round_trip() {
        let abilities = vec!["overgrow".to_string(), "chlorophyll".to_string()];
        let encoded = encode_list(&abilities);
        assert_eq!(encoded, "overgrow, chlorophyll");
        assert_eq!(decode_list(&encoded), abilities);
    }

    #[test]
    fn test_empty_list_round_trip() {
        let empty: Vec<String> = Vec::new();
        assert_eq!(encode_list(&empty), "");
        assert!(decode_list("").is_empty());
    }

    #[test]
    fn test_set_round_trip() {
        let weaknesses: BTreeSet<String> =
            ["fire", "flying", "ice"].iter().map(|s| s.to_string()).collect();
        let encoded = encode_list(&weaknesses);
        assert_eq!(decode_set(&encoded), weaknesses);
    }

    #[test]
    fn test_stats_round_trip_preserves_order() {
        let mut stats = IndexMap::new();
        for (name, value) in [
            ("hp", 45u32),
            ("attack", 49),
            ("defense", 49),
            ("special-attack", 65),
            ("special-defense", 65),
            ("speed", 45),
        ] {
            stats.insert(name.to_string(), value);
        }

        let encoded = encode_stats(&stats);
        assert_eq!(
            encoded,
            "hp: 45, attack: 49, defense: 49, special-attack: 65, special-defense: 65, speed: 45"
        );
        assert_eq!(decode_stats(&encoded).unwrap(), stats);
    }

    #[test]
    fn test_malformed_stats_rejected() {
        assert!(decode_stats("hp").is_err());
        assert!(decode_stats("hp: many").is_err());
    }

    #[test]
    fn test_gender_round_trip() {
        let gender = vec![Gender::Male, Gender::Female];
        let encoded = encode_gender(&gender).unwrap();
        assert_eq!(encoded, r#"["male","female"]"#);
        assert_eq!(decode_gender(&encoded).unwrap(), gender);
    }

    #[test]
    fn test_evolutions_round_trip() {
        let evolutions = vec![
            EvolutionEntry {
                id: "0001".to_string(),
                name: "bulbasaur".to_string(),
                image_url: Some("artwork/1.png".to_string()),
            },
            EvolutionEntry {
                id: "0002".to_string(),
                name: "ivysaur".to_string(),
                image_url: None,
            },
        ];
        let encoded = encode_evolutions(&evolutions).unwrap();
        assert_eq!(decode_evolutions(&encoded).unwrap(), evolutions);
    }
}
