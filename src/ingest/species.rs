use crate::record::Gender;
use crate::upstream::Species;

/// English genus of the species, or "Unknown" when the species data or the
/// English entry is missing.
pub fn category(species: Option<&Species>) -> String {
    species
        .and_then(|s| s.genera.iter().find(|g| g.language.name == "en"))
        .map(|g| g.genus.clone())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Collapse the upstream gender rate into the set of possible genders.
///
/// The rate is eighths-female (-1 meaning genderless); only the possibility
/// set survives, the actual split is discarded.
pub fn gender_set(species: Option<&Species>) -> Vec<Gender> {
    let Some(species) = species else {
        return vec![Gender::Genderless];
    };

    match species.gender_rate {
        -1 => vec![Gender::Genderless],
        0 => vec![Gender::Male],
        8 => vec![Gender::Female],
        _ => vec![Gender::Male, Gender::Female],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::{Genus, NamedResource};

    fn species(gender_rate: i32, genera: Vec<(&str, &str)>) -> Species {
        Species {
            genera: genera
                .into_iter()
                .map(|(lang, genus)| Genus {
                    genus: genus.to_string(),
                    language: NamedResource {
                        name: lang.to_string(),
                        url: String::new(),
                    },
                })
                .collect(),
            gender_rate,
            evolution_chain: None,
        }
    }

    #[test]
    fn test_category_picks_english_genus() {
        let s = species(4, vec![("ja", "たねポケモン"), ("en", "Seed Pokémon")]);
        assert_eq!(category(Some(&s)), "Seed Pokémon");
    }

    #[test]
    fn test_category_unknown_without_english_entry() {
        let s = species(4, vec![("ja", "たねポケモン")]);
        assert_eq!(category(Some(&s)), "Unknown");
    }

    #[test]
    fn test_category_unknown_without_species() {
        assert_eq!(category(None), "Unknown");
    }

    #[test]
    fn test_gender_rate_mapping() {
        assert_eq!(gender_set(Some(&species(-1, vec![]))), vec![Gender::Genderless]);
        assert_eq!(gender_set(Some(&species(0, vec![]))), vec![Gender::Male]);
        assert_eq!(gender_set(Some(&species(8, vec![]))), vec![Gender::Female]);
        assert_eq!(
            gender_set(Some(&species(4, vec![]))),
            vec![Gender::Male, Gender::Female]
        );
        assert_eq!(
            gender_set(Some(&species(1, vec![]))),
            vec![Gender::Male, Gender::Female]
        );
    }

    #[test]
    fn test_missing_species_defaults_to_genderless() {
        assert_eq!(gender_set(None), vec![Gender::Genderless]);
    }
}
