//! End-to-end service tests: structured records are written through the
//! store, then read back through the HTTP routing layer.

use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::NamedTempFile;

use pokedex_catalog::record::{dex_id, EvolutionEntry, Gender, PokemonRecord};
use pokedex_catalog::server::routes::route_request;
use pokedex_catalog::store::CatalogStore;

/// Shared test database, created once and reused for all tests.
static TEST_DB: Lazy<Mutex<TestDatabase>> = Lazy::new(|| Mutex::new(TestDatabase::new()));

struct TestDatabase {
    _temp_file: NamedTempFile,
    db_path: PathBuf,
}

impl TestDatabase {
    fn new() -> Self {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let db_path = temp_file.path().to_path_buf();

        let mut store = CatalogStore::create(&db_path).expect("Failed to create test database");
        store
            .save_batch(&seed_family())
            .expect("Failed to seed test database");

        Self {
            _temp_file: temp_file,
            db_path,
        }
    }
}

fn db_path() -> PathBuf {
    TEST_DB.lock().unwrap().db_path.clone()
}

fn record(id: u32, name: &str, weight_kg: f64, family: &[(u32, &str)]) -> PokemonRecord {
    let mut stats = indexmap::IndexMap::new();
    for (stat, value) in [
        ("hp", 45u32),
        ("attack", 49),
        ("defense", 49),
        ("special-attack", 65),
        ("special-defense", 65),
        ("speed", 45),
    ] {
        stats.insert(stat.to_string(), value);
    }

    let weaknesses: BTreeSet<String> = ["fire", "flying", "ice", "psychic"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    PokemonRecord {
        id,
        name: name.to_string(),
        category: "Seed Pokémon".to_string(),
        weight_kg,
        height_m: 0.7,
        abilities: vec!["overgrow".to_string()],
        gender: vec![Gender::Male, Gender::Female],
        types: vec!["grass".to_string(), "poison".to_string()],
        weaknesses,
        stats,
        image_url: Some(format!("artwork/{}.png", id)),
        evolutions: family
            .iter()
            .map(|(fid, fname)| EvolutionEntry {
                id: dex_id(*fid),
                name: fname.to_string(),
                image_url: Some(format!("artwork/{}.png", fid)),
            })
            .collect(),
    }
}

fn seed_family() -> Vec<PokemonRecord> {
    let family = [(1, "bulbasaur"), (2, "ivysaur"), (3, "venusaur")];
    vec![
        record(1, "bulbasaur", 6.9, &family),
        record(2, "ivysaur", 13.0, &family),
        record(3, "venusaur", 100.0, &family),
    ]
}

fn get(path: &str) -> (u16, Value) {
    let db = db_path();
    let response = route_request("GET", path, &db);
    let body: Value =
        serde_json::from_str(&response.body).expect("response body should be valid JSON");
    (response.status_code, body)
}

#[test]
fn test_list_envelope_shape() {
    let (status, body) = get("/pokemon/list?page=1&page_size=20");
    assert_eq!(status, 200);
    assert_eq!(body["page"], 1);
    assert_eq!(body["page_size"], 20);
    // 3 rows at page_size 20 still make exactly one page
    assert_eq!(body["total_pages"], 1);

    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 3);
    assert_eq!(data[0]["id"], "0001");
    assert_eq!(data[0]["name"], "bulbasaur");
    assert_eq!(data[0]["image_url"], "artwork/1.png");
}

#[test]
fn test_list_pagination_splits_rows() {
    let (status, body) = get("/pokemon/list?page=2&page_size=2");
    assert_eq!(status, 200);
    assert_eq!(body["total_pages"], 2);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["name"], "venusaur");
}

#[test]
fn test_list_ordering() {
    let (_, body) = get("/pokemon/list?order=weight&direction=desc");
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["venusaur", "ivysaur", "bulbasaur"]);
}

#[test]
fn test_list_keyword_search() {
    let (status, body) = get("/pokemon/list?keyword=ivy");
    assert_eq!(status, 200);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["name"], "ivysaur");

    let (_, body) = get("/pokemon/list?keyword=2");
    assert_eq!(body["data"][0]["name"], "ivysaur");
}

#[test]
fn test_empty_keyword_is_bad_request() {
    let (status, body) = get("/pokemon/list?keyword=");
    assert_eq!(status, 400);
    assert!(body["error"].as_str().is_some());
}

#[test]
fn test_huge_page_surfaces_as_error_not_panic() {
    // page and page_size both parse as any u64; their product must not
    // bring the service down
    let (status, body) = get("/pokemon/list?page=18446744073709551615&page_size=20");
    assert_eq!(status, 500);
    assert!(body["error"].as_str().is_some());

    // the service keeps answering afterwards
    let (status, _) = get("/pokemon/list");
    assert_eq!(status, 200);
}

#[test]
fn test_invalid_order_is_bad_request() {
    let (status, _) = get("/pokemon/list?order=stats");
    assert_eq!(status, 400);
}

#[test]
fn test_details_returns_full_record() {
    let (status, body) = get("/pokemon/details/1");
    assert_eq!(status, 200);
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "bulbasaur");
    assert_eq!(body["category"], "Seed Pokémon");
    assert_eq!(body["weight"], 6.9);
    assert_eq!(body["stats"]["hp"], 45);
    assert_eq!(body["gender"], serde_json::json!(["male", "female"]));

    let evolutions = body["evolutions"].as_array().unwrap();
    assert_eq!(evolutions.len(), 3);
    assert_eq!(evolutions[0]["id"], "0001");
    assert_eq!(evolutions[2]["name"], "venusaur");
}

#[test]
fn test_details_unknown_id_is_not_found() {
    let (status, body) = get("/pokemon/details/151");
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Pokemon not found");
}

#[test]
fn test_details_malformed_id_is_bad_request() {
    let (status, _) = get("/pokemon/details/abc");
    assert_eq!(status, 400);
}

#[test]
fn test_unknown_route_is_not_found() {
    let (status, _) = get("/pokemon/search?keyword=ivy");
    assert_eq!(status, 404);
}
