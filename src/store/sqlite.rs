use anyhow::{Context, Result};
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use serde::Serialize;
use std::path::Path;

use super::encode;
use crate::record::{dex_id, PokemonRecord};

const CREATE_TABLE_SQL: &str = "
CREATE TABLE IF NOT EXISTS pokemon (
    id TEXT PRIMARY KEY,
    name TEXT,
    category TEXT,
    weight REAL,
    height REAL,
    abilities TEXT,
    gender TEXT,
    types TEXT,
    weaknesses TEXT,
    stats TEXT,
    image_url TEXT,
    evolutions TEXT
)";

const UPSERT_SQL: &str = "
INSERT OR REPLACE INTO pokemon
    (id, name, category, weight, height, abilities, gender, types, weaknesses, stats, image_url, evolutions)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)";

const RECORD_COLUMNS: &str =
    "id, name, category, weight, height, abilities, gender, types, weaknesses, stats, image_url, evolutions";

/// Sortable columns of the list query. Restricting to this set keeps caller
/// input out of the SQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderBy {
    Id,
    Name,
    Height,
    Weight,
}

impl OrderBy {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "id" => Some(Self::Id),
            "name" => Some(Self::Name),
            "height" => Some(Self::Height),
            "weight" => Some(Self::Weight),
            _ => None,
        }
    }

    fn column(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Height => "height",
            Self::Weight => "weight",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// One row of the list envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
}

/// Single-table persistence over SQLite.
///
/// The ingestion writer holds one connection for the whole batch and commits
/// it as a unit; the service opens a fresh read-only store per query.
pub struct CatalogStore {
    conn: Connection,
}

impl CatalogStore {
    /// Open (creating if needed) a writable store with the table in place.
    pub fn create(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open database {:?}", db_path))?;
        conn.execute(CREATE_TABLE_SQL, [])
            .context("Failed to create the pokemon table")?;
        Ok(Self { conn })
    }

    /// Open an existing store read-only; a missing database file is an error.
    pub fn open_read_only(db_path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(db_path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .with_context(|| format!("Failed to open database {:?}", db_path))?;
        Ok(Self { conn })
    }

    /// Upsert the whole batch inside one transaction. Either every record is
    /// committed or, on any failure, none are.
    pub fn save_batch(&mut self, records: &[PokemonRecord]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(UPSERT_SQL)?;
            for record in records {
                stmt.execute(params![
                    record.dex_id(),
                    record.name,
                    record.category,
                    record.weight_kg,
                    record.height_m,
                    encode::encode_list(&record.abilities),
                    encode::encode_gender(&record.gender)?,
                    encode::encode_list(&record.types),
                    encode::encode_list(&record.weaknesses),
                    encode::encode_stats(&record.stats),
                    record.image_url,
                    encode::encode_evolutions(&record.evolutions)?,
                ])
                .with_context(|| format!("Failed to write record {}", record.name))?;
            }
        }
        tx.commit().context("Failed to commit the batch")?;
        Ok(records.len())
    }

    /// Total rows, optionally narrowed by a search keyword.
    pub fn count(&self, keyword: Option<&str>) -> Result<u64> {
        let count: i64 = match keyword {
            Some(kw) => {
                let (pattern, dex) = keyword_params(kw);
                self.conn.query_row(
                    "SELECT COUNT(*) FROM pokemon WHERE name LIKE ?1 OR id = ?2",
                    params![pattern, dex],
                    |row| row.get(0),
                )
            }
            None => self
                .conn
                .query_row("SELECT COUNT(*) FROM pokemon", [], |row| row.get(0)),
        }
        .context("Failed to count records")?;

        Ok(count as u64)
    }

    /// One page of `{id, name, image_url}` rows. `page` is 1-based.
    pub fn list_page(
        &self,
        page: u64,
        page_size: u64,
        order: OrderBy,
        direction: SortDirection,
        keyword: Option<&str>,
    ) -> Result<Vec<ListItem>> {
        // Both values arrive from the query string unbounded; an absurd page
        // must surface as a query error, not wrap or panic.
        let offset = page
            .saturating_sub(1)
            .checked_mul(page_size)
            .context("Page window out of range")?;
        let mut sql = String::from("SELECT id, name, image_url FROM pokemon");
        if keyword.is_some() {
            sql.push_str(" WHERE name LIKE ?1 OR id = ?2");
        }
        sql.push_str(&format!(
            " ORDER BY {} {} LIMIT {} OFFSET {}",
            order.column(),
            direction.keyword(),
            page_size,
            offset
        ));

        let mut stmt = self.conn.prepare(&sql)?;
        let map_row = |row: &rusqlite::Row| {
            Ok(ListItem {
                id: row.get(0)?,
                name: row.get(1)?,
                image_url: row.get(2)?,
            })
        };

        let rows = match keyword {
            Some(kw) => {
                let (pattern, dex) = keyword_params(kw);
                stmt.query_map(params![pattern, dex], map_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()
            }
            None => stmt
                .query_map([], map_row)?
                .collect::<rusqlite::Result<Vec<_>>>(),
        }
        .context("Failed to query the list page")?;

        Ok(rows)
    }

    /// Full record by numeric id, decoded back into structured form.
    pub fn details(&self, id: u32) -> Result<Option<PokemonRecord>> {
        let sql = format!("SELECT {} FROM pokemon WHERE id = ?1", RECORD_COLUMNS);
        let raw = self
            .conn
            .query_row(&sql, [dex_id(id)], |row| {
                Ok(RawRecord {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    category: row.get(2)?,
                    weight: row.get(3)?,
                    height: row.get(4)?,
                    abilities: row.get(5)?,
                    gender: row.get(6)?,
                    types: row.get(7)?,
                    weaknesses: row.get(8)?,
                    stats: row.get(9)?,
                    image_url: row.get(10)?,
                    evolutions: row.get(11)?,
                })
            })
            .optional()
            .context("Failed to query record details")?;

        raw.map(RawRecord::decode).transpose()
    }
}

/// LIKE pattern on the name plus, when the keyword is numeric, an exact
/// zero-padded id match.
fn keyword_params(keyword: &str) -> (String, String) {
    let pattern = format!("%{}%", keyword.to_lowercase());
    let dex = keyword
        .parse::<u32>()
        .map(dex_id)
        .unwrap_or_default();
    (pattern, dex)
}

/// A `pokemon` row as stored, before decoding the encoded columns.
struct RawRecord {
    id: String,
    name: String,
    category: String,
    weight: f64,
    height: f64,
    abilities: String,
    gender: String,
    types: String,
    weaknesses: String,
    stats: String,
    image_url: Option<String>,
    evolutions: String,
}

impl RawRecord {
    fn decode(self) -> Result<PokemonRecord> {
        Ok(PokemonRecord {
            id: self
                .id
                .parse()
                .with_context(|| format!("Malformed id key {:?}", self.id))?,
            name: self.name,
            category: self.category,
            weight_kg: self.weight,
            height_m: self.height,
            abilities: encode::decode_list(&self.abilities),
            gender: encode::decode_gender(&self.gender)?,
            types: encode::decode_list(&self.types),
            weaknesses: encode::decode_set(&self.weaknesses),
            stats: encode::decode_stats(&self.stats)?,
            image_url: self.image_url,
            evolutions: encode::decode_evolutions(&self.evolutions)?,
        })
    }
}
