use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

use crate::store::{CatalogStore, ListItem, OrderBy, SortDirection};

pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Service-level failure, mapped to a status code by the router.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(&'static str),
    Internal(anyhow::Error),
}

#[derive(Debug, Serialize)]
pub struct ListEnvelope {
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
    pub data: Vec<ListItem>,
}

#[derive(Debug, PartialEq)]
pub struct ListQuery {
    pub page: u64,
    pub page_size: u64,
    pub order: OrderBy,
    pub direction: SortDirection,
    pub keyword: Option<String>,
}

/// Split the query string into key/value pairs; a bare key counts as present
/// with an empty value.
fn query_params(path: &str) -> HashMap<String, String> {
    let query = path.split('?').nth(1).unwrap_or("");
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => (pair.to_string(), String::new()),
        })
        .collect()
}

pub fn parse_list_query(path: &str) -> Result<ListQuery, String> {
    let params = query_params(path);

    let page = match params.get("page") {
        Some(raw) => raw
            .parse::<u64>()
            .ok()
            .filter(|p| *p >= 1)
            .ok_or_else(|| format!("Invalid page: {:?}", raw))?,
        None => 1,
    };

    let page_size = match params.get("page_size") {
        Some(raw) => raw
            .parse::<u64>()
            .ok()
            .filter(|p| *p >= 1)
            .ok_or_else(|| format!("Invalid page_size: {:?}", raw))?,
        None => DEFAULT_PAGE_SIZE,
    };

    let order = match params.get("order") {
        Some(raw) => OrderBy::parse(raw).ok_or_else(|| format!("Invalid order: {:?}", raw))?,
        None => OrderBy::Id,
    };

    let direction = match params.get("direction") {
        Some(raw) => {
            SortDirection::parse(raw).ok_or_else(|| format!("Invalid direction: {:?}", raw))?
        }
        None => SortDirection::Asc,
    };

    let keyword = match params.get("keyword") {
        Some(raw) if raw.is_empty() => return Err("Keyword is required".to_string()),
        Some(raw) => Some(raw.clone()),
        None => None,
    };

    Ok(ListQuery {
        page,
        page_size,
        order,
        direction,
        keyword,
    })
}

pub fn total_pages(total: u64, page_size: u64) -> u64 {
    total.div_ceil(page_size)
}

pub fn list_payload(db_path: &Path, path: &str) -> Result<String, ApiError> {
    let query = parse_list_query(path).map_err(ApiError::BadRequest)?;

    let store = CatalogStore::open_read_only(db_path).map_err(ApiError::Internal)?;
    let total = store
        .count(query.keyword.as_deref())
        .map_err(ApiError::Internal)?;
    let data = store
        .list_page(
            query.page,
            query.page_size,
            query.order,
            query.direction,
            query.keyword.as_deref(),
        )
        .map_err(ApiError::Internal)?;

    let envelope = ListEnvelope {
        page: query.page,
        page_size: query.page_size,
        total_pages: total_pages(total, query.page_size),
        data,
    };

    serde_json::to_string(&envelope).map_err(|err| ApiError::Internal(err.into()))
}

pub fn details_payload(db_path: &Path, id_segment: &str) -> Result<String, ApiError> {
    let id: u32 = id_segment
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid id: {:?}", id_segment)))?;

    let store = CatalogStore::open_read_only(db_path).map_err(ApiError::Internal)?;
    let record = store.details(id).map_err(ApiError::Internal)?;

    match record {
        Some(record) => {
            serde_json::to_string(&record).map_err(|err| ApiError::Internal(err.into()))
        }
        None => Err(ApiError::NotFound("Pokemon not found")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_defaults() {
        let query = parse_list_query("/pokemon/list").unwrap();
        assert_eq!(
            query,
            ListQuery {
                page: 1,
                page_size: DEFAULT_PAGE_SIZE,
                order: OrderBy::Id,
                direction: SortDirection::Asc,
                keyword: None,
            }
        );
    }

    #[test]
    fn test_list_query_full() {
        let query = parse_list_query(
            "/pokemon/list?page=3&page_size=10&order=name&direction=desc&keyword=saur",
        )
        .unwrap();
        assert_eq!(query.page, 3);
        assert_eq!(query.page_size, 10);
        assert_eq!(query.order, OrderBy::Name);
        assert_eq!(query.direction, SortDirection::Desc);
        assert_eq!(query.keyword.as_deref(), Some("saur"));
    }

    #[test]
    fn test_list_query_rejects_bad_values() {
        assert!(parse_list_query("/pokemon/list?page=0").is_err());
        assert!(parse_list_query("/pokemon/list?page=abc").is_err());
        assert!(parse_list_query("/pokemon/list?page_size=0").is_err());
        assert!(parse_list_query("/pokemon/list?order=weaknesses").is_err());
        assert!(parse_list_query("/pokemon/list?direction=sideways").is_err());
    }

    #[test]
    fn test_empty_keyword_rejected() {
        assert!(parse_list_query("/pokemon/list?keyword=").is_err());
        assert!(parse_list_query("/pokemon/list?keyword").is_err());
    }

    #[test]
    fn test_total_pages_arithmetic() {
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(19, 20), 1);
        assert_eq!(total_pages(20, 20), 1);
        assert_eq!(total_pages(21, 20), 2);
        assert_eq!(total_pages(1100, 20), 55);
    }
}
