pub mod encode;
pub mod sqlite;

pub use sqlite::{CatalogStore, ListItem, OrderBy, SortDirection};
