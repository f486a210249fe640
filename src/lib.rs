pub mod cli;
pub mod ingest;
pub mod record;
pub mod server;
pub mod store;
pub mod upstream;

pub use cli::{Cli, Commands};
