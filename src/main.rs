use anyhow::{bail, Context, Result};
use pokedex_catalog::{
    cli::{Cli, Commands},
    ingest::run_ingestion,
    server::run_server,
    store::CatalogStore,
    upstream::PokeClient,
};
use std::time::Instant;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse_args();

    match cli.command {
        Commands::Ingest {
            output_db,
            offset,
            limit,
            base_url,
        } => {
            let start = Instant::now();

            let client = PokeClient::new(&base_url)?;
            println!("Fetching up to {} entries from {}...", limit, base_url);
            let (records, report) = run_ingestion(&client, offset, limit)?;

            println!("Saving {} records...", records.len());
            // A persistence failure, opening the database included, must not
            // take the process down; the batch simply stays uncommitted.
            let saved = CatalogStore::create(&output_db)
                .and_then(|mut store| store.save_batch(&records));
            match saved {
                Ok(count) => {
                    let elapsed = start.elapsed();
                    println!(
                        "\nSaved {} records to {:?} ({} over the id ceiling, {} failed) in {:.1}s",
                        count,
                        output_db,
                        report.over_ceiling,
                        report.failed,
                        elapsed.as_secs_f64()
                    );
                }
                Err(err) => log::error!("failed to persist the batch: {:#}", err),
            }
        }

        Commands::Serve { db, bind } => {
            // A missing or empty database is an operator error, not something
            // to serve 500s over.
            let store = CatalogStore::open_read_only(&db)
                .with_context(|| format!("Cannot serve from {:?}", db))?;
            if store.count(None)? == 0 {
                bail!(
                    "Database {:?} is empty; run `pokedex-catalog ingest` first",
                    db
                );
            }
            drop(store);

            run_server(&bind, &db)?;
        }
    }

    Ok(())
}
