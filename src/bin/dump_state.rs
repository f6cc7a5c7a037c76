//! Utility to print the stored state tree as JSON
//!
//! Loads through the state store, so the output shows the tree after the
//! shape upgrade and the daily reset. Pass `--raw` for the blob as stored.

use trifit::config::Config;
use trifit::db::{migrations, Database};
use trifit::store::{local_today, StateStore};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    let raw = std::env::args().any(|arg| arg == "--raw");

    eprintln!("Database path: {}", config.database_path.display());
    if !config.database_path.exists() {
        return Err(format!("No database at {}", config.database_path.display()).into());
    }

    let database = Database::new(&config.database_path)?;
    database.with_conn(migrations::run_migrations)?;
    let store = StateStore::new(database);

    if raw {
        match store.raw()? {
            Some(blob) => println!("{}", blob),
            None => eprintln!("No state stored yet"),
        }
    } else {
        let state = store.load(local_today())?;
        println!("{}", serde_json::to_string_pretty(&state)?);
    }

    Ok(())
}
