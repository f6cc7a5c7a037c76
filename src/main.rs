//! TriFit
//!
//! An MCP server for nutrition, fasting and workout tracking.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};

use trifit::build_info;
use trifit::config::Config;
use trifit::db::{self, Database};
use trifit::mcp::TrifitService;
use trifit::store::StateStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    // Logging goes to stderr so it does not interfere with MCP stdio
    tracing_subscriber::fmt()
        .with_env_filter(config.env_filter())
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    let db_path = config.database_path.clone();
    eprintln!("Database path: {}", db_path.display());

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    eprintln!("Initializing database...");
    let database = Database::new(&db_path)?;

    database.with_conn(|conn| {
        db::migrations::run_migrations(conn)?;
        let version = db::migrations::get_schema_version(conn)?;
        eprintln!("Database schema version: {}", version);
        Ok(())
    })?;

    let service = TrifitService::new(db_path, StateStore::new(database));
    tracing::info!("TriFit ready");

    let transport = (stdin(), stdout());
    let server = service.serve(transport).await?;
    server.waiting().await?;

    Ok(())
}
