//! Database migration command.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `SQLite` connection string (default: sqlite://caps_store.db)

use secrecy::SecretString;
use tracing::info;

use caps_store_api::db;

/// Run database migrations.
///
/// # Errors
///
/// Returns an error if the database cannot be reached or a migration fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .map_or_else(|_| SecretString::from("sqlite://caps_store.db"), SecretString::from);

    info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    info!("Running migrations...");
    db::MIGRATOR.run(&pool).await?;

    info!("Migrations complete!");
    Ok(())
}
