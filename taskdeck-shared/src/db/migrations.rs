/// Database migration runner
///
/// Runs the SQL migrations embedded from this crate's `migrations/`
/// directory. Each migration is a `{version}_{name}.sql` file applied once,
/// in order, tracked in sqlx's `_sqlx_migrations` table.
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::db::migrations::run_migrations;
/// use taskdeck_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
/// run_migrations(&pool).await?;
/// # Ok(())
/// # }
/// ```

use sqlx::postgres::PgPool;
use tracing::{info, warn};

/// Runs all pending database migrations
///
/// # Errors
///
/// Returns an error if a migration fails to execute or a previously applied
/// migration file was modified.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Starting database migrations");

    let migrations = sqlx::migrate!("./migrations");

    match migrations.run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}
