//! Database schema migrations.
//!
//! Migration files are stored in this directory with the naming convention
//! `migration_NN_up.sql`, which upgrades the schema from version `NN-1` to version `NN`.
//!
//! Every migration only creates what is missing (`IF NOT EXISTS`). Nothing is ever dropped,
//! renamed or rewritten, so running a migration against a database that already has its objects
//! is harmless.

use anyhow::{bail, Context, Result};
use sqlx::{Executor, SqlitePool};
use tracing::debug;

/// A database migration.
struct Migration {
    /// The version this migration brings the database to.
    version: i32,
    /// SQL to execute when upgrading to this version.
    up_sql: &'static str,
}

/// All available migrations in order.
const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        up_sql: include_str!("migration_01_up.sql"),
    },
    Migration {
        version: 2,
        up_sql: include_str!("migration_02_up.sql"),
    },
];

/// The schema version this program reads and writes.
pub(crate) const CURRENT_VERSION: i32 = 2;

/// Creates the `schema_version` table at version 0 if it does not exist.
pub(crate) async fn bootstrap(pool: &SqlitePool) -> Result<()> {
    sqlx::query("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL)")
        .execute(pool)
        .await
        .context("Failed to create schema_version table")?;

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM schema_version")
        .fetch_one(pool)
        .await
        .context("Failed to read schema_version")?;

    if count == 0 {
        sqlx::query("INSERT INTO schema_version (version) VALUES (0)")
            .execute(pool)
            .await
            .context("Failed to insert initial schema version")?;
    }
    Ok(())
}

/// Reads the schema version recorded in the database.
pub(crate) async fn current_version(pool: &SqlitePool) -> Result<i32> {
    let (version,): (i32,) = sqlx::query_as("SELECT MAX(version) FROM schema_version")
        .fetch_one(pool)
        .await
        .context("Failed to query schema version")?;
    Ok(version)
}

/// Runs migrations to bring the database from `current_ver` to `target_ver`.
///
/// Each migration is executed within a transaction that includes the schema_version update.
/// Validates all required migrations exist before running any of them.
pub(crate) async fn run(pool: &SqlitePool, current_ver: i32, target_ver: i32) -> Result<()> {
    if current_ver == target_ver {
        debug!("Database already at target version {target_ver}, no migrations needed");
        return Ok(());
    }

    if current_ver > target_ver {
        bail!(
            "The database schema is at version {current_ver} but this program only supports up \
            to version {target_ver}. Is a newer version of expenses available?"
        );
    }

    // Validate all required migrations exist before running any
    validate_migrations(current_ver, target_ver)?;

    for version in (current_ver + 1)..=target_ver {
        let migration = MIGRATIONS
            .iter()
            .find(|m| m.version == version)
            .with_context(|| format!("Migration {version} not found"))?;

        debug!("Running migration {version:02}");
        run_single_migration(pool, migration.up_sql, version).await?;
    }

    debug!("Migration complete, schema now at version {target_ver}");
    Ok(())
}

/// Executes a single migration's SQL and updates schema_version, all within a transaction.
async fn run_single_migration(pool: &SqlitePool, sql: &str, new_version: i32) -> Result<()> {
    let mut tx = pool
        .begin()
        .await
        .context("Failed to begin migration transaction")?;

    // Execute the migration SQL (supports multiple statements)
    (&mut *tx)
        .execute(sql)
        .await
        .with_context(|| format!("Failed to execute migration {new_version:02}"))?;

    sqlx::query("DELETE FROM schema_version")
        .execute(&mut *tx)
        .await
        .context("Failed to clear schema_version")?;

    sqlx::query("INSERT INTO schema_version (version) VALUES (?)")
        .bind(new_version)
        .execute(&mut *tx)
        .await
        .context("Failed to update schema_version")?;

    tx.commit()
        .await
        .context("Failed to commit migration transaction")?;

    Ok(())
}

/// Validates that migrations are available for all versions needed to go from
/// `current_version` to `target_version`.
fn validate_migrations(current_version: i32, target_version: i32) -> Result<()> {
    for version in (current_version + 1)..=target_version {
        if !MIGRATIONS.iter().any(|m| m.version == version) {
            bail!(
                "Migration {version} is missing but required to migrate from version \
                {current_version} to {target_version}"
            );
        }
    }
    Ok(())
}
