use std::time::Duration;

use anyhow::{Context, Result};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;
use serde::Serialize;

use crate::config::settings::DatabaseSettings;

pub type DbPool = r2d2::Pool<SqliteConnectionManager>;
pub type DbConn = r2d2::PooledConnection<SqliteConnectionManager>;

/// Row returned by the connectivity probe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeRow {
    pub test: i64,
}

pub fn create_pool(settings: &DatabaseSettings) -> Result<DbPool> {
    let manager = build_manager(&settings.path);
    build_pool(manager, settings)
}

fn build_manager(path: &str) -> SqliteConnectionManager {
    SqliteConnectionManager::file(path).with_init(|conn| {
        conn.execute_batch("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")?;
        register_fold_case(conn)
    })
}

/// `fold_case(text)`: Unicode lowercase. SQLite's own `lower()` and `LIKE`
/// only fold ASCII, so accented names would never match across case.
fn register_fold_case(conn: &mut Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        "fold_case",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value: Option<String> = ctx.get(0)?;
            Ok(value.map(|v| v.to_lowercase()))
        },
    )
}

fn build_pool(manager: SqliteConnectionManager, settings: &DatabaseSettings) -> Result<DbPool> {
    r2d2::Pool::builder()
        .max_size(settings.pool_size)
        .connection_timeout(Duration::from_secs(settings.acquire_timeout_secs))
        .build(manager)
        .context("Failed to create database connection pool")
}

/// Blocks until a connection is free or the pool's acquire timeout elapses.
pub fn get_connection(pool: &DbPool) -> Result<DbConn> {
    pool.get()
        .context("Failed to get database connection from pool")
}

pub fn check_connectivity(pool: &DbPool) -> Result<ProbeRow> {
    let conn = get_connection(pool)?;
    conn.query_row("SELECT 1 AS test", [], |row| {
        Ok(ProbeRow { test: row.get(0)? })
    })
    .context("Connectivity probe query failed")
}
