use anyhow::{Context, Result};

use super::connection::DbConn;

const SCHEMA_SQL: &str = include_str!("schema.sql");
const DEMO_DATA_SQL: &str = include_str!("demo_data.sql");

/// Creates any missing tables. Existing data is left untouched.
pub fn apply_schema(conn: &mut DbConn) -> Result<()> {
    run_script(conn, SCHEMA_SQL).context("Failed to apply database schema")?;
    log::info!("Database schema applied");
    Ok(())
}

/// Loads the demo rows into an empty store. A populated store is left as is.
pub fn load_demo_data(conn: &mut DbConn) -> Result<()> {
    let tx = conn.transaction()?;
    let existing: i64 = tx
        .query_row("SELECT COUNT(*) FROM Jugadores", [], |row| row.get(0))
        .context("Failed to count players")?;
    if existing > 0 {
        log::warn!("Database already has {existing} players, demo data not loaded");
        return Ok(());
    }

    for (idx, statement) in split_sql_statements(DEMO_DATA_SQL).iter().enumerate() {
        tx.execute(statement, [])
            .with_context(|| format!("Failed to execute demo statement {}", idx + 1))?;
    }
    tx.commit().context("Failed to commit demo data")?;

    log::info!("Demo data loaded");
    Ok(())
}

fn run_script(conn: &mut DbConn, script: &str) -> Result<()> {
    for (idx, statement) in split_sql_statements(script).iter().enumerate() {
        execute_sql(conn, statement)
            .with_context(|| format!("Failed to execute statement {}", idx + 1))?;
    }
    Ok(())
}

fn split_sql_statements(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn execute_sql(conn: &mut DbConn, sql: &str) -> Result<()> {
    conn.execute(sql, [])
        .context("Failed to execute SQL statement")
        .map(|_| ())
}
