use anyhow::{Context, Result};
use rusqlite::params;

use super::connection::DbConn;
use super::models::Tournament;

pub fn list_recent(conn: &mut DbConn, limit: usize) -> Result<Vec<Tournament>> {
    let sql = "SELECT IdTorneo, Nombre, Estado, MaxParejas, Reglamento FROM Torneos ORDER BY IdTorneo DESC LIMIT ?1";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![limit as i64], parse_tournament_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to list tournaments")?;

    Ok(rows)
}

pub fn count(conn: &mut DbConn) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM Torneos", [], |r| r.get(0))
        .context("Failed to count tournaments")
}

fn parse_tournament_row(row: &rusqlite::Row) -> rusqlite::Result<Tournament> {
    Ok(Tournament {
        id: row.get(0)?,
        name: row.get(1)?,
        status: row.get(2)?,
        max_pairs: row.get(3)?,
        rules: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_support::demo_pool;

    #[test]
    fn test_list_recent_tournaments() {
        let (_dir, pool) = demo_pool();
        let mut conn = pool.get().unwrap();

        let tournaments = list_recent(&mut conn, 30).unwrap();
        assert_eq!(tournaments.len(), 2);
        assert_eq!(tournaments[0].name, "Clausura");
        assert_eq!(tournaments[0].rules, None);
        assert_eq!(tournaments[1].max_pairs, 16);
        assert_eq!(count(&mut conn).unwrap(), 2);
    }
}
