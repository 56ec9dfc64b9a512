use anyhow::{Context, Result};
use rusqlite::params;

use super::connection::DbConn;
use super::like_pattern;
use super::models::Match;

const MATCH_COLUMNS: &str = "IdPartido, ParejaUno, ParejaDos, Cancha, Torneo, Estado, \
     Fase, Zona, HoraInicio, HoraFin, Fecha, Ganador";

pub fn list_recent(conn: &mut DbConn, limit: usize) -> Result<Vec<Match>> {
    let sql = format!("SELECT {MATCH_COLUMNS} FROM Partidos ORDER BY IdPartido DESC LIMIT ?1");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![limit as i64], parse_match_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to list recent matches")?;

    Ok(rows)
}

/// Matches whose winning pair label mentions `name`, newest first.
pub fn won_by_player(conn: &mut DbConn, name: &str) -> Result<Vec<Match>> {
    let sql = format!(
        "SELECT {MATCH_COLUMNS} FROM Partidos \
         WHERE fold_case(Ganador) LIKE ?1 ESCAPE '\\' \
         ORDER BY Fecha DESC, IdPartido DESC"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![like_pattern(&name.to_lowercase())], parse_match_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to query matches won by player")?;

    Ok(rows)
}

pub fn count(conn: &mut DbConn) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM Partidos", [], |r| r.get(0))
        .context("Failed to count matches")
}

fn parse_match_row(row: &rusqlite::Row) -> rusqlite::Result<Match> {
    Ok(Match {
        id: row.get(0)?,
        pair_one: row.get(1)?,
        pair_two: row.get(2)?,
        court: row.get(3)?,
        tournament: row.get(4)?,
        status: row.get(5)?,
        phase: row.get(6)?,
        zone: row.get(7)?,
        start_time: row.get(8)?,
        end_time: row.get(9)?,
        date: row.get(10)?,
        winner: row.get(11)?,
    })
}
