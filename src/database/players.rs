use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

use super::connection::DbConn;
use super::like_pattern;
use super::models::Player;

const PLAYER_COLUMNS: &str =
    "IdJugador, Nombre, Apellido, FechaNacimiento, Gmail, Telefono, Ranking";

/// Players whose full name contains `name`, ignoring case.
///
/// An empty `name` is the "everyone" sentinel and returns the same set as
/// [`list_all`]; it is not treated as a pattern.
pub fn find_by_name(conn: &mut DbConn, name: &str) -> Result<Vec<Player>> {
    if name.is_empty() {
        return list_all(conn);
    }

    let sql = format!(
        "SELECT {PLAYER_COLUMNS} FROM Jugadores \
         WHERE fold_case(Nombre || ' ' || Apellido) LIKE ?1 ESCAPE '\\' \
         ORDER BY IdJugador"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![like_pattern(&name.to_lowercase())], parse_player_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to query players by name")?;

    Ok(rows)
}

/// Best single match for `name`: an exact full, first or last name match
/// wins over a partial one.
pub fn find_one_by_name(conn: &mut DbConn, name: &str) -> Result<Option<Player>> {
    let sql = format!(
        "SELECT {PLAYER_COLUMNS} FROM Jugadores \
         WHERE fold_case(Nombre || ' ' || Apellido) = ?1 \
            OR fold_case(Nombre) = ?1 \
            OR fold_case(Apellido) = ?1 \
         ORDER BY IdJugador LIMIT 1"
    );

    let exact = conn
        .query_row(&sql, params![name.to_lowercase()], parse_player_row)
        .optional()
        .context("Failed to query player by exact name")?;

    match exact {
        Some(player) => Ok(Some(player)),
        None if name.is_empty() => Ok(None),
        None => Ok(find_by_name(conn, name)?.into_iter().next()),
    }
}

pub fn list_all(conn: &mut DbConn) -> Result<Vec<Player>> {
    let sql = format!("SELECT {PLAYER_COLUMNS} FROM Jugadores ORDER BY IdJugador");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_player_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to list players")?;

    Ok(rows)
}

/// Most recently registered players first.
pub fn list_recent(conn: &mut DbConn, limit: usize) -> Result<Vec<Player>> {
    let sql = format!(
        "SELECT {PLAYER_COLUMNS} FROM Jugadores ORDER BY IdJugador DESC LIMIT ?1"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![limit as i64], parse_player_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to list recent players")?;

    Ok(rows)
}

pub fn count(conn: &mut DbConn) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM Jugadores", [], |r| r.get(0))
        .context("Failed to count players")
}

fn parse_player_row(row: &rusqlite::Row) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        birth_date: row.get(3)?,
        email: row.get(4)?,
        phone: row.get(5)?,
        ranking: row.get(6)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_support::demo_pool;

    fn names(players: &[Player]) -> Vec<String> {
        players.iter().map(Player::full_name).collect()
    }

    #[test]
    fn test_empty_name_returns_everyone() {
        let (_dir, pool) = demo_pool();
        let mut conn = pool.get().unwrap();

        let everyone = list_all(&mut conn).unwrap();
        let sentinel = find_by_name(&mut conn, "").unwrap();

        assert_eq!(everyone.len(), 4);
        assert_eq!(sentinel, everyone);
    }

    #[test]
    fn test_find_by_name_is_case_insensitive_on_full_name() {
        let (_dir, pool) = demo_pool();
        let mut conn = pool.get().unwrap();

        assert_eq!(names(&find_by_name(&mut conn, "LOPEZ").unwrap()), vec!["Ana Lopez"]);
        assert_eq!(names(&find_by_name(&mut conn, "juan p").unwrap()), vec!["Juan Perez"]);
    }

    #[test]
    fn test_accented_names_match_across_case() {
        let (_dir, pool) = demo_pool();
        let mut conn = pool.get().unwrap();
        conn.execute(
            "INSERT INTO Jugadores (Nombre, Apellido, Ranking) VALUES ('LUCÍA', 'Martín', 9)",
            [],
        )
        .unwrap();

        assert_eq!(names(&find_by_name(&mut conn, "lucía").unwrap()), vec!["LUCÍA Martín"]);
        assert_eq!(names(&find_by_name(&mut conn, "MARTÍN").unwrap()), vec!["LUCÍA Martín"]);

        let one = find_one_by_name(&mut conn, "lucía martín").unwrap().unwrap();
        assert_eq!(one.last_name, "Martín");
    }

    #[test]
    fn test_find_by_name_escapes_wildcards() {
        let (_dir, pool) = demo_pool();
        let mut conn = pool.get().unwrap();

        assert!(find_by_name(&mut conn, "%").unwrap().is_empty());
        assert!(find_by_name(&mut conn, "_").unwrap().is_empty());
    }

    #[test]
    fn test_find_one_prefers_exact_match() {
        let (_dir, pool) = demo_pool();
        let mut conn = pool.get().unwrap();

        let exact = find_one_by_name(&mut conn, "perez").unwrap().unwrap();
        assert_eq!(exact.full_name(), "Juan Perez");

        let partial = find_one_by_name(&mut conn, "uci").unwrap().unwrap();
        assert_eq!(partial.full_name(), "Lucia Gomez");

        assert!(find_one_by_name(&mut conn, "Nadie").unwrap().is_none());
    }

    #[test]
    fn test_list_recent_is_newest_first_and_bounded() {
        let (_dir, pool) = demo_pool();
        let mut conn = pool.get().unwrap();

        let recent = list_recent(&mut conn, 2).unwrap();
        assert_eq!(names(&recent), vec!["Martin Diaz", "Lucia Gomez"]);
        assert_eq!(count(&mut conn).unwrap(), 4);
    }
}
