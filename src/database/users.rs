use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::{params, ErrorCode, OptionalExtension};

use super::connection::DbConn;
use super::models::{Session, User, UserCredentials};

/// Inserts a user. Returns `None` when the email is already registered.
pub fn insert_user(
    conn: &mut DbConn,
    nombre: &str,
    email: &str,
    password_hash: &str,
    salt: &str,
) -> Result<Option<User>> {
    let sql = "INSERT INTO Usuarios (Nombre, Email, PasswordHash, Salt) VALUES (?1, ?2, ?3, ?4) RETURNING IdUsuario, Nombre, Email";

    match conn.query_row(sql, params![nombre, email, password_hash, salt], parse_user_row) {
        Ok(user) => Ok(Some(user)),
        Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
            Ok(None)
        }
        Err(e) => Err(e).context("Failed to insert user"),
    }
}

pub fn find_credentials_by_email(
    conn: &mut DbConn,
    email: &str,
) -> Result<Option<UserCredentials>> {
    let sql = "SELECT IdUsuario, Nombre, Email, PasswordHash, Salt FROM Usuarios WHERE Email = ?1";

    conn.query_row(sql, params![email], |row| {
        Ok(UserCredentials {
            user: parse_user_row(row)?,
            password_hash: row.get(3)?,
            salt: row.get(4)?,
        })
    })
    .optional()
    .context("Failed to query user by email")
}

pub fn insert_session(conn: &mut DbConn, session: &Session) -> Result<()> {
    conn.execute(
        "INSERT INTO Sesiones (Token, IdUsuario, ExpiraEn) VALUES (?1, ?2, ?3)",
        params![session.token, session.user_id, session.expires_at],
    )
    .context("Failed to store session")
    .map(|_| ())
}

/// Owner of `token`, if the session exists and has not expired at `now`.
pub fn find_user_by_token(
    conn: &mut DbConn,
    token: &str,
    now: NaiveDateTime,
) -> Result<Option<User>> {
    let sql = "SELECT u.IdUsuario, u.Nombre, u.Email FROM Sesiones s \
               JOIN Usuarios u ON u.IdUsuario = s.IdUsuario \
               WHERE s.Token = ?1 AND s.ExpiraEn > ?2";

    conn.query_row(sql, params![token, now], parse_user_row)
        .optional()
        .context("Failed to query session")
}

fn parse_user_row(row: &rusqlite::Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        nombre: row.get(1)?,
        email: row.get(2)?,
    })
}
