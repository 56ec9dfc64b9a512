pub mod connection;
pub mod matches;
pub mod models;
pub mod players;
pub mod setup;
pub mod tournaments;
pub mod users;

pub use connection::{check_connectivity, create_pool, get_connection, DbConn, DbPool, ProbeRow};
pub use models::*;

/// `%term%` with LIKE wildcards in `term` escaped by `\`.
pub(crate) fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
