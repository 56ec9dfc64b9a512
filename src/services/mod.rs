pub mod auth;
pub mod dashboard;
pub mod players;
pub mod server;
pub mod terminal;
