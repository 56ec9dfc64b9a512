//! REST API: routes, handlers and the response envelope.

pub mod envelope;
pub mod error;
pub mod handlers;
pub mod models;
pub mod parsers;
pub mod routes;

pub use envelope::Envelope;
pub use error::ApiError;
pub use routes::create_router;
