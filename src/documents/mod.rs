//! Secondary, schema-flexible player store.

pub mod models;
pub mod store;

pub use models::{DocumentError, DocumentPlayer, NewDocumentPlayer};
pub use store::DocumentStore;
