pub mod limit;

pub use limit::{parse_limit, DEFAULT_LIMIT, MAX_LIMIT};
