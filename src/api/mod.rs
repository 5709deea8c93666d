pub mod extract;

pub use extract::{ApiJson, ApiPath};
