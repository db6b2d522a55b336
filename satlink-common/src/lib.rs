///! Wire types shared between the satlink backend and its API clients.

pub mod types;

pub use types::{ElementRecord, EntityInfo, ErrorBody, ServiceStats};
