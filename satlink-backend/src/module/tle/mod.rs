///! Two-line element sets
///!
///! Looks up TLE text from the satellite catalog upstream and extracts the
///! first complete record from it. The bulk active catalog is passed through
///! without parsing.

pub mod parser;
pub mod provider;

pub use parser::{LocateError, locate_record};
pub use provider::{CatalogProvider, CelestrakClient};
