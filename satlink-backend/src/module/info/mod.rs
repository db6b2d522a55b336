///! Entity info lookup
///!
///! Resolves a free-text name into a short description and links, using a
///! page summary provider with a search fallback.

pub mod provider;
pub mod resolver;
pub mod types;

pub use provider::{EncyclopediaProvider, WikipediaClient};
pub use resolver::{InfoResolver, LookupStrategy};
pub use types::PageSummary;
