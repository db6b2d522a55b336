///! Cascading entity info resolution
///!
///! Tries an ordered list of lookup strategies against the encyclopedia
///! provider and keeps the first one that yields a page summary. Failures
///! never reach the caller: an unresolved name still gets its search link.

use satlink_common::EntityInfo;
use std::sync::Arc;

use super::provider::EncyclopediaProvider;
use super::types::PageSummary;
use crate::module::upstream::fill_template;

/// One way of finding a page summary for a name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStrategy {
    /// Summary of the page titled exactly like the query
    DirectSummary,
    /// Search the query, then take the summary of the best hit
    SearchThenSummary,
}

impl LookupStrategy {
    /// Order in which strategies are attempted
    pub const CASCADE: [LookupStrategy; 2] = [Self::DirectSummary, Self::SearchThenSummary];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DirectSummary => "direct-summary",
            Self::SearchThenSummary => "search-then-summary",
        }
    }
}

/// A summary together with the title it was looked up under
#[derive(Debug, Clone)]
struct Found {
    queried_title: String,
    summary: PageSummary,
}

pub struct InfoResolver {
    provider: Arc<dyn EncyclopediaProvider>,
    search_link_template: String,
}

impl InfoResolver {
    /// `search_link_template` holds a `{}` placeholder for the encoded name.
    pub fn new(provider: Arc<dyn EncyclopediaProvider>, search_link_template: impl Into<String>) -> Self {
        Self {
            provider,
            search_link_template: search_link_template.into(),
        }
    }

    /// Generic web search link for `name`
    pub fn search_link(&self, name: &str) -> String {
        fill_template(&self.search_link_template, name)
    }

    /// Resolve `name` to entity info. Never fails; unresolved fields stay empty.
    pub async fn resolve(&self, name: &str) -> EntityInfo {
        let mut info = EntityInfo::unresolved(name, self.search_link(name));

        for strategy in LookupStrategy::CASCADE {
            if let Some(found) = self.attempt(strategy, name).await {
                tracing::debug!("'{}' resolved via {}", name, strategy.as_str());
                info.title = found
                    .summary
                    .title()
                    .map(str::to_string)
                    .unwrap_or(found.queried_title);
                info.wikipedia_url = found.summary.desktop_page().map(str::to_string);
                info.extract = found.summary.extract;
                return info;
            }
        }

        tracing::debug!("'{}' unresolved, returning search link only", name);
        info
    }

    async fn attempt(&self, strategy: LookupStrategy, name: &str) -> Option<Found> {
        match strategy {
            LookupStrategy::DirectSummary => self.summary_of(name).await,
            LookupStrategy::SearchThenSummary => {
                let best = self.best_search_hit(name).await?;
                self.summary_of(&best).await
            }
        }
    }

    async fn summary_of(&self, title: &str) -> Option<Found> {
        match self.provider.summary(title).await {
            Ok(summary) => Some(Found {
                queried_title: title.to_string(),
                summary,
            }),
            Err(e) => {
                tracing::debug!("Summary lookup for '{}' failed: {}", title, e);
                None
            }
        }
    }

    async fn best_search_hit(&self, query: &str) -> Option<String> {
        match self.provider.search(query).await {
            Ok(titles) => {
                let best = titles.into_iter().next();
                if best.is_none() {
                    tracing::debug!("Search for '{}' returned no titles", query);
                }
                best
            }
            Err(e) => {
                tracing::debug!("Search for '{}' failed: {}", query, e);
                None
            }
        }
    }
}
