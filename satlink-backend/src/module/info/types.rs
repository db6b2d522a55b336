///! Page summary schema returned by the encyclopedia summary endpoint
use serde::{Deserialize, Serialize};

/// Subset of the REST page summary we read. Unknown fields are ignored and
/// every field may be missing or null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSummary {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub extract: Option<String>,
    #[serde(default)]
    pub content_urls: Option<ContentUrls>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentUrls {
    #[serde(default)]
    pub desktop: Option<PageUrls>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageUrls {
    #[serde(default)]
    pub page: Option<String>,
}

impl PageSummary {
    /// `content_urls.desktop.page`, `None` if any link in the chain is absent
    pub fn desktop_page(&self) -> Option<&str> {
        self.content_urls
            .as_ref()?
            .desktop
            .as_ref()?
            .page
            .as_deref()
    }

    /// Non-empty title, if the summary carries one
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|title| !title.is_empty())
    }
}
