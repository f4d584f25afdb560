use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type ItemId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Job,
    Story,
    Comment,
    Poll,
    #[serde(rename = "pollopt")]
    PollOpt,
}

/// One record from the item endpoint.
///
/// Field names follow the upstream JSON (`type`, `time`, `kids`); everything
/// except `id`, `type` and `time` may be missing and falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(rename = "time", with = "chrono::serde::ts_seconds")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub by: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, rename = "kids")]
    pub child_ids: Vec<ItemId>,
    /// Parent comment or story, for comments.
    #[serde(default)]
    pub parent: Option<ItemId>,
    /// Owning poll, for poll options.
    #[serde(default)]
    pub poll: Option<ItemId>,
    /// Poll options in display order, for polls.
    #[serde(default)]
    pub parts: Vec<ItemId>,
    #[serde(default)]
    pub descendants: u64,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub dead: bool,
    /// Link to the discussion page, attached once after decoding.
    #[serde(default)]
    pub display_url: String,
}

impl Item {
    pub fn new(id: ItemId, kind: ItemKind, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            kind,
            created_at,
            score: 0,
            by: String::new(),
            title: String::new(),
            text: String::new(),
            url: String::new(),
            child_ids: Vec::new(),
            parent: None,
            poll: None,
            parts: Vec::new(),
            descendants: 0,
            deleted: false,
            dead: false,
            display_url: String::new(),
        }
    }

    /// Canonical discussion link for an item id under `site_base`.
    pub fn discussion_url(site_base: &str, id: ItemId) -> String {
        format!("{}/item?id={}", site_base.trim_end_matches('/'), id)
    }

    pub fn with_display_url(mut self, site_base: &str) -> Self {
        self.display_url = Self::discussion_url(site_base, self.id);
        self
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "(Untitled)"
        } else {
            &self.title
        }
    }

    /// Story URL when it is a plain http(s) link, otherwise the discussion
    /// page (Ask HN, jobs, anything with an odd scheme).
    pub fn link(&self) -> &str {
        let web = url::Url::parse(&self.url)
            .map(|u| matches!(u.scheme(), "http" | "https"))
            .unwrap_or(false);
        if web {
            &self.url
        } else {
            &self.display_url
        }
    }

    /// Host part of the story URL, for display next to the title.
    pub fn domain(&self) -> Option<String> {
        if self.url.is_empty() {
            return None;
        }
        url::Url::parse(&self.url)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.trim_start_matches("www.").to_string()))
    }
}
