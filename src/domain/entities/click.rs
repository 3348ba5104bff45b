//! Click entity representing a single visit through a promo link.

use chrono::{DateTime, Utc};

/// An immutable record that a link's redirect endpoint was visited.
#[derive(Debug, Clone, PartialEq)]
pub struct Click {
    pub id: i64,
    pub link_id: String,
    pub clicked_at: DateTime<Utc>,
    pub referer: Option<String>,
    pub user_agent: Option<String>,
    pub ip: Option<String>,
}

/// Input data for recording a click.
///
/// The timestamp is assigned by storage, never by the client.
#[derive(Debug, Clone, Default)]
pub struct NewClick {
    pub link_id: String,
    pub referer: Option<String>,
    pub user_agent: Option<String>,
    pub ip: Option<String>,
}

impl NewClick {
    /// Creates a click for `link_id` with no client metadata.
    pub fn for_link(link_id: impl Into<String>) -> Self {
        Self {
            link_id: link_id.into(),
            ..Default::default()
        }
    }
}
