//! Paste records and the request/response shapes around them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical paste row as persisted by a store.
///
/// Everything except `view_count` is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paste {
    pub id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub max_views: Option<u32>,
    pub view_count: u32,
}

/// Validated insert draft handed to [`crate::store::PasteStore::insert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPaste {
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub max_views: Option<u32>,
}

/// Request payload for creating a paste.
///
/// Numeric fields are signed so zero and negative inputs reach validation
/// instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePasteRequest {
    pub content: String,
    #[serde(default)]
    pub ttl_seconds: Option<i64>,
    #[serde(default)]
    pub max_views: Option<i64>,
}

/// Identity and expiry policy of a freshly created paste.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedPaste {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub max_views: Option<u32>,
}

/// Content returned by a successful consume.
///
/// `remaining_views` is `None` for unlimited pastes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasteView {
    pub content: String,
    pub remaining_views: Option<u32>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Paste {
    /// Materialize a draft under a store-assigned id with a zero view count.
    pub fn from_new(id: String, draft: NewPaste) -> Self {
        Self {
            id,
            content: draft.content,
            created_at: draft.created_at,
            expires_at: draft.expires_at,
            max_views: draft.max_views,
            view_count: 0,
        }
    }

    /// TTL has elapsed. A read at exactly `expires_at` is still allowed.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| now > expires_at)
    }

    /// View budget already spent, judged on the count before any new read.
    pub fn is_exhausted(&self) -> bool {
        self.max_views
            .is_some_and(|max_views| self.view_count >= max_views)
    }

    /// Whether one more read may be served at `now`.
    pub fn is_available_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_expired_at(now) && !self.is_exhausted()
    }

    pub fn remaining_views(&self) -> Option<u32> {
        self.max_views
            .map(|max_views| max_views.saturating_sub(self.view_count))
    }
}

impl From<&Paste> for CreatedPaste {
    fn from(value: &Paste) -> Self {
        Self {
            id: value.id.clone(),
            created_at: value.created_at,
            expires_at: value.expires_at,
            max_views: value.max_views,
        }
    }
}

impl From<Paste> for PasteView {
    fn from(value: Paste) -> Self {
        let remaining_views = value.remaining_views();
        Self {
            content: value.content,
            remaining_views,
            expires_at: value.expires_at,
        }
    }
}
