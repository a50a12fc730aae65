use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata shared by every content kind (documents, comments, tags,
/// attachments, hyperlinks). Embedded by value rather than inherited.
///
/// `id` is assigned at construction and never changes; `creator` is set
/// exactly once, from the acting user at creation time. `version` is bumped
/// by the store on every successful save and used for optimistic conflict
/// detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentMeta {
    pub id: uuid::Uuid,
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub creator: uuid::Uuid,
    pub access_all: bool,
    pub deleted: bool,
}

impl ContentMeta {
    #[must_use]
    pub fn new(creator: uuid::Uuid) -> Self {
        Self {
            id: uuid::Uuid::now_v7(),
            version: 0,
            created_at: Utc::now(),
            modified_at: None,
            creator,
            access_all: false,
            deleted: false,
        }
    }

    /// Stamps the content as touched by an edit.
    pub fn touch(&mut self) {
        self.modified_at = Some(Utc::now());
    }
}

/// Uniform access to the shared metadata of a content row.
///
/// The store uses this seam for version checking and the services use it for
/// provenance stamping, so new content kinds only need to expose their meta.
pub trait HasMeta {
    fn meta(&self) -> &ContentMeta;
    fn meta_mut(&mut self) -> &mut ContentMeta;
}
