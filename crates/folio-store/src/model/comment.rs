use serde::{Deserialize, Serialize};

use super::content::{ContentMeta, HasMeta};

/// Back-reference from a comment to the content it replies to. This is a
/// lookup link only; ownership always flows downward through the parent's
/// child id list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParentRef {
    Document(uuid::Uuid),
    Comment(uuid::Uuid),
}

/// A comment on a document or a reply to another comment.
///
/// The parent link is established at creation and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub meta: ContentMeta,
    pub parent: ParentRef,
    pub text: String,
    /// Owned replies, in creation order.
    pub reply_ids: Vec<uuid::Uuid>,
    /// Users who agreed with this comment, deduplicated.
    pub liked_by: Vec<uuid::Uuid>,
}

impl Comment {
    #[must_use]
    pub fn new(creator: uuid::Uuid, parent: ParentRef, text: &str) -> Self {
        Self {
            meta: ContentMeta::new(creator),
            parent,
            text: text.to_string(),
            reply_ids: Vec::new(),
            liked_by: Vec::new(),
        }
    }
}

impl HasMeta for Comment {
    fn meta(&self) -> &ContentMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut ContentMeta {
        &mut self.meta
    }
}
