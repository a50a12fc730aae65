use serde::{Deserialize, Serialize};

use super::access::AccessMap;
use super::content::{ContentMeta, HasMeta};
use super::hyperlink::Hyperlink;
use super::subscription::SubscriptionMap;

/// The document aggregate root.
///
/// Ownership: a document exclusively owns its comments, attachments,
/// hyperlinks and discussion sub-documents (tracked by id lists here, rows
/// live in their own stores) and embeds its access grants and subscriptions
/// directly. Tags are shared references. `parent_id` is a back-reference
/// used by discussion sub-documents for breadcrumb traversal only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub meta: ContentMeta,
    pub title: String,
    pub description: Option<String>,
    pub parent_id: Option<uuid::Uuid>,
    pub tag_ids: Vec<uuid::Uuid>,
    pub comment_ids: Vec<uuid::Uuid>,
    pub attachment_ids: Vec<uuid::Uuid>,
    pub discussion_ids: Vec<uuid::Uuid>,
    pub hyperlinks: Vec<Hyperlink>,
    pub access: AccessMap,
    pub subscriptions: SubscriptionMap,
}

impl Document {
    #[must_use]
    pub fn new(creator: uuid::Uuid, title: &str, description: Option<&str>) -> Self {
        Self {
            meta: ContentMeta::new(creator),
            title: title.to_string(),
            description: description.map(ToString::to_string),
            parent_id: None,
            tag_ids: Vec::new(),
            comment_ids: Vec::new(),
            attachment_ids: Vec::new(),
            discussion_ids: Vec::new(),
            hyperlinks: Vec::new(),
            access: AccessMap::new(),
            subscriptions: SubscriptionMap::new(),
        }
    }
}

impl HasMeta for Document {
    fn meta(&self) -> &ContentMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut ContentMeta {
        &mut self.meta
    }
}
