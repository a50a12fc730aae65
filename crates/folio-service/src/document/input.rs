use folio_store::model::access::AccessMap;
use folio_store::model::document::Document;
use folio_store::model::subscription::SubscriptionMap;

/// Incoming payload for [`super::DocumentService::save`].
///
/// `id` selects the path: `None` creates, `Some` updates the stored row.
/// On update, title, description, access grants and subscriptions overwrite
/// the stored values; owned children are never carried here, they are
/// mutated through their own operations.
#[derive(Debug, Clone, Default)]
pub struct DocumentInput {
    pub id: Option<uuid::Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub access_all: bool,
    pub access: AccessMap,
    pub subscriptions: SubscriptionMap,
}

impl DocumentInput {
    /// Payload for a brand-new document.
    #[must_use]
    pub fn create(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// Edit payload pre-filled from a loaded document, the usual starting point
/// for an update round-trip.
impl From<&Document> for DocumentInput {
    fn from(document: &Document) -> Self {
        Self {
            id: Some(document.meta.id),
            title: document.title.clone(),
            description: document.description.clone(),
            access_all: document.meta.access_all,
            access: document.access.clone(),
            subscriptions: document.subscriptions.clone(),
        }
    }
}
