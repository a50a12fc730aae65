//! In-memory reference store.
//!
//! One `RwLock`-guarded map per entity type. Content rows carry a version
//! that every save checks and bumps, so a stale read-modify-write surfaces
//! as [`StoreError::VersionConflict`] instead of a lost update.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::model::attachment::Attachment;
use crate::model::comment::Comment;
use crate::model::content::HasMeta;
use crate::model::document::Document;
use crate::model::notification::Notification;
use crate::model::tag::Tag;
use crate::model::user::User;

use super::{
    AttachmentStore, CommentStore, DocumentStore, NotificationStore, TagStore, UserStore,
};

#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<uuid::Uuid, User>>,
    documents: RwLock<HashMap<uuid::Uuid, Document>>,
    comments: RwLock<HashMap<uuid::Uuid, Comment>>,
    attachments: RwLock<HashMap<uuid::Uuid, Attachment>>,
    tags: RwLock<HashMap<uuid::Uuid, Tag>>,
    notifications: RwLock<HashMap<uuid::Uuid, Notification>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Version-checked upsert shared by all content maps.
fn upsert_versioned<T>(
    map: &mut HashMap<uuid::Uuid, T>,
    mut row: T,
    entity: &'static str,
) -> StoreResult<T>
where
    T: HasMeta + Clone,
{
    let id = row.meta().id;
    if let Some(existing) = map.get(&id) {
        if existing.meta().version != row.meta().version {
            tracing::debug!(
                entity,
                %id,
                stored = existing.meta().version,
                incoming = row.meta().version,
                "Rejecting stale save"
            );
            return Err(StoreError::VersionConflict { entity, id });
        }
    }
    row.meta_mut().version += 1;
    map.insert(id, row.clone());
    Ok(row)
}

impl UserStore for MemoryStore {
    async fn save_user(&self, user: User) -> StoreResult<User> {
        let mut users = self.users.write().await;
        let clash = users
            .values()
            .any(|u| u.username == user.username && u.id != user.id);
        if clash {
            return Err(StoreError::Duplicate {
                entity: "user",
                value: user.username,
            });
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn user_by_id(&self, id: uuid::Uuid) -> StoreResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.username == username)
            .cloned())
    }
}

impl DocumentStore for MemoryStore {
    async fn save_document(&self, document: Document) -> StoreResult<Document> {
        let mut documents = self.documents.write().await;
        upsert_versioned(&mut documents, document, "document")
    }

    async fn document_by_id(&self, id: uuid::Uuid) -> StoreResult<Option<Document>> {
        Ok(self.documents.read().await.get(&id).cloned())
    }
}

impl CommentStore for MemoryStore {
    async fn save_comment(&self, comment: Comment) -> StoreResult<Comment> {
        let mut comments = self.comments.write().await;
        upsert_versioned(&mut comments, comment, "comment")
    }

    async fn comment_by_id(&self, id: uuid::Uuid) -> StoreResult<Option<Comment>> {
        Ok(self.comments.read().await.get(&id).cloned())
    }
}

impl AttachmentStore for MemoryStore {
    async fn save_attachment(&self, attachment: Attachment) -> StoreResult<Attachment> {
        let mut attachments = self.attachments.write().await;
        upsert_versioned(&mut attachments, attachment, "attachment")
    }

    async fn attachment_by_id(&self, id: uuid::Uuid) -> StoreResult<Option<Attachment>> {
        Ok(self.attachments.read().await.get(&id).cloned())
    }
}

impl TagStore for MemoryStore {
    async fn save_tag(&self, tag: Tag) -> StoreResult<Tag> {
        let mut tags = self.tags.write().await;
        let clash = tags
            .values()
            .any(|t| t.name == tag.name && t.meta.id != tag.meta.id && !t.meta.deleted);
        if clash {
            return Err(StoreError::Duplicate {
                entity: "tag",
                value: tag.name,
            });
        }
        upsert_versioned(&mut tags, tag, "tag")
    }

    async fn tag_by_id(&self, id: uuid::Uuid) -> StoreResult<Option<Tag>> {
        Ok(self.tags.read().await.get(&id).cloned())
    }

    async fn tag_by_name(&self, name: &str) -> StoreResult<Option<Tag>> {
        Ok(self
            .tags
            .read()
            .await
            .values()
            .find(|t| t.name == name && !t.meta.deleted)
            .cloned())
    }
}

impl NotificationStore for MemoryStore {
    async fn save_notification(&self, notification: Notification) -> StoreResult<Notification> {
        self.notifications
            .write()
            .await
            .insert(notification.id, notification.clone());
        Ok(notification)
    }

    async fn notifications_for_subscriber(
        &self,
        subscriber_id: uuid::Uuid,
    ) -> StoreResult<Vec<Notification>> {
        let mut rows: Vec<Notification> = self
            .notifications
            .read()
            .await
            .values()
            .filter(|n| n.subscriber_id == subscriber_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(rows)
    }
}
