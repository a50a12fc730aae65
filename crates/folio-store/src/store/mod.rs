//! Storage seams consumed by the services.
//!
//! Each entity type gets its own narrow trait so a database-backed store can
//! implement them table by table; [`Store`] bundles them for service
//! signatures. [`memory::MemoryStore`] is the reference implementation.

pub mod assemble;
pub mod memory;

use crate::error::StoreResult;
use crate::model::attachment::Attachment;
use crate::model::comment::Comment;
use crate::model::document::Document;
use crate::model::notification::Notification;
use crate::model::tag::Tag;
use crate::model::user::User;

pub trait UserStore {
    /// Upserts a user. Usernames are unique store-wide.
    async fn save_user(&self, user: User) -> StoreResult<User>;
    async fn user_by_id(&self, id: uuid::Uuid) -> StoreResult<Option<User>>;
    async fn user_by_username(&self, username: &str) -> StoreResult<Option<User>>;
}

pub trait DocumentStore {
    /// Upserts a document, bumping its version. Fails with a version
    /// conflict if the stored row has moved on since it was loaded.
    async fn save_document(&self, document: Document) -> StoreResult<Document>;
    async fn document_by_id(&self, id: uuid::Uuid) -> StoreResult<Option<Document>>;
}

pub trait CommentStore {
    async fn save_comment(&self, comment: Comment) -> StoreResult<Comment>;
    async fn comment_by_id(&self, id: uuid::Uuid) -> StoreResult<Option<Comment>>;
}

pub trait AttachmentStore {
    async fn save_attachment(&self, attachment: Attachment) -> StoreResult<Attachment>;
    async fn attachment_by_id(&self, id: uuid::Uuid) -> StoreResult<Option<Attachment>>;
}

pub trait TagStore {
    /// Upserts a tag. Tag names are unique store-wide.
    async fn save_tag(&self, tag: Tag) -> StoreResult<Tag>;
    async fn tag_by_id(&self, id: uuid::Uuid) -> StoreResult<Option<Tag>>;
    async fn tag_by_name(&self, name: &str) -> StoreResult<Option<Tag>>;
}

pub trait NotificationStore {
    async fn save_notification(&self, notification: Notification) -> StoreResult<Notification>;
    /// All notification rows for one subscriber, oldest first.
    async fn notifications_for_subscriber(
        &self,
        subscriber_id: uuid::Uuid,
    ) -> StoreResult<Vec<Notification>>;
}

/// The full persistence surface required by the content services.
pub trait Store:
    UserStore
    + DocumentStore
    + CommentStore
    + AttachmentStore
    + TagStore
    + NotificationStore
    + Send
    + Sync
{
}

impl<T> Store for T where
    T: UserStore
        + DocumentStore
        + CommentStore
        + AttachmentStore
        + TagStore
        + NotificationStore
        + Send
        + Sync
{
}
