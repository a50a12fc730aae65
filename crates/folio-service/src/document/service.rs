//! Document aggregate business rules: save/update, access grants,
//! subscriptions, comments, attachments, discussions, and the notification
//! fan-out they trigger.

use std::sync::Arc;

use folio_core::config::LimitsConfig;
use folio_core::constants::MAIN_CONTENT_ATTACHMENT;
use folio_store::model::access::{Grant, Permission};
use folio_store::model::attachment::Attachment;
use folio_store::model::comment::{Comment, ParentRef};
use folio_store::model::document::Document;
use folio_store::model::hyperlink::Hyperlink;
use folio_store::model::subscription::{Subscription, SubscriptionType};
use folio_store::model::user::User;
use folio_store::store::Store;

use crate::authz;
use crate::comment::mentions;
use crate::error::{ServiceError, ServiceResult};
use crate::subscription;

use super::input::DocumentInput;

/// Permission sets for the gated operations. Presence of any one member is
/// sufficient (the creator always passes).
const EDIT: &[Permission] = &[Permission::Write];
const COMMENTING: &[Permission] = &[Permission::Write, Permission::CommentDocument];
const ATTACHING: &[Permission] = &[Permission::Write, Permission::AttachFiles];
const READING: &[Permission] = &[Permission::Read];

/// One step of a document's parent chain, leaf first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    pub document_id: uuid::Uuid,
    pub title: String,
    pub current: bool,
}

pub struct DocumentService<S> {
    store: Arc<S>,
    limits: LimitsConfig,
}

impl<S> Clone for DocumentService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            limits: self.limits.clone(),
        }
    }
}

impl<S: Store> DocumentService<S> {
    #[must_use]
    pub fn new(store: Arc<S>, limits: LimitsConfig) -> Self {
        Self { store, limits }
    }

    /// ## Summary
    /// Saves a document. Without an id this creates: the acting user becomes
    /// the creator and the document starts with an empty main content
    /// attachment. With an id this updates the stored row: requires the
    /// creator or a WRITE grant, overwrites title, description, grants and
    /// subscriptions from the payload, stamps all children as touched, and
    /// fans out `MainContent` notifications when title or description
    /// actually changed.
    ///
    /// An authorization failure aborts before any mutation, so a denied
    /// update leaves the stored document byte-for-byte unchanged.
    ///
    /// ## Errors
    /// - `Validation` for a blank title.
    /// - `NotFound` if an id is given but does not resolve.
    /// - `NotAuthorized` on the update path for non-creators without WRITE.
    pub async fn save(&self, actor: &User, input: DocumentInput) -> ServiceResult<Document> {
        if input.title.trim().is_empty() {
            return Err(ServiceError::Validation("title"));
        }
        match input.id {
            None => self.create(actor, input).await,
            Some(id) => self.update(actor, id, input).await,
        }
    }

    async fn create(&self, actor: &User, input: DocumentInput) -> ServiceResult<Document> {
        let mut document = Document::new(actor.id, &input.title, input.description.as_deref());
        document.meta.access_all = input.access_all;

        // Every document carries an editable body from the start.
        let main = self
            .store
            .save_attachment(Attachment::new(actor.id, MAIN_CONTENT_ATTACHMENT, Vec::new()))
            .await?;
        document.attachment_ids.push(main.meta.id);

        let document = self.store.save_document(document).await?;
        tracing::debug!(document_id = %document.meta.id, creator = %actor.id, "Document created");
        Ok(document)
    }

    async fn update(
        &self,
        actor: &User,
        id: uuid::Uuid,
        input: DocumentInput,
    ) -> ServiceResult<Document> {
        let mut stored = self.load_active(id).await?;
        authz::require(&stored.meta, &stored.access, actor, EDIT)?;

        let content_changed =
            stored.title != input.title || stored.description != input.description;

        stored.meta.touch();
        stored.title = input.title;
        stored.description = input.description;
        stored.access = input.access;
        stored.subscriptions = input.subscriptions;
        if input.access_all {
            // One-way through save; clearing goes through set_access_all.
            stored.meta.access_all = true;
        }

        self.stamp_children(&stored).await?;
        let saved = self.store.save_document(stored).await?;

        if content_changed {
            subscription::fan_out(
                self.store.as_ref(),
                &saved,
                actor,
                SubscriptionType::MainContent,
            )
            .await?;
        }
        Ok(saved)
    }

    /// Marks every child of the aggregate as touched by this save. New
    /// children get their provenance at construction time, so only the
    /// modified stamp is handled here.
    async fn stamp_children(&self, document: &Document) -> ServiceResult<()> {
        for tag_id in &document.tag_ids {
            if let Some(mut tag) = self.store.tag_by_id(*tag_id).await? {
                tag.meta.touch();
                self.store.save_tag(tag).await?;
            }
        }
        for comment_id in &document.comment_ids {
            if let Some(mut comment) = self.store.comment_by_id(*comment_id).await? {
                comment.meta.touch();
                self.store.save_comment(comment).await?;
            }
        }
        for attachment_id in &document.attachment_ids {
            if let Some(mut attachment) = self.store.attachment_by_id(*attachment_id).await? {
                attachment.meta.touch();
                self.store.save_attachment(attachment).await?;
            }
        }
        Ok(())
    }

    async fn load_active(&self, id: uuid::Uuid) -> ServiceResult<Document> {
        self.store
            .document_by_id(id)
            .await?
            .filter(|d| !d.meta.deleted)
            .ok_or(ServiceError::NotFound("document"))
    }

    /// ## Summary
    /// Loads a document for the acting user.
    ///
    /// ## Errors
    /// `NotFound` for missing or deleted documents, `NotAuthorized` without
    /// read access.
    pub async fn get(&self, actor: &User, id: uuid::Uuid) -> ServiceResult<Document> {
        let document = self.load_active(id).await?;
        authz::require(&document.meta, &document.access, actor, READING)?;
        Ok(document)
    }

    /// ## Summary
    /// Soft-deletes a document. The row stays in the store but stops
    /// resolving through the service.
    ///
    /// ## Errors
    /// `NotFound` / `NotAuthorized` as for an update.
    pub async fn mark_as_deleted(&self, actor: &User, id: uuid::Uuid) -> ServiceResult<()> {
        let mut document = self.load_active(id).await?;
        authz::require(&document.meta, &document.access, actor, EDIT)?;
        document.meta.deleted = true;
        document.meta.touch();
        self.store.save_document(document).await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Comments
    // ------------------------------------------------------------------

    /// ## Summary
    /// Adds a top-level comment to a document, fans out `Comment`
    /// notifications and mention notifications.
    ///
    /// ## Errors
    /// `Validation` for blank text; `NotFound` / `NotAuthorized` as usual
    /// (WRITE or COMMENT_DOCUMENT required).
    pub async fn add_comment(
        &self,
        actor: &User,
        document_id: uuid::Uuid,
        text: &str,
    ) -> ServiceResult<Comment> {
        if text.trim().is_empty() {
            return Err(ServiceError::Validation("text"));
        }
        let mut document = self.load_active(document_id).await?;
        authz::require(&document.meta, &document.access, actor, COMMENTING)?;

        let comment = Comment::new(actor.id, ParentRef::Document(document.meta.id), text);
        let comment = self.store.save_comment(comment).await?;

        document.comment_ids.push(comment.meta.id);
        document.meta.touch();
        let document = self.store.save_document(document).await?;

        subscription::fan_out(self.store.as_ref(), &document, actor, SubscriptionType::Comment)
            .await?;
        mentions::notify_mentions(self.store.as_ref(), &comment).await?;
        Ok(comment)
    }

    /// ## Summary
    /// Detaches a comment from the document and soft-deletes it.
    ///
    /// ## Errors
    /// `NotFound` if the comment is not attached to this document.
    pub async fn remove_comment(
        &self,
        actor: &User,
        document_id: uuid::Uuid,
        comment_id: uuid::Uuid,
    ) -> ServiceResult<Document> {
        let mut document = self.load_active(document_id).await?;
        authz::require(&document.meta, &document.access, actor, EDIT)?;

        if !document.comment_ids.contains(&comment_id) {
            return Err(ServiceError::NotFound("comment"));
        }
        document.comment_ids.retain(|id| *id != comment_id);
        document.meta.touch();
        let document = self.store.save_document(document).await?;

        if let Some(mut comment) = self.store.comment_by_id(comment_id).await? {
            comment.meta.deleted = true;
            comment.meta.touch();
            self.store.save_comment(comment).await?;
        }
        Ok(document)
    }

    // ------------------------------------------------------------------
    // Tags
    // ------------------------------------------------------------------

    /// ## Summary
    /// Attaches a shared tag. Attaching a tag twice keeps a single
    /// reference.
    ///
    /// ## Errors
    /// `NotFound` if document or tag do not resolve.
    pub async fn add_tag(
        &self,
        actor: &User,
        document_id: uuid::Uuid,
        tag_id: uuid::Uuid,
    ) -> ServiceResult<Document> {
        let mut document = self.load_active(document_id).await?;
        authz::require(&document.meta, &document.access, actor, EDIT)?;

        let tag = self
            .store
            .tag_by_id(tag_id)
            .await?
            .filter(|t| !t.meta.deleted)
            .ok_or(ServiceError::NotFound("tag"))?;

        if !document.tag_ids.contains(&tag.meta.id) {
            document.tag_ids.push(tag.meta.id);
        }
        document.meta.touch();
        Ok(self.store.save_document(document).await?)
    }

    /// ## Summary
    /// Removes a tag reference. Removing an absent tag is a no-op.
    ///
    /// ## Errors
    /// `NotFound` / `NotAuthorized` on the document.
    pub async fn remove_tag(
        &self,
        actor: &User,
        document_id: uuid::Uuid,
        tag_id: uuid::Uuid,
    ) -> ServiceResult<Document> {
        let mut document = self.load_active(document_id).await?;
        authz::require(&document.meta, &document.access, actor, EDIT)?;

        document.tag_ids.retain(|id| *id != tag_id);
        document.meta.touch();
        Ok(self.store.save_document(document).await?)
    }

    // ------------------------------------------------------------------
    // Discussions
    // ------------------------------------------------------------------

    /// ## Summary
    /// Creates a discussion sub-document under a document. The discussion is
    /// a full document of its own (main content attachment included) with a
    /// parent back-reference; `Discussion` notifications fan out on the
    /// parent.
    ///
    /// ## Errors
    /// As for `save` on the create path, plus the parent's permission check
    /// (WRITE or COMMENT_DOCUMENT).
    pub async fn add_discussion(
        &self,
        actor: &User,
        document_id: uuid::Uuid,
        input: DocumentInput,
    ) -> ServiceResult<Document> {
        let mut parent = self.load_active(document_id).await?;
        authz::require(&parent.meta, &parent.access, actor, COMMENTING)?;

        let mut discussion = self
            .save(actor, DocumentInput { id: None, ..input })
            .await?;
        discussion.parent_id = Some(parent.meta.id);
        let discussion = self.store.save_document(discussion).await?;

        parent.discussion_ids.push(discussion.meta.id);
        parent.meta.touch();
        let parent = self.store.save_document(parent).await?;

        subscription::fan_out(
            self.store.as_ref(),
            &parent,
            actor,
            SubscriptionType::Discussion,
        )
        .await?;
        Ok(discussion)
    }

    /// ## Summary
    /// Walks the parent chain from a document to its root, leaf first. The
    /// first crumb is the document itself.
    ///
    /// ## Errors
    /// `NotFound` / `NotAuthorized` on the starting document.
    pub async fn breadcrumbs(
        &self,
        actor: &User,
        document_id: uuid::Uuid,
    ) -> ServiceResult<Vec<Breadcrumb>> {
        let document = self.get(actor, document_id).await?;

        let mut crumbs = vec![Breadcrumb {
            document_id: document.meta.id,
            title: document.title.clone(),
            current: true,
        }];

        let mut parent_id = document.parent_id;
        while let Some(id) = parent_id {
            if crumbs.iter().any(|c| c.document_id == id) {
                return Err(ServiceError::InvariantViolation(
                    "document parent chain contains a cycle",
                ));
            }
            let Some(parent) = self.store.document_by_id(id).await? else {
                break;
            };
            crumbs.push(Breadcrumb {
                document_id: parent.meta.id,
                title: parent.title.clone(),
                current: false,
            });
            parent_id = parent.parent_id;
        }
        Ok(crumbs)
    }

    // ------------------------------------------------------------------
    // Attachments
    // ------------------------------------------------------------------

    fn check_payload(&self, name: &str, payload: &[u8]) -> ServiceResult<()> {
        if name.trim().is_empty() {
            return Err(ServiceError::Validation("name"));
        }
        if payload.len() > self.limits.max_attachment_bytes {
            return Err(ServiceError::Validation("payload"));
        }
        Ok(())
    }

    /// ## Summary
    /// Uploads an attachment and fans out `Attachment` notifications.
    ///
    /// ## Errors
    /// `Validation` for a blank name or an oversized payload; WRITE or
    /// ATTACH_FILES required.
    pub async fn add_attachment(
        &self,
        actor: &User,
        document_id: uuid::Uuid,
        name: &str,
        payload: Vec<u8>,
    ) -> ServiceResult<Attachment> {
        self.check_payload(name, &payload)?;
        let mut document = self.load_active(document_id).await?;
        authz::require(&document.meta, &document.access, actor, ATTACHING)?;

        let attachment = self
            .store
            .save_attachment(Attachment::new(actor.id, name, payload))
            .await?;
        document.attachment_ids.push(attachment.meta.id);
        document.meta.touch();
        let document = self.store.save_document(document).await?;

        subscription::fan_out(
            self.store.as_ref(),
            &document,
            actor,
            SubscriptionType::Attachment,
        )
        .await?;
        Ok(attachment)
    }

    /// ## Summary
    /// Returns the document's non-deleted attachments in upload order.
    ///
    /// ## Errors
    /// `NotFound` / `NotAuthorized` on the document.
    pub async fn attachments(
        &self,
        actor: &User,
        document_id: uuid::Uuid,
    ) -> ServiceResult<Vec<Attachment>> {
        let document = self.load_active(document_id).await?;
        authz::require(&document.meta, &document.access, actor, READING)?;

        let mut attachments = Vec::new();
        for attachment_id in &document.attachment_ids {
            if let Some(attachment) = self.store.attachment_by_id(*attachment_id).await? {
                if !attachment.meta.deleted {
                    attachments.push(attachment);
                }
            }
        }
        Ok(attachments)
    }

    /// ## Summary
    /// Returns the attachment at `position` among the non-deleted
    /// attachments.
    ///
    /// ## Errors
    /// `Validation` for an out-of-range position.
    pub async fn attachment_at(
        &self,
        actor: &User,
        document_id: uuid::Uuid,
        position: usize,
    ) -> ServiceResult<Attachment> {
        let mut attachments = self.attachments(actor, document_id).await?;
        if position >= attachments.len() {
            return Err(ServiceError::Validation("position"));
        }
        Ok(attachments.swap_remove(position))
    }

    /// ## Summary
    /// Looks an attachment up by id, verifying it belongs to the document.
    /// An existing attachment of some other document reads as a permission
    /// failure, not a lookup miss.
    ///
    /// ## Errors
    /// `NotFound` for unknown ids, `NotAuthorized` for foreign attachments.
    pub async fn attachment_by_id(
        &self,
        actor: &User,
        document_id: uuid::Uuid,
        attachment_id: uuid::Uuid,
    ) -> ServiceResult<Attachment> {
        let document = self.load_active(document_id).await?;
        authz::require(&document.meta, &document.access, actor, READING)?;

        let attachment = self
            .store
            .attachment_by_id(attachment_id)
            .await?
            .filter(|a| !a.meta.deleted)
            .ok_or(ServiceError::NotFound("attachment"))?;
        if !document.attachment_ids.contains(&attachment.meta.id) {
            return Err(ServiceError::NotAuthorized);
        }
        Ok(attachment)
    }

    /// ## Summary
    /// Replaces an attachment's name and payload in full and fans out
    /// `Attachment` notifications.
    ///
    /// ## Errors
    /// As for `add_attachment`, plus `NotAuthorized` for foreign
    /// attachments.
    pub async fn update_attachment(
        &self,
        actor: &User,
        document_id: uuid::Uuid,
        attachment_id: uuid::Uuid,
        name: &str,
        payload: Vec<u8>,
    ) -> ServiceResult<Attachment> {
        self.check_payload(name, &payload)?;
        let document = self.load_active(document_id).await?;
        authz::require(&document.meta, &document.access, actor, ATTACHING)?;

        let mut attachment = self
            .store
            .attachment_by_id(attachment_id)
            .await?
            .filter(|a| !a.meta.deleted)
            .ok_or(ServiceError::NotFound("attachment"))?;
        if !document.attachment_ids.contains(&attachment.meta.id) {
            return Err(ServiceError::NotAuthorized);
        }

        attachment.replace(name, payload);
        let attachment = self.store.save_attachment(attachment).await?;

        subscription::fan_out(
            self.store.as_ref(),
            &document,
            actor,
            SubscriptionType::Attachment,
        )
        .await?;
        Ok(attachment)
    }

    /// ## Summary
    /// Soft-deletes an attachment; the id stays on the document but stops
    /// appearing in listings.
    ///
    /// ## Errors
    /// `NotFound` for unknown ids, `NotAuthorized` for foreign attachments.
    pub async fn remove_attachment(
        &self,
        actor: &User,
        document_id: uuid::Uuid,
        attachment_id: uuid::Uuid,
    ) -> ServiceResult<()> {
        let document = self.load_active(document_id).await?;
        authz::require(&document.meta, &document.access, actor, ATTACHING)?;

        let mut attachment = self
            .store
            .attachment_by_id(attachment_id)
            .await?
            .ok_or(ServiceError::NotFound("attachment"))?;
        if !document.attachment_ids.contains(&attachment.meta.id) {
            return Err(ServiceError::NotAuthorized);
        }
        attachment.meta.deleted = true;
        attachment.meta.touch();
        self.store.save_attachment(attachment).await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Hyperlinks
    // ------------------------------------------------------------------

    /// ## Errors
    /// `Validation` for a blank url; WRITE required.
    pub async fn add_hyperlink(
        &self,
        actor: &User,
        document_id: uuid::Uuid,
        url: &str,
        description: Option<&str>,
    ) -> ServiceResult<Document> {
        if url.trim().is_empty() {
            return Err(ServiceError::Validation("url"));
        }
        let mut document = self.load_active(document_id).await?;
        authz::require(&document.meta, &document.access, actor, EDIT)?;

        document
            .hyperlinks
            .push(Hyperlink::new(actor.id, url, description));
        document.meta.touch();
        Ok(self.store.save_document(document).await?)
    }

    /// ## Errors
    /// WRITE required; removing an absent hyperlink is a no-op.
    pub async fn remove_hyperlink(
        &self,
        actor: &User,
        document_id: uuid::Uuid,
        hyperlink_id: uuid::Uuid,
    ) -> ServiceResult<Document> {
        let mut document = self.load_active(document_id).await?;
        authz::require(&document.meta, &document.access, actor, EDIT)?;

        document.hyperlinks.retain(|h| h.meta.id != hyperlink_id);
        document.meta.touch();
        Ok(self.store.save_document(document).await?)
    }

    // ------------------------------------------------------------------
    // Access grants
    // ------------------------------------------------------------------

    /// ## Summary
    /// Grants permissions to a user. A second grant for the same user merges
    /// into the existing entry, so the document holds at most one grant per
    /// user whose permission set is the union of all grants so far.
    ///
    /// ## Errors
    /// `NotFound` for unknown users; creator or WRITE required.
    pub async fn add_access(
        &self,
        actor: &User,
        document_id: uuid::Uuid,
        user_id: uuid::Uuid,
        permissions: &[Permission],
    ) -> ServiceResult<Document> {
        let mut document = self.load_active(document_id).await?;
        authz::require(&document.meta, &document.access, actor, EDIT)?;

        if self.store.user_by_id(user_id).await?.is_none() {
            return Err(ServiceError::NotFound("user"));
        }

        let grant = document
            .access
            .entry(user_id)
            .or_insert_with(|| Grant::new(actor.id));
        grant.permissions.extend(permissions.iter().copied());

        tracing::debug!(
            document_id = %document_id,
            grantee = %user_id,
            permissions = ?permissions,
            "Access granted"
        );
        Ok(self.store.save_document(document).await?)
    }

    /// ## Summary
    /// Batch grant taking semicolon-delimited user ids and permission names,
    /// fanning out to the per-user grant logic.
    ///
    /// ## Errors
    /// `Validation` if either list fails to parse as a whole; per-user
    /// errors surface as from `add_access`.
    pub async fn add_access_batch(
        &self,
        actor: &User,
        document_id: uuid::Uuid,
        combined_user_ids: &str,
        combined_permissions: &str,
    ) -> ServiceResult<Document> {
        let user_ids = parse_user_ids(combined_user_ids)?;
        let permissions = parse_permissions(combined_permissions)?;

        for user_id in user_ids {
            self.add_access(actor, document_id, user_id, &permissions)
                .await?;
        }
        self.load_active(document_id).await
    }

    /// ## Summary
    /// Revokes permissions from a user's grant. Revoking a permission that
    /// was never granted is a no-op; a grant whose permission set empties is
    /// removed outright, never left as an empty entry.
    ///
    /// ## Errors
    /// Creator or WRITE required.
    pub async fn remove_access(
        &self,
        actor: &User,
        document_id: uuid::Uuid,
        user_id: uuid::Uuid,
        permissions: &[Permission],
    ) -> ServiceResult<Document> {
        let mut document = self.load_active(document_id).await?;
        authz::require(&document.meta, &document.access, actor, EDIT)?;

        if let Some(grant) = document.access.get_mut(&user_id) {
            for permission in permissions {
                grant.permissions.remove(permission);
            }
            if grant.permissions.is_empty() {
                document.access.remove(&user_id);
            }
        }
        Ok(self.store.save_document(document).await?)
    }

    /// ## Summary
    /// Toggles the public-read flag.
    ///
    /// ## Errors
    /// Creator or WRITE required.
    pub async fn set_access_all(
        &self,
        actor: &User,
        document_id: uuid::Uuid,
        access_all: bool,
    ) -> ServiceResult<Document> {
        let mut document = self.load_active(document_id).await?;
        authz::require(&document.meta, &document.access, actor, EDIT)?;

        document.meta.access_all = access_all;
        document.meta.touch();
        Ok(self.store.save_document(document).await?)
    }

    /// ## Summary
    /// Lists grants carrying at least one of the named permissions. The
    /// shorthand `all` expands to `READ;WRITE`.
    ///
    /// ## Errors
    /// `Validation` for unknown permission names; READ required.
    pub async fn users_by_permission(
        &self,
        actor: &User,
        document_id: uuid::Uuid,
        combined_permissions: &str,
    ) -> ServiceResult<Vec<(uuid::Uuid, Grant)>> {
        let document = self.load_active(document_id).await?;
        authz::require(&document.meta, &document.access, actor, READING)?;

        let combined = if combined_permissions == "all" {
            "READ;WRITE"
        } else {
            combined_permissions
        };
        let permissions = parse_permissions(combined)?;

        Ok(document
            .access
            .iter()
            .filter(|(_, grant)| grant.allows_any(&permissions))
            .map(|(user_id, grant)| (*user_id, grant.clone()))
            .collect())
    }

    // ------------------------------------------------------------------
    // Subscriptions
    // ------------------------------------------------------------------

    /// ## Summary
    /// Subscribes the acting user to change types on a document. Any user
    /// who can read the document may subscribe; repeated calls merge types
    /// into one subscription per user.
    ///
    /// ## Errors
    /// `NotFound` / `NotAuthorized` on the document.
    pub async fn add_subscription(
        &self,
        actor: &User,
        document_id: uuid::Uuid,
        types: &[SubscriptionType],
    ) -> ServiceResult<Document> {
        let mut document = self.load_active(document_id).await?;
        authz::require(&document.meta, &document.access, actor, READING)?;

        document
            .subscriptions
            .entry(actor.id)
            .or_insert_with(|| Subscription::new(&[]))
            .merge_types(types);

        Ok(self.store.save_document(document).await?)
    }

    /// ## Summary
    /// Removes change types from the acting user's subscription; a
    /// subscription left without types is dropped from the document.
    ///
    /// ## Errors
    /// `NotFound` if the user holds no subscription on the document.
    pub async fn remove_subscription(
        &self,
        actor: &User,
        document_id: uuid::Uuid,
        types: &[SubscriptionType],
    ) -> ServiceResult<Document> {
        let mut document = self.load_active(document_id).await?;

        let subscription = document
            .subscriptions
            .get_mut(&actor.id)
            .ok_or(ServiceError::NotFound("subscription"))?;
        if subscription.remove_types(types) {
            document.subscriptions.remove(&actor.id);
        }
        Ok(self.store.save_document(document).await?)
    }
}

fn parse_user_ids(combined: &str) -> ServiceResult<Vec<uuid::Uuid>> {
    combined
        .split(';')
        .filter(|part| !part.is_empty())
        .map(|part| uuid::Uuid::parse_str(part).map_err(|_| ServiceError::Validation("user_id")))
        .collect()
}

fn parse_permissions(combined: &str) -> ServiceResult<Vec<Permission>> {
    combined
        .split(';')
        .filter(|part| !part.is_empty())
        .map(|part| Permission::from_name(part).ok_or(ServiceError::Validation("permission")))
        .collect()
}
