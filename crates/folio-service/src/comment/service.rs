//! Comment authoring and editing rules.

use std::sync::Arc;

use folio_store::model::comment::{Comment, ParentRef};
use folio_store::model::user::User;
use folio_store::store::Store;

use crate::error::{ServiceError, ServiceResult};

use super::mentions;

pub struct CommentService<S> {
    store: Arc<S>,
}

impl<S> Clone for CommentService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: Store> CommentService<S> {
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// ## Summary
    /// Edits an existing comment's text. Only the original creator may edit;
    /// there is no write-grant bypass here, unlike document edits. Mention
    /// notifications are a creation-time concern and do not fire again on
    /// edits.
    ///
    /// ## Errors
    /// - `NotFound` if the comment does not resolve.
    /// - `NotAuthorized` for any editor other than the creator.
    /// - `Validation` for blank text.
    pub async fn update(&self, actor: &User, comment_id: uuid::Uuid, text: &str) -> ServiceResult<Comment> {
        if text.trim().is_empty() {
            return Err(ServiceError::Validation("text"));
        }
        let mut stored = self
            .store
            .comment_by_id(comment_id)
            .await?
            .filter(|c| !c.meta.deleted)
            .ok_or(ServiceError::NotFound("comment"))?;
        if stored.meta.creator != actor.id {
            return Err(ServiceError::NotAuthorized);
        }

        stored.meta.touch();
        stored.text = text.to_string();
        Ok(self.store.save_comment(stored).await?)
    }

    /// ## Summary
    /// Creates a reply under an existing comment: the new comment's parent
    /// link points at the loaded parent and the parent's reply list gains the
    /// new id. The reply is written first, then the updated parent.
    ///
    /// ## Errors
    /// - `NotFound` if the parent comment does not resolve.
    /// - `Validation` for blank text.
    pub async fn reply(
        &self,
        actor: &User,
        parent_id: uuid::Uuid,
        text: &str,
    ) -> ServiceResult<Comment> {
        if text.trim().is_empty() {
            return Err(ServiceError::Validation("text"));
        }
        let mut parent = self
            .store
            .comment_by_id(parent_id)
            .await?
            .filter(|c| !c.meta.deleted)
            .ok_or(ServiceError::NotFound("parent comment"))?;

        let reply = Comment::new(actor.id, ParentRef::Comment(parent.meta.id), text);
        let reply = self.store.save_comment(reply).await?;

        parent.reply_ids.push(reply.meta.id);
        parent.meta.touch();
        self.store.save_comment(parent).await?;

        mentions::notify_mentions(self.store.as_ref(), &reply).await?;
        Ok(reply)
    }

    /// ## Summary
    /// Returns the direct, non-deleted replies of a comment in creation
    /// order.
    ///
    /// ## Errors
    /// Returns `NotFound` if the comment does not resolve.
    pub async fn replies(&self, comment_id: uuid::Uuid) -> ServiceResult<Vec<Comment>> {
        let parent = self
            .store
            .comment_by_id(comment_id)
            .await?
            .ok_or(ServiceError::NotFound("comment"))?;

        let mut replies = Vec::new();
        for reply_id in &parent.reply_ids {
            if let Some(reply) = self.store.comment_by_id(*reply_id).await? {
                if !reply.meta.deleted {
                    replies.push(reply);
                }
            }
        }
        Ok(replies)
    }

    /// ## Summary
    /// Records the acting user's agreement with a comment.
    ///
    /// ## Errors
    /// - `NotFound` if the comment does not resolve.
    /// - `AlreadyExists` if the user already agreed; this is the one place
    ///   where a duplicate is reported rather than merged.
    pub async fn agree(&self, actor: &User, comment_id: uuid::Uuid) -> ServiceResult<Comment> {
        let mut comment = self
            .store
            .comment_by_id(comment_id)
            .await?
            .filter(|c| !c.meta.deleted)
            .ok_or(ServiceError::NotFound("comment"))?;

        if comment.liked_by.contains(&actor.id) {
            return Err(ServiceError::AlreadyExists("agree"));
        }
        comment.liked_by.push(actor.id);
        Ok(self.store.save_comment(comment).await?)
    }
}
