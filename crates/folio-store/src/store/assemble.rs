//! Assembling documents into a self-contained aggregate view and importing
//! such a view back into a store.
//!
//! The aggregate is the serialization surface for export and round-trips:
//! shared tags are resolved, owned comment trees and attachments are
//! inlined, and soft-deleted children are filtered out. The import side is
//! the explicit cascade: children are written first, then the parent row.

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};

use crate::error::StoreResult;
use crate::model::attachment::Attachment;
use crate::model::comment::Comment;
use crate::model::document::Document;
use crate::model::tag::Tag;

use super::Store;

/// A comment with its reply subtree resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentNode {
    pub comment: Comment,
    pub replies: Vec<CommentNode>,
}

impl CommentNode {
    /// Number of comments in this subtree, including this one.
    #[must_use]
    pub fn count(&self) -> usize {
        1 + self.replies.iter().map(CommentNode::count).sum::<usize>()
    }
}

/// A document with all owned and referenced children resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentAggregate {
    pub document: Document,
    pub tags: Vec<Tag>,
    pub comments: Vec<CommentNode>,
    pub attachments: Vec<Attachment>,
}

impl DocumentAggregate {
    /// Total number of comments across all trees.
    #[must_use]
    pub fn comment_count(&self) -> usize {
        self.comments.iter().map(CommentNode::count).sum()
    }
}

/// ## Summary
/// Loads a document and resolves its tags, comment trees and attachments
/// into one serializable aggregate. Soft-deleted children (and dangling ids)
/// are skipped. Returns `None` for a missing or deleted document.
///
/// ## Errors
/// Returns an error if the underlying store fails.
pub async fn assemble_document<S: Store>(
    store: &S,
    id: uuid::Uuid,
) -> StoreResult<Option<DocumentAggregate>> {
    let Some(document) = store.document_by_id(id).await? else {
        return Ok(None);
    };
    if document.meta.deleted {
        return Ok(None);
    }

    let mut tags = Vec::new();
    for tag_id in &document.tag_ids {
        if let Some(tag) = store.tag_by_id(*tag_id).await? {
            if !tag.meta.deleted {
                tags.push(tag);
            }
        }
    }

    let mut attachments = Vec::new();
    for attachment_id in &document.attachment_ids {
        if let Some(attachment) = store.attachment_by_id(*attachment_id).await? {
            if !attachment.meta.deleted {
                attachments.push(attachment);
            }
        }
    }

    let mut comments = Vec::new();
    for comment_id in &document.comment_ids {
        if let Some(node) = assemble_comment(store, *comment_id).await? {
            comments.push(node);
        }
    }

    Ok(Some(DocumentAggregate {
        document,
        tags,
        comments,
        attachments,
    }))
}

fn assemble_comment<S: Store>(
    store: &S,
    id: uuid::Uuid,
) -> LocalBoxFuture<'_, StoreResult<Option<CommentNode>>> {
    async move {
        let Some(comment) = store.comment_by_id(id).await? else {
            return Ok(None);
        };
        if comment.meta.deleted {
            return Ok(None);
        }

        let mut replies = Vec::new();
        for reply_id in &comment.reply_ids {
            if let Some(node) = assemble_comment(store, *reply_id).await? {
                replies.push(node);
            }
        }

        Ok(Some(CommentNode { comment, replies }))
    }
    .boxed_local()
}

/// ## Summary
/// Writes an aggregate into a store, children before parent: tags, then
/// attachments, then comment trees leaf-ward, then the document row itself.
/// Child id lists on the document are rebuilt from the aggregate so the
/// imported row only references what was actually written.
///
/// ## Errors
/// Returns an error on store failure, including tag name collisions with
/// unrelated existing tags.
pub async fn import_document<S: Store>(
    store: &S,
    aggregate: DocumentAggregate,
) -> StoreResult<Document> {
    let mut document = aggregate.document;

    document.tag_ids.clear();
    for tag in aggregate.tags {
        let saved = store.save_tag(tag).await?;
        document.tag_ids.push(saved.meta.id);
    }

    document.attachment_ids.clear();
    for attachment in aggregate.attachments {
        let saved = store.save_attachment(attachment).await?;
        document.attachment_ids.push(saved.meta.id);
    }

    document.comment_ids.clear();
    for node in aggregate.comments {
        let saved = import_comment(store, node).await?;
        document.comment_ids.push(saved.meta.id);
    }

    store.save_document(document).await
}

fn import_comment<S: Store>(
    store: &S,
    node: CommentNode,
) -> LocalBoxFuture<'_, StoreResult<Comment>> {
    async move {
        let mut comment = node.comment;
        comment.reply_ids.clear();
        for reply in node.replies {
            let saved = import_comment(store, reply).await?;
            comment.reply_ids.push(saved.meta.id);
        }
        store.save_comment(comment).await
    }
    .boxed_local()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::comment::ParentRef;
    use crate::store::memory::MemoryStore;
    use crate::store::{AttachmentStore, CommentStore, DocumentStore, TagStore};

    async fn seeded_store() -> (MemoryStore, uuid::Uuid) {
        let store = MemoryStore::new();
        let creator = uuid::Uuid::now_v7();

        let mut document = Document::new(creator, "field notes", Some("scratch"));
        let tag = store
            .save_tag(Tag::new(creator, "notes", None))
            .await
            .unwrap();
        document.tag_ids.push(tag.meta.id);

        let attachment = store
            .save_attachment(Attachment::new(creator, "scan.pdf", vec![1, 2, 3]))
            .await
            .unwrap();
        document.attachment_ids.push(attachment.meta.id);

        let mut top = Comment::new(creator, ParentRef::Document(document.meta.id), "first");
        let reply = store
            .save_comment(Comment::new(
                creator,
                ParentRef::Comment(top.meta.id),
                "reply",
            ))
            .await
            .unwrap();
        top.reply_ids.push(reply.meta.id);
        let top = store.save_comment(top).await.unwrap();
        document.comment_ids.push(top.meta.id);

        let document = store.save_document(document).await.unwrap();
        (store, document.meta.id)
    }

    #[test_log::test(tokio::test)]
    async fn aggregate_resolves_children_and_filters_deleted() {
        let (store, id) = seeded_store().await;

        let aggregate = assemble_document(&store, id).await.unwrap().unwrap();
        assert_eq!(aggregate.tags.len(), 1);
        assert_eq!(aggregate.attachments.len(), 1);
        assert_eq!(aggregate.comment_count(), 2);

        // Soft-delete the reply and reassemble.
        let mut reply = store
            .comment_by_id(aggregate.comments[0].replies[0].comment.meta.id)
            .await
            .unwrap()
            .unwrap();
        reply.meta.deleted = true;
        store.save_comment(reply).await.unwrap();

        let aggregate = assemble_document(&store, id).await.unwrap().unwrap();
        assert_eq!(aggregate.comment_count(), 1);
    }

    #[test_log::test(tokio::test)]
    async fn aggregate_survives_a_serde_round_trip_into_a_fresh_store() {
        let (store, id) = seeded_store().await;
        let aggregate = assemble_document(&store, id).await.unwrap().unwrap();

        let json = serde_json::to_string(&aggregate).unwrap();
        let decoded: DocumentAggregate = serde_json::from_str(&json).unwrap();

        let fresh = MemoryStore::new();
        let imported = import_document(&fresh, decoded).await.unwrap();
        let reassembled = assemble_document(&fresh, imported.meta.id)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(reassembled.document.meta.creator, aggregate.document.meta.creator);
        assert_eq!(reassembled.comment_count(), aggregate.comment_count());

        let mut original_tags: Vec<_> = aggregate.tags.iter().map(|t| t.name.clone()).collect();
        let mut imported_tags: Vec<_> = reassembled.tags.iter().map(|t| t.name.clone()).collect();
        original_tags.sort();
        imported_tags.sort();
        assert_eq!(original_tags, imported_tags);
    }
}
