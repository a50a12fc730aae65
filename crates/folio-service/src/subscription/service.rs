//! Notification creation and delivery.

use std::sync::Arc;

use folio_store::model::document::Document;
use folio_store::model::notification::Notification;
use folio_store::model::subscription::SubscriptionType;
use folio_store::model::user::User;
use folio_store::store::Store;

use crate::error::ServiceResult;

/// ## Summary
/// Emits one notification row per subscriber of `document` whose
/// subscription covers `kind`. The editor's own subscription, if any, is
/// suppressed: users are not told about their own edits.
///
/// ## Errors
/// Returns an error if writing a notification row fails.
pub async fn fan_out<S: Store>(
    store: &S,
    document: &Document,
    editor: &User,
    kind: SubscriptionType,
) -> ServiceResult<()> {
    for (subscriber_id, subscription) in &document.subscriptions {
        if *subscriber_id == editor.id {
            continue;
        }
        if subscription.types.contains(&kind) {
            tracing::trace!(
                document_id = %document.meta.id,
                subscriber = %subscriber_id,
                kind = %kind,
                "Creating notification"
            );
            store
                .save_notification(Notification::new(
                    document.meta.id,
                    *subscriber_id,
                    editor.id,
                    kind,
                ))
                .await?;
        }
    }
    Ok(())
}

/// Delivery side of the notification pipeline.
pub struct SubscriptionService<S> {
    store: Arc<S>,
}

impl<S> Clone for SubscriptionService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: Store> SubscriptionService<S> {
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// ## Summary
    /// Returns the acting user's undelivered notifications, oldest first.
    /// Rows already marked as read stay in the store but are filtered out.
    ///
    /// ## Errors
    /// Returns an error if the store fails.
    pub async fn unread_notifications(&self, actor: &User) -> ServiceResult<Vec<Notification>> {
        let rows = self.store.notifications_for_subscriber(actor.id).await?;
        Ok(rows.into_iter().filter(|n| !n.marked_as_read).collect())
    }

    /// ## Summary
    /// Marks the given notifications as read. Only rows belonging to the
    /// acting user are touched; marking an already-read row is a no-op.
    /// Returns the number of rows flipped.
    ///
    /// ## Errors
    /// Returns an error if the store fails.
    pub async fn mark_as_read(&self, actor: &User, ids: &[uuid::Uuid]) -> ServiceResult<usize> {
        let rows = self.store.notifications_for_subscriber(actor.id).await?;
        let mut flipped = 0;
        for mut row in rows {
            if ids.contains(&row.id) && !row.marked_as_read {
                row.marked_as_read = true;
                self.store.save_notification(row).await?;
                flipped += 1;
            }
        }
        Ok(flipped)
    }
}

#[cfg(test)]
mod tests {
    use folio_store::model::subscription::Subscription;
    use folio_store::store::NotificationStore;
    use folio_store::store::memory::MemoryStore;

    use super::*;

    fn subscribed_document(
        creator: &User,
        subscribers: &[(&User, &[SubscriptionType])],
    ) -> Document {
        let mut document = Document::new(creator.id, "watched", None);
        for (user, types) in subscribers {
            document
                .subscriptions
                .insert(user.id, Subscription::new(types));
        }
        document
    }

    #[test_log::test(tokio::test)]
    async fn fan_out_matches_type_and_skips_the_editor() {
        let store = MemoryStore::new();
        let editor = User::new("editor", "Editor", "editor@example.org");
        let watcher = User::new("watcher", "Watcher", "watcher@example.org");
        let commenter = User::new("commenter", "Commenter", "commenter@example.org");

        let document = subscribed_document(
            &editor,
            &[
                (&editor, &[SubscriptionType::MainContent]),
                (&watcher, &[SubscriptionType::MainContent]),
                (&commenter, &[SubscriptionType::Comment]),
            ],
        );

        fan_out(&store, &document, &editor, SubscriptionType::MainContent)
            .await
            .unwrap();

        // The editor subscribed but edited; nothing for them.
        assert!(
            store
                .notifications_for_subscriber(editor.id)
                .await
                .unwrap()
                .is_empty()
        );
        // Type mismatch for the comment subscriber.
        assert!(
            store
                .notifications_for_subscriber(commenter.id)
                .await
                .unwrap()
                .is_empty()
        );

        let rows = store
            .notifications_for_subscriber(watcher.id)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].editor_id, editor.id);
        assert_eq!(rows[0].kind, SubscriptionType::MainContent);
        assert!(!rows[0].marked_as_read);
    }

    #[test_log::test(tokio::test)]
    async fn mark_as_read_only_touches_own_unread_rows() {
        let store = Arc::new(MemoryStore::new());
        let service = SubscriptionService::new(Arc::clone(&store));
        let watcher = User::new("watcher", "Watcher", "watcher@example.org");
        let other = User::new("other", "Other", "other@example.org");
        let document_id = uuid::Uuid::now_v7();
        let editor_id = uuid::Uuid::now_v7();

        let mine = store
            .save_notification(Notification::new(
                document_id,
                watcher.id,
                editor_id,
                SubscriptionType::MainContent,
            ))
            .await
            .unwrap();
        let theirs = store
            .save_notification(Notification::new(
                document_id,
                other.id,
                editor_id,
                SubscriptionType::MainContent,
            ))
            .await
            .unwrap();

        // Passing a foreign row id must not flip it.
        let flipped = service
            .mark_as_read(&watcher, &[mine.id, theirs.id])
            .await
            .unwrap();
        assert_eq!(flipped, 1);
        assert!(service.unread_notifications(&watcher).await.unwrap().is_empty());
        assert_eq!(service.unread_notifications(&other).await.unwrap().len(), 1);

        // Idempotent.
        let flipped = service.mark_as_read(&watcher, &[mine.id]).await.unwrap();
        assert_eq!(flipped, 0);
    }
}
