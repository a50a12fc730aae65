//! Folio document service - integration test support.
//!
//! Re-exports the workspace crates under `folio_test::component` paths and
//! provides the shared [`TestContext`] fixture: one in-memory store with all
//! services wired against it.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;

use folio_core::config::LimitsConfig;
use folio_service::comment::CommentService;
use folio_service::document::DocumentService;
use folio_service::subscription::SubscriptionService;
use folio_service::tag::TagService;
use folio_store::model::document::Document;
use folio_store::model::user::User;
use folio_store::store::{DocumentStore, UserStore};
use folio_store::store::memory::MemoryStore;

pub mod component {
    pub use folio_core::*;
    pub use folio_service::*;

    // Both globs carry an `error` module; tests want the service one, so
    // name it explicitly to win over the ambiguous glob pair.
    pub use folio_service::error;

    pub mod model {
        pub use folio_store::model::*;
    }

    pub mod store {
        pub use folio_store::store::*;
    }
}

/// One store, all services, a few seeded users. Every test gets its own
/// context so tests run in parallel without contention.
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub documents: DocumentService<MemoryStore>,
    pub comments: CommentService<MemoryStore>,
    pub tags: TagService<MemoryStore>,
    pub subscriptions: SubscriptionService<MemoryStore>,
}

impl TestContext {
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            documents: DocumentService::new(Arc::clone(&store), LimitsConfig::default()),
            comments: CommentService::new(Arc::clone(&store)),
            tags: TagService::new(Arc::clone(&store)),
            subscriptions: SubscriptionService::new(Arc::clone(&store)),
            store,
        }
    }

    /// Context with a tight attachment budget, for limit tests.
    #[must_use]
    pub fn with_max_attachment_bytes(max_attachment_bytes: usize) -> Self {
        let mut context = Self::new();
        context.documents = DocumentService::new(
            Arc::clone(&context.store),
            LimitsConfig {
                max_attachment_bytes,
            },
        );
        context
    }

    /// Seeds a user; username doubles as display name seed.
    pub async fn user(&self, username: &str) -> User {
        self.store
            .save_user(User::new(
                username,
                username,
                &format!("{username}@example.org"),
            ))
            .await
            .expect("Failed to seed user")
    }

    /// Creates a document owned by `owner` through the service, so it gets
    /// the implicit main content attachment.
    pub async fn document(&self, owner: &User, title: &str) -> Document {
        self.documents
            .save(
                owner,
                folio_service::document::DocumentInput::create(title),
            )
            .await
            .expect("Failed to seed document")
    }

    /// Reads the stored document row directly, bypassing permission checks.
    pub async fn stored_document(&self, id: uuid::Uuid) -> Document {
        self.store
            .document_by_id(id)
            .await
            .expect("Store read failed")
            .expect("Document missing")
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
