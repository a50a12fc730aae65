//! Tag creation and reuse.

use std::sync::Arc;

use folio_store::model::tag::Tag;
use folio_store::model::user::User;
use folio_store::store::Store;

use crate::error::{ServiceError, ServiceResult};

pub struct TagService<S> {
    store: Arc<S>,
}

impl<S> Clone for TagService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: Store> TagService<S> {
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// ## Summary
    /// Creates a tag, or returns the existing one when the name is already
    /// taken. Tag names are unique store-wide, so repeated creates converge
    /// on one shared row instead of accumulating duplicates.
    ///
    /// ## Errors
    /// Returns `Validation` for a blank name, or a store error.
    pub async fn create(
        &self,
        actor: &User,
        name: &str,
        description: Option<&str>,
    ) -> ServiceResult<Tag> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::Validation("name"));
        }
        if let Some(existing) = self.store.tag_by_name(name).await? {
            return Ok(existing);
        }
        Ok(self
            .store
            .save_tag(Tag::new(actor.id, name, description))
            .await?)
    }

    /// ## Summary
    /// Updates name and description of an existing tag.
    ///
    /// ## Errors
    /// - `NotFound` if the tag does not resolve.
    /// - `Validation` for a blank name.
    /// - A duplicate error if the new name collides with another tag.
    pub async fn update(
        &self,
        tag_id: uuid::Uuid,
        name: &str,
        description: Option<&str>,
    ) -> ServiceResult<Tag> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::Validation("name"));
        }
        let mut stored = self
            .store
            .tag_by_id(tag_id)
            .await?
            .filter(|t| !t.meta.deleted)
            .ok_or(ServiceError::NotFound("tag"))?;

        stored.name = name.to_string();
        stored.description = description.map(ToString::to_string);
        stored.meta.touch();
        Ok(self.store.save_tag(stored).await?)
    }

    /// ## Errors
    /// Returns `NotFound` if no tag carries the given name.
    pub async fn find_by_name(&self, name: &str) -> ServiceResult<Tag> {
        self.store
            .tag_by_name(name)
            .await?
            .ok_or(ServiceError::NotFound("tag"))
    }
}

#[cfg(test)]
mod tests {
    use folio_store::store::memory::MemoryStore;

    use super::*;

    #[test_log::test(tokio::test)]
    async fn create_reuses_an_existing_name() {
        let store = Arc::new(MemoryStore::new());
        let service = TagService::new(store);
        let alice = User::new("alice", "Alice", "alice@example.org");
        let bob = User::new("bob", "Bob", "bob@example.org");

        let first = service.create(&alice, "rust", None).await.unwrap();
        let second = service.create(&bob, "rust", Some("other")).await.unwrap();

        assert_eq!(first.meta.id, second.meta.id);
        assert_eq!(second.meta.creator, alice.id);
    }

    #[test_log::test(tokio::test)]
    async fn update_renames_the_shared_row() {
        let store = Arc::new(MemoryStore::new());
        let service = TagService::new(store);
        let alice = User::new("alice", "Alice", "alice@example.org");

        let tag = service.create(&alice, "rsut", None).await.unwrap();
        let renamed = service
            .update(tag.meta.id, "rust", Some("fixed"))
            .await
            .unwrap();

        assert_eq!(renamed.meta.id, tag.meta.id);
        assert_eq!(renamed.name, "rust");
        assert_eq!(service.find_by_name("rust").await.unwrap().meta.id, tag.meta.id);
    }
}
