//! Grant bookkeeping on the document's access map: merge-on-regrant, full
//! removal of emptied grants, and the semicolon-delimited batch form.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use folio_test::TestContext;
use folio_test::component::error::ServiceError;
use folio_test::component::model::access::Permission;

#[test_log::test(tokio::test)]
async fn regrant_merges_into_one_entry() {
    let ctx = TestContext::new();
    let owner = ctx.user("owner").await;
    let grantee = ctx.user("grantee").await;
    let document = ctx.document(&owner, "shared").await;

    ctx.documents
        .add_access(&owner, document.meta.id, grantee.id, &[Permission::Read])
        .await
        .unwrap();
    let updated = ctx
        .documents
        .add_access(
            &owner,
            document.meta.id,
            grantee.id,
            &[Permission::Write, Permission::Read],
        )
        .await
        .unwrap();

    assert_eq!(updated.access.len(), 1);
    let grant = &updated.access[&grantee.id];
    assert!(grant.permissions.contains(&Permission::Read));
    assert!(grant.permissions.contains(&Permission::Write));
    assert_eq!(grant.permissions.len(), 2);
}

#[test_log::test(tokio::test)]
async fn removing_all_permissions_drops_the_entry() {
    let ctx = TestContext::new();
    let owner = ctx.user("owner").await;
    let grantee = ctx.user("grantee").await;
    let document = ctx.document(&owner, "shared").await;

    ctx.documents
        .add_access(
            &owner,
            document.meta.id,
            grantee.id,
            &[Permission::Read, Permission::Write],
        )
        .await
        .unwrap();

    // Removing a permission never granted is a no-op, not an error.
    let updated = ctx
        .documents
        .remove_access(
            &owner,
            document.meta.id,
            grantee.id,
            &[Permission::AttachFiles],
        )
        .await
        .unwrap();
    assert_eq!(updated.access[&grantee.id].permissions.len(), 2);

    let updated = ctx
        .documents
        .remove_access(
            &owner,
            document.meta.id,
            grantee.id,
            &[Permission::Read, Permission::Write],
        )
        .await
        .unwrap();
    assert!(!updated.access.contains_key(&grantee.id));
}

#[test_log::test(tokio::test)]
async fn grants_require_a_known_user() {
    let ctx = TestContext::new();
    let owner = ctx.user("owner").await;
    let document = ctx.document(&owner, "shared").await;

    let err = ctx
        .documents
        .add_access(
            &owner,
            document.meta.id,
            uuid::Uuid::now_v7(),
            &[Permission::Read],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound("user")));
}

#[test_log::test(tokio::test)]
async fn batch_grant_fans_out_per_user() {
    let ctx = TestContext::new();
    let owner = ctx.user("owner").await;
    let alice = ctx.user("alice").await;
    let bob = ctx.user("bob").await;
    let document = ctx.document(&owner, "shared").await;

    let combined_users = format!("{};{}", alice.id, bob.id);
    let updated = ctx
        .documents
        .add_access_batch(&owner, document.meta.id, &combined_users, "READ;WRITE")
        .await
        .unwrap();

    assert_eq!(updated.access.len(), 2);
    for user_id in [alice.id, bob.id] {
        let grant = &updated.access[&user_id];
        assert!(grant.permissions.contains(&Permission::Read));
        assert!(grant.permissions.contains(&Permission::Write));
    }
}

#[test_log::test(tokio::test)]
async fn batch_grant_rejects_malformed_input() {
    let ctx = TestContext::new();
    let owner = ctx.user("owner").await;
    let alice = ctx.user("alice").await;
    let document = ctx.document(&owner, "shared").await;

    let err = ctx
        .documents
        .add_access_batch(&owner, document.meta.id, "not-a-uuid", "READ")
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation("user_id")));

    let err = ctx
        .documents
        .add_access_batch(
            &owner,
            document.meta.id,
            &alice.id.to_string(),
            "READ;OWN",
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation("permission")));

    // A rejected batch grants nothing.
    let stored = ctx.stored_document(document.meta.id).await;
    assert!(stored.access.is_empty());
}

#[test_log::test(tokio::test)]
async fn users_by_permission_filters_grants() {
    let ctx = TestContext::new();
    let owner = ctx.user("owner").await;
    let reader = ctx.user("reader").await;
    let writer = ctx.user("writer").await;
    let document = ctx.document(&owner, "shared").await;

    ctx.documents
        .add_access(&owner, document.meta.id, reader.id, &[Permission::Read])
        .await
        .unwrap();
    ctx.documents
        .add_access(&owner, document.meta.id, writer.id, &[Permission::Write])
        .await
        .unwrap();

    let writers = ctx
        .documents
        .users_by_permission(&owner, document.meta.id, "WRITE")
        .await
        .unwrap();
    assert_eq!(writers.len(), 1);
    assert_eq!(writers[0].0, writer.id);

    // The "all" shorthand covers READ and WRITE grants.
    let everyone = ctx
        .documents
        .users_by_permission(&owner, document.meta.id, "all")
        .await
        .unwrap();
    assert_eq!(everyone.len(), 2);
}
