//! Export/import round-trip of a fully populated document aggregate.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use folio_test::TestContext;
use folio_test::component::store::assemble::{
    DocumentAggregate, assemble_document, import_document,
};
use folio_test::component::store::memory::MemoryStore;

#[test_log::test(tokio::test)]
async fn populated_document_survives_export_and_import() {
    let ctx = TestContext::new();
    let owner = ctx.user("owner").await;
    let document = ctx.document(&owner, "field notes").await;

    for name in ["rust", "async"] {
        let tag = ctx.tags.create(&owner, name, None).await.unwrap();
        ctx.documents
            .add_tag(&owner, document.meta.id, tag.meta.id)
            .await
            .unwrap();
    }

    let top = ctx
        .documents
        .add_comment(&owner, document.meta.id, "top level")
        .await
        .unwrap();
    ctx.comments.reply(&owner, top.meta.id, "nested").await.unwrap();
    ctx.documents
        .add_comment(&owner, document.meta.id, "second thread")
        .await
        .unwrap();

    ctx.documents
        .add_attachment(&owner, document.meta.id, "scan.pdf", vec![1, 2, 3])
        .await
        .unwrap();

    let aggregate = assemble_document(ctx.store.as_ref(), document.meta.id)
        .await
        .unwrap()
        .expect("Aggregate missing");
    assert_eq!(aggregate.comment_count(), 3);

    let json = serde_json::to_string(&aggregate).unwrap();
    let decoded: DocumentAggregate = serde_json::from_str(&json).unwrap();

    let fresh = MemoryStore::new();
    let imported = import_document(&fresh, decoded).await.unwrap();
    let reassembled = assemble_document(&fresh, imported.meta.id)
        .await
        .unwrap()
        .expect("Imported aggregate missing");

    assert_eq!(reassembled.document.meta.creator, owner.id);
    assert_eq!(reassembled.comment_count(), 3);

    let mut original: Vec<_> = aggregate.tags.iter().map(|t| t.name.clone()).collect();
    let mut imported_tags: Vec<_> = reassembled.tags.iter().map(|t| t.name.clone()).collect();
    original.sort();
    imported_tags.sort();
    assert_eq!(original, imported_tags);

    // The main content attachment plus the uploaded scan.
    assert_eq!(reassembled.attachments.len(), 2);
}
