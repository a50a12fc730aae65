//! `@username` mention handling for comment text.

use folio_store::model::comment::{Comment, ParentRef};
use folio_store::model::notification::Notification;
use folio_store::model::subscription::SubscriptionType;
use folio_store::store::Store;

use crate::error::{ServiceError, ServiceResult};

/// Parent chains are shallow in practice; the cap guards a corrupted cycle.
const MAX_PARENT_DEPTH: usize = 64;

/// ## Summary
/// Extracts mentioned usernames from comment text, in order of first
/// appearance, deduplicated. A mention is an `@` followed by one or more
/// username characters (alphanumeric, `_`, `.`, `-`).
#[must_use]
pub fn parse_mentions(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let mut rest = text;
    while let Some(at) = rest.find('@') {
        rest = &rest[at + 1..];
        let end = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')))
            .unwrap_or(rest.len());
        if end > 0 {
            let name = &rest[..end];
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        rest = &rest[end..];
    }
    names
}

/// ## Summary
/// Walks a comment's parent chain up to the enclosing document.
///
/// ## Errors
/// Returns `NotFound` if an intermediate parent comment does not resolve and
/// an invariant violation if the chain exceeds the depth cap.
pub async fn enclosing_document<S: Store>(
    store: &S,
    mut parent: ParentRef,
) -> ServiceResult<uuid::Uuid> {
    for _ in 0..MAX_PARENT_DEPTH {
        match parent {
            ParentRef::Document(id) => return Ok(id),
            ParentRef::Comment(id) => {
                let comment = store
                    .comment_by_id(id)
                    .await?
                    .ok_or(ServiceError::NotFound("parent comment"))?;
                parent = comment.parent;
            }
        }
    }
    Err(ServiceError::InvariantViolation(
        "comment parent chain does not reach a document",
    ))
}

/// ## Summary
/// Notifies every user mentioned in `comment` about it, addressed to the
/// enclosing document. Mentions of unknown usernames are ignored; the author
/// mentioning themselves is not notified. Mention notifications do not
/// require a subscription.
///
/// ## Errors
/// Returns an error if parent resolution or a notification write fails.
pub async fn notify_mentions<S: Store>(store: &S, comment: &Comment) -> ServiceResult<()> {
    let names = parse_mentions(&comment.text);
    if names.is_empty() {
        return Ok(());
    }
    let document_id = enclosing_document(store, comment.parent).await?;
    for name in names {
        let Some(user) = store.user_by_username(&name).await? else {
            continue;
        };
        if user.id == comment.meta.creator {
            continue;
        }
        tracing::debug!(
            document_id = %document_id,
            mentioned = %user.id,
            comment_id = %comment.meta.id,
            "Mention notification"
        );
        store
            .save_notification(Notification::new(
                document_id,
                user.id,
                comment.meta.creator,
                SubscriptionType::Comment,
            ))
            .await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mentions_are_extracted_in_order_and_deduplicated() {
        let text = "ping @ada and @grace.h, then @ada again; mail @ no-one";
        assert_eq!(parse_mentions(text), vec!["ada", "grace.h"]);
    }

    #[test]
    fn text_without_mentions_yields_nothing() {
        assert!(parse_mentions("plain text").is_empty());
        assert!(parse_mentions("trailing @").is_empty());
    }
}
