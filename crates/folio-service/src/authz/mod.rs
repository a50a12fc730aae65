//! Access-control evaluation for content.
//!
//! A pure predicate over loaded state: no store access, no side effects. The
//! acting user is always an explicit parameter, never ambient context.

use folio_store::model::access::{AccessMap, Permission};
use folio_store::model::content::ContentMeta;
use folio_store::model::user::User;

use crate::error::{ServiceError, ServiceResult};

/// Result of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// Access is allowed.
    Allowed,
    /// Access is denied.
    Denied,
}

impl AccessDecision {
    /// Returns `true` if access is allowed.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Convert to a `Result`, returning `Err(ServiceError::NotAuthorized)` if
    /// denied.
    ///
    /// ## Errors
    /// Returns `NotAuthorized` if access is denied.
    pub fn require(self) -> ServiceResult<()> {
        match self {
            Self::Allowed => Ok(()),
            Self::Denied => Err(ServiceError::NotAuthorized),
        }
    }
}

/// ## Summary
/// Decides whether `actor` may perform an operation needing one of
/// `requested` on the content described by `meta` and `grants`.
///
/// Allowed when:
/// - the actor is the content's creator, or
/// - `access_all` is set and a read-class permission was requested, or
/// - the actor's grant carries at least one of the requested permissions
///   (logical OR across the requested set; no partial-grant notion).
///
/// A user with no grant who is not the creator is denied everything,
/// including reads, while `access_all` is unset.
#[must_use]
pub fn evaluate(
    meta: &ContentMeta,
    grants: &AccessMap,
    actor: &User,
    requested: &[Permission],
) -> AccessDecision {
    if meta.creator == actor.id {
        return AccessDecision::Allowed;
    }

    if meta.access_all && requested.iter().any(|p| p.is_read_class()) {
        return AccessDecision::Allowed;
    }

    if let Some(grant) = grants.get(&actor.id) {
        if grant.allows_any(requested) {
            return AccessDecision::Allowed;
        }
    }

    tracing::debug!(
        content_id = %meta.id,
        actor = %actor.id,
        requested = ?requested,
        "Access denied"
    );
    AccessDecision::Denied
}

/// ## Summary
/// Checks and requires one of `requested`, returning an error if denied.
///
/// ## Errors
/// Returns `NotAuthorized` if access is denied.
pub fn require(
    meta: &ContentMeta,
    grants: &AccessMap,
    actor: &User,
    requested: &[Permission],
) -> ServiceResult<()> {
    evaluate(meta, grants, actor, requested).require()
}

#[cfg(test)]
mod tests {
    use folio_store::model::access::Grant;

    use super::*;

    fn user(name: &str) -> User {
        User::new(name, name, &format!("{name}@example.org"))
    }

    fn granted(meta: &ContentMeta, grantee: &User, permissions: &[Permission]) -> AccessMap {
        let mut grant = Grant::new(meta.creator);
        grant.permissions.extend(permissions.iter().copied());
        AccessMap::from([(grantee.id, grant)])
    }

    #[test]
    fn creator_is_always_allowed() {
        let creator = user("creator");
        let meta = ContentMeta::new(creator.id);

        for permission in [
            Permission::Read,
            Permission::Write,
            Permission::CommentDocument,
            Permission::AttachFiles,
        ] {
            assert!(evaluate(&meta, &AccessMap::new(), &creator, &[permission]).is_allowed());
        }
    }

    #[test]
    fn stranger_is_denied_everything_without_grants() {
        let creator = user("creator");
        let stranger = user("stranger");
        let meta = ContentMeta::new(creator.id);

        assert!(!evaluate(&meta, &AccessMap::new(), &stranger, &[Permission::Read]).is_allowed());
        assert!(require(&meta, &AccessMap::new(), &stranger, &[Permission::Write]).is_err());
    }

    #[test]
    fn access_all_grants_read_but_nothing_else() {
        let creator = user("creator");
        let stranger = user("stranger");
        let mut meta = ContentMeta::new(creator.id);
        meta.access_all = true;

        assert!(evaluate(&meta, &AccessMap::new(), &stranger, &[Permission::Read]).is_allowed());
        assert!(!evaluate(&meta, &AccessMap::new(), &stranger, &[Permission::Write]).is_allowed());
        assert!(
            !evaluate(&meta, &AccessMap::new(), &stranger, &[Permission::AttachFiles])
                .is_allowed()
        );
    }

    #[test]
    fn any_matching_permission_in_the_requested_set_suffices() {
        let creator = user("creator");
        let commenter = user("commenter");
        let meta = ContentMeta::new(creator.id);
        let grants = granted(&meta, &commenter, &[Permission::CommentDocument]);

        assert!(
            evaluate(
                &meta,
                &grants,
                &commenter,
                &[Permission::Write, Permission::CommentDocument]
            )
            .is_allowed()
        );
        assert!(!evaluate(&meta, &grants, &commenter, &[Permission::Write]).is_allowed());
    }

    #[test]
    fn grants_apply_only_to_the_grantee() {
        let creator = user("creator");
        let writer = user("writer");
        let other = user("other");
        let meta = ContentMeta::new(creator.id);
        let grants = granted(&meta, &writer, &[Permission::Write]);

        assert!(evaluate(&meta, &grants, &writer, &[Permission::Write]).is_allowed());
        assert!(!evaluate(&meta, &grants, &other, &[Permission::Write]).is_allowed());
        assert!(!evaluate(&meta, &grants, &other, &[Permission::Read]).is_allowed());
    }
}
