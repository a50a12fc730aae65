use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category of document change a user can subscribe to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum SubscriptionType {
    MainContent,
    Attachment,
    Comment,
    Discussion,
}

impl SubscriptionType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MainContent => "MAIN_CONTENT",
            Self::Attachment => "ATTACHMENT",
            Self::Comment => "COMMENT",
            Self::Discussion => "DISCUSSION",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "MAIN_CONTENT" => Some(Self::MainContent),
            "ATTACHMENT" => Some(Self::Attachment),
            "COMMENT" => Some(Self::Comment),
            "DISCUSSION" => Some(Self::Discussion),
            _ => None,
        }
    }
}

impl std::fmt::Display for SubscriptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's opt-in to change notifications on one document.
///
/// Subscriptions are keyed by subscriber in a [`SubscriptionMap`], so a
/// document holds at most one subscription per user. The type list is
/// deduplicated and keeps first-seen insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub types: Vec<SubscriptionType>,
    pub created_at: DateTime<Utc>,
}

impl Subscription {
    #[must_use]
    pub fn new(types: &[SubscriptionType]) -> Self {
        let mut subscription = Self {
            types: Vec::new(),
            created_at: Utc::now(),
        };
        subscription.merge_types(types);
        subscription
    }

    /// Merges the requested types into the type list, skipping ones already
    /// present.
    pub fn merge_types(&mut self, types: &[SubscriptionType]) {
        for ty in types {
            if !self.types.contains(ty) {
                self.types.push(*ty);
            }
        }
    }

    /// Removes the given types. Removing an absent type is a no-op. Returns
    /// `true` when no types remain, in which case the caller is expected to
    /// drop the subscription entirely.
    pub fn remove_types(&mut self, types: &[SubscriptionType]) -> bool {
        self.types.retain(|ty| !types.contains(ty));
        self.types.is_empty()
    }
}

/// Subscriber user id to subscription.
pub type SubscriptionMap = BTreeMap<uuid::Uuid, Subscription>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_deduplicates_and_keeps_first_seen_order() {
        let mut subscription = Subscription::new(&[SubscriptionType::Comment]);
        subscription.merge_types(&[
            SubscriptionType::MainContent,
            SubscriptionType::Comment,
            SubscriptionType::MainContent,
        ]);

        assert_eq!(
            subscription.types,
            vec![SubscriptionType::Comment, SubscriptionType::MainContent]
        );
    }

    #[test]
    fn removing_the_last_type_signals_empty() {
        let mut subscription =
            Subscription::new(&[SubscriptionType::Comment, SubscriptionType::Attachment]);

        assert!(!subscription.remove_types(&[SubscriptionType::Comment]));
        // absent type is a no-op
        assert!(!subscription.remove_types(&[SubscriptionType::Discussion]));
        assert!(subscription.remove_types(&[SubscriptionType::Attachment]));
    }
}
