use serde::{Deserialize, Serialize};

use super::content::{ContentMeta, HasMeta};

/// A shared label attached to content. Tags are reference-only relations:
/// their lifetime is independent of the content that points at them, and the
/// store enforces name uniqueness so lookups by name reuse one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub meta: ContentMeta,
    pub name: String,
    pub description: Option<String>,
}

impl Tag {
    #[must_use]
    pub fn new(creator: uuid::Uuid, name: &str, description: Option<&str>) -> Self {
        Self {
            meta: ContentMeta::new(creator),
            name: name.to_string(),
            description: description.map(ToString::to_string),
        }
    }
}

impl HasMeta for Tag {
    fn meta(&self) -> &ContentMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut ContentMeta {
        &mut self.meta
    }
}
