use serde::{Deserialize, Serialize};

use super::content::{ContentMeta, HasMeta};

/// An external link owned by a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hyperlink {
    pub meta: ContentMeta,
    pub url: String,
    pub description: Option<String>,
}

impl Hyperlink {
    #[must_use]
    pub fn new(creator: uuid::Uuid, url: &str, description: Option<&str>) -> Self {
        Self {
            meta: ContentMeta::new(creator),
            url: url.to_string(),
            description: description.map(ToString::to_string),
        }
    }
}

impl HasMeta for Hyperlink {
    fn meta(&self) -> &ContentMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut ContentMeta {
        &mut self.meta
    }
}
