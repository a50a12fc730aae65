use serde::{Deserialize, Serialize};

use super::content::{ContentMeta, HasMeta};

/// A binary payload owned by a document. Immutable once uploaded except for
/// a full replace via [`Attachment::replace`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub meta: ContentMeta,
    pub name: String,
    pub mime_type: Option<String>,
    pub payload: Vec<u8>,
}

impl Attachment {
    #[must_use]
    pub fn new(creator: uuid::Uuid, name: &str, payload: Vec<u8>) -> Self {
        Self {
            meta: ContentMeta::new(creator),
            name: name.to_string(),
            mime_type: guess_mime_type(name).map(ToString::to_string),
            payload,
        }
    }

    /// Replaces name, payload and the derived mime type in one step.
    pub fn replace(&mut self, name: &str, payload: Vec<u8>) {
        self.name = name.to_string();
        self.mime_type = guess_mime_type(name).map(ToString::to_string);
        self.payload = payload;
        self.meta.touch();
    }
}

impl HasMeta for Attachment {
    fn meta(&self) -> &ContentMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut ContentMeta {
        &mut self.meta
    }
}

/// Guesses a mime type from the file name extension. Unknown extensions map
/// to `None` rather than a catch-all.
#[must_use]
pub fn guess_mime_type(name: &str) -> Option<&'static str> {
    let extension = name.rsplit_once('.')?.1.to_ascii_lowercase();
    match extension.as_str() {
        "html" | "htm" => Some("text/html"),
        "txt" => Some("text/plain"),
        "md" => Some("text/markdown"),
        "csv" => Some("text/csv"),
        "json" => Some("application/json"),
        "pdf" => Some("application/pdf"),
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "svg" => Some("image/svg+xml"),
        "zip" => Some("application/zip"),
        _ => None,
    }
}
