/// Name of the implicit attachment that backs a document's editable body.
pub const MAIN_CONTENT_ATTACHMENT: &str = "maincontent.html";

/// Mime type of the main content attachment.
pub const MAIN_CONTENT_MIME: &str = "text/html";

/// Default upper bound for attachment payloads, in bytes (16 MiB).
pub const DEFAULT_MAX_ATTACHMENT_BYTES: usize = 16 * 1024 * 1024;

/// Role name for administrative users.
pub const ROLE_ADMIN: &str = "admin";
