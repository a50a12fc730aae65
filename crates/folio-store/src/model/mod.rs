pub mod access;
pub mod attachment;
pub mod comment;
pub mod content;
pub mod document;
pub mod hyperlink;
pub mod notification;
pub mod subscription;
pub mod tag;
pub mod user;
