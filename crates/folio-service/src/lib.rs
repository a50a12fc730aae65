pub mod authz;
pub mod comment;
pub mod document;
pub mod error;
pub mod subscription;
pub mod tag;
