pub mod mentions;
pub mod service;

pub use service::CommentService;
