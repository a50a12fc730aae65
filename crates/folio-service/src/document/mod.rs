pub mod input;
pub mod service;

pub use input::DocumentInput;
pub use service::{Breadcrumb, DocumentService};
