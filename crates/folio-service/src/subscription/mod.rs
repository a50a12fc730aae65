pub mod service;

pub use service::{SubscriptionService, fan_out};
