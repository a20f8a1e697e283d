pub mod aggregator;
pub mod converter;
pub mod subscription;

pub use aggregator::aggregate;
pub use subscription::{build_subscription, SubscriptionOutput, SubscriptionRequest};
