pub mod error;
pub mod generator;
pub mod interfaces;
pub mod models;
pub mod parser;
pub mod settings;
pub mod template;
pub mod utils;
pub mod web_handlers;

// Re-export the main pipeline types for easier access
pub use error::{SettingsError, SubscribeError};
pub use generator::LinkEncoder;
pub use interfaces::{aggregate, build_subscription, SubscriptionOutput, SubscriptionRequest};
pub use models::{AddressRecord, AppState, LinkParameters, LinkScheme};
pub use parser::parse;
pub use settings::Settings;
