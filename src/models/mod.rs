//! Core data models for the application
//!
//! Plain data shared by the parser, the link generators and the web
//! handlers. Nothing here performs I/O.
//!
//! ```rust
//! use subgen::models::{AddressRecord, LinkParameters, LinkScheme};
//!
//! let record = AddressRecord::new("104.16.1.1", None, Some("HK"));
//! assert_eq!(record.port, "443");
//!
//! let params = LinkParameters::new("550e8400-e29b-41d4-a716-446655440000", "example.com");
//! assert_eq!(params.effective_sni(), "example.com");
//! assert_eq!(LinkScheme::from_str("VMESS"), Some(LinkScheme::VMess));
//! ```

pub mod address;
pub mod app_state;
pub mod link;

pub use address::{AddressRecord, ProcessedContent, DEFAULT_PORT};
pub use app_state::AppState;
pub use link::{ConverterTarget, LinkParameters, LinkScheme, DEFAULT_PATH, DEFAULT_TRANSPORT};
