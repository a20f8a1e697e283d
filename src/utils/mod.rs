pub mod base64;
pub mod http;
pub mod url;
pub mod useragent;

// Re-export common utilities
pub use self::base64::{base64_decode, base64_encode};
pub use self::url::{url_decode, url_encode};
pub use useragent::match_user_agent;
