pub mod vless;
pub mod vmess;

pub use vless::vless_link;
pub use vmess::{vmess_link, VMessShare};
