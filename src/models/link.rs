//! Link parameters and output selectors

use serde::Deserialize;

pub const DEFAULT_PATH: &str = "/?ed=2560";
pub const DEFAULT_TRANSPORT: &str = "ws";

/// Transport names understood by common clients. Other values are passed
/// through unchanged.
pub const KNOWN_TRANSPORTS: &[&str] = &[
    "tcp",
    "ws",
    "http",
    "h2",
    "grpc",
    "quic",
    "kcp",
    "httpupgrade",
    "splithttp",
    "xhttp",
];

/// Connection parameters shared by every link of a subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkParameters {
    /// User UUID (not format-checked)
    pub identifier: String,
    pub host: String,
    pub path: String,
    /// Server name indication, falls back to `host`
    pub sni: Option<String>,
    /// Transport type, e.g. `ws`
    pub transport: String,
}

impl LinkParameters {
    pub fn new(identifier: impl Into<String>, host: impl Into<String>) -> Self {
        LinkParameters {
            identifier: identifier.into(),
            host: host.into(),
            path: DEFAULT_PATH.to_string(),
            sni: None,
            transport: DEFAULT_TRANSPORT.to_string(),
        }
    }

    pub fn effective_sni(&self) -> &str {
        match self.sni.as_deref() {
            Some(sni) if !sni.is_empty() => sni,
            _ => &self.host,
        }
    }

    pub fn is_known_transport(&self) -> bool {
        KNOWN_TRANSPORTS.contains(&self.transport.as_str())
    }
}

/// Link format emitted for each address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkScheme {
    VMess,
    #[default]
    Vless,
}

impl LinkScheme {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "vmess" => Some(LinkScheme::VMess),
            "vless" => Some(LinkScheme::Vless),
            _ => None,
        }
    }
}

/// Client formats that are delegated to the external subscription converter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConverterTarget {
    Clash,
    SingBox,
}

impl ConverterTarget {
    /// Parse the `format` query hint
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "clash" | "meta" | "mihomo" => Some(ConverterTarget::Clash),
            "singbox" | "sing-box" => Some(ConverterTarget::SingBox),
            _ => None,
        }
    }

    /// Value of the converter's `target` parameter
    pub fn to_str(&self) -> &'static str {
        match self {
            ConverterTarget::Clash => "clash",
            ConverterTarget::SingBox => "singbox",
        }
    }
}
