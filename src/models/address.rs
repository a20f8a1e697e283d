//! Address records produced by the address parser.

/// Port used when an address entry does not specify one
pub const DEFAULT_PORT: &str = "443";

/// A single preferred address, e.g. `104.16.1.1:2053#HK`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRecord {
    /// IPv4 literal or a bracketed literal such as `[2606:4700::]`
    pub ip: String,
    /// Port as written in the source, `443` when omitted
    pub port: String,
    /// Free-text label following `#`, `None` when there is none
    pub remark: Option<String>,
}

impl AddressRecord {
    pub fn new(ip: impl Into<String>, port: Option<&str>, remark: Option<&str>) -> Self {
        AddressRecord {
            ip: ip.into(),
            port: port.unwrap_or(DEFAULT_PORT).to_string(),
            remark: remark.filter(|r| !r.is_empty()).map(str::to_string),
        }
    }

    /// Remark text, empty when absent
    pub fn remark_or_empty(&self) -> &str {
        self.remark.as_deref().unwrap_or_default()
    }
}

/// Result of normalizing and parsing an address blob
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessedContent {
    /// Records that matched the address pattern, in input order
    pub addresses: Vec<AddressRecord>,
    /// The normalized comma-delimited text the records were taken from
    pub content: String,
}
