use base64::{engine::general_purpose, Engine as _};
use serde::Serialize;

use crate::error::SubscribeError;
use crate::models::{AddressRecord, LinkParameters, DEFAULT_PORT};

/// VMess V2 share-link body.
///
/// Field order is the serialization order, so identical inputs always
/// produce byte-identical links.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct VMessShare<'a> {
    pub v: &'a str,
    pub ps: String,
    pub add: &'a str,
    pub port: &'a str,
    pub id: &'a str,
    pub aid: &'a str,
    pub scy: &'a str,
    pub net: &'a str,
    pub host: &'a str,
    pub path: &'a str,
    pub tls: &'a str,
    pub sni: &'a str,
}

impl<'a> VMessShare<'a> {
    pub fn new(record: &'a AddressRecord, params: &'a LinkParameters, remark_suffix: &str) -> Self {
        VMessShare {
            v: "2",
            ps: format!("{}{}", record.remark_or_empty(), remark_suffix),
            add: &record.ip,
            port: &record.port,
            id: &params.identifier,
            aid: "0",
            scy: "auto",
            net: &params.transport,
            host: &params.host,
            path: &params.path,
            tls: if record.port == DEFAULT_PORT { "tls" } else { "" },
            sni: params.effective_sni(),
        }
    }
}

/// Format: `vmess://BASE64(JSON)`
pub fn vmess_link(
    record: &AddressRecord,
    params: &LinkParameters,
    remark_suffix: &str,
) -> Result<String, SubscribeError> {
    let json_str = serde_json::to_string(&VMessShare::new(record, params, remark_suffix))?;
    Ok(format!(
        "vmess://{}",
        general_purpose::STANDARD.encode(json_str)
    ))
}
