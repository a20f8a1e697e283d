use crate::models::{AddressRecord, LinkParameters};
use crate::utils::url::url_encode;

/// Format: `vless://uuid@ip:port?query#remark`
///
/// Only `path` and the remark are percent-encoded; the other values are
/// inserted as given. With `tls` unset the link asks for a plain
/// connection and drops the TLS-only parameters.
pub fn vless_link(record: &AddressRecord, params: &LinkParameters, alpn: &str, tls: bool) -> String {
    let security = if tls {
        format!(
            "security=tls&sni={}&alpn={}&fp=random",
            params.effective_sni(),
            alpn
        )
    } else {
        "security=none&fp=random".to_string()
    };

    let mut uri = format!(
        "vless://{}@{}:{}?encryption=none&{}&type={}&host={}&path={}",
        params.identifier,
        record.ip,
        record.port,
        security,
        params.transport,
        params.host,
        url_encode(&params.path)
    );
    if tls {
        uri.push_str("&allowInsecure=1");
    }
    uri.push('#');
    uri.push_str(&url_encode(record.remark_or_empty()));
    uri
}
