pub mod formats;

pub use formats::{vless_link, vmess_link};

use crate::error::SubscribeError;
use crate::models::{AddressRecord, LinkParameters, LinkScheme};
use crate::settings::Settings;

/// Turns address records into share links.
///
/// Holds the server-wide link options; everything request specific comes
/// in through [`LinkParameters`].
#[derive(Debug, Clone)]
pub struct LinkEncoder {
    pub alpn: String,
    /// Appended to the remark in VMess display names
    pub remark_suffix: String,
    pub no_tls: bool,
    pub https_ports: Vec<String>,
    /// Backend addresses handed to the server through `proxyip=` in the path
    pub proxy_ips: Vec<String>,
    /// Remark keywords selecting which records get a proxy IP; empty selects all
    pub match_proxy_ips: Vec<String>,
}

impl Default for LinkEncoder {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl LinkEncoder {
    pub fn from_settings(settings: &Settings) -> Self {
        LinkEncoder {
            alpn: settings.alpn.clone(),
            remark_suffix: settings.remark_suffix.clone(),
            no_tls: settings.no_tls,
            https_ports: settings.https_ports.clone(),
            proxy_ips: settings.proxy_ips.clone(),
            match_proxy_ips: settings.match_proxy_ips.clone(),
        }
    }

    fn is_tls_port(&self, port: &str) -> bool {
        !self.no_tls || port == "443" || self.https_ports.iter().any(|p| p == port)
    }

    /// Proxy IP for the `index`-th record, picked round-robin
    fn proxy_ip_for(&self, record: &AddressRecord, index: usize) -> Option<&str> {
        if self.proxy_ips.is_empty() {
            return None;
        }
        let remark = record.remark_or_empty();
        let matched = self.match_proxy_ips.is_empty()
            || self
                .match_proxy_ips
                .iter()
                .any(|keyword| remark.contains(keyword.as_str()));
        if !matched {
            return None;
        }
        Some(&self.proxy_ips[index % self.proxy_ips.len()])
    }

    /// Build one link per record, in order
    pub fn encode_all(
        &self,
        records: &[AddressRecord],
        params: &LinkParameters,
        scheme: LinkScheme,
    ) -> Result<Vec<String>, SubscribeError> {
        records
            .iter()
            .enumerate()
            .map(|(index, record)| match self.proxy_ip_for(record, index) {
                Some(proxy_ip) => {
                    let mut params = params.clone();
                    params.path = with_proxy_ip(&params.path, proxy_ip);
                    self.encode_link(record, &params, scheme)
                }
                None => self.encode_link(record, params, scheme),
            })
            .collect()
    }

    /// Build one link for `record`
    pub fn encode_link(
        &self,
        record: &AddressRecord,
        params: &LinkParameters,
        scheme: LinkScheme,
    ) -> Result<String, SubscribeError> {
        match scheme {
            LinkScheme::VMess => vmess_link(record, params, &self.remark_suffix),
            LinkScheme::Vless => Ok(vless_link(
                record,
                params,
                &self.alpn,
                self.is_tls_port(&record.port),
            )),
        }
    }
}

/// Append `proxyip=<ip>` to the query part of `path`
fn with_proxy_ip(path: &str, proxy_ip: &str) -> String {
    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{}{}proxyip={}", path, separator, proxy_ip)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{base64_decode, url_encode};

    fn sample() -> (AddressRecord, LinkParameters) {
        let record = AddressRecord::new("104.16.1.1", Some("2053"), Some("HK #1"));
        let mut params = LinkParameters::new("550e8400-e29b-41d4-a716-446655440000", "example.com");
        params.path = "/?ed=2560".to_string();
        (record, params)
    }

    #[test]
    fn test_vless_link() {
        let (record, params) = sample();
        let link = LinkEncoder::default()
            .encode_link(&record, &params, LinkScheme::Vless)
            .unwrap();
        assert_eq!(
            link,
            "vless://550e8400-e29b-41d4-a716-446655440000@104.16.1.1:2053?encryption=none\
             &security=tls&sni=example.com&alpn=h3&fp=random&type=ws&host=example.com\
             &path=%2F%3Fed%3D2560&allowInsecure=1#HK%20%231"
        );
    }

    #[test]
    fn test_vless_link_custom_sni_and_empty_remark() {
        let (_, mut params) = sample();
        params.sni = Some("sni.example.org".to_string());
        let record = AddressRecord::new("1.2.3.4", None, None);
        let link = LinkEncoder::default()
            .encode_link(&record, &params, LinkScheme::Vless)
            .unwrap();
        assert!(link.starts_with("vless://550e8400-e29b-41d4-a716-446655440000@1.2.3.4:443?"));
        assert!(link.contains("&sni=sni.example.org&"));
        assert!(link.ends_with("&allowInsecure=1#"));
    }

    #[test]
    fn test_vless_link_without_tls() {
        let (_, params) = sample();
        let mut encoder = LinkEncoder::default();
        encoder.no_tls = true;

        let plain = AddressRecord::new("1.2.3.4", Some("80"), None);
        let link = encoder.encode_link(&plain, &params, LinkScheme::Vless).unwrap();
        assert!(link.contains("?encryption=none&security=none&fp=random&type=ws"));
        assert!(!link.contains("sni="));
        assert!(!link.contains("allowInsecure"));

        // https ports keep TLS
        let tls = AddressRecord::new("1.2.3.4", Some("8443"), None);
        let link = encoder.encode_link(&tls, &params, LinkScheme::Vless).unwrap();
        assert!(link.contains("security=tls"));
    }

    #[test]
    fn test_vmess_link() {
        let (record, params) = sample();
        let link = LinkEncoder::default()
            .encode_link(&record, &params, LinkScheme::VMess)
            .unwrap();
        let body = link.strip_prefix("vmess://").unwrap();
        assert_eq!(
            base64_decode(body, false),
            r#"{"v":"2","ps":"HK #1 - 优选节点","add":"104.16.1.1","port":"2053","id":"550e8400-e29b-41d4-a716-446655440000","aid":"0","scy":"auto","net":"ws","host":"example.com","path":"/?ed=2560","tls":"","sni":"example.com"}"#
        );
    }

    #[test]
    fn test_vmess_tls_on_443() {
        let (_, params) = sample();
        let record = AddressRecord::new("1.2.3.4", None, None);
        let link = vmess_link(&record, &params, "").unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&base64_decode(&link[8..], false)).unwrap();
        assert_eq!(json["tls"], "tls");
        assert_eq!(json["ps"], "");
        assert_eq!(json["port"], "443");
    }

    #[test]
    fn test_vmess_deterministic() {
        let (record, params) = sample();
        let encoder = LinkEncoder::default();
        let first = encoder.encode_link(&record, &params, LinkScheme::VMess).unwrap();
        let second = encoder.encode_link(&record, &params, LinkScheme::VMess).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_encode_all_with_proxy_ips() {
        let (_, params) = sample();
        let mut encoder = LinkEncoder::default();
        encoder.proxy_ips = vec!["pa.example".to_string(), "pb.example".to_string()];
        encoder.match_proxy_ips = vec!["HK".to_string()];

        let records = vec![
            AddressRecord::new("1.1.1.1", None, Some("HK-1")),
            AddressRecord::new("2.2.2.2", None, Some("US")),
            AddressRecord::new("3.3.3.3", None, Some("HK-2")),
            AddressRecord::new("4.4.4.4", None, Some("HK-3")),
        ];
        let links = encoder
            .encode_all(&records, &params, LinkScheme::Vless)
            .unwrap();
        assert_eq!(links.len(), 4);
        assert!(links[0].contains(&format!("path={}", url_encode("/?ed=2560&proxyip=pa.example"))));
        assert!(links[1].contains("path=%2F%3Fed%3D2560&"));
        assert!(links[2].contains(&format!("path={}", url_encode("/?ed=2560&proxyip=pa.example"))));
        assert!(links[3].contains(&format!("path={}", url_encode("/?ed=2560&proxyip=pb.example"))));
    }

    #[test]
    fn test_with_proxy_ip() {
        assert_eq!(with_proxy_ip("/", "1.1.1.1"), "/?proxyip=1.1.1.1");
        assert_eq!(with_proxy_ip("/?ed=2560", "p.example"), "/?ed=2560&proxyip=p.example");
    }
}
