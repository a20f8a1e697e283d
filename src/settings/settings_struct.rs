use std::path::Path;

use log::{debug, info};
use serde::Deserialize;

use crate::error::SettingsError;
use crate::models::LinkScheme;
use crate::parser::scores::{DAILY_API_URL, HOURLY_API_URL};

// Default value functions for serde
pub fn default_listen_address() -> String {
    "127.0.0.1".to_string()
}

pub fn default_listen_port() -> u16 {
    3000
}

pub fn default_max_concur_threads() -> usize {
    4
}

pub fn default_sub_converter() -> String {
    "sub.cmliussss.net".to_string()
}

pub fn default_sub_protocol() -> String {
    "https".to_string()
}

pub fn default_sub_config() -> String {
    "https://raw.githubusercontent.com/cmliu/ACL4SSR/main/Clash/config/ACL4SSR_Online_Full_MultiMode.ini"
        .to_string()
}

pub fn default_file_name() -> String {
    "优选订阅生成器".to_string()
}

pub fn default_alpn() -> String {
    "h3".to_string()
}

pub fn default_https_ports() -> Vec<String> {
    ["2053", "2083", "2087", "2096", "8443"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

pub fn default_remark_suffix() -> String {
    " - 优选节点".to_string()
}

pub fn default_fetch_timeout() -> u64 {
    15
}

/// Settings structure to hold global configuration
///
/// Built once at start-up (defaults, then an optional TOML file, then the
/// environment) and shared read-only afterwards.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    // Server
    pub listen_address: String,
    pub listen_port: u16,
    pub max_concur_threads: usize,

    // Subscription converter
    pub sub_converter: String,
    pub sub_protocol: String,
    pub sub_config: String,
    pub file_name: String,

    // Link generation
    pub link_scheme: LinkScheme,
    pub no_tls: bool,
    pub alpn: String,
    pub remark_suffix: String,
    pub proxy_ips: Vec<String>,
    pub match_proxy_ips: Vec<String>,
    pub https_ports: Vec<String>,

    // Address sources
    pub addresses: String,
    pub addresses_api: Vec<String>,
    /// Per-fetch timeout in seconds
    pub fetch_timeout: u64,
    /// Upstream of `/api/vps789hourcf`
    pub vps789_hourly_api: String,
    /// Upstream of `/api/vps789daycf`
    pub vps789_daily_api: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            listen_address: default_listen_address(),
            listen_port: default_listen_port(),
            max_concur_threads: default_max_concur_threads(),
            sub_converter: default_sub_converter(),
            sub_protocol: default_sub_protocol(),
            sub_config: default_sub_config(),
            file_name: default_file_name(),
            link_scheme: LinkScheme::default(),
            no_tls: false,
            alpn: default_alpn(),
            remark_suffix: default_remark_suffix(),
            proxy_ips: Vec::new(),
            match_proxy_ips: Vec::new(),
            https_ports: default_https_ports(),
            addresses: String::new(),
            addresses_api: Vec::new(),
            fetch_timeout: default_fetch_timeout(),
            vps789_hourly_api: HOURLY_API_URL.to_string(),
            vps789_daily_api: DAILY_API_URL.to_string(),
        }
    }
}

impl Settings {
    /// Load settings: defaults, then `config_path` (TOML) if given, then
    /// the process environment.
    pub fn load(config_path: Option<&str>) -> Result<Self, SettingsError> {
        let mut settings = match config_path {
            Some(path) if !path.is_empty() => Self::from_file(path)?,
            _ => Settings::default(),
        };
        settings.apply_env(|key| std::env::var(key).ok())?;
        info!(
            "Settings loaded: scheme={:?}, {} address API(s), converter={}://{}",
            settings.link_scheme,
            settings.addresses_api.len(),
            settings.sub_protocol,
            settings.sub_converter
        );
        Ok(settings)
    }

    /// Read settings from a TOML file. Missing keys keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        debug!("Reading settings from {}", path.as_ref().display());
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }

    /// Override fields from environment-style variables.
    ///
    /// `lookup` returns the raw value of a variable; unset and empty values
    /// leave the current setting untouched.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("LISTEN_ADDRESS") {
            self.listen_address = v;
        }
        if let Some(v) = get("LISTEN_PORT") {
            self.listen_port = parse_number("LISTEN_PORT", &v)?;
        }
        if let Some(v) = get("MAX_CONCUR_THREADS") {
            self.max_concur_threads = parse_number("MAX_CONCUR_THREADS", &v)?;
        }
        if let Some(v) = get("SUB_API") {
            self.sub_converter = v;
        }
        if let Some(v) = get("SUB_PROTOCOL") {
            self.sub_protocol = v;
        }
        if let Some(v) = get("SUB_CONFIG") {
            self.sub_config = v;
        }
        if let Some(v) = get("SUB_NAME") {
            self.file_name = v;
        }
        if let Some(v) = get("LINK_SCHEME") {
            self.link_scheme =
                LinkScheme::from_str(&v).ok_or_else(|| SettingsError::InvalidValue {
                    key: "LINK_SCHEME".to_string(),
                    value: v.clone(),
                })?;
        }
        if let Some(v) = get("NO_TLS") {
            self.no_tls = parse_bool("NO_TLS", &v)?;
        }
        if let Some(v) = get("ALPN") {
            self.alpn = v;
        }
        if let Some(v) = get("REMARK_SUFFIX") {
            self.remark_suffix = v;
        }
        if let Some(v) = get("PROXY_IPS") {
            self.proxy_ips = split_list(&v);
        }
        if let Some(v) = get("MATCH_PROXY_IPS") {
            self.match_proxy_ips = split_list(&v);
        }
        if let Some(v) = get("HTTPS_PORTS") {
            self.https_ports = split_list(&v);
        }
        if let Some(v) = get("ADDRESSES") {
            self.addresses = v;
        }
        if let Some(v) = get("ADDRESSES_API") {
            self.addresses_api = split_list(&v);
        }
        if let Some(v) = get("FETCH_TIMEOUT") {
            self.fetch_timeout = parse_number("FETCH_TIMEOUT", &v)?;
        }
        if let Some(v) = get("VPS789_HOURLY_API") {
            self.vps789_hourly_api = v;
        }
        if let Some(v) = get("VPS789_DAILY_API") {
            self.vps789_daily_api = v;
        }
        Ok(())
    }

    /// `host:port` the server binds to
    pub fn listen_target(&self) -> String {
        let address = self.listen_address.trim();
        if address.is_empty() {
            format!("127.0.0.1:{}", self.listen_port)
        } else if address.contains(':') {
            address.to_string()
        } else {
            format!("{}:{}", address, self.listen_port)
        }
    }
}

/// Split a comma separated list, dropping empty items
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(key: &str, value: &str) -> Result<bool, SettingsError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(SettingsError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, SettingsError> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| SettingsError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.alpn, "h3");
        assert_eq!(settings.link_scheme, LinkScheme::Vless);
        assert_eq!(settings.https_ports, default_https_ports());
        assert!(settings.addresses.is_empty());
        assert!(settings.addresses_api.is_empty());
        assert_eq!(settings.listen_target(), "127.0.0.1:3000");
    }

    #[test]
    fn test_apply_env() {
        let env = env_of(&[
            ("SUB_API", "converter.example"),
            ("NO_TLS", "true"),
            ("HTTPS_PORTS", "443, 8443,"),
            ("ADDRESSES_API", "https://a.example/ips,https://b.example/ips"),
            ("LINK_SCHEME", "vmess"),
            ("ALPN", ""),
        ]);
        let mut settings = Settings::default();
        settings.apply_env(|k| env.get(k).cloned()).unwrap();

        assert_eq!(settings.sub_converter, "converter.example");
        assert!(settings.no_tls);
        assert_eq!(settings.https_ports, vec!["443", "8443"]);
        assert_eq!(settings.addresses_api.len(), 2);
        assert_eq!(settings.link_scheme, LinkScheme::VMess);
        // empty values keep the default
        assert_eq!(settings.alpn, "h3");
    }

    #[test]
    fn test_apply_env_rejects_bad_values() {
        let env = env_of(&[("NO_TLS", "maybe")]);
        let mut settings = Settings::default();
        assert!(settings.apply_env(|k| env.get(k).cloned()).is_err());

        let env = env_of(&[("LISTEN_PORT", "http")]);
        assert!(settings.apply_env(|k| env.get(k).cloned()).is_err());
    }
}
