//! Free-text address list parsing
//!
//! Address dumps arrive in many shapes: one entry per line, pipe separated,
//! quoted, or already comma separated. They are normalized into a single
//! comma-delimited stream and every token is matched against
//! `ip[:port][#remark]`. Tokens that do not match are skipped.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{AddressRecord, ProcessedContent};

/// Runs of characters treated as entry separators
static DELIMITER_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[|"'\r\n]+"#).unwrap());

static COMMA_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r",+").unwrap());

/// IPv4 literal or bracketed literal, optional port, optional remark
static ADDRESS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}|\[.*\]):?(\d+)?#?(.*)?$").unwrap()
});

/// Normalize separators into single commas and drop one boundary comma on
/// each side.
pub fn normalize(text: &str) -> String {
    let replaced = DELIMITER_RUN.replace_all(text, ",");
    let collapsed = COMMA_RUN.replace_all(&replaced, ",");

    let mut cleaned: &str = &collapsed;
    if let Some(rest) = cleaned.strip_prefix(',') {
        cleaned = rest;
    }
    if let Some(rest) = cleaned.strip_suffix(',') {
        cleaned = rest;
    }
    cleaned.to_string()
}

/// Match a single token, `None` when it is not an address entry
pub fn parse_token(token: &str) -> Option<AddressRecord> {
    let caps = ADDRESS_PATTERN.captures(token)?;
    let ip = caps.get(1)?.as_str();
    Some(AddressRecord::new(
        ip,
        caps.get(2).map(|m| m.as_str()),
        caps.get(3).map(|m| m.as_str()),
    ))
}

/// Parse an address blob, keeping the normalized text alongside the records
pub fn process_content(text: &str) -> ProcessedContent {
    let content = normalize(text);
    let addresses = if content.is_empty() {
        Vec::new()
    } else {
        content.split(',').filter_map(parse_token).collect()
    };
    ProcessedContent { addresses, content }
}

/// Parse an address blob into records, in input order and without
/// deduplication.
pub fn parse(text: &str) -> Vec<AddressRecord> {
    process_content(text).addresses
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("a|b\r\nc\"d'e"), "a,b,c,d,e");
        assert_eq!(normalize(",,a,,,b,,"), "a,b");
        assert_eq!(normalize("\n\n|"), "");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_parse_token_defaults() {
        assert_eq!(
            parse_token("1.2.3.4"),
            Some(AddressRecord {
                ip: "1.2.3.4".to_string(),
                port: "443".to_string(),
                remark: None,
            })
        );
        let record = parse_token("1.2.3.4#").unwrap();
        assert_eq!(record.remark, None);
    }

    #[test]
    fn test_parse_token_bracketed() {
        let record = parse_token("[2606:4700::1]:8443#v6").unwrap();
        assert_eq!(record.ip, "[2606:4700::1]");
        assert_eq!(record.port, "8443");
        assert_eq!(record.remark.as_deref(), Some("v6"));

        // bracket contents are not validated
        assert_eq!(parse_token("[anything]").unwrap().ip, "[anything]");
    }

    #[test]
    fn test_parse_token_rejects_hostnames() {
        assert!(parse_token("time.is:2053#node").is_none());
        assert!(parse_token("not-an-ip").is_none());
        assert!(parse_token("").is_none());
    }

    #[test]
    fn test_process_content_keeps_normalized_text() {
        let processed = process_content("1.1.1.1|2.2.2.2:80\n");
        assert_eq!(processed.content, "1.1.1.1,2.2.2.2:80");
        assert_eq!(processed.addresses.len(), 2);
    }
}
