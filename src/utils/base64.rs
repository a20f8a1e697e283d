use base64::{engine::general_purpose, Engine as _};

/// Encodes a string to Base64 format.
pub fn base64_encode(input: &str) -> String {
    general_purpose::STANDARD.encode(input)
}

/// Decodes a Base64 string to its original form.
///
/// # Arguments
/// * `input` - The Base64 encoded string.
/// * `accept_urlsafe` - A boolean indicating whether to accept URL-safe Base64 encoding.
///
/// # Returns
/// The decoded string, or an empty string if the input is invalid.
pub fn base64_decode(input: &str, accept_urlsafe: bool) -> String {
    let engine = if accept_urlsafe {
        general_purpose::URL_SAFE
    } else {
        general_purpose::STANDARD
    };

    match engine.decode(input.trim()) {
        Ok(decoded) => String::from_utf8_lossy(&decoded).to_string(),
        Err(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_multibyte() {
        for text in ["", "vless://a@1.1.1.1:443#x\n", "优选节点 - 香港 🚀", "a\r\nb|c"] {
            assert_eq!(base64_decode(&base64_encode(text), false), text);
        }
    }

    #[test]
    fn test_decode_invalid() {
        assert_eq!(base64_decode("not base64!!", false), "");
    }

    #[test]
    fn test_decode_urlsafe() {
        // "??>" encodes to "Pz8+" (standard) / "Pz8-" (url-safe)
        assert_eq!(base64_decode("Pz8-", true), "??>");
        assert_eq!(base64_decode("Pz8+", false), "??>");
    }
}
