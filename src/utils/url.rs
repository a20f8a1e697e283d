//! URL encoding/decoding utilities

/// Encodes a string using URL component encoding
///
/// # Examples
/// ```
/// use subgen::utils::url::url_encode;
///
/// let encoded = url_encode("/?ed=2560");
/// assert_eq!(encoded, "%2F%3Fed%3D2560");
/// ```
pub fn url_encode(input: &str) -> String {
    urlencoding::encode(input).into_owned()
}

/// Decodes a URL-encoded string
///
/// Returns the original string if decoding fails.
///
/// # Examples
/// ```
/// use subgen::utils::url::url_decode;
///
/// let decoded = url_decode("Hello%20World%21");
/// assert_eq!(decoded, "Hello World!");
/// ```
pub fn url_decode(input: &str) -> String {
    urlencoding::decode(input)
        .map(|cow| cow.into_owned())
        .unwrap_or_else(|_| input.to_string())
}

/// `Content-Disposition` value offering `file_name` as a download,
/// percent-encoded per RFC 5987 so non-ASCII names survive.
pub fn attachment_disposition(file_name: &str) -> String {
    format!("attachment; filename*=UTF-8''{}", url_encode(file_name))
}
