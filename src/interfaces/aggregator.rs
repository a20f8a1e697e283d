//! Best-effort collection of address lists from remote sources

use futures::future::join_all;
use log::{debug, warn};
use reqwest::Client;

use crate::error::SubscribeError;
use crate::utils::http::{web_get_async, BROWSER_USER_AGENT};

/// Flatten a newline separated body into one comma separated fragment,
/// dropping blank lines.
pub fn lines_to_fragment(body: &str) -> String {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

/// Fetch one source and flatten its body
pub async fn fetch_fragment(client: &Client, url: &str) -> Result<String, SubscribeError> {
    let body = web_get_async(client, url, Some(BROWSER_USER_AGENT))
        .await
        .map_err(|reason| SubscribeError::SourceFetch {
            url: url.to_string(),
            reason,
        })?;
    Ok(lines_to_fragment(&body))
}

/// Fetch every source concurrently and join the surviving fragments with
/// commas, in source order.
///
/// A failing source only loses its own fragment. When every source fails
/// the result is empty and the caller falls back to static addresses.
pub async fn aggregate(client: &Client, sources: &[String]) -> String {
    let fetches = sources.iter().map(|url| async move {
        match fetch_fragment(client, url).await {
            Ok(fragment) => Some(fragment),
            Err(e) => {
                warn!("{}", e);
                None
            }
        }
    });

    let fragments: Vec<String> = join_all(fetches)
        .await
        .into_iter()
        .flatten()
        .filter(|fragment| !fragment.is_empty())
        .collect();
    debug!(
        "Collected {} of {} address source(s)",
        fragments.len(),
        sources.len()
    );
    fragments.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_to_fragment() {
        assert_eq!(
            lines_to_fragment("1.1.1.1:443#a\r\n\n  \n2.2.2.2#b\n"),
            "1.1.1.1:443#a,2.2.2.2#b"
        );
        assert_eq!(lines_to_fragment(""), "");
        assert_eq!(lines_to_fragment("\n\n"), "");
    }
}
