//! Share-link construction for created pastes.

use axum::http::{header, HeaderMap};
use pastelite_core::{constants::SHARE_PATH_PREFIX, Config};

/// Origin that share links are rooted at.
///
/// Precedence: configured `BASE_URL`, then the request `Host` header, then
/// `http://localhost:{port}`.
pub fn public_origin(config: &Config, headers: &HeaderMap) -> String {
    if let Some(base_url) = config.base_url.as_deref() {
        return base_url.to_string();
    }

    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|host| !host.is_empty());
    match host {
        Some(host) => format!("http://{}", host),
        None => format!("http://localhost:{}", config.port),
    }
}

/// Shareable link for `id`.
pub fn share_url(config: &Config, headers: &HeaderMap, id: &str) -> String {
    format!("{}{}{}", public_origin(config, headers), SHARE_PATH_PREFIX, id)
}

#[cfg(test)]
mod tests {
    use super::share_url;
    use axum::http::{header, HeaderMap, HeaderValue};
    use pastelite_core::Config;

    fn config(base_url: Option<&str>) -> Config {
        Config {
            db_path: String::from("/tmp/pastelite-url"),
            port: 4100,
            max_paste_size: 1024,
            store_timeout_ms: 1000,
            base_url: base_url.map(str::to_string),
        }
    }

    #[test]
    fn base_url_wins_over_host_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("ignored.local"));
        let url = share_url(&config(Some("https://paste.example")), &headers, "abc");
        assert_eq!(url, "https://paste.example/p/abc");
    }

    #[test]
    fn host_header_used_without_base_url() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("box.lan:8080"));
        assert_eq!(
            share_url(&config(None), &headers, "abc"),
            "http://box.lan:8080/p/abc"
        );
    }

    #[test]
    fn falls_back_to_localhost_port() {
        assert_eq!(
            share_url(&config(None), &HeaderMap::new(), "abc"),
            "http://localhost:4100/p/abc"
        );
    }
}
