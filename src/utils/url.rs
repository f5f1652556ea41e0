//! URL helpers for building backend endpoint addresses.
//!
//! Users point IoTrix either at the backend root (`http://host:8000`) or at
//! a proxy prefix that already ends in `/api`. Both must yield the same
//! endpoint URLs.

/// Strip trailing slashes from a base URL.
///
/// # Examples
///
/// ```
/// use iotrix::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("http://localhost:8000/"), "http://localhost:8000");
/// assert_eq!(normalize_base_url("http://localhost:8000///"), "http://localhost:8000");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

/// Join a base URL and an endpoint path without doubling slashes or the
/// `api` prefix.
///
/// # Examples
///
/// ```
/// use iotrix::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("http://localhost:8000", "api/chat"),
///     "http://localhost:8000/api/chat"
/// );
/// assert_eq!(
///     construct_api_url("http://localhost:5173/api/", "api/chat"),
///     "http://localhost:5173/api/chat"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    let normalized_base = normalize_base_url(base_url);
    let mut endpoint = endpoint.trim_start_matches('/');

    if normalized_base.ends_with("/api") {
        if let Some(rest) = endpoint.strip_prefix("api/") {
            endpoint = rest;
        }
    }

    format!("{normalized_base}/{endpoint}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("http://localhost:8000"),
            "http://localhost:8000"
        );
        assert_eq!(
            normalize_base_url("  https://iotrix.example.com/  "),
            "https://iotrix.example.com"
        );
        assert_eq!(normalize_base_url(""), "");
        assert_eq!(normalize_base_url("///"), "");
    }

    #[test]
    fn test_construct_api_url_from_backend_root() {
        assert_eq!(
            construct_api_url("http://localhost:8000/", "/api/chat"),
            "http://localhost:8000/api/chat"
        );
        assert_eq!(
            construct_api_url("https://iotrix.example.com", "api/health"),
            "https://iotrix.example.com/api/health"
        );
    }

    #[test]
    fn test_construct_api_url_from_proxy_prefix() {
        assert_eq!(
            construct_api_url("http://localhost:5173/api", "api/chat"),
            "http://localhost:5173/api/chat"
        );
        assert_eq!(
            construct_api_url("http://localhost:5173/api//", "/api/history"),
            "http://localhost:5173/api/history"
        );
    }

    #[test]
    fn test_api_prefix_only_collapses_on_segment_boundary() {
        assert_eq!(
            construct_api_url("http://localhost:8000/rapi", "api/chat"),
            "http://localhost:8000/rapi/api/chat"
        );
        assert_eq!(
            construct_api_url("http://localhost:8000/api", "apis/chat"),
            "http://localhost:8000/api/apis/chat"
        );
    }
}
