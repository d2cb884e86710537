use url::Url;

/// Extracts the lowercase host from a URL string
///
/// # Returns
///
/// * `Some(String)` - The lowercase host
/// * `None` - If the string is not an absolute URL or has no host
///
/// # Examples
///
/// ```
/// use onion_digger::url::extract_domain;
///
/// assert_eq!(
///     extract_domain("http://EXAMPLE.onion/path"),
///     Some("example.onion".to_string())
/// );
/// assert_eq!(extract_domain("/relative/path"), None);
/// ```
pub fn extract_domain(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()?
        .host_str()
        .map(|h| h.to_lowercase())
}

/// Returns true if the host is an onion-service address
pub fn is_onion_host(host: &str) -> bool {
    host.trim_end_matches('.').to_lowercase().ends_with(".onion")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple_domain() {
        assert_eq!(
            extract_domain("http://abcdef.onion/"),
            Some("abcdef.onion".to_string())
        );
    }

    #[test]
    fn test_extract_subdomain() {
        assert_eq!(
            extract_domain("https://blog.example.com/post"),
            Some("blog.example.com".to_string())
        );
    }

    #[test]
    fn test_extract_with_port() {
        assert_eq!(
            extract_domain("http://example.onion:8080/"),
            Some("example.onion".to_string())
        );
    }

    #[test]
    fn test_extract_uppercase_converted_to_lowercase() {
        assert_eq!(
            extract_domain("http://Example.ONION/"),
            Some("example.onion".to_string())
        );
    }

    #[test]
    fn test_extract_with_path_and_query() {
        assert_eq!(
            extract_domain("https://example.com/path/to/page?query=value#frag"),
            Some("example.com".to_string())
        );
    }

    #[test]
    fn test_relative_has_no_domain() {
        assert_eq!(extract_domain("/a/keyword1"), None);
        assert_eq!(extract_domain("not a url"), None);
    }

    #[test]
    fn test_is_onion_host() {
        assert!(is_onion_host("abcdef.onion"));
        assert!(is_onion_host("ABCDEF.ONION"));
        assert!(is_onion_host("abcdef.onion."));
        assert!(!is_onion_host("example.com"));
        assert!(!is_onion_host("onion.example.com"));
    }
}
