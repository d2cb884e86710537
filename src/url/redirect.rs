use url::form_urlencoded;

/// Query parameter that marks a redirect-wrapper URL
pub const REDIRECT_PARAM: &str = "redirect_url";

/// Unwraps one level of redirect wrapper
///
/// Search engines often link results through a tracking URL such as
/// `http://engine.onion/click?redirect_url=http://target.onion/`. If the URL's
/// query string carries a non-empty `redirect_url` parameter, its
/// (percent-decoded) value is returned; otherwise the input is returned
/// unchanged. Anything after `#` is a fragment, not query. The result is not
/// unwrapped again. Relative URLs are inspected the same way.
///
/// # Examples
///
/// ```
/// use onion_digger::url::unwrap_redirect;
///
/// assert_eq!(unwrap_redirect("https://x/y?redirect_url=https://z"), "https://z");
/// assert_eq!(unwrap_redirect("https://x/y?q=1"), "https://x/y?q=1");
/// ```
pub fn unwrap_redirect(url: &str) -> String {
    let without_fragment = url.split_once('#').map_or(url, |(head, _)| head);
    let Some((_, query)) = without_fragment.split_once('?') else {
        return url.to_string();
    };

    // Blank values count as absent
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, value)| key == REDIRECT_PARAM && !value.is_empty())
        .map(|(_, value)| value.into_owned())
        .unwrap_or_else(|| url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwraps_redirect_param() {
        assert_eq!(
            unwrap_redirect("https://x/y?redirect_url=https://z"),
            "https://z"
        );
    }

    #[test]
    fn test_no_redirect_param_returns_input() {
        let url = "http://abc.onion/search?q=keyword";
        assert_eq!(unwrap_redirect(url), url);
    }

    #[test]
    fn test_decodes_percent_encoded_target() {
        assert_eq!(
            unwrap_redirect("http://engine.onion/r?redirect_url=http%3A%2F%2Ftarget.onion%2Fa%3Fb%3D1"),
            "http://target.onion/a?b=1"
        );
    }

    #[test]
    fn test_first_value_wins() {
        assert_eq!(
            unwrap_redirect("http://e.onion/r?redirect_url=http://one.onion&redirect_url=http://two.onion"),
            "http://one.onion"
        );
    }

    #[test]
    fn test_only_one_level_is_unwrapped() {
        let inner = "http://b.onion/r?redirect_url=http://c.onion";
        let outer = format!(
            "http://a.onion/r?redirect_url={}",
            form_urlencoded::byte_serialize(inner.as_bytes()).collect::<String>()
        );
        assert_eq!(unwrap_redirect(&outer), inner);
    }

    #[test]
    fn test_relative_wrapper_is_unwrapped() {
        assert_eq!(
            unwrap_redirect("/go?redirect_url=http://z.onion"),
            "http://z.onion"
        );
    }

    #[test]
    fn test_fragment_is_not_part_of_target() {
        assert_eq!(
            unwrap_redirect("http://a.onion/r?redirect_url=http://z.onion#top"),
            "http://z.onion"
        );
    }

    #[test]
    fn test_param_must_match_exactly() {
        let url = "http://a.onion/?my_redirect_url=http://z.onion";
        assert_eq!(unwrap_redirect(url), url);
    }

    #[test]
    fn test_blank_redirect_value_keeps_wrapper() {
        let url = "http://e.onion/r?redirect_url=";
        assert_eq!(unwrap_redirect(url), url);
    }

    #[test]
    fn test_blank_value_skipped_for_later_one() {
        assert_eq!(
            unwrap_redirect("http://e.onion/r?redirect_url=&redirect_url=http://z.onion"),
            "http://z.onion"
        );
    }

    #[test]
    fn test_param_inside_fragment_is_ignored() {
        let url = "http://e.onion/page#x?redirect_url=http://z.onion";
        assert_eq!(unwrap_redirect(url), url);
    }
}
