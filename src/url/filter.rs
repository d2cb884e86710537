use url::Url;

/// Keeps only the links that contain `keyword`
///
/// Plain substring match, case-sensitive, relative order preserved. An empty
/// keyword keeps every link.
///
/// # Examples
///
/// ```
/// use onion_digger::url::filter_links;
///
/// let links = vec!["/a/keyword1".to_string(), "/b".to_string(), "/c-keyword".to_string()];
/// assert_eq!(filter_links(&links, "keyword"), vec!["/a/keyword1", "/c-keyword"]);
/// ```
pub fn filter_links(links: &[String], keyword: &str) -> Vec<String> {
    links
        .iter()
        .filter(|link| link.contains(keyword))
        .cloned()
        .collect()
}

/// Joins a possibly relative link against the URL of the page it was found on
///
/// Links that cannot be joined are returned verbatim.
pub fn resolve_link(link: &str, base_url: &str) -> String {
    Url::parse(base_url)
        .and_then(|base| base.join(link))
        .map(|joined| joined.to_string())
        .unwrap_or_else(|_| link.to_string())
}
