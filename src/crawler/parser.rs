//! HTML link extraction
//!
//! Returns the raw `href` of every `<a>` element in document order. Relative
//! paths, duplicates, fragments and pseudo-schemes are kept exactly as written;
//! deciding what to follow is the crawl loop's job.

use scraper::{Html, Selector};

/// Extracts anchor targets from HTML content
///
/// # Arguments
///
/// * `html` - The raw page markup
///
/// # Returns
///
/// The `href` attribute values of all `<a href>` elements, in document order
///
/// # Example
///
/// ```
/// use onion_digger::crawler::extract_links;
///
/// let html = r#"<a href="/a">A</a><p><a href="http://x.onion/">X</a></p>"#;
/// assert_eq!(extract_links(html), vec!["/a", "http://x.onion/"]);
/// ```
pub fn extract_links(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                links.push(href.to_string());
            }
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_absolute_link() {
        let html = r#"<html><body><a href="http://other.onion/page">Link</a></body></html>"#;
        assert_eq!(extract_links(html), vec!["http://other.onion/page"]);
    }

    #[test]
    fn test_relative_links_kept_verbatim() {
        let html = r#"<html><body><a href="/other">1</a><a href="other">2</a><a href="../up">3</a></body></html>"#;
        assert_eq!(extract_links(html), vec!["/other", "other", "../up"]);
    }

    #[test]
    fn test_document_order_and_duplicates() {
        let html = r#"
            <html>
            <body>
                <a href="/page2">Link 2</a>
                <div><a href="/page1">Link 1</a></div>
                <a href="/page2">Link 2 again</a>
            </body>
            </html>
        "#;
        assert_eq!(extract_links(html), vec!["/page2", "/page1", "/page2"]);
    }

    #[test]
    fn test_no_validation_of_targets() {
        let html = r##"<body>
            <a href="javascript:void(0)">js</a>
            <a href="mailto:someone@example.com">mail</a>
            <a href="#section">frag</a>
            <a href="">empty</a>
        </body>"##;
        assert_eq!(
            extract_links(html),
            vec!["javascript:void(0)", "mailto:someone@example.com", "#section", ""]
        );
    }

    #[test]
    fn test_anchor_without_href_skipped() {
        let html = r#"<body><a name="top">Top</a><a href="/x">X</a></body>"#;
        assert_eq!(extract_links(html), vec!["/x"]);
    }

    #[test]
    fn test_non_anchor_elements_ignored() {
        let html = r#"<head><link rel="canonical" href="/canon"></head>
            <body><img src="/img.png"><script src="/app.js"></script></body>"#;
        assert!(extract_links(html).is_empty());
    }

    #[test]
    fn test_entities_decoded_in_href() {
        let html = r#"<a href="/search?q=a&amp;page=2">next</a>"#;
        assert_eq!(extract_links(html), vec!["/search?q=a&page=2"]);
    }

    #[test]
    fn test_non_html_input() {
        assert!(extract_links("plain text body").is_empty());
        assert!(extract_links("").is_empty());
    }
}
