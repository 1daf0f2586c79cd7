use url::Url;

/// Build the URL of catalogue page `page_index` (1-based)
pub fn page_url(base_url: &str, page_index: u32) -> String {
    format!("{}page-{}.html", with_trailing_slash(base_url), page_index)
}

/// Turn a product href into an absolute URL under the catalogue root.
///
/// Leading `.` and `/` characters are stripped before joining, so
/// `../../foo/index.html` and `./foo/index.html` both land directly
/// under `base_url`. Hrefs written relative to the site root
/// (`catalogue/foo.html`) repeat the base's last path segment; that
/// segment is dropped so it is not doubled.
pub fn absolute_link(base_url: &str, href: &str) -> Result<String, url::ParseError> {
    let base = Url::parse(&with_trailing_slash(base_url))?;
    let mut relative = href.trim_start_matches(['.', '/']);

    if let Some(last) = base.path_segments().and_then(|s| s.filter(|s| !s.is_empty()).last()) {
        if let Some(rest) = relative.strip_prefix(last).and_then(|r| r.strip_prefix('/')) {
            relative = rest;
        }
    }

    Url::parse(&format!("{base}{relative}")).map(|u| u.to_string())
}

fn with_trailing_slash(base_url: &str) -> String {
    if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{base_url}/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://books.toscrape.com/catalogue/";

    #[test]
    fn test_page_url() {
        assert_eq!(
            page_url(BASE, 1),
            "https://books.toscrape.com/catalogue/page-1.html"
        );
        assert_eq!(
            page_url("http://localhost:9000/catalogue", 12),
            "http://localhost:9000/catalogue/page-12.html"
        );
    }

    #[test]
    fn test_plain_relative_link() {
        assert_eq!(
            absolute_link(BASE, "a-light-in-the-attic_1000/index.html").unwrap(),
            "https://books.toscrape.com/catalogue/a-light-in-the-attic_1000/index.html"
        );
    }

    #[test]
    fn test_leading_markers_are_stripped() {
        for href in ["./foo.html", "../foo.html", "../../foo.html", "/foo.html"] {
            assert_eq!(
                absolute_link(BASE, href).unwrap(),
                "https://books.toscrape.com/catalogue/foo.html",
                "href {href}"
            );
        }
    }

    #[test]
    fn test_no_duplicated_catalogue_segment() {
        assert_eq!(
            absolute_link(BASE, "catalogue/foo.html").unwrap(),
            "https://books.toscrape.com/catalogue/foo.html"
        );
        assert_eq!(
            absolute_link(BASE, "../catalogue/foo.html").unwrap(),
            "https://books.toscrape.com/catalogue/foo.html"
        );
    }

    #[test]
    fn test_segment_prefix_is_not_a_segment_match() {
        assert_eq!(
            absolute_link(BASE, "catalogue-item/foo.html").unwrap(),
            "https://books.toscrape.com/catalogue/catalogue-item/foo.html"
        );
    }

    #[test]
    fn test_invalid_base_is_an_error() {
        assert!(absolute_link("not a url", "foo.html").is_err());
    }
}
