//! URL helpers
//!
//! Every absolute URL emitted into pages, the feed, and the sitemap goes
//! through `url_for` so that the configured base url and root prefix are
//! applied consistently.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::config::SiteConfig;

/// Characters escaped in path segments
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'?');

/// Generate an absolute URL for a site-relative path
///
/// # Examples
/// ```ignore
/// url_for(&config, "blog/my-post/") // -> https://example.com/blog/my-post/
/// url_for(&config, "")              // -> https://example.com/
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }

    let mut url = config.url.trim_end_matches('/').to_string();

    let root = config.root.trim_matches('/');
    if !root.is_empty() {
        url.push('/');
        url.push_str(root);
    }

    url.push('/');
    url.push_str(&encode_path(path.trim_start_matches('/')));
    url
}

/// Site-relative href with the root prefix applied (for intra-site links)
pub fn href_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_matches('/');
    if root.is_empty() {
        format!("/{}", path.trim_start_matches('/'))
    } else {
        format!("/{}/{}", root, path.trim_start_matches('/'))
    }
}

fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_at(url: &str, root: &str) -> SiteConfig {
        SiteConfig {
            url: url.to_string(),
            root: root.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_url_for_base() {
        let config = config_at("https://example.com", "/");
        assert_eq!(url_for(&config, ""), "https://example.com/");
        assert_eq!(
            url_for(&config, "blog/hello/"),
            "https://example.com/blog/hello/"
        );
    }

    #[test]
    fn test_url_for_with_root() {
        let config = config_at("https://example.com", "/site/");
        assert_eq!(
            url_for(&config, "blog/"),
            "https://example.com/site/blog/"
        );
    }

    #[test]
    fn test_url_for_passes_through_absolute() {
        let config = config_at("https://example.com", "/");
        assert_eq!(
            url_for(&config, "https://other.example/x"),
            "https://other.example/x"
        );
    }

    #[test]
    fn test_url_for_encodes_segments() {
        let config = config_at("https://example.com", "/");
        assert_eq!(
            url_for(&config, "blog/a b/"),
            "https://example.com/blog/a%20b/"
        );
    }

    #[test]
    fn test_href_for() {
        let config = config_at("https://example.com", "/");
        assert_eq!(href_for(&config, "blog/"), "/blog/");
        let config = config_at("https://example.com", "/site/");
        assert_eq!(href_for(&config, "blog/"), "/site/blog/");
    }
}
