//! RSS feed and sitemap emitters
//!
//! Pure serialization over the resolved post list. Posts missing a title,
//! description, or publish timestamp are left out of the feed (an item
//! without them is useless to a reader) but always appear in the sitemap.

use chrono::{DateTime, Utc};

use crate::config::SiteConfig;
use crate::helpers::{escape_xml, iso, url_for};
use crate::resolver::ResolvedPost;

/// Render the RSS 2.0 feed document
pub fn rss(config: &SiteConfig, posts: &[ResolvedPost]) -> String {
    let site_url = url_for(config, "");
    let feed_url = url_for(config, "blog/rss.xml");

    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str("<rss version=\"2.0\" xmlns:atom=\"http://www.w3.org/2005/Atom\">\n");
    out.push_str("  <channel>\n");
    out.push_str(&format!(
        "    <title>{}</title>\n",
        escape_xml(&config.feed_title())
    ));
    out.push_str(&format!("    <link>{}</link>\n", site_url));
    out.push_str(&format!(
        "    <description>{}</description>\n",
        escape_xml(&config.description)
    ));
    out.push_str(&format!(
        "    <atom:link href=\"{}\" rel=\"self\" type=\"application/rss+xml\"/>\n",
        feed_url
    ));

    for post in posts {
        let (Some(title), Some(description), Some(published_at)) =
            (&post.title, &post.description, post.published_at)
        else {
            continue;
        };

        let url = url_for(config, &format!("blog/{}/", post.slug));
        out.push_str("    <item>\n");
        out.push_str(&format!("      <title>{}</title>\n", escape_xml(title)));
        out.push_str(&format!(
            "      <description>{}</description>\n",
            escape_xml(description)
        ));
        out.push_str(&format!("      <link>{}</link>\n", url));
        out.push_str(&format!(
            "      <guid isPermaLink=\"true\">{}</guid>\n",
            url
        ));
        out.push_str(&format!(
            "      <pubDate>{}</pubDate>\n",
            published_at.to_rfc2822()
        ));
        out.push_str("    </item>\n");
    }

    out.push_str("  </channel>\n");
    out.push_str("</rss>\n");
    out
}

/// Render the sitemap document
pub fn sitemap(config: &SiteConfig, posts: &[ResolvedPost], now: DateTime<Utc>) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");

    push_url(
        &mut out,
        &url_for(config, ""),
        &iso(&now),
        Some("daily"),
        Some("1.0"),
    );
    push_url(
        &mut out,
        &url_for(config, "blog/"),
        &iso(&now),
        Some("daily"),
        None,
    );

    for post in posts {
        let last_modified = post.updated_at.or(post.published_at).unwrap_or(now);
        push_url(
            &mut out,
            &url_for(config, &format!("blog/{}/", post.slug)),
            &iso(&last_modified),
            None,
            None,
        );
    }

    out.push_str("</urlset>\n");
    out
}

fn push_url(
    out: &mut String,
    loc: &str,
    lastmod: &str,
    changefreq: Option<&str>,
    priority: Option<&str>,
) {
    out.push_str("  <url>\n");
    out.push_str(&format!("    <loc>{}</loc>\n", loc));
    out.push_str(&format!("    <lastmod>{}</lastmod>\n", lastmod));
    if let Some(changefreq) = changefreq {
        out.push_str(&format!("    <changefreq>{}</changefreq>\n", changefreq));
    }
    if let Some(priority) = priority {
        out.push_str(&format!("    <priority>{}</priority>\n", priority));
    }
    out.push_str("  </url>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn post(slug: &str) -> ResolvedPost {
        ResolvedPost {
            slug: slug.to_string(),
            title: Some(format!("Title {}", slug)),
            description: Some("A description".to_string()),
            html: String::new(),
            outline: Vec::new(),
            published_at: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            updated_at: None,
        }
    }

    fn config() -> SiteConfig {
        SiteConfig {
            url: "https://example.com".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_rss_includes_complete_posts() {
        let feed = rss(&config(), &[post("hello")]);
        assert!(feed.contains("<link>https://example.com/blog/hello/</link>"));
        assert!(feed.contains("<title>Title hello</title>"));
        assert!(feed.contains("<pubDate>Mon, 1 Jan 2024 00:00:00 +0000</pubDate>"));
    }

    #[test]
    fn test_rss_skips_posts_missing_metadata() {
        let mut undated = post("undated");
        undated.published_at = None;
        let mut untitled = post("untitled");
        untitled.title = None;

        let feed = rss(&config(), &[post("ok"), undated, untitled]);
        assert!(feed.contains("blog/ok/"));
        assert!(!feed.contains("undated"));
        assert!(!feed.contains("untitled"));
    }

    #[test]
    fn test_rss_escapes_text() {
        let mut p = post("x");
        p.title = Some("Fish & Chips".to_string());
        let feed = rss(&config(), &[p]);
        assert!(feed.contains("Fish &amp; Chips"));
    }

    #[test]
    fn test_sitemap_lastmod_fallback_chain() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

        let mut updated = post("updated");
        updated.updated_at = Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
        let published_only = post("published");
        let mut bare = post("bare");
        bare.published_at = None;

        let map = sitemap(&config(), &[updated, published_only, bare], now);
        assert!(map.contains("2024-06-01T00:00:00+00:00"));
        assert!(map.contains("2024-01-01T00:00:00+00:00"));
        // the bare post falls back to build time
        assert!(map.contains("2025-01-01T00:00:00+00:00"));
    }

    #[test]
    fn test_sitemap_lists_root_and_blog_index() {
        let now = Utc::now();
        let map = sitemap(&config(), &[], now);
        assert!(map.contains("<loc>https://example.com/</loc>"));
        assert!(map.contains("<loc>https://example.com/blog/</loc>"));
        assert!(map.contains("<priority>1.0</priority>"));
        assert!(map.contains("<changefreq>daily</changefreq>"));
    }
}
