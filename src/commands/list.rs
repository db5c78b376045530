//! List site content

use anyhow::Result;

use crate::Site;

/// Print every post with its resolved timestamps
pub async fn run(site: &Site) -> Result<()> {
    let resolver = site.resolver();
    let posts = resolver.list_resolved().await?;

    println!("Posts ({}):", posts.len());
    for post in posts {
        let published = post
            .published_at
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "unpublished".to_string());
        let updated = post
            .updated_at
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "untracked".to_string());

        println!(
            "  {} (updated {}) - {} [{}]",
            published,
            updated,
            post.title.as_deref().unwrap_or("(untitled)"),
            post.slug
        );
    }

    Ok(())
}
