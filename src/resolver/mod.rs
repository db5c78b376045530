//! Post metadata resolution
//!
//! Merges each content item's front-matter with version-history metadata for
//! its backing file to produce display timestamps:
//!
//! - `updated_at` is derived strictly from history (most recent commit),
//!   never from front-matter.
//! - `published_at` is the front-matter value when declared, falling back to
//!   `updated_at`.
//!
//! A resolver is constructed per build/request; its memoization table lives
//! exactly as long as the resolver, so repeated resolutions inside one batch
//! are identical and nothing is cached across rebuilds.

use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::OnceCell;

use crate::content::Outline;
use crate::error::Result;
use crate::history::HistoryReader;
use crate::store::ContentStore;

/// A content item with resolved display timestamps
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPost {
    pub slug: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub html: String,
    pub outline: Outline,
    pub published_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ResolvedPost {
    /// Timestamp used for sort ordering. Posts with no timestamp at all sort
    /// as infinitely far in the future, so missing metadata surfaces at the
    /// top of listings during authoring instead of hiding at the bottom.
    pub fn effective_timestamp(&self) -> DateTime<Utc> {
        self.published_at.unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

/// Resolves post metadata from the content store and a history reader
pub struct PostMetadataResolver<H> {
    store: ContentStore,
    history: H,
    memo: Mutex<HashMap<String, Arc<OnceCell<ResolvedPost>>>>,
}

impl<H: HistoryReader + Sync> PostMetadataResolver<H> {
    pub fn new(store: ContentStore, history: H) -> Self {
        Self {
            store,
            history,
            memo: Mutex::new(HashMap::new()),
        }
    }

    /// Content identifiers in directory-listing order (not sorted)
    pub async fn list_identifiers(&self) -> Result<Vec<String>> {
        self.store.list_slugs().await
    }

    /// Resolve the post for `slug`, memoized for the resolver's lifetime.
    /// Duplicate in-flight resolutions for the same slug collapse to a
    /// single computation.
    pub async fn resolve(&self, slug: &str) -> Result<ResolvedPost> {
        let cell = {
            let mut memo = self.memo.lock().unwrap_or_else(|e| e.into_inner());
            memo.entry(slug.to_string())
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .clone()
        };

        let post = cell
            .get_or_try_init(|| self.resolve_uncached(slug))
            .await?;
        Ok(post.clone())
    }

    async fn resolve_uncached(&self, slug: &str) -> Result<ResolvedPost> {
        let item = self.store.load(slug).await?;
        let updated_at = self.history.most_recent_commit(&item.source).await;
        let published_at = item.published_at.or(updated_at);

        Ok(ResolvedPost {
            slug: item.slug,
            title: item.title,
            description: item.description,
            html: item.html,
            outline: item.outline,
            published_at,
            updated_at,
        })
    }

    /// Resolve every identifier concurrently and return the posts sorted
    /// descending by effective timestamp. Any single failure fails the whole
    /// batch: broken posts abort the build instead of silently dropping out.
    pub async fn list_resolved(&self) -> Result<Vec<ResolvedPost>> {
        let slugs = self.list_identifiers().await?;
        let mut posts = try_join_all(slugs.iter().map(|slug| self.resolve(slug))).await?;
        posts.sort_by(|a, b| b.effective_timestamp().cmp(&a.effective_timestamp()));
        Ok(posts)
    }
}
