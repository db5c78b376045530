//! Filesystem content store
//!
//! Lists and loads blog posts from the configured blog directory. Slugs are
//! file stems; the listing is a plain directory read, in whatever order the
//! filesystem returns entries.

use chrono::{DateTime, Utc};
use std::io;
use std::path::{Path, PathBuf};

use crate::content::{FrontMatter, MarkdownRenderer, Outline};
use crate::error::{Error, Result};

/// A loaded content item, before metadata resolution
#[derive(Debug, Clone)]
pub struct ContentItem {
    pub slug: String,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Declared publish timestamp from front-matter
    pub published_at: Option<DateTime<Utc>>,
    /// Rendered HTML payload
    pub html: String,
    pub outline: Outline,
    /// Backing source file, used for history lookups
    pub source: PathBuf,
}

/// Loads content items from the blog directory
pub struct ContentStore {
    dir: Option<PathBuf>,
    renderer: MarkdownRenderer,
}

impl ContentStore {
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self {
            dir,
            renderer: MarkdownRenderer::new(),
        }
    }

    fn dir(&self) -> Result<&Path> {
        self.dir.as_deref().ok_or_else(|| {
            Error::Configuration(
                "no blog directory configured; set blog_dir in _config.yml \
                 or the PLUME_BLOG_DIR environment variable"
                    .to_string(),
            )
        })
    }

    /// List markdown source files in the blog directory
    pub async fn list_files(&self) -> Result<Vec<PathBuf>> {
        let dir = self.dir()?;
        let mut entries = tokio::fs::read_dir(dir)
            .await
            .map_err(|e| Error::io(dir, e))?;

        let mut files = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| Error::io(dir, e))?
        {
            let path = entry.path();
            if path.is_file() && is_markdown_file(&path) {
                files.push(path);
            }
        }
        Ok(files)
    }

    /// List content identifiers (file stems) in directory-listing order
    pub async fn list_slugs(&self) -> Result<Vec<String>> {
        let files = self.list_files().await?;
        Ok(files
            .iter()
            .filter_map(|p| p.file_stem().and_then(|s| s.to_str()))
            .map(str::to_string)
            .collect())
    }

    /// Load and render the content item for `slug`
    pub async fn load(&self, slug: &str) -> Result<ContentItem> {
        let path = self.source_path(slug).await?;
        let raw = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| Error::io(&path, e))?;

        let (fm, body) = FrontMatter::parse(&raw);
        let rendered = self.renderer.render(body);

        Ok(ContentItem {
            slug: slug.to_string(),
            title: fm.title.clone(),
            description: fm.description.clone(),
            published_at: fm.parse_date(),
            html: rendered.html,
            outline: rendered.outline,
            source: path,
        })
    }

    /// Backing file for a slug, trying each markdown extension
    async fn source_path(&self, slug: &str) -> Result<PathBuf> {
        let dir = self.dir()?;
        for ext in ["md", "markdown"] {
            let candidate = dir.join(format!("{}.{}", slug, ext));
            match tokio::fs::metadata(&candidate).await {
                Ok(meta) if meta.is_file() => return Ok(candidate),
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(Error::io(&candidate, e)),
            }
        }
        Err(Error::NotFound(slug.to_string()))
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> ContentStore {
        ContentStore::new(Some(dir.path().to_path_buf()))
    }

    #[tokio::test]
    async fn test_list_slugs() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("first.md"), "# One").unwrap();
        fs::write(dir.path().join("second.markdown"), "# Two").unwrap();
        fs::write(dir.path().join("notes.txt"), "skip me").unwrap();

        let mut slugs = store_in(&dir).list_slugs().await.unwrap();
        slugs.sort();
        assert_eq!(slugs, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_list_empty_dir() {
        let dir = TempDir::new().unwrap();
        let slugs = store_in(&dir).list_slugs().await.unwrap();
        assert!(slugs.is_empty());
    }

    #[tokio::test]
    async fn test_missing_config_is_configuration_error() {
        let store = ContentStore::new(None);
        let err = store.list_slugs().await.unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[tokio::test]
    async fn test_missing_dir_is_io_error() {
        let store = ContentStore::new(Some(PathBuf::from("/nonexistent/blog")));
        let err = store.list_slugs().await.unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[tokio::test]
    async fn test_load_parses_front_matter() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("hello.md"),
            "---\ntitle: Hello\ndate: 2024-01-01\n---\n\n## Intro\n\nHi.\n",
        )
        .unwrap();

        let item = store_in(&dir).load("hello").await.unwrap();
        assert_eq!(item.title.as_deref(), Some("Hello"));
        assert!(item.published_at.is_some());
        assert_eq!(item.outline[0].id, "intro");
        assert!(item.source.ends_with("hello.md"));
    }

    #[tokio::test]
    async fn test_load_unknown_slug_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = store_in(&dir).load("ghost").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(slug) if slug == "ghost"));
    }
}
