//! plume: a personal site generator
//!
//! Renders a portfolio home page, a blog and a resume page into a static
//! tree. Post timestamps come from front matter merged with git history,
//! so a post with no `date:` line still shows when it was last touched.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod feed;
pub mod generator;
pub mod helpers;
pub mod history;
pub mod resolver;
pub mod resume;
pub mod server;
pub mod store;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::history::GitHistory;
use crate::resolver::PostMetadataResolver;
use crate::store::ContentStore;

/// Environment variable overriding the configured blog directory.
pub const BLOG_DIR_ENV: &str = "PLUME_BLOG_DIR";

/// The site being built
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Site {
    /// Create a site from a directory, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            public_dir,
        })
    }

    /// The directory holding blog posts, if one is configured.
    ///
    /// The `PLUME_BLOG_DIR` environment variable takes precedence over
    /// the configuration file.
    pub fn blog_dir(&self) -> Option<PathBuf> {
        if let Ok(dir) = std::env::var(BLOG_DIR_ENV) {
            return Some(PathBuf::from(dir));
        }
        self.config
            .blog_dir
            .as_ref()
            .map(|dir| self.base_dir.join(dir))
    }

    /// Path to the resume data file
    pub fn resume_path(&self) -> PathBuf {
        self.base_dir.join(&self.config.resume_file)
    }

    /// A post resolver scoped to one build: its memoization lives only
    /// as long as the value returned here.
    pub fn resolver(&self) -> PostMetadataResolver<GitHistory> {
        let store = ContentStore::new(self.blog_dir());
        PostMetadataResolver::new(store, GitHistory)
    }

    /// Generate the static site
    pub async fn generate(&self) -> Result<()> {
        commands::generate::run(self).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_site_without_config_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.public_dir, dir.path().join("public"));
        assert!(site.blog_dir().is_none());
    }

    #[test]
    fn test_site_reads_config_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("_config.yml"),
            "title: My Site\nblog_dir: posts\n",
        )
        .unwrap();

        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.config.title, "My Site");
        assert_eq!(site.blog_dir(), Some(dir.path().join("posts")));
    }
}
