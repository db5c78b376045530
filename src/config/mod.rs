//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub author: String,
    pub description: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory layout. `blog_dir` is deliberately optional: generating
    // anything that needs blog content without it configured is a fatal
    // configuration error, not a silent empty site.
    pub blog_dir: Option<String>,
    pub public_dir: String,
    pub static_dir: String,
    pub resume_file: String,

    // Home page
    pub about: String,
    #[serde(default)]
    pub portfolio: Vec<PortfolioCard>,

    #[serde(default)]
    pub feed: FeedConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Plume".to_string(),
            author: "John Doe".to_string(),
            description: String::new(),
            language: "en".to_string(),

            url: "http://localhost:3000".to_string(),
            root: "/".to_string(),

            blog_dir: None,
            public_dir: "public".to_string(),
            static_dir: "static".to_string(),
            resume_file: "resume.yml".to_string(),

            about: String::new(),
            portfolio: Vec::new(),

            feed: FeedConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Title of the RSS channel. Defaults to "<author>'s Blog".
    pub fn feed_title(&self) -> String {
        self.feed
            .title
            .clone()
            .unwrap_or_else(|| format!("{}'s Blog", self.author))
    }
}

/// A project card shown in the home page portfolio section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioCard {
    pub title: String,
    pub href: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: String,
}

/// RSS feed configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub title: Option<String>,
}
