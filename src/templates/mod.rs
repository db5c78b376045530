//! Built-in site templates using the Tera template engine
//!
//! All templates are embedded directly in the binary; a site checkout only
//! carries content and configuration.

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

/// Stylesheet written alongside the generated pages
pub const SITE_CSS: &str = include_str!("theme/site.css");

/// Template renderer with the embedded theme loaded
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all theme templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Autoescaping is off: the generator inserts pre-rendered HTML and
        // pre-escaped strings.
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("theme/layout.html")),
            ("home.html", include_str!("theme/home.html")),
            ("blog.html", include_str!("theme/blog.html")),
            ("post.html", include_str!("theme/post.html")),
            ("resume.html", include_str!("theme/resume.html")),
            (
                "partials/post_list.html",
                include_str!("theme/partials/post_list.html"),
            ),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with the given context
    pub fn render(&self, name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(name, context)?)
    }
}

/// Site configuration subset exposed to templates
#[derive(Debug, Clone, Serialize)]
pub struct ConfigData {
    pub title: String,
    pub author: String,
    pub description: String,
    pub language: String,
}

/// A post entry in home/blog listings
#[derive(Debug, Clone, Serialize)]
pub struct PostCard {
    pub href: String,
    pub title: String,
    pub description: Option<String>,
    pub published: Option<TimestampData>,
}

/// The three renderings of one timestamp used by `<time>` elements
#[derive(Debug, Clone, Serialize)]
pub struct TimestampData {
    pub short: String,
    pub long: String,
    pub iso: String,
}

/// A portfolio card on the home page
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioData {
    pub title: String,
    pub href: String,
    pub tags: String,
    pub description: String,
}

/// Contact row in the resume header
#[derive(Debug, Clone, Serialize)]
pub struct InfoRow {
    pub label: String,
    pub text: String,
    pub href: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobData {
    pub title: String,
    pub company: String,
    pub from: String,
    pub to: String,
    pub tasks: Vec<String>,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OtherData {
    pub title: String,
    pub from: String,
    pub to: String,
    pub tasks: Vec<String>,
}

/// A skills group with its pre-formatted, sorted skill list
#[derive(Debug, Clone, Serialize)]
pub struct SkillSection {
    pub title: String,
    pub skills: String,
}
