//! Generator module - renders the site into the public directory

use anyhow::{Context as _, Result};
use chrono::{DateTime, Datelike, Utc};
use std::fs;
use tera::Context;
use walkdir::WalkDir;

use crate::config::SiteConfig;
use crate::feed;
use crate::helpers::{datestamp, href_for, iso, outline_html, timestamp};
use crate::resolver::ResolvedPost;
use crate::resume::{self, Resume};
use crate::templates::{
    ConfigData, InfoRow, JobData, OtherData, PortfolioData, PostCard, SkillSection,
    TemplateRenderer, TimestampData, SITE_CSS,
};
use crate::Site;

/// Static site generator
pub struct Generator {
    site: Site,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Site) -> Result<Self> {
        Ok(Self {
            site: site.clone(),
            renderer: TemplateRenderer::new()?,
        })
    }

    /// Generate the entire site
    pub async fn generate(&self) -> Result<()> {
        fs::create_dir_all(&self.site.public_dir)?;

        // A fresh resolver per build: resolution is memoized for exactly
        // this batch and nothing leaks into the next one.
        let resolver = self.site.resolver();
        let posts = resolver.list_resolved().await?;
        tracing::info!("Resolved {} posts", posts.len());

        self.write_stylesheet()?;
        self.copy_static_assets()?;
        self.generate_home(&posts)?;
        self.generate_blog_index(&posts)?;
        self.generate_post_pages(&posts)?;
        self.generate_resume()?;
        self.write_feed(&posts)?;
        self.write_sitemap(&posts)?;

        Ok(())
    }

    fn config(&self) -> &SiteConfig {
        &self.site.config
    }

    /// Create a base context with common variables
    fn base_context(&self) -> Context {
        let config = self.config();
        let mut context = Context::new();
        context.insert(
            "config",
            &ConfigData {
                title: config.title.clone(),
                author: config.author.clone(),
                description: config.description.clone(),
                language: config.language.clone(),
            },
        );
        context.insert("root", &href_for(config, ""));
        context.insert("feed_title", &config.feed_title());
        context.insert("feed_href", &href_for(config, "blog/rss.xml"));
        context.insert("current_year", &Utc::now().year().to_string());
        context.insert("page_description", &None::<String>);
        context
    }

    fn post_cards(&self, posts: &[ResolvedPost]) -> Vec<PostCard> {
        posts
            .iter()
            .map(|post| PostCard {
                href: href_for(self.config(), &format!("blog/{}/", post.slug)),
                title: post.title.clone().unwrap_or_else(|| post.slug.clone()),
                description: post.description.clone(),
                published: post.published_at.map(timestamp_data),
            })
            .collect()
    }

    /// Generate the home page (about + portfolio + post list)
    fn generate_home(&self, posts: &[ResolvedPost]) -> Result<()> {
        let config = self.config();

        let portfolio: Vec<PortfolioData> = config
            .portfolio
            .iter()
            .map(|card| PortfolioData {
                title: card.title.clone(),
                href: card.href.clone(),
                tags: card.tags.join(" "),
                description: card.description.clone(),
            })
            .collect();

        let mut context = self.base_context();
        context.insert("page_description", &Some(config.description.clone()));
        context.insert("about", &config.about);
        context.insert("portfolio", &portfolio);
        context.insert("posts", &self.post_cards(posts));

        let html = self.renderer.render("home.html", &context)?;
        self.write_page("index.html", &html)
    }

    /// Generate the blog index page
    fn generate_blog_index(&self, posts: &[ResolvedPost]) -> Result<()> {
        let mut context = self.base_context();
        context.insert("posts", &self.post_cards(posts));

        let html = self.renderer.render("blog.html", &context)?;
        self.write_page("blog/index.html", &html)
    }

    /// Generate one page per post
    fn generate_post_pages(&self, posts: &[ResolvedPost]) -> Result<()> {
        for post in posts {
            let mut context = self.base_context();
            context.insert("page_description", &post.description);
            context.insert(
                "title",
                post.title.as_deref().unwrap_or(post.slug.as_str()),
            );
            context.insert("content", &post.html);
            context.insert("toc", &outline_html(&post.outline));
            context.insert("published", &post.published_at.map(timestamp_data));
            context.insert("updated", &post.updated_at.map(timestamp_data));

            let html = self.renderer.render("post.html", &context)?;
            self.write_page(&format!("blog/{}/index.html", post.slug), &html)?;
        }

        tracing::info!("Generated {} post pages", posts.len());
        Ok(())
    }

    /// Generate the resume page from the data file, if present
    fn generate_resume(&self) -> Result<()> {
        let path = self.site.resume_path();
        if !path.exists() {
            tracing::info!("No resume data at {:?}, skipping resume page", path);
            return Ok(());
        }

        let data = Resume::load(&path)?;

        let info: Vec<InfoRow> = data
            .info
            .iter()
            .map(|(label, item)| InfoRow {
                label: label.clone(),
                text: item.text.clone(),
                href: item.link.clone().unwrap_or_else(|| item.text.clone()),
            })
            .collect();

        let experience: Vec<JobData> = data
            .experience
            .iter()
            .map(|job| JobData {
                title: job.title.clone(),
                company: job.company.clone(),
                from: job.from.clone(),
                to: job.to.clone(),
                tasks: job.tasks.clone(),
                achievements: job.achievements.clone(),
            })
            .collect();

        let other: Vec<OtherData> = data
            .other
            .iter()
            .map(|entry| OtherData {
                title: entry.title.clone(),
                from: entry.from.clone(),
                to: entry.to.clone(),
                tasks: entry.tasks.clone(),
            })
            .collect();

        let skills: Vec<SkillSection> = data
            .skills
            .iter()
            .map(|(title, list)| SkillSection {
                title: title.clone(),
                skills: resume::format_skills(list),
            })
            .collect();

        let mut context = self.base_context();
        context.insert("resume_name", &data.name);
        context.insert("info", &info);
        context.insert("summary", &data.summary);
        context.insert("experience", &experience);
        context.insert("other", &other);
        context.insert("skills", &skills);
        context.insert("education", &data.education);

        let html = self.renderer.render("resume.html", &context)?;
        self.write_page("resume/index.html", &html)
    }

    /// Write the RSS feed
    fn write_feed(&self, posts: &[ResolvedPost]) -> Result<()> {
        let xml = feed::rss(self.config(), posts);
        self.write_page("blog/rss.xml", &xml)?;
        tracing::info!("Generated rss.xml");
        Ok(())
    }

    /// Write the sitemap
    fn write_sitemap(&self, posts: &[ResolvedPost]) -> Result<()> {
        let xml = feed::sitemap(self.config(), posts, Utc::now());
        self.write_page("sitemap.xml", &xml)?;
        tracing::info!("Generated sitemap.xml");
        Ok(())
    }

    fn write_stylesheet(&self) -> Result<()> {
        self.write_page("css/site.css", SITE_CSS)
    }

    /// Copy static assets (images, fonts, ...) into the public directory
    fn copy_static_assets(&self) -> Result<()> {
        let static_dir = self.site.base_dir.join(&self.config().static_dir);
        if !static_dir.exists() {
            return Ok(());
        }

        for entry in WalkDir::new(&static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() {
                let relative = path.strip_prefix(&static_dir)?;
                let dest = self.site.public_dir.join(relative);
                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::copy(path, &dest)?;
            }
        }

        Ok(())
    }

    fn write_page(&self, relative: &str, content: &str) -> Result<()> {
        let output_path = self.site.public_dir.join(relative);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {:?}", parent))?;
        }
        fs::write(&output_path, content)
            .with_context(|| format!("failed to write {:?}", output_path))?;
        tracing::debug!("Generated: {:?}", output_path);
        Ok(())
    }
}

fn timestamp_data(dt: DateTime<Utc>) -> TimestampData {
    TimestampData {
        short: datestamp(&dt),
        long: timestamp(&dt),
        iso: iso(&dt),
    }
}
