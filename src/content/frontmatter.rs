//! Front-matter parsing

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Front-matter declared at the top of a blog post
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Declared publication timestamp. Kept as the raw string so that
    /// the various accepted formats can be tried lazily.
    pub date: Option<String>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string.
    /// Returns (front_matter, remaining_content).
    ///
    /// Malformed or absent front-matter degrades to defaults rather than
    /// failing the whole post load.
    pub fn parse(content: &str) -> (Self, &str) {
        let trimmed = content.trim_start();

        if !trimmed.starts_with("---") {
            return (FrontMatter::default(), content);
        }

        // Keep the opening fence's newline: it doubles as the closing
        // fence's leading newline when the block is empty.
        let rest = &trimmed[3..];
        let Some(end_pos) = rest.find("\n---") else {
            // No closing ---, treat as no front-matter
            return (FrontMatter::default(), content);
        };

        let yaml_content = &rest[..end_pos];
        let remaining = rest[end_pos + 4..].trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return (FrontMatter::default(), remaining);
        }

        match serde_yaml::from_str::<FrontMatter>(yaml_content) {
            Ok(fm) => (fm, remaining),
            Err(e) => {
                tracing::warn!("Failed to parse front-matter, treating as content: {}", e);
                (FrontMatter::default(), content)
            }
        }
    }

    /// Parse the declared date string into a timestamp
    pub fn parse_date(&self) -> Option<DateTime<Utc>> {
        self.date.as_ref().and_then(|s| parse_date_string(s))
    }
}

/// Parse a date string in various formats. Naive dates are taken as UTC so
/// that resolved metadata is identical regardless of the build machine.
fn parse_date_string(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];

    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = chrono::NaiveDate::parse_from_str(s, fmt) {
            return Some(d.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    // RFC 3339 / ISO 8601 with offset
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
description: A first post
date: 2024-01-15 10:30:00
---

This is the content.
"#;

        let (fm, remaining) = FrontMatter::parse(content);
        assert_eq!(fm.title, Some("Hello World".to_string()));
        assert_eq!(fm.description, Some("A first post".to_string()));
        assert!(remaining.starts_with("This is the content."));
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "Just some markdown.\n";
        let (fm, remaining) = FrontMatter::parse(content);
        assert_eq!(fm.title, None);
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_empty_frontmatter_block() {
        let (fm, remaining) = FrontMatter::parse("---\n---\n\nBody.\n");
        assert_eq!(fm.title, None);
        assert_eq!(remaining, "Body.\n");
    }

    #[test]
    fn test_unclosed_frontmatter_is_content() {
        let content = "---\ntitle: Oops\n\nNo closing fence here.\n";
        let (fm, remaining) = FrontMatter::parse(content);
        assert_eq!(fm.title, None);
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_parse_date_formats() {
        for raw in [
            "2024-01-15 10:30:00",
            "2024/01/15 10:30",
            "2024-01-15T10:30:00",
        ] {
            let fm = FrontMatter {
                date: Some(raw.to_string()),
                ..Default::default()
            };
            let dt = fm.parse_date().unwrap();
            assert_eq!(dt.format("%Y-%m-%d").to_string(), "2024-01-15");
        }
    }

    #[test]
    fn test_parse_date_only() {
        let fm = FrontMatter {
            date: Some("2024-06-01".to_string()),
            ..Default::default()
        };
        let dt = fm.parse_date().unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-06-01T00:00:00+00:00");
    }

    #[test]
    fn test_parse_date_rfc3339() {
        let fm = FrontMatter {
            date: Some("2024-06-01T12:00:00+02:00".to_string()),
            ..Default::default()
        };
        let dt = fm.parse_date().unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-06-01T10:00:00+00:00");
    }

    #[test]
    fn test_invalid_date_is_none() {
        let fm = FrontMatter {
            date: Some("soon".to_string()),
            ..Default::default()
        };
        assert!(fm.parse_date().is_none());
    }
}
