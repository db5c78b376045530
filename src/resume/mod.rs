//! Resume data model
//!
//! The resume page is rendered from a YAML data file rather than markdown,
//! so that layout and content stay separate. Section order follows the data
//! file (IndexMap keeps insertion order through serde).

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resume {
    pub name: String,
    /// Contact rows shown in the header (email, website, ...)
    #[serde(default)]
    pub info: IndexMap<String, InfoItem>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub experience: Vec<Job>,
    #[serde(default)]
    pub other: Vec<Other>,
    /// Skill group -> skills
    #[serde(default)]
    pub skills: IndexMap<String, Vec<String>>,
    #[serde(default)]
    pub education: Option<Education>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoItem {
    pub text: String,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub title: String,
    pub company: String,
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub tasks: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Other {
    pub title: String,
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub tasks: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Education {
    pub school: String,
    pub degree: String,
    pub field: String,
    pub from: String,
    pub to: String,
}

impl Resume {
    /// Load resume data from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read resume data {:?}", path))?;
        let resume: Resume = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse resume data {:?}", path))?;
        Ok(resume)
    }
}

/// Join a skill list into display text, sorted case-insensitively with any
/// leading `.` ignored so that ".NET" files under N rather than at the top.
pub fn format_skills(skills: &[String]) -> String {
    let mut sorted: Vec<&String> = skills.iter().collect();
    sorted.sort_by_key(|s| normalize_skill(s.as_str()));
    sorted
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn normalize_skill(skill: &str) -> String {
    skill.strip_prefix('.').unwrap_or(skill).to_lowercase()
}
