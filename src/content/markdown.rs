//! Markdown rendering with syntax highlighting and heading anchors

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use std::collections::HashMap;
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use super::outline::{self, Outline};
use crate::helpers::html_escape;

/// Rendered markdown: the HTML payload plus the extracted heading outline
#[derive(Debug, Clone)]
pub struct Rendered {
    pub html: String,
    pub outline: Outline,
}

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: "InspiredGitHub".to_string(),
        }
    }

    /// Render markdown to HTML, assigning stable anchor ids to headings and
    /// collecting h2-h4 into a nested outline.
    pub fn render(&self, markdown: &str) -> Rendered {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut code_block: Option<(Option<String>, String)> = None;
        let mut heading: Option<(u8, String)> = None;
        let mut used_ids: HashMap<String, usize> = HashMap::new();
        let mut headings: Vec<(u8, String, String)> = Vec::new();

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                        _ => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, code)) = code_block.take() {
                        let highlighted = self.highlight_code(&code, lang.as_deref());
                        events.push(Event::Html(CowStr::from(highlighted)));
                    }
                }
                Event::Start(Tag::Heading { level, .. }) => {
                    heading = Some((level as u8, String::new()));
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some((depth, text)) = heading.take() {
                        let id = unique_id(&mut used_ids, &text);
                        if (2..=4).contains(&depth) {
                            headings.push((depth, id.clone(), text.clone()));
                        }
                        events.push(Event::Html(CowStr::from(format!(
                            "<h{depth} id=\"{id}\">{}</h{depth}>\n",
                            html_escape(&text)
                        ))));
                    }
                }
                Event::Text(text) | Event::Code(text)
                    if code_block.is_some() || heading.is_some() =>
                {
                    if let Some((_, buf)) = code_block.as_mut() {
                        buf.push_str(&text);
                    } else if let Some((_, buf)) = heading.as_mut() {
                        buf.push_str(&text);
                    }
                }
                other => {
                    if code_block.is_none() && heading.is_none() {
                        events.push(other);
                    }
                }
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Rendered {
            html: html_output,
            outline: outline::build(headings),
        }
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next());

        let highlighted = theme.and_then(|theme| {
            highlighted_html_for_string(code, &self.syntax_set, syntax, theme).ok()
        });

        match highlighted {
            Some(html) => html,
            None => format!("<pre><code>{}</code></pre>\n", html_escape(code)),
        }
    }
}

/// Slugify heading text into an anchor id, appending -1, -2, ... when the
/// same heading text appears more than once.
fn unique_id(used: &mut HashMap<String, usize>, text: &str) -> String {
    let base = slug::slugify(text);
    let base = if base.is_empty() {
        "section".to_string()
    } else {
        base
    };

    let seen = used.entry(base.clone()).or_insert(0);
    let id = if *seen == 0 {
        base.clone()
    } else {
        format!("{}-{}", base, seen)
    };
    *seen += 1;
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_anchors() {
        let renderer = MarkdownRenderer::new();
        let rendered = renderer.render("## First Steps\n\ntext\n\n### Details\n");
        assert!(rendered.html.contains("<h2 id=\"first-steps\">First Steps</h2>"));
        assert!(rendered.html.contains("<h3 id=\"details\">Details</h3>"));
    }

    #[test]
    fn test_outline_extraction() {
        let renderer = MarkdownRenderer::new();
        let rendered = renderer.render("## Setup\n\n### Install\n\n## Usage\n");
        assert_eq!(rendered.outline.len(), 2);
        assert_eq!(rendered.outline[0].id, "setup");
        assert_eq!(rendered.outline[0].children[0].text, "Install");
        assert_eq!(rendered.outline[1].id, "usage");
    }

    #[test]
    fn test_h1_excluded_from_outline() {
        let renderer = MarkdownRenderer::new();
        let rendered = renderer.render("# Title\n\n## Section\n");
        assert_eq!(rendered.outline.len(), 1);
        assert_eq!(rendered.outline[0].id, "section");
        // but it still gets an anchor
        assert!(rendered.html.contains("<h1 id=\"title\">"));
    }

    #[test]
    fn test_duplicate_headings_get_distinct_ids() {
        let renderer = MarkdownRenderer::new();
        let rendered = renderer.render("## Notes\n\n## Notes\n\n## Notes\n");
        assert!(rendered.html.contains("id=\"notes\""));
        assert!(rendered.html.contains("id=\"notes-1\""));
        assert!(rendered.html.contains("id=\"notes-2\""));
    }

    #[test]
    fn test_code_block_is_highlighted() {
        let renderer = MarkdownRenderer::new();
        let rendered = renderer.render("```rust\nfn main() {}\n```\n");
        assert!(rendered.html.contains("<pre"));
        assert!(rendered.html.contains("main"));
    }

    #[test]
    fn test_heading_with_inline_code() {
        let renderer = MarkdownRenderer::new();
        let rendered = renderer.render("## Using `serde`\n");
        assert_eq!(rendered.outline[0].id, "using-serde");
        assert_eq!(rendered.outline[0].text, "Using serde");
    }
}
