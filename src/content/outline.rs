//! Structured outline of a post's headings
//!
//! The outline is carried on each content item for the presentation layer:
//! the table-of-contents sidebar and its active-section tracking script.

use serde::Serialize;

/// A single heading in a post outline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlineEntry {
    /// Anchor id, unique within the post
    pub id: String,
    /// Free-text label
    pub text: String,
    /// Heading depth (2 for h2, 3 for h3, ...)
    pub depth: u8,
    /// Sub-headings nested under this one
    pub children: Vec<OutlineEntry>,
}

pub type Outline = Vec<OutlineEntry>;

/// Build a nested outline from headings in document order.
pub fn build(headings: Vec<(u8, String, String)>) -> Outline {
    let mut outline = Outline::new();
    for (depth, id, text) in headings {
        insert(
            &mut outline,
            OutlineEntry {
                id,
                text,
                depth,
                children: Vec::new(),
            },
        );
    }
    outline
}

fn insert(entries: &mut Outline, entry: OutlineEntry) {
    match entries.last_mut() {
        Some(last) if last.depth < entry.depth => insert(&mut last.children, entry),
        _ => entries.push(entry),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading(depth: u8, id: &str) -> (u8, String, String) {
        (depth, id.to_string(), id.to_string())
    }

    #[test]
    fn test_flat_outline() {
        let outline = build(vec![heading(2, "a"), heading(2, "b")]);
        assert_eq!(outline.len(), 2);
        assert!(outline[0].children.is_empty());
    }

    #[test]
    fn test_nested_outline() {
        let outline = build(vec![
            heading(2, "a"),
            heading(3, "a-1"),
            heading(4, "a-1-i"),
            heading(3, "a-2"),
            heading(2, "b"),
        ]);
        assert_eq!(outline.len(), 2);
        assert_eq!(outline[0].children.len(), 2);
        assert_eq!(outline[0].children[0].children[0].id, "a-1-i");
        assert_eq!(outline[1].id, "b");
    }

    #[test]
    fn test_orphan_subheading_stays_top_level() {
        // An h3 before any h2 has no parent to nest under.
        let outline = build(vec![heading(3, "lonely"), heading(2, "a")]);
        assert_eq!(outline.len(), 2);
        assert_eq!(outline[0].id, "lonely");
    }
}
