//! Shared helpers for markup output.

use std::collections::{HashMap, HashSet};

use pulldown_cmark::HeadingLevel;

/// Escape HTML special characters for text and attribute values.
///
/// # Example
///
/// ```
/// use sp_renderer::escape_html;
///
/// assert_eq!(escape_html(r#"A & "B" <c>"#), "A &amp; &quot;B&quot; &lt;c&gt;");
/// ```
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Convert heading text to an anchor slug.
///
/// Lowercases letters and digits (Unicode included), collapses runs of
/// whitespace, dashes and underscores into one dash, drops everything else.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.trim().chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_dash = true;
        }
    }

    slug
}

/// Hands out unique heading ids within one page.
#[derive(Debug, Default)]
pub(crate) struct HeadingIds {
    /// Next suffix to try per base slug.
    suffixes: HashMap<String, usize>,
    issued: HashSet<String>,
}

impl HeadingIds {
    /// Slug for `text`, suffixed with `-1`, `-2`, ... until it is unused.
    pub(crate) fn next(&mut self, text: &str) -> String {
        let base = match slugify(text) {
            slug if slug.is_empty() => "section".to_owned(),
            slug => slug,
        };
        let suffix = self.suffixes.entry(base.clone()).or_default();
        loop {
            let candidate = match *suffix {
                0 => base.clone(),
                n => format!("{base}-{n}"),
            };
            *suffix += 1;
            if self.issued.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}

/// Convert heading level enum to number (1-6).
#[must_use]
pub(crate) fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
