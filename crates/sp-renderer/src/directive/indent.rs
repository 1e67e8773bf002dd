//! Indentation and list context tracking.
//!
//! A `:::` marker indented four or more columns past its enclosing list item
//! content is an indented code line, not a directive. Markers inside list
//! items are measured from the item's content column.

/// Leading whitespace width in columns. Tabs advance to the next multiple of 4.
pub(crate) fn indent_width(line: &str) -> usize {
    let mut width = 0;
    for c in line.chars() {
        match c {
            ' ' => width += 1,
            '\t' => width += 4 - width % 4,
            _ => break,
        }
    }
    width
}

/// Leading whitespace of `line`, as written.
pub(crate) fn leading_whitespace(line: &str) -> &str {
    &line[..line.len() - line.trim_start_matches([' ', '\t']).len()]
}

/// Strip up to `columns` columns of leading whitespace.
pub(crate) fn strip_columns(line: &str, columns: usize) -> &str {
    let mut width = 0;
    for (idx, c) in line.char_indices() {
        let next = match c {
            ' ' => width + 1,
            '\t' => width + 4 - width % 4,
            _ => return &line[idx..],
        };
        if next > columns {
            return &line[idx..];
        }
        width = next;
    }
    ""
}

/// Content column of a list item line (`- x`, `* x`, `+ x`, `1. x`, `1) x`).
fn list_item_content_indent(line: &str) -> Option<usize> {
    let indent = indent_width(line);
    let body = line.trim_start_matches([' ', '\t']);

    let marker_len = match body.chars().next()? {
        '-' | '*' | '+' => 1,
        c if c.is_ascii_digit() => {
            let digits = body.chars().take_while(char::is_ascii_digit).count();
            if digits > 9 || !matches!(body[digits..].chars().next(), Some('.' | ')')) {
                return None;
            }
            digits + 1
        }
        _ => return None,
    };

    let rest = &body[marker_len..];
    if rest.trim().is_empty() {
        return Some(indent + marker_len + 1);
    }
    let spaces = rest.len() - rest.trim_start_matches(' ').len();
    match spaces {
        0 => None,
        // Five or more spaces start an indented code block inside the item.
        1..=4 => Some(indent + marker_len + spaces),
        _ => Some(indent + marker_len + 1),
    }
}

/// Stack of content columns of the list items enclosing the current line.
#[derive(Debug, Default)]
pub(crate) struct ListContext {
    content_indents: Vec<usize>,
}

impl ListContext {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Feed one line outside fenced code.
    pub(crate) fn update(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        let indent = indent_width(line);
        while self.content_indents.last().is_some_and(|&top| top > indent) {
            self.content_indents.pop();
        }
        if let Some(content) = list_item_content_indent(line) {
            self.content_indents.push(content);
        }
    }

    /// Content column of the innermost open list item, 0 outside lists.
    pub(crate) fn content_indent(&self) -> usize {
        self.content_indents.last().copied().unwrap_or_default()
    }
}
