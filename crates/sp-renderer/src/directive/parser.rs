//! Container line parsing.
//!
//! Recognizes `:::name free text` openers and bare `:::` closers.

/// A container marker found on a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ParsedDirective {
    /// Opening `:::name ...`. `info` is everything after the colons, trimmed.
    ContainerStart { info: String, colon_count: usize },
    /// Closing `:::`.
    ContainerEnd { colon_count: usize },
}

/// Parse a whole line as a container marker.
///
/// Returns `None` for ordinary lines, including `:::` followed by text whose
/// first word is not a valid directive name.
pub(crate) fn parse_container_line(line: &str) -> Option<ParsedDirective> {
    let trimmed = line.trim();
    let colon_count = trimmed.chars().take_while(|&c| c == ':').count();
    if colon_count < 3 {
        return None;
    }

    let info = trimmed[colon_count..].trim();
    if info.is_empty() {
        return Some(ParsedDirective::ContainerEnd { colon_count });
    }

    let name = info.split_whitespace().next().unwrap_or_default();
    if !is_valid_directive_name(name) {
        return None;
    }

    Some(ParsedDirective::ContainerStart {
        info: info.to_owned(),
        colon_count,
    })
}

/// Check whether `info` opens the directive called `name`.
///
/// After trimming, `info` must be exactly `name` or `name` followed by
/// whitespace and any text. Matching is case-sensitive.
///
/// # Example
///
/// ```
/// use sp_renderer::directive::is_directive;
///
/// assert!(is_directive("terminal", "terminal"));
/// assert!(is_directive("terminal", " terminal title=\"Shell\" "));
/// assert!(!is_directive("terminal", "terminalx"));
/// assert!(!is_directive("terminal", "foo terminal"));
/// ```
#[must_use]
pub fn is_directive(name: &str, info: &str) -> bool {
    info.trim()
        .strip_prefix(name)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
}

/// Text following the directive name in `info`, or all of `info` if it does
/// not start with `name`.
pub(crate) fn strip_name<'a>(name: &str, info: &'a str) -> &'a str {
    let info = info.trim();
    info.strip_prefix(name).unwrap_or(info)
}

/// Valid names contain only alphanumeric characters, hyphens, and underscores.
fn is_valid_directive_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}
