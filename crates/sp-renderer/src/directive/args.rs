//! Directive argument scanning.
//!
//! Splits the info text of a container opener into `key=value` attributes and
//! the positional text left between them.

use std::collections::HashMap;
use std::ops::Range;

/// Arguments scanned from the info text of a container opener.
///
/// For `:::terminal title="Shell" extra` the scanner receives
/// `title="Shell" extra` and produces one attribute plus the positional text
/// `extra`.
///
/// # Example
///
/// ```
/// use sp_renderer::directive::DirectiveArgs;
///
/// let args = DirectiveArgs::parse(r#"Deploy lang="sh" prompt='$ '"#);
/// assert_eq!(args.get("lang"), Some("sh"));
/// assert_eq!(args.get("prompt"), Some("$ "));
/// assert_eq!(args.positional, "Deploy");
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DirectiveArgs {
    /// Key-value attributes. A repeated key keeps its last value.
    pub attrs: HashMap<String, String>,
    /// Text outside every attribute span, trimmed.
    pub positional: String,
}

/// One `key=value` match, as byte ranges into the scanned text.
struct AttrSpan {
    key: Range<usize>,
    value: Range<usize>,
    /// Whole match including trailing whitespace.
    full: Range<usize>,
}

impl DirectiveArgs {
    /// Scan `info` for `key="value"`, `key='value'` and `key=value` pairs.
    ///
    /// Never fails. Text that does not form a pair ends up in
    /// [`positional`](Self::positional).
    #[must_use]
    pub fn parse(info: &str) -> Self {
        let mut args = Self::default();
        let mut gap_start = 0;
        let mut pos = 0;

        while let Some(c) = info[pos..].chars().next() {
            if !is_word_char(c) {
                pos += c.len_utf8();
                continue;
            }

            match scan_pair(info, pos) {
                Some(span) => {
                    args.positional.push_str(&info[gap_start..span.full.start]);
                    let value = unquote(&info[span.value]);
                    args.attrs
                        .insert(info[span.key].to_owned(), value.to_owned());
                    pos = span.full.end;
                    gap_start = pos;
                }
                // The identifier run is not followed by a usable `=value`.
                None => pos = word_end(info, pos),
            }
        }

        args.positional.push_str(&info[gap_start..]);
        args.positional = args.positional.trim().to_owned();
        args
    }

    /// Get an attribute value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Get an attribute value by key, treating an empty value as absent.
    #[must_use]
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.is_empty())
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Byte offset just past the identifier run starting at `start`.
fn word_end(s: &str, start: usize) -> usize {
    s[start..]
        .find(|c: char| !is_word_char(c))
        .map_or(s.len(), |len| start + len)
}

/// Try to read `ident=value` followed by optional whitespace at `start`.
fn scan_pair(s: &str, start: usize) -> Option<AttrSpan> {
    let key_end = word_end(s, start);
    if !s[key_end..].starts_with('=') {
        return None;
    }
    let value_start = key_end + 1;
    let after_eq = &s[value_start..];

    let value_len = quoted_len(after_eq, '"')
        .or_else(|| quoted_len(after_eq, '\''))
        .or_else(|| bare_len(after_eq))?;
    let value_end = value_start + value_len;

    let tail = &s[value_end..];
    let full_end = value_end + (tail.len() - tail.trim_start().len());

    Some(AttrSpan {
        key: start..key_end,
        value: value_start..value_end,
        full: start..full_end,
    })
}

/// Length of a quoted value including both quotes, if the quote is closed.
fn quoted_len(s: &str, quote: char) -> Option<usize> {
    let inner = s.strip_prefix(quote)?;
    let close = inner.find(quote)?;
    Some(close + 2 * quote.len_utf8())
}

/// Length of a non-empty run of non-whitespace characters.
fn bare_len(s: &str) -> Option<usize> {
    let len = s.find(char::is_whitespace).unwrap_or(s.len());
    (len > 0).then_some(len)
}

fn unquote(value: &str) -> &str {
    ['"', '\'']
        .into_iter()
        .find_map(|quote| {
            value
                .strip_prefix(quote)
                .and_then(|rest| rest.strip_suffix(quote))
        })
        .unwrap_or(value)
}
