//! Code fence tracking.
//!
//! Directive markers inside fenced code blocks are literal text, so the
//! processor needs to know when it is inside one.

/// Fence state for line-by-line scanning.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FenceTracker {
    #[default]
    Outside,
    /// Inside a fence opened with `len` repetitions of `marker`.
    Inside { marker: char, len: usize },
}

impl FenceTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn in_fence(self) -> bool {
        matches!(self, Self::Inside { .. })
    }

    /// Feed one line. Returns `true` when the line opens or closes a fence.
    pub(crate) fn update(&mut self, line: &str) -> bool {
        let Some((marker, len, rest)) = fence_marker(line) else {
            return false;
        };

        match *self {
            Self::Outside => {
                // A backtick fence info string cannot contain backticks.
                if marker == '`' && rest.contains('`') {
                    return false;
                }
                *self = Self::Inside { marker, len };
                true
            }
            Self::Inside {
                marker: open,
                len: open_len,
            } => {
                if marker == open && len >= open_len && rest.trim().is_empty() {
                    *self = Self::Outside;
                    true
                } else {
                    false
                }
            }
        }
    }
}

/// Split a fence line into its marker char, run length and trailing text.
///
/// At most three spaces of indentation are allowed; four or more make an
/// indented code block instead.
fn fence_marker(line: &str) -> Option<(char, usize, &str)> {
    let body = line.trim_start_matches(' ');
    if line.len() - body.len() > 3 {
        return None;
    }

    let marker = body.chars().next().filter(|&c| matches!(c, '`' | '~'))?;
    let len = body.len() - body.trim_start_matches(marker).len();
    (len >= 3).then_some((marker, len, &body[len..]))
}
