//! The `:::terminal` container directive.
//!
//! ```text
//! :::terminal title="Install"
//! $ npm install
//! :::
//! ```
//!
//! renders as a `<Terminal title="Install">` wrapper around the rendered body.
//! The title comes from a `title` attribute, falling back to any free text
//! after the keyword.

use crate::directive::{ContainerDirective, DirectiveArgs, is_directive};
use crate::util::escape_html;

/// Whether a fence token opens or closes the block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Nesting {
    Open,
    Close,
}

/// One `:::terminal` or `:::` delimiter line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FenceToken {
    /// Text after the `terminal` keyword. Always empty for [`Nesting::Close`].
    pub info: String,
    pub nesting: Nesting,
}

impl FenceToken {
    /// An opening token with the text following the keyword.
    #[must_use]
    pub fn open(info: impl Into<String>) -> Self {
        Self {
            info: info.into(),
            nesting: Nesting::Open,
        }
    }

    /// A closing token.
    #[must_use]
    pub fn close() -> Self {
        Self {
            info: String::new(),
            nesting: Nesting::Close,
        }
    }
}

/// Renderer for `:::terminal` blocks.
///
/// Rendering is a pure function of the token and the configured element and
/// attribute names; nothing is remembered between the opener and the closer.
///
/// # Example
///
/// ```
/// use sp_renderer::TerminalDirective;
///
/// let terminal = TerminalDirective::new();
/// assert_eq!(
///     terminal.render_open(r#"title="Shell" extra"#),
///     "\n<Terminal title=\"Shell\">\n"
/// );
/// assert_eq!(terminal.render_open(""), "\n<Terminal>\n");
/// assert_eq!(terminal.render_close(), "\n</Terminal>\n");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerminalDirective {
    element: String,
    title_attr: String,
}

impl Default for TerminalDirective {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalDirective {
    /// Directive keyword.
    pub const NAME: &'static str = "terminal";
    /// Default wrapper element.
    pub const DEFAULT_ELEMENT: &'static str = "Terminal";
    /// Default attribute carrying the title on the wrapper element.
    pub const DEFAULT_TITLE_ATTR: &'static str = "title";

    #[must_use]
    pub fn new() -> Self {
        Self {
            element: Self::DEFAULT_ELEMENT.to_owned(),
            title_attr: Self::DEFAULT_TITLE_ATTR.to_owned(),
        }
    }

    /// Set the wrapper element name.
    #[must_use]
    pub fn with_element(mut self, element: impl Into<String>) -> Self {
        self.element = element.into();
        self
    }

    /// Set the wrapper attribute that carries the title.
    ///
    /// The title is still read from the `title` attribute in the source.
    #[must_use]
    pub fn with_title_attr(mut self, title_attr: impl Into<String>) -> Self {
        self.title_attr = title_attr.into();
        self
    }

    /// Wrapper element name.
    #[must_use]
    pub fn element(&self) -> &str {
        &self.element
    }

    /// Whether an opener info string (text after the colons) is a terminal
    /// directive.
    #[must_use]
    pub fn recognize(info: &str) -> bool {
        is_directive(Self::NAME, info)
    }

    /// Pick the title: a non-empty `title` attribute, then non-empty
    /// positional text. Returned unescaped.
    #[must_use]
    pub fn resolve_title(args: &DirectiveArgs) -> Option<&str> {
        args.get_non_empty("title")
            .or_else(|| Some(args.positional.as_str()).filter(|p| !p.is_empty()))
    }

    /// Render either side of the block.
    #[must_use]
    pub fn render(&self, token: &FenceToken) -> String {
        match token.nesting {
            Nesting::Open => self.render_open(&token.info),
            Nesting::Close => self.render_close(),
        }
    }

    /// Render the opening wrapper for the text following the keyword.
    #[must_use]
    pub fn render_open(&self, info: &str) -> String {
        self.open_tag(&DirectiveArgs::parse(info))
    }

    /// Render the closing wrapper.
    #[must_use]
    pub fn render_close(&self) -> String {
        format!("\n</{}>\n", self.element)
    }

    fn open_tag(&self, args: &DirectiveArgs) -> String {
        match Self::resolve_title(args) {
            Some(title) => format!(
                "\n<{} {}=\"{}\">\n",
                self.element,
                self.title_attr,
                escape_html(title)
            ),
            None => format!("\n<{}>\n", self.element),
        }
    }
}

impl ContainerDirective for TerminalDirective {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn start(&mut self, args: DirectiveArgs, _line: usize) -> String {
        self.open_tag(&args)
    }

    fn end(&mut self, _line: usize) -> Option<String> {
        Some(self.render_close())
    }
}
