//! Markdown rendering for StaticPages documentation.
//!
//! The crate's one piece of custom syntax is the `:::terminal` container:
//!
//! ```text
//! :::terminal title="Install"
//! $ brew install staticpages
//! :::
//! ```
//!
//! [`TerminalDirective`] recognizes the opener, scans its attributes, picks a
//! title and emits a `<Terminal>` wrapper element. The [`directive`] module
//! provides the generic container machinery it plugs into, and
//! [`PageRenderer`] runs the whole pipeline through `pulldown-cmark`.
//!
//! # Example
//!
//! ```
//! use sp_renderer::{PageRenderer, TerminalDirective};
//!
//! let result = PageRenderer::new()
//!     .with_container(TerminalDirective::new())
//!     .render(":::terminal title='A & B'\n$ make\n:::\n");
//!
//! assert!(result.html.contains(r#"<Terminal title="A &amp; B">"#));
//! ```

pub mod directive;
mod renderer;
mod terminal;
mod util;

pub use renderer::{PageRenderer, RenderResult, TocEntry};
pub use terminal::{FenceToken, Nesting, TerminalDirective};
pub use util::{escape_html, slugify};
