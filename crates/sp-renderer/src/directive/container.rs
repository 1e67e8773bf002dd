//! Container directive trait.
//!
//! Container directives use triple-colon syntax: `:::name` ... `:::`

use super::{DirectiveArgs, is_directive};

/// Handler for container directives: `:::name` ... `:::`
///
/// A handler is registered with
/// [`DirectiveProcessor::with_container`](super::DirectiveProcessor::with_container)
/// and supplies three things: its [`name`](Self::name), a recognizer
/// ([`matches`](Self::matches)) deciding whether an opener belongs to it, and
/// the [`start`](Self::start)/[`end`](Self::end) renderers.
///
/// Handlers implement `Send` only (not `Sync`) since each document gets its
/// own processor instance.
///
/// # Example
///
/// ```
/// use sp_renderer::directive::{ContainerDirective, DirectiveArgs};
///
/// struct NoteDirective;
///
/// impl ContainerDirective for NoteDirective {
///     fn name(&self) -> &str { "note" }
///
///     fn start(&mut self, args: DirectiveArgs, _line: usize) -> String {
///         let title = if args.positional.is_empty() { "Note" } else { &args.positional };
///         format!("\n<div class=\"note\" data-title=\"{title}\">\n")
///     }
///
///     fn end(&mut self, _line: usize) -> Option<String> {
///         Some("\n</div>\n".to_owned())
///     }
/// }
/// ```
pub trait ContainerDirective: Send {
    /// Directive name matched against `:::name`.
    fn name(&self) -> &str;

    /// Whether the opener info text (everything after the colons) belongs to
    /// this directive.
    ///
    /// Defaults to [`is_directive`] with [`name`](Self::name).
    fn matches(&self, info: &str) -> bool {
        is_directive(self.name(), info)
    }

    /// Markup replacing the opener. `args` is scanned from the text after
    /// the name.
    fn start(&mut self, args: DirectiveArgs, line: usize) -> String;

    /// Handle the closing `:::` of a block this handler opened.
    ///
    /// Returns closing markup, or `None` to emit nothing.
    fn end(&mut self, line: usize) -> Option<String>;
}
