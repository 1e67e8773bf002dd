//! Container directives for markdown: `:::name` ... `:::`.
//!
//! # Architecture
//!
//! [`DirectiveProcessor`] runs before the markdown parser. It walks the
//! document line by line, skipping fenced and indented code, and hands every
//! container opener to the first registered [`ContainerDirective`] whose
//! recognizer accepts it. The handler receives the opener's text scanned into
//! [`DirectiveArgs`] and returns markup that replaces the opener line; the
//! matching `:::` line is replaced with the handler's closing markup.
//!
//! Handlers emit HTML padded with blank lines so the markdown parser treats
//! it as an HTML block and keeps parsing the container body as markdown. An
//! indented opener (inside a list item, say) has its indentation copied onto
//! the markup.
//!
//! # Example
//!
//! ```
//! use sp_renderer::directive::{ContainerDirective, DirectiveArgs, DirectiveProcessor};
//!
//! struct Aside;
//!
//! impl ContainerDirective for Aside {
//!     fn name(&self) -> &str { "aside" }
//!
//!     fn start(&mut self, _args: DirectiveArgs, _line: usize) -> String {
//!         "\n<aside>\n".to_owned()
//!     }
//!
//!     fn end(&mut self, _line: usize) -> Option<String> {
//!         Some("\n</aside>\n".to_owned())
//!     }
//! }
//!
//! let mut processor = DirectiveProcessor::new().with_container(Aside);
//! let output = processor.process(":::aside\nSide note.\n:::");
//! assert_eq!(output, "\n<aside>\n\nSide note.\n\n</aside>\n");
//! ```

mod args;
mod container;
mod fence;
mod indent;
mod parser;
mod processor;

pub use args::DirectiveArgs;
pub use container::ContainerDirective;
pub use parser::is_directive;
pub use processor::DirectiveProcessor;
