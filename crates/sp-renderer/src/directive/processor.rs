//! Directive processor for container directives.
//!
//! Rewrites `:::name` ... `:::` blocks line by line before the markdown
//! parser sees the document.

use super::fence::FenceTracker;
use super::indent::{ListContext, indent_width, leading_whitespace, strip_columns};
use super::parser::{ParsedDirective, parse_container_line, strip_name};
use super::{ContainerDirective, DirectiveArgs};

/// A container opened earlier in the document and not yet closed.
struct OpenContainer {
    /// Index of the handling directive, or `None` for a pass-through block.
    handler: Option<usize>,
    /// Line of the opener (1-indexed).
    line: usize,
    /// Leading whitespace of the opener, repeated on the closing markup.
    indent: String,
}

/// Line-based preprocessor for container directives.
///
/// Openers accepted by a registered handler are replaced with the handler's
/// markup; the matching `:::` is replaced with its closing markup. Openers no
/// handler accepts are left untouched, and so are their closers. Lines inside
/// fenced or indented code blocks are never rewritten.
///
/// Markup replacing an indented opener keeps the opener's indentation on
/// every line, so a directive inside a list item stays in that item.
///
/// # Example
///
/// ```
/// use sp_renderer::TerminalDirective;
/// use sp_renderer::directive::DirectiveProcessor;
///
/// let mut processor = DirectiveProcessor::new().with_container(TerminalDirective::new());
/// let output = processor.process(":::terminal Install\nnpm install\n:::");
///
/// assert!(output.contains(r#"<Terminal title="Install">"#));
/// assert!(output.contains("</Terminal>"));
/// ```
#[derive(Default)]
pub struct DirectiveProcessor {
    container_handlers: Vec<Box<dyn ContainerDirective>>,
    fence: FenceTracker,
    lists: ListContext,
    /// Stack of open containers for dispatching `end()` calls.
    active_containers: Vec<OpenContainer>,
    warnings: Vec<String>,
}

impl DirectiveProcessor {
    /// Create a processor with no handlers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a container directive handler.
    ///
    /// Handlers are tried in registration order; the first whose
    /// [`matches`](ContainerDirective::matches) accepts the opener wins.
    #[must_use]
    pub fn with_container<D: ContainerDirective + 'static>(mut self, handler: D) -> Self {
        self.container_handlers.push(Box::new(handler));
        self
    }

    /// Preprocess one document.
    ///
    /// Fence state, list context, open containers and warnings from a
    /// previous call are discarded first.
    #[must_use]
    pub fn process(&mut self, input: &str) -> String {
        self.fence = FenceTracker::new();
        self.lists = ListContext::new();
        self.active_containers.clear();
        self.warnings.clear();

        let mut output = String::with_capacity(input.len());
        let lines: Vec<&str> = input.lines().collect();
        let line_count = lines.len();

        for (idx, line) in lines.iter().enumerate() {
            let processed = self.process_line(line, idx + 1);
            output.push_str(&processed);

            // Preserve line endings
            if idx + 1 < line_count || input.ends_with('\n') {
                output.push('\n');
            }
        }

        self.finalize();

        output
    }

    fn process_line(&mut self, line: &str, line_num: usize) -> String {
        if !self.fence.in_fence() {
            self.lists.update(line);
        }

        // Measure fences and markers from the enclosing list item's content.
        let inner = strip_columns(line, self.lists.content_indent());
        self.fence.update(inner);
        if self.fence.in_fence() || indent_width(inner) > 3 {
            return line.to_owned();
        }

        match parse_container_line(inner) {
            Some(ParsedDirective::ContainerStart { info, .. }) => {
                self.open_container(line, &info, line_num)
            }
            Some(ParsedDirective::ContainerEnd { .. }) => self.close_container(line, line_num),
            None => line.to_owned(),
        }
    }

    fn open_container(&mut self, line: &str, info: &str, line_num: usize) -> String {
        let indent = leading_whitespace(line).to_owned();
        let handler_idx = self
            .container_handlers
            .iter()
            .position(|h| h.matches(info));

        let Some(idx) = handler_idx else {
            self.active_containers.push(OpenContainer {
                handler: None,
                line: line_num,
                indent,
            });
            return line.to_owned();
        };

        let handler = &mut self.container_handlers[idx];
        let args = DirectiveArgs::parse(strip_name(handler.name(), info));
        let html = indent_lines(&handler.start(args, line_num), &indent);

        self.active_containers.push(OpenContainer {
            handler: Some(idx),
            line: line_num,
            indent,
        });
        html
    }

    fn close_container(&mut self, line: &str, line_num: usize) -> String {
        match self.active_containers.pop() {
            Some(OpenContainer {
                handler: Some(idx),
                indent,
                ..
            }) => self.container_handlers[idx]
                .end(line_num)
                .map(|html| indent_lines(&html, &indent))
                .unwrap_or_default(),
            Some(OpenContainer { handler: None, .. }) => line.to_owned(),
            None => {
                self.warnings.push(format!(
                    "line {line_num}: stray ::: with no opening directive"
                ));
                line.to_owned()
            }
        }
    }

    fn finalize(&mut self) {
        for open in self.active_containers.drain(..) {
            if let Some(idx) = open.handler {
                self.warnings.push(format!(
                    "line {}: unclosed container directive :::{} (missing closing :::)",
                    open.line,
                    self.container_handlers[idx].name()
                ));
            }
        }
    }

    /// Warnings generated during the last [`process`](Self::process) call.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

/// Prefix every non-empty line of `html` with `indent`.
fn indent_lines(html: &str, indent: &str) -> String {
    if indent.is_empty() {
        return html.to_owned();
    }
    html.split('\n')
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{indent}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
