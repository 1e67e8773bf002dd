//! Page renderer: directive preprocessing followed by `pulldown-cmark`.

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd};

use crate::directive::{ContainerDirective, DirectiveProcessor};
use crate::util::{HeadingIds, heading_level_to_num};

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TocEntry {
    /// Heading level (1-6).
    pub level: u8,
    /// Heading text.
    pub title: String,
    /// Anchor ID for linking.
    pub id: String,
}

/// Result of rendering one page.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RenderResult {
    /// Rendered HTML.
    pub html: String,
    /// Title extracted from the first H1 heading (if title extraction is enabled).
    pub title: Option<String>,
    /// Table of contents entries.
    pub toc: Vec<TocEntry>,
    /// Warnings from directive processing (stray or unclosed containers).
    pub warnings: Vec<String>,
}

/// Markdown page renderer with container directive support.
///
/// # Example
///
/// ```
/// use sp_renderer::{PageRenderer, TerminalDirective};
///
/// let mut renderer = PageRenderer::new()
///     .with_container(TerminalDirective::new())
///     .with_title_extraction();
///
/// let result = renderer.render("# Setup\n\n:::terminal Install\n`npm install`\n:::\n");
///
/// assert_eq!(result.title.as_deref(), Some("Setup"));
/// assert!(result.html.contains(r#"<Terminal title="Install">"#));
/// assert!(result.html.contains("<code>npm install</code>"));
/// ```
pub struct PageRenderer {
    processor: DirectiveProcessor,
    gfm: bool,
    extract_title: bool,
}

impl Default for PageRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PageRenderer {
    /// Create a renderer with GFM enabled and no directives.
    #[must_use]
    pub fn new() -> Self {
        Self {
            processor: DirectiveProcessor::new(),
            gfm: true,
            extract_title: false,
        }
    }

    /// Register a container directive handler.
    #[must_use]
    pub fn with_container<D: ContainerDirective + 'static>(mut self, handler: D) -> Self {
        self.processor = self.processor.with_container(handler);
        self
    }

    /// Enable or disable GitHub Flavored Markdown features.
    ///
    /// GFM is enabled by default. When enabled, the parser supports:
    /// - Tables
    /// - Strikethrough (`~~text~~`)
    /// - Task lists (`- [ ] item`)
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Extract the first H1 as the page title. It is still rendered but left
    /// out of the table of contents.
    #[must_use]
    pub fn with_title_extraction(mut self) -> Self {
        self.extract_title = true;
        self
    }

    /// Get parser options based on GFM configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }

    /// Render one markdown document.
    pub fn render(&mut self, markdown: &str) -> RenderResult {
        let preprocessed = self.processor.process(markdown);
        let mut events: Vec<Event<'_>> =
            Parser::new_ext(&preprocessed, self.parser_options()).collect();

        let (title, toc) = self.assign_heading_ids(&mut events);

        let mut html = String::with_capacity(preprocessed.len() * 3 / 2);
        pulldown_cmark::html::push_html(&mut html, events.into_iter());

        RenderResult {
            html,
            title,
            toc,
            warnings: self.processor.warnings().to_vec(),
        }
    }

    /// Give every heading an anchor id and collect the title and TOC.
    fn assign_heading_ids(&self, events: &mut [Event<'_>]) -> (Option<String>, Vec<TocEntry>) {
        let mut ids = HeadingIds::default();
        let mut title = None;
        let mut toc = Vec::new();
        // Index of the open heading's start event and its text so far.
        let mut current: Option<(usize, String)> = None;

        for idx in 0..events.len() {
            match &events[idx] {
                Event::Start(Tag::Heading { .. }) => current = Some((idx, String::new())),
                Event::Text(text) | Event::Code(text) => {
                    if let Some((_, buf)) = current.as_mut() {
                        buf.push_str(text);
                    }
                }
                Event::End(TagEnd::Heading(level)) => {
                    let Some((start, text)) = current.take() else {
                        continue;
                    };
                    let level = heading_level_to_num(*level);
                    let text = text.trim().to_owned();

                    let Event::Start(Tag::Heading { id, .. }) = &mut events[start] else {
                        continue;
                    };
                    if id.is_none() {
                        *id = Some(CowStr::from(ids.next(&text)));
                    }
                    let anchor = id.as_deref().unwrap_or_default().to_owned();

                    if self.extract_title && level == 1 && title.is_none() {
                        title = Some(text);
                    } else {
                        toc.push(TocEntry {
                            level,
                            title: text,
                            id: anchor,
                        });
                    }
                }
                _ => {}
            }
        }

        (title, toc)
    }
}
