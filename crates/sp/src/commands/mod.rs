//! CLI command implementations.

mod build;
mod render;

pub(crate) use build::BuildArgs;
pub(crate) use render::RenderArgs;

use sp_config::Config;
use sp_renderer::{PageRenderer, TerminalDirective};

/// Build a page renderer with the `terminal` directive configured from `config`.
pub(crate) fn page_renderer(config: &Config) -> PageRenderer {
    let terminal = TerminalDirective::new()
        .with_element(&config.terminal.element)
        .with_title_attr(&config.terminal.title_attr);

    let renderer = PageRenderer::new()
        .with_container(terminal)
        .with_gfm(config.markdown.gfm);

    if config.markdown.extract_title {
        renderer.with_title_extraction()
    } else {
        renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_renderer_uses_terminal_config() {
        let mut config = Config::default();
        config.terminal.element = "sp-terminal".to_owned();
        config.terminal.title_attr = "data-title".to_owned();

        let result = page_renderer(&config).render(":::terminal Shell\nls\n:::\n");

        assert!(result.html.contains(r#"<sp-terminal data-title="Shell">"#));
        assert!(result.html.contains("</sp-terminal>"));
    }

    #[test]
    fn test_page_renderer_title_extraction_toggle() {
        let mut config = Config::default();
        assert!(config.markdown.extract_title);
        assert_eq!(
            page_renderer(&config).render("# Intro\n").title.as_deref(),
            Some("Intro")
        );

        config.markdown.extract_title = false;
        assert_eq!(page_renderer(&config).render("# Intro\n").title, None);
    }
}
