//! Colored terminal status output.

use std::path::Path;

use console::{Style, Term};

/// Status line writer on stderr.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
    dim: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            dim: Style::new().dim(),
        }
    }

    fn styled(&self, style: &Style, msg: &str) {
        let _ = self.term.write_line(&style.apply_to(msg).to_string());
    }

    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    pub(crate) fn success(&self, msg: &str) {
        self.styled(&self.green, msg);
    }

    pub(crate) fn error(&self, msg: &str) {
        self.styled(&self.red, msg);
    }

    /// Print one rendered page as `source -> target`.
    pub(crate) fn rendered(&self, source: &Path, target: &Path) {
        self.styled(
            &self.dim,
            &format!("  {} -> {}", source.display(), target.display()),
        );
    }

    /// Print directive warnings for a page, prefixed with its path.
    pub(crate) fn page_warnings(&self, path: &Path, warnings: &[String]) {
        for warning in warnings {
            self.styled(
                &self.yellow,
                &format!("warning: {}: {warning}", path.display()),
            );
        }
    }
}
