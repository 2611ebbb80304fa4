//! Where pages render their output.

use std::io::{self, Write};

/// A page's output target.
///
/// Text passed to [`Surface::write`] is markdown-flavoured: section headings
/// start with `### `, list items with `- `.
pub trait Surface {
    fn title(&mut self, text: &str);
    fn write(&mut self, text: &str);
    fn warning(&mut self, text: &str);
    fn error(&mut self, text: &str);

    /// Input prompt for interactive sessions. Non-interactive surfaces ignore it.
    fn prompt(&mut self, _text: &str) {}
}

/// Plain-text rendering onto a writer, stdout by default.
#[derive(Debug)]
pub struct TerminalSurface<W: Write = io::Stdout> {
    out: W,
}

impl TerminalSurface {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

// Write errors on the terminal are not actionable; output is best-effort.
impl<W: Write> Surface for TerminalSurface<W> {
    fn title(&mut self, text: &str) {
        let _ = writeln!(self.out, "\n{}\n", text);
    }

    fn write(&mut self, text: &str) {
        let _ = match text.strip_prefix("### ") {
            Some(heading) => writeln!(self.out, "\n{}", heading),
            None => writeln!(self.out, "{}", text),
        };
    }

    fn warning(&mut self, text: &str) {
        let _ = writeln!(self.out, "⚠ {}", text);
    }

    fn error(&mut self, text: &str) {
        let _ = writeln!(self.out, "✖ {}", text);
    }

    fn prompt(&mut self, text: &str) {
        let _ = write!(self.out, "{}", text);
        let _ = self.out.flush();
    }
}

/// One item rendered onto a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Title(String),
    Text(String),
    Warning(String),
    Error(String),
}

/// Keeps everything rendered, in order. Used by tests and by embedders that
/// want the page as data.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub items: Vec<Rendered>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_blank(&self) -> bool {
        self.items.is_empty()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter_map(|item| match item {
                Rendered::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn warnings(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter_map(|item| match item {
                Rendered::Warning(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter_map(|item| match item {
                Rendered::Error(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl Surface for RecordingSurface {
    fn title(&mut self, text: &str) {
        self.items.push(Rendered::Title(text.to_string()));
    }

    fn write(&mut self, text: &str) {
        self.items.push(Rendered::Text(text.to_string()));
    }

    fn warning(&mut self, text: &str) {
        self.items.push(Rendered::Warning(text.to_string()));
    }

    fn error(&mut self, text: &str) {
        self.items.push(Rendered::Error(text.to_string()));
    }
}
