use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io::Write;

use crate::theme::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Clock,
    Date,
    Holiday
}

impl Region {
    pub fn label(&self) -> &'static str {
        match self {
            Region::Clock => "clock",
            Region::Date => "date",
            Region::Holiday => "holiday-display"
        }
    }
}

/// Where rendered strings end up. Writing replaces the region's previous content.
pub trait DisplaySink {
    fn set_text(&self, region: Region, text: &str);

    /// `markup` may contain inline HTML such as `<strong>`.
    fn set_markup(&self, region: Region, markup: &str);

    fn set_theme(&self, theme: Theme);
}

/// Keeps the last content of every region. Used by tests and `--once`.
#[derive(Default)]
pub struct MemoryDisplay {
    contents: RefCell<HashMap<Region, String>>,
    writes: RefCell<HashMap<Region, usize>>,
    theme: Cell<Option<Theme>>
}

impl MemoryDisplay {
    pub fn new() -> MemoryDisplay {
        MemoryDisplay::default()
    }

    pub fn content(&self, region: Region) -> Option<String> {
        self.contents.borrow().get(&region).cloned()
    }

    /// How many times `region` has been written.
    pub fn writes(&self, region: Region) -> usize {
        self.writes.borrow().get(&region).copied().unwrap_or(0)
    }

    pub fn theme(&self) -> Option<Theme> {
        self.theme.get()
    }

    fn store(&self, region: Region, content: &str) {
        self.contents.borrow_mut().insert(region, content.to_owned());
        *self.writes.borrow_mut().entry(region).or_insert(0) += 1;
    }
}

impl DisplaySink for MemoryDisplay {
    fn set_text(&self, region: Region, text: &str) {
        self.store(region, text);
    }

    fn set_markup(&self, region: Region, markup: &str) {
        self.store(region, markup);
    }

    fn set_theme(&self, theme: Theme) {
        self.theme.set(Some(theme));
    }
}

/// Drops everything between `<` and `>`.
pub fn strip_tags(markup: &str) -> String {
    let mut text = String::with_capacity(markup.len());
    let mut in_tag = false;
    for c in markup.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    text
}

/// Writes one `region: content` line per update.
pub struct TerminalDisplay<W: Write> {
    out: RefCell<W>
}

impl TerminalDisplay<std::io::Stdout> {
    pub fn stdout() -> TerminalDisplay<std::io::Stdout> {
        TerminalDisplay::new(std::io::stdout())
    }
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W) -> TerminalDisplay<W> {
        TerminalDisplay { out: RefCell::new(out) }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn line(&self, label: &str, content: &str) {
        let mut out = self.out.borrow_mut();
        if let Err(error) = writeln!(out, "{}: {}", label, content).and_then(|_| out.flush()) {
            tracing::warn!(%error, "terminal display write failed");
        }
    }
}

impl<W: Write> DisplaySink for TerminalDisplay<W> {
    fn set_text(&self, region: Region, text: &str) {
        self.line(region.label(), text);
    }

    fn set_markup(&self, region: Region, markup: &str) {
        self.line(region.label(), &strip_tags(markup));
    }

    fn set_theme(&self, theme: Theme) {
        self.line("data-theme", &format!("{} ({})", theme, theme.background_color()));
    }
}
