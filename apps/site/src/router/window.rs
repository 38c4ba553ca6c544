//! # Browser Window
//!
//! The slice of the browser the router talks to: the address bar, the
//! session history stack and the scroll position.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  MemoryWindow history                                                   │
//! │                                                                         │
//! │   entries:  [ /          , /?page=products , /?page=articles ]          │
//! │                                                  ▲ index                │
//! │                                                                         │
//! │   push_state     drop entries after index, append, move to it          │
//! │   replace_state  overwrite the entry at index                          │
//! │   back/forward   move index (the caller then delivers pop-state)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use url::Url;

/// Address bar, history stack and scrolling.
pub trait BrowserWindow {
    /// The current address.
    fn location(&self) -> Url;

    /// Adds a history entry and makes it current.
    fn push_state(&mut self, url: Url);

    /// Rewrites the current history entry.
    fn replace_state(&mut self, url: Url);

    fn scroll_to_top(&mut self);
}

/// In-process session history, for the CLI and for tests.
#[derive(Debug, Clone)]
pub struct MemoryWindow {
    entries: Vec<Url>,
    index: usize,
    pushes: usize,
    replaces: usize,
    scrolls: usize,
}

impl MemoryWindow {
    /// A fresh tab opened at `url`.
    pub fn new(url: Url) -> Self {
        MemoryWindow {
            entries: vec![url],
            index: 0,
            pushes: 0,
            replaces: 0,
            scrolls: 0,
        }
    }

    /// The visitor typed `url` into the address bar: a new entry that the
    /// router did not push.
    pub fn visit(&mut self, url: Url) {
        self.entries.truncate(self.index + 1);
        self.entries.push(url);
        self.index = self.entries.len() - 1;
    }

    /// Moves one entry back. Returns false at the start of history.
    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Moves one entry forward. Returns false at the end of history.
    pub fn forward(&mut self) -> bool {
        if self.index + 1 >= self.entries.len() {
            return false;
        }
        self.index += 1;
        true
    }

    pub fn entries(&self) -> &[Url] {
        &self.entries
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Entries added through [`BrowserWindow::push_state`].
    pub fn push_count(&self) -> usize {
        self.pushes
    }

    pub fn replace_count(&self) -> usize {
        self.replaces
    }

    pub fn scroll_count(&self) -> usize {
        self.scrolls
    }
}

impl BrowserWindow for MemoryWindow {
    fn location(&self) -> Url {
        self.entries[self.index].clone()
    }

    fn push_state(&mut self, url: Url) {
        self.visit(url);
        self.pushes += 1;
    }

    fn replace_state(&mut self, url: Url) {
        self.entries[self.index] = url;
        self.replaces += 1;
    }

    fn scroll_to_top(&mut self) {
        self.scrolls += 1;
    }
}
