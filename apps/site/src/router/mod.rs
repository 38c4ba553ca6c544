//! # Router
//!
//! Owns the [`NavigationState`] and keeps it and the address bar in step.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  start()            location ──decode──► state ──canonical──► replace  │
//! │                                                                         │
//! │  navigate_to()      state.navigate_to ──► scroll_to_top                 │
//! │  select_article()                     └─► canonical URL                 │
//! │  select_product()                           differs? ──► push_state     │
//! │                                                                         │
//! │  handle_pop_state() location ──decode──► state (full replace)           │
//! │                                         canonical differs? ──► replace  │
//! │                                                                         │
//! │  view(catalog)      resolve(state, catalog) ──► View                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Inbound sync happens in `start`, before any outbound sync: navigation
//! requested earlier changes the state but never touches history. Initial
//! load and pop-state share one decoder, so a URL always yields the same
//! state however it was reached.

pub mod window;

use tracing::{debug, info};
use url::Url;

use sanivita_core::query::{canonical_url, decode_url};
use sanivita_core::{
    resolve, Article, ContentCatalog, NavigateOptions, NavigationState, Page, Product, View,
};

pub use window::{BrowserWindow, MemoryWindow};

/// Navigation controller bound to one browser window.
#[derive(Debug)]
pub struct Router<W> {
    window: W,
    state: NavigationState,
    started: bool,
}

impl<W: BrowserWindow> Router<W> {
    /// A router on home. Nothing is read from the window until [`start`].
    ///
    /// [`start`]: Router::start
    pub fn new(window: W) -> Self {
        Router {
            window,
            state: NavigationState::home(),
            started: false,
        }
    }

    /// Adopts the state in the current address and rewrites the address to
    /// its canonical form without adding a history entry.
    pub fn start(&mut self) {
        let location = self.window.location();
        self.state = decode_url(&location);
        self.started = true;

        self.replace_if_not_canonical(&location);
        info!(
            page = %self.state.current_page(),
            url = %self.window.location(),
            "Router started"
        );
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn window(&self) -> &W {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut W {
        &mut self.window
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Shows `page`. See [`NavigationState::navigate_to`] for selection rules.
    pub fn navigate_to(&mut self, page: Page, options: NavigateOptions) {
        self.state.navigate_to(page, options);
        self.after_navigation();
    }

    /// Opens the detail page of `article`.
    pub fn select_article(&mut self, article: &Article) {
        self.state.select_article(article);
        self.after_navigation();
    }

    /// Opens the detail page of `product`.
    pub fn select_product(&mut self, product: &Product) {
        self.state.select_product(product);
        self.after_navigation();
    }

    fn after_navigation(&mut self) {
        debug!(
            page = %self.state.current_page(),
            article = ?self.state.selected_article_id(),
            product = ?self.state.selected_product_id(),
            "Navigated"
        );
        self.window.scroll_to_top();
        self.sync_url();
    }

    /// Back/forward: re-derives the state from the address the window now
    /// shows. Never pushes.
    pub fn handle_pop_state(&mut self) {
        if !self.started {
            return;
        }

        let location = self.window.location();
        self.state.replace(decode_url(&location));
        debug!(page = %self.state.current_page(), url = %location, "Pop state");

        self.replace_if_not_canonical(&location);
    }

    // =========================================================================
    // URL Sync
    // =========================================================================

    /// Pushes the canonical URL of the current state if the address bar
    /// shows something else. Returns true if an entry was pushed.
    pub fn sync_url(&mut self) -> bool {
        if !self.started {
            debug!("URL sync skipped before start");
            return false;
        }

        let location = self.window.location();
        let canonical = canonical_url(&location, &self.state);
        if canonical == location {
            return false;
        }

        debug!(url = %canonical, "Pushing history entry");
        self.window.push_state(canonical);
        true
    }

    fn replace_if_not_canonical(&mut self, location: &Url) {
        let canonical = canonical_url(location, &self.state);
        if &canonical != location {
            debug!(from = %location, to = %canonical, "Canonicalizing address");
            self.window.replace_state(canonical);
        }
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// The view for the current state.
    pub fn view<'a, C>(&self, catalog: &'a C) -> View<'a>
    where
        C: ContentCatalog + ?Sized,
    {
        resolve(&self.state, catalog)
    }

    /// Document title for the current state.
    pub fn title<C>(&self, catalog: &C) -> String
    where
        C: ContentCatalog + ?Sized,
    {
        self.view(catalog).title()
    }
}
