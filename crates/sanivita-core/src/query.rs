//! # Query Codec
//!
//! Bidirectional mapping between [`NavigationState`] and the two address-bar
//! parameters `page` and `id`.
//!
//! ## Canonical Form
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  NavigationState                          Canonical query               │
//! │  ─────────────────────────────────────    ───────────────────────────   │
//! │  Home                                     (no query)                    │
//! │  ArticleDetail, article "42"              ?page=article_detail&id=42    │
//! │  ProductDetail, product "3"               ?page=product_detail&id=3     │
//! │  ArticleDetail, nothing selected          ?page=articles                │
//! │  ProductDetail, nothing selected          ?page=products                │
//! │  any other page                           ?page=<token>                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Decoding
//! ```text
//!   ?page=article_detail&id=X  ──► ArticleDetail(X)
//!   ?page=product_detail&id=X  ──► ProductDetail(X)
//!   ?page=<known, not detail>  ──► that page
//!   detail without id          ──► its list page
//!   unknown / missing page     ──► Home
//! ```
//!
//! Encoding is deterministic, and `decode(encode(s)) == s` for every state
//! the encoder can produce without loss (detail pages with a selection and
//! all non-detail pages). Existence of the referenced entity is not checked
//! here; that is the resolver's job.

use url::form_urlencoded;
use url::Url;

use crate::navigation::NavigationState;
use crate::page::Page;

/// Name of the page parameter.
pub const PAGE_PARAM: &str = "page";

/// Name of the entity id parameter.
pub const ID_PARAM: &str = "id";

/// The `page` / `id` pair read from or written to a URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pub page: Option<String>,
    pub id: Option<String>,
}

impl QueryParams {
    /// Reads the parameters from a raw query string (without the `?`).
    ///
    /// Only the first occurrence of each parameter counts; other
    /// parameters are ignored.
    pub fn from_query(query: &str) -> Self {
        let mut params = QueryParams::default();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                PAGE_PARAM if params.page.is_none() => params.page = Some(value.into_owned()),
                ID_PARAM if params.id.is_none() => params.id = Some(value.into_owned()),
                _ => {}
            }
        }

        params
    }

    /// Reads the parameters from a full URL.
    pub fn from_url(url: &Url) -> Self {
        QueryParams::from_query(url.query().unwrap_or(""))
    }

    /// Returns true if neither parameter is set.
    pub fn is_empty(&self) -> bool {
        self.page.is_none() && self.id.is_none()
    }

    /// The non-empty `id`, if any. An empty `id=` counts as absent.
    fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    /// Renders the pairs as a query string, `page` first.
    pub fn to_query_string(&self) -> String {
        let mut out = form_urlencoded::Serializer::new(String::new());
        if let Some(page) = &self.page {
            out.append_pair(PAGE_PARAM, page);
        }
        if let Some(id) = &self.id {
            out.append_pair(ID_PARAM, id);
        }
        out.finish()
    }
}

/// Encodes a navigation state into its canonical parameters.
pub fn encode(state: &NavigationState) -> QueryParams {
    let page = state.current_page();

    let selected = match page {
        Page::ArticleDetail => state.selected_article_id(),
        Page::ProductDetail => state.selected_product_id(),
        _ => None,
    };

    match (page, selected) {
        (Page::Home, _) => QueryParams::default(),
        (detail, Some(id)) if detail.is_detail() => QueryParams {
            page: Some(detail.as_str().to_string()),
            id: Some(id.to_string()),
        },
        (other, _) => {
            // A detail page with nothing selected renders its list; the URL
            // says so, keeping reloads on the same view.
            QueryParams {
                page: Some(other.list_page().as_str().to_string()),
                id: None,
            }
        }
    }
}

/// Decodes parameters into a navigation state. Never fails.
pub fn decode(params: &QueryParams) -> NavigationState {
    let page = params.page.as_deref().and_then(|token| token.parse::<Page>().ok());

    match (page, params.id()) {
        (Some(Page::ArticleDetail), Some(id)) => NavigationState::article(id),
        (Some(Page::ProductDetail), Some(id)) => NavigationState::product(id),
        (Some(page), _) => NavigationState::page(page.list_page()),
        (None, _) => NavigationState::home(),
    }
}

/// Decodes the state carried by a full URL.
pub fn decode_url(url: &Url) -> NavigationState {
    decode(&QueryParams::from_url(url))
}

/// Builds the canonical URL for `state`, starting from `current`.
///
/// The existing query is dropped entirely; scheme, host, path and fragment
/// are kept.
pub fn canonical_url(current: &Url, state: &NavigationState) -> Url {
    let mut url = current.clone();
    url.set_query(None);

    let params = encode(state);
    if !params.is_empty() {
        url.set_query(Some(&params.to_query_string()));
    }

    url
}
