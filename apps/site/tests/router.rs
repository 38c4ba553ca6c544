//! Navigation scenarios, driven through the router and an in-memory window.

use url::Url;

use sanivita_core::{Catalog, NavigateOptions, NavigationState, Page, View};
use sanivita_site::{BrowserWindow, MemoryWindow, Router};
use sanivita_store::seed;

const BASE: &str = "https://sanivita.example/";

fn url(query: &str) -> Url {
    Url::parse(BASE).unwrap().join(query).unwrap()
}

fn started(query: &str) -> Router<MemoryWindow> {
    let mut router = Router::new(MemoryWindow::new(url(query)));
    router.start();
    router
}

fn catalog_with_article_42() -> Catalog {
    let mut catalog = seed::catalog();
    let mut article = catalog.articles[0].clone();
    article.id = "42".to_string();
    article.title = "فوائد فيتامين د".to_string();
    catalog.articles.push(article);
    catalog
}

#[test]
fn article_deep_link_selects_article() {
    let catalog = catalog_with_article_42();
    let router = started("?page=article_detail&id=42");

    assert_eq!(router.state(), &NavigationState::article("42"));
    match router.view(&catalog) {
        View::ArticleDetail { article } => assert_eq!(article.id, "42"),
        other => panic!("expected article detail, got {:?}", other.page()),
    }
    assert_eq!(router.title(&catalog), "فوائد فيتامين د | SaniVita Pharma");
    assert_eq!(router.window().push_count(), 0);
    assert_eq!(router.window().replace_count(), 0);
}

#[test]
fn unknown_article_falls_back_to_articles_list() {
    let catalog = catalog_with_article_42();
    let router = started("?page=article_detail&id=999");

    assert_eq!(router.state().selected_article_id(), Some("999"));
    assert!(matches!(router.view(&catalog), View::Articles { .. }));
}

#[test]
fn no_query_is_home() {
    let catalog = seed::catalog();
    let router = started("");

    assert_eq!(router.state(), &NavigationState::home());
    assert!(matches!(router.view(&catalog), View::Home { .. }));
    assert_eq!(router.title(&catalog), "الرئيسية | SaniVita Pharma");
}

#[test]
fn unrecognized_page_is_home_and_address_is_cleaned() {
    let router = started("?page=pharmacy&id=3");

    assert_eq!(router.state(), &NavigationState::home());
    assert_eq!(router.window().location(), url(""));
    assert_eq!(router.window().entries().len(), 1);
}

#[test]
fn home_products_articles_pushes_two_entries() {
    let mut router = started("");

    router.navigate_to(Page::Products, NavigateOptions::default());
    assert_eq!(router.window().location().query(), Some("page=products"));

    router.navigate_to(Page::Articles, NavigateOptions::default());
    assert_eq!(router.window().location().query(), Some("page=articles"));

    assert_eq!(router.window().push_count(), 2);
    assert_eq!(router.window().entries().len(), 3);
    assert_eq!(router.window().scroll_count(), 2);
}

#[test]
fn syncing_twice_adds_one_entry() {
    let mut router = started("");
    router.navigate_to(Page::About, NavigateOptions::default());

    assert!(!router.sync_url());
    assert!(!router.sync_url());
    assert_eq!(router.window().push_count(), 1);
}

#[test]
fn back_from_product_to_unrecognized_url_resets_to_home() {
    let catalog = seed::catalog();
    let mut window = MemoryWindow::new(url(""));
    window.visit(url("?page=somewhere-else"));
    window.visit(url("?page=product_detail&id=3"));

    let mut router = Router::new(window);
    router.start();
    assert_eq!(router.state(), &NavigationState::product("3"));

    assert!(router.window_mut().back());
    router.handle_pop_state();

    assert_eq!(router.state().current_page(), Page::Home);
    assert_eq!(router.state().selected_article_id(), None);
    assert_eq!(router.state().selected_product_id(), None);
    assert!(matches!(router.view(&catalog), View::Home { .. }));
    assert_eq!(router.window().push_count(), 0);
}

#[test]
fn pop_state_pushes_nothing() {
    let mut router = started("");
    router.navigate_to(Page::Products, NavigateOptions::default());
    router.navigate_to(Page::Contact, NavigateOptions::default());

    router.window_mut().back();
    router.handle_pop_state();
    assert_eq!(router.state().current_page(), Page::Products);

    router.window_mut().forward();
    router.handle_pop_state();
    assert_eq!(router.state().current_page(), Page::Contact);

    assert_eq!(router.window().push_count(), 2);
    assert_eq!(router.window().entries().len(), 3);
}

#[test]
fn selecting_a_product_clears_article_selection() {
    let catalog = seed::catalog();
    let mut router = started("?page=article_detail&id=1");

    let product = catalog.products[2].clone();
    router.select_product(&product);

    assert_eq!(router.state().selected_article_id(), None);
    assert_eq!(router.state().selected_product_id(), Some(product.id.as_str()));
    assert_eq!(
        router.window().location(),
        url(&format!("?page=product_detail&id={}", product.id))
    );
    match router.view(&catalog) {
        View::ProductDetail { product: shown } => assert_eq!(shown.id, product.id),
        other => panic!("expected product detail, got {:?}", other.page()),
    }
}

#[test]
fn every_plain_page_round_trips_through_the_address_bar() {
    for page in Page::ALL.into_iter().filter(|p| !p.is_detail()) {
        let mut router = started("");
        router.navigate_to(page, NavigateOptions::default());

        let reloaded = started(router.window().location().as_str());
        assert_eq!(reloaded.state(), router.state(), "page {page}");
    }
}

#[test]
fn detail_round_trips_for_existing_entities() {
    let catalog = seed::catalog();

    for article in &catalog.articles {
        let mut router = started("");
        router.select_article(article);
        let reloaded = started(router.window().location().as_str());
        assert_eq!(reloaded.state(), &NavigationState::article(article.id.clone()));
    }

    for product in &catalog.products {
        let mut router = started("");
        router.select_product(product);
        let reloaded = started(router.window().location().as_str());
        assert_eq!(reloaded.state(), &NavigationState::product(product.id.clone()));
    }
}

#[test]
fn detail_without_selection_shows_list_and_links_to_it() {
    let catalog = seed::catalog();
    let mut router = started("");
    router.navigate_to(Page::ProductDetail, NavigateOptions::default());

    assert_eq!(router.state().current_page(), Page::ProductDetail);
    assert!(matches!(router.view(&catalog), View::Products { .. }));
    assert_eq!(router.window().location().query(), Some("page=products"));
}

#[test]
fn detail_link_without_id_opens_list_and_is_rewritten() {
    let catalog = seed::catalog();

    let router = started("?page=article_detail");
    assert_eq!(router.state(), &NavigationState::page(Page::Articles));
    assert!(matches!(router.view(&catalog), View::Articles { .. }));
    assert_eq!(router.window().location(), url("?page=articles"));
    assert_eq!(router.window().replace_count(), 1);
    assert_eq!(router.window().push_count(), 0);

    let router = started("?page=product_detail&id=");
    assert_eq!(router.state(), &NavigationState::page(Page::Products));
    assert_eq!(router.window().location(), url("?page=products"));
}
