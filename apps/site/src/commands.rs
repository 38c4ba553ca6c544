//! Command implementations for the `sanivita` binary.

use std::io::{self, Write};
use std::sync::Arc;

use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::{info, warn};

use sanivita_advisor::{Advisor, Conversation, GeminiClient, SendOutcome};
use sanivita_core::catalog::categories;
use sanivita_core::validation::{split_benefits, split_paragraphs};
use sanivita_core::{
    Article, ArticleFilter, ChatRole, ContentCatalog, NavigateOptions, Page, Product,
    ProductFilter, ALL_CATEGORIES,
};
use sanivita_store::content::{article_draft, product_draft};
use sanivita_store::{
    ContentStore, Database, DbConfig, KeyValueStorage, MemoryStorage, StoreError,
};
use sanivita_site::{AdminGate, AppResult, BrowserWindow, MemoryWindow, Router, SiteConfig};

use crate::cli::{
    AdminAction, AdminArgs, AdviseArgs, ArticleArgs, CatalogArgs, CatalogKind, Cli, Command,
    ConfigArgs, OpenArgs, ProductArgs, WalkArgs, WalkStep,
};

/// Content store over whichever backend the command line selected.
pub type SiteStore = ContentStore<Arc<dyn KeyValueStorage>>;

/// Runs one parsed command line.
pub async fn run(cli: Cli) -> AppResult<()> {
    let config = SiteConfig::load(cli.config.clone())?;

    match cli.command {
        Command::Open(args) => run_open(&config, &open_store(&config, cli.memory).await?, &args),
        Command::Walk(args) => run_walk(&config, &open_store(&config, cli.memory).await?, &args),
        Command::Catalog(args) => run_catalog(&config, &open_store(&config, cli.memory).await?, &args),
        Command::Seed => run_seed(&mut open_store(&config, cli.memory).await?).await,
        Command::Advise(args) => run_advise(&config, &open_store(&config, cli.memory).await?, &args).await,
        Command::Admin(args) => run_admin(&config, &mut open_store(&config, cli.memory).await?, args).await,
        Command::Config(args) => run_config(&config, cli.config, &args),
    }
}

/// Opens the configured SQLite database, or an in-memory store.
pub async fn open_store(config: &SiteConfig, memory: bool) -> AppResult<SiteStore> {
    let storage: Arc<dyn KeyValueStorage> = if memory {
        info!("Using in-memory storage");
        Arc::new(MemoryStorage::new())
    } else {
        let path = config.database_path()?;
        info!(?path, "Opening content database");
        Arc::new(Database::new(DbConfig::new(path)).await?)
    };

    Ok(ContentStore::load(storage).await?)
}

// =============================================================================
// Navigation
// =============================================================================

fn run_open(config: &SiteConfig, store: &SiteStore, args: &OpenArgs) -> AppResult<()> {
    let url = config.resolve_url(&args.url)?;
    let mut router = Router::new(MemoryWindow::new(url));
    router.start();

    let mut gate = AdminGate::new(config.admin.password.clone());
    if let Some(password) = &args.password {
        gate.login(password)?;
    }

    print_json(&page_json(&router, store, &gate)?)
}

fn run_walk(config: &SiteConfig, store: &SiteStore, args: &WalkArgs) -> AppResult<()> {
    let url = config.resolve_url(&args.url)?;
    let mut router = Router::new(MemoryWindow::new(url));
    router.start();

    let gate = AdminGate::new(config.admin.password.clone());
    let mut steps = Vec::with_capacity(args.steps.len());

    for step in &args.steps {
        apply_step(&mut router, store, step);
        steps.push(json!({
            "step": step.to_string(),
            "url": router.window().location().as_str(),
            "page": router.state().current_page(),
        }));
    }

    let window = router.window();
    print_json(&json!({
        "steps": steps,
        "history": window.entries().iter().map(|u| u.as_str()).collect::<Vec<_>>(),
        "index": window.index(),
        "final": page_json(&router, store, &gate)?,
    }))
}

/// Applies one walk step the way the matching UI action would.
pub fn apply_step<C>(router: &mut Router<MemoryWindow>, catalog: &C, step: &WalkStep)
where
    C: ContentCatalog + ?Sized,
{
    match step {
        WalkStep::Page(page) => router.navigate_to(*page, NavigateOptions::default()),
        WalkStep::Article(id) => match catalog.find_article_by_id(id) {
            Some(article) => router.select_article(article),
            None => router.navigate_to(Page::ArticleDetail, NavigateOptions::article(id.clone())),
        },
        WalkStep::Product(id) => match catalog.find_product_by_id(id) {
            Some(product) => router.select_product(product),
            None => router.navigate_to(Page::ProductDetail, NavigateOptions::product(id.clone())),
        },
        WalkStep::Back => {
            if router.window_mut().back() {
                router.handle_pop_state();
            }
        }
        WalkStep::Forward => {
            if router.window_mut().forward() {
                router.handle_pop_state();
            }
        }
    }
}

/// The page as the browser would render it: address, title, chrome and view.
pub fn page_json<C>(router: &Router<MemoryWindow>, catalog: &C, gate: &AdminGate) -> AppResult<Value>
where
    C: ContentCatalog + ?Sized,
{
    let view = router.view(catalog);
    let page = view.page();

    let body = if page == Page::Admin && !gate.is_unlocked() {
        json!({ "view": "admin_login" })
    } else {
        serde_json::to_value(&view)?
    };

    let header: Vec<Value> = if page.shows_chrome() {
        Page::MENU
            .iter()
            .map(|item| {
                json!({
                    "page": item,
                    "label": item.label(),
                    "active": *item == page.nav_section(),
                })
            })
            .collect()
    } else {
        Vec::new()
    };

    Ok(json!({
        "url": router.window().location().as_str(),
        "title": view.title(),
        "meta": view.meta(),
        "navSection": page.nav_section(),
        "showsChrome": page.shows_chrome(),
        "header": header,
        "view": body,
    }))
}

// =============================================================================
// Content
// =============================================================================

fn run_catalog(config: &SiteConfig, store: &SiteStore, args: &CatalogArgs) -> AppResult<()> {
    let search = args.search.clone().unwrap_or_default();

    let articles = match args.kind {
        CatalogKind::All | CatalogKind::Articles => ArticleFilter {
            search: search.clone(),
        }
        .apply(store.list_articles()),
        CatalogKind::Products => Vec::new(),
    };

    let products = match args.kind {
        CatalogKind::All | CatalogKind::Products => ProductFilter {
            search,
            category: args
                .category
                .clone()
                .unwrap_or_else(|| ALL_CATEGORIES.to_string()),
        }
        .apply(store.list_products()),
        CatalogKind::Articles => Vec::new(),
    };

    if args.json {
        return print_json(&json!({ "articles": articles, "products": products }));
    }

    let mut out = io::stdout().lock();
    writeln!(out, "{}", config.site.brand)?;

    if args.kind != CatalogKind::Products {
        writeln!(out, "\nArticles ({})", articles.len())?;
        for article in &articles {
            writeln!(
                out,
                "  {:<34} {}  [{}, {}]",
                article.id, article.title, article.category, article.date
            )?;
        }
    }

    if args.kind != CatalogKind::Articles {
        writeln!(out, "\nProducts ({})", products.len())?;
        for product in &products {
            writeln!(
                out,
                "  {:<34} {}  [{}] {}",
                product.id,
                product.name,
                product.category,
                product.price_label()
            )?;
        }
        writeln!(
            out,
            "\nCategories: {}",
            categories(store.list_products()).join(", ")
        )?;
    }

    Ok(())
}

async fn run_seed(store: &mut SiteStore) -> AppResult<()> {
    store.reset().await?;
    println!(
        "Content reset: {} articles, {} products",
        store.list_articles().len(),
        store.list_products().len()
    );
    Ok(())
}

async fn run_admin(config: &SiteConfig, store: &mut SiteStore, args: AdminArgs) -> AppResult<()> {
    let mut gate = AdminGate::new(config.admin.password.clone());
    gate.login(&args.password)?;
    admin_action(&gate, store, args.action).await
}

/// Runs one admin action against `store`. Requires an unlocked gate.
pub async fn admin_action<S>(
    gate: &AdminGate,
    store: &mut ContentStore<S>,
    action: AdminAction,
) -> AppResult<()>
where
    S: KeyValueStorage,
{
    gate.require()?;

    match action {
        AdminAction::Article(args) => {
            let existing = args
                .id
                .as_deref()
                .and_then(|id| store.find_article_by_id(id))
                .cloned();
            let article = edit_article(existing, args);
            let id = article.id.clone();
            let outcome = store.upsert_article(article).await?;
            println!("Article {}: {:?}", id, outcome);
        }
        AdminAction::Product(args) => {
            let existing = args
                .id
                .as_deref()
                .and_then(|id| store.find_product_by_id(id))
                .cloned();
            let product = edit_product(existing, args);
            let id = product.id.clone();
            let outcome = store.upsert_product(product).await?;
            println!("Product {}: {:?}", id, outcome);
        }
        AdminAction::DeleteArticle { id } => {
            if !store.delete_article(&id).await? {
                return Err(StoreError::not_found("Article", id).into());
            }
            println!("Article {} deleted", id);
        }
        AdminAction::DeleteProduct { id } => {
            if !store.delete_product(&id).await? {
                return Err(StoreError::not_found("Product", id).into());
            }
            println!("Product {} deleted", id);
        }
    }

    Ok(())
}

/// Applies the given fields on top of `existing`, or on a fresh draft.
pub fn edit_article(existing: Option<Article>, args: ArticleArgs) -> Article {
    let mut article = existing.unwrap_or_else(article_draft);

    if let Some(id) = args.id {
        article.id = id;
    }
    if let Some(title) = args.title {
        article.title = title;
    }
    if let Some(excerpt) = args.excerpt {
        article.excerpt = excerpt;
    }
    if let Some(content) = args.content {
        article.content = split_paragraphs(&content);
    }
    if let Some(image) = args.image {
        article.image = image;
    }
    if let Some(category) = args.category {
        article.category = category;
    }
    if let Some(author) = args.author {
        article.author = author;
    }
    if let Some(read_time) = args.read_time {
        article.read_time = read_time;
    }

    article
}

/// Applies the given fields on top of `existing`, or on a fresh draft.
pub fn edit_product(existing: Option<Product>, args: ProductArgs) -> Product {
    let mut product = existing.unwrap_or_else(product_draft);

    if let Some(id) = args.id {
        product.id = id;
    }
    if let Some(name) = args.name {
        product.name = name;
    }
    if let Some(category) = args.category {
        product.category = category;
    }
    if let Some(description) = args.description {
        product.description = description;
    }
    if let Some(benefits) = args.benefits {
        product.benefits = split_benefits(&benefits);
    }
    if let Some(image) = args.image {
        product.image = image;
    }
    if let Some(price) = args.price {
        product.price = Some(price).filter(|p| !p.trim().is_empty());
    }
    if let Some(icon) = args.icon {
        product.icon = icon;
    }

    product
}

// =============================================================================
// Advisor
// =============================================================================

async fn run_advise(config: &SiteConfig, store: &SiteStore, args: &AdviseArgs) -> AppResult<()> {
    let client = GeminiClient::new(config.advisor.clone())?;
    if client.config().api_key().is_none() {
        warn!("No advisor API key configured; set SANIVITA_API_KEY");
    }

    let mut conversation = Conversation::new();
    if let Some(greeting) = conversation.last() {
        println!("{}\n", greeting.text);
    }

    // One SIGINT listener for the whole session. Tokio keeps the handler
    // installed once it exists, so every press must be routed somewhere.
    let (interrupt_tx, mut interrupts) = watch::channel(0u64);
    let listener = tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            interrupt_tx.send_modify(|presses| *presses += 1);
        }
    });

    let result = chat(
        &client,
        &mut conversation,
        args,
        store.list_products(),
        BufReader::new(tokio::io::stdin()),
        &mut interrupts,
    )
    .await;
    listener.abort();

    result
}

/// One-shot question, or a prompt loop until `exit`, end of input or Ctrl-C
/// at the prompt.
async fn chat<A, R>(
    client: &A,
    conversation: &mut Conversation,
    args: &AdviseArgs,
    products: &[Product],
    input: R,
    interrupts: &mut watch::Receiver<u64>,
) -> AppResult<()>
where
    A: Advisor + ?Sized,
    R: AsyncBufRead + Unpin,
{
    if !args.message.is_empty() {
        ask(client, conversation, &args.message.join(" "), products, interrupts).await?;
        return Ok(());
    }

    let mut lines = input.lines();
    loop {
        prompt()?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            Ok(()) = interrupts.changed() => {
                println!();
                break;
            }
        };

        let Some(line) = line else {
            break;
        };
        if matches!(line.trim(), "exit" | "quit") {
            break;
        }

        ask(client, conversation, &line, products, interrupts).await?;
        // A press that stopped the reply must not also end the chat.
        interrupts.borrow_and_update();
    }

    Ok(())
}

fn prompt() -> AppResult<()> {
    let mut out = io::stdout();
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}

/// Sends one message and prints the reply as it streams. A Ctrl-C press
/// while the reply streams stops it.
async fn ask<A>(
    client: &A,
    conversation: &mut Conversation,
    input: &str,
    products: &[Product],
    interrupts: &watch::Receiver<u64>,
) -> AppResult<SendOutcome>
where
    A: Advisor + ?Sized,
{
    let (cancel_tx, cancel_rx) = watch::channel(false);
    let mut pressed = interrupts.clone();
    pressed.borrow_and_update();
    let forward = tokio::spawn(async move {
        if pressed.changed().await.is_ok() {
            let _ = cancel_tx.send(true);
        }
    });

    let mut printed = 0;
    let mut write_error = None;
    let outcome = conversation
        .send(client, input, products, Some(cancel_rx), |c| {
            let Some(reply) = c.last().filter(|m| m.role == ChatRole::Model && !m.is_error) else {
                return;
            };
            if reply.text.len() > printed {
                let mut out = io::stdout();
                if let Err(e) = write!(out, "{}", &reply.text[printed..]).and_then(|_| out.flush()) {
                    write_error.get_or_insert(e);
                }
                printed = reply.text.len();
            }
        })
        .await;
    forward.abort();

    if let Some(e) = write_error {
        return Err(e.into());
    }

    match outcome {
        SendOutcome::Failed => {
            if let Some(message) = conversation.last() {
                eprintln!("\n{}", message.text);
            }
        }
        SendOutcome::Cancelled => println!("\n(cancelled)"),
        SendOutcome::Completed | SendOutcome::Ignored => println!(),
    }

    Ok(outcome)
}

// =============================================================================
// Config
// =============================================================================

fn run_config(config: &SiteConfig, path: Option<std::path::PathBuf>, args: &ConfigArgs) -> AppResult<()> {
    if args.save {
        config.save(path)?;
    }

    let mut shown = config.clone();
    if shown.advisor.api_key.is_some() {
        shown.advisor.api_key = Some("<redacted>".to_string());
    }
    shown.admin.password = "<redacted>".to_string();

    print!("{}", toml::to_string_pretty(&shown)?);
    Ok(())
}

fn print_json(value: &Value) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
