//! Command-line definitions for the `sanivita` binary.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand, ValueEnum};

use sanivita_core::Page;

#[derive(Parser)]
#[command(
    name = "sanivita",
    version,
    about = "SaniVita Pharma site - routing, content and smart advisor",
    long_about = "Drive the SaniVita Pharma site headlessly.\n\n\
                  Resolve addresses to views, walk the navigation history,\n\
                  manage articles and products, and chat with the advisor."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file (default: sanivita.toml in the platform config directory).
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Use a throwaway in-memory store instead of the SQLite database.
    #[arg(long, global = true)]
    pub memory: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Open an address and print the resolved view as JSON.
    Open(OpenArgs),

    /// Open an address, then navigate step by step and print the history.
    Walk(WalkArgs),

    /// List articles and products.
    Catalog(CatalogArgs),

    /// Reset stored content to the seed catalog.
    Seed,

    /// Ask the smart advisor. Without a message, starts an interactive chat.
    Advise(AdviseArgs),

    /// Create, edit or delete content (requires the admin password).
    Admin(AdminArgs),

    /// Print the effective configuration.
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct OpenArgs {
    /// Full URL, or a query such as `?page=product_detail&id=3`.
    #[arg(value_name = "URL")]
    pub url: String,

    /// Admin password, to see the admin page instead of its login form.
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Args)]
pub struct WalkArgs {
    /// Starting URL or query.
    #[arg(value_name = "URL")]
    pub url: String,

    /// Steps: a page token (`products`), `article:<id>`, `product:<id>`,
    /// `back` or `forward`.
    #[arg(value_name = "STEP")]
    pub steps: Vec<WalkStep>,
}

/// One step of a `walk`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkStep {
    Page(Page),
    Article(String),
    Product(String),
    Back,
    Forward,
}

impl FromStr for WalkStep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "back" => return Ok(WalkStep::Back),
            "forward" => return Ok(WalkStep::Forward),
            _ => {}
        }

        if let Some(id) = s.strip_prefix("article:") {
            return Ok(WalkStep::Article(id.to_string()));
        }
        if let Some(id) = s.strip_prefix("product:") {
            return Ok(WalkStep::Product(id.to_string()));
        }

        s.parse::<Page>()
            .map(WalkStep::Page)
            .map_err(|e| e.to_string())
    }
}

impl fmt::Display for WalkStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalkStep::Page(page) => write!(f, "{}", page),
            WalkStep::Article(id) => write!(f, "article:{}", id),
            WalkStep::Product(id) => write!(f, "product:{}", id),
            WalkStep::Back => write!(f, "back"),
            WalkStep::Forward => write!(f, "forward"),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CatalogKind {
    All,
    Articles,
    Products,
}

#[derive(Args)]
pub struct CatalogArgs {
    /// Which collection to list.
    #[arg(long, value_enum, default_value = "all")]
    pub kind: CatalogKind,

    /// Substring to search for in names, titles, descriptions and excerpts.
    #[arg(long)]
    pub search: Option<String>,

    /// Product category (`all` for every category).
    #[arg(long)]
    pub category: Option<String>,

    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct AdviseArgs {
    /// The question. Words are joined with spaces.
    #[arg(value_name = "MESSAGE")]
    pub message: Vec<String>,
}

#[derive(Args)]
pub struct AdminArgs {
    /// Admin password.
    #[arg(long)]
    pub password: String,

    #[command(subcommand)]
    pub action: AdminAction,
}

#[derive(Subcommand)]
pub enum AdminAction {
    /// Create an article, or edit it when `--id` names an existing one.
    Article(ArticleArgs),

    /// Create a product, or edit it when `--id` names an existing one.
    Product(ProductArgs),

    /// Delete an article.
    DeleteArticle {
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Delete a product.
    DeleteProduct {
        #[arg(value_name = "ID")]
        id: String,
    },
}

#[derive(Args, Default)]
pub struct ArticleArgs {
    #[arg(long)]
    pub id: Option<String>,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub excerpt: Option<String>,

    /// Body text; paragraphs are separated by blank lines.
    #[arg(long)]
    pub content: Option<String>,

    #[arg(long)]
    pub image: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub author: Option<String>,

    #[arg(long)]
    pub read_time: Option<String>,
}

#[derive(Args, Default)]
pub struct ProductArgs {
    #[arg(long)]
    pub id: Option<String>,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// One benefit per line.
    #[arg(long)]
    pub benefits: Option<String>,

    #[arg(long)]
    pub image: Option<String>,

    #[arg(long)]
    pub price: Option<String>,

    #[arg(long)]
    pub icon: Option<String>,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Also write it to the config file.
    #[arg(long)]
    pub save: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_walk_steps() {
        assert_eq!("products".parse::<WalkStep>(), Ok(WalkStep::Page(Page::Products)));
        assert_eq!("article:2".parse::<WalkStep>(), Ok(WalkStep::Article("2".into())));
        assert_eq!("back".parse::<WalkStep>(), Ok(WalkStep::Back));
        assert!("nowhere".parse::<WalkStep>().is_err());
    }

    #[test]
    fn test_parse_admin_command() {
        let cli = Cli::try_parse_from([
            "sanivita",
            "--memory",
            "admin",
            "--password",
            "admin123",
            "delete-product",
            "4",
        ])
        .unwrap();

        assert!(cli.memory);
        match cli.command {
            Command::Admin(args) => {
                assert_eq!(args.password, "admin123");
                assert!(matches!(args.action, AdminAction::DeleteProduct { ref id } if id == "4"));
            }
            _ => panic!("expected admin command"),
        }
    }
}
