use crate::error::{ErrorKind, Result};
use clap::{Parser, Subcommand};
use exn::ResultExt;
use komik_pipeline::{PageRequest, PageType};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Configuration file (TOML, YAML or JSON).
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Site profile to use instead of the configured default.
    #[arg(long, short, global = true)]
    pub site: Option<String>,

    /// Pretty-print the JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Catalog listing ordered by popularity.
    Popular { page: Option<String> },
    /// Comic detail, by path or URL.
    Comic { path: String },
    /// Chapter detail, by path or URL.
    Chapter { path: String },
    Search { query: String, page: Option<String> },
    /// Listing of one genre.
    Genre { genre: String, page: Option<String> },
    /// Every genre the site knows.
    Genres,
    /// Listing of one type: manga, manhua or manhwa.
    Type { kind: String, page: Option<String> },
    Ongoing { page: Option<String> },
    Completed { page: Option<String> },
    /// Extract records from a saved HTML file, without fetching.
    Extract {
        #[arg(long, value_parser = parse_page_type)]
        page_type: PageType,
        file: PathBuf,
    },
    /// Print the route pattern of every page type.
    Routes,
}
impl Command {
    /// The page this command targets, or `None` for commands that don't fetch.
    pub fn request(&self, origin: &str) -> Result<Option<PageRequest>> {
        let request = match self {
            Self::Popular { page } => PageRequest::from_popular(page.as_deref()),
            Self::Comic { path } => PageRequest::from_item(path, origin),
            Self::Chapter { path } => PageRequest::from_sub_item(path, origin),
            Self::Search { query, page } => PageRequest::from_search(query, page.as_deref()),
            Self::Genre { genre, page } => PageRequest::from_category(genre, page.as_deref()),
            Self::Genres => Ok(PageRequest::CategoryIndex),
            Self::Type { kind, page } => PageRequest::from_type(kind, page.as_deref()),
            Self::Ongoing { page } => PageRequest::from_status("ongoing", page.as_deref()),
            Self::Completed { page } => PageRequest::from_status("completed", page.as_deref()),
            Self::Extract { .. } | Self::Routes => return Ok(None),
        };
        request.map(Some).or_raise(|| ErrorKind::Arguments)
    }
}

fn parse_page_type(s: &str) -> std::result::Result<PageType, String> {
    PageType::ALL.into_iter().find(|page_type| page_type.to_string().eq_ignore_ascii_case(s)).ok_or_else(|| {
        let known = PageType::ALL.map(|page_type| page_type.to_string());
        format!("expected one of {}", known.join(", "))
    })
}
