use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use feather_docs::content::{Site, apply_highlights, split_target};
use feather_docs::index::DocIndex;
use feather_docs::logging::{self, LogTarget};
use feather_docs::output;
use feather_docs::query::Scorer;
use feather_docs::utils::{AppConfig, get_log_path};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "feather-docs")]
#[command(about = "FeatherAI documentation browser with instant search")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Initial search query for the interactive browser
    #[arg(trailing_var_arg = true)]
    query: Vec<String>,

    /// Search index file to use instead of the built-in one
    #[arg(long, global = true)]
    index: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the documentation and print ranked results
    Search {
        /// Query words
        #[arg(required = true)]
        query: Vec<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a page, e.g. `/native-tools#crawl`
    Show {
        /// Route with optional fragment
        target: String,

        /// Highlight this term in the page
        #[arg(long)]
        highlight: Option<String>,
    },
    /// List the headings of a page with their ids
    Outline {
        /// Route of the page
        path: String,
    },
    /// Validate the search index and list its entries
    Index,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // The TUI owns the terminal, so its logs go to a file
    let log_target = match (&cli.command, get_log_path()) {
        (None, Ok(path)) => LogTarget::File(path),
        _ => LogTarget::Stderr,
    };
    logging::init(log_target, config.log_filter.as_deref());
    if let Some(e) = config_error {
        tracing::warn!(error = %format!("{:#}", e), "using default config");
    }

    let index = DocIndex::load(config.effective_index_path(cli.index.as_deref()))?;
    let color = !cli.no_color;

    match cli.command {
        Some(Commands::Search { query, json }) => {
            let query = query.join(" ");
            let results = Scorer::with_defaults().search(&query, index.entries());
            if json {
                output::print_results_json(&results)?;
            } else if results.is_empty() {
                eprintln!("No results found for \"{}\"", query.trim());
            } else {
                output::print_results(&results, color)?;
            }
        }
        Some(Commands::Show { target, highlight }) => {
            let mut site = Site::builtin();
            let (path, fragment) = split_target(&target);
            if !site.contains(path) {
                bail!("No page at {}", path);
            }

            let page = site.resolve_mut(path);
            if let Some(term) = highlight {
                let marks = apply_highlights(&mut page.region, &term);
                tracing::debug!(term = %term, marks, "highlighted page");
            }
            if let Some(fragment) = fragment
                && page.region.find_anchor(fragment).is_none()
            {
                tracing::warn!(fragment, "anchor not found on page");
            }
            output::print_page(page, color)?;
        }
        Some(Commands::Outline { path }) => {
            let site = Site::builtin();
            let page = site
                .page(&path)
                .with_context(|| format!("No page at {}", path))?;
            output::print_outline(page, color)?;
        }
        Some(Commands::Index) => {
            output::print_index(&index, color)?;
        }
        None => {
            let query = (!cli.query.is_empty()).then(|| cli.query.join(" "));
            run_interactive(index, &config, query)?;
        }
    }

    Ok(())
}

#[cfg(feature = "interactive")]
fn run_interactive(index: DocIndex, config: &AppConfig, query: Option<String>) -> Result<()> {
    use feather_docs::nav::{Navigator, SearchBox};

    let search = SearchBox::new(index, Scorer::with_defaults());
    let navigator = Navigator::new(Site::builtin(), config.settle_delay());
    feather_docs::tui::run(search, navigator, query)
}

#[cfg(not(feature = "interactive"))]
fn run_interactive(_index: DocIndex, _config: &AppConfig, _query: Option<String>) -> Result<()> {
    bail!("Interactive mode is not available in this build; use a subcommand")
}
