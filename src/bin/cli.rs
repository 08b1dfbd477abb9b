//! CLI binary for web-research.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use web_research::aggregate::{DEFAULT_MAX_PAGES, DEFAULT_ROUNDS};
use web_research::{envelope, FetchOptions, ResearchConfig, SearchQuery, WebResearcher};

/// Search the web, fetch pages and collect multi-source summaries.
#[derive(Parser)]
#[command(name = "web-research", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the JSON envelope instead of plain text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search one engine and list the results.
    Search {
        query: String,
        /// baidu, google, bing or duckduckgo. Unknown names use the configured default.
        #[arg(short, long)]
        engine: Option<String>,
        #[arg(short = 'n', long)]
        max_results: Option<usize>,
        /// Ignore cached results.
        #[arg(long)]
        no_cache: bool,
    },

    /// Fetch a single page.
    Fetch {
        url: String,
        /// Also list the page's outbound links.
        #[arg(long)]
        links: bool,
        /// Skip text extraction.
        #[arg(long)]
        no_text: bool,
    },

    /// Search and fetch the top results, then summarise them.
    Collect {
        query: String,
        #[arg(short = 'p', long, default_value_t = DEFAULT_MAX_PAGES)]
        max_pages: usize,
    },

    /// Repeat collection for several rounds.
    Research {
        query: String,
        #[arg(short, long, default_value_t = DEFAULT_ROUNDS)]
        rounds: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("web_research=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let researcher = WebResearcher::new(config)?;

    match cli.command {
        Command::Search {
            query,
            engine,
            max_results,
            no_cache,
        } => {
            let mut search = SearchQuery::new(query)
                .with_max_results(max_results.unwrap_or(researcher.config().max_results))
                .with_cache(!no_cache);
            if let Some(name) = engine {
                search = search.with_engine_name(&name);
            }
            let outcome = researcher.search(&search).await;
            if cli.json {
                print_json(&envelope::search_envelope(&outcome))?;
            } else {
                let response = outcome?;
                println!("{} results from {}", response.results.len(), response.engine);
                for (i, result) in response.results.iter().enumerate() {
                    println!("{}. {}\n   {}", i + 1, result.title, result.url);
                    if !result.description.is_empty() {
                        println!("   {}", result.description);
                    }
                }
            }
        }
        Command::Fetch { url, links, no_text } => {
            let options = FetchOptions {
                extract_text: !no_text,
                extract_links: links,
                use_cache: true,
            };
            let outcome = researcher.fetch_page(&url, options).await;
            if cli.json {
                print_json(&envelope::fetch_envelope(&url, &outcome))?;
            } else {
                let page = outcome?.snapshot;
                println!("{} ({}, {} chars)", page.title, page.status, page.content_length);
                if let Some(text) = page.text {
                    println!("\n{text}");
                }
                for link in page.links.unwrap_or_default() {
                    println!("- {} <{}>", link.text, link.url);
                }
            }
        }
        Command::Collect { query, max_pages } => {
            let outcome = researcher.collect_information(&query, max_pages).await;
            if cli.json {
                print_json(&envelope::collect_envelope(&outcome))?;
            } else {
                println!("{}", outcome?.summary);
            }
        }
        Command::Research { query, rounds } => {
            let outcome = researcher.search_and_research(&query, rounds).await;
            if cli.json {
                print_json(&envelope::research_envelope(&outcome))?;
            } else {
                let report = outcome?;
                for (i, round) in report.results.iter().enumerate() {
                    println!("# Round {}\n\n{}\n", i + 1, round.summary);
                }
                println!(
                    "{} rounds, {} sources in total",
                    report.iterations, report.total_sources
                );
            }
        }
    }

    Ok(())
}

/// Explicit path, else the default location if it exists, else defaults.
fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<ResearchConfig> {
    if let Some(path) = path {
        return Ok(ResearchConfig::from_file(path)?);
    }
    let default_path = ResearchConfig::default_config_path();
    if default_path.exists() {
        tracing::debug!(path = %default_path.display(), "loading default config");
        Ok(ResearchConfig::from_file(&default_path)?)
    } else {
        Ok(ResearchConfig::default())
    }
}

fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
