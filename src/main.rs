//! CLI binary for fedi.

mod output;

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use fedi_search::config::DEFAULT_CONFIG_PATH;
use fedi_search::{RankingStrategy, SearchConfig};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use output::ViewOptions;

/// Fedi: search many fediverse servers at once.
///
/// Bearer tokens are read from `<SERVER>_ACCESS_TOKEN` environment
/// variables, e.g. `MASTODON_SOCIAL_ACCESS_TOKEN` for `mastodon.social`.
/// A `.env` file in the working directory is loaded first if present.
#[derive(Parser, Debug)]
#[command(name = "fedi", version, about)]
struct Cli {
    /// Search query. Multiple words are joined with spaces.
    #[arg(required = true)]
    query: Vec<String>,

    /// Path to a JSON or TOML configuration file listing servers.
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, env = "FEDI_CONFIG")]
    config: PathBuf,

    /// Ranking strategy: date, engagement or relevance.
    #[arg(short, long, default_value_t = RankingStrategy::Date)]
    ranking: RankingStrategy,

    /// Only show results from this server. May be repeated.
    #[arg(short, long = "server")]
    servers: Vec<String>,

    /// Only show results whose content or author contains this text.
    #[arg(short, long)]
    filter: Option<String>,

    /// Show at most this many results.
    #[arg(short, long)]
    limit: Option<usize>,

    /// Print results as JSON instead of text.
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn query_string(&self) -> String {
        self.query
            .iter()
            .map(|word| word.trim())
            .filter(|word| !word.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn view_options(&self, query: String) -> ViewOptions {
        ViewOptions {
            query,
            strategy: self.ranking,
            text_filter: self.filter.clone(),
            servers: self.servers.iter().cloned().collect::<HashSet<_>>(),
            limit: self.limit,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // `.env` may carry RUST_LOG as well as access tokens, so load it first.
    let dotenv = dotenvy::dotenv();

    // Diagnostics go to stderr so stdout stays clean for results.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("fedi=info,fedi_search=info")),
        )
        .init();

    match dotenv {
        Ok(path) => debug!(path = %path.display(), "loaded environment file"),
        Err(err) if err.not_found() => {}
        Err(err) => warn!(error = %err, "ignoring unreadable .env file"),
    }

    let cli = Cli::parse();

    let query = cli.query_string();
    if query.is_empty() {
        anyhow::bail!("query is required, run with --help for usage");
    }

    let config = SearchConfig::load_or_default(&cli.config)
        .with_context(|| format!("failed to load config from {}", cli.config.display()))?;

    info!(servers = config.servers.len(), ranking = %cli.ranking, "searching");

    let results = fedi_search::search(&query, &config, cli.ranking).await?;
    let options = cli.view_options(query);
    let view = output::apply_view(&results, &options);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", output::render_list(&options, &view));
    }

    Ok(())
}
