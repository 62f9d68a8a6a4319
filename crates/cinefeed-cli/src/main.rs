//! cinefeed - movie and TV catalog browser CLI.

/// Application configuration (TOML).
mod config;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{AppConfig, resolve_config_path};
use cinefeed_api::catalog::{
    CatalogClient, CatalogItem, DEFAULT_API_KEY_ENV, HomeSlot, LocalCatalogApi, MediaType,
    SearchResults, fetch_home_feed,
};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Show all home page carousels.
    Home,
    /// Browse movie lists.
    Movies(MoviesCommand),
    /// Browse TV series lists.
    Tv(TvCommand),
    /// Discover movies by genre and/or keyword.
    Discover(DiscoverArgs),
    /// Search the catalog.
    Search(SearchArgs),
    /// Inspect a single movie or series.
    Show(ShowCommand),
}

/// Arguments for the `movies` subcommand.
#[derive(clap::Args)]
struct MoviesCommand {
    /// Movie list to show.
    #[command(subcommand)]
    command: MoviesSubcommands,
}

/// Available movie lists.
#[derive(Subcommand)]
enum MoviesSubcommands {
    /// Trending this week.
    Trending,
    /// Top rated.
    TopRated,
    /// Popular.
    Popular,
    /// Upcoming releases.
    Upcoming,
}

/// Arguments for the `tv` subcommand.
#[derive(clap::Args)]
struct TvCommand {
    /// TV list to show.
    #[command(subcommand)]
    command: TvSubcommands,
}

/// Available TV lists.
#[derive(Subcommand)]
enum TvSubcommands {
    /// Trending this week.
    Trending,
    /// Top rated.
    TopRated,
    /// Popular.
    Popular,
}

/// Arguments for the `discover` subcommand.
#[derive(clap::Args)]
struct DiscoverArgs {
    /// Genre IDs, comma- or pipe-separated (e.g. "28,12").
    #[arg(long)]
    genre: Option<String>,
    /// Keyword IDs, comma- or pipe-separated (e.g. "9715").
    #[arg(long)]
    keywords: Option<String>,
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search query (e.g. "Dune").
    #[arg(long, required = true)]
    query: String,
    /// Include TV series in results.
    #[arg(long)]
    multi: bool,
}

/// Arguments for the `show` subcommand.
#[derive(clap::Args)]
struct ShowCommand {
    /// Show subcommand to run.
    #[command(subcommand)]
    command: ShowSubcommands,
}

/// Available show subcommands.
#[derive(Subcommand)]
enum ShowSubcommands {
    /// Details of a movie or series.
    Details(ShowArgs),
    /// Cast and crew.
    Credits(ShowArgs),
    /// Similar titles.
    Similar(ShowArgs),
    /// Recommended titles.
    Recommendations(ShowArgs),
}

/// Target of a `show` subcommand.
#[derive(clap::Args)]
struct ShowArgs {
    /// Media type: "movie" or "tv".
    #[arg(long, required = true)]
    media_type: MediaType,
    /// TMDB ID.
    #[arg(long, required = true)]
    id: u64,
}

/// Builds a `CatalogClient` from config and environment.
///
/// `TMDB_API_KEY` wins over `catalog.api_key`. A missing key is not an
/// error here; the first request reports it.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or the client fails to build.
#[instrument(skip_all)]
fn build_catalog_client(dir: Option<&PathBuf>) -> Result<CatalogClient> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;

    let mut builder = CatalogClient::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(base_url) = config.catalog.parsed_base_url()? {
        builder = builder.base_url(base_url);
    }

    let env_key_set = std::env::var(DEFAULT_API_KEY_ENV).is_ok_and(|v| !v.trim().is_empty());
    if !env_key_set && let Some(key) = config.catalog.api_key {
        tracing::debug!(path = %config_path.display(), "Using API key from config");
        builder = builder.api_key(key);
    }

    builder.build().context("failed to build catalog client")
}

/// Logs a list of catalog items as a table.
fn log_items(items: &[CatalogItem]) {
    tracing::info!("ID\tType\tRating\tDate\t\tTitle");
    for item in items {
        let info = item.info();
        tracing::info!(
            "{}\t{}\t{}\t{}\t{}",
            item.id(),
            item.media_type(),
            info.vote_average
                .map_or_else(|| String::from("-"), |v| format!("{v:.1}")),
            info.air_date.as_deref().unwrap_or("-"),
            item.display_title(),
        );
    }
}

/// Logs a paginated result set.
fn log_results(results: &SearchResults) {
    tracing::info!(
        "Page {}/{} ({} results)",
        results.page,
        results.total_pages,
        results.total_results
    );
    log_items(&results.results);
}

/// Runs the `home` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or every slot fails.
#[instrument(skip_all)]
async fn run_home(dir: Option<&PathBuf>) -> Result<()> {
    let client = build_catalog_client(dir)?;
    let feed = fetch_home_feed(&client).await;

    for slot in HomeSlot::ALL {
        match feed.slot(slot) {
            Ok(items) => {
                tracing::info!("== {} ({})", slot, items.len());
                log_items(items);
            }
            Err(err) => tracing::warn!("== {}: unavailable ({})", slot, err),
        }
    }

    if feed.is_total_failure() {
        if let Some((_, err)) = feed.failures().first() {
            bail!("all home feed slots failed: {err}");
        }
        bail!("all home feed slots failed");
    }
    Ok(())
}

/// Runs the `movies` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_movies(command: &MoviesSubcommands, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_catalog_client(dir)?;

    let items = match command {
        MoviesSubcommands::Trending => client.trending_movies().await,
        MoviesSubcommands::TopRated => client.top_rated_movies().await,
        MoviesSubcommands::Popular => client.popular_movies().await,
        MoviesSubcommands::Upcoming => client.upcoming_movies().await,
    }
    .context("movie list request failed")?;

    log_items(&items);
    Ok(())
}

/// Runs the `tv` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_tv(command: &TvSubcommands, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_catalog_client(dir)?;

    let items = match command {
        TvSubcommands::Trending => client.trending_tv().await,
        TvSubcommands::TopRated => client.top_rated_tv().await,
        TvSubcommands::Popular => client.popular_tv().await,
    }
    .context("TV list request failed")?;

    log_items(&items);
    Ok(())
}

/// Runs the `discover` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_discover(args: &DiscoverArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_catalog_client(dir)?;

    let items = client
        .discover_movies(args.genre.as_deref(), args.keywords.as_deref())
        .await
        .context("discover request failed")?;

    log_items(&items);
    Ok(())
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_catalog_client(dir)?;

    let items = if args.multi {
        client.search_multi(&args.query).await
    } else {
        client.search_movies(&args.query).await
    }
    .context("search request failed")?;

    tracing::info!("Total results: {}", items.len());
    log_items(&items);
    Ok(())
}

/// Runs the `show details` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_show_details(args: &ShowArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_catalog_client(dir)?;

    let details = client
        .show_details(args.media_type, args.id)
        .await
        .context("details request failed")?;

    let genres: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();
    tracing::info!("ID: {}", details.id);
    tracing::info!("Title: {}", details.display_title().unwrap_or("-"));
    tracing::info!("Tagline: {}", details.tagline.as_deref().unwrap_or("-"));
    tracing::info!("Status: {}", details.status.as_deref().unwrap_or("-"));
    tracing::info!("Genres: {}", genres.join(", "));
    tracing::info!(
        "Date: {}",
        details
            .release_date
            .as_deref()
            .or(details.first_air_date.as_deref())
            .unwrap_or("-")
    );
    match args.media_type {
        MediaType::Movie => tracing::info!(
            "Runtime: {}",
            details
                .runtime
                .map_or_else(|| String::from("-"), |r| format!("{r}min"))
        ),
        MediaType::Tv => tracing::info!(
            "Seasons: {} / Episodes: {}",
            details
                .number_of_seasons
                .map_or_else(|| String::from("-"), |n| n.to_string()),
            details
                .number_of_episodes
                .map_or_else(|| String::from("-"), |n| n.to_string())
        ),
    }
    tracing::info!(
        "Rating: {}",
        details
            .vote_average
            .map_or_else(|| String::from("-"), |v| format!("{v:.1}"))
    );
    tracing::info!("---");
    tracing::info!("{}", details.overview.as_deref().unwrap_or(""));

    Ok(())
}

/// Runs the `show credits` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_show_credits(args: &ShowArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_catalog_client(dir)?;

    let credits = client
        .show_credits(args.media_type, args.id)
        .await
        .context("credits request failed")?;

    tracing::info!("Cast ({}):", credits.cast.len());
    for member in &credits.cast {
        tracing::info!(
            "  {}\t{} as {}",
            member.id,
            member.name,
            member.character.as_deref().unwrap_or("-")
        );
    }
    tracing::info!("Crew ({}):", credits.crew.len());
    for member in &credits.crew {
        tracing::info!(
            "  {}\t{} ({})",
            member.id,
            member.name,
            member.job.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}

/// Runs the `show similar` and `show recommendations` subcommands.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_show_related(
    args: &ShowArgs,
    recommendations: bool,
    dir: Option<&PathBuf>,
) -> Result<()> {
    let client = build_catalog_client(dir)?;

    let results = if recommendations {
        client
            .recommendations(args.media_type, args.id)
            .await
            .context("recommendations request failed")?
    } else {
        client
            .similar_shows(args.media_type, args.id)
            .await
            .context("similar request failed")?
    };

    log_results(&results);
    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    let dir = cli.dir.as_ref();
    match cli.command {
        Commands::Home => run_home(dir).await,
        Commands::Movies(cmd) => run_movies(&cmd.command, dir).await,
        Commands::Tv(cmd) => run_tv(&cmd.command, dir).await,
        Commands::Discover(args) => run_discover(&args, dir).await,
        Commands::Search(args) => run_search(&args, dir).await,
        Commands::Show(cmd) => match cmd.command {
            ShowSubcommands::Details(args) => run_show_details(&args, dir).await,
            ShowSubcommands::Credits(args) => run_show_credits(&args, dir).await,
            ShowSubcommands::Similar(args) => run_show_related(&args, false, dir).await,
            ShowSubcommands::Recommendations(args) => run_show_related(&args, true, dir).await,
        },
    }
}
