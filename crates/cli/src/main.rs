//! `vaxsearch`: campaign form with debounced search-select fields.

mod logging;

use clap::Parser;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::info;
use vx_core::config::loader::{load_config, validate};
use vx_core::config::models::AppConfig;
use vx_protocol::CampaignDraft;

#[derive(Parser, Debug)]
#[command(
    name = "vaxsearch",
    version,
    about = "Fill in a vaccination campaign with debounced search-select fields"
)]
struct Cli {
    /// Directory holding the `.vaxsearch/` configuration folder
    #[arg(long, value_name = "DIR", default_value = ".")]
    root: PathBuf,

    /// Override `search.min_query_length`
    #[arg(long, value_name = "CHARS")]
    min_query_length: Option<usize>,

    /// Override `search.debounce_ms`
    #[arg(long, value_name = "MS")]
    debounce_ms: Option<u64>,

    /// Append logs to this file (nothing is logged otherwise)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Print output as JSON
    #[arg(long)]
    json: bool,

    /// Print the resolved configuration and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    logging::init_logging(cli.log_file.as_deref())?;

    let config = resolve_config(&cli).await?;

    if cli.print_config {
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&config)?);
        } else {
            print!("{}", describe_config(&config));
        }
        return Ok(());
    }

    let saved = vx_tui::run_app(&config).await.map_err(|e| eyre!(e))?;

    match saved {
        Some(draft) if cli.json => println!("{}", draft.to_pretty_json()?),
        Some(draft) => print!("{}", describe_draft(&draft)),
        None if cli.json => println!("null"),
        None => println!("{}", "Cancelled.".yellow()),
    }
    Ok(())
}

/// Load `.vaxsearch/` under `--root` and apply the command-line overrides.
async fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = load_config(&cli.root).await?;

    let search = &mut config.global.search;
    if let Some(chars) = cli.min_query_length {
        search.min_query_length = chars;
    }
    if let Some(ms) = cli.debounce_ms {
        search.debounce_ms = ms;
    }
    validate(&config.global, Path::new("<command line>"))?;

    info!(
        root = %cli.root.display(),
        min_query_length = config.search().min_query_length,
        debounce_ms = config.search().debounce_ms,
        "configuration resolved"
    );
    Ok(config)
}

fn describe_config(config: &AppConfig) -> String {
    let search = config.search();
    let mut out = String::new();

    out.push_str(&format!("{}\n", "[search]".bold()));
    out.push_str(&setting("min_query_length", search.min_query_length));
    out.push_str(&setting("debounce_ms", search.debounce_ms));
    out.push_str(&setting("fetch_timeout_ms", search.fetch_timeout_ms));

    out.push_str(&format!("{}\n", "[source]".bold()));
    out.push_str(&setting("latency_ms", config.global.source.latency_ms));

    out.push_str(&format!("{}\n", "[catalog]".bold()));
    out.push_str(&setting("vaccines", config.catalog.vaccines.len()));
    out.push_str(&setting("health_units", config.catalog.health_units.len()));
    out
}

fn setting(key: &str, value: impl std::fmt::Display) -> String {
    format!("  {:<18}{}\n", key.cyan(), value)
}

fn describe_draft(draft: &CampaignDraft) -> String {
    let mut out = format!("{}\n", "Campaign saved".green().bold());

    let unit = draft
        .health_unit
        .as_ref()
        .map_or_else(|| "none".dimmed().to_string(), |unit| unit.name.clone());
    out.push_str(&format!("  Health unit: {unit}\n"));

    if draft.vaccines.is_empty() {
        out.push_str(&format!("  Vaccines: {}\n", "none".dimmed()));
    } else {
        out.push_str("  Vaccines:\n");
        for vaccine in &draft.vaccines {
            out.push_str(&format!("    - {}\n", vaccine.display_label()));
        }
    }
    out
}
