//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use dialoguer::{Input, theme::ColorfulTheme};
use leadgen_core::{ExportStatus, LeadPipeline, RunReport};
use leadgen_shared::{
    AppConfig, DefaultsConfig, SearchParams, init_config, init_config_at, load_config,
    load_config_from,
};
use tracing::info;

/// Separator for multi-valued prompt answers.
const LIST_SEPARATOR: char = ';';

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// LeadGen: company search, website summaries, and outreach drafts.
#[derive(Parser)]
#[command(
    name = "leadgen",
    version,
    about = "Find companies, summarize their websites, and draft outreach emails into a CSV.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (defaults to ~/.leadgen/leadgen.toml).
    #[arg(long, global = true, env = "LEADGEN_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Search for companies and build the lead sheet.
    Run(RunArgs),

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Search filters; anything omitted is prompted for.
#[derive(clap::Args, Debug, Default)]
pub(crate) struct RunArgs {
    /// Industry keyword (repeatable).
    #[arg(short, long = "keyword")]
    pub keywords: Vec<String>,

    /// Employee-count range such as "50,200" (repeatable).
    #[arg(short, long = "size")]
    pub sizes: Vec<String>,

    /// Company location (repeatable).
    #[arg(short, long = "location")]
    pub locations: Vec<String>,

    /// Maximum number of companies.
    #[arg(short = 'n', long)]
    pub limit: Option<u32>,

    /// Output CSV path.
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Use configured defaults instead of prompting.
    #[arg(short, long)]
    pub yes: bool,
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "leadgen=info",
        1 => "leadgen=debug",
        _ => "leadgen=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Run(args) => {
            let config = resolve_config(cli.config.as_deref())?;
            cmd_run(&config, args).await
        }
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(cli.config.as_deref()),
            ConfigAction::Show => cmd_config_show(cli.config.as_deref()),
        },
    }
}

fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    Ok(match path {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    })
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

async fn cmd_run(config: &AppConfig, args: RunArgs) -> Result<()> {
    let (params, output) = resolve_inputs(&config.defaults, args)?;
    let pipeline = LeadPipeline::from_config(config)?;

    info!(
        keywords = ?params.keywords,
        limit = params.limit,
        output = %output.display(),
        "starting lead generation"
    );

    let report = pipeline.run(&params, &output).await;
    print_summary(&report);

    match report.export {
        ExportStatus::Failed { path, error } => {
            Err(eyre!("failed to write {}: {error}", path.display()))
        }
        _ => Ok(()),
    }
}

/// Merge flags, prompts, and configured defaults into search parameters.
fn resolve_inputs(defaults: &DefaultsConfig, args: RunArgs) -> Result<(SearchParams, PathBuf)> {
    let interactive = !args.yes;

    let keywords = resolve_list(
        args.keywords,
        &defaults.keywords,
        "Enter industry keywords (';' separated)",
        interactive,
    )?;
    let sizes = resolve_list(
        args.sizes,
        &defaults.size_ranges,
        "Enter employee size ranges, e.g. 50,200 (';' separated)",
        interactive,
    )?;
    let locations = resolve_list(
        args.locations,
        &defaults.locations,
        "Enter locations (';' separated)",
        interactive,
    )?;

    let limit = match args.limit {
        Some(limit) => limit,
        None if interactive => Input::<u32>::with_theme(&ColorfulTheme::default())
            .with_prompt("How many companies to fetch")
            .default(defaults.limit)
            .interact_text()?,
        None => defaults.limit,
    };

    let output = args
        .out
        .unwrap_or_else(|| PathBuf::from(&defaults.output));

    let params = SearchParams::new(keywords, sizes, locations, limit)?;
    Ok((params, output))
}

/// Flag values win; otherwise prompt (or take defaults when non-interactive).
fn resolve_list(
    flags: Vec<String>,
    defaults: &[String],
    prompt: &str,
    interactive: bool,
) -> Result<Vec<String>> {
    if !flags.is_empty() {
        return Ok(flags);
    }
    if !interactive {
        return Ok(defaults.to_vec());
    }

    let default = defaults.join(&LIST_SEPARATOR.to_string());
    let answer: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(default)
        .allow_empty(true)
        .interact_text()?;

    Ok(split_list(&answer))
}

fn split_list(answer: &str) -> Vec<String> {
    answer
        .split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .collect()
}

fn print_summary(report: &RunReport) {
    println!();
    println!("  Companies: {}", report.rows.len());
    println!("  Degraded:  {}", report.degraded);
    match &report.export {
        ExportStatus::Written { path, rows } => {
            println!("  Output:    {} ({rows} rows)", path.display());
        }
        ExportStatus::Skipped => println!("  Output:    nothing to write"),
        ExportStatus::NotAttempted { reason } => println!("  Output:    not written ({reason})"),
        ExportStatus::Failed { path, error } => {
            println!("  Output:    FAILED {} ({error})", path.display());
        }
    }
    println!("  Time:      {:.1}s", report.elapsed.as_secs_f64());
    println!();
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

fn cmd_config_init(path: Option<&Path>) -> Result<()> {
    let path = match path {
        Some(path) => {
            init_config_at(path)?;
            path.to_path_buf()
        }
        None => init_config()?,
    };
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(path: Option<&Path>) -> Result<()> {
    let config = resolve_config(path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
