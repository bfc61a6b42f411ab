//! Kronos CLI - one-shot chat completions against the Kronos Labs API.
//!
//! `kronos ask` always prints exactly one JSON line on stdout and exits 0;
//! logs go to stderr.

#![allow(clippy::print_stdout)] // CLI program intentionally uses stdout

use clap::{Args, Parser, Subcommand};
use kronos::Outcome;
use kronos_cli::commands;
use kronos_cli::config::{self, CliConfig, IssueLevel, Overrides};
use kronos_cli::error::Result;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Kronos - one-shot chat completions with JSON output
#[derive(Parser)]
#[command(name = "kronos")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file path
    #[arg(short, long, env = "KRONOS_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// API key (overrides config)
    #[arg(long, env = "KRONOS_API_KEY", global = true, hide_env_values = true)]
    api_key: Option<String>,

    /// API base URL (overrides config)
    #[arg(long, env = "KRONOS_BASE_URL", global = true)]
    base_url: Option<String>,

    /// Request options used when no subcommand is given
    #[command(flatten)]
    ask: AskArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Send one prompt and print the result as JSON (default)
    Ask(AskArgs),

    /// Generate recipes from an inventory file
    Recipes(RecipesArgs),

    /// Manage configuration
    Config(ConfigArgs),

    /// Create a default configuration file
    Init(InitArgs),
}

/// Arguments for the ask command
#[derive(Args, Debug, Default, PartialEq)]
struct AskArgs {
    /// Prompt to send
    #[arg(short, long)]
    prompt: Option<String>,

    /// Model to use
    #[arg(short, long, env = "KRONOS_MODEL")]
    model: Option<String>,

    /// Sampling temperature
    #[arg(short, long)]
    temperature: Option<f32>,
}

/// Arguments for the recipes command
#[derive(Args)]
struct RecipesArgs {
    /// JSON file holding an array of `{name, quantity, unit}` items
    #[arg(short, long)]
    inventory: PathBuf,

    /// Model to use
    #[arg(short, long, env = "KRONOS_MODEL")]
    model: Option<String>,
}

/// Arguments for the config command
#[derive(Args)]
struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Show configuration file path
    Path,
    /// Validate configuration
    Validate,
}

/// Arguments for the init command
#[derive(Args)]
struct InitArgs {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    force: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("failed to create tokio runtime: {e}");
            // `ask` still owes its caller a JSON line.
            if matches!(cli.command, None | Some(Commands::Ask(_))) {
                print_outcome(&Outcome::failure(e.to_string()));
                return ExitCode::SUCCESS;
            }
            return ExitCode::FAILURE;
        }
    };

    match rt.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Initialize logging with the given verbosity level.
///
/// Logs are written to stderr so stdout carries only command output.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "kronos={level},kronos_cli={level},{}",
            if verbosity >= 3 { "debug" } else { "warn" }
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .with_writer(std::io::stderr)
        .init();
}

/// Main async entry point.
async fn run(cli: Cli) -> Result<()> {
    let config_file = cli.config.unwrap_or_else(config::config_path);
    let overrides = Overrides {
        api_key: cli.api_key,
        base_url: cli.base_url,
        ..Overrides::default()
    };

    match cli.command {
        None => cmd_ask(cli.ask, overrides, &config_file).await,
        Some(Commands::Ask(args)) => cmd_ask(args, overrides, &config_file).await,
        Some(Commands::Recipes(args)) => cmd_recipes(args, overrides, &config_file).await,
        Some(Commands::Config(args)) => cmd_config(args, &config_file).await,
        Some(Commands::Init(args)) => cmd_init(args, &config_file).await,
    }
}

fn print_outcome(outcome: &Outcome) {
    match outcome.to_json_line() {
        Ok(line) => println!("{line}"),
        Err(e) => tracing::error!("failed to render outcome: {e}"),
    }
}

/// Send one prompt.
async fn cmd_ask(args: AskArgs, overrides: Overrides, config_file: &Path) -> Result<()> {
    let overrides = Overrides {
        model: args.model,
        temperature: args.temperature,
        prompt: args.prompt,
        ..overrides
    };

    let outcome = commands::ask_with_config(config_file, &overrides).await;
    print_outcome(&outcome);
    Ok(())
}

/// Generate recipes for an inventory.
async fn cmd_recipes(args: RecipesArgs, overrides: Overrides, config_file: &Path) -> Result<()> {
    let overrides = Overrides {
        model: args.model,
        ..overrides
    };

    let result = commands::recipes_with_config(config_file, &overrides, &args.inventory).await;
    println!("{}", commands::recipes_line(result)?);
    Ok(())
}

/// Manage configuration.
async fn cmd_config(args: ConfigArgs, config_file: &Path) -> Result<()> {
    match args.command {
        ConfigCommands::Path => {
            println!("{}", config_file.display());
        }
        ConfigCommands::Show => {
            if config_file.exists() {
                let config = config::load_config_from(config_file).await?;
                print!("{}", toml_for_display(&config)?);
            } else {
                println!("Configuration file does not exist.");
                println!("Run 'kronos init' to create one.");
            }
        }
        ConfigCommands::Validate => {
            let config = config::load_config_from(config_file).await?;
            let issues = config.validate();

            if issues.is_empty() {
                println!("Configuration is valid");
            }
            for issue in &issues {
                println!("{issue}");
            }
            if issues.iter().any(|i| i.level == IssueLevel::Error) {
                return Err(config::ConfigError::Invalid(issues.len()).into());
            }
        }
    }

    Ok(())
}

/// Renders the configuration with the API key masked.
fn toml_for_display(config: &CliConfig) -> Result<String> {
    let mut shown = config.clone();
    if let Some(key) = shown.provider.api_key.as_mut() {
        *key = mask(key);
    }
    Ok(toml::to_string_pretty(&shown).map_err(config::ConfigError::from)?)
}

fn mask(key: &str) -> String {
    match key.char_indices().nth(4) {
        Some((idx, _)) => format!("{}***", &key[..idx]),
        None => "***".to_owned(),
    }
}

/// Initialize configuration.
async fn cmd_init(args: InitArgs, config_file: &Path) -> Result<()> {
    match config::init_config_at(config_file, args.force).await {
        Ok(_) => {
            println!("Configuration created: {}", config_file.display());
            println!();
            println!("Next steps:");
            println!("  1. export KRONOS_API_KEY=<key>");
            println!("  2. kronos ask --prompt \"Generate a simple recipe for banana bread\"");
            Ok(())
        }
        Err(config::ConfigError::AlreadyExists(path)) => {
            println!("Configuration already exists at: {}", path.display());
            println!("Use --force to overwrite.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
