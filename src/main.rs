use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use controltower::cli::Output;
use controltower::cli::commands::{self, baseline::AnalysisSource, baseline::BaselineOptions};
use controltower::config::ReportFormat;

#[derive(Parser)]
#[command(name = "controltower")]
#[command(
    version,
    about = "Derive performance baselines for AI agents from their documentation"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive baselines for an agent
    Baseline {
        #[arg(long, help = "What the baselines are for, e.g. \"customer support agent\"")]
        query: String,
        #[arg(
            long,
            short = 'd',
            conflicts_with = "record",
            required_unless_present = "record",
            help = "Agent documentation (.txt, .md, .pdf)"
        )]
        document: Option<PathBuf>,
        #[arg(long, short = 'r', help = "Pre-computed analysis record (.json, .yaml)")]
        record: Option<PathBuf>,
        #[arg(short = 'f', long, help = "Output format: text, json, yaml")]
        format: Option<ReportFormat>,
        #[arg(long, help = "LLM provider (openrouter, openai, ollama)")]
        provider: Option<String>,
        #[arg(long, help = "Model to use")]
        model: Option<String>,
        #[arg(long, short, help = "Write the report to a file")]
        output: Option<PathBuf>,
    },

    /// List framework reference ranges
    Ranges {
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json, yaml"
        )]
        format: ReportFormat,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(short = 'g', long, help = "Show global config file only")]
        global: bool,
        #[arg(
            short = 'f',
            long,
            default_value = "toml",
            help = "Output format: toml, json"
        )]
        format: String,
    },
    /// Show configuration file paths
    Path,
    /// Initialize configuration
    Init {
        #[arg(long, short, help = "Initialize global config")]
        global: bool,
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mControl Tower encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        // Backtrace when RUST_BACKTRACE=1
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            Output::new().error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Baseline {
            query,
            document,
            record,
            format,
            provider,
            model,
            output,
        } => {
            let source = match (document, record) {
                (_, Some(record)) => AnalysisSource::Record(record),
                (Some(document), None) => AnalysisSource::Document(document),
                (None, None) => anyhow::bail!("either --document or --record is required"),
            };

            commands::baseline::run(BaselineOptions {
                query,
                source,
                format,
                provider,
                model,
                output,
            })?;
        }
        Commands::Ranges { format } => {
            commands::ranges::run(format)?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { global, format } => {
                commands::config::show(global, &format)?;
            }
            ConfigAction::Path => {
                commands::config::path()?;
            }
            ConfigAction::Init { global, force } => {
                commands::config::init(global, force)?;
            }
        },
    }

    Ok(())
}
