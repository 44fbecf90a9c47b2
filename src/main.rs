use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use snaptrack::config::{SnaptrackPaths, Settings};
use snaptrack::display::format_expense_table;
use snaptrack::export::{export_expenses, export_summary, ExportFormat};
use snaptrack::fetch::{ExpenseSource, HttpSource};
use snaptrack::logging::{init_logging, LogTarget, LoggingConfig};

#[derive(Parser)]
#[command(
    name = "snaptrack",
    version,
    about = "Terminal viewer for automatically extracted receipt expenses",
    long_about = "SnapTrack shows the expenses extracted from your uploaded receipts. \
                  It fetches the expense collection from your endpoint once and lets \
                  you browse it in the terminal, print it, or export it."
)]
struct Cli {
    /// URL of the expenses endpoint (overrides the configured one)
    #[arg(long, global = true, env = "SNAPTRACK_ENDPOINT")]
    endpoint: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI (default)
    #[command(alias = "ui")]
    Tui,

    /// Fetch expenses and print them as a table
    List,

    /// Fetch expenses and write them to a file
    Export {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
        /// Output path, or '-' for stdout (default: expenses_<YYYY-MM>.<ext>)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show current configuration and paths
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Persist the expenses endpoint URL
    SetEndpoint {
        /// Absolute http(s) URL of the expenses collection
        url: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = SnaptrackPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    let command = cli.command.unwrap_or(Commands::Tui);
    let target = match command {
        Commands::Tui => LogTarget::File(paths.log_file()),
        _ => LogTarget::Stderr,
    };
    init_logging(&LoggingConfig {
        debug: cli.debug,
        target,
    })?;

    match command {
        Commands::Tui => {
            let source = http_source(&settings, cli.endpoint.as_deref())?;
            info!(endpoint = %source.url(), "starting viewer");
            snaptrack::tui::run_tui(&settings, source)?;
        }
        Commands::List => {
            let source = http_source(&settings, cli.endpoint.as_deref())?;
            let records = source.fetch()?;
            print!(
                "{}",
                format_expense_table(&records, &settings.currency_symbol)
            );
        }
        Commands::Export { format, output } => {
            let source = http_source(&settings, cli.endpoint.as_deref())?;
            let records = source.fetch()?;
            let summary = export_summary(format, &records);

            let output =
                output.unwrap_or_else(|| format.default_file_name(chrono::Local::now()));
            if output == "-" {
                let stdout = io::stdout();
                let mut writer = stdout.lock();
                export_expenses(format, &source.describe(), records, &mut writer)?;
                writer.flush()?;
            } else {
                let path = PathBuf::from(&output);
                let file = File::create(&path)
                    .with_context(|| format!("Failed to create {}", path.display()))?;
                let mut writer = BufWriter::new(file);
                export_expenses(format, &source.describe(), records, &mut writer)?;
                writer.flush()?;
                eprintln!("{} to {}", summary, path.display());
            }
        }
        Commands::Config { command: None } => {
            println!("SnapTrack Configuration");
            println!("=======================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Log file:         {}", paths.log_file().display());
            println!();
            println!("Settings:");
            match settings.resolve_endpoint(cli.endpoint.as_deref()) {
                Ok(url) => println!("  Endpoint:        {}", url),
                Err(_) => println!("  Endpoint:        (not set)"),
            }
            println!("  Request timeout: {}s", settings.request_timeout_secs);
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Mouse enabled:   {}", settings.mouse_enabled);
        }
        Commands::Config {
            command: Some(ConfigCommands::SetEndpoint { url }),
        } => {
            settings.set_endpoint(&url)?;
            settings.save(&paths)?;
            info!(endpoint = %url, "endpoint saved");
            println!("Endpoint saved to {}", paths.settings_file().display());
        }
    }

    Ok(())
}

/// Build the HTTP source from the resolved endpoint
fn http_source(settings: &Settings, override_url: Option<&str>) -> Result<HttpSource> {
    let url = settings.resolve_endpoint(override_url)?;
    Ok(HttpSource::new(url, settings.request_timeout()))
}
