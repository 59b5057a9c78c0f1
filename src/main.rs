// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::Result;
use clap::{Parser, Subcommand};
use revpct::config::Config;
use revpct::logger::{self, LogTarget};
use revpct::{compute_reverse, Entry};

#[derive(Parser, Debug)]
#[command(name = "revpct", version, about = "Reverse percentage calculator")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive calculator (default)
    Tui,

    /// Compute one reverse percentage and exit
    Compute {
        /// Value that already includes the percentage
        #[arg(allow_negative_numbers = true)]
        total: f64,

        /// Percentage rate (10 means 10%)
        #[arg(allow_negative_numbers = true)]
        rate: f64,

        /// Print the entry as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Some(Command::Compute { total, rate, json }) => {
            logger::init(&config.log, LogTarget::Stderr)?;
            run_compute(total, rate, json)?;
        }
        Some(Command::Tui) | None => {
            // The terminal is taken over by the UI, so only a log file is allowed
            logger::init(&config.log, LogTarget::FileOnly)?;
            run_ui_mode(&config)?;
        }
    }

    Ok(())
}

fn run_compute(total: f64, rate: f64, json: bool) -> Result<()> {
    let entry = compute_reverse(total, rate);
    println!("{}", format_compute(entry, json)?);
    Ok(())
}

/// Text printed by `revpct compute`
fn format_compute(entry: Option<Entry>, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(&entry)?);
    }

    Ok(match entry {
        Some(entry) => format!(
            "original Val: {}\n% Val:        {}\ntotal:        {}",
            entry.base,
            entry.amount,
            entry.total()
        ),
        None => "No result: number and percentage must both be non-zero".to_string(),
    })
}

#[cfg(feature = "tui")]
fn run_ui_mode(config: &Config) -> Result<()> {
    let session = revpct::Session::with_inputs(config.defaults.total, config.defaults.rate);
    tracing::info!(total = session.total(), rate = session.rate(), "Starting UI");

    let mut app = ui::App::new(session);
    ui::run_ui(&mut app)?;

    tracing::info!(entries = app.session.entries().len(), "UI closed");
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_config: &Config) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use the web UI: cargo run --bin revpct-server --features server");
    std::process::exit(1);
}
