//! smsbudget - SMS cost estimator and messaging budget tracker

mod cli;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use smsbudget_core::budget::BudgetTracker;
use smsbudget_core::composer::{CostComposer, SendGate};
use smsbudget_core::SmsAnalyzer;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "smsbudget",
    version,
    about = "SMS cost estimator and messaging budget tracker",
    long_about = "Estimates SMS/MMS costs before a send and tracks spend against\n\
                  weekly ($25), monthly ($100) and yearly ($1000) budgets.\n\
                  \n\
                  Examples:\n\
                    smsbudget analyze \"Join us Sunday!\"          # Encoding, segments, cost\n\
                    smsbudget sanitize < draft.txt                # GSM-7 safe text + savings\n\
                    smsbudget compose \"Hi all\" -r 120             # Campaign cost + budget check\n\
                    smsbudget budget status                       # Spend per period\n\
                    smsbudget --format json budget check 5        # Machine-readable output\n\
                    smsbudget budget add 0.99                     # Record a confirmed send\n\
                  \n\
                  Environment Variables:\n\
                    SMSBUDGET_DATA_DIR               # Override data directory\n\
                    SMSBUDGET_FORMAT                 # Force output format: json|table\n\
                    SMSBUDGET_NO_COLOR               # Disable ANSI colors\n\
                    RUST_LOG                         # Log filter (default: warn)"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Directory holding the cost tracker record (default: platform data dir)
    #[arg(long, global = true, env = "SMSBUDGET_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Force output format (json|table)
    #[arg(long, global = true, env = "SMSBUDGET_FORMAT", value_parser = ["json", "table"])]
    format: Option<String>,

    /// Disable ANSI colors
    #[arg(long, global = true, env = "SMSBUDGET_NO_COLOR")]
    no_color: bool,
}

impl Cli {
    fn output(&self) -> cli::Output {
        cli::Output {
            json: self.format.as_deref() == Some("json"),
            no_color: self.no_color,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Show encoding, segments, cost and Unicode issues for a message
    Analyze {
        /// Message text (reads stdin when omitted or "-")
        text: Option<String>,
    },
    /// Convert a message to GSM-7 safe text and report the savings
    Sanitize {
        /// Message text (reads stdin when omitted or "-")
        text: Option<String>,
        /// Print only the sanitized text
        #[arg(long, short = 'q')]
        quiet: bool,
    },
    /// Price a campaign and check it against the budgets
    Compose {
        /// Message text (reads stdin when omitted or "-")
        text: Option<String>,
        /// Number of recipients
        #[arg(long, short = 'r')]
        recipients: u32,
        /// Message carries an image or file (billed as MMS)
        #[arg(long, short = 'a')]
        attachment: bool,
    },
    /// Inspect or update the spend tracker
    Budget {
        #[command(subcommand)]
        action: BudgetAction,
    },
}

#[derive(Subcommand)]
enum BudgetAction {
    /// Spend per period with alert levels
    Status,
    /// Raw counters and the period each one started
    Summary,
    /// Would this amount exceed a budget? (does not record anything)
    Check {
        /// Proposed cost in USD
        amount: f64,
    },
    /// Record a confirmed charge in USD
    Add {
        /// Cost in USD
        amount: f64,
    },
    /// Zero all counters (administrative)
    Reset {
        /// Required to actually reset
        #[arg(long)]
        confirm: bool,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let output = cli.output();

    match cli.command {
        Command::Analyze { text } => {
            let text = cli::read_text(text)?;
            cli::print_analysis(&SmsAnalyzer::default(), &text, output)?;
        }
        Command::Sanitize { text, quiet } => {
            let text = cli::read_text(text)?;
            let report = SmsAnalyzer::default().sanitize_with_report(&text);
            if quiet {
                println!("{}", report.sanitized);
            } else {
                cli::print_sanitization(&report, output)?;
            }
        }
        Command::Compose {
            text,
            recipients,
            attachment,
        } => {
            let text = cli::read_text(text)?;
            let breakdown = CostComposer::default().compose(&text, recipients, attachment);
            let tracker = open_tracker(cli.data_dir)?;
            let decision = SendGate::new(&tracker).evaluate(&breakdown);
            cli::print_breakdown(&breakdown, &decision, output)?;
        }
        Command::Budget { action } => {
            let tracker = open_tracker(cli.data_dir)?;
            run_budget(&tracker, action, output)?;
        }
    }

    Ok(())
}

fn run_budget(tracker: &BudgetTracker, action: BudgetAction, output: cli::Output) -> Result<()> {
    match action {
        BudgetAction::Status => {
            cli::print_status(&tracker.budget_status(), output)?;
        }
        BudgetAction::Summary => {
            cli::print_state(&tracker.summary(), output)?;
        }
        BudgetAction::Check { amount } => {
            cli::print_warning(&tracker.check_budget_warning(amount), output)?;
        }
        BudgetAction::Add { amount } => {
            let state = tracker
                .add_cost(amount)
                .context("Failed to record messaging cost")?;
            cli::print_state(&state, output)?;
        }
        BudgetAction::Reset { confirm } => {
            if !confirm {
                bail!("Refusing to reset the cost tracker without --confirm");
            }
            let state = tracker.reset().context("Failed to reset cost tracker")?;
            cli::print_state(&state, output)?;
        }
    }
    Ok(())
}

/// File-backed tracker in `--data-dir` or `<data dir>/smsbudget`
fn open_tracker(data_dir: Option<PathBuf>) -> Result<BudgetTracker> {
    let dir = data_dir
        .or_else(|| dirs::data_dir().map(|d: PathBuf| d.join("smsbudget")))
        .context("Could not determine data directory")?;

    tracing::debug!("Using data directory {}", dir.display());
    BudgetTracker::open(&dir)
        .with_context(|| format!("Failed to open cost tracker in {}", dir.display()))
}

/// Initialize tracing/logging on stderr (default level: warn)
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}
