//! cardledger CLI - accounts, credit cards and invoices in your terminal

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod logging;
mod output;

use commands::{card, config, hello, scenario};

/// cardledger - accounts, credit cards and invoices in your terminal
#[derive(Parser)]
#[command(name = "cardledger", version, about, long_about = None)]
struct Cli {
    /// Show debug log lines
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the John Doe walkthrough: deposits, withdrawals, card purchases
    Scenario {
        /// RNG seed for account, card and PIN numbers
        #[arg(long)]
        seed: Option<u64>,
        /// Keep the invoice in memory and print it instead of writing it
        #[arg(long)]
        dry_run: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Issue an ad-hoc card and charge purchases to it
    Card {
        /// Spending limit
        #[arg(long)]
        limit: String,
        /// Card brand (defaults to the configured brand)
        #[arg(long)]
        brand: Option<String>,
        /// Purchase as AMOUNT:DESCRIPTION, repeatable
        #[arg(long = "purchase", value_name = "AMOUNT:DESCRIPTION")]
        purchases: Vec<String>,
        /// Write the invoice to this file
        #[arg(long)]
        invoice: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render the greeting view
    Hello {
        /// Name to greet
        name: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or change settings
    Config {
        #[command(subcommand)]
        command: config::ConfigCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Scenario { seed, dry_run, json } => scenario::run(seed, dry_run, json),
        Commands::Card {
            limit,
            brand,
            purchases,
            invoice,
            json,
        } => card::run(&limit, brand, &purchases, invoice, json),
        Commands::Hello { name, json } => hello::run(&name, json),
        Commands::Config { command } => config::run(command),
    }
}
