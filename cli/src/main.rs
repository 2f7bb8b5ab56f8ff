//! Ticket Order CLI
//!
//! Drives the order engine from JSON files:
//! - quote: derived view for an order
//! - validate: submit-time validation for an order
//! - replay: feed an event script through an order form session
//! - tiers: list configured rate tiers

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use ticket_order_core_rs::{
    recompute, validate_for_submit, AttendeeFormset, DerivedView, FormEvent, FormsetConfig,
    OrderForm, OrderFormConfig, OrderState, RateTable, RateTableConfig,
};

#[derive(Parser)]
#[command(name = "ticket-order")]
#[command(about = "Price and validate conference ticket orders")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the derived view (panels, counts, totals) for an order
    Quote {
        /// Order state JSON file
        #[arg(short, long)]
        order: PathBuf,

        /// Rate table JSON file (defaults to the built-in rates)
        #[arg(short, long)]
        rates: Option<PathBuf>,
    },

    /// Run submit validation on an order; exits non-zero when invalid
    Validate {
        /// Order state JSON file
        #[arg(short, long)]
        order: PathBuf,
    },

    /// Replay an event script through an order form session
    Replay {
        /// Event script JSON file
        #[arg(short, long)]
        events: PathBuf,

        /// Order form configuration JSON file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List configured rate tiers
    Tiers {
        /// Rate table JSON file (defaults to the built-in rates)
        #[arg(short, long)]
        rates: Option<PathBuf>,
    },
}

/// Event script for `replay`
#[derive(Debug, Deserialize)]
struct Script {
    events: Vec<FormEvent>,

    /// Attempt a submit after the last event
    #[serde(default)]
    submit: bool,
}

#[derive(Serialize)]
struct ReplayStep<'a> {
    step: usize,
    event: &'a FormEvent,
    view: &'a DerivedView,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Returns Ok(false) when the command ran but the order is not submittable
fn run(command: Commands) -> Result<bool> {
    match command {
        Commands::Quote { order, rates } => {
            let order: OrderState = read_json(&order)?;
            let table = load_rates(rates.as_deref())?;
            let view = recompute(&order, &table).context("Failed to price order")?;
            print_json(&view)?;
            Ok(true)
        }
        Commands::Validate { order } => {
            let order: OrderState = read_json(&order)?;
            // The order file's rows become the formset; a row added to carry
            // a marker is numbered after them
            let mut formset = AttendeeFormset::with_rows(
                FormsetConfig::default().prefix,
                order.attendees.clone(),
            );
            let result = validate_for_submit(&order, &mut formset);
            let valid = result.is_ok();
            let issues: Vec<_> = result
                .err()
                .unwrap_or_default()
                .iter()
                .map(|issue| {
                    json!({
                        "target": issue.target(),
                        "message": issue.to_string(),
                        "issue": issue,
                    })
                })
                .collect();
            print_json(&json!({ "valid": valid, "errors": issues }))?;
            Ok(valid)
        }
        Commands::Replay { events, config } => {
            let script: Script = read_json(&events)?;
            let config: OrderFormConfig = match config {
                Some(path) => read_json(&path)?,
                None => OrderFormConfig::default(),
            };

            let mut form = OrderForm::new(config).context("Invalid order form configuration")?;
            tracing::info!(
                session = %form.session_id(),
                events = script.events.len(),
                "Replaying event script"
            );
            for (index, event) in script.events.iter().enumerate() {
                let view = form
                    .apply(event.clone())
                    .with_context(|| format!("Event {} failed", index + 1))?;
                print_json(&ReplayStep {
                    step: index + 1,
                    event,
                    view,
                })?;
            }

            if script.submit {
                let outcome = form.attempt_submit()?;
                let accepted = outcome.is_accepted();
                print_json(&json!({
                    "submit": outcome,
                    "view": form.view(),
                }))?;
                return Ok(accepted);
            }
            Ok(true)
        }
        Commands::Tiers { rates } => {
            let table = load_rates(rates.as_deref())?;
            let tiers: Vec<_> = table
                .tiers()
                .map(|(name, params)| {
                    json!({
                        "tier": name,
                        "ticket_price": params.ticket_price,
                        "day_price": params.day_price,
                    })
                })
                .collect();
            print_json(&json!({ "tiers": tiers, "vat_percent": table.vat_percent() }))?;
            Ok(true)
        }
    }
}

fn load_rates(path: Option<&Path>) -> Result<RateTable> {
    let config: RateTableConfig = match path {
        Some(path) => read_json(path)?,
        None => RateTableConfig::default(),
    };
    RateTable::from_config(config).context("Invalid rate table")
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
