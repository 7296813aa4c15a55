//! `stepwise` application entry point.
//!
//! This binary drives the bundled checkout organizer. It uses `eyre` for
//! opaque error handling at the application boundary, converting
//! domain-specific errors into human-readable reports.
//!
//! Configuration is loaded with layered precedence via `OrthoConfig`:
//! 1. Application defaults
//! 2. Configuration file (`~/.config/stepwise/config.toml` or path from `STEPWISE_CONFIG_PATH`)
//! 3. Environment variables (`STEPWISE_*`)
//! 4. Command-line arguments

use clap::Parser;
use eyre::{Report, Result as EyreResult};
use stepwise::checkout::{self, Order, PlaceOrder};
use stepwise::config::{CheckoutArgs, Cli, Commands, load_config};
use stepwise::error::Result as StepwiseResult;
use stepwise::sequence::{FilterKey, RunSummary, StepStatus};

/// Application entry point.
///
/// Loads configuration, installs logging and run settings, then dispatches
/// to the subcommand handler.
fn main() -> EyreResult<()> {
    let cli = Cli::parse();

    // Load configuration with layered precedence: defaults < file < env < CLI.
    let config = load_config(&cli).map_err(Report::from)?;
    stepwise::logging::init(config.log_level.as_deref()).map_err(Report::from)?;
    stepwise::configure(config.run);

    run(&cli).map_err(Report::from)
}

/// Execute the CLI command, returning domain-specific errors.
///
/// Keeps semantic errors inside the run loop so the CLI boundary owns
/// conversion to `eyre::Report`.
fn run(cli: &Cli) -> StepwiseResult<()> {
    checkout::install()?;
    match &cli.command {
        Commands::Steps => {
            list_steps();
            Ok(())
        }
        Commands::Checkout(args) => place_order(args),
    }
}

/// Print the declared checkout steps with their filters.
#[expect(clippy::print_stdout, reason = "CLI output is the intended behaviour")]
fn list_steps() {
    for (position, registration) in checkout::declared_steps().iter().enumerate() {
        println!(
            "{:>2}. {:<16} if: {:<12} unless: {}",
            position.saturating_add(1),
            registration.name(),
            registration.filter(FilterKey::If),
            registration.filter(FilterKey::Unless)
        );
    }
}

/// Run the checkout organizer for the requested order.
fn place_order(args: &CheckoutArgs) -> StepwiseResult<()> {
    let subject = PlaceOrder {
        gift_wrap: args.gift_wrap,
        quiet: args.quiet,
    };
    let mut order = Order::new(args.items.iter().cloned());
    order.card_declined = args.decline;

    let summary = subject.place(&mut order)?;
    report(&summary, &order);
    Ok(())
}

/// Print the outcome of a successful checkout.
#[expect(clippy::print_stdout, reason = "CLI output is the intended behaviour")]
fn report(summary: &RunSummary, order: &Order) {
    for outcome in summary.outcomes() {
        match outcome.status {
            StepStatus::Invoked => println!("ran      {}", outcome.step),
            StepStatus::Skipped(reason) => println!("skipped  {} ({reason})", outcome.step),
        }
    }
    println!("total: {} cents", order.total_cents);
    if let Some(ref receipt) = order.receipt {
        println!("receipt: {receipt}");
    }
}
