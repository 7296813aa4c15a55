//! Command-line argument definitions for stepwise.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

use super::CapabilityPolicy;

/// Command-line interface for stepwise.
#[derive(Debug, Parser)]
#[command(name = "stepwise")]
#[command(
    author,
    version,
    about = "Run organizers built from ordered, conditionally filtered steps"
)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file.
    #[arg(long, global = true)]
    pub config: Option<Utf8PathBuf>,

    /// Log filter directive (overrides configuration, not `RUST_LOG`).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Handling of named filters the subject does not expose.
    #[arg(long, global = true, value_enum)]
    pub unknown_capability: Option<CapabilityPolicy>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the steps declared by the checkout organizer.
    Steps,

    /// Place an order through the checkout organizer.
    Checkout(CheckoutArgs),
}

/// Arguments for the `checkout` subcommand.
#[derive(Debug, Default, Parser)]
pub struct CheckoutArgs {
    /// Item to order (repeatable).
    #[arg(long = "item")]
    pub items: Vec<String>,

    /// Gift-wrap the order.
    #[arg(long)]
    pub gift_wrap: bool,

    /// Do not send a receipt.
    #[arg(long)]
    pub quiet: bool,

    /// Simulate a declined card.
    #[arg(long)]
    pub decline: bool,
}
