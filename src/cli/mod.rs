// ============================================================
// Layer 1 - CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction, built on clap.
// All business logic is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `prepare` - formats a corpus into train/validation files
//   2. `meters`  - prints the meter allow-list and its aliases

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, PrepareArgs};

use crate::data::meter_table::alternate_aliases;
use crate::domain::meter::CanonicalMeter;

/// The main CLI struct.
#[derive(Parser, Debug)]
#[command(
    name = "diwan-prep",
    version,
    about = "Filter, clean and format an Arabic poetry corpus into couplet training lines."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch. Routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Prepare(args) => run_prepare(args),
            Commands::Meters        => {
                print_meters();
                Ok(())
            }
        }
    }
}

/// Handles the `prepare` subcommand and prints the run summary.
fn run_prepare(args: PrepareArgs) -> Result<()> {
    use crate::application::prepare_use_case::PrepareUseCase;

    let use_case = PrepareUseCase::new(args.into());
    let stats    = use_case.execute()?;

    println!("{stats}");
    Ok(())
}

fn print_meters() {
    for meter in CanonicalMeter::ALL {
        println!(
            "{:<10} {:<9} {}",
            meter.latin_name(),
            meter.arabic_name(),
            alternate_aliases(meter).join(", ")
        );
    }
}
