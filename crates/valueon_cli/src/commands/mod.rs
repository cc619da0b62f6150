//! CLI command definitions.
//!
//! Every subcommand reads the snapshot either from a document given with
//! `--input` or from the saved session in the data directory.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};

use valueon_core::{AnalysisInputs, InputReader};
use valueon_store::{JsonFileStore, Session, StoreConfig};

use crate::config::{CliConfig, OutputFormat};

pub mod analyze;
pub mod export;
pub mod init;
pub mod reset;
pub mod set_count;
pub mod set_total;
pub mod suggest_basis;
pub mod validate;

/// Valueon - redevelopment feasibility calculator
#[derive(Parser)]
#[command(name = "valueon")]
#[command(version, about = "Valueon - redevelopment feasibility calculator")]
#[command(long_about = r#"
Valueon estimates the total cost of a housing redevelopment project and
solves the member base price per pyung that makes revenue cover it.

COMMANDS:
  init       → Save a starting snapshot (defaults or a document)
  analyze    → Print costs, unit prices and revenue
  validate   → Report inconsistent inputs
  set-count  → Change an allocation's unit count
  set-total  → Change a unit type's total and rescale its tiers
  suggest-basis → Recommend a calculation basis for cost items
  export     → Write the saved snapshot as JSON or YAML
  reset      → Forget the saved snapshot

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Validation failure
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file (defaults to ./valueon.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the saved snapshot
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Save a starting snapshot
    Init(init::InitArgs),

    /// Analyze a snapshot
    Analyze(analyze::AnalyzeArgs),

    /// Report advisory warnings for a snapshot
    Validate(validate::ValidateArgs),

    /// Set the unit count of an allocation
    #[command(name = "set-count")]
    SetCount(set_count::SetCountArgs),

    /// Set the total units of a unit type
    #[command(name = "set-total")]
    SetTotal(set_total::SetTotalArgs),

    /// Recommend a calculation basis for cost items
    #[command(name = "suggest-basis")]
    SuggestBasis(suggest_basis::SuggestBasisArgs),

    /// Export the saved snapshot
    Export(export::ExportArgs),

    /// Delete the saved snapshot
    Reset(reset::ResetArgs),
}

/// Settings shared by all commands.
pub struct Context {
    pub store: StoreConfig,
    pub format: OutputFormat,
    pub quiet: bool,
}

impl Context {
    pub fn new(cli: &Cli) -> Result<Self> {
        let config = CliConfig::load(cli.config.as_deref())?;
        let mut store = config.store_config();
        if let Some(dir) = &cli.data_dir {
            store = store.with_data_dir(dir);
        }
        Ok(Self {
            store,
            format: config.format,
            quiet: cli.quiet,
        })
    }

    pub fn open_session(&self) -> Session<JsonFileStore> {
        Session::open(JsonFileStore::new(&self.store))
    }

    /// Inputs from `--input`, or the saved session.
    pub fn load_inputs(&self, input: Option<&Path>) -> Result<AnalysisInputs> {
        match input {
            Some(path) => InputReader::read_file(path)
                .with_context(|| format!("Failed to read inputs from {}", path.display())),
            None => Ok(self.open_session().inputs().clone()),
        }
    }
}
