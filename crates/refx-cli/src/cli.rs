//! CLI argument definitions for refx.
//!
//! Three subcommands cover the processing surface:
//!
//! | Command | Description |
//! |---------|-------------|
//! | `instruments` | Build instrument reference XML from symbol feeds |
//! | `baskets` | Parse an NSCC basket file into composition/stub XML |
//! | `report` | Write the component-to-ETF membership CSV |

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Securities reference-data feed processor.
#[derive(Debug, Parser)]
#[command(name = "refx", author, version, about = "Securities reference-data feed processor")]
pub struct Cli {
    /// Log filter used when RUST_LOG is unset (error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the instrument reference XML from exchange and vendor symbol feeds.
    Instruments(InstrumentsArgs),

    /// Parse an NSCC basket composition file and write its XML documents.
    Baskets(BasketsArgs),

    /// Write the component-to-ETF membership report.
    Report(ReportArgs),
}

/// Arguments for the `instruments` command.
#[derive(Debug, Args)]
pub struct InstrumentsArgs {
    /// NSX symbol file(s).
    #[arg(long = "nsx", value_name = "FILE")]
    pub nsx: Vec<PathBuf>,

    /// Direct Edge (EDGA/EDGX) symbol file(s).
    #[arg(long = "edge", value_name = "FILE")]
    pub edge: Vec<PathBuf>,

    /// NYSE Group symbol file(s).
    #[arg(long = "nyse", value_name = "FILE")]
    pub nyse: Vec<PathBuf>,

    /// Xignite master securities file(s).
    #[arg(long = "xignite", value_name = "FILE")]
    pub xignite: Vec<PathBuf>,

    /// Venue MIC to emit identifiers for; repeat for several venues.
    #[arg(long = "mic", value_name = "MIC", default_values_t = ["BATS".to_string()])]
    pub mics: Vec<String>,

    /// Listings table (cusip,mic,symbol CSV) for venue symbol resolution.
    /// Without it no instrument resolves and identifier lists stay empty.
    #[arg(long, value_name = "FILE")]
    pub xref: Option<PathBuf>,

    /// Output path for the instrument reference XML.
    #[arg(long, short = 'o', value_name = "FILE", default_value = "instruments.xml")]
    pub out: PathBuf,
}

/// Arguments for the `baskets` command.
#[derive(Debug, Args)]
pub struct BasketsArgs {
    /// NSCC basket composition flat file.
    pub infile: PathBuf,

    /// Output path for the basket composition XML.
    #[arg(long, value_name = "FILE")]
    pub composition_out: Option<PathBuf>,

    /// Output path for the stub basket instrument XML.
    #[arg(long, value_name = "FILE")]
    pub stubs_out: Option<PathBuf>,
}

/// Arguments for the `report` command.
#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Aggregate from an NSCC basket file instead of the Redis store.
    #[arg(long, short = 'i', value_name = "FILE")]
    pub infile: Option<PathBuf>,

    /// Redis URL for the basket store; overrides REFX_REDIS_URL.
    #[arg(long, value_name = "URL")]
    pub redis_url: Option<String>,

    /// Output path for the membership CSV.
    #[arg(long, short = 'o', value_name = "FILE", default_value = "comp-etfs-report.csv")]
    pub out: PathBuf,
}
