mod baskets;
mod instruments;
mod report;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub fn run(cli: &Cli) -> Result<(), CliError> {
    match &cli.command {
        Command::Instruments(args) => instruments::run(args),
        Command::Baskets(args) => baskets::run(args),
        Command::Report(args) => report::run(args),
    }
}
