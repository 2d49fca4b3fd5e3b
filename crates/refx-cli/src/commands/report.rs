use std::fs::File;
use std::io::{BufWriter, Write};

use refx_core::feeds::nscc;
use refx_core::Membership;
use refx_store::{BasketStore, StoreConfig};

use crate::cli::ReportArgs;
use crate::error::CliError;

pub fn run(args: &ReportArgs) -> Result<(), CliError> {
    let membership = match &args.infile {
        // File-backed reports resolve tickers from the parsed baskets.
        Some(path) => {
            let batch = nscc::parse_file(path)?;
            for warning in &batch.warnings {
                eprintln!("warning: {warning}");
            }
            Membership::from_baskets(&batch.baskets)
        }
        // Store-backed reports are CUSIP-keyed; the store holds no tickers.
        None => {
            let config = match &args.redis_url {
                Some(url) => StoreConfig::with_url(url),
                None => StoreConfig::default(),
            };
            let mut store = BasketStore::connect(config)?;
            store.memberships()?
        }
    };

    let mut out = BufWriter::new(File::create(&args.out)?);
    membership.write_csv(&mut out)?;
    out.flush()?;

    eprintln!(
        "✓ Wrote {} components to {}",
        membership.len(),
        args.out.display()
    );
    Ok(())
}
