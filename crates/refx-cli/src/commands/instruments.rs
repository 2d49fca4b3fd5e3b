use std::fs::File;
use std::io::{BufWriter, Write};

use refx_core::feeds::{edge, nsx, nyse, xignite};
use refx_core::render::instruments::write_instruments;
use refx_core::{CrossReference, NullCrossReference, Security, TableCrossReference};

use crate::cli::InstrumentsArgs;
use crate::error::CliError;

pub fn run(args: &InstrumentsArgs) -> Result<(), CliError> {
    if args.nsx.is_empty() && args.edge.is_empty() && args.nyse.is_empty() && args.xignite.is_empty()
    {
        return Err(CliError::Usage(
            "at least one feed file is required (--nsx, --edge, --nyse, or --xignite)".to_string(),
        ));
    }

    // Feed order matters downstream: index maps built from this list keep
    // the last security per ticker, so later feeds supersede earlier ones.
    let mut securities: Vec<Security> = Vec::new();
    for path in &args.nsx {
        securities.extend(nsx::parse_file(path)?);
    }
    for path in &args.edge {
        securities.extend(edge::parse_file(path)?);
    }
    for path in &args.nyse {
        securities.extend(nyse::parse_file(path)?);
    }
    for path in &args.xignite {
        securities.extend(xignite::parse_file(path)?);
    }

    let xref: Box<dyn CrossReference> = match &args.xref {
        Some(path) => Box::new(TableCrossReference::from_file(path)?),
        None => Box::new(NullCrossReference),
    };

    let mut out = BufWriter::new(File::create(&args.out)?);
    write_instruments(&mut out, &securities, &args.mics, xref.as_ref())?;
    out.flush()?;

    eprintln!(
        "✓ Wrote {} instruments to {}",
        securities.len(),
        args.out.display()
    );
    Ok(())
}
