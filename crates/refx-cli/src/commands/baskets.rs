use std::fs::File;
use std::io::{BufWriter, Write};

use refx_core::feeds::nscc;
use refx_core::render::baskets::write_basket_composition;
use refx_core::render::instruments::write_stub_basket_instruments;

use crate::cli::BasketsArgs;
use crate::error::CliError;

pub fn run(args: &BasketsArgs) -> Result<(), CliError> {
    if args.composition_out.is_none() && args.stubs_out.is_none() {
        return Err(CliError::Usage(
            "nothing to do: pass --composition-out and/or --stubs-out".to_string(),
        ));
    }

    let batch = nscc::parse_file(&args.infile)?;
    for warning in &batch.warnings {
        eprintln!("warning: {warning}");
    }

    if let Some(path) = &args.composition_out {
        let mut out = BufWriter::new(File::create(path)?);
        write_basket_composition(&mut out, &batch.baskets)?;
        out.flush()?;
        eprintln!("✓ Wrote {} baskets to {}", batch.baskets.len(), path.display());
    }

    if let Some(path) = &args.stubs_out {
        let mut out = BufWriter::new(File::create(path)?);
        write_stub_basket_instruments(&mut out, &batch.baskets)?;
        out.flush()?;
        eprintln!(
            "✓ Wrote {} stub instruments to {}",
            batch.baskets.len(),
            path.display()
        );
    }

    Ok(())
}
