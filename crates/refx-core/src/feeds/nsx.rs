//! NSX symbol list parser.
//!
//! Layout: `SYMBOL,CUSIP,TAPE,IS_TEST`. Test symbols (`IS_TEST` other than
//! `N`) are dropped, and CUSIPs arrive with leading zeros stripped.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::{Cusip, Security};
use crate::error::FeedError;

#[derive(Debug, Deserialize)]
struct Row {
    #[serde(rename = "SYMBOL")]
    symbol: Option<String>,
    #[serde(rename = "CUSIP")]
    cusip: Option<String>,
    #[serde(rename = "TAPE")]
    tape: Option<String>,
    #[serde(rename = "IS_TEST")]
    is_test: Option<String>,
}

/// Parse an NSX symbol list from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<Vec<Security>, FeedError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut securities = Vec::new();
    for result in csv_reader.deserialize() {
        let row: Row = result?;
        if row.is_test.as_deref() != Some("N") {
            debug!("skipping test symbol {:?}", row.symbol);
            continue;
        }
        let Some(cusip) = parse_row_cusip(row.cusip.as_deref(), row.symbol.as_deref()) else {
            continue;
        };

        let mut security = Security::new(cusip);
        security.attrs.ticker_symbol = row.symbol;
        security.attrs.tape = row.tape;
        securities.push(security);
    }

    Ok(securities)
}

/// Parse an NSX symbol list file from disk.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Vec<Security>, FeedError> {
    parse_reader(File::open(path)?)
}

/// Shared row-level CUSIP handling for the delimited feeds: rows without a
/// usable CUSIP are skipped, not fatal.
pub(crate) fn parse_row_cusip(cusip: Option<&str>, symbol: Option<&str>) -> Option<Cusip> {
    let raw = match cusip {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => {
            debug!("skipping row without cusip (symbol {symbol:?})");
            return None;
        }
    };
    match Cusip::parse(raw) {
        Ok(cusip) => Some(cusip),
        Err(error) => {
            warn!("skipping row with invalid cusip (symbol {symbol:?}): {error}");
            None
        }
    }
}
