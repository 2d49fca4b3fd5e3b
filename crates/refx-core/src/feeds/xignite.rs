//! Xignite master securities file parser.
//!
//! The vendor exports its column names with a leading space (for example
//! `" Records Record Symbol"`), so this reader must leave headers
//! untrimmed for the renames below to match. Rows without a symbol are
//! vendor padding and are dropped.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::domain::Security;
use crate::error::FeedError;
use crate::feeds::nsx::parse_row_cusip;

#[derive(Debug, Deserialize)]
struct Row {
    #[serde(rename = " Records Record Symbol")]
    symbol: Option<String>,
    #[serde(rename = " Records Record CUSIP")]
    cusip: Option<String>,
    #[serde(rename = " Records Record CIK")]
    cik: Option<String>,
    #[serde(rename = " Records Record ISIN")]
    isin: Option<String>,
    #[serde(rename = " Records Record SEDOL")]
    sedol: Option<String>,
    #[serde(rename = " Records Record Valoren")]
    valoren: Option<String>,
    #[serde(rename = " Records Record Exchange")]
    exchange: Option<String>,
    #[serde(rename = " Records Record Name")]
    name: Option<String>,
    #[serde(rename = " Records Record ShortName")]
    short_name: Option<String>,
    #[serde(rename = " Records Record Issue")]
    issue: Option<String>,
    #[serde(rename = " Records Record Sector")]
    sector: Option<String>,
    #[serde(rename = " Records Record Industry")]
    industry: Option<String>,
}

/// Parse a master securities file from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<Vec<Security>, FeedError> {
    // Trim::Fields, not Trim::All: header names keep their leading space.
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Fields)
        .from_reader(reader);

    let mut securities = Vec::new();
    for result in csv_reader.deserialize() {
        let row: Row = result?;
        let Some(symbol) = row.symbol else {
            debug!("skipping master row without symbol");
            continue;
        };
        let Some(cusip) = parse_row_cusip(row.cusip.as_deref(), Some(&symbol)) else {
            continue;
        };

        let mut security = Security::new(cusip);
        security.attrs.ticker_symbol = Some(symbol);
        security.attrs.cik = row.cik;
        security.attrs.isin = row.isin;
        security.attrs.sedol = row.sedol;
        security.attrs.valoren = row.valoren;
        security.attrs.exchange = row.exchange;
        security.attrs.name = row.name;
        security.attrs.short_name = row.short_name;
        security.attrs.issue = row.issue;
        security.attrs.classification.sector_name = row.sector;
        security.attrs.classification.industry_name = row.industry;
        securities.push(security);
    }

    Ok(securities)
}

/// Parse a master securities file from disk.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Vec<Security>, FeedError> {
    parse_reader(File::open(path)?)
}
