//! NYSE Group symbol file parser.
//!
//! Layout: `Symbol,CUSIP,CompanyName,NYSEGroupMarket,PrimaryMarket,
//! IndustryCode,SuperSectorCode,SectorCode,SubSectorCode,IndustryName,
//! SuperSectorName,SectorName,SubSectorName`. Share classes arrive as
//! `BRK A` and are normalized to the dotted `BRK.A` convention.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::domain::Security;
use crate::error::FeedError;
use crate::feeds::nsx::parse_row_cusip;

#[derive(Debug, Deserialize)]
struct Row {
    #[serde(rename = "Symbol")]
    symbol: Option<String>,
    #[serde(rename = "CUSIP")]
    cusip: Option<String>,
    #[serde(rename = "CompanyName")]
    company_name: Option<String>,
    #[serde(rename = "NYSEGroupMarket")]
    nyse_group_market: Option<String>,
    #[serde(rename = "PrimaryMarket")]
    primary_market: Option<String>,
    #[serde(rename = "IndustryCode")]
    industry_code: Option<String>,
    #[serde(rename = "SuperSectorCode")]
    super_sector_code: Option<String>,
    #[serde(rename = "SectorCode")]
    sector_code: Option<String>,
    #[serde(rename = "SubSectorCode")]
    sub_sector_code: Option<String>,
    #[serde(rename = "IndustryName")]
    industry_name: Option<String>,
    #[serde(rename = "SuperSectorName")]
    super_sector_name: Option<String>,
    #[serde(rename = "SectorName")]
    sector_name: Option<String>,
    #[serde(rename = "SubSectorName")]
    sub_sector_name: Option<String>,
}

/// Parse a NYSE Group symbol file from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<Vec<Security>, FeedError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut securities = Vec::new();
    for result in csv_reader.deserialize() {
        let row: Row = result?;
        let Some(cusip) = parse_row_cusip(row.cusip.as_deref(), row.symbol.as_deref()) else {
            continue;
        };

        let mut security = Security::new(cusip);
        security.attrs.ticker_symbol = row.symbol.map(|symbol| symbol.replacen(' ', ".", 1));
        security.attrs.exchange = row.nyse_group_market;
        security.attrs.primary_market = row.primary_market;
        security.attrs.company_name = row.company_name;
        security.attrs.classification.industry_code = row.industry_code;
        security.attrs.classification.industry_name = row.industry_name;
        security.attrs.classification.super_sector_code = row.super_sector_code;
        security.attrs.classification.super_sector_name = row.super_sector_name;
        security.attrs.classification.sector_code = row.sector_code;
        security.attrs.classification.sector_name = row.sector_name;
        security.attrs.classification.sub_sector_code = row.sub_sector_code;
        security.attrs.classification.sub_sector_name = row.sub_sector_name;
        securities.push(security);
    }

    Ok(securities)
}

/// Parse a NYSE Group symbol file from disk.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Vec<Security>, FeedError> {
    parse_reader(File::open(path)?)
}
