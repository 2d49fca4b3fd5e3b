//! EDGE symbol list parser.
//!
//! Layout: `CUSIP,Symbol,Ext,Company Name,Primary Market,Round Lot Size,
//! Min Order Qty`. When a symbol extension is present the ticker becomes
//! `Symbol.Ext` and the extension doubles as the security type.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::domain::Security;
use crate::error::FeedError;
use crate::feeds::nsx::parse_row_cusip;

#[derive(Debug, Deserialize)]
struct Row {
    #[serde(rename = "CUSIP")]
    cusip: Option<String>,
    #[serde(rename = "Symbol")]
    symbol: Option<String>,
    #[serde(rename = "Ext")]
    ext: Option<String>,
    #[serde(rename = "Company Name")]
    company_name: Option<String>,
    #[serde(rename = "Primary Market")]
    primary_market: Option<String>,
    #[serde(rename = "Round Lot Size")]
    round_lot_size: Option<String>,
    #[serde(rename = "Min Order Qty")]
    min_order_qty: Option<String>,
}

/// Parse an EDGE symbol list from a reader.
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
        security.attrs.ticker_symbol = match (row.symbol, &row.ext) {
            (Some(symbol), Some(ext)) => Some(format!("{symbol}.{ext}")),
            (symbol, None) => symbol,
            (None, Some(_)) => None,
        };
        security.attrs.security_type = row.ext;
        security.attrs.company_name = row.company_name;
        security.attrs.primary_market = row.primary_market;
        security.attrs.board_lot = row.round_lot_size.as_deref().and_then(parse_quantity);
        security.attrs.lot = row.min_order_qty.as_deref().and_then(parse_quantity);
        securities.push(security);
    }

    Ok(securities)
}

/// Parse an EDGE symbol list file from disk.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Vec<Security>, FeedError> {
    parse_reader(File::open(path)?)
}

fn parse_quantity(field: &str) -> Option<u32> {
    field.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_columns_and_joins_symbol_extension() {
        let data = "CUSIP,Symbol,Ext,Company Name,Primary Market,Round Lot Size,Min Order Qty\n\
                    00846U101,A,,AGILENT TECHNOLOGIES INC,NYSE,100,0\n\
                    084670108,BRK,B,BERKSHIRE HATHAWAY INC,NYSE,100,1\n";
        let securities = parse_reader(data.as_bytes()).expect("parse");
        assert_eq!(securities.len(), 2);

        let agilent = &securities[0];
        assert_eq!(agilent.cusip().as_str(), "00846U101");
        assert_eq!(agilent.attrs.ticker_symbol.as_deref(), Some("A"));
        assert_eq!(agilent.attrs.security_type, None);
        assert_eq!(
            agilent.attrs.company_name.as_deref(),
            Some("AGILENT TECHNOLOGIES INC")
        );
        assert_eq!(agilent.attrs.primary_market.as_deref(), Some("NYSE"));
        assert_eq!(agilent.attrs.board_lot, Some(100));
        assert_eq!(agilent.attrs.lot, Some(0));

        let berkshire = &securities[1];
        assert_eq!(berkshire.attrs.ticker_symbol.as_deref(), Some("BRK.B"));
        assert_eq!(berkshire.attrs.security_type.as_deref(), Some("B"));
    }

    #[test]
    fn unparseable_lot_sizes_stay_unset() {
        let data = "CUSIP,Symbol,Ext,Company Name,Primary Market,Round Lot Size,Min Order Qty\n\
                    00846U101,A,,AGILENT TECHNOLOGIES INC,NYSE,n/a,\n";
        let securities = parse_reader(data.as_bytes()).expect("parse");
        assert_eq!(securities[0].attrs.board_lot, None);
        assert_eq!(securities[0].attrs.lot, None);
    }
}
