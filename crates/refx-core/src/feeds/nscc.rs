//! NSCC/DTCC basket composition file parser.
//!
//! The feed is a newline-delimited flat file of fixed-width ASCII records,
//! dispatched on a two-character type prefix: `01` opens a basket header,
//! `02` attaches a component to the most recent header, `09` is the file
//! trailer carrying the feed's own record count. Any other prefix is
//! structurally irrelevant and skipped.
//!
//! Monetary fields split the magnitude into integer and two-digit fraction
//! columns followed by a dedicated sign column; `'-'` negates, anything
//! else leaves the value positive. Each of the six monetary fields in the
//! header carries its own sign column.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::warn;

use crate::domain::{Basket, BasketComponent, Cusip, Security};
use crate::error::{FeedError, FeedWarning};

/// Inclusive 0-based column range of one positional field.
#[derive(Debug, Clone, Copy)]
struct Span {
    start: usize,
    end: usize,
}

impl Span {
    const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    fn extract<'a>(&self, line: &'a str) -> &'a str {
        line.get(self.start..=self.end).map_or("", str::trim)
    }
}

/// A signed monetary field: integer digits, two fraction digits, and the
/// trailing sign column.
#[derive(Debug, Clone, Copy)]
struct MoneySpan {
    int_part: Span,
    fraction: Span,
    sign: usize,
}

impl MoneySpan {
    const fn new(int_part: Span, fraction: Span, sign: usize) -> Self {
        Self {
            int_part,
            fraction,
            sign,
        }
    }
}

const TICKER: Span = Span::new(2, 16);
const CUSIP: Span = Span::new(17, 25);
const WHEN_ISSUED: usize = 26;
const FOREIGN: usize = 27;
const EXCHANGE: usize = 28;
const TRADE_DATE: Span = Span::new(29, 36);
/// Component count (01), share quantity (02), or declared total (09).
const RECORD_COUNT: Span = Span::new(37, 44);
const CREATION_UNITS: Span = Span::new(45, 52);
const ETF_TICKER: Span = Span::new(45, 59);
const NEW_SECURITY: usize = 72;

const EST_CASH_PER_UNIT: MoneySpan = MoneySpan::new(Span::new(53, 64), Span::new(65, 66), 67);
const EST_CASH_PER_RECEIPT: MoneySpan = MoneySpan::new(Span::new(68, 78), Span::new(79, 80), 81);
const NAV_PER_UNIT: MoneySpan = MoneySpan::new(Span::new(82, 92), Span::new(93, 94), 95);
const NAV_PER_RECEIPT: MoneySpan = MoneySpan::new(Span::new(96, 106), Span::new(107, 108), 109);
const TOTAL_CASH: MoneySpan = MoneySpan::new(Span::new(110, 120), Span::new(121, 122), 123);
const SHARES_OUTSTANDING: Span = Span::new(124, 135);
const DIVIDEND: MoneySpan = MoneySpan::new(Span::new(136, 146), Span::new(147, 148), 149);
/// Optional trailing column; the feed omits it on some days.
const CASH_INDICATOR: usize = 150;

const HEADER_MIN_LEN: usize = 150;
const DETAIL_MIN_LEN: usize = 45;
const TRAILER_MIN_LEN: usize = 45;

/// Decoded contents of one basket composition file.
#[derive(Debug, Clone, Default)]
pub struct BasketBatch {
    /// Baskets in file order, each owning its components.
    pub baskets: Vec<Basket>,
    /// Records consumed across types `01`, `02`, and `09`.
    pub records: u64,
    pub warnings: Vec<FeedWarning>,
}

/// Parse a basket composition file from a buffered reader.
pub fn parse_reader<R: BufRead>(reader: R) -> Result<BasketBatch, FeedError> {
    let mut batch = BasketBatch::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = index as u64 + 1;
        match line.get(0..2) {
            Some("01") => {
                require_len(&line, HEADER_MIN_LEN, "01", line_no)?;
                batch.records += 1;
                batch.baskets.push(decode_header(&line, line_no)?);
            }
            Some("02") => {
                require_len(&line, DETAIL_MIN_LEN, "02", line_no)?;
                batch.records += 1;
                let basket = batch
                    .baskets
                    .last_mut()
                    .ok_or(FeedError::OrphanComponent { line: line_no })?;
                basket.add_component(decode_detail(&line, line_no)?);
            }
            Some("09") => {
                require_len(&line, TRAILER_MIN_LEN, "09", line_no)?;
                batch.records += 1;
                let declared = lenient_u64(RECORD_COUNT.extract(&line));
                if declared != batch.records {
                    warn!(
                        "trailer declared {declared} records, consumed {}",
                        batch.records
                    );
                    batch.warnings.push(FeedWarning::RecordCountMismatch {
                        declared,
                        actual: batch.records,
                    });
                }
            }
            _ => {}
        }
    }

    Ok(batch)
}

/// Parse a basket composition file from disk.
pub fn parse_file(path: impl AsRef<Path>) -> Result<BasketBatch, FeedError> {
    parse_reader(BufReader::new(File::open(path)?))
}

fn decode_header(line: &str, line_no: u64) -> Result<Basket, FeedError> {
    let mut basket = Basket::new(decode_security(line, line_no)?);
    basket.declared_component_count = lenient_u32(RECORD_COUNT.extract(line));
    basket.creation_units_per_trade = lenient_u64(CREATION_UNITS.extract(line));
    basket.estimated_t1_cash_per_unit = signed_money(line, EST_CASH_PER_UNIT);
    basket.estimated_t1_cash_per_receipt = signed_money(line, EST_CASH_PER_RECEIPT);
    basket.nav_per_creation_unit = signed_money(line, NAV_PER_UNIT);
    basket.nav_per_index_receipt = signed_money(line, NAV_PER_RECEIPT);
    basket.total_cash_amount = signed_money(line, TOTAL_CASH);
    basket.total_shares_outstanding = lenient_u64(SHARES_OUTSTANDING.extract(line));
    basket.dividend_amount = signed_money(line, DIVIDEND);
    basket.cash_indicator = indicator(line, CASH_INDICATOR);
    Ok(basket)
}

fn decode_detail(line: &str, line_no: u64) -> Result<BasketComponent, FeedError> {
    let mut component = BasketComponent::new(
        decode_security(line, line_no)?,
        lenient_f64(RECORD_COUNT.extract(line)),
    );
    component.etf_ticker = optional(ETF_TICKER.extract(line));
    component.new_security_indicator = indicator(line, NEW_SECURITY);
    Ok(component)
}

/// Columns shared by header and detail records.
fn decode_security(line: &str, line_no: u64) -> Result<Security, FeedError> {
    let cusip = Cusip::parse(CUSIP.extract(line))
        .map_err(|source| FeedError::InvalidCusip { line: line_no, source })?;
    let mut security = Security::new(cusip);
    security.attrs.ticker_symbol = optional(TICKER.extract(line));
    security.attrs.when_issued = indicator(line, WHEN_ISSUED);
    security.attrs.foreign = indicator(line, FOREIGN);
    security.attrs.exchange_indicator = indicator(line, EXCHANGE);
    security.attrs.trade_date = optional(TRADE_DATE.extract(line));
    Ok(security)
}

fn require_len(
    line: &str,
    min: usize,
    record_type: &'static str,
    line_no: u64,
) -> Result<(), FeedError> {
    if line.len() < min {
        return Err(FeedError::TruncatedRecord {
            line: line_no,
            record_type,
            len: line.len(),
            min,
        });
    }
    Ok(())
}

fn signed_money(line: &str, span: MoneySpan) -> f64 {
    let magnitude = format!(
        "{}.{}",
        span.int_part.extract(line),
        span.fraction.extract(line)
    );
    let value: f64 = magnitude.parse().unwrap_or(0.0);
    if line.as_bytes().get(span.sign) == Some(&b'-') {
        -value
    } else {
        value
    }
}

fn indicator(line: &str, index: usize) -> Option<char> {
    line.get(index..=index)
        .and_then(|s| s.chars().next())
        .filter(|ch| !ch.is_whitespace())
}

fn optional(field: &str) -> Option<String> {
    if field.is_empty() {
        None
    } else {
        Some(field.to_string())
    }
}

/// Forgiving base-10 parse: leading digit run, anything else is zero.
fn lenient_u64(field: &str) -> u64 {
    leading_digits(field).parse().unwrap_or(0)
}

fn lenient_u32(field: &str) -> u32 {
    leading_digits(field).parse().unwrap_or(0)
}

fn lenient_f64(field: &str) -> f64 {
    let bytes = field.as_bytes();
    let mut end = 0;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => end += 1,
            b'.' if !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }
    field[..end].parse().unwrap_or(0.0)
}

fn leading_digits(field: &str) -> &str {
    field
        .find(|ch: char| !ch.is_ascii_digit())
        .map_or(field, |end| &field[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SecurityLike;
    use std::io::Write;

    const HEADER: &str = "01WREI           18383M47200220110624000000950005000000000000000291+0000000000000+0000162471058+0000000003249+0000000004503+0000005000000000000000000+";
    const AKR_DETAIL: &str =
        "02AKR            0042391090002011062400000193WREI           18383M472002";
    const ALX_DETAIL: &str =
        "02ALX            0147521090002011062400000013WREI           18383M472002";

    fn trailer(declared: u64) -> String {
        format!("09{}{declared:08}", " ".repeat(35))
    }

    fn parse(lines: &[&str]) -> Result<BasketBatch, FeedError> {
        parse_reader(lines.join("\n").as_bytes())
    }

    #[test]
    fn decodes_header_fields() {
        let batch = parse(&[HEADER]).expect("parse");
        assert_eq!(batch.baskets.len(), 1);
        assert_eq!(batch.records, 1);

        let basket = &batch.baskets[0];
        assert_eq!(basket.cusip().as_str(), "18383M472");
        assert_eq!(basket.ticker_symbol(), Some("WREI"));
        assert_eq!(basket.attrs().when_issued, Some('0'));
        assert_eq!(basket.attrs().foreign, Some('0'));
        assert_eq!(basket.attrs().exchange_indicator, Some('2'));
        assert_eq!(basket.attrs().trade_date.as_deref(), Some("20110624"));
        assert_eq!(basket.declared_component_count, 95);
        assert_eq!(basket.creation_units_per_trade, 50_000);
        assert_eq!(basket.estimated_t1_cash_per_unit, 2.91);
        assert_eq!(basket.estimated_t1_cash_per_receipt, 0.0);
        assert_eq!(basket.nav_per_creation_unit, 1_624_710.58);
        assert_eq!(basket.nav_per_index_receipt, 32.49);
        assert_eq!(basket.total_cash_amount, 45.03);
        assert_eq!(basket.total_shares_outstanding, 500_000);
        assert_eq!(basket.dividend_amount, 0.0);
        assert_eq!(basket.cash_indicator, None);
    }

    #[test]
    fn decodes_detail_fields() {
        let batch = parse(&[HEADER, AKR_DETAIL]).expect("parse");
        let basket = &batch.baskets[0];
        assert_eq!(basket.component_count(), 1);

        let component = basket
            .component(&Cusip::parse("004239109").expect("cusip"))
            .expect("component");
        assert_eq!(component.ticker_symbol(), Some("AKR"));
        assert_eq!(component.share_quantity, 193.0);
        assert_eq!(component.etf_ticker.as_deref(), Some("WREI"));
        assert_eq!(component.new_security_indicator, None);
    }

    #[test]
    fn decodes_trailing_indicator_columns_when_present() {
        let header = format!("{HEADER}2");
        let detail = format!("{AKR_DETAIL}1");
        let batch = parse(&[&header, &detail]).expect("parse");

        let basket = &batch.baskets[0];
        assert_eq!(basket.cash_indicator, Some('2'));

        let component = basket
            .component(&Cusip::parse("004239109").expect("cusip"))
            .expect("component");
        assert_eq!(component.new_security_indicator, Some('1'));
    }

    #[test]
    fn attaches_components_to_most_recent_header() {
        let batch = parse(&[HEADER, AKR_DETAIL, ALX_DETAIL]).expect("parse");
        assert_eq!(batch.baskets[0].component_count(), 2);
        assert_eq!(batch.records, 3);
    }

    #[test]
    fn duplicate_detail_cusip_replaces_within_basket() {
        let batch = parse(&[HEADER, AKR_DETAIL, AKR_DETAIL, ALX_DETAIL]).expect("parse");
        assert_eq!(batch.baskets[0].component_count(), 2);
    }

    #[test]
    fn minus_sign_column_negates_monetary_field() {
        let mut negated = HEADER.to_string();
        negated.replace_range(67..68, "-");
        let batch = parse_reader(negated.as_bytes()).expect("parse");
        assert_eq!(batch.baskets[0].estimated_t1_cash_per_unit, -2.91);
        // Remaining fields keep their own signs.
        assert_eq!(batch.baskets[0].total_cash_amount, 45.03);
    }

    #[test]
    fn orphan_component_is_fatal() {
        let err = parse(&[AKR_DETAIL]).expect_err("must fail");
        assert!(matches!(err, FeedError::OrphanComponent { line: 1 }));
    }

    #[test]
    fn truncated_header_is_fatal() {
        let err = parse(&[&HEADER[..100]]).expect_err("must fail");
        assert!(matches!(
            err,
            FeedError::TruncatedRecord {
                record_type: "01",
                len: 100,
                ..
            }
        ));
    }

    #[test]
    fn blank_cusip_is_fatal() {
        let mut blanked = HEADER.to_string();
        blanked.replace_range(17..26, "         ");
        let err = parse_reader(blanked.as_bytes()).expect_err("must fail");
        assert!(matches!(err, FeedError::InvalidCusip { line: 1, .. }));
    }

    #[test]
    fn matching_trailer_produces_no_warning() {
        let trailer = trailer(4);
        let batch = parse(&[HEADER, AKR_DETAIL, ALX_DETAIL, &trailer]).expect("parse");
        assert_eq!(batch.records, 4);
        assert!(batch.warnings.is_empty());
    }

    #[test]
    fn mismatched_trailer_warns_once_and_keeps_data() {
        let trailer = trailer(99);
        let batch = parse(&[HEADER, AKR_DETAIL, ALX_DETAIL, &trailer]).expect("parse");
        assert_eq!(batch.baskets[0].component_count(), 2);
        assert_eq!(
            batch.warnings,
            vec![FeedWarning::RecordCountMismatch {
                declared: 99,
                actual: 4,
            }]
        );
    }

    #[test]
    fn unknown_record_types_are_skipped_and_not_counted() {
        let trailer = trailer(2);
        let batch = parse(&["00 file header from the clearinghouse", HEADER, "", &trailer])
            .expect("parse");
        assert_eq!(batch.baskets.len(), 1);
        assert_eq!(batch.records, 2);
        assert!(batch.warnings.is_empty());
    }

    #[test]
    fn parses_file_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("basket-composition.txt");
        let mut file = File::create(&path).expect("create");
        writeln!(file, "{HEADER}").expect("write");
        writeln!(file, "{AKR_DETAIL}").expect("write");
        writeln!(file, "{}", trailer(3)).expect("write");
        drop(file);

        let batch = parse_file(&path).expect("parse");
        assert_eq!(batch.baskets.len(), 1);
        assert_eq!(batch.baskets[0].component_count(), 1);
        assert!(batch.warnings.is_empty());
    }
}
