//! Venue symbol cross-referencing.
//!
//! Instrument XML identifies a security on each venue by the symbol that
//! venue lists it under, which is not always the primary ticker. The
//! [`CrossReference`] trait is the seam: renderers ask it for the
//! venue-local symbol and emit an identifier only when one comes back.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::domain::Cusip;
use crate::error::FeedError;

/// Resolves a security to its symbol on a given venue.
pub trait CrossReference {
    /// The symbol `cusip` trades under on the venue identified by `mic`,
    /// or `None` when the security is not listed there.
    fn resolve(&self, cusip: &Cusip, mic: &str) -> Option<String>;
}

/// A resolver with no listings. Every lookup misses, so renderers fed
/// with it emit instruments without venue identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCrossReference;

impl CrossReference for NullCrossReference {
    fn resolve(&self, _cusip: &Cusip, _mic: &str) -> Option<String> {
        None
    }
}

#[derive(Debug, Deserialize)]
struct ListingRow {
    cusip: Cusip,
    mic: String,
    symbol: String,
}

/// An in-memory listings table loaded from a `cusip,mic,symbol` CSV file.
#[derive(Debug, Clone, Default)]
pub struct TableCrossReference {
    listings: HashMap<Cusip, HashMap<String, String>>,
}

impl TableCrossReference {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the symbol a venue lists `cusip` under. A repeated
    /// `(cusip, mic)` pair replaces the earlier symbol.
    pub fn insert(&mut self, cusip: Cusip, mic: impl Into<String>, symbol: impl Into<String>) {
        self.listings
            .entry(cusip)
            .or_default()
            .insert(mic.into(), symbol.into());
    }

    /// Load listings from a reader of `cusip,mic,symbol` rows.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, FeedError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut table = Self::new();
        for result in csv_reader.deserialize() {
            let row: ListingRow = result?;
            table.insert(row.cusip, row.mic, row.symbol);
        }
        Ok(table)
    }

    /// Load listings from a CSV file on disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FeedError> {
        Self::from_reader(File::open(path)?)
    }

    pub fn len(&self) -> usize {
        self.listings.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

impl CrossReference for TableCrossReference {
    fn resolve(&self, cusip: &Cusip, mic: &str) -> Option<String> {
        self.listings.get(cusip)?.get(mic).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cusip(value: &str) -> Cusip {
        Cusip::parse(value).expect("cusip")
    }

    #[test]
    fn null_resolver_never_matches() {
        let xref = NullCrossReference;
        assert_eq!(xref.resolve(&cusip("004239109"), "BATS"), None);
    }

    #[test]
    fn resolves_per_venue_symbols() {
        let data = "cusip,mic,symbol\n\
                    004239109,BATS,AKR\n\
                    004239109,XNGS,AKR.Q\n\
                    084670702,BATS,BRK.B\n";
        let xref = TableCrossReference::from_reader(data.as_bytes()).expect("load");
        assert_eq!(xref.len(), 3);

        let akr = cusip("004239109");
        assert_eq!(xref.resolve(&akr, "BATS").as_deref(), Some("AKR"));
        assert_eq!(xref.resolve(&akr, "XNGS").as_deref(), Some("AKR.Q"));
        assert_eq!(xref.resolve(&akr, "XNYS"), None);
        assert_eq!(xref.resolve(&cusip("999999999"), "BATS"), None);
    }

    #[test]
    fn padded_cusips_match_feed_keys() {
        let data = "cusip,mic,symbol\n4239109,BATS,AKR\n";
        let xref = TableCrossReference::from_reader(data.as_bytes()).expect("load");
        assert_eq!(
            xref.resolve(&cusip("004239109"), "BATS").as_deref(),
            Some("AKR")
        );
    }
}
