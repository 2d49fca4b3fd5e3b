//! Component-to-ETF membership reporting.
//!
//! Answers "which ETF baskets hold this component?" and writes the
//! answer as a ragged CSV: a count column, the component, then one
//! column per holding basket.

use std::io::Write;

use tracing::debug;

use crate::domain::{Basket, SecurityLike};

/// Inverted basket composition: each component mapped to every ETF
/// basket that carries it, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Membership {
    memberships: std::collections::BTreeMap<String, Vec<String>>,
}

impl Membership {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `etf` holds `component`. Repeated calls append, so a
    /// component held by several baskets lists each of them.
    pub fn insert(&mut self, component: impl Into<String>, etf: impl Into<String>) {
        self.memberships
            .entry(component.into())
            .or_default()
            .push(etf.into());
    }

    /// Invert parsed baskets into ticker-keyed memberships. Components
    /// without a ticker are skipped, as are baskets with no usable ETF
    /// label.
    pub fn from_baskets(baskets: &[Basket]) -> Self {
        let mut membership = Self::new();
        for basket in baskets {
            for component in basket.components() {
                let Some(component_ticker) = component.ticker_symbol() else {
                    debug!("skipping component {} without ticker", component.cusip());
                    continue;
                };
                let Some(etf) = basket
                    .ticker_symbol()
                    .or(component.etf_ticker.as_deref())
                else {
                    debug!("skipping basket {} without ticker", basket.cusip());
                    continue;
                };
                membership.insert(component_ticker, etf);
            }
        }
        membership
    }

    /// ETF baskets holding `component`, or `None` if it appears nowhere.
    pub fn get(&self, component: &str) -> Option<&[String]> {
        self.memberships.get(component).map(Vec::as_slice)
    }

    /// Number of distinct components.
    pub fn len(&self) -> usize {
        self.memberships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memberships.is_empty()
    }

    /// Component rows in ticker order, each with its holding baskets.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.memberships
            .iter()
            .map(|(component, etfs)| (component.as_str(), etfs.as_slice()))
    }

    /// Write the report. Rows vary in width with the number of holding
    /// baskets, hence the flexible writer.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut csv_writer = csv::WriterBuilder::new().flexible(true).from_writer(writer);
        csv_writer.write_record(["Count", "Component Ticker", "ETF Baskets"])?;
        for (component, etfs) in self.iter() {
            let mut record = Vec::with_capacity(etfs.len() + 2);
            record.push(etfs.len().to_string());
            record.push(component.to_string());
            record.extend(etfs.iter().cloned());
            csv_writer.write_record(&record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}
