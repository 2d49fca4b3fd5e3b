use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::cusip::Cusip;
use crate::domain::security::{Security, SecurityLike};
use crate::error::UndefinedRatioError;

/// One constituent leg of a basket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasketComponent {
    security: Security,
    /// Shares per creation unit; the feed defines this as non-negative.
    pub share_quantity: f64,
    /// Index receipt symbol echoed on the detail record.
    pub etf_ticker: Option<String>,
    /// `N` = new CUSIP, absent = existing CUSIP.
    pub new_security_indicator: Option<char>,
}

impl BasketComponent {
    pub fn new(security: Security, share_quantity: f64) -> Self {
        Self {
            security,
            share_quantity,
            etf_ticker: None,
            new_security_indicator: None,
        }
    }
}

impl SecurityLike for BasketComponent {
    fn security(&self) -> &Security {
        &self.security
    }
}

/// An ETF creation/redemption basket with its owned component legs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Basket {
    security: Security,
    /// Component count declared by the header record. Advisory only; the
    /// authoritative count is `component_count`.
    pub declared_component_count: u32,
    pub creation_units_per_trade: u64,
    pub estimated_t1_cash_per_unit: f64,
    pub estimated_t1_cash_per_receipt: f64,
    pub nav_per_creation_unit: f64,
    pub nav_per_index_receipt: f64,
    pub total_cash_amount: f64,
    pub total_shares_outstanding: u64,
    pub dividend_amount: f64,
    /// `1` = cash only, `2` = cash or components, other = components only.
    pub cash_indicator: Option<char>,
    components: BTreeMap<Cusip, BasketComponent>,
}

impl Basket {
    pub fn new(security: Security) -> Self {
        Self {
            security,
            declared_component_count: 0,
            creation_units_per_trade: 0,
            estimated_t1_cash_per_unit: 0.0,
            estimated_t1_cash_per_receipt: 0.0,
            nav_per_creation_unit: 0.0,
            nav_per_index_receipt: 0.0,
            total_cash_amount: 0.0,
            total_shares_outstanding: 0,
            dividend_amount: 0.0,
            cash_indicator: None,
            components: BTreeMap::new(),
        }
    }

    /// Insert or replace a component keyed by its CUSIP. A later record
    /// with the same CUSIP silently wins.
    pub fn add_component(&mut self, component: BasketComponent) {
        self.components.insert(component.cusip().clone(), component);
    }

    /// Size of the owned component mapping after parsing, which overrides
    /// whatever the header declared.
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn component(&self, cusip: &Cusip) -> Option<&BasketComponent> {
        self.components.get(cusip)
    }

    /// Components in CUSIP order.
    pub fn components(&self) -> impl Iterator<Item = &BasketComponent> {
        self.components.values()
    }

    /// Net asset value per creation unit, derived from total cash.
    pub fn nav_per_unit(&self) -> Result<f64, UndefinedRatioError> {
        Ok(self.total_cash_amount / self.ratio_denominator()?)
    }

    /// Weighting of one leg relative to the creation unit size.
    pub fn leg_ratio(&self, component: &BasketComponent) -> Result<f64, UndefinedRatioError> {
        Ok(component.share_quantity / self.ratio_denominator()?)
    }

    fn ratio_denominator(&self) -> Result<f64, UndefinedRatioError> {
        if self.creation_units_per_trade == 0 {
            return Err(UndefinedRatioError {
                basket: self
                    .ticker_symbol()
                    .unwrap_or(self.cusip().as_str())
                    .to_string(),
            });
        }
        Ok(self.creation_units_per_trade as f64)
    }
}

impl SecurityLike for Basket {
    fn security(&self) -> &Security {
        &self.security
    }
}
