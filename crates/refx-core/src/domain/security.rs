use serde::{Deserialize, Serialize};

use crate::domain::cusip::Cusip;

/// Industry/sector classification block carried by the NYSE Group feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub industry_code: Option<String>,
    pub industry_name: Option<String>,
    pub super_sector_code: Option<String>,
    pub super_sector_name: Option<String>,
    pub sector_code: Option<String>,
    pub sector_name: Option<String>,
    pub sub_sector_code: Option<String>,
    pub sub_sector_name: Option<String>,
}

/// Descriptive attributes shared by every security-bearing entity.
///
/// Each feed carries a different subset, so every field is optional and an
/// absent value stays `None` rather than collapsing to an empty string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecurityAttributes {
    pub ticker_symbol: Option<String>,
    pub security_type: Option<String>,
    pub cik: Option<String>,
    pub isin: Option<String>,
    pub sedol: Option<String>,
    pub valoren: Option<String>,
    pub exchange: Option<String>,
    pub primary_market: Option<String>,
    pub name: Option<String>,
    pub company_name: Option<String>,
    pub short_name: Option<String>,
    pub issue: Option<String>,
    pub tape: Option<String>,
    pub lot: Option<u32>,
    pub board_lot: Option<u32>,
    /// CCYYMMDD, stored as feed text.
    pub trade_date: Option<String>,
    pub when_issued: Option<char>,
    pub foreign: Option<char>,
    pub exchange_indicator: Option<char>,
    pub classification: Classification,
}

/// A single tradable instrument, created by a parser for exactly one source
/// record. The CUSIP is fixed at construction; everything else is free-form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Security {
    cusip: Cusip,
    pub attrs: SecurityAttributes,
}

impl Security {
    pub fn new(cusip: Cusip) -> Self {
        Self {
            cusip,
            attrs: SecurityAttributes::default(),
        }
    }

    pub fn cusip(&self) -> &Cusip {
        &self.cusip
    }
}

/// Access to the security core of an entity.
///
/// Baskets and components embed a `Security` by value instead of inheriting
/// from it; index builders and renderers only need this view.
pub trait SecurityLike {
    fn security(&self) -> &Security;

    fn cusip(&self) -> &Cusip {
        self.security().cusip()
    }

    fn attrs(&self) -> &SecurityAttributes {
        &self.security().attrs
    }

    fn ticker_symbol(&self) -> Option<&str> {
        self.attrs().ticker_symbol.as_deref()
    }
}

impl SecurityLike for Security {
    fn security(&self) -> &Security {
        self
    }
}
