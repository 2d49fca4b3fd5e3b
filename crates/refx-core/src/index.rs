//! Lookup maps over parsed securities.
//!
//! Feeds arrive in file order and later rows supersede earlier ones, so
//! both maps overwrite on duplicate keys.

use std::collections::HashMap;

use crate::domain::{Cusip, SecurityLike};

/// Index securities by ticker symbol. Securities without a ticker are
/// left out.
pub fn by_ticker<S: SecurityLike>(securities: &[S]) -> HashMap<&str, &S> {
    let mut map = HashMap::new();
    for security in securities {
        if let Some(ticker) = security.ticker_symbol() {
            map.insert(ticker, security);
        }
    }
    map
}

/// Index securities by CUSIP.
pub fn by_cusip<S: SecurityLike>(securities: &[S]) -> HashMap<&Cusip, &S> {
    let mut map = HashMap::new();
    for security in securities {
        map.insert(security.cusip(), security);
    }
    map
}
