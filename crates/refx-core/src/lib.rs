//! Core contracts for refx.
//!
//! This crate contains:
//! - The security/basket domain model and identifier validation
//! - Feed parsers (NSCC basket flat file, exchange and vendor symbol lists)
//! - Ticker/CUSIP index maps and the venue cross-reference seam
//! - Writers for the downstream instrument and basket XML documents
//! - The component/ETF membership report

pub mod domain;
pub mod error;
pub mod feeds;
pub mod index;
pub mod render;
pub mod report;
pub mod xref;

pub use domain::{
    Basket, BasketComponent, Classification, Cusip, Security, SecurityAttributes, SecurityLike,
};
pub use error::{FeedError, FeedWarning, RenderError, UndefinedRatioError, ValidationError};
pub use feeds::nscc::BasketBatch;
pub use index::{by_cusip, by_ticker};
pub use report::Membership;
pub use xref::{CrossReference, NullCrossReference, TableCrossReference};
