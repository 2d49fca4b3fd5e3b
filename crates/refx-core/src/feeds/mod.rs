//! Feed parsers, one module per upstream format.
//!
//! `nscc` decodes the fixed-width basket composition flat file; the rest
//! are delimited symbol lists mapped column-by-column into [`Security`]
//! records.
//!
//! [`Security`]: crate::domain::Security

pub mod edge;
pub mod nscc;
pub mod nsx;
pub mod nyse;
pub mod xignite;
