//! Domain entities shared by every feed and renderer.

mod basket;
mod cusip;
mod security;

pub use basket::{Basket, BasketComponent};
pub use cusip::Cusip;
pub use security::{Classification, Security, SecurityAttributes, SecurityLike};
