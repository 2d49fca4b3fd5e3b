//! Shared fixtures for refx integration tests.
//!
//! The flat-file lines reproduce a small basket composition extract: the
//! WREI index receipt header followed by two component detail records.
//! Column positions match the live feed, including the header whose
//! optional trailing cash indicator column is absent.

pub const WREI_HEADER: &str = "01WREI           18383M47200220110624000000950005000000000000000291+0000000000000+0000162471058+0000000003249+0000000004503+0000005000000000000000000+";

pub const AKR_DETAIL: &str =
    "02AKR            0042391090002011062400000193WREI           18383M472002";

pub const ALX_DETAIL: &str =
    "02ALX            0147521090002011062400000013WREI           18383M472002";

/// A trailer record declaring `declared` total records.
pub fn trailer(declared: u64) -> String {
    format!("09{}{declared:08}", " ".repeat(35))
}

/// A complete well-formed file: header, two details, matching trailer.
pub fn composition_file() -> String {
    [WREI_HEADER, AKR_DETAIL, ALX_DETAIL, &trailer(4)].join("\n")
}
