//! End-to-end basket flow: a flat file on disk through parsing and
//! aggregation to the XML documents and the membership report.

use std::fs;

use refx_core::feeds::nscc;
use refx_core::render::baskets::write_basket_composition;
use refx_core::render::instruments::write_stub_basket_instruments;
use refx_core::{FeedWarning, Membership, SecurityLike};

use refx_tests::{composition_file, trailer, AKR_DETAIL, ALX_DETAIL, WREI_HEADER};

#[test]
fn basket_file_flows_to_composition_xml_and_report() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("20110624.basket");
    fs::write(&path, composition_file()).expect("write fixture");

    let batch = nscc::parse_file(&path).expect("parse");
    assert!(batch.warnings.is_empty());
    assert_eq!(batch.baskets.len(), 1);

    let wrei = &batch.baskets[0];
    assert_eq!(wrei.ticker_symbol(), Some("WREI"));
    assert_eq!(wrei.component_count(), 2);
    assert_eq!(wrei.creation_units_per_trade, 50_000);

    let mut xml_bytes = Vec::new();
    write_basket_composition(&mut xml_bytes, &batch.baskets).expect("render");
    let xml = String::from_utf8(xml_bytes).expect("utf8");
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains("<etf short_name=\"WREI\">"));
    assert!(xml.contains("<parameter name=\"netassetvalue\" value=\"0.0009\"/>"));
    assert!(xml.contains("<basket short_name=\"WREI Basket\">"));
    assert!(xml.contains("<leg short_name=\"AKR\" mic=\"BATS\" ratio=\"0.0039\"/>"));
    assert!(xml.contains("<leg short_name=\"ALX\" mic=\"BATS\" ratio=\"0.0003\"/>"));

    let membership = Membership::from_baskets(&batch.baskets);
    let mut csv_bytes = Vec::new();
    membership.write_csv(&mut csv_bytes).expect("report");
    let csv = String::from_utf8(csv_bytes).expect("utf8");
    assert_eq!(
        csv,
        "Count,Component Ticker,ETF Baskets\n1,AKR,WREI\n1,ALX,WREI\n"
    );
}

#[test]
fn stub_instruments_cover_every_parsed_basket() {
    let batch = nscc::parse_reader(composition_file().as_bytes()).expect("parse");

    let mut xml_bytes = Vec::new();
    write_stub_basket_instruments(&mut xml_bytes, &batch.baskets).expect("render");
    let xml = String::from_utf8(xml_bytes).expect("utf8");

    assert!(xml.contains(
        "<resource name=\"instruments\" type=\"application/x-instrument-reference-data+xml\">"
    ));
    assert!(xml.contains(
        "<instrument short_name=\"WREI Basket\" long_name=\"\" mnemonic=\"\" \
         precedence=\"yes\" cfi=\"ESXXXX\" price_format=\"decimal 2\" deleted=\"no\">"
    ));
    assert!(xml.contains("<field name=\"symbol\" value=\"WREI\"/>"));
    // Components are legs, not instruments of their own.
    assert!(!xml.contains("AKR"));
}

#[test]
fn record_count_mismatch_is_reported_but_not_fatal() {
    let file = [WREI_HEADER, AKR_DETAIL, ALX_DETAIL, &trailer(12)].join("\n");
    let batch = nscc::parse_reader(file.as_bytes()).expect("parse");

    assert_eq!(batch.baskets[0].component_count(), 2);
    assert_eq!(
        batch.warnings,
        vec![FeedWarning::RecordCountMismatch {
            declared: 12,
            actual: 4,
        }]
    );
}

#[test]
fn stored_baskets_fold_into_cusip_keyed_memberships() {
    use refx_store::{fold_memberships, StoredBasket};

    // The same holdings as the flat file, as the Redis loader stores them.
    let baskets = vec![StoredBasket {
        index_receipt_cusip: "18383M472".to_string(),
        components: [("004239109".to_string(), 193.0), ("014752109".to_string(), 13.0)]
            .into_iter()
            .collect(),
    }];

    let membership = fold_memberships(&baskets);
    let mut csv_bytes = Vec::new();
    membership.write_csv(&mut csv_bytes).expect("report");
    let csv = String::from_utf8(csv_bytes).expect("utf8");
    assert_eq!(
        csv,
        "Count,Component Ticker,ETF Baskets\n1,004239109,18383M472\n1,014752109,18383M472\n"
    );
}
