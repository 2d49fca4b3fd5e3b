//! Basket composition XML.
//!
//! Unlike the instrument documents this one has a bare `instruments`
//! root: one `etf` node per basket carrying the derived net asset value,
//! the basket node named after the stub instrument, and one `leg` per
//! component with its creation-unit ratio.

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use crate::domain::{Basket, SecurityLike};
use crate::error::RenderError;
use crate::render::format_ratio;

/// Legs are quoted against this venue regardless of where the component
/// primarily lists.
const LEG_MIC: &str = "BATS";

/// Write the composition document for `baskets`.
///
/// Fails with [`RenderError::UndefinedRatio`] when a basket declares
/// zero creation units, since neither the net asset value nor any leg
/// ratio is defined for it.
pub fn write_basket_composition<W: Write>(
    writer: W,
    baskets: &[Basket],
) -> Result<(), RenderError> {
    let mut writer = Writer::new_with_indent(writer, b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new("instruments")))?;

    for basket in baskets {
        let ticker = basket.ticker_symbol().unwrap_or("");

        let mut etf = BytesStart::new("etf");
        etf.push_attribute(("short_name", ticker));
        writer.write_event(Event::Start(etf))?;

        let nav = format_ratio(basket.nav_per_unit()?);
        let mut parameter = BytesStart::new("parameter");
        parameter.push_attribute(("name", "netassetvalue"));
        parameter.push_attribute(("value", nav.as_str()));
        writer.write_event(Event::Empty(parameter))?;

        let mut basket_node = BytesStart::new("basket");
        let basket_name = format!("{ticker} Basket");
        basket_node.push_attribute(("short_name", basket_name.as_str()));
        writer.write_event(Event::Start(basket_node))?;
        writer.write_event(Event::Start(BytesStart::new("legs")))?;

        for component in basket.components() {
            let ratio = format_ratio(basket.leg_ratio(component)?);
            let mut leg = BytesStart::new("leg");
            leg.push_attribute(("short_name", component.ticker_symbol().unwrap_or("")));
            leg.push_attribute(("mic", LEG_MIC));
            leg.push_attribute(("ratio", ratio.as_str()));
            writer.write_event(Event::Empty(leg))?;
        }

        writer.write_event(Event::End(BytesEnd::new("legs")))?;
        writer.write_event(Event::End(BytesEnd::new("basket")))?;
        writer.write_event(Event::End(BytesEnd::new("etf")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("instruments")))?;
    Ok(())
}
