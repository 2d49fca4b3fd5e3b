//! Instrument reference-data XML.
//!
//! Two documents share the `resource`/`instruments` envelope: the full
//! instrument file built from parsed security feeds, and the stub file
//! that registers one synthetic instrument per basket so composition
//! uploads have something to attach to.

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use uuid::{uuid, Uuid};

use crate::domain::{Basket, SecurityLike};
use crate::error::RenderError;
use crate::xref::CrossReference;

/// Venue the downstream system registers exchange listings under.
const LISTING_VENUE: Uuid = uuid!("7c15c3c2-4a25-11e0-b2a1-2a7689193271");
/// Placeholder venue for stub basket instruments, paired with a
/// placeholder MIC.
const STUB_VENUE: Uuid = uuid!("c0c78852-efd6-11de-9fb8-dfdb5824b38d");
const STUB_MIC: &str = "XXXX";

/// Write the instrument reference document for `securities`.
///
/// Each instrument carries one identifier per entry in `mics` that the
/// resolver can produce a venue symbol for; venues with no listing are
/// left out of the document rather than emitted empty.
pub fn write_instruments<W: Write, S: SecurityLike>(
    writer: W,
    securities: &[S],
    mics: &[String],
    xref: &dyn CrossReference,
) -> Result<(), RenderError> {
    let mut writer = Writer::new_with_indent(writer, b' ', 2);
    let listing_venue = LISTING_VENUE.to_string();

    write_envelope_open(&mut writer)?;
    for security in securities {
        let ticker = security.ticker_symbol().unwrap_or("");
        let name = security.attrs().name.as_deref().unwrap_or("");

        let mut instrument = BytesStart::new("instrument");
        instrument.push_attribute(("short_name", ticker));
        instrument.push_attribute(("long_name", name));
        instrument.push_attribute(("mnemonic", ticker));
        instrument.push_attribute(("precedence", "no"));
        instrument.push_attribute(("cfi", "ESNTFR"));
        instrument.push_attribute(("price_format", "decimal 2"));
        instrument.push_attribute(("deleted", "no"));
        writer.write_event(Event::Start(instrument))?;
        write_instrument_preamble(&mut writer)?;

        writer.write_event(Event::Start(BytesStart::new("identifiers")))?;
        for mic in mics {
            let Some(symbol) = xref.resolve(security.cusip(), mic) else {
                continue;
            };
            let mut identifier = BytesStart::new("identifier");
            identifier.push_attribute(("venue", listing_venue.as_str()));
            identifier.push_attribute(("mic", mic.as_str()));
            writer.write_event(Event::Start(identifier))?;

            writer.write_event(Event::Start(BytesStart::new("fields")))?;
            write_field(&mut writer, "exdestination", mic)?;
            write_field(&mut writer, "symbol", &symbol)?;
            writer.write_event(Event::End(BytesEnd::new("fields")))?;
            writer.write_event(Event::End(BytesEnd::new("identifier")))?;
        }
        writer.write_event(Event::End(BytesEnd::new("identifiers")))?;
        writer.write_event(Event::End(BytesEnd::new("instrument")))?;
    }
    write_envelope_close(&mut writer)
}

/// Write one placeholder instrument per basket, named `"{ticker} Basket"`
/// to match the basket nodes in the composition document.
pub fn write_stub_basket_instruments<W: Write>(
    writer: W,
    baskets: &[Basket],
) -> Result<(), RenderError> {
    let mut writer = Writer::new_with_indent(writer, b' ', 2);
    let stub_venue = STUB_VENUE.to_string();

    write_envelope_open(&mut writer)?;
    for basket in baskets {
        let ticker = basket.ticker_symbol().unwrap_or("");

        let mut instrument = BytesStart::new("instrument");
        let short_name = format!("{ticker} Basket");
        instrument.push_attribute(("short_name", short_name.as_str()));
        instrument.push_attribute(("long_name", ""));
        instrument.push_attribute(("mnemonic", ""));
        instrument.push_attribute(("precedence", "yes"));
        instrument.push_attribute(("cfi", "ESXXXX"));
        instrument.push_attribute(("price_format", "decimal 2"));
        instrument.push_attribute(("deleted", "no"));
        writer.write_event(Event::Start(instrument))?;
        write_instrument_preamble(&mut writer)?;

        writer.write_event(Event::Start(BytesStart::new("identifiers")))?;
        let mut identifier = BytesStart::new("identifier");
        identifier.push_attribute(("venue", stub_venue.as_str()));
        identifier.push_attribute(("mic", STUB_MIC));
        writer.write_event(Event::Start(identifier))?;

        writer.write_event(Event::Start(BytesStart::new("fields")))?;
        write_field(&mut writer, "symbol", ticker)?;
        writer.write_event(Event::End(BytesEnd::new("fields")))?;
        writer.write_event(Event::End(BytesEnd::new("identifier")))?;
        writer.write_event(Event::End(BytesEnd::new("identifiers")))?;
        writer.write_event(Event::End(BytesEnd::new("instrument")))?;
    }
    write_envelope_close(&mut writer)
}

fn write_envelope_open<W: Write>(writer: &mut Writer<W>) -> Result<(), RenderError> {
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    let mut resource = BytesStart::new("resource");
    resource.push_attribute(("name", "instruments"));
    resource.push_attribute(("type", "application/x-instrument-reference-data+xml"));
    writer.write_event(Event::Start(resource))?;
    writer.write_event(Event::Start(BytesStart::new("instruments")))?;
    Ok(())
}

fn write_envelope_close<W: Write>(writer: &mut Writer<W>) -> Result<(), RenderError> {
    writer.write_event(Event::End(BytesEnd::new("instruments")))?;
    writer.write_event(Event::End(BytesEnd::new("resource")))?;
    Ok(())
}

/// The fixed children every instrument node starts with.
fn write_instrument_preamble<W: Write>(writer: &mut Writer<W>) -> Result<(), RenderError> {
    let mut fixml = BytesStart::new("xml");
    fixml.push_attribute(("type", "fixml"));
    writer.write_event(Event::Empty(fixml))?;
    writer.write_event(Event::Empty(BytesStart::new("groups")))?;
    Ok(())
}

fn write_field<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    value: &str,
) -> Result<(), RenderError> {
    let mut field = BytesStart::new("field");
    field.push_attribute(("name", name));
    field.push_attribute(("value", value));
    writer.write_event(Event::Empty(field))?;
    Ok(())
}
