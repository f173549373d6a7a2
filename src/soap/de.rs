use quick_xml::escape::unescape;
use quick_xml::events::Event;
use quick_xml::{Error, Reader};

/// Returns the trimmed text of the first element named `local_name`.
///
/// Namespace prefixes are ignored, so `success`, `ns1:success` and
/// `tns:success` all match `"success"`. An empty element yields an empty
/// string.
pub fn find_text(xml: &str, local_name: &str) -> Result<Option<String>, Error> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.local_name().as_ref() == local_name.as_bytes() => {
                let raw = reader.read_text(e.name())?;
                return Ok(Some(unescape(&raw)?.trim().to_string()));
            }
            Event::Empty(e) if e.local_name().as_ref() == local_name.as_bytes() => {
                return Ok(Some(String::new()));
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

/// Returns the `faultstring` of a SOAP fault, or `None` when the document is
/// not a fault.
pub fn fault_string(xml: &str) -> Result<Option<String>, Error> {
    if !has_element(xml, "Fault")? {
        return Ok(None);
    }
    Ok(Some(find_text(xml, "faultstring")?.unwrap_or_default()))
}

fn has_element(xml: &str, local_name: &str) -> Result<bool, Error> {
    let mut reader = Reader::from_str(xml);

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e)
                if e.local_name().as_ref() == local_name.as_bytes() =>
            {
                return Ok(true);
            }
            Event::Eof => return Ok(false),
            _ => {}
        }
    }
}
