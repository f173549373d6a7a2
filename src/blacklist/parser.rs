use super::error::BlacklistError;
use super::types::BulkItem;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::path::Path;
use tokio::fs;

/// Parse a bulk blacklist from XML.
///
/// Every direct child of the root element is one record and its `id`
/// attribute is the media id, e.g.
///
/// ```xml
/// <blacklist>
///     <file id="5" />
///     <file id="7" />
/// </blacklist>
/// ```
///
/// Children without an `id` attribute produce a record with no id.
pub fn parse_bulk_xml(content: &str) -> Result<Vec<BulkItem>, BlacklistError> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut items = Vec::new();
    let mut depth = 0usize;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| BlacklistError::InvalidFormat(format!("Failed to parse XML: {}", e)))?;

        match event {
            Event::Start(e) => {
                if depth == 1 {
                    items.push(read_item(&e)?);
                }
                depth += 1;
            }
            Event::Empty(e) if depth == 1 => items.push(read_item(&e)?),
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Eof if depth != 0 => {
                return Err(BlacklistError::InvalidFormat(
                    "Unexpected end of document".to_string(),
                ));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    tracing::debug!("Parsed {} bulk blacklist records", items.len());
    Ok(items)
}

fn read_item(element: &BytesStart<'_>) -> Result<BulkItem, BlacklistError> {
    let attr = element
        .try_get_attribute("id")
        .map_err(|e| BlacklistError::InvalidFormat(format!("Bad attribute: {}", e)))?;

    let id = match attr {
        Some(attr) => Some(
            attr.unescape_value()
                .map_err(|e| BlacklistError::InvalidFormat(format!("Bad id value: {}", e)))?
                .into_owned(),
        ),
        None => None,
    };

    Ok(BulkItem { id })
}

/// Load a bulk blacklist from an XML file
pub async fn load_bulk_from_file<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<BulkItem>, BlacklistError> {
    let path = path.as_ref();
    tracing::info!("Loading bulk blacklist from: {}", path.display());

    let content = fs::read_to_string(path).await?;
    parse_bulk_xml(&content)
}
