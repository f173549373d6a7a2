use std::io::Cursor;

use crate::soap::config::XmlConfig;
use quick_xml::events::{BytesDecl, BytesStart, Event};
use quick_xml::se::to_writer as quick_xml_to_writer;
use quick_xml::{Reader, SeError, Writer};
use serde::Serialize;

const XML_VERSION: &str = "1.0";
const UTF8: &str = "UTF-8";

/// Serializes a value to an XML string, applying the declaration, namespaces
/// and indentation from `config`.
pub fn to_string<T>(config: &XmlConfig, value: &T) -> Result<String, SeError>
where
    T: Serialize,
{
    let mut xml_buf = String::new();
    quick_xml_to_writer(&mut xml_buf, value)?;

    let mut reader = Reader::from_reader(Cursor::new(xml_buf.as_bytes()));
    reader.config_mut().trim_text(true);

    let mut output_buf = Vec::with_capacity(xml_buf.len());
    let mut writer = if config.pretty {
        Writer::new_with_indent(&mut output_buf, b' ', config.indent_size)
    } else {
        Writer::new(&mut output_buf)
    };

    if config.xml_decl {
        let decl = BytesDecl::new(XML_VERSION, Some(UTF8), None);
        writer.write_event(Event::Decl(decl))?;
    }

    let mut buf = Vec::new();
    let mut is_root = true;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let start = with_namespaces(e.into_owned(), config, &mut is_root);
                writer.write_event(Event::Start(start))?;
            }
            Ok(Event::Empty(e)) => {
                let empty = with_namespaces(e.into_owned(), config, &mut is_root);
                writer.write_event(Event::Empty(empty))?;
            }
            Ok(Event::Eof) => break,
            Ok(event) => writer.write_event(event)?,
            Err(e) => return Err(SeError::Custom(e.to_string())),
        }
        buf.clear();
    }

    std::str::from_utf8(&output_buf)
        .map(|s| s.to_string())
        .map_err(Into::into)
}

fn with_namespaces(
    mut start: BytesStart<'static>,
    config: &XmlConfig,
    is_root: &mut bool,
) -> BytesStart<'static> {
    if *is_root {
        for (prefix, uri) in config.namespaces.iter() {
            let attr_name = if prefix.is_empty() {
                "xmlns".into()
            } else {
                format!("xmlns:{prefix}")
            };
            start.push_attribute((attr_name.as_bytes(), uri.as_bytes()));
        }
        *is_root = false;
    }
    start
}
