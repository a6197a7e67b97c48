//! quick-xml event source
//!
//! Tokenizes a `mesh.xml` document and forwards element events to a
//! [`ContentHandler`]. Text, comments and processing instructions are dropped.

use std::io::BufRead;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::attributes::Attributes;
use crate::error::ParseError;
use crate::events::ContentHandler;

/// Parse a complete document held in memory
pub fn parse_str<H: ContentHandler + ?Sized>(xml: &str, handler: &mut H) -> Result<(), ParseError> {
    parse_reader(xml.as_bytes(), handler)
}

/// Parse a document from any buffered reader
pub fn parse_reader<R, H>(source: R, handler: &mut H) -> Result<(), ParseError>
where
    R: BufRead,
    H: ContentHandler + ?Sized,
{
    let mut reader = Reader::from_reader(source);
    let mut buf = Vec::new();

    handler.start_document();
    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| xml_error(&reader, e))?;
        match event {
            Event::Start(start) => {
                let attributes = attributes(&reader, &start)?;
                handler.start_element(attributes.element(), &attributes)?;
            }
            Event::Empty(start) => {
                let attributes = attributes(&reader, &start)?;
                handler.start_element(attributes.element(), &attributes)?;
                handler.end_element(attributes.element())?;
            }
            Event::End(end) => {
                let name = String::from_utf8_lossy(end.name().as_ref()).into_owned();
                handler.end_element(&name)?;
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    handler.end_document()
}

fn attributes<R>(reader: &Reader<R>, start: &BytesStart) -> Result<Attributes, ParseError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes = Attributes::new(name);
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| xml_error(reader, e))?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(|e| xml_error(reader, e))?;
        attributes.push(key, value.into_owned());
    }
    Ok(attributes)
}

fn xml_error<R>(reader: &Reader<R>, error: impl std::fmt::Display) -> ParseError {
    ParseError::Xml {
        position: reader.buffer_position() as u64,
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Collect {
        events: Vec<String>,
    }

    impl ContentHandler for Collect {
        fn start_document(&mut self) {
            self.events.clear();
        }

        fn start_element(&mut self, name: &str, attributes: &Attributes) -> Result<(), ParseError> {
            let attrs: Vec<String> = attributes.iter().map(|(k, v)| format!("{k}={v}")).collect();
            self.events.push(format!("<{name} {}>", attrs.join(" ")));
            Ok(())
        }

        fn end_element(&mut self, name: &str) -> Result<(), ParseError> {
            self.events.push(format!("</{name}>"));
            Ok(())
        }
    }

    #[test]
    fn empty_elements_produce_start_and_end() {
        let mut collect = Collect::default();
        let xml = r#"<?xml version="1.0"?>
            <!-- exported -->
            <mesh><face v1="0" v2="1" v3="&#50;"/></mesh>"#;
        parse_str(xml, &mut collect).unwrap();
        assert_eq!(
            collect.events,
            ["<mesh >", "<face v1=0 v2=1 v3=2>", "</face>", "</mesh>"]
        );
    }

    #[test]
    fn malformed_document_reports_position() {
        let mut collect = Collect::default();
        let err = parse_str("<mesh><submeshes></mesh>", &mut collect).unwrap_err();
        assert!(matches!(err, ParseError::Xml { .. }));
    }
}
