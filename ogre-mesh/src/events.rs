//! Tokenizer-independent document events

use crate::attributes::Attributes;
use crate::error::ParseError;

/// Receiver of SAX-style events, in document order
pub trait ContentHandler {
    /// Reset all parse state; called before the first element
    fn start_document(&mut self);

    fn start_element(&mut self, name: &str, attributes: &Attributes) -> Result<(), ParseError>;

    fn end_element(&mut self, name: &str) -> Result<(), ParseError>;

    /// Called once after the last element
    fn end_document(&mut self) -> Result<(), ParseError> {
        Ok(())
    }
}

/// One pre-tokenized event; the start event carries the element name in its attributes
#[derive(Debug, Clone, PartialEq)]
pub enum XmlEvent {
    Start(Attributes),
    End(String),
}

impl XmlEvent {
    pub fn start(attributes: Attributes) -> Self {
        XmlEvent::Start(attributes)
    }

    pub fn end(name: impl Into<String>) -> Self {
        XmlEvent::End(name.into())
    }
}

/// Feed a complete event sequence to `handler`, stopping at the first error
pub fn dispatch<H, I>(handler: &mut H, events: I) -> Result<(), ParseError>
where
    H: ContentHandler + ?Sized,
    I: IntoIterator<Item = XmlEvent>,
{
    handler.start_document();
    for event in events {
        match event {
            XmlEvent::Start(attributes) => {
                handler.start_element(attributes.element(), &attributes)?
            }
            XmlEvent::End(name) => handler.end_element(&name)?,
        }
    }
    handler.end_document()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        log: Vec<String>,
    }

    impl ContentHandler for Recorder {
        fn start_document(&mut self) {
            self.log.clear();
            self.log.push("begin".into());
        }

        fn start_element(&mut self, name: &str, attributes: &Attributes) -> Result<(), ParseError> {
            self.log.push(format!("<{name} {}>", attributes.iter().count()));
            Ok(())
        }

        fn end_element(&mut self, name: &str) -> Result<(), ParseError> {
            if name == "bad" {
                return Err(ParseError::UnexpectedEnd(name.into()));
            }
            self.log.push(format!("</{name}>"));
            Ok(())
        }
    }

    #[test]
    fn events_arrive_in_order() {
        let mut recorder = Recorder::default();
        let events = vec![
            XmlEvent::start(Attributes::new("mesh").with("a", "1")),
            XmlEvent::end("mesh"),
        ];
        dispatch(&mut recorder, events).unwrap();
        assert_eq!(recorder.log, ["begin", "<mesh 1>", "</mesh>"]);
    }

    #[test]
    fn first_error_stops_dispatch() {
        let mut recorder = Recorder::default();
        let events = vec![
            XmlEvent::start(Attributes::new("bad")),
            XmlEvent::end("bad"),
            XmlEvent::end("never"),
        ];
        assert!(dispatch(&mut recorder, events).is_err());
        assert_eq!(recorder.log.len(), 2);
    }
}
