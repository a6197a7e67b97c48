//! Element attributes and their text-to-value parsing rules

use crate::error::ParseError;

/// Attributes of one element, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    element: String,
    entries: Vec<(String, String)>,
}

impl Attributes {
    pub fn new(element: impl Into<String>) -> Self {
        Self {
            element: element.into(),
            entries: Vec::new(),
        }
    }

    /// Builder-style insert, mostly for tests and hand-built event streams
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Element these attributes belong to
    pub fn element(&self) -> &str {
        &self.element
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Present and non-empty value
    fn value(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.is_empty())
    }

    fn missing(&self, name: &str) -> ParseError {
        ParseError::MissingAttribute {
            element: self.element.clone(),
            attribute: name.to_string(),
        }
    }

    /// Required string
    pub fn string(&self, name: &str) -> Result<&str, ParseError> {
        self.get(name).ok_or_else(|| self.missing(name))
    }

    /// Required integer
    pub fn int(&self, name: &str) -> Result<i32, ParseError> {
        let value = self.value(name).ok_or_else(|| self.missing(name))?;
        parse_int(name, value)
    }

    /// Optional integer, `default` when absent or empty
    pub fn int_or(&self, name: &str, default: i32) -> Result<i32, ParseError> {
        match self.value(name) {
            Some(value) => parse_int(name, value),
            None => Ok(default),
        }
    }

    /// Required float
    pub fn float(&self, name: &str) -> Result<f32, ParseError> {
        let value = self.value(name).ok_or_else(|| self.missing(name))?;
        parse_float(name, value)
    }

    /// Optional float, `default` when absent or empty
    pub fn float_or(&self, name: &str, default: f32) -> Result<f32, ParseError> {
        match self.value(name) {
            Some(value) => parse_float(name, value),
            None => Ok(default),
        }
    }

    /// `true` iff the text is `true` ignoring case; `default` when absent or empty
    pub fn bool_or(&self, name: &str, default: bool) -> bool {
        match self.value(name) {
            Some(value) => value.trim().eq_ignore_ascii_case("true"),
            None => default,
        }
    }
}

pub(crate) fn parse_int(attribute: &str, value: &str) -> Result<i32, ParseError> {
    value
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidNumber {
            attribute: attribute.to_string(),
            value: value.to_string(),
        })
}

pub(crate) fn parse_float(attribute: &str, value: &str) -> Result<f32, ParseError> {
    value
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidNumber {
            attribute: attribute.to_string(),
            value: value.to_string(),
        })
}
