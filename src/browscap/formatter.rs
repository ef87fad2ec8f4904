//! Text escaping for property names and values.
//!
//! The renderer is format-agnostic; everything format-specific about a
//! property's text goes through a [`Formatter`].

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatterKind {
    #[default]
    Json,
    Xml,
}

impl fmt::Display for FormatterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatterKind::Json => f.write_str("json"),
            FormatterKind::Xml => f.write_str("xml"),
        }
    }
}

impl FromStr for FormatterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(FormatterKind::Json),
            "xml" => Ok(FormatterKind::Xml),
            other => Err(format!("unknown formatter: {}", other)),
        }
    }
}

pub trait Formatter {
    fn kind(&self) -> FormatterKind;

    fn format_property_name<'a>(&self, name: &'a str) -> Cow<'a, str>;

    fn format_property_value<'a>(&self, value: &'a str, property: &str) -> Cow<'a, str>;
}

/// JSON needs no pre-escaping: serde_json escapes while serializing.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn kind(&self) -> FormatterKind {
        FormatterKind::Json
    }

    fn format_property_name<'a>(&self, name: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(name)
    }

    fn format_property_value<'a>(&self, value: &'a str, _property: &str) -> Cow<'a, str> {
        Cow::Borrowed(value)
    }
}

pub struct XmlFormatter;

fn escape_entities(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

impl Formatter for XmlFormatter {
    fn kind(&self) -> FormatterKind {
        FormatterKind::Xml
    }

    fn format_property_name<'a>(&self, name: &'a str) -> Cow<'a, str> {
        escape_entities(name)
    }

    fn format_property_value<'a>(&self, value: &'a str, _property: &str) -> Cow<'a, str> {
        escape_entities(value)
    }
}

impl FormatterKind {
    pub fn formatter(self) -> Box<dyn Formatter> {
        match self {
            FormatterKind::Json => Box::new(JsonFormatter),
            FormatterKind::Xml => Box::new(XmlFormatter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_formatter_is_identity() {
        let f = JsonFormatter;
        assert_eq!(f.format_property_value("a \"b\" <c>", "Comment"), "a \"b\" <c>");
    }

    #[test]
    fn test_xml_formatter_escapes_entities() {
        let f = XmlFormatter;
        assert_eq!(
            f.format_property_value("AT&T <Browser> \"x\" 'y'", "Comment"),
            "AT&amp;T &lt;Browser&gt; &quot;x&quot; &#039;y&#039;"
        );
        assert!(matches!(f.format_property_name("Browser"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!("XML".parse::<FormatterKind>().unwrap(), FormatterKind::Xml);
        assert!("ini".parse::<FormatterKind>().is_err());
    }
}
