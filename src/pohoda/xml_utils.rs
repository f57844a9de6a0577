//! Thin wrapper over the `quick-xml` event writer.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::Cursor;

use crate::core::ConvertError;

fn xml_io(e: std::io::Error) -> ConvertError {
    ConvertError::Xml(e.to_string())
}

pub(crate) struct XmlWriter {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl XmlWriter {
    /// Writer with a UTF-8 XML declaration already emitted.
    pub(crate) fn new() -> Result<Self, ConvertError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_io)?;
        Ok(Self { writer })
    }

    pub(crate) fn into_string(self) -> Result<String, ConvertError> {
        let buf = self.writer.into_inner().into_inner();
        String::from_utf8(buf).map_err(|e| ConvertError::Xml(e.to_string()))
    }

    pub(crate) fn start(&mut self, name: &str) -> Result<&mut Self, ConvertError> {
        self.writer
            .write_event(Event::Start(BytesStart::new(name)))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub(crate) fn start_with_attrs(
        &mut self,
        name: &str,
        attrs: &[(&str, &str)],
    ) -> Result<&mut Self, ConvertError> {
        let mut elem = BytesStart::new(name);
        for (key, value) in attrs {
            elem.push_attribute((*key, *value));
        }
        self.writer.write_event(Event::Start(elem)).map_err(xml_io)?;
        Ok(self)
    }

    pub(crate) fn end(&mut self, name: &str) -> Result<&mut Self, ConvertError> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_io)?;
        Ok(self)
    }

    /// `<name>text</name>`; empty text collapses to `<name/>` so no
    /// indentation whitespace ends up inside the element.
    pub(crate) fn leaf(&mut self, name: &str, text: &str) -> Result<&mut Self, ConvertError> {
        if text.is_empty() {
            return self.empty(name);
        }
        self.start(name)?;
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_io)?;
        self.end(name)
    }

    pub(crate) fn empty(&mut self, name: &str) -> Result<&mut Self, ConvertError> {
        self.writer
            .write_event(Event::Empty(BytesStart::new(name)))
            .map_err(xml_io)?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declaration_and_nesting() {
        let mut w = XmlWriter::new().unwrap();
        w.start("a").unwrap();
        w.leaf("b", "x").unwrap();
        w.end("a").unwrap();
        let xml = w.into_string().unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<b>x</b>"));
    }

    #[test]
    fn empty_text_collapses() {
        let mut w = XmlWriter::new().unwrap();
        w.start("a").unwrap();
        w.leaf("b", "").unwrap();
        w.end("a").unwrap();
        let xml = w.into_string().unwrap();
        assert!(xml.contains("<b/>"));
    }

    #[test]
    fn text_is_escaped() {
        let mut w = XmlWriter::new().unwrap();
        w.leaf("a", "Kováč & syn <s.r.o.>").unwrap();
        let xml = w.into_string().unwrap();
        assert!(xml.contains("Kováč &amp; syn &lt;s.r.o.&gt;"));
    }
}
