//! GML markup stream writer

use crate::error::{GmlError, Result};
use crate::io::gml::version::XLINK_NS;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;

/// Prefix used for elements and attributes in the GML namespace
pub const GML_PREFIX: &str = "gml";

/// Element-level writing primitives
pub trait GmlStreamWriter {
    /// Open a `gml:`-prefixed element
    fn start_element(&mut self, local_name: &str) -> Result<()>;

    /// Add an attribute to the element opened last (before any content)
    fn attribute(&mut self, name: &str, value: &str) -> Result<()>;

    /// Write character content
    fn text(&mut self, text: &str) -> Result<()>;

    /// Close the element opened last
    fn end_element(&mut self) -> Result<()>;

    fn flush(&mut self) -> Result<()>;
}

/// Convenience operations on top of [`GmlStreamWriter`]
pub trait GmlStreamWriterExt: GmlStreamWriter {
    /// Write a `gml:`-prefixed attribute
    fn gml_attribute(&mut self, local_name: &str, value: &str) -> Result<()> {
        self.attribute(&format!("{}:{}", GML_PREFIX, local_name), value)
    }

    fn xlink_href(&mut self, uri: &str) -> Result<()> {
        self.attribute("xlink:href", uri)
    }

    /// Write `<gml:name>text</gml:name>`
    fn text_element(&mut self, local_name: &str, text: &str) -> Result<()> {
        self.start_element(local_name)?;
        self.text(text)?;
        self.end_element()
    }

    /// Write an empty property element carrying only an `xlink:href`
    fn href_element(&mut self, local_name: &str, uri: &str) -> Result<()> {
        self.start_element(local_name)?;
        self.xlink_href(uri)?;
        self.end_element()
    }
}

impl<T: GmlStreamWriter> GmlStreamWriterExt for T {}

/// [`GmlStreamWriter`] over quick-xml
pub struct XmlStreamWriter<W: Write> {
    writer: Writer<W>,
    namespace: &'static str,
    declare_namespaces: bool,
    pending: Option<BytesStart<'static>>,
    open: Vec<String>,
}

impl<W: Write> XmlStreamWriter<W> {
    /// Create a writer; with `declare_namespaces` the outermost element
    /// declares the `gml` and `xlink` prefixes
    pub fn new(inner: W, namespace: &'static str, declare_namespaces: bool) -> Self {
        XmlStreamWriter {
            writer: Writer::new(inner),
            namespace,
            declare_namespaces,
            pending: None,
            open: Vec::new(),
        }
    }

    /// Number of currently open elements
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn flush_pending(&mut self) -> Result<()> {
        if let Some(start) = self.pending.take() {
            self.writer.write_event(Event::Start(start))?;
        }
        Ok(())
    }
}

impl<W: Write> GmlStreamWriter for XmlStreamWriter<W> {
    fn start_element(&mut self, local_name: &str) -> Result<()> {
        self.flush_pending()?;
        let name = format!("{}:{}", GML_PREFIX, local_name);
        let mut start = BytesStart::new(name.clone());
        if self.open.is_empty() && self.declare_namespaces {
            start.push_attribute(("xmlns:gml", self.namespace));
            start.push_attribute(("xmlns:xlink", XLINK_NS));
        }
        self.pending = Some(start);
        self.open.push(name);
        Ok(())
    }

    fn attribute(&mut self, name: &str, value: &str) -> Result<()> {
        match self.pending.as_mut() {
            Some(start) => {
                start.push_attribute((name, value));
                Ok(())
            }
            None => Err(GmlError::Custom(format!(
                "Attribute '{}' written outside of a start tag",
                name
            ))),
        }
    }

    fn text(&mut self, text: &str) -> Result<()> {
        self.flush_pending()?;
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        Ok(())
    }

    fn end_element(&mut self) -> Result<()> {
        let name = self
            .open
            .pop()
            .ok_or_else(|| GmlError::Custom("No open element to close".to_string()))?;
        match self.pending.take() {
            Some(start) => self.writer.write_event(Event::Empty(start))?,
            None => self.writer.write_event(Event::End(BytesEnd::new(name)))?,
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.flush_pending()?;
        self.writer.get_mut().flush()?;
        Ok(())
    }
}
