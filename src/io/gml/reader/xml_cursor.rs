//! Forward-only pull cursor over quick-xml
//!
//! The cursor turns quick-xml events into owned, namespace-resolved
//! [`XmlEvent`]s and adds the position assertions the geometry readers rely
//! on. Every `require_*` call either holds or fails with a
//! [`GmlError::Parse`] carrying the current location.

use crate::error::{GmlError, Location, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, QName, ResolveResult};
use quick_xml::NsReader;
use std::io::BufRead;

/// Namespace-resolved element name
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ElementName {
    /// Namespace URI (empty when the element is in no namespace)
    pub namespace: String,
    pub local_name: String,
    /// Prefix used in the document, if any
    pub prefix: Option<String>,
}

impl ElementName {
    /// Qualified name as written in the document
    pub fn qualified(&self) -> String {
        match &self.prefix {
            Some(p) => format!("{}:{}", p, self.local_name),
            None => self.local_name.clone(),
        }
    }

    fn matches(&self, namespace: &str, local_name: &str) -> bool {
        self.namespace == namespace && self.local_name == local_name
    }
}

/// Attribute with a resolved namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    /// Namespace URI; unprefixed attributes are in no namespace
    pub namespace: String,
    pub local_name: String,
    pub value: String,
}

/// Opening tag with its attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartElement {
    pub name: ElementName,
    pub attributes: Vec<XmlAttribute>,
}

/// Significant cursor positions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlEvent {
    StartDocument,
    Start(StartElement),
    End(ElementName),
    Text(String),
    EndDocument,
}

/// Pull cursor with explicit position assertions
pub struct XmlCursor<R: BufRead> {
    reader: NsReader<R>,
    buf: Vec<u8>,
    current: XmlEvent,
    pending_end: Option<ElementName>,
    system_id: Option<String>,
}

impl<'a> XmlCursor<&'a [u8]> {
    /// Create a cursor over an in-memory document
    pub fn from_str(xml: &'a str) -> Self {
        Self::new(xml.as_bytes())
    }
}

impl<R: BufRead> XmlCursor<R> {
    /// Create a cursor over any buffered source
    pub fn new(source: R) -> Self {
        let mut reader = NsReader::from_reader(source);
        reader.config_mut().trim_text(true);
        XmlCursor {
            reader,
            buf: Vec::new(),
            current: XmlEvent::StartDocument,
            pending_end: None,
            system_id: None,
        }
    }

    /// Set the document URI used as origin of references
    pub fn with_system_id(mut self, system_id: impl Into<String>) -> Self {
        self.system_id = Some(system_id.into());
        self
    }

    /// Document URI, if known
    pub fn system_id(&self) -> Option<&str> {
        self.system_id.as_deref()
    }

    /// Current event
    pub fn event(&self) -> &XmlEvent {
        &self.current
    }

    /// Advance to the next significant event
    pub fn next(&mut self) -> Result<&XmlEvent> {
        if let Some(name) = self.pending_end.take() {
            self.current = XmlEvent::End(name);
            return Ok(&self.current);
        }
        loop {
            let offset = self.reader.buffer_position() as u64;
            let (resolved, event) = self.reader.read_resolved_event_into(&mut self.buf)?;
            let namespace = match &event {
                Event::Start(e) | Event::Empty(e) => {
                    Some(namespace_of(resolved, &e.name(), offset)?)
                }
                Event::End(e) => Some(namespace_of(resolved, &e.name(), offset)?),
                _ => None,
            };
            let next = match event {
                Event::Start(ref e) => Some(XmlEvent::Start(convert_start(
                    &self.reader,
                    e,
                    namespace.unwrap_or_default(),
                    offset,
                )?)),
                Event::Empty(ref e) => {
                    let start =
                        convert_start(&self.reader, e, namespace.unwrap_or_default(), offset)?;
                    self.pending_end = Some(start.name.clone());
                    Some(XmlEvent::Start(start))
                }
                Event::End(ref e) => Some(XmlEvent::End(element_name(
                    &e.name(),
                    namespace.unwrap_or_default(),
                ))),
                Event::Text(ref t) => {
                    let text = t.unescape()?.into_owned();
                    if text.trim().is_empty() {
                        None
                    } else {
                        Some(XmlEvent::Text(text))
                    }
                }
                Event::CData(ref c) => {
                    Some(XmlEvent::Text(String::from_utf8_lossy(c).into_owned()))
                }
                Event::Eof => Some(XmlEvent::EndDocument),
                _ => None,
            };
            self.buf.clear();
            if let Some(next) = next {
                self.current = next;
                return Ok(&self.current);
            }
        }
    }

    /// Advance to the next start or end tag.
    ///
    /// Non-whitespace text in between is an error.
    pub fn next_tag(&mut self) -> Result<()> {
        loop {
            match self.next()? {
                XmlEvent::Start(_) | XmlEvent::End(_) => return Ok(()),
                XmlEvent::Text(text) => {
                    let text = text.clone();
                    return Err(self.error(format!(
                        "Expected a start or end tag, found text '{}'",
                        text
                    )));
                }
                XmlEvent::EndDocument => {
                    return Err(self.error("Unexpected end of document"));
                }
                XmlEvent::StartDocument => {}
            }
        }
    }

    /// Advance to the first element of the document
    pub fn next_start(&mut self) -> Result<bool> {
        loop {
            match self.next()? {
                XmlEvent::Start(_) => return Ok(true),
                XmlEvent::EndDocument => return Ok(false),
                _ => {}
            }
        }
    }

    pub fn is_start(&self) -> bool {
        matches!(self.current, XmlEvent::Start(_))
    }

    pub fn is_end(&self) -> bool {
        matches!(self.current, XmlEvent::End(_))
    }

    /// Check whether the cursor is on the opening tag of the given element
    pub fn is_start_of(&self, namespace: &str, local_name: &str) -> bool {
        match &self.current {
            XmlEvent::Start(s) => s.name.matches(namespace, local_name),
            _ => false,
        }
    }

    /// Name of the current start or end tag
    pub fn name(&self) -> Option<&ElementName> {
        match &self.current {
            XmlEvent::Start(s) => Some(&s.name),
            XmlEvent::End(n) => Some(n),
            _ => None,
        }
    }

    /// Local name of the current tag (empty when not on a tag)
    pub fn local_name(&self) -> &str {
        self.name().map(|n| n.local_name.as_str()).unwrap_or("")
    }

    /// Namespace of the current tag (empty when not on a tag)
    pub fn namespace(&self) -> &str {
        self.name().map(|n| n.namespace.as_str()).unwrap_or("")
    }

    /// Attribute value of the current start tag.
    ///
    /// `namespace` is `None` for unprefixed attributes.
    pub fn attribute(&self, namespace: Option<&str>, local_name: &str) -> Option<&str> {
        let ns = namespace.unwrap_or("");
        match &self.current {
            XmlEvent::Start(s) => s
                .attributes
                .iter()
                .find(|a| a.namespace == ns && a.local_name == local_name)
                .map(|a| a.value.as_str()),
            _ => None,
        }
    }

    /// Assert the cursor is on the opening tag of the given element
    pub fn require_start(&self, namespace: &str, local_name: &str) -> Result<()> {
        if self.is_start_of(namespace, local_name) {
            return Ok(());
        }
        Err(self.error(format!(
            "Expected start of '{{{}}}{}', found {}",
            namespace,
            local_name,
            self.describe()
        )))
    }

    /// Assert the cursor is on the closing tag of the given element
    pub fn require_end(&self, namespace: &str, local_name: &str) -> Result<()> {
        if let XmlEvent::End(n) = &self.current {
            if n.matches(namespace, local_name) {
                return Ok(());
            }
        }
        Err(self.error(format!(
            "Expected end of '{{{}}}{}', found {}",
            namespace,
            local_name,
            self.describe()
        )))
    }

    /// Read the text content of the current element.
    ///
    /// Starts on the opening tag and leaves the cursor on its closing tag.
    pub fn element_text(&mut self) -> Result<String> {
        let name = match &self.current {
            XmlEvent::Start(s) => s.name.clone(),
            _ => return Err(self.error("Expected a start tag before element text")),
        };
        let mut text = String::new();
        loop {
            match self.next()? {
                XmlEvent::Text(t) => text.push_str(t),
                XmlEvent::End(n) if *n == name => break,
                XmlEvent::Start(_) => {
                    return Err(self.error(format!(
                        "Element '{}' must contain only text",
                        name.qualified()
                    )))
                }
                _ => return Err(self.error("Unexpected end of document")),
            }
        }
        Ok(text.trim().to_string())
    }

    /// Read the text content of the current element as a number
    pub fn element_text_as_f64(&mut self) -> Result<f64> {
        let text = self.element_text()?;
        text.parse::<f64>()
            .map_err(|_| self.error(format!("Expected a number, found '{}'", text)))
    }

    /// Read the text content of the current element as an unsigned integer
    pub fn element_text_as_u32(&mut self) -> Result<u32> {
        let text = self.element_text()?;
        text.parse::<u32>()
            .map_err(|_| self.error(format!("Expected a non-negative integer, found '{}'", text)))
    }

    /// Skip the current element including all its content
    pub fn skip_element(&mut self) -> Result<()> {
        if !self.is_start() {
            return Err(self.error("Expected a start tag to skip"));
        }
        let mut depth = 1usize;
        while depth > 0 {
            match self.next()? {
                XmlEvent::Start(_) => depth += 1,
                XmlEvent::End(_) => depth -= 1,
                XmlEvent::EndDocument => return Err(self.error("Unexpected end of document")),
                _ => {}
            }
        }
        Ok(())
    }

    /// Current position for error reporting
    pub fn location(&self) -> Location {
        let element = self.name().map(|n| n.qualified()).unwrap_or_default();
        Location::new(self.reader.buffer_position() as u64, element)
    }

    /// Build a structural parse error at the current position
    pub fn error(&self, message: impl Into<String>) -> GmlError {
        GmlError::parse(self.location(), message)
    }

    fn describe(&self) -> String {
        match &self.current {
            XmlEvent::StartDocument => "start of document".to_string(),
            XmlEvent::Start(s) => format!("start of '{}'", s.name.qualified()),
            XmlEvent::End(n) => format!("end of '{}'", n.qualified()),
            XmlEvent::Text(_) => "text".to_string(),
            XmlEvent::EndDocument => "end of document".to_string(),
        }
    }
}

fn namespace_of(resolved: ResolveResult<'_>, name: &QName<'_>, offset: u64) -> Result<String> {
    match resolved {
        ResolveResult::Bound(Namespace(uri)) => Ok(String::from_utf8_lossy(uri).into_owned()),
        ResolveResult::Unbound => Ok(String::new()),
        ResolveResult::Unknown(prefix) => Err(GmlError::parse(
            Location::new(offset, String::from_utf8_lossy(name.as_ref()).into_owned()),
            format!(
                "Unbound namespace prefix '{}'",
                String::from_utf8_lossy(&prefix)
            ),
        )),
    }
}

fn element_name(name: &QName<'_>, namespace: String) -> ElementName {
    ElementName {
        namespace,
        local_name: String::from_utf8_lossy(name.local_name().as_ref()).into_owned(),
        prefix: name
            .prefix()
            .map(|p| String::from_utf8_lossy(p.as_ref()).into_owned()),
    }
}

fn convert_start<R: BufRead>(
    reader: &NsReader<R>,
    e: &BytesStart<'_>,
    namespace: String,
    offset: u64,
) -> Result<StartElement> {
    let name = element_name(&e.name(), namespace);
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let (resolved, local) = reader.resolve_attribute(attr.key);
        let namespace = namespace_of(resolved, &attr.key, offset)?;
        attributes.push(XmlAttribute {
            namespace,
            local_name: String::from_utf8_lossy(local.as_ref()).into_owned(),
            value: attr.unescape_value()?.into_owned(),
        });
    }
    Ok(StartElement { name, attributes })
}
