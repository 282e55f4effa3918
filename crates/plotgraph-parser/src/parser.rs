//! XML reader built on quick-xml.
//!
//! The reader walks the quick-xml event stream once and materializes a
//! [`Document`]. Elements are added to the document as their start tags are
//! seen, so the arena is filled in document order.

use std::{borrow::Cow, collections::HashMap};

use indexmap::IndexMap;
use log::{debug, trace};
use quick_xml::{
    Reader,
    escape::{resolve_predefined_entity, unescape_with},
    events::{BytesStart, Event},
};

use plotgraph_core::document::{Document, ElementId};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::Span,
};

/// An element whose end tag has not been seen yet.
struct OpenElement {
    id: ElementId,
    tag: String,
    span: Span,
}

/// Read `source` into a [`Document`].
pub(crate) fn read_document(source: &str) -> Result<Document, ParseError> {
    let body = source.strip_prefix('\u{feff}').unwrap_or(source);
    let offset = source.len() - body.len();
    DocumentReader::new(body, offset).read()
}

struct DocumentReader<'a> {
    reader: Reader<&'a [u8]>,
    offset: usize,
    collector: DiagnosticCollector,
    document: Option<Document>,
    open: Vec<OpenElement>,
    root_span: Option<Span>,
    entities: HashMap<String, String>,
}

impl<'a> DocumentReader<'a> {
    fn new(body: &'a str, offset: usize) -> Self {
        Self {
            reader: Reader::from_str(body),
            offset,
            collector: DiagnosticCollector::default(),
            document: None,
            open: Vec::new(),
            root_span: None,
            entities: HashMap::new(),
        }
    }

    fn position(&self) -> usize {
        self.reader.buffer_position() as usize + self.offset
    }

    fn read(mut self) -> Result<Document, ParseError> {
        loop {
            let start = self.position();
            let event = match self.reader.read_event() {
                Ok(event) => event,
                Err(err) => {
                    let at = self.reader.error_position() as usize + self.offset;
                    let diagnostic = self.malformed(err.to_string(), at);
                    return Err(self.collector.abort(diagnostic));
                }
            };
            let span = Span::new(start..self.position());

            match event {
                Event::Start(element) => {
                    let id = self.open_element(&element, span)?;
                    let tag = String::from_utf8_lossy(element.name().as_ref()).into_owned();
                    self.open.push(OpenElement { id, tag, span });
                }
                Event::Empty(element) => {
                    self.open_element(&element, span)?;
                }
                Event::End(_) => {
                    self.open.pop();
                }
                Event::Text(text) => {
                    let text = match text.xml10_content() {
                        Ok(text) => text.into_owned(),
                        Err(err) => return Err(self.abort_malformed(err.to_string(), span.start())),
                    };
                    self.push_text(&text, span)?;
                }
                Event::CData(cdata) => {
                    let text = match cdata.xml10_content() {
                        Ok(text) => text.into_owned(),
                        Err(err) => return Err(self.abort_malformed(err.to_string(), span.start())),
                    };
                    self.push_text(&text, span)?;
                }
                Event::GeneralRef(reference) => {
                    let name = String::from_utf8_lossy(reference.as_ref()).into_owned();
                    let resolved = resolve_reference(&name, &self.entities).map(Cow::into_owned);
                    match resolved {
                        Some(resolved) => self.push_text(&resolved, span)?,
                        None => self.collector.emit(
                            Diagnostic::new(ErrorCode::E003, format!("undefined entity `&{name};`"))
                                .with_label(span, "unknown entity")
                                .with_help(
                                    "declare it in the DOCTYPE or use &lt; &gt; &amp; &apos; &quot; or a character reference",
                                ),
                        ),
                    }
                }
                Event::DocType(doctype) => {
                    let doctype = String::from_utf8_lossy(doctype.as_ref()).into_owned();
                    self.entities = entity_declarations(&doctype);
                    debug!(entities = self.entities.len(); "DOCTYPE read");
                }
                Event::Eof => break,
                // Declarations, comments and processing instructions carry
                // nothing the graph needs.
                _ => {}
            }
        }

        if let Some(unclosed) = self.open.pop() {
            let diagnostic = Diagnostic::new(ErrorCode::E002, format!("element `{}` is never closed", unclosed.tag))
                .with_label(unclosed.span, "opened here")
                .with_help(format!("add a matching `</{}>`", unclosed.tag));
            return Err(self.collector.abort(diagnostic));
        }

        let Some(document) = self.document.take() else {
            let at = self.position();
            let diagnostic = Diagnostic::new(ErrorCode::E004, "document has no root element")
                .with_label(Span::point(at), "input ends here");
            return Err(self.collector.abort(diagnostic));
        };

        self.collector.finish()?;
        debug!(elements = document.len(); "XML document read");
        Ok(document)
    }

    fn open_element(&mut self, start: &BytesStart<'_>, span: Span) -> Result<ElementId, ParseError> {
        let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let attributes = self.attributes(start, span);
        trace!(tag = tag.as_str(); "Element opened");

        if let (Some(parent), Some(document)) = (self.open.last(), self.document.as_mut()) {
            return Ok(document.add_child(parent.id, tag, attributes));
        }

        if let Some(root_span) = self.root_span {
            let diagnostic = Diagnostic::new(ErrorCode::E005, format!("unexpected element `{tag}` after the root element"))
                .with_label(span, "second top-level element")
                .with_context(root_span, "root element")
                .with_help("an XML document has exactly one root element");
            let collector = std::mem::take(&mut self.collector);
            return Err(collector.abort(diagnostic));
        }

        let document = Document::new(tag, attributes);
        let root = document.root();
        self.document = Some(document);
        self.root_span = Some(span);
        Ok(root)
    }

    fn attributes(&mut self, start: &BytesStart<'_>, span: Span) -> IndexMap<String, String> {
        let mut attributes = IndexMap::new();
        for attribute in start.attributes() {
            let attribute = match attribute {
                Ok(attribute) => attribute,
                Err(err) => {
                    self.collector.emit(
                        Diagnostic::new(ErrorCode::E006, format!("malformed attribute: {err}"))
                            .with_label(span, "in this tag"),
                    );
                    continue;
                }
            };

            let name = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            let raw = normalize_attribute_value(&String::from_utf8_lossy(&attribute.value)).into_owned();
            let expanded = unescape_with(&raw, |entity| declared_entity(entity, &self.entities)).map(Cow::into_owned);
            let value = match expanded {
                Ok(value) => value,
                Err(err) => {
                    self.collector.emit(
                        Diagnostic::new(ErrorCode::E003, format!("cannot expand value of attribute `{name}`: {err}"))
                            .with_label(span, "in this tag"),
                    );
                    raw
                }
            };
            attributes.insert(name, value);
        }
        attributes
    }

    fn push_text(&mut self, text: &str, span: Span) -> Result<(), ParseError> {
        if let Some(current) = self.open.last() {
            let current = current.id;
            if let Some(document) = self.document.as_mut() {
                document.append_text(current, text);
            }
            return Ok(());
        }

        if text.trim().is_empty() {
            return Ok(());
        }

        let diagnostic = match self.root_span {
            Some(root_span) => Diagnostic::new(ErrorCode::E005, "unexpected text after the root element")
                .with_label(span, "text outside the root element")
                .with_context(root_span, "root element"),
            None => self.malformed("text before the root element".to_string(), span.start()),
        };
        let collector = std::mem::take(&mut self.collector);
        Err(collector.abort(diagnostic))
    }

    fn abort_malformed(&mut self, message: String, at: usize) -> ParseError {
        let diagnostic = self.malformed(message, at);
        std::mem::take(&mut self.collector).abort(diagnostic)
    }

    fn malformed(&self, message: String, at: usize) -> Diagnostic {
        let mut diagnostic = Diagnostic::new(ErrorCode::E001, format!("malformed XML: {message}"))
            .with_label(Span::point(at), "here");
        if let Some(open) = self.open.last() {
            diagnostic =
                diagnostic.with_context(open.span, format!("inside `{}`", open.tag));
        }
        diagnostic
    }
}

/// Resolve a general reference (the text between `&` and `;`).
fn resolve_reference<'e>(name: &str, entities: &'e HashMap<String, String>) -> Option<Cow<'e, str>> {
    if let Some(value) = declared_entity(name, entities) {
        return Some(Cow::Borrowed(value));
    }
    let code = if let Some(hex) = name.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok()?
    } else if let Some(dec) = name.strip_prefix('#') {
        dec.parse::<u32>().ok()?
    } else {
        return None;
    };
    char::from_u32(code).map(|c| Cow::Owned(c.to_string()))
}

/// Look up a named entity: the five predefined ones, then the DOCTYPE.
fn declared_entity<'e>(name: &str, entities: &'e HashMap<String, String>) -> Option<&'e str> {
    if let Some(value) = resolve_predefined_entity(name) {
        return Some(value);
    }
    entities.get(name).map(String::as_str)
}

/// Internal general entities declared in a DOCTYPE.
///
/// Only entities with a quoted literal value are kept; parameter and external
/// entities are skipped. The first declaration of a name wins. Replacement
/// text is later inserted as character data, markup included.
fn entity_declarations(doctype: &str) -> HashMap<String, String> {
    const DECL: &str = "<!ENTITY";

    let mut entities = HashMap::new();
    let mut rest = doctype;
    while let Some(at) = rest.find(DECL) {
        rest = rest[at + DECL.len()..].trim_start();
        if rest.starts_with('%') {
            continue;
        }

        let name_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let name = &rest[..name_end];
        rest = rest[name_end..].trim_start();

        let Some(quote) = rest.chars().next().filter(|&c| matches!(c, '"' | '\'')) else {
            continue;
        };
        let literal = &rest[1..];
        let Some(close) = literal.find(quote) else {
            break;
        };
        let value = &literal[..close];
        let value = unescape_with(value, resolve_predefined_entity)
            .map(Cow::into_owned)
            .unwrap_or_else(|_| value.to_string());
        entities.entry(name.to_string()).or_insert(value);
        rest = &literal[close + 1..];
    }
    entities
}

/// Attribute-value normalization: line breaks and tabs become spaces.
///
/// Runs before references are expanded, so `&#10;` still yields a newline.
fn normalize_attribute_value(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['\t', '\r', '\n']) {
        return Cow::Borrowed(raw);
    }
    Cow::Owned(raw.replace("\r\n", " ").replace(['\t', '\r', '\n'], " "))
}
