//! Driver that feeds a tokenized XML document into an [`EventSink`].
//!
//! Tokenizing and well-formedness checks are done by `quick-xml`. The driver
//! only adapts its events: structural ones go to the sink, everything else
//! goes to the [`ExtensionHandlers`].

mod encoding;
mod settings;

use self::encoding::decode_input;
use crate::dispatcher::{Event, EventSink};
use crate::errors::ParseError;
use crate::state::{Attribute, Attributes};
use quick_xml::events::{BytesStart, Event as XmlEvent};
use quick_xml::Reader;
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use std::str;

pub use self::settings::*;

const LOG_TARGET: &str = "tagdispatch::parser";

/// Parses `input` with the default settings.
#[inline]
pub fn parse_str(input: &str, sink: &mut impl EventSink) -> Result<(), ParseError> {
    Parser::default().parse_str(input, sink)
}

/// Reads and parses the file at `path` with the default settings.
#[inline]
pub fn parse_file(path: impl AsRef<Path>, sink: &mut impl EventSink) -> Result<(), ParseError> {
    Parser::default().parse_file(path, sink)
}

#[derive(Default)]
pub struct Parser<'h, 's> {
    settings: Settings<'s>,
    extensions: ExtensionHandlers<'h>,
}

impl<'h, 's> Parser<'h, 's> {
    #[inline]
    pub fn new(settings: Settings<'s>) -> Self {
        Parser {
            settings,
            extensions: ExtensionHandlers::default(),
        }
    }

    #[inline]
    pub fn extensions(mut self, extensions: ExtensionHandlers<'h>) -> Self {
        self.extensions = extensions;

        self
    }

    pub fn parse_file(
        &mut self,
        path: impl AsRef<Path>,
        sink: &mut impl EventSink,
    ) -> Result<(), ParseError> {
        let path = path.as_ref();

        let input = fs::read(path).map_err(|source| ParseError::Io {
            path: path.to_owned(),
            source,
        })?;

        self.parse_bytes(&input, sink)
    }

    pub fn parse_bytes(&mut self, input: &[u8], sink: &mut impl EventSink) -> Result<(), ParseError> {
        let text = decode_input(input, self.settings.encoding)?;

        self.parse_text(&text, sink)
    }

    #[inline]
    pub fn parse_str(&mut self, input: &str, sink: &mut impl EventSink) -> Result<(), ParseError> {
        self.parse_text(input.strip_prefix('\u{feff}').unwrap_or(input), sink)
    }

    fn parse_text(&mut self, input: &str, sink: &mut impl EventSink) -> Result<(), ParseError> {
        let mut reader = Reader::from_str(input);
        let config = reader.config_mut();

        config.trim_text(self.settings.trim_text);
        config.check_end_names = self.settings.check_end_names;
        config.expand_empty_elements = false;

        let capture_flags = self.extensions.capture_flags();
        let mut open_elements: Vec<String> = Vec::new();
        let mut seen_root = false;

        log::trace!(target: LOG_TARGET, "capture flags: {:?}", capture_flags);

        loop {
            // NOTE: errors found while converting an event are reported at
            // the position where the event starts.
            let position = reader.buffer_position() as usize;

            let event = reader
                .read_event()
                .map_err(|err| syntax_error(input, reader.error_position() as usize, err))?;

            match event {
                XmlEvent::Start(start) => {
                    let tag = element_name(input, position, &start)?;
                    let attributes = collect_attributes(input, position, &start)?;

                    seen_root = true;
                    open_elements.push(tag.to_owned());
                    sink.handle_event(Event::Start {
                        tag,
                        attributes: &attributes,
                    });
                }
                XmlEvent::Empty(start) => {
                    let tag = element_name(input, position, &start)?;
                    let attributes = collect_attributes(input, position, &start)?;

                    seen_root = true;
                    sink.handle_event(Event::Start {
                        tag,
                        attributes: &attributes,
                    });
                    sink.handle_event(Event::End { tag });
                }
                XmlEvent::End(end) => {
                    let tag = utf8(input, position, end.name().into_inner())?;

                    open_elements.pop();
                    sink.handle_event(Event::End { tag });
                }
                XmlEvent::Text(text) => {
                    let text = text
                        .unescape()
                        .map_err(|err| syntax_error(input, position, err))?;

                    // NOTE: whitespace around the root element is not
                    // character data of the document.
                    if open_elements.is_empty() && text.trim().is_empty() {
                        continue;
                    }

                    sink.handle_event(Event::Text(text.as_bytes()));
                }
                XmlEvent::CData(cdata) => {
                    if let Some(handler) = self.extensions.cdata_start.as_mut() {
                        handler();
                    }

                    sink.handle_event(Event::Text(&cdata.into_inner()));

                    if let Some(handler) = self.extensions.cdata_end.as_mut() {
                        handler();
                    }
                }
                XmlEvent::Comment(comment) => {
                    if let Some(handler) = self.extensions.comment.as_mut() {
                        handler(&String::from_utf8_lossy(&comment.into_inner()));
                    }
                }
                XmlEvent::Decl(decl) => {
                    if capture_flags.contains(CaptureFlags::XML_DECL) {
                        let decl = XmlDecl {
                            version: decl
                                .version()
                                .map(|v| lossy(&v).into_owned())
                                .unwrap_or_default(),
                            encoding: decl
                                .encoding()
                                .and_then(Result::ok)
                                .map(|e| lossy(&e).into_owned()),
                            standalone: decl
                                .standalone()
                                .and_then(Result::ok)
                                .map(|s| &*s == b"yes"),
                        };

                        if let Some(handler) = self.extensions.xml_decl.as_mut() {
                            handler(&decl);
                        }
                    }
                }
                XmlEvent::PI(pi) => {
                    if let Some(handler) = self.extensions.processing_instruction.as_mut() {
                        handler(&lossy(pi.target()), lossy(pi.content()).trim_start());
                    }
                }
                XmlEvent::DocType(doctype) => {
                    if let Some(handler) = self.extensions.doctype.as_mut() {
                        handler(lossy(&doctype.into_inner()).trim());
                    }
                }
                XmlEvent::Eof => break,
            }
        }

        if let Some(tag) = open_elements.pop() {
            return Err(ParseError::UnclosedElement { tag });
        }

        if !seen_root {
            return Err(ParseError::NoRootElement);
        }

        log::trace!(target: LOG_TARGET, "parsed {} bytes", input.len());

        Ok(())
    }
}

fn element_name<'s>(
    input: &str,
    position: usize,
    start: &'s BytesStart<'_>,
) -> Result<&'s str, ParseError> {
    utf8(input, position, start.name().into_inner())
}

fn collect_attributes<'i>(
    input: &str,
    position: usize,
    start: &'i BytesStart<'_>,
) -> Result<Attributes<'i>, ParseError> {
    let mut attributes = Attributes::new();

    for attr in start.attributes() {
        let attr = attr.map_err(|err| syntax_error(input, position, err))?;
        let value = attr
            .unescape_value()
            .map_err(|err| syntax_error(input, position, err))?;
        let name = utf8(input, position, attr.key.into_inner())?;

        attributes.push(Attribute::new(name, value));
    }

    Ok(attributes)
}

fn utf8<'b>(input: &str, position: usize, bytes: &'b [u8]) -> Result<&'b str, ParseError> {
    str::from_utf8(bytes).map_err(|err| syntax_error(input, position, err))
}

#[inline]
fn lossy(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

fn syntax_error(input: &str, position: usize, err: impl ToString) -> ParseError {
    let position = position.min(input.len());
    let consumed = &input.as_bytes()[..position];
    let line_start = memchr::memrchr(b'\n', consumed).map_or(0, |idx| idx + 1);

    ParseError::Syntax {
        message: err.to_string(),
        position,
        line: memchr::memchr_iter(b'\n', consumed).count() + 1,
        column: position - line_start + 1,
    }
}
