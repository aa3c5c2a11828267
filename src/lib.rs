//! Declarative dispatch of streaming XML events.
//!
//! Describe the expected document shape as a tree of [`StateNode`]s, each
//! carrying optional start, end and text handlers, register it with a
//! [`Dispatcher`] and feed it the events of a document. The dispatcher keeps
//! track of the open elements and calls the handlers of the node that matches
//! the current position in the document.
//!
//! ```
//! use tagdispatch::{parse_str, Dispatcher, StateNode};
//!
//! #[derive(Default)]
//! struct Item {
//!     id: String,
//!     name: String,
//! }
//!
//! let mut dispatcher = Dispatcher::with_context(Vec::<Item>::new());
//!
//! dispatcher.register_top_level(
//!     StateNode::new("items").with_child(
//!         StateNode::new("item")
//!             .on_start(|items: &mut Vec<Item>, attrs| {
//!                 items.push(Item {
//!                     id: attrs.get("id").unwrap_or_default().to_string(),
//!                     ..Item::default()
//!                 });
//!             })
//!             .with_child(StateNode::new("name").on_text(|items: &mut Vec<Item>, text| {
//!                 if let Some(item) = items.last_mut() {
//!                     item.name.push_str(&text.as_str());
//!                 }
//!             })),
//!     ),
//! );
//!
//! parse_str(
//!     r#"<items><item id="w1"><name>Widget</name></item></items>"#,
//!     &mut dispatcher,
//! )
//! .unwrap();
//!
//! let items = dispatcher.into_context();
//!
//! assert_eq!(items[0].id, "w1");
//! assert_eq!(items[0].name, "Widget");
//! ```
//!
//! Events that don't fit the registered tree never fail the parse. They are
//! reported as [`Diagnostic`]s to the dispatcher's [`DiagnosticSink`], which
//! by default logs them through the `log` facade.

mod dispatcher;
mod errors;
mod parser;
mod state;

pub use self::dispatcher::{
    Diagnostic, DiagnosticLog, DiagnosticSink, Dispatcher, Event, EventSink, LogSink,
};
pub use self::errors::{EncodingError, ParseError};
pub use self::parser::{
    parse_file, parse_str, CaptureFlags, CdataHandler, CommentHandler, DoctypeHandler,
    ExtensionHandlers, Parser, ProcessingInstructionHandler, Settings, XmlDecl, XmlDeclHandler,
};
pub use self::state::{
    Attribute, Attributes, EndHandler, StartHandler, StateNode, TextChunk, TextHandler,
};
