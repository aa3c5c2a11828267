//! Declarative description of the expected document shape.
//!
//! A [`StateNode`] names one element at one position of the document and
//! carries the handlers that should run while that element is open. Nodes form
//! a tree by owning their children, which is then handed over to a
//! [`Dispatcher`](crate::Dispatcher).

mod attributes;
mod text_chunk;

use std::fmt::{self, Debug};

pub use self::attributes::{Attribute, Attributes};
pub use self::text_chunk::TextChunk;

pub type StartHandler<'h, C> = Box<dyn FnMut(&mut C, &Attributes<'_>) + 'h>;
pub type EndHandler<'h, C> = Box<dyn FnMut(&mut C) + 'h>;
pub type TextHandler<'h, C> = Box<dyn FnMut(&mut C, &TextChunk<'_>) + 'h>;

/// A named matcher with optional handlers and child matchers.
///
/// `C` is the context type the dispatcher threads through every handler call.
/// Missing handlers mean "track the element, but do nothing" for that event
/// kind.
pub struct StateNode<'h, C = ()> {
    tag: String,
    pub(crate) on_start: Option<StartHandler<'h, C>>,
    pub(crate) on_end: Option<EndHandler<'h, C>>,
    pub(crate) on_text: Option<TextHandler<'h, C>>,
    pub(crate) children: Vec<StateNode<'h, C>>,
}

impl<'h, C> StateNode<'h, C> {
    #[inline]
    pub fn new(tag: impl Into<String>) -> Self {
        StateNode {
            tag: tag.into(),
            on_start: None,
            on_end: None,
            on_text: None,
            children: Vec::new(),
        }
    }

    #[inline]
    pub fn on_start(mut self, handler: impl FnMut(&mut C, &Attributes<'_>) + 'h) -> Self {
        self.on_start = Some(Box::new(handler));

        self
    }

    #[inline]
    pub fn on_end(mut self, handler: impl FnMut(&mut C) + 'h) -> Self {
        self.on_end = Some(Box::new(handler));

        self
    }

    #[inline]
    pub fn on_text(mut self, handler: impl FnMut(&mut C, &TextChunk<'_>) + 'h) -> Self {
        self.on_text = Some(Box::new(handler));

        self
    }

    #[inline]
    pub fn with_child(mut self, child: StateNode<'h, C>) -> Self {
        self.add_child(child);

        self
    }

    /// Attaches `child` after the already attached children.
    ///
    /// Siblings are expected to have distinct tags. If they don't, the one
    /// attached first is the only one that ever matches.
    #[inline]
    pub fn add_child(&mut self, child: StateNode<'h, C>) {
        self.children.push(child);
    }

    /// Attaches a handler-less child and returns it for further wiring.
    pub fn add_child_tag(&mut self, tag: impl Into<String>) -> &mut StateNode<'h, C> {
        let idx = self.children.len();

        self.children.push(StateNode::new(tag));

        &mut self.children[idx]
    }

    #[inline]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[inline]
    pub fn children(&self) -> &[StateNode<'h, C>] {
        &self.children
    }

    #[inline]
    pub fn has_start_handler(&self) -> bool {
        self.on_start.is_some()
    }

    #[inline]
    pub fn has_end_handler(&self) -> bool {
        self.on_end.is_some()
    }

    #[inline]
    pub fn has_text_handler(&self) -> bool {
        self.on_text.is_some()
    }

    pub(crate) fn into_parts(self) -> (NodeHandlers<'h, C>, String, Vec<StateNode<'h, C>>) {
        let handlers = NodeHandlers {
            on_start: self.on_start,
            on_end: self.on_end,
            on_text: self.on_text,
        };

        (handlers, self.tag, self.children)
    }
}

pub(crate) struct NodeHandlers<'h, C> {
    pub on_start: Option<StartHandler<'h, C>>,
    pub on_end: Option<EndHandler<'h, C>>,
    pub on_text: Option<TextHandler<'h, C>>,
}

impl<C> Default for NodeHandlers<'_, C> {
    #[inline]
    fn default() -> Self {
        NodeHandlers {
            on_start: None,
            on_end: None,
            on_text: None,
        }
    }
}

// NOTE: handlers are opaque closures, so only the shape of the tree is printed.
impl<C> Debug for StateNode<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("StateNode")
            .field("tag", &self.tag)
            .field("on_start", &self.has_start_handler())
            .field("on_end", &self.has_end_handler())
            .field("on_text", &self.has_text_handler())
            .field("children", &self.children)
            .finish()
    }
}
