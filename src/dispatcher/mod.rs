//! Routing of structural events to the handlers of a registered node tree.

mod diagnostics;
mod event;
mod stack;

use self::stack::{DispatchStack, NodeId};
use crate::state::{Attributes, NodeHandlers, StateNode, TextChunk};
use std::fmt::{self, Debug};

pub use self::diagnostics::{Diagnostic, DiagnosticLog, DiagnosticSink, LogSink};
pub use self::event::{Event, EventSink};

const LOG_TARGET: &str = "tagdispatch::dispatcher";

struct NodeSlot<'h, C> {
    // NOTE: `None` only for the synthetic root.
    tag: Option<String>,
    handlers: NodeHandlers<'h, C>,
    children: Vec<NodeId>,
}

/// Hierarchical tag dispatcher.
///
/// Registered [`StateNode`] trees are flattened into an arena owned by the
/// dispatcher. The open element stack refers to the arena by index and always
/// has the synthetic root at its bottom.
///
/// Every start event is resolved against the direct children of the innermost
/// open node only. Events that don't fit the registered tree are reported to
/// the [`DiagnosticSink`] and otherwise ignored, so intake never fails.
pub struct Dispatcher<'h, C = ()> {
    nodes: Vec<NodeSlot<'h, C>>,
    stack: DispatchStack,
    context: C,
    diagnostic_sink: Box<dyn DiagnosticSink + 'h>,
    diagnostic_count: usize,
}

impl<'h> Dispatcher<'h, ()> {
    #[inline]
    pub fn new() -> Self {
        Dispatcher::with_context(())
    }
}

impl Default for Dispatcher<'_, ()> {
    #[inline]
    fn default() -> Self {
        Dispatcher::new()
    }
}

impl<'h, C> Dispatcher<'h, C> {
    pub fn with_context(context: C) -> Self {
        let root = NodeSlot {
            tag: None,
            handlers: NodeHandlers::default(),
            children: Vec::new(),
        };

        Dispatcher {
            nodes: vec![root],
            stack: DispatchStack::default(),
            context,
            diagnostic_sink: Box::new(LogSink),
            diagnostic_count: 0,
        }
    }

    #[inline]
    pub fn with_diagnostic_sink(mut self, sink: impl DiagnosticSink + 'h) -> Self {
        self.diagnostic_sink = Box::new(sink);

        self
    }

    /// Attaches `node` and its subtree under the synthetic root.
    ///
    /// Nodes registered earlier take precedence over later ones with the same
    /// tag.
    pub fn register_top_level(&mut self, node: StateNode<'h, C>) {
        let id = self.insert(node);

        self.nodes[NodeId::ROOT.index()].children.push(id);
    }

    fn insert(&mut self, node: StateNode<'h, C>) -> NodeId {
        let (handlers, tag, children) = node.into_parts();
        let id = NodeId::new(self.nodes.len());

        self.nodes.push(NodeSlot {
            tag: Some(tag),
            handlers,
            children: Vec::with_capacity(children.len()),
        });

        for child in children {
            let child_id = self.insert(child);

            self.nodes[id.index()].children.push(child_id);
        }

        id
    }

    pub fn handle_start(&mut self, tag: &str, attributes: &Attributes<'_>) {
        let top = self.stack.top();

        let matched = self.nodes[top.index()]
            .children
            .iter()
            .copied()
            .find(|&id| self.nodes[id.index()].tag.as_deref() == Some(tag));

        match matched {
            Some(id) => {
                self.stack.push(id);

                log::trace!(
                    target: LOG_TARGET,
                    "open `{}` (depth {})",
                    tag,
                    self.stack.depth()
                );

                if let Some(handler) = self.nodes[id.index()].handlers.on_start.as_mut() {
                    handler(&mut self.context, attributes);
                }
            }
            None => self.report(|open| Diagnostic::UnmatchedStart {
                tag: tag.to_owned(),
                open,
            }),
        }
    }

    pub fn handle_end(&mut self, tag: &str) {
        let top = self.stack.top();

        if self.nodes[top.index()].tag.as_deref() != Some(tag) {
            // NOTE: the stack is left as is, an unmatched end never pops.
            self.report(|open| Diagnostic::UnmatchedEnd {
                tag: tag.to_owned(),
                open,
            });

            return;
        }

        if let Some(handler) = self.nodes[top.index()].handlers.on_end.as_mut() {
            handler(&mut self.context);
        }

        self.stack.pop();

        log::trace!(
            target: LOG_TARGET,
            "close `{}` (depth {})",
            tag,
            self.stack.depth()
        );
    }

    pub fn handle_text(&mut self, text: &[u8]) {
        if self.stack.is_at_root() {
            self.report(|_| Diagnostic::StrayText { len: text.len() });

            return;
        }

        let top = self.stack.top();

        match self.nodes[top.index()].handlers.on_text.as_mut() {
            Some(handler) => handler(&mut self.context, &TextChunk::new(text)),
            None => log::trace!(target: LOG_TARGET, "drop {} bytes of text", text.len()),
        }
    }

    fn report(&mut self, make_diagnostic: impl FnOnce(Option<String>) -> Diagnostic) {
        let diagnostic = make_diagnostic(self.current_tag().map(str::to_owned));

        self.diagnostic_count += 1;
        self.diagnostic_sink.report(diagnostic);
    }

    /// Tag of the innermost open element, `None` at root.
    #[inline]
    pub fn current_tag(&self) -> Option<&str> {
        self.nodes[self.stack.top().index()].tag.as_deref()
    }

    /// Tags of the open elements from the outermost to the innermost.
    pub fn open_path(&self) -> impl Iterator<Item = &str> + '_ {
        self.stack
            .items()
            .iter()
            .filter_map(move |id| self.nodes[id.index()].tag.as_deref())
    }

    /// Number of stack frames, the root included.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    #[inline]
    pub fn is_at_root(&self) -> bool {
        self.stack.is_at_root()
    }

    /// Number of diagnostics reported since construction.
    #[inline]
    pub fn diagnostic_count(&self) -> usize {
        self.diagnostic_count
    }

    /// Drops all open elements without invoking their end handlers.
    #[inline]
    pub fn reset(&mut self) {
        self.stack.clear();
    }

    #[inline]
    pub fn context(&self) -> &C {
        &self.context
    }

    #[inline]
    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    #[inline]
    pub fn into_context(self) -> C {
        self.context
    }
}

impl<C> EventSink for Dispatcher<'_, C> {
    #[inline]
    fn handle_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start { tag, attributes } => self.handle_start(tag, attributes),
            Event::End { tag } => self.handle_end(tag),
            Event::Text(text) => self.handle_text(text),
        }
    }
}

impl<C: Debug> Debug for Dispatcher<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("open_path", &self.open_path().collect::<Vec<_>>())
            .field("context", &self.context)
            .field("diagnostic_count", &self.diagnostic_count)
            .finish()
    }
}
