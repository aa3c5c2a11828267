use std::cell::RefCell;
use std::fmt::{self, Display};
use std::rc::Rc;
use thiserror::Error;

const LOG_TARGET: &str = "tagdispatch::dispatcher";

/// A mismatch between the incoming events and the registered tree.
///
/// Diagnostics never stop the dispatcher: the offending event is dropped and
/// the open element stack stays as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum Diagnostic {
    /// Start tag that is not a registered child of the innermost open element.
    #[error("unexpected element `{tag}` at {}", At(.open))]
    UnmatchedStart { tag: String, open: Option<String> },

    /// End tag that doesn't close the innermost open element.
    #[error("unexpected end of element `{tag}` at {}", At(.open))]
    UnmatchedEnd { tag: String, open: Option<String> },

    /// Character data while no tracked element is open.
    #[error("unexpected character data at root (length {len})")]
    StrayText { len: usize },
}

impl Diagnostic {
    /// Tag name of the offending event, if it has one.
    #[inline]
    pub fn tag(&self) -> Option<&str> {
        match self {
            Diagnostic::UnmatchedStart { tag, .. } | Diagnostic::UnmatchedEnd { tag, .. } => {
                Some(tag)
            }
            Diagnostic::StrayText { .. } => None,
        }
    }

    /// Innermost open element at the time of the event, `None` at root.
    #[inline]
    pub fn open_tag(&self) -> Option<&str> {
        match self {
            Diagnostic::UnmatchedStart { open, .. } | Diagnostic::UnmatchedEnd { open, .. } => {
                open.as_deref()
            }
            Diagnostic::StrayText { .. } => None,
        }
    }
}

struct At<'a>(&'a Option<String>);

impl Display for At<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            Some(tag) => write!(f, "`{}`", tag),
            None => f.write_str("root"),
        }
    }
}

/// Receiver of the dispatcher's diagnostic side-channel.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl<F: FnMut(Diagnostic)> DiagnosticSink for F {
    #[inline]
    fn report(&mut self, diagnostic: Diagnostic) {
        self(diagnostic);
    }
}

/// Default sink: every diagnostic becomes a `warn` record of the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    #[inline]
    fn report(&mut self, diagnostic: Diagnostic) {
        log::warn!(target: LOG_TARGET, "{}", diagnostic);
    }
}

/// Shared in-memory sink.
///
/// Clones share the same storage, so one clone can be given to a dispatcher
/// while another one is kept to inspect what was reported.
#[derive(Debug, Default, Clone)]
pub struct DiagnosticLog(Rc<RefCell<Vec<Diagnostic>>>);

impl DiagnosticLog {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    #[inline]
    pub fn to_vec(&self) -> Vec<Diagnostic> {
        self.0.borrow().clone()
    }

    #[inline]
    pub fn take(&self) -> Vec<Diagnostic> {
        self.0.borrow_mut().drain(..).collect()
    }
}

impl DiagnosticSink for DiagnosticLog {
    #[inline]
    fn report(&mut self, diagnostic: Diagnostic) {
        self.0.borrow_mut().push(diagnostic);
    }
}
