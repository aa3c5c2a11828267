use crate::state::Attributes;

/// A structural event delivered by a tokenizer, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event<'i> {
    Start {
        tag: &'i str,
        attributes: &'i Attributes<'i>,
    },
    End {
        tag: &'i str,
    },
    Text(&'i [u8]),
}

/// Consumer of the structural event stream.
pub trait EventSink {
    fn handle_event(&mut self, event: Event<'_>);
}

impl<F: FnMut(Event<'_>)> EventSink for F {
    #[inline]
    fn handle_event(&mut self, event: Event<'_>) {
        self(event);
    }
}
