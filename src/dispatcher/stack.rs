/// Index of a node in the dispatcher's node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    pub fn new(index: usize) -> Self {
        NodeId(index)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Path from the root to the innermost open element.
///
/// The root is implicit: it is the top whenever no item is pushed, so the
/// stack can never be observed empty.
#[derive(Debug, Default)]
pub(crate) struct DispatchStack {
    items: Vec<NodeId>,
}

impl DispatchStack {
    #[inline]
    pub fn top(&self) -> NodeId {
        self.items.last().copied().unwrap_or(NodeId::ROOT)
    }

    #[inline]
    pub fn is_at_root(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of frames including the root.
    #[inline]
    pub fn depth(&self) -> usize {
        self.items.len() + 1
    }

    #[inline]
    pub fn push(&mut self, id: NodeId) {
        self.items.push(id);
    }

    /// Pops the innermost open element. The root itself is never popped.
    #[inline]
    pub fn pop(&mut self) -> Option<NodeId> {
        self.items.pop()
    }

    /// Open elements from the outermost to the innermost, root excluded.
    #[inline]
    pub fn items(&self) -> &[NodeId] {
        &self.items
    }

    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }
}
