use std::borrow::Cow;
use std::fmt::{self, Debug};

/// A fragment of character data.
///
/// The tokenizer may split one logical text run into several chunks, so a
/// handler that needs the whole text has to accumulate it.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TextChunk<'i>(&'i [u8]);

impl<'i> TextChunk<'i> {
    #[inline]
    pub fn new(bytes: &'i [u8]) -> Self {
        TextChunk(bytes)
    }

    #[inline]
    pub fn as_bytes(&self) -> &'i [u8] {
        self.0
    }

    /// Text of the chunk, with invalid UTF-8 sequences replaced.
    #[inline]
    pub fn as_str(&self) -> Cow<'i, str> {
        String::from_utf8_lossy(self.0)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Debug for TextChunk<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("TextChunk").field(&self.as_str()).finish()
    }
}
