use bitflags::bitflags;

pub type CommentHandler<'h> = Box<dyn FnMut(&str) + 'h>;
pub type CdataHandler<'h> = Box<dyn FnMut() + 'h>;
pub type XmlDeclHandler<'h> = Box<dyn FnMut(&XmlDecl) + 'h>;
pub type ProcessingInstructionHandler<'h> = Box<dyn FnMut(&str, &str) + 'h>;
pub type DoctypeHandler<'h> = Box<dyn FnMut(&str) + 'h>;

bitflags! {
    /// Kinds of non-structural events the parser has to decode and forward.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CaptureFlags: u8 {
        const COMMENTS = 0b0000_0001;
        const CDATA_BOUNDARIES = 0b0000_0010;
        const XML_DECL = 0b0000_0100;
        const PROCESSING_INSTRUCTIONS = 0b0000_1000;
        const DOCTYPE = 0b0001_0000;
    }
}

/// Contents of the `<?xml ...?>` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlDecl {
    pub version: String,
    pub encoding: Option<String>,
    pub standalone: Option<bool>,
}

/// Handlers for tokenizer notifications outside of the element structure.
///
/// They are dispatched by the [`Parser`](super::Parser) directly and never go
/// through the [`Dispatcher`](crate::Dispatcher).
#[derive(Default)]
pub struct ExtensionHandlers<'h> {
    pub(super) comment: Option<CommentHandler<'h>>,
    pub(super) cdata_start: Option<CdataHandler<'h>>,
    pub(super) cdata_end: Option<CdataHandler<'h>>,
    pub(super) xml_decl: Option<XmlDeclHandler<'h>>,
    pub(super) processing_instruction: Option<ProcessingInstructionHandler<'h>>,
    pub(super) doctype: Option<DoctypeHandler<'h>>,
}

impl<'h> ExtensionHandlers<'h> {
    #[inline]
    pub fn comment(mut self, handler: impl FnMut(&str) + 'h) -> Self {
        self.comment = Some(Box::new(handler));

        self
    }

    #[inline]
    pub fn cdata_start(mut self, handler: impl FnMut() + 'h) -> Self {
        self.cdata_start = Some(Box::new(handler));

        self
    }

    #[inline]
    pub fn cdata_end(mut self, handler: impl FnMut() + 'h) -> Self {
        self.cdata_end = Some(Box::new(handler));

        self
    }

    #[inline]
    pub fn xml_decl(mut self, handler: impl FnMut(&XmlDecl) + 'h) -> Self {
        self.xml_decl = Some(Box::new(handler));

        self
    }

    #[inline]
    pub fn processing_instruction(mut self, handler: impl FnMut(&str, &str) + 'h) -> Self {
        self.processing_instruction = Some(Box::new(handler));

        self
    }

    #[inline]
    pub fn doctype(mut self, handler: impl FnMut(&str) + 'h) -> Self {
        self.doctype = Some(Box::new(handler));

        self
    }

    pub fn capture_flags(&self) -> CaptureFlags {
        let mut flags = CaptureFlags::empty();

        if self.comment.is_some() {
            flags |= CaptureFlags::COMMENTS;
        }

        if self.cdata_start.is_some() || self.cdata_end.is_some() {
            flags |= CaptureFlags::CDATA_BOUNDARIES;
        }

        if self.xml_decl.is_some() {
            flags |= CaptureFlags::XML_DECL;
        }

        if self.processing_instruction.is_some() {
            flags |= CaptureFlags::PROCESSING_INSTRUCTIONS;
        }

        if self.doctype.is_some() {
            flags |= CaptureFlags::DOCTYPE;
        }

        flags
    }
}

/// Parser configuration.
pub struct Settings<'s> {
    /// Encoding label used when the input has neither a byte order mark nor
    /// an `encoding` in its XML declaration.
    pub encoding: &'s str,
    /// Strip leading and trailing whitespace of text runs.
    pub trim_text: bool,
    /// Let the tokenizer reject end tags that don't match the open element.
    ///
    /// If disabled, such end tags are passed on and the dispatcher reports
    /// them as diagnostics. The tokenizer still treats every end tag as
    /// closing the innermost open element whatever its name, so `</c>` in
    /// `<a><b></c></a>` closes `b` and the document is accepted, while the
    /// dispatcher keeps `b` open. A missing end tag hidden this way is not
    /// reported as [`ParseError::UnclosedElement`](crate::ParseError::UnclosedElement).
    pub check_end_names: bool,
}

impl Default for Settings<'_> {
    #[inline]
    fn default() -> Self {
        Settings {
            encoding: "utf-8",
            trim_text: false,
            check_end_names: true,
        }
    }
}
