use crate::errors::EncodingError;
use encoding_rs::Encoding;
use memchr::memmem;
use std::borrow::Cow;

const XML_DECL_START: &[u8] = b"<?xml";
const XML_DECL_END: &[u8] = b"?>";
const ENCODING_PSEUDO_ATTR: &[u8] = b"encoding";

/// Decodes the whole input into UTF-8 text.
///
/// The encoding is taken from the byte order mark, then from the XML
/// declaration, then from `default_label`.
pub(crate) fn decode_input<'i>(
    input: &'i [u8],
    default_label: &str,
) -> Result<Cow<'i, str>, EncodingError> {
    let (encoding, bom_len) = match Encoding::for_bom(input) {
        Some(detected) => detected,
        None => {
            let label = declared_encoding(input).unwrap_or(default_label.as_bytes());

            (encoding_for_label(label)?, 0)
        }
    };

    log::trace!(target: "tagdispatch::parser", "input encoding: {}", encoding.name());

    encoding
        .decode_without_bom_handling_and_without_replacement(&input[bom_len..])
        .ok_or(EncodingError::MalformedInput {
            encoding: encoding.name(),
        })
}

fn encoding_for_label(label: &[u8]) -> Result<&'static Encoding, EncodingError> {
    let encoding =
        Encoding::for_label_no_replacement(label).ok_or(EncodingError::UnknownEncoding)?;

    if encoding.is_ascii_compatible() {
        Ok(encoding)
    } else {
        Err(EncodingError::NonAsciiCompatibleEncoding)
    }
}

/// Value of the `encoding` pseudo-attribute of a leading XML declaration.
fn declared_encoding(input: &[u8]) -> Option<&[u8]> {
    let decl = input.strip_prefix(XML_DECL_START)?;
    let decl = &decl[..memmem::find(decl, XML_DECL_END)?];
    let after_name = &decl[memmem::find(decl, ENCODING_PSEUDO_ATTR)? + ENCODING_PSEUDO_ATTR.len()..];

    let value = after_name.trim_ascii_start().strip_prefix(b"=")?.trim_ascii_start();
    let (&quote, value) = value.split_first()?;

    if quote != b'"' && quote != b'\'' {
        return None;
    }

    Some(&value[..memchr::memchr(quote, value)?])
}
