//! Classification of buffer and image URIs, and the `data:` URI codec.

use std::path::{Path, PathBuf};

use base64::{engine::general_purpose, Engine as _};

use crate::error::{Error, Result};

pub const OCTET_STREAM: &str = "application/octet-stream";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UriKind<'a> {
    /// `data:[<mime>][;base64],<payload>`
    Data {
        mime: Option<&'a str>,
        base64: bool,
        payload: &'a str,
    },
    /// Anything with a URL scheme (`http://`, `file://`, ...).
    Absolute(&'a str),
    /// A path relative to the document.
    Relative(&'a str),
}

pub fn classify(uri: &str) -> UriKind<'_> {
    if let Some(rest) = strip_prefix_ignore_case(uri, "data:") {
        let (header, payload) = rest.split_once(',').unwrap_or((rest, ""));
        let (mime, base64) = match header.strip_suffix(";base64") {
            Some(mime) => (mime, true),
            None => (header, false),
        };
        return UriKind::Data {
            mime: if mime.is_empty() { None } else { Some(mime) },
            base64,
            payload,
        };
    }
    match uri.split_once("://") {
        Some((scheme, _))
            if !scheme.is_empty()
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) =>
        {
            UriKind::Absolute(uri)
        }
        _ => UriKind::Relative(uri),
    }
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    if s.len() >= prefix.len() && s.is_char_boundary(prefix.len()) && s[..prefix.len()].eq_ignore_ascii_case(prefix) {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}

/// Resolve a relative URI against the directory holding the document.
pub fn join(base: &Path, uri: &str) -> Result<PathBuf> {
    match classify(uri) {
        UriKind::Relative(relative) => {
            let relative = relative.trim_start_matches(|c| c == '/' || c == '\\');
            Ok(base.join(relative))
        }
        _ => Err(Error::Uri(uri.to_string())),
    }
}

pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, general_purpose::STANDARD.encode(bytes))
}

/// Decode the payload of a base64 `data:` URI.
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>> {
    match classify(uri) {
        UriKind::Data {
            base64: true,
            payload,
            ..
        } => Ok(general_purpose::STANDARD.decode(payload)?),
        _ => Err(Error::Uri(uri.to_string())),
    }
}
