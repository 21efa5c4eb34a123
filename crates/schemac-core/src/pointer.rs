//! # JSON Pointer — Segment Sequences and Validator Naming
//!
//! `SchemaPointer` converts between the three renderings a pointer has in
//! this system:
//!
//! - the URI-fragment form used for schema locations (`#/a/b/0`, with
//!   RFC 6901 `~0`/`~1` escaping plus percent-encoding of bytes that are
//!   not fragment-safe);
//! - the raw RFC 6901 form used for instance locations (`/001 invalid`
//!   keeps its space);
//! - the `fun_id` form that names generated validators, scoped by an
//!   authority.
//!
//! ## Invariants
//!
//! - `SchemaPointer::parse(p.to_uri()) == p` for every pointer.
//! - `fun_id` is injective for distinct `(authority, pointer)` pairs and
//!   stable across runs. Authorities must not contain `#`.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Error while parsing a pointer from its URI or raw form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PointerParseError {
    /// The input is neither a fragment (`#...`) nor a rooted pointer (`/...`).
    #[error("pointer must be empty or start with '/' or '#': {0:?}")]
    InvalidPrefix(String),

    /// A `~` escape other than `~0` or `~1`.
    #[error("pointer contains invalid escape (only ~0 and ~1 are allowed): {0:?}")]
    InvalidEscape(String),

    /// A `%` sequence that is not two hex digits.
    #[error("pointer contains invalid percent-encoding: {0:?}")]
    InvalidPercentEncoding(String),
}

/// A JSON Pointer into a schema or instance document.
///
/// The empty pointer refers to the document root. Segments are stored
/// unescaped; escaping is applied only when rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct SchemaPointer {
    segments: Vec<String>,
}

impl SchemaPointer {
    /// The root pointer (empty segment sequence).
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a pointer directly from unescaped segments.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a pointer from URI-fragment form (`"#"`, `"#/..."`) or raw
    /// form (`""`, `"/"`, `"/..."`).
    ///
    /// Fragment forms are percent-decoded before RFC 6901 unescaping; raw
    /// forms receive RFC 6901 unescaping only.
    pub fn parse(input: &str) -> Result<Self, PointerParseError> {
        let (body, is_fragment) = match input.strip_prefix('#') {
            Some(rest) => (rest, true),
            None => (input, false),
        };

        // "" and "/" both denote the root.
        if body.is_empty() || body == "/" {
            return Ok(Self::root());
        }

        let Some(body) = body.strip_prefix('/') else {
            return Err(PointerParseError::InvalidPrefix(input.to_string()));
        };

        let mut segments = Vec::new();
        for raw in body.split('/') {
            let decoded = if is_fragment {
                percent_decode(raw)?
            } else {
                raw.to_string()
            };
            segments.push(unescape_rfc6901(&decoded)?);
        }
        Ok(Self { segments })
    }

    /// True for the document root.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The unescaped segments.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Append exactly one (unescaped) segment.
    pub fn join(&self, segment: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        Self { segments }
    }

    /// Append an array index as a segment.
    pub fn join_index(&self, index: usize) -> Self {
        self.join(&index.to_string())
    }

    /// The parent pointer, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// URI-fragment rendering: `#/a/b` with RFC 6901 escaping and
    /// percent-encoding. The root renders as `#`.
    pub fn to_uri(&self) -> String {
        format!("#{}", self.to_fragment())
    }

    /// The fragment body of [`to_uri`](Self::to_uri), without the leading
    /// `#`. This is the rendering used for `schema_pointer` in failure
    /// records (`^` becomes `%5E`). The root renders as the empty string.
    pub fn to_fragment(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            out.push('/');
            out.push_str(&percent_encode(&escape_rfc6901(segment)));
        }
        out
    }

    /// Raw RFC 6901 rendering used for instance locations. No
    /// percent-encoding; the root renders as `/`.
    pub fn to_json_ptr(&self) -> String {
        if self.segments.is_empty() {
            return "/".to_string();
        }
        let mut out = String::new();
        for segment in &self.segments {
            out.push('/');
            out.push_str(&escape_rfc6901(segment));
        }
        out
    }

    /// The stable identifier of the validator generated for this pointer
    /// under `authority`. Injective for distinct `(authority, pointer)`
    /// pairs because `#` cannot appear in a valid authority and every
    /// reserved byte inside segments is percent-encoded.
    pub fn fun_id(&self, authority: &str) -> String {
        format!("{authority}{}", self.to_uri())
    }
}

impl fmt::Display for SchemaPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uri())
    }
}

/// RFC 6901 escaping: `~` → `~0`, `/` → `~1`.
fn escape_rfc6901(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

/// RFC 6901 unescaping. Rejects `~` followed by anything but `0` or `1`.
fn unescape_rfc6901(segment: &str) -> Result<String, PointerParseError> {
    let mut out = String::with_capacity(segment.len());
    let mut chars = segment.chars();
    while let Some(ch) = chars.next() {
        if ch != '~' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('0') => out.push('~'),
            Some('1') => out.push('/'),
            _ => return Err(PointerParseError::InvalidEscape(segment.to_string())),
        }
    }
    Ok(out)
}

/// Bytes allowed verbatim in a URI fragment (RFC 3986 `fragment`,
/// excluding `/` which is our segment separator and `~` which carries
/// RFC 6901 escapes).
fn is_fragment_safe(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
        || matches!(
            byte,
            b'-' | b'.' | b'_' | b'~'
                | b'!' | b'$' | b'&' | b'\'' | b'(' | b')'
                | b'*' | b'+' | b',' | b';' | b'='
                | b':' | b'@'
        )
}

fn percent_encode(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        if is_fragment_safe(byte) {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

fn percent_decode(segment: &str) -> Result<String, PointerParseError> {
    let bytes = segment.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes
                .get(i + 1..i + 3)
                .and_then(|pair| std::str::from_utf8(pair).ok())
                .and_then(|pair| u8::from_str_radix(pair, 16).ok());
            match hex {
                Some(byte) => {
                    out.push(byte);
                    i += 3;
                }
                None => {
                    return Err(PointerParseError::InvalidPercentEncoding(
                        segment.to_string(),
                    ))
                }
            }
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out)
        .map_err(|_| PointerParseError::InvalidPercentEncoding(segment.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_forms() {
        for input in ["", "/", "#", "#/"] {
            let p = SchemaPointer::parse(input).expect("root form should parse");
            assert!(p.is_root(), "{input:?} should parse to root");
        }
        assert_eq!(SchemaPointer::root().to_uri(), "#");
        assert_eq!(SchemaPointer::root().to_json_ptr(), "/");
    }

    #[test]
    fn test_parse_segments() {
        let p = SchemaPointer::parse("#/a/b/0").unwrap();
        assert_eq!(p.segments(), &["a", "b", "0"]);
        let p = SchemaPointer::parse("/a/b/0").unwrap();
        assert_eq!(p.segments(), &["a", "b", "0"]);
    }

    #[test]
    fn test_rfc6901_escapes() {
        let p = SchemaPointer::parse("/a~1b/c~0d").unwrap();
        assert_eq!(p.segments(), &["a/b", "c~d"]);
        assert_eq!(p.to_json_ptr(), "/a~1b/c~0d");
    }

    #[test]
    fn test_invalid_escape_rejected() {
        let err = SchemaPointer::parse("/bad~2escape").unwrap_err();
        assert!(matches!(err, PointerParseError::InvalidEscape(_)));
    }

    #[test]
    fn test_invalid_prefix_rejected() {
        let err = SchemaPointer::parse("definitions/x").unwrap_err();
        assert!(matches!(err, PointerParseError::InvalidPrefix(_)));
    }

    #[test]
    fn test_fragment_percent_encoding() {
        let p = SchemaPointer::root().join("patternProperties").join("^S_");
        assert_eq!(p.to_fragment(), "/patternProperties/%5ES_");
        assert_eq!(p.to_uri(), "#/patternProperties/%5ES_");
        // Instance rendering stays raw.
        let space = SchemaPointer::root().join("001 invalid");
        assert_eq!(space.to_json_ptr(), "/001 invalid");
        assert_eq!(space.to_fragment(), "/001%20invalid");
    }

    #[test]
    fn test_uri_round_trip() {
        let pointers = [
            SchemaPointer::root(),
            SchemaPointer::root().join("a").join("b").join_index(0),
            SchemaPointer::root().join("a/b").join("c~d"),
            SchemaPointer::root().join("^S_").join("with space"),
            SchemaPointer::root().join("ünïcode").join("%25"),
        ];
        for p in pointers {
            let back = SchemaPointer::parse(&p.to_uri()).expect("round trip parse");
            assert_eq!(back, p, "round trip failed for {}", p.to_uri());
        }
    }

    #[test]
    fn test_join_extends_by_one() {
        let p = SchemaPointer::root().join("properties");
        let child = p.join("name");
        assert_eq!(child.segments().len(), p.segments().len() + 1);
        assert_eq!(child.parent(), Some(p));
    }

    #[test]
    fn test_fun_id_injective() {
        let a = SchemaPointer::root().join("a").join("b");
        let b = SchemaPointer::root().join("a/b");
        assert_ne!(a.fun_id("root"), b.fun_id("root"));
        assert_ne!(a.fun_id("root"), a.fun_id("other"));
        assert_eq!(a.fun_id("root"), a.fun_id("root"));
    }
}
