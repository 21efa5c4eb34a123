//! # Compile Options — The Configuration Surface
//!
//! Everything the caller can configure lives in [`CompileOptions`]:
//! draft selection, the entrypoint pointer, the authority scoping
//! generated identifiers, the schema-text decoder, and per-pointer or
//! per-name `format` overrides. The callback seams (`decoder`, custom
//! format validators) are trait objects behind `Arc`, so a compiled
//! validator stays `Send + Sync` and cheap to clone options into.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::draft::Draft;

/// A format validator callback: returns `true` when the string conforms.
#[derive(Clone)]
pub struct FormatCheckFn(Arc<dyn Fn(&str) -> bool + Send + Sync>);

impl FormatCheckFn {
    /// Wrap a predicate.
    pub fn new(check: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(check))
    }

    /// Run the predicate.
    pub fn check(&self, value: &str) -> bool {
        (self.0)(value)
    }
}

impl fmt::Debug for FormatCheckFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FormatCheckFn(..)")
    }
}

/// A schema-text decoder callback. The default decoder is
/// `serde_json::from_str`.
#[derive(Clone)]
pub struct DecoderFn(Arc<dyn Fn(&str) -> Result<Value, String> + Send + Sync>);

impl DecoderFn {
    /// Wrap a decoder. Errors are reported as
    /// `CompileError::MalformedJson` with the returned string as reason.
    pub fn new(decode: impl Fn(&str) -> Result<Value, String> + Send + Sync + 'static) -> Self {
        Self(Arc::new(decode))
    }

    /// Decode schema text into a JSON value tree.
    pub fn decode(&self, text: &str) -> Result<Value, String> {
        (self.0)(text)
    }
}

impl fmt::Debug for DecoderFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DecoderFn(..)")
    }
}

/// How one `format` occurrence is handled.
#[derive(Debug, Clone)]
pub enum FormatOverride {
    /// Skip the check entirely (the `false` configuration).
    Disabled,
    /// `date-time` only: additionally require a trailing `Z`.
    Utc,
    /// Replace the shipped validator with a caller-provided one.
    Custom(FormatCheckFn),
}

/// Key for a format override: a specific schema location, or every
/// occurrence of a format name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FormatKey {
    /// URI-fragment pointer of the `format` keyword's schema node,
    /// e.g. `/properties/when`.
    Pointer(String),
    /// A format name, e.g. `date-time`.
    Name(String),
}

/// Options accepted by the top-level compiler.
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    pub(crate) draft: Draft,
    pub(crate) entrypoint: Option<String>,
    pub(crate) authority: Option<String>,
    pub(crate) decoder: Option<DecoderFn>,
    pub(crate) formats: HashMap<FormatKey, FormatOverride>,
}

impl CompileOptions {
    /// Options with every default: draft 2020-12, root entrypoint,
    /// authority taken from the schema name, `serde_json` decoding,
    /// shipped format validators.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the schema dialect.
    pub fn draft(mut self, draft: Draft) -> Self {
        self.draft = draft;
        self
    }

    /// Compile the subtree at this pointer (URI or raw form) instead of
    /// the document root.
    pub fn entrypoint(mut self, pointer: impl Into<String>) -> Self {
        self.entrypoint = Some(pointer.into());
        self
    }

    /// Scope generated identifiers under this authority instead of the
    /// schema name. Must not contain `#`.
    pub fn authority(mut self, authority: impl Into<String>) -> Self {
        self.authority = Some(authority.into());
        self
    }

    /// Replace the schema-text decoder.
    pub fn decoder(mut self, decoder: DecoderFn) -> Self {
        self.decoder = Some(decoder);
        self
    }

    /// Override `format` handling at one schema location.
    pub fn format_at(mut self, pointer: impl Into<String>, handling: FormatOverride) -> Self {
        self.formats
            .insert(FormatKey::Pointer(pointer.into()), handling);
        self
    }

    /// Override handling of every occurrence of a format name.
    pub fn format_named(mut self, name: impl Into<String>, handling: FormatOverride) -> Self {
        self.formats.insert(FormatKey::Name(name.into()), handling);
        self
    }
}
