//! # Format Validators — Shipped Defaults and Override Resolution
//!
//! The `format` keyword dispatches to a registered validator. Defaults
//! ship for `date-time`, `date`, `time`, `ipv4`, and `ipv6`, plus the
//! cheap extras `uuid`, `email`, `hostname`, `json-pointer`, and `uri`.
//! Callers may override per schema location or per format name, disable
//! a format, require UTC for `date-time`, or install a custom callback.
//!
//! Unknown format names with no override are accepted silently — the
//! drafts treat `format` as an annotation unless an implementation opts
//! in, and opting in for names we cannot check would reject valid
//! documents.

use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveTime};
use regex::Regex;

use schemac_core::{SchemaPointer, CompileError};

use crate::options::{CompileOptions, FormatCheckFn, FormatKey, FormatOverride};

/// Resolve the validator for a `format` occurrence, consulting overrides
/// by pointer first, then by name, then the shipped defaults.
///
/// `None` means no check is performed (disabled or unknown name).
pub(crate) fn resolve(
    ptr: &SchemaPointer,
    name: &str,
    options: &CompileOptions,
) -> Result<Option<FormatCheckFn>, CompileError> {
    let by_pointer = options
        .formats
        .get(&FormatKey::Pointer(ptr.to_fragment()))
        .or_else(|| options.formats.get(&FormatKey::Name(name.to_string())));

    match by_pointer {
        Some(FormatOverride::Disabled) => Ok(None),
        Some(FormatOverride::Custom(check)) => Ok(Some(check.clone())),
        Some(FormatOverride::Utc) => {
            if name != "date-time" {
                return Err(CompileError::InvalidOption(format!(
                    "the utc format option applies only to date-time, not {name:?}"
                )));
            }
            Ok(Some(FormatCheckFn::new(is_date_time_utc)))
        }
        None => Ok(shipped(name)),
    }
}

/// The shipped validator for a format name, if any.
pub(crate) fn shipped(name: &str) -> Option<FormatCheckFn> {
    let check: fn(&str) -> bool = match name {
        "date-time" => is_date_time,
        "date" => is_date,
        "time" => is_time,
        "ipv4" => is_ipv4,
        "ipv6" => is_ipv6,
        "uuid" => is_uuid,
        "email" => is_email,
        "hostname" => is_hostname,
        "json-pointer" => is_json_pointer,
        "uri" => is_uri,
        _ => return None,
    };
    Some(FormatCheckFn::new(check))
}

fn is_date_time(s: &str) -> bool {
    DateTime::parse_from_rfc3339(s).is_ok()
}

fn is_date_time_utc(s: &str) -> bool {
    s.ends_with('Z') && is_date_time(s)
}

/// RFC 3339 `full-date`. chrono accepts unpadded components, so the
/// shape is checked structurally before the calendar check.
fn is_date(s: &str) -> bool {
    let bytes = s.as_bytes();
    s.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

/// RFC 3339 `full-time`: `HH:MM:SS[.frac](Z|±HH:MM)`.
fn is_time(s: &str) -> bool {
    let naive = if let Some(prefix) = s.strip_suffix('Z').or_else(|| s.strip_suffix('z')) {
        prefix
    } else {
        // Numeric offset: the last 6 bytes must be ±HH:MM.
        let Some(split) = s.len().checked_sub(6) else {
            return false;
        };
        if !s.is_char_boundary(split) {
            return false;
        }
        let (prefix, offset) = s.split_at(split);
        let bytes = offset.as_bytes();
        let sign_ok = bytes[0] == b'+' || bytes[0] == b'-';
        let digits_ok = bytes[1].is_ascii_digit()
            && bytes[2].is_ascii_digit()
            && bytes[3] == b':'
            && bytes[4].is_ascii_digit()
            && bytes[5].is_ascii_digit();
        if !(sign_ok && digits_ok) {
            return false;
        }
        let hours = (bytes[1] - b'0') * 10 + (bytes[2] - b'0');
        let minutes = (bytes[4] - b'0') * 10 + (bytes[5] - b'0');
        if hours > 23 || minutes > 59 {
            return false;
        }
        prefix
    };
    // Structural HH:MM:SS prefix first; chrono accepts unpadded fields.
    let bytes = naive.as_bytes();
    let shape_ok = bytes.len() >= 8
        && bytes[0].is_ascii_digit()
        && bytes[1].is_ascii_digit()
        && bytes[2] == b':'
        && bytes[3].is_ascii_digit()
        && bytes[4].is_ascii_digit()
        && bytes[5] == b':'
        && bytes[6].is_ascii_digit()
        && bytes[7].is_ascii_digit()
        && (bytes.len() == 8 || bytes[8] == b'.');
    shape_ok && NaiveTime::parse_from_str(naive, "%H:%M:%S%.f").is_ok()
}

fn is_ipv4(s: &str) -> bool {
    // Rust's parser already rejects leading zeros, per the format rules.
    s.parse::<Ipv4Addr>().is_ok()
}

fn is_ipv6(s: &str) -> bool {
    s.parse::<Ipv6Addr>().is_ok()
}

fn uuid_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
            .expect("uuid regex is valid")
    })
}

fn is_uuid(s: &str) -> bool {
    uuid_regex().is_match(s)
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$")
            .expect("email regex is valid")
    })
}

fn is_email(s: &str) -> bool {
    email_regex().is_match(s)
}

fn hostname_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$")
            .expect("hostname regex is valid")
    })
}

fn is_hostname(s: &str) -> bool {
    s.len() <= 253 && hostname_regex().is_match(s)
}

fn is_json_pointer(s: &str) -> bool {
    if s.is_empty() {
        return true;
    }
    if !s.starts_with('/') {
        return false;
    }
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch == '~' && !matches!(chars.next(), Some('0') | Some('1')) {
            return false;
        }
    }
    true
}

fn uri_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*:[^\s]*$").expect("uri regex is valid")
    })
}

fn is_uri(s: &str) -> bool {
    uri_regex().is_match(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_time() {
        assert!(is_date_time("2026-08-02T10:20:30Z"));
        assert!(is_date_time("2026-08-02T10:20:30.5+05:30"));
        assert!(!is_date_time("2026-08-02"));
        assert!(!is_date_time("2026-13-02T10:20:30Z"));
    }

    #[test]
    fn test_date_time_utc_requires_z() {
        assert!(is_date_time_utc("2026-08-02T10:20:30Z"));
        assert!(!is_date_time_utc("2026-08-02T10:20:30+00:00"));
    }

    #[test]
    fn test_date_and_time() {
        assert!(is_date("2026-08-02"));
        assert!(!is_date("2026-8-2"));
        assert!(!is_date("2026-02-30"));
        assert!(is_time("10:20:30Z"));
        assert!(is_time("10:20:30.25+05:30"));
        assert!(!is_time("10:20:30"));
        assert!(!is_time("25:20:30Z"));
        assert!(!is_time("10:20:30+25:00"));
    }

    #[test]
    fn test_ip_addresses() {
        assert!(is_ipv4("192.168.0.1"));
        assert!(!is_ipv4("192.168.0.256"));
        assert!(!is_ipv4("192.168.0.01"));
        assert!(is_ipv6("::1"));
        assert!(is_ipv6("2001:db8::8a2e:370:7334"));
        assert!(!is_ipv6("12345::"));
    }

    #[test]
    fn test_extra_formats() {
        assert!(is_uuid("123e4567-e89b-12d3-a456-426614174000"));
        assert!(!is_uuid("123e4567e89b12d3a456426614174000"));
        assert!(is_email("user@example.com"));
        assert!(!is_email("user@@example.com"));
        assert!(is_hostname("svc-01.internal.example"));
        assert!(!is_hostname("-leading.example"));
        assert!(is_json_pointer("/a/b~0c"));
        assert!(!is_json_pointer("a/b"));
        assert!(!is_json_pointer("/bad~2"));
        assert!(is_uri("https://example.com/x?y=1"));
        assert!(!is_uri("not a uri"));
    }

    #[test]
    fn test_unknown_format_has_no_shipped_validator() {
        assert!(shipped("regex").is_none());
        assert!(shipped("date-time").is_some());
    }
}
