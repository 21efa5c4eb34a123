//! # ECMA-262 Pattern Translation
//!
//! `pattern` and `patternProperties` are specified against ECMA-262
//! regular expressions. The host engine (the `regex` crate) covers the
//! common dialect but not lookaround or backreferences, and spells a few
//! escapes differently. Translation happens once at compile time:
//! constructs with no host equivalent are rejected with
//! `CompileError::UnsupportedRegex` rather than silently changing
//! meaning at validation time.

use regex::Regex;

use schemac_core::CompileError;

use crate::node::CompiledPattern;

/// Compile an ECMA-262-flavor pattern for the host engine.
///
/// The pattern is used as written: no implicit anchoring is added.
pub(crate) fn compile_pattern(
    pattern: &str,
    location: &str,
) -> Result<CompiledPattern, CompileError> {
    let translated = translate(pattern, location)?;
    let regex = Regex::new(&translated).map_err(|e| CompileError::UnsupportedRegex {
        pattern: pattern.to_string(),
        location: location.to_string(),
        reason: e.to_string(),
    })?;
    Ok(CompiledPattern {
        regex,
        source: pattern.to_string(),
    })
}

/// Reject untranslatable constructs and rewrite the escapes whose
/// spelling differs between the dialects.
fn translate(pattern: &str, location: &str) -> Result<String, CompileError> {
    let unsupported = |reason: &str| CompileError::UnsupportedRegex {
        pattern: pattern.to_string(),
        location: location.to_string(),
        reason: reason.to_string(),
    };

    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '(' => {
                out.push('(');
                if chars.peek() == Some(&'?') {
                    out.push('?');
                    chars.next();
                    match chars.peek() {
                        Some('=') | Some('!') => {
                            return Err(unsupported("lookahead is not supported"));
                        }
                        Some('<') => {
                            // Distinguish named groups (?<name>...) from
                            // lookbehind (?<= / (?<!.
                            let mut ahead = chars.clone();
                            ahead.next();
                            match ahead.peek() {
                                Some('=') | Some('!') => {
                                    return Err(unsupported("lookbehind is not supported"));
                                }
                                // regex spells named groups (?P<name>...).
                                _ => out.push('P'),
                            }
                        }
                        _ => {}
                    }
                }
            }
            '\\' => match chars.next() {
                Some('1'..='9') => {
                    return Err(unsupported("backreferences are not supported"));
                }
                Some('c') => {
                    // \cA .. \cZ control escapes.
                    let Some(letter) = chars.next().filter(char::is_ascii_alphabetic) else {
                        return Err(unsupported("incomplete \\c control escape"));
                    };
                    let code = (letter.to_ascii_uppercase() as u8 - b'A') + 1;
                    out.push_str(&format!("\\x{code:02x}"));
                }
                Some('/') => out.push('/'),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => return Err(unsupported("trailing backslash")),
            },
            other => out.push(other),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_patterns_pass_through() {
        let p = compile_pattern("^[A-Za-z_][A-Za-z0-9_]*$", "/pattern").unwrap();
        assert!(p.regex.is_match("valid_name"));
        assert!(!p.regex.is_match("001 invalid"));
        assert_eq!(p.source, "^[A-Za-z_][A-Za-z0-9_]*$");
    }

    #[test]
    fn test_pattern_is_a_search_not_a_full_match() {
        let p = compile_pattern("b+", "/pattern").unwrap();
        assert!(p.regex.is_match("abbbc"));
    }

    #[test]
    fn test_lookaround_rejected() {
        for pattern in ["a(?=b)", "a(?!b)", "(?<=a)b", "(?<!a)b"] {
            let err = compile_pattern(pattern, "/pattern").unwrap_err();
            assert!(
                matches!(err, CompileError::UnsupportedRegex { .. }),
                "{pattern} should be rejected"
            );
        }
    }

    #[test]
    fn test_backreference_rejected() {
        let err = compile_pattern(r"(a)\1", "/pattern").unwrap_err();
        assert!(matches!(err, CompileError::UnsupportedRegex { .. }));
    }

    #[test]
    fn test_named_group_translated() {
        let p = compile_pattern("(?<word>[a-z]+)", "/pattern").unwrap();
        assert!(p.regex.is_match("hello"));
    }

    #[test]
    fn test_control_escape_translated() {
        let p = compile_pattern(r"\cI", "/pattern").unwrap();
        assert!(p.regex.is_match("a\tb"));
    }

    #[test]
    fn test_escaped_slash_translated() {
        let p = compile_pattern(r"a\/b", "/pattern").unwrap();
        assert!(p.regex.is_match("a/b"));
    }
}
