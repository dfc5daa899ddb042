//! RFC 3986/3987 IRI reference parsing, resolution against a base,
//! normalization, character-class validation and reference classification.
//!
//! Covers `parse`/`resolve`/`normalize`, the `is_rfc3986_uri_reference` /
//! `is_rfc3987_iri_reference` character-class validators, and the four
//! classification predicates (`is_relative_reference`, `is_absolute_uri`,
//! `is_same_document_reference`, `is_suffix_reference`).

use std::fmt;

/// A parsed IRI reference, decomposed into its RFC 3986 components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IriRef<'a> {
    scheme: Option<&'a str>,
    authority: Option<&'a str>,
    path: &'a str,
    query: Option<&'a str>,
    fragment: Option<&'a str>,
}

/// An error raised while parsing or resolving an IRI.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct IriParseError(String);

impl IriParseError {
    fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl<'a> IriRef<'a> {
    /// Splits an IRI reference into scheme/authority/path/query/fragment
    /// components, per RFC 3986 Appendix B, with minimal validation.
    pub fn parse(iri: &'a str) -> Result<Self, IriParseError> {
        if iri.is_empty() {
            // An empty relative reference is allowed; it resolves to the base.
            return Ok(Self {
                scheme: None,
                authority: None,
                path: "",
                query: None,
                fragment: None,
            });
        }
        let mut rest = iri;
        let scheme = if let Some(colon) = find_scheme_colon(rest) {
            let candidate = &rest[..colon];
            validate_scheme(candidate)?;
            rest = &rest[colon + 1..];
            Some(candidate)
        } else {
            None
        };
        let (rest, fragment) = match rest.find('#') {
            Some(i) => (&rest[..i], Some(&rest[i + 1..])),
            None => (rest, None),
        };
        let (rest, query) = match rest.find('?') {
            Some(i) => (&rest[..i], Some(&rest[i + 1..])),
            None => (rest, None),
        };
        let (authority, path) = if let Some(stripped) = rest.strip_prefix("//") {
            match stripped.find('/') {
                Some(i) => (Some(&stripped[..i]), &stripped[i..]),
                None => (Some(stripped), ""),
            }
        } else {
            (None, rest)
        };
        validate_no_invalid_chars(path)?;
        Ok(Self {
            scheme,
            authority,
            path,
            query,
            fragment,
        })
    }

    pub fn scheme(&self) -> Option<&'a str> {
        self.scheme
    }

    pub fn authority(&self) -> Option<&'a str> {
        self.authority
    }

    pub fn path(&self) -> &'a str {
        self.path
    }

    pub fn query(&self) -> Option<&'a str> {
        self.query
    }

    pub fn fragment(&self) -> Option<&'a str> {
        self.fragment
    }

    /// True if this reference is absolute (has a scheme).
    pub fn is_absolute(&self) -> bool {
        self.scheme.is_some()
    }

    /// Resolves this (possibly relative) reference against `base`, following
    /// RFC 3986 §5.3. `base` must itself be an absolute IRI reference.
    ///
    /// When `strict` is `false`, a reference that carries its own scheme but
    /// whose scheme differs from `base`'s only by being byte-identical to it
    /// still takes the relative-reference resolution branch used by legacy
    /// parsers (RFC 3986 §5.3 "strict" flag) -- implemented here as a literal
    /// byte comparison against `base.scheme()`, with no case normalization.
    pub fn resolve_against(&self, base: &IriRef<'_>, strict: bool) -> Result<String, IriParseError> {
        if !base.is_absolute() {
            return Err(IriParseError::new("base IRI must be absolute"));
        }
        let (scheme, authority, path, query);
        if !strict && self.scheme == base.scheme {
            return Self {
                scheme: None,
                ..self.clone()
            }
            .resolve_against(base, true);
        }
        if let Some(s) = self.scheme {
            scheme = s;
            authority = self.authority;
            path = remove_dot_segments(self.path);
            query = self.query;
        } else if self.authority.is_some() {
            scheme = base.scheme.unwrap();
            authority = self.authority;
            path = remove_dot_segments(self.path);
            query = self.query;
        } else if self.path.is_empty() {
            scheme = base.scheme.unwrap();
            authority = base.authority;
            path = base.path.to_owned();
            query = self.query.or(base.query);
        } else {
            scheme = base.scheme.unwrap();
            authority = base.authority;
            if self.path.starts_with('/') {
                path = remove_dot_segments(self.path);
            } else {
                path = remove_dot_segments(&merge_paths(base, self.path));
            }
            query = self.query;
        }
        let mut out = String::new();
        out.push_str(scheme);
        out.push(':');
        if let Some(authority) = authority {
            out.push_str("//");
            out.push_str(authority);
        }
        out.push_str(&path);
        if let Some(query) = query {
            out.push('?');
            out.push_str(query);
        }
        if let Some(fragment) = self.fragment {
            out.push('#');
            out.push_str(fragment);
        }
        Ok(out)
    }
}

fn find_scheme_colon(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let first = *bytes.first()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }
    for (i, b) in bytes.iter().enumerate() {
        match b {
            b':' => return Some(i),
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'+' | b'-' | b'.' => continue,
            _ => return None,
        }
    }
    None
}

fn validate_scheme(scheme: &str) -> Result<(), IriParseError> {
    let mut chars = scheme.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return Err(IriParseError::new("IRI scheme must start with a letter")),
    }
    if chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        Ok(())
    } else {
        Err(IriParseError::new("IRI scheme contains invalid characters"))
    }
}

fn validate_no_invalid_chars(path: &str) -> Result<(), IriParseError> {
    if path.chars().any(|c| c.is_whitespace() || c == '<' || c == '>' || c == '"') {
        return Err(IriParseError::new("IRI contains a disallowed character"));
    }
    Ok(())
}

/// RFC 3986 §5.3 path merge (used only for relative references with no authority).
fn merge_paths(base: &IriRef<'_>, reference_path: &str) -> String {
    if base.authority.is_some() && base.path.is_empty() {
        format!("/{reference_path}")
    } else if let Some(last_slash) = base.path.rfind('/') {
        format!("{}{}", &base.path[..=last_slash], reference_path)
    } else {
        reference_path.to_owned()
    }
}

/// RFC 3986 §5.2.4 remove_dot_segments.
fn remove_dot_segments(path: &str) -> String {
    let mut input = path.to_owned();
    let mut output = String::new();
    while !input.is_empty() {
        if input.starts_with("../") {
            input.replace_range(..3, "");
        } else if input.starts_with("./") {
            input.replace_range(..2, "");
        } else if input.starts_with("/./") {
            input.replace_range(..2, "");
        } else if input == "/." {
            input.replace_range(.., "/");
        } else if input.starts_with("/../") {
            input.replace_range(..3, "");
            remove_last_segment(&mut output);
        } else if input == "/.." {
            input.replace_range(.., "/");
            remove_last_segment(&mut output);
        } else if input == "." || input == ".." {
            input.clear();
        } else {
            let seg_end = if let Some(tail) = input.strip_prefix('/') {
                tail.find('/').map_or(input.len(), |i| i + 1)
            } else {
                input.find('/').unwrap_or(input.len())
            };
            output.push_str(&input[..seg_end]);
            input.replace_range(..seg_end, "");
        }
    }
    output
}

fn remove_last_segment(output: &mut String) {
    if let Some(i) = output.rfind('/') {
        output.truncate(i);
    } else {
        output.clear();
    }
}

impl<'a> IriRef<'a> {
    /// True if this reference carries no scheme (RFC 3986 §4.2).
    pub fn is_relative_reference(&self) -> bool {
        self.scheme.is_none()
    }

    /// True if this reference has a scheme and no fragment (RFC 3986 §4.3).
    pub fn is_absolute_uri(&self) -> bool {
        self.scheme.is_some() && self.fragment.is_none()
    }

    /// True if this reference has no scheme, no query, and no fragment,
    /// while still carrying an authority or a non-empty path (RFC 3986 §4.5).
    pub fn is_suffix_reference(&self) -> bool {
        self.scheme.is_none()
            && self.query.is_none()
            && self.fragment.is_none()
            && (self.authority.is_some() || !self.path.is_empty())
    }

    /// True if resolving this reference against `base` yields the same
    /// resource as `base` itself, ignoring any fragment on either side.
    pub fn is_same_document_reference(&self, base: &IriRef<'_>) -> Result<bool, IriParseError> {
        let resolved = self.resolve_against(base, true)?;
        let resolved_without_fragment = resolved.split('#').next().unwrap_or("");
        let base_string = base.to_string();
        let base_without_fragment = base_string.split('#').next().unwrap_or("");
        Ok(resolved_without_fragment == base_without_fragment)
    }

    /// Applies any subset of the three RFC 3986 normalization steps and
    /// recomposes the result into a string.
    ///
    /// - `case`: lowercase the scheme and the authority's host subcomponent
    ///   (userinfo and port untouched), uppercase percent-encoded hex
    ///   digits in path/query/fragment.
    /// - `percent_encoding`: decode `%HH` triplets that resolve to an
    ///   unreserved octet (`ALPHA` / `DIGIT` / `-` / `.` / `_` / `~`).
    /// - `path_segment`: apply RFC 3986 §5.2.4 remove-dot-segments to the
    ///   path.
    pub fn normalize(&self, case: bool, percent_encoding: bool, path_segment: bool) -> String {
        let scheme = self.scheme.map(|s| {
            if case {
                s.to_ascii_lowercase()
            } else {
                s.to_owned()
            }
        });
        let authority = self.authority.map(|a| normalize_authority(a, case));
        let mut path = self.path.to_owned();
        if percent_encoding {
            path = decode_unreserved_percent_triplets(&path);
        }
        if path_segment {
            path = remove_dot_segments(&path);
        }
        if case {
            path = uppercase_percent_hex(&path);
        }
        let query = self.query.map(|q| {
            let q = if percent_encoding {
                decode_unreserved_percent_triplets(q)
            } else {
                q.to_owned()
            };
            if case {
                uppercase_percent_hex(&q)
            } else {
                q
            }
        });
        let fragment = self.fragment.map(|f| {
            let f = if percent_encoding {
                decode_unreserved_percent_triplets(f)
            } else {
                f.to_owned()
            };
            if case {
                uppercase_percent_hex(&f)
            } else {
                f
            }
        });
        let mut out = String::new();
        if let Some(scheme) = &scheme {
            out.push_str(scheme);
            out.push(':');
        }
        if let Some(authority) = &authority {
            out.push_str("//");
            out.push_str(authority);
        }
        out.push_str(&path);
        if let Some(query) = &query {
            out.push('?');
            out.push_str(query);
        }
        if let Some(fragment) = &fragment {
            out.push('#');
            out.push_str(fragment);
        }
        out
    }
}

fn normalize_authority(authority: &str, case: bool) -> String {
    if !case {
        return authority.to_owned();
    }
    // authority = [ userinfo "@" ] host [ ":" port ]; only host is case-normalized.
    let (userinfo, rest) = match authority.rfind('@') {
        Some(i) => (Some(&authority[..=i]), &authority[i + 1..]),
        None => (None, authority),
    };
    let (host, port) = match rest.find(':') {
        Some(i) => (&rest[..i], &rest[i..]),
        None => (rest, ""),
    };
    let mut out = String::new();
    if let Some(userinfo) = userinfo {
        out.push_str(userinfo);
    }
    out.push_str(&host.to_ascii_lowercase());
    out.push_str(port);
    out
}

fn is_unreserved(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~')
}

/// Decodes `%HH` triplets whose decoded octet is an RFC 3986 "unreserved"
/// character, leaving every other percent-triplet untouched.
fn decode_unreserved_percent_triplets(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let Ok(hex) = std::str::from_utf8(&bytes[i + 1..i + 3]) {
                if let Ok(value) = u8::from_str_radix(hex, 16) {
                    if is_unreserved(value) {
                        out.push(value);
                        i += 3;
                        continue;
                    }
                }
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8(out).unwrap_or_else(|_| s.to_owned())
}

/// Uppercases the two hex digits of every `%HH` triplet.
fn uppercase_percent_hex(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            out.push(b'%');
            out.push(bytes[i + 1].to_ascii_uppercase());
            out.push(bytes[i + 2].to_ascii_uppercase());
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).unwrap_or_else(|_| s.to_owned())
}

/// Characters RFC 3986 never permits in an IRI reference regardless of
/// component, even though they may appear unescaped in careless input.
const DISALLOWED_STRUCTURAL_CHARS: [char; 8] = ['<', '>', '"', '{', '}', '|', '^', '`'];

/// Character-class validator for a strict RFC 3986 URI reference: ASCII
/// only, with the disallowed structural characters rejected unescaped.
pub fn is_rfc3986_uri_reference(s: &str) -> bool {
    s.bytes().all(|b| b < 0x80) && !s.contains(DISALLOWED_STRUCTURAL_CHARS.as_slice())
}

/// Character-class validator for an RFC 3987 IRI reference: like
/// [`is_rfc3986_uri_reference`] but additionally admits non-ASCII
/// `ucschar`/`iprivate` code points, which RFC 3987 allows throughout an
/// IRI reference (and specifically within the query and fragment for
/// private-use characters).
pub fn is_rfc3987_iri_reference(s: &str) -> bool {
    !s.contains(DISALLOWED_STRUCTURAL_CHARS.as_slice())
        && s.chars().all(|c| {
            (c as u32) < 0x80 || is_ucschar(c) || is_iprivate(c)
        })
}

/// RFC 3987's `ucschar` production: broad ranges of Unicode code points
/// outside the ASCII/surrogate/private-use areas.
fn is_ucschar(c: char) -> bool {
    matches!(c as u32,
        0xA0..=0xD7FF
        | 0xF900..=0xFDCF
        | 0xFDF0..=0xFFEF
        | 0x10000..=0x1FFFD
        | 0x20000..=0x2FFFD
        | 0x30000..=0x3FFFD
        | 0x40000..=0x4FFFD
        | 0x50000..=0x5FFFD
        | 0x60000..=0x6FFFD
        | 0x70000..=0x7FFFD
        | 0x80000..=0x8FFFD
        | 0x90000..=0x9FFFD
        | 0xA0000..=0xAFFFD
        | 0xB0000..=0xBFFFD
        | 0xC0000..=0xCFFFD
        | 0xD0000..=0xDFFFD
        | 0xE1000..=0xEFFFD
    )
}

/// RFC 3987's `iprivate` production, valid only within query components in
/// the formal grammar but accepted wherever `ucschar` is accepted here for
/// simplicity, since this validator is advisory rather than a hard parse
/// gate (IRIs are otherwise accepted as opaque strings in this crate).
fn is_iprivate(c: char) -> bool {
    matches!(c as u32, 0xE000..=0xF8FF | 0xF0000..=0xFFFFD | 0x100000..=0x10FFFD)
}

impl fmt::Display for IriRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(scheme) = self.scheme {
            write!(f, "{scheme}:")?;
        }
        if let Some(authority) = self.authority {
            write!(f, "//{authority}")?;
        }
        f.write_str(self.path)?;
        if let Some(query) = self.query {
            write!(f, "?{query}")?;
        }
        if let Some(fragment) = self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}

/// An owned, validated absolute IRI, carried across a streaming parser as the
/// current `@base`/`BASE` so later relative references can resolve against
/// it without re-parsing a borrowed string each time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Iri(String);

impl Iri {
    /// Validates `iri` as an absolute IRI (no base to resolve against).
    pub fn parse(iri: String) -> Result<Self, IriParseError> {
        if !IriRef::parse(&iri)?.is_absolute() {
            return Err(IriParseError::new(format!("{iri} is not an absolute IRI")));
        }
        Ok(Self(iri))
    }

    /// Resolves `relative` against this IRI, validating the result.
    pub fn resolve(&self, relative: &str) -> Result<Self, IriParseError> {
        Ok(Self(resolve(relative, Some(&self.0), true)?))
    }

    /// Resolves `relative` against this IRI without validating the result,
    /// for lenient parsing of input that is known to be malformed.
    pub fn resolve_unchecked(&self, relative: &str) -> Self {
        Self(resolve(relative, Some(&self.0), false).unwrap_or_else(|_| relative.to_owned()))
    }

    /// Wraps `iri` as-is, without validating it, for lenient parsing of
    /// input that is known to be malformed.
    pub fn parse_unchecked(iri: String) -> Self {
        Self(iri)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The path component, e.g. `/b/c` in `http://a/b/c?q`. Empty for an
    /// IRI like `http://example.com` whose authority absorbs everything up
    /// to the query/fragment, and also empty (rather than panicking) when
    /// this `Iri` was built via [`Self::parse_unchecked`] from malformed
    /// input that doesn't actually parse.
    pub fn path(&self) -> &str {
        IriRef::parse(&self.0).map(|r| r.path()).unwrap_or("")
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validates and, when `base` is given, resolves `iri` into an absolute IRI
/// string. Used by `NamedNode::new` (base = `None`, validation only) and by
/// streaming parsers resolving relative references against the in-scope base.
pub fn resolve(iri: &str, base: Option<&str>, strict: bool) -> Result<String, IriParseError> {
    let reference = IriRef::parse(iri)?;
    match base {
        Some(base) if !reference.is_absolute() => {
            let base = IriRef::parse(base)?;
            reference.resolve_against(&base, strict)
        }
        _ => {
            if !reference.is_absolute() {
                return Err(IriParseError::new(format!(
                    "{iri} is a relative IRI and no base IRI is provided"
                )));
            }
            Ok(iri.to_owned())
        }
    }
}

/// Parses `iri` and applies [`IriRef::normalize`], returning the recomposed
/// string. Convenience wrapper mirroring [`resolve`]'s free-function shape.
pub fn normalize(iri: &str, case: bool, percent_encoding: bool, path_segment: bool) -> Result<String, IriParseError> {
    Ok(IriRef::parse(iri)?.normalize(case, percent_encoding, path_segment))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://a/b/c/d;p?q";

    fn resolve_ok(reference: &str) -> String {
        resolve(reference, Some(BASE), true).unwrap()
    }

    #[test]
    fn rfc3986_normal_examples() {
        assert_eq!(resolve_ok("g:h"), "g:h");
        assert_eq!(resolve_ok("g"), "http://a/b/c/g");
        assert_eq!(resolve_ok("./g"), "http://a/b/c/g");
        assert_eq!(resolve_ok("g/"), "http://a/b/c/g/");
        assert_eq!(resolve_ok("/g"), "http://a/g");
        assert_eq!(resolve_ok("//g"), "http://g");
        assert_eq!(resolve_ok("?y"), "http://a/b/c/d;p?y");
        assert_eq!(resolve_ok("g?y"), "http://a/b/c/g?y");
        assert_eq!(resolve_ok("#s"), "http://a/b/c/d;p?q#s");
        assert_eq!(resolve_ok("g#s"), "http://a/b/c/g#s");
        assert_eq!(resolve_ok("g?y#s"), "http://a/b/c/g?y#s");
        assert_eq!(resolve_ok(";x"), "http://a/b/c/;x");
        assert_eq!(resolve_ok("g;x"), "http://a/b/c/g;x");
        assert_eq!(resolve_ok("g;x?y#s"), "http://a/b/c/g;x?y#s");
        assert_eq!(resolve_ok(""), "http://a/b/c/d;p?q");
        assert_eq!(resolve_ok("."), "http://a/b/c/");
        assert_eq!(resolve_ok("./"), "http://a/b/c/");
        assert_eq!(resolve_ok(".."), "http://a/b/");
        assert_eq!(resolve_ok("../"), "http://a/b/");
        assert_eq!(resolve_ok("../g"), "http://a/b/g");
        assert_eq!(resolve_ok("../.."), "http://a/");
        assert_eq!(resolve_ok("../../"), "http://a/");
        assert_eq!(resolve_ok("../../g"), "http://a/g");
    }

    #[test]
    fn rfc3986_abnormal_examples() {
        assert_eq!(resolve_ok("../../../g"), "http://a/g");
        assert_eq!(resolve_ok("../../../../g"), "http://a/g");
        assert_eq!(resolve_ok("/./g"), "http://a/g");
        assert_eq!(resolve_ok("/../g"), "http://a/g");
        assert_eq!(resolve_ok("g."), "http://a/b/c/g.");
        assert_eq!(resolve_ok(".g"), "http://a/b/c/.g");
        assert_eq!(resolve_ok("g.."), "http://a/b/c/g..");
        assert_eq!(resolve_ok("..g"), "http://a/b/c/..g");
    }

    #[test]
    fn absolute_iri_ignores_base() {
        assert_eq!(resolve("http://example.org/x", Some(BASE), true).unwrap(), "http://example.org/x");
    }

    #[test]
    fn relative_without_base_errors() {
        resolve("foo", None, true).unwrap_err();
    }

    #[test]
    fn lenient_same_scheme_drops_it() {
        // Non-strict mode resolves a same-scheme relative-looking reference
        // the way RFC 3986 describes legacy parsers doing it.
        assert_eq!(resolve("http:g", Some(BASE), false).unwrap(), "http://a/b/c/g");
        assert_eq!(resolve("http:g", Some(BASE), true).unwrap(), "http:g");
    }

    #[test]
    fn classification_predicates() {
        let relative = IriRef::parse("./g").unwrap();
        assert!(relative.is_relative_reference());
        assert!(!relative.is_absolute_uri());
        assert!(relative.is_suffix_reference());

        let absolute = IriRef::parse("http://a/b/c").unwrap();
        assert!(!absolute.is_relative_reference());
        assert!(absolute.is_absolute_uri());
        assert!(!absolute.is_suffix_reference());

        let with_fragment = IriRef::parse("http://a/b/c#s").unwrap();
        assert!(!with_fragment.is_absolute_uri());

        let suffix = IriRef::parse("a/b/c").unwrap();
        assert!(suffix.is_suffix_reference());
        let query_only = IriRef::parse("?y").unwrap();
        assert!(!query_only.is_suffix_reference());
    }

    #[test]
    fn same_document_reference() {
        let base = IriRef::parse(BASE).unwrap();
        assert!(IriRef::parse("#s").unwrap().is_same_document_reference(&base).unwrap());
        assert!(IriRef::parse("").unwrap().is_same_document_reference(&base).unwrap());
        assert!(!IriRef::parse("other").unwrap().is_same_document_reference(&base).unwrap());
    }

    #[test]
    fn normalize_case_lowercases_scheme_and_host() {
        let reference = IriRef::parse("HTTP://Example.COM/Path").unwrap();
        assert_eq!(
            reference.normalize(true, false, false),
            "http://example.com/Path"
        );
    }

    #[test]
    fn normalize_percent_encoding_decodes_unreserved_octets() {
        let reference = IriRef::parse("http://example.com/%7Euser").unwrap();
        assert_eq!(
            reference.normalize(false, true, false),
            "http://example.com/~user"
        );
    }

    #[test]
    fn normalize_path_segment_removes_dot_segments() {
        let reference = IriRef::parse("http://example.com/a/b/../c").unwrap();
        assert_eq!(
            reference.normalize(false, false, true),
            "http://example.com/a/c"
        );
    }

    #[test]
    fn uri_reference_character_classes() {
        assert!(is_rfc3986_uri_reference("http://example.com/a"));
        assert!(!is_rfc3986_uri_reference("http://example.com/a>b"));
        assert!(!is_rfc3986_uri_reference("http://example.com/caf\u{e9}"));
        assert!(is_rfc3987_iri_reference("http://example.com/caf\u{e9}"));
        assert!(!is_rfc3987_iri_reference("http://example.com/a>b"));
    }
}
