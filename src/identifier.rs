//! Typed identifiers and their validation.
//!
//! This module provides [`Identifier`] (a kind/value pair) and
//! [`IdentifierValidator`], which checks ISBN, ISSN, DOI, Handle, URL and URI
//! values. Checksum identifiers are validated with separators (`-`, space)
//! stripped.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ConversionError, Result};

lazy_static! {
    static ref DOI_PATTERN: Regex =
        Regex::new(r"^10\.\d{4,9}/[-._;()/:A-Za-z0-9<>\[\]+#]+$").unwrap();
    static ref HANDLE_PATTERN: Regex =
        Regex::new(r"^[\d.]+/[-._;()/:A-Za-z0-9<>\[\]+#]+$").unwrap();
    static ref URI_SCHEME: Regex = Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*$").unwrap();
}

const DOI_PREFIXES: &[&str] = &[
    "https://doi.org/",
    "http://doi.org/",
    "https://dx.doi.org/",
    "http://dx.doi.org/",
    "doi:",
];

const HANDLE_PREFIXES: &[&str] = &[
    "https://hdl.handle.net/",
    "http://hdl.handle.net/",
    "hdl:",
];

const URL_SCHEMES: &[&str] = &["http", "https", "ftp", "ftps"];

/// Kind of identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IdentifierType {
    /// Digital Object Identifier
    Doi,
    /// 10-digit ISBN
    Isbn10,
    /// 13-digit ISBN
    Isbn13,
    /// International Standard Serial Number
    Issn,
    /// CNRI Handle
    Handle,
    /// Generic URI
    Uri,
    /// Resolvable web URL
    Url,
    /// Anything else
    Other,
}

impl IdentifierType {
    /// Human-readable label used in diagnostics.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Doi => "DOI",
            Self::Isbn10 => "ISBN-10",
            Self::Isbn13 => "ISBN-13",
            Self::Issn => "ISSN",
            Self::Handle => "Handle",
            Self::Uri => "URI",
            Self::Url => "URL",
            Self::Other => "identifier",
        }
    }

    /// Description of the format a valid value must have.
    #[must_use]
    pub const fn expected_format(&self) -> &'static str {
        match self {
            Self::Doi => "10.NNNN/suffix, optionally prefixed by doi: or a doi.org URL",
            Self::Isbn10 => "9 digits followed by a check digit or X, with a valid mod-11 checksum",
            Self::Isbn13 => "13 digits with a valid mod-10 checksum",
            Self::Issn => "7 digits followed by a check digit or X, with a valid mod-11 checksum",
            Self::Handle => "prefix/suffix with a numeric prefix, optionally prefixed by hdl:",
            Self::Uri => "scheme:rest with a scheme of letters, digits, +, . or -",
            Self::Url => "an http(s) or ftp(s) URL with a host and no whitespace",
            Self::Other => "non-blank text",
        }
    }
}

impl fmt::Display for IdentifierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A typed identifier value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    kind: IdentifierType,
    value: String,
}

impl Identifier {
    /// Create an identifier without format validation.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::MissingRequiredField`] if the value is blank.
    pub fn new(kind: IdentifierType, value: impl Into<String>) -> Result<Self> {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            return Err(ConversionError::MissingRequiredField(format!(
                "{} value",
                kind.label()
            )));
        }
        Ok(Self { kind, value })
    }

    /// Validate and normalize a raw value read from `field`.
    ///
    /// Normalization strips resolver prefixes from DOIs and Handles, removes
    /// separators from ISBNs and renders ISSNs as `NNNN-NNNN`.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::InvalidIdentifier`] if validation fails.
    pub fn parse(kind: IdentifierType, field: &str, raw: &str) -> Result<Self> {
        let value = IdentifierValidator::validate(kind, field, raw)?;
        Ok(Self { kind, value })
    }

    /// Parse an ISBN, choosing ISBN-10 or ISBN-13 from its digit count.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::InvalidIdentifier`] if the value is neither.
    pub fn parse_isbn(field: &str, raw: &str) -> Result<Self> {
        let kind = match strip_separators(raw).len() {
            13 => IdentifierType::Isbn13,
            _ => IdentifierType::Isbn10,
        };
        Self::parse(kind, field, raw)
    }

    /// Identifier kind.
    #[must_use]
    pub const fn kind(&self) -> IdentifierType {
        self.kind
    }

    /// Identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.label(), self.value)
    }
}

fn strip_separators(raw: &str) -> String {
    raw.trim().replace(['-', ' '], "").to_uppercase()
}

fn strip_prefix_ignore_case<'a>(value: &'a str, prefixes: &[&str]) -> &'a str {
    for prefix in prefixes {
        if value.len() >= prefix.len()
            && value.is_char_boundary(prefix.len())
            && value[..prefix.len()].eq_ignore_ascii_case(prefix)
        {
            return &value[prefix.len()..];
        }
    }
    value
}

/// Weighted mod-11 check shared by ISBN-10 (weights 10..2) and ISSN (8..2).
fn mod11_checksum(clean: &str, len: usize) -> bool {
    if clean.len() != len {
        return false;
    }
    let mut sum = 0;
    for (i, ch) in clean.chars().enumerate() {
        let digit = if i == len - 1 && ch == 'X' {
            10
        } else if let Some(d) = ch.to_digit(10) {
            d
        } else {
            return false;
        };
        let weight = if i == len - 1 {
            1
        } else {
            u32::try_from(len - i).unwrap_or(0)
        };
        sum += digit * weight;
    }
    sum % 11 == 0
}

/// Identifier validator.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentifierValidator;

impl IdentifierValidator {
    /// Validate an ISBN-10 checksum.
    ///
    /// Digits are weighted 10 down to 2 and the check value (0–9 or `X` for
    /// 10) is added; the sum must be divisible by 11.
    ///
    /// # Examples
    ///
    /// ```
    /// use bibo_bridge::IdentifierValidator;
    ///
    /// assert!(IdentifierValidator::is_valid_isbn10("0-306-40615-2"));
    /// assert!(!IdentifierValidator::is_valid_isbn10("0-306-40615-3"));
    /// ```
    #[must_use]
    pub fn is_valid_isbn10(isbn: &str) -> bool {
        mod11_checksum(&strip_separators(isbn), 10)
    }

    /// Validate an ISBN-13 checksum.
    ///
    /// Digits 0–11 are weighted alternately 1 and 3; the check digit must
    /// equal `(10 - sum mod 10) mod 10`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bibo_bridge::IdentifierValidator;
    ///
    /// assert!(IdentifierValidator::is_valid_isbn13("978-0-306-40615-7"));
    /// assert!(!IdentifierValidator::is_valid_isbn13("978-0-306-40615-8"));
    /// ```
    #[must_use]
    pub fn is_valid_isbn13(isbn: &str) -> bool {
        let clean = strip_separators(isbn);
        if clean.len() != 13 {
            return false;
        }

        let mut digits = Vec::with_capacity(13);
        for ch in clean.chars() {
            match ch.to_digit(10) {
                Some(d) => digits.push(d),
                None => return false,
            }
        }

        let sum: u32 = digits[..12]
            .iter()
            .enumerate()
            .map(|(i, d)| if i % 2 == 0 { *d } else { d * 3 })
            .sum();
        (10 - sum % 10) % 10 == digits[12]
    }

    /// Validate an ISSN checksum (weights 8 down to 2, `X` check value).
    ///
    /// # Examples
    ///
    /// ```
    /// use bibo_bridge::IdentifierValidator;
    ///
    /// assert!(IdentifierValidator::is_valid_issn("0378-5955"));
    /// assert!(IdentifierValidator::is_valid_issn("1144-875X"));
    /// ```
    #[must_use]
    pub fn is_valid_issn(issn: &str) -> bool {
        mod11_checksum(&strip_separators(issn), 8)
    }

    /// Validate a DOI's format after stripping `doi:` / resolver prefixes.
    #[must_use]
    pub fn is_valid_doi(doi: &str) -> bool {
        DOI_PATTERN.is_match(&Self::normalize_doi(doi))
    }

    /// Validate a Handle's format after stripping `hdl:` / resolver prefixes.
    #[must_use]
    pub fn is_valid_handle(handle: &str) -> bool {
        HANDLE_PATTERN.is_match(&Self::normalize_handle(handle))
    }

    /// Validate a URL: recognized scheme, non-empty host, no whitespace.
    #[must_use]
    pub fn is_valid_url(value: &str) -> bool {
        let trimmed = value.trim();
        if trimmed.chars().any(char::is_whitespace) {
            return false;
        }
        url::Url::parse(trimmed).is_ok_and(|url| {
            URL_SCHEMES.contains(&url.scheme()) && url.host_str().is_some_and(|h| !h.is_empty())
        })
    }

    /// Validate a generic URI: a scheme before a colon that is not the
    /// first character.
    #[must_use]
    pub fn is_valid_uri(value: &str) -> bool {
        let trimmed = value.trim();
        if trimmed.chars().any(char::is_whitespace) {
            return false;
        }
        match trimmed.find(':') {
            Some(pos) if pos > 0 => URI_SCHEME.is_match(&trimmed[..pos]),
            _ => false,
        }
    }

    /// Strip DOI wrapper prefixes (case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use bibo_bridge::IdentifierValidator;
    ///
    /// assert_eq!(
    ///     IdentifierValidator::normalize_doi("https://doi.org/10.1000/xyz123"),
    ///     "10.1000/xyz123"
    /// );
    /// ```
    #[must_use]
    pub fn normalize_doi(doi: &str) -> String {
        strip_prefix_ignore_case(doi.trim(), DOI_PREFIXES)
            .trim()
            .to_string()
    }

    /// Strip Handle wrapper prefixes (case-insensitive).
    #[must_use]
    pub fn normalize_handle(handle: &str) -> String {
        strip_prefix_ignore_case(handle.trim(), HANDLE_PREFIXES)
            .trim()
            .to_string()
    }

    /// Validate `raw` as an identifier of `kind` read from `field`, returning
    /// its normalized form.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::InvalidIdentifier`] carrying the field name,
    /// the raw value and the expected format.
    pub fn validate(kind: IdentifierType, field: &str, raw: &str) -> Result<String> {
        let normalized = match kind {
            IdentifierType::Isbn10 => {
                Self::is_valid_isbn10(raw).then(|| strip_separators(raw))
            },
            IdentifierType::Isbn13 => {
                Self::is_valid_isbn13(raw).then(|| strip_separators(raw))
            },
            IdentifierType::Issn => Self::is_valid_issn(raw).then(|| {
                let clean = strip_separators(raw);
                format!("{}-{}", &clean[..4], &clean[4..])
            }),
            IdentifierType::Doi => {
                Self::is_valid_doi(raw).then(|| Self::normalize_doi(raw))
            },
            IdentifierType::Handle => {
                Self::is_valid_handle(raw).then(|| Self::normalize_handle(raw))
            },
            IdentifierType::Url => Self::is_valid_url(raw).then(|| raw.trim().to_string()),
            IdentifierType::Uri => Self::is_valid_uri(raw).then(|| raw.trim().to_string()),
            IdentifierType::Other => {
                let trimmed = raw.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            },
        };

        normalized.ok_or_else(|| ConversionError::InvalidIdentifier {
            field: field.to_string(),
            kind: kind.label().to_string(),
            value: raw.to_string(),
            expected_format: kind.expected_format().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_isbn10() {
        assert!(IdentifierValidator::is_valid_isbn10("0-306-40615-2"));
        assert!(IdentifierValidator::is_valid_isbn10("043942089X"));
        assert!(IdentifierValidator::is_valid_isbn10("0 439 42089 x"));
        assert!(!IdentifierValidator::is_valid_isbn10("0-306-40615-3"));
        assert!(!IdentifierValidator::is_valid_isbn10("123"));
        assert!(!IdentifierValidator::is_valid_isbn10("X306406152"));
    }

    #[test]
    fn test_isbn13() {
        assert!(IdentifierValidator::is_valid_isbn13("978-0-306-40615-7"));
        assert!(IdentifierValidator::is_valid_isbn13("9780201379624"));
        assert!(!IdentifierValidator::is_valid_isbn13("978-0-306-40615-8"));
        assert!(!IdentifierValidator::is_valid_isbn13("978030640615X"));
    }

    #[test]
    fn test_issn() {
        assert!(IdentifierValidator::is_valid_issn("0378-5955"));
        assert!(IdentifierValidator::is_valid_issn("1144-875X"));
        assert!(!IdentifierValidator::is_valid_issn("0378-5956"));
        assert!(!IdentifierValidator::is_valid_issn("0378-595"));
    }

    #[test]
    fn test_doi() {
        assert!(IdentifierValidator::is_valid_doi("10.1000/xyz123"));
        assert!(IdentifierValidator::is_valid_doi("doi:10.1038/nphys1170"));
        assert!(IdentifierValidator::is_valid_doi("DOI:10.1038/nphys1170"));
        assert!(IdentifierValidator::is_valid_doi("http://dx.doi.org/10.1000/182"));
        assert!(IdentifierValidator::is_valid_doi("HTTPS://DOI.ORG/10.1000/182"));
        assert!(!IdentifierValidator::is_valid_doi("11.1000/xyz"));
        assert!(!IdentifierValidator::is_valid_doi("10.12/short"));
        assert!(!IdentifierValidator::is_valid_doi("10.1000/has space"));
    }

    #[test]
    fn test_handle() {
        assert!(IdentifierValidator::is_valid_handle("2027.42/46421"));
        assert!(IdentifierValidator::is_valid_handle("hdl:1721.1/12345"));
        assert!(IdentifierValidator::is_valid_handle("https://hdl.handle.net/1721.1/12345"));
        assert!(!IdentifierValidator::is_valid_handle("abc/123"));
    }

    #[test]
    fn test_url_and_uri() {
        assert!(IdentifierValidator::is_valid_url("https://example.org/paper.pdf"));
        assert!(IdentifierValidator::is_valid_url("ftp://ftp.example.org/pub"));
        assert!(!IdentifierValidator::is_valid_url("mailto:someone@example.org"));
        assert!(!IdentifierValidator::is_valid_url("https://exa mple.org"));
        assert!(!IdentifierValidator::is_valid_url("not a url"));

        assert!(IdentifierValidator::is_valid_uri("urn:isbn:0451450523"));
        assert!(IdentifierValidator::is_valid_uri("mailto:someone@example.org"));
        assert!(!IdentifierValidator::is_valid_uri(":nothing"));
        assert!(!IdentifierValidator::is_valid_uri("1abc:def"));
        assert!(!IdentifierValidator::is_valid_uri("no-colon"));
    }

    #[test]
    fn test_parse_normalizes() {
        let id = Identifier::parse(IdentifierType::Issn, "issn", "03785955").unwrap();
        assert_eq!(id.value(), "0378-5955");

        let id = Identifier::parse(IdentifierType::Doi, "doi", "doi:10.1000/xyz").unwrap();
        assert_eq!(id.value(), "10.1000/xyz");

        let id = Identifier::parse_isbn("isbn", "978-0-306-40615-7").unwrap();
        assert_eq!(id.kind(), IdentifierType::Isbn13);
        assert_eq!(id.value(), "9780306406157");

        let id = Identifier::parse_isbn("isbn", "0-306-40615-2").unwrap();
        assert_eq!(id.kind(), IdentifierType::Isbn10);
    }

    #[test]
    fn test_validation_error_diagnostics() {
        let err = Identifier::parse(IdentifierType::Isbn10, "isbn", "0-306-40615-3").unwrap_err();
        match err {
            ConversionError::InvalidIdentifier {
                field,
                kind,
                value,
                expected_format,
            } => {
                assert_eq!(field, "isbn");
                assert_eq!(kind, "ISBN-10");
                assert_eq!(value, "0-306-40615-3");
                assert!(expected_format.contains("check digit"));
            },
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_blank_identifier_rejected() {
        assert!(Identifier::new(IdentifierType::Other, "  ").is_err());
        assert_eq!(
            Identifier::new(IdentifierType::Other, " x ").unwrap().value(),
            "x"
        );
    }
}
