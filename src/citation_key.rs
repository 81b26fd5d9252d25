//! Citation key derivation and deduplication.
//!
//! Keys are derived deterministically from a document's first author, year
//! and title. [`CitationKeyGenerator::assign`] additionally tracks every key
//! handed out so far and appends `_2`, `_3`, ... on collision.

use std::collections::HashSet;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::warn;
use unicode_normalization::UnicodeNormalization;

use crate::document::{BibliographicDocument, Contributor, Role};

/// Maximum length of a generated or assigned key.
pub const MAX_KEY_LENGTH: usize = 64;

/// Key used when nothing usable can be derived.
const FALLBACK_KEY: &str = "entry";

lazy_static! {
    static ref STOPWORDS: HashSet<&'static str> = [
        "a", "an", "the", "of", "on", "in", "for", "and", "to", "with", "at", "by", "from",
        "la", "le", "les", "el", "der", "die", "das", "un", "une",
    ]
    .into_iter()
    .collect();
}

/// How citation keys are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum KeyStrategy {
    /// `family_year`, e.g. `knuth_1984`
    #[default]
    AuthorYear,
    /// `family_titleword`, e.g. `knuth_literate`
    AuthorTitle,
    /// Eight hex digits of a hash over title, year and authors
    ContentHash,
}

/// Derives citation keys and keeps them unique across one batch.
///
/// # Examples
///
/// ```
/// use bibo_bridge::{BibliographicDocument, CitationKeyGenerator, Contributor, DocumentType, Role};
/// use bibo_bridge::date::PublicationDate;
///
/// let doc = BibliographicDocument::builder(DocumentType::Book, "Literate Programming")
///     .contributor(Contributor::parse("Donald E. Knuth", Role::Author))
///     .date(PublicationDate::from_year(1984).unwrap())
///     .build()
///     .unwrap();
///
/// let mut keys = CitationKeyGenerator::default();
/// assert_eq!(keys.assign(None, &doc), "knuth_1984");
/// assert_eq!(keys.assign(None, &doc), "knuth_1984_2");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CitationKeyGenerator {
    strategy: KeyStrategy,
    used: HashSet<String>,
}

impl CitationKeyGenerator {
    /// Create a generator with an empty registry.
    #[must_use]
    pub fn new(strategy: KeyStrategy) -> Self {
        Self {
            strategy,
            used: HashSet::new(),
        }
    }

    /// The strategy in use.
    #[must_use]
    pub const fn strategy(&self) -> KeyStrategy {
        self.strategy
    }

    /// Derive a key for `doc` without consulting the registry.
    #[must_use]
    pub fn generate(&self, doc: &BibliographicDocument) -> String {
        let year = doc.date().map(|d| d.year().to_string());
        let key = match self.strategy {
            KeyStrategy::AuthorYear => {
                let stem = primary_name(doc).unwrap_or_else(|| title_token(doc.title()));
                join_parts(&stem, year.as_deref())
            },
            KeyStrategy::AuthorTitle => {
                let word = title_token(doc.title());
                match primary_name(doc) {
                    Some(family) => join_parts(&family, Some(&word)),
                    None => word,
                }
            },
            KeyStrategy::ContentHash => content_hash(doc, year.as_deref()),
        };
        clamp(&key, MAX_KEY_LENGTH)
    }

    /// Pick the key for `doc` and record it as used.
    ///
    /// A valid `explicit` key is kept; an invalid one is discarded in favour
    /// of a generated key. Either way, a key already handed out gets the
    /// first free `_N` suffix.
    pub fn assign(&mut self, explicit: Option<&str>, doc: &BibliographicDocument) -> String {
        let base = match explicit.map(str::trim).filter(|k| !k.is_empty()) {
            Some(key) if Self::is_valid_key(key) => clamp(key, MAX_KEY_LENGTH),
            Some(key) => {
                warn!(key, "discarding citation key with disallowed characters");
                self.generate(doc)
            },
            None => self.generate(doc),
        };

        let key = self.make_unique(base);
        self.used.insert(key.clone());
        key
    }

    /// Whether `key` is non-empty and uses only alphanumerics and `_-/:+.`.
    #[must_use]
    pub fn is_valid_key(key: &str) -> bool {
        !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '/' | ':' | '+' | '.'))
    }

    /// Number of keys handed out so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.used.len()
    }

    /// Whether no key has been handed out yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }

    fn make_unique(&self, base: String) -> String {
        if !self.used.contains(&base) {
            return base;
        }
        (2_usize..)
            .map(|n| {
                let suffix = format!("_{n}");
                let stem = clamp(&base, MAX_KEY_LENGTH.saturating_sub(suffix.len()));
                format!("{stem}{suffix}")
            })
            .find(|candidate| !self.used.contains(candidate))
            .unwrap_or(base)
    }
}

/// Sanitized family name of the first author, else of the first contributor.
fn primary_name(doc: &BibliographicDocument) -> Option<String> {
    let contributor: &Contributor = doc
        .contributors_with_role(Role::Author)
        .next()
        .or_else(|| doc.contributors().first())?;
    let name = contributor.name();
    let raw = name.family_name().unwrap_or_else(|| name.full_name());
    Some(sanitize(raw))
}

/// First title word that is not a stopword, sanitized.
fn title_token(title: &str) -> String {
    let words: Vec<String> = title
        .split_whitespace()
        .filter(|w| ascii_fold(w).chars().any(|c| c.is_ascii_alphanumeric()))
        .map(sanitize)
        .collect();
    words
        .iter()
        .find(|w| !STOPWORDS.contains(w.as_str()))
        .or_else(|| words.first())
        .cloned()
        .unwrap_or_else(|| FALLBACK_KEY.to_string())
}

fn join_parts(stem: &str, tail: Option<&str>) -> String {
    match tail {
        Some(tail) if !tail.is_empty() => format!("{stem}_{tail}"),
        _ => stem.to_string(),
    }
}

fn content_hash(doc: &BibliographicDocument, year: Option<&str>) -> String {
    let authors: Vec<&str> = doc
        .contributors_with_role(Role::Author)
        .map(|c| c.name().full_name())
        .collect();
    let material = format!("{}|{}|{}", doc.title(), year.unwrap_or(""), authors.join(";"));
    let digest = Sha256::digest(material.as_bytes());
    digest.iter().take(4).map(|b| format!("{b:02x}")).collect()
}

/// ASCII-fold, lowercase, collapse non-alphanumeric runs to `_`, trim `_`.
/// Falls back to `entry` when nothing is left.
pub(crate) fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_separator = false;

    for c in ascii_fold(text).chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push('_');
            }
            pending_separator = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    if out.is_empty() {
        FALLBACK_KEY.to_string()
    } else {
        out
    }
}

fn ascii_fold(text: &str) -> String {
    let mut folded = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            'ß' => folded.push_str("ss"),
            'æ' => folded.push_str("ae"),
            'Æ' => folded.push_str("AE"),
            'œ' => folded.push_str("oe"),
            'Œ' => folded.push_str("OE"),
            'ø' => folded.push('o'),
            'Ø' => folded.push('O'),
            'ł' => folded.push('l'),
            'Ł' => folded.push('L'),
            'đ' => folded.push('d'),
            'Đ' => folded.push('D'),
            'ı' => folded.push('i'),
            _ => folded.extend(c.to_string().nfkd().filter(char::is_ascii)),
        }
    }
    folded
}

fn clamp(key: &str, max: usize) -> String {
    if key.len() <= max {
        return key.to_string();
    }
    let mut end = max;
    while !key.is_char_boundary(end) {
        end -= 1;
    }
    key[..end].trim_end_matches('_').to_string()
}
