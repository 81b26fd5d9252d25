//! Person name parsing.
//!
//! Turns a raw BibTeX name (`"Vincent van Gogh"`, `"van Braun, Wernher"`,
//! `"Smith, Jr., John"`) into a structured [`PersonName`]. Parsing never
//! fails: anything that cannot be decomposed keeps only its full name.
//!
//! # Recognized shapes
//!
//! - `Given [Middle] [particle...] Family`
//! - `[particle...] Family, Given [Middle]`
//! - `[particle...] Family, Suffix, Given [Middle]`
//! - `Given Family, Suffix` when the trailing segment is a known suffix
//!
//! A particle is any run of all-lowercase tokens; there is no fixed
//! dictionary. Hyphens and apostrophes never split a token.

use std::collections::HashSet;
use std::fmt;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// Suffix tokens recognized after a comma (compared lowercased, dot-stripped).
    static ref SUFFIXES: HashSet<&'static str> = [
        "jr", "sr", "jnr", "snr", "ii", "iii", "iv", "v", "vi", "phd", "md", "esq",
        "dds", "dphil", "mba", "ret",
    ]
    .into_iter()
    .collect();
}

/// A structured personal name.
///
/// `full_name` is always present; every other part is derived and optional.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PersonName {
    full_name: String,
    given_name: Option<String>,
    middle_name: Option<String>,
    name_particle: Option<String>,
    family_name: Option<String>,
    suffix: Option<String>,
}

impl PersonName {
    /// A name with only its literal full form.
    #[must_use]
    pub fn literal(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            ..Self::default()
        }
    }

    /// Parse a raw name string. Shorthand for [`PersonNameParser::parse`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        PersonNameParser::parse(raw)
    }

    /// The literal source string with surrounding braces stripped.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Given (first) name.
    #[must_use]
    pub fn given_name(&self) -> Option<&str> {
        self.given_name.as_deref()
    }

    /// Middle name.
    #[must_use]
    pub fn middle_name(&self) -> Option<&str> {
        self.middle_name.as_deref()
    }

    /// Lowercase particle preceding the family name (`van`, `de la`).
    #[must_use]
    pub fn name_particle(&self) -> Option<&str> {
        self.name_particle.as_deref()
    }

    /// Family (last) name, without particle.
    #[must_use]
    pub fn family_name(&self) -> Option<&str> {
        self.family_name.as_deref()
    }

    /// Suffix (`Jr`, `III`, `Baron de`).
    #[must_use]
    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    /// Replace the given name.
    #[must_use]
    pub fn with_given_name(mut self, given: Option<String>) -> Self {
        self.given_name = non_empty(given);
        self
    }

    /// Replace the family name.
    #[must_use]
    pub fn with_family_name(mut self, family: Option<String>) -> Self {
        self.family_name = non_empty(family);
        self
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parser for BibTeX-style personal names.
#[derive(Debug, Clone, Copy, Default)]
pub struct PersonNameParser;

impl PersonNameParser {
    /// Parse a raw name into its parts.
    ///
    /// # Examples
    ///
    /// ```
    /// use bibo_bridge::PersonNameParser;
    ///
    /// let name = PersonNameParser::parse("Vincent van Gogh");
    /// assert_eq!(name.given_name(), Some("Vincent"));
    /// assert_eq!(name.name_particle(), Some("van"));
    /// assert_eq!(name.family_name(), Some("Gogh"));
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> PersonName {
        let full = strip_outer_braces(raw.trim()).trim().to_string();
        if full.is_empty() {
            return PersonName::literal(full);
        }

        let parts = if full.contains(',') {
            parse_comma_form(&full)
        } else {
            parse_space_form(&full)
        };

        PersonName {
            full_name: full,
            ..parts
        }
    }

    /// Split a BibTeX name list on top-level `and` separators.
    ///
    /// `and` inside braces (`{Barnes and Noble}`) does not split. Repeated
    /// names are kept.
    #[must_use]
    pub fn split_names(field: &str) -> Vec<String> {
        let mut names = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        let mut depth: i32 = 0;

        for word in field.split_whitespace() {
            if depth == 0 && word.eq_ignore_ascii_case("and") {
                if !current.is_empty() {
                    names.push(current.join(" "));
                    current.clear();
                }
                continue;
            }
            for ch in word.chars() {
                match ch {
                    '{' => depth += 1,
                    '}' => depth = (depth - 1).max(0),
                    _ => {},
                }
            }
            current.push(word);
        }
        if !current.is_empty() {
            names.push(current.join(" "));
        }
        names
    }
}

/// Strips one level of braces when the opening brace closes at the very end.
fn strip_outer_braces(s: &str) -> &str {
    if !(s.starts_with('{') && s.ends_with('}')) || s.len() < 2 {
        return s;
    }
    let mut depth = 0;
    for (i, ch) in s.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 && i != s.len() - 1 {
                    return s;
                }
            },
            _ => {},
        }
    }
    &s[1..s.len() - 1]
}

fn is_lowercase_token(token: &str) -> bool {
    let mut letters = token.chars().filter(|c| c.is_alphabetic()).peekable();
    letters.peek().is_some()
        && token.chars().next().is_some_and(char::is_lowercase)
        && letters.all(char::is_lowercase)
}

fn is_suffix(segment: &str) -> bool {
    let normalized = segment.trim().trim_end_matches('.').to_lowercase();
    SUFFIXES.contains(normalized.as_str())
}

fn join(tokens: &[&str]) -> Option<String> {
    if tokens.is_empty() {
        None
    } else {
        Some(tokens.join(" "))
    }
}

/// `Given [Middle...] [particle] Family`
fn parse_space_form(full: &str) -> PersonName {
    let tokens: Vec<&str> = full.split_whitespace().collect();
    let n = tokens.len();
    let mut name = PersonName::default();

    if n == 1 {
        name.family_name = Some(tokens[0].to_string());
        return name;
    }

    let particle_start = (1..n - 1).find(|&i| is_lowercase_token(tokens[i]));
    let leading = match particle_start {
        Some(start) => {
            let mut end = start;
            while end < n - 1 && is_lowercase_token(tokens[end]) {
                end += 1;
            }
            name.name_particle = join(&tokens[start..end]);
            name.family_name = join(&tokens[end..]);
            &tokens[..start]
        },
        None => {
            name.family_name = Some(tokens[n - 1].to_string());
            &tokens[..n - 1]
        },
    };

    assign_given_and_middle(&mut name, leading);
    name
}

/// `[particle] Family, [Suffix,] Given`, or `Given Family, Suffix`.
fn parse_comma_form(full: &str) -> PersonName {
    let mut segments: Vec<&str> = full
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let trailing_suffix = if segments.len() >= 2 && segments.last().is_some_and(|s| is_suffix(s)) {
        segments.pop()
    } else {
        None
    };

    let mut name = match segments.as_slice() {
        [] => PersonName::default(),
        [only] if trailing_suffix.is_some() => parse_space_form(only),
        [family] => family_part(family),
        [family, given] => {
            let mut name = family_part(family);
            let given_tokens: Vec<&str> = given.split_whitespace().collect();
            assign_given_and_middle(&mut name, &given_tokens);
            name
        },
        [family, middle @ .., given] => {
            let mut name = family_part(family);
            name.suffix = Some(middle.join(", "));
            let given_tokens: Vec<&str> = given.split_whitespace().collect();
            assign_given_and_middle(&mut name, &given_tokens);
            name
        },
    };

    if let Some(suffix) = trailing_suffix {
        name.suffix = Some(match name.suffix.take() {
            Some(existing) => format!("{existing}, {suffix}"),
            None => suffix.to_string(),
        });
    }
    name
}

/// Splits the family segment of a comma-form name into particle and family.
fn family_part(segment: &str) -> PersonName {
    let tokens: Vec<&str> = segment.split_whitespace().collect();
    let mut name = PersonName::default();

    let Some(last_cap) = tokens.iter().rposition(|t| !is_lowercase_token(t)) else {
        name.family_name = join(&tokens);
        return name;
    };

    let mut start = last_cap;
    while start > 0 && is_lowercase_token(tokens[start - 1]) {
        start -= 1;
    }

    if start == last_cap {
        name.family_name = join(&tokens);
    } else {
        name.name_particle = join(&tokens[start..last_cap]);
        let family: Vec<&str> = tokens[..start]
            .iter()
            .chain(&tokens[last_cap..])
            .copied()
            .collect();
        name.family_name = join(&family);
    }
    name
}

fn assign_given_and_middle(name: &mut PersonName, tokens: &[&str]) {
    match tokens {
        [] => {},
        [given] => name.given_name = Some((*given).to_string()),
        [given @ .., middle] => {
            name.given_name = join(given);
            name.middle_name = Some((*middle).to_string());
        },
    }
}
