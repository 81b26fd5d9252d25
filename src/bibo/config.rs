//! Configuration options for BIBO conversion.
//!
//! This module provides the [`BiboConfig`] struct which controls how BibTeX
//! records are mapped to documents, how documents become BIBO graphs, and how
//! the resulting RDF is serialized.

use std::fmt;

use crate::citation_key::KeyStrategy;

/// Output format for RDF serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RdfFormat {
    /// RDF/XML format (application/rdf+xml)
    RdfXml,
    /// JSON-LD format (application/ld+json)
    JsonLd,
    /// Turtle format (text/turtle) - Compact, human-friendly
    #[default]
    Turtle,
    /// N-Triples format (application/n-triples) - Simple, line-based
    NTriples,
}

impl fmt::Display for RdfFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RdfXml => write!(f, "RDF/XML"),
            Self::JsonLd => write!(f, "JSON-LD"),
            Self::Turtle => write!(f, "Turtle"),
            Self::NTriples => write!(f, "N-Triples"),
        }
    }
}

impl RdfFormat {
    /// Returns the MIME type for this RDF format.
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::RdfXml => "application/rdf+xml",
            Self::JsonLd => "application/ld+json",
            Self::Turtle => "text/turtle",
            Self::NTriples => "application/n-triples",
        }
    }

    /// Returns the typical file extension for this RDF format.
    #[must_use]
    pub const fn file_extension(&self) -> &'static str {
        match self {
            Self::RdfXml => "rdf",
            Self::JsonLd => "jsonld",
            Self::Turtle => "ttl",
            Self::NTriples => "nt",
        }
    }
}

/// Configuration for BIBO conversion.
///
/// # Examples
///
/// ```
/// use bibo_bridge::bibo::{BiboConfig, RdfFormat};
///
/// let config = BiboConfig::new()
///     .with_base_uri("http://example.org/bib/")
///     .with_output_format(RdfFormat::NTriples)
///     .with_strict_identifiers(false);
///
/// assert_eq!(config.output_format, RdfFormat::NTriples);
/// assert!(!config.strict_identifiers);
/// ```
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct BiboConfig {
    // === URI Generation ===
    /// Base URI for document subjects.
    ///
    /// When `Some` and a document has an identifier, its subject is
    /// `{base}{identifier}`. Otherwise a blank node is used.
    pub base_uri: Option<String>,

    // === Output Control ===
    /// Output format for RDF serialization.
    pub output_format: RdfFormat,

    /// Strategy for citation keys generated on the reverse path.
    pub key_strategy: KeyStrategy,

    // === Validation ===
    /// Accept publication years after the current year.
    ///
    /// When false, any future year is rejected. When true (default), only
    /// years more than five years ahead are logged as suspicious.
    pub allow_future_dates: bool,

    /// Fail on invalid identifiers.
    ///
    /// When true (default), a bad ISBN/ISSN/DOI/Handle fails the conversion.
    /// When false, the offending identifier is dropped and conversion continues.
    pub strict_identifiers: bool,

    /// Translate LaTeX escapes to Unicode on the way in and back on the way out.
    pub decode_latex: bool,
}

impl Default for BiboConfig {
    fn default() -> Self {
        Self {
            base_uri: None,
            output_format: RdfFormat::default(),
            key_strategy: KeyStrategy::default(),
            allow_future_dates: true,
            strict_identifiers: true,
            decode_latex: true,
        }
    }
}

impl BiboConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URI for document subjects.
    #[must_use]
    pub fn with_base_uri(mut self, uri: impl Into<String>) -> Self {
        self.base_uri = Some(uri.into());
        self
    }

    /// Sets the output format.
    #[must_use]
    pub const fn with_output_format(mut self, format: RdfFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Sets the citation key strategy.
    #[must_use]
    pub const fn with_key_strategy(mut self, strategy: KeyStrategy) -> Self {
        self.key_strategy = strategy;
        self
    }

    /// Allows or rejects future publication years.
    #[must_use]
    pub const fn with_future_dates(mut self, allowed: bool) -> Self {
        self.allow_future_dates = allowed;
        self
    }

    /// Enables strict identifier validation.
    #[must_use]
    pub const fn with_strict_identifiers(mut self, enabled: bool) -> Self {
        self.strict_identifiers = enabled;
        self
    }

    /// Enables LaTeX escape translation.
    #[must_use]
    pub const fn with_latex_decoding(mut self, enabled: bool) -> Self {
        self.decode_latex = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BiboConfig::default();
        assert!(config.base_uri.is_none());
        assert_eq!(config.output_format, RdfFormat::Turtle);
        assert_eq!(config.key_strategy, KeyStrategy::AuthorYear);
        assert!(config.allow_future_dates);
        assert!(config.strict_identifiers);
        assert!(config.decode_latex);
    }

    #[test]
    fn test_builder_pattern() {
        let config = BiboConfig::new()
            .with_base_uri("http://example.org/")
            .with_output_format(RdfFormat::JsonLd)
            .with_key_strategy(KeyStrategy::ContentHash)
            .with_future_dates(false)
            .with_latex_decoding(false);

        assert_eq!(config.base_uri, Some("http://example.org/".into()));
        assert_eq!(config.output_format, RdfFormat::JsonLd);
        assert_eq!(config.key_strategy, KeyStrategy::ContentHash);
        assert!(!config.allow_future_dates);
        assert!(!config.decode_latex);
    }

    #[test]
    fn test_rdf_format_display() {
        assert_eq!(format!("{}", RdfFormat::RdfXml), "RDF/XML");
        assert_eq!(format!("{}", RdfFormat::JsonLd), "JSON-LD");
        assert_eq!(format!("{}", RdfFormat::Turtle), "Turtle");
        assert_eq!(format!("{}", RdfFormat::NTriples), "N-Triples");
    }

    #[test]
    fn test_rdf_format_mime_types_and_extensions() {
        assert_eq!(RdfFormat::Turtle.mime_type(), "text/turtle");
        assert_eq!(RdfFormat::NTriples.mime_type(), "application/n-triples");
        assert_eq!(RdfFormat::JsonLd.file_extension(), "jsonld");
        assert_eq!(RdfFormat::RdfXml.file_extension(), "rdf");
    }
}
