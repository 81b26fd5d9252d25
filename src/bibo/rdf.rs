//! RDF serialization layer for BIBO.
//!
//! This module provides RDF parsing and serialization using the oxrdfio library.
//! It wraps the library's functionality in a higher-level API tailored for
//! BIBO conversion.

use std::io::{Read, Write};

use indexmap::IndexMap;
use oxrdf::{BlankNode, Literal, NamedNode, NamedOrBlankNode, Quad, Term, Triple};
use oxrdfio::{JsonLdProfileSet, RdfFormat as OxRdfFormat, RdfParser, RdfSerializer};

use crate::error::{ConversionError, Result};

use super::config::RdfFormat;
use super::namespaces::{self, properties, RDF, XSD};

/// A single RDF triple (subject, predicate, object).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RdfTriple {
    /// The subject of the triple.
    pub subject: RdfNode,
    /// The predicate (property) of the triple.
    pub predicate: String,
    /// The object of the triple.
    pub object: RdfNode,
}

impl RdfTriple {
    /// Creates a new RDF triple.
    #[must_use]
    pub fn new(subject: RdfNode, predicate: impl Into<String>, object: RdfNode) -> Self {
        Self {
            subject,
            predicate: predicate.into(),
            object,
        }
    }
}

/// An RDF node (subject or object in a triple).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RdfNode {
    /// A named node (IRI/URI).
    Uri(String),
    /// A blank node with a local identifier.
    BlankNode(String),
    /// A literal value with optional language tag or datatype.
    Literal {
        /// The literal value.
        value: String,
        /// Optional language tag (e.g., "en", "ja").
        language: Option<String>,
        /// Optional datatype URI.
        datatype: Option<String>,
    },
}

impl RdfNode {
    /// Creates a new URI node.
    #[must_use]
    pub fn uri(uri: impl Into<String>) -> Self {
        Self::Uri(uri.into())
    }

    /// Creates a URI node from a namespace and a local name.
    #[must_use]
    pub fn term(namespace: &str, local: &str) -> Self {
        Self::Uri(namespaces::iri(namespace, local))
    }

    /// Creates a new blank node.
    #[must_use]
    pub fn blank(id: impl Into<String>) -> Self {
        Self::BlankNode(id.into())
    }

    /// Creates a blank node with a fresh random identifier.
    ///
    /// Identifiers are unique across calls, so graphs built separately can
    /// be merged without their blank nodes colliding.
    #[must_use]
    pub fn fresh_blank() -> Self {
        Self::BlankNode(BlankNode::default().as_str().to_string())
    }

    /// Creates a new plain literal.
    #[must_use]
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal {
            value: value.into(),
            language: None,
            datatype: None,
        }
    }

    /// Creates a new typed literal.
    #[must_use]
    pub fn typed_literal(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self::Literal {
            value: value.into(),
            language: None,
            datatype: Some(datatype.into()),
        }
    }

    /// The `rdf:nil` empty-list marker.
    #[must_use]
    pub fn nil() -> Self {
        Self::term(RDF, properties::rdf::NIL)
    }

    /// Returns true if this is a URI node.
    #[must_use]
    pub const fn is_uri(&self) -> bool {
        matches!(self, Self::Uri(_))
    }

    /// Returns true if this is a blank node.
    #[must_use]
    pub const fn is_blank(&self) -> bool {
        matches!(self, Self::BlankNode(_))
    }

    /// Returns true if this is a literal.
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Literal { .. })
    }

    /// The lexical value if this is a literal.
    #[must_use]
    pub fn literal_value(&self) -> Option<&str> {
        match self {
            Self::Literal { value, .. } => Some(value),
            _ => None,
        }
    }

    /// The IRI if this is a URI node.
    #[must_use]
    pub fn as_uri(&self) -> Option<&str> {
        match self {
            Self::Uri(uri) => Some(uri),
            _ => None,
        }
    }
}

/// An RDF graph containing triples.
#[derive(Debug, Clone, Default)]
pub struct RdfGraph {
    /// The triples in this graph.
    triples: Vec<RdfTriple>,
}

impl RdfGraph {
    /// Creates a new empty RDF graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a triple to the graph.
    pub fn add_triple(&mut self, triple: RdfTriple) {
        self.triples.push(triple);
    }

    /// Adds a triple from components.
    pub fn add(&mut self, subject: RdfNode, predicate: impl Into<String>, object: RdfNode) {
        self.add_triple(RdfTriple::new(subject, predicate, object));
    }

    /// Generates a new unique blank node.
    #[allow(clippy::unused_self)]
    pub fn new_blank_node(&mut self) -> RdfNode {
        RdfNode::fresh_blank()
    }

    /// Whether any triple has `subject` as its subject.
    #[must_use]
    pub fn has_subject(&self, subject: &RdfNode) -> bool {
        self.triples.iter().any(|t| &t.subject == subject)
    }

    /// Moves all triples of `other` into this graph.
    pub fn extend(&mut self, other: Self) {
        self.triples.extend(other.triples);
    }

    /// Returns the number of triples in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Returns true if the graph is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Returns an iterator over the triples.
    pub fn triples(&self) -> impl Iterator<Item = &RdfTriple> {
        self.triples.iter()
    }

    /// Objects of all triples with the given subject and predicate.
    pub fn objects<'a>(
        &'a self,
        subject: &'a RdfNode,
        predicate: &'a str,
    ) -> impl Iterator<Item = &'a RdfNode> + 'a {
        self.triples
            .iter()
            .filter(move |t| &t.subject == subject && t.predicate == predicate)
            .map(|t| &t.object)
    }

    /// Whether `subject` is asserted to be of class `class_iri`.
    #[must_use]
    pub fn has_type(&self, subject: &RdfNode, class_iri: &str) -> bool {
        let rdf_type = namespaces::iri(RDF, properties::rdf::TYPE);
        let found = self
            .objects(subject, &rdf_type)
            .any(|o| o.as_uri() == Some(class_iri));
        found
    }

    /// Serializes the graph to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn serialize(&self, format: RdfFormat) -> Result<String> {
        let mut output = Vec::new();
        self.serialize_to_writer(&mut output, format)?;
        String::from_utf8(output).map_err(|e| ConversionError::Rdf(e.to_string()))
    }

    /// Serializes the graph to a writer in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if a node cannot be expressed in RDF or writing fails.
    pub fn serialize_to_writer<W: Write>(&self, writer: W, format: RdfFormat) -> Result<()> {
        let ox_format = to_oxrdf_format(format);
        let mut serializer = RdfSerializer::from_format(ox_format).for_writer(writer);

        for triple in &self.triples {
            let ox_triple = to_oxrdf_triple(triple)?;
            serializer
                .serialize_triple(&ox_triple)
                .map_err(|e| ConversionError::Rdf(e.to_string()))?;
        }

        serializer
            .finish()
            .map_err(|e| ConversionError::Rdf(e.to_string()))?;
        Ok(())
    }

    /// Parses an RDF graph from a reader in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails.
    pub fn parse_from_reader<R: Read>(reader: R, format: RdfFormat) -> Result<Self> {
        let ox_format = to_oxrdf_format(format);
        let parser = RdfParser::from_format(ox_format).for_reader(reader);

        let mut graph = Self::new();

        for result in parser {
            let quad = result.map_err(|e| ConversionError::Rdf(e.to_string()))?;
            let triple = from_oxrdf_quad(&quad)?;
            graph.add_triple(triple);
        }

        Ok(graph)
    }

    /// Parses an RDF graph from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails.
    pub fn parse(input: &str, format: RdfFormat) -> Result<Self> {
        Self::parse_from_reader(input.as_bytes(), format)
    }
}

/// Triples grouped by subject, in first-seen subject order.
///
/// Built once per decode call; lookups borrow from the indexed graph.
#[derive(Debug)]
pub struct SubjectIndex<'a> {
    by_subject: IndexMap<&'a RdfNode, Vec<(&'a str, &'a RdfNode)>>,
}

impl<'a> SubjectIndex<'a> {
    /// Index all triples of `graph`.
    #[must_use]
    pub fn new(graph: &'a RdfGraph) -> Self {
        let mut by_subject: IndexMap<&RdfNode, Vec<(&str, &RdfNode)>> = IndexMap::new();
        for triple in graph.triples() {
            by_subject
                .entry(&triple.subject)
                .or_default()
                .push((triple.predicate.as_str(), &triple.object));
        }
        Self { by_subject }
    }

    /// Subjects in the order they first appear in the graph.
    pub fn subjects(&self) -> impl Iterator<Item = &'a RdfNode> + '_ {
        self.by_subject.keys().copied()
    }

    /// All (predicate, object) pairs of `subject`, in graph order.
    pub fn properties(&self, subject: &RdfNode) -> impl Iterator<Item = (&'a str, &'a RdfNode)> + '_ {
        self.by_subject.get(subject).into_iter().flatten().copied()
    }

    /// Objects of `subject` under `predicate`, in graph order.
    pub fn objects<'s>(
        &'s self,
        subject: &RdfNode,
        predicate: &'s str,
    ) -> impl Iterator<Item = &'a RdfNode> + 's {
        self.by_subject
            .get(subject)
            .into_iter()
            .flatten()
            .filter(move |(p, _)| *p == predicate)
            .map(|(_, o)| *o)
    }

    /// First object of `subject` under `predicate`.
    #[must_use]
    pub fn object(&self, subject: &RdfNode, predicate: &str) -> Option<&'a RdfNode> {
        self.objects(subject, predicate).next()
    }

    /// First literal value of `subject` under `predicate`.
    #[must_use]
    pub fn literal(&self, subject: &RdfNode, predicate: &str) -> Option<&'a str> {
        self.objects(subject, predicate)
            .find_map(RdfNode::literal_value)
    }

    /// All literal values of `subject` under `predicate`.
    #[must_use]
    pub fn literals(&self, subject: &RdfNode, predicate: &str) -> Vec<&'a str> {
        self.objects(subject, predicate)
            .filter_map(RdfNode::literal_value)
            .collect()
    }

    /// Class IRIs asserted for `subject`.
    #[must_use]
    pub fn types(&self, subject: &RdfNode) -> Vec<&'a str> {
        let rdf_type = namespaces::iri(RDF, properties::rdf::TYPE);
        self.objects(subject, &rdf_type)
            .filter_map(RdfNode::as_uri)
            .collect()
    }
}

/// Converts our [`RdfFormat`] to oxrdfio's format.
fn to_oxrdf_format(format: RdfFormat) -> OxRdfFormat {
    match format {
        RdfFormat::RdfXml => OxRdfFormat::RdfXml,
        RdfFormat::JsonLd => OxRdfFormat::JsonLd {
            profile: JsonLdProfileSet::default(),
        },
        RdfFormat::Turtle => OxRdfFormat::Turtle,
        RdfFormat::NTriples => OxRdfFormat::NTriples,
    }
}

fn named_node(iri: &str) -> Result<NamedNode> {
    NamedNode::new(iri).map_err(|e| ConversionError::Rdf(format!("Invalid URI <{iri}>: {e}")))
}

fn blank_node(id: &str) -> Result<BlankNode> {
    BlankNode::new(id).map_err(|e| ConversionError::Rdf(format!("Invalid blank node ID: {e}")))
}

/// Converts an [`RdfTriple`] to an oxrdf Triple.
fn to_oxrdf_triple(triple: &RdfTriple) -> Result<Triple> {
    let subject = match &triple.subject {
        RdfNode::Uri(uri) => NamedOrBlankNode::NamedNode(named_node(uri)?),
        RdfNode::BlankNode(id) => NamedOrBlankNode::BlankNode(blank_node(id)?),
        RdfNode::Literal { .. } => {
            return Err(ConversionError::Rdf(
                "Literals cannot be triple subjects".into(),
            ));
        },
    };

    let predicate = named_node(&triple.predicate)?;

    let object = match &triple.object {
        RdfNode::Uri(uri) => Term::NamedNode(named_node(uri)?),
        RdfNode::BlankNode(id) => Term::BlankNode(blank_node(id)?),
        RdfNode::Literal {
            value,
            language,
            datatype,
        } => {
            let lit = if let Some(lang) = language {
                Literal::new_language_tagged_literal(value, lang)
                    .map_err(|e| ConversionError::Rdf(format!("Invalid language tag: {e}")))?
            } else if let Some(dt) = datatype {
                Literal::new_typed_literal(value, named_node(dt)?)
            } else {
                Literal::new_simple_literal(value)
            };
            Term::Literal(lit)
        },
    };

    Ok(Triple::new(subject, predicate, object))
}

/// Converts an oxrdf Quad back to our [`RdfTriple`].
fn from_oxrdf_quad(quad: &Quad) -> Result<RdfTriple> {
    let subject = match &quad.subject {
        NamedOrBlankNode::NamedNode(n) => RdfNode::Uri(n.as_str().to_string()),
        NamedOrBlankNode::BlankNode(b) => RdfNode::BlankNode(b.as_str().to_string()),
        #[allow(unreachable_patterns)]
        _ => {
            return Err(ConversionError::Rdf("Unsupported subject type".into()));
        },
    };

    let predicate = quad.predicate.as_str().to_string();
    let xsd_string = namespaces::iri(XSD, "string");

    let object = match &quad.object {
        Term::NamedNode(n) => RdfNode::Uri(n.as_str().to_string()),
        Term::BlankNode(b) => RdfNode::BlankNode(b.as_str().to_string()),
        Term::Literal(lit) => {
            let value = lit.value().to_string();
            let language = lit.language().map(String::from);
            let datatype = if language.is_none() && lit.datatype().as_str() != xsd_string {
                Some(lit.datatype().as_str().to_string())
            } else {
                None
            };
            RdfNode::Literal {
                value,
                language,
                datatype,
            }
        },
        #[allow(unreachable_patterns)]
        _ => {
            return Err(ConversionError::Rdf("Unsupported object type".into()));
        },
    };

    Ok(RdfTriple::new(subject, predicate, object))
}
