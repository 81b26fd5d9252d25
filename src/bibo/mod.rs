//! BIBO conversion for BibTeX records.
//!
//! This module provides bidirectional conversion between BibTeX records and
//! BIBO, the Bibliographic Ontology, expressed as an RDF graph.
//!
//! # What ends up in the graph?
//!
//! One record becomes one document subject plus a few helper resources:
//!
//! - **Document**: typed `bibo:Document` and one specific class
//!   (`bibo:Article`, `bibo:Book`, ...), carrying the literal properties
//! - **Container**: the journal, book or proceedings the document is part of
//! - **Persons**: one `foaf:Person` per contributor, reached through ordered
//!   `rdf:first`/`rdf:rest` lists
//!
//! # Quick Start
//!
//! ## BibTeX to BIBO
//!
//! ```
//! use bibo_bridge::BibtexRecord;
//! use bibo_bridge::bibo::{convert_to_bibo, BiboConfig, RdfFormat};
//!
//! let record = BibtexRecord::builder("article")
//!     .key("lee2019")
//!     .field("title", "Lists in Graphs")
//!     .field("author", "Lee, Ann and Kim, Bo")
//!     .build();
//!
//! let graph = convert_to_bibo(&record, &BiboConfig::default()).unwrap();
//! let turtle = graph.serialize(RdfFormat::Turtle).unwrap();
//! assert!(turtle.contains("Lists in Graphs"));
//! ```
//!
//! ## BIBO to BibTeX
//!
//! ```
//! use bibo_bridge::bibo::{convert_all_from_graph, BiboConfig, RdfFormat, RdfGraph};
//!
//! let nt = r#"
//! <http://example.org/b1> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://purl.org/ontology/bibo/Document> .
//! <http://example.org/b1> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://purl.org/ontology/bibo/Book> .
//! <http://example.org/b1> <http://purl.org/dc/terms/title> "A Book" .
//! "#;
//! let graph = RdfGraph::parse(nt, RdfFormat::NTriples).unwrap();
//! let records = convert_all_from_graph(&graph, &BiboConfig::default()).unwrap();
//! assert_eq!(records[0].entry_type, "book");
//! assert_eq!(records[0].key(), Some("book"));
//! ```
//!
//! # Modules
//!
//! - `config`: Configuration options for BIBO conversion
//! - `namespaces`: vocabulary IRIs
//! - `rdf`: RDF graph representation and serialization
//! - `list`: ordered contributor lists

mod config;
mod converter;
mod list;
pub mod namespaces;
mod rdf;
mod reverse_converter;

pub use config::{BiboConfig, RdfFormat};
pub use list::{decode_list, encode_list};
pub use namespaces::{BIBO, DCTERMS, EXT, FOAF, RDF, RELATORS, SCHEMA, XSD};
pub use rdf::{RdfGraph, RdfNode, RdfTriple, SubjectIndex};

use tracing::debug;

use crate::citation_key::CitationKeyGenerator;
use crate::document::BibliographicDocument;
use crate::error::Result;
use crate::mapper::TypeAndFieldMapper;
use crate::record::BibtexRecord;

/// Converts a BibTeX record to a BIBO RDF graph.
///
/// # Errors
///
/// Returns any error from [`TypeAndFieldMapper::to_document`].
pub fn convert_to_bibo(record: &BibtexRecord, config: &BiboConfig) -> Result<RdfGraph> {
    let doc = TypeAndFieldMapper::new(config.clone()).to_document(record)?;
    let graph = document_to_graph(&doc, config);
    debug!(key = ?record.key(), triples = graph.len(), "converted record to BIBO");
    Ok(graph)
}

/// Converts a BibTeX record and serializes it in the configured output format.
///
/// # Errors
///
/// Returns mapping errors and serialization errors.
pub fn convert_to_bibo_string(record: &BibtexRecord, config: &BiboConfig) -> Result<String> {
    convert_to_bibo(record, config)?.serialize(config.output_format)
}

/// Converts several BibTeX records into one BIBO graph.
///
/// Documents are added in order. Under a base URI, a record whose key is
/// already taken by an earlier one gets a `_2`, `_3`, ... suffixed subject,
/// so every record stays a separate resource.
///
/// # Errors
///
/// Returns the first error from [`TypeAndFieldMapper::to_document`].
pub fn convert_all_to_bibo<'r>(
    records: impl IntoIterator<Item = &'r BibtexRecord>,
    config: &BiboConfig,
) -> Result<RdfGraph> {
    let mapper = TypeAndFieldMapper::new(config.clone());
    let mut graph = RdfGraph::new();
    let mut documents = 0_usize;
    for record in records {
        let doc = mapper.to_document(record)?;
        add_document(&mut graph, &doc, config);
        documents += 1;
    }
    debug!(documents, triples = graph.len(), "converted records to BIBO");
    Ok(graph)
}

/// Builds a fresh graph describing one document.
#[must_use]
pub fn document_to_graph(doc: &BibliographicDocument, config: &BiboConfig) -> RdfGraph {
    let mut graph = RdfGraph::new();
    add_document(&mut graph, doc, config);
    graph
}

/// Adds the statements describing `doc` to an existing graph and returns the
/// document's subject node.
///
/// Several documents can share one graph; their list and person nodes are
/// always fresh and never shared. Under a base URI, a subject IRI already
/// present in `graph` is not reused: the document gets `{base}{id}_2`, `_3`, ...
/// Graphs converted separately and then merged with [`RdfGraph::extend`] do
/// not get this check, so same-IRI subjects from them describe one resource.
pub fn add_document(graph: &mut RdfGraph, doc: &BibliographicDocument, config: &BiboConfig) -> RdfNode {
    converter::add_document(graph, doc, config)
}

/// Converts a document back to a BibTeX record.
///
/// # Errors
///
/// Returns any error from [`TypeAndFieldMapper::from_document`].
pub fn convert_from_bibo(doc: &BibliographicDocument, config: &BiboConfig) -> Result<BibtexRecord> {
    TypeAndFieldMapper::new(config.clone()).from_document(doc)
}

/// Extracts every document described in a graph.
///
/// Subjects without a title or without exactly one specific document class
/// are skipped with a warning.
#[must_use]
pub fn documents_from_graph(graph: &RdfGraph) -> Vec<BibliographicDocument> {
    reverse_converter::convert_graph_to_documents(graph)
}

/// Converts every document in a graph to a BibTeX record.
///
/// Citation keys are unique across the returned records: explicit
/// identifiers are kept when valid, missing ones are generated with the
/// configured strategy, and collisions get `_2`, `_3`, ... suffixes.
///
/// # Errors
///
/// Returns the first error from [`TypeAndFieldMapper::from_document_with_key`].
pub fn convert_all_from_graph(graph: &RdfGraph, config: &BiboConfig) -> Result<Vec<BibtexRecord>> {
    let mapper = TypeAndFieldMapper::new(config.clone());
    let mut keys = CitationKeyGenerator::new(config.key_strategy);

    let records = documents_from_graph(graph)
        .iter()
        .map(|doc| {
            let key = keys.assign(doc.identifier(), doc);
            mapper.from_document_with_key(doc, key)
        })
        .collect::<Result<Vec<_>>>()?;
    debug!(triples = graph.len(), records = records.len(), "converted BIBO graph to records");
    Ok(records)
}
