//! BIBO to document conversion logic.
//!
//! Finds every document described in a graph and reads it back into a
//! [`BibliographicDocument`]. A subject counts as a document when it is typed
//! `bibo:Document` plus exactly one specific document class. Subjects that
//! fail to decode are skipped with a warning so one bad description does not
//! sink the rest of the graph.

use tracing::warn;

use crate::date::{self, PublicationDate};
use crate::document::{BibliographicDocument, DocumentBuilder, DocumentType};
use crate::identifier::Identifier;

use super::list;
use super::namespaces::{
    self, classes, document_type_for_class, identifier_predicates, properties, BIBO, DCTERMS,
    EXT, FOAF,
};
use super::rdf::{RdfGraph, RdfNode, SubjectIndex};

/// Extracts all documents from `graph`, in the order their subjects first appear.
#[must_use]
pub fn convert_graph_to_documents(graph: &RdfGraph) -> Vec<BibliographicDocument> {
    BiboToDocumentConverter::new(graph).convert()
}

/// Internal converter state.
struct BiboToDocumentConverter<'a> {
    index: SubjectIndex<'a>,
}

impl<'a> BiboToDocumentConverter<'a> {
    fn new(graph: &'a RdfGraph) -> Self {
        Self {
            index: SubjectIndex::new(graph),
        }
    }

    fn convert(&self) -> Vec<BibliographicDocument> {
        self.find_documents()
            .into_iter()
            .filter_map(|(subject, document_type)| self.read_document(subject, document_type))
            .collect()
    }

    /// Subjects typed `bibo:Document` with exactly one specific class.
    fn find_documents(&self) -> Vec<(&'a RdfNode, DocumentType)> {
        let document_class = namespaces::iri(BIBO, classes::DOCUMENT);
        let mut found = Vec::new();

        for subject in self.index.subjects() {
            let types = self.index.types(subject);
            if !types.contains(&document_class.as_str()) {
                continue;
            }

            let mut specific: Vec<DocumentType> = types
                .iter()
                .filter_map(|t| document_type_for_class(t))
                .collect();
            specific.sort();
            specific.dedup();

            match specific.as_slice() {
                [document_type] => found.push((subject, *document_type)),
                [] => warn!(subject = ?subject, "document without a specific class; skipping"),
                _ => warn!(
                    subject = ?subject,
                    classes = ?specific,
                    "document with several specific classes; skipping"
                ),
            }
        }

        found
    }

    fn literal(&self, subject: &RdfNode, namespace: &str, local: &str) -> Option<&'a str> {
        self.index.literal(subject, &namespaces::iri(namespace, local))
    }

    fn read_document(
        &self,
        subject: &'a RdfNode,
        document_type: DocumentType,
    ) -> Option<BibliographicDocument> {
        use properties::{bibo, dcterms, ext};

        let Some(title) = self.literal(subject, DCTERMS, dcterms::TITLE) else {
            warn!(subject = ?subject, "document without dcterms:title; skipping");
            return None;
        };
        let text = |namespace: &str, local: &str| self.literal(subject, namespace, local);

        let mut builder = BibliographicDocument::builder(document_type, title)
            .apply_some(text(DCTERMS, dcterms::IDENTIFIER), DocumentBuilder::identifier)
            .apply_some(text(EXT, ext::SUBTITLE), DocumentBuilder::subtitle)
            .apply_some(text(DCTERMS, dcterms::PUBLISHER), DocumentBuilder::publisher)
            .apply_some(
                text(EXT, ext::PLACE_OF_PUBLICATION),
                DocumentBuilder::place_of_publication,
            )
            .apply_some(
                text(EXT, ext::CONFERENCE_LOCATION),
                DocumentBuilder::conference_location,
            )
            .apply_some(
                text(EXT, ext::CONFERENCE_ORGANIZER),
                DocumentBuilder::conference_organizer,
            )
            .apply_some(text(BIBO, bibo::VOLUME), DocumentBuilder::volume)
            .apply_some(text(BIBO, bibo::ISSUE), DocumentBuilder::issue)
            .apply_some(text(BIBO, bibo::PAGES), DocumentBuilder::pages)
            .apply_some(self.url(subject), DocumentBuilder::url)
            .apply_some(text(DCTERMS, dcterms::LANGUAGE), DocumentBuilder::language)
            .apply_some(text(DCTERMS, dcterms::ABSTRACT), DocumentBuilder::abstract_text)
            .apply_some(text(EXT, ext::NOTE), DocumentBuilder::notes)
            .apply_some(text(EXT, ext::SERIES), DocumentBuilder::series)
            .apply_some(text(BIBO, bibo::EDITION), DocumentBuilder::edition)
            .apply_some(text(EXT, ext::ORGANIZATION), DocumentBuilder::organization)
            .apply_some(text(EXT, ext::HOW_PUBLISHED), DocumentBuilder::how_published)
            .apply_some(text(EXT, ext::DEGREE_TYPE), DocumentBuilder::degree_type)
            .apply_some(self.container_title(subject), DocumentBuilder::container_title)
            .apply_some(self.date(subject), DocumentBuilder::date)
            .keywords(
                self.index
                    .literals(subject, &namespaces::iri(DCTERMS, dcterms::SUBJECT)),
            )
            .contributors(list::decode_contributors(&self.index, subject));

        for identifier in self.identifiers(subject) {
            builder = builder.add_identifier(identifier);
        }

        match builder.build() {
            Ok(doc) => Some(doc),
            Err(err) => {
                warn!(subject = ?subject, %err, "undecodable document; skipping");
                None
            },
        }
    }

    /// `foaf:page` as a literal or an IRI.
    fn url(&self, subject: &RdfNode) -> Option<&'a str> {
        let node = self
            .index
            .object(subject, &namespaces::iri(FOAF, properties::foaf::PAGE))?;
        node.literal_value().or_else(|| node.as_uri())
    }

    fn date(&self, subject: &RdfNode) -> Option<PublicationDate> {
        let text = self.literal(subject, DCTERMS, properties::dcterms::ISSUED)?;
        match PublicationDate::from_lexical(text).or_else(|_| date::parse_date(text)) {
            Ok(date) => Some(date),
            Err(err) => {
                warn!(subject = ?subject, value = text, %err, "ignoring unreadable dcterms:issued");
                None
            },
        }
    }

    /// Title of the resource linked with `dcterms:isPartOf`, blank or named.
    fn container_title(&self, subject: &RdfNode) -> Option<&'a str> {
        let part_of = namespaces::iri(DCTERMS, properties::dcterms::IS_PART_OF);
        let title = namespaces::iri(DCTERMS, properties::dcterms::TITLE);
        let found = self
            .index
            .objects(subject, &part_of)
            .find_map(|container| self.index.literal(container, &title));
        found
    }

    /// Typed identifiers in graph order.
    fn identifiers(&self, subject: &RdfNode) -> Vec<Identifier> {
        let predicates = identifier_predicates();
        let mut identifiers = Vec::new();

        for (predicate, object) in self.index.properties(subject) {
            let Some((kind, _)) = predicates.iter().find(|(_, p)| p == predicate) else {
                continue;
            };
            let Some(value) = object.literal_value() else {
                continue;
            };
            match Identifier::new(*kind, value) {
                Ok(id) => identifiers.push(id),
                Err(err) => warn!(subject = ?subject, %err, "ignoring blank identifier"),
            }
        }
        identifiers
    }
}
