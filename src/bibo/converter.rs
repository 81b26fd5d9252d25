//! Document to BIBO conversion logic.
//!
//! Emits the statements describing one [`BibliographicDocument`]: its
//! classes, literal properties, typed identifiers, container and ordered
//! contributor lists.

use tracing::warn;

use crate::document::BibliographicDocument;

use super::config::BiboConfig;
use super::list;
use super::namespaces::{
    self, classes, container_class, document_class, identifier_predicate, properties, BIBO,
    DCTERMS, EXT, FOAF, RDF, XSD,
};
use super::rdf::{RdfGraph, RdfNode};

/// Adds the statements for `doc` to `graph` and returns the document's subject.
pub fn add_document(graph: &mut RdfGraph, doc: &BibliographicDocument, config: &BiboConfig) -> RdfNode {
    let mut converter = DocumentToBiboConverter::new(graph, doc, config);
    converter.convert();
    converter.subject
}

/// `{base}{id}`, or `{base}{id}_N` with the first free `N` when another
/// document in `graph` already uses that IRI.
fn mint_subject(graph: &RdfGraph, base: &str, id: &str) -> RdfNode {
    let preferred = RdfNode::uri(format!("{base}{id}"));
    if !graph.has_subject(&preferred) {
        return preferred;
    }
    let subject = (2_usize..)
        .map(|n| RdfNode::uri(format!("{base}{id}_{n}")))
        .find(|candidate| !graph.has_subject(candidate))
        .unwrap_or(preferred);
    warn!(identifier = id, subject = ?subject, "subject IRI already in use, minted a new one");
    subject
}

/// Internal converter state.
struct DocumentToBiboConverter<'a> {
    graph: &'a mut RdfGraph,
    doc: &'a BibliographicDocument,
    subject: RdfNode,
}

impl<'a> DocumentToBiboConverter<'a> {
    fn new(graph: &'a mut RdfGraph, doc: &'a BibliographicDocument, config: &BiboConfig) -> Self {
        let subject = match (config.base_uri.as_deref(), doc.identifier()) {
            (Some(base), Some(id)) => mint_subject(graph, base, id),
            _ => graph.new_blank_node(),
        };
        Self {
            graph,
            doc,
            subject,
        }
    }

    fn convert(&mut self) {
        self.add_types();
        self.add_titles();
        self.add_date();
        self.add_literals();
        self.add_keywords();
        self.add_identifiers();
        self.add_container();
        list::encode_contributors(self.graph, &self.subject, self.doc);
    }

    fn add(&mut self, predicate: String, object: RdfNode) {
        self.graph.add(self.subject.clone(), predicate, object);
    }

    fn add_literal(&mut self, namespace: &str, local: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.add(namespaces::iri(namespace, local), RdfNode::literal(value));
        }
    }

    fn add_types(&mut self) {
        let rdf_type = namespaces::iri(RDF, properties::rdf::TYPE);
        self.add(rdf_type.clone(), RdfNode::term(BIBO, classes::DOCUMENT));
        self.add(rdf_type, RdfNode::uri(document_class(self.doc.document_type())));
    }

    fn add_titles(&mut self) {
        let doc = self.doc;
        self.add_literal(DCTERMS, properties::dcterms::TITLE, Some(doc.title()));
        self.add_literal(EXT, properties::ext::SUBTITLE, doc.subtitle());
        self.add_literal(DCTERMS, properties::dcterms::IDENTIFIER, doc.identifier());
    }

    fn add_date(&mut self) {
        if let Some(date) = self.doc.date() {
            self.add(
                namespaces::iri(DCTERMS, properties::dcterms::ISSUED),
                RdfNode::typed_literal(date.to_string(), namespaces::iri(XSD, date.xsd_datatype())),
            );
        }
    }

    fn add_literals(&mut self) {
        use properties::{bibo, dcterms, ext, foaf};

        let doc = self.doc;
        let literals = [
            (DCTERMS, dcterms::PUBLISHER, doc.publisher()),
            (EXT, ext::PLACE_OF_PUBLICATION, doc.place_of_publication()),
            (EXT, ext::CONFERENCE_LOCATION, doc.conference_location()),
            (EXT, ext::CONFERENCE_ORGANIZER, doc.conference_organizer()),
            (BIBO, bibo::VOLUME, doc.volume()),
            (BIBO, bibo::ISSUE, doc.issue()),
            (BIBO, bibo::PAGES, doc.pages()),
            (FOAF, foaf::PAGE, doc.url()),
            (DCTERMS, dcterms::LANGUAGE, doc.language()),
            (DCTERMS, dcterms::ABSTRACT, doc.abstract_text()),
            (EXT, ext::NOTE, doc.notes()),
            (EXT, ext::SERIES, doc.series()),
            (BIBO, bibo::EDITION, doc.edition()),
            (EXT, ext::ORGANIZATION, doc.organization()),
            (EXT, ext::HOW_PUBLISHED, doc.how_published()),
            (EXT, ext::DEGREE_TYPE, doc.degree_type()),
        ];
        for (namespace, local, value) in literals {
            self.add_literal(namespace, local, value);
        }
    }

    fn add_keywords(&mut self) {
        let doc = self.doc;
        for keyword in doc.keywords() {
            self.add_literal(DCTERMS, properties::dcterms::SUBJECT, Some(keyword));
        }
    }

    fn add_identifiers(&mut self) {
        let doc = self.doc;
        for identifier in doc.identifiers() {
            self.add(
                identifier_predicate(identifier.kind()),
                RdfNode::literal(identifier.value()),
            );
        }
    }

    /// Container as its own resource, typed by the document type and never
    /// asserted as a `bibo:Document`.
    fn add_container(&mut self) {
        let Some(title) = self.doc.container_title() else {
            return;
        };
        let container = self.graph.new_blank_node();
        self.graph.add(
            container.clone(),
            namespaces::iri(RDF, properties::rdf::TYPE),
            RdfNode::uri(container_class(self.doc.document_type())),
        );
        self.graph.add(
            container.clone(),
            namespaces::iri(DCTERMS, properties::dcterms::TITLE),
            RdfNode::literal(title),
        );
        self.add(
            namespaces::iri(DCTERMS, properties::dcterms::IS_PART_OF),
            container,
        );
    }
}
