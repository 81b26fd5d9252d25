//! BIBO namespace definitions and vocabulary terms.
//!
//! These IRIs are an external contract: downstream RDF consumers match on
//! them, so changing any of them is a breaking change.

use crate::document::{DocumentType, Role};
use crate::identifier::IdentifierType;

/// Bibliographic Ontology namespace URI.
pub const BIBO: &str = "http://purl.org/ontology/bibo/";

/// Dublin Core terms namespace URI.
pub const DCTERMS: &str = "http://purl.org/dc/terms/";

/// Friend-of-a-friend namespace URI.
pub const FOAF: &str = "http://xmlns.com/foaf/0.1/";

/// RDF namespace.
pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

/// XML Schema namespace.
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";

/// schema.org namespace.
pub const SCHEMA: &str = "http://schema.org/";

/// LOC relators vocabulary namespace.
pub const RELATORS: &str = "http://id.loc.gov/vocabulary/relators/";

/// Extension namespace for terms BIBO does not define.
pub const EXT: &str = "https://w3id.org/bibo-bridge/ext#";

/// Class local names.
pub mod classes {
    /// bibo:Document, asserted on every document.
    pub const DOCUMENT: &str = "Document";
    /// bibo:Article
    pub const ARTICLE: &str = "Article";
    /// bibo:Book
    pub const BOOK: &str = "Book";
    /// bibo:BookSection
    pub const BOOK_SECTION: &str = "BookSection";
    /// bibo:Thesis
    pub const THESIS: &str = "Thesis";
    /// bibo:Report
    pub const REPORT: &str = "Report";
    /// bibo:Proceedings
    pub const PROCEEDINGS: &str = "Proceedings";
    /// bibo:Webpage
    pub const WEBPAGE: &str = "Webpage";
    /// bibo:Manual
    pub const MANUAL: &str = "Manual";
    /// bibo:Manuscript
    pub const MANUSCRIPT: &str = "Manuscript";
    /// bibo:Journal (container of articles)
    pub const JOURNAL: &str = "Journal";
    /// bibo:Collection (generic container)
    pub const COLLECTION: &str = "Collection";

    /// ext:ConferencePaper
    pub const CONFERENCE_PAPER: &str = "ConferencePaper";
    /// ext:Booklet
    pub const BOOKLET: &str = "Booklet";
    /// ext:Unpublished
    pub const UNPUBLISHED: &str = "Unpublished";
    /// ext:MiscDocument
    pub const MISC_DOCUMENT: &str = "MiscDocument";

    /// foaf:Person
    pub const PERSON: &str = "Person";
}

/// Property local names, grouped by namespace.
pub mod properties {
    /// bibo: properties
    pub mod bibo {
        /// Ordered list of authors.
        pub const AUTHOR_LIST: &str = "authorList";
        /// Ordered list of editors.
        pub const EDITOR_LIST: &str = "editorList";
        /// Ordered list of other contributors.
        pub const CONTRIBUTOR_LIST: &str = "contributorList";
        /// Volume.
        pub const VOLUME: &str = "volume";
        /// Issue.
        pub const ISSUE: &str = "issue";
        /// Page range.
        pub const PAGES: &str = "pages";
        /// Edition.
        pub const EDITION: &str = "edition";
        /// DOI.
        pub const DOI: &str = "doi";
        /// ISBN-10.
        pub const ISBN10: &str = "isbn10";
        /// ISBN-13.
        pub const ISBN13: &str = "isbn13";
        /// ISSN.
        pub const ISSN: &str = "issn";
        /// Handle.
        pub const HANDLE: &str = "handle";
        /// URI.
        pub const URI: &str = "uri";
        /// Any other identifier.
        pub const IDENTIFIER: &str = "identifier";
    }

    /// dcterms: properties
    pub mod dcterms {
        /// Title.
        pub const TITLE: &str = "title";
        /// Local identifier.
        pub const IDENTIFIER: &str = "identifier";
        /// Publication date.
        pub const ISSUED: &str = "issued";
        /// Publisher name.
        pub const PUBLISHER: &str = "publisher";
        /// Language.
        pub const LANGUAGE: &str = "language";
        /// Abstract.
        pub const ABSTRACT: &str = "abstract";
        /// Keyword.
        pub const SUBJECT: &str = "subject";
        /// Link to the containing resource.
        pub const IS_PART_OF: &str = "isPartOf";
    }

    /// foaf: properties
    pub mod foaf {
        /// Full name.
        pub const NAME: &str = "name";
        /// Given name.
        pub const GIVEN_NAME: &str = "givenName";
        /// Family name.
        pub const FAMILY_NAME: &str = "familyName";
        /// Web page.
        pub const PAGE: &str = "page";
    }

    /// rdf: properties and resources
    pub mod rdf {
        /// rdf:type
        pub const TYPE: &str = "type";
        /// List head.
        pub const FIRST: &str = "first";
        /// List tail.
        pub const REST: &str = "rest";
        /// Empty list.
        pub const NIL: &str = "nil";
    }

    /// ext: properties
    pub mod ext {
        /// Subtitle.
        pub const SUBTITLE: &str = "subtitle";
        /// Place of publication.
        pub const PLACE_OF_PUBLICATION: &str = "placeOfPublication";
        /// Conference location.
        pub const CONFERENCE_LOCATION: &str = "conferenceLocation";
        /// Conference organizer.
        pub const CONFERENCE_ORGANIZER: &str = "conferenceOrganizer";
        /// Notes.
        pub const NOTE: &str = "note";
        /// Series.
        pub const SERIES: &str = "series";
        /// Organization.
        pub const ORGANIZATION: &str = "organization";
        /// How the work was published.
        pub const HOW_PUBLISHED: &str = "howPublished";
        /// Degree or report type.
        pub const DEGREE_TYPE: &str = "degreeType";
        /// URL identifier.
        pub const URL: &str = "url";
    }

    /// schema: properties
    pub mod schema {
        /// Affiliation of a person.
        pub const AFFILIATION: &str = "affiliation";
    }
}

/// Join a namespace and a local name.
#[must_use]
pub fn iri(namespace: &str, local: &str) -> String {
    format!("{namespace}{local}")
}

/// Class IRI for a document type.
#[must_use]
pub fn document_class(document_type: DocumentType) -> String {
    let (ns, local) = match document_type {
        DocumentType::Article => (BIBO, classes::ARTICLE),
        DocumentType::Book => (BIBO, classes::BOOK),
        DocumentType::BookSection => (BIBO, classes::BOOK_SECTION),
        DocumentType::Thesis => (BIBO, classes::THESIS),
        DocumentType::Report => (BIBO, classes::REPORT),
        DocumentType::ConferencePaper => (EXT, classes::CONFERENCE_PAPER),
        DocumentType::Proceedings => (BIBO, classes::PROCEEDINGS),
        DocumentType::Webpage => (BIBO, classes::WEBPAGE),
        DocumentType::Booklet => (EXT, classes::BOOKLET),
        DocumentType::Manual => (BIBO, classes::MANUAL),
        DocumentType::Manuscript => (BIBO, classes::MANUSCRIPT),
        DocumentType::Unpublished => (EXT, classes::UNPUBLISHED),
        DocumentType::Other => (EXT, classes::MISC_DOCUMENT),
    };
    iri(ns, local)
}

/// Document type for a class IRI, if it names one.
#[must_use]
pub fn document_type_for_class(class_iri: &str) -> Option<DocumentType> {
    DocumentType::ALL
        .into_iter()
        .find(|t| document_class(*t) == class_iri)
}

/// Class IRI of the container a document of this type is part of.
#[must_use]
pub fn container_class(document_type: DocumentType) -> String {
    let local = match document_type {
        DocumentType::Article => classes::JOURNAL,
        DocumentType::ConferencePaper => classes::PROCEEDINGS,
        DocumentType::BookSection => classes::BOOK,
        _ => classes::COLLECTION,
    };
    iri(BIBO, local)
}

/// Predicate IRI for an identifier kind.
#[must_use]
pub fn identifier_predicate(kind: IdentifierType) -> String {
    use properties::bibo;
    match kind {
        IdentifierType::Doi => iri(BIBO, bibo::DOI),
        IdentifierType::Isbn10 => iri(BIBO, bibo::ISBN10),
        IdentifierType::Isbn13 => iri(BIBO, bibo::ISBN13),
        IdentifierType::Issn => iri(BIBO, bibo::ISSN),
        IdentifierType::Handle => iri(BIBO, bibo::HANDLE),
        IdentifierType::Uri => iri(BIBO, bibo::URI),
        IdentifierType::Url => iri(EXT, properties::ext::URL),
        IdentifierType::Other => iri(BIBO, bibo::IDENTIFIER),
    }
}

/// All identifier kinds with their predicate IRIs.
#[must_use]
pub fn identifier_predicates() -> Vec<(IdentifierType, String)> {
    [
        IdentifierType::Doi,
        IdentifierType::Isbn10,
        IdentifierType::Isbn13,
        IdentifierType::Issn,
        IdentifierType::Handle,
        IdentifierType::Uri,
        IdentifierType::Url,
        IdentifierType::Other,
    ]
    .into_iter()
    .map(|kind| (kind, identifier_predicate(kind)))
    .collect()
}

/// MARC relator code for a role.
#[must_use]
pub const fn relator_code(role: Role) -> &'static str {
    match role {
        Role::Author => "aut",
        Role::Editor => "edt",
        Role::Translator => "trl",
        Role::Advisor => "ths",
        Role::Reviewer => "rev",
        Role::Contributor => "ctb",
    }
}

/// Relator predicate IRI for a role.
#[must_use]
pub fn relator_predicate(role: Role) -> String {
    iri(RELATORS, relator_code(role))
}

/// List predicate IRI that holds contributors of this role.
#[must_use]
pub fn list_predicate(role: Role) -> String {
    use properties::bibo;
    match role {
        Role::Author => iri(BIBO, bibo::AUTHOR_LIST),
        Role::Editor => iri(BIBO, bibo::EDITOR_LIST),
        _ => iri(BIBO, bibo::CONTRIBUTOR_LIST),
    }
}
