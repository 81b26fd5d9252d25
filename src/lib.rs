#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # bibo-bridge: BibTeX ↔ BIBO conversion
//!
//! Converts parsed BibTeX records into BIBO (Bibliographic Ontology) RDF
//! graphs and back, preserving type-dependent field meanings, author and
//! editor order, and checked identifiers.
//!
//! ## Quick Start
//!
//! ### Record to document
//!
//! ```
//! use bibo_bridge::{BibtexRecord, DocumentType, TypeAndFieldMapper};
//!
//! let record = BibtexRecord::builder("phdthesis")
//!     .key("doe2020")
//!     .field("title", "On Graphs")
//!     .field("author", "Doe, Jane")
//!     .field("school", "MIT")
//!     .field("year", "2020")
//!     .build();
//!
//! let doc = TypeAndFieldMapper::default().to_document(&record).unwrap();
//! assert_eq!(doc.document_type(), DocumentType::Thesis);
//! assert_eq!(doc.publisher(), Some("MIT"));
//! assert_eq!(doc.authors()[0].name().family_name(), Some("Doe"));
//! ```
//!
//! ### Names, dates and identifiers
//!
//! ```
//! use bibo_bridge::{IdentifierValidator, PersonNameParser};
//! use bibo_bridge::date::{is_valid_date, parse_date};
//!
//! let name = PersonNameParser::parse("Vincent van Gogh");
//! assert_eq!(name.name_particle(), Some("van"));
//!
//! assert!(is_valid_date(2000, 2, 29));
//! assert_eq!(parse_date("circa 1850").unwrap().to_string(), "1850-01-01");
//!
//! assert!(IdentifierValidator::is_valid_isbn13("978-0-306-40615-7"));
//! ```
//!
//! ### LaTeX escapes
//!
//! ```
//! use bibo_bridge::latex;
//!
//! assert_eq!(latex::decode(r"Erd\H{o}s"), "Erdős");
//! assert_eq!(latex::encode("Gödel"), r#"G{\"o}del"#);
//! ```
//!
//! ## Modules
//!
//! - [`record`] - Parsed BibTeX records (`BibtexRecord`)
//! - [`document`] - Format-neutral document model and builder
//! - [`mapper`] - Record ↔ document mapping rules
//! - [`person_name`] - Personal name parsing
//! - [`date`] - Publication dates and calendar rules
//! - [`identifier`] - ISBN/ISSN/DOI/Handle/URL validation
//! - [`latex`] - LaTeX escape ↔ Unicode translation
//! - [`citation_key`] - Citation key derivation and deduplication
//! - [`bibo`] - BIBO RDF conversion
//! - [`error`] - Error types and result type

#[macro_use]
mod macros;

pub mod bibo;
pub mod citation_key;
pub mod date;
pub mod document;
pub mod error;
pub mod identifier;
pub mod latex;
pub mod mapper;
pub mod person_name;
pub mod record;

pub use citation_key::{CitationKeyGenerator, KeyStrategy};
pub use date::PublicationDate;
pub use document::{BibliographicDocument, Contributor, DocumentBuilder, DocumentType, Role};
pub use error::{ConversionError, Result};
pub use identifier::{Identifier, IdentifierType, IdentifierValidator};
pub use mapper::{from_document, to_document, TypeAndFieldMapper};
pub use person_name::{PersonName, PersonNameParser};
pub use record::{BibtexRecord, BibtexRecordBuilder};
