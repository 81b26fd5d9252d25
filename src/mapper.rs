//! BibTeX record ↔ [`BibliographicDocument`] mapping.
//!
//! The entry type decides both the document type and how several fields are
//! read: `address` and `organization` describe a conference for
//! `inproceedings`/`proceedings`, the publisher lives in `school` for theses
//! and `institution` for reports, and the container title lives in `journal`
//! or `booktitle` depending on the type.

use std::collections::HashMap;

use lazy_static::lazy_static;
use tracing::debug;

use crate::bibo::BiboConfig;
use crate::citation_key::CitationKeyGenerator;
use crate::date::{self, PublicationDate};
use crate::document::{BibliographicDocument, Contributor, DocumentBuilder, DocumentType, Role};
use crate::error::{ConversionError, Result};
use crate::identifier::{Identifier, IdentifierType, IdentifierValidator};
use crate::latex;
use crate::person_name::{PersonName, PersonNameParser};
use crate::record::BibtexRecord;

/// Degree type given to a `mastersthesis` entry without an explicit `type`.
pub const MASTERS_THESIS_DEFAULT: &str = "Master's thesis";

/// Entry type used for documents with no specific BibTeX counterpart.
pub const FALLBACK_ENTRY_TYPE: &str = "misc";

lazy_static! {
    static ref ENTRY_TYPES: HashMap<&'static str, DocumentType> = {
        let mut m = HashMap::new();
        m.insert("article", DocumentType::Article);
        m.insert("book", DocumentType::Book);
        m.insert("inbook", DocumentType::BookSection);
        m.insert("incollection", DocumentType::BookSection);
        m.insert("inproceedings", DocumentType::ConferencePaper);
        m.insert("conference", DocumentType::ConferencePaper);
        m.insert("proceedings", DocumentType::Proceedings);
        m.insert("mastersthesis", DocumentType::Thesis);
        m.insert("phdthesis", DocumentType::Thesis);
        m.insert("techreport", DocumentType::Report);
        m.insert("online", DocumentType::Webpage);
        m.insert("electronic", DocumentType::Webpage);
        m.insert("www", DocumentType::Webpage);
        m.insert("booklet", DocumentType::Booklet);
        m.insert("manual", DocumentType::Manual);
        m.insert("unpublished", DocumentType::Unpublished);
        m
    };
}

/// BibTeX fields holding contributor names, with their role.
const NAME_FIELDS: [(&str, Role); 4] = [
    ("author", Role::Author),
    ("editor", Role::Editor),
    ("translator", Role::Translator),
    ("advisor", Role::Advisor),
];

/// Document type for a BibTeX entry type; unknown types become [`DocumentType::Other`].
#[must_use]
pub fn entry_type_to_document_type(entry_type: &str) -> DocumentType {
    ENTRY_TYPES
        .get(entry_type.trim().to_lowercase().as_str())
        .copied()
        .unwrap_or(DocumentType::Other)
}

/// BibTeX entry type for a document type.
///
/// Theses become `mastersthesis` when the degree type mentions "master" and
/// `phdthesis` otherwise. Book sections become `incollection`.
#[must_use]
pub fn document_type_to_entry_type(
    document_type: DocumentType,
    degree_type: Option<&str>,
) -> &'static str {
    match document_type {
        DocumentType::Article => "article",
        DocumentType::Book => "book",
        DocumentType::BookSection => "incollection",
        DocumentType::ConferencePaper => "inproceedings",
        DocumentType::Proceedings => "proceedings",
        DocumentType::Thesis => {
            if degree_type.is_some_and(|d| d.to_lowercase().contains("master")) {
                "mastersthesis"
            } else {
                "phdthesis"
            }
        },
        DocumentType::Report => "techreport",
        DocumentType::Webpage => "online",
        DocumentType::Booklet => "booklet",
        DocumentType::Manual => "manual",
        DocumentType::Unpublished => "unpublished",
        DocumentType::Manuscript | DocumentType::Other => FALLBACK_ENTRY_TYPE,
    }
}

/// BibTeX field that stores the publisher for a document type.
#[must_use]
pub const fn publisher_field(document_type: DocumentType) -> &'static str {
    match document_type {
        DocumentType::Thesis => "school",
        DocumentType::Report => "institution",
        _ => "publisher",
    }
}

/// BibTeX field that stores the container title, if the type has one.
#[must_use]
pub const fn container_field(document_type: DocumentType) -> Option<&'static str> {
    match document_type {
        DocumentType::Article => Some("journal"),
        DocumentType::ConferencePaper | DocumentType::Proceedings | DocumentType::BookSection => {
            Some("booktitle")
        },
        _ => None,
    }
}

/// Converts between [`BibtexRecord`] and [`BibliographicDocument`].
///
/// The mapper holds only configuration and can be shared across threads.
///
/// # Examples
///
/// ```
/// use bibo_bridge::{BibtexRecord, DocumentType, TypeAndFieldMapper};
///
/// let record = BibtexRecord::builder("inproceedings")
///     .key("lee2019")
///     .field("title", "Graphs")
///     .field("address", "Berlin, Germany")
///     .build();
///
/// let doc = TypeAndFieldMapper::default().to_document(&record).unwrap();
/// assert_eq!(doc.document_type(), DocumentType::ConferencePaper);
/// assert_eq!(doc.conference_location(), Some("Berlin, Germany"));
/// assert_eq!(doc.place_of_publication(), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TypeAndFieldMapper {
    config: BiboConfig,
}

impl TypeAndFieldMapper {
    /// Create a mapper with the given configuration.
    #[must_use]
    pub const fn new(config: BiboConfig) -> Self {
        Self { config }
    }

    /// The mapper's configuration.
    #[must_use]
    pub const fn config(&self) -> &BiboConfig {
        &self.config
    }

    /// Convert a parsed BibTeX record into a document.
    ///
    /// # Errors
    ///
    /// - [`ConversionError::NullInput`] if the entry type is blank
    /// - [`ConversionError::MissingRequiredField`] if there is neither a title nor a key
    /// - [`ConversionError::InvalidFieldValue`] for an unreadable month or day
    /// - [`ConversionError::InvalidDate`] / [`ConversionError::UnparsableDate`] for bad dates
    /// - [`ConversionError::InvalidIdentifier`] for a bad identifier in strict mode
    pub fn to_document(&self, record: &BibtexRecord) -> Result<BibliographicDocument> {
        if record.entry_type.trim().is_empty() {
            return Err(ConversionError::NullInput("entry type".into()));
        }

        let entry_type = record.entry_type.trim().to_lowercase();
        let document_type = entry_type_to_document_type(&entry_type);
        let text = |name: &str| self.text_field(record, name);

        let title = text("title")
            .or_else(|| record.key().map(String::from))
            .ok_or_else(|| ConversionError::MissingRequiredField("title".into()))?;

        let mut builder = BibliographicDocument::builder(document_type, title)
            .apply_some(record.key(), DocumentBuilder::identifier)
            .apply_some(text("subtitle"), DocumentBuilder::subtitle)
            .contributors(self.contributors(record))
            .apply_some(text("volume"), DocumentBuilder::volume)
            .apply_some(
                text("number").or_else(|| text("issue")),
                DocumentBuilder::issue,
            )
            .apply_some(record.non_blank_field("pages"), DocumentBuilder::pages)
            .apply_some(record.non_blank_field("url"), DocumentBuilder::url)
            .apply_some(text("language"), DocumentBuilder::language)
            .apply_some(text("abstract"), DocumentBuilder::abstract_text)
            .apply_some(text("note"), DocumentBuilder::notes)
            .apply_some(text("series"), DocumentBuilder::series)
            .apply_some(text("edition"), DocumentBuilder::edition)
            .apply_some(text("howpublished"), DocumentBuilder::how_published)
            .keywords(text("keywords").map(|k| split_keywords(&k)).unwrap_or_default());

        // publisher, or school/institution for theses and reports
        let publisher = text(publisher_field(document_type)).or_else(|| text("publisher"));

        if let Some(address) = text("address") {
            builder = if document_type.is_conference() {
                builder.conference_location(address)
            } else {
                builder.place_of_publication(address)
            };
        }

        let organization = text("organization");
        builder = match (document_type, organization) {
            (t, Some(org)) if t.is_conference() => builder.conference_organizer(org),
            (DocumentType::Manual, Some(org)) if publisher.is_none() => {
                builder.publisher(org.clone()).organization(org)
            },
            (_, Some(org)) => builder.organization(org),
            (_, None) => builder,
        };
        builder = builder.apply_some(publisher, DocumentBuilder::publisher);

        if let Some(field) = container_field(document_type) {
            let container = text(field).or_else(|| {
                (document_type == DocumentType::Article)
                    .then(|| text("journaltitle"))
                    .flatten()
            });
            builder = builder.apply_some(container, DocumentBuilder::container_title);
        }

        let degree_type = text("type").or_else(|| {
            (entry_type == "mastersthesis").then(|| MASTERS_THESIS_DEFAULT.to_string())
        });
        builder = builder.apply_some(degree_type, DocumentBuilder::degree_type);

        if let Some(date) = self.publication_date(record)? {
            builder = builder.date(date);
        }

        for identifier in self.identifiers(record)? {
            builder = builder.add_identifier(identifier);
        }

        builder.build()
    }

    /// Convert a document back into a BibTeX record.
    ///
    /// The record key is the document identifier when it is a valid citation
    /// key, otherwise one derived with the configured [`crate::KeyStrategy`].
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::MissingRequiredField`] if the title is blank.
    pub fn from_document(&self, doc: &BibliographicDocument) -> Result<BibtexRecord> {
        let key = doc
            .identifier()
            .filter(|id| CitationKeyGenerator::is_valid_key(id))
            .map_or_else(
                || CitationKeyGenerator::new(self.config.key_strategy).generate(doc),
                String::from,
            );
        self.from_document_with_key(doc, key)
    }

    /// Convert a document back into a BibTeX record with the given key.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::MissingRequiredField`] if the title is blank.
    pub fn from_document_with_key(
        &self,
        doc: &BibliographicDocument,
        key: String,
    ) -> Result<BibtexRecord> {
        if doc.title().trim().is_empty() {
            return Err(ConversionError::MissingRequiredField("title".into()));
        }

        let document_type = doc.document_type();
        let mut entry_type = document_type_to_entry_type(document_type, doc.degree_type());
        if document_type == DocumentType::BookSection && doc.container_title().is_none() {
            entry_type = "inbook";
        }

        let mut record = BibtexRecord::new(entry_type);
        record.key = Some(key);

        let mut put = |name: &str, value: Option<&str>, encode: bool| {
            if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
                let value = if encode && self.config.decode_latex {
                    latex::encode(value)
                } else {
                    value.to_string()
                };
                record.set_field(name, value);
            }
        };

        put("title", Some(doc.title()), true);
        put("subtitle", doc.subtitle(), true);

        for (field, role) in NAME_FIELDS {
            let names: Vec<&str> = doc
                .contributors_with_role(role)
                .map(|c| c.name().full_name())
                .collect();
            if !names.is_empty() {
                put(field, Some(names.join(" and ").as_str()), true);
            }
        }

        if let Some(field) = container_field(document_type) {
            put(field, doc.container_title(), true);
        }

        // a manual's organization stands in for its publisher
        let publisher_is_organization = document_type == DocumentType::Manual
            && doc.organization().is_some()
            && doc.organization() == doc.publisher();
        if !publisher_is_organization {
            put(publisher_field(document_type), doc.publisher(), true);
        }

        let address = if document_type.is_conference() {
            doc.conference_location().or_else(|| doc.place_of_publication())
        } else {
            doc.place_of_publication().or_else(|| doc.conference_location())
        };
        put("address", address, true);

        let organization = if document_type.is_conference() {
            doc.conference_organizer().or_else(|| doc.organization())
        } else {
            doc.organization()
        };
        put("organization", organization, true);

        if let Some(date) = doc.date() {
            put("year", Some(date.year().to_string().as_str()), false);
            put("month", date.month().map(|m| m.to_string()).as_deref(), false);
            put("day", date.day().map(|d| d.to_string()).as_deref(), false);
        }

        put("volume", doc.volume(), true);
        put("number", doc.issue(), true);
        put("pages", doc.pages(), false);
        put("series", doc.series(), true);
        put("edition", doc.edition(), true);
        put("howpublished", doc.how_published(), true);

        let degree_type = doc
            .degree_type()
            .filter(|d| !(entry_type == "mastersthesis" && *d == MASTERS_THESIS_DEFAULT));
        put("type", degree_type, true);

        for identifier in doc.identifiers() {
            let field = match identifier.kind() {
                IdentifierType::Doi => "doi",
                IdentifierType::Isbn10 | IdentifierType::Isbn13 => "isbn",
                IdentifierType::Issn => "issn",
                IdentifierType::Handle => "hdl",
                IdentifierType::Url => "url",
                IdentifierType::Uri | IdentifierType::Other => continue,
            };
            put(field, Some(identifier.value()), false);
        }
        put("url", doc.url(), false);

        put("language", doc.language(), true);
        put("abstract", doc.abstract_text(), true);
        put("note", doc.notes(), true);

        if !doc.keywords().is_empty() {
            let keywords: Vec<&str> = doc.keywords().iter().map(String::as_str).collect();
            put("keywords", Some(keywords.join(", ").as_str()), true);
        }

        Ok(record)
    }

    /// Pre-flight check of a record without building a document.
    ///
    /// Checks the entry type, the title (or key fallback), the date fields and,
    /// in strict mode, the identifier fields.
    ///
    /// # Errors
    ///
    /// Returns the first error [`Self::to_document`] would report for those fields.
    pub fn validate(&self, record: &BibtexRecord) -> Result<()> {
        if record.entry_type.trim().is_empty() {
            return Err(ConversionError::NullInput("entry type".into()));
        }
        if record.non_blank_field("title").is_none() && record.key().is_none() {
            return Err(ConversionError::MissingRequiredField("title".into()));
        }
        self.publication_date(record)?;
        self.identifiers(record)?;
        Ok(())
    }

    /// Field text with LaTeX escapes decoded when configured.
    fn text_field(&self, record: &BibtexRecord, name: &str) -> Option<String> {
        let raw = record.non_blank_field(name)?;
        let value = if self.config.decode_latex {
            latex::decode(raw)
        } else {
            raw.to_string()
        };
        crate::macros::non_blank(value)
    }

    fn contributors(&self, record: &BibtexRecord) -> Vec<Contributor> {
        NAME_FIELDS
            .iter()
            .filter_map(|(field, role)| Some((self.text_field(record, field)?, *role)))
            .flat_map(|(names, role)| {
                PersonNameParser::split_names(&names)
                    .into_iter()
                    .map(move |name| Contributor::new(PersonName::parse(&name), role))
            })
            .collect()
    }

    /// Publication date from `date`, or from `year`/`month`/`day`.
    fn publication_date(&self, record: &BibtexRecord) -> Result<Option<PublicationDate>> {
        let date = if let Some(text) = record.non_blank_field("date") {
            PublicationDate::from_lexical(text).or_else(|_| date::parse_date(text))?
        } else if let Some(year_text) = record.non_blank_field("year") {
            let year = year_text
                .parse::<i32>()
                .or_else(|_| date::extract_year_from_free_form(year_text))?;
            let month = record
                .non_blank_field("month")
                .map(|m| {
                    date::parse_month(m).ok_or_else(|| {
                        ConversionError::invalid_field("month", m, "not a month name or number")
                    })
                })
                .transpose()?;
            let day = record
                .non_blank_field("day")
                .map(|d| {
                    d.parse::<u32>()
                        .map_err(|_| ConversionError::invalid_field("day", d, "not a day number"))
                })
                .transpose()?;
            // rejects a day without a month
            PublicationDate::new(year, month, day)?
        } else {
            return Ok(None);
        };

        date.validate(self.config.allow_future_dates)?;
        Ok(Some(date))
    }

    fn identifiers(&self, record: &BibtexRecord) -> Result<Vec<Identifier>> {
        let candidates: [(&str, fn(&str, &str) -> Result<Identifier>); 5] = [
            ("doi", |f, v| Identifier::parse(IdentifierType::Doi, f, v)),
            ("isbn", Identifier::parse_isbn),
            ("issn", |f, v| Identifier::parse(IdentifierType::Issn, f, v)),
            ("hdl", |f, v| Identifier::parse(IdentifierType::Handle, f, v)),
            ("handle", |f, v| Identifier::parse(IdentifierType::Handle, f, v)),
        ];

        let mut identifiers = Vec::new();
        for (field, parse) in candidates {
            let Some(raw) = record.non_blank_field(field) else {
                continue;
            };
            match parse(field, raw) {
                Ok(id) => {
                    if !identifiers.contains(&id) {
                        identifiers.push(id);
                    }
                },
                Err(err) if self.config.strict_identifiers => return Err(err),
                Err(err) => debug!(field, value = raw, %err, "dropping invalid identifier"),
            }
        }

        if let Some(url) = record.non_blank_field("url") {
            if !IdentifierValidator::is_valid_url(url) {
                let err = ConversionError::InvalidIdentifier {
                    field: "url".into(),
                    kind: IdentifierType::Url.label().into(),
                    value: url.into(),
                    expected_format: IdentifierType::Url.expected_format().into(),
                };
                if self.config.strict_identifiers {
                    return Err(err);
                }
                debug!(field = "url", value = url, %err, "keeping unvalidated url");
            }
        }

        Ok(identifiers)
    }
}

/// Split a `keywords` field on `,` or `;`, trimming and dropping blanks.
fn split_keywords(text: &str) -> Vec<String> {
    text.split([',', ';'])
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(String::from)
        .collect()
}

/// Convert a record with the default configuration.
///
/// # Errors
///
/// See [`TypeAndFieldMapper::to_document`].
pub fn to_document(record: &BibtexRecord) -> Result<BibliographicDocument> {
    TypeAndFieldMapper::default().to_document(record)
}

/// Convert a document with the default configuration.
///
/// # Errors
///
/// See [`TypeAndFieldMapper::from_document`].
pub fn from_document(doc: &BibliographicDocument) -> Result<BibtexRecord> {
    TypeAndFieldMapper::default().from_document(doc)
}
