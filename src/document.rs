//! Bibliographic document model.
//!
//! [`BibliographicDocument`] is the format-neutral description of one record.
//! It is built once through [`DocumentBuilder`], which checks its invariants
//! at [`DocumentBuilder::build`], and is never mutated afterwards; use
//! [`BibliographicDocument::to_builder`] to derive a modified copy.

use std::fmt;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::date::PublicationDate;
use crate::error::{ConversionError, Result};
use crate::identifier::{Identifier, IdentifierType};
use crate::person_name::PersonName;

/// Kind of bibliographic document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DocumentType {
    /// Journal or magazine article
    Article,
    /// Whole book
    Book,
    /// Chapter or other part of a book
    BookSection,
    /// Master's or doctoral thesis
    Thesis,
    /// Technical or institutional report
    Report,
    /// Paper in conference proceedings
    ConferencePaper,
    /// Conference proceedings volume
    Proceedings,
    /// Web page
    Webpage,
    /// Printed work without a named publisher
    Booklet,
    /// Technical documentation
    Manual,
    /// Handwritten or typescript manuscript
    Manuscript,
    /// Work that has not been formally published
    Unpublished,
    /// Anything else
    Other,
}

impl DocumentType {
    /// All document types.
    pub const ALL: [Self; 13] = [
        Self::Article,
        Self::Book,
        Self::BookSection,
        Self::Thesis,
        Self::Report,
        Self::ConferencePaper,
        Self::Proceedings,
        Self::Webpage,
        Self::Booklet,
        Self::Manual,
        Self::Manuscript,
        Self::Unpublished,
        Self::Other,
    ];

    /// Whether `address`/`organization` describe a conference for this type.
    #[must_use]
    pub const fn is_conference(&self) -> bool {
        matches!(self, Self::ConferencePaper | Self::Proceedings)
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Role a contributor plays for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    /// Author
    Author,
    /// Editor
    Editor,
    /// Translator
    Translator,
    /// Thesis advisor
    Advisor,
    /// Reviewer
    Reviewer,
    /// Any other contribution
    Contributor,
}

impl Role {
    /// All roles, in the order their lists are emitted.
    pub const ALL: [Self; 6] = [
        Self::Author,
        Self::Editor,
        Self::Translator,
        Self::Advisor,
        Self::Reviewer,
        Self::Contributor,
    ];
}

/// A person contributing to a document in some role.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contributor {
    name: PersonName,
    role: Role,
    affiliation: Option<String>,
}

impl Contributor {
    /// Create a contributor.
    #[must_use]
    pub const fn new(name: PersonName, role: Role) -> Self {
        Self {
            name,
            role,
            affiliation: None,
        }
    }

    /// Parse `raw` as a name and create a contributor.
    #[must_use]
    pub fn parse(raw: &str, role: Role) -> Self {
        Self::new(PersonName::parse(raw), role)
    }

    /// Set the affiliation.
    #[must_use]
    pub fn with_affiliation(mut self, affiliation: impl Into<String>) -> Self {
        self.affiliation = crate::macros::non_blank(affiliation.into());
        self
    }

    /// The contributor's name.
    #[must_use]
    pub const fn name(&self) -> &PersonName {
        &self.name
    }

    /// The contributor's role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// The contributor's affiliation.
    #[must_use]
    pub fn affiliation(&self) -> Option<&str> {
        self.affiliation.as_deref()
    }
}

/// A bibliographic document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BibliographicDocument {
    identifier: Option<String>,
    document_type: DocumentType,
    title: String,
    subtitle: Option<String>,
    contributors: Vec<Contributor>,
    date: Option<PublicationDate>,
    publisher: Option<String>,
    place_of_publication: Option<String>,
    conference_location: Option<String>,
    conference_organizer: Option<String>,
    container_title: Option<String>,
    volume: Option<String>,
    issue: Option<String>,
    pages: Option<String>,
    identifiers: Vec<Identifier>,
    url: Option<String>,
    language: Option<String>,
    abstract_text: Option<String>,
    notes: Option<String>,
    series: Option<String>,
    edition: Option<String>,
    keywords: IndexSet<String>,
    organization: Option<String>,
    how_published: Option<String>,
    degree_type: Option<String>,
}

impl BibliographicDocument {
    /// Start building a document of the given type and title.
    #[must_use]
    pub fn builder(document_type: DocumentType, title: impl Into<String>) -> DocumentBuilder {
        DocumentBuilder::new().document_type(document_type).title(title)
    }

    /// A builder pre-filled with this document's values.
    #[must_use]
    pub fn to_builder(&self) -> DocumentBuilder {
        DocumentBuilder {
            identifier: self.identifier.clone(),
            document_type: Some(self.document_type),
            title: Some(self.title.clone()),
            subtitle: self.subtitle.clone(),
            contributors: self.contributors.clone(),
            date: self.date,
            publisher: self.publisher.clone(),
            place_of_publication: self.place_of_publication.clone(),
            conference_location: self.conference_location.clone(),
            conference_organizer: self.conference_organizer.clone(),
            container_title: self.container_title.clone(),
            volume: self.volume.clone(),
            issue: self.issue.clone(),
            pages: self.pages.clone(),
            identifiers: self.identifiers.clone(),
            url: self.url.clone(),
            language: self.language.clone(),
            abstract_text: self.abstract_text.clone(),
            notes: self.notes.clone(),
            series: self.series.clone(),
            edition: self.edition.clone(),
            keywords: self.keywords.clone(),
            organization: self.organization.clone(),
            how_published: self.how_published.clone(),
            degree_type: self.degree_type.clone(),
        }
    }

    /// Document type.
    #[must_use]
    pub const fn document_type(&self) -> DocumentType {
        self.document_type
    }

    /// Title; never blank.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// All contributors in order.
    #[must_use]
    pub fn contributors(&self) -> &[Contributor] {
        &self.contributors
    }

    /// Contributors with the given role, in order.
    pub fn contributors_with_role(&self, role: Role) -> impl Iterator<Item = &Contributor> {
        self.contributors.iter().filter(move |c| c.role == role)
    }

    /// Authors in order.
    #[must_use]
    pub fn authors(&self) -> Vec<&Contributor> {
        self.contributors_with_role(Role::Author).collect()
    }

    /// Editors in order.
    #[must_use]
    pub fn editors(&self) -> Vec<&Contributor> {
        self.contributors_with_role(Role::Editor).collect()
    }

    /// Publication date.
    #[must_use]
    pub const fn date(&self) -> Option<&PublicationDate> {
        self.date.as_ref()
    }

    /// Typed identifiers.
    #[must_use]
    pub fn identifiers(&self) -> &[Identifier] {
        &self.identifiers
    }

    /// First identifier of the given kind.
    #[must_use]
    pub fn identifier_of(&self, kind: IdentifierType) -> Option<&Identifier> {
        self.identifiers.iter().find(|id| id.kind() == kind)
    }

    /// Keywords in first-seen order.
    #[must_use]
    pub const fn keywords(&self) -> &IndexSet<String> {
        &self.keywords
    }

    text_getters! {
        /// Local identifier (citation key or IRI local name).
        identifier,
        /// Subtitle.
        subtitle,
        /// Publisher, school or institution.
        publisher,
        /// Place of publication.
        place_of_publication,
        /// Location of the conference.
        conference_location,
        /// Organizer of the conference.
        conference_organizer,
        /// Title of the journal, book or proceedings containing this document.
        container_title,
        /// Volume.
        volume,
        /// Issue or number.
        issue,
        /// Page range.
        pages,
        /// Web location.
        url,
        /// Language.
        language,
        /// Abstract.
        abstract_text,
        /// Free-form notes.
        notes,
        /// Series title.
        series,
        /// Edition.
        edition,
        /// Sponsoring or issuing organization.
        organization,
        /// How an unusual work was published.
        how_published,
        /// Degree type of a thesis, or the type of a report.
        degree_type,
    }
}

/// Builder for [`BibliographicDocument`].
///
/// Setters never fail; invariants are checked once in [`DocumentBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct DocumentBuilder {
    identifier: Option<String>,
    document_type: Option<DocumentType>,
    title: Option<String>,
    subtitle: Option<String>,
    contributors: Vec<Contributor>,
    date: Option<PublicationDate>,
    publisher: Option<String>,
    place_of_publication: Option<String>,
    conference_location: Option<String>,
    conference_organizer: Option<String>,
    container_title: Option<String>,
    volume: Option<String>,
    issue: Option<String>,
    pages: Option<String>,
    identifiers: Vec<Identifier>,
    url: Option<String>,
    language: Option<String>,
    abstract_text: Option<String>,
    notes: Option<String>,
    series: Option<String>,
    edition: Option<String>,
    keywords: IndexSet<String>,
    organization: Option<String>,
    how_published: Option<String>,
    degree_type: Option<String>,
}

impl DocumentBuilder {
    /// An empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document type.
    #[must_use]
    pub const fn document_type(mut self, document_type: DocumentType) -> Self {
        self.document_type = Some(document_type);
        self
    }

    /// Set the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Append a contributor.
    #[must_use]
    pub fn contributor(mut self, contributor: Contributor) -> Self {
        self.contributors.push(contributor);
        self
    }

    /// Append several contributors in order.
    #[must_use]
    pub fn contributors(mut self, contributors: impl IntoIterator<Item = Contributor>) -> Self {
        self.contributors.extend(contributors);
        self
    }

    /// Set the publication date.
    #[must_use]
    pub const fn date(mut self, date: PublicationDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Append a typed identifier.
    #[must_use]
    pub fn add_identifier(mut self, identifier: Identifier) -> Self {
        self.identifiers.push(identifier);
        self
    }

    /// Add a keyword; blanks and repeats are ignored.
    #[must_use]
    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        if let Some(keyword) = crate::macros::non_blank(keyword.into()) {
            self.keywords.insert(keyword);
        }
        self
    }

    /// Add several keywords.
    #[must_use]
    pub fn keywords<S: Into<String>>(self, keywords: impl IntoIterator<Item = S>) -> Self {
        keywords.into_iter().fold(self, Self::keyword)
    }

    /// Apply `set` only when `value` is present.
    ///
    /// ```
    /// use bibo_bridge::{BibliographicDocument, DocumentBuilder, DocumentType};
    ///
    /// let volume: Option<&str> = Some("12");
    /// let doc = BibliographicDocument::builder(DocumentType::Article, "T")
    ///     .apply_some(volume, DocumentBuilder::volume)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(doc.volume(), Some("12"));
    /// ```
    #[must_use]
    pub fn apply_some<T>(self, value: Option<T>, set: impl FnOnce(Self, T) -> Self) -> Self {
        match value {
            Some(value) => set(self, value),
            None => self,
        }
    }

    text_setters! {
        /// Set the local identifier.
        identifier,
        /// Set the subtitle.
        subtitle,
        /// Set the publisher.
        publisher,
        /// Set the place of publication.
        place_of_publication,
        /// Set the conference location.
        conference_location,
        /// Set the conference organizer.
        conference_organizer,
        /// Set the container title.
        container_title,
        /// Set the volume.
        volume,
        /// Set the issue.
        issue,
        /// Set the page range.
        pages,
        /// Set the URL.
        url,
        /// Set the language.
        language,
        /// Set the abstract.
        abstract_text,
        /// Set the notes.
        notes,
        /// Set the series.
        series,
        /// Set the edition.
        edition,
        /// Set the organization.
        organization,
        /// Set how the work was published.
        how_published,
        /// Set the degree type.
        degree_type,
    }

    /// Validate and build the document.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::NullInput`] if no document type was set
    /// and [`ConversionError::MissingRequiredField`] if the title is blank.
    pub fn build(self) -> Result<BibliographicDocument> {
        let document_type = self
            .document_type
            .ok_or_else(|| ConversionError::NullInput("document type".into()))?;
        let title = self
            .title
            .and_then(crate::macros::non_blank)
            .ok_or_else(|| ConversionError::MissingRequiredField("title".into()))?;

        Ok(BibliographicDocument {
            identifier: self.identifier,
            document_type,
            title,
            subtitle: self.subtitle,
            contributors: self.contributors,
            date: self.date,
            publisher: self.publisher,
            place_of_publication: self.place_of_publication,
            conference_location: self.conference_location,
            conference_organizer: self.conference_organizer,
            container_title: self.container_title,
            volume: self.volume,
            issue: self.issue,
            pages: self.pages,
            identifiers: self.identifiers,
            url: self.url,
            language: self.language,
            abstract_text: self.abstract_text,
            notes: self.notes,
            series: self.series,
            edition: self.edition,
            keywords: self.keywords,
            organization: self.organization,
            how_published: self.how_published,
            degree_type: self.degree_type,
        })
    }
}
