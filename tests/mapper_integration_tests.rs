//! Integration tests for BibTeX record ↔ document mapping.

mod common;

use bibo_bridge::bibo::BiboConfig;
use bibo_bridge::date::PublicationDate;
use bibo_bridge::{
    BibliographicDocument, Contributor, ConversionError, DocumentType, Identifier, IdentifierType,
    KeyStrategy, Role, TypeAndFieldMapper,
};
use common::{create_test_article, create_test_thesis, make_record};

fn lenient() -> TypeAndFieldMapper {
    TypeAndFieldMapper::new(BiboConfig::new().with_strict_identifiers(false))
}

// ============================================================================
// Entry Types
// ============================================================================

#[test]
fn test_entry_type_mapping_is_case_insensitive() {
    let mapper = TypeAndFieldMapper::default();
    let cases = [
        ("Article", DocumentType::Article),
        ("BOOK", DocumentType::Book),
        ("inbook", DocumentType::BookSection),
        ("incollection", DocumentType::BookSection),
        ("conference", DocumentType::ConferencePaper),
        ("proceedings", DocumentType::Proceedings),
        ("mastersthesis", DocumentType::Thesis),
        ("techreport", DocumentType::Report),
        ("online", DocumentType::Webpage),
        ("booklet", DocumentType::Booklet),
        ("manual", DocumentType::Manual),
        ("unpublished", DocumentType::Unpublished),
        ("patent", DocumentType::Other),
    ];
    for (entry_type, expected) in cases {
        let doc = mapper
            .to_document(&make_record(entry_type, "k", &[("title", "T")]))
            .unwrap();
        assert_eq!(doc.document_type(), expected, "entry type {entry_type}");
    }
}

#[test]
fn test_blank_entry_type_is_rejected() {
    let record = make_record("  ", "k", &[("title", "T")]);
    assert!(matches!(
        TypeAndFieldMapper::default().to_document(&record),
        Err(ConversionError::NullInput(_))
    ));
}

#[test]
fn test_title_falls_back_to_key() {
    let record = make_record("misc", "untitled2020", &[]);
    let doc = TypeAndFieldMapper::default().to_document(&record).unwrap();
    assert_eq!(doc.title(), "untitled2020");
}

#[test]
fn test_missing_title_and_key_is_rejected() {
    let record = bibo_bridge::BibtexRecord::new("misc");
    assert!(matches!(
        TypeAndFieldMapper::default().to_document(&record),
        Err(ConversionError::MissingRequiredField(_))
    ));
}

// ============================================================================
// Type-Dependent Fields
// ============================================================================

#[test]
fn test_thesis_school_is_publisher() {
    let doc = TypeAndFieldMapper::default()
        .to_document(&create_test_thesis())
        .unwrap();
    assert_eq!(doc.publisher(), Some("Massachusetts Institute of Technology"));
    assert_eq!(doc.place_of_publication(), Some("Cambridge, MA"));
    assert_eq!(doc.conference_location(), None);
    assert_eq!(doc.contributors_with_role(Role::Advisor).count(), 1);
}

#[test]
fn test_manual_organization_becomes_publisher() {
    let record = make_record("manual", "m1", &[("title", "User Guide"), ("organization", "Acme")]);
    let mapper = TypeAndFieldMapper::default();
    let doc = mapper.to_document(&record).unwrap();
    assert_eq!(doc.publisher(), Some("Acme"));
    assert_eq!(doc.organization(), Some("Acme"));

    let back = mapper.from_document(&doc).unwrap();
    assert_eq!(back.get_field("organization"), Some("Acme"));
    assert_eq!(back.get_field("publisher"), None);
}

#[test]
fn test_article_journaltitle_fallback() {
    let record = make_record("article", "a", &[("title", "T"), ("journaltitle", "J. Things")]);
    let doc = TypeAndFieldMapper::default().to_document(&record).unwrap();
    assert_eq!(doc.container_title(), Some("J. Things"));
}

#[test]
fn test_issue_falls_back_to_issue_field() {
    let record = make_record("article", "a", &[("title", "T"), ("issue", "7")]);
    let doc = TypeAndFieldMapper::default().to_document(&record).unwrap();
    assert_eq!(doc.issue(), Some("7"));
}

#[test]
fn test_book_section_without_container_is_inbook() {
    let doc = BibliographicDocument::builder(DocumentType::BookSection, "Chapter 3")
        .build()
        .unwrap();
    let record = TypeAndFieldMapper::default().from_document(&doc).unwrap();
    assert_eq!(record.entry_type, "inbook");

    let with_container = doc.to_builder().container_title("Collected Essays").build().unwrap();
    let record = TypeAndFieldMapper::default()
        .from_document(&with_container)
        .unwrap();
    assert_eq!(record.entry_type, "incollection");
    assert_eq!(record.get_field("booktitle"), Some("Collected Essays"));
}

#[test]
fn test_thesis_degree_type_selects_entry_type() {
    let mapper = TypeAndFieldMapper::default();
    let masters = BibliographicDocument::builder(DocumentType::Thesis, "T")
        .degree_type("Master of Science")
        .build()
        .unwrap();
    let record = mapper.from_document(&masters).unwrap();
    assert_eq!(record.entry_type, "mastersthesis");
    assert_eq!(record.get_field("type"), Some("Master of Science"));

    let doctoral = masters.to_builder().degree_type("Dr. rer. nat.").build().unwrap();
    assert_eq!(mapper.from_document(&doctoral).unwrap().entry_type, "phdthesis");
}

// ============================================================================
// Dates
// ============================================================================

#[test]
fn test_month_names_and_numbers() {
    let mapper = TypeAndFieldMapper::default();
    for month in ["mar", "March", "3", "03"] {
        let record = make_record("misc", "k", &[("year", "1999"), ("month", month)]);
        let date = *mapper.to_document(&record).unwrap().date().unwrap();
        assert_eq!(date, PublicationDate::new(1999, Some(3), None).unwrap(), "month {month}");
    }
}

#[test]
fn test_unreadable_month_is_rejected() {
    let record = make_record("misc", "k", &[("year", "1999"), ("month", "Smarch")]);
    assert!(matches!(
        TypeAndFieldMapper::default().to_document(&record),
        Err(ConversionError::InvalidFieldValue { .. })
    ));
}

#[test]
fn test_day_without_month_is_rejected() {
    let mapper = TypeAndFieldMapper::default();
    let record = make_record("misc", "k", &[("year", "2020"), ("day", "5")]);
    assert!(matches!(
        mapper.to_document(&record),
        Err(ConversionError::InvalidDate { month: None, day: Some(5), .. })
    ));
    assert!(mapper.validate(&record).is_err());

    let bad_day = make_record("misc", "k", &[("year", "2020"), ("month", "5"), ("day", "fifth")]);
    assert!(matches!(
        mapper.to_document(&bad_day),
        Err(ConversionError::InvalidFieldValue { .. })
    ));
}

#[test]
fn test_month_names_in_date_field() {
    let mapper = TypeAndFieldMapper::default();
    let cases = [
        ("March 2020", (2020, Some(3), None)),
        ("Sept. 1999", (1999, Some(9), None)),
        ("2001-12", (2001, Some(12), None)),
    ];
    for (text, expected) in cases {
        let record = make_record("misc", "k", &[("date", text)]);
        let date = *mapper.to_document(&record).unwrap().date().unwrap();
        assert_eq!((date.year(), date.month(), date.day()), expected, "date {text}");
    }
}

#[test]
fn test_date_field_takes_precedence_over_year() {
    let record = make_record("misc", "k", &[("date", "2001-09-11"), ("year", "1990")]);
    let doc = TypeAndFieldMapper::default().to_document(&record).unwrap();
    assert_eq!(doc.date().unwrap().to_string(), "2001-09-11");
}

#[test]
fn test_impossible_calendar_date_is_rejected() {
    let record = make_record("misc", "k", &[("date", "2023-02-30")]);
    assert!(matches!(
        TypeAndFieldMapper::default().to_document(&record),
        Err(ConversionError::InvalidDate { .. })
    ));
}

#[test]
fn test_free_form_year() {
    let record = make_record("misc", "k", &[("year", "circa 1850")]);
    let doc = TypeAndFieldMapper::default().to_document(&record).unwrap();
    assert_eq!(doc.date().unwrap().year(), 1850);
}

#[test]
fn test_future_year_policy() {
    let record = make_record("misc", "k", &[("year", "2999")]);

    assert!(TypeAndFieldMapper::default().to_document(&record).is_ok());

    let strict = TypeAndFieldMapper::new(BiboConfig::new().with_future_dates(false));
    assert!(matches!(
        strict.to_document(&record),
        Err(ConversionError::InvalidDate { year: 2999, .. })
    ));
}

// ============================================================================
// Identifiers
// ============================================================================

#[test]
fn test_identifiers_are_normalized() {
    let record = make_record(
        "book",
        "k",
        &[
            ("title", "T"),
            ("doi", "https://doi.org/10.1000/ABC"),
            ("isbn", "978-0-306-40615-7"),
            ("issn", "03785955"),
            ("hdl", "hdl:1721.1/12345"),
        ],
    );
    let doc = TypeAndFieldMapper::default().to_document(&record).unwrap();

    let value = |kind| doc.identifier_of(kind).map(Identifier::value);
    assert_eq!(value(IdentifierType::Doi), Some("10.1000/ABC"));
    assert_eq!(value(IdentifierType::Isbn13), Some("9780306406157"));
    assert_eq!(value(IdentifierType::Issn), Some("0378-5955"));
    assert_eq!(value(IdentifierType::Handle), Some("1721.1/12345"));
}

#[test]
fn test_strict_mode_rejects_bad_isbn() {
    let record = make_record("book", "k", &[("title", "T"), ("isbn", "978-0-306-40615-8")]);
    let err = TypeAndFieldMapper::default().to_document(&record).unwrap_err();
    match err {
        ConversionError::InvalidIdentifier { field, value, .. } => {
            assert_eq!(field, "isbn");
            assert_eq!(value, "978-0-306-40615-8");
        },
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_lenient_mode_drops_bad_identifiers() {
    common::init_tracing();
    let record = make_record(
        "book",
        "k",
        &[
            ("title", "T"),
            ("isbn", "not an isbn"),
            ("doi", "10.1000/ok"),
            ("url", "not a url"),
        ],
    );
    let doc = lenient().to_document(&record).unwrap();
    assert_eq!(doc.identifiers().len(), 1);
    assert_eq!(doc.identifiers()[0].kind(), IdentifierType::Doi);
    assert_eq!(doc.url(), Some("not a url"));
}

#[test]
fn test_validate_matches_to_document() {
    let mapper = TypeAndFieldMapper::default();
    assert!(mapper.validate(&create_test_article()).is_ok());

    let bad = make_record("article", "k", &[("title", "T"), ("issn", "1234-5678")]);
    assert!(mapper.validate(&bad).is_err());
    assert!(mapper.to_document(&bad).is_err());
    assert!(lenient().validate(&bad).is_ok());
}

// ============================================================================
// Document → Record
// ============================================================================

#[test]
fn test_generated_key_when_identifier_missing() {
    let doc = BibliographicDocument::builder(DocumentType::Book, "The Art of Programming")
        .contributor(Contributor::parse("Donald E. Knuth", Role::Author))
        .date(PublicationDate::from_year(1968).unwrap())
        .build()
        .unwrap();

    let author_year = TypeAndFieldMapper::default().from_document(&doc).unwrap();
    assert_eq!(author_year.key(), Some("knuth_1968"));

    let author_title = TypeAndFieldMapper::new(
        BiboConfig::new().with_key_strategy(KeyStrategy::AuthorTitle),
    )
    .from_document(&doc)
    .unwrap();
    assert_eq!(author_title.key(), Some("knuth_art"));
}

#[test]
fn test_invalid_identifier_is_not_used_as_key() {
    let doc = BibliographicDocument::builder(DocumentType::Book, "Spaces")
        .identifier("has spaces in it")
        .contributor(Contributor::parse("Ann Lee", Role::Author))
        .date(PublicationDate::from_year(2001).unwrap())
        .build()
        .unwrap();
    let record = TypeAndFieldMapper::default().from_document(&doc).unwrap();
    assert_eq!(record.key(), Some("lee_2001"));
}

#[test]
fn test_uri_identifiers_have_no_bibtex_field() {
    let doc = BibliographicDocument::builder(DocumentType::Webpage, "Home")
        .add_identifier(Identifier::new(IdentifierType::Uri, "urn:isbn:0451450523").unwrap())
        .url("https://example.org/home")
        .build()
        .unwrap();
    let record = TypeAndFieldMapper::default().from_document(&doc).unwrap();
    assert_eq!(record.entry_type, "online");
    assert_eq!(record.get_field("url"), Some("https://example.org/home"));
    assert!(record.fields().all(|(_, v)| v != "urn:isbn:0451450523"));
}
