//! BIBO round-trip tests.
//!
//! These tests verify that BibTeX → BIBO → BibTeX conversion preserves
//! entry types, type-dependent fields, contributor order and identifiers,
//! including after a trip through serialized RDF.

mod common;

use bibo_bridge::bibo::{
    convert_all_from_graph, convert_all_to_bibo, convert_to_bibo, document_to_graph,
    documents_from_graph, BiboConfig, RdfFormat, RdfGraph,
};
use bibo_bridge::{BibtexRecord, TypeAndFieldMapper};
use common::{
    create_test_article, create_test_conference_paper, create_test_thesis, make_config,
    make_record,
};

fn roundtrip(record: &BibtexRecord, config: &BiboConfig) -> BibtexRecord {
    let graph = convert_to_bibo(record, config).expect("conversion failed");
    let mut records = convert_all_from_graph(&graph, config).expect("reverse conversion failed");
    assert_eq!(records.len(), 1, "expected exactly one document");
    records.remove(0)
}

fn roundtrip_via(record: &BibtexRecord, format: RdfFormat) -> BibtexRecord {
    let config = make_config();
    let text = convert_to_bibo(record, &config)
        .expect("conversion failed")
        .serialize(format)
        .expect("serialization failed");
    let graph = RdfGraph::parse(&text, format).expect("parse failed");
    let mut records = convert_all_from_graph(&graph, &config).expect("reverse conversion failed");
    assert_eq!(records.len(), 1);
    records.remove(0)
}

// ============================================================================
// Round-Trip Tests: Articles
// ============================================================================

#[test]
fn test_roundtrip_article_fields() {
    let result = roundtrip(&create_test_article(), &BiboConfig::default());

    assert_eq!(result.entry_type, "article");
    assert_eq!(result.key(), Some("lee2019"));
    assert_eq!(result.get_field("title"), Some("Ordered Lists in Unordered Graphs"));
    assert_eq!(result.get_field("journal"), Some("Journal of Graph Encodings"));
    assert_eq!(result.get_field("volume"), Some("12"));
    assert_eq!(result.get_field("number"), Some("3"));
    assert_eq!(result.get_field("pages"), Some("101--120"));
    assert_eq!(result.get_field("year"), Some("2019"));
    assert_eq!(result.get_field("month"), Some("6"));
    assert_eq!(result.get_field("doi"), Some("10.1000/graphs.2019.3"));
    assert_eq!(result.get_field("keywords"), Some("rdf, ordering, lists"));
}

#[test]
fn test_roundtrip_preserves_author_order() {
    let result = roundtrip(&create_test_article(), &BiboConfig::default());
    assert_eq!(
        result.get_field("author"),
        Some("Lee, Ann and Kim, Bo and Park, Cy")
    );
}

#[test]
fn test_roundtrip_many_authors_keeps_order() {
    let names: Vec<String> = (1..=25).map(|i| format!("Author{i:02}, Given")).collect();
    let joined = names.join(" and ");
    let record = make_record("article", "many", &[("title", "Crowded"), ("author", &joined)]);

    let result = roundtrip(&record, &BiboConfig::default());
    assert_eq!(result.get_field("author"), Some(joined.as_str()));
}

// ============================================================================
// Round-Trip Tests: Type-Dependent Fields
// ============================================================================

#[test]
fn test_roundtrip_thesis_school_and_advisor() {
    let result = roundtrip(&create_test_thesis(), &BiboConfig::default());

    assert_eq!(result.entry_type, "phdthesis");
    assert_eq!(
        result.get_field("school"),
        Some("Massachusetts Institute of Technology")
    );
    assert_eq!(result.get_field("publisher"), None);
    assert_eq!(result.get_field("address"), Some("Cambridge, MA"));
    assert_eq!(result.get_field("author"), Some("Doe, Jane"));
    assert_eq!(result.get_field("advisor"), Some("Richard Roe"));
    assert_eq!(result.get_field("type"), None);
}

#[test]
fn test_roundtrip_masters_thesis_default_degree() {
    let record = make_record(
        "mastersthesis",
        "roe2018",
        &[("title", "A Study"), ("author", "Roe, Rick"), ("school", "ETH")],
    );
    let result = roundtrip(&record, &BiboConfig::default());

    assert_eq!(result.entry_type, "mastersthesis");
    assert_eq!(result.get_field("type"), None);
    assert_eq!(result.get_field("school"), Some("ETH"));
}

#[test]
fn test_roundtrip_conference_paper() {
    let result = roundtrip(&create_test_conference_paper(), &BiboConfig::default());

    assert_eq!(result.entry_type, "inproceedings");
    assert_eq!(
        result.get_field("booktitle"),
        Some("Proceedings of the Linked Data Workshop")
    );
    assert_eq!(result.get_field("address"), Some("Berlin, Germany"));
    assert_eq!(result.get_field("organization"), Some("ACM"));
    assert_eq!(result.get_field("publisher"), Some("ACM Press"));
    assert_eq!(result.get_field("author"), Some("John Smith and Mary Major"));
    assert_eq!(result.get_field("editor"), Some("Ed Itor"));
}

#[test]
fn test_roundtrip_techreport_institution() {
    let record = make_record(
        "techreport",
        "cern2020",
        &[
            ("title", "Annual Report"),
            ("institution", "CERN"),
            ("number", "TR-42"),
            ("year", "2020"),
        ],
    );
    let result = roundtrip(&record, &BiboConfig::default());

    assert_eq!(result.entry_type, "techreport");
    assert_eq!(result.get_field("institution"), Some("CERN"));
    assert_eq!(result.get_field("number"), Some("TR-42"));
}

#[test]
fn test_roundtrip_unknown_type_becomes_misc() {
    let record = make_record("dataset", "d1", &[("title", "Numbers")]);
    let result = roundtrip(&record, &BiboConfig::default());
    assert_eq!(result.entry_type, "misc");
}

// ============================================================================
// Round-Trip Tests: Text Encoding
// ============================================================================

#[test]
fn test_roundtrip_latex_accents() {
    let record = make_record(
        "book",
        "godel1931",
        &[
            ("title", r#"{\"U}ber formal unentscheidbare S{\"a}tze"#),
            ("author", r#"Kurt G{\"o}del"#),
        ],
    );
    let config = BiboConfig::default();

    let doc = TypeAndFieldMapper::new(config.clone()).to_document(&record).unwrap();
    assert_eq!(doc.title(), "Über formal unentscheidbare Sätze");
    assert_eq!(doc.authors()[0].name().family_name(), Some("Gödel"));

    let result = roundtrip(&record, &config);
    assert_eq!(result.get_field("author"), Some(r#"Kurt G{\"o}del"#));
}

#[test]
fn test_roundtrip_without_latex_decoding_is_verbatim() {
    let record = make_record("book", "raw", &[("title", r"Caf\'e"), ("author", "Doe, Jane")]);
    let config = BiboConfig::new().with_latex_decoding(false);
    let result = roundtrip(&record, &config);
    assert_eq!(result.get_field("title"), Some(r"Caf\'e"));
}

// ============================================================================
// Round-Trip Tests: Serialized RDF
// ============================================================================

#[test]
fn test_roundtrip_through_ntriples() {
    let result = roundtrip_via(&create_test_article(), RdfFormat::NTriples);
    assert_eq!(result.key(), Some("lee2019"));
    assert_eq!(
        result.get_field("author"),
        Some("Lee, Ann and Kim, Bo and Park, Cy")
    );
    assert_eq!(result.get_field("year"), Some("2019"));
    assert_eq!(result.get_field("month"), Some("6"));
}

#[test]
fn test_roundtrip_through_turtle() {
    let result = roundtrip_via(&create_test_conference_paper(), RdfFormat::Turtle);
    assert_eq!(result.entry_type, "inproceedings");
    assert_eq!(result.get_field("author"), Some("John Smith and Mary Major"));
    assert_eq!(result.get_field("address"), Some("Berlin, Germany"));
}

#[test]
fn test_roundtrip_through_rdfxml() {
    let result = roundtrip_via(&create_test_thesis(), RdfFormat::RdfXml);
    assert_eq!(result.entry_type, "phdthesis");
    assert_eq!(result.get_field("advisor"), Some("Richard Roe"));
}

// ============================================================================
// Round-Trip Tests: Multiple Documents
// ============================================================================

#[test]
fn test_merged_graph_yields_every_document() {
    let config = make_config();
    let mapper = TypeAndFieldMapper::new(config.clone());

    let mut graph = RdfGraph::new();
    for record in [create_test_article(), create_test_thesis(), create_test_conference_paper()] {
        let doc = mapper.to_document(&record).unwrap();
        graph.extend(document_to_graph(&doc, &config));
    }

    let docs = documents_from_graph(&graph);
    let titles: Vec<&str> = docs.iter().map(|d| d.title()).collect();
    assert_eq!(
        titles,
        vec![
            "Ordered Lists in Unordered Graphs",
            "On the Semantics of Citation",
            "Bridging Bibliographies",
        ]
    );
    assert_eq!(docs[0].authors().len(), 3);
    assert_eq!(docs[1].authors().len(), 1);
    assert_eq!(docs[2].authors().len(), 2);
}

#[test]
fn test_duplicate_keys_are_suffixed() {
    common::init_tracing();
    let config = BiboConfig::default();
    let first = convert_to_bibo(&create_test_article(), &config).unwrap();
    let mut graph = convert_to_bibo(&create_test_article(), &config).unwrap();
    graph.extend(first);

    let records = convert_all_from_graph(&graph, &config).unwrap();
    let keys: Vec<&str> = records.iter().filter_map(BibtexRecord::key).collect();
    assert_eq!(keys, vec!["lee2019", "lee2019_2"]);
}

#[test]
fn test_shared_key_under_base_uri_stays_two_documents() {
    common::init_tracing();
    let config = make_config();
    let first = make_record("article", "k", &[("title", "A"), ("author", "Ann One")]);
    let second = make_record("article", "k", &[("title", "B"), ("author", "Bob Two")]);

    let graph = convert_all_to_bibo([&first, &second], &config).unwrap();
    let records = convert_all_from_graph(&graph, &config).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get_field("title"), Some("A"));
    assert_eq!(records[0].get_field("author"), Some("Ann One"));
    assert_eq!(records[1].get_field("title"), Some("B"));
    assert_eq!(records[1].get_field("author"), Some("Bob Two"));

    let keys: Vec<&str> = records.iter().filter_map(BibtexRecord::key).collect();
    assert_eq!(keys, vec!["k", "k_2"]);

    let nt = graph.serialize(RdfFormat::NTriples).unwrap();
    assert!(nt.contains("<http://example.org/bib/k>"));
    assert!(nt.contains("<http://example.org/bib/k_2>"));
}

// ============================================================================
// Named Resources
// ============================================================================

/// An article whose document, list cells, people and journal are named by
/// `node`. The second author list cell is written before the first.
fn described_article(node: impl Fn(&str) -> String) -> String {
    let rdf = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    let bibo = "http://purl.org/ontology/bibo/";
    let dc = "http://purl.org/dc/terms/";
    let foaf = "http://xmlns.com/foaf/0.1/";
    let (doc, journal) = (node("doc/1"), node("journal/1"));
    let (cell1, cell2, editors) = (node("list/1"), node("list/2"), node("list/3"));
    let (ann, bo) = (node("person/1"), node("person/2"));

    format!(
        r#"{doc} <{rdf}type> <{bibo}Document> .
{doc} <{rdf}type> <{bibo}Article> .
{doc} <{dc}title> "Named Nodes in Practice" .
{doc} <{dc}identifier> "named2022" .
{doc} <{dc}isPartOf> {journal} .
{journal} <{dc}title> "Journal of Examples" .
{doc} <{bibo}authorList> {cell1} .
{cell2} <{rdf}first> {bo} .
{cell2} <{rdf}rest> <{rdf}nil> .
{cell1} <{rdf}first> {ann} .
{cell1} <{rdf}rest> {cell2} .
{doc} <{bibo}editorList> {editors} .
{editors} <{rdf}first> {ann} .
{editors} <{rdf}rest> <{rdf}nil> .
{ann} <{foaf}name> "Ann Lee" .
{bo} <{foaf}givenName> "Bo" .
{bo} <{foaf}familyName> "Kim" .
"#
    )
}

#[test]
fn test_named_resources_decode_like_blank_nodes() {
    let named_text = described_article(|name| format!("<http://ex/{name}>"));
    let named = documents_from_graph(&RdfGraph::parse(&named_text, RdfFormat::NTriples).unwrap());

    assert_eq!(named.len(), 1);
    let doc = &named[0];
    assert_eq!(doc.title(), "Named Nodes in Practice");
    assert_eq!(doc.identifier(), Some("named2022"));
    assert_eq!(doc.container_title(), Some("Journal of Examples"));

    let authors: Vec<&str> = doc.authors().iter().map(|c| c.name().full_name()).collect();
    assert_eq!(authors, vec!["Ann Lee", "Bo Kim"]);
    assert_eq!(doc.authors()[1].name().given_name(), Some("Bo"));
    assert_eq!(doc.authors()[1].name().family_name(), Some("Kim"));
    assert_eq!(doc.editors().len(), 1);
    assert_eq!(doc.editors()[0].name().full_name(), "Ann Lee");

    let blank_text = described_article(|name| format!("_:{}", name.replace('/', "_")));
    let blank = documents_from_graph(&RdfGraph::parse(&blank_text, RdfFormat::NTriples).unwrap());
    assert_eq!(blank, named);

    let record = TypeAndFieldMapper::default().from_document(doc).unwrap();
    assert_eq!(record.key(), Some("named2022"));
    assert_eq!(record.get_field("journal"), Some("Journal of Examples"));
    assert_eq!(record.get_field("author"), Some("Ann Lee and Bo Kim"));
}
