//! Common test helpers and utilities shared across test suite.

#![allow(dead_code)]

use bibo_bridge::bibo::{BiboConfig, RdfGraph};
use bibo_bridge::BibtexRecord;

/// Builds a record from an entry type, key and field list.
pub fn make_record(entry_type: &str, key: &str, fields: &[(&str, &str)]) -> BibtexRecord {
    fields
        .iter()
        .fold(BibtexRecord::builder(entry_type).key(key), |b, (name, value)| {
            b.field(*name, *value)
        })
        .build()
}

/// A journal article with three ordered authors and a DOI.
pub fn create_test_article() -> BibtexRecord {
    make_record(
        "article",
        "lee2019",
        &[
            ("title", "Ordered Lists in Unordered Graphs"),
            ("author", "Lee, Ann and Kim, Bo and Park, Cy"),
            ("journal", "Journal of Graph Encodings"),
            ("volume", "12"),
            ("number", "3"),
            ("pages", "101--120"),
            ("year", "2019"),
            ("month", "jun"),
            ("doi", "10.1000/graphs.2019.3"),
            ("keywords", "rdf, ordering; lists"),
        ],
    )
}

/// A PhD thesis with an advisor.
pub fn create_test_thesis() -> BibtexRecord {
    make_record(
        "phdthesis",
        "doe2020",
        &[
            ("title", "On the Semantics of Citation"),
            ("author", "Doe, Jane"),
            ("advisor", "Richard Roe"),
            ("school", "Massachusetts Institute of Technology"),
            ("address", "Cambridge, MA"),
            ("year", "2020"),
        ],
    )
}

/// A conference paper whose `address` and `organization` describe the event.
pub fn create_test_conference_paper() -> BibtexRecord {
    make_record(
        "inproceedings",
        "smith2021",
        &[
            ("title", "Bridging Bibliographies"),
            ("author", "John Smith and Mary Major"),
            ("editor", "Ed Itor"),
            ("booktitle", "Proceedings of the Linked Data Workshop"),
            ("address", "Berlin, Germany"),
            ("organization", "ACM"),
            ("publisher", "ACM Press"),
            ("year", "2021"),
        ],
    )
}

/// Installs a test-writer tracing subscriber once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Configuration minting subjects under `http://example.org/bib/`.
pub fn make_config() -> BiboConfig {
    BiboConfig::new().with_base_uri("http://example.org/bib/")
}

/// Counts triples with the given predicate IRI.
pub fn count_predicate(graph: &RdfGraph, predicate: &str) -> usize {
    graph.triples().filter(|t| t.predicate == predicate).count()
}
