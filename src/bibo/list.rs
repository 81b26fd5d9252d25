//! Ordered contributor relations encoded as RDF lists.
//!
//! A triple graph is unordered, so author and editor order is kept with the
//! `rdf:first`/`rdf:rest` list idiom: one fresh blank list node per
//! contributor, linked head to tail and terminated by `rdf:nil`.
//!
//! ```text
//! <doc> bibo:authorList _:l1 .
//! _:l1  rdf:first _:p1 ; rdf:rest _:l2 .
//! _:l2  rdf:first _:p2 ; rdf:rest rdf:nil .
//! ```
//!
//! Authors go under `bibo:authorList`, editors under `bibo:editorList`, and
//! every other role gets its own `bibo:contributorList`. Each person is also
//! linked from the document with the relator predicate of its role, which is
//! how roles inside a `bibo:contributorList` are told apart on decode.

use std::collections::HashSet;

use tracing::warn;

use crate::document::{BibliographicDocument, Contributor, Role};
use crate::person_name::PersonName;

use super::namespaces::{
    self, classes, list_predicate, properties, relator_predicate, FOAF, RDF, SCHEMA,
};
use super::rdf::{RdfGraph, RdfNode, SubjectIndex};

/// Encode `items` as an RDF list and return its head.
///
/// The list is built tail to head; an empty slice yields `rdf:nil`.
pub fn encode_list(graph: &mut RdfGraph, items: &[RdfNode]) -> RdfNode {
    let first = namespaces::iri(RDF, properties::rdf::FIRST);
    let rest = namespaces::iri(RDF, properties::rdf::REST);

    items.iter().rev().fold(RdfNode::nil(), |tail, item| {
        let node = graph.new_blank_node();
        graph.add(node.clone(), first.as_str(), item.clone());
        graph.add(node.clone(), rest.as_str(), tail);
        node
    })
}

/// Walk the list starting at `head` and collect its members in order.
///
/// Stops with a warning on a cycle or on a node without `rdf:first`.
#[must_use]
pub fn decode_list<'a>(index: &SubjectIndex<'a>, head: &'a RdfNode) -> Vec<&'a RdfNode> {
    let first = namespaces::iri(RDF, properties::rdf::FIRST);
    let rest = namespaces::iri(RDF, properties::rdf::REST);
    let nil = RdfNode::nil();

    let mut members = Vec::new();
    let mut visited: HashSet<&RdfNode> = HashSet::new();
    let mut current = head;

    while *current != nil {
        if !visited.insert(current) {
            warn!(node = ?current, "cycle in RDF list; truncating");
            break;
        }
        let Some(member) = index.object(current, &first) else {
            warn!(node = ?current, "RDF list node without rdf:first; truncating");
            break;
        };
        members.push(member);
        match index.object(current, &rest) {
            Some(next) => current = next,
            None => {
                warn!(node = ?current, "RDF list node without rdf:rest; truncating");
                break;
            },
        }
    }

    members
}

/// Emit person resources and role lists for all contributors of `doc`.
pub fn encode_contributors(graph: &mut RdfGraph, subject: &RdfNode, doc: &BibliographicDocument) {
    for role in Role::ALL {
        let persons: Vec<RdfNode> = doc
            .contributors_with_role(role)
            .map(|contributor| {
                let person = encode_person(graph, contributor);
                graph.add(subject.clone(), relator_predicate(role), person.clone());
                person
            })
            .collect();

        if persons.is_empty() {
            continue;
        }

        let head = encode_list(graph, &persons);
        graph.add(subject.clone(), list_predicate(role), head);
    }
}

/// Read back all contributors of `subject` in list order, authors first,
/// then editors, then the remaining roles.
#[must_use]
pub fn decode_contributors(index: &SubjectIndex<'_>, subject: &RdfNode) -> Vec<Contributor> {
    let mut contributors = Vec::new();

    for role in [Role::Author, Role::Editor] {
        let predicate = list_predicate(role);
        for head in index.objects(subject, &predicate) {
            contributors.extend(
                decode_list(index, head)
                    .into_iter()
                    .map(|person| decode_person(index, person, role)),
            );
        }
    }

    let generic = namespaces::iri(namespaces::BIBO, properties::bibo::CONTRIBUTOR_LIST);
    let relators: Vec<(Role, Vec<&RdfNode>)> = Role::ALL
        .into_iter()
        .map(|role| (role, index.objects(subject, &relator_predicate(role)).collect()))
        .collect();

    for head in index.objects(subject, &generic) {
        for person in decode_list(index, head) {
            let role = relators
                .iter()
                .filter(|(role, _)| !matches!(role, Role::Author | Role::Editor))
                .find(|(_, persons)| persons.contains(&person))
                .map_or(Role::Contributor, |(role, _)| *role);
            contributors.push(decode_person(index, person, role));
        }
    }

    contributors
}

fn encode_person(graph: &mut RdfGraph, contributor: &Contributor) -> RdfNode {
    let person = graph.new_blank_node();
    let name = contributor.name();
    let foaf = |local: &str| namespaces::iri(FOAF, local);

    graph.add(
        person.clone(),
        namespaces::iri(RDF, properties::rdf::TYPE),
        RdfNode::term(FOAF, classes::PERSON),
    );
    graph.add(
        person.clone(),
        foaf(properties::foaf::NAME),
        RdfNode::literal(name.full_name()),
    );
    if let Some(given) = name.given_name() {
        graph.add(
            person.clone(),
            foaf(properties::foaf::GIVEN_NAME),
            RdfNode::literal(given),
        );
    }
    if let Some(family) = name.family_name() {
        graph.add(
            person.clone(),
            foaf(properties::foaf::FAMILY_NAME),
            RdfNode::literal(family),
        );
    }
    if let Some(affiliation) = contributor.affiliation() {
        graph.add(
            person.clone(),
            namespaces::iri(SCHEMA, properties::schema::AFFILIATION),
            RdfNode::literal(affiliation),
        );
    }
    person
}

fn decode_person(index: &SubjectIndex<'_>, person: &RdfNode, role: Role) -> Contributor {
    let foaf = |local: &str| namespaces::iri(FOAF, local);
    let given = index.literal(person, &foaf(properties::foaf::GIVEN_NAME));
    let family = index.literal(person, &foaf(properties::foaf::FAMILY_NAME));

    let full = index
        .literal(person, &foaf(properties::foaf::NAME))
        .map(String::from)
        .unwrap_or_else(|| {
            [given, family]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" ")
        });

    let mut name = PersonName::parse(&full);
    if let Some(given) = given {
        name = name.with_given_name(Some(given.to_string()));
    }
    if let Some(family) = family {
        name = name.with_family_name(Some(family.to_string()));
    }

    let contributor = Contributor::new(name, role);
    match index.literal(person, &namespaces::iri(SCHEMA, properties::schema::AFFILIATION)) {
        Some(affiliation) => contributor.with_affiliation(affiliation),
        None => contributor,
    }
}
