//! End-to-end coverage of the public streaming contract: feed a complete RDF/XML document in,
//! collect the resulting quads, assert the exact set produced.

use rdf_model::vocab::rdf;
use rdf_model::{BlankNode, GraphName, Literal, NamedNode, Quad, Subject, Term, Triple};
use rdfxml::{RdfXmlParseError, RdfXmlParser};

fn quads(data: &str) -> Vec<Quad> {
    RdfXmlParser::new()
        .parse_read(data.as_bytes())
        .collect::<Result<_, _>>()
        .unwrap()
}

fn quads_with(parser: RdfXmlParser, data: &str) -> Vec<Quad> {
    parser
        .parse_read(data.as_bytes())
        .collect::<Result<_, _>>()
        .unwrap()
}

#[test]
fn plain_literal_property() {
    let data = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:dc="http://purl.org/dc/elements/1.1/">
 <rdf:Description rdf:about="http://example.com/foo">
   <dc:title>Foo</dc:title>
 </rdf:Description>
</rdf:RDF>"#;
    let quads = quads(data);
    assert_eq!(quads.len(), 1);
    assert_eq!(
        quads[0].subject,
        Subject::from(NamedNode::new_unchecked("http://example.com/foo"))
    );
    assert_eq!(quads[0].predicate, NamedNode::new_unchecked("http://purl.org/dc/elements/1.1/title"));
    assert_eq!(quads[0].object, Term::from(Literal::new_simple_literal("Foo")));
    assert_eq!(quads[0].graph_name, GraphName::DefaultGraph);
}

#[test]
fn typed_node_from_tag_name() {
    let data = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:ex="http://example.com/ns#">
 <ex:Person rdf:about="http://example.com/alice"/>
</rdf:RDF>"#;
    let quads = quads(data);
    assert_eq!(quads.len(), 1);
    assert_eq!(quads[0].predicate, *rdf::TYPE);
    assert_eq!(quads[0].object, Term::from(NamedNode::new_unchecked("http://example.com/ns#Person")));
}

#[test]
fn resource_property() {
    let data = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:ex="http://example.com/ns#">
 <rdf:Description rdf:about="http://example.com/s">
   <ex:knows rdf:resource="http://example.com/o"/>
 </rdf:Description>
</rdf:RDF>"#;
    let quads = quads(data);
    assert_eq!(quads.len(), 1);
    assert_eq!(quads[0].object, Term::from(NamedNode::new_unchecked("http://example.com/o")));
}

#[test]
fn parse_type_collection_produces_two_n_plus_one_quads() {
    let data = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:ex="http://example.com/ns#">
 <rdf:Description rdf:about="http://example.com/s">
   <ex:items rdf:parseType="Collection">
     <rdf:Description rdf:about="http://example.com/a"/>
     <rdf:Description rdf:about="http://example.com/b"/>
   </ex:items>
 </rdf:Description>
</rdf:RDF>"#;
    let quads = quads(data);
    assert_eq!(quads.len(), 5);
    let main = quads
        .iter()
        .find(|q| q.predicate.as_str() == "http://example.com/ns#items")
        .expect("main triple");
    let Term::BlankNode(first_link) = &main.object else {
        panic!("expected a blank node list head");
    };
    let first_firsts: Vec<_> = quads
        .iter()
        .filter(|q| q.subject == Subject::from(first_link.clone()) && q.predicate == *rdf::FIRST)
        .collect();
    assert_eq!(first_firsts.len(), 1);
    assert_eq!(first_firsts[0].object, Term::from(NamedNode::new_unchecked("http://example.com/a")));
    assert!(quads.iter().any(|q| q.predicate == *rdf::REST && q.object == Term::from(rdf::NIL.clone())));
}

#[test]
fn legacy_rdf_id_reification_adds_four_quads() {
    let data = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:ex="http://example.com/ns#">
 <rdf:Description rdf:about="http://example.com/s">
   <ex:p rdf:resource="http://example.com/o" rdf:ID="stmt"/>
 </rdf:Description>
</rdf:RDF>"#;
    let parser = RdfXmlParser::new().with_base_iri("http://example.com/").unwrap();
    let quads = quads_with(parser, data);
    assert_eq!(quads.len(), 5);
    let statement = Subject::from(NamedNode::new_unchecked("http://example.com/#stmt"));
    assert!(quads.iter().any(|q| q.subject == statement
        && q.predicate == *rdf::TYPE
        && q.object == Term::from(rdf::STATEMENT.clone())));
    assert!(quads.iter().any(|q| q.subject == statement && q.predicate == *rdf::SUBJECT));
    assert!(quads.iter().any(|q| q.subject == statement && q.predicate == *rdf::PREDICATE));
    assert!(quads.iter().any(|q| q.subject == statement && q.predicate == *rdf::OBJECT));
    assert!(quads.iter().any(|q| q.subject != statement && q.predicate.as_str() == "http://example.com/ns#p"));
}

#[test]
fn rdf12_annotation_produces_a_reifies_triple_term() {
    let data = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:ex="http://example.com/ns#">
 <rdf:Description rdf:about="http://example.com/s">
   <ex:p rdf:resource="http://example.com/o" rdf:annotationNodeID="ann"/>
 </rdf:Description>
</rdf:RDF>"#;
    let quads = quads(data);
    assert_eq!(quads.len(), 2);
    let inner = Triple::new(
        NamedNode::new_unchecked("http://example.com/s"),
        NamedNode::new_unchecked("http://example.com/ns#p"),
        NamedNode::new_unchecked("http://example.com/o"),
    );
    let annotation = quads
        .iter()
        .find(|q| q.predicate == *rdf::REIFIES)
        .expect("a rdf:reifies quad");
    assert_eq!(annotation.subject, Subject::from(BlankNode::new_unchecked("ann")));
    assert_eq!(annotation.object, Term::from(inner.clone()));
    assert!(quads.iter().any(|q| *q == inner.clone().in_graph(GraphName::DefaultGraph)));
}

#[test]
fn empty_document_produces_no_quads() {
    let data = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"/>"#;
    assert!(quads(data).is_empty());
}

#[test]
fn missing_outer_rdf_rdf_with_single_typed_root() {
    let data = r#"<ex:Person xmlns:ex="http://example.com/ns#" xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" rdf:about="http://example.com/alice"/>"#;
    let quads = quads(data);
    assert_eq!(quads.len(), 1);
    assert_eq!(quads[0].subject, Subject::from(NamedNode::new_unchecked("http://example.com/alice")));
    assert_eq!(quads[0].predicate, *rdf::TYPE);
    assert_eq!(quads[0].object, Term::from(NamedNode::new_unchecked("http://example.com/ns#Person")));
}

#[test]
fn doctype_entity_is_expanded_in_attribute_values() {
    let data = r#"<?xml version="1.0"?>
<!DOCTYPE rdf:RDF [<!ENTITY base "http://example.com/">]>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:ex="http://example.com/ns#">
 <rdf:Description rdf:about="&base;foo">
   <ex:p rdf:resource="&base;bar"/>
 </rdf:Description>
</rdf:RDF>"#;
    let quads = quads(data);
    assert_eq!(quads.len(), 1);
    assert_eq!(quads[0].subject, Subject::from(NamedNode::new_unchecked("http://example.com/foo")));
    assert_eq!(quads[0].object, Term::from(NamedNode::new_unchecked("http://example.com/bar")));
}

#[test]
fn empty_xml_lang_clears_inherited_language() {
    let data = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:dc="http://purl.org/dc/elements/1.1/">
 <rdf:Description rdf:about="http://example.com/s" xml:lang="en">
   <dc:title xml:lang="">Foo</dc:title>
 </rdf:Description>
</rdf:RDF>"#;
    let quads = quads(data);
    assert_eq!(quads.len(), 1);
    assert_eq!(quads[0].object, Term::from(Literal::new_simple_literal("Foo")));
}

#[test]
fn base_iri_fragment_is_truncated_before_merging() {
    let parser = RdfXmlParser::new().with_base_iri("http://example.com/foo#bar").unwrap();
    let data = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
 <rdf:Description rdf:about="baz"/>
</rdf:RDF>"#;
    assert!(quads_with(parser, data).is_empty());

    let data = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:ex="http://example.com/ns#">
 <rdf:Description rdf:about="baz">
   <ex:p rdf:resource=""/>
 </rdf:Description>
</rdf:RDF>"#;
    let parser = RdfXmlParser::new().with_base_iri("http://example.com/foo#bar").unwrap();
    let quads = quads_with(parser, data);
    assert_eq!(quads.len(), 1);
    assert_eq!(quads[0].subject, Subject::from(NamedNode::new_unchecked("http://example.com/baz")));
    assert_eq!(quads[0].object, Term::from(NamedNode::new_unchecked("http://example.com/foo")));
}

#[test]
fn parse_type_literal_keeps_embedded_namespace_declaration() {
    let data = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:ex="http://example.com/ns#">
 <rdf:Description rdf:about="http://example.com/s">
   <ex:value rdf:parseType="Literal"><p xmlns="http://www.w3.org/1999/xhtml">Hello</p></ex:value>
 </rdf:Description>
</rdf:RDF>"#;
    let quads = quads(data);
    assert_eq!(quads.len(), 1);
    let Term::Literal(literal) = &quads[0].object else {
        panic!("expected a literal object");
    };
    assert_eq!(literal.datatype(), &*rdf::XML_LITERAL);
    assert!(literal.value().contains("xmlns=\"http://www.w3.org/1999/xhtml\""));
    assert!(literal.value().contains("Hello"));
}

#[test]
fn parse_type_literal_injects_namespace_inherited_from_an_ancestor() {
    // `xhtml` is never redeclared inside the literal itself: it is only bound on the document
    // root, so the outermost serialized element must carry it for the literal to stand alone.
    let data = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:ex="http://example.com/ns#" xmlns:xhtml="http://www.w3.org/1999/xhtml">
 <rdf:Description rdf:about="http://example.com/s">
   <ex:value rdf:parseType="Literal"><xhtml:p>Hello<xhtml:br/>World</xhtml:p></ex:value>
 </rdf:Description>
</rdf:RDF>"#;
    let quads = quads(data);
    assert_eq!(quads.len(), 1);
    let Term::Literal(literal) = &quads[0].object else {
        panic!("expected a literal object");
    };
    assert_eq!(literal.datatype(), &*rdf::XML_LITERAL);
    assert!(literal.value().starts_with("<xhtml:p"));
    assert!(literal.value().contains("xmlns:xhtml=\"http://www.w3.org/1999/xhtml\""));
    // only the outermost element is made self-contained, not every descendant
    assert!(!literal.value()["<xhtml:p".len()..].contains("<xhtml:br xmlns"));
}

#[test]
fn syntax_error_reports_the_line_it_occurred_on() {
    let data = "<rdf:RDF xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\">\n  <rdf:Description rdf:about=\"http://example.com/s\">\n  </rdf:Wrong>\n</rdf:RDF>";
    let error = RdfXmlParser::new()
        .parse_read(data.as_bytes())
        .collect::<Result<Vec<Quad>, _>>()
        .unwrap_err();
    let RdfXmlParseError::Syntax(error) = error else {
        panic!("expected a syntax error");
    };
    let location = error.location().expect("position tracking is on by default");
    assert_eq!(location.start.line, 2);
}

#[test]
fn disabling_position_tracking_leaves_errors_without_a_location() {
    let data = "<rdf:RDF xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\">\n  </rdf:Wrong>\n</rdf:RDF>";
    let error = RdfXmlParser::new()
        .track_position(false)
        .parse_read(data.as_bytes())
        .collect::<Result<Vec<Quad>, _>>()
        .unwrap_err();
    let RdfXmlParseError::Syntax(error) = error else {
        panic!("expected a syntax error");
    };
    assert!(error.location().is_none());
}
