//! Ready-to-use [`NamedNode`](super::NamedNode)s for the vocabularies this crate needs.

pub mod rdf {
    //! [RDF](https://www.w3.org/TR/rdf11-concepts/) vocabulary, including the RDF 1.2 additions
    //! (`dirLangString`, `reifies`) this crate always compiles in.
    use crate::named_node::NamedNode;
    use std::sync::LazyLock;

    macro_rules! rdf_term {
        ($(#[$doc:meta])* $name:ident, $local:expr) => {
            $(#[$doc])*
            pub static $name: LazyLock<NamedNode> = LazyLock::new(|| {
                NamedNode::new_unchecked(concat!(
                    "http://www.w3.org/1999/02/22-rdf-syntax-ns#",
                    $local
                ))
            });
        };
    }

    rdf_term!(ALT, "Alt");
    rdf_term!(BAG, "Bag");
    rdf_term!(
        /// The class of direction-tagged string literal values (RDF 1.2).
        DIR_LANG_STRING, "dirLangString"
    );
    rdf_term!(FIRST, "first");
    rdf_term!(HTML, "HTML");
    rdf_term!(LANG_STRING, "langString");
    rdf_term!(LIST, "List");
    rdf_term!(NIL, "nil");
    rdf_term!(OBJECT, "object");
    rdf_term!(PREDICATE, "predicate");
    rdf_term!(PROPERTY, "Property");
    rdf_term!(
        /// Associates a reifier with the triple it reifies (RDF 1.2 annotation syntax).
        REIFIES, "reifies"
    );
    rdf_term!(REST, "rest");
    rdf_term!(SEQ, "Seq");
    rdf_term!(STATEMENT, "Statement");
    rdf_term!(SUBJECT, "subject");
    rdf_term!(TYPE, "type");
    rdf_term!(VALUE, "value");
    rdf_term!(XML_LITERAL, "XMLLiteral");

    /// Builds the `rdf:_n` membership property used by `rdf:li` and positional containers.
    pub fn li_member_property(n: u64) -> NamedNode {
        NamedNode::new_unchecked(format!(
            "http://www.w3.org/1999/02/22-rdf-syntax-ns#_{n}"
        ))
    }
}

pub mod xsd {
    //! The subset of the [XSD](https://www.w3.org/TR/xmlschema11-2/) datatype vocabulary this
    //! crate's literal constructors reference.
    use crate::named_node::NamedNode;
    use std::sync::LazyLock;

    macro_rules! xsd_term {
        ($name:ident, $local:expr) => {
            pub static $name: LazyLock<NamedNode> = LazyLock::new(|| {
                NamedNode::new_unchecked(concat!("http://www.w3.org/2001/XMLSchema#", $local))
            });
        };
    }

    xsd_term!(STRING, "string");
    xsd_term!(BOOLEAN, "boolean");
    xsd_term!(INTEGER, "integer");
    xsd_term!(FLOAT, "float");
    xsd_term!(DOUBLE, "double");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rdf_type_iri() {
        assert_eq!(rdf::TYPE.as_str(), "http://www.w3.org/1999/02/22-rdf-syntax-ns#type");
    }

    #[test]
    fn li_member_property_numbering() {
        assert_eq!(
            rdf::li_member_property(3).as_str(),
            "http://www.w3.org/1999/02/22-rdf-syntax-ns#_3"
        );
    }
}
