use crate::blank_node::BlankNode;
use crate::literal::Literal;
use crate::named_node::NamedNode;
use crate::triple::Triple;
use crate::{GraphName, TryFromTermError};
use std::fmt;

/// The subject position of a [`Triple`](crate::Triple).
///
/// RDF 1.2 allows a [triple term](https://www.w3.org/TR/rdf12-concepts/#dfn-triple-term) here,
/// hence the boxed `Triple` variant — this crate always compiles RDF 1.2 support in.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub enum Subject {
    NamedNode(NamedNode),
    BlankNode(BlankNode),
    Triple(Box<Triple>),
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NamedNode(node) => node.fmt(f),
            Self::BlankNode(node) => node.fmt(f),
            Self::Triple(triple) => write!(f, "<<{triple}>>"),
        }
    }
}

impl From<NamedNode> for Subject {
    #[inline]
    fn from(node: NamedNode) -> Self {
        Self::NamedNode(node)
    }
}

impl From<BlankNode> for Subject {
    #[inline]
    fn from(node: BlankNode) -> Self {
        Self::BlankNode(node)
    }
}

impl From<Triple> for Subject {
    #[inline]
    fn from(triple: Triple) -> Self {
        Self::Triple(Box::new(triple))
    }
}

impl From<Subject> for Term {
    #[inline]
    fn from(subject: Subject) -> Self {
        match subject {
            Subject::NamedNode(node) => Self::NamedNode(node),
            Subject::BlankNode(node) => Self::BlankNode(node),
            Subject::Triple(triple) => Self::Triple(triple),
        }
    }
}

impl TryFrom<Term> for Subject {
    type Error = TryFromTermError;

    #[inline]
    fn try_from(term: Term) -> Result<Self, Self::Error> {
        match term {
            Term::NamedNode(node) => Ok(Self::NamedNode(node)),
            Term::BlankNode(node) => Ok(Self::BlankNode(node)),
            Term::Triple(triple) => Ok(Self::Triple(triple)),
            Term::Literal(_) => Err(TryFromTermError::new(term, "Subject")),
        }
    }
}

/// An RDF [term](https://www.w3.org/TR/rdf11-concepts/#dfn-rdf-term): the union of named nodes,
/// blank nodes, literals, and (RDF 1.2) triple terms.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub enum Term {
    NamedNode(NamedNode),
    BlankNode(BlankNode),
    Literal(Literal),
    Triple(Box<Triple>),
}

impl Term {
    #[inline]
    pub fn is_named_node(&self) -> bool {
        matches!(self, Self::NamedNode(_))
    }

    #[inline]
    pub fn is_blank_node(&self) -> bool {
        matches!(self, Self::BlankNode(_))
    }

    #[inline]
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    #[inline]
    pub fn is_triple(&self) -> bool {
        matches!(self, Self::Triple(_))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NamedNode(node) => node.fmt(f),
            Self::BlankNode(node) => node.fmt(f),
            Self::Literal(literal) => literal.fmt(f),
            Self::Triple(triple) => write!(f, "<<{triple}>>"),
        }
    }
}

impl From<NamedNode> for Term {
    #[inline]
    fn from(node: NamedNode) -> Self {
        Self::NamedNode(node)
    }
}

impl From<BlankNode> for Term {
    #[inline]
    fn from(node: BlankNode) -> Self {
        Self::BlankNode(node)
    }
}

impl From<Literal> for Term {
    #[inline]
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

impl From<Triple> for Term {
    #[inline]
    fn from(triple: Triple) -> Self {
        Self::Triple(Box::new(triple))
    }
}

impl TryFrom<Term> for NamedNode {
    type Error = TryFromTermError;

    #[inline]
    fn try_from(term: Term) -> Result<Self, Self::Error> {
        if let Term::NamedNode(node) = term {
            Ok(node)
        } else {
            Err(TryFromTermError::new(term, "NamedNode"))
        }
    }
}

impl TryFrom<Term> for Literal {
    type Error = TryFromTermError;

    #[inline]
    fn try_from(term: Term) -> Result<Self, Self::Error> {
        if let Term::Literal(literal) = term {
            Ok(literal)
        } else {
            Err(TryFromTermError::new(term, "Literal"))
        }
    }
}

impl From<GraphName> for Term {
    #[inline]
    fn from(graph_name: GraphName) -> Self {
        match graph_name {
            GraphName::NamedNode(node) => Self::NamedNode(node),
            GraphName::BlankNode(node) => Self::BlankNode(node),
            GraphName::DefaultGraph => {
                Self::NamedNode(NamedNode::new_unchecked("urn:x-rdf-model:default-graph"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NamedNode;

    #[test]
    fn triple_term_display() {
        let inner = Triple::new(
            NamedNode::new("http://example.com/s").unwrap(),
            NamedNode::new("http://example.com/p").unwrap(),
            NamedNode::new("http://example.com/o").unwrap(),
        );
        let term = Term::from(inner);
        assert_eq!(
            term.to_string(),
            "<<<http://example.com/s> <http://example.com/p> <http://example.com/o>>>"
        );
    }

    #[test]
    fn term_to_subject_rejects_literal() {
        let err: TryFromTermError = Subject::try_from(Term::Literal(
            crate::Literal::new_simple_literal("x"),
        ))
        .unwrap_err();
        assert_eq!(err.to_string(), "\"x\" can not be converted to a Subject");
    }
}
