//! A minimal, owned-only RDF 1.2 term and quad data model: [`NamedNode`], [`BlankNode`],
//! [`Literal`] (including RDF 1.2 direction-tagged literals), [`Subject`], [`Term`] (including
//! RDF 1.2 triple terms), [`Triple`], [`GraphName`], and [`Quad`].
//!
//! This crate always compiles RDF 1.2 support (triple terms, `rdf:reifies`, direction-tagged
//! literals) in rather than gating it behind a Cargo feature.

mod blank_node;
mod literal;
mod named_node;
mod term;
mod triple;
pub mod vocab;

pub use crate::blank_node::{BlankNode, BlankNodeIdParseError};
pub use crate::literal::{BaseDirection, Literal};
pub use crate::named_node::NamedNode;
pub use crate::term::{Subject, Term};
pub use crate::triple::{GraphName, Quad, Triple, TryFromTermError};
pub use oxilangtag::LanguageTagParseError;
pub use oxiri::IriParseError;
