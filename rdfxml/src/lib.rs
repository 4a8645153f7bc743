//! A streaming parser turning an [RDF/XML](https://www.w3.org/TR/rdf-syntax-grammar/) 1.1 or
//! 1.2 document into a stream of [`Quad`](rdf_model::Quad)s.
//!
//! ```
//! use rdfxml::RdfXmlParser;
//!
//! let file = br#"<?xml version="1.0"?>
//! <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:dc="http://purl.org/dc/elements/1.1/">
//!  <rdf:Description rdf:about="http://example.com/foo">
//!    <dc:title>Foo</dc:title>
//!  </rdf:Description>
//! </rdf:RDF>"#;
//!
//! let quads = RdfXmlParser::new()
//!     .parse_read(file.as_ref())
//!     .collect::<Result<Vec<_>, _>>()?;
//! assert_eq!(quads.len(), 1);
//! # Result::<_, rdfxml::RdfXmlParseError>::Ok(())
//! ```

mod error;
mod id_registry;
mod iri_resolve;
mod ncname;
mod parser;

pub use crate::error::{RdfXmlParseError, RdfXmlSyntaxError, TextPosition};
pub use crate::parser::{FromReadRdfXmlReader, IriValidationStrategy, RdfXmlParser};
#[cfg(feature = "async-tokio")]
pub use crate::parser::FromTokioAsyncReadRdfXmlReader;
