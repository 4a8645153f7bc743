use oxilangtag::LanguageTagParseError;
use oxiri::IriParseError;
use quick_xml::encoding::EncodingError;
use quick_xml::events::attributes::AttrError;
use std::io;
use std::ops::Range;
use std::sync::Arc;

/// Error returned while reading an RDF/XML document.
#[derive(Debug, thiserror::Error)]
pub enum RdfXmlParseError {
    /// I/O error while reading the underlying stream.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// An error in the document itself.
    #[error(transparent)]
    Syntax(#[from] RdfXmlSyntaxError),
}

impl From<RdfXmlParseError> for io::Error {
    #[inline]
    fn from(error: RdfXmlParseError) -> Self {
        match error {
            RdfXmlParseError::Io(error) => error,
            RdfXmlParseError::Syntax(error) => error.into(),
        }
    }
}

#[doc(hidden)]
impl From<quick_xml::Error> for RdfXmlParseError {
    #[inline]
    fn from(error: quick_xml::Error) -> Self {
        match error {
            quick_xml::Error::Io(error) => {
                Self::Io(Arc::try_unwrap(error).unwrap_or_else(|e| io::Error::new(e.kind(), e)))
            }
            _ => Self::Syntax(RdfXmlSyntaxError {
                inner: SyntaxErrorKind::Xml(error),
                position: None,
            }),
        }
    }
}

#[doc(hidden)]
impl From<EncodingError> for RdfXmlParseError {
    fn from(error: EncodingError) -> Self {
        quick_xml::Error::from(error).into()
    }
}

#[doc(hidden)]
impl From<AttrError> for RdfXmlParseError {
    fn from(error: AttrError) -> Self {
        quick_xml::Error::from(error).into()
    }
}

/// A position in the input: a zero-based `line`, a zero-based `column` (in code points), and a
/// zero-based byte `offset` from the start of the document.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct TextPosition {
    pub line: u64,
    pub column: u64,
    pub offset: u64,
}

/// An error in the syntax of the parsed document.
#[derive(Debug)]
pub struct RdfXmlSyntaxError {
    pub(crate) inner: SyntaxErrorKind,
    pub(crate) position: Option<Range<TextPosition>>,
}

impl std::fmt::Display for RdfXmlSyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(position) = &self.position {
            write!(
                f,
                "{} at line {}, column {}",
                self.inner, position.start.line, position.start.column
            )
        } else {
            write!(f, "{}", self.inner)
        }
    }
}

impl std::error::Error for RdfXmlSyntaxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.inner.source()
    }
}

/// The §7 error taxonomy, one arm per kind of document-level failure.
#[derive(Debug, thiserror::Error)]
pub(crate) enum SyntaxErrorKind {
    #[error(transparent)]
    Xml(#[from] quick_xml::Error),
    #[error("error while parsing IRI '{iri}': {error}")]
    InvalidIri {
        iri: String,
        #[source]
        error: IriParseError,
    },
    #[error("'{value}' is not a valid base IRI")]
    InvalidBaseIri { value: String },
    #[error("error while parsing language tag '{tag}': {error}")]
    InvalidLanguageTag {
        tag: String,
        #[source]
        error: LanguageTagParseError,
    },
    #[error("'{value}' is not a valid NCName")]
    InvalidNcName { value: String },
    #[error("'{value}' is not a valid direction, expected 'ltr' or 'rtl'")]
    InvalidDirection { value: String },
    #[error("{local} can not have both {first} and {second} set at the same time")]
    ConflictingSubject {
        local: &'static str,
        first: &'static str,
        second: &'static str,
    },
    #[error("{local} can not have both {first} and {second} set at the same time")]
    ConflictingProperty {
        local: &'static str,
        first: &'static str,
        second: &'static str,
    },
    #[error("{0} is not a valid node element tag name")]
    IllegalNodeName(String),
    #[error("{0} is not a valid property element tag name")]
    IllegalPropertyName(String),
    #[error("{0} is not supported by this parser")]
    Unsupported(&'static str),
    #[error("{0} has already been used as an rdf:ID value in this scope")]
    DuplicateId(String),
    #[error("rdf:parseType=\"Triple\" expects exactly one child node element, found {0}")]
    WrongTripleTermCount(usize),
    #[error("{0}")]
    Msg(String),
}

impl RdfXmlSyntaxError {
    pub(crate) fn msg(msg: impl Into<String>) -> Self {
        Self {
            inner: SyntaxErrorKind::Msg(msg.into()),
            position: None,
        }
    }

    pub(crate) fn invalid_iri(iri: String, error: IriParseError) -> Self {
        Self {
            inner: SyntaxErrorKind::InvalidIri { iri, error },
            position: None,
        }
    }

    pub(crate) fn invalid_base_iri(value: String) -> Self {
        Self {
            inner: SyntaxErrorKind::InvalidBaseIri { value },
            position: None,
        }
    }

    pub(crate) fn invalid_language_tag(tag: String, error: LanguageTagParseError) -> Self {
        Self {
            inner: SyntaxErrorKind::InvalidLanguageTag { tag, error },
            position: None,
        }
    }

    pub(crate) fn invalid_nc_name(value: impl Into<String>) -> Self {
        Self {
            inner: SyntaxErrorKind::InvalidNcName {
                value: value.into(),
            },
            position: None,
        }
    }

    pub(crate) fn invalid_direction(value: impl Into<String>) -> Self {
        Self {
            inner: SyntaxErrorKind::InvalidDirection {
                value: value.into(),
            },
            position: None,
        }
    }

    pub(crate) fn conflicting_subject(
        local: &'static str,
        first: &'static str,
        second: &'static str,
    ) -> Self {
        Self {
            inner: SyntaxErrorKind::ConflictingSubject {
                local,
                first,
                second,
            },
            position: None,
        }
    }

    pub(crate) fn conflicting_property(
        local: &'static str,
        first: &'static str,
        second: &'static str,
    ) -> Self {
        Self {
            inner: SyntaxErrorKind::ConflictingProperty {
                local,
                first,
                second,
            },
            position: None,
        }
    }

    pub(crate) fn illegal_node_name(local: impl Into<String>) -> Self {
        Self {
            inner: SyntaxErrorKind::IllegalNodeName(local.into()),
            position: None,
        }
    }

    pub(crate) fn illegal_property_name(local: impl Into<String>) -> Self {
        Self {
            inner: SyntaxErrorKind::IllegalPropertyName(local.into()),
            position: None,
        }
    }

    pub(crate) fn unsupported(feature: &'static str) -> Self {
        Self {
            inner: SyntaxErrorKind::Unsupported(feature),
            position: None,
        }
    }

    pub(crate) fn duplicate_id(iri: impl Into<String>) -> Self {
        Self {
            inner: SyntaxErrorKind::DuplicateId(iri.into()),
            position: None,
        }
    }

    pub(crate) fn wrong_triple_term_count(n: usize) -> Self {
        Self {
            inner: SyntaxErrorKind::WrongTripleTermCount(n),
            position: None,
        }
    }

    /// Attaches a position to this error.
    pub(crate) fn with_position(mut self, position: Range<TextPosition>) -> Self {
        self.position = Some(position);
        self
    }

    /// The location of the error inside of the document, if position tracking was enabled.
    pub fn location(&self) -> Option<Range<TextPosition>> {
        self.position.clone()
    }
}

impl From<RdfXmlSyntaxError> for io::Error {
    #[inline]
    fn from(error: RdfXmlSyntaxError) -> Self {
        match error.inner {
            SyntaxErrorKind::Xml(error) => match error {
                quick_xml::Error::Io(error) => {
                    Arc::try_unwrap(error).unwrap_or_else(|e| Self::new(e.kind(), e))
                }
                _ => Self::new(io::ErrorKind::InvalidData, error),
            },
            other => Self::new(io::ErrorKind::InvalidData, other.to_string()),
        }
    }
}
