use crate::named_node::NamedNode;
use crate::vocab::{rdf, xsd};
use oxilangtag::{LanguageTag, LanguageTagParseError};
use std::fmt;
use std::fmt::Write as _;

/// An RDF [literal](https://www.w3.org/TR/rdf11-concepts/#dfn-literal).
///
/// The default string formatter returns an N-Triples/Turtle-compatible representation:
/// ```
/// use rdf_model::Literal;
///
/// assert_eq!(Literal::new_simple_literal("foo").to_string(), "\"foo\"");
/// ```
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Literal(LiteralContent);

#[derive(Eq, PartialEq, Debug, Clone, Hash)]
enum LiteralContent {
    String(String),
    LanguageTaggedString {
        value: String,
        language: String,
    },
    DirectionalLanguageTaggedString {
        value: String,
        language: String,
        direction: BaseDirection,
    },
    TypedLiteral {
        value: String,
        datatype: NamedNode,
    },
}

/// The base direction of a [direction-tagged string](https://www.w3.org/TR/rdf12-concepts/#dfn-base-direction),
/// an RDF 1.2 extension of language-tagged literals.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum BaseDirection {
    /// Left-to-right.
    Ltr,
    /// Right-to-left.
    Rtl,
}

impl BaseDirection {
    /// Parses the `its:dir`/direction-tag token (`"ltr"` or `"rtl"`).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ltr" => Some(Self::Ltr),
            "rtl" => Some(Self::Rtl),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }
}

impl fmt::Display for BaseDirection {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Literal {
    /// Builds a simple literal, one without a language tag or datatype (implicit `xsd:string`).
    #[inline]
    pub fn new_simple_literal(value: impl Into<String>) -> Self {
        Self(LiteralContent::String(value.into()))
    }

    /// Builds a literal from a value and a datatype.
    ///
    /// `xsd:string` collapses to the plain [`LiteralContent::String`] representation.
    #[inline]
    pub fn new_typed_literal(value: impl Into<String>, datatype: impl Into<NamedNode>) -> Self {
        let value = value.into();
        let datatype = datatype.into();
        if datatype.as_str() == xsd::STRING.as_str() {
            return Self::new_simple_literal(value);
        }
        Self(LiteralContent::TypedLiteral { value, datatype })
    }

    /// Builds a language-tagged string literal, validating and lowercasing the tag.
    pub fn new_language_tagged_literal(
        value: impl Into<String>,
        language: impl Into<String>,
    ) -> Result<Self, LanguageTagParseError> {
        let language = language.into();
        Ok(Self::new_language_tagged_literal_unchecked(
            value,
            LanguageTag::parse(language)?.into_inner().to_ascii_lowercase(),
        ))
    }

    /// Builds a language-tagged string literal without validating the tag.
    #[inline]
    pub fn new_language_tagged_literal_unchecked(
        value: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self(LiteralContent::LanguageTaggedString {
            value: value.into(),
            language: language.into().to_ascii_lowercase(),
        })
    }

    /// Builds an RDF 1.2 direction-tagged string literal (`rdf:dirLangString`), validating the tag.
    pub fn new_directional_language_tagged_literal(
        value: impl Into<String>,
        language: impl Into<String>,
        direction: BaseDirection,
    ) -> Result<Self, LanguageTagParseError> {
        let language = language.into();
        Ok(Self::new_directional_language_tagged_literal_unchecked(
            value,
            LanguageTag::parse(language)?.into_inner().to_ascii_lowercase(),
            direction,
        ))
    }

    /// Builds an RDF 1.2 direction-tagged string literal without validating the tag.
    #[inline]
    pub fn new_directional_language_tagged_literal_unchecked(
        value: impl Into<String>,
        language: impl Into<String>,
        direction: BaseDirection,
    ) -> Self {
        Self(LiteralContent::DirectionalLanguageTaggedString {
            value: value.into(),
            language: language.into().to_ascii_lowercase(),
            direction,
        })
    }

    #[inline]
    pub fn value(&self) -> &str {
        match &self.0 {
            LiteralContent::String(value)
            | LiteralContent::LanguageTaggedString { value, .. }
            | LiteralContent::DirectionalLanguageTaggedString { value, .. }
            | LiteralContent::TypedLiteral { value, .. } => value,
        }
    }

    #[inline]
    pub fn language(&self) -> Option<&str> {
        match &self.0 {
            LiteralContent::LanguageTaggedString { language, .. }
            | LiteralContent::DirectionalLanguageTaggedString { language, .. } => Some(language),
            LiteralContent::String(_) | LiteralContent::TypedLiteral { .. } => None,
        }
    }

    #[inline]
    pub fn direction(&self) -> Option<BaseDirection> {
        match self.0 {
            LiteralContent::DirectionalLanguageTaggedString { direction, .. } => Some(direction),
            _ => None,
        }
    }

    pub fn datatype(&self) -> &NamedNode {
        match &self.0 {
            LiteralContent::String(_) => &xsd::STRING,
            LiteralContent::LanguageTaggedString { .. } => &rdf::LANG_STRING,
            LiteralContent::DirectionalLanguageTaggedString { .. } => &rdf::DIR_LANG_STRING,
            LiteralContent::TypedLiteral { datatype, .. } => datatype,
        }
    }

    #[inline]
    pub fn is_plain(&self) -> bool {
        matches!(self.0, LiteralContent::String(_) | LiteralContent::LanguageTaggedString { .. })
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        print_quoted_str(self.value(), f)?;
        match &self.0 {
            LiteralContent::String(_) => Ok(()),
            LiteralContent::LanguageTaggedString { language, .. } => write!(f, "@{language}"),
            LiteralContent::DirectionalLanguageTaggedString { language, direction, .. } => {
                write!(f, "@{language}--{direction}")
            }
            LiteralContent::TypedLiteral { datatype, .. } => write!(f, "^^{datatype}"),
        }
    }
}

/// Escapes and quotes a string the way N-Triples/Turtle literals expect.
pub(crate) fn print_quoted_str(string: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_char('"')?;
    for c in string.chars() {
        match c {
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

macro_rules! impl_from_numeric {
    ($ty:ty, $datatype:expr) => {
        impl From<$ty> for Literal {
            #[inline]
            fn from(value: $ty) -> Self {
                Self(LiteralContent::TypedLiteral {
                    value: value.to_string(),
                    datatype: $datatype.clone(),
                })
            }
        }
    };
}

impl From<bool> for Literal {
    #[inline]
    fn from(value: bool) -> Self {
        Self(LiteralContent::TypedLiteral {
            value: value.to_string(),
            datatype: xsd::BOOLEAN.clone(),
        })
    }
}

impl_from_numeric!(i64, xsd::INTEGER);
impl_from_numeric!(i32, xsd::INTEGER);
impl_from_numeric!(u64, xsd::INTEGER);
impl_from_numeric!(u32, xsd::INTEGER);
impl_from_numeric!(f32, xsd::FLOAT);
impl_from_numeric!(f64, xsd::DOUBLE);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_literal_display() {
        assert_eq!(Literal::new_simple_literal("foo").to_string(), "\"foo\"");
    }

    #[test]
    fn language_tagged_literal_lowercases_tag() {
        let literal = Literal::new_language_tagged_literal("Chat", "EN-us").unwrap();
        assert_eq!(literal.language(), Some("en-us"));
        assert_eq!(literal.to_string(), "\"Chat\"@en-us");
    }

    #[test]
    fn directional_literal_round_trips() {
        let literal =
            Literal::new_directional_language_tagged_literal("hello", "en", BaseDirection::Ltr)
                .unwrap();
        assert_eq!(literal.direction(), Some(BaseDirection::Ltr));
        assert_eq!(literal.datatype(), &rdf::DIR_LANG_STRING);
        assert_eq!(literal.to_string(), "\"hello\"@en--ltr");
    }

    #[test]
    fn xsd_string_datatype_collapses_to_plain() {
        let literal = Literal::new_typed_literal("foo", xsd::STRING.clone());
        assert!(literal.is_plain());
        assert_eq!(literal.datatype(), &xsd::STRING);
    }

    #[test]
    fn escapes_quotes_and_newlines() {
        assert_eq!(
            Literal::new_simple_literal("a\"b\nc").to_string(),
            "\"a\\\"b\\nc\""
        );
    }
}
