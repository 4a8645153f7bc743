#![allow(clippy::host_endian_bytes)] // going around u128's 16-byte alignment
use rand::random;
use std::fmt;
use std::io::Write as _;
use std::str;

/// An RDF [blank node](https://www.w3.org/TR/rdf11-concepts/#dfn-blank-node).
///
/// Build a fresh anonymous one with [`BlankNode::default`], or wrap an existing
/// identifier (as parsed from `rdf:nodeID`) with [`BlankNode::new`].
///
/// ```
/// use rdf_model::BlankNode;
///
/// assert_eq!("_:a122", BlankNode::new("a122")?.to_string());
/// # Result::<_, rdf_model::BlankNodeIdParseError>::Ok(())
/// ```
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct BlankNode(String);

impl BlankNode {
    /// Creates a blank node from an identifier, validating it against the N-Triples/Turtle grammar.
    pub fn new(id: impl Into<String>) -> Result<Self, BlankNodeIdParseError> {
        let id = id.into();
        validate_blank_node_identifier(&id)?;
        Ok(Self(id))
    }

    /// Creates a blank node from an identifier without validation.
    ///
    /// It is the caller's responsibility to ensure `id` is a valid blank node identifier.
    #[inline]
    pub fn new_unchecked(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Creates a blank node from a unique numerical id, rendered as lowercase hex.
    #[inline]
    pub fn new_from_unique_id(id: u128) -> Self {
        let mut buf = [0u8; 32];
        write!(&mut buf[..], "{id:x}").expect("hex encoding of a u128 always fits in 32 bytes");
        let len = buf.iter().position(|b| *b == 0).unwrap_or(32);
        Self(str::from_utf8(&buf[..len]).expect("hex digits are ASCII").to_owned())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for BlankNode {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.0)
    }
}

impl Default for BlankNode {
    /// Builds a blank node with a fresh random id.
    ///
    /// The id never starts with a digit, so it stays a valid `rdf:nodeID` even
    /// when an RDF/XML document embeds it directly in a later `rdf:nodeID` attribute.
    #[inline]
    fn default() -> Self {
        loop {
            let id: u128 = random();
            let node = Self::new_from_unique_id(id);
            if matches!(node.0.as_bytes().first(), Some(b'a'..=b'f')) {
                return node;
            }
        }
    }
}

/// An error raised when parsing an invalid blank node identifier.
#[derive(Debug, Clone, Copy, Eq, PartialEq, thiserror::Error)]
#[error("Invalid blank node identifier")]
pub struct BlankNodeIdParseError;

fn validate_blank_node_identifier(id: &str) -> Result<(), BlankNodeIdParseError> {
    let mut chars = id.chars();
    let front = chars.next().ok_or(BlankNodeIdParseError)?;
    match front {
        '0'..='9'
        | '_'
        | ':'
        | 'A'..='Z'
        | 'a'..='z'
        | '\u{00C0}'..='\u{00D6}'
        | '\u{00D8}'..='\u{00F6}'
        | '\u{00F8}'..='\u{02FF}'
        | '\u{0370}'..='\u{037D}'
        | '\u{037F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}' => (),
        _ => return Err(BlankNodeIdParseError),
    }
    for c in chars {
        match c {
            '.' // validated below
            | '-'
            | '0'..='9'
            | '\u{00B7}'
            | '\u{0300}'..='\u{036F}'
            | '\u{203F}'..='\u{2040}'
            | '_'
            | ':'
            | 'A'..='Z'
            | 'a'..='z'
            | '\u{00C0}'..='\u{00D6}'
            | '\u{00D8}'..='\u{00F6}'
            | '\u{00F8}'..='\u{02FF}'
            | '\u{0370}'..='\u{037D}'
            | '\u{037F}'..='\u{1FFF}'
            | '\u{200C}'..='\u{200D}'
            | '\u{2070}'..='\u{218F}'
            | '\u{2C00}'..='\u{2FEF}'
            | '\u{3001}'..='\u{D7FF}'
            | '\u{F900}'..='\u{FDCF}'
            | '\u{FDF0}'..='\u{FFFD}'
            | '\u{10000}'..='\u{EFFFF}' => (),
            _ => return Err(BlankNodeIdParseError),
        }
    }
    if id.ends_with('.') {
        Err(BlankNodeIdParseError)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_underscore_colon_prefixed() {
        assert_eq!(BlankNode::new("a122").unwrap().to_string(), "_:a122");
    }

    #[test]
    fn default_never_starts_with_a_digit() {
        for _ in 0..64 {
            let node = BlankNode::default();
            assert!(!node.as_str().as_bytes()[0].is_ascii_digit());
        }
    }

    #[test]
    fn rejects_trailing_dot() {
        assert!(BlankNode::new("foo.").is_err());
    }
}
