//! Tracks `rdf:ID` values already claimed as a statement's resolved IRI, so a repeated value in
//! the same document raises `DuplicateId` instead of silently producing two reifications of
//! distinct statements under the same subject.

use std::collections::HashSet;

#[derive(Debug, Default)]
pub(crate) struct IdRegistry {
    seen: HashSet<String>,
}

impl IdRegistry {
    /// Claims `iri`. Returns `false` if it was already claimed.
    pub(crate) fn claim(&mut self, iri: &str) -> bool {
        self.seen.insert(iri.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_claim_of_the_same_iri_fails() {
        let mut registry = IdRegistry::default();
        assert!(registry.claim("http://example.com/a#x"));
        assert!(!registry.claim("http://example.com/a#x"));
    }

    #[test]
    fn distinct_iris_both_succeed() {
        let mut registry = IdRegistry::default();
        assert!(registry.claim("http://example.com/a#x"));
        assert!(registry.claim("http://example.com/a#y"));
    }
}
