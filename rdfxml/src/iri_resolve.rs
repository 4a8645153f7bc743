//! RDF/XML's own base-IRI resolution algorithm (RDF/XML §5.3), which is narrower than general
//! RFC 3986 reference resolution: it is what `xml:base` scoping has always used, and predates
//! the IRI crate this parser otherwise delegates validation to.

use crate::error::RdfXmlSyntaxError;

/// Resolves `value` against `base` per the RDF/XML grammar's own algorithm.
///
/// `base` is `None` for a document with no base IRI at all (the value must then be absolute).
pub(crate) fn resolve(value: &str, base: Option<&str>) -> Result<String, RdfXmlSyntaxError> {
    if value.is_empty() {
        return Ok(strip_fragment(base.unwrap_or("")).to_owned());
    }
    if value.starts_with('#') {
        return Ok(format!("{}{value}", strip_fragment(base.unwrap_or(""))));
    }
    let Some(base) = base else {
        return Ok(value.to_owned());
    };
    if base.is_empty() {
        return Ok(value.to_owned());
    }
    if is_absolute(value) {
        return Ok(value.to_owned());
    }
    let Some(scheme_end) = base.find(':') else {
        return Err(RdfXmlSyntaxError::invalid_base_iri(base.to_owned()));
    };
    let scheme = &base[..=scheme_end];
    if let Some(stripped) = value.strip_prefix("//") {
        return Ok(format!("{scheme}//{stripped}"));
    }

    let after_scheme = &base[scheme_end + 1..];
    let first_path_slash = if let Some(authority) = after_scheme.strip_prefix("//") {
        match authority.find('/') {
            Some(idx) => scheme_end + 1 + 2 + idx,
            None => {
                return Ok(if authority.is_empty() {
                    format!("{scheme}{value}")
                } else {
                    format!("{base}/{value}")
                });
            }
        }
    } else {
        match after_scheme.find('/') {
            Some(idx) => scheme_end + 1 + idx,
            None => {
                return Ok(if after_scheme.is_empty() {
                    format!("{scheme}{value}")
                } else {
                    format!("{base}/{value}")
                });
            }
        }
    };

    let prefix = &base[..first_path_slash];
    let base_path = &base[first_path_slash..];
    if let Some(rest) = value.strip_prefix('/') {
        return Ok(format!("{prefix}/{rest}"));
    }

    let last_slash = base_path.rfind('/').unwrap_or(0);
    let merged_path = format!("{}{value}", &base_path[..=last_slash]);
    Ok(format!("{prefix}{}", remove_dot_segments(&merged_path)))
}

/// `value` contains a `:` before any `/`: an absolute IRI reference needs no resolution.
fn is_absolute(value: &str) -> bool {
    match (value.find(':'), value.find('/')) {
        (Some(colon), Some(slash)) => colon < slash,
        (Some(_), None) => true,
        (None, _) => false,
    }
}

fn strip_fragment(iri: &str) -> &str {
    iri.split('#').next().unwrap_or(iri)
}

/// Collapses `.`/`..` path segments, RFC 3986 §5.2.4-style.
fn remove_dot_segments(path: &str) -> String {
    let mut output: Vec<&str> = Vec::new();
    let mut trailing_slash = path.ends_with('/');
    for segment in path.split('/') {
        match segment {
            "." => trailing_slash = true,
            ".." => {
                output.pop();
                trailing_slash = true;
            }
            "" => {}
            segment => {
                output.push(segment);
                trailing_slash = false;
            }
        }
    }
    let mut result = String::from("/");
    result.push_str(&output.join("/"));
    if trailing_slash && !result.ends_with('/') {
        result.push('/');
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_value_strips_fragment_from_base() {
        assert_eq!(resolve("", Some("http://example.com/a#b")).unwrap(), "http://example.com/a");
    }

    #[test]
    fn fragment_only_value_replaces_fragment() {
        assert_eq!(
            resolve("#c", Some("http://example.com/a#b")).unwrap(),
            "http://example.com/a#c"
        );
    }

    #[test]
    fn absolute_value_is_untouched() {
        assert_eq!(
            resolve("http://other.example/x", Some("http://example.com/a/")).unwrap(),
            "http://other.example/x"
        );
    }

    #[test]
    fn relative_path_merges_with_base_directory() {
        assert_eq!(
            resolve("b", Some("http://example.com/a/")).unwrap(),
            "http://example.com/a/b"
        );
        assert_eq!(
            resolve("b", Some("http://example.com/a")).unwrap(),
            "http://example.com/b"
        );
    }

    #[test]
    fn dot_segments_collapse() {
        assert_eq!(
            resolve("../c", Some("http://example.com/a/b/")).unwrap(),
            "http://example.com/a/c"
        );
        assert_eq!(
            resolve("./c", Some("http://example.com/a/b/")).unwrap(),
            "http://example.com/a/b/c"
        );
    }

    #[test]
    fn root_relative_value_keeps_authority() {
        assert_eq!(
            resolve("/z", Some("http://example.com/a/b")).unwrap(),
            "http://example.com/z"
        );
    }

    #[test]
    fn scheme_only_base_appends_directly() {
        assert_eq!(resolve("foo", Some("mailto:")).unwrap(), "mailto:foo");
    }

    #[test]
    fn no_base_requires_absolute_value() {
        assert_eq!(resolve("http://example.com/x", None).unwrap(), "http://example.com/x");
    }
}
