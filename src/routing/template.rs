//! Path template parsing and matching.
//!
//! # Responsibilities
//! - Parse `/`-separated patterns with `:name` parameter segments
//! - Match a concrete path against a template, capturing parameters
//!
//! # Design Decisions
//! - A parameter binds exactly one segment, regardless of content
//!   (no sub-path wildcards)
//! - Segment counts must be equal for a match; literals compare
//!   byte-for-byte, case-sensitive
//! - No regex to guarantee O(n) matching

use std::collections::HashMap;

/// One segment of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Must equal the path segment exactly.
    Literal(String),
    /// Always matches; captures the path segment under this name.
    Param(String),
}

/// A parsed, immutable route pattern such as `/api/employees/:id`.
#[derive(Debug, Clone)]
pub struct PathTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl PathTemplate {
    /// Parse a pattern. Fails on a bare `:` segment (parameter without a name).
    pub fn parse(pattern: &str) -> Result<Self, super::RouteError> {
        let mut segments = Vec::new();
        for part in pattern.split('/') {
            if let Some(name) = part.strip_prefix(':') {
                if name.is_empty() {
                    return Err(super::RouteError::EmptyParameter {
                        pattern: pattern.to_string(),
                    });
                }
                segments.push(Segment::Param(name.to_string()));
            } else {
                segments.push(Segment::Literal(part.to_string()));
            }
        }
        Ok(Self {
            raw: pattern.to_string(),
            segments,
        })
    }

    /// The pattern as registered.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Pattern with parameter names erased, for duplicate detection:
    /// `/api/employees/:id` and `/api/employees/:key` normalize identically.
    pub fn normalized(&self) -> String {
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Literal(lit) => lit.as_str(),
                Segment::Param(_) => ":",
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Match a path, returning captured parameters on success.
    ///
    /// Both sides are split on `/`, so a trailing slash produces an extra
    /// empty segment and fails the count check.
    pub fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
        let parts: Vec<&str> = path.split('/').collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = HashMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(lit) => {
                    if lit != part {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    params.insert(name.clone(), part.to_string());
                }
            }
        }
        Some(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_template_matches_exactly() {
        let t = PathTemplate::parse("/api/employees").unwrap();
        assert!(t.matches("/api/employees").is_some());
        assert!(t.matches("/api/Employees").is_none());
        assert!(t.matches("/api/employees/").is_none());
    }

    #[test]
    fn param_captures_raw_segment() {
        let t = PathTemplate::parse("/api/employees/:id").unwrap();
        let params = t.matches("/api/employees/42").unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("42"));

        // No coercion: anything occupying the segment matches.
        let params = t.matches("/api/employees/not-a-number").unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("not-a-number"));
    }

    #[test]
    fn segment_count_mismatch_never_matches() {
        let flat = PathTemplate::parse("/api/employees").unwrap();
        let keyed = PathTemplate::parse("/api/employees/:id").unwrap();

        assert!(flat.matches("/api/employees/1").is_none());
        assert!(keyed.matches("/api/employees").is_none());
        assert!(keyed.matches("/api/employees/1/extra").is_none());
    }

    #[test]
    fn param_does_not_span_subpaths() {
        let t = PathTemplate::parse("/files/:name").unwrap();
        assert!(t.matches("/files/a/b").is_none());
    }

    #[test]
    fn bare_colon_segment_is_rejected() {
        assert!(matches!(
            PathTemplate::parse("/api/:"),
            Err(super::super::RouteError::EmptyParameter { .. })
        ));
    }

    #[test]
    fn normalization_erases_param_names() {
        let a = PathTemplate::parse("/api/employees/:id").unwrap();
        let b = PathTemplate::parse("/api/employees/:key").unwrap();
        assert_eq!(a.normalized(), b.normalized());
    }
}
