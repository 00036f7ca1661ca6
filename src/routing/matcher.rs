//! Route pattern parsing and path matching.
//!
//! # Responsibilities
//! - Split a registered pattern into literal and placeholder segments
//! - Match an incoming path against a pattern, capturing placeholders
//!
//! # Design Decisions
//! - A segment is a placeholder only when it is exactly `[:name]`
//! - Patterns without placeholders compare the whole string
//! - Segment count mismatch is a non-match, never an out-of-range access
//! - Captures are only handed out when the whole pattern matches
//! - No regex: one linear pass over the segments

use crate::routing::RouteError;

/// One `/`-delimited piece of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param(String),
}

impl Segment {
    fn parse(raw: &str) -> Result<Self, RouteError> {
        match raw.strip_prefix("[:").and_then(|rest| rest.strip_suffix(']')) {
            Some(name) if name.is_empty() || name.contains(['[', ']', ':']) => {
                Err(RouteError::InvalidPlaceholder(raw.to_string()))
            }
            Some(name) => Ok(Segment::Param(name.to_string())),
            None => Ok(Segment::Literal(raw.to_string())),
        }
    }
}

/// A compiled route pattern such as `/users/[:id]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
    has_params: bool,
}

impl RoutePattern {
    /// Compile a pattern. Empty patterns and malformed placeholders are rejected.
    pub fn parse(raw: &str) -> Result<Self, RouteError> {
        if raw.trim().is_empty() {
            return Err(RouteError::EmptyPattern);
        }

        let segments = raw
            .split('/')
            .map(Segment::parse)
            .collect::<Result<Vec<_>, _>>()?;
        let has_params = segments.iter().any(|s| matches!(s, Segment::Param(_)));

        Ok(Self {
            raw: raw.to_string(),
            segments,
            has_params,
        })
    }

    /// The pattern exactly as registered.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn has_params(&self) -> bool {
        self.has_params
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Match a request path.
    ///
    /// Returns the captured `(name, value)` pairs in pattern order, or `None`
    /// when the path does not match. Literal patterns yield an empty list.
    pub fn match_path(&self, path: &str) -> Option<Vec<(String, String)>> {
        if !self.has_params {
            return (self.raw == path).then(Vec::new);
        }

        let mut params = Vec::new();
        let mut parts = path.split('/');

        for segment in &self.segments {
            let part = parts.next()?;
            match segment {
                Segment::Literal(literal) => {
                    if literal != part {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if part.is_empty() {
                        return None;
                    }
                    params.push((name.clone(), part.to_string()));
                }
            }
        }

        // Longer paths than the pattern do not match.
        if parts.next().is_some() {
            return None;
        }

        Some(params)
    }
}

impl std::fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}
