//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store compiled routes in registration order
//! - Reject duplicate (method, pattern) pairs
//! - Look up the first matching route for a request
//!
//! # Design Decisions
//! - Append-only; frozen behind an `Arc` once the server listens
//! - O(n) scan (acceptable for typical route counts)
//! - No specificity ranking: first match wins
//! - A miss returns `None`; the caller picks the reply

use axum::http::Method;

use crate::routing::matcher::RoutePattern;
use crate::routing::RouteError;

/// A registered route.
#[derive(Debug, Clone)]
pub struct Route<H> {
    pub method: Method,
    pub pattern: RoutePattern,
    pub handler: H,
}

/// Result of a successful lookup.
#[derive(Debug)]
pub struct RouteMatch<'a, H> {
    /// The matched handler.
    pub handler: &'a H,
    /// Canonical pattern the request URL is rewritten to.
    pub pattern: &'a str,
    /// Captured placeholder values.
    pub params: Vec<(String, String)>,
}

/// Ordered table of (method, pattern, handler) entries.
#[derive(Debug, Clone)]
pub struct RouteTable<H> {
    routes: Vec<Route<H>>,
}

impl<H> RouteTable<H> {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Register a route.
    ///
    /// On any error the table is left untouched; an existing route for the
    /// same (method, pattern) stays authoritative.
    pub fn register(&mut self, method: Method, pattern: &str, handler: H) -> Result<(), RouteError> {
        let pattern = RoutePattern::parse(pattern)?;

        if self
            .routes
            .iter()
            .any(|r| r.method == method && r.pattern.as_str() == pattern.as_str())
        {
            return Err(RouteError::Duplicate {
                method,
                pattern: pattern.as_str().to_string(),
            });
        }

        self.routes.push(Route {
            method,
            pattern,
            handler,
        });
        Ok(())
    }

    /// Find the first route matching `method` and `path`.
    pub fn dispatch(&self, method: &Method, path: &str) -> Option<RouteMatch<'_, H>> {
        self.routes
            .iter()
            .filter(|route| route.method == *method)
            .find_map(|route| {
                route.pattern.match_path(path).map(|params| RouteMatch {
                    handler: &route.handler,
                    pattern: route.pattern.as_str(),
                    params,
                })
            })
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn routes(&self) -> impl Iterator<Item = &Route<H>> {
        self.routes.iter()
    }
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_dispatch() {
        let mut table = RouteTable::new();
        table.register(Method::GET, "/", "home").unwrap();
        table.register(Method::GET, "/about", "about").unwrap();

        let m = table.dispatch(&Method::GET, "/about").unwrap();
        assert_eq!(*m.handler, "about");
        assert!(m.params.is_empty());

        assert!(table.dispatch(&Method::GET, "/missing").is_none());
        assert!(table.dispatch(&Method::POST, "/about").is_none());
    }

    #[test]
    fn test_param_dispatch() {
        let mut table = RouteTable::new();
        table.register(Method::GET, "/users/[:id]", "user").unwrap();

        let m = table.dispatch(&Method::GET, "/users/42").unwrap();
        assert_eq!(*m.handler, "user");
        assert_eq!(m.pattern, "/users/[:id]");
        assert_eq!(m.params, vec![("id".to_string(), "42".to_string())]);
    }

    #[test]
    fn test_duplicate_keeps_first() {
        let mut table = RouteTable::new();
        table.register(Method::GET, "/a", 1).unwrap();

        let err = table.register(Method::GET, "/a", 2).unwrap_err();
        assert!(matches!(err, RouteError::Duplicate { .. }));
        assert_eq!(table.len(), 1);
        assert_eq!(*table.dispatch(&Method::GET, "/a").unwrap().handler, 1);

        // Same pattern, different method is a separate route.
        table.register(Method::POST, "/a", 3).unwrap();
        assert_eq!(*table.dispatch(&Method::POST, "/a").unwrap().handler, 3);
    }

    #[test]
    fn test_first_match_wins() {
        let mut table = RouteTable::new();
        table.register(Method::GET, "/users/[:id]", "param").unwrap();
        table.register(Method::GET, "/users/me", "literal").unwrap();

        assert_eq!(*table.dispatch(&Method::GET, "/users/me").unwrap().handler, "param");
    }

    #[test]
    fn test_rejects_empty_pattern() {
        let mut table: RouteTable<()> = RouteTable::new();
        assert_eq!(table.register(Method::GET, "", ()), Err(RouteError::EmptyPattern));
        assert!(table.is_empty());
    }
}
