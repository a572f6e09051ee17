//! Path-segment routing.
//!
//! Maps `/`-separated path strings to registered handlers through a
//! prefix tree. Patterns use `{name}` for a segment that matches any
//! text (captured and passed to the handler) and `{*name}` for a
//! trailing placeholder that captures every remaining segment; all
//! other segments match literally. Placeholder names are documentation
//! only; captures are passed positionally, in path order.
//!
//! ```
//! use gitjson::router::{Handler, Router};
//!
//! let mut router = Router::new();
//! router.insert("api/books", Handler::fixed(|| "list".to_string())).unwrap();
//! router
//!     .insert("api/books/{name}", Handler::captures(|args| args[0].clone()))
//!     .unwrap();
//!
//! assert_eq!(router.dispatch("api/books/dune"), Some("dune".to_string()));
//! assert_eq!(router.dispatch("api/movies"), None);
//! ```
//!
//! The tree is built once at startup and is read-only during matching;
//! there is no removal operation. Dispatch performs no I/O and treats an
//! unmatched path as a normal outcome, not an error.

use std::collections::HashMap;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RouteError {
    #[error("pattern '{0}' has no segments")]
    EmptyPattern(String),

    #[error("pattern '{0}' contains segments after a {{*remaining}} placeholder")]
    SegmentsAfterRemaining(String),

    #[error("handler kind does not match the placeholders in pattern '{0}'")]
    HandlerMismatch(String),
}

/// A route action, tagged by the arguments it accepts.
///
/// The kind is chosen at registration time and must agree with the
/// pattern: `Fixed` for purely literal patterns, `Captures` for patterns
/// containing `{name}` placeholders, `Remaining` for patterns ending in
/// `{*name}`.
pub enum Handler<T> {
    Fixed(Box<dyn Fn() -> T>),
    Captures(Box<dyn Fn(&[String]) -> T>),
    Remaining(Box<dyn Fn(&[String]) -> T>),
}

impl<T> Handler<T> {
    pub fn fixed(f: impl Fn() -> T + 'static) -> Self {
        Handler::Fixed(Box::new(f))
    }

    pub fn captures(f: impl Fn(&[String]) -> T + 'static) -> Self {
        Handler::Captures(Box::new(f))
    }

    pub fn remaining(f: impl Fn(&[String]) -> T + 'static) -> Self {
        Handler::Remaining(Box::new(f))
    }
}

enum Terminal<T> {
    Fixed(Box<dyn Fn() -> T>),
    Captures(Box<dyn Fn(&[String]) -> T>),
}

struct RouteNode<T> {
    children: HashMap<String, RouteNode<T>>,
    placeholder: Option<Box<RouteNode<T>>>,
    terminal: Option<Terminal<T>>,
    remaining: Option<Box<dyn Fn(&[String]) -> T>>,
}

impl<T> Default for RouteNode<T> {
    fn default() -> Self {
        RouteNode {
            children: HashMap::new(),
            placeholder: None,
            terminal: None,
            remaining: None,
        }
    }
}

/// Prefix-tree dispatcher from path segments to handlers.
pub struct Router<T> {
    root: RouteNode<T>,
}

impl<T> Router<T> {
    pub fn new() -> Self {
        Router {
            root: RouteNode::default(),
        }
    }

    /// Registers `handler` under `pattern`.
    ///
    /// Intermediate nodes are created as needed; registering a second
    /// handler at the same position overwrites the first. Empty segments
    /// in the pattern are skipped, so `/api/` and `api` are the same
    /// pattern.
    pub fn insert(&mut self, pattern: &str, handler: Handler<T>) -> Result<(), RouteError> {
        let segments: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
        if segments.is_empty() {
            return Err(RouteError::EmptyPattern(pattern.to_string()));
        }

        let mut node = &mut self.root;
        let mut saw_placeholder = false;
        for (index, segment) in segments.iter().enumerate() {
            if segment.starts_with("{*") {
                if index + 1 != segments.len() {
                    return Err(RouteError::SegmentsAfterRemaining(pattern.to_string()));
                }
                return match handler {
                    Handler::Remaining(f) => {
                        node.remaining = Some(f);
                        Ok(())
                    }
                    _ => Err(RouteError::HandlerMismatch(pattern.to_string())),
                };
            } else if segment.starts_with('{') && segment.ends_with('}') {
                saw_placeholder = true;
                node = node
                    .placeholder
                    .get_or_insert_with(|| Box::new(RouteNode::default()))
                    .as_mut();
            } else {
                node = node.children.entry((*segment).to_string()).or_default();
            }
        }

        node.terminal = Some(match handler {
            Handler::Fixed(f) if !saw_placeholder => Terminal::Fixed(f),
            Handler::Captures(f) if saw_placeholder => Terminal::Captures(f),
            _ => return Err(RouteError::HandlerMismatch(pattern.to_string())),
        });
        Ok(())
    }

    /// Tokenizes `path` on `/` (skipping empty segments) and dispatches.
    pub fn dispatch(&self, path: &str) -> Option<T> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        self.dispatch_segments(&segments)
    }

    /// Walks the tree over `segments` and invokes the matched handler,
    /// returning its result.
    ///
    /// Returns `None` when no route matches; nothing is invoked in that
    /// case.
    pub fn dispatch_segments(&self, segments: &[&str]) -> Option<T> {
        let mut node = &self.root;
        let mut captures: Vec<String> = Vec::new();

        let mut index = 0;
        while index < segments.len() {
            if let Some(remaining) = &node.remaining {
                captures.extend(segments[index..].iter().map(|s| (*s).to_string()));
                return Some(remaining(&captures));
            }
            // A placeholder slot shadows a literal child with the same text.
            if let Some(placeholder) = node.placeholder.as_deref() {
                captures.push(segments[index].to_string());
                node = placeholder;
            } else {
                node = node.children.get(segments[index])?;
            }
            index += 1;
        }

        match &node.terminal {
            Some(Terminal::Fixed(f)) if captures.is_empty() => Some(f()),
            Some(Terminal::Captures(f)) if !captures.is_empty() => Some(f(&captures)),
            _ => None,
        }
    }
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{Handler, RouteError, Router};

    #[test]
    fn literal_routes_dispatch_to_their_handler() {
        let mut router = Router::new();
        router.insert("api", Handler::fixed(|| "api")).unwrap();
        router
            .insert("api/repos", Handler::fixed(|| "repos"))
            .unwrap();

        assert_eq!(router.dispatch("api"), Some("api"));
        assert_eq!(router.dispatch("api/repos"), Some("repos"));
        assert_eq!(router.dispatch("/api/repos/"), Some("repos"));
    }

    #[test]
    fn re_registering_overwrites() {
        let mut router = Router::new();
        router.insert("api", Handler::fixed(|| 1)).unwrap();
        router.insert("api", Handler::fixed(|| 2)).unwrap();

        assert_eq!(router.dispatch("api"), Some(2));
    }

    #[test]
    fn fixed_handler_rejected_on_placeholder_pattern() {
        let mut router = Router::new();
        let err = router
            .insert("api/{name}", Handler::fixed(|| ()))
            .unwrap_err();
        assert_eq!(
            err,
            RouteError::HandlerMismatch("api/{name}".to_string())
        );
    }

    #[test]
    fn captures_handler_rejected_on_literal_pattern() {
        let mut router = Router::new();
        let err = router
            .insert("api/repos", Handler::captures(|_| ()))
            .unwrap_err();
        assert_eq!(
            err,
            RouteError::HandlerMismatch("api/repos".to_string())
        );
    }

    #[test]
    fn segments_after_remaining_are_rejected() {
        let mut router = Router::new();
        let err = router
            .insert("api/{*rest}/more", Handler::remaining(|_| ()))
            .unwrap_err();
        assert_eq!(
            err,
            RouteError::SegmentsAfterRemaining("api/{*rest}/more".to_string())
        );
    }

    #[test]
    fn empty_pattern_is_rejected() {
        let mut router: Router<()> = Router::new();
        let err = router.insert("//", Handler::fixed(|| ())).unwrap_err();
        assert_eq!(err, RouteError::EmptyPattern("//".to_string()));
    }
}
