//! Read-only JSON API over a collection of git repositories.
//!
//! A path string such as `/api/repos/myrepo/tags` is tokenized into
//! segments, dispatched through a prefix tree to a handler, and the
//! handler streams a JSON document to standard output.
//!
//! - [`router`]: prefix-tree dispatch from path segments to handlers
//! - [`json`]: streaming, scope-bound JSON output
//! - [`git`]: thin wrapper over libgit2
//! - [`routes`]: handlers mapping the API vocabulary to git queries

pub mod error;
pub mod git;
pub mod json;
pub mod router;
pub mod routes;
