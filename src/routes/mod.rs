//! Route handlers - maps API paths to git operations.
//!
//! Each submodule implements the handlers for one resource family:
//! - `repository`: API info, the repository collection, single-repo summary
//! - `refs`: full reference listing and single-reference lookup
//! - `branches`: branch listing and single-branch detail
//! - `tags`: tag listing and annotated-tag lookup
//! - `commits`: commit lookup by hash or revision expression
//! - `trees`: tree entry listing
//! - `blobs`: blob metadata with base64 content, and raw file passthrough
//!
//! Handlers write one document to standard output and report failures
//! through [`crate::error::AppError`]; the dispatcher itself stays free
//! of I/O.

pub mod blobs;
pub mod branches;
pub mod commits;
pub mod refs;
pub mod repository;
pub mod tags;
pub mod trees;

use std::path::PathBuf;
use std::rc::Rc;

use crate::error::Result;
use crate::router::{Handler, RouteError, Router};

/// Shared handler configuration.
pub struct Context {
    /// Directory holding the repository collection.
    pub repos_dir: PathBuf,
    /// Prefix for the `url` properties of emitted documents.
    pub base_uri: String,
}

impl Context {
    /// `<base-uri>/api/repos/<repo>/<tail>`, the shape every document's
    /// `url` properties use.
    pub(crate) fn repo_url(&self, repo: &str, tail: &str) -> String {
        format!("{}/api/repos/{}/{}", self.base_uri, repo, tail)
    }
}

/// Seconds-since-epoch to the ISO-8601 UTC form used throughout the API.
pub(crate) fn iso_date(seconds: i64) -> String {
    chrono::DateTime::from_timestamp(seconds, 0)
        .map(|t| t.format("%Y-%m-%dT%H:%M:%SZ").to_string())
        .unwrap_or_default()
}

/// Builds the dispatch tree for the whole API surface.
pub fn build_router(ctx: Rc<Context>) -> std::result::Result<Router<Result<()>>, RouteError> {
    let mut router = Router::new();

    router.insert("api", Handler::fixed(repository::api_information))?;

    let c = ctx.clone();
    router.insert(
        "api/repos",
        Handler::fixed(move || repository::list_repositories(&c)),
    )?;

    let c = ctx.clone();
    router.insert(
        "api/repos/{repo}",
        Handler::captures(move |args| repository::repository_information(&c, args)),
    )?;

    let c = ctx.clone();
    router.insert(
        "api/repos/{repo}/refs",
        Handler::captures(move |args| refs::list_refs(&c, args)),
    )?;

    let c = ctx.clone();
    router.insert(
        "api/repos/{repo}/refs/{*name}",
        Handler::remaining(move |args| refs::get_ref(&c, args)),
    )?;

    let c = ctx.clone();
    router.insert(
        "api/repos/{repo}/branches",
        Handler::captures(move |args| branches::list_branches(&c, args)),
    )?;

    let c = ctx.clone();
    router.insert(
        "api/repos/{repo}/branches/{branch}",
        Handler::captures(move |args| branches::get_branch(&c, args)),
    )?;

    let c = ctx.clone();
    router.insert(
        "api/repos/{repo}/tags",
        Handler::captures(move |args| tags::list_tags(&c, args)),
    )?;

    let c = ctx.clone();
    router.insert(
        "api/repos/{repo}/tags/{sha}",
        Handler::captures(move |args| tags::get_tag(&c, args)),
    )?;

    let c = ctx.clone();
    router.insert(
        "api/repos/{repo}/commits/{spec}",
        Handler::captures(move |args| commits::get_commit(&c, args)),
    )?;

    let c = ctx.clone();
    router.insert(
        "api/repos/{repo}/trees/{sha}",
        Handler::captures(move |args| trees::get_tree(&c, args)),
    )?;

    let c = ctx.clone();
    router.insert(
        "api/repos/{repo}/blobs/{sha}",
        Handler::captures(move |args| blobs::get_blob(&c, args)),
    )?;

    let c = ctx.clone();
    router.insert(
        "api/repos/{repo}/file/{spec}",
        Handler::captures(move |args| blobs::get_file(&c, args)),
    )?;

    Ok(router)
}
