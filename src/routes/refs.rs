//! Reference listing and single-reference lookup.
//!
//! Documents follow the GitHub v3 refs shape: every reference carries
//! its full name, a url back into this API, and an `object` describing
//! what it points at.

use std::io::{self, Write};

use git2::Reference;

use crate::error::{AppError, Result};
use crate::git::GitRepository;
use crate::json::{self, JsonObject};

use super::Context;

/// Writes the `object` property of a reference document.
///
/// Direct references report their target hash, a type of `tag` or
/// `commit`, and a url for the target; annotated tags additionally
/// report the peeled `target_sha`. Symbolic references report only the
/// name they point at.
fn write_reference_object<W: Write>(
    ctx: &Context,
    repo_name: &str,
    reference: &Reference<'_>,
    object: &mut JsonObject<'_, W>,
) -> Result<()> {
    match reference.target() {
        Some(oid) => {
            let sha = oid.to_string();
            object.field("sha", &sha)?;
            if let Some(peeled) = reference.target_peel() {
                object.field("type", "tag")?;
                object.field("url", &ctx.repo_url(repo_name, &format!("tags/{sha}")))?;
                object.field("target_sha", &peeled.to_string())?;
            } else if reference.is_tag() {
                object.field("type", "tag")?;
                object.field("url", &ctx.repo_url(repo_name, &format!("tags/{sha}")))?;
            } else {
                object.field("type", "commit")?;
                object.field("url", &ctx.repo_url(repo_name, &format!("commits/{sha}")))?;
            }
        }
        None => {
            if let Some(target) = reference.symbolic_target() {
                object.field("target", target)?;
                object.field("type", "symbolic")?;
            }
        }
    }
    Ok(())
}

/// `api/repos/{repo}/refs` - every reference in the repository.
pub fn list_refs(ctx: &Context, args: &[String]) -> Result<()> {
    let repo = GitRepository::open(&ctx.repos_dir, &args[0])?;

    let mut out = io::stdout().lock();
    let mut array = json::array(&mut out)?;
    for reference in repo.repo().references()? {
        let reference = reference?;
        let name = reference.name().unwrap_or("").to_string();

        let mut document = array.push_object()?;
        document.field("ref", &name)?;
        document.field("url", &ctx.repo_url(repo.name(), &name))?;
        {
            let mut target = document.object("object")?;
            write_reference_object(ctx, repo.name(), &reference, &mut target)?;
            target.finish()?;
        }
        document.finish()?;
    }
    array.finish()?;
    Ok(())
}

/// `api/repos/{repo}/refs/{*name}` - one reference looked up by its
/// long name, e.g. `refs/heads/master` or `refs/tags/v0.1.0`.
///
/// The captured segments after the repository name are rejoined under
/// the `refs/` namespace.
pub fn get_ref(ctx: &Context, args: &[String]) -> Result<()> {
    let repo = GitRepository::open(&ctx.repos_dir, &args[0])?;
    let name = format!("refs/{}", args[1..].join("/"));

    let reference = repo
        .repo()
        .find_reference(&name)
        .map_err(|_| AppError::RefNotFound(name.clone()))?;

    let mut out = io::stdout().lock();
    let mut document = json::object(&mut out)?;
    document.field("ref", &name)?;
    document.field("url", &ctx.repo_url(repo.name(), &name))?;
    {
        let mut target = document.object("object")?;
        write_reference_object(ctx, repo.name(), &reference, &mut target)?;
        target.finish()?;
    }
    document.finish()?;
    Ok(())
}
