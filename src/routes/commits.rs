//! Commit lookup by hash or revision expression.

use std::io::{self, Write};

use crate::error::{AppError, Result};
use crate::git::GitRepository;
use crate::json::{self, JsonObject};

use super::{Context, iso_date};

/// Writes the author, committer, message and tree properties of a
/// commit into `object`.
///
/// Shared between the commit document and the single-branch document.
pub(crate) fn write_commit<W: Write>(
    ctx: &Context,
    repo_name: &str,
    commit: &git2::Commit<'_>,
    object: &mut JsonObject<'_, W>,
) -> Result<()> {
    let author = commit.author();
    let committer = commit.committer();

    {
        let mut signature = object.object("author")?;
        signature.field("date", &iso_date(author.when().seconds()))?;
        signature.field("email", author.email().unwrap_or(""))?;
        signature.field("name", author.name().unwrap_or(""))?;
        signature.finish()?;
    }
    {
        let mut signature = object.object("committer")?;
        signature.field("date", &iso_date(committer.when().seconds()))?;
        signature.field("email", committer.email().unwrap_or(""))?;
        signature.field("name", committer.name().unwrap_or(""))?;
        signature.finish()?;
    }

    object.field("message", commit.message().unwrap_or(""))?;

    {
        let tree_sha = commit.tree_id().to_string();
        let mut tree = object.object("tree")?;
        tree.field("sha", &tree_sha)?;
        tree.field("url", &ctx.repo_url(repo_name, &format!("trees/{tree_sha}")))?;
        tree.finish()?;
    }
    Ok(())
}

/// `api/repos/{repo}/commits/{spec}` - full detail for one commit.
pub fn get_commit(ctx: &Context, args: &[String]) -> Result<()> {
    let repo = GitRepository::open(&ctx.repos_dir, &args[0])?;
    let spec = &args[1];

    let object = repo.revparse(spec)?;
    let commit = object.as_commit().ok_or_else(|| AppError::WrongObjectType {
        spec: spec.clone(),
        expected: "commit",
    })?;
    let sha = commit.id().to_string();

    let mut out = io::stdout().lock();
    let mut document = json::object(&mut out)?;
    write_commit(ctx, repo.name(), commit, &mut document)?;
    {
        let mut parents = document.array("parents")?;
        for parent_id in commit.parent_ids() {
            let parent_sha = parent_id.to_string();
            let mut parent = parents.push_object()?;
            parent.field("sha", &parent_sha)?;
            parent.field(
                "url",
                &ctx.repo_url(repo.name(), &format!("commits/{parent_sha}")),
            )?;
            parent.finish()?;
        }
        parents.finish()?;
    }
    document.field("sha", &sha)?;
    document.field("url", &ctx.repo_url(repo.name(), &format!("commits/{sha}")))?;
    document.finish()?;
    Ok(())
}
