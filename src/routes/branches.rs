//! Branch listing and single-branch detail.
//!
//! Follows the GitHub v3 branch documents: the listing carries only the
//! branch name and tip commit reference, the single-branch form expands
//! the full commit detail.

use std::io::{self, Write};

use git2::BranchType;

use crate::error::{AppError, Result};
use crate::git::GitRepository;
use crate::json::{self, JsonArray};

use super::{Context, commits};

/// Writes one `{name, commit: {sha, url}}` object per local branch.
///
/// Shared between the branch listing and the repository summary.
pub(crate) fn write_branches<W: Write>(
    ctx: &Context,
    repo: &GitRepository,
    array: &mut JsonArray<'_, W>,
) -> Result<()> {
    for item in repo.repo().branches(Some(BranchType::Local))? {
        let (branch, _) = item?;
        let name = branch.name()?.unwrap_or("").to_string();
        let Some(oid) = branch.get().target() else {
            continue;
        };
        let sha = oid.to_string();

        let mut object = array.push_object()?;
        object.field("name", &name)?;
        {
            let mut commit = object.object("commit")?;
            commit.field("sha", &sha)?;
            commit.field("url", &ctx.repo_url(repo.name(), &format!("commits/{sha}")))?;
            commit.finish()?;
        }
        object.finish()?;
    }
    Ok(())
}

/// `api/repos/{repo}/branches` - list the local branches.
pub fn list_branches(ctx: &Context, args: &[String]) -> Result<()> {
    let repo = GitRepository::open(&ctx.repos_dir, &args[0])?;

    let mut out = io::stdout().lock();
    let mut array = json::array(&mut out)?;
    write_branches(ctx, &repo, &mut array)?;
    array.finish()?;
    Ok(())
}

/// `api/repos/{repo}/branches/{branch}` - a branch with its tip commit
/// expanded.
pub fn get_branch(ctx: &Context, args: &[String]) -> Result<()> {
    let repo = GitRepository::open(&ctx.repos_dir, &args[0])?;
    let spec = &args[1];

    let object = repo.revparse(spec)?;
    let commit = object.as_commit().ok_or_else(|| AppError::WrongObjectType {
        spec: spec.clone(),
        expected: "branch",
    })?;
    let sha = commit.id().to_string();

    let mut out = io::stdout().lock();
    let mut branch = json::object(&mut out)?;
    branch.field("name", spec)?;
    {
        let mut detail = branch.object("commit")?;
        detail.field("sha", &sha)?;
        commits::write_commit(ctx, repo.name(), commit, &mut detail)?;
        detail.finish()?;
    }
    branch.finish()?;
    Ok(())
}
