//! API information, the repository collection and single-repository
//! summaries.

use std::io;

use tracing::debug;

use crate::error::Result;
use crate::git::{self, GitRepository};
use crate::json;

use super::{Context, branches, tags};

/// `api` - version information for the program and libgit2.
pub fn api_information() -> Result<()> {
    let (major, minor, rev) = git2::Version::get().libgit2_version();

    let mut out = io::stdout().lock();
    let mut object = json::object(&mut out)?;
    object.field("version", env!("CARGO_PKG_VERSION"))?;
    {
        let mut libgit2 = object.object("libgit2")?;
        libgit2.field("version", &format!("{major}.{minor}.{rev}"))?;
        libgit2.finish()?;
    }
    object.finish()?;
    Ok(())
}

/// `api/repos` - every repository found under the collection root.
pub fn list_repositories(ctx: &Context) -> Result<()> {
    let names = git::list_repositories(&ctx.repos_dir)?;
    debug!(count = names.len(), "listing repositories");

    let mut out = io::stdout().lock();
    let mut array = json::array(&mut out)?;
    for name in &names {
        let mut repo = array.push_object()?;
        repo.field("name", name)?;
        repo.field("url", &format!("{}/api/repos/{}", ctx.base_uri, name))?;
        repo.finish()?;
    }
    array.finish()?;
    Ok(())
}

/// `api/repos/{repo}` - repository summary with its branches and tags.
pub fn repository_information(ctx: &Context, args: &[String]) -> Result<()> {
    let repo = GitRepository::open(&ctx.repos_dir, &args[0])?;

    let mut out = io::stdout().lock();
    let mut object = json::object(&mut out)?;
    object.field("repository", repo.name())?;
    {
        let mut array = object.array("branches")?;
        branches::write_branches(ctx, &repo, &mut array)?;
        array.finish()?;
    }
    {
        let mut array = object.array("tags")?;
        tags::write_tags(ctx, &repo, &mut array)?;
        array.finish()?;
    }
    object.finish()?;
    Ok(())
}
