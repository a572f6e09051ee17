//! Tag listing and annotated-tag lookup.

use std::io::{self, Write};

use git2::{ObjectType, Oid};

use crate::error::{AppError, Result};
use crate::git::GitRepository;
use crate::json::{self, JsonArray};

use super::{Context, iso_date};

/// Every tag in the repository as `(short name, tag object id)`.
fn collect_tags(repo: &GitRepository) -> Result<Vec<(String, Oid)>> {
    let mut tags = Vec::new();
    repo.repo().tag_foreach(|oid, name| {
        let name = String::from_utf8_lossy(name);
        let name = name.strip_prefix("refs/tags/").unwrap_or(&name).to_string();
        tags.push((name, oid));
        true
    })?;
    Ok(tags)
}

/// Writes one `{name, hash, url}` object per tag.
///
/// Shared between the tag listing and the repository summary.
pub(crate) fn write_tags<W: Write>(
    ctx: &Context,
    repo: &GitRepository,
    array: &mut JsonArray<'_, W>,
) -> Result<()> {
    for (name, oid) in collect_tags(repo)? {
        let mut tag = array.push_object()?;
        tag.field("name", &name)?;
        tag.field("hash", &oid.to_string())?;
        tag.field("url", &ctx.repo_url(repo.name(), &format!("tags/{name}")))?;
        tag.finish()?;
    }
    Ok(())
}

/// `api/repos/{repo}/tags` - list the repository's tags.
pub fn list_tags(ctx: &Context, args: &[String]) -> Result<()> {
    let repo = GitRepository::open(&ctx.repos_dir, &args[0])?;

    let mut out = io::stdout().lock();
    let mut object = json::object(&mut out)?;
    object.field("repository", repo.name())?;
    {
        let mut array = object.array("tags")?;
        write_tags(ctx, &repo, &mut array)?;
        array.finish()?;
    }
    object.finish()?;
    Ok(())
}

/// `api/repos/{repo}/tags/{sha}` - an annotated tag looked up by the
/// hash of the tag object itself.
pub fn get_tag(ctx: &Context, args: &[String]) -> Result<()> {
    let repo = GitRepository::open(&ctx.repos_dir, &args[0])?;
    let spec = &args[1];

    let oid = Oid::from_str(spec).map_err(|_| AppError::ObjectNotFound(spec.clone()))?;
    let tag = repo
        .repo()
        .find_tag(oid)
        .map_err(|_| AppError::ObjectNotFound(spec.clone()))?;

    if tag.target_type() != Some(ObjectType::Commit) {
        return Err(AppError::WrongObjectType {
            spec: spec.clone(),
            expected: "commit",
        });
    }
    let target_sha = tag.target_id().to_string();

    let mut out = io::stdout().lock();
    let mut object = json::object(&mut out)?;
    object.field("tag", tag.name().unwrap_or(""))?;
    object.field("sha", spec)?;
    object.field("url", &ctx.repo_url(repo.name(), &format!("tags/{spec}")))?;
    object.field("message", tag.message().unwrap_or(""))?;
    if let Some(tagger) = tag.tagger() {
        let mut signature = object.object("tagger")?;
        signature.field("name", tagger.name().unwrap_or(""))?;
        signature.field("email", tagger.email().unwrap_or(""))?;
        signature.field("date", &iso_date(tagger.when().seconds()))?;
        signature.finish()?;
    }
    {
        let mut target = object.object("object")?;
        target.field("type", "commit")?;
        target.field("sha", &target_sha)?;
        target.field(
            "url",
            &ctx.repo_url(repo.name(), &format!("commits/{target_sha}")),
        )?;
        target.finish()?;
    }
    object.finish()?;
    Ok(())
}
