//! Tree entry listing.

use std::io;

use git2::{ObjectType, Oid};

use crate::error::{AppError, Result};
use crate::git::GitRepository;
use crate::json;

use super::Context;

/// `api/repos/{repo}/trees/{sha}` - the entries of one tree object.
///
/// Entry modes are reported in octal to match the git wire form. Tree
/// objects do not record blob sizes, so blobs cost an extra lookup.
pub fn get_tree(ctx: &Context, args: &[String]) -> Result<()> {
    let repo = GitRepository::open(&ctx.repos_dir, &args[0])?;
    let spec = &args[1];

    let oid = Oid::from_str(spec).map_err(|_| AppError::ObjectNotFound(spec.clone()))?;
    let tree = repo
        .repo()
        .find_tree(oid)
        .map_err(|_| AppError::ObjectNotFound(spec.clone()))?;

    let mut out = io::stdout().lock();
    let mut document = json::object(&mut out)?;
    document.field("sha", spec)?;
    document.field("url", &ctx.repo_url(repo.name(), &format!("trees/{spec}")))?;
    {
        let mut entries = document.array("tree")?;
        for entry in tree.iter() {
            let sha = entry.id().to_string();

            let mut element = entries.push_object()?;
            element.field("path", entry.name().unwrap_or(""))?;
            element.field("mode", &format!("{:o}", entry.filemode()))?;
            element.field("sha", &sha)?;
            match entry.kind() {
                Some(ObjectType::Blob) => {
                    let blob = repo.repo().find_blob(entry.id())?;
                    element.field("type", "blob")?;
                    element.field("size", blob.size())?;
                    element.field("url", &ctx.repo_url(repo.name(), &format!("blobs/{sha}")))?;
                }
                Some(ObjectType::Tree) => {
                    element.field("type", "tree")?;
                    element.field("url", &ctx.repo_url(repo.name(), &format!("trees/{sha}")))?;
                }
                _ => {}
            }
            element.finish()?;
        }
        entries.finish()?;
    }
    document.finish()?;
    Ok(())
}
