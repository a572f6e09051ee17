//! Blob metadata and raw file passthrough.

use std::io::{self, Write};

use base64::{Engine as _, engine::general_purpose};
use git2::Oid;

use crate::error::{AppError, Result};
use crate::git::GitRepository;
use crate::json;

use super::Context;

/// Base64-encodes `data` with a line break every 60 characters, the
/// wrapping GitHub's blob API uses.
fn wrap_base64(data: &[u8]) -> String {
    let encoded = general_purpose::STANDARD.encode(data);
    let mut wrapped = String::with_capacity(encoded.len() + encoded.len() / 60 + 1);
    for (index, c) in encoded.chars().enumerate() {
        if index > 0 && index % 60 == 0 {
            wrapped.push('\n');
        }
        wrapped.push(c);
    }
    wrapped
}

/// `api/repos/{repo}/blobs/{sha}` - blob content as base64 with its
/// metadata.
pub fn get_blob(ctx: &Context, args: &[String]) -> Result<()> {
    let repo = GitRepository::open(&ctx.repos_dir, &args[0])?;
    let spec = &args[1];

    let oid = Oid::from_str(spec).map_err(|_| AppError::ObjectNotFound(spec.clone()))?;
    let blob = repo
        .repo()
        .find_blob(oid)
        .map_err(|_| AppError::ObjectNotFound(spec.clone()))?;

    let mut out = io::stdout().lock();
    let mut document = json::object(&mut out)?;
    document.field("content", &wrap_base64(blob.content()))?;
    document.field("encoding", "base64")?;
    document.field("sha", spec)?;
    document.field("url", &ctx.repo_url(repo.name(), &format!("blobs/{spec}")))?;
    document.field("size", blob.size())?;
    document.finish()?;
    Ok(())
}

/// `api/repos/{repo}/file/{spec}` - raw blob bytes with no JSON
/// envelope.
pub fn get_file(ctx: &Context, args: &[String]) -> Result<()> {
    let repo = GitRepository::open(&ctx.repos_dir, &args[0])?;
    let spec = &args[1];

    let object = repo.revparse(spec)?;
    let blob = object.as_blob().ok_or_else(|| AppError::WrongObjectType {
        spec: spec.clone(),
        expected: "file",
    })?;

    io::stdout().lock().write_all(blob.content())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::wrap_base64;

    #[test]
    fn short_content_is_unwrapped() {
        assert_eq!(wrap_base64(b"hello"), "aGVsbG8=");
        assert_eq!(wrap_base64(b""), "");
    }

    #[test]
    fn long_content_breaks_every_sixty_characters() {
        let wrapped = wrap_base64(&[0u8; 90]);
        let lines: Vec<&str> = wrapped.split('\n').collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].len(), 60);
        assert!(lines[1].len() <= 60);
    }
}
