use std::path::Path;

use git2::Repository;
use tracing::debug;

use crate::error::{AppError, Result};

/// A named repository inside the collection root.
pub struct GitRepository {
    repo: Repository,
    name: String,
}

impl GitRepository {
    /// Opens the repository called `name` under `repos_dir`.
    pub fn open(repos_dir: &Path, name: &str) -> Result<Self> {
        let path = repos_dir.join(name);
        debug!(path = %path.display(), "opening repository");
        let repo = Repository::open(&path)
            .map_err(|e| AppError::RepoNotFound(format!("{}: {}", name, e.message())))?;

        Ok(Self {
            repo,
            name: name.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The underlying libgit2 repository.
    pub fn repo(&self) -> &Repository {
        &self.repo
    }

    /// Resolves `spec`, which may be a hex hash or a revision expression
    /// such as a branch or tag name.
    pub fn revparse(&self, spec: &str) -> Result<git2::Object<'_>> {
        self.repo
            .revparse_single(spec)
            .map_err(|_| AppError::ObjectNotFound(spec.to_string()))
    }
}

/// Names of the directories under `repos_dir` that open as git
/// repositories, sorted case-insensitively.
pub fn list_repositories(repos_dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();

    for entry in std::fs::read_dir(repos_dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') {
            continue;
        }

        if Repository::open(&path).is_ok() {
            names.push(name);
        }
    }

    names.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()));
    Ok(names)
}
