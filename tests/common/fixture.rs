//! Test fixture for a working repository with a bare `origin`

use std::fs;
use std::path::{Path, PathBuf};

use git2::{Repository, RepositoryInitOptions, Signature};
use tempfile::TempDir;

use super::helpers::git;

/// A clone-like working repository pushing to a bare remote
pub struct TestFixture {
    /// Temporary directory holding both repositories
    _temp_dir: TempDir,
    /// Working repository
    pub repo_path: PathBuf,
    /// Bare repository registered as `origin`
    pub remote_path: PathBuf,
}

impl TestFixture {
    /// Create the fixture and push `branches` (plus `master`) to `origin`
    ///
    /// Each branch gets one commit on top of `master`.
    pub fn new(branches: &[&str]) -> Result<Self, Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        // Canonicalize to handle symlinked temp dirs.
        let root = temp_dir
            .path()
            .canonicalize()
            .unwrap_or_else(|_| temp_dir.path().to_path_buf());
        let repo_path = root.join("work");
        let remote_path = root.join("origin.git");

        // Pin the default branch so tests don't depend on init.defaultBranch.
        let mut init_opts = RepositoryInitOptions::new();
        init_opts.initial_head("master");
        let repo = Repository::init_opts(&repo_path, &init_opts)?;
        repo.set_head("refs/heads/master")?;
        {
            let mut config = repo.config()?;
            config.set_str("user.name", "Test")?;
            config.set_str("user.email", "test@test.com")?;
        }
        initial_commit(&repo, &repo_path)?;

        Repository::init_bare(&remote_path)?;
        let remote = remote_path.to_string_lossy().into_owned();
        git(&repo_path, &["remote", "add", "origin", &remote])?;
        git(&repo_path, &["push", "origin", "master"])?;

        for branch in branches {
            git(&repo_path, &["checkout", "-b", branch, "master"])?;
            let file = format!("{}.txt", branch.replace('/', "-"));
            fs::write(repo_path.join(&file), branch)?;
            git(&repo_path, &["add", &file])?;
            git(&repo_path, &["commit", "-m", &format!("Work on {branch}")])?;
            git(&repo_path, &["push", "origin", branch])?;
        }
        git(&repo_path, &["checkout", "master"])?;
        git(&repo_path, &["fetch", "origin"])?;

        Ok(Self {
            _temp_dir: temp_dir,
            repo_path,
            remote_path,
        })
    }

    /// Branch names present in the bare remote
    pub fn remote_heads(&self) -> Result<Vec<String>, Box<dyn std::error::Error>> {
        let output = git(
            &self.remote_path,
            &["for-each-ref", "--format=%(refname:short)", "refs/heads"],
        )?;
        Ok(output.lines().map(String::from).collect())
    }
}

fn initial_commit(repo: &Repository, root: &Path) -> Result<(), Box<dyn std::error::Error>> {
    fs::write(root.join("README.md"), "# Test Repository\n")?;

    let mut index = repo.index()?;
    index.add_path(Path::new("README.md"))?;
    index.write()?;

    let tree_id = index.write_tree()?;
    let tree = repo.find_tree(tree_id)?;
    let sig = Signature::now("Test", "test@test.com")?;
    repo.commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])?;
    Ok(())
}
