//! Filesystem utilities for code generation

use crate::codegen::types::GeneratedArtifact;
use crate::error::{GenerationError, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Write content to a file, creating parent directories if needed
pub fn write_file<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> io::Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, contents)
}

/// Write a rendered batch under `project_root`, in order.
///
/// Existing files are overwritten. Returns the relative paths written. The
/// first failure stops the batch; files already written stay on disk.
pub fn write_artifacts(project_root: &Path, artifacts: &[GeneratedArtifact]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(artifacts.len());

    for artifact in artifacts {
        let target = project_root.join(&artifact.relative_path);
        write_file(&target, &artifact.content).map_err(|source| GenerationError::FileWrite {
            path: target.clone(),
            source,
        })?;
        tracing::debug!(path = %artifact.relative_path.display(), bytes = artifact.content.len(), "wrote artifact");
        written.push(artifact.relative_path.clone());
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn artifact(path: &str, content: &str) -> GeneratedArtifact {
        GeneratedArtifact {
            key: "page".to_string(),
            relative_path: PathBuf::from(path),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_write_artifacts_creates_directories() {
        let dir = TempDir::new().unwrap();
        let written = write_artifacts(
            dir.path(),
            &[artifact("src/app/dashboard/posts/all/page.tsx", "export default 1;\n")],
        )
        .unwrap();

        assert_eq!(written, vec![PathBuf::from("src/app/dashboard/posts/all/page.tsx")]);
        let content = fs::read_to_string(dir.path().join("src/app/dashboard/posts/all/page.tsx")).unwrap();
        assert_eq!(content, "export default 1;\n");
    }

    #[test]
    fn test_write_artifacts_overwrites() {
        let dir = TempDir::new().unwrap();
        write_artifacts(dir.path(), &[artifact("a/b.ts", "old")]).unwrap();
        write_artifacts(dir.path(), &[artifact("a/b.ts", "new")]).unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("a/b.ts")).unwrap(), "new");
    }

    #[test]
    fn test_write_failure_names_path() {
        let dir = TempDir::new().unwrap();
        // a regular file where a directory is needed
        fs::write(dir.path().join("blocked"), "x").unwrap();
        let err = write_artifacts(dir.path(), &[artifact("blocked/page.tsx", "y")]).unwrap_err();
        match err {
            GenerationError::FileWrite { path, .. } => assert!(path.ends_with("blocked/page.tsx")),
            other => panic!("unexpected error {:?}", other),
        }
    }
}
