//! Path containment for the base directory.
//!
//! Relative paths are joined lexically: nothing is looked up on disk, so a
//! path can be checked before the file it names exists. Symlinks inside the
//! base directory are not resolved.

use crate::config::ConfigError;
use crate::error::{SyncError, SyncResult};
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Sandbox {
    root: PathBuf,
}

impl Sandbox {
    /// Build a sandbox rooted at `base_dir`, which must be an existing directory.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let base_dir = base_dir.as_ref();
        let root = std::fs::canonicalize(base_dir).map_err(|e| ConfigError::Invalid {
            message: format!("Base directory '{}': {}", base_dir.display(), e),
        })?;

        if !root.is_dir() {
            return Err(ConfigError::Invalid {
                message: format!("Base directory '{}' is not a directory", root.display()),
            });
        }

        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Join `relative` onto the root and reject anything that escapes it.
    pub fn resolve(&self, relative: &str) -> SyncResult<PathBuf> {
        if relative.is_empty() {
            return Err(SyncError::EmptyPath);
        }

        let joined = join_lexically(&self.root, Path::new(relative));
        if !joined.starts_with(&self.root) {
            return Err(SyncError::OutsideSandbox {
                path: relative.to_string(),
            });
        }

        Ok(joined)
    }

    /// Normalized form of a resolved path relative to the root, as handed to
    /// commands that run inside the base directory.
    pub fn relative(&self, resolved: &Path) -> SyncResult<PathBuf> {
        resolved
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .map_err(|_| SyncError::OutsideSandbox {
                path: resolved.display().to_string(),
            })
    }
}

/// Append `relative` to `base`, folding `.` and `..` without touching the
/// filesystem. A leading root is treated as relative to `base`.
fn join_lexically(base: &Path, relative: &Path) -> PathBuf {
    let mut joined = base.to_path_buf();
    for component in relative.components() {
        match component {
            Component::Normal(part) => joined.push(part),
            Component::ParentDir => {
                joined.pop();
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    joined
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sandbox() -> (TempDir, Sandbox) {
        let dir = TempDir::new().unwrap();
        let sandbox = Sandbox::new(dir.path()).unwrap();
        (dir, sandbox)
    }

    #[test]
    fn test_resolve_inside_root() {
        let (_dir, sandbox) = sandbox();

        let resolved = sandbox.resolve("manifest.json").unwrap();
        assert_eq!(resolved, sandbox.root().join("manifest.json"));

        let resolved = sandbox.resolve("./src/../background.js").unwrap();
        assert_eq!(resolved, sandbox.root().join("background.js"));

        let resolved = sandbox.resolve("src/nested/file.js").unwrap();
        assert!(resolved.starts_with(sandbox.root()));
    }

    #[test]
    fn test_leading_slash_stays_inside() {
        let (_dir, sandbox) = sandbox();
        let resolved = sandbox.resolve("/etc/passwd").unwrap();
        assert_eq!(resolved, sandbox.root().join("etc/passwd"));
    }

    #[test]
    fn test_escape_is_rejected() {
        let (_dir, sandbox) = sandbox();

        for path in ["../../etc/passwd", "..", "src/../../outside.txt", "./../x"] {
            match sandbox.resolve(path) {
                Err(SyncError::OutsideSandbox { path: rejected }) => assert_eq!(rejected, path),
                other => panic!("Expected sandbox violation for {}, got {:?}", path, other),
            }
        }
    }

    #[test]
    fn test_sibling_prefix_is_rejected() {
        let (_dir, sandbox) = sandbox();
        let name = sandbox
            .root()
            .file_name()
            .unwrap()
            .to_string_lossy()
            .to_string();

        let sibling = format!("../{}-other/file.txt", name);
        assert!(matches!(
            sandbox.resolve(&sibling),
            Err(SyncError::OutsideSandbox { .. })
        ));
    }

    #[test]
    fn test_relative_to_root() {
        let (_dir, sandbox) = sandbox();
        let resolved = sandbox.resolve("./src/./popup.js").unwrap();
        assert_eq!(
            sandbox.relative(&resolved).unwrap(),
            PathBuf::from("src/popup.js")
        );

        assert!(sandbox.relative(Path::new("/elsewhere/file")).is_err());
    }

    #[test]
    fn test_empty_path_is_rejected() {
        let (_dir, sandbox) = sandbox();
        assert!(matches!(sandbox.resolve(""), Err(SyncError::EmptyPath)));
    }

    #[test]
    fn test_missing_base_dir() {
        let result = Sandbox::new("/nonexistent/snippet-sync/base");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_base_dir_must_be_directory() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let result = Sandbox::new(file.path());
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }
}
