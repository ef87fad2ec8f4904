use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A writable copy of the `build-ok` fixture tree.
pub struct ResourceTree {
    // We keep _temp_dir to ensure the directory is not dropped until the test is done
    _temp_dir: TempDir,
    root: PathBuf,
}

pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn copy_dir(from: &Path, to: &Path) {
    fs::create_dir_all(to).expect("failed to create fixture dir");
    for entry in fs::read_dir(from).expect("failed to read fixture dir") {
        let entry = entry.expect("failed to read fixture entry");
        let target = to.join(entry.file_name());
        if entry.path().is_dir() {
            copy_dir(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), target).expect("failed to copy fixture file");
        }
    }
}

impl ResourceTree {
    pub fn minimal() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().join("resources");
        copy_dir(&fixture_path("build-ok"), &root);
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes (or overwrites) a file relative to the tree root.
    pub fn write(&self, relative: &str, content: &str) {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create dir");
        }
        fs::write(path, content).expect("failed to write fixture file");
    }
}
