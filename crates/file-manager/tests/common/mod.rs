use std::fs;
use std::path::Path;

use file_manager::{Capabilities, FileManager};
use tempfile::TempDir;

/// A temporary tree:
///
/// ```text
/// docs/
///   2024/
///     q1.txt
///   notes.md
/// photos/
/// a.txt
/// B.txt
/// ```
pub struct Fixture {
    pub dir: TempDir,
    pub manager: FileManager,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_capabilities(Capabilities::all())
    }

    pub fn with_capabilities(capabilities: Capabilities) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();

        fs::create_dir_all(root.join("docs/2024")).expect("mkdir docs/2024");
        fs::create_dir(root.join("photos")).expect("mkdir photos");
        fs::write(root.join("docs/2024/q1.txt"), b"quarter one").expect("write q1");
        fs::write(root.join("docs/notes.md"), b"# notes").expect("write notes");
        fs::write(root.join("a.txt"), b"alpha").expect("write a");
        fs::write(root.join("B.txt"), b"bravo").expect("write B");

        let manager = FileManager::with_root(root, capabilities).expect("file manager");
        Self { dir, manager }
    }

    pub fn path(&self, relative: &str) -> std::path::PathBuf {
        self.dir.path().join(relative)
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.path(relative).exists()
    }

    pub fn snapshot(&self) -> Vec<String> {
        let mut paths: Vec<String> = walk(self.dir.path(), self.dir.path());
        paths.sort();
        paths
    }
}

fn walk(root: &Path, dir: &Path) -> Vec<String> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).expect("read dir") {
        let entry = entry.expect("entry");
        let path = entry.path();
        let relative = path
            .strip_prefix(root)
            .expect("inside root")
            .to_string_lossy()
            .replace('\\', "/");
        paths.push(relative);
        if path.is_dir() {
            paths.extend(walk(root, &path));
        }
    }
    paths
}
