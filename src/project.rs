use std::path::{Path, PathBuf};

const PROJECT_MARKER: &str = "tsconfig.json";

/// Find the TypeScript project root by walking up from a directory.
/// Returns the nearest ancestor containing tsconfig.json. The filesystem
/// root itself is never checked, so a marker at / does not count.
pub fn find_project_root(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        // Stop before the filesystem root
        current.parent()?;

        if current.join(PROJECT_MARKER).exists() {
            return Some(current);
        }

        // Move up
        if !current.pop() {
            return None;
        }
    }
}
