use anyhow::Result;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Finds `.java` sources under a root, honouring ignore files.
pub struct FileWalker {
    root: PathBuf,
}

impl FileWalker {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn walk(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        let walker = WalkBuilder::new(&self.root)
            .hidden(false)  // Include hidden files except .git
            .git_ignore(true)  // Respect .gitignore
            .git_global(true)  // Respect global gitignore
            .git_exclude(true)  // Respect .git/info/exclude
            .require_git(false)  // Work even if not a git repo
            .build();

        for entry in walker {
            let entry = entry?;
            let path = entry.path();

            if path.is_file() && path.extension().is_some_and(|ext| ext == "java") {
                // Build output directories may hold generated copies
                let relative = path.strip_prefix(&self.root).unwrap_or(path);
                if relative
                    .components()
                    .any(|c| matches!(c.as_os_str().to_str(), Some("target" | "build")))
                {
                    continue;
                }

                debug!("Found file: {:?}", path);
                files.push(path.to_path_buf());
            }
        }

        files.sort();
        info!("Found {} files in {:?}", files.len(), self.root);
        Ok(files)
    }

    /// Java requires the public class of a file to share its name.
    pub fn target_class_name(path: &Path) -> Option<String> {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
    }
}
