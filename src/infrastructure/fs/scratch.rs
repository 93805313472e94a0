//! Scratch Files
//!
//! Tracks documents written under the state directory so a single cleanup
//! routine can remove them, whether the run succeeds, fails or is interrupted.
//!
//! - Transient files (trust policies) are always removed.
//! - Generated files (the option-settings document) survive unless
//!   `clean_all` is set.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Shared registry of locally written documents
///
/// Cloning shares the registry, so the interrupt handler and the adapters see
/// the same set of files.
#[derive(Debug, Clone)]
pub struct ScratchFiles {
    dir: PathBuf,
    tracked: Arc<Mutex<Tracked>>,
}

#[derive(Debug, Default)]
struct Tracked {
    transient: Vec<PathBuf>,
    generated: Vec<PathBuf>,
}

impl ScratchFiles {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            tracked: Arc::new(Mutex::new(Tracked::default())),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `name` under the state directory; removed by every cleanup
    pub fn write_transient(&self, name: &str, contents: &[u8]) -> io::Result<PathBuf> {
        let path = self.dir.join(name);
        write_atomic(&path, contents)?;
        self.track(|t| push_unique(&mut t.transient, &path));
        Ok(path)
    }

    /// Overwrite `path`; removed at cleanup only when `clean_all` is set
    pub fn write_generated(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        write_atomic(path, contents)?;
        self.track(|t| push_unique(&mut t.generated, path));
        Ok(())
    }

    /// Remove tracked files; returns the paths actually removed
    pub fn cleanup(&self, clean_all: bool) -> Vec<PathBuf> {
        let paths = {
            let Ok(mut tracked) = self.tracked.lock() else {
                return Vec::new();
            };
            let mut paths = std::mem::take(&mut tracked.transient);
            if clean_all {
                paths.append(&mut tracked.generated);
            }
            paths
        };

        let removed: Vec<PathBuf> = paths
            .into_iter()
            .filter(|p| fs::remove_file(p).is_ok())
            .collect();

        if clean_all {
            // Only succeeds when nothing else lives there
            let _ = fs::remove_dir(&self.dir);
        }
        removed
    }

    fn track(&self, f: impl FnOnce(&mut Tracked)) {
        if let Ok(mut tracked) = self.tracked.lock() {
            f(&mut tracked);
        }
    }
}

fn push_unique(paths: &mut Vec<PathBuf>, path: &Path) {
    if !paths.iter().any(|p| p == path) {
        paths.push(path.to_path_buf());
    }
}

/// Write through a sibling temp file and rename into place
fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(contents)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
