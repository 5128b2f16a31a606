use std::path::Path;

use cmt_ingest::Progress;

/// Prints discovery/extraction progress to stderr, gated on
/// `-v/--verbose` (or `VERBOSE=1`).
pub struct VerboseProgress {
    pub enabled: bool,
}

impl Progress for VerboseProgress {
    fn on_file_found(&self, path: &Path) {
        if self.enabled {
            eprintln!("found {}", path.display());
        }
    }

    fn on_dir_error(&self, path: &Path, message: &str) {
        if self.enabled {
            eprintln!("skipping {}: {message}", path.display());
        }
    }

    fn on_module_extracted(&self, name: &str) {
        if self.enabled {
            eprintln!("extracted {name}");
        }
    }
}
