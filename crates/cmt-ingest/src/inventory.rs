use std::collections::BTreeSet;
use std::path::Path;

use cmt_core::ModuleName;

/// Derives the set of normalized project module names from a list of
/// discovered CMT paths: `normalize(basename_without_extension(path))`
/// for each one. Paths whose basename is not a valid module name are
/// skipped (they cannot become project-local nodes).
pub fn project_module_names(cmt_paths: &[impl AsRef<Path>]) -> BTreeSet<ModuleName> {
    cmt_paths
        .iter()
        .filter_map(|path| module_name_for_cmt_path(path.as_ref()))
        .collect()
}

/// `normalize(basename_without_extension(path))` for a single CMT
/// path. Returns `None` if the basename cannot be parsed as a module
/// name.
pub fn module_name_for_cmt_path(path: &Path) -> Option<ModuleName> {
    let stem = path.file_name()?.to_str()?.strip_suffix(".cmt")?;
    ModuleName::parse(stem).ok()
}
