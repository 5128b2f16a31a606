use std::path::Path;

/// Progress/diagnostic sink for the walker and extractor. Kept as a
/// trait so library code never writes to stdout/stderr directly; the
/// CLI supplies an implementation that prints under `-v/--verbose`
/// (see `cmt-cli`). Library-level diagnostics also go through
/// `tracing`, independent of whether a `Progress` sink is attached.
pub trait Progress: Send + Sync {
    fn on_file_found(&self, _path: &Path) {}
    fn on_dir_error(&self, _path: &Path, _message: &str) {}
    fn on_module_extracted(&self, _name: &str) {}
}

/// A `Progress` implementation that discards everything. Used when
/// the caller has no interest in progress callbacks.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgress;

impl Progress for NullProgress {}
