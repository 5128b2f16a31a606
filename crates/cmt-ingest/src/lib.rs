//! CMT discovery and the `ModuleInfo` extraction pipeline: path
//! walking, project inventory, the cache collaborator, and the
//! extractor algorithm that turns a decoded CMT file into a
//! normalized module record.

mod cache;
mod extract;
mod inventory;
mod progress;
mod walk;

pub use cache::{Cache, FileCache};
pub use extract::{extract_module_info, ExtractConfig, ExtractOptions};
pub use inventory::{module_name_for_cmt_path, project_module_names};
pub use progress::{NullProgress, Progress};
pub use walk::discover_cmt_files;

use std::path::PathBuf;

use cmt_core::{CmtDecoder, ModuleInfo};

/// Runs discovery + extraction for every CMT file reachable from
/// `inputs`, returning one `ModuleInfo` per successfully-named CMT
/// path. This is the convenience entry point `cmt-cli` and
/// `cmt-graph`'s integration tests use; `cmt-ingest::extract` and
/// `cmt-ingest::walk` remain independently usable for callers that
/// need finer control (e.g. parallel extraction via `rayon`, see
/// [`extract_all_parallel`]).
pub fn discover_and_extract(
    inputs: &[PathBuf],
    decoder: &dyn CmtDecoder,
    config: &ExtractConfig,
    progress: &dyn Progress,
) -> Vec<ModuleInfo> {
    let cmt_paths = discover_cmt_files(inputs, progress);
    cmt_paths
        .iter()
        .filter_map(|path| extract_module_info(path, decoder, config, progress))
        .collect()
}

/// Like [`discover_and_extract`], but extracts independent CMT files
/// in parallel via a bounded `rayon` thread pool, joining all workers
/// before returning. Each CMT file is decoded and normalized
/// independently with no shared mutable state between workers other
/// than the optional cache, which guards its own locking. `decoder`
/// must be `Sync` so it can be shared across worker threads.
pub fn extract_all_parallel(
    cmt_paths: &[PathBuf],
    decoder: &(dyn CmtDecoder + Sync),
    config: &ExtractConfig,
) -> Vec<ModuleInfo> {
    use rayon::prelude::*;

    cmt_paths
        .par_iter()
        .filter_map(|path| extract_module_info(path, decoder, config, &NullProgress))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmt_core::{Annots, CmtInfo, MockCmtDecoder, ModuleName, Structure};
    use std::fs;

    fn info(name: &str, imports: &[&str]) -> CmtInfo {
        CmtInfo {
            modname: name.into(),
            annots: Annots::Implementation(Structure::default()),
            value_dependencies: Vec::new(),
            sourcefile: None,
            imports: imports.iter().map(|s| (s.to_string(), None)).collect(),
            interface_digest: None,
        }
    }

    #[test]
    fn end_to_end_discovery_and_extraction() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["App", "Math", "Utils"] {
            fs::write(dir.path().join(format!("{name}.cmt")), b"").unwrap();
        }

        let decoder = MockCmtDecoder::new()
            .with_entry(dir.path().join("App.cmt"), info("App", &["Math", "Utils"]))
            .with_entry(dir.path().join("Math.cmt"), info("Math", &["Utils"]))
            .with_entry(dir.path().join("Utils.cmt"), info("Utils", &[]));

        let config = ExtractConfig::default();
        let infos = discover_and_extract(
            &[dir.path().to_path_buf()],
            &decoder,
            &config,
            &NullProgress,
        );

        assert_eq!(infos.len(), 3);
        let app = infos.iter().find(|i| i.name.as_str() == "App").unwrap();
        assert_eq!(
            app.dependencies,
            vec![
                ModuleName::parse("Math").unwrap(),
                ModuleName::parse("Utils").unwrap()
            ]
        );
    }

    #[test]
    fn parallel_extraction_matches_sequential() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["A", "B", "C", "D"] {
            fs::write(dir.path().join(format!("{name}.cmt")), b"").unwrap();
        }
        let decoder = MockCmtDecoder::new()
            .with_entry(dir.path().join("A.cmt"), info("A", &["B"]))
            .with_entry(dir.path().join("B.cmt"), info("B", &["C"]))
            .with_entry(dir.path().join("C.cmt"), info("C", &["D"]))
            .with_entry(dir.path().join("D.cmt"), info("D", &[]));

        let cmt_paths = discover_cmt_files(&[dir.path().to_path_buf()], &NullProgress);
        let config = ExtractConfig::default();
        let mut parallel = extract_all_parallel(&cmt_paths, &decoder, &config);
        parallel.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()));

        assert_eq!(parallel.len(), 4);
        assert_eq!(parallel[0].name.as_str(), "A");
    }
}
