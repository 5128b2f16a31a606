use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use cmt_core::{CmtDecoder, ModuleInfo, ModuleName};

use crate::cache::Cache;
use crate::progress::Progress;

const SOURCE_EXTENSIONS: &[&str] = &["res", "re", "ml"];

/// Options governing the extractor's optional heuristics.
#[derive(Debug, Clone, Copy)]
pub struct ExtractOptions {
    /// Apply the best-effort substring check on the source file (when
    /// available) to drop imports the compiler recorded but the
    /// source text does not appear to reference. On by default.
    pub source_heuristic: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        ExtractOptions {
            source_heuristic: true,
        }
    }
}

/// Configuration threaded explicitly into extraction calls: no global
/// mutable cache handle, just a value passed down.
#[derive(Clone)]
pub struct ExtractConfig {
    pub cache: Option<Arc<dyn Cache>>,
    pub options: ExtractOptions,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        ExtractConfig {
            cache: None,
            options: ExtractOptions::default(),
        }
    }
}

/// Produces a [`ModuleInfo`] for one CMT path: decode, filter imports
/// down to project-local dependencies, resolve a source path.
/// Returns `None` only when the path's basename is not a valid module
/// name at all (in which case the path cannot become a project-local
/// node and is skipped upstream, matching
/// [`crate::inventory::project_module_names`]).
pub fn extract_module_info(
    cmt_path: &Path,
    decoder: &dyn CmtDecoder,
    config: &ExtractConfig,
    progress: &dyn Progress,
) -> Option<ModuleInfo> {
    let stem = cmt_path.file_name()?.to_str()?.strip_suffix(".cmt")?;
    let module_name = ModuleName::parse(stem).ok()?;

    if let Some(cache) = &config.cache {
        if let Some(info) = cache.get(cmt_path) {
            debug!(target: "cmt_ingest::extract", module = %module_name, "cache hit");
            return Some(info);
        }
    }

    let info = match decoder.decode(cmt_path) {
        Ok(cmt_info) => build_module_info(&module_name, cmt_path, &cmt_info, &config.options),
        Err(err) => {
            warn!(target: "cmt_ingest::extract", path = %cmt_path.display(), error = %err, "CMT decode failed, synthesizing empty ModuleInfo");
            ModuleInfo::empty(module_name, Some(cmt_path.display().to_string()))
        }
    };

    progress.on_module_extracted(info.name.as_str());

    if let Some(cache) = &config.cache {
        cache.put(cmt_path, &info);
    }

    Some(info)
}

fn build_module_info(
    module_name: &ModuleName,
    cmt_path: &Path,
    cmt_info: &cmt_core::CmtInfo,
    options: &ExtractOptions,
) -> ModuleInfo {
    let source_text = cmt_info
        .sourcefile
        .as_ref()
        .and_then(|path| std::fs::read_to_string(path).ok());

    let dependencies: Vec<ModuleName> = cmt_info
        .imports
        .iter()
        .filter_map(|(name, _digest)| {
            let candidate = ModuleName::parse(name).ok()?;
            if candidate.is_stdlib() {
                return None;
            }
            if &candidate == module_name {
                return None;
            }
            if options.source_heuristic {
                if let Some(text) = &source_text {
                    if !plausible_textual_use(text, candidate.as_str()) {
                        return None;
                    }
                }
            }
            Some(candidate)
        })
        .collect();

    let file_path = cmt_info
        .sourcefile
        .clone()
        .or_else(|| resolve_source_path(cmt_path, module_name.as_str()))
        .unwrap_or_else(|| cmt_path.display().to_string());

    ModuleInfo::new(
        module_name.clone(),
        dependencies,
        cmt_info.interface_digest,
        None,
        Some(file_path),
    )
}

/// Best-effort check that `name` is plausibly referenced in `source`
/// via a handful of common reference shapes. Allowed to
/// over-approximate (a false positive just means an import survives
/// that wouldn't strictly need to).
fn plausible_textual_use(source: &str, name: &str) -> bool {
    let patterns = [
        format!("open {name}"),
        format!("{name}."),
        format!("include {name}"),
        format!("module type of {name}"),
        format!("= {name}"),
        format!(", {name},"),
        format!(", {name})"),
        format!("({name},"),
    ];
    patterns.iter().any(|p| source.contains(p.as_str()))
}

/// Best-effort source-file resolution: search the CMT's own
/// directory, then sibling `src/` directories,
/// then common `lib/bs/src` → `src/` transpositions. Returns `None`
/// if nothing is found; the caller falls back to the CMT path itself.
fn resolve_source_path(cmt_path: &Path, stem: &str) -> Option<String> {
    let dir = cmt_path.parent().unwrap_or_else(|| Path::new("."));

    if let Some(found) = find_in_dir(dir, stem) {
        return Some(found);
    }

    let mut sibling_src_dirs = vec![dir.join("src")];
    if let Some(parent) = dir.parent() {
        sibling_src_dirs.push(parent.join("src"));
    }
    for candidate_dir in &sibling_src_dirs {
        if let Some(found) = find_in_dir(candidate_dir, stem) {
            return Some(found);
        }
    }

    let path_str = cmt_path.to_string_lossy();
    if let Some(idx) = path_str.find("lib/bs/") {
        let mut transposed = path_str[..idx].to_string();
        transposed.push_str(&path_str[idx + "lib/bs/".len()..]);
        if let Some(tdir) = PathBuf::from(&transposed).parent() {
            if let Some(found) = find_in_dir(tdir, stem) {
                return Some(found);
            }
        }
    }

    None
}

fn find_in_dir(dir: &Path, stem: &str) -> Option<String> {
    for ext in SOURCE_EXTENSIONS {
        let candidate = dir.join(format!("{stem}.{ext}"));
        if candidate.exists() {
            return Some(candidate.display().to_string());
        }
    }
    None
}
