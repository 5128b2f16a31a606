use cmt_core::{DependencyGraph, ModuleInfo, ModuleMetadata};

/// Builds a [`DependencyGraph`] from a flat list of extracted modules.
/// Later entries for the same module name overwrite earlier ones,
/// matching how a caller would re-run extraction over a changed file
/// set without restarting the whole inventory.
pub fn build(infos: &[ModuleInfo]) -> DependencyGraph {
    let mut graph = DependencyGraph::new();
    for info in infos {
        graph.deps.insert(info.name.clone(), info.dependencies.clone());
        graph.meta.insert(
            info.name.clone(),
            ModuleMetadata {
                path: info.file_path.clone(),
            },
        );
    }
    graph
}
