//! Cross-module counting of how many times a specific value binding
//! is referenced, given its defining module, name, and (optionally)
//! its defining source line.

mod count;
mod locate;
pub mod sentinel;

use std::collections::BTreeMap;
use std::path::PathBuf;

use cmt_core::{Annots, CmtDecoder, DependencyGraph, ModuleName};
use tracing::warn;

pub use locate::OwnerBinding;

/// The value binding to trace: its owning module, its name, and
/// (optionally) the source line its `let` starts on, to disambiguate
/// same-named bindings in the same module.
pub struct UsageQuery<'a> {
    pub module_name: &'a ModuleName,
    pub value_name: &'a str,
    pub line_number: Option<u32>,
}

/// For each module in `{query.module_name} ∪ find_dependents(graph,
/// query.module_name)`, in that order, the number of textual
/// references to the targeted binding, or a sentinel from
/// [`sentinel`] when that module's CMT couldn't be read or decoded.
pub fn count_value_usage(
    query: &UsageQuery,
    graph: &DependencyGraph,
    cmt_paths: &BTreeMap<ModuleName, PathBuf>,
    decoder: &dyn CmtDecoder,
) -> Vec<(ModuleName, i64)> {
    let mut candidates = vec![query.module_name.clone()];
    for dependent in cmt_graph::find_dependents(graph, query.module_name) {
        if dependent != *query.module_name {
            candidates.push(dependent);
        }
    }

    let owner_structure = match decode_structure(query.module_name, cmt_paths, decoder) {
        Ok(structure) => structure,
        Err(sentinel_value) => {
            return candidates
                .into_iter()
                .map(|name| (name, sentinel_value))
                .collect();
        }
    };

    let Some(owner_binding) = locate::find_binding(&owner_structure, query.value_name, query.line_number) else {
        warn!(
            target: "cmt_usage",
            module = %query.module_name,
            value = query.value_name,
            "binding not found in owner's implementation structure"
        );
        return candidates
            .into_iter()
            .map(|name| (name, sentinel::NO_IMPLEMENTATION_AST))
            .collect();
    };

    candidates
        .into_iter()
        .map(|candidate| {
            let count = match decode_structure(&candidate, cmt_paths, decoder) {
                Ok(structure) => count::count_references(
                    &structure,
                    query.module_name.as_str(),
                    &owner_binding,
                    query.value_name,
                    candidate.as_str(),
                ),
                Err(sentinel_value) => sentinel_value,
            };
            (candidate, count)
        })
        .collect()
}

/// Decodes `module`'s CMT and extracts its `Implementation` structure,
/// or one of the negative sentinel codes describing why it couldn't.
fn decode_structure(
    module: &ModuleName,
    cmt_paths: &BTreeMap<ModuleName, PathBuf>,
    decoder: &dyn CmtDecoder,
) -> Result<cmt_core::Structure, i64> {
    let path = cmt_paths.get(module).ok_or(sentinel::NO_CMT_FILE)?;
    let info = decoder.decode(path).map_err(|_| sentinel::CMT_READ_ERROR)?;
    match info.annots {
        Annots::Implementation(structure) => Ok(structure),
        _ => Err(sentinel::NO_IMPLEMENTATION_AST),
    }
}
