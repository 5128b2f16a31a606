use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ModuleName;

/// Per-node metadata attached to a [`DependencyGraph`] node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleMetadata {
    pub path: Option<String>,
}

/// The dependency graph data entity: keys of `deps` and `meta` are
/// always identical sets (a node always exists in both maps
/// together). A `BTreeMap` is used rather than a hash map so key
/// enumeration is already in ascending string order, giving every
/// downstream consumer (rendering, iteration) a deterministic order
/// without an extra sort.
///
/// Operations over this type (build, query, filter, focus, cycle
/// detection, metrics) live in `cmt-graph`; this crate only owns the
/// data shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyGraph {
    pub deps: BTreeMap<ModuleName, Vec<ModuleName>>,
    pub meta: BTreeMap<ModuleName, ModuleMetadata>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        DependencyGraph {
            deps: BTreeMap::new(),
            meta: BTreeMap::new(),
        }
    }

    pub fn contains(&self, name: &ModuleName) -> bool {
        self.deps.contains_key(name)
    }

    pub fn node_count(&self) -> usize {
        self.deps.len()
    }

    /// Debug-only check that the keys of `deps` and `meta` are
    /// identical, matching the data-model invariant. Exposed for
    /// tests; not called on the hot path.
    pub fn keys_match(&self) -> bool {
        self.deps.keys().eq(self.meta.keys())
    }
}
