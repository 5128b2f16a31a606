use serde::{Deserialize, Serialize};

use crate::{Digest, ModuleName};

/// Normalized, immutable record of one module's identity and
/// project-local dependencies, produced by the extractor (see
/// `cmt-ingest`) and folded into a [`crate::DependencyGraph`] by the
/// graph builder (see `cmt-graph`).
///
/// `dependencies` is kept sorted ascending, contains no duplicates,
/// and never contains `name` itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleInfo {
    pub name: ModuleName,
    pub dependencies: Vec<ModuleName>,
    pub interface_digest: Option<Digest>,
    pub implementation_digest: Option<Digest>,
    /// Best-guess path to the module's source file. Falls back to the
    /// CMT path itself when no source file can be located, so
    /// downstream consumers always have some path to show.
    pub file_path: Option<String>,
}

impl ModuleInfo {
    /// Builds a `ModuleInfo`, normalizing `dependencies` per the data
    /// model invariants: sorted ascending, deduplicated, and with any
    /// self-reference to `name` removed.
    pub fn new(
        name: ModuleName,
        mut dependencies: Vec<ModuleName>,
        interface_digest: Option<Digest>,
        implementation_digest: Option<Digest>,
        file_path: Option<String>,
    ) -> Self {
        dependencies.retain(|d| d != &name);
        dependencies.sort();
        dependencies.dedup();
        ModuleInfo {
            name,
            dependencies,
            interface_digest,
            implementation_digest,
            file_path,
        }
    }

    /// A `ModuleInfo` synthesized when CMT decoding failed: empty
    /// dependency list, no digests. A module that fails to decode
    /// still takes its place in the inventory rather than aborting the
    /// whole run.
    pub fn empty(name: ModuleName, file_path: Option<String>) -> Self {
        ModuleInfo {
            name,
            dependencies: Vec::new(),
            interface_digest: None,
            implementation_digest: None,
            file_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mn(s: &str) -> ModuleName {
        ModuleName::parse(s).unwrap()
    }

    #[test]
    fn sorts_dedups_and_strips_self_reference() {
        let info = ModuleInfo::new(
            mn("App"),
            vec![mn("Utils"), mn("Math"), mn("Utils"), mn("App")],
            None,
            None,
            None,
        );
        assert_eq!(
            info.dependencies,
            vec![mn("Math"), mn("Utils")],
            "dependencies must be sorted, deduplicated, and self-free"
        );
    }

    #[test]
    fn empty_has_no_dependencies_or_digests() {
        let info = ModuleInfo::empty(mn("Broken"), Some("Broken.cmt".to_string()));
        assert!(info.dependencies.is_empty());
        assert!(info.interface_digest.is_none());
        assert!(info.implementation_digest.is_none());
    }
}
