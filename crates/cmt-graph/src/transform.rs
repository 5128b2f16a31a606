use cmt_core::{DependencyGraph, ModuleName};

use crate::query::find_dependents;

/// Drops every stdlib/internal node from the graph. Surviving nodes
/// keep their original adjacency list untouched, even where it names
/// a module that was just dropped. A filtered view shows what each
/// module *actually* imports; it doesn't repair dangling edges.
pub fn create_filtered_graph(graph: &DependencyGraph) -> DependencyGraph {
    let mut out = DependencyGraph::new();
    for (name, deps) in &graph.deps {
        if name.is_stdlib() {
            continue;
        }
        out.deps.insert(name.clone(), deps.clone());
        if let Some(meta) = graph.meta.get(name) {
            out.meta.insert(name.clone(), meta.clone());
        }
    }
    out
}

/// A single-module neighborhood view: `center` with its full original
/// adjacency, each of its direct dependencies as a node with empty
/// adjacency (their own deeper dependencies are out of frame), and
/// each of its direct dependents as a node pointing only back at
/// `center`. Returns an empty graph if `center` is not present.
pub fn create_focused_graph(graph: &DependencyGraph, center: &ModuleName) -> DependencyGraph {
    let mut out = DependencyGraph::new();
    let Some(center_deps) = graph.deps.get(center) else {
        return out;
    };

    out.deps.insert(center.clone(), center_deps.clone());
    out.meta.insert(
        center.clone(),
        graph.meta.get(center).cloned().unwrap_or_default(),
    );

    for dep in center_deps {
        out.deps.entry(dep.clone()).or_insert_with(Vec::new);
        out.meta
            .entry(dep.clone())
            .or_insert_with(|| graph.meta.get(dep).cloned().unwrap_or_default());
    }

    for dependent in find_dependents(graph, center) {
        out.deps.insert(dependent.clone(), vec![center.clone()]);
        out.meta.insert(
            dependent.clone(),
            graph.meta.get(&dependent).cloned().unwrap_or_default(),
        );
    }

    out
}

/// Restricts the graph to exactly the named modules, keeping each
/// surviving node's original adjacency list as-is (not re-filtered to
/// only point within the subset), unlike [`create_filtered_graph`];
/// this is a node selection, not an edge repair.
pub fn create_subgraph_preserve_deps(
    graph: &DependencyGraph,
    modules: &[ModuleName],
) -> DependencyGraph {
    let mut out = DependencyGraph::new();
    for name in modules {
        if let Some(deps) = graph.deps.get(name) {
            out.deps.insert(name.clone(), deps.clone());
            out.meta.insert(
                name.clone(),
                graph.meta.get(name).cloned().unwrap_or_default(),
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::build;
    use cmt_core::ModuleInfo;
    use cmt_test_support::module_name;

    fn mn(s: &str) -> ModuleName {
        module_name(s)
    }

    fn sample() -> DependencyGraph {
        build(&[
            ModuleInfo::new(mn("App"), vec![mn("Math"), mn("Belt")], None, None, None),
            ModuleInfo::new(mn("Math"), vec![mn("Utils")], None, None, None),
            ModuleInfo::new(mn("Utils"), vec![], None, None, None),
        ])
    }

    #[test]
    fn filtered_graph_drops_stdlib_but_keeps_dangling_edges() {
        let g = sample();
        let filtered = create_filtered_graph(&g);
        assert!(!filtered.contains(&mn("Belt")));
        assert!(filtered.contains(&mn("App")));
        assert_eq!(
            filtered.deps.get(&mn("App")).unwrap(),
            &vec![mn("Belt"), mn("Math")]
        );
    }

    #[test]
    fn focused_graph_includes_center_deps_and_dependents() {
        let g = sample();
        let focused = create_focused_graph(&g, &mn("Math"));
        assert_eq!(focused.node_count(), 3);
        assert_eq!(focused.deps.get(&mn("Math")).unwrap(), &vec![mn("Utils")]);
        assert!(focused.deps.get(&mn("Utils")).unwrap().is_empty());
        assert_eq!(focused.deps.get(&mn("App")).unwrap(), &vec![mn("Math")]);
    }

    #[test]
    fn focused_graph_on_missing_center_is_empty() {
        let g = sample();
        let focused = create_focused_graph(&g, &mn("Ghost"));
        assert_eq!(focused.node_count(), 0);
    }

    #[test]
    fn subgraph_keeps_original_adjacency_even_outside_selection() {
        let g = sample();
        let sub = create_subgraph_preserve_deps(&g, &[mn("App"), mn("Utils")]);
        assert_eq!(sub.node_count(), 2);
        assert_eq!(
            sub.deps.get(&mn("App")).unwrap(),
            &vec![mn("Belt"), mn("Math")],
            "subgraph selection must not prune edges pointing outside the selected set"
        );
    }
}
