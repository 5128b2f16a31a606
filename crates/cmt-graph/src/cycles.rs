use std::collections::{HashMap, HashSet};

use cmt_core::{DependencyGraph, ModuleName};

use crate::query::get_dependencies;

/// Depth-first search for a cycle reachable from `start`, returning
/// the cycle as an ordered sequence of module names (the first
/// element depends transitively back on itself, closing the loop).
/// Returns `None` if no cycle is reachable from `start`.
///
/// The memo table is scoped to this single call: a node found to have
/// no cycle through it during *this* traversal is cached as such for
/// the rest of *this* traversal only. Reusing a memo table across
/// different `start` values would conflate "no cycle found starting
/// from this particular root" with "never on any cycle," which is
/// wrong once a different root's DFS order visits the same node via a
/// different path.
pub fn has_cycle(graph: &DependencyGraph, start: &ModuleName) -> Option<Vec<ModuleName>> {
    let mut memo: HashMap<ModuleName, Option<Vec<ModuleName>>> = HashMap::new();
    let mut path: Vec<ModuleName> = Vec::new();
    let mut on_path: HashSet<ModuleName> = HashSet::new();
    dfs_find_cycle(graph, start, &mut path, &mut on_path, &mut memo)
}

fn dfs_find_cycle(
    graph: &DependencyGraph,
    node: &ModuleName,
    path: &mut Vec<ModuleName>,
    on_path: &mut HashSet<ModuleName>,
    memo: &mut HashMap<ModuleName, Option<Vec<ModuleName>>>,
) -> Option<Vec<ModuleName>> {
    if let Some(cached) = memo.get(node) {
        return cached.clone();
    }
    if on_path.contains(node) {
        let pos = path.iter().position(|n| n == node).expect("on_path implies present in path");
        return Some(path[pos..].to_vec());
    }

    path.push(node.clone());
    on_path.insert(node.clone());

    let mut found = None;
    for dep in get_dependencies(graph, node) {
        if let Some(cycle) = dfs_find_cycle(graph, &dep, path, on_path, memo) {
            found = Some(cycle);
            break;
        }
    }

    path.pop();
    on_path.remove(node);
    memo.insert(node.clone(), found.clone());
    found
}

/// Every distinct cycle in the graph, each rotated so its
/// lexicographically smallest member leads, so two cycles that visit
/// the same modules in the same cyclic order are reported once no
/// matter which node's traversal finds them first.
pub fn find_all_cycles(graph: &DependencyGraph) -> Vec<Vec<ModuleName>> {
    let mut seen: HashSet<Vec<ModuleName>> = HashSet::new();
    let mut cycles = Vec::new();
    for node in graph.deps.keys() {
        if let Some(cycle) = has_cycle(graph, node) {
            let canonical = canonicalize_cycle(&cycle);
            if seen.insert(canonical.clone()) {
                cycles.push(canonical);
            }
        }
    }
    cycles
}

fn canonicalize_cycle(cycle: &[ModuleName]) -> Vec<ModuleName> {
    if cycle.is_empty() {
        return Vec::new();
    }
    let min_idx = cycle
        .iter()
        .enumerate()
        .min_by_key(|(_, name)| (*name).clone())
        .map(|(idx, _)| idx)
        .unwrap_or(0);
    let mut rotated = cycle[min_idx..].to_vec();
    rotated.extend_from_slice(&cycle[..min_idx]);
    rotated
}

/// A topological ordering of the graph's nodes: every module appears
/// after all of its dependencies. Tolerant of cycles: a cyclic
/// module is emitted exactly once, at the point its DFS first
/// bottoms out, rather than causing non-termination.
pub fn topological_sort(graph: &DependencyGraph) -> Vec<ModuleName> {
    let mut visited: HashSet<ModuleName> = HashSet::new();
    let mut out = Vec::new();
    for node in graph.deps.keys() {
        dfs_topo(graph, node, &mut visited, &mut out);
    }
    out
}

fn dfs_topo(
    graph: &DependencyGraph,
    node: &ModuleName,
    visited: &mut HashSet<ModuleName>,
    out: &mut Vec<ModuleName>,
) {
    if !visited.insert(node.clone()) {
        return;
    }
    for dep in get_dependencies(graph, node) {
        dfs_topo(graph, &dep, visited, out);
    }
    out.push(node.clone());
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

    #[test]
    fn no_cycle_in_a_dag() {
        let g = build(&[
            ModuleInfo::new(mn("App"), vec![mn("Utils")], None, None, None),
            ModuleInfo::new(mn("Utils"), vec![], None, None, None),
        ]);
        assert!(has_cycle(&g, &mn("App")).is_none());
        assert!(find_all_cycles(&g).is_empty());
    }

    #[test]
    fn detects_three_node_cycle_once_regardless_of_start() {
        // A -> B -> C -> A, plus D depending on A (not part of the cycle).
        let g = build(&[
            ModuleInfo::new(mn("A"), vec![mn("B")], None, None, None),
            ModuleInfo::new(mn("B"), vec![mn("C")], None, None, None),
            ModuleInfo::new(mn("C"), vec![mn("A")], None, None, None),
            ModuleInfo::new(mn("D"), vec![mn("A")], None, None, None),
        ]);
        let cycles = find_all_cycles(&g);
        assert_eq!(cycles.len(), 1, "the same 3-cycle should be reported once, not once per entry node");
        assert_eq!(cycles[0], vec![mn("A"), mn("B"), mn("C")]);
    }

    #[test]
    fn self_loop_is_a_cycle() {
        let mut g = DependencyGraph::new();
        g.deps.insert(mn("A"), vec![mn("A")]);
        g.meta.insert(mn("A"), Default::default());
        assert_eq!(has_cycle(&g, &mn("A")), Some(vec![mn("A")]));
    }

    #[test]
    fn topo_sort_respects_dependency_order_and_tolerates_cycles() {
        let g = build(&[
            ModuleInfo::new(mn("A"), vec![mn("B")], None, None, None),
            ModuleInfo::new(mn("B"), vec![mn("C")], None, None, None),
            ModuleInfo::new(mn("C"), vec![mn("A")], None, None, None),
        ]);
        let order = topological_sort(&g);
        assert_eq!(order.len(), 3);
        // Every module must appear; termination despite the cycle is the point.
        let mut sorted = order.clone();
        sorted.sort();
        assert_eq!(sorted, vec![mn("A"), mn("B"), mn("C")]);
    }

    #[test]
    fn topo_sort_on_dag_places_dependencies_first() {
        let g = build(&[
            ModuleInfo::new(mn("App"), vec![mn("Math"), mn("Utils")], None, None, None),
            ModuleInfo::new(mn("Math"), vec![mn("Utils")], None, None, None),
            ModuleInfo::new(mn("Utils"), vec![], None, None, None),
        ]);
        let order = topological_sort(&g);
        let pos = |name: &ModuleName| order.iter().position(|n| n == name).unwrap();
        assert!(pos(&mn("Utils")) < pos(&mn("Math")));
        assert!(pos(&mn("Math")) < pos(&mn("App")));
    }
}
