use std::collections::HashMap;

use cmt_core::{DependencyGraph, ModuleName};

use crate::query::get_dependencies;

/// Tarjan's algorithm. Reports a strongly connected component only
/// when it is "real": two or more members, or a single module that
/// depends on itself directly. A lone acyclic node forms a trivial
/// component of size one and is never reported.
pub fn find_strongly_connected_components(graph: &DependencyGraph) -> Vec<Vec<ModuleName>> {
    let mut state = TarjanState::new(graph);
    for node in graph.deps.keys() {
        if !state.indices.contains_key(node) {
            state.strongconnect(node);
        }
    }
    state
        .sccs
        .into_iter()
        .filter(|component| {
            if component.len() >= 2 {
                true
            } else {
                let node = &component[0];
                get_dependencies(graph, node).contains(node)
            }
        })
        .collect()
}

struct TarjanState<'a> {
    graph: &'a DependencyGraph,
    counter: usize,
    indices: HashMap<ModuleName, usize>,
    lowlink: HashMap<ModuleName, usize>,
    on_stack: HashMap<ModuleName, bool>,
    stack: Vec<ModuleName>,
    sccs: Vec<Vec<ModuleName>>,
}

impl<'a> TarjanState<'a> {
    fn new(graph: &'a DependencyGraph) -> Self {
        TarjanState {
            graph,
            counter: 0,
            indices: HashMap::new(),
            lowlink: HashMap::new(),
            on_stack: HashMap::new(),
            stack: Vec::new(),
            sccs: Vec::new(),
        }
    }

    fn strongconnect(&mut self, node: &ModuleName) {
        self.indices.insert(node.clone(), self.counter);
        self.lowlink.insert(node.clone(), self.counter);
        self.counter += 1;
        self.stack.push(node.clone());
        self.on_stack.insert(node.clone(), true);

        for dep in get_dependencies(self.graph, node) {
            if !self.indices.contains_key(&dep) {
                self.strongconnect(&dep);
                let dep_low = self.lowlink[&dep];
                let node_low = self.lowlink[node];
                self.lowlink.insert(node.clone(), node_low.min(dep_low));
            } else if *self.on_stack.get(&dep).unwrap_or(&false) {
                let dep_index = self.indices[&dep];
                let node_low = self.lowlink[node];
                self.lowlink.insert(node.clone(), node_low.min(dep_index));
            }
        }

        if self.lowlink[node] == self.indices[node] {
            let mut component = Vec::new();
            loop {
                let member = self.stack.pop().expect("stack non-empty while closing an SCC root");
                self.on_stack.insert(member.clone(), false);
                let is_root = &member == node;
                component.push(member);
                if is_root {
                    break;
                }
            }
            component.sort();
            self.sccs.push(component);
        }
    }
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
    fn dag_has_no_nontrivial_components() {
        let g = build(&[
            ModuleInfo::new(mn("App"), vec![mn("Utils")], None, None, None),
            ModuleInfo::new(mn("Utils"), vec![], None, None, None),
        ]);
        assert!(find_strongly_connected_components(&g).is_empty());
    }

    #[test]
    fn three_cycle_is_one_component() {
        let g = build(&[
            ModuleInfo::new(mn("A"), vec![mn("B")], None, None, None),
            ModuleInfo::new(mn("B"), vec![mn("C")], None, None, None),
            ModuleInfo::new(mn("C"), vec![mn("A")], None, None, None),
        ]);
        let sccs = find_strongly_connected_components(&g);
        assert_eq!(sccs.len(), 1);
        assert_eq!(sccs[0], vec![mn("A"), mn("B"), mn("C")]);
    }

    #[test]
    fn self_loop_is_reported_as_singleton_component() {
        let mut g = DependencyGraph::new();
        g.deps.insert(mn("A"), vec![mn("A")]);
        g.meta.insert(mn("A"), Default::default());
        let sccs = find_strongly_connected_components(&g);
        assert_eq!(sccs, vec![vec![mn("A")]]);
    }

    #[test]
    fn acyclic_singleton_is_not_reported() {
        let mut g = DependencyGraph::new();
        g.deps.insert(mn("A"), vec![]);
        g.meta.insert(mn("A"), Default::default());
        assert!(find_strongly_connected_components(&g).is_empty());
    }
}
