use cmt_core::{DependencyGraph, ModuleName};

/// A node's direct dependency list, in the graph's own order (already
/// ascending, since [`crate::build`] copies it straight from
/// `ModuleInfo::dependencies`). Empty for an unknown module.
pub fn get_dependencies(graph: &DependencyGraph, module: &ModuleName) -> Vec<ModuleName> {
    graph.deps.get(module).cloned().unwrap_or_default()
}

/// Every node whose dependency list names `module`, in ascending order
/// (a scan over `deps`, whose keys are already ascending).
pub fn find_dependents(graph: &DependencyGraph, module: &ModuleName) -> Vec<ModuleName> {
    graph
        .deps
        .iter()
        .filter(|(_, deps)| deps.contains(module))
        .map(|(name, _)| name.clone())
        .collect()
}

/// All modules transitively reachable from `module` via `deps` edges,
/// not including `module` itself, visited depth-first in pre-order.
/// Tolerant of cycles: each module is emitted at most once.
pub fn transitive_dependencies(graph: &DependencyGraph, module: &ModuleName) -> Vec<ModuleName> {
    let mut visited = std::collections::HashSet::new();
    let mut out = Vec::new();
    visit(graph, module, &mut visited, &mut out);
    out
}

fn visit(
    graph: &DependencyGraph,
    module: &ModuleName,
    visited: &mut std::collections::HashSet<ModuleName>,
    out: &mut Vec<ModuleName>,
) {
    for dep in get_dependencies(graph, module) {
        if visited.insert(dep.clone()) {
            out.push(dep.clone());
            visit(graph, &dep, visited, out);
        }
    }
}

/// Every node in the graph with no dependents (nothing else names it
/// as a dependency): the roots of the dependency forest, or "leaf
/// consumers" depending on which direction you walk the graph.
pub fn find_modules_with_no_dependents(graph: &DependencyGraph) -> Vec<ModuleName> {
    graph
        .deps
        .keys()
        .filter(|name| find_dependents(graph, name).is_empty())
        .cloned()
        .collect()
}

/// Per-module fan-in (how many modules depend on it) and fan-out (how
/// many it depends on).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMetric {
    pub name: ModuleName,
    pub fan_in: usize,
    pub fan_out: usize,
}

/// Aggregate metrics across the whole graph, in ascending-name order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GraphMetrics {
    pub per_module: Vec<ModuleMetric>,
    pub total_modules: usize,
    pub average_fan_in: f64,
    pub average_fan_out: f64,
    pub most_depended_upon: Option<(ModuleName, usize)>,
    pub most_dependencies: Option<(ModuleName, usize)>,
}

pub fn calculate_metrics(graph: &DependencyGraph) -> GraphMetrics {
    let per_module: Vec<ModuleMetric> = graph
        .deps
        .keys()
        .map(|name| ModuleMetric {
            name: name.clone(),
            fan_in: find_dependents(graph, name).len(),
            fan_out: get_dependencies(graph, name).len(),
        })
        .collect();

    let total_modules = per_module.len();
    let (average_fan_in, average_fan_out) = if total_modules == 0 {
        (0.0, 0.0)
    } else {
        let fan_in_sum: usize = per_module.iter().map(|m| m.fan_in).sum();
        let fan_out_sum: usize = per_module.iter().map(|m| m.fan_out).sum();
        (
            fan_in_sum as f64 / total_modules as f64,
            fan_out_sum as f64 / total_modules as f64,
        )
    };

    let most_depended_upon = per_module
        .iter()
        .max_by_key(|m| (m.fan_in, std::cmp::Reverse(m.name.clone())))
        .filter(|m| m.fan_in > 0)
        .map(|m| (m.name.clone(), m.fan_in));

    let most_dependencies = per_module
        .iter()
        .max_by_key(|m| (m.fan_out, std::cmp::Reverse(m.name.clone())))
        .filter(|m| m.fan_out > 0)
        .map(|m| (m.name.clone(), m.fan_out));

    GraphMetrics {
        per_module,
        total_modules,
        average_fan_in,
        average_fan_out,
        most_depended_upon,
        most_dependencies,
    }
}
