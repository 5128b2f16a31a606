use cmt_core::{DependencyGraph, ModuleName};
use cmt_graph::GraphMetrics;
use serde::Serialize;

#[derive(Serialize)]
struct JsonOutput {
    modules: Vec<JsonModule>,
    cycles: Vec<Vec<String>>,
    metrics: JsonMetrics,
}

#[derive(Serialize)]
struct JsonModule {
    name: String,
    path: Option<String>,
    dependencies: Vec<JsonRef>,
    dependents: Vec<JsonRef>,
    fan_in: usize,
    fan_out: usize,
    in_cycle: bool,
}

#[derive(Serialize)]
struct JsonRef {
    name: String,
    path: Option<String>,
}

#[derive(Serialize)]
struct JsonMetrics {
    total_modules: usize,
    average_fan_in: f64,
    average_fan_out: f64,
    most_depended_upon: Option<JsonCount>,
    most_dependencies: Option<JsonCount>,
    cycles_count: usize,
}

#[derive(Serialize)]
struct JsonCount {
    module: String,
    count: usize,
}

/// Renders the graph, its cycles, and its metrics as the fixed-schema
/// JSON document: `modules`, then `cycles`, then `metrics`, in that
/// key order, guaranteed by serializing through these field-ordered
/// structs rather than an unordered map.
pub fn render_json(graph: &DependencyGraph) -> serde_json::Result<String> {
    let cycles = cmt_graph::find_all_cycles(graph);
    let cyclic_members: std::collections::HashSet<ModuleName> =
        cmt_graph::find_strongly_connected_components(graph)
            .into_iter()
            .filter(|component| component.len() >= 2)
            .flatten()
            .collect();
    let in_cycle = |name: &ModuleName| cyclic_members.contains(name);

    let modules = graph
        .deps
        .iter()
        .map(|(name, deps)| {
            let dependencies = deps
                .iter()
                .map(|dep| JsonRef {
                    name: dep.to_string(),
                    path: graph.meta.get(dep).and_then(|m| m.path.clone()),
                })
                .collect();
            let dependents = cmt_graph::find_dependents(graph, name)
                .into_iter()
                .map(|dep| JsonRef {
                    name: dep.to_string(),
                    path: graph.meta.get(&dep).and_then(|m| m.path.clone()),
                })
                .collect();
            JsonModule {
                name: name.to_string(),
                path: graph.meta.get(name).and_then(|m| m.path.clone()),
                dependencies,
                dependents,
                fan_in: cmt_graph::find_dependents(graph, name).len(),
                fan_out: deps.len(),
                in_cycle: in_cycle(name),
            }
        })
        .collect();

    let metrics = cmt_graph::calculate_metrics(graph);
    let metrics = to_json_metrics(&metrics, cycles.len());

    let cycles = cycles
        .into_iter()
        .map(|cycle| cycle.iter().map(|m| m.to_string()).collect())
        .collect();

    serde_json::to_string_pretty(&JsonOutput {
        modules,
        cycles,
        metrics,
    })
}

fn to_json_metrics(metrics: &GraphMetrics, cycles_count: usize) -> JsonMetrics {
    JsonMetrics {
        total_modules: metrics.total_modules,
        average_fan_in: metrics.average_fan_in,
        average_fan_out: metrics.average_fan_out,
        most_depended_upon: metrics
            .most_depended_upon
            .as_ref()
            .map(|(name, count)| JsonCount {
                module: name.to_string(),
                count: *count,
            }),
        most_dependencies: metrics
            .most_dependencies
            .as_ref()
            .map(|(name, count)| JsonCount {
                module: name.to_string(),
                count: *count,
            }),
        cycles_count,
    }
}
