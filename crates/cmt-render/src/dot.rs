use cmt_core::DependencyGraph;

/// Renders the graph as a Graphviz DOT document: one node per module
/// (with an optional `tooltip` set to its source path), one edge per
/// dependency, and one `subgraph cluster_N` per strongly connected
/// component of size ≥ 2, styled to flag it as a cycle.
pub fn render_dot(graph: &DependencyGraph) -> String {
    let mut out = String::new();
    out.push_str("digraph dependencies {\n");
    out.push_str("  rankdir=LR;\n");

    for name in graph.deps.keys() {
        let label = name.as_str();
        match graph.meta.get(name).and_then(|meta| meta.path.as_deref()) {
            Some(path) => out.push_str(&format!(
                "  \"{label}\" [label=\"{label}\", tooltip=\"{}\"];\n",
                escape(path)
            )),
            None => out.push_str(&format!("  \"{label}\" [label=\"{label}\"];\n")),
        }
    }

    for (name, deps) in &graph.deps {
        for dep in deps {
            out.push_str(&format!("  \"{}\" -> \"{}\";\n", name.as_str(), dep.as_str()));
        }
    }

    let sccs: Vec<_> = cmt_graph::find_strongly_connected_components(graph)
        .into_iter()
        .filter(|component| component.len() >= 2)
        .collect();
    for (i, component) in sccs.iter().enumerate() {
        out.push_str(&format!("  subgraph cluster_{i} {{\n"));
        out.push_str("    style=filled;\n    color=pink;\n    label=\"Cyclic dependency\";\n");
        for member in component {
            out.push_str(&format!("    \"{}\";\n", member.as_str()));
        }
        out.push_str("  }\n");
    }

    out.push_str("}\n");
    out
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
