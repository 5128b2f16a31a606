//! Output rendering: a Graphviz DOT document and a fixed-schema JSON
//! document, both built from a [`cmt_core::DependencyGraph`] plus the
//! graph queries in `cmt-graph`.

mod dot;
mod json;

pub use dot::render_dot;
pub use json::render_json;
