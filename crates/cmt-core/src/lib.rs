//! Core data types for the CMT dependency analyzer.
//!
//! Holds the entities in the data model that every other crate in
//! the workspace builds on: normalized module names, digests, the
//! `ModuleInfo`/`DependencyGraph` shapes, and the typed-tree/`CmtInfo`
//! collaborator boundary. No graph algorithms or rendering logic live
//! here; see `cmt-graph`, `cmt-usage`, and `cmt-render`.

mod cmt_info;
mod digest;
mod graph_types;
mod module_info;
mod module_name;
mod stdlib;
mod typed_tree;

pub use cmt_info::{Annots, CmtDecoder, CmtInfo, MockCmtDecoder, ValueDescription};
pub use digest::Digest;
pub use graph_types::{DependencyGraph, ModuleMetadata};
pub use module_info::ModuleInfo;
pub use module_name::ModuleName;
pub use typed_tree::{Expression, Path, Structure, StructureItem, ValueBinding};
