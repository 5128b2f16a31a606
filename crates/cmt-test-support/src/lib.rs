//! Fixture builders for tests across the CMT dependency analyzer
//! workspace: a small, dependency-free crate consumed only by test
//! code, building typed-tree and `CmtInfo` values rather than locating
//! fixture directories on disk.

use cmt_core::{Annots, CmtInfo, Digest, Expression, ModuleName, Path, Structure, StructureItem, ValueBinding};

/// Shorthand for `ModuleName::parse(s).unwrap()`, for tests that
/// already know their names are valid.
pub fn module_name(s: &str) -> ModuleName {
    ModuleName::parse(s).unwrap()
}

/// Builds a minimal `CmtInfo::Implementation` with an empty
/// structure and the given import list (no digests attached).
pub fn cmt_info(modname: &str, imports: &[&str]) -> CmtInfo {
    cmt_info_with_structure(modname, imports, Structure::default())
}

/// Builds a `CmtInfo::Implementation` with a caller-supplied
/// structure, for value-usage-counter tests that need real typed-tree
/// content.
pub fn cmt_info_with_structure(modname: &str, imports: &[&str], structure: Structure) -> CmtInfo {
    CmtInfo {
        modname: modname.to_string(),
        annots: Annots::Implementation(structure),
        value_dependencies: Vec::new(),
        sourcefile: None,
        imports: imports.iter().map(|s| (s.to_string(), None)).collect(),
        interface_digest: None,
    }
}

pub fn digest(byte: u8) -> Digest {
    Digest::from_bytes([byte; 16])
}

/// `Pident(name)`.
pub fn pident(name: &str) -> Path {
    Path::Pident(name.to_string())
}

/// Builds a `Pdot` chain from dotted segments, e.g.
/// `pdot(&["Utils", "add"])` = `Pdot(Pident("Utils"), "add")`.
pub fn pdot(segments: &[&str]) -> Path {
    let mut iter = segments.iter();
    let first = iter.next().expect("at least one segment");
    let mut path = Path::Pident(first.to_string());
    for segment in iter {
        path = Path::Pdot(Box::new(path), segment.to_string());
    }
    path
}

/// `Texp_ident(path)`.
pub fn ident_expr(path: Path) -> Expression {
    Expression::Ident(path)
}

/// A top-level `let name = expr` binding at `line`.
pub fn value_binding(name: &str, line: u32, expr: Expression) -> ValueBinding {
    ValueBinding {
        name: name.to_string(),
        line,
        expr,
    }
}

/// A structure holding a single top-level value binding.
pub fn structure_with_value(binding: ValueBinding) -> Structure {
    Structure {
        items: vec![StructureItem::Value(vec![binding])],
    }
}

/// A structure holding several top-level items, in order.
pub fn structure(items: Vec<StructureItem>) -> Structure {
    Structure { items }
}

/// `Apply { func, args }` over bare identifier expressions, useful
/// for building `M.add(x, x)`-shaped call sites quickly.
pub fn apply(func: Expression, args: Vec<Expression>) -> Expression {
    Expression::Apply {
        func: Box::new(func),
        args,
    }
}

/// `Texp_open(module_name, body)`.
pub fn open_expr(module_name: &str, body: Expression) -> Expression {
    Expression::Open {
        module_name: module_name.to_string(),
        body: Box::new(body),
    }
}

/// `Sequence(a, b)`, useful for chaining several expression
/// statements under one binding body.
pub fn sequence(exprs: Vec<Expression>) -> Expression {
    let mut iter = exprs.into_iter().rev();
    let last = iter.next().unwrap_or(Expression::Inert);
    iter.fold(last, |acc, expr| {
        Expression::Sequence(Box::new(expr), Box::new(acc))
    })
}
