//! The typed-tree shape the value-usage counter (`cmt-usage`) walks.
//!
//! This is a tagged sum type mirroring the compiler's typed AST
//! closely enough to support a lexically-scoped usage traversal,
//! without depending on an actual OCaml compiler front end. The real decoder
//! would translate the compiler's `Typedtree.structure` into this
//! shape; `MockCmtDecoder` (see `cmt_info.rs`) constructs it directly
//! for tests and for any caller that already has a tree in hand.

use serde::{Deserialize, Serialize};

/// A module reference as it appears in the typed tree. `Papply` is
/// rare in practice; it is resolved to its applied head rather than
/// treated structurally, since functor applications name a concrete
/// module once fully applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Path {
    Pident(String),
    Pdot(Box<Path>, String),
    Papply(Box<Path>, Box<Path>),
}

impl Path {
    /// Converts the path to its dotted name-segment list:
    /// `Pident(n) -> [n]`, `Pdot(p, n) -> path_to_list(p) ++ [n]`,
    /// `Papply(p1, _) -> path_to_list(p1)` (the applied head).
    pub fn to_segments(&self) -> Vec<String> {
        match self {
            Path::Pident(name) => vec![name.clone()],
            Path::Pdot(base, name) => {
                let mut segments = base.to_segments();
                segments.push(name.clone());
                segments
            }
            Path::Papply(head, _arg) => head.to_segments(),
        }
    }
}

/// A single `let name = expr` binding. Only single-variable-pattern
/// bindings are represented, matching the binding shape the
/// value-usage counter looks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueBinding {
    pub name: String,
    /// Starting source line of the binding, used to disambiguate
    /// same-named bindings.
    pub line: u32,
    pub expr: Expression,
}

/// A structure: an ordered sequence of top-level items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Structure {
    pub items: Vec<StructureItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StructureItem {
    /// `let name = expr` (or a `let rec` group) at structure top
    /// level.
    Value(Vec<ValueBinding>),
    /// `module Name = struct ... end`, pushing `Name` onto the module
    /// path for its contents.
    Module(String, Structure),
    /// `open Name` at structure level. Treated as inert for counting
    /// purposes: the traversal does not thread structure-level opens
    /// into sibling items.
    Open(String),
    /// Anything else (type/exception/external declarations, etc.):
    /// contributes nothing to the traversal.
    Other,
}

/// The expression variants the traversal must recurse through. Each
/// variant holds only the sub-expressions relevant to locating and
/// counting identifier references; operands
/// that can never contain a value reference (patterns, type
/// annotations) are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expression {
    /// `Texp_ident`, a reference to a value.
    Ident(Path),
    Let {
        bindings: Vec<ValueBinding>,
        body: Box<Expression>,
    },
    Function {
        cases: Vec<Expression>,
    },
    Apply {
        func: Box<Expression>,
        args: Vec<Expression>,
    },
    Match {
        scrutinee: Box<Expression>,
        cases: Vec<Expression>,
    },
    Try {
        body: Box<Expression>,
        cases: Vec<Expression>,
    },
    Tuple(Vec<Expression>),
    Array(Vec<Expression>),
    Construct {
        args: Vec<Expression>,
    },
    Variant {
        arg: Option<Box<Expression>>,
    },
    Record {
        fields: Vec<Expression>,
        extended_expression: Option<Box<Expression>>,
    },
    Field(Box<Expression>),
    SetField {
        record: Box<Expression>,
        value: Box<Expression>,
    },
    IfThenElse {
        cond: Box<Expression>,
        then_branch: Box<Expression>,
        else_branch: Option<Box<Expression>>,
    },
    Sequence(Box<Expression>, Box<Expression>),
    While {
        cond: Box<Expression>,
        body: Box<Expression>,
    },
    For {
        start: Box<Expression>,
        stop: Box<Expression>,
        body: Box<Expression>,
    },
    Send {
        obj: Box<Expression>,
    },
    /// `Texp_open(decl, body)`, opens `module_name` for the scope of
    /// `body`.
    Open {
        module_name: String,
        body: Box<Expression>,
    },
    LetModule {
        body: Box<Expression>,
    },
    LetException {
        body: Box<Expression>,
    },
    LetOp {
        body: Box<Expression>,
    },
    Assert(Box<Expression>),
    Lazy(Box<Expression>),
    Override(Vec<Expression>),
    SetInstvar(Box<Expression>),
    /// A leaf that carries no identifier reference and recurses no
    /// further (constants, etc.).
    Inert,
}
