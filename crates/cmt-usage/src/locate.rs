use cmt_core::{Expression, Structure, StructureItem, ValueBinding};

/// Where the targeted value binding lives, as found by a top-down
/// walk of the owner's structure.
pub struct OwnerBinding {
    /// Enclosing submodule path, root-first. Empty when the binding
    /// sits directly at the structure's top level.
    pub module_path: Vec<String>,
    pub is_top_level: bool,
    /// The `let`'s body, captured so a local binding's references can
    /// be counted by scanning exactly the scope it's visible in,
    /// rather than the whole module.
    pub scope: Option<Expression>,
}

fn line_matches(binding_line: u32, wanted: Option<u32>) -> bool {
    wanted.map_or(true, |line| binding_line == line)
}

/// Finds the first `let name = ...` (top-level or nested) whose name
/// and starting line match, walking the structure top-down and
/// left-to-right.
pub fn find_binding(structure: &Structure, value_name: &str, line: Option<u32>) -> Option<OwnerBinding> {
    find_in_structure(structure, value_name, line, &mut Vec::new())
}

fn find_in_structure(
    structure: &Structure,
    value_name: &str,
    line: Option<u32>,
    module_path: &mut Vec<String>,
) -> Option<OwnerBinding> {
    for item in &structure.items {
        match item {
            StructureItem::Value(bindings) => {
                if let Some(found) = find_top_level_match(bindings, value_name, line, module_path) {
                    return Some(found);
                }
                for binding in bindings {
                    if let Some(found) = find_in_expr(&binding.expr, value_name, line) {
                        return Some(found);
                    }
                }
            }
            StructureItem::Module(name, inner) => {
                module_path.push(name.clone());
                let found = find_in_structure(inner, value_name, line, module_path);
                module_path.pop();
                if found.is_some() {
                    return found;
                }
            }
            StructureItem::Open(_) | StructureItem::Other => {}
        }
    }
    None
}

fn find_top_level_match(
    bindings: &[ValueBinding],
    value_name: &str,
    line: Option<u32>,
    module_path: &[String],
) -> Option<OwnerBinding> {
    bindings
        .iter()
        .find(|b| b.name == value_name && line_matches(b.line, line))
        .map(|_| OwnerBinding {
            module_path: module_path.to_vec(),
            is_top_level: true,
            scope: None,
        })
}

fn find_in_expr(expr: &Expression, value_name: &str, line: Option<u32>) -> Option<OwnerBinding> {
    match expr {
        Expression::Let { bindings, body } => {
            if let Some(binding) = bindings
                .iter()
                .find(|b| b.name == value_name && line_matches(b.line, line))
            {
                let _ = binding;
                return Some(OwnerBinding {
                    module_path: Vec::new(),
                    is_top_level: false,
                    scope: Some((**body).clone()),
                });
            }
            for binding in bindings {
                if let Some(found) = find_in_expr(&binding.expr, value_name, line) {
                    return Some(found);
                }
            }
            find_in_expr(body, value_name, line)
        }
        Expression::Function { cases } => cases.iter().find_map(|c| find_in_expr(c, value_name, line)),
        Expression::Apply { func, args } => find_in_expr(func, value_name, line)
            .or_else(|| args.iter().find_map(|a| find_in_expr(a, value_name, line))),
        Expression::Match { scrutinee, cases } => find_in_expr(scrutinee, value_name, line)
            .or_else(|| cases.iter().find_map(|c| find_in_expr(c, value_name, line))),
        Expression::Try { body, cases } => find_in_expr(body, value_name, line)
            .or_else(|| cases.iter().find_map(|c| find_in_expr(c, value_name, line))),
        Expression::Tuple(items) | Expression::Array(items) | Expression::Construct { args: items } => {
            items.iter().find_map(|e| find_in_expr(e, value_name, line))
        }
        Expression::Variant { arg } => arg.as_deref().and_then(|e| find_in_expr(e, value_name, line)),
        Expression::Record { fields, extended_expression } => fields
            .iter()
            .find_map(|e| find_in_expr(e, value_name, line))
            .or_else(|| extended_expression.as_deref().and_then(|e| find_in_expr(e, value_name, line))),
        Expression::Field(inner) => find_in_expr(inner, value_name, line),
        Expression::SetField { record, value } => {
            find_in_expr(record, value_name, line).or_else(|| find_in_expr(value, value_name, line))
        }
        Expression::IfThenElse { cond, then_branch, else_branch } => find_in_expr(cond, value_name, line)
            .or_else(|| find_in_expr(then_branch, value_name, line))
            .or_else(|| else_branch.as_deref().and_then(|e| find_in_expr(e, value_name, line))),
        Expression::Sequence(a, b) => find_in_expr(a, value_name, line).or_else(|| find_in_expr(b, value_name, line)),
        Expression::While { cond, body } => {
            find_in_expr(cond, value_name, line).or_else(|| find_in_expr(body, value_name, line))
        }
        Expression::For { start, stop, body } => find_in_expr(start, value_name, line)
            .or_else(|| find_in_expr(stop, value_name, line))
            .or_else(|| find_in_expr(body, value_name, line)),
        Expression::Send { obj } => find_in_expr(obj, value_name, line),
        Expression::Open { body, .. } => find_in_expr(body, value_name, line),
        Expression::LetModule { body }
        | Expression::LetException { body }
        | Expression::LetOp { body } => find_in_expr(body, value_name, line),
        Expression::Assert(inner) | Expression::Lazy(inner) | Expression::SetInstvar(inner) => {
            find_in_expr(inner, value_name, line)
        }
        Expression::Override(items) => items.iter().find_map(|e| find_in_expr(e, value_name, line)),
        Expression::Ident(_) | Expression::Inert => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmt_test_support::{ident_expr, pident, structure, structure_with_value, value_binding};
    use cmt_core::StructureItem;

    #[test]
    fn finds_top_level_binding() {
        let s = structure_with_value(value_binding("add", 3, ident_expr(pident("x"))));
        let found = find_binding(&s, "add", None).unwrap();
        assert!(found.is_top_level);
        assert!(found.module_path.is_empty());
    }

    #[test]
    fn finds_binding_nested_in_submodule() {
        let inner = structure_with_value(value_binding("helper", 7, ident_expr(pident("x"))));
        let s = structure(vec![StructureItem::Module("Inner".into(), inner)]);
        let found = find_binding(&s, "helper", Some(7)).unwrap();
        assert!(found.is_top_level);
        assert_eq!(found.module_path, vec!["Inner".to_string()]);
    }

    #[test]
    fn finds_local_binding_and_captures_its_scope() {
        let local_let = Expression::Let {
            bindings: vec![value_binding("y", 5, ident_expr(pident("x")))],
            body: Box::new(ident_expr(pident("y"))),
        };
        let s = structure_with_value(value_binding("f", 4, local_let));
        let found = find_binding(&s, "y", Some(5)).unwrap();
        assert!(!found.is_top_level);
        assert!(found.scope.is_some());
    }

    #[test]
    fn line_number_disambiguates_same_named_bindings() {
        let s = structure(vec![
            StructureItem::Value(vec![value_binding("x", 1, Expression::Inert)]),
            StructureItem::Value(vec![value_binding("x", 9, Expression::Inert)]),
        ]);
        let found = find_binding(&s, "x", Some(9)).unwrap();
        assert_eq!(found.module_path, Vec::<String>::new());
        assert!(found.is_top_level);
    }
}
