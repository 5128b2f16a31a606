use cmt_core::{Expression, Path, Structure, StructureItem};

use crate::locate::OwnerBinding;

/// Counts references to the owner's binding inside one candidate
/// module's structure, given the binding's location in the owner.
pub fn count_references(
    structure: &Structure,
    owner_name: &str,
    owner: &OwnerBinding,
    value_name: &str,
    candidate_name: &str,
) -> i64 {
    if owner.is_top_level {
        let mut count = 0i64;
        let mut open_modules = Vec::new();
        walk_structure(structure, &mut open_modules, &mut |path| {
            if matches_top_level(path, owner_name, &owner.module_path, value_name, candidate_name, &open_modules) {
                count += 1;
            }
        });
        count
    } else if candidate_name == owner_name {
        let scope = owner
            .scope
            .as_ref()
            .expect("a non-top-level OwnerBinding always carries its enclosing scope");
        let mut count = 0i64;
        walk_expr(scope, &mut Vec::new(), &mut |path| {
            if path == [value_name.to_string()] {
                count += 1;
            }
        });
        count
    } else {
        0
    }
}

fn matches_top_level(
    path: &[String],
    owner_name: &str,
    owner_module_path: &[String],
    value_name: &str,
    candidate_name: &str,
    open_modules: &[String],
) -> bool {
    if path == [value_name.to_string()] {
        if candidate_name == owner_name {
            return true;
        }
        return owner_module_path.is_empty() && open_modules.iter().any(|m| m == owner_name);
    }

    let mut qualified = vec![owner_name.to_string()];
    qualified.extend_from_slice(owner_module_path);
    qualified.push(value_name.to_string());
    path == qualified.as_slice()
}

fn walk_structure(structure: &Structure, open_modules: &mut Vec<String>, visit: &mut impl FnMut(&[String])) {
    for item in &structure.items {
        match item {
            StructureItem::Value(bindings) => {
                for binding in bindings {
                    walk_expr(&binding.expr, open_modules, visit);
                }
            }
            StructureItem::Module(_, inner) => walk_structure(inner, open_modules, visit),
            StructureItem::Open(_) | StructureItem::Other => {}
        }
    }
}

fn walk_expr(expr: &Expression, open_modules: &mut Vec<String>, visit: &mut impl FnMut(&[String])) {
    match expr {
        Expression::Ident(path) => visit(&path_segments(path)),
        Expression::Let { bindings, body } => {
            for binding in bindings {
                walk_expr(&binding.expr, open_modules, visit);
            }
            walk_expr(body, open_modules, visit);
        }
        Expression::Function { cases } => {
            for case in cases {
                walk_expr(case, open_modules, visit);
            }
        }
        Expression::Apply { func, args } => {
            walk_expr(func, open_modules, visit);
            for arg in args {
                walk_expr(arg, open_modules, visit);
            }
        }
        Expression::Match { scrutinee, cases } => {
            walk_expr(scrutinee, open_modules, visit);
            for case in cases {
                walk_expr(case, open_modules, visit);
            }
        }
        Expression::Try { body, cases } => {
            walk_expr(body, open_modules, visit);
            for case in cases {
                walk_expr(case, open_modules, visit);
            }
        }
        Expression::Tuple(items) | Expression::Array(items) | Expression::Construct { args: items } => {
            for item in items {
                walk_expr(item, open_modules, visit);
            }
        }
        Expression::Variant { arg } => {
            if let Some(inner) = arg {
                walk_expr(inner, open_modules, visit);
            }
        }
        Expression::Record { fields, extended_expression } => {
            for field in fields {
                walk_expr(field, open_modules, visit);
            }
            if let Some(inner) = extended_expression {
                walk_expr(inner, open_modules, visit);
            }
        }
        Expression::Field(inner) => walk_expr(inner, open_modules, visit),
        Expression::SetField { record, value } => {
            walk_expr(record, open_modules, visit);
            walk_expr(value, open_modules, visit);
        }
        Expression::IfThenElse { cond, then_branch, else_branch } => {
            walk_expr(cond, open_modules, visit);
            walk_expr(then_branch, open_modules, visit);
            if let Some(inner) = else_branch {
                walk_expr(inner, open_modules, visit);
            }
        }
        Expression::Sequence(a, b) => {
            walk_expr(a, open_modules, visit);
            walk_expr(b, open_modules, visit);
        }
        Expression::While { cond, body } => {
            walk_expr(cond, open_modules, visit);
            walk_expr(body, open_modules, visit);
        }
        Expression::For { start, stop, body } => {
            walk_expr(start, open_modules, visit);
            walk_expr(stop, open_modules, visit);
            walk_expr(body, open_modules, visit);
        }
        Expression::Send { obj } => walk_expr(obj, open_modules, visit),
        Expression::Open { module_name, body } => {
            open_modules.push(module_name.clone());
            walk_expr(body, open_modules, visit);
            open_modules.pop();
        }
        Expression::LetModule { body }
        | Expression::LetException { body }
        | Expression::LetOp { body } => walk_expr(body, open_modules, visit),
        Expression::Assert(inner) | Expression::Lazy(inner) | Expression::SetInstvar(inner) => {
            walk_expr(inner, open_modules, visit)
        }
        Expression::Override(items) => {
            for item in items {
                walk_expr(item, open_modules, visit);
            }
        }
        Expression::Inert => {}
    }
}

fn path_segments(path: &Path) -> Vec<String> {
    path.to_segments()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmt_test_support::{apply, ident_expr, open_expr, pdot, pident, structure, structure_with_value, value_binding};

    fn owner(module_path: Vec<String>) -> OwnerBinding {
        OwnerBinding {
            module_path,
            is_top_level: true,
            scope: None,
        }
    }

    #[test]
    fn counts_unqualified_use_within_owner_only() {
        let s = structure_with_value(value_binding(
            "main",
            1,
            apply(ident_expr(pident("add")), vec![ident_expr(pident("add"))]),
        ));
        let count = count_references(&s, "Math", &owner(vec![]), "add", "Math");
        assert_eq!(count, 2);

        let count_elsewhere = count_references(&s, "Math", &owner(vec![]), "add", "App");
        assert_eq!(count_elsewhere, 0);
    }

    #[test]
    fn counts_fully_qualified_use_from_any_module() {
        let s = structure_with_value(value_binding("main", 1, ident_expr(pdot(&["Math", "add"]))));
        assert_eq!(count_references(&s, "Math", &owner(vec![]), "add", "App"), 1);
        assert_eq!(count_references(&s, "Math", &owner(vec![]), "add", "Math"), 1);
    }

    #[test]
    fn open_module_permits_unqualified_reference() {
        let s = structure_with_value(value_binding(
            "main",
            1,
            open_expr("Math", ident_expr(pident("add"))),
        ));
        assert_eq!(count_references(&s, "Math", &owner(vec![]), "add", "App"), 1);
    }

    #[test]
    fn open_does_not_help_when_binding_is_nested() {
        let s = structure_with_value(value_binding(
            "main",
            1,
            open_expr("Math", ident_expr(pident("add"))),
        ));
        assert_eq!(
            count_references(&s, "Math", &owner(vec!["Inner".to_string()]), "add", "App"),
            0
        );
    }

    #[test]
    fn local_binding_only_counted_within_its_scope_in_owner() {
        let local_owner = OwnerBinding {
            module_path: vec![],
            is_top_level: false,
            scope: Some(ident_expr(pident("y"))),
        };
        let s = structure(vec![]);
        assert_eq!(count_references(&s, "Math", &local_owner, "y", "Math"), 1);
        assert_eq!(count_references(&s, "Math", &local_owner, "y", "App"), 0);
    }
}
