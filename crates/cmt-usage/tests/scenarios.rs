use std::collections::BTreeMap;
use std::path::PathBuf;

use cmt_core::{ModuleInfo, MockCmtDecoder};
use cmt_test_support::{
    apply, ident_expr, module_name, open_expr, pdot, pident, sequence, structure_with_value,
    value_binding,
};
use cmt_usage::{count_value_usage, UsageQuery};
use cmt_test_support::cmt_info_with_structure;

#[test]
fn qualified_and_open_permitted_references_are_counted_across_dependents() {
    let graph = cmt_graph::build(&[
        ModuleInfo::new(module_name("Math"), vec![module_name("Utils")], None, None, None),
        ModuleInfo::new(module_name("Utils"), vec![], None, None, None),
    ]);

    let utils_structure = structure_with_value(value_binding("add", 1, ident_expr(pident("x"))));

    let qualified_call = || {
        apply(
            ident_expr(pdot(&["Utils", "add"])),
            vec![ident_expr(pident("x")), ident_expr(pident("x"))],
        )
    };
    let math_body = open_expr(
        "Utils",
        sequence(vec![qualified_call(), qualified_call(), ident_expr(pident("add"))]),
    );
    let math_structure = structure_with_value(value_binding("run", 1, math_body));

    let mut cmt_paths = BTreeMap::new();
    cmt_paths.insert(module_name("Utils"), PathBuf::from("Utils.cmt"));
    cmt_paths.insert(module_name("Math"), PathBuf::from("Math.cmt"));

    let decoder = MockCmtDecoder::new()
        .with_entry("Utils.cmt", cmt_info_with_structure("Utils", &[], utils_structure))
        .with_entry("Math.cmt", cmt_info_with_structure("Math", &["Utils"], math_structure));

    let query = UsageQuery {
        module_name: &module_name("Utils"),
        value_name: "add",
        line_number: Some(1),
    };
    let mut results = count_value_usage(&query, &graph, &cmt_paths, &decoder);
    results.sort_by(|a, b| a.0.as_str().cmp(b.0.as_str()));

    assert_eq!(
        results,
        vec![(module_name("Math"), 3), (module_name("Utils"), 0)]
    );
}
