//! Compilation tests for the permissions module

use super::{compile, compile_with_report, Action, PermissionMatrix, Resource};

#[test]
fn test_compile_empty_denies_everything() {
    let matrix = compile(Vec::<(&str, bool)>::new());
    assert_eq!(matrix, PermissionMatrix::default());
    assert!(matrix.granted().is_empty());
}

#[test]
fn test_compile_wide_alias_sets_exactly_one_row() {
    let matrix = compile([("account", true)]);
    for resource in Resource::ALL {
        for action in Action::ALL {
            assert_eq!(
                matrix.get(resource, action),
                resource == Resource::Account,
                "{resource}.{action}"
            );
        }
    }
}

#[test]
fn test_compile_single_action_sets_one_cell() {
    let matrix = compile([("flag_view", true)]);
    assert_eq!(matrix.granted(), vec![(Resource::Flag, Action::View)]);
}

#[test]
fn test_compile_synonyms_hit_the_same_cell() {
    let a = compile([("list_variables", true)]);
    let b = compile([("var_list", true)]);
    assert_eq!(a, b);
    assert!(a.variable.list);
}

// With the two-pass rule a specific key overrides a wide key for its cell
// regardless of which came first, so both orders compile to the same grid.
#[test]
fn test_compile_wide_then_specific_order() {
    let matrix = compile([("account", true), ("delete_account", false)]);
    assert!(matrix.account.create);
    assert!(matrix.account.update);
    assert!(matrix.account.list);
    assert!(matrix.account.view);
    assert!(!matrix.account.delete);
}

#[test]
fn test_compile_specific_then_wide_order() {
    let matrix = compile([("delete_account", false), ("account", true)]);
    assert!(matrix.account.create);
    assert!(matrix.account.update);
    assert!(matrix.account.list);
    assert!(matrix.account.view);
    assert!(!matrix.account.delete);
}

#[test]
fn test_compile_reports_override_in_both_orders() {
    for pairs in [
        vec![("account", true), ("delete_account", false)],
        vec![("delete_account", false), ("account", true)],
    ] {
        let report = compile_with_report(pairs);
        assert_eq!(report.overrides.len(), 1);
        let collision = &report.overrides[0];
        assert_eq!(collision.resource, Resource::Account);
        assert_eq!(collision.action, Action::Delete);
        assert_eq!(collision.overridden_key, "account");
        assert_eq!(collision.winning_key, "delete_account");
        assert!(!collision.value);
    }
}

#[test]
fn test_compile_same_tier_later_wins() {
    let report = compile_with_report([("create_flag", true), ("flag_create", false)]);
    assert!(!report.matrix.flag.create);
    assert_eq!(report.overrides.len(), 1);
    assert_eq!(report.overrides[0].overridden_key, "create_flag");

    let matrix = compile([("flag", false), ("flag", true)]);
    assert_eq!(matrix.granted().len(), 5);
}

#[test]
fn test_compile_agreeing_writes_are_not_overrides() {
    let report = compile_with_report([("env", true), ("create_env", true)]);
    assert!(report.overrides.is_empty());
    assert_eq!(report.matrix.granted().len(), 5);
}

#[test]
fn test_compile_ignores_unknown_keys() {
    let report = compile_with_report([
        ("craete_flag", true),
        ("view_key", true),
        ("superuser", true),
    ]);
    assert_eq!(report.ignored_keys, vec!["craete_flag", "superuser"]);
    assert_eq!(report.matrix.granted(), vec![(Resource::Key, Action::View)]);
}

#[test]
fn test_matrix_serializes_rows_and_columns() {
    let matrix = compile([("project", true)]);
    let json = serde_json::to_value(matrix).unwrap();
    assert_eq!(json["project"]["create"], true);
    assert_eq!(json["project"]["delete"], true);
    assert_eq!(json["flag"]["view"], false);
    assert_eq!(json["environment"]["list"], false);
}
