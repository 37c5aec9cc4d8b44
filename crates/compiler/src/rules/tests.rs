//! Assembly tests for the rules module

use super::*;
use crate::coerce::CoercedValue;
use crate::error::{CompilerError, UsageError};
use serde_json::json;

fn changes_for_env(env: Option<&str>) -> FlagChanges {
    FlagChanges {
        environment: env.map(str::to_string),
        ..FlagChanges::default()
    }
}

#[test]
fn test_creation_replicates_identical_configuration() {
    let rules = vec![RuleArg::new("user.plan == 'pro'", "true")];
    let envs = assemble_creation("acme", Some("false"), &rules, &["dev", "prod"]).unwrap();

    assert_eq!(envs.len(), 2);
    assert_eq!(envs["dev"], envs["prod"]);

    let dev = &envs["dev"];
    assert_eq!(dev.off_value, CoercedValue::Typed(json!(false)));
    assert_eq!(dev.rules.len(), 1);
    assert_eq!(dev.rules[0].expression, "user.plan == 'pro'");
    assert_eq!(dev.rules[0].value, CoercedValue::Typed(json!(true)));
}

#[test]
fn test_creation_without_environments_fails() {
    let result = assemble_creation::<&str>("acme", Some("1"), &[], &[]);
    match result {
        Err(CompilerError::NoEnvironmentsDefined { account }) => assert_eq!(account, "acme"),
        other => panic!("Expected NoEnvironmentsDefined, got {:?}", other),
    }
}

#[test]
fn test_creation_without_off_value_uses_empty_literal() {
    let config = assemble_configuration(None, &[]);
    assert_eq!(config.off_value, CoercedValue::Literal(String::new()));
    assert!(config.rules.is_empty());
}

#[test]
fn test_creation_keeps_rule_order_and_literal_fallback() {
    let rules = vec![
        RuleArg::new("country == 'DE'", "'de-variant'"),
        RuleArg::new("beta", "blue-green"),
        RuleArg::new("true", "5+3"),
    ];
    let config = assemble_configuration(Some("'default'"), &rules);
    let values: Vec<_> = config.rules.iter().map(|r| r.value.to_json()).collect();
    assert_eq!(values, vec![json!("de-variant"), json!("blue-green"), json!(8)]);
    assert!(config.rules[1].value.is_literal());
}

#[test]
fn test_configuration_serializes_camel_case() {
    let config = assemble_configuration(Some("10"), &[RuleArg::new("a > 1", "20")]);
    let json = serde_json::to_value(&config).unwrap();
    assert_eq!(
        json,
        json!({"offValue": 10, "rules": [{"expression": "a > 1", "value": 20}]})
    );
}

#[test]
fn test_patch_tags_only_needs_no_environment() {
    let changes = FlagChanges {
        tags: vec!["beta".to_string()],
        ..FlagChanges::default()
    };
    let patch = assemble_patch(&changes).unwrap();
    assert_eq!(
        patch,
        PatchInstructionSet {
            add_tags: Some(vec!["beta".to_string()]),
            ..PatchInstructionSet::default()
        }
    );
    assert_eq!(serde_json::to_value(&patch).unwrap(), json!({"addTags": ["beta"]}));
}

#[test]
fn test_patch_rule_without_environment_fails() {
    let changes = FlagChanges {
        rules: vec![RuleArg::new("a == 1", "true")],
        ..FlagChanges::default()
    };
    assert_eq!(assemble_patch(&changes), Err(UsageError::MissingEnvironment));

    let changes = FlagChanges {
        off_value: Some("false".to_string()),
        environment: Some(String::new()),
        ..FlagChanges::default()
    };
    assert_eq!(assemble_patch(&changes), Err(UsageError::MissingEnvironment));

    let changes = FlagChanges {
        on: true,
        ..FlagChanges::default()
    };
    assert_eq!(assemble_patch(&changes), Err(UsageError::MissingEnvironment));
}

#[test]
fn test_patch_on_and_off_conflict() {
    let changes = FlagChanges {
        on: true,
        off: true,
        ..changes_for_env(Some("prod"))
    };
    assert_eq!(assemble_patch(&changes), Err(UsageError::ConflictingOnOff));
}

#[test]
fn test_patch_environment_scoped_fields() {
    let changes = FlagChanges {
        off: true,
        off_value: Some("'fallback'".to_string()),
        rules: vec![
            RuleArg::new("user.plan == 'pro'", "true"),
            RuleArg::new("user.plan == 'free'", "false"),
        ],
        ..changes_for_env(Some("prod"))
    };
    let patch = assemble_patch(&changes).unwrap();

    let set_on = patch.set_on.clone().unwrap();
    assert_eq!(set_on.environment, "prod");
    assert!(!set_on.value);

    let off_value = patch.set_off_value.clone().unwrap();
    assert_eq!(off_value.value, CoercedValue::Typed(json!("fallback")));

    assert_eq!(patch.rules.len(), 2);
    assert_eq!(patch.rules[0].expression, "user.plan == 'pro'");
    assert_eq!(patch.rules[1].expression, "user.plan == 'free'");
    assert!(patch.rules.iter().all(|r| r.environment == "prod"));
    assert_eq!(patch.name, None);
    assert_eq!(patch.add_tags, None);
}

#[test]
fn test_patch_leaves_unsupplied_fields_unset() {
    let changes = FlagChanges {
        name: Some(String::new()),
        deprecated: Some(true),
        ..FlagChanges::default()
    };
    let patch = assemble_patch(&changes).unwrap();
    let json = serde_json::to_value(&patch).unwrap();
    assert_eq!(json, json!({"deprecated": true}));
}

#[test]
fn test_explicit_false_is_sent() {
    let changes = FlagChanges {
        permanent: Some(false),
        ..FlagChanges::default()
    };
    let json = serde_json::to_value(assemble_patch(&changes).unwrap()).unwrap();
    assert_eq!(json, json!({"permanent": false}));
}

#[test]
fn test_changes_is_empty() {
    assert!(FlagChanges::default().is_empty());
    assert!(changes_for_env(Some("prod")).is_empty());
    assert!(!FlagChanges {
        on: true,
        ..FlagChanges::default()
    }
    .is_empty());
}
