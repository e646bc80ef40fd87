//! Integration tests for routing argument vectors through a command tree

mod common;

use common::{run, Recorder};
use roast::dispatch::Outcome;
use roast::{App, ArgumentSpec, CommandConfig, DispatchError, OptionSpec, OptionValue, ValueType};

/// roast deploy <target>
fn deploy_app(recorder: &Recorder) -> App {
    let config = CommandConfig::new().subcommand(
        "deploy",
        CommandConfig::new()
            .description("Deploy the application")
            .argument(ArgumentSpec::new("target").required(true).description("Environment"))
            .exec(recorder.handler()),
    );
    App::new("roast", config).unwrap()
}

/// roast [--region] vpc [--profile] (create|delete) [--dry-run] <name>
fn vpc_app(recorder: &Recorder) -> App {
    let name = || {
        ArgumentSpec::new("name")
            .required(true)
            .validate(|value| value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'))
            .format(|value| value.to_lowercase())
    };

    let config = CommandConfig::new()
        .option(
            OptionSpec::new("region")
                .short('r')
                .value("name")
                .value_required(true)
                .default_value("us-west-2"),
        )
        .subcommand(
            "vpc",
            CommandConfig::new()
                .description("Manage VPCs")
                .option(OptionSpec::new("profile").short('p').value("name").value_required(true))
                .subcommand(
                    "create",
                    CommandConfig::new()
                        .option(OptionSpec::new("dry-run").short('d'))
                        .argument(name())
                        .exec(recorder.handler()),
                )
                .subcommand(
                    "delete",
                    CommandConfig::new()
                        .argument(name())
                        .exec(recorder.handler()),
                ),
        );
    App::new("roast", config).unwrap()
}

#[test]
fn test_leaf_receives_its_argument() {
    let recorder = Recorder::new();
    let app = deploy_app(&recorder);

    let (result, output) = run(&app, &["deploy", "prod"]);
    assert_eq!(result.unwrap(), Outcome::Executed);
    assert!(output.is_empty());

    let calls = recorder.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].args, vec!["prod"]);
    assert!(calls[0].options.is_empty());
    assert_eq!(calls[0].path, vec!["deploy"]);
}

#[test]
fn test_missing_argument_shows_help() {
    let recorder = Recorder::new();
    let app = deploy_app(&recorder);

    let (result, output) = run(&app, &["deploy"]);
    assert!(matches!(
        result,
        Err(DispatchError::ArgumentCount {
            expected: 1,
            actual: 0,
            ..
        })
    ));
    assert!(output.contains("ERROR: invalid number of arguments"));
    assert!(output.contains("$> roast [options] deploy <target>"));
    assert!(recorder.calls().is_empty());
}

#[test]
fn test_extra_argument_shows_help() {
    let recorder = Recorder::new();
    let app = deploy_app(&recorder);

    let (result, output) = run(&app, &["deploy", "prod", "staging"]);
    assert!(matches!(result, Err(DispatchError::ArgumentCount { actual: 2, .. })));
    assert!(output.contains("$> roast [options] deploy <target>"));
    assert!(recorder.calls().is_empty());
}

#[test]
fn test_help_flag_at_leaf() {
    let recorder = Recorder::new();
    let app = deploy_app(&recorder);

    for argv in [
        &["deploy", "--help"][..],
        &["deploy", "-h"],
        &["--help", "deploy"],
        &["deploy", "prod", "--help"],
    ] {
        let (result, output) = run(&app, argv);
        assert_eq!(result.unwrap(), Outcome::HelpShown, "argv: {:?}", argv);
        assert!(output.contains("$> roast [options] deploy <target>"));
        assert!(output.contains("Deploy the application"));
    }
    assert!(recorder.calls().is_empty());
}

#[test]
fn test_unknown_subcommand_shows_root_help() {
    let recorder = Recorder::new();
    let app = deploy_app(&recorder);

    let (result, output) = run(&app, &["launch"]);
    match result {
        Err(DispatchError::UnknownCommand { command, keyword }) => {
            assert_eq!(command, "roast");
            assert_eq!(keyword, "launch");
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert!(output.contains("$> roast [options] (deploy)"));
    assert!(recorder.calls().is_empty());
}

#[test]
fn test_missing_subcommand_shows_root_help() {
    let recorder = Recorder::new();
    let app = deploy_app(&recorder);

    let (result, output) = run(&app, &[]);
    assert!(matches!(result, Err(DispatchError::MissingCommand(_))));
    assert!(output.contains("$> roast [options] (deploy)"));
}

#[test]
fn test_two_level_nesting() {
    let recorder = Recorder::new();
    let app = vpc_app(&recorder);

    let (result, _) = run(&app, &["vpc", "create", "my-vpc"]);
    assert_eq!(result.unwrap(), Outcome::Executed);

    let calls = recorder.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].args, vec!["my-vpc"]);
    assert_eq!(calls[0].path, vec!["vpc", "create"]);
}

#[test]
fn test_nested_leaf_counts_ancestor_keywords() {
    let recorder = Recorder::new();
    let app = vpc_app(&recorder);

    let (result, output) = run(&app, &["vpc", "create"]);
    assert!(matches!(result, Err(DispatchError::ArgumentCount { .. })));
    assert!(output.contains("$> roast [options] vpc create <name>"));

    let (result, _) = run(&app, &["vpc", "create", "a", "b"]);
    assert!(matches!(result, Err(DispatchError::ArgumentCount { .. })));
    assert!(recorder.calls().is_empty());
}

#[test]
fn test_help_at_intermediate_levels() {
    let recorder = Recorder::new();
    let app = vpc_app(&recorder);

    let (result, output) = run(&app, &["vpc", "--help"]);
    assert_eq!(result.unwrap(), Outcome::HelpShown);
    assert!(output.contains("$> roast [options] vpc (create|delete)"));
    assert!(!output.contains("Options:"));

    let (result, output) = run(&app, &["-h"]);
    assert_eq!(result.unwrap(), Outcome::HelpShown);
    assert!(output.contains("$> roast [options] (vpc)"));

    let (result, output) = run(&app, &["--help", "vpc", "create"]);
    assert_eq!(result.unwrap(), Outcome::HelpShown);
    assert!(output.contains("$> roast [options] vpc create <name>"));
    assert!(output.contains("-r, --region <name>"));
    assert!(output.contains("-p, --profile <name>"));
    assert!(output.contains("-d, --dry-run"));
}

#[test]
fn test_options_are_inherited_by_the_leaf() {
    let recorder = Recorder::new();
    let app = vpc_app(&recorder);

    let (result, _) = run(
        &app,
        &["--region", "eu-west-1", "vpc", "-p", "ops", "create", "edge", "--dry-run"],
    );
    assert_eq!(result.unwrap(), Outcome::Executed);

    let call = &recorder.calls()[0];
    assert_eq!(call.args, vec!["edge"]);
    assert_eq!(
        call.option("region"),
        Some(&OptionValue::Text("eu-west-1".to_string()))
    );
    assert_eq!(call.option("profile"), Some(&OptionValue::Text("ops".to_string())));
    assert!(call.flag("dry-run"));
}

#[test]
fn test_inherited_defaults_apply() {
    let recorder = Recorder::new();
    let app = vpc_app(&recorder);

    run(&app, &["vpc", "delete", "edge"]).0.unwrap();

    let call = &recorder.calls()[0];
    assert_eq!(
        call.option("region").and_then(|v| v.as_str()),
        Some("us-west-2")
    );
    assert!(call.option("profile").is_none());
    assert!(call.option("dry-run").is_none());
}

#[test]
fn test_sibling_options_are_not_inherited() {
    let recorder = Recorder::new();
    let app = vpc_app(&recorder);

    let (result, output) = run(&app, &["vpc", "delete", "edge", "--dry-run"]);
    assert!(matches!(result, Err(DispatchError::Options { .. })));
    assert!(output.contains("$> roast [options] vpc delete <name>"));
    assert!(recorder.calls().is_empty());
}

#[test]
fn test_validator_rejects_and_formatter_rewrites() {
    let recorder = Recorder::new();
    let app = vpc_app(&recorder);

    let (result, output) = run(&app, &["vpc", "create", "bad_name!"]);
    match result {
        Err(DispatchError::InvalidArgument { argument, value, .. }) => {
            assert_eq!(argument, "name");
            assert_eq!(value, "bad_name!");
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert!(output.contains("ERROR: invalid argument: name"));
    assert!(recorder.calls().is_empty());

    run(&app, &["vpc", "create", "My-VPC"]).0.unwrap();
    assert_eq!(recorder.calls()[0].args, vec!["my-vpc"]);
}

#[test]
fn test_child_option_overrides_parent() {
    let recorder = Recorder::new();
    let config = CommandConfig::new()
        .option(OptionSpec::new("region").short('r').value("name").default_value("us-west-2"))
        .subcommand(
            "deploy",
            CommandConfig::new()
                .option(
                    OptionSpec::new("region")
                        .value("name")
                        .description("Deployment region")
                        .default_value("eu-central-1"),
                )
                .option(OptionSpec::new("replicas").short('r').value("count").value_type(ValueType::Integer))
                .exec(recorder.handler()),
        );
    let app = App::new("roast", config).unwrap();

    run(&app, &["deploy", "-r", "3"]).0.unwrap();
    let call = &recorder.calls()[0];
    assert_eq!(call.option("region").and_then(|v| v.as_str()), Some("eu-central-1"));
    assert_eq!(call.option("replicas"), Some(&OptionValue::Integer(3)));

    let help = app.help(&["deploy"]).unwrap();
    assert!(help.contains("--region [name] - Deployment region (default: eu-central-1)"));
    assert!(help.contains("-r, --replicas [count]"));
}

#[test]
fn test_handler_errors_are_returned() {
    let config = CommandConfig::new().subcommand(
        "deploy",
        CommandConfig::new().exec(|_| anyhow::bail!("environment is locked")),
    );
    let app = App::new("roast", config).unwrap();

    let (result, output) = run(&app, &["deploy"]);
    let err = result.unwrap_err();
    assert!(!err.is_usage_error());
    assert_eq!(err.to_string(), "environment is locked");
    assert!(output.is_empty());
}

#[test]
fn test_root_leaf() {
    let recorder = Recorder::new();
    let config = CommandConfig::new()
        .argument(ArgumentSpec::new("file").required(true))
        .exec(recorder.handler());
    let app = App::new("roast", config).unwrap();

    run(&app, &["notes.txt"]).0.unwrap();
    assert_eq!(recorder.calls()[0].args, vec!["notes.txt"]);
    assert!(recorder.calls()[0].path.is_empty());

    let (result, output) = run(&app, &["--help"]);
    assert_eq!(result.unwrap(), Outcome::HelpShown);
    assert!(output.contains("$> roast [options] <file>"));
}

#[test]
fn test_double_dash_keeps_hyphenated_values() {
    let recorder = Recorder::new();
    let app = deploy_app(&recorder);

    run(&app, &["deploy", "--", "-canary"]).0.unwrap();
    assert_eq!(recorder.calls()[0].args, vec!["-canary"]);
}

#[test]
fn test_tree_is_reusable() {
    let recorder = Recorder::new();
    let app = vpc_app(&recorder);

    let (_, first) = run(&app, &["vpc", "create", "--help"]);
    run(&app, &["vpc", "delete", "edge"]).0.unwrap();
    run(&app, &["vpc", "create", "edge"]).0.unwrap();
    let (_, second) = run(&app, &["vpc", "create", "--help"]);

    assert_eq!(first, second);
    assert_eq!(recorder.calls().len(), 2);
    assert_eq!(recorder.calls()[1].path, vec!["vpc", "create"]);
}

#[test]
fn test_bundled_shortcuts_before_the_keyword() {
    let recorder = Recorder::new();
    let config = CommandConfig::new()
        .option(OptionSpec::new("force").short('f'))
        .option(OptionSpec::new("region").short('r').value("name").value_required(true))
        .subcommand(
            "deploy",
            CommandConfig::new()
                .argument(ArgumentSpec::new("target").required(true))
                .exec(recorder.handler()),
        );
    let app = App::new("roast", config).unwrap();

    for argv in [&["-fr", "eu", "deploy", "prod"], &["deploy", "-fr", "eu", "prod"]] {
        let (result, _) = run(&app, argv);
        assert_eq!(result.unwrap(), Outcome::Executed, "argv: {:?}", argv);
    }

    let calls = recorder.calls();
    assert_eq!(calls.len(), 2);
    for call in &calls {
        assert_eq!(call.args, vec!["prod"]);
        assert!(call.flag("force"));
        assert_eq!(call.option("region").and_then(|v| v.as_str()), Some("eu"));
    }
}
