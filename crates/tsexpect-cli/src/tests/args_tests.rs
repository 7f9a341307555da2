use super::*;
use clap::Parser;

#[test]
fn test_check_command() {
    let args = CliArgs::try_parse_from(["tsexpect", "check", "types.json", "--fail-fast"]).unwrap();
    assert_eq!(args.command.fixture(), Path::new("types.json"));
    assert!(args.command.fail_fast());
    assert_eq!(args.format, None);
    assert!(!args.no_color);
}

#[test]
fn test_global_flags_after_subcommand() {
    let args = CliArgs::try_parse_from([
        "tsexpect",
        "explain",
        "types.json",
        "Left",
        "Right",
        "--format",
        "JSON",
        "--no-color",
        "--config",
        "ci/tsexpect.json",
    ])
    .unwrap();
    assert_eq!(args.format, Some(OutputFormat::Json));
    assert!(args.no_color);
    assert_eq!(args.config.as_deref(), Some(Path::new("ci/tsexpect.json")));
    let Command::Explain {
        actual, expected, ..
    } = &args.command
    else {
        panic!("expected explain, got {:?}", args.command);
    };
    assert_eq!(actual, "Left");
    assert_eq!(expected, "Right");
    assert!(!args.command.fail_fast());
}

#[test]
fn test_props_command() {
    let args =
        CliArgs::try_parse_from(["tsexpect", "props", "types.json", r#"{"array":"Node"}"#]).unwrap();
    assert!(matches!(
        &args.command,
        Command::Props { type_expr, .. } if type_expr == r#"{"array":"Node"}"#
    ));
}

#[test]
fn test_rejects_missing_arguments() {
    assert!(CliArgs::try_parse_from(["tsexpect"]).is_err());
    assert!(CliArgs::try_parse_from(["tsexpect", "explain", "types.json", "Left"]).is_err());
    assert!(CliArgs::try_parse_from(["tsexpect", "check", "types.json", "--format", "xml"]).is_err());
}
