use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::CliTest;

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["includes"], serde_json::json!(["src"]));
    assert_eq!(parsed["sourceRoot"], "./");
    assert!(
        parsed["rules"].get("keyNamingConvention").is_some(),
        "Config should have 'rules.keyNamingConvention'"
    );
    assert!(
        parsed["rules"].get("noHardcodedStrings").is_some(),
        "Config should have 'rules.noHardcodedStrings'"
    );
    assert!(
        content.contains("  "),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .ngi18nrc.json

    ----- stderr -----
    ");

    assert!(test.root().join(".ngi18nrc.json").exists());
    let content = test.read_file(".ngi18nrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".ngi18nrc.json", "{}")?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    error: .ngi18nrc.json already exists
    ");

    assert_eq!(test.read_file(".ngi18nrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_usable() -> Result<()> {
    let test = CliTest::with_file(
        "src/app/home.component.html",
        "<h1>{{ 'home.title' | transloco }}</h1>",
    )?;

    let status = test.command().arg("init").status()?;
    assert!(status.success());

    let output = test.check_command().output()?;
    assert_eq!(output.status.code(), Some(0));

    Ok(())
}
