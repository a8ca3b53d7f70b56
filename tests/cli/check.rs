use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::CliTest;

const HOME_TEMPLATE: &str = "<h1>{{ 'other.title' | transloco }}</h1>\n<p>Welcome back</p>\n";

#[test]
fn test_clean_project() -> Result<()> {
    let test = CliTest::with_file(
        "src/app/home/home.component.html",
        "<h1>{{ 'home.title' | transloco }}</h1>\n<p>{{ 'home.subtitle' | transloco }}</p>\n",
    )?;
    test.write_file(
        "src/app/home/home.component.ts",
        r#"
@Component({
  selector: 'app-home',
  templateUrl: './home.component.html',
})
export class HomeComponent {
  private transloco = inject(TranslocoService);

  greet(): string {
    return this.transloco.translate('home.greeting');
  }
}
"#,
    )?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 2 source files - no issues found

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_template_issues() -> Result<()> {
    let test = CliTest::with_file("src/app/home.component.html", HOME_TEMPLATE)?;

    assert_cmd_snapshot!(test.check_command(), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: Key 'other.title' does not follow naming convention. Expected the i18n key to start with 'home.'  key-naming-convention
      --> ./src/app/home.component.html:1:5
      |
    1 | <h1>{{ 'other.title' | transloco }}</h1>
      |     ^

    error: Hard-coded string "Welcome back" should be replaced with a translation key.  no-hardcoded-strings
      --> ./src/app/home.component.html:2:4
      |
    2 | <p>Welcome back</p>
      |    ^

    ✘ 2 problems (2 errors, 0 warnings)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_rule_selection() -> Result<()> {
    let test = CliTest::with_file("src/app/home.component.html", HOME_TEMPLATE)?;

    let output = test.check_command().arg("naming").output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("key-naming-convention"));
    assert!(!stdout.contains("no-hardcoded-strings"));
    assert!(stdout.contains("1 problem (1 error, 0 warnings)"));

    let output = test.check_command().arg("hardcoded").output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(!stdout.contains("key-naming-convention"));
    assert!(stdout.contains("Hard-coded string \"Welcome back\""));

    Ok(())
}

#[test]
fn test_service_key_depth() -> Result<()> {
    let test = CliTest::with_file(
        "src/app/core/employee-status.service.ts",
        r#"
@Injectable({ providedIn: 'root' })
export class EmployeeStatusService {
  private transloco = inject(TranslocoService);

  load() {
    this.transloco.translate('services.employeeStatus.loaded');
    this.transloco.translate('services.employeeStatus');
  }
}
"#,
    )?;

    let output = test.check_command().output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("Key 'services.employeeStatus' is too short"));
    assert!(stdout.contains("--> ./src/app/core/employee-status.service.ts:8:30"));
    assert!(!stdout.contains("services.employeeStatus.loaded"));

    Ok(())
}

#[test]
fn test_json_output() -> Result<()> {
    let test = CliTest::with_file("src/app/home.component.html", HOME_TEMPLATE)?;

    let output = test.check_command().args(["--format", "json"]).output()?;
    assert_eq!(output.status.code(), Some(1));

    let report: Value =
        serde_json::from_slice(&output.stdout).context("Output should be valid JSON")?;
    let issues = report["issues"].as_array().context("issues array")?;
    assert_eq!(issues.len(), 2);

    let first = &issues[0];
    assert_eq!(first["file"], "./src/app/home.component.html");
    assert_eq!(first["line"], 1);
    assert_eq!(first["column"], 5);
    assert_eq!(first["severity"], "error");
    assert_eq!(first["rule"], "key-naming-convention");
    assert_eq!(first["messageId"], "mismatchedKey");
    assert_eq!(first["key"], "other.title");
    assert_eq!(first["expectedPrefix"], "home");

    assert_eq!(issues[1]["messageId"], "noHardString");
    assert_eq!(issues[1]["text"], "Welcome back");

    assert_eq!(report["summary"]["filesChecked"], 1);
    assert_eq!(report["summary"]["errors"], 2);
    assert_eq!(report["summary"]["warnings"], 0);

    Ok(())
}

#[test]
fn test_config_ignores() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".ngi18nrc.json",
        r#"{
         "ignores": ["**/generated/**"]
     }"#,
    )?;
    test.write_file("src/app/generated/home.component.html", HOME_TEMPLATE)?;
    test.write_file(
        "src/app/home.component.html",
        "<h1>{{ 'home.title' | transloco }}</h1>",
    )?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 source file - no issues found

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_config_ignored_prefixes() -> Result<()> {
    let test = CliTest::with_file("src/app/home.component.html", HOME_TEMPLATE)?;
    test.write_file(
        ".ngi18nrc.json",
        r#"{ "rules": { "keyNamingConvention": { "ignoredPrefixes": ["other."] } } }"#,
    )?;

    let output = test.check_command().output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(!stdout.contains("other.title"));
    assert!(stdout.contains("1 problem (1 error, 0 warnings)"));

    Ok(())
}

#[test]
fn test_invalid_pattern_is_a_warning() -> Result<()> {
    let test = CliTest::with_file(
        "src/app/home.component.html",
        "<h1>{{ 'home.title' | transloco }}</h1>",
    )?;
    test.write_file(
        ".ngi18nrc.json",
        r#"{ "rules": { "noHardcodedStrings": { "ignorePattern": "(a+)+" } } }"#,
    )?;

    let output = test.check_command().output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("warning: Invalid ignorePattern \"(a+)+\""));
    assert!(stdout.contains("1 problem (0 errors, 1 warning)"));

    Ok(())
}

#[test]
fn test_parse_error() -> Result<()> {
    let test = CliTest::with_file(
        "src/app/broken.component.html",
        "<p>{{ 'broken.title' | transloco </p>",
    )?;

    let output = test.check_command().output()?;
    let stdout = String::from_utf8(output.stdout)?;
    let stderr = String::from_utf8(output.stderr)?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("unterminated interpolation"));
    assert!(stdout.contains("parse-error"));
    assert!(stdout.contains("  --> ./src/app/broken.component.html\n"));
    assert!(stderr.contains("1 file(s) could not be parsed"));

    Ok(())
}

#[test]
fn test_invalid_config() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".ngi18nrc.json", r#"{ "messagesRoot": "./i18n" }"#)?;

    let output = test.check_command().output()?;
    let stderr = String::from_utf8(output.stderr)?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr.contains("Failed to parse config file"));

    Ok(())
}

#[test]
fn test_missing_source_root() -> Result<()> {
    let test = CliTest::new()?;

    let output = test
        .check_command()
        .args(["--source-root", "does-not-exist"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));

    Ok(())
}
