use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use indoc::indoc;
use predicates::prelude::*;
use std::process::Command;

fn cli() -> Command {
    Command::cargo_bin("css-value-grammar").unwrap()
}

#[test]
fn valid_value() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = cli();
    cmd.arg("border-width").arg("thin  2PX");
    cmd.assert().success().stdout(predicate::eq("thin 2px\n"));

    Ok(())
}

#[test]
fn css_wide_keyword() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = cli();
    cmd.arg("width").arg("inherit");
    cmd.assert().success().stdout(predicate::eq("inherit\n"));

    Ok(())
}

#[test]
fn minify_option() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = cli();
    cmd.arg("transition-timing-function").arg("ease , linear").arg("--minify");
    cmd.assert().success().stdout(predicate::eq("ease,linear\n"));

    Ok(())
}

#[test]
fn invalid_value() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = cli();
    cmd.arg("border-width").arg("thin red");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unexpected 'red' at component 1"));

    Ok(())
}

#[test]
fn incomplete_value() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = cli();
    cmd.arg("box-shadow").arg("inset");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Incomplete value for box-shadow: inset"));

    Ok(())
}

#[test]
fn unparsable_value() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = cli();
    cmd.arg("width").arg("frobnicate(1px)");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value"));

    Ok(())
}

#[test]
fn unknown_property() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = cli();
    cmd.arg("not-a-property").arg("1px");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unknown property 'not-a-property'"));

    Ok(())
}

#[test]
fn print_syntax() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = cli();
    cmd.arg("border-width");
    cmd.assert().success().stdout(predicate::eq("<line-width>{1,4}\n"));

    let mut cmd = cli();
    cmd.arg("offset-path");
    cmd.assert()
        .success()
        .stdout(predicate::eq("none | <url> | <basic-shape> || <coord-box>\n"));

    Ok(())
}

#[test]
fn json_option() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = cli();
    cmd.arg("border-width").arg("thin 2px").arg("--json");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#"{"values":["thin","2px"],"state":"complete"}"#));

    let mut cmd = cli();
    cmd.arg("border-width").arg("thin red").arg("--json");
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains(r#""state":"invalid","index":1"#));

    let mut cmd = cli();
    cmd.arg("color").arg("--json");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#""compiledSyntax":"<color>""#))
        .stdout(predicate::str::contains(r#""inherited":true"#));

    Ok(())
}

#[test]
fn suggest_option() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = cli();
    cmd.arg("border-width").arg("thin").arg("--suggest");
    cmd.assert()
        .success()
        .stdout(predicate::eq("<length>\nthin\nmedium\nthick\n"));

    let mut cmd = cli();
    cmd.arg("animation-name").arg("--suggest");
    cmd.assert()
        .success()
        .stdout(predicate::eq("none\n<custom-ident>\n<string>\n"));

    let mut cmd = cli();
    cmd.arg("border-width").arg("1px 2px 3px 4px").arg("--suggest");
    cmd.assert().success().stdout(predicate::str::is_empty());

    let mut cmd = cli();
    cmd.arg("z-index").arg("--suggest").arg("--json");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#"{"type":"keyword","keyword":"auto"}"#));

    Ok(())
}

#[test]
fn custom_tables() -> Result<(), Box<dyn std::error::Error>> {
    let properties = assert_fs::NamedTempFile::new("properties.json")?;
    properties.write_str(indoc! {r#"
      {
        "gap-width": {
          "syntax": "<gap>{1,2}",
          "inherited": false,
          "status": "standard"
        }
      }
    "#})?;
    let syntaxes = assert_fs::NamedTempFile::new("syntaxes.json")?;
    syntaxes.write_str(indoc! {r#"
      {
        "gap": { "syntax": "<length-percentage> | normal" }
      }
    "#})?;

    let mut cmd = cli();
    cmd.arg("--properties")
        .arg(properties.path())
        .arg("--syntaxes")
        .arg(syntaxes.path())
        .arg("gap-width")
        .arg("normal 10%");
    cmd.assert().success().stdout(predicate::eq("normal 10%\n"));

    let mut cmd = cli();
    cmd.arg("--properties")
        .arg(properties.path())
        .arg("--syntaxes")
        .arg(syntaxes.path())
        .arg("border-width")
        .arg("thin");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unknown property 'border-width'"));

    let mut cmd = cli();
    cmd.arg("--properties").arg(properties.path()).arg("gap-width");
    cmd.assert().failure();

    Ok(())
}

#[test]
fn malformed_table() -> Result<(), Box<dyn std::error::Error>> {
    let properties = assert_fs::NamedTempFile::new("properties.json")?;
    properties.write_str("{ \"width\": ")?;
    let syntaxes = assert_fs::NamedTempFile::new("syntaxes.json")?;
    syntaxes.write_str("{}")?;

    let mut cmd = cli();
    cmd.arg("--properties")
        .arg(properties.path())
        .arg("--syntaxes")
        .arg(syntaxes.path())
        .arg("width");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid data table"));

    Ok(())
}

#[test]
fn audit_option() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = cli();
    cmd.arg("--audit");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("0 problems found"));

    let properties = assert_fs::NamedTempFile::new("properties.json")?;
    properties.write_str(indoc! {r#"
      {
        "broken": { "syntax": "<length>{4,2}", "status": "standard" },
        "dangling": { "syntax": "<undefined-type> | auto", "status": "standard" }
      }
    "#})?;
    let syntaxes = assert_fs::NamedTempFile::new("syntaxes.json")?;
    syntaxes.write_str("{}")?;

    let mut cmd = cli();
    cmd.arg("--audit")
        .arg("--properties")
        .arg(properties.path())
        .arg("--syntaxes")
        .arg(syntaxes.path());
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("broken: excluded"))
        .stdout(predicate::str::contains(
            "dangling: Unknown data type 'undefined-type' in expression '<undefined-type>'",
        ));

    Ok(())
}
