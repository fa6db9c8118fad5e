use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{CliTest, stderr};

const YAML_USER: &str = r#"package store

import "gopkg.in/yaml.v3"

// Load reads a node.
// @in [yaml.Node]
func Load() {}
"#;

#[test]
fn test_config_add_list_remove() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.config_command();
    cmd.args(["add", "gopkg.in/yaml.v3", "yaml", "y3"]);
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Updated ./.ann/ann.yml

    ----- stderr -----
    ");
    assert!(test.exists(".ann/ann.yml"));

    let mut cmd = test.config_command();
    cmd.arg("list");
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    gopkg.in/yaml.v3: yaml, y3

    ----- stderr -----
    ");

    assert!(test.run(&["config", "remove", "gopkg.in/yaml.v3", "y3"])?.status.success());
    let mut cmd = test.config_command();
    cmd.arg("list");
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    gopkg.in/yaml.v3: yaml

    ----- stderr -----
    ");

    assert!(test.run(&["config", "remove", "gopkg.in/yaml.v3"])?.status.success());
    let mut cmd = test.config_command();
    cmd.arg("list");
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    No aliases configured in ./.ann/ann.yml

    ----- stderr -----
    ");
    Ok(())
}

#[test]
fn test_config_remove_unknown_entry() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.config_command();
    cmd.args(["remove", "fmt"]);
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    No matching aliases in ./.ann/ann.yml

    ----- stderr -----
    ");
    assert!(!test.exists(".ann"));
    Ok(())
}

#[test]
fn test_config_add_refuses_malformed_file() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".ann/ann.yml", "replace: [broken")?;

    let output = test.run(&["config", "add", "fmt", "f"])?;
    assert_eq!(output.status.code(), Some(2));
    // The YAML parser's message follows the context and is not pinned.
    assert!(stderr(&output).starts_with("Error: Failed to load config: ./.ann/ann.yml: invalid config: "));
    assert_eq!(test.read_file(".ann/ann.yml")?, "replace: [broken");
    Ok(())
}

#[test]
fn test_configured_alias_qualifies_reference() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("go.mod", crate::GO_MOD)?;
    test.write_file("store/store.go", YAML_USER)?;

    assert!(test.run(&["generate"])?.status.success());
    let content = test.read_file("annotation/annotation.go")?;
    assert!(content.contains("Annotation: \"in [yaml.Node]\","));

    assert!(test.run(&["config", "add", "gopkg.in/yaml.v3", "yaml"])?.status.success());
    assert!(test.run(&["generate"])?.status.success());
    let content = test.read_file("annotation/annotation.go")?;
    assert!(content.contains("Annotation: \"in [gopkg.in/yaml.v3.Node]\","));
    Ok(())
}

#[test]
fn test_config_flag_points_elsewhere() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("go.mod", crate::GO_MOD)?;
    test.write_file("store/store.go", YAML_USER)?;
    test.write_file("conf/aliases.yml", "replace:\n  gopkg.in/yaml.v3:\n    - yaml\n")?;

    let output = test.run(&["generate", "--config", "conf/aliases.yml"])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let content = test.read_file("annotation/annotation.go")?;
    assert!(content.contains("Annotation: \"in [gopkg.in/yaml.v3.Node]\","));
    assert!(!test.exists(".ann"));
    Ok(())
}

#[test]
fn test_malformed_config_is_ignored_by_generate() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("go.mod", crate::GO_MOD)?;
    test.write_file("store/store.go", YAML_USER)?;
    test.write_file(".ann/ann.yml", "replace: [broken")?;

    let output = test.run(&["generate"])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stderr(&output).is_empty());
    Ok(())
}
