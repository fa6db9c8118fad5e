use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr};

#[test]
fn test_generate_writes_registry() -> Result<()> {
    let test = CliTest::with_module()?;

    assert_cmd_snapshot!(test.generate_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Generated 1 entry from 2 files into ./annotation/annotation.go

    ----- stderr -----
    ");

    assert!(test.exists("annotation/.annotation"));
    let content = test.read_file("annotation/annotation.go")?;
    assert!(content.starts_with("// Code generated by ann. DO NOT EDIT.\n"));
    assert!(content.contains("package annotation\n"));
    assert!(content.contains("\t\"fmt\"\n"));
    assert!(content.contains("\t\"github.com/acme/app/example\"\n"));
    assert!(content.contains("\t\"github.com/cro4k/annotation/core\"\n"));
    assert!(content.contains("Ptr: example.Hello,"));
    assert!(content.contains("Relation: []interface{}{new(example.Example), fmt.Println},"));
    assert!(!content.contains("SayHello"));
    Ok(())
}

#[test]
fn test_generate_twice_is_identical() -> Result<()> {
    let test = CliTest::with_module()?;

    assert!(test.run(&["generate"])?.status.success());
    let first = test.read_file("annotation/annotation.go")?;

    // The previous output is tool-owned, so it is neither scanned nor a conflict.
    assert_cmd_snapshot!(test.generate_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Generated 1 entry from 2 files into ./annotation/annotation.go

    ----- stderr -----
    ");
    let second = test.read_file("annotation/annotation.go")?;

    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_generate_refuses_foreign_output_dir() -> Result<()> {
    let test = CliTest::with_module()?;
    test.write_file("annotation/mine.go", "package annotation\n")?;

    assert_cmd_snapshot!(test.generate_command(), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: path './annotation' has been used by another package
    ");
    assert!(!test.exists("annotation/annotation.go"));
    assert!(test.exists("annotation/mine.go"));
    Ok(())
}

#[test]
fn test_generate_without_go_mod_fails() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("example/example.go", crate::EXAMPLE)?;

    insta::with_settings!({filters => vec![(r"\(os error \d+\)", "(os error N)")]}, {
        assert_cmd_snapshot!(test.generate_command(), @r"
        success: false
        exit_code: 2
        ----- stdout -----

        ----- stderr -----
        Error: failed to read './go.mod': No such file or directory (os error N)
        ");
    });
    assert!(!test.exists("annotation"));
    Ok(())
}

#[test]
fn test_generate_custom_output_and_root() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("svc/go.mod", crate::GO_MOD)?;
    test.write_file("svc/example/example.go", crate::EXAMPLE)?;

    let mut cmd = test.generate_command();
    cmd.args(["--root", "svc", "--output", "internal/registry"]);
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Generated 1 entry from 2 files into svc/internal/registry/annotation.go

    ----- stderr -----
    ");

    let content = test.read_file("svc/internal/registry/annotation.go")?;
    assert!(content.contains("package registry\n"));
    assert!(test.exists("svc/internal/registry/.annotation"));
    Ok(())
}

#[test]
fn test_generate_duplicate_path_warns() -> Result<()> {
    let test = CliTest::with_module()?;
    test.write_file(
        "example/hello_again.go",
        "package example\n\n// @again\nfunc Hello() {}\n",
    )?;

    let output = test.run(&["generate"])?;
    assert!(output.status.success());
    // Log lines carry timestamps, so only the message is checked.
    assert!(stderr(&output).contains("duplicate declaration path"));

    // Files are walked by name, so hello_again.go comes last and wins.
    let content = test.read_file("annotation/annotation.go")?;
    assert!(content.contains("Raw: \"again\","));
    assert!(!content.contains("Raw: \"comment Example\","));
    Ok(())
}

#[test]
fn test_generate_ignores_detached_comments() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("go.mod", crate::GO_MOD)?;
    test.write_file(
        "notes/notes.go",
        "package notes\n\n// @tag [Detached]\n\nfunc Foo() {}\n",
    )?;

    assert_cmd_snapshot!(test.generate_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Generated 0 entries from 2 files into ./annotation/annotation.go

    ----- stderr -----
    ");
    assert!(!test.read_file("annotation/annotation.go")?.contains("Foo"));
    Ok(())
}
