use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::CliTest;

#[test]
fn test_clean_removes_generated_dirs() -> Result<()> {
    let test = CliTest::with_module()?;
    assert!(test.run(&["generate"])?.status.success());
    assert!(test.run(&["generate", "-o", "pkg/gen"])?.status.success());

    assert_cmd_snapshot!(test.clean_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
      removed ./annotation
      removed ./pkg/gen
    ✓ Removed 2 directories

    ----- stderr -----
    ");

    assert!(!test.exists("annotation"));
    assert!(!test.exists("pkg/gen"));
    assert!(test.exists("pkg"));
    assert!(test.exists("example/example.go"));
    Ok(())
}

#[test]
fn test_clean_leaves_unmarked_dirs() -> Result<()> {
    let test = CliTest::with_module()?;
    test.write_file("annotation/mine.go", "package annotation\n")?;

    assert_cmd_snapshot!(test.clean_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ No generated directories found.

    ----- stderr -----
    ");
    assert!(test.exists("annotation/mine.go"));
    Ok(())
}
