use assert_fs::{prelude::*, TempDir};
use similar_asserts::assert_eq;

mod common;

use common::{summary_line, Result, TestWorkspace};

#[test]
fn builds_every_package_by_default() -> Result<()> {
    let workspace = TestWorkspace::new()?;

    let stdout = workspace.run(["build", "--no-status"]);

    assert!(stdout.contains("Packages to be built: 2\n- bar\n- foo\n"));
    assert!(stdout.contains(&summary_line(
        "Sourcespace:",
        workspace.path().join("src").display()
    )));
    assert!(workspace.path().join("build").is_dir());
    assert!(workspace.path().join("devel").is_dir());
    assert!(!workspace.path().join("install").exists());

    Ok(())
}

#[test]
fn handles_whitespace_in_paths() -> Result<()> {
    let workspace = TestWorkspace::empty()?;
    workspace.add_package("source packages/foo", "foo")?;
    let source = workspace.path().join("source packages");

    let output = workspace
        .command()
        .args(["build", "--no-status", "--source"])
        .arg(&source)
        .args(["--space-suffix", "_with a space"])
        .ok()?;

    let stdout = String::from_utf8(output.stdout)?;

    assert!(stdout.contains("- foo\n"));
    assert!(workspace.path().join("build_with a space").is_dir());
    assert!(workspace.path().join("devel_with a space").is_dir());

    Ok(())
}

#[test]
fn dry_run_leaves_the_spaces_alone() -> Result<()> {
    let workspace = TestWorkspace::new()?;

    let stdout = workspace.run(["build", "--dry-run"]);

    assert!(stdout.contains("Packages to be built: 2"));
    assert!(!workspace.path().join("build").exists());
    assert!(!workspace.path().join("devel").exists());

    Ok(())
}

#[test]
fn builds_only_the_named_packages() -> Result<()> {
    let workspace = TestWorkspace::new()?;

    let stdout = workspace.run(["build", "--dry-run", "foo"]);

    assert!(stdout.contains("Packages to be built: 1\n- foo\n"));

    Ok(())
}

#[test]
fn unknown_packages_are_an_error() -> Result<()> {
    let workspace = TestWorkspace::new()?;

    let (_, stderr) = workspace.run_failure(["build", "nope"]);

    assert!(stderr.contains("Given package 'nope' is not in the workspace"));

    Ok(())
}

#[test]
fn this_builds_the_package_containing_the_current_directory() -> Result<()> {
    let workspace = TestWorkspace::new()?;
    workspace.root.child("src/stack/foo/include").create_dir_all()?;

    let output = workspace
        .command()
        .args(["build", "--dry-run", "--this", "--workspace"])
        .arg(workspace.path())
        .current_dir(workspace.path().join("src/stack/foo/include"))
        .ok()?;

    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("Packages to be built: 1\n- foo\n"));

    Ok(())
}

#[cfg(unix)]
#[test]
fn this_works_through_a_symlinked_workspace() -> Result<()> {
    let workspace = TestWorkspace::new()?;
    let links = TempDir::new()?;
    let link = links.path().join("ws");
    std::os::unix::fs::symlink(workspace.path(), &link)?;

    let output = workspace
        .command()
        .args(["build", "--dry-run", "--this", "--workspace"])
        .arg(&link)
        .current_dir(workspace.path().join("src/stack/foo"))
        .ok()?;

    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("Packages to be built: 1\n- foo\n"));

    Ok(())
}

#[test]
fn this_outside_a_package_is_an_error() -> Result<()> {
    let workspace = TestWorkspace::new()?;

    let (_, stderr) = workspace.run_failure(["build", "--this"]);

    assert!(stderr.contains("isn't inside a package"));

    Ok(())
}

#[test]
fn verbose_lists_package_paths() -> Result<()> {
    let workspace = TestWorkspace::new()?;

    let stdout = workspace.run(["build", "--dry-run", "--verbose", "foo"]);

    let foo_path = workspace.path().join("src/stack/foo");
    assert!(stdout.contains(&format!("- foo ({})\n", foo_path.display())));

    Ok(())
}

#[test]
fn installs_are_staged_under_destdir() -> Result<()> {
    let workspace = TestWorkspace::new()?;
    let stage = workspace.path().join("stage");

    let output = workspace
        .command()
        .args(["build", "--install"])
        .env("DESTDIR", &stage)
        .ok()?;

    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains(&summary_line("DESTDIR:", stage.display())));
    assert!(stdout.contains(&summary_line("Install Packages:", true)));

    let install_space = workspace.path().join("install");
    let staged = stage.join(install_space.strip_prefix("/")?);
    assert!(staged.is_dir(), "{} should exist", staged.display());
    assert!(!workspace.path().join("install").exists());

    Ok(())
}

#[test]
fn broken_manifests_are_reported() -> Result<()> {
    let workspace = TestWorkspace::new()?;
    workspace
        .root
        .child("src/broken/package.xml")
        .write_str("<package><name>broken</package>")?;

    let (stdout, stderr) = workspace.run_failure(["build"]);

    assert_eq!(stdout, "");
    assert!(stderr.contains("Encountered some errors when reading package manifests"));

    Ok(())
}
