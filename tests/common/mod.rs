#![allow(dead_code)]

use std::{ffi, path::PathBuf};

use assert_cmd::Command;
use assert_fs::{prelude::*, TempDir};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

pub struct TestWorkspace {
    pub root: TempDir,
}

impl TestWorkspace {
    /// A workspace with `bar` at `src/bar` and `foo` at `src/stack/foo`.
    pub fn new() -> Result<TestWorkspace> {
        let workspace = TestWorkspace::empty()?;
        workspace.add_package("src/bar", "bar")?;
        workspace.add_package("src/stack/foo", "foo")?;
        Ok(workspace)
    }

    pub fn empty() -> Result<TestWorkspace> {
        let root = TempDir::new()?;

        // Note: Uncomment these if you're debugging
        // let root = root.into_persistent();
        // println!("Not So Temp Dir: {root:?}");

        Ok(TestWorkspace { root })
    }

    pub fn add_package(&self, dir: &str, name: &str) -> Result<()> {
        self.root.child(format!("{dir}/package.xml")).write_str(&format!(
            "<?xml version=\"1.0\"?>\n\
             <package format=\"2\">\n  \
               <name>{name}</name>\n  \
               <version>0.0.0</version>\n  \
               <description>The {name} package</description>\n  \
               <maintainer email=\"someone@example.com\">someone</maintainer>\n  \
               <license>BSD</license>\n\
             </package>\n"
        ))?;
        self.root
            .child(format!("{dir}/CMakeLists.txt"))
            .write_str(&format!("project({name})\n"))?;
        Ok(())
    }

    /// The canonical path to the workspace, matching what catkin reports.
    pub fn path(&self) -> PathBuf {
        self.root.path().canonicalize().unwrap()
    }

    pub fn command(&self) -> Command {
        let mut command = Command::cargo_bin("catkin").unwrap();
        command
            .current_dir(&self.root)
            .env("CATKIN_CONFIG_DIR", self.root.path().join("config"))
            .env("NO_COLOR", "1")
            .env_remove("CLICOLOR_FORCE")
            .env_remove("DESTDIR")
            .env_remove("RUST_LOG");
        command
    }

    pub fn run<I, S>(&self, args: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<ffi::OsStr>,
    {
        let output = self.command().args(args).ok().unwrap();

        assert_eq!(String::from_utf8(output.stderr).unwrap(), "");
        String::from_utf8(output.stdout).unwrap()
    }

    pub fn run_failure<I, S>(&self, args: I) -> (String, String)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<ffi::OsStr>,
    {
        let output = self.command().args(args).output().unwrap();
        assert!(!output.status.success(), "expected the command to fail");

        (
            String::from_utf8(output.stdout).unwrap(),
            String::from_utf8(output.stderr).unwrap(),
        )
    }
}

/// A summary line as rendered without colours.
pub fn summary_line(label: &str, value: impl std::fmt::Display) -> String {
    format!("{label:<29}{value}")
}
