use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// A scratch workspace on disk for tests.
pub struct TestFiles {
    // Held so the directory lives as long as the TestFiles
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl TestFiles {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("to be able to create a temp dir");
        let root = Utf8Path::from_path(dir.path())
            .expect("temp dir to be a utf8 path")
            .canonicalize_utf8()
            .expect("to be able to canonicalize the temp dir");

        TestFiles { _dir: dir, root }
    }

    pub fn add_file<Name: ?Sized + AsRef<str>, Contents: AsRef<str>>(
        &mut self,
        name: &Name,
        contents: Contents,
    ) {
        let path = Utf8PathBuf::from(name.as_ref());
        assert!(path.is_relative());

        let path = self.root.join(path);
        std::fs::create_dir_all(path.parent().expect("path to have a parent"))
            .expect("to be able to create any dirs");

        let contents = unindent::unindent(contents.as_ref());

        std::fs::write(path, contents).expect("to be able to write a file")
    }

    pub fn with_file<Name: ?Sized + AsRef<str>, Contents: AsRef<str>>(
        mut self,
        name: &Name,
        contents: Contents,
    ) -> Self {
        self.add_file(name, contents);
        self
    }

    pub fn with_dir<Name: ?Sized + AsRef<str>>(self, name: &Name) -> Self {
        std::fs::create_dir_all(self.root.join(name.as_ref()))
            .expect("to be able to create a dir");
        self
    }

    /// Adds a catkin package with a minimal manifest at `dir`.
    pub fn with_package<Dir: ?Sized + AsRef<str>>(self, dir: &Dir, name: &str) -> Self {
        let dir = dir.as_ref();
        self.with_file(
            &format!("{dir}/package.xml"),
            format!(
                r#"
                <?xml version="1.0"?>
                <package format="2">
                  <name>{name}</name>
                  <version>0.0.0</version>
                  <description>The {name} package</description>
                  <maintainer email="someone@example.com">someone</maintainer>
                  <license>BSD</license>
                  <buildtool_depend>catkin</buildtool_depend>
                </package>
                "#
            ),
        )
        .with_file(
            &format!("{dir}/CMakeLists.txt"),
            format!("cmake_minimum_required(VERSION 2.8.3)\nproject({name})\n"),
        )
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}
