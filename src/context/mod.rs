//! The settings for a catkin workspace that affect build results.
//!
//! A [`Context`] validates some settings against the filesystem as they're
//! assigned but never modifies the filesystem: it'll refuse a source space
//! that doesn't exist, but it won't create a build space that doesn't.
//!
//! Once a context has been locked none of its members can be changed.

use camino::{Utf8Path, Utf8PathBuf};

use crate::packages::Package;

mod paths;
mod summary;


pub use paths::current_dir;

#[derive(thiserror::Error, miette::Diagnostic, Debug)]
pub enum ContextError {
    #[error("Workspace path '{0}' does not exist.")]
    #[diagnostic(help(
        "pass an existing directory with --workspace, or run catkin from inside the workspace"
    ))]
    WorkspaceNotFound(Utf8PathBuf),
    #[error("Could not find source space: {0}")]
    #[diagnostic(help("the source space defaults to <workspace>/src, use --source to change it"))]
    SourceSpaceNotFound(Utf8PathBuf),
    #[error("Setting of context members is not allowed while locked.")]
    Locked,
    #[error("Couldn't determine the current directory: {0}")]
    CurrentDir(std::io::Error),
    #[error("Encountered a path that wasn't UTF-8: {}", .0.display())]
    NonUtf8Path(std::path::PathBuf),
}

#[derive(Debug, Clone)]
pub struct Context {
    /// The directory relative paths are resolved against.
    base_dir: Utf8PathBuf,
    workspace: Utf8PathBuf,
    source_space: Utf8PathBuf,
    build_space: Utf8PathBuf,
    devel_space: Utf8PathBuf,
    install_space: Utf8PathBuf,
    destdir: Option<Utf8PathBuf>,
    isolate_devel: bool,
    install: bool,
    isolate_install: bool,
    cmake_args: Vec<String>,
    make_args: Vec<String>,
    catkin_make_args: Vec<String>,
    packages: Vec<Package>,
    locked: bool,
}

#[derive(Debug, Default)]
pub struct ContextBuilder {
    base_dir: Option<Utf8PathBuf>,
    workspace: Option<Utf8PathBuf>,
    source_space: Option<Utf8PathBuf>,
    build_space: Option<Utf8PathBuf>,
    devel_space: Option<Utf8PathBuf>,
    install_space: Option<Utf8PathBuf>,
    space_suffix: Option<String>,
    destdir: Option<Utf8PathBuf>,
    isolate_devel: bool,
    install: bool,
    isolate_install: bool,
    cmake_args: Vec<String>,
    make_args: Vec<String>,
    catkin_make_args: Vec<String>,
}

// The full set of accessors is the context's API, the verbs only need some of them.
#[cfg_attr(not(test), allow(dead_code))]
impl Context {
    pub fn builder() -> ContextBuilder {
        ContextBuilder::default()
    }

    pub fn lock(&mut self) {
        tracing::debug!(workspace = %self.workspace, "Locking context");
        self.locked = true;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    fn ensure_unlocked(&self) -> Result<(), ContextError> {
        match self.locked {
            true => Err(ContextError::Locked),
            false => Ok(()),
        }
    }

    pub fn workspace(&self) -> &Utf8Path {
        &self.workspace
    }

    pub fn set_workspace(&mut self, workspace: impl Into<Utf8PathBuf>) -> Result<(), ContextError> {
        self.ensure_unlocked()?;
        let workspace = workspace.into();
        if !self.base_dir.join(&workspace).exists() {
            return Err(ContextError::WorkspaceNotFound(workspace));
        }
        self.workspace = paths::absolute(&self.base_dir, workspace);
        Ok(())
    }

    pub fn source_space(&self) -> &Utf8Path {
        &self.source_space
    }

    pub fn set_source_space(
        &mut self,
        source_space: impl Into<Utf8PathBuf>,
    ) -> Result<(), ContextError> {
        self.ensure_unlocked()?;
        let source_space = source_space.into();
        if !self.base_dir.join(&source_space).exists() {
            return Err(ContextError::SourceSpaceNotFound(source_space));
        }
        self.source_space = paths::absolute(&self.base_dir, source_space);
        Ok(())
    }

    pub fn build_space(&self) -> &Utf8Path {
        &self.build_space
    }

    // TODO: refuse a build space that was last used with a different context
    pub fn set_build_space(
        &mut self,
        build_space: impl Into<Utf8PathBuf>,
    ) -> Result<(), ContextError> {
        self.ensure_unlocked()?;
        self.build_space = paths::absolute(&self.base_dir, build_space);
        Ok(())
    }

    pub fn devel_space(&self) -> &Utf8Path {
        &self.devel_space
    }

    pub fn set_devel_space(
        &mut self,
        devel_space: impl Into<Utf8PathBuf>,
    ) -> Result<(), ContextError> {
        self.ensure_unlocked()?;
        self.devel_space = paths::absolute(&self.base_dir, devel_space);
        Ok(())
    }

    pub fn install_space(&self) -> &Utf8Path {
        &self.install_space
    }

    pub fn set_install_space(
        &mut self,
        install_space: impl Into<Utf8PathBuf>,
    ) -> Result<(), ContextError> {
        self.ensure_unlocked()?;
        self.install_space = paths::absolute(&self.base_dir, install_space);
        Ok(())
    }

    /// The staging directory installs are redirected into, if any.
    pub fn destdir(&self) -> Option<&Utf8Path> {
        self.destdir.as_deref()
    }

    pub fn set_destdir(&mut self, destdir: Option<Utf8PathBuf>) -> Result<(), ContextError> {
        self.ensure_unlocked()?;
        self.destdir = destdir;
        Ok(())
    }

    /// Whether each package gets its own develspace.
    pub fn isolate_devel(&self) -> bool {
        self.isolate_devel
    }

    pub fn set_isolate_devel(&mut self, isolate_devel: bool) -> Result<(), ContextError> {
        self.ensure_unlocked()?;
        self.isolate_devel = isolate_devel;
        Ok(())
    }

    /// Whether packages are installed into the installspace after building.
    pub fn install(&self) -> bool {
        self.install
    }

    pub fn set_install(&mut self, install: bool) -> Result<(), ContextError> {
        self.ensure_unlocked()?;
        self.install = install;
        Ok(())
    }

    /// Whether each package gets its own installspace.
    pub fn isolate_install(&self) -> bool {
        self.isolate_install
    }

    pub fn set_isolate_install(&mut self, isolate_install: bool) -> Result<(), ContextError> {
        self.ensure_unlocked()?;
        self.isolate_install = isolate_install;
        Ok(())
    }

    pub fn cmake_args(&self) -> &[String] {
        &self.cmake_args
    }

    pub fn set_cmake_args(&mut self, cmake_args: Vec<String>) -> Result<(), ContextError> {
        self.ensure_unlocked()?;
        self.cmake_args = cmake_args;
        Ok(())
    }

    pub fn make_args(&self) -> &[String] {
        &self.make_args
    }

    pub fn set_make_args(&mut self, make_args: Vec<String>) -> Result<(), ContextError> {
        self.ensure_unlocked()?;
        self.make_args = make_args;
        Ok(())
    }

    /// Extra make arguments that only apply to catkin packages.
    pub fn catkin_make_args(&self) -> &[String] {
        &self.catkin_make_args
    }

    pub fn set_catkin_make_args(
        &mut self,
        catkin_make_args: Vec<String>,
    ) -> Result<(), ContextError> {
        self.ensure_unlocked()?;
        self.catkin_make_args = catkin_make_args;
        Ok(())
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn set_packages(&mut self, packages: Vec<Package>) -> Result<(), ContextError> {
        self.ensure_unlocked()?;
        self.packages = packages;
        Ok(())
    }
}

#[cfg_attr(not(test), allow(dead_code))]
impl ContextBuilder {
    /// The directory relative paths are resolved against.
    ///
    /// Defaults to the current directory of the process.
    pub fn base_dir(mut self, base_dir: impl Into<Utf8PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    /// The root of the workspace, defaults to `.`
    pub fn workspace(mut self, workspace: impl Into<Option<Utf8PathBuf>>) -> Self {
        self.workspace = workspace.into();
        self
    }

    /// Defaults to `<workspace>/src`
    pub fn source_space(mut self, source_space: impl Into<Option<Utf8PathBuf>>) -> Self {
        self.source_space = source_space.into();
        self
    }

    /// Defaults to `<workspace>/build<space_suffix>`
    pub fn build_space(mut self, build_space: impl Into<Option<Utf8PathBuf>>) -> Self {
        self.build_space = build_space.into();
        self
    }

    /// Defaults to `<workspace>/devel<space_suffix>`
    pub fn devel_space(mut self, devel_space: impl Into<Option<Utf8PathBuf>>) -> Self {
        self.devel_space = devel_space.into();
        self
    }

    /// Defaults to `<workspace>/install<space_suffix>`
    pub fn install_space(mut self, install_space: impl Into<Option<Utf8PathBuf>>) -> Self {
        self.install_space = install_space.into();
        self
    }

    /// A suffix for any build, devel or install space that isn't set explicitly.
    pub fn space_suffix(mut self, space_suffix: impl Into<Option<String>>) -> Self {
        self.space_suffix = space_suffix.into();
        self
    }

    pub fn destdir(mut self, destdir: impl Into<Option<Utf8PathBuf>>) -> Self {
        self.destdir = destdir.into();
        self
    }

    pub fn isolate_devel(mut self, isolate_devel: bool) -> Self {
        self.isolate_devel = isolate_devel;
        self
    }

    pub fn install(mut self, install: bool) -> Self {
        self.install = install;
        self
    }

    pub fn isolate_install(mut self, isolate_install: bool) -> Self {
        self.isolate_install = isolate_install;
        self
    }

    pub fn cmake_args(mut self, cmake_args: Vec<String>) -> Self {
        self.cmake_args = cmake_args;
        self
    }

    pub fn make_args(mut self, make_args: Vec<String>) -> Self {
        self.make_args = make_args;
        self
    }

    pub fn catkin_make_args(mut self, catkin_make_args: Vec<String>) -> Self {
        self.catkin_make_args = catkin_make_args;
        self
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub fn build(self) -> Result<Context, ContextError> {
        let base_dir = match self.base_dir {
            Some(base_dir) => base_dir,
            None => current_dir()?,
        };
        let suffix = self.space_suffix.unwrap_or_default();

        let mut context = Context {
            base_dir,
            workspace: Utf8PathBuf::new(),
            source_space: Utf8PathBuf::new(),
            build_space: Utf8PathBuf::new(),
            devel_space: Utf8PathBuf::new(),
            install_space: Utf8PathBuf::new(),
            destdir: self.destdir,
            isolate_devel: self.isolate_devel,
            install: self.install,
            isolate_install: self.isolate_install,
            cmake_args: self.cmake_args,
            make_args: self.make_args,
            catkin_make_args: self.catkin_make_args,
            packages: Vec::new(),
            locked: false,
        };

        // The default spaces hang off the workspace, so it has to go first.
        context.set_workspace(self.workspace.unwrap_or_else(|| Utf8PathBuf::from(".")))?;
        let workspace = context.workspace.clone();

        context.set_source_space(self.source_space.unwrap_or_else(|| workspace.join("src")))?;
        context.set_build_space(
            self.build_space
                .unwrap_or_else(|| workspace.join(format!("build{suffix}"))),
        )?;
        context.set_devel_space(
            self.devel_space
                .unwrap_or_else(|| workspace.join(format!("devel{suffix}"))),
        )?;
        context.set_install_space(
            self.install_space
                .unwrap_or_else(|| workspace.join(format!("install{suffix}"))),
        )?;

        Ok(context)
    }
}
