use camino::Utf8PathBuf;

use crate::context::{Context, ContextError};

use super::toolchain_args::ToolchainArgs;

/// Options describing the workspace context, shared by the verbs that need one.
#[derive(clap::Args, Debug)]
pub struct ContextOpts {
    /// The path to the catkin workspace.
    ///
    /// Defaults to the current directory.
    #[clap(long, short = 'w')]
    pub workspace: Option<Utf8PathBuf>,

    /// The path to the source space. Defaults to <workspace>/src
    #[clap(long = "source", visible_alias = "source-space")]
    pub source_space: Option<Utf8PathBuf>,

    /// The path to the build space. Defaults to <workspace>/build
    #[clap(long = "build", visible_alias = "build-space")]
    pub build_space: Option<Utf8PathBuf>,

    /// The path to the devel space. Defaults to <workspace>/devel
    #[clap(long = "devel", visible_alias = "devel-space")]
    pub devel_space: Option<Utf8PathBuf>,

    /// The path to the install space. Defaults to <workspace>/install
    #[clap(long = "install-space")]
    pub install_space: Option<Utf8PathBuf>,

    /// A suffix for the build, devel and install spaces which aren't set explicitly.
    #[clap(long)]
    pub space_suffix: Option<String>,

    /// Build each package into its own develspace.
    #[clap(long)]
    pub isolate_devel: bool,

    /// Install packages into the installspace once they're built.
    #[clap(long)]
    pub install: bool,

    /// Install each package into its own directory in the installspace.
    #[clap(long)]
    pub isolate_install: bool,

    /// A staging directory installs are redirected into.
    #[clap(long, env = "DESTDIR")]
    pub destdir: Option<Utf8PathBuf>,
}

impl ContextOpts {
    pub fn into_context(self, toolchain_args: ToolchainArgs) -> Result<Context, ContextError> {
        Context::builder()
            .workspace(self.workspace)
            .source_space(self.source_space)
            .build_space(self.build_space)
            .devel_space(self.devel_space)
            .install_space(self.install_space)
            .space_suffix(self.space_suffix)
            .destdir(self.destdir)
            .isolate_devel(self.isolate_devel)
            .install(self.install)
            .isolate_install(self.isolate_install)
            .cmake_args(toolchain_args.cmake_args)
            .make_args(toolchain_args.make_args)
            .catkin_make_args(toolchain_args.catkin_make_args)
            .build()
    }
}
