use camino::{Utf8Path, Utf8PathBuf};

use crate::{
    context::{current_dir, Context},
    packages::{find_packages, package_containing, select_packages, Package},
    terminal::{self, sanitize},
};

use super::{opts::ContextOpts, toolchain_args::ToolchainArgs};

#[derive(clap::Parser, Debug)]
pub struct BuildOpts {
    /// The packages to build.
    ///
    /// Defaults to every package in the source space.
    #[clap(value_parser)]
    pub packages: Vec<String>,

    /// Build the package containing the current directory.
    #[clap(long, conflicts_with = "packages")]
    pub this: bool,

    /// Only build the given packages, not their dependencies.
    #[clap(long)]
    pub no_deps: bool,

    /// Suppresses the status line.
    #[clap(long)]
    pub no_status: bool,

    /// Suppresses desktop notifications.
    #[clap(long)]
    pub no_notify: bool,

    /// Prints more about what's going on.
    #[clap(long, short)]
    pub verbose: bool,

    /// Reports what would be built without preparing any spaces.
    #[clap(long)]
    pub dry_run: bool,

    #[clap(flatten)]
    pub context: ContextOpts,
}

#[derive(thiserror::Error, miette::Diagnostic, Debug)]
enum BuildError {
    #[error("Couldn't create the {0} at {1}: {2}")]
    CreateSpace(&'static str, Utf8PathBuf, std::io::Error),
    #[error("The current directory isn't inside a package in the source space")]
    #[diagnostic(help("--this only works from inside a package, otherwise name the packages"))]
    NotInPackage,
    #[error("Couldn't resolve {0}: {1}")]
    Canonicalize(Utf8PathBuf, std::io::Error),
}

#[tracing::instrument(skip_all)]
pub fn run(opts: BuildOpts, toolchain_args: ToolchainArgs) -> miette::Result<()> {
    tracing::debug!(
        no_deps = opts.no_deps,
        no_status = opts.no_status,
        no_notify = opts.no_notify,
        "Starting build"
    );

    let mut context = opts.context.into_context(toolchain_args)?;

    let packages = find_packages(context.source_space())?;
    let packages = match opts.this {
        true => vec![package_for_dir(&packages, &current_dir()?)?],
        false => select_packages(&packages, &opts.packages)?,
    };

    context.set_packages(packages)?;
    context.lock();

    println!("{}", context.summary());
    print_packages(&context, opts.verbose);

    if opts.dry_run {
        return Ok(());
    }

    for (description, space) in spaces_to_prepare(&context) {
        tracing::info!(%space, "Preparing {description}");
        std::fs::create_dir_all(&space)
            .map_err(|e| BuildError::CreateSpace(description, space.clone(), e))?;
    }

    println!(
        "{}",
        terminal::fmt(&format!(
            "@!@{{gf}}==>@| Prepared the spaces for @!{}@| package(s)",
            context.packages().len()
        ))
    );

    Ok(())
}

/// Finds the package containing `dir`, following any symlinks on either side.
fn package_for_dir(packages: &[Package], dir: &Utf8Path) -> Result<Package, BuildError> {
    let dir = canonicalize(dir)?;
    let resolved = packages
        .iter()
        .map(|package| {
            Ok(Package {
                name: package.name.clone(),
                path: canonicalize(&package.path)?,
            })
        })
        .collect::<Result<Vec<_>, BuildError>>()?;

    let found = package_containing(&resolved, &dir).ok_or(BuildError::NotInPackage)?;
    packages
        .iter()
        .find(|package| package.name == found.name)
        .cloned()
        .ok_or(BuildError::NotInPackage)
}

fn canonicalize(path: &Utf8Path) -> Result<Utf8PathBuf, BuildError> {
    path.canonicalize_utf8()
        .map_err(|e| BuildError::Canonicalize(path.to_owned(), e))
}

fn print_packages(context: &Context, verbose: bool) {
    println!(
        "{}",
        terminal::fmt(&format!(
            "@{{cf}}Packages to be built:@| @{{yf}}{}@|",
            context.packages().len()
        ))
    );

    for package in context.packages() {
        let line = match verbose {
            true => format!(
                "- @!{}@| @{{kf}}({})@|",
                sanitize(&package.name),
                sanitize(package.path.as_str())
            ),
            false => format!("- @!{}@|", sanitize(&package.name)),
        };
        println!("{}", terminal::fmt(&line));
    }
}

/// The directories a build writes into, which need to exist before it starts.
fn spaces_to_prepare(context: &Context) -> Vec<(&'static str, Utf8PathBuf)> {
    let mut spaces = vec![
        ("buildspace", context.build_space().to_owned()),
        ("develspace", context.devel_space().to_owned()),
    ];

    if context.install() {
        let install_space = match context.destdir() {
            Some(destdir) => under_destdir(destdir, context.install_space()),
            None => context.install_space().to_owned(),
        };
        spaces.push(("installspace", install_space));
    }

    spaces
}

/// Re-roots an absolute path under DESTDIR, the way `make install DESTDIR=...` does.
fn under_destdir(destdir: &Utf8Path, path: &Utf8Path) -> Utf8PathBuf {
    let relative = path.strip_prefix("/").unwrap_or(path);
    destdir.join(relative)
}
