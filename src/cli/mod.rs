use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::{
    aliases::{self, Aliases},
    terminal,
};

mod build_command;
mod config_command;
mod list_command;
mod opts;
mod toolchain_args;

const COMMAND_NAME: &str = "catkin";

#[derive(Parser)]
#[clap(name = COMMAND_NAME, about = "catkin command")]
pub struct Cli {
    // These two are acted on by `early_exit` before clap sees the arguments,
    // they're only declared here for `--help`.
    /// Lists the current verb aliases and then quits, all other arguments are ignored
    #[clap(long, short = 'a')]
    #[allow(dead_code)]
    pub list_aliases: bool,

    /// Prints a color test pattern to the screen and then quits, all other arguments are ignored
    #[clap(long)]
    #[allow(dead_code)]
    pub test_colors: bool,

    /// Disables colored output
    #[clap(long, global = true)]
    pub no_color: bool,

    #[clap(subcommand)]
    pub command: Option<Command>,
}

#[derive(clap::Subcommand)]
pub enum Command {
    /// Resolves the workspace context and prepares its spaces for a build
    Build(build_command::BuildOpts),
    /// Prints the workspace context for the given options
    Config(config_command::ConfigOpts),
    /// Lists the packages in the source space
    List(list_command::ListOpts),
}

#[derive(Debug, miette::Diagnostic, thiserror::Error)]
#[error("No verb provided.")]
#[diagnostic(help("call `catkin --help` to see the available verbs"))]
struct MissingVerb;

#[derive(Debug, miette::Diagnostic, thiserror::Error)]
#[error("The {0} verb doesn't take --cmake-args, --make-args or --catkin-make-args")]
struct UnexpectedToolchainArgs(&'static str);

/// Flags that print something and quit, ignoring everything else.
#[derive(Debug, PartialEq, Eq)]
enum EarlyExit {
    TestColors,
    ListAliases,
}

/// Looks for `--test-colors` or `--list-aliases` before the verb.
fn early_exit(args: &[String]) -> Option<EarlyExit> {
    let leading_flags = || args.iter().take_while(|arg| arg.starts_with('-'));

    if leading_flags().any(|arg| arg == "--test-colors") {
        return Some(EarlyExit::TestColors);
    }
    if leading_flags().any(|arg| arg == "--list-aliases" || arg == "-a") {
        return Some(EarlyExit::ListAliases);
    }
    None
}

pub fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let aliases = Aliases::load(aliases::config_dir().as_deref())?;

    let args = std::env::args().skip(1).collect::<Vec<_>>();

    match early_exit(&args) {
        Some(EarlyExit::TestColors) => {
            println!("{}", terminal::test_colors());
            return Ok(());
        }
        Some(EarlyExit::ListAliases) => {
            for (name, expansion) in aliases.iter() {
                println!("{name}: {expansion}");
            }
            return Ok(());
        }
        None => {}
    }

    let expansion = aliases.expand(COMMAND_NAME, args);
    let (args, toolchain_args) = toolchain_args::extract(expansion.args);

    let cli = Cli::parse_from(std::iter::once(COMMAND_NAME.to_owned()).chain(args));

    if cli.no_color {
        terminal::set_colors_enabled(false);
    }

    for message in &expansion.messages {
        println!("{}", terminal::fmt(message));
    }

    let Some(command) = cli.command else {
        println!("{}", Cli::command().render_usage());
        return Err(MissingVerb.into());
    };

    match command {
        Command::Build(command_opts) => build_command::run(command_opts, toolchain_args),
        Command::Config(command_opts) => config_command::run(command_opts, toolchain_args),
        Command::List(_) if !toolchain_args.is_empty() => {
            Err(UnexpectedToolchainArgs("list").into())
        }
        Command::List(command_opts) => list_command::run(command_opts),
    }
}
