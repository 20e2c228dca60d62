use super::{opts::ContextOpts, toolchain_args::ToolchainArgs};

#[derive(clap::Parser, Debug)]
pub struct ConfigOpts {
    #[clap(flatten)]
    pub context: ContextOpts,
}

pub fn run(opts: ConfigOpts, toolchain_args: ToolchainArgs) -> miette::Result<()> {
    let mut context = opts.context.into_context(toolchain_args)?;
    context.lock();

    println!("{}", context.summary());

    Ok(())
}
