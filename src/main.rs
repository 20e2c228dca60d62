mod aliases;
mod cli;
mod context;
mod diagnostics;
mod packages;
mod terminal;

#[cfg(test)]
mod test_files;

fn main() -> miette::Result<()> {
    cli::run()
}
