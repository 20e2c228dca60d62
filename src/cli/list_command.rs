use camino::Utf8PathBuf;
use miette::IntoDiagnostic;
use tabled::{Table, Tabled};

use crate::packages::{find_packages, Package};

use super::{opts::ContextOpts, toolchain_args::ToolchainArgs};

#[derive(clap::Parser, Debug)]
pub struct ListOpts {
    /// The format to output.
    ///
    /// Can be one of auto, plain, table, json, ndjson.
    ///
    /// Defaults to showing a table if running interactively, plain otherwise.
    #[clap(long, default_value_t = Format::Auto)]
    pub format: Format,

    #[clap(flatten)]
    pub context: ContextOpts,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Auto,
    Plain,
    Table,
    Json,
    NdJson,
}

pub fn run(opts: ListOpts) -> miette::Result<()> {
    let context = opts.context.into_context(ToolchainArgs::default())?;
    let source_space = context.source_space();

    let outputs = find_packages(source_space)?
        .into_iter()
        .map(|package| Output::new(package, source_space));

    match opts.format.actual_format() {
        ActualFormat::Plain => {
            for package in outputs {
                println!("{}", package.name)
            }
        }
        ActualFormat::Table => {
            println!("{}", Table::new(outputs));
        }
        ActualFormat::Json => {
            let outputs = outputs.collect::<Vec<_>>();
            println!("{}", serde_json::to_string(&outputs).into_diagnostic()?)
        }
        ActualFormat::NdJson => {
            for output in outputs {
                println!("{}", serde_json::to_string(&output).into_diagnostic()?)
            }
        }
    }

    Ok(())
}

#[derive(serde::Serialize, Tabled, Debug, PartialEq)]
pub struct Output {
    name: String,
    path: Utf8PathBuf,
}

impl Output {
    fn new(package: Package, source_space: &camino::Utf8Path) -> Self {
        let path = match package.path.strip_prefix(source_space) {
            Ok(relative) if relative.as_str().is_empty() => Utf8PathBuf::from("."),
            Ok(relative) => relative.to_owned(),
            Err(_) => package.path.clone(),
        };

        Output {
            name: package.name,
            path,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum ActualFormat {
    Plain,
    Table,
    Json,
    NdJson,
}

impl Format {
    pub fn actual_format(self) -> ActualFormat {
        match self {
            Format::Auto if atty::is(atty::Stream::Stdout) => ActualFormat::Table,
            Format::Auto => ActualFormat::Plain,
            Format::Plain => ActualFormat::Plain,
            Format::Table => ActualFormat::Table,
            Format::Json => ActualFormat::Json,
            Format::NdJson => ActualFormat::NdJson,
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Auto => write!(f, "auto"),
            Format::Plain => write!(f, "plain"),
            Format::Table => write!(f, "table"),
            Format::Json => write!(f, "json"),
            Format::NdJson => write!(f, "ndjson"),
        }
    }
}

impl std::str::FromStr for Format {
    type Err = miette::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "auto" => Format::Auto,
            "plain" => Format::Plain,
            "table" => Format::Table,
            "json" => Format::Json,
            "ndjson" => Format::NdJson,
            _ => miette::bail!(
                "Unknown format: {s}.  Expected one of auto, plain, table, json, ndjson"
            ),
        })
    }
}
