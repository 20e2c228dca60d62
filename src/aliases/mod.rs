//! Verb aliases, e.g. `catkin b` for `catkin build`.
//!
//! A handful of aliases are built in.  Users can add to or override them in a
//! `verb_aliases.kdl` file in their config directory:
//!
//! ```kdl
//! alias "bv" "build --verbose"
//! ```

use std::collections::BTreeMap;

use camino::{Utf8Path, Utf8PathBuf};

use crate::terminal::sanitize;

mod parsing;


pub const ALIASES_FILE: &str = "verb_aliases.kdl";

const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("b", "build"),
    ("bt", "b --this"),
    ("install", "config --install"),
    ("ls", "list"),
    ("run_tests", "build --verbose --catkin-make-args run_tests --"),
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Aliases(BTreeMap<String, String>);

/// The result of expanding aliases in a command line.
#[derive(Debug, PartialEq, Eq)]
pub struct Expansion {
    pub args: Vec<String>,
    /// Markup messages describing what was expanded.
    pub messages: Vec<String>,
}

#[derive(thiserror::Error, miette::Diagnostic, Debug)]
#[error("Couldn't read {0}: {1}")]
#[diagnostic(help("check the permissions of your catkin config directory"))]
struct UnreadableAliasesFile(Utf8PathBuf, std::io::Error);

impl Default for Aliases {
    fn default() -> Self {
        Aliases(
            BUILTIN_ALIASES
                .iter()
                .map(|(name, expansion)| (name.to_string(), expansion.to_string()))
                .collect(),
        )
    }
}

impl Aliases {
    /// The built in aliases, plus any from `verb_aliases.kdl` in `config_dir`.
    #[tracing::instrument]
    pub fn load(config_dir: Option<&Utf8Path>) -> Result<Aliases, miette::Report> {
        let mut aliases = Aliases::default();

        let Some(path) = config_dir.map(|dir| dir.join(ALIASES_FILE)) else {
            return Ok(aliases);
        };
        if !path.exists() {
            tracing::debug!(%path, "No aliases file");
            return Ok(aliases);
        }

        let contents = std::fs::read_to_string(&path)
            .map_err(|e| UnreadableAliasesFile(path.clone(), e))?;
        for definition in parsing::parse_aliases_file(&path, &contents)?.aliases {
            aliases.insert(definition.name, definition.expansion);
        }

        Ok(aliases)
    }

    pub fn insert(&mut self, name: impl Into<String>, expansion: impl Into<String>) {
        self.0.insert(name.into(), expansion.into());
    }

    /// Every alias & its expansion, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, expansion)| (name.as_str(), expansion.as_str()))
    }

    /// Expands any aliases used as the verb in `args`.
    ///
    /// Expansions can themselves start with an alias, but each alias is only
    /// expanded once so that aliases referring to each other terminate.
    #[tracing::instrument(skip(self))]
    pub fn expand(&self, command: &str, mut args: Vec<String>) -> Expansion {
        let mut remaining = self.0.clone();
        let mut used = Vec::new();
        let mut messages = Vec::new();

        while let Some(index) = args.iter().position(|arg| !arg.starts_with('-')) {
            let verb = &args[index];
            if used.contains(verb) {
                messages.push(format!(
                    "@!@{{gf}}==>@| Expanding alias '@!@{{yf}}{}@|' was previously expanded, \
                     ignoring this time to prevent infinite recursion.",
                    sanitize(verb)
                ));
            }
            let Some(expansion) = remaining.remove(verb) else {
                break;
            };

            let before = std::iter::once(command)
                .chain(args[..index].iter().map(String::as_str))
                .collect::<Vec<_>>()
                .join(" ");
            let after = args[index + 1..]
                .iter()
                .map(|arg| format!(" {arg}"))
                .collect::<String>();

            messages.push(format!(
                "@!@{{gf}}==>@| Expanding alias '@!@{{yf}}{alias}@|' \
                 from '@{{yf}}{before} @!{alias}@{{boldoff}}{after}@|' \
                 to '@{{yf}}{before} @!{expansion}@{{boldoff}}{after}@|'",
                alias = sanitize(verb),
                before = sanitize(&before),
                after = sanitize(&after),
                expansion = sanitize(&expansion),
            ));
            tracing::debug!(%verb, %expansion, "Expanded alias");

            used.push(verb.clone());

            let mut expanded = args[..index].to_vec();
            expanded.extend(expansion.split_whitespace().map(str::to_owned));
            expanded.extend_from_slice(&args[index + 1..]);
            args = expanded;
        }

        Expansion { args, messages }
    }
}

/// Where user configuration lives: `$CATKIN_CONFIG_DIR`, or `catkin` in the
/// platform's config directory.
pub fn config_dir() -> Option<Utf8PathBuf> {
    if let Some(dir) = std::env::var_os("CATKIN_CONFIG_DIR") {
        return Utf8PathBuf::from_path_buf(dir.into()).ok();
    }

    dirs::config_dir()
        .and_then(|dir| Utf8PathBuf::from_path_buf(dir).ok())
        .map(|dir| dir.join("catkin"))
}
