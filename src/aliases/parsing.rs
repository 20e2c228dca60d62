use camino::{Utf8Path, Utf8PathBuf};

#[derive(knuffel::Decode, Debug, Default)]
pub struct AliasesFile {
    #[knuffel(children(name = "alias"))]
    pub aliases: Vec<AliasDefinition>,
}

#[derive(knuffel::Decode, Debug)]
pub struct AliasDefinition {
    #[knuffel(argument)]
    pub name: String,

    #[knuffel(argument)]
    pub expansion: String,
}

#[derive(Debug, thiserror::Error)]
#[error("Error parsing {1}")]
pub struct ParsingError(knuffel::Error, Utf8PathBuf);

impl miette::Diagnostic for ParsingError {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        self.0.code()
    }

    fn severity(&self) -> Option<miette::Severity> {
        self.0.severity()
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        self.0.help()
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.0.source_code()
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = miette::LabeledSpan> + '_>> {
        self.0.labels()
    }

    fn related<'a>(&'a self) -> Option<Box<dyn Iterator<Item = &'a dyn miette::Diagnostic> + 'a>> {
        self.0.related()
    }
}

pub fn parse_aliases_file(path: &Utf8Path, contents: &str) -> Result<AliasesFile, ParsingError> {
    knuffel::parse::<AliasesFile>(path.as_str(), contents)
        .map_err(|e| ParsingError(e, path.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_aliases() {
        let file = parse_aliases_file(
            Utf8Path::new("verb_aliases.kdl"),
            r#"
            alias "bv" "build --verbose"
            // Comments are fine
            alias "c" "config"
            "#,
        )
        .unwrap();

        insta::assert_debug_snapshot!(file, @r###"
        AliasesFile {
            aliases: [
                AliasDefinition {
                    name: "bv",
                    expansion: "build --verbose",
                },
                AliasDefinition {
                    name: "c",
                    expansion: "config",
                },
            ],
        }
        "###);
    }

    #[test]
    fn test_empty_file() {
        let file = parse_aliases_file(Utf8Path::new("verb_aliases.kdl"), "").unwrap();

        assert!(file.aliases.is_empty());
    }

    #[test]
    fn test_missing_expansion_is_an_error() {
        let result = parse_aliases_file(Utf8Path::new("verb_aliases.kdl"), r#"alias "bv""#);

        assert!(result.is_err());
    }
}
