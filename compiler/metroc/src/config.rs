//! Command-line configuration.

use std::path::PathBuf;

use metro_diagnostic::emitter::ColorMode;
use metro_ir::{TargetLanguage, UnknownTarget};
use metro_parse::CompileOptions;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Command {
    /// Compile definition files and report diagnostics.
    Check,
    /// Dump the token stream of one file.
    Lex,
    /// Dump the registry built from one file.
    Parse,
    /// Describe an error code.
    Explain,
}

impl Command {
    fn from_name(name: &str) -> Option<Command> {
        match name {
            "check" => Some(Command::Check),
            "lex" => Some(Command::Lex),
            "parse" => Some(Command::Parse),
            "explain" => Some(Command::Explain),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Command::Check => "check",
            Command::Lex => "lex",
            Command::Parse => "parse",
            Command::Explain => "explain",
        }
    }
}

/// One invocation of the driver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub command: Command,
    /// Definition files, or the error code for `explain`.
    pub inputs: Vec<String>,
    pub target: TargetLanguage,
    /// Catalog to seed every registry with before parsing.
    pub seed: Option<PathBuf>,
    /// Where `check` writes the catalog of a successful compilation.
    pub emit_catalog: Option<PathBuf>,
    pub color: ColorMode,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("no command given")]
    MissingCommand,

    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    #[error("unknown option `{0}`")]
    UnknownOption(String),

    #[error("option `{0}` needs a value")]
    MissingValue(String),

    #[error(transparent)]
    Target(#[from] UnknownTarget),

    #[error("unknown color mode `{0}` (expected `auto`, `always` or `never`)")]
    UnknownColor(String),

    #[error("`{command}` expects {expected}")]
    WrongInputCount {
        command: &'static str,
        expected: &'static str,
    },

    #[error("`--emit-catalog` needs exactly one input file")]
    CatalogNeedsOneInput,
}

impl Config {
    /// Build a configuration from the arguments after the program name.
    pub fn from_args<I, S>(args: I) -> Result<Config, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);
        let name = args.next().ok_or(ConfigError::MissingCommand)?;
        let command = Command::from_name(&name).ok_or(ConfigError::UnknownCommand(name))?;

        let mut config = Config {
            command,
            inputs: Vec::new(),
            target: TargetLanguage::default(),
            seed: None,
            emit_catalog: None,
            color: ColorMode::Auto,
        };

        for arg in args {
            if let Some(value) = option_value(&arg, "--target=")? {
                config.target = value.parse()?;
            } else if let Some(value) = option_value(&arg, "--seed=")? {
                config.seed = Some(PathBuf::from(value));
            } else if let Some(value) = option_value(&arg, "--emit-catalog=")? {
                config.emit_catalog = Some(PathBuf::from(value));
            } else if let Some(value) = option_value(&arg, "--color=")? {
                config.color = match value {
                    "auto" => ColorMode::Auto,
                    "always" => ColorMode::Always,
                    "never" => ColorMode::Never,
                    other => return Err(ConfigError::UnknownColor(other.to_owned())),
                };
            } else if arg.starts_with('-') {
                return Err(ConfigError::UnknownOption(arg));
            } else {
                config.inputs.push(arg);
            }
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let expected = match self.command {
            Command::Check if self.inputs.is_empty() => Some("at least one file"),
            Command::Lex | Command::Parse if self.inputs.len() != 1 => Some("exactly one file"),
            Command::Explain if self.inputs.len() != 1 => Some("exactly one error code"),
            _ => None,
        };
        if let Some(expected) = expected {
            return Err(ConfigError::WrongInputCount {
                command: self.command.name(),
                expected,
            });
        }
        if self.emit_catalog.is_some() && self.inputs.len() != 1 {
            return Err(ConfigError::CatalogNeedsOneInput);
        }
        Ok(())
    }

    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions::new(self.target)
    }
}

/// Value of `--name=value`; an error when the value is empty.
fn option_value<'a>(arg: &'a str, prefix: &str) -> Result<Option<&'a str>, ConfigError> {
    match arg.strip_prefix(prefix) {
        Some("") => Err(ConfigError::MissingValue(prefix.trim_end_matches('=').to_owned())),
        other => Ok(other),
    }
}
