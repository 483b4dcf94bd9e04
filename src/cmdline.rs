use structopt::StructOpt;
use std::{fmt, path::PathBuf};
use crate::{config::Config, types::TranslateOptions};

/// Required extension of ML source files.
pub const SOURCE_EXTENSION: &str = "ml";

#[derive(Debug, StructOpt)]
#[structopt(name = "runml", about = "Translate an ML program to C, compile it and run it")]
pub struct RunCmd {
    /// ML source file, must end in `.ml`
    pub in_file: PathBuf,
    /// Write the generated C here and stop, without compiling
    #[structopt(long)]
    pub emit: Option<PathBuf>,
    /// JSON file with `toolchain` and `translate` sections
    #[structopt(long)]
    pub config: Option<PathBuf>,
    /// C compiler to use instead of the configured one
    #[structopt(long)]
    pub cc: Option<String>,
    /// Keep the generated source and binary
    #[structopt(long)]
    pub keep: bool,
    /// Print program output as is, without collapsing integral values
    #[structopt(long)]
    pub raw: bool,
    /// Reject lines over 20 words or words over 12 characters
    #[structopt(long)]
    pub legacy_limits: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub struct UsageError(pub String);

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "usage: {}", self.0)
    }
}

impl std::error::Error for UsageError {}

impl RunCmd {
    pub fn validate(&self) -> Result<(), UsageError> {
        match self.in_file.extension() {
            Some(ext) if ext == SOURCE_EXTENSION => Ok(()),
            _ => Err(UsageError(format!(
                "runml <input_file.{}> (got {})", SOURCE_EXTENSION, self.in_file.display()))),
        }
    }

    /// Layer command line overrides on top of a loaded configuration.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(cc) = &self.cc {
            config.toolchain.compiler = cc.clone();
        }
        if self.keep {
            config.toolchain.keep_artifacts = true;
        }
        if self.legacy_limits {
            config.translate = TranslateOptions {
                rewrite_calls: config.translate.rewrite_calls,
                ..TranslateOptions::legacy()
            };
        }
        config
    }
}
