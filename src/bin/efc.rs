//! # efc
//!
//! The command-line front end for the translator. This binary is deliberately thin: argument
//! parsing, logger setup, and reporting are all it does — the actual translation lives in
//! `effectify::driver::translate_dir`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use effectify::config::Config;
use effectify::driver::translate_dir;
use effectify::target::render_file;
use log::error;

/// Struct containing the CLI configuration for efc.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// The directory containing the package's `package.json`.
    #[arg(index = 1)]
    pub dir: PathBuf,

    /// Whether to attach a comment recording each declaration's originating source position.
    #[arg(long)]
    pub add_source_comments: bool,

    /// Spaces per indentation level in the rendered output.
    #[arg(long, default_value_t = 2)]
    pub indent_width: usize,

    /// Specify the log level of the translator.
    #[arg(value_enum, short, long, default_value_t = LogLevel::default())]
    pub verbosity: LogLevel,
}

/// Enum for specifying the log level of efc.
#[derive(ValueEnum, Clone, Default, Debug)]
pub enum LogLevel {
    #[default]
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<&LogLevel> for log::Level {
    fn from(value: &LogLevel) -> Self {
        match value {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    simple_logger::init_with_level((&cli.verbosity).into()).unwrap();

    let config = Config {
        add_source_comments: cli.add_source_comments,
        indent_width: cli.indent_width,
    };

    match translate_dir(&cli.dir, config) {
        Ok(file) => {
            print!("{}", render_file(&file, &config));
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
