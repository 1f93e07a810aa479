//! stubgen: turns C++ headers into skeleton definition files.

use clap::{ArgAction, Parser};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::StubConfig;
use crate::driver::{Outcome, origin_name, process_file, render_file};
use crate::error::StubError;
use crate::generator::Generated;

mod config;
mod driver;
mod error;
mod generator;
mod parser;
mod types;

/// Generate empty definitions for every function declared in the given headers.
#[derive(Parser)]
#[command(name = "stubgen", version, about)]
struct Cli {
    /// Header files to process, e.g. include/*.h
    #[arg(required = true)]
    headers: Vec<PathBuf>,

    /// TOML file overriding keyword lists and output settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Extension of generated files (default: cpp)
    #[arg(long)]
    extension: Option<String>,

    /// Print generated definitions instead of writing files
    #[arg(long)]
    stdout: bool,

    /// Keep `const` on generated member function definitions
    #[arg(long)]
    keep_const: bool,

    /// Drop default arguments from generated parameter lists
    #[arg(long)]
    strip_defaults: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn stub_config(&self) -> Result<StubConfig, StubError> {
        let mut config = match &self.config {
            Some(path) => StubConfig::load(path)?,
            None => StubConfig::default(),
        };

        if let Some(extension) = &self.extension {
            config.output_extension = extension.trim_start_matches('.').to_string();
        }
        config.keep_const_qualifier |= self.keep_const;
        config.strip_default_arguments |= self.strip_defaults;

        Ok(config)
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("stubgen={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn process(header: &Path, config: &StubConfig, to_stdout: bool) -> Result<(), StubError> {
    if to_stdout {
        match render_file(header, config)? {
            Generated::Stubs { source, .. } => print!("{source}"),
            Generated::Empty => {
                eprintln!("No function declarations found in '{}'.", origin_name(header))
            }
        }
        return Ok(());
    }

    match process_file(header, config)? {
        Outcome::Written { path, .. } => println!("Generated: {}", path.display()),
        Outcome::NoDeclarations => {
            println!("No function declarations found in '{}'.", origin_name(header))
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match cli.stub_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut failed = false;
    for header in &cli.headers {
        if let Err(e) = process(header, &config, cli.stdout) {
            failed = true;
            match e {
                StubError::InputNotFound { path } => {
                    tracing::warn!(path = %path.display(), "header not found");
                    eprintln!("Error: File '{}' not found. Skipping.", path.display());
                }
                other => eprintln!("Error: {other}. Skipping."),
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
