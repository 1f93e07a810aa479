use crate::config::StubConfig;
use crate::error::{Result, StubError};
use crate::generator::{Generated, generate};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// What happened to one header.
#[derive(Debug, Eq, PartialEq, Clone)]
pub enum Outcome {
    Written { path: PathBuf, declarations: usize },
    /// The header declares no functions; no file was written.
    NoDeclarations,
}

/// `include/widget.h` becomes `include/widget.cpp`.
pub fn output_path(input: &Path, config: &StubConfig) -> PathBuf {
    input.with_extension(&config.output_extension)
}

/// File name used in the generated `#include` line.
pub fn origin_name(input: &Path) -> String {
    input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string())
}

/// Reads `input` and renders its stubs without touching the filesystem otherwise.
pub fn render_file(input: &Path, config: &StubConfig) -> Result<Generated> {
    let text = std::fs::read_to_string(input).map_err(|e| StubError::read(input, e))?;
    debug!(path = %input.display(), bytes = text.len(), "read header");

    Ok(generate(&text, &origin_name(input), config))
}

fn write_output(path: &Path, source: &str) -> Result<()> {
    let file = File::create(path).map_err(|e| StubError::write(path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(source.as_bytes())
        .map_err(|e| StubError::write(path, e))?;
    writer.flush().map_err(|e| StubError::write(path, e))
}

/// Generates the definition file next to `input`, creating or overwriting it.
pub fn process_file(input: &Path, config: &StubConfig) -> Result<Outcome> {
    let output = output_path(input, config);
    if output == input {
        return Err(StubError::OutputIsInput {
            path: input.to_path_buf(),
        });
    }

    match render_file(input, config)? {
        Generated::Empty => Ok(Outcome::NoDeclarations),
        Generated::Stubs {
            source,
            declarations,
        } => {
            write_output(&output, &source)?;
            info!(path = %output.display(), declarations, "wrote stub definitions");

            Ok(Outcome::Written {
                path: output,
                declarations,
            })
        }
    }
}
