use clap::{Args, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use strpack_codec::Encoding;

use crate::exit::{codec_error, io_error, CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod convert;
pub mod layout;
pub mod pack;
pub mod unpack;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Pack values into a buffer.
    Pack(PackArgs),
    /// Unpack a buffer into values.
    Unpack(UnpackArgs),
    /// Show how a format spec lays out its directives.
    Layout(LayoutArgs),
    /// Encode raw data as hex or base64.
    Encode(ConvertArgs),
    /// Decode hex or base64 text to raw data.
    Decode(ConvertArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat, encoding: Encoding) -> CliResult<i32> {
    match command {
        Command::Pack(args) => pack::run(args, format, encoding),
        Command::Unpack(args) => unpack::run(args, format, encoding),
        Command::Layout(args) => layout::run(args, format),
        Command::Encode(args) => convert::encode(args, format, encoding),
        Command::Decode(args) => convert::decode(args, format, encoding),
        Command::Version(args) => version::run(args),
    }
}

/// Input bytes from the positional argument or `--file`.
pub fn read_input(data: Option<&str>, file: Option<&Path>) -> CliResult<Vec<u8>> {
    if let Some(path) = file {
        return fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
    }
    data.map(|text| text.as_bytes().to_vec())
        .ok_or_else(|| CliError::new(USAGE, "either DATA or --file is required"))
}

/// Decode text input. Surrounding whitespace is ignored unless raw.
pub fn decode_input(raw: &[u8], encoding: Encoding) -> CliResult<Vec<u8>> {
    if encoding == Encoding::Raw {
        return Ok(raw.to_vec());
    }
    let text = String::from_utf8_lossy(raw);
    encoding
        .decode(text.trim())
        .map_err(|err| codec_error(&format!("invalid {encoding} input"), err))
}

#[derive(Args, Debug)]
pub struct PackArgs {
    /// Format spec, e.g. "<!4 b h i4 z".
    pub spec: String,
    /// Values as JSON scalars: numbers pack as numbers, strings as bytes.
    #[arg(allow_hyphen_values = true)]
    pub values: Vec<String>,
}

#[derive(Args, Debug)]
pub struct UnpackArgs {
    /// Format spec.
    pub spec: String,
    /// Packed buffer in the selected encoding.
    #[arg(conflicts_with = "file")]
    pub data: Option<String>,
    /// Read the packed buffer from a file instead.
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// Start unpacking at this byte offset.
    #[arg(long, default_value = "0")]
    pub offset: usize,
}

#[derive(Args, Debug)]
pub struct LayoutArgs {
    /// Format spec.
    pub spec: String,
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Input text.
    #[arg(conflicts_with = "file")]
    pub data: Option<String>,
    /// Read input from a file instead.
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
