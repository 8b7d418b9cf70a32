mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;
use strpack_codec::Encoding;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "strpack",
    version,
    about = "Format-string driven binary packing"
)]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", env = "STRPACK_FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Text encoding of packed buffers (hex, base64, raw).
    #[arg(
        long,
        short = 'e',
        value_name = "ENCODING",
        env = "STRPACK_ENCODING",
        default_value = "hex",
        global = true
    )]
    encoding: Encoding,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(
        long,
        value_name = "LEVEL",
        env = "STRPACK_LOG_LEVEL",
        default_value = "info",
        global = true
    )]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, format, cli.encoding);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pack_with_negative_values() {
        let cli = Cli::try_parse_from(["strpack", "pack", "<b h", "-12", "-1"])
            .expect("pack args should parse");

        let Command::Pack(args) = cli.command else {
            panic!("expected pack");
        };
        assert_eq!(args.spec, "<b h");
        assert_eq!(args.values, vec!["-12", "-1"]);
    }

    #[test]
    fn parses_global_encoding() {
        let cli = Cli::try_parse_from(["strpack", "unpack", "zB", "YWJjAPc=", "-e", "base64"])
            .expect("unpack args should parse");
        assert_eq!(cli.encoding, Encoding::Base64);
        assert!(matches!(cli.command, Command::Unpack(_)));
    }

    #[test]
    fn rejects_unknown_encoding() {
        let err = Cli::try_parse_from(["strpack", "-e", "base32", "layout", "b"])
            .expect_err("unknown encoding should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn rejects_data_with_file() {
        let err = Cli::try_parse_from(["strpack", "decode", "abcd", "--file", "/tmp/x"])
            .expect_err("conflicting args should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }
}
