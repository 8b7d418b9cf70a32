use strpack_codec::Encoding;
use tracing::debug;

use crate::cmd::{decode_input, read_input, ConvertArgs};
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_converted, OutputFormat};

pub fn encode(args: ConvertArgs, format: OutputFormat, encoding: Encoding) -> CliResult<i32> {
    let input = read_input(args.data.as_deref(), args.file.as_deref())?;
    let output = encoding.encode(&input);
    debug!(encoding = %encoding, input = input.len(), output = output.len(), "encoded");
    print_converted("encode", encoding, input.len(), output.as_bytes(), format);
    Ok(SUCCESS)
}

pub fn decode(args: ConvertArgs, format: OutputFormat, encoding: Encoding) -> CliResult<i32> {
    let input = read_input(args.data.as_deref(), args.file.as_deref())?;
    let output = decode_input(&input, encoding)?;
    debug!(encoding = %encoding, input = input.len(), output = output.len(), "decoded");
    print_converted("decode", encoding, input.len(), &output, format);
    Ok(SUCCESS)
}
