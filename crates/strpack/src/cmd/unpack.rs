use strpack_codec::Encoding;
use strpack_format::Directive;
use tracing::debug;

use crate::cmd::{decode_input, read_input, UnpackArgs};
use crate::exit::{pack_error, CliError, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_unpacked, OutputFormat};

pub fn run(args: UnpackArgs, format: OutputFormat, encoding: Encoding) -> CliResult<i32> {
    let raw = read_input(args.data.as_deref(), args.file.as_deref())?;
    let data = decode_input(&raw, encoding)?;
    debug!(spec = %args.spec, len = data.len(), offset = args.offset, "unpacking");

    // alignment is relative to the offset, same as unpacking a sub-slice
    let slice = data.get(args.offset..).ok_or_else(|| {
        CliError::new(
            DATA_INVALID,
            format!(
                "offset {} is past the end of {} input bytes",
                args.offset,
                data.len()
            ),
        )
    })?;
    let (values, consumed) = strpack_format::unpack_values(&args.spec, slice)
        .map_err(|err| pack_error("unpack failed", err))?;

    let directives: Vec<Directive> = strpack_format::layout(&args.spec)
        .map_err(|err| pack_error("unpack failed", err))?
        .into_iter()
        .filter(|d| d.kind.is_data_bearing())
        .collect();
    print_unpacked(&args.spec, &directives, &values, consumed, format);
    Ok(SUCCESS)
}
