use crate::cmd::LayoutArgs;
use crate::exit::{pack_error, CliResult, SUCCESS};
use crate::output::{print_layout, OutputFormat};

pub fn run(args: LayoutArgs, format: OutputFormat) -> CliResult<i32> {
    let directives =
        strpack_format::layout(&args.spec).map_err(|err| pack_error("invalid format", err))?;
    print_layout(&args.spec, &directives, format);
    Ok(SUCCESS)
}
