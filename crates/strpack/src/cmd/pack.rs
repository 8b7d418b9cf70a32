use strpack_codec::Encoding;
use strpack_format::Value;
use tracing::debug;

use crate::cmd::PackArgs;
use crate::exit::{pack_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_packed, OutputFormat};

pub fn run(args: PackArgs, format: OutputFormat, encoding: Encoding) -> CliResult<i32> {
    let values = args
        .values
        .iter()
        .map(|arg| parse_value(arg))
        .collect::<CliResult<Vec<_>>>()?;
    debug!(spec = %args.spec, values = values.len(), "packing");

    let buf =
        strpack_format::pack(&args.spec, &values).map_err(|err| pack_error("pack failed", err))?;
    print_packed(&args.spec, &buf, encoding, format);
    Ok(SUCCESS)
}

/// Parse one JSON scalar. Integers keep their sign, strings become bytes.
fn parse_value(arg: &str) -> CliResult<Value> {
    let json: serde_json::Value = serde_json::from_str(arg)
        .map_err(|err| CliError::new(USAGE, format!("value {arg:?} is not valid JSON: {err}")))?;
    match json {
        serde_json::Value::Number(n) => {
            if let Some(v) = n.as_i64() {
                Ok(Value::Int(v))
            } else if let Some(v) = n.as_u64() {
                Ok(Value::UInt(v))
            } else {
                n.as_f64()
                    .map(Value::Float)
                    .ok_or_else(|| CliError::new(USAGE, format!("unsupported number: {n}")))
            }
        }
        serde_json::Value::String(s) => Ok(Value::from(s)),
        other => Err(CliError::new(
            USAGE,
            format!("value {other} must be a JSON number or string"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_json_scalars() {
        assert_eq!(parse_value("-12").unwrap(), Value::Int(-12));
        assert_eq!(
            parse_value("18446744073709551615").unwrap(),
            Value::UInt(u64::MAX)
        );
        assert_eq!(parse_value("1.5").unwrap(), Value::Float(1.5));
        assert_eq!(parse_value("\"abc\"").unwrap(), Value::from("abc"));
    }

    #[test]
    fn rejects_non_scalars() {
        assert_eq!(parse_value("[1]").unwrap_err().code, USAGE);
        assert_eq!(parse_value("abc").unwrap_err().code, USAGE);
    }
}
