use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use strpack_codec::Encoding;
use strpack_format::{Directive, Value};

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct PackedOutput<'a> {
    format: &'a str,
    size: usize,
    encoding: &'a str,
    data: String,
}

pub fn print_packed(fmt: &str, buf: &[u8], encoding: Encoding, format: OutputFormat) {
    let data = encoding.encode(buf);
    match format {
        OutputFormat::Json => print_json(&PackedOutput {
            format: fmt,
            size: buf.len(),
            encoding: encoding.name(),
            data,
        }),
        OutputFormat::Table => {
            let mut table = new_table(vec!["FORMAT", "SIZE", "ENCODING", "DATA"]);
            table.add_row(vec![
                fmt.to_string(),
                buf.len().to_string(),
                encoding.name().to_string(),
                data,
            ]);
            println!("{table}");
        }
        OutputFormat::Pretty => println!("{data}"),
        OutputFormat::Raw => print_raw(buf),
    }
}

#[derive(Serialize)]
struct ValueOutput {
    index: usize,
    option: char,
    offset: usize,
    kind: &'static str,
    value: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    hex: Option<String>,
}

impl ValueOutput {
    fn new(index: usize, directive: &Directive, value: &Value) -> Self {
        let (json, hex) = match value {
            Value::Int(v) => (serde_json::json!(v), None),
            Value::UInt(v) => (serde_json::json!(v), None),
            Value::Float(v) => (serde_json::json!(v), None),
            Value::Bytes(b) => {
                let text = std::str::from_utf8(b)
                    .map(|s| serde_json::Value::String(s.to_string()))
                    .unwrap_or(serde_json::Value::Null);
                (text, Some(strpack_codec::hex::encode(b)))
            }
        };
        Self {
            index,
            option: directive.option,
            offset: directive.offset,
            kind: value.kind_name(),
            value: json,
            hex,
        }
    }

    fn text(&self) -> String {
        match (&self.value, &self.hex) {
            (serde_json::Value::String(s), _) => s.clone(),
            (serde_json::Value::Null, Some(hex)) => format!("<binary {hex}>"),
            (other, _) => other.to_string(),
        }
    }
}

#[derive(Serialize)]
struct UnpackedOutput<'a> {
    format: &'a str,
    consumed: usize,
    values: Vec<ValueOutput>,
}

/// `directives` are the data-bearing directives of `fmt`, in order.
pub fn print_unpacked(
    fmt: &str,
    directives: &[Directive],
    values: &[Value],
    consumed: usize,
    format: OutputFormat,
) {
    let values: Vec<ValueOutput> = directives
        .iter()
        .zip(values)
        .enumerate()
        .map(|(index, (directive, value))| ValueOutput::new(index, directive, value))
        .collect();

    match format {
        OutputFormat::Json => print_json(&UnpackedOutput {
            format: fmt,
            consumed,
            values,
        }),
        OutputFormat::Table => {
            let mut table = new_table(vec!["#", "OPTION", "KIND", "VALUE"]);
            for value in &values {
                table.add_row(vec![
                    value.index.to_string(),
                    value.option.to_string(),
                    value.kind.to_string(),
                    value.text(),
                ]);
            }
            println!("{table}");
            println!("consumed: {consumed} bytes");
        }
        OutputFormat::Pretty => {
            for value in &values {
                println!("{}{}={}", value.option, value.index, value.text());
            }
            println!("consumed={consumed}");
        }
        OutputFormat::Raw => {
            for value in &values {
                println!("{}", value.text());
            }
        }
    }
}

#[derive(Serialize)]
struct DirectiveOutput {
    offset: usize,
    option: char,
    kind: &'static str,
    endian: &'static str,
    padding: usize,
    position: usize,
    size: usize,
}

#[derive(Serialize)]
struct LayoutOutput<'a> {
    format: &'a str,
    size: usize,
    directives: Vec<DirectiveOutput>,
}

pub fn print_layout(fmt: &str, directives: &[Directive], format: OutputFormat) {
    let mut position = 0;
    let rows: Vec<DirectiveOutput> = directives
        .iter()
        .map(|d| {
            position += d.padding;
            let row = DirectiveOutput {
                offset: d.offset,
                option: d.option,
                kind: d.kind.name(),
                endian: d.endian.name(),
                padding: d.padding,
                position,
                size: d.size,
            };
            position += d.size;
            row
        })
        .collect();

    match format {
        OutputFormat::Json => print_json(&LayoutOutput {
            format: fmt,
            size: position,
            directives: rows,
        }),
        OutputFormat::Table => {
            let mut table = new_table(vec![
                "OFFSET", "OPTION", "KIND", "ENDIAN", "PADDING", "POSITION", "SIZE",
            ]);
            for row in &rows {
                table.add_row(vec![
                    row.offset.to_string(),
                    row.option.to_string(),
                    row.kind.to_string(),
                    row.endian.to_string(),
                    row.padding.to_string(),
                    row.position.to_string(),
                    row.size.to_string(),
                ]);
            }
            println!("{table}");
            println!("size: {position} bytes");
        }
        OutputFormat::Pretty | OutputFormat::Raw => {
            for row in &rows {
                println!(
                    "{}@{} {} {} pad={} pos={} size={}",
                    row.option,
                    row.offset,
                    row.kind,
                    row.endian,
                    row.padding,
                    row.position,
                    row.size
                );
            }
            println!("size={position}");
        }
    }
}

#[derive(Serialize)]
struct ConvertedOutput<'a> {
    operation: &'a str,
    encoding: &'a str,
    input_size: usize,
    output_size: usize,
    output: String,
}

/// Print the result of an encode or decode. `output` is the produced bytes.
pub fn print_converted(
    operation: &str,
    encoding: Encoding,
    input_size: usize,
    output: &[u8],
    format: OutputFormat,
) {
    match format {
        OutputFormat::Json => print_json(&ConvertedOutput {
            operation,
            encoding: encoding.name(),
            input_size,
            output_size: output.len(),
            output: String::from_utf8_lossy(output).into_owned(),
        }),
        OutputFormat::Table => {
            let mut table = new_table(vec!["OPERATION", "ENCODING", "IN", "OUT", "OUTPUT"]);
            table.add_row(vec![
                operation.to_string(),
                encoding.name().to_string(),
                input_size.to_string(),
                output.len().to_string(),
                String::from_utf8_lossy(output).into_owned(),
            ]);
            println!("{table}");
        }
        OutputFormat::Pretty => println!("{}", String::from_utf8_lossy(output)),
        OutputFormat::Raw => print_raw(output),
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}
