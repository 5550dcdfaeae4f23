use std::io::{IsTerminal, Write};
use std::time::Duration;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use resplink_client::Value;
use resplink_transport::PortSummary;
use serde::Serialize;

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
            Self::Pretty
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct ReplyOutput<'a> {
    schema_id: &'a str,
    target: &'a str,
    command: &'a str,
    kind: &'a str,
    reply: serde_json::Value,
}

pub fn print_reply(target: &str, command: &str, reply: &Value, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = ReplyOutput {
                schema_id: "https://schemas.3leaps.dev/resplink/cli/v1/reply.schema.json",
                target,
                command,
                kind: reply.kind(),
                reply: reply_to_json(reply),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["#", "TYPE", "VALUE"]);
            match reply {
                Value::Array(items) => {
                    for (index, item) in items.iter().enumerate() {
                        table.add_row(vec![
                            (index + 1).to_string(),
                            item.kind().to_string(),
                            render_pretty(item, 0),
                        ]);
                    }
                }
                other => {
                    table.add_row(vec![
                        "1".to_string(),
                        other.kind().to_string(),
                        render_pretty(other, 0),
                    ]);
                }
            }
            println!("{table}");
        }
        OutputFormat::Pretty => println!("{}", render_pretty(reply, 0)),
        OutputFormat::Raw => {
            let mut data = Vec::new();
            render_raw(reply, &mut data);
            print_raw(&data);
        }
    }
}

#[derive(Serialize)]
pub struct PingSample {
    pub seq: u32,
    pub reply: String,
    pub rtt_us: u64,
}

#[derive(Serialize)]
struct PingOutput<'a> {
    schema_id: &'a str,
    target: &'a str,
    samples: &'a [PingSample],
}

impl PingSample {
    pub fn new(seq: u32, reply: String, rtt: Duration) -> Self {
        Self {
            seq,
            reply,
            rtt_us: u64::try_from(rtt.as_micros()).unwrap_or(u64::MAX),
        }
    }
}

pub fn print_pings(target: &str, samples: &[PingSample], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = PingOutput {
                schema_id: "https://schemas.3leaps.dev/resplink/cli/v1/ping.schema.json",
                target,
                samples,
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["SEQ", "REPLY", "RTT"]);
            for sample in samples {
                table.add_row(vec![
                    sample.seq.to_string(),
                    sample.reply.clone(),
                    format_rtt(sample.rtt_us),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty | OutputFormat::Raw => {
            for sample in samples {
                println!(
                    "{} from {target}: seq={} time={}",
                    sample.reply,
                    sample.seq,
                    format_rtt(sample.rtt_us)
                );
            }
        }
    }
}

#[derive(Serialize)]
struct PortOutput<'a> {
    name: &'a str,
    kind: &'a str,
    product: Option<&'a str>,
}

#[derive(Serialize)]
struct PortsOutput<'a> {
    schema_id: &'a str,
    ports: Vec<PortOutput<'a>>,
}

pub fn print_ports(ports: &[PortSummary], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = PortsOutput {
                schema_id: "https://schemas.3leaps.dev/resplink/cli/v1/ports.schema.json",
                ports: ports
                    .iter()
                    .map(|port| PortOutput {
                        name: &port.name,
                        kind: port.kind,
                        product: port.product.as_deref(),
                    })
                    .collect(),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["PORT", "KIND", "PRODUCT"]);
            for port in ports {
                table.add_row(vec![
                    port.name.clone(),
                    port.kind.to_string(),
                    port.product.clone().unwrap_or_else(|| "-".to_string()),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            if ports.is_empty() {
                println!("no serial ports found");
            }
            for port in ports {
                match &port.product {
                    Some(product) => println!("{} ({}, {product})", port.name, port.kind),
                    None => println!("{} ({})", port.name, port.kind),
                }
            }
        }
        OutputFormat::Raw => {
            for port in ports {
                println!("{}", port.name);
            }
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

/// JSON view of a reply. Bulk strings that are not UTF-8 become byte arrays.
pub fn reply_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Nil => serde_json::Value::Null,
        Value::Simple(text) => serde_json::Value::String(text.clone()),
        Value::Error(msg) => serde_json::json!({ "error": msg }),
        Value::Integer(n) => serde_json::Value::from(*n),
        Value::Bulk(data) => match std::str::from_utf8(data) {
            Ok(text) => serde_json::Value::String(text.to_string()),
            Err(_) => serde_json::Value::from(data.to_vec()),
        },
        Value::Array(items) => items.iter().map(reply_to_json).collect(),
    }
}

/// redis-cli style rendering.
pub fn render_pretty(value: &Value, indent: usize) -> String {
    match value {
        Value::Nil => "(nil)".to_string(),
        Value::Simple(text) => text.clone(),
        Value::Error(msg) => format!("(error) {msg}"),
        Value::Integer(n) => format!("(integer) {n}"),
        Value::Bulk(data) => format!("\"{}\"", data.escape_ascii()),
        Value::Array(items) if items.is_empty() => "(empty array)".to_string(),
        Value::Array(items) => {
            let width = items.len().to_string().len();
            items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    let pad = if index == 0 { 0 } else { indent };
                    format!(
                        "{:pad$}{:>width$}) {}",
                        "",
                        index + 1,
                        render_pretty(item, indent + width + 2)
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")
        }
    }
}

fn render_raw(value: &Value, out: &mut Vec<u8>) {
    match value {
        Value::Nil => {}
        Value::Simple(text) | Value::Error(text) => out.extend_from_slice(text.as_bytes()),
        Value::Integer(n) => out.extend_from_slice(n.to_string().as_bytes()),
        Value::Bulk(data) => out.extend_from_slice(data),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    out.push(b'\n');
                }
                render_raw(item, out);
            }
        }
    }
}

fn format_rtt(rtt_us: u64) -> String {
    if rtt_us >= 1_000 {
        format!("{:.1} ms", rtt_us as f64 / 1_000.0)
    } else {
        format!("{rtt_us} µs")
    }
}
