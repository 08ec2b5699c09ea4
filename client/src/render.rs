use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use shared::{IpInfo, LookupResult};
use std::io::{self, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),

    #[error("failed to encode output as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

const LABEL_WIDTH: usize = 11;

/// Text rows for the rich report, in display order.
const INFO_ROWS: &[(&str, fn(&IpInfo) -> &str)] = &[
    ("ip", |info| info.ip.as_str()),
    ("country", |info| info.country.as_str()),
    ("city", |info| info.city.as_str()),
    ("region", |info| info.region.as_str()),
    ("location", |info| info.location.as_str()),
    ("org", |info| info.org.as_str()),
    ("hostname", |info| info.hostname.as_str()),
];

#[derive(Serialize)]
struct PlainReport<'a> {
    #[serde(rename = "publicIP")]
    public_ip: &'a str,
    #[serde(rename = "privateIP")]
    private_ip: &'a str,
}

#[derive(Serialize)]
struct RichReport<'a> {
    #[serde(rename = "public IP")]
    public_ip: &'a str,
    #[serde(rename = "private IP")]
    private_ip: &'a str,
    info: &'a IpInfo,
}

fn row(out: &mut impl Write, label: &str, value: &str) -> io::Result<()> {
    writeln!(out, "{label:<LABEL_WIDTH$}: {value}")
}

pub fn render<W: Write>(
    result: &LookupResult,
    format: Format,
    rich: bool,
    out: &mut W,
) -> Result<(), RenderError> {
    let empty = IpInfo::default();
    let info = result.info.as_ref().unwrap_or(&empty);

    match (format, rich) {
        (Format::Text, false) => {
            row(out, "public IP", &result.public_ip)?;
            row(out, "private IP", &result.private_ip)?;
        },
        (Format::Text, true) => {
            for (label, field) in INFO_ROWS {
                row(out, label, field(info))?;
            }
            row(out, "private IP", &result.private_ip)?;
        },
        (Format::Json, false) => {
            let report = PlainReport {
                public_ip: &result.public_ip,
                private_ip: &result.private_ip,
            };
            serde_json::to_writer(&mut *out, &report)?;
            writeln!(out)?;
        },
        (Format::Json, true) => {
            let report = RichReport {
                public_ip: &result.public_ip,
                private_ip: &result.private_ip,
                info,
            };
            let formatter = PrettyFormatter::with_indent(b"    ");
            let mut serializer = serde_json::Serializer::with_formatter(&mut *out, formatter);
            report.serialize(&mut serializer)?;
            writeln!(out)?;
        },
    }

    Ok(())
}
