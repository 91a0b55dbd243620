pub mod json;
pub mod line;
pub mod scan;

use std::borrow::Cow;
use std::fs;
use std::io::Read;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, trace};

use crate::types::Scheme;
use crate::{DecodeOptions, Error, Grammar, Result};

pub use line::{decode_line, SchemeLineVersion};
use scan::{scan_lines, ScanResult};

/// Decodes `input`, reading it first when it names an existing file and
/// `options.read_files` is set.
pub fn from_input(input: &str, options: &DecodeOptions) -> Result<Vec<Scheme>> {
    let text = read_input(input, options)?;
    from_str(&text, options)
}

pub fn from_path(path: &Path, options: &DecodeOptions) -> Result<Vec<Scheme>> {
    let text = fs::read_to_string(path)
        .map_err(|err| Error::io(format!("failed to read {}: {err}", path.display())))?;
    from_str(&text, options)
}

pub fn from_reader<R: Read>(mut reader: R, options: &DecodeOptions) -> Result<Vec<Scheme>> {
    let mut buf = String::new();
    reader
        .read_to_string(&mut buf)
        .map_err(|err| Error::io(format!("read failed: {err}")))?;
    from_str(&buf, options)
}

/// Decodes literal scheme text.
///
/// With [`Grammar::Auto`] any text that parses as JSON is decoded as JSON,
/// scalars such as `123` or `true` included; only a JSON syntax error falls
/// back to single line schemes. JSON that is not an array of scheme objects
/// fails with [`ErrorKind::InvalidJson`].
///
/// [`ErrorKind::InvalidJson`]: crate::ErrorKind::InvalidJson
pub fn from_str(input: &str, options: &DecodeOptions) -> Result<Vec<Scheme>> {
    let scanned = scan_lines(input);
    match options.grammar {
        Grammar::Json => {
            let value = parse_json(&scanned)
                .map_err(|err| Error::invalid_json(format!("invalid JSON: {err}")))?;
            json::schemes_from_value(value)
        }
        Grammar::Lines => decode_lines(&scanned),
        Grammar::Auto => match parse_json(&scanned) {
            Ok(value) => {
                debug!("decoding schemes as JSON");
                json::schemes_from_value(value)
            }
            Err(err) => {
                debug!(
                    reason = %err,
                    lines = scanned.non_blank,
                    "input is not JSON, decoding single line schemes"
                );
                decode_lines(&scanned)
            }
        },
    }
}

fn read_input<'a>(input: &'a str, options: &DecodeOptions) -> Result<Cow<'a, str>> {
    if !options.read_files {
        return Ok(Cow::Borrowed(input));
    }
    let path = Path::new(input);
    if !path.is_file() {
        return Ok(Cow::Borrowed(input));
    }
    debug!(path = %path.display(), "reading schemes file");
    fs::read_to_string(path)
        .map(Cow::Owned)
        .map_err(|err| Error::io(format!("failed to read {}: {err}", path.display())))
}

fn parse_json(scanned: &ScanResult<'_>) -> serde_json::Result<Value> {
    serde_json::from_str(&scanned.joined())
}

fn decode_lines(scanned: &ScanResult<'_>) -> Result<Vec<Scheme>> {
    let mut schemes = Vec::with_capacity(scanned.non_blank);
    for (idx, line) in scanned.content_lines() {
        let scheme = decode_line(line, &idx.to_string()).map_err(|err| {
            debug!(line = idx, field = ?err.field(), "single line scheme rejected");
            let wrapped = Error::not_a_file_or_scheme(format!(
                "given scheme is neither file nor proper scheme string ({err})"
            ))
            .with_cause(err.kind)
            .with_line(idx);
            match err.field() {
                Some(field) => wrapped.with_field(field),
                None => wrapped,
            }
        })?;
        trace!(line = idx, action = %scheme.action, "decoded single line scheme");
        schemes.push(scheme);
    }
    Ok(schemes)
}
