pub mod constants;
pub mod decode;
pub mod encode;
pub mod error;
pub mod num;
pub mod options;
pub mod text;
pub mod types;

use std::io::{Read, Write};
use std::path::Path;

pub use crate::decode::{decode_line, SchemeLineVersion};
pub use crate::error::{Error, ErrorKind, Location, ValueError};
pub use crate::num::{
    is_unbounded, is_unbounded_f64, parse_bytes, parse_duration, parse_frequency, parse_integer,
    parse_ms, parse_ns, parse_number, parse_percent, parse_us, Number, TimeUnit,
};
pub use crate::options::{DecodeOptions, EncodeOptions, Grammar, Indent};
pub use crate::text::{format_bytes, format_duration_approx, format_duration_exact, format_number};
pub use crate::types::{
    AccessPattern, AgeUnit, DamosAction, NrAccessesUnit, Quotas, Scheme, WatermarkMetric,
    Watermarks,
};

pub type Result<T> = std::result::Result<T, Error>;

/// Decodes a scheme file path or literal scheme text.
pub fn from_input(input: &str) -> Result<Vec<Scheme>> {
    from_input_with_options(input, &DecodeOptions::default())
}

pub fn from_input_with_options(input: &str, options: &DecodeOptions) -> Result<Vec<Scheme>> {
    decode::from_input(input, options)
}

pub fn from_str(input: &str) -> Result<Vec<Scheme>> {
    from_str_with_options(input, &DecodeOptions::default())
}

pub fn from_str_with_options(input: &str, options: &DecodeOptions) -> Result<Vec<Scheme>> {
    decode::from_str(input, options)
}

pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Scheme>> {
    from_path_with_options(path, &DecodeOptions::default())
}

pub fn from_path_with_options<P: AsRef<Path>>(
    path: P,
    options: &DecodeOptions,
) -> Result<Vec<Scheme>> {
    decode::from_path(path.as_ref(), options)
}

pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Scheme>> {
    from_reader_with_options(reader, &DecodeOptions::default())
}

pub fn from_reader_with_options<R: Read>(reader: R, options: &DecodeOptions) -> Result<Vec<Scheme>> {
    decode::from_reader(reader, options)
}

pub fn to_line(scheme: &Scheme) -> Result<String> {
    to_line_with_options(scheme, &EncodeOptions::default())
}

pub fn to_line_with_options(scheme: &Scheme, options: &EncodeOptions) -> Result<String> {
    encode::to_line(scheme, options)
}

pub fn to_lines(schemes: &[Scheme]) -> Result<String> {
    to_lines_with_options(schemes, &EncodeOptions::default())
}

pub fn to_lines_with_options(schemes: &[Scheme], options: &EncodeOptions) -> Result<String> {
    encode::to_lines(schemes, options)
}

pub fn to_json_string(schemes: &[Scheme]) -> Result<String> {
    to_json_string_with_options(schemes, &EncodeOptions::default())
}

pub fn to_json_string_with_options(schemes: &[Scheme], options: &EncodeOptions) -> Result<String> {
    encode::to_json(schemes, options)
}

pub fn to_writer<W: Write>(writer: W, schemes: &[Scheme]) -> Result<()> {
    to_writer_with_options(writer, schemes, &EncodeOptions::default())
}

pub fn to_writer_with_options<W: Write>(
    writer: W,
    schemes: &[Scheme],
    options: &EncodeOptions,
) -> Result<()> {
    encode::to_json_writer(writer, schemes, options)
}
