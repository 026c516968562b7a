//! Single-column CSV buffers
//!
//! Layout: a header line `,0`, then one `index,value` row per sample.
//! Rows with an empty or NaN value are skipped on read.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{MlsError, Result};

const HEADER: &str = ",0";

pub fn write_column<W: Write, T>(
    mut writer: W,
    values: &[T],
    format: impl Fn(&T) -> String,
) -> Result<()> {
    writeln!(writer, "{}", HEADER)?;
    for (index, value) in values.iter().enumerate() {
        writeln!(writer, "{},{}", index, format(value))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_column<R: BufRead, T>(reader: R, parse: impl Fn(&str) -> Option<T>) -> Result<Vec<T>> {
    let mut values = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line_no == 0 || line.trim().is_empty() {
            continue;
        }

        let field = line.split(',').nth(1).map(str::trim).unwrap_or("");
        if field.is_empty() || field.eq_ignore_ascii_case("nan") {
            continue;
        }

        let value = parse(field).ok_or_else(|| {
            MlsError::InvalidData(format!("line {}: cannot parse '{}'", line_no + 1, field))
        })?;
        values.push(value);
    }
    Ok(values)
}

pub fn format_sample(value: &f64) -> String {
    format!("{:?}", value)
}

pub fn format_bit(value: &bool) -> String {
    let text = if *value { "True" } else { "False" };
    text.to_string()
}

pub fn format_index(value: &usize) -> String {
    value.to_string()
}

pub fn parse_sample(field: &str) -> Option<f64> {
    field.parse().ok()
}

pub fn parse_bit(field: &str) -> Option<bool> {
    match field {
        "True" | "true" | "1" | "1.0" => Some(true),
        "False" | "false" | "0" | "0.0" => Some(false),
        _ => None,
    }
}

/// Indices may have been written as floats by other tools
pub fn parse_index(field: &str) -> Option<usize> {
    field.parse::<usize>().ok().or_else(|| {
        let value: f64 = field.parse().ok()?;
        (value >= 0.0 && value.fract() == 0.0).then_some(value as usize)
    })
}

pub fn save_samples<P: AsRef<Path>>(path: P, samples: &[f64]) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_column(BufWriter::new(file), samples, format_sample)
}

pub fn load_samples<P: AsRef<Path>>(path: P) -> Result<Vec<f64>> {
    let file = File::open(path.as_ref())?;
    read_column(BufReader::new(file), parse_sample)
}

pub fn save_bits<P: AsRef<Path>>(path: P, bits: &[bool]) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_column(BufWriter::new(file), bits, format_bit)
}

pub fn load_bits<P: AsRef<Path>>(path: P) -> Result<Vec<bool>> {
    let file = File::open(path.as_ref())?;
    read_column(BufReader::new(file), parse_bit)
}

pub fn save_indices<P: AsRef<Path>>(path: P, indices: &[usize]) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_column(BufWriter::new(file), indices, format_index)
}

pub fn load_indices<P: AsRef<Path>>(path: P) -> Result<Vec<usize>> {
    let file = File::open(path.as_ref())?;
    read_column(BufReader::new(file), parse_index)
}
