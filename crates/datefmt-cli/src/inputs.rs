//! Collection of the values a command operates on.
//!
//! Values come from positional arguments, from a file given with `--input`,
//! or from standard input when the path is `-`. Each line is one value; line
//! endings are stripped but nothing else is, since surrounding whitespace is
//! part of what inference judges.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result, bail};

/// Reads one value per line, skipping empty lines.
pub fn read_values<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut values = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if !line.is_empty() {
            values.push(line);
        }
    }
    Ok(values)
}

/// Positional values followed by the contents of `input`, if any.
pub fn collect_values(values: &[String], input: Option<&Path>) -> Result<Vec<String>> {
    let mut collected = values.to_vec();
    match input {
        Some(path) if path == Path::new("-") => {
            let stdin = io::stdin().lock();
            collected.extend(read_values(stdin).context("read values from stdin")?);
        }
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("open input file {}", path.display()))?;
            let lines = read_values(BufReader::new(file))
                .with_context(|| format!("read input file {}", path.display()))?;
            collected.extend(lines);
        }
        None => {}
    }
    if collected.is_empty() {
        bail!("no values given; pass VALUES or --input <PATH>");
    }
    Ok(collected)
}
