//! Small string and template helpers
//!
//! Companions to path expansion for code that builds file lists and job
//! configuration: splitting and joining, directory-suffix handling and
//! line-based template substitution.

use chrono::{Datelike, Local, NaiveDate};
use regex::Regex;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::Result;
use crate::error::{IoError, ValidationError};

/// Split on `sep`, dropping empty segments
pub fn split(text: &str, sep: char) -> Vec<String> {
    text.split(sep)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split on any character in `seps`, dropping empty segments
pub fn split_any(text: &str, seps: &str) -> Vec<String> {
    text.split(|c: char| seps.contains(c))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split on a regular expression
///
/// Interior empty segments are kept; a single trailing empty segment is
/// dropped.
pub fn split_regex(text: &str, pattern: &str) -> Result<Vec<String>> {
    let re = Regex::new(pattern)
        .map_err(|e| ValidationError::invalid_parameter("pattern", &e.to_string()))?;

    let mut parts: Vec<String> = re.split(text).map(str::to_string).collect();
    if parts.last().is_some_and(String::is_empty) {
        parts.pop();
    }
    Ok(parts)
}

/// Join `parts` with `sep` between each pair
pub fn join<S: AsRef<str>>(parts: &[S], sep: &str) -> String {
    let mut out = String::new();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            out.push_str(sep);
        }
        out.push_str(part.as_ref());
    }
    out
}

pub fn starts_with(text: &str, key: &str) -> bool {
    text.starts_with(key)
}

pub fn ends_with(text: &str, key: &str) -> bool {
    text.ends_with(key)
}

/// Ensure `path` ends with `/`
pub fn to_dir(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{path}/")
    }
}

/// Suffix a folder name with a date, as `<folder><Y><M><D>/`
///
/// Month and day are not zero padded, so 2024-03-07 becomes `202437`.
pub fn dated_folder(folder: &str, date: NaiveDate) -> String {
    let suffix = format!("{}{}{}", date.year(), date.month(), date.day());
    let base = folder.strip_suffix('/').unwrap_or(folder);
    format!("{base}{suffix}/")
}

/// [`dated_folder`] with today's local date
pub fn dated_folder_today(folder: &str) -> String {
    dated_folder(folder, Local::now().date_naive())
}

/// Replace every occurrence of every key in `line`
///
/// Keys are applied one after another in sorted order. Each scan resumes
/// after the inserted text, so a replacement containing its own key does not
/// loop.
pub fn replace_all(line: &str, replacements: &HashMap<String, String>) -> String {
    let mut keys: Vec<&String> = replacements.keys().filter(|k| !k.is_empty()).collect();
    keys.sort();

    let mut out = line.to_string();
    for key in keys {
        out = out.replace(key.as_str(), &replacements[key]);
    }
    out
}

/// Render a template file line by line
///
/// Lines starting with `#` are dropped; every other line gets
/// [`replace_all`] applied and is written to `dst` with a trailing newline.
pub fn file_replace(
    src: &Path,
    dst: &Path,
    replacements: &HashMap<String, String>,
) -> Result<()> {
    let input = File::open(src).map_err(|e| IoError::from_std(e).with_path(src))?;
    let output = File::create(dst).map_err(|e| IoError::from_std(e).with_path(dst))?;
    let mut writer = BufWriter::new(output);

    let mut written = 0usize;
    for line in BufReader::new(input).lines() {
        let line = line.map_err(|e| IoError::from_std(e).with_path(src))?;
        if line.starts_with('#') {
            continue;
        }
        writeln!(writer, "{}", replace_all(&line, replacements))
            .map_err(|e| IoError::from_std(e).with_path(dst))?;
        written += 1;
    }
    writer
        .flush()
        .map_err(|e| IoError::from_std(e).with_path(dst))?;

    log::debug!(
        "Rendered {} -> {} ({written} lines)",
        src.display(),
        dst.display()
    );
    Ok(())
}

/// Inner product over the common prefix of `a` and `b`
pub fn dot_product(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
