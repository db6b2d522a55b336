///! Two-line element set locator
///!
///! Pulls the first complete TLE out of an upstream catalog response. The text
///! may hold any number of records, each either two data lines or a name line
///! followed by two data lines, with blank lines sprinkled anywhere.

use satlink_common::ElementRecord;
use thiserror::Error;

const LINE1_MARKER: &str = "1 ";
const LINE2_MARKER: &str = "2 ";
const NAME_MARKER: &str = "0 ";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocateError {
    #[error("no complete two-line element set found")]
    NoRecord,
}

fn is_data_line(line: &str) -> bool {
    line.starts_with(LINE1_MARKER) || line.starts_with(LINE2_MARKER)
}

/// Locate the first TLE in `text`.
///
/// Lines end at `\n`, `\r\n` or a bare `\r`. Blank lines are dropped before any
/// position arithmetic, so surrounding or interleaved blank lines never change
/// the result. A "1 " line that is not directly followed by a "2 " line is
/// skipped as noise.
///
/// The line just before the record becomes its name unless it is itself a data
/// line; a leading "0 " designator is removed. Without a usable name line,
/// `fallback_name` is used. `raw` carries `text` unchanged.
pub fn locate_record(text: &str, fallback_name: &str) -> Result<ElementRecord, LocateError> {
    let lines: Vec<&str> = text
        .split(['\n', '\r'])
        .filter(|line| !line.trim().is_empty())
        .collect();

    let index = lines
        .windows(2)
        .position(|pair| pair[0].starts_with(LINE1_MARKER) && pair[1].starts_with(LINE2_MARKER))
        .ok_or(LocateError::NoRecord)?;

    let name = index
        .checked_sub(1)
        .map(|prev| lines[prev])
        .filter(|line| !is_data_line(line))
        .and_then(name_from_line)
        .unwrap_or_else(|| fallback_name.to_string());

    Ok(ElementRecord {
        name,
        line1: lines[index].trim().to_string(),
        line2: lines[index + 1].trim().to_string(),
        raw: text.to_string(),
    })
}

/// Name carried by a title line, `None` if nothing is left after stripping
fn name_from_line(line: &str) -> Option<String> {
    let line = line.trim_start();
    let name = line.strip_prefix(NAME_MARKER).unwrap_or(line).trim();
    (!name.is_empty()).then(|| name.to_string())
}
