use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::Error;
use crate::filter::Located;
use crate::poly::Point;

/// Forecast grid files are named `ETA40_p<issue>a<valid>.dat` with both
/// dates as ddmmyy.
pub const DATA_FILE_PREFIX: &str = "ETA40_p";

/// A forecast valid date. Ordering is calendar order (year, month, day),
/// not the ddmmyy digit order of the file names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ForecastDate {
    year: u16,
    month: u8,
    day: u8,
}

impl ForecastDate {
    pub fn parse_ddmmyy(s: &str) -> Result<ForecastDate, Error> {
        let b = s.as_bytes();
        if b.len() != 6 || !b.iter().all(|c| c.is_ascii_digit()) {
            return Err(Error::BadDate(s.to_string()));
        }
        let two = |i: usize| (b[i] - b'0') * 10 + (b[i + 1] - b'0');
        let (day, month, yy) = (two(0), two(2), two(4));
        if day < 1 || day > 31 || month < 1 || month > 12 {
            return Err(Error::BadDate(s.to_string()));
        }
        Ok(ForecastDate { year: 2000 + yy as u16, month, day })
    }
}

impl fmt::Display for ForecastDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}-{:02}", self.day, self.month, self.year % 100)
    }
}

/// One grid point of one forecast file. The value and date ride through the
/// polygon filter untouched.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub point: Point,
    pub value: f64,
    pub date: ForecastDate,
}

impl Located for Sample {
    fn location(&self) -> Point {
        self.point
    }
}

/// Reads every data file in `dir` matching the given issue date, in
/// valid-date order. Fails if none match.
pub fn read_forecast_dir(dir: &Path, issue_date: &str) -> Result<Vec<Sample>, Error> {
    ForecastDate::parse_ddmmyy(issue_date)?;
    let prefix = format!("{DATA_FILE_PREFIX}{issue_date}a");
    let mut files: Vec<(ForecastDate, PathBuf)> = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if let Some(tail) = name.strip_prefix(&prefix).and_then(|r| r.strip_suffix(".dat")) {
            files.push((ForecastDate::parse_ddmmyy(tail)?, entry.path()));
        }
    }
    if files.is_empty() {
        return Err(Error::NoForecastFiles(issue_date.to_string(), dir.to_path_buf()));
    }
    // read_dir order is platform-dependent
    files.sort();
    let mut samples = Vec::new();
    for (date, path) in &files {
        let n = samples.len();
        read_data_file(path, *date, &mut samples)?;
        info!("Read {} samples from {}", samples.len() - n, path.display());
    }
    Ok(samples)
}

/// Reads one whitespace-separated `lat long value` file, appending to `out`.
pub fn read_data_file(path: &Path, date: ForecastDate, out: &mut Vec<Sample>) -> Result<(), Error> {
    let raw = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_records(&raw, date, path, out)
}

fn parse_records(
    raw: &str,
    date: ForecastDate,
    path: &Path,
    out: &mut Vec<Sample>,
) -> Result<(), Error> {
    for (i, line) in raw.lines().enumerate() {
        let lineno = i + 1;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<f64> = line
            .split_whitespace()
            .map(|f| f.parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|e| Error::MalformedRecord {
                path: path.to_path_buf(),
                line: lineno,
                reason: e.to_string(),
            })?;
        if fields.len() != 3 {
            return Err(Error::MalformedRecord {
                path: path.to_path_buf(),
                line: lineno,
                reason: format!("expected 3 fields, got {}", fields.len()),
            });
        }
        let point = Point::new(fields[0], fields[1]);
        if !point.is_finite() {
            return Err(Error::InvalidPoint {
                path: path.to_path_buf(),
                line: lineno,
                x: point.x,
                y: point.y,
            });
        }
        out.push(Sample { point, value: fields[2], date });
    }
    Ok(())
}
