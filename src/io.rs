//! Reading observations from line-delimited numeric sources.
//!
//! The format is plain text with one number per line, no header and no
//! delimiter. Blank lines are skipped; anything else that does not parse as
//! a finite `f64`, including bytes that are not UTF-8, is rejected with
//! [`Error::Parse`].

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Error, Result};

/// Parses every line of `reader` into an observation.
///
/// # Examples
/// ```
/// use distkit::io::read_observations;
/// let data = read_observations("1\n0\n 2.5 \n".as_bytes()).unwrap();
/// assert_eq!(data, vec![1.0, 0.0, 2.5]);
/// ```
pub fn read_observations<R: BufRead>(reader: R) -> Result<Vec<f64>> {
    let mut data = Vec::new();
    for (idx, raw) in reader.split(b'\n').enumerate() {
        let raw = raw?;
        let line = idx + 1;
        let text = std::str::from_utf8(&raw).map_err(|_| Error::Parse {
            line,
            content: String::from_utf8_lossy(&raw).trim().to_string(),
        })?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            continue;
        }
        let value = trimmed
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| Error::Parse {
                line,
                content: trimmed.to_string(),
            })?;
        data.push(value);
    }
    Ok(data)
}

/// Opens `path` and parses it with [`read_observations`].
pub fn read_observations_file<P: AsRef<Path>>(path: P) -> Result<Vec<f64>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let data = read_observations(BufReader::new(file))?;
    log::debug!("loaded {} observations from {}", data.len(), path.display());
    Ok(data)
}
