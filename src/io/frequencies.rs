// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Frequency list files: one frequency per line, in the order of the planes
//! of the input cubes. Each line may be an arithmetic expression with a unit
//! (e.g. "150 + 1.28*3 MHz"); frequencies without a unit are in Hz. Anything
//! after a '#' is a comment, and blank lines are ignored.

use std::path::Path;

use log::debug;
use vec1::Vec1;

use super::FrequencyFileError;
use crate::unit_parsing::parse_freq;

/// Read a frequency list file. The returned frequencies are in Hz.
pub fn parse_frequency_file(path: &Path) -> Result<Vec1<f64>, FrequencyFileError> {
    if !path.exists() {
        return Err(FrequencyFileError::DoesNotExist(path.to_path_buf()));
    }
    let contents = std::fs::read_to_string(path)?;
    let freqs = parse_frequencies(&contents)?;
    let freqs = Vec1::try_from_vec(freqs)
        .map_err(|_| FrequencyFileError::Empty(path.to_path_buf()))?;
    debug!(
        "Read {} frequencies from {} ({} Hz to {} Hz)",
        freqs.len(),
        path.display(),
        freqs.first(),
        freqs.last()
    );
    Ok(freqs)
}

/// Parse the contents of a frequency list file. Line numbers in errors start
/// at 1.
pub(crate) fn parse_frequencies(contents: &str) -> Result<Vec<f64>, FrequencyFileError> {
    let mut freqs = vec![];
    for (i, line) in contents.lines().enumerate() {
        let line_number = i + 1;
        let expression = match line.split_once('#') {
            Some((before_comment, _)) => before_comment,
            None => line,
        }
        .trim();
        if expression.is_empty() {
            continue;
        }

        let (freq, _) = parse_freq(expression).map_err(|err| FrequencyFileError::Parse {
            line_number,
            line: line.to_string(),
            err,
        })?;
        if !freq.is_finite() || freq <= 0.0 {
            return Err(FrequencyFileError::NotPositive {
                line_number,
                value: freq,
            });
        }
        freqs.push(freq);
    }
    Ok(freqs)
}
