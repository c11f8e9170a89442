// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Common arguments for command-line interfaces. Both the `dirty` and `rmsf`
//! subcommands need a Faraday-depth grid and an output directory, so the same
//! arguments are shared between them.

mod printers;

pub(super) use printers::InfoPrinter;

use std::path::PathBuf;

use clap::Parser;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

use crate::{
    constants::{DEFAULT_PHI_HIGH, DEFAULT_PHI_LOW, DEFAULT_PHI_STEP, MAX_PHI_SAMPLES},
    params::OutputParams,
};

lazy_static::lazy_static! {
    pub(super) static ref ARG_FILE_TYPES_COMMA_SEPARATED: String = ArgFileTypes::iter().join(", ");

    pub(super) static ref ARG_FILE_HELP: String =
        format!("All arguments may be specified in a file. Any CLI arguments override arguments set in the file. Supported formats: {}", *ARG_FILE_TYPES_COMMA_SEPARATED);

    static ref PHI_LOW_HELP: String =
        format!("The first Faraday depth of the grid [rad m^-2]. Default: {DEFAULT_PHI_LOW}");

    static ref PHI_HIGH_HELP: String =
        format!("The Faraday depth at which the grid stops; this value itself is not included [rad m^-2]. Default: {DEFAULT_PHI_HIGH}");

    static ref PHI_STEP_HELP: String =
        format!("The spacing of the Faraday-depth grid [rad m^-2]. Default: {DEFAULT_PHI_STEP}");
}

#[derive(Debug, Display, EnumIter, EnumString)]
pub(super) enum ArgFileTypes {
    #[strum(serialize = "toml")]
    Toml,
    #[strum(serialize = "json")]
    Json,
}

macro_rules! unpack_arg_file {
    ($arg_file:expr) => ({
        use std::{fs::File, io::Read, str::FromStr};

        use crate::cli::common::{ArgFileTypes, ARG_FILE_TYPES_COMMA_SEPARATED};

        debug!("Attempting to parse argument file {}", $arg_file.display());

        let mut contents = String::new();
        let arg_file_type = $arg_file
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .and_then(|e| ArgFileTypes::from_str(&e).ok());

        match arg_file_type {
            Some(ArgFileTypes::Toml) => {
                debug!("Parsing toml file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match toml::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(RmsynthesisError::ArgFile(format!(
                            "Couldn't decode toml structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }
            Some(ArgFileTypes::Json) => {
                debug!("Parsing json file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match serde_json::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(RmsynthesisError::ArgFile(format!(
                            "Couldn't decode json structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }

            _ => {
                return Err(RmsynthesisError::ArgFile(format!(
                    "Argument file '{:?}' doesn't have a recognised file extension! Valid extensions are: {}", $arg_file, *ARG_FILE_TYPES_COMMA_SEPARATED)
                ))
            }
        }
    });
}

/// The grid of trial Faraday depths. The grid starts at `phi_low` and
/// increases by `phi_step` for as long as values are below `phi_high`.
#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct PhiArgs {
    #[clap(long, allow_hyphen_values = true, help = PHI_LOW_HELP.as_str(), help_heading = "FARADAY DEPTHS")]
    pub(super) phi_low: Option<f64>,

    #[clap(long, allow_hyphen_values = true, help = PHI_HIGH_HELP.as_str(), help_heading = "FARADAY DEPTHS")]
    pub(super) phi_high: Option<f64>,

    #[clap(long, allow_hyphen_values = true, help = PHI_STEP_HELP.as_str(), help_heading = "FARADAY DEPTHS")]
    pub(super) phi_step: Option<f64>,
}

impl PhiArgs {
    pub(super) fn merge(self, other: Self) -> Self {
        Self {
            phi_low: self.phi_low.or(other.phi_low),
            phi_high: self.phi_high.or(other.phi_high),
            phi_step: self.phi_step.or(other.phi_step),
        }
    }

    /// Make the Faraday-depth grid. The grid must have at least 2 samples so
    /// that an output axis can be calibrated.
    pub(super) fn parse(self) -> Result<Vec<f64>, PhiArgsError> {
        let low = self.phi_low.unwrap_or(DEFAULT_PHI_LOW);
        let high = self.phi_high.unwrap_or(DEFAULT_PHI_HIGH);
        let step = self.phi_step.unwrap_or(DEFAULT_PHI_STEP);
        if !low.is_finite() || !high.is_finite() {
            return Err(PhiArgsError::NotFinite { low, high });
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(PhiArgsError::BadStep(step));
        }

        let num = ((high - low) / step).ceil().max(0.0);
        if !num.is_finite() || num > MAX_PHI_SAMPLES as f64 {
            return Err(PhiArgsError::TooManySamples { num });
        }
        let num = num as usize;
        let mut phi: Vec<f64> = (0..num).map(|i| low + i as f64 * step).collect();
        // Rounding can put the last sample on the (exclusive) upper bound.
        phi.retain(|&p| p < high);
        if phi.len() < 2 {
            return Err(PhiArgsError::TooFewSamples { low, high, step });
        }
        Ok(phi)
    }
}

#[derive(Error, Debug)]
pub(super) enum PhiArgsError {
    #[error("The Faraday-depth bounds must be finite; got {low} and {high}")]
    NotFinite { low: f64, high: f64 },

    #[error("The Faraday-depth step must be a positive number; got {0}")]
    BadStep(f64),

    #[error("The Faraday-depth grid from {low} to {high} (exclusive) with step {step} has fewer than 2 samples")]
    TooFewSamples { low: f64, high: f64, step: f64 },

    #[error("The Faraday-depth grid would have {num} samples; at most {max} are allowed", max = MAX_PHI_SAMPLES)]
    TooManySamples { num: f64 },
}

/// Where products are written.
#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct OutputArgs {
    /// The directory to write products into. It must already exist. Default:
    /// the current directory.
    #[clap(short, long, help_heading = "OUTPUT FILES")]
    pub(super) output_dir: Option<PathBuf>,

    /// Replace products that already exist in the output directory.
    #[clap(long, help_heading = "OUTPUT FILES")]
    #[serde(default)]
    pub(super) force_overwrite: bool,
}

impl OutputArgs {
    pub(super) fn merge(self, other: Self) -> Self {
        Self {
            output_dir: self.output_dir.or(other.output_dir),
            force_overwrite: self.force_overwrite || other.force_overwrite,
        }
    }

    pub(super) fn parse(self) -> OutputParams {
        OutputParams {
            output_dir: self.output_dir.unwrap_or_else(|| PathBuf::from(".")),
            force_overwrite: self.force_overwrite,
        }
    }
}

/// A summary of a Faraday-depth grid for an [`InfoPrinter`].
pub(super) fn phi_summary(phi: &[f64]) -> Vec<std::borrow::Cow<'static, str>> {
    match (phi.first(), phi.last()) {
        (Some(first), Some(last)) => {
            let step = if phi.len() > 1 {
                (last - first) / (phi.len() - 1) as f64
            } else {
                0.0
            };
            vec![
                format!("{} samples", phi.len()).into(),
                format!("{first} to {last} rad m^-2").into(),
                format!("Step: {step} rad m^-2").into(),
            ]
        }
        _ => vec!["No samples".into()],
    }
}
