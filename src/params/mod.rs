// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parameters for the jobs that `rmsynthesis` runs.
//!
//! The code here is kind of "mirroring" the code within the `cli` module; the
//! idea is that `cli` is unparsed, user-facing code, whereas parameters have
//! been parsed and are ready to be used directly.

mod rm_synthesis;
mod rmsf;

pub(crate) use rm_synthesis::RmSynthesisParams;
pub(crate) use rmsf::RmsfParams;

use std::path::{Path, PathBuf};

use log::{info, warn};
use strum::IntoEnumIterator;
use thiserror::Error;

use crate::{
    constants::RMSF_FILENAME,
    io::{rmcube_filename, write_rmsf, CubeReadError, CubeWriteError, Polarisation},
    synthesis::{FaradaySynthesis, ShapeError},
};

/// Where products are written.
#[derive(Debug, Clone)]
pub(crate) struct OutputParams {
    pub(crate) output_dir: PathBuf,

    /// Replace files that already exist?
    pub(crate) force_overwrite: bool,
}

impl OutputParams {
    /// Check that the output directory exists and, unless overwriting is
    /// allowed, that none of the named files already exist in it.
    pub(crate) fn check<S: AsRef<Path>>(&self, filenames: &[S]) -> Result<(), CubeWriteError> {
        if !self.output_dir.is_dir() {
            return Err(CubeWriteError::NoOutputDir(self.output_dir.clone()));
        }
        if !self.force_overwrite {
            for filename in filenames {
                let path = self.output_dir.join(filename);
                if path.exists() {
                    return Err(CubeWriteError::AlreadyExists(path));
                }
            }
        }
        Ok(())
    }
}

/// All of the files that RM synthesis writes into an output directory.
pub(crate) fn rm_synthesis_output_filenames() -> Vec<String> {
    Polarisation::iter()
        .map(rmcube_filename)
        .chain(std::iter::once(RMSF_FILENAME.to_string()))
        .collect()
}

/// Report the resolution of the RMSF, then compute it and write it out.
fn write_rmsf_product(
    synthesis: &FaradaySynthesis,
    output: &OutputParams,
) -> Result<PathBuf, RmSynthesisError> {
    let props = synthesis.rmsf_properties();
    info!("RMSF properties:");
    info!("  FWHM:                      {:.3} rad m^-2", props.fwhm);
    info!("  Largest detectable scale:  {:.3} rad m^-2", props.max_scale);
    info!("  Largest detectable |phi|:  {:.3} rad m^-2", props.max_phi);
    if let (Some(first), Some(last)) = (synthesis.phi().first(), synthesis.phi().last()) {
        if first.abs().max(last.abs()) > props.max_phi {
            warn!("The Faraday-depth grid extends beyond the largest detectable |phi|");
        }
    }

    let rmsf = synthesis.rmsf();
    let path = write_rmsf(
        synthesis.phi(),
        rmsf.view(),
        &output.output_dir,
        output.force_overwrite,
    )?;
    Ok(path)
}

#[derive(Error, Debug)]
pub(crate) enum RmSynthesisError {
    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    CubeRead(#[from] CubeReadError),

    #[error(transparent)]
    CubeWrite(#[from] CubeWriteError),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
