// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::Path;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::{debug, info};
use ndarray::prelude::*;
use vec1::Vec1;

use super::{rm_synthesis_output_filenames, write_rmsf_product, OutputParams, RmSynthesisError};
use crate::{
    io::{add_phi_to_header, read_fits_cube, write_rmcube, FitsHeader},
    synthesis::{FaradaySynthesis, ShapeError, WavelengthConverter},
    PROGRESS_BARS,
};

/// Everything needed to make dirty Faraday-dispersion cubes from Q and U
/// cubes.
#[derive(Debug)]
pub(crate) struct RmSynthesisParams {
    pub(crate) synthesis: FaradaySynthesis,

    /// The header of the Q cube; output headers are derived from it.
    pub(crate) q_header: FitsHeader,

    /// Stokes Q with axes (frequency, y, x).
    pub(crate) qcube: Array3<f32>,

    /// Stokes U with axes (frequency, y, x).
    pub(crate) ucube: Array3<f32>,

    pub(crate) output: OutputParams,
}

impl RmSynthesisParams {
    /// Read the Q and U cubes and check them against the frequencies. The
    /// output directory is checked too, so nothing is computed if the products
    /// can't be written.
    pub(crate) fn new(
        freqs: Vec1<f64>,
        phi: Vec<f64>,
        q_path: &Path,
        u_path: &Path,
        output: OutputParams,
    ) -> Result<RmSynthesisParams, RmSynthesisError> {
        if phi.len() < 2 {
            return Err(ShapeError::PhiTooShort { len: phi.len() }.into());
        }

        info!("Reading Q cube {}", q_path.display());
        let (q_header, qcube) = read_fits_cube(q_path)?;
        info!("Reading U cube {}", u_path.display());
        let (_, ucube) = read_fits_cube(u_path)?;
        if qcube.dim() != ucube.dim() {
            return Err(ShapeError::QuMismatch {
                q: qcube.shape().to_vec(),
                u: ucube.shape().to_vec(),
            }
            .into());
        }
        // The frequency axis must be the third axis of the header; the
        // Faraday-depth axis of the outputs replaces it.
        let header_planes = q_header.get_i64("NAXIS3").unwrap_or(0);
        if qcube.len_of(Axis(0)) != freqs.len() || header_planes != freqs.len() as i64 {
            return Err(ShapeError::FrequencyCount {
                planes: qcube.len_of(Axis(0)),
                freqs: freqs.len(),
            }
            .into());
        }

        output.check(&rm_synthesis_output_filenames())?;

        let synthesis = FaradaySynthesis::new(WavelengthConverter::default(), freqs, phi);
        debug!(
            "Reference wavelength-squared: {} m^2",
            synthesis.reference_lambda_sq()
        );

        Ok(RmSynthesisParams {
            synthesis,
            q_header,
            qcube,
            ucube,
            output,
        })
    }

    pub(crate) fn run(&self) -> Result<(), RmSynthesisError> {
        let Self {
            synthesis,
            q_header,
            qcube,
            ucube,
            output,
        } = self;

        write_rmsf_product(synthesis, output)?;

        let pb = ProgressBar::with_draw_target(
            Some(synthesis.phi().len() as _),
            if PROGRESS_BARS.load() {
                ProgressDrawTarget::stdout()
            } else {
                ProgressDrawTarget::hidden()
            },
        )
        .with_style(
            ProgressStyle::default_bar()
                .template("{msg:17}: [{wide_bar:.blue}] {pos:3}/{len:3} phi planes ({elapsed_precise}<{eta_precise})").unwrap()
                .progress_chars("=> "),
        )
        .with_position(0)
        .with_message("RM synthesis");
        pb.tick();
        let rmcube = synthesis.dirty(qcube.view(), ucube.view(), Some(&pb))?;
        pb.abandon_with_message("Finished RM synthesis");

        let mut header = add_phi_to_header(q_header, synthesis.phi())?;
        header.set_with_comment(
            "SOFTWARE",
            format!("rmsynthesis {}", env!("CARGO_PKG_VERSION")),
            "Software that created this file",
        );
        write_rmcube(
            rmcube.view(),
            &header,
            &output.output_dir,
            output.force_overwrite,
        )?;

        Ok(())
    }
}
