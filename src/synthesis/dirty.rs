// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Direct synthesis of the dirty Faraday-dispersion cube.

use indicatif::ProgressBar;
use log::debug;
use ndarray::{prelude::*, Zip};
use rayon::prelude::*;

use super::{FaradaySynthesis, ShapeError};
use crate::c64;

impl FaradaySynthesis {
    /// Transform Stokes Q and U cubes (axes: frequency, y, x) into a dirty
    /// Faraday-dispersion cube (axes: phi, y, x).
    ///
    /// For every pixel, P(λ²) = Q + iU is derotated to the reference
    /// wavelength-squared for each phi and averaged over frequency. Pixels
    /// never mix. Each phi plane is computed by its own rayon task; if a
    /// progress bar is supplied, it is incremented once per phi plane.
    pub fn dirty<F>(
        &self,
        qcube: ArrayView3<F>,
        ucube: ArrayView3<F>,
        progress_bar: Option<&ProgressBar>,
    ) -> Result<Array3<c64>, ShapeError>
    where
        F: Copy + Into<f64> + Sync,
    {
        if qcube.shape() != ucube.shape() {
            return Err(ShapeError::QuMismatch {
                q: qcube.shape().to_vec(),
                u: ucube.shape().to_vec(),
            });
        }
        let (num_planes, num_y, num_x) = qcube.dim();
        if num_planes != self.freqs.len() {
            return Err(ShapeError::FrequencyCount {
                planes: num_planes,
                freqs: self.freqs.len(),
            });
        }
        debug!(
            "Dirty synthesis over {} phi planes, {num_planes} frequencies and {num_y}x{num_x} pixels",
            self.phi.len()
        );

        // Uniform weights.
        let weight = 1.0 / num_planes as f64;
        let phases = self.derotation_phases();
        let mut rmcube = Array3::zeros((self.phi.len(), num_y, num_x));
        rmcube
            .outer_iter_mut()
            .into_par_iter()
            .zip(phases.outer_iter().into_par_iter())
            .for_each(|(mut rm_plane, phases_f)| {
                for ((q_plane, u_plane), &phase) in qcube
                    .outer_iter()
                    .zip(ucube.outer_iter())
                    .zip(phases_f.iter())
                {
                    let phase = phase * weight;
                    Zip::from(&mut rm_plane)
                        .and(&q_plane)
                        .and(&u_plane)
                        .for_each(|rm, &q, &u| {
                            *rm += c64::new(q.into(), u.into()) * phase;
                        });
                }

                if let Some(pb) = progress_bar {
                    pb.inc(1);
                }
            });

        Ok(rmcube)
    }
}

/// Compute the dirty Faraday-dispersion cube of Q and U cubes (axes:
/// frequency, y, x) with the given frequencies \[Hz\] and Faraday-depth grid
/// `phi` \[rad m^-2\], using the standard speed of light.
pub fn rmsynthesis_dirty<F>(
    qcube: ArrayView3<F>,
    ucube: ArrayView3<F>,
    freqs: &[f64],
    phi: &[f64],
) -> Result<Array3<c64>, ShapeError>
where
    F: Copy + Into<f64> + Sync,
{
    FaradaySynthesis::from_slices(freqs, phi)?.dirty(qcube, ucube, None)
}
