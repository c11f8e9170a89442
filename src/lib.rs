// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Faraday rotation measure synthesis of Stokes Q/U image cubes.

Frequency planes of linearly-polarised emission are transformed into a "dirty"
Faraday-dispersion cube over a grid of trial Faraday depths, alongside the
rotation measure spread function (RMSF) implied by the frequency sampling.
 */

mod cli;
mod constants;
mod math;
mod params;
mod unit_parsing;

pub mod io;
pub mod synthesis;

// Re-exports.
pub use cli::{Rmsynthesis, RmsynthesisError};
pub use constants::VEL_C;
pub use synthesis::{
    as_wavelength_squared, compute_rmsf, phase, reference_wavelength_squared,
    rmsynthesis_dirty, rmsynthesis_phases, FaradaySynthesis, RmsfProperties, ShapeError,
    WavelengthConverter,
};

use crossbeam_utils::atomic::AtomicCell;

/// Are progress bars being drawn? This should only ever be enabled by CLI code.
pub(crate) static PROGRESS_BARS: AtomicCell<bool> = AtomicCell::new(false);

/// Complex 64-bit float, used for everything in Faraday-depth space.
#[allow(non_camel_case_types)]
pub type c64 = num_complex::Complex<f64>;
