// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

All constants *must* be double precision. Faraday-depth calculations are very
sensitive to the precision of wavelength-squared values.
 */

/// Speed of light \[metres/second\].
pub const VEL_C: f64 = 299_792_458.0;

/// The default lower bound of the Faraday-depth grid \[rad m^-2\].
pub(crate) const DEFAULT_PHI_LOW: f64 = -100.0;

/// The default (exclusive) upper bound of the Faraday-depth grid \[rad
/// m^-2\].
pub(crate) const DEFAULT_PHI_HIGH: f64 = 100.0;

/// The default spacing of the Faraday-depth grid \[rad m^-2\].
pub(crate) const DEFAULT_PHI_STEP: f64 = 1.0;

/// The largest number of samples allowed in a Faraday-depth grid.
pub(crate) const MAX_PHI_SAMPLES: usize = 1_000_000;

/// The FITS key used to tag a cube with its polarisation.
pub(crate) const POL_KEY: &str = "POL";

/// The name of the RMSF text file written into output directories.
pub(crate) const RMSF_FILENAME: &str = "rmsf.txt";
