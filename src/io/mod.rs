// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! File stuff (input/output, reading/writing): FITS cubes and their headers,
//! RM synthesis products and frequency lists.

mod cube;
mod error;
mod fits;
mod frequencies;
mod header;
mod rmcube;
#[cfg(test)]
mod tests;

pub use cube::{get_fits_header, read_fits_cube, write_fits_cube};
pub use error::{CubeReadError, CubeWriteError, FitsError, FrequencyFileError, HeaderError};
pub use frequencies::parse_frequency_file;
pub use header::{add_phi_to_header, FitsHeader, HeaderCard, HeaderValue};
pub use rmcube::{rmcube_filename, write_rmcube, write_rmsf};

use strum_macros::{Display, EnumIter, EnumString};

/// The polarisation products written by RM synthesis. The real and imaginary
/// parts of the complex Faraday dispersion are Q and U, and P is its
/// amplitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
pub enum Polarisation {
    Q,
    U,
    P,
}
