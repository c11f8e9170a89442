// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Writing the products of RM synthesis: the dirty Faraday-dispersion cubes
//! and the RMSF.

use std::{
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use log::info;
use ndarray::prelude::*;
use strum::IntoEnumIterator;

use super::{
    cube::{create_fits_cube, prepare_header, staging_dir},
    CubeWriteError, FitsHeader, Polarisation,
};
use crate::{c64, constants::RMSF_FILENAME};

/// The name of the dirty cube file for a polarisation, e.g.
/// "q-rmcube-dirty.fits".
pub fn rmcube_filename(pol: Polarisation) -> String {
    format!("{}-rmcube-dirty.fits", pol.to_string().to_lowercase())
}

/// Write a complex Faraday-dispersion cube with dimensions (phi, y, x) as
/// three real cubes in `output_dir`: the real part (Q), the imaginary part (U)
/// and the amplitude (P). Each file's POL header key identifies its
/// polarisation.
///
/// `header` should already have its third axis describing Faraday depth (see
/// [`add_phi_to_header`](super::add_phi_to_header)). Unless `force_overwrite`
/// is true, nothing is written if any of the three files already exists.
///
/// All three cubes are written into a temporary directory inside
/// `output_dir` before any of them is moved into place. If writing any of them
/// fails, the existing files in `output_dir` are left untouched.
pub fn write_rmcube(
    rmcube: ArrayView3<c64>,
    header: &FitsHeader,
    output_dir: &Path,
    force_overwrite: bool,
) -> Result<Vec<PathBuf>, CubeWriteError> {
    if !output_dir.is_dir() {
        return Err(CubeWriteError::NoOutputDir(output_dir.to_path_buf()));
    }
    let paths: Vec<PathBuf> = Polarisation::iter()
        .map(|pol| output_dir.join(rmcube_filename(pol)))
        .collect();
    for path in &paths {
        if path.is_dir() {
            return Err(CubeWriteError::NotAFile(path.clone()));
        }
        if path.exists() && !force_overwrite {
            return Err(CubeWriteError::AlreadyExists(path.clone()));
        }
    }

    let tmp_dir = staging_dir(output_dir)?;
    let mut staged = Vec::with_capacity(paths.len());
    for (pol, path) in Polarisation::iter().zip(paths.iter()) {
        let plane_values = match pol {
            Polarisation::Q => rmcube.mapv(|v| v.re as f32),
            Polarisation::U => rmcube.mapv(|v| v.im as f32),
            Polarisation::P => rmcube.mapv(|v| v.norm() as f32),
        };
        let (header, axes) = prepare_header(plane_values.view(), header, Some(pol))?;
        let tmp_file = tmp_dir.path().join(rmcube_filename(pol));
        create_fits_cube(plane_values.view(), &header, &axes, &tmp_file)?;
        staged.push((tmp_file, path));
    }

    for (tmp_file, path) in staged {
        std::fs::rename(tmp_file, path)?;
        info!("Wrote {}", path.display());
    }

    Ok(paths)
}

/// Write the RMSF as text into `output_dir`, one "phi real imaginary" line
/// per Faraday depth.
pub fn write_rmsf(
    phi: &[f64],
    rmsf: ArrayView1<c64>,
    output_dir: &Path,
    force_overwrite: bool,
) -> Result<PathBuf, CubeWriteError> {
    if phi.len() != rmsf.len() {
        return Err(CubeWriteError::RmsfLength {
            phi: phi.len(),
            rmsf: rmsf.len(),
        });
    }
    if !output_dir.is_dir() {
        return Err(CubeWriteError::NoOutputDir(output_dir.to_path_buf()));
    }
    let path = output_dir.join(RMSF_FILENAME);
    if path.exists() && !force_overwrite {
        return Err(CubeWriteError::AlreadyExists(path));
    }

    let tmp_file = tempfile::Builder::new()
        .prefix(".rmsynthesis-")
        .tempfile_in(output_dir)?;
    {
        let mut writer = BufWriter::new(tmp_file.as_file());
        for (phi, value) in phi.iter().zip(rmsf.iter()) {
            writeln!(writer, "{phi} {} {}", value.re, value.im)?;
        }
        writer.flush()?;
    }
    tmp_file.persist(&path).map_err(|e| e.error)?;
    info!("Wrote {}", path.display());

    Ok(path)
}
