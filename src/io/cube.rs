// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Reading and writing three-dimensional FITS image cubes.

use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

use fitsio::{
    images::{ImageDescription, ImageType},
    FitsFile,
};
use log::debug;
use ndarray::prelude::*;

use super::{
    fits::{
        fits_get_image, fits_open, fits_open_hdu, fits_read_header, fits_write_header,
        fits_write_image,
    },
    CubeReadError, CubeWriteError, FitsHeader, Polarisation,
};
use crate::constants::POL_KEY;

/// Read the header of the primary HDU of a FITS file.
pub fn get_fits_header(path: &Path) -> Result<FitsHeader, CubeReadError> {
    if !path.exists() {
        return Err(CubeReadError::DoesNotExist(path.to_path_buf()));
    }
    let mut fptr = fits_open(path)?;
    let hdu = fits_open_hdu(&mut fptr, 0)?;
    let header = fits_read_header(&mut fptr, &hdu)?;
    Ok(header)
}

/// Read the primary image of a FITS file as a cube with dimensions (plane, y,
/// x), i.e. (NAXIS3, NAXIS2, NAXIS1). Axes beyond the third (e.g. a Stokes
/// axis) are dropped if they have length 1; any other shape is an error. The header is
/// returned alongside the data.
pub fn read_fits_cube(path: &Path) -> Result<(FitsHeader, Array3<f32>), CubeReadError> {
    if !path.exists() {
        return Err(CubeReadError::DoesNotExist(path.to_path_buf()));
    }
    let mut fptr = fits_open(path)?;
    let hdu = fits_open_hdu(&mut fptr, 0)?;
    let header = fits_read_header(&mut fptr, &hdu)?;

    let not_a_cube = |shape: Vec<usize>| CubeReadError::NotACube {
        file: path.to_path_buf(),
        shape,
    };
    let mut shape = header.axis_lengths().map_err(|_| not_a_cube(vec![]))?;
    // Slowest axis first, like ndarray.
    shape.reverse();
    let cube_shape = squeeze_to_cube(&shape).ok_or_else(|| not_a_cube(shape.clone()))?;

    let data: Vec<f32> = fits_get_image(&mut fptr, &hdu)?;
    let cube = Array3::from_shape_vec(cube_shape, data).map_err(|_| not_a_cube(shape))?;
    debug!("Read {} with shape {:?}", path.display(), cube.dim());
    Ok((header, cube))
}

/// Given an image shape (slowest axis first), drop the axes beyond the third
/// (NAXIS4 and up). These must all have length 1.
fn squeeze_to_cube(shape: &[usize]) -> Option<(usize, usize, usize)> {
    if shape.len() < 3 {
        return None;
    }
    let (extra, cube) = shape.split_at(shape.len() - 3);
    if extra.iter().any(|&d| d != 1) {
        return None;
    }
    match cube {
        &[planes, y, x] => Some((planes, y, x)),
        _ => None,
    }
}

/// Check that the axes of a header (NAXIS1 first) describe data with shape
/// (plane, y, x). Axes beyond the third must have length 1.
fn check_shape(axes: &[usize], data_shape: &[usize]) -> Result<(), CubeWriteError> {
    let matches = match (axes, data_shape) {
        ([x, y, planes, rest @ ..], [dp, dy, dx]) => {
            x == dx && y == dy && planes == dp && rest.iter().all(|&n| n == 1)
        }
        _ => false,
    };
    if matches {
        Ok(())
    } else {
        Err(CubeWriteError::ShapeMismatch {
            header: axes.to_vec(),
            data: data_shape.to_vec(),
        })
    }
}

/// The directory that a file will be written into.
fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Write a cube with dimensions (plane, y, x) as the primary image of a FITS
/// file, using `header` for everything except the keys that describe the
/// image layout. If `pol` is given, the header key POL is set to it. The
/// written BITPIX is always -32, as that's the type of the data.
///
/// The header is verified before anything is written. The file is first
/// written to a temporary file in the same directory and then renamed into
/// place, so an existing file is never left partially overwritten. Existing
/// files are only replaced if `force_overwrite` is true.
pub fn write_fits_cube(
    data: ArrayView3<f32>,
    header: &FitsHeader,
    path: &Path,
    pol: Option<Polarisation>,
    force_overwrite: bool,
) -> Result<(), CubeWriteError> {
    let (header, axes) = prepare_header(data, header, pol)?;

    let output_dir = parent_dir(path);
    if !output_dir.is_dir() {
        return Err(CubeWriteError::NoOutputDir(output_dir));
    }
    if path.exists() && !force_overwrite {
        return Err(CubeWriteError::AlreadyExists(path.to_path_buf()));
    }

    let tmp_dir = staging_dir(&output_dir)?;
    let tmp_file = tmp_dir
        .path()
        .join(path.file_name().unwrap_or_else(|| OsStr::new("cube.fits")));
    create_fits_cube(data, &header, &axes, &tmp_file)?;
    std::fs::rename(&tmp_file, path)?;
    debug!("Wrote {}", path.display());

    Ok(())
}

/// Verify `header` against the data it will be written with, and tag it with
/// `pol`. The header's axis lengths (NAXIS1 first) are returned too.
pub(super) fn prepare_header(
    data: ArrayView3<f32>,
    header: &FitsHeader,
    pol: Option<Polarisation>,
) -> Result<(FitsHeader, Vec<usize>), CubeWriteError> {
    header.verify()?;
    let axes = header.axis_lengths()?;
    check_shape(&axes, data.shape())?;

    let mut header = header.clone();
    if let Some(pol) = pol {
        header.set_with_comment(POL_KEY, pol.to_string(), "Polarisation");
    }
    Ok((header, axes))
}

/// A temporary directory inside `output_dir`, so that files written into it
/// can be renamed into `output_dir`.
pub(super) fn staging_dir(output_dir: &Path) -> Result<tempfile::TempDir, CubeWriteError> {
    let tmp_dir = tempfile::Builder::new()
        .prefix(".rmsynthesis-")
        .tempdir_in(output_dir)?;
    Ok(tmp_dir)
}

/// Create a new FITS file at `path` from a header prepared with
/// [`prepare_header`].
pub(super) fn create_fits_cube(
    data: ArrayView3<f32>,
    header: &FitsHeader,
    axes: &[usize],
    path: &Path,
) -> Result<(), CubeWriteError> {
    // fitsio wants the dimensions slowest axis first.
    let dimensions: Vec<usize> = axes.iter().rev().copied().collect();
    let description = ImageDescription {
        data_type: ImageType::Float,
        dimensions: &dimensions,
    };
    let mut fptr = FitsFile::create(path)
        .with_custom_primary(&description)
        .open()?;
    let hdu = fits_open_hdu(&mut fptr, 0)?;
    fits_write_header(&mut fptr, header)?;
    let flat: Vec<f32> = data.iter().copied().collect();
    fits_write_image(&mut fptr, &hdu, &flat)?;
    // The file is flushed and closed when fptr is dropped.
    Ok(())
}
