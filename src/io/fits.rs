// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Helper functions for reading and writing FITS files.

use std::{
    ffi::{CStr, CString},
    fmt::Display,
    os::raw::c_char,
    panic::Location,
    path::Path,
    ptr,
};

use fitsio::{errors::check_status as fits_check_status, hdu::*, FitsFile};
use log::{trace, warn};

use super::{
    header::{is_structural_key, HeaderValue},
    FitsError, FitsHeader,
};

/// The length of a header card, plus a terminating nul.
const CARD_BUFFER_LEN: usize = 81;

/// Open a fits file.
#[track_caller]
pub(crate) fn fits_open<P: AsRef<Path>>(file: P) -> Result<FitsFile, FitsError> {
    FitsFile::open(file.as_ref()).map_err(|e| {
        let caller = Location::caller();
        FitsError::Open {
            fits_error: Box::new(e),
            fits_filename: file.as_ref().to_path_buf().into_boxed_path(),
            source_file: caller.file(),
            source_line: caller.line(),
            source_column: caller.column(),
        }
    })
}

/// Open a fits file's HDU. This also makes the HDU the current HDU of the file
/// pointer.
#[track_caller]
pub(crate) fn fits_open_hdu<T: DescribesHdu + Display + Copy>(
    fits_fptr: &mut FitsFile,
    hdu_description: T,
) -> Result<FitsHdu, FitsError> {
    fits_fptr.hdu(hdu_description).map_err(|e| {
        let caller = Location::caller();
        FitsError::Fitsio {
            fits_error: Box::new(e),
            fits_filename: fits_fptr.file_path().to_path_buf().into_boxed_path(),
            hdu_description: format!("{hdu_description}").into_boxed_str(),
            source_file: caller.file(),
            source_line: caller.line(),
            source_column: caller.column(),
        }
    })
}

/// Given a FITS file pointer and a HDU, read the associated image.
#[track_caller]
pub(crate) fn fits_get_image<T: fitsio::images::ReadImage>(
    fits_fptr: &mut FitsFile,
    hdu: &FitsHdu,
) -> Result<T, FitsError> {
    match &hdu.info {
        HduInfo::ImageInfo { .. } => hdu.read_image(fits_fptr).map_err(|e| {
            let caller = Location::caller();
            FitsError::Fitsio {
                fits_error: Box::new(e),
                fits_filename: fits_fptr.file_path().to_path_buf().into_boxed_path(),
                hdu_description: format!("{}", hdu.number + 1).into_boxed_str(),
                source_file: caller.file(),
                source_line: caller.line(),
                source_column: caller.column(),
            }
        }),
        _ => {
            let caller = Location::caller();
            Err(FitsError::NotImage {
                fits_filename: fits_fptr.file_path().to_path_buf().into_boxed_path(),
                hdu_num: hdu.number + 1,
                source_file: caller.file(),
                source_line: caller.line(),
                source_column: caller.column(),
            })
        }
    }
}

/// Given a FITS file pointer and a HDU, write the image.
#[track_caller]
pub(crate) fn fits_write_image<T: fitsio::images::WriteImage>(
    fits_fptr: &mut FitsFile,
    hdu: &FitsHdu,
    data: &[T],
) -> Result<(), FitsError> {
    match &hdu.info {
        HduInfo::ImageInfo { .. } => hdu.write_image(fits_fptr, data).map_err(|e| {
            let caller = Location::caller();
            FitsError::Fitsio {
                fits_error: Box::new(e),
                fits_filename: fits_fptr.file_path().to_path_buf().into_boxed_path(),
                hdu_description: format!("{}", hdu.number + 1).into_boxed_str(),
                source_file: caller.file(),
                source_line: caller.line(),
                source_column: caller.column(),
            }
        }),
        _ => {
            let caller = Location::caller();
            Err(FitsError::NotImage {
                fits_filename: fits_fptr.file_path().to_path_buf().into_boxed_path(),
                hdu_num: hdu.number + 1,
                source_file: caller.file(),
                source_line: caller.line(),
                source_column: caller.column(),
            })
        }
    }
}

/// Given a FITS file pointer, and a keyword to a long string keyword that may
/// or may not exist, pull out the long string of the keyword. This deals with
/// FITSs CONTINUE mechanism by calling a low level fits function.
#[track_caller]
pub(crate) fn fits_get_optional_key_long_string(
    fits_fptr: &mut FitsFile,
    hdu: &FitsHdu,
    keyword: &str,
) -> Result<Option<String>, FitsError> {
    let caller = Location::caller();
    let long_string_error = |fits_fptr: &FitsFile| FitsError::LongString {
        key: keyword.to_string().into_boxed_str(),
        fits_filename: fits_fptr.file_path().to_path_buf().into_boxed_path(),
        hdu_num: hdu.number + 1,
        source_file: caller.file(),
        source_line: caller.line(),
        source_column: caller.column(),
    };

    let keyword_ffi = CString::new(keyword).map_err(|_| long_string_error(fits_fptr))?;
    let long_string = unsafe {
        let mut status = 0;
        let mut long_string_ptr = ptr::null_mut();
        // ffgkls = fits_read_key_longstr
        fitsio_sys::ffgkls(
            fits_fptr.as_raw(),
            keyword_ffi.as_ptr(),
            &mut long_string_ptr,
            ptr::null_mut(),
            &mut status,
        );
        match status {
            0 => {
                let long_string = CStr::from_ptr(long_string_ptr)
                    .to_string_lossy()
                    .into_owned();
                // Free the cfitsio-allocated string. The status code passed
                // isn't useful.
                // fffree = fits_free_memory
                fitsio_sys::fffree(long_string_ptr.cast(), &mut 0);
                Some(long_string)
            }
            202 | 204 => None,
            _ => return Err(long_string_error(fits_fptr)),
        }
    };

    Ok(long_string)
}

/// Read every card of the supplied HDU into a [`FitsHeader`]. The HDU must be
/// the current HDU of the file pointer (e.g. it has just been opened with
/// [`fits_open_hdu`]).
///
/// Cards with undefined values are skipped. Long strings are reassembled from
/// their CONTINUE cards.
#[track_caller]
pub(crate) fn fits_read_header(
    fits_fptr: &mut FitsFile,
    hdu: &FitsHdu,
) -> Result<FitsHeader, FitsError> {
    let caller = Location::caller();
    let mut status = 0;
    let mut num_cards = 0;
    unsafe {
        // ffghsp = fits_get_hdrspace
        fitsio_sys::ffghsp(
            fits_fptr.as_raw(),
            &mut num_cards,
            ptr::null_mut(),
            &mut status,
        );
    }
    fits_check_status(status).map_err(|e| FitsError::Fitsio {
        fits_error: Box::new(e),
        fits_filename: fits_fptr.file_path().to_path_buf().into_boxed_path(),
        hdu_description: format!("{}", hdu.number + 1).into_boxed_str(),
        source_file: caller.file(),
        source_line: caller.line(),
        source_column: caller.column(),
    })?;

    let mut header = FitsHeader::new();
    for card_num in 1..=num_cards {
        let mut key_buffer: [c_char; CARD_BUFFER_LEN] = [0; CARD_BUFFER_LEN];
        let mut value_buffer: [c_char; CARD_BUFFER_LEN] = [0; CARD_BUFFER_LEN];
        let mut comment_buffer: [c_char; CARD_BUFFER_LEN] = [0; CARD_BUFFER_LEN];
        let (key, value, comment) = unsafe {
            // ffgkyn = fits_read_keyn
            fitsio_sys::ffgkyn(
                fits_fptr.as_raw(),
                card_num,
                key_buffer.as_mut_ptr(),
                value_buffer.as_mut_ptr(),
                comment_buffer.as_mut_ptr(),
                &mut status,
            );
            fits_check_status(status).map_err(|e| FitsError::Card {
                card_num: card_num as usize,
                fits_error: Box::new(e),
                fits_filename: fits_fptr.file_path().to_path_buf().into_boxed_path(),
                hdu_num: hdu.number + 1,
                source_file: caller.file(),
                source_line: caller.line(),
                source_column: caller.column(),
            })?;
            (
                CStr::from_ptr(key_buffer.as_ptr())
                    .to_string_lossy()
                    .trim()
                    .to_uppercase(),
                CStr::from_ptr(value_buffer.as_ptr())
                    .to_string_lossy()
                    .into_owned(),
                CStr::from_ptr(comment_buffer.as_ptr())
                    .to_string_lossy()
                    .trim_end()
                    .to_string(),
            )
        };

        match key.as_str() {
            "COMMENT" => header.add_comment(comment),
            "HISTORY" => header.add_history(comment),
            "" | "CONTINUE" | "END" => (),
            _ => match HeaderValue::parse(&value) {
                Some(HeaderValue::String(s)) if s.ends_with('&') => {
                    let long_string = fits_get_optional_key_long_string(fits_fptr, hdu, &key)?
                        .unwrap_or(s);
                    header.set_card(&key, long_string.into(), non_empty(comment));
                }
                Some(v) => header.set_card(&key, v, non_empty(comment)),
                None => trace!("Skipping header key '{key}'; its value '{value}' is undefined or unrecognised"),
            },
        }
    }

    Ok(header)
}

fn is_fits_standard_comment(comment: &str) -> bool {
    let comment = comment.trim();
    comment.starts_with("FITS (Flexible Image Transport System) format is defined in")
        || comment.starts_with("and Astrophysics', volume 376, page 359")
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Write all non-structural cards of a [`FitsHeader`] to the current HDU of a
/// FITS file pointer, followed by its COMMENT and HISTORY cards. Structural
/// keys (e.g. BITPIX, NAXISn) are expected to have been written when the HDU
/// was created.
pub(crate) fn fits_write_header(
    fits_fptr: &mut FitsFile,
    header: &FitsHeader,
) -> Result<(), fitsio::errors::Error> {
    let mut status = 0;

    // Signal that we may be using long strings.
    if header
        .iter()
        .any(|(_, card)| matches!(&card.value, HeaderValue::String(s) if s.len() > 68))
    {
        unsafe {
            // ffplsw = fits_write_key_longwarn
            fitsio_sys::ffplsw(fits_fptr.as_raw(), &mut status);
        }
        fits_check_status(status)?;
    }

    for (key, card) in header.iter().filter(|(key, _)| !is_structural_key(key)) {
        let key_name = CString::new(key)?;
        let comment = card.comment.as_deref().map(CString::new).transpose()?;
        let comment_ptr = comment.as_ref().map(|c| c.as_ptr()).unwrap_or(ptr::null());
        match &card.value {
            HeaderValue::Logical(b) => unsafe {
                // ffpkyl = fits_write_key_log
                fitsio_sys::ffpkyl(
                    fits_fptr.as_raw(),
                    key_name.as_ptr(),
                    (*b).into(),
                    comment_ptr,
                    &mut status,
                );
            },
            HeaderValue::Integer(i) => unsafe {
                // ffpkyj = fits_write_key_lng
                fitsio_sys::ffpkyj(
                    fits_fptr.as_raw(),
                    key_name.as_ptr(),
                    *i,
                    comment_ptr,
                    &mut status,
                );
            },
            HeaderValue::Float(f) if !f.is_finite() => {
                warn!("Not writing header key '{key}', as its value ({f}) isn't finite");
            }
            HeaderValue::Float(f) => unsafe {
                // ffpkyd = fits_write_key_dbl; a negative "decim" selects the
                // G format with 15 significant digits.
                fitsio_sys::ffpkyd(
                    fits_fptr.as_raw(),
                    key_name.as_ptr(),
                    *f,
                    -15,
                    comment_ptr,
                    &mut status,
                );
            },
            HeaderValue::String(s) => {
                let value = CString::new(s.as_str())?;
                unsafe {
                    // ffpkls = fits_write_key_longstr
                    fitsio_sys::ffpkls(
                        fits_fptr.as_raw(),
                        key_name.as_ptr(),
                        value.as_ptr(),
                        comment_ptr,
                        &mut status,
                    );
                }
            }
        }
        fits_check_status(status)?;
    }

    // cfitsio writes its own reference to the FITS standard when an image is
    // created; don't duplicate it.
    for comment in header
        .comments()
        .iter()
        .filter(|c| !is_fits_standard_comment(c))
    {
        let comm = CString::new(comment.as_str())?;
        unsafe {
            // ffpcom = fits_write_comment
            fitsio_sys::ffpcom(fits_fptr.as_raw(), comm.as_ptr(), &mut status);
        }
        fits_check_status(status)?;
    }
    for history in header.history() {
        let hist = CString::new(history.as_str())?;
        unsafe {
            // ffphis = fits_write_history
            fitsio_sys::ffphis(fits_fptr.as_raw(), hist.as_ptr(), &mut status);
        }
        fits_check_status(status)?;
    }

    Ok(())
}
