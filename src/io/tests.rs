// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::{fs::File, io::Write, path::Path};

use approx::assert_abs_diff_eq;
use fitsio::{
    images::{ImageDescription, ImageType},
    FitsFile,
};
use ndarray::prelude::*;
use tempfile::TempDir;

use super::*;
use crate::{c64, synthesis::ShapeError};

/// A minimal header for a (planes, y, x) cube.
fn cube_header(planes: usize, y: usize, x: usize) -> FitsHeader {
    let mut header = FitsHeader::new();
    header.set("SIMPLE", true);
    header.set("BITPIX", -32);
    header.set("NAXIS", 3);
    header.set("NAXIS1", x);
    header.set("NAXIS2", y);
    header.set("NAXIS3", planes);
    header.set_with_comment("CTYPE1", "RA---SIN", "Right ascension");
    header.set("CTYPE2", "DEC--SIN");
    header.set("CTYPE3", "FREQ");
    header.set("CRVAL3", 1.3e8);
    header.set("OBJECT", "3C 196");
    header.add_comment("A test comment");
    header.add_history("Made by a test");
    header
}

fn test_cube(planes: usize, y: usize, x: usize) -> Array3<f32> {
    Array3::from_shape_fn((planes, y, x), |(p, j, i)| {
        (p * 100 + j * 10 + i) as f32 * 0.25 - 3.0
    })
}

fn write_text(path: &Path, contents: &str) {
    let mut file = File::create(path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
}

#[test]
fn test_header_value_parse() {
    assert_eq!(
        HeaderValue::parse("'Q       '"),
        Some(HeaderValue::String("Q".to_string()))
    );
    assert_eq!(
        HeaderValue::parse("'it''s'"),
        Some(HeaderValue::String("it's".to_string()))
    );
    assert_eq!(HeaderValue::parse("T"), Some(HeaderValue::Logical(true)));
    assert_eq!(HeaderValue::parse(" F "), Some(HeaderValue::Logical(false)));
    assert_eq!(HeaderValue::parse("-32"), Some(HeaderValue::Integer(-32)));
    assert_eq!(HeaderValue::parse("-10."), Some(HeaderValue::Float(-10.0)));
    assert_eq!(HeaderValue::parse("1.3E+08"), Some(HeaderValue::Float(1.3e8)));
    assert_eq!(HeaderValue::parse("2.5D-3"), Some(HeaderValue::Float(2.5e-3)));
    assert_eq!(HeaderValue::parse(""), None);
    assert_eq!(HeaderValue::parse("(1.0, 2.0)"), None);
}

#[test]
fn test_header_keys_are_case_insensitive() {
    let mut header = FitsHeader::new();
    header.set("object", "M31");
    assert_eq!(header.get_str("OBJECT"), Some("M31"));
    assert!(header.contains_key("Object"));

    // Setting an existing key keeps its position and comment.
    header.set_with_comment("BUNIT", "Jy/beam", "Brightness unit");
    header.set("OBJECT", "M33");
    header.set("bunit", "K");
    let keys: Vec<&str> = header.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, ["OBJECT", "BUNIT"]);
    assert_eq!(
        header.card("BUNIT").unwrap().comment.as_deref(),
        Some("Brightness unit")
    );
    assert_eq!(header.get_str("BUNIT"), Some("K"));

    assert_eq!(header.remove("object"), Some(HeaderValue::from("M33")));
    assert_eq!(header.len(), 1);
}

#[test]
fn test_header_verify() {
    let header = cube_header(4, 3, 2);
    assert!(header.verify().is_ok());
    assert_eq!(header.axis_lengths().unwrap(), vec![2, 3, 4]);

    let result = FitsHeader::new().verify();
    assert_eq!(result, Err(HeaderError::MissingKey("SIMPLE".to_string())));

    let mut bad = header.clone();
    bad.set("SIMPLE", false);
    assert_eq!(bad.verify(), Err(HeaderError::NotSimple));

    let mut bad = header.clone();
    bad.set("SIMPLE", "T");
    assert!(matches!(bad.verify(), Err(HeaderError::WrongType { .. })));

    let mut bad = header.clone();
    bad.set("BITPIX", 12);
    assert_eq!(bad.verify(), Err(HeaderError::BadBitpix(12)));

    let mut bad = header.clone();
    bad.set("NAXIS", 1000);
    assert_eq!(bad.verify(), Err(HeaderError::BadNaxis(1000)));

    let mut bad = header.clone();
    bad.set("NAXIS2", -3);
    assert_eq!(
        bad.verify(),
        Err(HeaderError::BadAxisLength {
            key: "NAXIS2".to_string(),
            value: -3
        })
    );

    let mut bad = header.clone();
    bad.set("NAXIS3", 4.0);
    assert!(matches!(bad.verify(), Err(HeaderError::WrongType { .. })));

    let mut bad = header;
    bad.remove("NAXIS1");
    assert_eq!(
        bad.verify(),
        Err(HeaderError::MissingKey("NAXIS1".to_string()))
    );
}

#[test]
fn test_structural_keys() {
    for key in ["SIMPLE", "BITPIX", "NAXIS", "NAXIS1", "NAXIS12", "EXTEND", "BZERO"] {
        assert!(header::is_structural_key(key), "{key}");
    }
    for key in ["NAXISA", "OBJECT", "CRVAL3", "POL", "NAXIS_"] {
        assert!(!header::is_structural_key(key), "{key}");
    }
}

#[test]
fn test_add_phi_to_header() {
    let header = cube_header(100, 5, 7);
    let phi: Vec<f64> = (0..8).map(|i| -10.0 + 2.0 * i as f64).collect();
    let phi_header = add_phi_to_header(&header, &phi).unwrap();

    assert_eq!(phi_header.get_i64("NAXIS3"), Some(8));
    assert_abs_diff_eq!(phi_header.get_f64("CRVAL3").unwrap(), -10.0);
    assert_abs_diff_eq!(phi_header.get_f64("CDELT3").unwrap(), 2.0);
    assert_abs_diff_eq!(phi_header.get_f64("CRPIX3").unwrap(), 1.0);
    assert_eq!(phi_header.get_str("CTYPE3"), Some("Faraday depth"));
    assert_eq!(phi_header.get_str("CUNIT3"), Some("rad m^{-2}"));
    // Everything else is kept.
    assert_eq!(phi_header.get_str("OBJECT"), Some("3C 196"));
    assert_eq!(phi_header.get_i64("NAXIS1"), Some(7));

    // The input isn't modified.
    assert_eq!(header.get_i64("NAXIS3"), Some(100));
    assert_eq!(header.get_str("CTYPE3"), Some("FREQ"));
    assert!(!header.contains_key("CDELT3"));
}

#[test]
fn test_add_phi_to_header_drops_frequency_wcs() {
    let mut header = cube_header(100, 5, 7);
    for (key, value) in [
        ("PC1_1", 1.0),
        ("PC1_2", 0.1),
        ("PC1_3", 0.2),
        ("PC3_1", 0.3),
        ("PC3_3", 4.0),
        ("CROTA2", 15.0),
        ("CROTA3", 30.0),
        ("PV3_1", 2.0),
        ("CRVAL3A", 21.0),
    ] {
        header.set(key, value);
    }
    header.set("CTYPE3A", "VRAD");

    let phi_header = add_phi_to_header(&header, &[0.0, 5.0]).unwrap();
    for key in ["PC1_3", "PC3_1", "PC3_3", "CROTA3", "PV3_1", "CTYPE3A", "CRVAL3A"] {
        assert!(!phi_header.contains_key(key), "{key}");
    }
    // The celestial axes are untouched.
    for key in ["PC1_1", "PC1_2", "CROTA2", "CTYPE1"] {
        assert!(phi_header.contains_key(key), "{key}");
    }
    assert!(!phi_header.contains_key("CD3_3"));
    assert_abs_diff_eq!(phi_header.get_f64("CDELT3").unwrap(), 5.0);

    // A CD matrix keeps its third-axis scale, now in Faraday depth.
    let mut header = cube_header(100, 5, 7);
    header.set("CD1_1", -1e-3);
    header.set("CD2_2", 1e-3);
    header.set("CD3_3", 1e6);
    header.set("CD2_3", 0.5);
    let phi_header = add_phi_to_header(&header, &[0.0, 5.0]).unwrap();
    assert_abs_diff_eq!(phi_header.get_f64("CD3_3").unwrap(), 5.0);
    assert!(!phi_header.contains_key("CD2_3"));
    assert_abs_diff_eq!(phi_header.get_f64("CD1_1").unwrap(), -1e-3);
}

#[test]
fn test_add_phi_to_header_needs_two_values() {
    let header = cube_header(100, 5, 7);
    assert_eq!(
        add_phi_to_header(&header, &[3.0]),
        Err(ShapeError::PhiTooShort { len: 1 })
    );
    assert_eq!(
        add_phi_to_header(&header, &[]),
        Err(ShapeError::PhiTooShort { len: 0 })
    );
}

#[test]
fn test_write_read_cube() {
    let tmp_dir = TempDir::new().unwrap();
    let path = tmp_dir.path().join("cube.fits");
    let header = cube_header(4, 3, 5);
    let data = test_cube(4, 3, 5);

    write_fits_cube(data.view(), &header, &path, Some(Polarisation::Q), false).unwrap();
    let (read_header, read_data) = read_fits_cube(&path).unwrap();

    // Bit-identical.
    assert_eq!(read_data, data);
    assert_eq!(read_header.get_i64("BITPIX"), Some(-32));
    assert_eq!(read_header.axis_lengths().unwrap(), vec![5, 3, 4]);
    assert_eq!(read_header.get_str("OBJECT"), Some("3C 196"));
    assert_eq!(read_header.get_str("CTYPE1"), Some("RA---SIN"));
    assert_eq!(
        read_header.card("CTYPE1").unwrap().comment.as_deref(),
        Some("Right ascension")
    );
    assert_abs_diff_eq!(read_header.get_f64("CRVAL3").unwrap(), 1.3e8);
    assert_eq!(read_header.get_str("POL"), Some("Q"));
    assert!(read_header
        .comments()
        .iter()
        .any(|c| c.trim() == "A test comment"));
    assert!(read_header
        .history()
        .iter()
        .any(|h| h.trim() == "Made by a test"));

    // The header alone can be read too.
    let only_header = get_fits_header(&path).unwrap();
    assert_eq!(only_header, read_header);

    // No temporary files are left behind.
    assert_eq!(std::fs::read_dir(tmp_dir.path()).unwrap().count(), 1);
}

#[test]
fn test_write_read_long_string() {
    let tmp_dir = TempDir::new().unwrap();
    let path = tmp_dir.path().join("cube.fits");
    let mut header = cube_header(2, 2, 2);
    let long_string = "The quick brown fox jumps over the lazy dog. ".repeat(5);
    let long_string = long_string.trim_end();
    header.set("LONGSTR", long_string);

    write_fits_cube(test_cube(2, 2, 2).view(), &header, &path, None, false).unwrap();
    let read_header = get_fits_header(&path).unwrap();
    assert_eq!(read_header.get_str("LONGSTR"), Some(long_string));
    assert!(!read_header.contains_key("CONTINUE"));
    assert!(!read_header.contains_key("POL"));
}

#[test]
fn test_write_does_not_overwrite() {
    let tmp_dir = TempDir::new().unwrap();
    let path = tmp_dir.path().join("cube.fits");
    let header = cube_header(2, 3, 4);
    let data = test_cube(2, 3, 4);
    write_fits_cube(data.view(), &header, &path, None, false).unwrap();

    let other_data = Array3::<f32>::zeros((2, 3, 4));
    let result = write_fits_cube(other_data.view(), &header, &path, None, false);
    assert!(matches!(result, Err(CubeWriteError::AlreadyExists(_))));
    let (_, read_data) = read_fits_cube(&path).unwrap();
    assert_eq!(read_data, data);

    write_fits_cube(other_data.view(), &header, &path, None, true).unwrap();
    let (_, read_data) = read_fits_cube(&path).unwrap();
    assert_eq!(read_data, other_data);
}

#[test]
fn test_write_invalid_header_writes_nothing() {
    let tmp_dir = TempDir::new().unwrap();
    let path = tmp_dir.path().join("cube.fits");
    let data = test_cube(2, 3, 4);

    let result = write_fits_cube(data.view(), &FitsHeader::new(), &path, None, false);
    assert!(matches!(
        result,
        Err(CubeWriteError::InvalidHeader(HeaderError::MissingKey(_)))
    ));
    assert!(!path.exists());
    assert_eq!(std::fs::read_dir(tmp_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_write_shape_mismatch() {
    let tmp_dir = TempDir::new().unwrap();
    let path = tmp_dir.path().join("cube.fits");
    let header = cube_header(2, 3, 4);

    // x and y swapped.
    let data = test_cube(2, 4, 3);
    let result = write_fits_cube(data.view(), &header, &path, None, false);
    assert!(matches!(result, Err(CubeWriteError::ShapeMismatch { .. })));

    // A non-degenerate fourth axis.
    let mut header_4d = header;
    header_4d.set("NAXIS", 4);
    header_4d.set("NAXIS4", 2);
    let data = test_cube(2, 3, 4);
    let result = write_fits_cube(data.view(), &header_4d, &path, None, false);
    assert!(matches!(result, Err(CubeWriteError::ShapeMismatch { .. })));
    assert!(!path.exists());
}

#[test]
fn test_write_missing_output_dir() {
    let tmp_dir = TempDir::new().unwrap();
    let path = tmp_dir.path().join("nonexistent").join("cube.fits");
    let result = write_fits_cube(
        test_cube(2, 2, 2).view(),
        &cube_header(2, 2, 2),
        &path,
        None,
        false,
    );
    assert!(matches!(result, Err(CubeWriteError::NoOutputDir(_))));
}

#[test]
fn test_read_degenerate_axes() {
    let tmp_dir = TempDir::new().unwrap();

    // A Stokes axis of length 1 after the frequency axis.
    let path = tmp_dir.path().join("stokes_last.fits");
    let mut header = cube_header(3, 2, 4);
    header.set("NAXIS", 4);
    header.set("NAXIS4", 1);
    let data = test_cube(3, 2, 4);
    write_fits_cube(data.view(), &header, &path, None, false).unwrap();
    let (read_header, read_data) = read_fits_cube(&path).unwrap();
    assert_eq!(read_header.axis_lengths().unwrap(), vec![4, 2, 3, 1]);
    assert_eq!(read_data, data);

    // A Stokes axis of length 1 before the frequency axis; the frequency axis
    // must be the third.
    let path = tmp_dir.path().join("stokes_third.fits");
    {
        let description = ImageDescription {
            data_type: ImageType::Float,
            dimensions: &[3, 1, 2, 4],
        };
        let mut fptr = FitsFile::create(&path)
            .with_custom_primary(&description)
            .open()
            .unwrap();
        let hdu = fptr.hdu(0).unwrap();
        hdu.write_image(&mut fptr, data.as_slice().unwrap()).unwrap();
    }
    match read_fits_cube(&path) {
        Err(CubeReadError::NotACube { shape, .. }) => assert_eq!(shape, vec![3, 1, 2, 4]),
        r => panic!("expected NotACube, got {r:?}"),
    }
}

#[test]
fn test_read_not_a_cube() {
    let tmp_dir = TempDir::new().unwrap();
    let path = tmp_dir.path().join("image.fits");
    {
        let description = ImageDescription {
            data_type: ImageType::Float,
            dimensions: &[2, 4],
        };
        let mut fptr = FitsFile::create(&path)
            .with_custom_primary(&description)
            .open()
            .unwrap();
        let hdu = fptr.hdu(0).unwrap();
        hdu.write_image(&mut fptr, &[0.0_f32; 8]).unwrap();
    }
    let result = read_fits_cube(&path);
    assert!(
        matches!(&result, Err(CubeReadError::NotACube { shape, .. }) if shape == &[2, 4]),
        "{result:?}"
    );
}

#[test]
fn test_read_bad_files() {
    let tmp_dir = TempDir::new().unwrap();

    let missing = tmp_dir.path().join("missing.fits");
    assert!(matches!(
        read_fits_cube(&missing),
        Err(CubeReadError::DoesNotExist(_))
    ));
    assert!(matches!(
        get_fits_header(&missing),
        Err(CubeReadError::DoesNotExist(_))
    ));

    let text_file = tmp_dir.path().join("frequencies.txt");
    write_text(&text_file, "150e6\n151e6\n");
    assert!(matches!(
        read_fits_cube(&text_file),
        Err(CubeReadError::Fits(FitsError::Open { .. }))
    ));
    assert!(matches!(
        get_fits_header(&text_file),
        Err(CubeReadError::Fits(FitsError::Open { .. }))
    ));
}

#[test]
fn test_write_rmcube() {
    let tmp_dir = TempDir::new().unwrap();
    let phi: Vec<f64> = (0..6).map(|i| -5.0 + 2.0 * i as f64).collect();
    let header = add_phi_to_header(&cube_header(10, 2, 3), &phi).unwrap();
    let rmcube = Array3::from_elem((6, 2, 3), c64::new(3.0, -4.0));

    let written = write_rmcube(rmcube.view(), &header, tmp_dir.path(), false).unwrap();
    assert_eq!(written.len(), 3);

    for (pol, expected) in [
        (Polarisation::Q, 3.0),
        (Polarisation::U, -4.0),
        (Polarisation::P, 5.0),
    ] {
        let path = tmp_dir.path().join(rmcube_filename(pol));
        let (read_header, read_data) = read_fits_cube(&path).unwrap();
        assert_eq!(read_data.dim(), (6, 2, 3));
        assert!(read_data.iter().all(|&v| v == expected), "{pol}");
        assert_eq!(read_header.get_str("POL"), Some(pol.to_string().as_str()));
        assert_eq!(read_header.get_str("CTYPE3"), Some("Faraday depth"));
        assert_abs_diff_eq!(read_header.get_f64("CRVAL3").unwrap(), -5.0);
        assert_abs_diff_eq!(read_header.get_f64("CDELT3").unwrap(), 2.0);
    }
    assert_eq!(rmcube_filename(Polarisation::P), "p-rmcube-dirty.fits");
}

#[test]
fn test_write_rmcube_does_not_overwrite() {
    let tmp_dir = TempDir::new().unwrap();
    let phi = [0.0, 1.0];
    let header = add_phi_to_header(&cube_header(10, 2, 3), &phi).unwrap();
    let rmcube = Array3::from_elem((2, 2, 3), c64::new(1.0, 1.0));
    write_text(&tmp_dir.path().join("u-rmcube-dirty.fits"), "not a cube");

    let result = write_rmcube(rmcube.view(), &header, tmp_dir.path(), false);
    assert!(matches!(result, Err(CubeWriteError::AlreadyExists(_))));
    // Nothing was written.
    assert!(!tmp_dir.path().join("q-rmcube-dirty.fits").exists());
    assert!(!tmp_dir.path().join("p-rmcube-dirty.fits").exists());

    write_rmcube(rmcube.view(), &header, tmp_dir.path(), true).unwrap();
    let (_, u) = read_fits_cube(&tmp_dir.path().join("u-rmcube-dirty.fits")).unwrap();
    assert!(u.iter().all(|&v| v == 1.0));
}

#[test]
fn test_write_rmcube_failure_keeps_existing_set() {
    let tmp_dir = TempDir::new().unwrap();
    let phi = [0.0, 1.0];
    let header = add_phi_to_header(&cube_header(10, 2, 3), &phi).unwrap();
    let old = Array3::from_elem((2, 2, 3), c64::new(1.0, 1.0));
    write_rmcube(old.view(), &header, tmp_dir.path(), false).unwrap();

    // The P product can't be replaced.
    let p_path = tmp_dir.path().join(rmcube_filename(Polarisation::P));
    std::fs::remove_file(&p_path).unwrap();
    std::fs::create_dir(&p_path).unwrap();

    let new = Array3::from_elem((2, 2, 3), c64::new(2.0, 2.0));
    let result = write_rmcube(new.view(), &header, tmp_dir.path(), true);
    assert!(matches!(result, Err(CubeWriteError::NotAFile(_))));
    for pol in [Polarisation::Q, Polarisation::U] {
        let (_, data) = read_fits_cube(&tmp_dir.path().join(rmcube_filename(pol))).unwrap();
        assert!(data.iter().all(|&v| v == 1.0), "{pol}");
    }
    // No staging directories are left behind.
    let names: Vec<String> = std::fs::read_dir(tmp_dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert!(names.iter().all(|n| !n.starts_with(".rmsynthesis-")), "{names:?}");
}

#[test]
fn test_write_rmcube_missing_dir() {
    let tmp_dir = TempDir::new().unwrap();
    let header = add_phi_to_header(&cube_header(10, 1, 1), &[0.0, 1.0]).unwrap();
    let rmcube = Array3::<c64>::zeros((2, 1, 1));
    let result = write_rmcube(
        rmcube.view(),
        &header,
        &tmp_dir.path().join("nope"),
        false,
    );
    assert!(matches!(result, Err(CubeWriteError::NoOutputDir(_))));
}

#[test]
fn test_write_rmsf() {
    let tmp_dir = TempDir::new().unwrap();
    let phi = [-1.0, 0.0, 1.5];
    let rmsf = array![c64::new(0.5, -0.25), c64::new(1.0, 0.0), c64::new(0.125, 3e-7)];

    let path = write_rmsf(&phi, rmsf.view(), tmp_dir.path(), false).unwrap();
    assert_eq!(path, tmp_dir.path().join("rmsf.txt"));
    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<Vec<f64>> = contents
        .lines()
        .map(|l| l.split_whitespace().map(|v| v.parse().unwrap()).collect())
        .collect();
    assert_eq!(lines.len(), 3);
    for ((line, phi), rmsf) in lines.iter().zip(phi).zip(rmsf.iter()) {
        assert_eq!(line.len(), 3);
        assert_abs_diff_eq!(line[0], phi);
        assert_abs_diff_eq!(line[1], rmsf.re);
        assert_abs_diff_eq!(line[2], rmsf.im);
    }

    let result = write_rmsf(&phi, rmsf.view(), tmp_dir.path(), false);
    assert!(matches!(result, Err(CubeWriteError::AlreadyExists(_))));
    assert!(write_rmsf(&phi, rmsf.view(), tmp_dir.path(), true).is_ok());

    let result = write_rmsf(&phi[..2], rmsf.view(), tmp_dir.path(), true);
    assert!(matches!(
        result,
        Err(CubeWriteError::RmsfLength { phi: 2, rmsf: 3 })
    ));
}

#[test]
fn test_parse_frequency_file() {
    let tmp_dir = TempDir::new().unwrap();
    let path = tmp_dir.path().join("frequencies.txt");
    write_text(
        &path,
        "# Frequencies of each plane\n\
         300e6\n\
         \n\
         310 MHz  # a trailing comment\n\
         0.32 GHz\n\
         300e6 + 10e6*3\n\
         340000 kHz\n",
    );
    let freqs = parse_frequency_file(&path).unwrap();
    let expected = [300e6, 310e6, 320e6, 330e6, 340e6];
    assert_eq!(freqs.len(), expected.len());
    for (f, e) in freqs.iter().zip(expected) {
        assert_abs_diff_eq!(*f, e, epsilon = 1e-6);
    }
}

#[test]
fn test_parse_frequency_file_errors() {
    let tmp_dir = TempDir::new().unwrap();

    let path = tmp_dir.path().join("parse-error.txt");
    write_text(&path, "300e6\n310e6\n320 MHz MHz\n");
    let result = parse_frequency_file(&path);
    assert!(
        matches!(&result, Err(FrequencyFileError::Parse { line_number: 3, line, .. }) if line == "320 MHz MHz"),
        "{result:?}"
    );

    let path = tmp_dir.path().join("negative.txt");
    write_text(&path, "300e6\n-310e6\n");
    assert!(matches!(
        parse_frequency_file(&path),
        Err(FrequencyFileError::NotPositive { line_number: 2, .. })
    ));

    let path = tmp_dir.path().join("zero-division.txt");
    write_text(&path, "1/0\n");
    assert!(matches!(
        parse_frequency_file(&path),
        Err(FrequencyFileError::NotPositive { line_number: 1, .. })
    ));

    let path = tmp_dir.path().join("empty.txt");
    write_text(&path, "# Nothing here\n\n");
    assert!(matches!(
        parse_frequency_file(&path),
        Err(FrequencyFileError::Empty(_))
    ));

    let path = tmp_dir.path().join("missing.txt");
    assert!(matches!(
        parse_frequency_file(&path),
        Err(FrequencyFileError::DoesNotExist(_))
    ));
}
