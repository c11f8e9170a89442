// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests.
//!
//! Some help for laying out these tests was taken from:
//! https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

use std::path::{Path, PathBuf};
use std::process::Output;
use std::str::from_utf8;

use approx::assert_abs_diff_eq;
use assert_cmd::{output::OutputError, Command};
use ndarray::prelude::*;
use tempfile::TempDir;

use rmsynthesis::{
    io::{read_fits_cube, write_fits_cube, FitsHeader, Polarisation},
    WavelengthConverter,
};

const NUM_CHANS: usize = 64;
const PHI_SOURCE: f64 = 200.0;

fn rmsynthesis() -> Command {
    Command::cargo_bin("rmsynthesis").unwrap()
}

fn get_cmd_output(result: Result<Output, OutputError>) -> (String, String) {
    let output = match result {
        Ok(o) => o,
        Err(o) => o.as_output().unwrap().clone(),
    };
    (
        from_utf8(&output.stdout).unwrap().to_string(),
        from_utf8(&output.stderr).unwrap().to_string(),
    )
}

struct Inputs {
    q: String,
    u: String,
    freqs: String,
}

/// Write cubes of a Faraday-thin source with unit polarised intensity at a
/// Faraday depth of [`PHI_SOURCE`], observed at 1 to 2 GHz.
fn write_inputs(dir: &Path) -> Inputs {
    let freqs: Vec<f64> = (0..NUM_CHANS).map(|i| 1e9 + 16e6 * i as f64).collect();
    let lambda_sq = WavelengthConverter::default().as_wavelength_squared_vec(&freqs);

    let mut q = Array3::zeros((NUM_CHANS, 3, 4));
    let mut u = Array3::zeros((NUM_CHANS, 3, 4));
    for (i_chan, l2) in lambda_sq.iter().enumerate() {
        let angle = 2.0 * PHI_SOURCE * l2;
        q.slice_mut(s![i_chan, .., ..]).fill(angle.cos() as f32);
        u.slice_mut(s![i_chan, .., ..]).fill(angle.sin() as f32);
    }

    let mut header = FitsHeader::new();
    header.set("SIMPLE", true);
    header.set("BITPIX", -32);
    header.set("NAXIS", 3);
    header.set("NAXIS1", 4);
    header.set("NAXIS2", 3);
    header.set("NAXIS3", NUM_CHANS);
    header.set("CTYPE1", "RA---SIN");
    header.set("CTYPE2", "DEC--SIN");
    header.set("CTYPE3", "FREQ");
    header.set("CRVAL3", freqs[0]);
    header.set("CDELT3", 16e6);
    header.set("CRPIX3", 1.0);
    header.set_with_comment("BUNIT", "JY/BEAM", "Pixel units");

    let q_path = dir.join("q.fits");
    let u_path = dir.join("u.fits");
    write_fits_cube(q.view(), &header, &q_path, Some(Polarisation::Q), false).unwrap();
    write_fits_cube(u.view(), &header, &u_path, Some(Polarisation::U), false).unwrap();

    // Write the frequencies as expressions, to exercise the parser.
    let freq_path = dir.join("freqs.txt");
    let contents: String = std::iter::once("# Channel frequencies\n".to_string())
        .chain((0..NUM_CHANS).map(|i| format!("1000 + 16*{i} MHz\n")))
        .collect();
    std::fs::write(&freq_path, contents).unwrap();

    Inputs {
        q: q_path.display().to_string(),
        u: u_path.display().to_string(),
        freqs: freq_path.display().to_string(),
    }
}

fn output_paths(dir: &Path) -> [PathBuf; 4] {
    [
        dir.join("q-rmcube-dirty.fits"),
        dir.join("u-rmcube-dirty.fits"),
        dir.join("p-rmcube-dirty.fits"),
        dir.join("rmsf.txt"),
    ]
}

#[test]
fn test_dirty_recovers_faraday_thin_source() {
    let in_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let inputs = write_inputs(in_dir.path());
    let out = out_dir.path().display().to_string();

    #[rustfmt::skip]
    let cmd = rmsynthesis()
        .args([
            "dirty",
            "--no-progress-bars",
            "-q", &inputs.q,
            "-u", &inputs.u,
            "-f", &inputs.freqs,
            "--phi-low", "-500",
            "--phi-high", "500",
            "--phi-step", "10",
            "-o", &out,
        ])
        .ok();
    assert!(cmd.is_ok(), "dirty failed on simple test data: {:?}", cmd.err());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("RMSF properties"));
    for path in output_paths(out_dir.path()) {
        assert!(path.exists(), "{} wasn't written", path.display());
    }

    let (header, p) = read_fits_cube(&out_dir.path().join("p-rmcube-dirty.fits")).unwrap();
    assert_eq!(p.dim(), (100, 3, 4));
    assert_eq!(header.get_str("CTYPE3"), Some("Faraday depth"));
    assert_eq!(header.get_str("CUNIT3"), Some("rad m^{-2}"));
    assert_eq!(header.get_str("CTYPE1"), Some("RA---SIN"));
    assert_eq!(header.get_str("BUNIT"), Some("JY/BEAM"));
    assert_eq!(header.get_str("POL"), Some("P"));

    // The peak is at the source's Faraday depth, with all of its polarised
    // intensity.
    let spectrum = p.slice(s![.., 1, 2]);
    let (i_peak, peak) = spectrum
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .unwrap();
    assert_eq!(i_peak, 70);
    assert_abs_diff_eq!(*peak, 1.0, epsilon = 1e-5);

    let (q_header, _) = read_fits_cube(&out_dir.path().join("q-rmcube-dirty.fits")).unwrap();
    assert_eq!(q_header.get_str("POL"), Some("Q"));
}

#[test]
fn test_dry_run_writes_nothing() {
    let in_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let inputs = write_inputs(in_dir.path());
    let out = out_dir.path().display().to_string();

    #[rustfmt::skip]
    let cmd = rmsynthesis()
        .args([
            "dirty",
            "--dry-run",
            "-q", &inputs.q,
            "-u", &inputs.u,
            "-f", &inputs.freqs,
            "-o", &out,
        ])
        .ok();
    assert!(cmd.is_ok(), "{:?}", cmd.err());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Dry run"));
    assert_eq!(std::fs::read_dir(out_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_refuse_to_overwrite() {
    let in_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let out = out_dir.path().display().to_string();
    let inputs = write_inputs(in_dir.path());
    std::fs::write(out_dir.path().join("p-rmcube-dirty.fits"), "not a cube").unwrap();

    #[rustfmt::skip]
    let args = [
        "dirty",
        "--no-progress-bars",
        "-q", &inputs.q,
        "-u", &inputs.u,
        "-f", &inputs.freqs,
        "--phi-step", "20",
        "-o", &out,
    ];
    let cmd = rmsynthesis().args(args).ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("already exists"), "{stderr}");
    // Nothing was written, not even the RMSF.
    assert!(!out_dir.path().join("rmsf.txt").exists());

    let cmd = rmsynthesis().args(args).arg("--force-overwrite").ok();
    assert!(cmd.is_ok(), "{:?}", cmd.err());
    assert!(read_fits_cube(&out_dir.path().join("p-rmcube-dirty.fits")).is_ok());
}

#[test]
fn test_frequency_mismatch_is_an_error() {
    let in_dir = TempDir::new().unwrap();
    let inputs = write_inputs(in_dir.path());
    std::fs::write(&inputs.freqs, "1 GHz\n1.1 GHz\n").unwrap();
    let out = in_dir.path().display().to_string();

    #[rustfmt::skip]
    let cmd = rmsynthesis()
        .args([
            "dirty",
            "-q", &inputs.q,
            "-u", &inputs.u,
            "-f", &inputs.freqs,
            "-o", &out,
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("64 frequency planes"), "{stderr}");
}

#[test]
fn test_rmsf_subcommand() {
    let in_dir = TempDir::new().unwrap();
    let inputs = write_inputs(in_dir.path());
    let out = in_dir.path().display().to_string();

    #[rustfmt::skip]
    let cmd = rmsynthesis()
        .args([
            "rmsf",
            "-f", &inputs.freqs,
            "--phi-low", "-100",
            "--phi-high", "101",
            "--phi-step", "1",
            "-o", &out,
        ])
        .ok();
    assert!(cmd.is_ok(), "{:?}", cmd.err());
    assert!(!in_dir.path().join("p-rmcube-dirty.fits").exists());

    let contents = std::fs::read_to_string(in_dir.path().join("rmsf.txt")).unwrap();
    let lines: Vec<Vec<f64>> = contents
        .lines()
        .map(|l| l.split_whitespace().map(|v| v.parse().unwrap()).collect())
        .collect();
    assert_eq!(lines.len(), 201);
    let centre = &lines[100];
    assert_abs_diff_eq!(centre[0], 0.0);
    assert_abs_diff_eq!(centre[1], 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(centre[2], 0.0, epsilon = 1e-12);
    for line in &lines {
        assert!(line[1].hypot(line[2]) <= 1.0 + 1e-12);
    }
}

#[test]
fn test_save_toml_then_use_it() {
    let in_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let inputs = write_inputs(in_dir.path());
    let out = out_dir.path().display().to_string();
    let toml = in_dir.path().join("args.toml");
    let toml_str = toml.display().to_string();

    #[rustfmt::skip]
    let cmd = rmsynthesis()
        .args([
            "rmsf",
            "--dry-run",
            "--save-toml", &toml_str,
            "-f", &inputs.freqs,
            "--phi-low", "-40",
            "--phi-high", "40",
            "--phi-step", "2",
            "-o", &out,
        ])
        .ok();
    assert!(cmd.is_ok(), "{:?}", cmd.err());
    assert!(toml.exists());

    let cmd = rmsynthesis().args(["rmsf", &toml_str]).ok();
    assert!(cmd.is_ok(), "{:?}", cmd.err());
    let contents = std::fs::read_to_string(out_dir.path().join("rmsf.txt")).unwrap();
    assert_eq!(contents.lines().count(), 40);
}

#[test]
fn test_no_subcommand_is_an_error() {
    let cmd = rmsynthesis().ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.to_lowercase().contains("usage"), "{stderr}");
}
