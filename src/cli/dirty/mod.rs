// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.


use std::path::PathBuf;

use clap::Parser;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use super::common::{phi_summary, InfoPrinter, OutputArgs, PhiArgs, ARG_FILE_HELP};
use crate::{
    io::parse_frequency_file,
    params::{rm_synthesis_output_filenames, RmSynthesisParams},
    RmsynthesisError,
};

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct DirtyArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    /// Path to the Stokes Q cube. Its axes must be (x, y, frequency).
    #[clap(short, long, help_heading = "INPUT FILES")]
    pub(super) q_cube: Option<PathBuf>,

    /// Path to the Stokes U cube. It must have the same shape as the Q cube.
    #[clap(short, long, help_heading = "INPUT FILES")]
    pub(super) u_cube: Option<PathBuf>,

    /// Path to a text file of frequencies, one per line and in the same order
    /// as the planes of the cubes. Values may have a unit, e.g. "150.5 MHz";
    /// the default unit is Hz.
    #[clap(short, long, help_heading = "INPUT FILES")]
    pub(super) frequencies: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(rename = "phi")]
    #[serde(default)]
    pub(super) phi_args: PhiArgs,

    #[clap(flatten)]
    #[serde(rename = "output")]
    #[serde(default)]
    pub(super) output_args: OutputArgs,
}

impl DirtyArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified into
    /// a single struct. Where applicable, it will prefer CLI parameters over
    /// those in the file.
    ///
    /// This function should only ever merge arguments, and not try to make
    /// sense of them.
    pub(super) fn merge(self) -> Result<DirtyArgs, RmsynthesisError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            // Read in the file arguments. Ensure all of the file args are
            // accounted for by pattern matching.
            let DirtyArgs {
                args_file: _,
                q_cube,
                u_cube,
                frequencies,
                phi_args,
                output_args,
            } = unpack_arg_file!(arg_file);

            // Merge all the arguments, preferring the CLI args when available.
            Ok(DirtyArgs {
                args_file: None,
                q_cube: cli_args.q_cube.or(q_cube),
                u_cube: cli_args.u_cube.or(u_cube),
                frequencies: cli_args.frequencies.or(frequencies),
                phi_args: cli_args.phi_args.merge(phi_args),
                output_args: cli_args.output_args.merge(output_args),
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(super) fn parse(self) -> Result<RmSynthesisParams, RmsynthesisError> {
        debug!("{:#?}", self);

        let Self {
            args_file: _,
            q_cube,
            u_cube,
            frequencies,
            phi_args,
            output_args,
        } = self;

        let q_cube = q_cube.ok_or(DirtyArgsError::NoQCube)?;
        let u_cube = u_cube.ok_or(DirtyArgsError::NoUCube)?;
        let frequencies = frequencies.ok_or(DirtyArgsError::NoFrequencies)?;

        let freqs = parse_frequency_file(&frequencies)?;
        let phi = phi_args.parse()?;
        let output = output_args.parse();

        let mut printer = InfoPrinter::new("RM synthesis inputs".into());
        printer.push_block(vec![
            format!("Q cube: {}", q_cube.display()).into(),
            format!("U cube: {}", u_cube.display()).into(),
        ]);
        printer.push_block(vec![
            format!("{} frequencies from {}", freqs.len(), frequencies.display()).into(),
            format!(
                "{:.4} MHz to {:.4} MHz",
                freqs.first() / 1e6,
                freqs.last() / 1e6
            )
            .into(),
        ]);
        printer.push_block(phi_summary(&phi));
        printer.display();

        let params = RmSynthesisParams::new(freqs, phi, &q_cube, &u_cube, output)?;

        let mut printer = InfoPrinter::new("Outputs".into());
        printer.push_line(format!("Directory: {}", params.output.output_dir.display()).into());
        printer.push_block(
            rm_synthesis_output_filenames()
                .into_iter()
                .map(|f| f.into())
                .collect(),
        );
        printer.display();

        Ok(params)
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), RmsynthesisError> {
        debug!("Converting arguments into parameters");
        trace!("{:#?}", self);
        let params = self.parse()?;

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        params.run()?;
        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
pub(super) enum DirtyArgsError {
    #[error("No Stokes Q cube was specified")]
    NoQCube,

    #[error("No Stokes U cube was specified")]
    NoUCube,

    #[error("No frequency file was specified")]
    NoFrequencies,
}
