// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.


use std::path::PathBuf;

use clap::Parser;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use super::common::{phi_summary, InfoPrinter, OutputArgs, PhiArgs, ARG_FILE_HELP};
use crate::{io::parse_frequency_file, params::RmsfParams, RmsynthesisError};

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct RmsfArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    /// Path to a text file of frequencies, one per line. Values may have a
    /// unit, e.g. "150.5 MHz"; the default unit is Hz.
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

impl RmsfArgs {
    /// Consolidate the command-line arguments with those in the argument file,
    /// preferring the command line.
    pub(super) fn merge(self) -> Result<RmsfArgs, RmsynthesisError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            let RmsfArgs {
                args_file: _,
                frequencies,
                phi_args,
                output_args,
            } = unpack_arg_file!(arg_file);

            Ok(RmsfArgs {
                args_file: None,
                frequencies: cli_args.frequencies.or(frequencies),
                phi_args: cli_args.phi_args.merge(phi_args),
                output_args: cli_args.output_args.merge(output_args),
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(super) fn parse(self) -> Result<RmsfParams, RmsynthesisError> {
        debug!("{:#?}", self);

        let Self {
            args_file: _,
            frequencies,
            phi_args,
            output_args,
        } = self;

        let frequencies = frequencies.ok_or(RmsfArgsError::NoFrequencies)?;
        let freqs = parse_frequency_file(&frequencies)?;
        let phi = phi_args.parse()?;

        let mut printer = InfoPrinter::new("RMSF inputs".into());
        printer.push_line(format!("{} frequencies from {}", freqs.len(), frequencies.display()).into());
        printer.push_block(phi_summary(&phi));
        printer.display();

        let params = RmsfParams::new(freqs, phi, output_args.parse())?;
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
pub(super) enum RmsfArgsError {
    #[error("No frequency file was specified")]
    NoFrequencies,
}
