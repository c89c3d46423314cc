// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

use anyhow::Result;
use clap::{ArgMatches, Command};

use crate::commands::{
    command::{content_types_arg, document_arg, get, output_arg, CommandDefinition},
    util::build_views,
};
use crate::config::Config;

pub struct BuildCommandDefinition {}

impl CommandDefinition for BuildCommandDefinition {
    fn command(&self) -> Command {
        Command::new("build")
            .about("Build all admin views of a document as JSON")
            .arg(document_arg())
            .arg(content_types_arg())
            .arg(output_arg())
    }

    fn execute(&self, matches: &ArgMatches, config: &Config) -> Result<()> {
        let views = build_views(matches, config)?;
        let output: Option<PathBuf> = get(matches, "output");

        match output {
            Some(output) => {
                let mut writer = BufWriter::new(File::create(&output)?);
                serde_json::to_writer_pretty(&mut writer, &views)?;
                writeln!(writer)?;
                writer.flush()?;
                println!("Admin views written to {}", output.display());
            }
            None => {
                let stdout = std::io::stdout();
                let mut writer = stdout.lock();
                serde_json::to_writer_pretty(&mut writer, &views)?;
                writeln!(writer)?;
            }
        }

        Ok(())
    }
}
