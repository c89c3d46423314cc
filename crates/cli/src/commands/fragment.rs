// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use anyhow::{anyhow, Result};
use clap::{Arg, ArgMatches, Command};

use crate::commands::{
    command::{content_types_arg, document_arg, get_required, CommandDefinition},
    util::build_views,
};
use crate::config::Config;

pub struct FragmentCommandDefinition {}

impl CommandDefinition for FragmentCommandDefinition {
    fn command(&self) -> Command {
        Command::new("fragment")
            .about("Print the client fragment of one admin view")
            .arg(document_arg())
            .arg(
                Arg::new("view")
                    .help("The admin view id (the fragment name, or <ContentType>defaultAdminView).")
                    .required(true)
                    .index(2),
            )
            .arg(content_types_arg())
    }

    fn execute(&self, matches: &ArgMatches, config: &Config) -> Result<()> {
        let view_id: String = get_required(matches, "view")?;
        let views = build_views(matches, config)?;

        let view = views
            .iter()
            .find(|view| view.id() == view_id)
            .ok_or_else(|| {
                let known = views.iter().map(|view| view.id()).collect::<Vec<_>>();
                anyhow!(
                    "No admin view '{}'. Available views: {}",
                    view_id,
                    known.join(", ")
                )
            })?;

        println!("{}", view.fragment());

        Ok(())
    }
}
