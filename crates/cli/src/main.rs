// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use anyhow::Result;

use commands::{
    build::BuildCommandDefinition,
    command::{CommandDefinition, SubcommandDefinition},
    fragment::FragmentCommandDefinition,
};

mod commands;
mod config;
mod logging_tracing;

fn main() -> Result<()> {
    logging_tracing::init()?;

    let subcommand_definition = SubcommandDefinition::new(
        "admin-view",
        "Build admin view configurations from content types and GraphQL fragments",
        vec![
            Box::new(BuildCommandDefinition {}),
            Box::new(FragmentCommandDefinition {}),
        ],
    );

    let command = subcommand_definition
        .command()
        .version(env!("CARGO_PKG_VERSION"));

    let matches = command.get_matches();

    let config = config::load_config()?;

    subcommand_definition.execute(&matches, &config)
}
