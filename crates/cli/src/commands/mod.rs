//! Top level subcommands

pub(crate) mod build;
pub(crate) mod command;
pub(crate) mod fragment;
pub(super) mod util;
