use std::path::PathBuf;

#[derive(Debug, PartialEq, Default)]
pub struct Config {
    pub build: BuildConfig,
}

#[derive(Debug, PartialEq)]
pub struct BuildConfig {
    /// Content types used when none are given on the command line.
    pub content_types: Option<PathBuf>,
    /// Whether content types without a declared view get a default one.
    pub default_views: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            content_types: None,
            default_views: true,
        }
    }
}
