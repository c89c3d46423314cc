// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::{Path, PathBuf};

use admin_view::{parse_admin_document, AdminView, AdminViewTypeManager, ContentType};
use anyhow::{anyhow, Result};
use clap::ArgMatches;
use tracing::info;

use crate::commands::command::{get, get_required};
use crate::config::Config;

/// Build every view of the document given on the command line.
pub(super) fn build_views(matches: &ArgMatches, config: &Config) -> Result<Vec<AdminView>> {
    let document_path: PathBuf = get_required(matches, "document")?;
    let content_types_path: Option<PathBuf> =
        get(matches, "content-types").or_else(|| config.build.content_types.clone());

    let source = std::fs::read_to_string(&document_path)
        .map_err(|e| anyhow!("Failed to read file '{}': {}", document_path.display(), e))?;
    let document = parse_admin_document(&source).map_err(|e| {
        let pos = e.position1();
        anyhow!(
            "{}:{}:{}: {}",
            document_path.display(),
            pos.line,
            pos.column,
            e
        )
    })?;

    let content_types = match content_types_path {
        Some(path) => load_content_types(&path)?,
        None => vec![],
    };

    let mut manager = AdminViewTypeManager::with_builtin_types();
    manager.set_default_views(config.build.default_views);

    let views = manager.build_views(&document, &content_types)?;
    info!(views = views.len(), document = %document_path.display(), "Built admin views");

    Ok(views)
}

pub(super) fn load_content_types(path: &Path) -> Result<Vec<ContentType>> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("Failed to read file '{}': {}", path.display(), e))?;

    serde_json::from_str(&json)
        .map_err(|e| anyhow!("Failed to parse content types '{}': {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn content_types_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{ "id": "Page", "fields": [{{ "id": "title", "type": "text" }}] }}]"#
        )
        .unwrap();

        let content_types = load_content_types(file.path()).unwrap();

        assert_eq!(content_types.len(), 1);
        assert_eq!(content_types[0].fields[0].id, "title");
    }

    #[test]
    fn malformed_content_types() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "id": "Page" }}"#).unwrap();

        let error = load_content_types(file.path()).unwrap_err();

        assert!(error.to_string().starts_with("Failed to parse content types"));
    }
}
