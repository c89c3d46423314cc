// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::{types::ExecutableDocument, Pos};
use tracing::{error, instrument};

use crate::error::AdminViewError;

/// Appended so that documents holding only fragments pass the parser's "at least one
/// operation" rule. Going last keeps every position of the source unchanged.
const PLACEHOLDER_OPERATION: &str = "query __AdminViewPlaceholder { __typename }";

/// Parse a document of admin view fragments.
///
/// Any operations in the document are ignored by the admin view build; only its fragments are
/// used.
#[instrument(name = "admin_view::parse_admin_document", skip(source))]
pub fn parse_admin_document(source: &str) -> Result<ExecutableDocument, AdminViewError> {
    async_graphql_parser::parse_query(format!("{source}\n{PLACEHOLDER_OPERATION}")).map_err(
        |error| {
            error!(%error, "Failed to parse admin view document");
            let (message, pos1, pos2) = match error {
                async_graphql_parser::Error::Syntax {
                    message,
                    start,
                    end,
                } => (format!("Syntax error: {message}"), start, end),
                async_graphql_parser::Error::MultipleOperations {
                    anonymous,
                    operation,
                } => (
                    "Anonymous operations cannot be combined with admin view fragments"
                        .to_string(),
                    anonymous,
                    Some(operation),
                ),
                async_graphql_parser::Error::OperationDuplicated {
                    operation,
                    first,
                    second,
                } => (format!("Operation {operation} duplicated"), first, Some(second)),
                async_graphql_parser::Error::FragmentDuplicated {
                    fragment,
                    first,
                    second,
                } => (
                    format!("Fragment {fragment} duplicated"),
                    first,
                    Some(second),
                ),
                _ => ("Unknown error".to_string(), Pos::default(), None),
            };

            AdminViewError::DocumentParsingFailed(message, pos1, pos2)
        },
    )
}
