// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::Pos;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdminViewError {
    #[error("{0}")]
    DocumentParsingFailed(String, Pos, Option<Pos>),

    #[error("Fragment definition '{0}' not found")]
    FragmentDefinitionNotFound(String, Pos),

    #[error("Inline fragments are not supported at the top level of an admin view fragment")]
    InlineFragmentNotSupported(Pos),

    #[error("Cyclic fragment spread: {}", .0.join(" -> "))]
    CyclicFragmentSpread(Vec<String>, Pos),

    #[error("Fragment '{0}' has no selections left after removing password fields")]
    EmptySelectionSet(String),

    #[error("An admin view needs a content type or a fragment definition")]
    MissingDefinition,

    #[error("Variable '{0}' cannot be used in an admin view directive")]
    VariableInDirective(String, Pos),

    #[error("Invalid admin view settings: {0}")]
    MalformedSettings(String),

    #[error("Fragment '{0}' has more than one admin view directive")]
    MultipleAdminViewDirectives(String, Pos),

    #[error("Admin view type for directive '@{0}' is already registered")]
    DuplicateAdminViewType(String),
}

impl AdminViewError {
    pub fn position1(&self) -> Pos {
        match self {
            AdminViewError::DocumentParsingFailed(_, pos, _) => *pos,
            AdminViewError::FragmentDefinitionNotFound(_, pos) => *pos,
            AdminViewError::InlineFragmentNotSupported(pos) => *pos,
            AdminViewError::CyclicFragmentSpread(_, pos) => *pos,
            AdminViewError::VariableInDirective(_, pos) => *pos,
            AdminViewError::MultipleAdminViewDirectives(_, pos) => *pos,
            AdminViewError::EmptySelectionSet(_)
            | AdminViewError::MissingDefinition
            | AdminViewError::MalformedSettings(_)
            | AdminViewError::DuplicateAdminViewType(_) => Pos::default(),
        }
    }

    pub fn position2(&self) -> Option<Pos> {
        match self {
            AdminViewError::DocumentParsingFailed(_, _, pos) => *pos,
            _ => None,
        }
    }
}
