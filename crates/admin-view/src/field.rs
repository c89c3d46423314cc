// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::{types::Directive, Positioned};
use async_graphql_value::ConstValue;
use indexmap::IndexMap;
use serde::Serialize;

use crate::{content_type::ContentTypeField, error::AdminViewError};

/// Describes how one field renders in the generic admin UI.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdminViewField {
    pub id: String,
    pub graphql_type: String,
    pub ui_field_type: String,
    pub display_name: String,
    pub show_in_form: bool,
    pub show_in_list: bool,
    pub is_list_of: bool,
    pub is_non_null: bool,
    pub is_required: bool,
    pub description: Option<String>,
    /// Directives found on the selection, kept for later decoration stages.
    pub directives: Vec<FieldDirective>,
}

impl AdminViewField {
    /// A descriptor for a content-type field. Editable in forms, hidden in lists.
    pub fn from_content_type_field(field: &ContentTypeField) -> Self {
        Self {
            id: field.id.clone(),
            graphql_type: field.return_type.clone(),
            ui_field_type: field.field_type.clone(),
            display_name: field.display_name().to_string(),
            show_in_form: true,
            show_in_list: false,
            is_list_of: field.list_of,
            is_non_null: field.non_null,
            is_required: field.required,
            description: field.description.clone(),
            directives: vec![],
        }
    }

    /// A descriptor that is not backed by a content-type field (such as `id` or a field
    /// selected only through a fragment). Shown in lists, not in forms.
    pub fn computed(
        id: impl Into<String>,
        graphql_type: impl Into<String>,
        ui_field_type: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            graphql_type: graphql_type.into(),
            ui_field_type: ui_field_type.into(),
            display_name: display_name.into(),
            show_in_form: false,
            show_in_list: true,
            is_list_of: false,
            is_non_null: false,
            is_required: false,
            description: None,
            directives: vec![],
        }
    }

    /// Take over the form and type-modifier settings of the content-type field this
    /// descriptor replaces.
    pub(crate) fn inherit_from(&mut self, content_type_field: AdminViewField) {
        self.show_in_form = content_type_field.show_in_form;
        self.is_list_of = content_type_field.is_list_of;
        self.is_non_null = content_type_field.is_non_null;
        self.is_required = content_type_field.is_required;
        self.description = content_type_field.description;
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FieldDirective {
    pub name: String,
    pub arguments: IndexMap<String, ConstValue>,
}

impl FieldDirective {
    pub(crate) fn from_directive(
        directive: &Positioned<Directive>,
    ) -> Result<Self, AdminViewError> {
        let arguments = directive
            .node
            .arguments
            .iter()
            .map(|(name, value)| {
                let value = value.node.clone().into_const_with(|variable| {
                    Err(AdminViewError::VariableInDirective(
                        variable.to_string(),
                        value.pos,
                    ))
                })?;
                Ok((name.node.to_string(), value))
            })
            .collect::<Result<IndexMap<_, _>, AdminViewError>>()?;

        Ok(Self {
            name: directive.node.name.node.to_string(),
            arguments,
        })
    }

    pub fn argument(&self, name: &str) -> Option<&ConstValue> {
        self.arguments.get(name)
    }
}
