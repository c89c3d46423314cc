// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::{HashMap, HashSet};

use async_graphql_parser::{
    types::{Field, FragmentDefinition, FragmentSpread, Selection, SelectionSet},
    Pos, Positioned,
};
use async_graphql_value::Name;
use indexmap::IndexMap;
use tracing::trace;

use crate::{
    error::AdminViewError,
    field::{AdminViewField, FieldDirective},
    printer::print_fragment,
};

/// Client fragment text along with the fields selected by it.
#[derive(Debug)]
pub(crate) struct ResolvedFragment {
    pub fragment: String,
    pub fields: Vec<AdminViewField>,
}

/// Walks an admin view fragment, inlining every fragment spread.
///
/// Content-type fields picked up by a selection (at any spread depth) are removed from
/// `content_type_fields`, so the caller can append the untouched ones afterwards. Named
/// fragments are never modified: each spread works on its own deep copy.
pub(crate) struct FragmentResolver<'a> {
    named_fragments: &'a HashMap<Name, Positioned<FragmentDefinition>>,
    content_type_fields: &'a mut IndexMap<String, AdminViewField>,
    password_fields: &'a HashSet<String>,
    fields: Vec<AdminViewField>,
    /// Printed fragment definitions, innermost first.
    blocks: Vec<String>,
    emitted: HashSet<Name>,
    /// Fragments being expanded on the current path (for cycle detection).
    expansion_path: Vec<Name>,
}

impl<'a> FragmentResolver<'a> {
    pub fn new(
        named_fragments: &'a HashMap<Name, Positioned<FragmentDefinition>>,
        content_type_fields: &'a mut IndexMap<String, AdminViewField>,
        password_fields: &'a HashSet<String>,
    ) -> Self {
        Self {
            named_fragments,
            content_type_fields,
            password_fields,
            fields: vec![],
            blocks: vec![],
            emitted: HashSet::new(),
            expansion_path: vec![],
        }
    }

    pub fn resolve(
        mut self,
        name: &Name,
        definition: &FragmentDefinition,
    ) -> Result<ResolvedFragment, AdminViewError> {
        self.resolve_fragment(name, definition.clone(), Pos::default())?;

        Ok(ResolvedFragment {
            fragment: self.blocks.join("\n"),
            fields: self.fields,
        })
    }

    fn resolve_fragment(
        &mut self,
        name: &Name,
        mut definition: FragmentDefinition,
        pos: Pos,
    ) -> Result<(), AdminViewError> {
        self.enter(name, pos)?;
        self.elide_password_selections(name, &mut definition)?;

        for selection in &definition.selection_set.node.items {
            match &selection.node {
                Selection::FragmentSpread(spread) => {
                    let (spread_name, spread_definition) = self.named_fragment(spread)?;
                    trace!(fragment = %name, spread = %spread_name, "Inlining fragment spread");
                    self.resolve_fragment(&spread_name, spread_definition, spread.pos)?;
                }
                Selection::Field(field) => {
                    self.add_field(&field.node)?;
                    self.include_nested_spreads(&field.node.selection_set.node)?;
                }
                Selection::InlineFragment(inline_fragment) => {
                    return Err(AdminViewError::InlineFragmentNotSupported(
                        inline_fragment.pos,
                    ));
                }
            }
        }

        self.finish(name, definition);
        Ok(())
    }

    fn add_field(&mut self, field: &Field) -> Result<(), AdminViewError> {
        let field_name = field.name.node.as_str();
        let id = field
            .alias
            .as_ref()
            .map(|alias| alias.node.to_string())
            .unwrap_or_else(|| field_name.to_string());

        // The schema decides how the field renders, the selection decides what it is called.
        let (ui_field_type, display_name) = match self.content_type_fields.get(field_name) {
            Some(content_type_field) => (
                content_type_field.ui_field_type.clone(),
                content_type_field.display_name.clone(),
            ),
            None => {
                let ui_field_type = if field_name == "id" { "id" } else { "text" };
                (ui_field_type.to_string(), id.clone())
            }
        };

        let mut admin_field = AdminViewField::computed(&id, field_name, ui_field_type, display_name);

        if let Some(content_type_field) = self.content_type_fields.shift_remove(&id) {
            admin_field.inherit_from(content_type_field);
        }

        admin_field.directives = field
            .directives
            .iter()
            .map(FieldDirective::from_directive)
            .collect::<Result<Vec<_>, _>>()?;

        self.fields.push(admin_field);
        Ok(())
    }

    /// Spreads below the top level of a fragment (inside a field's sub-selection) are not
    /// admin view fields, but the client document still needs their definitions.
    fn include_nested_spreads(&mut self, selection_set: &SelectionSet) -> Result<(), AdminViewError> {
        for selection in &selection_set.items {
            match &selection.node {
                Selection::Field(field) => {
                    self.include_nested_spreads(&field.node.selection_set.node)?
                }
                Selection::InlineFragment(inline_fragment) => {
                    self.include_nested_spreads(&inline_fragment.node.selection_set.node)?
                }
                Selection::FragmentSpread(spread) => {
                    let (spread_name, mut spread_definition) = self.named_fragment(spread)?;

                    if self.emitted.contains(&spread_name) {
                        continue;
                    }

                    self.enter(&spread_name, spread.pos)?;
                    self.elide_password_selections(&spread_name, &mut spread_definition)?;
                    self.include_nested_spreads(&spread_definition.selection_set.node)?;
                    self.finish(&spread_name, spread_definition);
                }
            }
        }

        Ok(())
    }

    fn named_fragment(
        &self,
        spread: &Positioned<FragmentSpread>,
    ) -> Result<(Name, FragmentDefinition), AdminViewError> {
        let name = &spread.node.fragment_name.node;

        self.named_fragments
            .get(name)
            .map(|definition| (name.clone(), definition.node.clone()))
            .ok_or_else(|| {
                AdminViewError::FragmentDefinitionNotFound(name.to_string(), spread.pos)
            })
    }

    /// Drop password selections from the top level of `definition`. Every path that prints a
    /// block goes through here first.
    fn elide_password_selections(
        &self,
        name: &Name,
        definition: &mut FragmentDefinition,
    ) -> Result<(), AdminViewError> {
        let password_fields = self.password_fields;
        definition
            .selection_set
            .node
            .items
            .retain(|selection| !is_password_selection(selection, password_fields));

        if definition.selection_set.node.items.is_empty() {
            return Err(AdminViewError::EmptySelectionSet(name.to_string()));
        }

        Ok(())
    }

    fn enter(&mut self, name: &Name, pos: Pos) -> Result<(), AdminViewError> {
        if self.expansion_path.contains(name) {
            let cycle = self
                .expansion_path
                .iter()
                .chain(std::iter::once(name))
                .map(|name| name.to_string())
                .collect();
            return Err(AdminViewError::CyclicFragmentSpread(cycle, pos));
        }

        self.expansion_path.push(name.clone());
        Ok(())
    }

    fn finish(&mut self, name: &Name, mut definition: FragmentDefinition) {
        self.expansion_path.pop();

        if self.emitted.insert(name.clone()) {
            strip_directives(&mut definition);
            self.blocks.push(print_fragment(name, &definition));
        }
    }
}

fn is_password_selection(selection: &Positioned<Selection>, password_fields: &HashSet<String>) -> bool {
    match &selection.node {
        Selection::Field(field) => password_fields.contains(field.node.name.node.as_str()),
        _ => false,
    }
}

/// Directives only steer the build, so none of them may reach the client.
fn strip_directives(definition: &mut FragmentDefinition) {
    definition.directives.clear();
    strip_selection_set_directives(&mut definition.selection_set.node);
}

fn strip_selection_set_directives(selection_set: &mut SelectionSet) {
    for selection in selection_set.items.iter_mut() {
        match &mut selection.node {
            Selection::Field(field) => {
                field.node.directives.clear();
                strip_selection_set_directives(&mut field.node.selection_set.node);
            }
            Selection::FragmentSpread(spread) => spread.node.directives.clear(),
            Selection::InlineFragment(inline_fragment) => {
                inline_fragment.node.directives.clear();
                strip_selection_set_directives(&mut inline_fragment.node.selection_set.node);
            }
        }
    }
}
