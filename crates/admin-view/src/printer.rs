// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Canonical single-line GraphQL text for fragment definitions.
//!
//! ```graphql
//! fragment PageList on Page { id headline: title author { name } ...PageMeta }
//! ```

use async_graphql_parser::{
    types::{Directive, Field, FragmentDefinition, Selection, SelectionSet},
    Positioned,
};
use async_graphql_value::{Name, Value};

pub fn print_fragment(name: &str, definition: &FragmentDefinition) -> String {
    format!(
        "fragment {name} on {}{} {}",
        definition.type_condition.node.on.node,
        print_directives(&definition.directives),
        print_selection_set(&definition.selection_set.node)
    )
}

fn print_selection_set(selection_set: &SelectionSet) -> String {
    let items = selection_set
        .items
        .iter()
        .map(|selection| print_selection(&selection.node))
        .collect::<Vec<_>>();

    format!("{{ {} }}", items.join(" "))
}

fn print_selection(selection: &Selection) -> String {
    match selection {
        Selection::Field(field) => print_field(&field.node),
        Selection::FragmentSpread(spread) => format!(
            "...{}{}",
            spread.node.fragment_name.node,
            print_directives(&spread.node.directives)
        ),
        Selection::InlineFragment(inline_fragment) => {
            let type_condition = inline_fragment
                .node
                .type_condition
                .as_ref()
                .map(|condition| format!(" on {}", condition.node.on.node))
                .unwrap_or_default();

            format!(
                "...{type_condition}{} {}",
                print_directives(&inline_fragment.node.directives),
                print_selection_set(&inline_fragment.node.selection_set.node)
            )
        }
    }
}

fn print_field(field: &Field) -> String {
    let alias = field
        .alias
        .as_ref()
        .map(|alias| format!("{}: ", alias.node))
        .unwrap_or_default();

    // Leaf fields have an empty selection set
    let selection_set = if field.selection_set.node.items.is_empty() {
        String::new()
    } else {
        format!(" {}", print_selection_set(&field.selection_set.node))
    };

    format!(
        "{alias}{}{}{}{selection_set}",
        field.name.node,
        print_arguments(&field.arguments),
        print_directives(&field.directives)
    )
}

fn print_arguments(arguments: &[(Positioned<Name>, Positioned<Value>)]) -> String {
    if arguments.is_empty() {
        return String::new();
    }

    let arguments = arguments
        .iter()
        .map(|(name, value)| format!("{}: {}", name.node, value.node))
        .collect::<Vec<_>>();

    format!("({})", arguments.join(", "))
}

fn print_directives(directives: &[Positioned<Directive>]) -> String {
    directives
        .iter()
        .map(|directive| {
            format!(
                " @{}{}",
                directive.node.name.node,
                print_arguments(&directive.node.arguments)
            )
        })
        .collect()
}
