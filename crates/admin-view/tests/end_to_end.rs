// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use admin_view::{
    parse_admin_document, AdminViewBuilder, AdminViewTypeManager, ContentType, ContentTypeField,
};
use async_graphql_value::Name;

fn page() -> ContentType {
    ContentType::new(
        "Page",
        vec![
            ContentTypeField::new("title", "text"),
            ContentTypeField::new("secret", "password"),
        ],
    )
}

#[test]
fn page_with_password() {
    let page = page();
    let document = parse_admin_document("fragment F on Page { title }").unwrap();
    let name = Name::new("F");

    let view = AdminViewBuilder::new("PageResult", "table")
        .content_type(&page)
        .fragment(&name, &document.fragments[&name].node)
        .named_fragments(&document.fragments)
        .build()
        .unwrap();

    assert_eq!(view.fragment(), "fragment F on Page { title }");
    assert_eq!(view.fields().len(), 1);

    let title = &view.fields()[0];
    assert_eq!(title.id, "title");
    assert_eq!(title.ui_field_type, "text");
    assert_eq!(title.display_name, "title");
    assert!(title.show_in_form);
}

#[test]
fn default_view_without_fragment() {
    let page = page();

    let view = AdminViewBuilder::new("PageResult", "table")
        .content_type(&page)
        .build()
        .unwrap();

    // One non-password field plus the synthetic id
    assert_eq!(view.fields().len(), 2);
    assert_eq!(view.fragment(), "fragment PagedefaultAdminView on Page { id }");
}

#[test]
fn document_with_three_levels_of_spreads() {
    let document = parse_admin_document(
        r#"
        # Pages, with their metadata
        fragment Pages on Page @table(settings: { titlePattern: "{{ title }}" }) {
            title @sortable
            ...PageMeta @include(if: true)
        }

        fragment PageMeta on Page @internal {
            created
            ...Identity
        }

        fragment Identity on Page { id }
        "#,
    )
    .unwrap();

    let views = AdminViewTypeManager::with_builtin_types()
        .build_views(&document, &[page()])
        .unwrap();

    assert_eq!(views.len(), 1);

    let view = &views[0];
    let blocks = view.fragment().lines().collect::<Vec<_>>();
    assert_eq!(
        blocks,
        vec![
            "fragment Identity on Page { id }",
            "fragment PageMeta on Page { created ...Identity }",
            "fragment Pages on Page { title ...PageMeta }",
        ]
    );
    assert!(!view.fragment().contains('@'));
    assert_eq!(view.title_pattern(), "{{ title }}");
    assert_eq!(
        view.fields()
            .iter()
            .map(|field| field.id.as_str())
            .collect::<Vec<_>>(),
        vec!["title", "created", "id"]
    );
    assert_eq!(view.fields()[0].directives[0].name, "sortable");

    let json = serde_json::to_value(view).unwrap();
    assert_eq!(json["fields"][0]["directives"][0]["name"], "sortable");
}
