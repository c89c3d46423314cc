// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::{HashMap, HashSet};

use async_graphql_parser::{types::FragmentDefinition, Positioned};
use async_graphql_value::Name;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::{
    content_type::ContentType,
    error::AdminViewError,
    field::AdminViewField,
    resolver::FragmentResolver,
    settings::{AdminViewGroup, AdminViewSettings, DEFAULT_TITLE_PATTERN, DEFAULT_VIEW_NAME},
};

/// A configuration the admin client uses to list and edit one kind of content.
///
/// `fragment` is what the client sends to the server, while `fields` describes how to render
/// the result. The two may differ: a default view only fetches `id`, but still describes every
/// content-type field for its forms.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdminView {
    id: String,
    return_type: String,
    name: String,
    title_pattern: String,
    icon: Option<String>,
    category: String,
    #[serde(rename = "type")]
    type_name: String,
    permissions: Vec<String>,
    config: Map<String, Value>,
    groups: Vec<AdminViewGroup>,
    fragment: String,
    fields: Vec<AdminViewField>,
}

impl AdminView {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn return_type(&self) -> &str {
        &self.return_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title_pattern(&self) -> &str {
        &self.title_pattern
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// The GraphQL type condition of the view's fragment.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn permissions(&self) -> &[String] {
        &self.permissions
    }

    pub fn config(&self) -> &Map<String, Value> {
        &self.config
    }

    pub fn groups(&self) -> &[AdminViewGroup] {
        &self.groups
    }

    /// Directive-free fragment text (one or more fragment definitions) for the client.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    pub fn fields(&self) -> &[AdminViewField] {
        &self.fields
    }

    pub fn field(&self, id: &str) -> Option<&AdminViewField> {
        self.fields.iter().find(|field| field.id == id)
    }

    pub fn set_title_pattern(&mut self, title_pattern: impl Into<String>) -> &mut Self {
        self.title_pattern = title_pattern.into();
        self
    }

    pub fn set_icon(&mut self, icon: Option<String>) -> &mut Self {
        self.icon = icon;
        self
    }

    pub fn set_permissions(&mut self, permissions: Vec<String>) -> &mut Self {
        self.permissions = permissions;
        self
    }

    pub fn set_config(&mut self, config: Map<String, Value>) -> &mut Self {
        self.config = config;
        self
    }

    pub fn set_groups(&mut self, groups: Vec<AdminViewGroup>) -> &mut Self {
        self.groups = groups;
        self
    }
}

/// Builds an [AdminView] from a content type, a fragment definition, or both.
///
/// ```ignore
/// let view = AdminViewBuilder::new("PageResult", "table")
///     .content_type(&page)
///     .fragment(&name, &definition)
///     .named_fragments(&document.fragments)
///     .build()?;
/// ```
pub struct AdminViewBuilder<'a> {
    return_type: String,
    category: String,
    content_type: Option<&'a ContentType>,
    fragment: Option<(&'a Name, &'a FragmentDefinition)>,
    settings: AdminViewSettings,
    config: Map<String, Value>,
    named_fragments: Option<&'a HashMap<Name, Positioned<FragmentDefinition>>>,
}

impl<'a> AdminViewBuilder<'a> {
    pub fn new(return_type: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            return_type: return_type.into(),
            category: category.into(),
            content_type: None,
            fragment: None,
            settings: AdminViewSettings::default(),
            config: Map::new(),
            named_fragments: None,
        }
    }

    pub fn content_type(mut self, content_type: &'a ContentType) -> Self {
        self.content_type = Some(content_type);
        self
    }

    pub fn fragment(mut self, name: &'a Name, definition: &'a FragmentDefinition) -> Self {
        self.fragment = Some((name, definition));
        self
    }

    pub fn settings(mut self, settings: AdminViewSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn config(mut self, config: Map<String, Value>) -> Self {
        self.config = config;
        self
    }

    /// Fragments available to spreads in the view's fragment.
    pub fn named_fragments(
        mut self,
        named_fragments: &'a HashMap<Name, Positioned<FragmentDefinition>>,
    ) -> Self {
        self.named_fragments = Some(named_fragments);
        self
    }

    #[instrument(name = "AdminViewBuilder::build", skip_all)]
    pub fn build(self) -> Result<AdminView, AdminViewError> {
        let AdminViewSettings {
            name,
            title_pattern,
            icon,
            groups,
        } = self.settings;

        let name = name
            .or_else(|| {
                self.content_type
                    .and_then(|content_type| content_type.name())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| DEFAULT_VIEW_NAME.to_string());
        let title_pattern = title_pattern.unwrap_or_else(|| DEFAULT_TITLE_PATTERN.to_string());

        let mut content_type_fields = content_type_fields(self.content_type);

        let (id, type_name, fragment, fields) = match (self.fragment, self.content_type) {
            (Some((fragment_name, definition)), content_type) => {
                let password_fields: HashSet<String> = content_type
                    .map(|content_type| {
                        content_type
                            .password_field_ids()
                            .map(str::to_string)
                            .collect()
                    })
                    .unwrap_or_default();
                let no_fragments = HashMap::new();

                let resolved = FragmentResolver::new(
                    self.named_fragments.unwrap_or(&no_fragments),
                    &mut content_type_fields,
                    &password_fields,
                )
                .resolve(fragment_name, definition)?;

                let mut fields = resolved.fields;
                fields.extend(content_type_fields.into_values());

                (
                    fragment_name.to_string(),
                    definition.type_condition.node.on.node.to_string(),
                    resolved.fragment,
                    fields,
                )
            }
            (None, Some(content_type)) => {
                let id = format!("{}defaultAdminView", content_type.id);
                let type_name = content_type.id.clone();
                let fragment = format!("fragment {id} on {type_name} {{ id }}");

                let fields = std::iter::once(AdminViewField::computed("id", "id", "id", "#"))
                    .chain(content_type_fields.into_values())
                    .collect();

                (id, type_name, fragment, fields)
            }
            (None, None) => return Err(AdminViewError::MissingDefinition),
        };

        debug!(view = %id, fields = fields.len(), "Built admin view");

        Ok(AdminView {
            id,
            return_type: self.return_type,
            name,
            title_pattern,
            icon,
            category: self.category,
            type_name,
            permissions: vec![],
            config: self.config,
            groups,
            fragment,
            fields,
        })
    }
}

/// Descriptors for all non-password content-type fields, keyed by field id in schema order.
fn content_type_fields(content_type: Option<&ContentType>) -> IndexMap<String, AdminViewField> {
    content_type
        .map(|content_type| {
            content_type
                .fields
                .iter()
                .filter(|field| !field.is_password())
                .map(|field| {
                    (
                        field.id.clone(),
                        AdminViewField::from_content_type_field(field),
                    )
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use crate::{content_type::ContentTypeField, document::parse_admin_document};

    use super::*;

    fn page() -> ContentType {
        let mut title = ContentTypeField::new("title", "text");
        title.name = Some("Title".to_string());
        title.required = true;
        title.description = Some("Headline".to_string());

        let mut body = ContentTypeField::new("body", "textarea");
        body.name = Some("Body".to_string());

        let mut content_type = ContentType::new(
            "Page",
            vec![
                title,
                body,
                ContentTypeField::new("secret", "password"),
                ContentTypeField::new("slug", "text"),
            ],
        );
        content_type.name = Some("Pages".to_string());
        content_type
    }

    fn ids(view: &AdminView) -> Vec<&str> {
        view.fields().iter().map(|field| field.id.as_str()).collect()
    }

    fn build_with_fragment(
        source: &str,
        name: &str,
        content_type: Option<&ContentType>,
    ) -> Result<AdminView, AdminViewError> {
        let document = parse_admin_document(source).unwrap();
        let name = Name::new(name);
        let definition = &document.fragments[&name].node;

        let builder = AdminViewBuilder::new("PageResult", "table")
            .fragment(&name, definition)
            .named_fragments(&document.fragments);

        match content_type {
            Some(content_type) => builder.content_type(content_type).build(),
            None => builder.build(),
        }
    }

    #[test]
    fn default_view() {
        let page = page();

        let view = AdminViewBuilder::new("PageResult", "table")
            .content_type(&page)
            .build()
            .unwrap();

        assert_eq!(view.id(), "PagedefaultAdminView");
        assert_eq!(view.type_name(), "Page");
        assert_eq!(view.name(), "Pages");
        assert_eq!(view.title_pattern(), DEFAULT_TITLE_PATTERN);
        assert_eq!(view.icon(), None);
        assert_eq!(
            view.fragment(),
            "fragment PagedefaultAdminView on Page { id }"
        );
        // Three non-password fields and the synthetic id
        assert_eq!(ids(&view), vec!["id", "title", "body", "slug"]);
        assert_eq!(view.fields()[0], AdminViewField::computed("id", "id", "id", "#"));
    }

    #[test]
    fn neither_content_type_nor_fragment() {
        assert!(matches!(
            AdminViewBuilder::new("PageResult", "table").build(),
            Err(AdminViewError::MissingDefinition)
        ));
    }

    #[test]
    fn selected_fields_come_first() {
        let page = page();

        let view =
            build_with_fragment("fragment PageList on Page { body title }", "PageList", Some(&page))
                .unwrap();

        assert_eq!(view.id(), "PageList");
        assert_eq!(view.type_name(), "Page");
        assert_eq!(view.return_type(), "PageResult");
        assert_eq!(view.category(), "table");
        assert_eq!(ids(&view), vec!["body", "title", "slug"]);

        let title = view.field("title").unwrap();
        assert_eq!(title.display_name, "Title");
        assert_eq!(title.graphql_type, "title");
        assert!(title.show_in_form);
        assert!(title.show_in_list);
        assert!(title.is_required);
        assert_eq!(title.description.as_deref(), Some("Headline"));

        let slug = view.field("slug").unwrap();
        assert!(!slug.show_in_list);
        assert_eq!(slug.graphql_type, "String");
    }

    #[test]
    fn aliased_field() {
        let page = page();

        let view = build_with_fragment(
            "fragment PageList on Page { renamed: body }",
            "PageList",
            Some(&page),
        )
        .unwrap();

        let renamed = view.field("renamed").unwrap();
        assert_eq!(renamed.display_name, "Body");
        assert_eq!(renamed.ui_field_type, "textarea");
        assert_eq!(renamed.graphql_type, "body");
        // The alias does not consume the schema field it points at
        assert!(!renamed.show_in_form);
        assert_eq!(ids(&view), vec!["renamed", "title", "body", "slug"]);
        assert_eq!(view.fragment(), "fragment PageList on Page { renamed: body }");
    }

    #[test]
    fn fields_unknown_to_the_schema() {
        let view = build_with_fragment(
            "fragment PageList on Page { id created }",
            "PageList",
            None,
        )
        .unwrap();

        assert_eq!(view.name(), DEFAULT_VIEW_NAME);
        assert_eq!(
            view.fields(),
            &[
                AdminViewField::computed("id", "id", "id", "id"),
                AdminViewField::computed("created", "created", "text", "created"),
            ]
        );
    }

    #[test]
    fn password_fields_never_appear() {
        let page = page();

        let view = build_with_fragment(
            "fragment PageList on Page { title secret }",
            "PageList",
            Some(&page),
        )
        .unwrap();

        assert!(view.field("secret").is_none());
        assert_eq!(view.fragment(), "fragment PageList on Page { title }");

        let default_view = AdminViewBuilder::new("PageResult", "table")
            .content_type(&page)
            .build()
            .unwrap();
        assert!(default_view.field("secret").is_none());
    }

    #[test]
    fn settings_override_defaults() {
        let page = page();

        let view = AdminViewBuilder::new("PageResult", "table")
            .content_type(&page)
            .settings(AdminViewSettings {
                name: Some("All pages".to_string()),
                title_pattern: Some("{{ title }}".to_string()),
                icon: Some("file".to_string()),
                groups: vec![AdminViewGroup {
                    name: "Content".to_string(),
                    icon: None,
                    extra: Map::new(),
                }],
            })
            .build()
            .unwrap();

        assert_eq!(view.name(), "All pages");
        assert_eq!(view.title_pattern(), "{{ title }}");
        assert_eq!(view.icon(), Some("file"));
        assert_eq!(view.groups().len(), 1);
    }

    #[test]
    fn decoration_setters() {
        let page = page();
        let mut view = AdminViewBuilder::new("PageResult", "table")
            .content_type(&page)
            .build()
            .unwrap();

        let mut config = Map::new();
        config.insert("limit".to_string(), Value::from(20));

        view.set_title_pattern("{{ slug }}")
            .set_icon(Some("page".to_string()))
            .set_permissions(vec!["query".to_string()])
            .set_config(config.clone())
            .set_groups(vec![]);

        assert_eq!(view.title_pattern(), "{{ slug }}");
        assert_eq!(view.icon(), Some("page"));
        assert_eq!(view.permissions(), &["query".to_string()]);
        assert_eq!(view.config(), &config);
    }

    #[test]
    fn deterministic() {
        let page = page();
        let source = r#"
            fragment PageList on Page { slug ...PageMeta title @hidden }
            fragment PageMeta on Page { id body }
        "#;

        let first = build_with_fragment(source, "PageList", Some(&page)).unwrap();
        let second = build_with_fragment(source, "PageList", Some(&page)).unwrap();

        assert_eq!(first, second);
        assert_eq!(ids(&first), vec!["slug", "id", "body", "title"]);
    }

    #[test]
    fn serializes_for_the_client() {
        let page = page();
        let view = build_with_fragment("fragment PageList on Page { title }", "PageList", Some(&page))
            .unwrap();

        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["id"], "PageList");
        assert_eq!(json["returnType"], "PageResult");
        assert_eq!(json["type"], "Page");
        assert_eq!(json["fragment"], "fragment PageList on Page { title }");
        assert_eq!(json["fields"][0]["displayName"], "Title");
        assert_eq!(json["config"], serde_json::json!({}));
    }
}
