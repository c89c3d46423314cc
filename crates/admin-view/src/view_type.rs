// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Admin view types and the registry that turns a document of annotated fragments into views.
//!
//! A fragment becomes an admin view when it carries the directive of a registered type:
//!
//! ```graphql
//! fragment PageList on Page @table(settings: { name: "Pages", icon: "file" }, config: { limit: 20 }) {
//!     title
//!     ...PageMeta
//! }
//!
//! fragment PageMeta on Page { id }
//! ```
//!
//! Fragments without such a directive (`PageMeta` above) are only available for spreading.

use async_graphql_parser::types::ExecutableDocument;
use async_graphql_value::{ConstValue, Name};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::{
    admin_view::{AdminView, AdminViewBuilder},
    content_type::ContentType,
    error::AdminViewError,
    field::FieldDirective,
    settings::AdminViewSettings,
};

/// Directive of the type used for the default view of content types without any view.
pub const DEFAULT_ADMIN_VIEW_TYPE: &str = "table";

pub trait AdminViewType: Send + Sync {
    /// Name of the fragment directive (without the `@`) that marks views of this type.
    fn directive_name(&self) -> &'static str;

    fn category(&self) -> &'static str;

    /// The GraphQL type the view's query returns, given its fragment's type condition.
    fn return_type(&self, type_name: &str) -> String;

    /// Adjust a view after it has been built.
    fn decorate(&self, _view: &mut AdminView) {}
}

/// Paginated list of content.
pub struct TableAdminViewType;

impl AdminViewType for TableAdminViewType {
    fn directive_name(&self) -> &'static str {
        "table"
    }

    fn category(&self) -> &'static str {
        "table"
    }

    fn return_type(&self, type_name: &str) -> String {
        format!("{type_name}Result")
    }
}

/// A single content item, edited in place.
pub struct SingleContentAdminViewType;

impl AdminViewType for SingleContentAdminViewType {
    fn directive_name(&self) -> &'static str {
        "single"
    }

    fn category(&self) -> &'static str {
        "single"
    }

    fn return_type(&self, type_name: &str) -> String {
        type_name.to_string()
    }
}

pub struct AdminViewTypeManager {
    view_types: Vec<Box<dyn AdminViewType>>,
    default_views: bool,
}

impl Default for AdminViewTypeManager {
    fn default() -> Self {
        Self {
            view_types: vec![],
            default_views: true,
        }
    }
}

impl AdminViewTypeManager {
    /// A manager with the table and single-content types registered.
    pub fn with_builtin_types() -> Self {
        Self {
            view_types: vec![
                Box::new(TableAdminViewType),
                Box::new(SingleContentAdminViewType),
            ],
            default_views: true,
        }
    }

    pub fn register(&mut self, view_type: Box<dyn AdminViewType>) -> Result<(), AdminViewError> {
        if self.view_type(view_type.directive_name()).is_some() {
            return Err(AdminViewError::DuplicateAdminViewType(
                view_type.directive_name().to_string(),
            ));
        }

        self.view_types.push(view_type);
        Ok(())
    }

    /// Whether content types without a view of their own get a default one.
    pub fn set_default_views(&mut self, default_views: bool) -> &mut Self {
        self.default_views = default_views;
        self
    }

    pub fn view_type(&self, directive_name: &str) -> Option<&dyn AdminViewType> {
        self.view_types
            .iter()
            .find(|view_type| view_type.directive_name() == directive_name)
            .map(|view_type| view_type.as_ref())
    }

    /// Build the views declared in `document`, followed by the default views.
    ///
    /// Declared views come in fragment-name order, default views in content-type order.
    #[instrument(name = "AdminViewTypeManager::build_views", skip_all)]
    pub fn build_views(
        &self,
        document: &ExecutableDocument,
        content_types: &[ContentType],
    ) -> Result<Vec<AdminView>, AdminViewError> {
        let mut fragment_names = document.fragments.keys().collect::<Vec<_>>();
        fragment_names.sort_by(|a, b| a.as_str().cmp(b.as_str()));

        let mut views = vec![];

        for fragment_name in fragment_names {
            if let Some(view) = self.build_declared_view(fragment_name, document, content_types)? {
                views.push(view);
            }
        }

        if self.default_views {
            if let Some(default_type) = self.view_type(DEFAULT_ADMIN_VIEW_TYPE) {
                for content_type in content_types {
                    if views.iter().any(|view| view.type_name() == content_type.id) {
                        continue;
                    }

                    debug!(content_type = %content_type.id, "Adding default admin view");
                    let mut view = AdminViewBuilder::new(
                        default_type.return_type(&content_type.id),
                        default_type.category(),
                    )
                    .content_type(content_type)
                    .build()?;
                    view.set_permissions(content_type.permissions.clone());
                    default_type.decorate(&mut view);

                    views.push(view);
                }
            }
        }

        Ok(views)
    }

    fn build_declared_view(
        &self,
        fragment_name: &Name,
        document: &ExecutableDocument,
        content_types: &[ContentType],
    ) -> Result<Option<AdminView>, AdminViewError> {
        let definition = &document.fragments[fragment_name];

        let mut marked = definition.node.directives.iter().filter_map(|directive| {
            self.view_type(directive.node.name.node.as_str())
                .map(|view_type| (view_type, directive))
        });

        let (view_type, directive) = match (marked.next(), marked.next()) {
            (None, _) => return Ok(None),
            (Some(marked), None) => marked,
            (Some(_), Some(_)) => {
                return Err(AdminViewError::MultipleAdminViewDirectives(
                    fragment_name.to_string(),
                    definition.pos,
                ))
            }
        };

        let directive = FieldDirective::from_directive(directive)?;
        let settings = AdminViewSettings::from_value(directive.argument("settings"))?;
        let config = view_config(directive.argument("config"))?;

        let type_name = definition.node.type_condition.node.on.node.as_str();
        let content_type = content_types
            .iter()
            .find(|content_type| content_type.id == type_name);

        let builder = AdminViewBuilder::new(view_type.return_type(type_name), view_type.category())
            .fragment(fragment_name, &definition.node)
            .named_fragments(&document.fragments)
            .settings(settings)
            .config(config);

        let mut view = match content_type {
            Some(content_type) => {
                let mut view = builder.content_type(content_type).build()?;
                view.set_permissions(content_type.permissions.clone());
                view
            }
            None => builder.build()?,
        };
        view_type.decorate(&mut view);

        Ok(Some(view))
    }
}

fn view_config(value: Option<&ConstValue>) -> Result<Map<String, Value>, AdminViewError> {
    match value {
        None | Some(ConstValue::Null) => Ok(Map::new()),
        Some(value) => {
            match value
                .clone()
                .into_json()
                .map_err(|e| AdminViewError::MalformedSettings(e.to_string()))?
            {
                Value::Object(config) => Ok(config),
                other => Err(AdminViewError::MalformedSettings(format!(
                    "config must be an object, got {other}"
                ))),
            }
        }
    }
}
