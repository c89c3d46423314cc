// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_value::ConstValue;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::AdminViewError;

/// Title template understood by the client's mustache renderer: `title`, else `name`, else
/// `username`, else `<_name> <_category>` followed by `: <_meta.id>` when an id is present.
pub const DEFAULT_TITLE_PATTERN: &str = "{{^name}}{{^username}}{{ title }}{{/username}}{{/name}}{{^title}}{{^username}}{{ name }}{{/username}}{{/title}}{{^name}}{{^title}}{{username}}{{/title}}{{/name}}{{^name}}{{^title}}{{^username}}{{ _name }} {{ _category }}{{#_meta.id }}: {{ _meta.id }}{{/_meta.id}}{{/username}}{{/title}}{{/name}}";

pub const DEFAULT_VIEW_NAME: &str = "Untitled";

/// Display settings of an admin view, as given by the `settings` argument of an admin view
/// directive. Every entry is optional and defaulted on its own when the view is built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminViewSettings {
    pub name: Option<String>,
    pub title_pattern: Option<String>,
    pub icon: Option<String>,
    pub groups: Vec<AdminViewGroup>,
}

/// A UI grouping. Keys other than `name` and `icon` are passed through to the client.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AdminViewGroup {
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct AdminViewSettingsSer {
    name: Option<String>,
    title_pattern: Option<String>,
    icon: Option<String>,
    groups: Option<GroupsSer>,
}

/// `groups` may be a single group object or a list of them.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum GroupsSer {
    Single(AdminViewGroup),
    Many(Vec<AdminViewGroup>),
}

impl From<GroupsSer> for Vec<AdminViewGroup> {
    fn from(groups: GroupsSer) -> Self {
        match groups {
            GroupsSer::Single(group) => vec![group],
            GroupsSer::Many(groups) => groups,
        }
    }
}

impl From<AdminViewSettingsSer> for AdminViewSettings {
    fn from(settings: AdminViewSettingsSer) -> Self {
        fn non_empty(value: Option<String>) -> Option<String> {
            value.filter(|value| !value.is_empty())
        }

        Self {
            name: non_empty(settings.name),
            title_pattern: non_empty(settings.title_pattern),
            icon: non_empty(settings.icon),
            groups: settings.groups.map(Vec::from).unwrap_or_default(),
        }
    }
}

impl AdminViewSettings {
    /// Read settings from the value of a directive's `settings` argument. A missing or null
    /// value gives the default settings.
    pub fn from_value(value: Option<&ConstValue>) -> Result<Self, AdminViewError> {
        match value {
            None | Some(ConstValue::Null) => Ok(Self::default()),
            Some(value) => {
                let json = value
                    .clone()
                    .into_json()
                    .map_err(|e| AdminViewError::MalformedSettings(e.to_string()))?;
                let settings: AdminViewSettingsSer = serde_json::from_value(json)
                    .map_err(|e| AdminViewError::MalformedSettings(e.to_string()))?;

                Ok(settings.into())
            }
        }
    }
}
