// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The content-type schema an admin view is derived from.
//!
//! Content types come from the schema registry (outside this crate) as plain data, typically
//! a JSON document such as:
//!
//! ```json
//! [
//!   {
//!     "id": "Page",
//!     "name": "Pages",
//!     "fields": [
//!       { "id": "title", "type": "text", "required": true },
//!       { "id": "secret", "type": "password" }
//!     ]
//!   }
//! ]
//! ```

use serde::Deserialize;

/// Field type tag of fields that must never be exposed through an admin view.
pub const PASSWORD_FIELD_TYPE: &str = "password";

const DEFAULT_RETURN_TYPE: &str = "String";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ContentType {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub fields: Vec<ContentTypeField>,
    /// Permission rules handed to every admin view built for this content type.
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl ContentType {
    pub fn new(id: impl Into<String>, fields: Vec<ContentTypeField>) -> Self {
        Self {
            id: id.into(),
            name: None,
            fields,
            permissions: vec![],
        }
    }

    /// The display name, if one was given (an empty name counts as none)
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    pub fn field(&self, id: &str) -> Option<&ContentTypeField> {
        self.fields.iter().find(|field| field.id == id)
    }

    /// Ids of the password fields, in schema order.
    pub fn password_field_ids(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|field| field.is_password())
            .map(|field| field.id.as_str())
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ContentTypeField {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Field type tag (`text`, `reference`, `password`, ...), also used as the UI field type.
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default = "default_return_type")]
    pub return_type: String,
    #[serde(default)]
    pub non_null: bool,
    #[serde(default)]
    pub list_of: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_return_type() -> String {
    DEFAULT_RETURN_TYPE.to_string()
}

impl ContentTypeField {
    pub fn new(id: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            field_type: field_type.into(),
            return_type: default_return_type(),
            non_null: false,
            list_of: false,
            required: false,
            description: None,
        }
    }

    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.id)
    }

    pub fn is_password(&self) -> bool {
        self.field_type == PASSWORD_FIELD_TYPE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_with_defaults() {
        let content_types: Vec<ContentType> = serde_json::from_str(
            r#"[{
                "id": "Page",
                "fields": [
                    { "id": "title", "type": "text", "required": true, "description": "Headline" },
                    { "id": "secret", "type": "password", "returnType": "String" }
                ]
            }]"#,
        )
        .unwrap();

        let page = &content_types[0];
        assert_eq!(page.name(), None);
        assert!(page.permissions.is_empty());

        let title = page.field("title").unwrap();
        assert_eq!(title.display_name(), "title");
        assert_eq!(title.return_type, "String");
        assert!(title.required);
        assert!(!title.non_null);
        assert_eq!(title.description.as_deref(), Some("Headline"));

        assert_eq!(page.password_field_ids().collect::<Vec<_>>(), vec!["secret"]);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = serde_json::from_str::<ContentTypeField>(r#"{ "id": "a", "type": "text", "hidden": true }"#);
        assert!(result.is_err());
    }
}
