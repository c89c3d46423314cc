// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Admin view configurations derived from content types and GraphQL fragments.
//!
//! An [AdminView] pairs the fragment text a generic admin client queries with a description
//! of every field it renders. Views are built once from configuration, either one at a time
//! with [AdminViewBuilder] or for a whole document with [AdminViewTypeManager].

mod admin_view;
pub mod content_type;
pub mod document;
pub mod error;
pub mod field;
mod printer;
mod resolver;
pub mod settings;
pub mod view_type;

pub use admin_view::{AdminView, AdminViewBuilder};
pub use content_type::{ContentType, ContentTypeField};
pub use document::parse_admin_document;
pub use error::AdminViewError;
pub use field::{AdminViewField, FieldDirective};
pub use printer::print_fragment;
pub use settings::{AdminViewGroup, AdminViewSettings};
pub use view_type::{AdminViewType, AdminViewTypeManager};
