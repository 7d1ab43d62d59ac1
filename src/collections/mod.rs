pub mod document;
pub mod loader;
pub mod schema;
pub mod types;

use std::collections::HashMap;

use liquid::model::Value;
use liquid::Object;

pub use document::{Collection, Document, DocumentState};
pub use loader::{load_collections, LoadOptions};
pub use schema::{CollectionSchema, FieldKind, FieldRule, UnknownFields};

/// Expose all collections to Liquid templates, keyed by label.
///
/// The result merges into the `site` object, so templates can iterate
/// `site.posts` or `site.notes`.
pub fn collections_to_liquid(collections: &HashMap<String, Collection>) -> Object {
    let mut obj = Object::new();
    for (label, collection) in collections {
        obj.insert(label.clone().into(), collection.to_liquid());
    }
    obj
}
