use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::front_matter::types::parse_date_value;
use crate::utils::error::QuillError;

/// The value kinds a schema field may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    String,
    Date,
    Bool,
    Integer,
    StringList,
}

impl FieldKind {
    fn name(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Date => "date",
            FieldKind::Bool => "bool",
            FieldKind::Integer => "integer",
            FieldKind::StringList => "string_list",
        }
    }
}

/// Rule for a single front matter field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldRule {
    /// Expected value kind
    #[serde(rename = "type")]
    pub kind: FieldKind,

    /// Whether the field must be present
    #[serde(default)]
    pub required: bool,
}

/// Policy for fields the schema does not name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownFields {
    /// Extra fields pass through untouched
    #[default]
    Allow,
    /// Extra fields fail validation
    Deny,
}

/// Front matter schema for one collection, declared in the site config:
///
/// ```yaml
/// collections:
///   posts:
///     schema:
///       fields:
///         title: { type: string, required: true }
///         date: { type: date, required: true }
///         tags: { type: string_list }
///       unknown_fields: deny
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionSchema {
    /// Field rules, keyed by front matter field name
    pub fields: BTreeMap<String, FieldRule>,

    /// What to do with fields not named above
    #[serde(default)]
    pub unknown_fields: UnknownFields,
}

impl CollectionSchema {
    /// Validate one document's raw front matter mapping against this schema.
    ///
    /// Returns the first violation found, checking declared fields in
    /// schema order before applying the unknown-field policy.
    pub fn validate(
        &self,
        doc_path: &str,
        front_matter: &serde_yaml::Mapping,
    ) -> Result<(), QuillError> {
        for (name, rule) in &self.fields {
            let key = Value::String(name.clone());
            match front_matter.get(&key) {
                None | Some(Value::Null) => {
                    if rule.required {
                        return Err(QuillError::Schema {
                            path: doc_path.to_string(),
                            field: name.clone(),
                            reason: "is required but missing".to_string(),
                        });
                    }
                }
                Some(value) => {
                    if !value_matches(value, rule.kind) {
                        return Err(QuillError::Schema {
                            path: doc_path.to_string(),
                            field: name.clone(),
                            reason: format!(
                                "expected {}, got {}",
                                rule.kind.name(),
                                value_kind_name(value)
                            ),
                        });
                    }
                }
            }
        }

        if self.unknown_fields == UnknownFields::Deny {
            for key in front_matter.keys() {
                if let Value::String(name) = key {
                    if !self.fields.contains_key(name) {
                        return Err(QuillError::Schema {
                            path: doc_path.to_string(),
                            field: name.clone(),
                            reason: "is not declared in the collection schema".to_string(),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

/// Check a YAML value against a declared field kind
fn value_matches(value: &Value, kind: FieldKind) -> bool {
    match kind {
        FieldKind::String => value.is_string(),
        FieldKind::Bool => value.is_bool(),
        FieldKind::Integer => value.is_i64(),
        FieldKind::Date => match value {
            Value::String(s) => parse_date_value(s).is_some(),
            _ => false,
        },
        // A bare string is accepted as a one-element list, matching the
        // front matter convention for tags and categories
        FieldKind::StringList => match value {
            Value::String(_) => true,
            Value::Sequence(items) => items.iter().all(|v| v.is_string()),
            _ => false,
        },
    }
}

fn value_kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
