//! Attribute label compiler
//!
//! Produces the human-readable name of every path the rule compiler emits,
//! so validation messages can say "Row 3 of items: code" instead of
//! `items.2.code`. Labels of fields inside array items refer to the
//! outermost enclosing array, whose description is captured once and
//! threaded down.

use indexmap::IndexMap;
use reqschema_core::{CompileError, MessageFormatter, SchemaKind, SchemaNode};
use serde::Serialize;

use crate::path::{FieldPath, PathBuilder};

/// Dotted path to label
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LabelTable {
    labels: IndexMap<String, String>,
}

impl LabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a label; an existing key keeps its first label
    pub fn insert(&mut self, key: String, label: String) {
        if self.labels.contains_key(&key) {
            tracing::warn!(path = %key, "duplicate label path ignored");
            return;
        }
        self.labels.insert(key, label);
    }

    pub fn extend(&mut self, other: LabelTable) {
        for (key, label) in other.labels {
            self.insert(key, label);
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.labels.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Compiles schema trees into [`LabelTable`]s
pub struct LabelCompiler<'a> {
    formatter: &'a dyn MessageFormatter,
}

impl<'a> LabelCompiler<'a> {
    pub fn new(formatter: &'a dyn MessageFormatter) -> Self {
        Self { formatter }
    }

    /// Labels for a top-level field
    pub fn compile_field(&self, node: &SchemaNode) -> Result<LabelTable, CompileError> {
        self.compile(node, &FieldPath::root(), false, "")
    }

    /// Labels for `node` placed under `ancestors`
    ///
    /// `inside_array_item` is set below an array's `.*` segment, and
    /// `root_array_description` is the description of the outermost
    /// enclosing array (empty if not yet known).
    pub fn compile(
        &self,
        node: &SchemaNode,
        ancestors: &FieldPath,
        inside_array_item: bool,
        root_array_description: &str,
    ) -> Result<LabelTable, CompileError> {
        let mut out = LabelTable::new();
        self.compile_into(node, ancestors, inside_array_item, root_array_description, &mut out)?;
        Ok(out)
    }

    fn compile_into(
        &self,
        node: &SchemaNode,
        ancestors: &FieldPath,
        inside_array_item: bool,
        root: &str,
        out: &mut LabelTable,
    ) -> Result<(), CompileError> {
        let resolved = PathBuilder::resolve(ancestors, node)?;
        let description = node.label();
        let nested = inside_array_item && ancestors.contains_wildcard();
        let root_name = || root_array_name(ancestors, root);

        match node.kind {
            Some(SchemaKind::Array) => {
                let wildcard = resolved.path.wildcard();
                if nested {
                    let array_name = root_name();
                    out.insert(
                        resolved.key(),
                        self.formatter.nested_array_item_label(&array_name, &description),
                    );
                    out.insert(
                        wildcard.key(),
                        self.formatter.nested_array_items_label(&array_name, &description),
                    );
                } else {
                    out.insert(resolved.key(), description.clone());
                    out.insert(wildcard.key(), self.formatter.array_items_label(&description));
                }

                let items = node
                    .items
                    .as_deref()
                    .ok_or_else(|| CompileError::MissingItemSchema { path: resolved.key() })?;

                // Arrays of arrays and scalar items only get the `.*` label
                if let Some(properties) = items.item_properties() {
                    let root = if nested { root } else { description.as_str() };
                    for child in properties {
                        self.compile_into(child, &wildcard, true, root, out)?;
                    }
                }
            }
            _ if node.kind == Some(SchemaKind::Object) || !node.properties.is_empty() => {
                out.insert(resolved.key(), description.clone());

                let root = match (root.is_empty(), inside_array_item) {
                    (false, _) => root,
                    (true, true) => description.as_str(),
                    (true, false) => "",
                };
                for child in &node.properties {
                    self.compile_into(child, &resolved.path, inside_array_item, root, out)?;
                }
            }
            _ if nested => {
                let label = self.formatter.nested_array_item_label(&root_name(), &description);
                out.insert(resolved.key(), label);
            }
            _ => out.insert(resolved.key(), description),
        }

        Ok(())
    }
}

/// Name of the outermost array for nested labels
///
/// Falls back to the path before the first wildcard when no description was
/// captured.
fn root_array_name(ancestors: &FieldPath, root: &str) -> String {
    if root.is_empty() {
        ancestors.before_wildcard()
    } else {
        root.to_string()
    }
}
