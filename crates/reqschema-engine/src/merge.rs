//! Merging parameter bindings into structural schemas
//!
//! A binding never overwrites what the schema already says, except for the
//! name: a binding name always wins over the schema title.

use reqschema_core::{Binding, SchemaNode};

use crate::required::RequiredSet;

/// Merge `binding` into `schema`
///
/// A required binding adds the field's name to `enclosing`, the required
/// set of the node that contains the field.
pub fn merge_binding(
    mut schema: SchemaNode,
    binding: &Binding,
    enclosing: &mut RequiredSet,
) -> SchemaNode {
    if let Some(name) = binding.key_name(schema.kind) {
        schema.title = Some(name);
    }

    if binding.required == Some(true) {
        match schema.display_name() {
            Some(name) => {
                enclosing.insert(name);
            }
            None => tracing::warn!("required binding on a schema without a name"),
        }
    }

    if schema.description.is_none() {
        schema.description.clone_from(&binding.description);
    }

    for (name, value) in &binding.extensions {
        schema
            .extensions
            .entry(name.clone())
            .or_insert_with(|| value.clone());
    }

    schema.constraints.fill_missing(&binding.constraints);
    if schema.nullable.is_none() {
        schema.nullable = binding.nullable;
    }

    tracing::debug!(
        name = ?schema.display_name(),
        location = ?binding.location,
        required = binding.required == Some(true),
        "merged parameter binding"
    );

    schema
}

/// Merge every binding attached to nodes of the tree
///
/// Bindings on object properties feed the object's own `required` list;
/// a binding on an array item schema has no enclosing set to join.
pub fn merge_tree(mut node: SchemaNode, enclosing: &mut RequiredSet) -> SchemaNode {
    if let Some(binding) = node.binding.take() {
        node = merge_binding(node, &binding, enclosing);
    }

    if !node.properties.is_empty() {
        let mut required = RequiredSet::resolve(node.required.as_deref());
        let declared = required.len();

        let properties = std::mem::take(&mut node.properties);
        node.properties = properties
            .into_iter()
            .map(|child| merge_tree(child, &mut required))
            .collect();

        if required.len() > declared {
            node.required = Some(required.to_vec());
        }
    }

    if let Some(items) = node.items.take() {
        let mut unnamed = RequiredSet::new();
        node.items = Some(Box::new(merge_tree(*items, &mut unnamed)));
    }

    node
}
