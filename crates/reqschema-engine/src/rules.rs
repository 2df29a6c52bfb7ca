//! Rule compiler
//!
//! Walks a schema tree and produces one rule list per dotted path. Rule
//! lists are built in a fixed order so output is deterministic:
//!
//! 1. `nullable`
//! 2. presence (`required`, `present` or `required_with:<parent>`)
//! 3. base type
//! 4. extension hints (`date_format`, `mimes`, `pattern`, `validation`)
//! 5. enumeration
//! 6. bounds
//! 7. schema pattern

use indexmap::IndexMap;
use reqschema_core::{
    CompileError, Enumeration, IntegerGuard, Rule, SchemaKind, SchemaNode, TypeRule,
};
use serde::Serialize;

use crate::hints::{ConstraintKind, ExtensionHints};
use crate::path::{FieldPath, PathBuilder};
use crate::registry::RuleTypeResolver;
use crate::required::RequiredSet;

/// Dotted path to rule list
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: IndexMap<String, Vec<Rule>>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry; an existing key keeps its first rule list
    pub fn insert(&mut self, key: String, rules: Vec<Rule>) {
        if self.rules.contains_key(&key) {
            tracing::warn!(path = %key, "duplicate rule path ignored");
            return;
        }
        tracing::trace!(path = %key, count = rules.len(), "emitted rules");
        self.rules.insert(key, rules);
    }

    /// Add every entry of `other`
    pub fn extend(&mut self, other: RuleSet) {
        for (key, rules) in other.rules {
            self.insert(key, rules);
        }
    }

    pub fn get(&self, key: &str) -> Option<&[Rule]> {
        self.rules.get(key).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Rule])> {
        self.rules.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

/// Compiles schema trees into [`RuleSet`]s
pub struct RuleCompiler<'a> {
    resolver: &'a dyn RuleTypeResolver,
}

impl<'a> RuleCompiler<'a> {
    /// `resolver` instantiates identifiers from `validation` hints
    pub fn new(resolver: &'a dyn RuleTypeResolver) -> Self {
        Self { resolver }
    }

    /// Compile `node` placed under `ancestors`
    ///
    /// `required` is the required set of the node's parent.
    pub fn compile(
        &self,
        node: &SchemaNode,
        ancestors: &FieldPath,
        required: &RequiredSet,
    ) -> Result<RuleSet, CompileError> {
        let mut out = RuleSet::new();
        self.compile_into(node, ancestors, required, &mut out)?;
        Ok(out)
    }

    fn compile_into(
        &self,
        node: &SchemaNode,
        ancestors: &FieldPath,
        required: &RequiredSet,
        out: &mut RuleSet,
    ) -> Result<(), CompileError> {
        let resolved = PathBuilder::resolve(ancestors, node)?;

        let presence = presence_rule(node, &resolved.name, ancestors, required);
        out.insert(resolved.key(), self.node_rules(node, presence));

        if node.kind == Some(SchemaKind::Array) {
            return self.compile_items(node, &resolved.path, out);
        }

        if !node.properties.is_empty() {
            let own = RequiredSet::resolve(node.required.as_deref());
            for child in &node.properties {
                self.compile_into(child, &resolved.path, &own, out)?;
            }
        }

        Ok(())
    }

    /// Entries below `path.*` for the array `node` at `path`
    fn compile_items(
        &self,
        node: &SchemaNode,
        path: &FieldPath,
        out: &mut RuleSet,
    ) -> Result<(), CompileError> {
        let items = node
            .items
            .as_deref()
            .ok_or_else(|| CompileError::MissingItemSchema { path: path.key() })?;
        let wildcard = path.wildcard();

        match items.item_properties() {
            Some(properties) => {
                let own = RequiredSet::resolve(items.required.as_deref());
                for child in properties {
                    self.compile_into(child, &wildcard, &own, out)?;
                }
            }
            None => {
                // An item has no name of its own, so it is never required
                out.insert(wildcard.key(), self.node_rules(items, None));
                if items.kind == Some(SchemaKind::Array) {
                    self.compile_items(items, &wildcard, out)?;
                }
            }
        }

        Ok(())
    }

    fn node_rules(&self, node: &SchemaNode, presence: Option<Rule>) -> Vec<Rule> {
        let hints = ExtensionHints::parse(&node.extensions);
        let suppressed = hints.suppressed();
        let mut rules = Vec::new();

        if node.is_nullable() {
            rules.push(Rule::Nullable);
        }
        rules.extend(presence);

        match node.kind {
            Some(SchemaKind::String) => rules.push(Rule::Type(TypeRule::String)),
            Some(SchemaKind::Number) => rules.push(Rule::Type(TypeRule::Numeric)),
            Some(SchemaKind::Integer) => {
                rules.push(Rule::object(IntegerGuard));
                rules.push(Rule::Type(TypeRule::Integer));
            }
            Some(SchemaKind::Boolean) => rules.push(Rule::Type(TypeRule::Boolean)),
            Some(SchemaKind::Array | SchemaKind::Object) => {
                rules.push(Rule::Type(TypeRule::Array))
            }
            None => {}
        }

        if let Some(format) = &hints.date_format {
            rules.push(Rule::DateFormat(format.clone()));
        }
        if let Some(mimes) = &hints.mimes {
            rules.retain(|rule| !matches!(rule, Rule::Type(_) | Rule::Object(_)));
            rules.push(Rule::Type(TypeRule::File));
            rules.push(Rule::Mimes(mimes.clone()));
        }
        if let Some(pattern) = &hints.pattern {
            rules.push(Rule::Regex(pattern.clone()));
        }
        rules.extend(hints.validation.iter().map(|id| self.resolver.resolve(id)));

        match &node.constraints.enumeration {
            Some(Enumeration::TypeRef(type_ref)) => rules.push(Rule::Enum(type_ref.clone())),
            Some(Enumeration::Values(values)) => rules.push(Rule::In(values.clone())),
            None => {}
        }

        let c = &node.constraints;
        let allowed = |kind: ConstraintKind| !suppressed.contains(&kind);

        if let Some(n) = c.maximum.clone().filter(|_| allowed(ConstraintKind::Maximum)) {
            rules.push(Rule::Max(n));
        }
        if let Some(n) = c.max_length.filter(|_| allowed(ConstraintKind::MaxLength)) {
            rules.push(Rule::Max(n.into()));
        }
        if let Some(n) = c.minimum.clone().filter(|_| allowed(ConstraintKind::Minimum)) {
            rules.push(Rule::Min(n));
        }
        if let Some(n) = c.min_length.filter(|_| allowed(ConstraintKind::MinLength)) {
            rules.push(Rule::Min(n.into()));
        }
        if let Some(n) = c.max_items.filter(|_| allowed(ConstraintKind::MaxItems)) {
            rules.push(Rule::Max(n.into()));
        }
        if let Some(n) = c.min_items.filter(|_| allowed(ConstraintKind::MinItems)) {
            rules.push(Rule::Min(n.into()));
        }

        if let Some(pattern) = c.pattern.as_ref().filter(|_| allowed(ConstraintKind::Pattern)) {
            rules.push(Rule::Regex(format!("/{}/", pattern)));
        }

        rules
    }
}

/// Presence rule for a node named `name` in its parent's `required` set
///
/// A required object is always `present`, whatever its nullability or depth.
fn presence_rule(
    node: &SchemaNode,
    name: &str,
    ancestors: &FieldPath,
    required: &RequiredSet,
) -> Option<Rule> {
    if !required.contains(name) {
        return None;
    }
    if node.kind == Some(SchemaKind::Object) {
        return Some(Rule::Present);
    }
    if node.is_nullable() {
        return None;
    }

    if !ancestors.is_root() {
        return Some(Rule::RequiredWith(ancestors.key()));
    }

    Some(match node.kind {
        Some(kind) if kind.is_container() => Rule::Present,
        _ => Rule::Required,
    })
}
