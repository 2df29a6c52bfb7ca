//! Request-level compilation pipeline
//!
//! Compiles every field of a [`RequestDefinition`] into one rule set and
//! one label table. Consistency diagnostics are collected across all
//! fields and reported together.

use reqschema_core::{
    CompileError, Diagnostic, FieldDefinition, MessageFormatter, RequestDefinition, SchemaNode,
};
use serde::Serialize;

use crate::consistency::ConsistencyChecker;
use crate::labels::{LabelCompiler, LabelTable};
use crate::merge::{merge_binding, merge_tree};
use crate::path::FieldPath;
use crate::registry::RuleTypeResolver;
use crate::required::RequiredSet;
use crate::rules::{RuleCompiler, RuleSet};

/// Output of a successful request compilation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompiledRequest {
    pub rules: RuleSet,
    pub labels: LabelTable,
}

/// Compiles request definitions
pub struct RequestCompiler<'a> {
    rules: RuleCompiler<'a>,
    labels: LabelCompiler<'a>,
}

impl<'a> RequestCompiler<'a> {
    pub fn new(resolver: &'a dyn RuleTypeResolver, formatter: &'a dyn MessageFormatter) -> Self {
        Self {
            rules: RuleCompiler::new(resolver),
            labels: LabelCompiler::new(formatter),
        }
    }

    /// Compile rules and labels for every field of `request`
    ///
    /// Fails on the first structural error, or with every consistency
    /// diagnostic once all fields have been checked.
    pub fn compile(&self, request: &RequestDefinition) -> Result<CompiledRequest, CompileError> {
        let _span = tracing::debug_span!("compile_request", request = %request.name).entered();

        let mut required = RequiredSet::for_request(request);
        let mut compiled = CompiledRequest::default();
        let mut diagnostics = Vec::new();

        for field in &request.fields {
            let Some(schema) = resolve_schema(field, &mut required) else {
                continue;
            };

            compiled
                .rules
                .extend(self.rules.compile(&schema, &FieldPath::root(), &required)?);
            compiled.labels.extend(self.labels.compile_field(&schema)?);
            let checked = ConsistencyChecker::check_field(field, &schema);
            diagnostics.extend(tag(checked, &request.name));
        }

        if !diagnostics.is_empty() {
            tracing::debug!(count = diagnostics.len(), "schema declaration is inconsistent");
            return Err(CompileError::InconsistentSchemaDeclaration {
                request: request.name.clone(),
                diagnostics,
            });
        }

        tracing::debug!(
            rules = compiled.rules.len(),
            labels = compiled.labels.len(),
            "compiled request"
        );
        Ok(compiled)
    }

    /// Run only the merge and consistency passes
    pub fn check(&self, request: &RequestDefinition) -> Vec<Diagnostic> {
        let _span = tracing::debug_span!("check_request", request = %request.name).entered();

        let mut required = RequiredSet::for_request(request);
        let mut diagnostics = Vec::new();

        for field in &request.fields {
            if let Some(schema) = resolve_schema(field, &mut required) {
                let checked = ConsistencyChecker::check_field(field, &schema);
                diagnostics.extend(tag(checked, &request.name));
            }
        }

        diagnostics
    }
}

/// Effective schema of a field with every binding merged in
///
/// The field's own name stands in for a missing property key.
fn resolve_schema(field: &FieldDefinition, required: &mut RequiredSet) -> Option<SchemaNode> {
    let Some(schema) = &field.schema else {
        tracing::debug!(field = %field.name, "field has no schema, skipping");
        return None;
    };

    let mut schema = schema.clone();
    if schema.property_key.is_none() {
        schema.property_key = Some(field.name.clone());
    }

    if let Some(binding) = &field.binding {
        schema = merge_binding(schema, binding, required);
    }

    Some(merge_tree(schema, required))
}

fn tag(diagnostics: Vec<Diagnostic>, request: &str) -> impl Iterator<Item = Diagnostic> + '_ {
    diagnostics.into_iter().map(move |d| d.with_request(request))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RuleRegistry;
    use pretty_assertions::assert_eq;
    use reqschema_core::{Binding, DeclaredType, MessageKey, Rule, SchemaKind, TypeRule};

    struct KeyOnly;

    impl MessageFormatter for KeyOnly {
        fn format(&self, key: MessageKey, _params: &[(&str, &str)]) -> String {
            key.to_string()
        }
    }

    fn compile(request: &RequestDefinition) -> Result<CompiledRequest, CompileError> {
        let registry = RuleRegistry::with_builtins();
        RequestCompiler::new(&registry, &KeyOnly).compile(request)
    }

    #[test]
    fn request_required_set_applies_to_top_level_fields() {
        let request = RequestDefinition::new("StoreUser")
            .with_required(["name"])
            .with_field(FieldDefinition::new(
                "name",
                DeclaredType::new("string"),
                SchemaNode::typed("name", SchemaKind::String),
            ))
            .with_field(FieldDefinition::new(
                "nickname",
                DeclaredType::new("string"),
                SchemaNode::typed("nickname", SchemaKind::String),
            ));

        let compiled = compile(&request).unwrap();
        assert_eq!(
            compiled.rules.get("name").unwrap(),
            &[Rule::Required, Rule::Type(TypeRule::String)]
        );
        assert_eq!(
            compiled.rules.get("nickname").unwrap(),
            &[Rule::Type(TypeRule::String)]
        );
    }

    #[test]
    fn required_binding_marks_field_required() {
        let schema = SchemaNode::new()
            .with_kind(SchemaKind::Array)
            .with_items(SchemaNode::new().with_kind(SchemaKind::String));
        let request = RequestDefinition::new("Search").with_field(
            FieldDefinition::new("codes", DeclaredType::new("array"), schema)
                .with_binding(Binding::named("Code[]").with_required(true)),
        );

        let compiled = compile(&request).unwrap();
        assert_eq!(
            compiled.rules.get("Code").unwrap(),
            &[Rule::Present, Rule::Type(TypeRule::Array)]
        );
        assert_eq!(
            compiled.rules.get("Code.*").unwrap(),
            &[Rule::Type(TypeRule::String)]
        );
        assert_eq!(compiled.labels.get("Code.*"), Some("array_items"));
    }

    #[test]
    fn field_name_names_an_unnamed_schema() {
        let request = RequestDefinition::new("Paging").with_field(FieldDefinition::new(
            "page",
            DeclaredType::new("int"),
            SchemaNode::new().with_kind(SchemaKind::Integer),
        ));

        let compiled = compile(&request).unwrap();
        assert!(compiled.rules.get("page").is_some());
        assert_eq!(compiled.labels.get("page"), Some("page"));
    }

    #[test]
    fn fields_without_schema_are_skipped() {
        let request = RequestDefinition::new("Empty").with_field(FieldDefinition {
            name: "raw".to_string(),
            declared: DeclaredType::new("string"),
            schema: None,
            binding: None,
        });

        let compiled = compile(&request).unwrap();
        assert!(compiled.rules.is_empty());
        assert!(compiled.labels.is_empty());
    }

    #[test]
    fn all_fields_are_checked_before_failing() {
        let request = RequestDefinition::new("Broken")
            .with_field(FieldDefinition::new(
                "a",
                DeclaredType::nullable("int"),
                SchemaNode::typed("a", SchemaKind::Integer),
            ))
            .with_field(FieldDefinition::new(
                "b",
                DeclaredType::new("string"),
                SchemaNode::typed("b", SchemaKind::Boolean),
            ));

        let err = compile(&request).unwrap_err();
        let fields: Vec<_> = err.diagnostics().iter().map(|d| d.field.as_str()).collect();
        assert_eq!(fields, vec!["a", "b"]);
        assert!(err
            .diagnostics()
            .iter()
            .all(|d| d.request.as_deref() == Some("Broken")));
    }

    #[test]
    fn check_reports_without_failing() {
        let registry = RuleRegistry::with_builtins();
        let request = RequestDefinition::new("Broken").with_field(FieldDefinition::new(
            "a",
            DeclaredType::new("array"),
            SchemaNode::typed("a", SchemaKind::String),
        ));

        let diagnostics = RequestCompiler::new(&registry, &KeyOnly).check(&request);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn structural_errors_abort() {
        let request = RequestDefinition::new("Broken").with_field(FieldDefinition::new(
            "list",
            DeclaredType::new("array"),
            SchemaNode::typed("list", SchemaKind::Array),
        ));

        assert!(matches!(
            compile(&request),
            Err(CompileError::MissingItemSchema { path }) if path == "list"
        ));
    }
}
